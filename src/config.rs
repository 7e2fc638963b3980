//! Configuration for repobox
//!
//! `RepoboxConfig` is an explicit value handed to the scanner and the pipeline;
//! nothing reads configuration from global state. `RepoboxConfig::default()` is
//! pure, `RepoboxConfig::from_env()` overlays environment variables on top of it.
//!
//! # Environment Variables
//!
//! - `REPOBOX_MAX_CONTENT_BYTES`: per-file read cap - default: "16384"
//! - `REPOBOX_MAX_FILES`: maximum number of files listed - default: "5000"
//! - `REPOBOX_MAX_DEPTH`: maximum directory depth walked - default: "12"
//! - `REPOBOX_CONFIG_FORMAT`: container config format (yaml|json) - default: "yaml"
//! - `REPOBOX_LOG_LEVEL`: logging level - default: "info"
//!
//! # Example
//!
//! ```no_run
//! use repobox::RepoboxConfig;
//!
//! let config = RepoboxConfig::from_env();
//! config.validate().expect("Invalid configuration");
//! println!("{}", config);
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_MAX_CONTENT_BYTES: usize = 16 * 1024;
const DEFAULT_MAX_FILES: usize = 5000;
const DEFAULT_MAX_DEPTH: usize = 12;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Directory `generate` writes into when no output directory is given
pub const DEFAULT_OUTPUT_DIR: &str = "containerization";

/// Directory names never descended into by the scanner
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    DEFAULT_OUTPUT_DIR,
    ".git",
    "node_modules",
    "__pycache__",
    ".venv",
    "venv",
    "build",
    "dist",
    "target",
    ".tox",
    ".idea",
    ".vscode",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

/// Serialization format of `container-config.*`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFormat {
    #[default]
    Yaml,
    Json,
}

impl ConfigFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }
}

impl FromStr for ConfigFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::ParseError {
                field: "config_format".to_string(),
                error: format!("unknown format '{}' (expected yaml or json)", other),
            }),
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepoboxConfig {
    /// Per-file read cap; longer contents are truncated on a char boundary
    pub max_content_bytes: usize,

    pub max_files: usize,

    pub max_depth: usize,

    /// Directory names skipped at any depth
    pub excluded_dirs: Vec<String>,

    pub config_format: ConfigFormat,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for RepoboxConfig {
    fn default() -> Self {
        Self {
            max_content_bytes: DEFAULT_MAX_CONTENT_BYTES,
            max_files: DEFAULT_MAX_FILES,
            max_depth: DEFAULT_MAX_DEPTH,
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
            config_format: ConfigFormat::Yaml,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl RepoboxConfig {
    /// Defaults overlaid with `REPOBOX_*` environment variables. Values that
    /// fail to parse are ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(v) = env_parse::<usize>("REPOBOX_MAX_CONTENT_BYTES") {
            config.max_content_bytes = v;
        }
        if let Some(v) = env_parse::<usize>("REPOBOX_MAX_FILES") {
            config.max_files = v;
        }
        if let Some(v) = env_parse::<usize>("REPOBOX_MAX_DEPTH") {
            config.max_depth = v;
        }
        if let Some(v) = env_parse::<ConfigFormat>("REPOBOX_CONFIG_FORMAT") {
            config.config_format = v;
        }
        if let Ok(level) = env::var("REPOBOX_LOG_LEVEL") {
            config.log_level = level.to_lowercase();
        }

        config
    }

    /// Checks that numeric limits are in range and the log level is known
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_content_bytes < 256 {
            return Err(ConfigError::ValidationFailed(
                "Max content bytes must be at least 256".to_string(),
            ));
        }
        if self.max_content_bytes > 10_485_760 {
            return Err(ConfigError::ValidationFailed(
                "Max content bytes cannot exceed 10MB".to_string(),
            ));
        }
        if self.max_files == 0 {
            return Err(ConfigError::ValidationFailed(
                "Max files must be at least 1".to_string(),
            ));
        }
        if self.max_depth == 0 || self.max_depth > 64 {
            return Err(ConfigError::ValidationFailed(
                "Max depth must be between 1 and 64".to_string(),
            ));
        }

        if crate::util::logging::try_parse_level(&self.log_level).is_none() {
            return Err(ConfigError::ValidationFailed(format!(
                "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                self.log_level
            )));
        }

        Ok(())
    }

    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.excluded_dirs.iter().any(|d| d == name)
    }
}

fn env_parse<T>(key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = env::var(key).ok()?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(key, value = %raw, error = %e, "Ignoring invalid environment value");
            None
        }
    }
}

impl fmt::Display for RepoboxConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Repobox Configuration:")?;
        writeln!(f, "  Max Content Bytes: {}", self.max_content_bytes)?;
        writeln!(f, "  Max Files: {}", self.max_files)?;
        writeln!(f, "  Max Depth: {}", self.max_depth)?;
        writeln!(f, "  Excluded Dirs: {}", self.excluded_dirs.join(", "))?;
        writeln!(f, "  Config Format: {}", self.config_format)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}
