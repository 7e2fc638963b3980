//! repobox - deterministic repository analysis and containerization
//!
//! This library classifies a source repository (language, framework, package
//! manager, external services, port, environment variables and dependencies)
//! from its file paths and a bounded amount of file content, then synthesizes
//! lifecycle commands and renders containerization artifacts: a Dockerfile, a
//! docker-compose.yml, a `.env.example` and a machine-readable profile.
//!
//! Nothing here executes the generated commands or talks to the network. An
//! optional refinement step validates an externally produced JSON answer and
//! merges it into the profile only when it agrees with the detected stack.
//!
//! # Example
//!
//! ```
//! use repobox::analyze_repository;
//! use std::collections::BTreeMap;
//!
//! let mut contents = BTreeMap::new();
//! contents.insert("requirements.txt".to_string(), "Flask==3.0\n".to_string());
//! contents.insert(
//!     "app.py".to_string(),
//!     "from flask import Flask\napp = Flask(__name__)\napp.run(port=5000)\n".to_string(),
//! );
//!
//! let profile = analyze_repository("/repo", ["app.py", "requirements.txt"], contents);
//! assert_eq!(profile.primary_language.to_string(), "Python");
//! assert_eq!(profile.framework.key(), "flask");
//! assert_eq!(profile.port, 5000);
//! assert!(profile.dockerfile_content.contains("EXPOSE 5000"));
//! ```
//!
//! # Project Structure
//!
//! - [`bootstrap`]: repository walking and the bounded [`RepositoryInput`]
//! - [`stack`]: language, framework, package manager and service detection
//! - [`extractors`]: port, environment variable and dependency extraction
//! - [`commands`]: setup/install/build/run/test command synthesis
//! - [`artifacts`]: Dockerfile, compose, env file and README rendering
//! - [`pipeline`]: the end-to-end analysis and the refinement gate

pub mod artifacts;
pub mod bootstrap;
pub mod cli;
pub mod commands;
pub mod config;
pub mod extractors;
pub mod fs;
pub mod output;
pub mod pipeline;
pub mod stack;
pub mod util;

pub use artifacts::{render_artifacts, ArtifactError};
pub use bootstrap::{RepositoryInput, RepositoryScanner, ScanError};
pub use config::{ConfigError, ConfigFormat, RepoboxConfig};
pub use output::{Phase, RepositoryProfile};
pub use pipeline::{
    analyze_repository, build_refinement_prompt, validate_and_merge, AnalysisPipeline,
    RefinementError,
};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_repobox() {
        assert_eq!(NAME, "repobox");
    }
}
