//! RepositoryProfile schema data structures
//!
//! `RepositoryProfile` is the single result of one analysis run. Every collection
//! is ordered (`BTreeMap`/`BTreeSet`) so two runs over the same input serialize
//! to byte-identical output.

use crate::stack::{FrameworkId, LanguageId, PackageManagerId, ServiceId};
use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

pub(crate) fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

/// Lifecycle phase a command belongs to. Declaration order is execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Setup,
    Install,
    Build,
    Run,
    Test,
}

impl Phase {
    pub const ALL: [Phase; 5] = [
        Phase::Setup,
        Phase::Install,
        Phase::Build,
        Phase::Run,
        Phase::Test,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Install => "install",
            Self::Build => "build",
            Self::Run => "run",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified technology stack plus the rendered container artifacts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RepositoryProfile {
    pub primary_language: LanguageId,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub language_histogram: BTreeMap<LanguageId, usize>,
    pub framework: FrameworkId,
    pub package_manager: PackageManagerId,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub external_services: BTreeSet<ServiceId>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub dependencies: BTreeSet<String>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub build_tools: BTreeSet<String>,
    pub port: u16,
    /// Variable name to human-readable description
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub env_vars: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub commands: BTreeMap<Phase, Vec<String>>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub dockerfile_content: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub docker_compose_content: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub health_check: String,
}

impl RepositoryProfile {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize profile to JSON")
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize profile to YAML")
    }

    /// Docker image name derived from the primary language
    pub fn image_name(&self) -> String {
        let lang: String = self
            .primary_language
            .key()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect();
        format!("{}-app", lang.trim_matches('-'))
    }

    pub fn commands_for(&self, phase: Phase) -> &[String] {
        self.commands.get(&phase).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First detected service that stores data, if any
    pub fn database(&self) -> Option<&ServiceId> {
        self.external_services.iter().find(|s| s.is_database())
    }
}

fn join_or_none<'a, I>(items: I) -> String
where
    I: IntoIterator<Item = &'a String>,
{
    let joined = items
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        "none".to_string()
    } else {
        joined
    }
}

impl fmt::Display for RepositoryProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Repository Analysis Result")?;
        writeln!(f, "==========================")?;
        writeln!(f, "Language:        {}", self.primary_language)?;
        writeln!(f, "Framework:       {}", self.framework.key())?;
        writeln!(f, "Package Manager: {}", self.package_manager.key())?;
        let services: Vec<String> = self
            .external_services
            .iter()
            .map(|s| s.key().to_string())
            .collect();
        writeln!(f, "Services:        {}", join_or_none(&services))?;
        writeln!(f, "Port:            {}", self.port)?;
        if !self.build_tools.is_empty() {
            writeln!(f, "Build Tools:     {}", join_or_none(&self.build_tools))?;
        }
        if !self.language_histogram.is_empty() {
            let histogram: Vec<String> = self
                .language_histogram
                .iter()
                .map(|(lang, count)| format!("{} ({})", lang, count))
                .collect();
            writeln!(f, "Languages:       {}", join_or_none(&histogram))?;
        }
        writeln!(f)?;

        if !self.commands.is_empty() {
            writeln!(f, "Commands:")?;
            for (phase, commands) in &self.commands {
                writeln!(f, "  {}:", phase)?;
                for cmd in commands {
                    writeln!(f, "    - {}", cmd)?;
                }
            }
            writeln!(f)?;
        }

        if !self.env_vars.is_empty() {
            writeln!(f, "Environment Variables:")?;
            for (key, desc) in &self.env_vars {
                writeln!(f, "  {:<24} {}", key, desc)?;
            }
            writeln!(f)?;
        }

        if !self.dependencies.is_empty() {
            let shown: Vec<&String> = self.dependencies.iter().take(10).collect();
            let more = self.dependencies.len().saturating_sub(shown.len());
            write!(f, "Dependencies:    {}", join_or_none(shown))?;
            if more > 0 {
                write!(f, " (and {} more)", more)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "Health Check:    {}", self.health_check)?;
        Ok(())
    }
}

/// Health check block of `container-config.*`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCheckConfig {
    pub test: String,
    pub interval: String,
    pub timeout: String,
    pub retries: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerizationSection {
    pub image_name: String,
    pub ports: Vec<String>,
    pub environment_variables: BTreeMap<String, String>,
    pub commands: BTreeMap<Phase, Vec<String>>,
    pub health_check: HealthCheckConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSection {
    pub primary_language: LanguageId,
    pub framework: FrameworkId,
    pub package_manager: PackageManagerId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<ServiceId>,
    pub external_services: BTreeSet<ServiceId>,
    pub dependencies: BTreeSet<String>,
    pub build_tools: BTreeSet<String>,
}

/// Unified configuration file written next to the Dockerfile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerConfigFile {
    pub containerization: ContainerizationSection,
    pub analysis: AnalysisSection,
}

impl ContainerConfigFile {
    pub fn from_profile(profile: &RepositoryProfile) -> Self {
        Self {
            containerization: ContainerizationSection {
                image_name: profile.image_name(),
                ports: vec![format!("{}:{}", profile.port, profile.port)],
                environment_variables: profile.env_vars.clone(),
                commands: profile.commands.clone(),
                health_check: HealthCheckConfig {
                    test: profile.health_check.clone(),
                    interval: "30s".to_string(),
                    timeout: "10s".to_string(),
                    retries: 3,
                },
            },
            analysis: AnalysisSection {
                primary_language: profile.primary_language.clone(),
                framework: profile.framework.clone(),
                package_manager: profile.package_manager.clone(),
                database: profile.database().cloned(),
                external_services: profile.external_services.clone(),
                dependencies: profile.dependencies.clone(),
                build_tools: profile.build_tools.clone(),
            },
        }
    }
}
