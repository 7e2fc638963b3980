//! Containerization artifacts: Dockerfile, compose file, health check, and the
//! files written next to them.

pub mod compose;
pub mod config_file;
pub mod dockerfile;
pub mod env_file;
pub mod health;
pub mod readme;
pub mod template;
mod templates;
pub mod writer;

pub use dockerfile::TemplateLevel;
pub use template::{TemplateError, TemplateParams};
pub use writer::render_artifacts;

use crate::commands::{CommandMap, ProjectLayout};
use crate::config::ConfigFormat;
use crate::stack::{FrameworkId, LanguageId, PackageManagerId, ServiceId};
use std::collections::BTreeSet;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Failed to create output directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize {format} config: {message}")]
    Serialization { format: ConfigFormat, message: String },
}

/// Classification facts the generators read
#[derive(Debug, Clone, Copy)]
pub struct ArtifactContext<'a> {
    pub language: &'a LanguageId,
    pub framework: &'a FrameworkId,
    pub package_manager: &'a PackageManagerId,
    pub port: u16,
    pub services: &'a BTreeSet<ServiceId>,
    pub commands: &'a CommandMap,
    pub layout: &'a ProjectLayout,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedArtifacts {
    pub dockerfile: String,
    pub dockerfile_level: TemplateLevel,
    pub docker_compose: String,
    pub health_check: String,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ArtifactGenerator;

impl ArtifactGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, ctx: &ArtifactContext<'_>) -> GeneratedArtifacts {
        let health_check =
            health::health_check_command(ctx.language.family(), ctx.framework, ctx.port);
        let (dockerfile, dockerfile_level) = dockerfile::render_dockerfile(ctx, &health_check);

        let docker_compose = compose::render_compose(ctx.services, ctx.port, &health_check)
            .unwrap_or_else(|e| {
                warn!(error = %e, "Compose template failed to render");
                String::new()
            });

        GeneratedArtifacts {
            dockerfile,
            dockerfile_level,
            docker_compose,
            health_check,
        }
    }
}
