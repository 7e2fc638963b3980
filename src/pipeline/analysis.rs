use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info};

use crate::artifacts::{ArtifactContext, ArtifactGenerator};
use crate::bootstrap::{RepositoryInput, RepositoryScanner, ScanError};
use crate::commands::{synthesize_commands, CommandContext, ProjectLayout};
use crate::config::RepoboxConfig;
use crate::extractors::extract_dependencies;
use crate::output::RepositoryProfile;
use crate::stack::StackDetector;

/// Single forward pass: classify, detect, extract, synthesize, render
#[derive(Debug, Clone)]
pub struct AnalysisPipeline {
    config: RepoboxConfig,
    detector: StackDetector,
    generator: ArtifactGenerator,
}

impl Default for AnalysisPipeline {
    fn default() -> Self {
        Self::new(RepoboxConfig::default())
    }
}

impl AnalysisPipeline {
    pub fn new(config: RepoboxConfig) -> Self {
        Self {
            config,
            detector: StackDetector::new(),
            generator: ArtifactGenerator::new(),
        }
    }

    pub fn config(&self) -> &RepoboxConfig {
        &self.config
    }

    /// Never fails: unknown stacks produce `unknown`/`generic` values and the
    /// universal templates
    pub fn analyze(&self, input: &RepositoryInput) -> RepositoryProfile {
        let start = Instant::now();
        let input = input.clone().restrict_contents(self.config.max_content_bytes);
        debug!(
            files = input.file_paths.len(),
            contents = input.manifest_contents.len(),
            "Starting analysis"
        );

        let detection = self.detector.detect(&input);
        let dependencies = extract_dependencies(&input);
        let layout = ProjectLayout::from_input(&input);

        let commands = synthesize_commands(&CommandContext {
            language: &detection.primary_language,
            framework: &detection.framework,
            package_manager: &detection.package_manager,
            port: detection.port,
            layout: &layout,
        });

        let artifacts = self.generator.generate(&ArtifactContext {
            language: &detection.primary_language,
            framework: &detection.framework,
            package_manager: &detection.package_manager,
            port: detection.port,
            services: &detection.external_services,
            commands: &commands,
            layout: &layout,
        });

        info!(
            language = %detection.primary_language,
            framework = %detection.framework.key(),
            port = detection.port,
            dependencies = dependencies.len(),
            dockerfile = ?artifacts.dockerfile_level,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Analysis complete"
        );

        RepositoryProfile {
            primary_language: detection.primary_language,
            language_histogram: detection.language_histogram,
            framework: detection.framework,
            package_manager: detection.package_manager,
            external_services: detection.external_services,
            dependencies,
            build_tools: detection.build_tools,
            port: detection.port,
            env_vars: detection.env_vars,
            commands,
            dockerfile_content: artifacts.dockerfile,
            docker_compose_content: artifacts.docker_compose,
            health_check: artifacts.health_check,
        }
    }

    /// Scans `root` with the pipeline's bounds, then analyzes it
    pub fn analyze_path(&self, root: &Path) -> Result<RepositoryProfile, ScanError> {
        let input = RepositoryScanner::new(self.config.clone()).scan(root)?;
        Ok(self.analyze(&input))
    }
}

/// Analyzes an in-memory repository description with the default configuration
pub fn analyze_repository<I, S>(
    root_path: impl Into<PathBuf>,
    file_paths: I,
    manifest_contents: BTreeMap<String, String>,
) -> RepositoryProfile
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let input = RepositoryInput::new(root_path, file_paths, manifest_contents);
    AnalysisPipeline::default().analyze(&input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Phase;
    use crate::stack::{FrameworkId, LanguageId, PackageManagerId, ServiceId};

    fn contents(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_django_postgres_repository() {
        let profile = analyze_repository(
            "/repo",
            ["manage.py", "requirements.txt", "app/models.py", "app/views.py"],
            contents(&[("requirements.txt", "Django==4.2\npsycopg2-binary==2.9\n")]),
        );

        assert_eq!(profile.primary_language, LanguageId::Python);
        assert_eq!(profile.framework, FrameworkId::Django);
        assert_eq!(profile.package_manager, PackageManagerId::Pip);
        assert_eq!(profile.port, 8000);
        assert!(profile.external_services.contains(&ServiceId::PostgreSql));
        assert!(profile.dependencies.contains("Django"));
        assert!(profile.docker_compose_content.contains("postgres_data"));
        assert!(profile
            .commands_for(Phase::Run)
            .contains(&"python manage.py runserver 0.0.0.0:8000".to_string()));
        assert!(profile.dockerfile_content.contains("collectstatic"));
        assert_eq!(profile.health_check, "python manage.py check --deploy");
    }

    #[test]
    fn test_oversized_content_is_capped() {
        let big = format!("flask\n{}", "#".repeat(100_000));
        let pipeline = AnalysisPipeline::new(RepoboxConfig {
            max_content_bytes: 1024,
            ..RepoboxConfig::default()
        });
        let input = RepositoryInput::new(
            "/repo",
            ["app.py", "requirements.txt"],
            contents(&[("requirements.txt", &big), ("notes.txt", "redis")]),
        );
        let profile = pipeline.analyze(&input);
        assert_eq!(profile.framework, FrameworkId::Flask);
        // non-whitelisted content is never consulted
        assert!(profile.external_services.is_empty());
    }

    #[test]
    fn test_empty_repository_uses_universal_template() {
        let profile = analyze_repository("/repo", Vec::<String>::new(), BTreeMap::new());
        assert_eq!(profile.primary_language, LanguageId::Unknown);
        assert_eq!(profile.framework, FrameworkId::Generic);
        assert_eq!(profile.port, 8080);
        assert!(profile.commands.is_empty());
        assert!(profile.dockerfile_content.starts_with("FROM alpine:3.19"));
        assert_eq!(profile.health_check, "curl -f http://localhost:8080 || exit 1");
    }
}
