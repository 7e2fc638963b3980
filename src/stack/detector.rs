//! Stack detection over one repository input, in fixed order:
//! language, package manager, framework, services, port, env vars, build tools.

use super::classifier::{language_histogram, primary_language};
use super::{
    build_tools::detect_build_tools, framework::detect_framework,
    package_manager::detect_package_manager, services::detect_services, FrameworkId, LanguageId,
    PackageManagerId, ServiceId,
};
use crate::bootstrap::RepositoryInput;
use crate::extractors::{extract_env_vars, resolve_port, PortSource};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct StackDetection {
    pub primary_language: LanguageId,
    pub language_histogram: BTreeMap<LanguageId, usize>,
    pub package_manager: PackageManagerId,
    pub framework: FrameworkId,
    pub external_services: BTreeSet<ServiceId>,
    pub port: u16,
    pub port_source: PortSource,
    pub env_vars: BTreeMap<String, String>,
    pub build_tools: BTreeSet<String>,
}

/// Primary language from root-level manifests, used when no source file has a
/// known extension
fn language_from_manifests(input: &RepositoryInput) -> LanguageId {
    input
        .file_paths
        .iter()
        .filter(|p| !p.contains('/'))
        .filter_map(|p| LanguageId::from_manifest(p))
        .min()
        .unwrap_or_default()
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StackDetector;

impl StackDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn detect(&self, input: &RepositoryInput) -> StackDetection {
        let histogram = language_histogram(&input.file_paths);
        let mut primary = primary_language(&histogram);
        if primary.is_unknown() {
            primary = language_from_manifests(input);
        }

        let package_manager = detect_package_manager(input, &primary);
        let framework = detect_framework(input, &primary);
        let external_services = detect_services(input);
        let (port, port_source) = resolve_port(input, &framework);
        let env_vars = extract_env_vars(input, &external_services);
        let build_tools = detect_build_tools(input);

        debug!(
            language = %primary,
            framework = %framework.key(),
            package_manager = %package_manager.key(),
            port,
            ?port_source,
            services = external_services.len(),
            "Stack detection finished"
        );

        StackDetection {
            primary_language: primary,
            language_histogram: histogram,
            package_manager,
            framework,
            external_services,
            port,
            port_source,
            env_vars,
            build_tools,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(files: &[&str], contents: &[(&str, &str)]) -> RepositoryInput {
        let map: BTreeMap<String, String> = contents
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RepositoryInput::new("/repo", files.iter().copied(), map)
    }

    #[test]
    fn test_package_json_only_repo() {
        let repo = input(
            &["package.json"],
            &[("package.json", r#"{"dependencies":{"react":"18.0.0"}}"#)],
        );
        let detection = StackDetector::new().detect(&repo);
        assert_eq!(detection.primary_language, LanguageId::JavaScript);
        assert_eq!(detection.framework, FrameworkId::React);
        assert_eq!(detection.package_manager, PackageManagerId::Npm);
        assert_eq!(detection.port, 3000);
        assert!(detection.language_histogram.is_empty());
    }

    #[test]
    fn test_flask_repo() {
        let repo = input(
            &["app.py", "requirements.txt", "templates/index.html"],
            &[
                ("requirements.txt", "flask==2.0.0\npsycopg2==2.9\n"),
                ("app.py", "import os\napp.run(host='0.0.0.0', port=5001)\nos.environ.get('SECRET_KEY')"),
            ],
        );
        let detection = StackDetector::new().detect(&repo);
        assert_eq!(detection.primary_language, LanguageId::Python);
        assert_eq!(detection.framework, FrameworkId::Flask);
        assert_eq!(detection.package_manager, PackageManagerId::Pip);
        assert_eq!(detection.port, 5001);
        assert_eq!(detection.port_source, PortSource::Detected);
        assert!(detection.external_services.contains(&ServiceId::PostgreSql));
        assert!(detection.env_vars.contains_key("SECRET_KEY"));
        assert!(detection.env_vars.contains_key("DATABASE_URL"));
    }

    #[test]
    fn test_empty_repository() {
        let detection = StackDetector::new().detect(&RepositoryInput::default());
        assert_eq!(detection.primary_language, LanguageId::Unknown);
        assert_eq!(detection.framework, FrameworkId::Generic);
        assert_eq!(detection.package_manager, PackageManagerId::Unknown);
        assert_eq!(detection.port, 8080);
    }
}
