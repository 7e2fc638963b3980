use super::ArtifactError;
use crate::config::ConfigFormat;
use crate::output::{ContainerConfigFile, RepositoryProfile};

pub fn config_file_name(format: ConfigFormat) -> String {
    format!("container-config.{}", format.extension())
}

pub fn render_config_file(
    profile: &RepositoryProfile,
    format: ConfigFormat,
) -> Result<String, ArtifactError> {
    let config = ContainerConfigFile::from_profile(profile);
    let rendered = match format {
        ConfigFormat::Yaml => serde_yaml::to_string(&config).map_err(|e| e.to_string()),
        ConfigFormat::Json => serde_json::to_string_pretty(&config).map_err(|e| e.to_string()),
    };
    rendered.map_err(|message| ArtifactError::Serialization { format, message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Phase;
    use crate::stack::{FrameworkId, LanguageId, ServiceId};

    fn profile() -> RepositoryProfile {
        let mut profile = RepositoryProfile {
            primary_language: LanguageId::Python,
            framework: FrameworkId::Django,
            port: 8000,
            health_check: "python manage.py check --deploy".to_string(),
            ..Default::default()
        };
        profile.external_services.insert(ServiceId::PostgreSql);
        profile
            .commands
            .insert(Phase::Run, vec!["python manage.py runserver 0.0.0.0:8000".to_string()]);
        profile
    }

    #[test]
    fn test_yaml_round_trip() {
        let yaml = render_config_file(&profile(), ConfigFormat::Yaml).unwrap();
        let parsed: ContainerConfigFile = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.containerization.ports, vec!["8000:8000"]);
        assert_eq!(parsed.containerization.image_name, "python-app");
        assert_eq!(parsed.analysis.database, Some(ServiceId::PostgreSql));
    }

    #[test]
    fn test_json_sections() {
        let json = render_config_file(&profile(), ConfigFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["analysis"]["framework"], "django");
        assert_eq!(value["containerization"]["health_check"]["retries"], 3);
        assert_eq!(config_file_name(ConfigFormat::Json), "container-config.json");
    }
}
