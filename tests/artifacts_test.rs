//! Artifact writer tests: files on disk for an analyzed repository

mod support;

use repobox::{analyze_repository, render_artifacts, ArtifactError, ConfigFormat};
use std::fs;
use support::{contents, temp_repo};

fn django_profile() -> repobox::RepositoryProfile {
    analyze_repository(
        "/repo",
        ["manage.py", "requirements.txt", "settings.py"],
        contents(&[
            ("requirements.txt", "Django==4.2\npsycopg2-binary==2.9\n"),
            (
                "settings.py",
                "import os\nSECRET_KEY = os.environ.get('SECRET_KEY')\nDEBUG = os.getenv('DEBUG')\n",
            ),
        ]),
    )
}

#[test]
fn test_writes_all_artifacts() {
    let out = temp_repo(&[]);
    let dir = out.path().join("containerization");

    let written = render_artifacts(&django_profile(), &dir, ConfigFormat::Yaml).unwrap();

    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        [
            "Dockerfile",
            "docker-compose.yml",
            "container-config.yaml",
            ".env.example",
            "CONTAINERIZATION_README.md",
        ]
    );
    for path in &written {
        assert!(path.is_file(), "{} missing", path.display());
    }

    let dockerfile = fs::read_to_string(dir.join("Dockerfile")).unwrap();
    assert!(dockerfile.starts_with("FROM python:3.11-slim"));
    assert!(dockerfile.contains("EXPOSE 8000"));

    let compose: serde_yaml::Value =
        serde_yaml::from_str(&fs::read_to_string(dir.join("docker-compose.yml")).unwrap())
            .unwrap();
    assert!(compose["services"]["app"].is_mapping());
    assert!(compose["services"]["db"].is_mapping());

    let config: serde_yaml::Value =
        serde_yaml::from_str(&fs::read_to_string(dir.join("container-config.yaml")).unwrap())
            .unwrap();
    assert_eq!(config["analysis"]["framework"], "django");
    assert_eq!(config["analysis"]["database"], "postgresql");
    assert_eq!(config["containerization"]["ports"][0], "8000:8000");

    let readme = fs::read_to_string(dir.join("CONTAINERIZATION_README.md")).unwrap();
    assert!(readme.starts_with("# Containerization Guide"));
    assert!(readme.contains("docker run -p 8000:8000"));
}

#[test]
fn test_env_example_is_sorted() {
    let out = temp_repo(&[]);
    render_artifacts(&django_profile(), out.path(), ConfigFormat::Yaml).unwrap();

    let env = fs::read_to_string(out.path().join(".env.example")).unwrap();
    let mut lines = env.lines();
    assert_eq!(
        lines.next(),
        Some("# Environment variables for containerization")
    );
    let keys: Vec<&str> = lines
        .filter_map(|line| line.split_once('=').map(|(k, _)| k))
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
    assert!(keys.contains(&"DATABASE_URL"));
    assert!(keys.contains(&"SECRET_KEY"));
    assert!(keys.contains(&"DEBUG"));
}

#[test]
fn test_json_config_format() {
    let out = temp_repo(&[]);
    let written = render_artifacts(&django_profile(), out.path(), ConfigFormat::Json).unwrap();
    assert!(written
        .iter()
        .any(|p| p.ends_with("container-config.json")));

    let raw = fs::read_to_string(out.path().join("container-config.json")).unwrap();
    let config: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(config["analysis"]["primary_language"], "Python");
    assert_eq!(config["containerization"]["health_check"]["retries"], 3);
}

#[test]
fn test_unwritable_output_dir() {
    let out = temp_repo(&[("blocker", "not a directory")]);
    let err = render_artifacts(
        &django_profile(),
        &out.path().join("blocker").join("nested"),
        ConfigFormat::Yaml,
    )
    .unwrap_err();
    assert!(matches!(err, ArtifactError::CreateDir { .. }));
}
