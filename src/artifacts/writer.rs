use super::config_file::{config_file_name, render_config_file};
use super::env_file::render_env_file;
use super::readme::{render_readme, README_FILE_NAME};
use super::ArtifactError;
use crate::config::ConfigFormat;
use crate::output::RepositoryProfile;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

fn write_file(path: PathBuf, content: &str) -> Result<PathBuf, ArtifactError> {
    fs::write(&path, content).map_err(|source| ArtifactError::Write {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), bytes = content.len(), "Wrote artifact");
    Ok(path)
}

/// Writes every artifact of `profile` into `output_dir`, creating it if needed.
/// Returns the written paths in write order.
pub fn render_artifacts(
    profile: &RepositoryProfile,
    output_dir: &Path,
    format: ConfigFormat,
) -> Result<Vec<PathBuf>, ArtifactError> {
    fs::create_dir_all(output_dir).map_err(|source| ArtifactError::CreateDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let config = render_config_file(profile, format)?;

    let files = [
        ("Dockerfile".to_string(), profile.dockerfile_content.clone()),
        (
            "docker-compose.yml".to_string(),
            profile.docker_compose_content.clone(),
        ),
        (config_file_name(format), config),
        (".env.example".to_string(), render_env_file(&profile.env_vars)),
        (README_FILE_NAME.to_string(), render_readme(profile)),
    ];

    let written = files
        .into_iter()
        .map(|(name, content)| write_file(output_dir.join(name), &content))
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        dir = %output_dir.display(),
        files = written.len(),
        "Containerization artifacts written"
    );
    Ok(written)
}
