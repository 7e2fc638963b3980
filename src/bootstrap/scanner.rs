use super::context::{is_whitelisted, RepositoryInput};
use crate::config::RepoboxConfig;
use crate::fs::{FileSystem, RealFileSystem, WalkOptions};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Repository path does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Repository path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed to walk {}: {message}", .path.display())]
    Walk { path: PathBuf, message: String },
}

/// Bounded directory walk producing the input of the analysis pipeline
pub struct RepositoryScanner<F: FileSystem = RealFileSystem> {
    fs: F,
    config: RepoboxConfig,
}

impl RepositoryScanner<RealFileSystem> {
    pub fn new(config: RepoboxConfig) -> Self {
        Self::with_fs(RealFileSystem, config)
    }
}

impl<F: FileSystem> RepositoryScanner<F> {
    pub fn with_fs(fs: F, config: RepoboxConfig) -> Self {
        Self { fs, config }
    }

    pub fn scan(&self, root: &Path) -> Result<RepositoryInput, ScanError> {
        if !self.fs.exists(root) {
            return Err(ScanError::NotFound(root.to_path_buf()));
        }
        if !self.fs.is_dir(root) {
            return Err(ScanError::NotADirectory(root.to_path_buf()));
        }

        let root = self
            .fs
            .canonicalize(root)
            .unwrap_or_else(|_| root.to_path_buf());
        let start = Instant::now();

        info!(
            repo = %root.display(),
            max_depth = self.config.max_depth,
            max_files = self.config.max_files,
            "Starting repository scan"
        );

        let options = WalkOptions {
            max_depth: self.config.max_depth,
            max_files: self.config.max_files,
            excluded_dirs: self.config.excluded_dirs.clone(),
        };
        let file_paths = self
            .fs
            .walk_files(&root, &options)
            .map_err(|e| ScanError::Walk {
                path: root.clone(),
                message: e.to_string(),
            })?;

        let max_bytes = self.config.max_content_bytes;
        let reads: Vec<(String, Option<String>)> = file_paths
            .par_iter()
            .filter(|rel| is_whitelisted(rel))
            .map(|rel| (rel.clone(), self.read_capped(&root.join(rel), max_bytes)))
            .collect();

        let manifest_contents: BTreeMap<String, String> = reads
            .into_iter()
            .filter_map(|(rel, content)| content.map(|c| (rel, c)))
            .collect();

        info!(
            files = file_paths.len(),
            contents = manifest_contents.len(),
            scan_time_ms = start.elapsed().as_millis() as u64,
            "Repository scan completed"
        );

        Ok(RepositoryInput::new(root, file_paths, manifest_contents))
    }

    fn read_capped(&self, path: &Path, max_bytes: usize) -> Option<String> {
        let bytes = match self.fs.read_bytes(path, max_bytes) {
            Ok(b) => b,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable file");
                return None;
            }
        };

        match String::from_utf8(bytes) {
            Ok(s) => Some(s),
            Err(e) => {
                let utf8 = e.utf8_error();
                // a cut in the middle of a multi-byte sequence is not an encoding error
                if utf8.error_len().is_none() {
                    let valid = utf8.valid_up_to();
                    let mut bytes = e.into_bytes();
                    bytes.truncate(valid);
                    String::from_utf8(bytes).ok()
                } else {
                    debug!(path = %path.display(), "Skipping non UTF-8 file");
                    None
                }
            }
        }
    }
}
