use super::r#trait::{relative_slash_path, FileSystem, WalkOptions};
use anyhow::{Context, Result};
use ignore::WalkBuilder;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::warn;

/// `FileSystem` backed by the local disk
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_bytes(&self, path: &Path, max_bytes: usize) -> Result<Vec<u8>> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let mut buffer = Vec::new();
        file.take(max_bytes as u64)
            .read_to_end(&mut buffer)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(buffer)
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        path.canonicalize()
            .with_context(|| format!("Failed to canonicalize {}", path.display()))
    }

    fn walk_files(&self, root: &Path, options: &WalkOptions) -> Result<Vec<String>> {
        let excluded = options.excluded_dirs.clone();
        let walker = WalkBuilder::new(root)
            .max_depth(Some(options.max_depth))
            .hidden(false)
            .git_ignore(true)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                if is_dir && entry.depth() > 0 {
                    let name = entry.file_name().to_string_lossy();
                    return !excluded.iter().any(|d| d.as_str() == name);
                }
                true
            })
            .build();

        let mut files = Vec::new();
        for result in walker {
            let entry = match result {
                Ok(e) => e,
                Err(err) => {
                    warn!(error = %err, "Failed to read directory entry");
                    continue;
                }
            };

            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }

            if files.len() >= options.max_files {
                warn!(
                    max_files = options.max_files,
                    "Reached file limit, stopping walk"
                );
                break;
            }

            if let Some(rel) = relative_slash_path(root, entry.path()) {
                files.push(rel);
            }
        }

        files.sort();
        Ok(files)
    }
}
