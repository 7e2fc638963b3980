//! FileSystem trait definition

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Bounds applied while walking a repository tree
#[derive(Debug, Clone)]
pub struct WalkOptions {
    pub max_depth: usize,
    pub max_files: usize,
    /// Directory names skipped at any depth
    pub excluded_dirs: Vec<String>,
}

impl WalkOptions {
    pub fn is_excluded(&self, dir_name: &str) -> bool {
        self.excluded_dirs.iter().any(|d| d == dir_name)
    }
}

/// Abstraction over file system operations for testability
pub trait FileSystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    /// Read at most `max_bytes` bytes from the start of a file
    fn read_bytes(&self, path: &Path, max_bytes: usize) -> Result<Vec<u8>>;

    fn canonicalize(&self, path: &Path) -> Result<PathBuf>;

    /// Regular files below `root`, as paths relative to it using `/` separators,
    /// sorted. Stops once `max_files` files have been collected.
    fn walk_files(&self, root: &Path, options: &WalkOptions) -> Result<Vec<String>>;
}

/// Relative `/`-separated form of `path` below `root`
pub(crate) fn relative_slash_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_slash_path() {
        let root = Path::new("/repo");
        assert_eq!(
            relative_slash_path(root, Path::new("/repo/src/main.py")),
            Some("src/main.py".to_string())
        );
        assert_eq!(relative_slash_path(root, Path::new("/repo")), None);
        assert_eq!(relative_slash_path(root, Path::new("/other/x")), None);
    }

    #[test]
    fn test_walk_options_exclusion() {
        let options = WalkOptions {
            max_depth: 3,
            max_files: 10,
            excluded_dirs: vec!["node_modules".to_string()],
        };
        assert!(options.is_excluded("node_modules"));
        assert!(!options.is_excluded("src"));
    }
}
