use super::r#trait::{relative_slash_path, FileSystem, WalkOptions};
use anyhow::{anyhow, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// In-memory `FileSystem` for tests. Directories exist implicitly as
/// ancestors of added files.
#[derive(Debug, Default)]
pub struct MockFileSystem {
    files: RwLock<BTreeMap<PathBuf, Vec<u8>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        if let Ok(mut files) = self.files.write() {
            files.insert(path.as_ref().to_path_buf(), content.into());
        }
    }

    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) -> Self {
        self.add_file(path, content);
        self
    }

    fn has_dir(&self, path: &Path) -> bool {
        self.files
            .read()
            .map(|files| files.keys().any(|f| f != path && f.starts_with(path)))
            .unwrap_or(false)
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.is_file(path) || self.is_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.has_dir(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files
            .read()
            .map(|files| files.contains_key(path))
            .unwrap_or(false)
    }

    fn read_bytes(&self, path: &Path, max_bytes: usize) -> Result<Vec<u8>> {
        let files = self
            .files
            .read()
            .map_err(|_| anyhow!("mock filesystem lock poisoned"))?;
        let content = files
            .get(path)
            .ok_or_else(|| anyhow!("File not found: {}", path.display()))?;
        Ok(content[..content.len().min(max_bytes)].to_vec())
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        if self.exists(path) {
            Ok(path.to_path_buf())
        } else {
            Err(anyhow!("Path not found: {}", path.display()))
        }
    }

    fn walk_files(&self, root: &Path, options: &WalkOptions) -> Result<Vec<String>> {
        let files = self
            .files
            .read()
            .map_err(|_| anyhow!("mock filesystem lock poisoned"))?;

        let mut result = Vec::new();
        for path in files.keys() {
            let Some(rel) = relative_slash_path(root, path) else {
                continue;
            };
            let parts: Vec<&str> = rel.split('/').collect();
            if parts.len() > options.max_depth {
                continue;
            }
            let dirs = &parts[..parts.len() - 1];
            if dirs.iter().any(|d| options.is_excluded(d)) {
                continue;
            }
            if result.len() >= options.max_files {
                break;
            }
            result.push(rel);
        }

        result.sort();
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_files_and_dirs() {
        let fs = MockFileSystem::new().with_file("/repo/src/app.py", "print()");
        assert!(fs.is_file(Path::new("/repo/src/app.py")));
        assert!(fs.is_dir(Path::new("/repo/src")));
        assert!(fs.is_dir(Path::new("/repo")));
        assert!(!fs.exists(Path::new("/other")));
    }

    #[test]
    fn test_mock_walk_applies_bounds() {
        let fs = MockFileSystem::new()
            .with_file("/repo/app.py", "")
            .with_file("/repo/venv/lib/site.py", "")
            .with_file("/repo/a/b/c/deep.py", "");
        let options = WalkOptions {
            max_depth: 3,
            max_files: 10,
            excluded_dirs: vec!["venv".to_string()],
        };
        let files = fs.walk_files(Path::new("/repo"), &options).unwrap();
        assert_eq!(files, vec!["app.py".to_string()]);
    }

    #[test]
    fn test_mock_read_bytes() {
        let fs = MockFileSystem::new().with_file("/repo/a.txt", "hello world");
        let bytes = fs.read_bytes(Path::new("/repo/a.txt"), 5).unwrap();
        assert_eq!(bytes, b"hello");
        assert!(fs.read_bytes(Path::new("/repo/missing"), 5).is_err());
    }
}
