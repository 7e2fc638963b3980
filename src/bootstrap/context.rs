use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// File names whose content is loaded for detection. Anything else is only
/// seen as a path.
pub const CONTENT_WHITELIST: &[&str] = &[
    "package.json",
    "requirements.txt",
    "Pipfile",
    "pyproject.toml",
    "setup.py",
    "pom.xml",
    "build.gradle",
    "build.gradle.kts",
    "Cargo.toml",
    "go.mod",
    "composer.json",
    "Gemfile",
    ".env.example",
    "Dockerfile",
    "docker-compose.yml",
    "docker-compose.yaml",
    "main.py",
    "app.py",
    "run.py",
    "server.py",
    "wsgi.py",
    "settings.py",
    "config.py",
    "index.js",
    "server.js",
    "app.js",
    "main.go",
    "main.rs",
    "application.properties",
    "application.yml",
];

pub fn is_whitelisted(path: &str) -> bool {
    CONTENT_WHITELIST.contains(&file_name(path))
}

/// Last `/`-separated segment of a relative path
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Truncates `content` to at most `max_bytes`, never splitting a UTF-8 sequence
pub fn truncate_on_char_boundary(content: &mut String, max_bytes: usize) {
    if content.len() <= max_bytes {
        return;
    }
    let mut cut = max_bytes;
    while !content.is_char_boundary(cut) {
        cut -= 1;
    }
    content.truncate(cut);
}

/// Normalized view of a repository handed to the analysis pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryInput {
    pub root_path: PathBuf,
    /// Relative, `/`-separated, sorted and deduplicated
    pub file_paths: Vec<String>,
    /// Relative path to (possibly truncated) content
    pub manifest_contents: BTreeMap<String, String>,
}

fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    path.trim_start_matches("./").trim_start_matches('/').to_string()
}

impl RepositoryInput {
    pub fn new<I, S>(
        root_path: impl Into<PathBuf>,
        file_paths: I,
        manifest_contents: BTreeMap<String, String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let paths: BTreeSet<String> = file_paths
            .into_iter()
            .map(|p| normalize_path(p.as_ref()))
            .filter(|p| !p.is_empty())
            .collect();

        let manifest_contents = manifest_contents
            .into_iter()
            .map(|(path, content)| (normalize_path(&path), content))
            .collect();

        Self {
            root_path: root_path.into(),
            file_paths: paths.into_iter().collect(),
            manifest_contents,
        }
    }

    /// Whether a file exists directly at the repository root
    pub fn has_root_file(&self, name: &str) -> bool {
        self.file_paths.binary_search_by(|p| p.as_str().cmp(name)).is_ok()
            || self.manifest_contents.contains_key(name)
    }

    pub fn has_path_prefix(&self, prefix: &str) -> bool {
        self.file_paths.iter().any(|p| p.starts_with(prefix))
    }

    pub fn root_content(&self, name: &str) -> Option<&str> {
        self.manifest_contents.get(name).map(String::as_str)
    }

    /// Contents in path order
    pub fn contents(&self) -> impl Iterator<Item = (&str, &str)> {
        self.manifest_contents
            .iter()
            .map(|(path, content)| (path.as_str(), content.as_str()))
    }

    /// Drops non-whitelisted entries and caps every content at `max_bytes`
    pub fn restrict_contents(mut self, max_bytes: usize) -> Self {
        self.manifest_contents.retain(|path, _| is_whitelisted(path));
        for content in self.manifest_contents.values_mut() {
            truncate_on_char_boundary(content, max_bytes);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitelist() {
        assert!(is_whitelisted("package.json"));
        assert!(is_whitelisted("backend/requirements.txt"));
        assert!(!is_whitelisted("README.md"));
        assert!(!is_whitelisted("src/package.json.bak"));
    }

    #[test]
    fn test_truncate_on_char_boundary() {
        let mut s = "héllo".to_string();
        truncate_on_char_boundary(&mut s, 2);
        assert_eq!(s, "h");

        let mut s = "short".to_string();
        truncate_on_char_boundary(&mut s, 100);
        assert_eq!(s, "short");
    }

    #[test]
    fn test_input_normalizes_paths() {
        let input = RepositoryInput::new(
            "/repo",
            ["./src\\main.py", "app.py", "app.py", ""],
            BTreeMap::new(),
        );
        assert_eq!(input.file_paths, vec!["app.py".to_string(), "src/main.py".to_string()]);
        assert!(input.has_root_file("app.py"));
        assert!(!input.has_root_file("main.py"));
        assert!(input.has_path_prefix("src/"));
    }

    #[test]
    fn test_restrict_contents() {
        let mut contents = BTreeMap::new();
        contents.insert("package.json".to_string(), "x".repeat(100));
        contents.insert("notes.txt".to_string(), "ignored".to_string());
        let input = RepositoryInput::new("/repo", ["package.json"], contents).restrict_contents(10);

        assert_eq!(input.manifest_contents.len(), 1);
        assert_eq!(input.root_content("package.json").map(str::len), Some(10));
    }
}
