//! Dependency extractor - ecosystem manifest parsers producing one deduplicated name set

use crate::bootstrap::{file_name, RepositoryInput};
use rayon::prelude::*;
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Invalid JSON in {manifest}: {source}")]
    Json {
        manifest: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid TOML in {manifest}: {source}")]
    Toml {
        manifest: String,
        #[source]
        source: toml::de::Error,
    },
}

type ParseResult = Result<Vec<String>, ManifestError>;

/// Parser for a manifest file name, if the name is understood
fn parser_for(name: &str) -> Option<fn(&str, &str) -> ParseResult> {
    let parser: fn(&str, &str) -> ParseResult = match name {
        "package.json" => parse_package_json,
        "requirements.txt" => |_, c| Ok(parse_requirements_txt(c)),
        "pom.xml" => |_, c| Ok(parse_pom_xml(c)),
        "go.mod" => |_, c| Ok(parse_go_mod(c)),
        "pyproject.toml" => parse_pyproject_toml,
        "Pipfile" => parse_pipfile,
        "Cargo.toml" => parse_cargo_toml,
        "composer.json" => parse_composer_json,
        "Gemfile" => |_, c| Ok(parse_gemfile(c)),
        _ => return None,
    };
    Some(parser)
}

/// Parses every understood manifest in parallel, then merges after all
/// parsers finished. A malformed manifest contributes nothing.
pub fn extract_dependencies(input: &RepositoryInput) -> BTreeSet<String> {
    let manifests: Vec<(&str, &str)> = input
        .contents()
        .filter(|(path, _)| parser_for(file_name(path)).is_some())
        .collect();

    let results: Vec<(&str, ParseResult)> = manifests
        .par_iter()
        .filter_map(|(path, content)| {
            let parser = parser_for(file_name(path))?;
            Some((*path, parser(path, content)))
        })
        .collect();

    let mut dependencies = BTreeSet::new();
    for (path, result) in results {
        match result {
            Ok(names) => {
                debug!(manifest = path, count = names.len(), "Parsed manifest");
                dependencies.extend(names.into_iter().filter(|n| !n.is_empty()));
            }
            Err(e) => warn!(manifest = path, error = %e, "Skipping malformed manifest"),
        }
    }
    dependencies
}

fn object_keys(value: &Value, field: &str) -> Vec<String> {
    value
        .get(field)
        .and_then(Value::as_object)
        .map(|o| o.keys().cloned().collect())
        .unwrap_or_default()
}

pub fn parse_package_json(manifest: &str, content: &str) -> ParseResult {
    let value: Value = serde_json::from_str(content).map_err(|source| ManifestError::Json {
        manifest: manifest.to_string(),
        source,
    })?;
    let mut names = object_keys(&value, "dependencies");
    names.extend(object_keys(&value, "devDependencies"));
    Ok(names)
}

/// Names of the `scripts` entries, or `None` for malformed JSON
pub fn package_json_scripts(content: &str) -> Option<BTreeSet<String>> {
    let value: Value = serde_json::from_str(content).ok()?;
    Some(object_keys(&value, "scripts").into_iter().collect())
}

pub fn parse_requirements_txt(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#') && !l.starts_with('-'))
        .filter_map(|line| {
            let end = line
                .find(|c: char| {
                    matches!(c, '>' | '=' | '<' | '~' | '!' | ';' | '[' | '@' | '#') || c.is_whitespace()
                })
                .unwrap_or(line.len());
            let name = line[..end].trim();
            (!name.is_empty()).then(|| name.to_string())
        })
        .collect()
}

pub fn parse_pom_xml(content: &str) -> Vec<String> {
    static ARTIFACT_ID: OnceLock<Regex> = OnceLock::new();
    let re = ARTIFACT_ID
        .get_or_init(|| Regex::new(r"<artifactId>\s*(.*?)\s*</artifactId>").expect("valid regex"));
    re.captures_iter(content)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

pub fn parse_go_mod(content: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut in_require_block = false;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }

        if in_require_block {
            if line.starts_with(')') {
                in_require_block = false;
                continue;
            }
            if let Some(module) = line.split_whitespace().next() {
                if module.contains('/') || module.contains('.') {
                    names.push(module.to_string());
                }
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix("require") {
            let rest = rest.trim();
            if rest.starts_with('(') {
                in_require_block = true;
            } else if let Some(module) = rest.split_whitespace().next() {
                names.push(module.to_string());
            }
        }
    }
    names
}

fn parse_toml(manifest: &str, content: &str) -> Result<toml::Value, ManifestError> {
    toml::from_str::<toml::Value>(content).map_err(|source| ManifestError::Toml {
        manifest: manifest.to_string(),
        source,
    })
}

fn table_keys(value: &toml::Value, path: &[&str]) -> Vec<String> {
    let mut current = value;
    for key in path {
        match current.get(*key) {
            Some(v) => current = v,
            None => return Vec::new(),
        }
    }
    current
        .as_table()
        .map(|t| t.keys().cloned().collect())
        .unwrap_or_default()
}

pub fn parse_pyproject_toml(manifest: &str, content: &str) -> ParseResult {
    let value = parse_toml(manifest, content)?;

    let mut names: Vec<String> = value
        .get("project")
        .and_then(|p| p.get("dependencies"))
        .and_then(toml::Value::as_array)
        .map(|deps| {
            deps.iter()
                .filter_map(toml::Value::as_str)
                .flat_map(parse_requirements_txt)
                .collect()
        })
        .unwrap_or_default();

    names.extend(
        table_keys(&value, &["tool", "poetry", "dependencies"])
            .into_iter()
            .filter(|n| n != "python"),
    );
    Ok(names)
}

pub fn parse_pipfile(manifest: &str, content: &str) -> ParseResult {
    let value = parse_toml(manifest, content)?;
    let mut names = table_keys(&value, &["packages"]);
    names.extend(table_keys(&value, &["dev-packages"]));
    Ok(names)
}

pub fn parse_cargo_toml(manifest: &str, content: &str) -> ParseResult {
    let value = parse_toml(manifest, content)?;
    let mut names = table_keys(&value, &["dependencies"]);
    names.extend(table_keys(&value, &["dev-dependencies"]));
    Ok(names)
}

pub fn parse_composer_json(manifest: &str, content: &str) -> ParseResult {
    let value: Value = serde_json::from_str(content).map_err(|source| ManifestError::Json {
        manifest: manifest.to_string(),
        source,
    })?;
    let mut names = object_keys(&value, "require");
    names.extend(object_keys(&value, "require-dev"));
    // platform requirements such as "php" or "ext-json" are not packages
    names.retain(|n| n.contains('/'));
    Ok(names)
}

pub fn parse_gemfile(content: &str) -> Vec<String> {
    static GEM: OnceLock<Regex> = OnceLock::new();
    let re = GEM.get_or_init(|| {
        Regex::new(r#"(?m)^\s*gem\s+['"]([^'"]+)['"]"#).expect("valid regex")
    });
    re.captures_iter(content)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
        .collect()
}
