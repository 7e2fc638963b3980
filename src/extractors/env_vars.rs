//! Environment variable extractor - deterministic extraction of env var references from code and config

use crate::bootstrap::{file_name, RepositoryInput};
use crate::stack::ServiceId;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;
use tracing::debug;

const NAME: &str = r"([A-Z][A-Z0-9_]*)";

/// Accessor patterns applied to every loaded file. `{NAME}` is the captured variable.
const ACCESSOR_PATTERNS: &[&str] = &[
    r#"os\.environ\.get\(\s*['"]{NAME}['"]"#,
    r#"os\.environ\[\s*['"]{NAME}['"]\s*\]"#,
    r#"os\.getenv\(\s*['"]{NAME}['"]"#,
    r"process\.env\.{NAME}",
    r#"process\.env\[\s*['"]{NAME}['"]\s*\]"#,
    r#"System\.getenv\(\s*"{NAME}""#,
    r#"env::var\(\s*"{NAME}""#,
    r#"os\.Getenv\(\s*"{NAME}""#,
    r#"ENV\[\s*['"]{NAME}['"]\s*\]"#,
    r#"\benv\(\s*['"]{NAME}['"]"#,
    r"\$\{{NAME}(?::?[-?][^}]*)?\}",
];

/// `KEY=` lines, applied to `.env.example` only
const ENV_FILE_PATTERN: &str = r"(?m)^\s*(?:export\s+)?([A-Z][A-Z0-9_]*)\s*=";

const DESCRIPTIONS: &[(&str, &str)] = &[
    ("DATABASE_URL", "Database connection URL"),
    ("DB_HOST", "Database host"),
    ("DB_PORT", "Database port"),
    ("DB_NAME", "Database name"),
    ("DB_USER", "Database username"),
    ("DB_PASSWORD", "Database password"),
    ("REDIS_URL", "Redis connection URL"),
    ("SECRET_KEY", "Secret key for encryption"),
    ("JWT_SECRET", "JWT token secret"),
    ("API_KEY", "API key for external services"),
    ("PORT", "Application port"),
    ("HOST", "Application host"),
    ("NODE_ENV", "Node.js environment"),
    ("FLASK_ENV", "Flask environment"),
    ("FLASK_APP", "Flask application module"),
    ("DJANGO_SETTINGS_MODULE", "Django settings module"),
    ("DEBUG", "Debug mode flag"),
    ("LOG_LEVEL", "Logging level"),
    ("CORS_ORIGIN", "CORS allowed origins"),
    ("MAIL_SERVER", "Email server"),
    ("MAIL_PORT", "Email server port"),
    ("MAIL_USERNAME", "Email username"),
    ("MAIL_PASSWORD", "Email password"),
    ("AWS_ACCESS_KEY_ID", "AWS access key"),
    ("AWS_SECRET_ACCESS_KEY", "AWS secret key"),
    ("AWS_REGION", "AWS region"),
    ("GOOGLE_APPLICATION_CREDENTIALS", "Google Cloud credentials"),
    ("MONGODB_URI", "MongoDB connection URI"),
    ("ELASTICSEARCH_URL", "Elasticsearch URL"),
];

fn accessor_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        ACCESSOR_PATTERNS
            .iter()
            .map(|p| Regex::new(&p.replace("{NAME}", NAME)).expect("valid regex"))
            .collect()
    })
}

fn env_file_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(ENV_FILE_PATTERN).expect("valid regex"))
}

pub fn describe(name: &str) -> String {
    DESCRIPTIONS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, desc)| desc.to_string())
        .unwrap_or_else(|| format!("Environment variable: {}", name))
}

/// Variable names referenced in the loaded contents
pub fn referenced_env_vars(input: &RepositoryInput) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    for (path, content) in input.contents() {
        for re in accessor_patterns() {
            for cap in re.captures_iter(content) {
                if let Some(m) = cap.get(1) {
                    names.insert(m.as_str().to_string());
                }
            }
        }
        if file_name(path) == ".env.example" {
            for cap in env_file_pattern().captures_iter(content) {
                if let Some(m) = cap.get(1) {
                    names.insert(m.as_str().to_string());
                }
            }
        }
    }
    names
}

/// Name to description table. `PORT` is always present; connection URLs are
/// added for detected services that have no variable of their own.
pub fn extract_env_vars(
    input: &RepositoryInput,
    services: &BTreeSet<ServiceId>,
) -> BTreeMap<String, String> {
    let mut names = referenced_env_vars(input);
    debug!(count = names.len(), "Collected environment variable references");

    names.insert("PORT".to_string());

    let has_database = services.iter().any(ServiceId::is_database);
    if has_database
        && !names
            .iter()
            .any(|n| n.contains("DATABASE") || n.starts_with("DB_"))
    {
        names.insert("DATABASE_URL".to_string());
    }
    if services.contains(&ServiceId::Redis) && !names.iter().any(|n| n.contains("REDIS")) {
        names.insert("REDIS_URL".to_string());
    }

    names
        .into_iter()
        .map(|name| {
            let desc = describe(&name);
            (name, desc)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn input(contents: &[(&str, &str)]) -> RepositoryInput {
        let map: BTreeMap<String, String> = contents
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RepositoryInput::new("/repo", Vec::<String>::new(), map)
    }

    #[test]
    fn test_accessor_patterns() {
        let repo = input(&[
            ("app.py", "SECRET = os.environ.get('SECRET_KEY')\nX = os.getenv(\"API_TOKEN\")"),
            ("server.js", "const url = process.env.MONGODB_URI;"),
            ("main.go", "addr := os.Getenv(\"LISTEN_ADDR\")"),
            ("docker-compose.yml", "image: app:${APP_VERSION:-latest}"),
        ]);
        let names = referenced_env_vars(&repo);
        for expected in ["SECRET_KEY", "API_TOKEN", "MONGODB_URI", "LISTEN_ADDR", "APP_VERSION"] {
            assert!(names.contains(expected), "missing {}", expected);
        }
    }

    #[test]
    fn test_getenv_not_confused_with_env_helper() {
        let repo = input(&[("config.py", "x = getenv_helper('lower')")]);
        assert!(referenced_env_vars(&repo).is_empty());
    }

    #[test]
    fn test_env_example_lines() {
        let repo = input(&[(".env.example", "# comment\nNODE_ENV=production\nexport CUSTOM_FLAG=1\n")]);
        let vars = extract_env_vars(&repo, &BTreeSet::new());
        assert_eq!(vars.get("NODE_ENV").map(String::as_str), Some("Node.js environment"));
        assert_eq!(
            vars.get("CUSTOM_FLAG").map(String::as_str),
            Some("Environment variable: CUSTOM_FLAG")
        );
    }

    #[test]
    fn test_port_always_present_and_descriptions_non_empty() {
        let vars = extract_env_vars(&input(&[]), &BTreeSet::new());
        assert_eq!(vars.get("PORT").map(String::as_str), Some("Application port"));
        assert!(vars.values().all(|v| !v.is_empty()));
    }

    #[test]
    fn test_service_urls_added() {
        let services: BTreeSet<ServiceId> = [ServiceId::PostgreSql, ServiceId::Redis].into_iter().collect();
        let vars = extract_env_vars(&input(&[]), &services);
        assert!(vars.contains_key("DATABASE_URL"));
        assert!(vars.contains_key("REDIS_URL"));

        let repo = input(&[("settings.py", "HOST = os.environ['DB_HOST']")]);
        let vars = extract_env_vars(&repo, &services);
        assert!(!vars.contains_key("DATABASE_URL"));
        assert!(vars.contains_key("DB_HOST"));
    }
}
