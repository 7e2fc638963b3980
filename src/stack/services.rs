//! External service detection (databases, caches, search engines)

use super::ServiceId;
use crate::bootstrap::RepositoryInput;
use std::collections::BTreeSet;
use tracing::debug;

/// Keyword lists in service priority order. Keywords are matched against lowercased content.
const SERVICE_KEYWORDS: &[(ServiceId, &[&str])] = &[
    (
        ServiceId::PostgreSql,
        &["postgresql", "postgres", "psycopg2", "psycopg", "asyncpg"],
    ),
    (ServiceId::Redis, &["redis", "ioredis"]),
    (ServiceId::MongoDb, &["mongodb", "pymongo", "mongoose", "mongodb://"]),
    (ServiceId::MySql, &["mysql", "pymysql", "mysql2", "mariadb"]),
    (ServiceId::Sqlite, &["sqlite", "sqlite3"]),
    (ServiceId::Elasticsearch, &["elasticsearch", "opensearch"]),
    (ServiceId::Cassandra, &["cassandra", "datastax"]),
];

pub fn detect_services(input: &RepositoryInput) -> BTreeSet<ServiceId> {
    let lowered: Vec<String> = input
        .contents()
        .map(|(_, content)| content.to_lowercase())
        .collect();

    let mut services = BTreeSet::new();
    for (service, keywords) in SERVICE_KEYWORDS {
        let found = lowered
            .iter()
            .any(|content| keywords.iter().any(|k| content.contains(k)));
        if found {
            debug!(service = %service, "Detected external service");
            services.insert(service.clone());
        }
    }
    services
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
        let files: Vec<&str> = contents.iter().map(|(k, _)| *k).collect();
        RepositoryInput::new("/repo", files, map)
    }

    #[test]
    fn test_detects_services_from_dependencies() {
        let repo = input(&[(
            "requirements.txt",
            "Django==4.2\npsycopg2-binary==2.9\nredis==5.0\n",
        )]);
        let services: Vec<_> = detect_services(&repo).into_iter().collect();
        assert_eq!(services, vec![ServiceId::PostgreSql, ServiceId::Redis]);
    }

    #[test]
    fn test_image_names_are_not_postgres() {
        let repo = input(&[("app.py", "thumbnail_jpg_path = 'x'\navatar_svg_url = 'y'\n")]);
        assert!(detect_services(&repo).is_empty());
    }

    #[test]
    fn test_detects_from_connection_urls_any_file() {
        let repo = input(&[(".env.example", "MONGO=mongodb://localhost:27017/app\n")]);
        assert!(detect_services(&repo).contains(&ServiceId::MongoDb));
    }

    #[test]
    fn test_no_services() {
        let repo = input(&[("package.json", r#"{"dependencies":{"express":"4"}}"#)]);
        assert!(detect_services(&repo).is_empty());
    }
}
