use super::template::{render, TemplateError, TemplateParams};
use super::templates as t;
use crate::stack::ServiceId;
use std::collections::BTreeSet;

/// Compose file for the detected services: postgres first, then redis, else
/// the app alone
pub fn render_compose(
    services: &BTreeSet<ServiceId>,
    port: u16,
    health_check: &str,
) -> Result<String, TemplateError> {
    let template = if services.contains(&ServiceId::PostgreSql) {
        t::COMPOSE_POSTGRES
    } else if services.contains(&ServiceId::Redis) {
        t::COMPOSE_REDIS
    } else {
        t::COMPOSE_GENERIC
    };

    let mut params = TemplateParams::new();
    params
        .set("port", port.to_string())?
        .set_exec("health_test", &["CMD-SHELL", health_check])?;
    render(template, &params)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHECK: &str = "curl -f http://localhost:8000/health || exit 1";

    #[test]
    fn test_postgres_selects_db_service() {
        let services: BTreeSet<ServiceId> =
            [ServiceId::PostgreSql, ServiceId::Redis].into_iter().collect();
        let compose = render_compose(&services, 8000, CHECK).unwrap();
        assert!(compose.contains("  db:\n    image: postgres:16-alpine"));
        assert!(compose.contains("postgres_data:"));
        assert!(compose.contains("\"8000:8000\""));
        assert!(!compose.contains("redis:7-alpine"));
    }

    #[test]
    fn test_redis_only() {
        let services: BTreeSet<ServiceId> = [ServiceId::Redis].into_iter().collect();
        let compose = render_compose(&services, 3000, CHECK).unwrap();
        assert!(compose.contains("REDIS_URL=redis://redis:6379"));
        assert!(!compose.contains("postgres"));
    }

    #[test]
    fn test_generic_health_test_is_exec_form() {
        let compose = render_compose(&BTreeSet::new(), 8080, CHECK).unwrap();
        assert!(compose.contains(
            r#"test: ["CMD-SHELL","curl -f http://localhost:8000/health || exit 1"]"#
        ));
        assert!(!compose.contains("depends_on"));
        let parsed: serde_yaml::Value = serde_yaml::from_str(&compose).unwrap();
        assert!(parsed["services"]["app"].is_mapping());
    }
}
