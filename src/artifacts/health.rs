use crate::stack::{FrameworkId, LanguageFamily};

/// Container health check command for a stack. Always a single shell line.
pub fn health_check_command(family: LanguageFamily, framework: &FrameworkId, port: u16) -> String {
    let curl = |path: &str| format!("curl -f http://localhost:{}{} || exit 1", port, path);
    let wget = |path: &str| {
        format!(
            "wget --no-verbose --tries=1 --spider http://localhost:{}{} || exit 1",
            port, path
        )
    };

    match (family, framework) {
        (LanguageFamily::Python, FrameworkId::Django) => "python manage.py check --deploy".to_string(),
        (LanguageFamily::Python, FrameworkId::Flask | FrameworkId::FastApi) => curl("/health"),
        (LanguageFamily::JavaScript, FrameworkId::Express) => curl("/health"),
        (LanguageFamily::JavaScript, FrameworkId::NextJs) => curl("/api/health"),
        (LanguageFamily::Java, FrameworkId::Spring) => curl("/actuator/health"),
        (LanguageFamily::Java, _) => curl("/health"),
        (LanguageFamily::Go, FrameworkId::Gin) => wget("/health"),
        (LanguageFamily::Go, _) => wget(""),
        _ => curl(""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framework_specific_checks() {
        assert_eq!(
            health_check_command(LanguageFamily::Java, &FrameworkId::Spring, 8080),
            "curl -f http://localhost:8080/actuator/health || exit 1"
        );
        assert_eq!(
            health_check_command(LanguageFamily::Python, &FrameworkId::Django, 8000),
            "python manage.py check --deploy"
        );
        assert_eq!(
            health_check_command(LanguageFamily::Go, &FrameworkId::Gin, 8080),
            "wget --no-verbose --tries=1 --spider http://localhost:8080/health || exit 1"
        );
    }

    #[test]
    fn test_default_check_uses_port() {
        assert_eq!(
            health_check_command(LanguageFamily::Other, &FrameworkId::Generic, 4321),
            "curl -f http://localhost:4321 || exit 1"
        );
        assert_eq!(
            health_check_command(LanguageFamily::JavaScript, &FrameworkId::React, 3000),
            "curl -f http://localhost:3000 || exit 1"
        );
    }
}
