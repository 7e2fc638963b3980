use std::collections::BTreeMap;
use std::fmt::Write;

pub const ENV_FILE_HEADER: &str = "# Environment variables for containerization";

/// `.env.example` body, one `KEY=  # description` line per variable in key order
pub fn render_env_file(env_vars: &BTreeMap<String, String>) -> String {
    let mut out = String::new();
    out.push_str(ENV_FILE_HEADER);
    out.push('\n');
    for (key, description) in env_vars {
        let _ = writeln!(out, "{}=  # {}", key, description);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_lines_after_header() {
        let vars: BTreeMap<String, String> = [
            ("SECRET_KEY", "Secret key for encryption"),
            ("DATABASE_URL", "Database connection URL"),
            ("PORT", "Application port"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let lines: Vec<String> = render_env_file(&vars).lines().map(String::from).collect();
        assert_eq!(
            lines,
            vec![
                "# Environment variables for containerization",
                "DATABASE_URL=  # Database connection URL",
                "PORT=  # Application port",
                "SECRET_KEY=  # Secret key for encryption",
            ]
        );
    }
}
