//! `CONTAINERIZATION_README.md` rendering

use crate::output::{Phase, RepositoryProfile};
use std::fmt::Write;

pub const README_FILE_NAME: &str = "CONTAINERIZATION_README.md";

fn bullet_list<'a, I>(out: &mut String, items: I)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut empty = true;
    for item in items {
        let _ = writeln!(out, "- {}", item);
        empty = false;
    }
    if empty {
        out.push_str("- none\n");
    }
}

pub fn render_readme(profile: &RepositoryProfile) -> String {
    let image = profile.image_name();
    let services: Vec<&str> = profile.external_services.iter().map(|s| s.key()).collect();
    let mut out = String::new();

    out.push_str("# Containerization Guide\n\n## Repository Analysis\n");
    let _ = writeln!(out, "- **Primary Language**: {}", profile.primary_language);
    let _ = writeln!(out, "- **Framework**: {}", profile.framework.key());
    let _ = writeln!(out, "- **Package Manager**: {}", profile.package_manager.key());
    let _ = writeln!(
        out,
        "- **Database**: {}",
        profile.database().map(|d| d.key()).unwrap_or("none")
    );
    let _ = writeln!(
        out,
        "- **External Services**: {}",
        if services.is_empty() {
            "none".to_string()
        } else {
            services.join(", ")
        }
    );
    let _ = writeln!(out, "- **Port**: {}", profile.port);

    out.push_str("\n## Quick Start\n\n### Using Docker\n```bash\n");
    let _ = writeln!(out, "docker build -t {} .", image);
    let _ = writeln!(out, "docker run -p {0}:{0} {1}", profile.port, image);
    out.push_str("```\n\n### Using Docker Compose\n```bash\n");
    out.push_str("docker compose up -d\ndocker compose logs -f\ndocker compose down\n```\n");

    out.push_str("\n## Environment Variables\n");
    if profile.env_vars.is_empty() {
        out.push_str("- none\n");
    }
    for (key, description) in &profile.env_vars {
        let _ = writeln!(out, "- `{}`: {}", key, description);
    }

    out.push_str("\n## Commands\n");
    for phase in Phase::ALL {
        let commands = profile.commands_for(phase);
        if commands.is_empty() {
            let _ = writeln!(out, "- **{}**: N/A", phase);
        } else {
            let joined: Vec<String> = commands.iter().map(|c| format!("`{}`", c)).collect();
            let _ = writeln!(out, "- **{}**: {}", phase, joined.join(", "));
        }
    }

    out.push_str("\n## Health Check\n");
    let _ = writeln!(
        out,
        "The container includes a health check: `{}`",
        profile.health_check
    );

    out.push_str("\n## Dependencies\n");
    bullet_list(&mut out, profile.dependencies.iter().map(String::as_str));

    out.push_str("\n## Build Tools\n");
    bullet_list(&mut out, profile.build_tools.iter().map(String::as_str));

    out.push_str("\n---\n*Generated by repobox*\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::{FrameworkId, LanguageId};

    #[test]
    fn test_readme_sections() {
        let mut profile = RepositoryProfile {
            primary_language: LanguageId::JavaScript,
            framework: FrameworkId::Express,
            port: 3000,
            health_check: "curl -f http://localhost:3000/health || exit 1".to_string(),
            ..Default::default()
        };
        profile.dependencies.insert("express".to_string());
        profile
            .commands
            .insert(Phase::Install, vec!["npm install".to_string()]);

        let readme = render_readme(&profile);
        assert!(readme.starts_with("# Containerization Guide"));
        assert!(readme.contains("docker run -p 3000:3000 javascript-app"));
        assert!(readme.contains("- **install**: `npm install`"));
        assert!(readme.contains("- **run**: N/A"));
        assert!(readme.contains("- express\n"));
        assert!(readme.contains("## Build Tools\n- none\n"));
    }
}
