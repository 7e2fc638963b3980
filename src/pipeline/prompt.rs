use crate::output::RepositoryProfile;
use std::fmt::Write;

const MAX_PROMPT_DEPENDENCIES: usize = 10;

const INSTRUCTIONS: &str = "\
Refine the Dockerfile and docker-compose.yml below for production use:
1. Run as a non-root user on a minimal base image
2. Use multi-stage builds where they shrink the final image
3. Order layers so dependency installs are cached
4. Apply framework-specific settings
5. Wire up the listed services and environment variables
6. Keep the health check consistent with the exposed port

Respond with a single JSON object and nothing else. \
primary_language and framework must be copied unchanged; \
a response that changes them is discarded.";

/// Refinement prompt built only from profile fields
pub fn build_refinement_prompt(profile: &RepositoryProfile) -> String {
    let mut out = String::new();
    let services: Vec<&str> = profile.external_services.iter().map(|s| s.key()).collect();
    let dependencies: Vec<&str> = profile
        .dependencies
        .iter()
        .take(MAX_PROMPT_DEPENDENCIES)
        .map(String::as_str)
        .collect();
    let env_names: Vec<&str> = profile.env_vars.keys().map(String::as_str).collect();
    let build_tools: Vec<&str> = profile.build_tools.iter().map(String::as_str).collect();

    out.push_str("Analyze this repository profile and refine its containerization.\n\n");
    out.push_str("Pre-analysis results:\n");
    let _ = writeln!(out, "- Primary Language: {}", profile.primary_language);
    let _ = writeln!(out, "- Framework: {}", profile.framework.key());
    let _ = writeln!(out, "- Package Manager: {}", profile.package_manager.key());
    let _ = writeln!(out, "- Services: {}", services.join(", "));
    let _ = writeln!(out, "- Port: {}", profile.port);
    let _ = writeln!(out, "- Build Tools: {}", build_tools.join(", "));
    let _ = writeln!(
        out,
        "- Dependencies ({} total): {}",
        profile.dependencies.len(),
        dependencies.join(", ")
    );
    let _ = writeln!(out, "- Environment Variables: {}", env_names.join(", "));
    out.push_str("- Commands:\n");
    for (phase, commands) in &profile.commands {
        let _ = writeln!(out, "  - {}: {}", phase, commands.join(" && "));
    }

    out.push('\n');
    out.push_str(INSTRUCTIONS);
    out.push_str("\n\nResponse shape:\n");
    let shape = serde_json::json!({
        "primary_language": profile.primary_language,
        "framework": profile.framework,
        "dockerfile_content": "complete Dockerfile",
        "docker_compose_content": "complete docker-compose.yml",
        "health_check": profile.health_check,
    });
    let _ = writeln!(
        out,
        "{}",
        serde_json::to_string_pretty(&shape).unwrap_or_default()
    );

    out.push_str("\nCurrent Dockerfile:\n```dockerfile\n");
    out.push_str(profile.dockerfile_content.trim_end());
    out.push_str("\n```\n\nCurrent docker-compose.yml:\n```yaml\n");
    out.push_str(profile.docker_compose_content.trim_end());
    out.push_str("\n```\n");
    out
}
