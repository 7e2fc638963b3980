//! Dockerfile template waterfall: exact (family, framework) template, then the
//! family's generic template, then the universal template.

use super::template::{exec_args, render, TemplateError, TemplateParams};
use super::templates as t;
use super::ArtifactContext;
use crate::output::Phase;
use crate::stack::{FrameworkId, LanguageFamily, PackageManagerId};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateLevel {
    Exact,
    FamilyGeneric,
    Universal,
}

fn exact_template(family: LanguageFamily, framework: &FrameworkId) -> Option<&'static str> {
    use FrameworkId as F;
    use LanguageFamily as L;

    let template = match (family, framework) {
        (L::Python, F::Flask) => t::PYTHON_FLASK,
        (L::Python, F::Django) => t::PYTHON_DJANGO,
        (L::Python, F::FastApi) => t::PYTHON_FASTAPI,
        (L::JavaScript, F::Express) => t::JAVASCRIPT_EXPRESS,
        (L::JavaScript, F::NextJs) => t::JAVASCRIPT_NEXT,
        (L::JavaScript, F::React) => t::JAVASCRIPT_REACT,
        (L::Java, F::Spring) => t::JAVA_SPRING,
        (L::Go, F::Gin) => t::GO_GIN,
        _ => return None,
    };
    Some(template)
}

fn family_template(family: LanguageFamily) -> Option<&'static str> {
    let template = match family {
        LanguageFamily::Python => t::PYTHON_GENERIC,
        LanguageFamily::JavaScript => t::JAVASCRIPT_GENERIC,
        LanguageFamily::Java => t::JAVA_GENERIC,
        LanguageFamily::Go => t::GO_GENERIC,
        LanguageFamily::Rust => t::RUST_GENERIC,
        LanguageFamily::Php => t::PHP_GENERIC,
        LanguageFamily::Ruby => t::RUBY_GENERIC,
        LanguageFamily::Native | LanguageFamily::Other => return None,
    };
    Some(template)
}

fn base_image(family: LanguageFamily) -> &'static str {
    match family {
        LanguageFamily::Python => "python:3.11-slim",
        LanguageFamily::JavaScript => "node:20-alpine",
        LanguageFamily::Rust => "rust:1.77-slim",
        LanguageFamily::Php => "php:8.2-cli",
        LanguageFamily::Ruby => "ruby:3.2-slim",
        _ => "alpine:3.19",
    }
}

fn python_install_block(ctx: &ArtifactContext<'_>) -> &'static str {
    if ctx.layout.python_uses_uv(ctx.package_manager) {
        return t::PYTHON_INSTALL_UV;
    }
    match ctx.package_manager {
        PackageManagerId::Poetry => t::PYTHON_INSTALL_POETRY,
        PackageManagerId::Pipenv => t::PYTHON_INSTALL_PIPENV,
        _ if !ctx.layout.has_file("requirements.txt")
            && (ctx.layout.has_file("pyproject.toml") || ctx.layout.has_file("setup.py")) =>
        {
            t::PYTHON_INSTALL_PIP_PROJECT
        }
        _ => t::PYTHON_INSTALL_PIP,
    }
}

fn node_install_block(package_manager: &PackageManagerId) -> &'static str {
    match package_manager {
        PackageManagerId::Yarn => t::NODE_INSTALL_YARN,
        PackageManagerId::Pnpm => t::NODE_INSTALL_PNPM,
        PackageManagerId::Bun => t::NODE_INSTALL_BUN,
        _ => t::NODE_INSTALL_NPM,
    }
}

fn uses_gradle(ctx: &ArtifactContext<'_>) -> bool {
    *ctx.package_manager == PackageManagerId::Gradle
        || (!ctx.layout.has_file("pom.xml")
            && (ctx.layout.has_file("build.gradle") || ctx.layout.has_file("build.gradle.kts")))
}

fn last_command<'a>(ctx: &'a ArtifactContext<'_>, phase: Phase) -> Option<&'a str> {
    ctx.commands
        .get(&phase)
        .and_then(|commands| commands.last())
        .map(String::as_str)
}

/// Parameters for every placeholder the family's templates use. A placeholder
/// whose value is unknown is left unset so that rendering fails over.
fn template_params(
    ctx: &ArtifactContext<'_>,
    family: LanguageFamily,
    health_check: &str,
) -> Result<TemplateParams, TemplateError> {
    let mut params = TemplateParams::new();
    params
        .set("port", ctx.port.to_string())?
        .set("health_check", health_check)?
        .set("base_image", base_image(family))?;

    if let Some(run) = last_command(ctx, Phase::Run) {
        params.set_exec("cmd", &exec_args(run))?;
    }
    if let Some(build) = last_command(ctx, Phase::Build) {
        params.set_exec("build_cmd", &exec_args(build))?;
    }

    match family {
        LanguageFamily::Python => {
            params.set_block("install_block", python_install_block(ctx))?;
            let collectstatic = ctx
                .commands
                .get(&Phase::Setup)
                .into_iter()
                .flatten()
                .find(|c| c.contains("collectstatic"));
            if let Some(setup) = collectstatic {
                params.set_exec("setup_cmd", &exec_args(setup))?;
            }
        }
        LanguageFamily::JavaScript => {
            params
                .set_block("install_block", node_install_block(ctx.package_manager))?
                .set("builder_image", base_image(family))?
                .set("runtime_image", "nginx:1.25-alpine")?;
        }
        LanguageFamily::Java => {
            if uses_gradle(ctx) {
                params
                    .set("builder_image", "gradle:8-jdk17")?
                    .set_block("build_block", t::JAVA_BUILD_GRADLE)?;
            } else {
                params
                    .set("builder_image", "maven:3.9-eclipse-temurin-17")?
                    .set_block("build_block", t::JAVA_BUILD_MAVEN)?;
            }
            params.set("runtime_image", "eclipse-temurin:17-jre-alpine")?;
        }
        LanguageFamily::Go => {
            params
                .set("builder_image", "golang:1.22-alpine")?
                .set("runtime_image", "alpine:3.19")?;
        }
        _ => {}
    }
    Ok(params)
}

fn render_universal(port: u16) -> String {
    let mut params = TemplateParams::new();
    let rendered = params
        .set("port", port.to_string())
        .and_then(|p| render(t::UNIVERSAL, p));
    match rendered {
        Ok(content) => content,
        Err(e) => {
            warn!(error = %e, "Universal template failed to render");
            t::UNIVERSAL.replace("{{port}}", &port.to_string())
        }
    }
}

/// Renders the Dockerfile, walking down the waterfall until a template renders
pub fn render_dockerfile(ctx: &ArtifactContext<'_>, health_check: &str) -> (String, TemplateLevel) {
    let family = ctx.language.family();

    let params = match template_params(ctx, family, health_check) {
        Ok(params) => params,
        Err(e) => {
            warn!(error = %e, "Invalid Dockerfile parameters, using universal template");
            return (render_universal(ctx.port), TemplateLevel::Universal);
        }
    };

    let candidates = [
        (exact_template(family, ctx.framework), TemplateLevel::Exact),
        (family_template(family), TemplateLevel::FamilyGeneric),
    ];
    for (template, level) in candidates {
        let Some(template) = template else {
            continue;
        };
        match render(template, &params) {
            Ok(content) => {
                debug!(family = family.key(), framework = %ctx.framework.key(), ?level, "Rendered Dockerfile");
                return (content, level);
            }
            Err(e @ TemplateError::MissingParameter(_)) => {
                debug!(family = family.key(), ?level, error = %e, "Template not applicable")
            }
            Err(e) => warn!(
                family = family.key(),
                ?level,
                error = %e,
                "Dockerfile template did not render, trying next"
            ),
        }
    }

    debug!(family = family.key(), "Using universal Dockerfile template");
    (render_universal(ctx.port), TemplateLevel::Universal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{CommandMap, ProjectLayout};
    use crate::stack::LanguageId;
    use std::collections::BTreeSet;

    fn commands(entries: &[(Phase, &str)]) -> CommandMap {
        let mut map = CommandMap::new();
        for (phase, cmd) in entries {
            map.entry(*phase).or_default().push(cmd.to_string());
        }
        map
    }

    fn ctx<'a>(
        language: &'a LanguageId,
        framework: &'a FrameworkId,
        pm: &'a PackageManagerId,
        commands: &'a CommandMap,
        layout: &'a ProjectLayout,
        services: &'a BTreeSet<crate::stack::ServiceId>,
    ) -> ArtifactContext<'a> {
        ArtifactContext {
            language,
            framework,
            package_manager: pm,
            port: 5000,
            services,
            commands,
            layout,
        }
    }

    #[test]
    fn test_flask_exact_template() {
        let (lang, fw, pm) = (LanguageId::Python, FrameworkId::Flask, PackageManagerId::Pip);
        let cmds = commands(&[(Phase::Run, "python app.py")]);
        let layout = ProjectLayout::default();
        let services = BTreeSet::new();
        let (content, level) = render_dockerfile(
            &ctx(&lang, &fw, &pm, &cmds, &layout, &services),
            "curl -f http://localhost:5000/health || exit 1",
        );
        assert_eq!(level, TemplateLevel::Exact);
        assert!(content.starts_with("FROM python:3.11-slim"));
        assert!(content.contains("EXPOSE 5000"));
        assert!(content.contains(r#"CMD ["python","app.py"]"#));
        assert!(content.contains("pip install --no-cache-dir -r requirements.txt"));
        assert!(!content.contains("{{"));
    }

    #[test]
    fn test_missing_run_command_falls_to_universal() {
        let (lang, fw, pm) = (LanguageId::Python, FrameworkId::Generic, PackageManagerId::Pip);
        let cmds = CommandMap::new();
        let layout = ProjectLayout::default();
        let services = BTreeSet::new();
        let (content, level) =
            render_dockerfile(&ctx(&lang, &fw, &pm, &cmds, &layout, &services), "true");
        assert_eq!(level, TemplateLevel::Universal);
        assert!(content.starts_with("FROM alpine:3.19"));
        assert!(content.contains("Please configure your application"));
    }

    #[test]
    fn test_typescript_uses_javascript_family() {
        let (lang, fw, pm) = (LanguageId::TypeScript, FrameworkId::Generic, PackageManagerId::Yarn);
        let cmds = commands(&[(Phase::Run, "yarn start")]);
        let layout = ProjectLayout::default();
        let services = BTreeSet::new();
        let (content, level) =
            render_dockerfile(&ctx(&lang, &fw, &pm, &cmds, &layout, &services), "true");
        assert_eq!(level, TemplateLevel::FamilyGeneric);
        assert!(content.contains("yarn install"));
        assert!(content.contains(r#"CMD ["yarn","start"]"#));
    }

    #[test]
    fn test_react_listens_on_profile_port() {
        let (lang, fw, pm) = (LanguageId::JavaScript, FrameworkId::React, PackageManagerId::Npm);
        let cmds = commands(&[(Phase::Build, "npm run build"), (Phase::Run, "npm start")]);
        let layout = ProjectLayout::default();
        let services = BTreeSet::new();
        let (content, level) =
            render_dockerfile(&ctx(&lang, &fw, &pm, &cmds, &layout, &services), "true");
        assert_eq!(level, TemplateLevel::Exact);
        assert!(content.contains("FROM nginx:1.25-alpine"));
        assert!(content.contains(r"listen\15000;"));
        assert!(content.contains("EXPOSE 5000"));
    }

    #[test]
    fn test_kotlin_gradle_generic() {
        let (lang, fw, pm) = (LanguageId::Kotlin, FrameworkId::Generic, PackageManagerId::Gradle);
        let cmds = CommandMap::new();
        let layout = ProjectLayout::default();
        let services = BTreeSet::new();
        let (content, level) =
            render_dockerfile(&ctx(&lang, &fw, &pm, &cmds, &layout, &services), "true");
        assert_eq!(level, TemplateLevel::FamilyGeneric);
        assert!(content.contains("FROM gradle:8-jdk17 AS builder"));
        assert!(content.contains(r#"CMD ["java", "-jar", "app.jar"]"#));
    }
}
