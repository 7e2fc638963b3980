use super::commands::{AnalyzeArgs, GenerateArgs, PromptArgs};
use super::output::{OutputFormat, OutputFormatter};
use crate::artifacts::render_artifacts;
use crate::config::{RepoboxConfig, DEFAULT_OUTPUT_DIR};
use crate::output::RepositoryProfile;
use crate::pipeline::{build_refinement_prompt, validate_and_merge, AnalysisPipeline};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

fn repository_path(path: &Option<PathBuf>) -> PathBuf {
    path.clone().unwrap_or_else(|| PathBuf::from("."))
}

fn analyze(config: &RepoboxConfig, repo: &Path) -> Result<RepositoryProfile> {
    config.validate().context("Invalid configuration")?;
    info!(path = %repo.display(), "Analyzing repository");
    let profile = AnalysisPipeline::new(config.clone())
        .analyze_path(repo)
        .with_context(|| format!("Failed to scan {}", repo.display()))?;
    Ok(profile)
}

fn emit(output: &str, target: Option<&Path>) -> Result<()> {
    match target {
        Some(path) => {
            fs::write(path, output)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            info!(path = %path.display(), "Output written");
        }
        None => println!("{}", output.trim_end()),
    }
    Ok(())
}

fn exit_code(result: Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

pub fn handle_analyze(args: &AnalyzeArgs, config: &RepoboxConfig) -> i32 {
    exit_code(run_analyze(args, config))
}

pub fn handle_generate(args: &GenerateArgs, config: &RepoboxConfig, quiet: bool) -> i32 {
    exit_code(run_generate(args, config, quiet))
}

pub fn handle_prompt(args: &PromptArgs, config: &RepoboxConfig) -> i32 {
    exit_code(run_prompt(args, config))
}

fn run_analyze(args: &AnalyzeArgs, config: &RepoboxConfig) -> Result<()> {
    let repo = repository_path(&args.repository_path);
    let profile = analyze(config, &repo)?;
    let output = OutputFormatter::new(args.format.into()).format(&profile)?;
    emit(&output, args.output.as_deref())
}

fn run_generate(args: &GenerateArgs, config: &RepoboxConfig, quiet: bool) -> Result<()> {
    let repo = repository_path(&args.repository_path);
    let mut profile = analyze(config, &repo)?;

    if let Some(refinement_path) = &args.refinement {
        let raw = fs::read_to_string(refinement_path)
            .with_context(|| format!("Failed to read refinement {}", refinement_path.display()))?;
        profile = validate_and_merge(&profile, &raw);
    }

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| repo.join(DEFAULT_OUTPUT_DIR));
    let format = args.config_format.unwrap_or(config.config_format);
    debug!(dir = %output_dir.display(), %format, "Rendering artifacts");

    let written = render_artifacts(&profile, &output_dir, format)?;
    if !quiet {
        let summary = OutputFormatter::new(OutputFormat::Human).format_written(&written)?;
        emit(&summary, None)?;
    }
    Ok(())
}

fn run_prompt(args: &PromptArgs, config: &RepoboxConfig) -> Result<()> {
    let repo = repository_path(&args.repository_path);
    let profile = analyze(config, &repo)?;
    emit(&build_refinement_prompt(&profile), None)
}
