use repobox::cli::commands::{CliArgs, Commands};
use repobox::cli::handlers::{handle_analyze, handle_generate, handle_prompt};
use repobox::util::logging::{init_logging, parse_level, LoggingConfig};
use repobox::{RepoboxConfig, VERSION};

use clap::Parser;
use std::env;
use tracing::{debug, Level};

fn main() {
    let args = CliArgs::parse();
    let config = RepoboxConfig::from_env();
    init_logging_from_args(&args, &config);

    debug!("repobox v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Analyze(analyze_args) => handle_analyze(analyze_args, &config),
        Commands::Generate(generate_args) => handle_generate(generate_args, &config, args.quiet),
        Commands::Prompt(prompt_args) => handle_prompt(prompt_args, &config),
    };

    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs, config: &RepoboxConfig) {
    let level = if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        parse_level(&config.log_level)
    };

    let use_json = env::var("REPOBOX_LOG_JSON")
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false);

    init_logging(LoggingConfig {
        level,
        use_json,
        ..Default::default()
    });
}
