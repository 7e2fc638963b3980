use crate::config::ConfigFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Deterministic repository stack detection and containerization
#[derive(Parser, Debug)]
#[command(
    name = "repobox",
    about = "Detect a repository's stack and generate containerization artifacts",
    version,
    long_about = "repobox classifies a repository's language, framework, package manager, \
                  services, port and environment variables from its files, then renders a \
                  Dockerfile, docker-compose.yml, .env.example and setup/install/build/run/test \
                  commands. It never runs the commands it generates and never touches the network."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Analyze a repository and print its profile",
        long_about = "Scans the repository and prints the detected stack, commands and \
                      artifacts.\n\n\
                      Examples:\n  \
                      repobox analyze\n  \
                      repobox analyze /path/to/repo --format json\n  \
                      repobox analyze . --format yaml --output profile.yaml"
    )]
    Analyze(AnalyzeArgs),

    #[command(
        about = "Write containerization artifacts for a repository",
        long_about = "Writes Dockerfile, docker-compose.yml, container-config.*, .env.example \
                      and CONTAINERIZATION_README.md.\n\n\
                      Examples:\n  \
                      repobox generate /path/to/repo\n  \
                      repobox generate . --output-dir build/container --config-format json\n  \
                      repobox generate . --refinement refined.json"
    )]
    Generate(GenerateArgs),

    #[command(
        about = "Print a refinement prompt for a repository",
        long_about = "Builds the prompt an external assistant can answer to refine the \
                      generated Dockerfile and compose file. The answer can be fed back with \
                      `generate --refinement`."
    )]
    Prompt(PromptArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to repository (defaults to current directory)"
    )]
    pub repository_path: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to repository (defaults to current directory)"
    )]
    pub repository_path: Option<PathBuf>,

    #[arg(
        short = 'd',
        long,
        value_name = "DIR",
        help = "Directory to write artifacts to (defaults to <PATH>/containerization)"
    )]
    pub output_dir: Option<PathBuf>,

    #[arg(long, value_enum, help = "Format of container-config.* (defaults to yaml)")]
    pub config_format: Option<ConfigFormat>,

    #[arg(
        short = 'r',
        long,
        value_name = "FILE",
        help = "Refinement response (JSON) to validate and merge before writing"
    )]
    pub refinement: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct PromptArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to repository (defaults to current directory)"
    )]
    pub repository_path: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
