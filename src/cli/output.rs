//! Output formatting for multiple formats
//!
//! JSON and YAML serialize the whole [`RepositoryProfile`]; the human format is a
//! boxed summary meant for terminals.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::output::{Phase, RepositoryProfile};

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format (human-friendly, version-control friendly)
    Yaml,
    /// Human-readable formatted text
    Human,
}

const RULE: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";

fn tree_lines<I, S>(output: &mut String, items: I)
where
    I: IntoIterator<Item = S>,
    I::IntoIter: ExactSizeIterator,
    S: AsRef<str>,
{
    let items = items.into_iter();
    let len = items.len();
    for (i, item) in items.enumerate() {
        let connector = if i + 1 == len { "\u{2514}" } else { "\u{251C}" };
        output.push_str(&format!("{}\u{2500} {}\n", connector, item.as_ref()));
    }
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, profile: &RepositoryProfile) -> Result<String> {
        match self.format {
            OutputFormat::Json => profile.to_json(),
            OutputFormat::Yaml => profile.to_yaml(),
            OutputFormat::Human => Ok(self.format_human(profile)),
        }
    }

    /// Summary of a `generate` run
    pub fn format_written(&self, written: &[PathBuf]) -> Result<String> {
        let paths: Vec<String> = written.iter().map(|p| p.display().to_string()).collect();
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&serde_json::json!({ "written": paths }))
                .context("Failed to serialize written files to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(&serde_json::json!({ "written": paths }))
                .context("Failed to serialize written files to YAML"),
            OutputFormat::Human => {
                let mut output = format!("\u{2713} Wrote {} files\n", paths.len());
                tree_lines(&mut output, paths);
                Ok(output)
            }
        }
    }

    fn format_human(&self, profile: &RepositoryProfile) -> String {
        let mut output = String::new();

        output.push_str("\u{2713} Repository Analysis\n");
        output.push_str(RULE);
        output.push_str("\n\n");

        output.push_str(&format!("Language:         {}\n", profile.primary_language));
        output.push_str(&format!("Framework:        {}\n", profile.framework.key()));
        output.push_str(&format!(
            "Package Manager:  {}\n",
            profile.package_manager.key()
        ));
        output.push_str(&format!("Port:             {}\n\n", profile.port));

        if !profile.external_services.is_empty() {
            output.push_str("Services:\n");
            tree_lines(
                &mut output,
                profile
                    .external_services
                    .iter()
                    .map(|s| s.key().to_string())
                    .collect::<Vec<_>>(),
            );
            output.push('\n');
        }

        output.push_str("Commands:\n");
        if profile.commands.is_empty() {
            output.push_str("\u{2514}\u{2500} (none detected)\n");
        } else {
            let lines: Vec<String> = Phase::ALL
                .iter()
                .filter_map(|phase| {
                    let commands = profile.commands_for(*phase);
                    (!commands.is_empty())
                        .then(|| format!("{:<8} {}", format!("{}:", phase), commands.join(" && ")))
                })
                .collect();
            tree_lines(&mut output, lines);
        }
        output.push('\n');

        if !profile.env_vars.is_empty() {
            output.push_str("Environment:\n");
            tree_lines(
                &mut output,
                profile
                    .env_vars
                    .iter()
                    .map(|(k, v)| format!("{:<24} {}", k, v))
                    .collect::<Vec<_>>(),
            );
            output.push('\n');
        }

        if !profile.build_tools.is_empty() {
            output.push_str(&format!(
                "Build Tools:      {}\n",
                profile
                    .build_tools
                    .iter()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }
        output.push_str(&format!(
            "Dependencies:     {}\n",
            profile.dependencies.len()
        ));
        output.push_str(&format!("Health Check:     {}\n", profile.health_check));
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::{FrameworkId, LanguageId};

    fn profile() -> RepositoryProfile {
        let mut profile = RepositoryProfile {
            primary_language: LanguageId::Go,
            framework: FrameworkId::Gin,
            port: 8080,
            health_check: "wget --spider http://localhost:8080/health || exit 1".to_string(),
            ..Default::default()
        };
        profile
            .commands
            .insert(Phase::Build, vec!["go build -o app .".to_string()]);
        profile
    }

    #[test]
    fn test_json_format() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let output = formatter.format(&profile()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["framework"], "gin");
        assert_eq!(value["commands"]["build"][0], "go build -o app .");
    }

    #[test]
    fn test_yaml_format() {
        let formatter = OutputFormatter::new(OutputFormat::Yaml);
        let output = formatter.format(&profile()).unwrap();
        let parsed: RepositoryProfile = serde_yaml::from_str(&output).unwrap();
        assert_eq!(parsed, profile());
    }

    #[test]
    fn test_human_format() {
        let formatter = OutputFormatter::new(OutputFormat::Human);
        let output = formatter.format(&profile()).unwrap();
        assert!(output.contains("Repository Analysis"));
        assert!(output.contains("Framework:        gin"));
        assert!(output.contains("build:   go build -o app ."));
    }

    #[test]
    fn test_written_summary() {
        let formatter = OutputFormatter::new(OutputFormat::Human);
        let output = formatter
            .format_written(&[PathBuf::from("out/Dockerfile"), PathBuf::from("out/.env.example")])
            .unwrap();
        assert!(output.starts_with("\u{2713} Wrote 2 files"));
        assert!(output.contains("\u{2514}\u{2500} out/.env.example"));
    }
}
