//! CLI command implementations

use anyhow::Result;
use clap::Subcommand;
use typograph_core::{presets, EntityFormat};

use crate::output::OutputFormat;

pub mod format;
pub mod generate_config;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Format text or HTML files
    Format(format::FormatArgs),

    /// Check a rule options or configuration file
    Validate(validate::ValidateArgs),

    /// Write a configuration file with every option spelled out
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum ListCommands {
    /// List embedded rule presets
    Presets,

    /// List available output formats
    Formats,

    /// List entity output forms
    Entities,
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Format(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::List { subcommand } => {
                for line in subcommand.lines() {
                    println!("{line}");
                }
                Ok(())
            }
        }
    }
}

impl ListCommands {
    /// Output lines of the listing
    pub fn lines(self) -> Vec<String> {
        match self {
            ListCommands::Presets => presets::list_presets()
                .into_iter()
                .map(str::to_string)
                .collect(),
            ListCommands::Formats => [OutputFormat::Text, OutputFormat::Json]
                .into_iter()
                .map(|format| format!("{:<6} {}", format.as_str(), format.description()))
                .collect(),
            ListCommands::Entities => EntityFormat::all()
                .into_iter()
                .map(|format| format.as_str().to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_presets() {
        assert_eq!(
            ListCommands::Presets.lines(),
            vec!["default", "minimal", "named"]
        );
    }

    #[test]
    fn test_list_formats() {
        let lines = ListCommands::Formats.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("text"));
        assert!(lines[1].starts_with("json"));
    }

    #[test]
    fn test_list_entities() {
        assert_eq!(
            ListCommands::Entities.lines(),
            vec!["named", "numeric", "hex", "raw"]
        );
    }

    #[test]
    fn test_list_command_runs() {
        let command = Commands::List {
            subcommand: ListCommands::Formats,
        };
        assert!(command.execute().is_ok());
        assert!(format!("{command:?}").contains("Formats"));
    }
}
