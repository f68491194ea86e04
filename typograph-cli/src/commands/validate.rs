//! Validate command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use typograph_core::{RuleOptions, Typograph};

use crate::config::CliConfig;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Rule options file (TOML or JSON) to validate
    #[arg(short, long, value_name = "FILE", required_unless_present = "config")]
    pub rules: Option<PathBuf>,

    /// CLI configuration file to validate
    #[arg(short, long, value_name = "FILE", conflicts_with = "rules")]
    pub config: Option<PathBuf>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        let (path, options) = match (&self.rules, &self.config) {
            (Some(path), _) => (path, RuleOptions::from_file(path).map_err(|e| e.to_string())),
            (None, Some(path)) => (
                path,
                CliConfig::load(path)
                    .map(|config| config.rules)
                    .map_err(|e| e.to_string()),
            ),
            (None, None) => anyhow::bail!("Nothing to validate"),
        };

        println!("Validating options: {}", path.display());

        let typograph = options
            .and_then(|options| Typograph::with_options(options).map_err(|e| e.to_string()));

        match typograph {
            Ok(typograph) => {
                let options = typograph.options();
                println!("✓ Options are valid!");
                println!("  Entities: {}", options.entities.as_str());
                println!("  Quote levels: {}", options.quotes.len());
                println!("  Rules enabled: {}", typograph.rules().rules().len());
                Ok(())
            }
            Err(e) => {
                println!("✗ Options are invalid!");
                println!("  Error: {e}");
                Err(anyhow::anyhow!("Validation failed: {}", e))
            }
        }
    }
}
