//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use typograph_core::RuleOptions;

use crate::config::CliConfig;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Preset to start the `[rules]` table from
    #[arg(short = 'P', long, value_name = "NAME", default_value = "default")]
    pub preset: String,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        println!("Generating configuration template...");
        println!("  Preset: {}", self.preset);
        println!("  Output file: {}", self.output.display());

        let template = self.generate_template()?;
        std::fs::write(&self.output, template)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the [rules] table to switch rule families on or off");
        println!("2. Validate your configuration:");
        println!("   typograph validate --config {}", self.output.display());
        println!("3. Use it for formatting:");
        println!(
            "   typograph format -i input.html --config {}",
            self.output.display()
        );

        Ok(())
    }

    /// Configuration with every option spelled out
    fn generate_template(&self) -> Result<String> {
        let config = CliConfig {
            rules: RuleOptions::preset(&self.preset)?,
            ..CliConfig::default()
        };
        let body = config.to_toml_string()?;
        Ok(format!(
            "# Typograph configuration ({} preset)\n#\n\
             # Rule families (dash, nbsp, special) accept `false` to switch the\n\
             # whole family off. Length limits accept `false` or a positive number.\n\n{body}",
            self.preset
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use typograph_core::EntityFormat;

    #[test]
    fn test_generated_template_loads() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("typograph.toml");
        let args = GenerateConfigArgs {
            output: output.clone(),
            preset: "named".to_string(),
        };
        args.execute().unwrap();

        let config = CliConfig::load(&output).unwrap();
        assert_eq!(config.rules.entities, EntityFormat::Named);
        assert_eq!(config.rules, RuleOptions::named());
    }

    #[test]
    fn test_unknown_preset() {
        let temp_dir = TempDir::new().unwrap();
        let args = GenerateConfigArgs {
            output: temp_dir.path().join("typograph.toml"),
            preset: "fancy".to_string(),
        };
        assert!(args.execute().is_err());
        assert!(!args.output.exists());
    }
}
