//! Where the formatter's rule options come from

use std::path::PathBuf;
use typograph_core::RuleOptions;

use crate::config::CliConfig;
use crate::error::CliError;

/// Source of rule options
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesSource {
    /// `[rules]` table of the CLI configuration (defaults without a file)
    Config,
    /// Embedded preset
    Preset(String),
    /// Standalone TOML or JSON options file
    File(PathBuf),
}

impl RulesSource {
    /// Pick the source from command-line flags; a preset wins over a file
    pub fn from_args(preset: Option<&str>, rules: Option<&PathBuf>) -> Self {
        match (preset, rules) {
            (Some(name), _) => RulesSource::Preset(name.to_string()),
            (None, Some(path)) => RulesSource::File(path.clone()),
            (None, None) => RulesSource::Config,
        }
    }

    /// Get the display name for the rules source
    pub fn display_name(&self) -> String {
        match self {
            RulesSource::Config => "Configuration".to_string(),
            RulesSource::Preset(name) => format!("Preset: {name}"),
            RulesSource::File(path) => format!("File: {}", path.display()),
        }
    }

    /// Resolve the options
    pub fn load(&self, config: &CliConfig) -> Result<RuleOptions, CliError> {
        match self {
            RulesSource::Config => Ok(config.rules.clone()),
            RulesSource::Preset(name) => Ok(RuleOptions::preset(name)?),
            RulesSource::File(path) => RuleOptions::from_file(path)
                .map_err(|e| CliError::ConfigError(format!("{}: {e}", path.display()))),
        }
    }
}
