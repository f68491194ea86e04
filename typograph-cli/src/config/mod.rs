//! CLI configuration file
//!
//! ```toml
//! [rules]
//! entities = "named"
//! nbsp = { short-word = 3 }
//!
//! [output]
//! default-format = "json"
//!
//! [performance]
//! worker-threads = 4
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use typograph_core::RuleOptions;

use crate::error::CliError;
use crate::output::OutputFormat;

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CliConfig {
    /// Formatter rule options
    #[serde(default)]
    pub rules: RuleOptions,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Performance configuration
    #[serde(default)]
    pub performance: PerformanceConfig,
}

impl CliConfig {
    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let source = fs::read_to_string(path)
            .map_err(|e| CliError::ConfigError(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&source)
            .map_err(|e| CliError::ConfigError(format!("{}: {e}", path.display())))
    }

    pub fn from_toml_str(source: &str) -> Result<Self, CliError> {
        let config: Self =
            toml::from_str(source).map_err(|e| CliError::ConfigError(e.to_string()))?;
        // Re-run option validation through the core builder
        typograph_core::Typograph::with_options(config.rules.clone())?;
        Ok(config)
    }

    /// TOML text of this configuration
    pub fn to_toml_string(&self) -> Result<String, CliError> {
        toml::to_string_pretty(self).map_err(|e| CliError::ConfigError(e.to_string()))
    }
}

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct OutputConfig {
    /// Output format used when `--format` is not given
    pub default_format: OutputFormat,

    /// Pretty print JSON output
    pub pretty_json: bool,

    /// Token dumps are dropped for results longer than this many characters
    pub token_limit: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Text,
            pretty_json: true,
            token_limit: 4096,
        }
    }
}

/// Performance-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct PerformanceConfig {
    /// Inputs needed before files are processed in parallel
    pub parallel_min_files: usize,

    /// Number of worker threads (0 = auto)
    pub worker_threads: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            parallel_min_files: 4,
            worker_threads: 0,
        }
    }
}

impl PerformanceConfig {
    /// Worker threads to use, resolving 0 to the number of CPUs
    pub fn threads(&self) -> usize {
        if self.worker_threads == 0 {
            num_cpus::get()
        } else {
            self.worker_threads
        }
    }
}
