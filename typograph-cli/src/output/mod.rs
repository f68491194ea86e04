//! Output formatting module

use anyhow::Result;
use serde::{Deserialize, Serialize};
use typograph_core::ProcessedResult;

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Formatted text only
    #[default]
    Text,
    /// JSON records with the original text, result and token dump
    Json,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            OutputFormat::Text => "Formatted text, one document after another",
            OutputFormat::Json => "Array of {source, original, text, tokens, format} records",
        }
    }
}

/// One processed input
#[derive(Debug, Clone)]
pub struct Document {
    /// File path, or `<stdin>`
    pub source: String,
    pub original: String,
    pub result: ProcessedResult,
}

/// Trait for output formatters
pub trait OutputFormatter: Send {
    /// Write a single processed document
    fn write_document(&mut self, document: &Document) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}
