//! JSON output formatter

use super::{Document, OutputFormatter};
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use typograph_core::{EntityFormat, Token};

/// JSON formatter - outputs documents as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    format: EntityFormat,
    token_limit: usize,
    pretty: bool,
    records: Vec<DocumentRecord>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize)]
pub struct DocumentRecord {
    pub source: String,
    pub original: String,
    pub text: String,
    /// Empty when the text is longer than the token limit
    pub tokens: Vec<Token>,
    pub format: EntityFormat,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, format: EntityFormat, token_limit: usize, pretty: bool) -> Self {
        Self {
            writer,
            format,
            token_limit,
            pretty,
            records: Vec::new(),
        }
    }
}

impl<W: Write + Send> OutputFormatter for JsonFormatter<W> {
    fn write_document(&mut self, document: &Document) -> Result<()> {
        let result = &document.result;
        let tokens = if result.text.chars().count() > self.token_limit {
            log::debug!(
                "{}: {} characters, token dump dropped",
                document.source,
                result.metrics.output_len
            );
            Vec::new()
        } else {
            result.tokens.clone()
        };

        self.records.push(DocumentRecord {
            source: document.source.clone(),
            original: document.original.clone(),
            text: result.text.clone(),
            tokens,
            format: self.format,
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.records)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.records)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
