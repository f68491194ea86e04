//! Plain text output formatter

use super::{Document, OutputFormatter};
use anyhow::Result;
use std::io::{self, Write};

/// Plain text formatter - writes the formatted text of each document
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl TextFormatter<io::Stdout> {
    /// Create a formatter that writes to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> OutputFormatter for TextFormatter<W> {
    fn write_document(&mut self, document: &Document) -> Result<()> {
        writeln!(self.writer, "{}", document.result.text)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use typograph_core::{format, RuleOptions};

    #[test]
    fn test_writes_text_per_document() {
        let mut buffer = Vec::new();
        {
            let mut formatter = TextFormatter::new(&mut buffer);
            for original in ["\"a\"", "b..."] {
                let document = Document {
                    source: "<stdin>".to_string(),
                    original: original.to_string(),
                    result: format(original, &RuleOptions::default()),
                };
                formatter.write_document(&document).unwrap();
            }
            formatter.finish().unwrap();
        }
        assert_eq!(String::from_utf8(buffer).unwrap(), "«a»\nb…\n");
    }
}
