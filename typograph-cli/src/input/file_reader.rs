//! File and stdin reading

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::error::CliError;

/// Name reported for standard input
pub const STDIN: &str = "<stdin>";

/// File reader with UTF-8 validation
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text
    pub fn read_text(path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()).into());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(content)
    }

    /// Read all of standard input
    pub fn read_stdin() -> Result<String> {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read standard input")?;
        Ok(content)
    }

    /// Get file size in bytes
    pub fn file_size(path: &Path) -> Result<u64> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to get metadata for: {}", path.display()))?;

        Ok(metadata.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_text_success() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.html");

        let content = "<p>Он сказал: \"Привет\"</p>\n";
        fs::write(&file_path, content).unwrap();

        assert_eq!(FileReader::read_text(&file_path).unwrap(), content);
        assert_eq!(
            FileReader::file_size(&file_path).unwrap(),
            content.len() as u64
        );
    }

    #[test]
    fn test_read_text_nonexistent_file() {
        let error = FileReader::read_text(Path::new("/nonexistent/file.txt")).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<CliError>(),
            Some(CliError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_read_text_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("latin1.txt");
        fs::write(&file_path, [0xcf, 0xf0, 0xe8, 0xff]).unwrap();

        let error = FileReader::read_text(&file_path).unwrap_err();
        assert!(error.to_string().contains("Failed to read file"));
    }

    #[test]
    fn test_file_size_nonexistent() {
        let error = FileReader::file_size(Path::new("/nonexistent/file.txt")).unwrap_err();
        assert!(error.to_string().contains("Failed to get metadata"));
    }
}
