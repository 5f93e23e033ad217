/*!
 * Markdown writer for dirbook
 */

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::assembler::Document;
use crate::config::Config;
use crate::error::{DirbookError, Result};

/// Writes an assembled document to the configured output file
pub struct MarkdownWriter {
    /// Writer configuration
    config: Config,
}

impl MarkdownWriter {
    /// Create a new Markdown writer
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Write the document, creating missing parent directories
    pub fn write(&self, document: &Document) -> Result<()> {
        let path = &self.config.output_file;
        write_text(path, &document.render()).map_err(|source| DirbookError::OutputWrite {
            path: path.clone(),
            source,
        })?;
        info!("Markdown file written to: {}", path.display());
        Ok(())
    }
}

fn write_text(path: &Path, text: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(text.as_bytes())?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Section;

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested/deeper/export.md");
        let config = Config::new(dir.path(), &output);

        let document = Document {
            sections: vec![Section::new(vec!["# Title".into()]), Section::new(vec!["body".into()])],
            ..Default::default()
        };
        MarkdownWriter::new(config).write(&document).unwrap();

        assert_eq!(fs::read_to_string(output).unwrap(), "# Title\n\nbody");
    }

    #[test]
    fn test_write_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a file
        let config = Config::new(dir.path(), dir.path());
        let err = MarkdownWriter::new(config)
            .write(&Document::default())
            .unwrap_err();
        assert!(matches!(err, DirbookError::OutputWrite { .. }));
        assert_eq!(err.exit_code(), 1);
    }
}
