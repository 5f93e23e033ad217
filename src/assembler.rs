/*!
 * Document assembly
 *
 * Turns the sorted file list into the ordered sections of the Markdown
 * document: header, tree, one section per file, then the optional type check
 * and closing summary.
 */

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Local};
use indicatif::ProgressBar;
use tracing::{debug, info, warn};

use crate::classifier::Classifier;
use crate::config::Config;
use crate::decode;
use crate::normalizer;
use crate::report::FileReportInfo;
use crate::tree;
use crate::typecheck::TypeCheck;
use crate::types::{Classification, FileEntry, IgnoreReason, Section};
use crate::utils::{format_file_size, format_kb};

/// Separator placed between sections
pub const SECTION_SEPARATOR: &str = "\n\n";

/// Counters collected while assembling
#[derive(Debug, Clone, Default)]
pub struct DocumentStats {
    /// Number of per-file sections emitted
    pub files_processed: usize,
    /// Number of files per classification label
    pub by_label: HashMap<&'static str, usize>,
    /// Number of ignored files per naming rule
    pub by_reason: HashMap<IgnoreReason, usize>,
    /// Lines of included content after normalization
    pub total_lines: usize,
    /// Characters of included content after normalization
    pub total_chars: usize,
    /// Details for each file, keyed by relative path
    pub file_details: HashMap<String, FileReportInfo>,
}

impl DocumentStats {
    fn record(&mut self, rel: String, classification: &Classification, content: Option<&str>) {
        self.files_processed += 1;
        *self.by_label.entry(classification.label()).or_default() += 1;
        if let Classification::Ignored(reason) = classification {
            *self.by_reason.entry(*reason).or_default() += 1;
        }

        let (lines, chars) = content
            .map(|text| (text.lines().count(), text.chars().count()))
            .unwrap_or_default();
        self.total_lines += lines;
        self.total_chars += chars;
        self.file_details.insert(
            rel,
            FileReportInfo {
                lines,
                chars,
                status: classification.label(),
            },
        );
    }
}

/// Assembled document
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Ordered sections
    pub sections: Vec<Section>,
    /// Run statistics
    pub stats: DocumentStats,
}

impl Document {
    /// Join all sections into the final Markdown text
    pub fn render(&self) -> String {
        self.sections
            .iter()
            .map(Section::render)
            .collect::<Vec<_>>()
            .join(SECTION_SEPARATOR)
    }
}

/// Builds the document from a list of discovered files
pub struct Assembler<'a> {
    /// Run configuration
    config: &'a Config,
    /// Classifier over the configured rules
    classifier: Classifier<'a>,
    /// Type check collaborator
    typecheck: TypeCheck,
    /// Generation time shown in the header
    generated_at: DateTime<Local>,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
}

impl<'a> Assembler<'a> {
    /// Create a new assembler
    pub fn new(config: &'a Config, progress: Arc<ProgressBar>) -> Self {
        Self {
            config,
            classifier: Classifier::new(&config.rules),
            typecheck: TypeCheck::default(),
            generated_at: Local::now(),
            progress,
        }
    }

    /// Replace the type check collaborator
    pub fn with_typecheck(mut self, typecheck: TypeCheck) -> Self {
        self.typecheck = typecheck;
        self
    }

    /// Human-readable generation timestamp
    pub fn format_timestamp(&self) -> String {
        self.generated_at.format("%d/%m/%Y at %H:%M:%S").to_string()
    }

    /// ISO-8601 generation timestamp
    pub fn format_iso_timestamp(&self) -> String {
        self.generated_at.to_rfc3339()
    }

    /// Assemble all sections for the given sorted entries
    pub fn assemble(&self, entries: &[FileEntry]) -> Document {
        let mut document = Document::default();

        document.sections.push(self.header());
        document.sections.push(Section::new(tree::build_tree(
            entries.iter().map(FileEntry::segments),
        )));

        info!("Compiling {} files...", entries.len());
        info!("Generation timestamp: {}", self.format_timestamp());
        self.progress.set_length(entries.len() as u64);

        for entry in entries {
            self.progress
                .set_message(format!("Current file: {}", entry.name()));
            let (section, classification, content) = self.file_section(entry);
            document
                .stats
                .record(entry.rel_display(), &classification, content.as_deref());
            document.sections.push(section);
            self.progress.inc(1);
        }

        if self.config.rules.check_types {
            if let Some(section) = self.typecheck.section(&self.config.target_dir) {
                document.sections.push(section);
            }
        }

        if !self.config.include_self {
            document.sections.push(self.summary());
        }

        document
    }

    /// Document header with title and timestamps
    pub fn header(&self) -> Section {
        Section::new(vec![
            format!(
                "# Compilation of files from `{}`\n",
                self.config.target_dir.display()
            ),
            format!("**Generated on**: {}  ", self.format_timestamp()),
            format!("**ISO timestamp**: `{}`\n", self.format_iso_timestamp()),
            "> Automatically generated by dirbook.\n".to_string(),
        ])
    }

    /// Closing note about the generator
    pub fn summary(&self) -> Section {
        Section::new(vec![
            "---\n".to_string(),
            "## About this document\n".to_string(),
            "This Markdown file was generated automatically by `dirbook`.".to_string(),
            "To include the `dirbook` executable itself when it lives under the root, run it with the `--include-self` flag.".to_string(),
        ])
    }

    /// Render one file; content is only read for included files
    ///
    /// Returns the section, the final classification and the rendered text.
    pub fn file_section(&self, entry: &FileEntry) -> (Section, Classification, Option<String>) {
        let rel = entry.rel_display();
        let mut section = Section::new(vec![format!("## {}", rel)]);
        let classification = self.classifier.classify(&entry.rel_path, entry.size);

        let language = match &classification {
            Classification::Included(language) => language.clone(),
            Classification::Media => {
                debug!("Media file: {}", rel);
                section.push(format!("- **Media file**: `{}`", entry.name()));
                return (section, Classification::Media, None);
            }
            other => {
                debug!(
                    "Ignored file ({}): {} [{}]",
                    other.label(),
                    rel,
                    entry.size.map(format_file_size).unwrap_or_default()
                );
                section.push(ignored_placeholder(&rel, entry.size));
                return (section, other.clone(), None);
            }
        };

        let Some(text) = self.read_content(&entry.path, &language) else {
            section.push(format!("- **Non-textual or unreadable**: `{}`", entry.name()));
            return (section, Classification::Unreadable, None);
        };

        let fence = format!("```{}", language);
        let body = text.trim_end_matches('\n').to_string();
        if self.classifier.is_collapsible(&rel) {
            section.push(format!(
                "<details><summary>Click to view the contents of `{}`</summary>\n",
                entry.name()
            ));
            section.push(fence.trim_end());
            section.push(body.as_str());
            section.push("```");
            section.push("</details>");
        } else {
            section.push(fence.trim_end());
            section.push(body.as_str());
            section.push("```");
        }

        (section, classification, Some(body))
    }

    fn read_content(&self, path: &Path, language: &str) -> Option<String> {
        let text = match decode::read_text(path, &self.config.rules.encodings) {
            Ok(text) => text?,
            Err(e) => {
                warn!("Failed to read '{}': {}", path.display(), e);
                return None;
            }
        };

        if self.config.rules.strip_noise {
            Some(normalizer::normalize(&text, language))
        } else {
            Some(text)
        }
    }
}

/// Placeholder for a file whose content is not read
fn ignored_placeholder(rel: &str, size: Option<u64>) -> String {
    match size {
        Some(size) => format!("- **Ignored file**: `{}` (Size: {} KB)", rel, format_kb(size)),
        None => format!("- **Ignored file**: `{}`", rel),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn entry(rel: &str, size: Option<u64>) -> FileEntry {
        FileEntry::new(PathBuf::from("/nonexistent/root").join(rel), PathBuf::from(rel), size)
    }

    #[test]
    fn test_placeholders_never_read_content() {
        let config = Config::new("/nonexistent/root", "out.md");
        let assembler = Assembler::new(&config, Arc::new(ProgressBar::hidden()));

        // None of these paths exist; reading them would yield "unreadable"
        let (section, class, content) = assembler.file_section(&entry("js/jquery.min.js", Some(10240)));
        assert_eq!(class, Classification::Ignored(IgnoreReason::Suffix));
        assert_eq!(content, None);
        assert_eq!(
            section.lines,
            vec!["## js/jquery.min.js", "- **Ignored file**: `js/jquery.min.js` (Size: 10 KB)"]
        );

        let (section, class, _) = assembler.file_section(&entry("big.log", Some(6 * 1024 * 1024)));
        assert_eq!(class, Classification::TooLarge(6291456));
        assert_eq!(section.lines[1], "- **Ignored file**: `big.log` (Size: 6144 KB)");

        let (section, class, _) = assembler.file_section(&entry("img/logo.png", Some(100)));
        assert_eq!(class, Classification::Media);
        assert_eq!(section.lines[1], "- **Media file**: `logo.png`");
    }

    #[test]
    fn test_unreadable_placeholder() {
        let config = Config::new("/nonexistent/root", "out.md");
        let assembler = Assembler::new(&config, Arc::new(ProgressBar::hidden()));
        let (section, class, _) = assembler.file_section(&entry("gone.rs", Some(10)));
        assert_eq!(class, Classification::Unreadable);
        assert_eq!(section.lines[1], "- **Non-textual or unreadable**: `gone.rs`");
    }

    #[test]
    fn test_placeholder_without_size() {
        assert_eq!(ignored_placeholder("a/b.ttf", None), "- **Ignored file**: `a/b.ttf`");
        assert_eq!(
            ignored_placeholder("a/b.ttf", Some(1536)),
            "- **Ignored file**: `a/b.ttf` (Size: 1.5 KB)"
        );
    }

    #[test]
    fn test_document_render_joins_sections() {
        let document = Document {
            sections: vec![
                Section::new(vec!["a".into(), "b".into()]),
                Section::new(vec!["c".into()]),
            ],
            stats: DocumentStats::default(),
        };
        assert_eq!(document.render(), "a\nb\n\nc");
    }
}
