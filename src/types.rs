/*!
 * Core types and data structures for dirbook
 */

use std::path::{Path, PathBuf};

use strum::{AsRefStr, Display, EnumIter};

/// A regular file discovered under the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Absolute path on disk
    pub path: PathBuf,
    /// Path relative to the scan root
    pub rel_path: PathBuf,
    /// Lowercase extension with leading dot, empty when absent
    pub extension: String,
    /// Size in bytes, `None` when the stat call failed
    pub size: Option<u64>,
}

impl FileEntry {
    /// Build an entry from its absolute and relative paths
    pub fn new(path: PathBuf, rel_path: PathBuf, size: Option<u64>) -> Self {
        let extension = extension_of(&path);
        Self {
            path,
            rel_path,
            extension,
            size,
        }
    }

    /// File name component
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }

    /// Relative path with forward slashes, used for sorting and display
    pub fn rel_display(&self) -> String {
        self.rel_path
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Path segments of the relative path
    pub fn segments(&self) -> Vec<String> {
        self.rel_path
            .components()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .collect()
    }
}

/// Lowercase extension of a path with leading dot, empty when absent
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Why a file was excluded by a naming rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum IgnoreReason {
    /// Exact filename match
    ExactName,
    /// Filename suffix match
    Suffix,
    /// Substring of the filename stem
    Substring,
    /// Font by MIME type or extension
    Font,
}

/// Outcome of classifying a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Content is included, tagged with a language hint (may be empty)
    Included(String),
    /// Excluded by a naming rule
    Ignored(IgnoreReason),
    /// Image, audio or font by MIME prefix
    Media,
    /// Larger than the configured ceiling
    TooLarge(u64),
    /// Content could not be decoded as text
    Unreadable,
}

impl Classification {
    /// Short label used in logs and reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Included(_) => "included",
            Self::Ignored(_) => "ignored",
            Self::Media => "media",
            Self::TooLarge(_) => "too-large",
            Self::Unreadable => "unreadable",
        }
    }
}

/// One logical block of the output document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    /// Lines of the block, joined with a newline when rendered
    pub lines: Vec<String>,
}

impl Section {
    /// Create a section from its lines
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Append a line
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Render the section as text
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}
