//! Noise stripping for file contents
//!
//! This is a line/regex heuristic, not a lexer. Comment markers inside string
//! literals (a `#` in a URL, `--` in a CLI flag, `//` in a scheme) are treated
//! as comment starts, and nested block comments end at the first closing
//! delimiter.

use once_cell::sync::Lazy;
use regex::Regex;

static BLOCK_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
static SLASH_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"//.*").unwrap());
static HASH_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"#.*").unwrap());
static DASH_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"--.*").unwrap());
static MARKUP_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

/// Language tags whose comments use `/* */`, `//`, `#` or `--`
const C_FAMILY: &[&str] = &[
    "python",
    "javascript",
    "ts",
    "tsx",
    "jsx",
    "java",
    "c",
    "cpp",
    "csharp",
    "go",
    "rust",
    "swift",
    "kt",
    "kotlin",
    "sql",
];

/// Language tags whose comments use `<!-- -->`
const MARKUP: &[&str] = &["html", "xml"];

/// Comment syntax family of a language tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    CFamily,
    Markup,
    None,
}

impl CommentStyle {
    /// Comment family for a language tag
    pub fn for_language(tag: &str) -> Self {
        if C_FAMILY.contains(&tag) {
            Self::CFamily
        } else if MARKUP.contains(&tag) {
            Self::Markup
        } else {
            Self::None
        }
    }
}

/// Strip comments for the language and drop blank lines
pub fn normalize(raw: &str, language: &str) -> String {
    let stripped = strip_comments(raw, CommentStyle::for_language(language));
    strip_blank_lines(&stripped)
}

/// Remove comments according to the comment style
pub fn strip_comments(raw: &str, style: CommentStyle) -> String {
    match style {
        CommentStyle::CFamily => {
            let text = BLOCK_COMMENT.replace_all(raw, "");
            let text = SLASH_COMMENT.replace_all(&text, "");
            let text = HASH_COMMENT.replace_all(&text, "");
            DASH_COMMENT.replace_all(&text, "").into_owned()
        }
        CommentStyle::Markup => MARKUP_COMMENT.replace_all(raw, "").into_owned(),
        CommentStyle::None => raw.to_string(),
    }
}

/// Drop lines that are empty or whitespace-only
pub fn strip_blank_lines(text: &str) -> String {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
