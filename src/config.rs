/*!
 * Configuration handling for dirbook
 */

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use crate::decode::TextEncoding;
use crate::error::Result;
use crate::{bail, ensure};

/// Command-line arguments for dirbook
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "dirbook",
    version = env!("CARGO_PKG_VERSION"),
    about = "Compile the text files of a directory into a single Markdown document",
    long_about = "Walks a directory and writes one Markdown file holding a header, the directory tree and the (optionally cleaned) contents of every text file."
)]
pub struct Args {
    /// Root directory to process
    #[clap(default_value = ".")]
    pub directory_path: String,

    /// Output Markdown file name
    #[clap(default_value = "export.md")]
    pub output_file: String,

    /// Include the dirbook executable itself when it lives under the root
    #[clap(long)]
    pub include_self: bool,

    /// Keep comments and blank lines in file contents
    #[clap(long)]
    pub no_strip: bool,

    /// Skip the TypeScript type check
    #[clap(long)]
    pub no_typecheck: bool,

    /// Enable debug logging
    #[clap(short, long)]
    pub verbose: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Rule tables driving classification and rendering
///
/// Built once per run and passed by reference to every component.
#[derive(Clone, Debug)]
pub struct Rules {
    /// Directory names whose whole subtree is skipped
    pub ignored_dirs: HashSet<String>,
    /// Lowercase filenames ignored on exact match
    pub ignored_exact_names: HashSet<String>,
    /// Lowercase filename suffixes
    pub ignored_suffixes: Vec<String>,
    /// Lowercase substrings matched against the filename stem
    pub ignored_substrings: Vec<String>,
    /// Font MIME types
    pub font_mimes: HashSet<String>,
    /// Font extensions with leading dot
    pub font_extensions: HashSet<String>,
    /// MIME prefixes rendered as media placeholders
    pub media_prefixes: Vec<String>,
    /// Files above this many bytes are not read
    pub max_file_size: u64,
    /// Extension (with dot) to language tag
    pub languages: HashMap<String, String>,
    /// Extensions rendered inside a collapsible block
    pub collapsible_extensions: HashSet<String>,
    /// Relative path substrings rendered inside a collapsible block
    pub collapsible_paths: Vec<String>,
    /// Encodings tried in order when decoding file content
    pub encodings: Vec<TextEncoding>,
    /// Strip comments and blank lines from included files
    pub strip_noise: bool,
    /// Run the TypeScript check when a manifest is present
    pub check_types: bool,
}

fn set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Rules {
    fn default() -> Self {
        let languages = [
            (".md", "md"),
            (".markdown", "md"),
            (".txt", ""),
            (".rst", "rst"),
            (".html", "html"),
            (".htm", "html"),
            (".xml", "xml"),
            (".json", "json"),
            (".yml", "yaml"),
            (".yaml", "yaml"),
            (".csv", "csv"),
            (".tsv", "tsv"),
            (".py", "python"),
            (".ipynb", "json"),
            (".js", "javascript"),
            (".ts", "ts"),
            (".tsx", "tsx"),
            (".jsx", "jsx"),
            (".java", "java"),
            (".c", "c"),
            (".h", "c"),
            (".cpp", "cpp"),
            (".hpp", "cpp"),
            (".cs", "csharp"),
            (".go", "go"),
            (".rb", "ruby"),
            (".php", "php"),
            (".sh", "bash"),
            (".bash", "bash"),
            (".zsh", "bash"),
            (".ps1", "powershell"),
            (".lua", "lua"),
            (".rs", "rust"),
            (".kt", "kotlin"),
            (".swift", "swift"),
            (".sql", "sql"),
            (".r", "r"),
            (".dockerfile", "dockerfile"),
        ]
        .into_iter()
        .map(|(ext, tag)| (ext.to_string(), tag.to_string()))
        .collect();

        Self {
            ignored_dirs: set(&[
                ".git",
                ".vscode",
                "__pycache__",
                "node_modules",
                "dist",
                "build",
                ".venv",
                ".cache",
                ".idea",
                ".next",
                "generated",
                "migrations",
                ".vercel",
                "android",
            ]),
            ignored_exact_names: set(&["tsconfig.tsbuildinfo"]),
            ignored_suffixes: list(&[".min.css", ".min.js"]),
            ignored_substrings: list(&[
                "jquery",
                "font-awesome",
                "fontawesome",
                "pnpm-lock",
                "package-lock",
                "yarn",
            ]),
            font_mimes: set(&[
                "application/font-ttf",
                "application/x-font-ttf",
                "application/x-font-truetype",
                "application/font-sfnt",
                "application/x-font-sfnt",
                "application/vnd.ms-fontobject",
                "application/font-woff",
                "application/x-font-woff",
                "application/font-woff2",
                "application/x-font-opentype",
            ]),
            font_extensions: set(&[
                ".ttf", ".otf", ".woff", ".woff2", ".eot", ".sfnt", ".pfa", ".pfb",
            ]),
            media_prefixes: list(&["image/", "audio/", "font/"]),
            max_file_size: 5 * 1024 * 1024,
            languages,
            collapsible_extensions: set(&[
                ".json", ".css", ".html", ".svg", ".md", ".xml", ".yml", ".yaml",
            ]),
            collapsible_paths: list(&["components/ui"]),
            encodings: vec![TextEncoding::Utf8, TextEncoding::Latin1],
            strip_noise: true,
            check_types: true,
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Root directory to process
    pub target_dir: PathBuf,

    /// Output Markdown file path
    pub output_file: PathBuf,

    /// Include the running executable when found under the root
    pub include_self: bool,

    /// Path of the running executable, if known
    pub self_path: Option<PathBuf>,

    /// Classification and rendering rules
    pub rules: Rules,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        let mut rules = Rules::default();
        if args.no_strip {
            rules.strip_noise = false;
        }
        if args.no_typecheck {
            rules.check_types = false;
        }

        Self {
            target_dir: PathBuf::from(args.directory_path),
            output_file: PathBuf::from(args.output_file),
            include_self: args.include_self,
            self_path: std::env::current_exe().ok(),
            rules,
        }
    }

    /// Configuration with default rules for a root and output path
    pub fn new(target_dir: impl Into<PathBuf>, output_file: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
            output_file: output_file.into(),
            include_self: false,
            self_path: None,
            rules: Rules::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.target_dir.exists() {
            bail!(PathNotFound, "{}", self.target_dir.display());
        }
        ensure!(
            self.target_dir.is_dir(),
            NotADirectory,
            "{}",
            self.target_dir.display()
        );
        ensure!(
            !self.rules.encodings.is_empty(),
            Config,
            "at least one text encoding is required"
        );
        Ok(())
    }
}
