/*!
 * dirbook - Compile the text files of a directory into a single Markdown document
 *
 * The document holds a header, the directory tree and one section per file,
 * with either the (optionally cleaned) file content or a placeholder saying
 * why the content was left out.
 */

pub mod assembler;
pub mod classifier;
pub mod config;
pub mod decode;
pub mod error;
pub mod logging;
pub mod normalizer;
pub mod report;
pub mod scanner;
pub mod tree;
pub mod typecheck;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use assembler::{Assembler, Document, DocumentStats};
pub use classifier::Classifier;
pub use config::{Config, Rules};
pub use error::{DirbookError, Result};
pub use report::{FileReportInfo, Reporter, RunReport};
pub use scanner::Scanner;
pub use tree::{build_tree, TreeNode};
pub use typecheck::{TypeCheck, TypeCheckOutcome};
pub use types::{Classification, FileEntry, IgnoreReason, Section};
pub use utils::{format_file_size, format_kb};
pub use writer::MarkdownWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
