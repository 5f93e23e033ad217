//! Global error handling for dirbook
//!
//! Only two kinds of failure are fatal for a run: an invalid root directory
//! and a failed write of the final document. Everything tied to a single file
//! is recovered where it happens and never reaches this type.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Global error type for dirbook operations
#[derive(Error, Debug)]
pub enum DirbookError {
    /// Root directory does not exist
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// Root path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(String),

    /// Writing the final document failed
    #[error("Failed to write output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DirbookError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::PathNotFound(_) | Self::NotADirectory(_) => 2,
            _ => 1,
        }
    }
}

/// Specialized Result type for dirbook operations
pub type Result<T> = std::result::Result<T, DirbookError>;

/// Creates a DirbookError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::DirbookError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

// Allow `?` on dirbook results inside io::Result functions
impl From<DirbookError> for io::Error {
    fn from(err: DirbookError) -> Self {
        match err {
            DirbookError::Io(e) | DirbookError::OutputWrite { source: e, .. } => e,
            other => io::Error::new(io::ErrorKind::Other, other.to_string()),
        }
    }
}
