//! Global error handling for combine-files
//!
//! This module provides a centralized error type that can represent errors
//! from all modules in the project.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::git::GitError;

/// Global error type for combine-files operations
#[derive(Error, Debug)]
pub enum CombineError {
    /// Target directory is not inside a git working tree
    #[error("Not a git repository: {}", .0.display())]
    NotARepository(PathBuf),

    /// Target path does not exist or is not a directory
    #[error("Directory {} does not exist!", .0.display())]
    DirectoryNotFound(PathBuf),

    /// Selection input contains a token that is not a valid index
    #[error("Invalid number: {token}")]
    InvalidSelection { token: String },

    /// A resolved file could not be read
    #[error("Error reading file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output destination could not be opened or written
    #[error("Error writing output {path}: {source}")]
    OutputWrite {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Git-related errors
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Operator closed the prompt without selecting anything
    #[error("Operation cancelled.")]
    Cancelled,
}

impl CombineError {
    /// Process exit code for an error that ends the run
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Cancelled => 0,
            _ => 1,
        }
    }
}

/// Specialized Result type for combine-files operations
pub type Result<T> = std::result::Result<T, CombineError>;

/// Creates a CombineError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::CombineError::$error_type(format!($($arg)*))
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
