/*!
 * Error types for Git operations
 */

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during Git operations
#[derive(Error, Debug)]
pub enum GitError {
    /// No repository could be discovered from the given path
    #[error("Not a git repository: {}", .0.display())]
    NotARepository(PathBuf),

    /// The repository has no working tree to list files from
    #[error("Repository has no working tree: {}", .0.display())]
    BareRepository(PathBuf),

    /// The listed directory is not inside the repository's working tree
    #[error("{} is outside the working tree {}", .path.display(), .workdir.display())]
    OutsideWorkdir { path: PathBuf, workdir: PathBuf },

    /// Error reading the repository index
    #[error("Failed to read index: {0}")]
    IndexError(git2::Error),

    /// IO error during Git operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Specialized Result type for Git operations
pub type GitResult<T> = Result<T, GitError>;
