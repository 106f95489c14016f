/*!
 * Git repository handling functionality
 */

mod error;
mod repository;

// Re-export public items
pub use error::{GitError, GitResult};
pub use repository::GitIndex;

/// Join path segments with forward slashes regardless of platform
pub(crate) fn to_slash_path(path: &std::path::Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
