/*!
 * Tracked-file index abstraction
 *
 * The lister only needs one primitive from version control: the tracked
 * paths below a directory. Keeping it behind a trait lets the ordering and
 * recursion logic run against an in-memory index in tests.
 */

use std::path::{Path, PathBuf};

use crate::error::{CombineError, Result};
use crate::git::{to_slash_path, GitError, GitIndex};

/// Source of tracked paths
pub trait TrackedIndex {
    /// Tracked paths under `dir`, relative to `dir` and '/' separated
    fn tracked_paths(&self, dir: &Path) -> Result<Vec<String>>;
}

impl TrackedIndex for GitIndex {
    fn tracked_paths(&self, dir: &Path) -> Result<Vec<String>> {
        self.paths_under(dir).map_err(|e| match e {
            GitError::OutsideWorkdir { path, .. } => CombineError::NotARepository(path),
            other => other.into(),
        })
    }
}

/// Open the git index for the repository containing `dir`
pub fn open_git_index(dir: &Path) -> Result<GitIndex> {
    GitIndex::discover(dir).map_err(|e| match e {
        GitError::NotARepository(path) | GitError::BareRepository(path) => {
            CombineError::NotARepository(path)
        }
        other => other.into(),
    })
}

/// In-memory index of paths relative to a fixed root
#[derive(Debug, Clone, Default)]
pub struct MemoryIndex {
    root: PathBuf,
    paths: Vec<String>,
}

impl MemoryIndex {
    /// Create an index rooted at `root` tracking the given '/' separated paths
    pub fn new<I, S>(root: impl Into<PathBuf>, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut paths: Vec<String> = paths.into_iter().map(Into::into).collect();
        paths.sort();
        paths.dedup();
        Self {
            root: root.into(),
            paths,
        }
    }
}

impl TrackedIndex for MemoryIndex {
    fn tracked_paths(&self, dir: &Path) -> Result<Vec<String>> {
        let rel = dir
            .strip_prefix(&self.root)
            .map_err(|_| CombineError::NotARepository(dir.to_path_buf()))?;
        let prefix = to_slash_path(rel);

        Ok(self
            .paths
            .iter()
            .filter_map(|p| {
                if prefix.is_empty() {
                    Some(p.clone())
                } else {
                    p.strip_prefix(&prefix)
                        .and_then(|rest| rest.strip_prefix('/'))
                        .map(str::to_string)
                }
            })
            .collect())
    }
}
