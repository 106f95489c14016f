/*!
 * Git index access
 */

use std::fs;
use std::path::{Path, PathBuf};

use git2::Repository as Git2Repository;
use log::{debug, trace, warn};

use super::error::{GitError, GitResult};
use super::to_slash_path;

/// Index entries with this mode are submodule links, not files
const GITLINK_MODE: u32 = 0o160000;

/// Index entries with this mode store a symlink target, not file content
const SYMLINK_MODE: u32 = 0o120000;

/// Read-only view of a repository's tracked files
pub struct GitIndex {
    /// Inner git2 repository instance
    inner: Git2Repository,
    /// Canonical path to the working tree root
    workdir: PathBuf,
}

impl GitIndex {
    /// Discover the repository containing `path`
    pub fn discover(path: &Path) -> GitResult<Self> {
        let repo = Git2Repository::discover(path).map_err(|e| {
            debug!("Repository discovery failed for {}: {}", path.display(), e);
            GitError::NotARepository(path.to_path_buf())
        })?;

        let workdir = repo
            .workdir()
            .ok_or_else(|| GitError::BareRepository(repo.path().to_path_buf()))?;
        let workdir = fs::canonicalize(workdir)?;
        debug!("Using repository at {}", workdir.display());

        Ok(Self {
            inner: repo,
            workdir,
        })
    }

    /// Index-relative prefix for a directory, without a trailing slash
    fn prefix_for(&self, dir: &Path) -> GitResult<String> {
        let abs = canonicalize_existing_prefix(dir)?;
        let rel = abs
            .strip_prefix(&self.workdir)
            .map_err(|_| GitError::OutsideWorkdir {
                path: abs.clone(),
                workdir: self.workdir.clone(),
            })?;
        Ok(to_slash_path(rel))
    }

    /// List tracked paths under `dir`, relative to `dir`, sorted and unique
    pub fn paths_under(&self, dir: &Path) -> GitResult<Vec<String>> {
        let prefix = self.prefix_for(dir)?;
        let index = self.inner.index().map_err(GitError::IndexError)?;

        let mut paths = Vec::new();
        for entry in index.iter() {
            match entry.mode {
                GITLINK_MODE => {
                    trace!("Skipping submodule {}", String::from_utf8_lossy(&entry.path));
                    continue;
                }
                SYMLINK_MODE => {
                    debug!("Skipping symlink {}", String::from_utf8_lossy(&entry.path));
                    continue;
                }
                _ => {}
            }

            let path = match std::str::from_utf8(&entry.path) {
                Ok(path) => path,
                Err(_) => {
                    warn!(
                        "Skipping tracked path that is not valid UTF-8: {}",
                        String::from_utf8_lossy(&entry.path)
                    );
                    continue;
                }
            };
            if let Some(rest) = strip_dir_prefix(path, &prefix) {
                paths.push(rest.to_string());
            }
        }

        // Conflicted files appear once per stage
        paths.sort();
        paths.dedup();
        debug!("{} tracked paths under '{}'", paths.len(), prefix);

        Ok(paths)
    }
}

/// Canonicalize the longest existing ancestor and re-append the rest
///
/// Tracked directories may be gone from the working tree; they still have
/// index entries worth listing.
fn canonicalize_existing_prefix(path: &Path) -> GitResult<PathBuf> {
    let mut missing = Vec::new();
    let mut current = path;
    loop {
        match fs::canonicalize(current) {
            Ok(base) => return Ok(missing.iter().rev().fold(base, |p, seg| p.join(seg))),
            Err(e) => match (current.parent(), current.file_name()) {
                (Some(parent), Some(name)) => {
                    missing.push(name.to_os_string());
                    current = if parent.as_os_str().is_empty() {
                        Path::new(".")
                    } else {
                        parent
                    };
                }
                _ => return Err(GitError::IoError(e)),
            },
        }
    }
}

/// Strip a directory prefix from an index path, matching whole segments only
fn strip_dir_prefix<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        return Some(path);
    }
    path.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('/'))
        .filter(|rest| !rest.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_dir_prefix() {
        assert_eq!(strip_dir_prefix("src/main.rs", ""), Some("src/main.rs"));
        assert_eq!(strip_dir_prefix("src/main.rs", "src"), Some("main.rs"));
        assert_eq!(strip_dir_prefix("src/a/b.rs", "src/a"), Some("b.rs"));
        // A sibling sharing the prefix text is not inside the directory
        assert_eq!(strip_dir_prefix("srcs/main.rs", "src"), None);
        assert_eq!(strip_dir_prefix("src", "src"), None);
    }

    #[test]
    fn test_canonicalize_missing_tail() {
        let dir = tempfile::tempdir().unwrap();
        let base = fs::canonicalize(dir.path()).unwrap();
        let resolved = canonicalize_existing_prefix(&dir.path().join("gone").join("deeper")).unwrap();
        assert_eq!(resolved, base.join("gone").join("deeper"));
    }

    // Stage an entry directly, without a working tree file
    fn stage(repo: &git2::Repository, path: &[u8], mode: u32) {
        let id = repo.blob(b"content").unwrap();
        let mut index = repo.index().unwrap();
        index
            .add(&git2::IndexEntry {
                ctime: git2::IndexTime::new(0, 0),
                mtime: git2::IndexTime::new(0, 0),
                dev: 0,
                ino: 0,
                mode,
                uid: 0,
                gid: 0,
                file_size: 0,
                id,
                flags: 0,
                flags_extended: 0,
                path: path.to_vec(),
            })
            .unwrap();
        index.write().unwrap();
    }

    #[test]
    fn test_symlinks_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let repo = git2::Repository::init(dir.path()).unwrap();
        stage(&repo, b"real/a.txt", 0o100644);
        stage(&repo, b"link", SYMLINK_MODE);

        let index = GitIndex::discover(dir.path()).unwrap();
        assert_eq!(index.paths_under(dir.path()).unwrap(), vec!["real/a.txt"]);
    }

    #[test]
    fn test_non_utf8_paths_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let repo = git2::Repository::init(dir.path()).unwrap();
        stage(&repo, b"ok.txt", 0o100644);
        stage(&repo, b"bad\xff.txt", 0o100644);

        let index = GitIndex::discover(dir.path()).unwrap();
        assert_eq!(index.paths_under(dir.path()).unwrap(), vec!["ok.txt"]);
    }

    #[test]
    fn test_discover_plain_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            GitIndex::discover(dir.path()),
            Err(GitError::NotARepository(_))
        ));
    }

    #[test]
    fn test_discover_bare_repository() {
        let dir = tempfile::tempdir().unwrap();
        git2::Repository::init_bare(dir.path().join("bare.git")).unwrap();

        match GitIndex::discover(&dir.path().join("bare.git")) {
            Err(GitError::BareRepository(_)) => {}
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("bare repository should be rejected"),
        }
    }
}
