/*!
 * Tracked-entry listing
 */

use std::collections::BTreeMap;
use std::path::Path;

use log::{debug, trace};

use crate::error::Result;
use crate::index::TrackedIndex;
use crate::types::{EntryKind, Listing, TrackedEntry};

/// Lists the immediate tracked children of a directory
pub struct Lister<'a, I: TrackedIndex + ?Sized> {
    index: &'a I,
}

impl<'a, I: TrackedIndex + ?Sized> Lister<'a, I> {
    /// Create a new lister over an index
    pub fn new(index: &'a I) -> Self {
        Self { index }
    }

    /// List `dir`, numbering children from 1 in lexicographic order
    pub fn list(&self, dir: &Path) -> Result<Listing> {
        let paths = self.index.tracked_paths(dir)?;

        // First segment -> directory if anything lies below it
        let mut children: BTreeMap<&str, EntryKind> = BTreeMap::new();
        for path in &paths {
            let (head, kind) = match path.split_once('/') {
                Some((head, _)) => (head, EntryKind::Directory),
                None => (path.as_str(), EntryKind::File),
            };
            if head.is_empty() {
                continue;
            }
            let slot = children.entry(head).or_insert(kind);
            if kind == EntryKind::Directory {
                *slot = EntryKind::Directory;
            }
        }

        let entries: Vec<TrackedEntry> = children
            .into_iter()
            .enumerate()
            .map(|(i, (name, kind))| {
                trace!("{} {}: {}", kind, i + 1, name);
                TrackedEntry {
                    display_index: i + 1,
                    relative_path: name.to_string(),
                    kind,
                }
            })
            .collect();

        debug!("Listed {} entries in {}", entries.len(), dir.display());

        Ok(Listing {
            directory: dir.to_path_buf(),
            entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::MemoryIndex;
    use std::path::PathBuf;

    fn names(listing: &Listing) -> Vec<(usize, &str, EntryKind)> {
        listing
            .entries
            .iter()
            .map(|e| (e.display_index, e.relative_path.as_str(), e.kind))
            .collect()
    }

    #[test]
    fn test_list_groups_by_first_segment() {
        let index = MemoryIndex::new(
            "/repo",
            [
                "README.md",
                "src/main.rs",
                "src/util.rs",
                "tests/test_main.rs",
            ],
        );
        let listing = Lister::new(&index).list(Path::new("/repo")).unwrap();

        assert_eq!(
            names(&listing),
            vec![
                (1, "README.md", EntryKind::File),
                (2, "src", EntryKind::Directory),
                (3, "tests", EntryKind::Directory),
            ]
        );
        assert_eq!(listing.directory, PathBuf::from("/repo"));
    }

    #[test]
    fn test_ordering_is_case_sensitive_and_mixed() {
        // Directories are not grouped ahead of files
        let index = MemoryIndex::new("/repo", ["b.txt", "a/x.txt", "C.txt", "c/y.txt"]);
        let listing = Lister::new(&index).list(Path::new("/repo")).unwrap();

        let order: Vec<_> = listing
            .entries
            .iter()
            .map(|e| e.relative_path.as_str())
            .collect();
        assert_eq!(order, vec!["C.txt", "a", "b.txt", "c"]);
    }

    #[test]
    fn test_extensionless_file_is_a_file() {
        let index = MemoryIndex::new("/repo", ["Makefile", "docs.d/index.md"]);
        let listing = Lister::new(&index).list(Path::new("/repo")).unwrap();

        assert_eq!(
            names(&listing),
            vec![
                (1, "Makefile", EntryKind::File),
                (2, "docs.d", EntryKind::Directory),
            ]
        );
    }

    #[test]
    fn test_subdirectory_listing() {
        let index = MemoryIndex::new("/repo", ["src/a/deep.rs", "src/main.rs", "other.rs"]);
        let listing = Lister::new(&index).list(Path::new("/repo/src")).unwrap();

        assert_eq!(
            names(&listing),
            vec![
                (1, "a", EntryKind::Directory),
                (2, "main.rs", EntryKind::File),
            ]
        );
    }

    #[test]
    fn test_empty_directory_is_not_an_error() {
        let index = MemoryIndex::new("/repo", ["src/main.rs"]);
        let listing = Lister::new(&index).list(Path::new("/repo/empty")).unwrap();
        assert!(listing.is_empty());
    }

    #[test]
    fn test_repeated_listing_is_stable() {
        let index = MemoryIndex::new("/repo", ["z", "y/1", "x", "y/2"]);
        let lister = Lister::new(&index);
        assert_eq!(
            lister.list(Path::new("/repo")).unwrap(),
            lister.list(Path::new("/repo")).unwrap()
        );
    }
}
