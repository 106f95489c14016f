/*!
 * Resolution of selected entries into a flat list of files
 */

use std::collections::HashSet;
use std::path::Path;

use log::{debug, info};

use crate::error::Result;
use crate::index::TrackedIndex;
use crate::lister::Lister;
use crate::types::{label_path, EntryKind, Listing, ResolvedFile, SelectionSet, TrackedEntry};

/// Default recursion budget; the selected directory itself counts as depth 1
pub const MAX_RECURSION_DEPTH: usize = 3;

/// Expands selected entries depth-first into files
pub struct Combiner<'a, I: TrackedIndex + ?Sized> {
    lister: Lister<'a, I>,
    max_depth: usize,
}

impl<'a, I: TrackedIndex + ?Sized> Combiner<'a, I> {
    /// Create a combiner with the given recursion budget
    pub fn new(index: &'a I, max_depth: usize) -> Self {
        Self {
            lister: Lister::new(index),
            max_depth,
        }
    }

    /// Resolve a selection made on `listing` into unique files
    ///
    /// Output follows listing order, then depth-first lexicographic order
    /// inside each selected directory. A file reachable twice is kept at its
    /// first position.
    pub fn resolve(&self, listing: &Listing, selection: &SelectionSet) -> Result<Vec<ResolvedFile>> {
        let root = listing.directory.as_path();
        let mut seen = HashSet::new();
        let mut files = Vec::new();

        for entry in selection.entries(listing) {
            for file in self.expand(root, "", entry, self.max_depth)? {
                if seen.insert(file.absolute_path.clone()) {
                    files.push(file);
                } else {
                    debug!("Skipping duplicate {}", file.label);
                }
            }
        }

        info!("Resolved {} files", files.len());
        Ok(files)
    }

    /// Expand one entry with `remaining` levels of directory budget
    ///
    /// `prefix` is the entry's parent, relative to `root`. Files are returned
    /// as-is; a directory contributes the files of its children, and its
    /// subdirectories are expanded with one level less. A directory reached
    /// with no budget left contributes nothing.
    pub fn expand(
        &self,
        root: &Path,
        prefix: &str,
        entry: &TrackedEntry,
        remaining: usize,
    ) -> Result<Vec<ResolvedFile>> {
        let label = join_label(prefix, &entry.relative_path);

        match entry.kind {
            EntryKind::File => Ok(vec![ResolvedFile::new(root, label)]),
            EntryKind::Directory => {
                let listing = self.lister.list(&label_path(root, &label))?;

                if remaining == 0 {
                    debug!(
                        "Depth limit reached at {}, omitting {} entries",
                        label,
                        listing.len()
                    );
                    return Ok(Vec::new());
                }

                let mut files = Vec::new();
                for child in &listing.entries {
                    files.extend(self.expand(root, &label, child, remaining - 1)?);
                }
                Ok(files)
            }
        }
    }
}

fn join_label(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", prefix, name)
    }
}
