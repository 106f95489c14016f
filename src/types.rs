/*!
 * Core types and data structures for combine-files
 */

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use strum::Display;

/// Kind of an immediate child of a listed directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum EntryKind {
    /// A tracked file
    File,
    /// A directory with at least one tracked descendant
    Directory,
}

/// One numbered child in a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedEntry {
    /// 1-based position in the listing that produced it
    pub display_index: usize,
    /// Name relative to the listed directory
    pub relative_path: String,
    /// File or directory
    pub kind: EntryKind,
}

impl fmt::Display for TrackedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            EntryKind::Directory => write!(f, "{}. (DIR) {}", self.display_index, self.relative_path),
            EntryKind::File => write!(f, "{}. {}", self.display_index, self.relative_path),
        }
    }
}

/// Ordered immediate children of one directory
///
/// Indices are only meaningful together with the listing that assigned them,
/// so the listing travels with the selection instead of living in global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Directory that was listed
    pub directory: PathBuf,
    /// Entries in lexicographic order, indexed from 1
    pub entries: Vec<TrackedEntry>,
}

impl Listing {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by its 1-based display index
    pub fn get(&self, display_index: usize) -> Option<&TrackedEntry> {
        display_index
            .checked_sub(1)
            .and_then(|i| self.entries.get(i))
    }
}

/// Subset of a listing chosen by the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSet {
    /// Chosen display indices, iterated in listing order
    indices: BTreeSet<usize>,
}

impl SelectionSet {
    /// Select every entry of a listing
    pub fn all(listing: &Listing) -> Self {
        Self {
            indices: listing.entries.iter().map(|e| e.display_index).collect(),
        }
    }

    pub(crate) fn from_indices(indices: BTreeSet<usize>) -> Self {
        Self { indices }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn contains(&self, display_index: usize) -> bool {
        self.indices.contains(&display_index)
    }

    /// Selected entries in listing order
    pub fn entries<'a>(&'a self, listing: &'a Listing) -> impl Iterator<Item = &'a TrackedEntry> + 'a {
        self.indices.iter().filter_map(move |&i| listing.get(i))
    }
}

/// A file selected for output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    /// Path used to read the file
    pub absolute_path: PathBuf,
    /// Label relative to the target directory, always '/' separated
    pub label: String,
}

impl ResolvedFile {
    pub fn new(base: &Path, label: String) -> Self {
        Self {
            absolute_path: label_path(base, &label),
            label,
        }
    }
}

/// Join a '/' separated label onto a base directory
pub(crate) fn label_path(base: &Path, label: &str) -> PathBuf {
    label
        .split('/')
        .filter(|seg| !seg.is_empty())
        .fold(base.to_path_buf(), |p, seg| p.join(seg))
}
