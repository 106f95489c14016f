/*!
 * combine-files - Combine git-tracked files into one delimited text stream
 *
 * Lists the tracked entries of a directory, lets an operator pick some of
 * them, expands selected directories up to a depth limit and writes every
 * resulting file between BEGIN/END markers.
 */

pub mod combiner;
pub mod config;
pub mod error;
pub mod git;
pub mod index;
pub mod lister;
pub mod logger;
pub mod report;
pub mod selector;
pub mod types;
pub mod writer;


use std::io::{BufRead, Write};

use log::info;

// Re-export main components for easier access
pub use combiner::{Combiner, MAX_RECURSION_DEPTH};
pub use config::{Args, Config, SelectionMode};
pub use error::{CombineError, Result};
pub use index::{open_git_index, MemoryIndex, TrackedIndex};
pub use lister::Lister;
pub use types::{EntryKind, Listing, ResolvedFile, SelectionSet, TrackedEntry};
pub use writer::{CombinedWriter, WriteSummary};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const MSG_NO_TRACKED_FILES: &str = "No Git-tracked files found in the directory.";

/// List the target directory, obtain a selection and resolve it into files
///
/// In interactive mode the listing and prompt are written to `prompt` and
/// the answer is read from `input`; neither is touched in select-all mode
/// unless the directory has no tracked entries.
pub fn select_files<I, R, P>(
    config: &Config,
    index: &I,
    input: &mut R,
    prompt: &mut P,
) -> Result<Vec<ResolvedFile>>
where
    I: TrackedIndex + ?Sized,
    R: BufRead,
    P: Write,
{
    let listing = Lister::new(index).list(&config.target_dir)?;
    if listing.is_empty() {
        writeln!(prompt, "{}", MSG_NO_TRACKED_FILES)?;
        return Ok(Vec::new());
    }

    let selection = match config.mode {
        SelectionMode::All => {
            info!("Selecting all {} entries", listing.len());
            SelectionSet::all(&listing)
        }
        SelectionMode::Interactive => selector::prompt_selection(&listing, input, prompt)?,
    };

    Combiner::new(index, config.max_depth).resolve(&listing, &selection)
}
