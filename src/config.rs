/*!
 * Configuration handling for combine-files
 */

use std::path::{Path, PathBuf};

use clap::Parser;
use clap_complete::Shell;

use crate::combiner::MAX_RECURSION_DEPTH;
use crate::error::{CombineError, Result};
use crate::ensure;

/// Command-line arguments for combine-files
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "combine-files",
    version = env!("CARGO_PKG_VERSION"),
    about = "Combine git-tracked files into a single delimited text stream",
    long_about = "Lists the git-tracked files and directories in a directory, lets you pick some of them, and writes their contents wrapped in BEGIN/END FILE markers, ready to paste into an LLM prompt."
)]
pub struct Args {
    /// Directory to list (must be inside a git working tree)
    #[clap(default_value = ".")]
    pub directory: String,

    /// Write output to this file instead of stdout
    #[clap(short, long)]
    pub output: Option<String>,

    /// Process the whole directory without prompting
    #[clap(short, long)]
    pub path: bool,

    /// Maximum directory depth to expand; the selected directory is depth 1
    #[clap(short, long, default_value_t = MAX_RECURSION_DEPTH)]
    pub depth: usize,

    /// Increase log verbosity (-v info, -vv debug)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print a summary table to stderr after writing
    #[clap(long)]
    pub stats: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// How entries are chosen from the listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Prompt the operator for item numbers
    Interactive,
    /// Take every entry without prompting
    All,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Target directory to list
    pub target_dir: PathBuf,

    /// Output file path (stdout when absent)
    pub output_file: Option<PathBuf>,

    /// Interactive or select-all
    pub mode: SelectionMode,

    /// Recursion budget for selected directories
    pub max_depth: usize,

    /// Print a summary table after writing
    pub stats: bool,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        Self {
            target_dir: PathBuf::from(args.directory),
            output_file: args.output.map(PathBuf::from),
            mode: if args.path {
                SelectionMode::All
            } else {
                SelectionMode::Interactive
            },
            max_depth: args.depth,
            stats: args.stats,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.target_dir.is_dir() {
            return Err(CombineError::DirectoryNotFound(self.target_dir.clone()));
        }

        ensure!(
            self.max_depth >= 1,
            Config,
            "depth must be at least 1, got {}",
            self.max_depth
        );

        // Check if output file directory exists
        if let Some(output) = &self.output_file {
            if let Some(parent) = output.parent() {
                if parent != Path::new("") && !parent.is_dir() {
                    return Err(CombineError::OutputWrite {
                        path: output.display().to_string(),
                        source: std::io::Error::new(
                            std::io::ErrorKind::NotFound,
                            format!("Output directory not found: {}", parent.display()),
                        ),
                    });
                }
            }
        }

        Ok(())
    }
}
