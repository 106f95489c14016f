/*!
 * Delimited output writer for combine-files
 */

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use indicatif::ProgressBar;
use log::{debug, error, warn};

use crate::error::{CombineError, Result};
use crate::types::ResolvedFile;

pub const FILE_BEGIN_MARKER: &str = "// BEGIN FILE: ";
pub const FILE_END_MARKER: &str = "// END FILE";

/// Display name used for the standard output stream
pub const STDOUT_NAME: &str = "<stdout>";

/// Bytes sampled when deciding whether content looks binary
const BINARY_SAMPLE_SIZE: usize = 8192;

/// Statistics for one file that made it into the output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrittenFile {
    /// Label used in the BEGIN marker
    pub label: String,
    /// Number of lines in the content
    pub lines: usize,
    /// Size of the content in bytes
    pub bytes: usize,
    /// Whether the content looked binary
    pub binary: bool,
}

/// Outcome of writing a list of resolved files
#[derive(Debug, Default)]
pub struct WriteSummary {
    /// Files written, in output order
    pub written: Vec<WrittenFile>,
    /// Files skipped because they could not be read
    pub failed: Vec<CombineError>,
}

impl WriteSummary {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Writes files wrapped in BEGIN/END markers
pub struct CombinedWriter<W: Write> {
    /// Destination stream
    out: W,
    /// Destination name for error messages
    target: String,
    /// Progress bar
    progress: ProgressBar,
}

impl<W: Write> CombinedWriter<W> {
    /// Create a new writer over `out`
    pub fn new(out: W, target: impl Into<String>) -> Self {
        Self {
            out,
            target: target.into(),
            progress: ProgressBar::hidden(),
        }
    }

    /// Report per-file progress on the given bar
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    fn output_error(&self, source: io::Error) -> CombineError {
        CombineError::OutputWrite {
            path: self.target.clone(),
            source,
        }
    }

    /// Write one file block
    pub fn write_entry(&mut self, label: &str, content: &[u8]) -> Result<()> {
        write_block(&mut self.out, label, content).map_err(|e| self.output_error(e))
    }

    /// Read and write every resolved file in order
    ///
    /// Unreadable files are logged, recorded in the summary and skipped.
    /// Failing to write the destination aborts.
    pub fn write_files(&mut self, files: &[ResolvedFile]) -> Result<WriteSummary> {
        let mut summary = WriteSummary::default();
        self.progress.set_length(files.len() as u64);

        for file in files {
            self.progress
                .set_message(format!("Current file: {}", file.label));

            match read_file(&file.absolute_path) {
                Ok(content) => {
                    let binary = is_binary(&content);
                    if binary {
                        warn!("{} looks binary, embedding it verbatim", file.label);
                    }
                    self.write_entry(&file.label, &content)?;
                    summary.written.push(WrittenFile {
                        label: file.label.clone(),
                        lines: count_lines(&content),
                        bytes: content.len(),
                        binary,
                    });
                }
                Err(e) => {
                    error!("{}", e);
                    summary.failed.push(e);
                }
            }

            self.progress.inc(1);
        }

        self.progress.finish_and_clear();
        debug!(
            "Wrote {} files to {} ({} failed)",
            summary.written.len(),
            self.target,
            summary.failed.len()
        );
        Ok(summary)
    }

    /// Flush and return the destination
    pub fn finish(mut self) -> Result<W> {
        self.out.flush().map_err(|e| self.output_error(e))?;
        Ok(self.out)
    }
}

fn write_block<W: Write>(out: &mut W, label: &str, content: &[u8]) -> io::Result<()> {
    writeln!(out, "{}{}", FILE_BEGIN_MARKER, label)?;
    out.write_all(content)?;
    write!(out, "\n{}\n\n", FILE_END_MARKER)
}

/// Open the destination: a file when a path is given, stdout otherwise
pub fn open_output(path: Option<&Path>) -> Result<(Box<dyn Write>, String)> {
    match path {
        Some(path) => {
            let name = path.display().to_string();
            let file = File::create(path).map_err(|source| CombineError::OutputWrite {
                path: name.clone(),
                source,
            })?;
            debug!("Writing output to file: {}", name);
            Ok((Box::new(BufWriter::new(file)), name))
        }
        None => Ok((
            Box::new(BufWriter::new(io::stdout().lock())),
            STDOUT_NAME.to_string(),
        )),
    }
}

/// Read a file's raw bytes
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| CombineError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Simple heuristic: invalid UTF-8 or a high share of control bytes
pub fn is_binary(content: &[u8]) -> bool {
    let sample = &content[..content.len().min(BINARY_SAMPLE_SIZE)];
    if sample.is_empty() {
        return false;
    }

    if let Err(e) = std::str::from_utf8(sample) {
        // A sequence cut off by the sample boundary is not evidence
        if e.error_len().is_some() {
            return true;
        }
    }

    // Count binary characters (0x00-0x08, 0x0E-0x1F)
    let binary_count = sample
        .iter()
        .filter(|&&b| (b < 9) || (b > 13 && b < 32))
        .count();
    binary_count as f32 / sample.len() as f32 >= 0.1
}

fn count_lines(content: &[u8]) -> usize {
    let newlines = content.iter().filter(|&&b| b == b'\n').count();
    match content.last() {
        Some(b'\n') | None => newlines,
        Some(_) => newlines + 1,
    }
}
