/*!
 * Reporting functionality for combine-files
 *
 * Renders an optional run summary with the tabled library. The report is
 * meant for stderr; it never goes into the combined output stream.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::writer::{WriteSummary, WrittenFile};

/// Statistics for one run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Output destination name
    pub output: String,
    /// Time taken to resolve and write
    pub duration: Duration,
    /// Files written, in output order
    pub files: Vec<WrittenFile>,
    /// Number of files that could not be read
    pub failed: usize,
}

impl RunReport {
    /// Build a report from a write summary
    pub fn new(output: impl Into<String>, duration: Duration, summary: &WriteSummary) -> Self {
        Self {
            output: output.into(),
            duration,
            files: summary.written.clone(),
            failed: summary.failed.len(),
        }
    }

    pub fn total_lines(&self) -> usize {
        self.files.iter().map(|f| f.lines).sum()
    }

    pub fn total_bytes(&self) -> usize {
        self.files.iter().map(|f| f.bytes).sum()
    }
}

/// Format a number with human-readable units
fn format_number(num: usize) -> String {
    if num >= 1_000_000 {
        format!("{:.1}M", num as f64 / 1_000_000.0)
    } else if num >= 1_000 {
        format!("{:.1}K", num as f64 / 1_000.0)
    } else {
        num.to_string()
    }
}

/// Format a human-readable byte size
fn format_size(size: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

fn styled(mut table: Table) -> String {
    table
        .with(Style::rounded())
        .with(Padding::new(1, 1, 0, 0))
        .with(Modify::new(Columns::new(..)).with(Alignment::left()));
    table.to_string()
}

fn files_table(report: &RunReport) -> String {
    #[derive(Tabled)]
    struct FileRow {
        #[tabled(rename = "File Path")]
        path: String,

        #[tabled(rename = "Lines")]
        lines: String,

        #[tabled(rename = "Size")]
        size: String,
    }

    let rows = report.files.iter().map(|f| FileRow {
        path: if f.binary {
            format!("{} (binary)", f.label)
        } else {
            f.label.clone()
        },
        lines: format_number(f.lines),
        size: format_size(f.bytes),
    });

    styled(Table::new(rows))
}

fn summary_table(report: &RunReport) -> String {
    #[derive(Tabled)]
    struct SummaryRow {
        #[tabled(rename = "Metric")]
        key: &'static str,

        #[tabled(rename = "Value")]
        value: String,
    }

    let rows = vec![
        SummaryRow {
            key: "Output",
            value: report.output.clone(),
        },
        SummaryRow {
            key: "Process Time",
            value: format!("{:.4?}", report.duration),
        },
        SummaryRow {
            key: "Files Written",
            value: format_number(report.files.len()),
        },
        SummaryRow {
            key: "Failed Reads",
            value: report.failed.to_string(),
        },
        SummaryRow {
            key: "Total Lines",
            value: format_number(report.total_lines()),
        },
        SummaryRow {
            key: "Total Size",
            value: format_size(report.total_bytes()),
        },
        SummaryRow {
            key: "LLM Tokens",
            value: format!("{} (estimated)", format_number(report.total_bytes() / 4)),
        },
    ];

    styled(Table::new(rows))
}

/// Render the files table followed by the summary table
pub fn render(report: &RunReport) -> String {
    format!(
        "FILES\n{}\n\nSUMMARY\n{}",
        files_table(report),
        summary_table(report)
    )
}
