/*!
 * Command-line interface for combine-files
 */

use std::io;
use std::process::ExitCode;
use std::time::Instant;

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, warn};

use combine_files::config::{Args, Config};
use combine_files::error::{CombineError, Result};
use combine_files::logger::setup_logger;
use combine_files::report::{self, RunReport};
use combine_files::writer::{open_output, CombinedWriter, WriteSummary};
use combine_files::{open_git_index, select_files};

/// Exit code when the output was written but some files could not be read
const EXIT_PARTIAL: u8 = 2;

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        clap_complete::generate(
            shell,
            &mut Args::command(),
            "combine-files",
            &mut io::stdout(),
        );
        return ExitCode::SUCCESS;
    }

    if let Err(e) = setup_logger(args.verbose) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    let config = Config::from_args(args);
    debug!("Configuration: {:?}", config);

    match execute(&config) {
        Ok(summary) if summary.has_failures() => {
            warn!("{} files could not be read", summary.failed.len());
            ExitCode::from(EXIT_PARTIAL)
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(CombineError::Cancelled) => {
            eprintln!("\n{}", CombineError::Cancelled);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn execute(config: &Config) -> Result<WriteSummary> {
    config.validate()?;
    let index = open_git_index(&config.target_dir)?;

    let start_time = Instant::now();
    let files = select_files(config, &index, &mut io::stdin().lock(), &mut io::stderr())?;

    // Opened only now so a cancelled prompt leaves an existing file untouched
    let (out, output_name) = open_output(config.output_file.as_deref())?;

    let progress = if config.output_file.is_some() {
        let progress = ProgressBar::new(0);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} {wide_msg:.dim.white} {pos}/{len} ({percent}%)")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        progress
    } else {
        ProgressBar::hidden()
    };

    let mut writer = CombinedWriter::new(out, output_name.clone()).with_progress(progress);
    let summary = writer.write_files(&files)?;
    writer.finish()?;

    if config.stats {
        let run_report = RunReport::new(output_name, start_time.elapsed(), &summary);
        eprintln!("\n{}", report::render(&run_report));
    }

    Ok(summary)
}
