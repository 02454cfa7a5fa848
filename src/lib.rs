//! dupsweep - remove byte-identical duplicate files from a directory
//!
//! Files directly under one directory are fingerprinted with BLAKE3. The first
//! file (by name) holding a given content is kept; every later copy is handed
//! to a deletion strategy that removes it, only reports it (trial run), or
//! backs it up into a timestamped directory first.

pub mod actions;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod scanner;

use chrono::Local;

use crate::actions::{build_strategy, DeletionStrategy};
use crate::cli::Cli;
use crate::config::{RunConfig, Settings};
use crate::error::{ExitCode, SetupError};
use crate::orchestrator::{Orchestrator, RunReport};
use crate::scanner::DirectorySource;

/// Run the application for already-parsed arguments.
///
/// Initializes logging, then delegates to [`run`].
///
/// # Errors
///
/// Returns an error if the run cannot start; see [`run`].
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::init_logging(cli.verbose);
    run(&cli)
}

/// Load configuration, scan, detect and apply the selected strategy.
///
/// # Errors
///
/// Returns a [`SetupError`] (wrapped in [`anyhow::Error`]) if configuration
/// is invalid, the input directory cannot be listed or the backup
/// directory cannot be created. Per-file problems never end the run.
pub fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let settings = Settings::load(cli)?;
    let config = RunConfig::resolve(&settings, Local::now())?;
    log::debug!("Run configuration: {:?}", config);

    let source =
        DirectorySource::open(&config.input, config.max_file_size).map_err(SetupError::from)?;

    let mut strategy = build_strategy(&config);
    log::info!(
        "Scanning {} with strategy {}",
        config.input.display(),
        strategy.describe()
    );

    let report = Orchestrator::new().run(&source, &mut strategy)?;
    log::info!("{}", report.summary_line());

    Ok(exit_code_for(&report))
}

/// Map a finished run to its process exit code.
#[must_use]
pub fn exit_code_for(report: &RunReport) -> ExitCode {
    if !report.is_complete() {
        ExitCode::PartialSuccess
    } else if report.summary.duplicate_files == 0 {
        ExitCode::NoDuplicates
    } else {
        ExitCode::Success
    }
}
