//! Run orchestration: detect duplicates, then apply a deletion strategy.
//!
//! # Overview
//!
//! [`Orchestrator::run`] asks the [`DuplicateDetector`] for a deletion plan
//! and hands each planned path to the strategy, in plan order. A failure on
//! one path is logged and recorded in the [`RunReport`]; the remaining paths
//! are still processed. Only a fatal [`DeleteError`] (the backup directory
//! cannot be created) ends the run early.
//!
//! # Example
//!
//! ```no_run
//! use dupsweep::actions::NoOp;
//! use dupsweep::orchestrator::Orchestrator;
//! use dupsweep::scanner::DirectorySource;
//! use std::path::Path;
//!
//! let source = DirectorySource::open(Path::new("/data"), 3 * 1024 * 1024).unwrap();
//! let mut strategy = NoOp::new();
//! let report = Orchestrator::new().run(&source, &mut strategy).unwrap();
//!
//! println!("{}", report.summary_line());
//! ```

use std::path::PathBuf;

use crate::actions::{DeleteError, DeletionStrategy};
use crate::duplicates::{DetectionSummary, DuplicateDetector};
use crate::error::SetupError;
use crate::scanner::FileSource;

/// A planned path the strategy could not process.
#[derive(Debug)]
pub struct Failure {
    /// The path that was not processed
    pub path: PathBuf,
    /// The error the strategy returned
    pub error: DeleteError,
}

/// Outcome of one run.
#[derive(Debug)]
pub struct RunReport {
    /// Paths the strategy handled successfully, in plan order
    pub processed: Vec<PathBuf>,
    /// Paths the strategy failed on
    pub failures: Vec<Failure>,
    /// Statistics from the detection pass
    pub summary: DetectionSummary,
    /// Strategy description, e.g. `backup(standard)`
    pub strategy: String,
    /// Sum of the sizes of the processed paths
    pub bytes_reclaimed: u64,
}

impl RunReport {
    /// Paths the strategy handled successfully.
    #[must_use]
    pub fn processed(&self) -> &[PathBuf] {
        &self.processed
    }

    /// Whether every planned path was handled and every candidate was read.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.summary.read_errors.is_empty()
    }

    /// One-line summary for the end of a run.
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!(
            "{} files checked, {} duplicates, {} processed with {} ({} reclaimed), {} failed, {} unreadable, {} too large",
            self.summary.files_checked,
            self.summary.duplicate_files,
            self.processed.len(),
            self.strategy,
            bytesize::ByteSize::b(self.bytes_reclaimed),
            self.failures.len(),
            self.summary.unreadable_files(),
            self.summary.files_excluded,
        )
    }
}

/// Wires a [`FileSource`] to a [`DeletionStrategy`].
#[derive(Debug, Default, Clone, Copy)]
pub struct Orchestrator {
    detector: DuplicateDetector,
}

impl Orchestrator {
    /// Create an orchestrator with the default detector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Detect duplicates in `source` and apply `strategy` to each of them.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::BackupDirectory`] if the strategy cannot create
    /// its backup directory. Per-path failures are reported in the
    /// [`RunReport`] instead.
    pub fn run<F, S>(&self, source: &F, strategy: &mut S) -> Result<RunReport, SetupError>
    where
        F: FileSource + ?Sized,
        S: DeletionStrategy + ?Sized,
    {
        let (plan, summary) = self.detector.detect(source);
        let mut report = RunReport {
            processed: Vec::with_capacity(plan.len()),
            failures: Vec::new(),
            summary,
            strategy: strategy.describe(),
            bytes_reclaimed: 0,
        };

        if plan.is_empty() {
            log::info!("No duplicates found");
            return Ok(report);
        }

        for entry in plan {
            let path = entry.path();
            log::info!("Deleting {}", path.display());

            match strategy.delete(path) {
                Ok(()) => {
                    report.bytes_reclaimed += entry.candidate.size;
                    report.processed.push(entry.candidate.path);
                }
                Err(DeleteError::BackupDirectory { path, source }) => {
                    log::error!("Cannot create backup directory {}: {}", path.display(), source);
                    return Err(SetupError::BackupDirectory { path, source });
                }
                Err(error) => {
                    log::error!("Could not delete {}: {}", path.display(), error);
                    report.failures.push(Failure {
                        path: path.to_path_buf(),
                        error,
                    });
                }
            }
        }

        log::debug!(
            "Applied {} to {} of {} planned files",
            report.strategy,
            report.processed.len(),
            report.processed.len() + report.failures.len()
        );

        Ok(report)
    }
}
