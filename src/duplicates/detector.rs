//! Single-pass duplicate detection over a [`FileSource`].
//!
//! # Overview
//!
//! The detector walks the source's candidates in enumeration order, reads
//! each one, fingerprints the whole content and checks it against the set
//! of fingerprints seen so far in this pass:
//!
//! - **first occurrence**: the fingerprint is recorded, the file is kept
//! - **repeat**: the file is appended to the [`DeletionPlan`]
//!
//! Read failures are logged and the candidate is skipped; they never abort
//! the pass. The seen-set lives only for the duration of one call.
//!
//! # Example
//!
//! ```no_run
//! use dupsweep::duplicates::DuplicateDetector;
//! use dupsweep::scanner::DirectorySource;
//! use std::path::Path;
//!
//! let source = DirectorySource::open(Path::new("."), 3 * 1024 * 1024).unwrap();
//! let (plan, summary) = DuplicateDetector::new().detect(&source);
//!
//! println!("{} of {} files are redundant", plan.len(), summary.files_checked);
//! ```

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use super::plan::{DeletionPlan, PlannedDeletion};
use crate::scanner::{FileSource, Fingerprint, ReadError};

/// Statistics from one detection pass.
#[derive(Debug, Default)]
pub struct DetectionSummary {
    /// Candidates the source offered
    pub files_checked: usize,
    /// Candidates excluded for size before detection
    pub files_excluded: usize,
    /// Distinct contents seen (kept files)
    pub unique_contents: usize,
    /// Files scheduled for removal
    pub duplicate_files: usize,
    /// Bytes freed if the whole plan is applied
    pub reclaimable_space: u64,
    /// Candidates that could not be read
    pub read_errors: Vec<ReadError>,
    /// Wall-clock time of the pass
    pub duration: Duration,
}

impl DetectionSummary {
    /// Number of candidates skipped because they could not be read.
    #[must_use]
    pub fn unreadable_files(&self) -> usize {
        self.read_errors.len()
    }

    /// Format reclaimable space as a human-readable string.
    #[must_use]
    pub fn reclaimable_display(&self) -> String {
        bytesize::ByteSize::b(self.reclaimable_space).to_string()
    }
}

/// Content-based duplicate detector.
///
/// Holds no state between calls; each [`detect`](Self::detect) starts
/// with an empty seen-set.
#[derive(Debug, Default, Clone, Copy)]
pub struct DuplicateDetector;

impl DuplicateDetector {
    /// Create a new detector.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Build the deletion plan for `source`.
    ///
    /// The first file encountered for each content is preserved; every
    /// later file with the same fingerprint is scheduled for removal.
    pub fn detect<S: FileSource + ?Sized>(&self, source: &S) -> (DeletionPlan, DetectionSummary) {
        let start = Instant::now();
        let mut plan = DeletionPlan::new();
        let mut summary = DetectionSummary {
            files_excluded: source.excluded().len(),
            ..DetectionSummary::default()
        };
        // fingerprint -> path of the kept first occurrence
        let mut seen: HashMap<Fingerprint, PathBuf> = HashMap::new();

        for candidate in source.list_candidates() {
            summary.files_checked += 1;
            log::info!("Checking {}", candidate.path.display());

            let content = match source.read_content(&candidate.path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    log::error!("Skipping unreadable file: {}", e);
                    summary.read_errors.push(e);
                    continue;
                }
            };

            let fingerprint = Fingerprint::of(&content);
            log::trace!("{} -> {}", candidate.path.display(), fingerprint);

            match seen.get(&fingerprint) {
                Some(original) => {
                    log::info!(
                        "Matching hash found: {} duplicates {}",
                        candidate.path.display(),
                        original.display()
                    );
                    summary.duplicate_files += 1;
                    summary.reclaimable_space += candidate.size;
                    plan.push(PlannedDeletion::new(candidate, fingerprint, original.clone()));
                }
                None => {
                    seen.insert(fingerprint, candidate.path);
                }
            }
        }

        summary.unique_contents = seen.len();
        summary.duration = start.elapsed();

        log::debug!(
            "Detection finished in {:?}: {} checked, {} unique, {} redundant, {} unreadable",
            summary.duration,
            summary.files_checked,
            summary.unique_contents,
            summary.duplicate_files,
            summary.unreadable_files()
        );

        (plan, summary)
    }
}
