//! Deletion strategies.
//!
//! # Overview
//!
//! A [`DeletionStrategy`] decides what "removing" a redundant file means:
//! - [`NoOp`]: remember the path, touch nothing (trial runs)
//! - [`Standard`]: remove the file from the filesystem
//! - [`Backup`](super::backup::Backup): copy the file aside, then delegate
//!
//! Strategies are driven one path at a time by the orchestrator and take
//! `&mut self`, so they may keep per-run state.
//!
//! # Example
//!
//! ```no_run
//! use dupsweep::actions::delete::{DeletionStrategy, Standard};
//! use std::path::Path;
//!
//! let mut strategy = Standard::new();
//! match strategy.delete(Path::new("/path/to/duplicate.txt")) {
//!     Ok(()) => println!("removed"),
//!     Err(e) => eprintln!("Failed: {}", e),
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error type for deletion operations.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// File was not found (may have been deleted or moved).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied when attempting to delete.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Removing the file failed for another reason.
    #[error("delete failed for {path}: {source}")]
    RemoveFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Copying the file into the backup directory failed; nothing was deleted.
    #[error("backup of {path} to {backup} failed: {source}")]
    BackupFailed {
        path: PathBuf,
        backup: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The run's backup directory could not be created.
    #[error("cannot create backup directory {path}: {source}")]
    BackupDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DeleteError {
    /// Classify an I/O error raised while removing `path`.
    #[must_use]
    pub fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::RemoveFailed {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }

    /// Get the path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p)
            | Self::PermissionDenied(p)
            | Self::RemoveFailed { path: p, .. }
            | Self::BackupFailed { path: p, .. }
            | Self::BackupDirectory { path: p, .. } => p,
        }
    }

    /// Whether this error must end the run instead of skipping one file.
    ///
    /// Only a failure to set up the backup directory is fatal: without it
    /// no later file could be backed up either.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::BackupDirectory { .. })
    }
}

/// What to do with a file judged redundant.
pub trait DeletionStrategy {
    /// Process one redundant path.
    ///
    /// # Errors
    ///
    /// Returns [`DeleteError`] if the path could not be processed.
    fn delete(&mut self, path: &Path) -> Result<(), DeleteError>;

    /// Short name for logs and reports.
    fn name(&self) -> &'static str;

    /// Name including any wrapped strategy, e.g. `backup(standard)`.
    fn describe(&self) -> String {
        self.name().to_string()
    }
}

impl<S: DeletionStrategy + ?Sized> DeletionStrategy for Box<S> {
    fn delete(&mut self, path: &Path) -> Result<(), DeleteError> {
        (**self).delete(path)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Dry-run strategy: records every path it is asked to delete.
#[derive(Debug, Default, Clone)]
pub struct NoOp {
    recorded: Vec<PathBuf>,
}

impl NoOp {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths this strategy was asked to delete, in call order.
    #[must_use]
    pub fn recorded(&self) -> &[PathBuf] {
        &self.recorded
    }
}

impl DeletionStrategy for NoOp {
    fn delete(&mut self, path: &Path) -> Result<(), DeleteError> {
        log::info!("Trial run, not deleting {}", path.display());
        self.recorded.push(path.to_path_buf());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "trial"
    }
}

/// Removes files from the filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct Standard;

impl Standard {
    /// Create the strategy.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl DeletionStrategy for Standard {
    fn delete(&mut self, path: &Path) -> Result<(), DeleteError> {
        fs::remove_file(path).map_err(|e| DeleteError::from_io(path, e))?;
        log::info!("Deleted {}", path.display());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}
