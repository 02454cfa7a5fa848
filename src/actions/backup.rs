//! Backup-then-delete decorator.
//!
//! # Overview
//!
//! [`Backup`] wraps any other [`DeletionStrategy`]. Before handing a path to
//! the wrapped strategy it copies the file into the run's backup directory
//! under its base name. The copy is read to the end, flushed, synced and
//! closed before the inner strategy runs; if any of that fails the inner
//! strategy is not called and the file stays where it is.
//!
//! The backup directory (`<base>/<YYYY-MM-DD_HH-MM-SS>`) is created on the
//! first delete of the run, not before, so a run with nothing to delete
//! leaves no trace. Existing backups are never overwritten.
//!
//! # Example
//!
//! ```no_run
//! use dupsweep::actions::backup::{Backup, BackupManifest};
//! use dupsweep::actions::delete::{DeletionStrategy, Standard};
//! use std::path::Path;
//!
//! let manifest = BackupManifest::new("/data/.backup", chrono::Local::now());
//! let mut strategy = Backup::new(Standard::new(), manifest);
//! strategy.delete(Path::new("/data/copy-of-report.pdf")).unwrap();
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use super::delete::{DeleteError, DeletionStrategy};

/// Directory name format for a run's backups.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// How many `_N` suffixes to try when the timestamp directory already exists.
const MAX_NAME_ATTEMPTS: usize = 100;

/// The run-scoped backup directory, created lazily.
#[derive(Debug, Clone)]
pub struct BackupManifest {
    /// Parent of all runs' backup directories
    base: PathBuf,
    /// Run-start timestamp label
    label: String,
    /// Created directory, once it exists
    directory: Option<PathBuf>,
}

impl BackupManifest {
    /// Describe the backup directory for a run that started at `started_at`.
    /// Nothing is created on disk yet.
    #[must_use]
    pub fn new(base: impl Into<PathBuf>, started_at: DateTime<Local>) -> Self {
        Self {
            base: base.into(),
            label: started_at.format(TIMESTAMP_FORMAT).to_string(),
            directory: None,
        }
    }

    /// Parent directory that holds one subdirectory per run.
    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Timestamp label of this run.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The run's backup directory, if it has been created.
    #[must_use]
    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    /// Return the run's backup directory, creating it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`DeleteError::BackupDirectory`] if the directory cannot be created.
    pub fn ensure(&mut self) -> Result<PathBuf, DeleteError> {
        if let Some(dir) = &self.directory {
            return Ok(dir.clone());
        }

        fs::create_dir_all(&self.base).map_err(|source| DeleteError::BackupDirectory {
            path: self.base.clone(),
            source,
        })?;

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let name = if attempt == 0 {
                self.label.clone()
            } else {
                format!("{}_{}", self.label, attempt)
            };
            let candidate = self.base.join(name);

            match fs::create_dir(&candidate) {
                Ok(()) => {
                    log::info!("Created backup directory {}", candidate.display());
                    self.directory = Some(candidate.clone());
                    return Ok(candidate);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    log::debug!("Backup directory {} already exists", candidate.display());
                }
                Err(source) => {
                    return Err(DeleteError::BackupDirectory {
                        path: candidate,
                        source,
                    });
                }
            }
        }

        Err(DeleteError::BackupDirectory {
            path: self.base.join(&self.label),
            source: io::Error::new(
                io::ErrorKind::AlreadyExists,
                "no free backup directory name for this timestamp",
            ),
        })
    }
}

/// Copies each file into the backup directory, then delegates to `inner`.
#[derive(Debug)]
pub struct Backup<S> {
    inner: S,
    manifest: BackupManifest,
}

impl<S: DeletionStrategy> Backup<S> {
    /// Wrap `inner`, backing files up into `manifest`.
    #[must_use]
    pub fn new(inner: S, manifest: BackupManifest) -> Self {
        Self { inner, manifest }
    }

    /// The wrapped strategy.
    #[must_use]
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// The backup directory bookkeeping.
    #[must_use]
    pub fn manifest(&self) -> &BackupManifest {
        &self.manifest
    }

    /// Unwrap into the inner strategy.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: DeletionStrategy> DeletionStrategy for Backup<S> {
    fn delete(&mut self, path: &Path) -> Result<(), DeleteError> {
        let dir = self.manifest.ensure()?;

        let Some(name) = path.file_name() else {
            return Err(DeleteError::BackupFailed {
                path: path.to_path_buf(),
                backup: dir,
                source: io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
            });
        };
        let target = dir.join(name);

        let copied = copy_fully(path, &target).map_err(|source| {
            log::debug!("Backup of {} failed, leaving it in place", path.display());
            DeleteError::BackupFailed {
                path: path.to_path_buf(),
                backup: target.clone(),
                source,
            }
        })?;
        log::info!(
            "Backed up {} to {} ({} bytes)",
            path.display(),
            target.display(),
            copied
        );

        self.inner.delete(path)
    }

    fn name(&self) -> &'static str {
        "backup"
    }

    fn describe(&self) -> String {
        format!("{}({})", self.name(), self.inner.describe())
    }
}

/// Copy `source` to a new file at `target` and make sure it is on disk.
///
/// Never overwrites `target`. A partially written target is removed.
fn copy_fully(source: &Path, target: &Path) -> io::Result<u64> {
    let mut reader = File::open(source)?;
    let mut writer = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)?;

    let result = io::copy(&mut reader, &mut writer).and_then(|copied| {
        writer.flush()?;
        writer.sync_all()?;
        Ok(copied)
    });
    drop(writer);

    if result.is_err() {
        if let Err(e) = fs::remove_file(target) {
            log::warn!(
                "Could not remove partial backup {}: {}",
                target.display(),
                e
            );
        }
    }
    result
}
