//! Filesystem-backed [`FileSource`] using walkdir.
//!
//! # Overview
//!
//! [`DirectorySource`] lists the regular files sitting directly under a root
//! directory. Nested directories are skipped, never descended into.
//! Enumeration happens once, when the source is opened, and the result is
//! sorted by file name so the same directory always yields the same order.
//!
//! # Filtering
//!
//! - Files larger than the size ceiling are excluded up front and reported
//! - Symbolic links are skipped (never followed)
//! - Entries whose metadata cannot be read are logged and skipped
//!
//! # Example
//!
//! ```no_run
//! use dupsweep::scanner::{DirectorySource, FileSource};
//! use std::path::Path;
//!
//! let source = DirectorySource::open(Path::new("/home/user/Downloads"), 1024 * 1024).unwrap();
//! for skipped in source.excluded() {
//!     println!("too large: {}", skipped.path.display());
//! }
//! println!("{} candidates", source.list_candidates().len());
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{CandidatePath, FileSource, ReadError, ScanError};

/// Non-recursive, sorted listing of one directory.
#[derive(Debug)]
pub struct DirectorySource {
    /// Root directory that was listed
    root: PathBuf,
    /// Size ceiling in bytes; larger files are excluded
    max_file_size: u64,
    /// Accepted candidates in file-name order
    candidates: Vec<CandidatePath>,
    /// Candidates excluded for size, in file-name order
    excluded: Vec<CandidatePath>,
}

impl DirectorySource {
    /// Validate `root` and enumerate the files directly under it.
    ///
    /// # Arguments
    ///
    /// * `root` - Directory to list
    /// * `max_file_size` - Files strictly larger than this are excluded
    ///
    /// # Errors
    ///
    /// Returns [`ScanError`] if the root does not exist, is not a directory,
    /// or cannot be listed.
    pub fn open(root: &Path, max_file_size: u64) -> Result<Self, ScanError> {
        let metadata = fs::metadata(root).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ScanError::NotFound(root.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => ScanError::PermissionDenied(root.to_path_buf()),
            _ => ScanError::Io {
                path: root.to_path_buf(),
                source: e,
            },
        })?;
        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory(root.to_path_buf()));
        }

        let mut source = Self {
            root: root.to_path_buf(),
            max_file_size,
            candidates: Vec::new(),
            excluded: Vec::new(),
        };
        source.enumerate()?;

        log::debug!(
            "Listed {}: {} candidate(s), {} excluded for size",
            source.root.display(),
            source.candidates.len(),
            source.excluded.len()
        );

        Ok(source)
    }

    /// Root directory of this source.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Size ceiling in bytes.
    #[must_use]
    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    fn enumerate(&mut self) -> Result<(), ScanError> {
        let walk = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        for entry_result in walk {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    // Failed to list the root itself
                    return Err(self.handle_walkdir_error(e));
                }
                Err(e) => {
                    log::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();
            let file_type = entry.file_type();

            if file_type.is_dir() {
                log::trace!("Skipping directory: {}", path.display());
                continue;
            }

            if file_type.is_symlink() {
                log::trace!("Skipping symlink: {}", path.display());
                continue;
            }

            let metadata = match entry.metadata() {
                Ok(m) => m,
                Err(e) => {
                    log::warn!("Cannot read metadata for {}: {}", path.display(), e);
                    continue;
                }
            };

            if !metadata.is_file() {
                continue;
            }

            let candidate = CandidatePath::new(path, metadata.len());
            if candidate.size > self.max_file_size {
                log::info!(
                    "{} too large to process ({} bytes). Skipping.",
                    path.display(),
                    candidate.size
                );
                self.excluded.push(candidate);
            } else {
                self.candidates.push(candidate);
            }
        }

        Ok(())
    }

    fn handle_walkdir_error(&self, error: walkdir::Error) -> ScanError {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);
        match error.into_io_error() {
            Some(io) if io.kind() == std::io::ErrorKind::PermissionDenied => {
                ScanError::PermissionDenied(path)
            }
            Some(io) => ScanError::Io { path, source: io },
            None => ScanError::Io {
                path,
                source: std::io::Error::other("filesystem loop detected"),
            },
        }
    }
}

impl FileSource for DirectorySource {
    fn list_candidates(&self) -> Vec<CandidatePath> {
        self.candidates.clone()
    }

    fn read_content(&self, path: &Path) -> Result<Vec<u8>, ReadError> {
        fs::read(path).map_err(|e| ReadError::from_io(path, e))
    }

    fn excluded(&self) -> &[CandidatePath] {
        &self.excluded
    }
}
