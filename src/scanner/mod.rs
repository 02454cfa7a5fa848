//! Scanner module for candidate enumeration and content fingerprinting.
//!
//! This module provides functionality for:
//! - Listing the files directly under a root directory
//! - Excluding files above a size ceiling at enumeration time
//! - Reading file content on demand
//! - BLAKE3 content fingerprints
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`source`]: the [`FileSource`] trait and its filesystem implementation
//! - [`hasher`]: one-shot BLAKE3 fingerprints of whole file buffers
//!
//! # Example
//!
//! ```no_run
//! use dupsweep::scanner::{DirectorySource, FileSource};
//! use std::path::Path;
//!
//! let source = DirectorySource::open(Path::new("."), 3 * 1024 * 1024).unwrap();
//! for candidate in source.list_candidates() {
//!     println!("{}: {} bytes", candidate.path.display(), candidate.size);
//! }
//! ```

pub mod hasher;
pub mod source;

use std::path::{Path, PathBuf};

// Re-export main types
pub use hasher::Fingerprint;
pub use source::DirectorySource;

/// A file discovered during enumeration, before its content is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePath {
    /// Path to the file
    pub path: PathBuf,
    /// File size in bytes, taken from metadata at enumeration time
    pub size: u64,
}

impl CandidatePath {
    /// Create a new candidate.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }
}

/// Something that can enumerate candidate files and hand out their bytes.
///
/// Implementations must return candidates in a deterministic order. The
/// duplicate detector keeps the first file it sees for each content, so the
/// order decides which copy survives.
pub trait FileSource {
    /// Candidates in enumeration order, oversized files already removed.
    fn list_candidates(&self) -> Vec<CandidatePath>;

    /// Read the full content of a candidate.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError`] if the content cannot be read.
    fn read_content(&self, path: &Path) -> Result<Vec<u8>, ReadError>;

    /// Candidates that were left out because they exceed the size ceiling.
    fn excluded(&self) -> &[CandidatePath] {
        &[]
    }
}

impl<S: FileSource + ?Sized> FileSource for &S {
    fn list_candidates(&self) -> Vec<CandidatePath> {
        (**self).list_candidates()
    }

    fn read_content(&self, path: &Path) -> Result<Vec<u8>, ReadError> {
        (**self).read_content(path)
    }

    fn excluded(&self) -> &[CandidatePath] {
        (**self).excluded()
    }
}

/// Errors that can occur while enumerating the root directory.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The specified path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Permission was denied when listing the directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while listing the directory.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while reading a candidate's content.
#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    /// The file vanished between enumeration and reading.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ReadError {
    /// Classify an I/O error raised while reading `path`.
    #[must_use]
    pub fn from_io(path: &Path, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }

    /// The path that could not be read.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p) | Self::PermissionDenied(p) | Self::Io { path: p, .. } => p,
        }
    }
}
