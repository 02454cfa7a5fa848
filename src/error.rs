//! Setup errors, structured error output and exit codes.

use serde::Serialize;
use std::path::PathBuf;

use crate::cli::SizeParseError;
use crate::scanner::ScanError;

/// Errors that stop a run before any file is touched.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// No input directory was given on the command line or in configuration.
    #[error("please provide an input path (-i/--input-path)")]
    MissingInput,

    /// The input directory could not be listed.
    #[error("cannot scan input directory: {0}")]
    Scan(#[from] ScanError),

    /// The size limit is not a valid size string.
    #[error("invalid size limit '{value}': {source}")]
    InvalidSizeLimit {
        /// The rejected value
        value: String,
        /// Why it was rejected
        #[source]
        source: SizeParseError,
    },

    /// An explicitly requested configuration file does not exist.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    /// The layered configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[source] Box<figment::Error>),

    /// The backup directory could not be created.
    #[error("cannot create backup directory {path}: {source}")]
    BackupDirectory {
        /// Directory that could not be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Exit codes for the dupsweep application.
///
/// - 0: Success (duplicates were found and handled)
/// - 1: General error (setup failure or unexpected error)
/// - 2: No duplicates found
/// - 3: Partial success (some files could not be read or deleted)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: duplicates were found and every one was handled.
    Success = 0,
    /// General error: the run could not start or failed unexpectedly.
    GeneralError = 1,
    /// No duplicates: the scan completed but found nothing to remove.
    NoDuplicates = 2,
    /// Partial success: completed with some per-file errors.
    PartialSuccess = 3,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "DS000",
            Self::GeneralError => "DS001",
            Self::NoDuplicates => "DS002",
            Self::PartialSuccess => "DS003",
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "DS001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: err.to_string(),
        }
    }
}
