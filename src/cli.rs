//! Command-line interface definitions for dupsweep.
//!
//! This module defines the CLI arguments using the clap derive API, plus the
//! human-readable size parser used for `--size-limit`.
//!
//! # Example
//!
//! ```bash
//! # Dry run: report what would be removed
//! dupsweep -v -t -i ~/Downloads
//!
//! # Remove duplicates, keeping copies under ~/Downloads/.backup/<timestamp>
//! dupsweep -b -i ~/Downloads
//!
//! # Only consider files up to 2.5 MiB
//! dupsweep -i ~/Downloads -s 2.5MB
//! ```

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Remove byte-identical duplicate files from a directory.
///
/// The first file (by name) with a given content is kept; later copies are
/// deleted, or backed up and then deleted with --backup.
#[derive(Debug, Parser)]
#[command(name = "dupsweep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Show per-file progress (-v), debug output (-vv) or trace output (-vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Perform all checks, but do not delete anything
    #[arg(short = 't', long = "trial-run")]
    pub trial_run: bool,

    /// Delete for real even if the configuration enables trial runs
    #[arg(long = "no-trial-run", conflicts_with = "trial_run")]
    pub no_trial_run: bool,

    /// Directory to scan for duplicates (only its direct children are checked)
    #[arg(short = 'i', long = "input-path", value_name = "PATH")]
    pub input_path: Option<PathBuf>,

    /// Copy every file into a timestamped .backup sub-folder before deleting it
    #[arg(short, long)]
    pub backup: bool,

    /// Do not back files up even if the configuration enables backups
    #[arg(long = "no-backup", conflicts_with = "backup")]
    pub no_backup: bool,

    /// Maximum size of files to process [default: 3MB]
    ///
    /// A number followed by B, KB, MB or GB (1024-based). Comma or dot may be
    /// used as the decimal separator, e.g. 2.5MB or 2,5MB.
    #[arg(short = 's', long = "size-limit", value_name = "SIZE")]
    pub size_limit: Option<String>,

    /// Configuration file to use instead of the default location
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print fatal errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}

/// Errors produced by [`parse_size`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SizeParseError {
    /// No recognised unit suffix.
    #[error("unrecognised size pattern '{0}': expected a number followed by B, KB, MB or GB")]
    UnknownUnit(String),

    /// The number part is missing or malformed.
    #[error("invalid number in size '{0}'")]
    InvalidNumber(String),

    /// The number is negative.
    #[error("size must not be negative: '{0}'")]
    Negative(String),

    /// The size does not fit in 64 bits.
    #[error("size '{0}' is too large")]
    TooLarge(String),
}

/// Unit suffixes, longest first so `KB` is not mistaken for `B`.
const SIZE_UNITS: &[(&str, u64)] = &[
    ("GB", 1024 * 1024 * 1024),
    ("MB", 1024 * 1024),
    ("KB", 1024),
    ("B", 1),
];

/// Parse a human-readable size string into bytes.
///
/// Accepts a decimal number (`.` or `,` as separator) immediately followed by
/// `B`, `KB`, `MB` or `GB`. Units are 1024-based and case-sensitive. The
/// result is rounded half to even.
///
/// # Examples
///
/// ```
/// use dupsweep::cli::parse_size;
///
/// assert_eq!(parse_size("1GB").unwrap(), 1_073_741_824);
/// assert_eq!(parse_size("2.5MB").unwrap(), 2_621_440);
/// assert_eq!(parse_size("2,5MB").unwrap(), 2_621_440);
/// assert!(parse_size("-1B").is_err());
/// assert!(parse_size("fail").is_err());
/// ```
///
/// # Errors
///
/// Returns [`SizeParseError`] for unknown units, malformed or negative
/// numbers, and sizes that overflow `u64`.
pub fn parse_size(input: &str) -> Result<u64, SizeParseError> {
    let trimmed = input.trim();

    let (number, multiplier) = SIZE_UNITS
        .iter()
        .find_map(|(suffix, multiplier)| {
            trimmed
                .strip_suffix(suffix)
                .map(|number| (number, *multiplier))
        })
        .ok_or_else(|| SizeParseError::UnknownUnit(input.to_string()))?;

    if number.starts_with('-') {
        return Err(SizeParseError::Negative(input.to_string()));
    }

    let number = number.replace(',', ".");
    let well_formed = number.chars().any(|c| c.is_ascii_digit())
        && number.chars().all(|c| c.is_ascii_digit() || c == '.')
        && number.matches('.').count() <= 1;
    if !well_formed {
        return Err(SizeParseError::InvalidNumber(input.to_string()));
    }

    let value: f64 = number
        .parse()
        .map_err(|_| SizeParseError::InvalidNumber(input.to_string()))?;

    let bytes = (value * multiplier as f64).round_ties_even();
    if bytes >= u64::MAX as f64 {
        return Err(SizeParseError::TooLarge(input.to_string()));
    }

    Ok(bytes as u64)
}
