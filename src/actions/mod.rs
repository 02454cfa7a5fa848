//! File actions module.
//!
//! This module decides what happens to a file judged redundant:
//! - [`NoOp`]: trial runs, nothing is touched
//! - [`Standard`]: the file is removed
//! - [`Backup`]: the file is copied into a timestamped backup directory
//!   first, then handed to the wrapped strategy
//!
//! [`build_strategy`] assembles the right combination for a run.
//!
//! ```no_run
//! use dupsweep::actions::{build_strategy, DeletionStrategy};
//! use dupsweep::config::{RunConfig, Settings};
//! use std::path::Path;
//!
//! let settings = Settings {
//!     input_path: Some("/data".into()),
//!     backup: true,
//!     ..Settings::default()
//! };
//! let config = RunConfig::resolve(&settings, chrono::Local::now()).unwrap();
//! let mut strategy = build_strategy(&config);
//! assert_eq!(strategy.describe(), "backup(standard)");
//! strategy.delete(Path::new("/data/copy.txt")).unwrap();
//! ```

pub mod backup;
pub mod delete;

pub use backup::{Backup, BackupManifest};
pub use delete::{DeleteError, DeletionStrategy, NoOp, Standard};

use crate::config::RunConfig;

/// Build the deletion strategy selected by `config`.
///
/// Trial runs use [`NoOp`], otherwise [`Standard`]; either is wrapped in
/// [`Backup`] when backups are enabled.
#[must_use]
pub fn build_strategy(config: &RunConfig) -> Box<dyn DeletionStrategy> {
    let base: Box<dyn DeletionStrategy> = if config.trial_run {
        Box::new(NoOp::new())
    } else {
        Box::new(Standard::new())
    };

    if config.backup {
        let manifest = BackupManifest::new(&config.backup_root, config.started_at);
        Box::new(Backup::new(base, manifest))
    } else {
        base
    }
}
