//! Application configuration management.
//!
//! Settings are layered with figment, lowest priority first:
//!
//! 1. Built-in defaults
//! 2. TOML configuration file (`--config`, else `dupsweep.toml` in the
//!    platform config directory)
//! 3. `DUPSWEEP_*` environment variables
//! 4. CLI flags
//!
//! The merged [`Settings`] are then resolved once into an immutable
//! [`RunConfig`] that the rest of the program receives by reference.

use chrono::{DateTime, Local};
use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::{parse_size, Cli};
use crate::error::SetupError;

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "DUPSWEEP_";

/// Configuration file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "dupsweep.toml";

/// Default `--size-limit`.
pub const DEFAULT_SIZE_LIMIT: &str = "3MB";

/// Default name of the backup directory under the input root.
pub const DEFAULT_BACKUP_DIR: &str = ".backup";

/// User-facing settings, as read from defaults, file, environment and CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory to scan.
    pub input_path: Option<PathBuf>,
    /// Maximum file size, as a human-readable string.
    pub size_limit: String,
    /// Dry run: never delete.
    pub trial_run: bool,
    /// Back files up before deleting them.
    pub backup: bool,
    /// Name of the backup directory created under the input root.
    pub backup_dir_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_path: None,
            size_limit: DEFAULT_SIZE_LIMIT.to_string(),
            trial_run: false,
            backup: false,
            backup_dir_name: DEFAULT_BACKUP_DIR.to_string(),
        }
    }
}

/// The subset of settings given on the command line.
///
/// Flags that were not passed are skipped so they do not mask lower layers.
/// A switch is `Some(true)` for `--flag`, `Some(false)` for `--no-flag`.
#[derive(Debug, Default, Serialize)]
struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    input_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size_limit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trial_run: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    backup: Option<bool>,
}

fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

impl From<&Cli> for CliOverrides {
    fn from(cli: &Cli) -> Self {
        Self {
            input_path: cli.input_path.clone(),
            size_limit: cli.size_limit.clone(),
            trial_run: switch(cli.trial_run, cli.no_trial_run),
            backup: switch(cli.backup, cli.no_backup),
        }
    }
}

impl Settings {
    /// Load settings for this invocation.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] if an explicit `--config` file is missing or
    /// any layer cannot be parsed.
    pub fn load(cli: &Cli) -> Result<Self, SetupError> {
        let file = match &cli.config {
            Some(path) => {
                if !path.is_file() {
                    return Err(SetupError::ConfigNotFound(path.clone()));
                }
                Some(path.clone())
            }
            None => Self::default_config_path(),
        };

        Self::figment(file.as_deref(), Some(cli))
            .extract()
            .map_err(|e| SetupError::Config(Box::new(e)))
    }

    /// Build the layered figment. Missing files contribute nothing.
    #[must_use]
    pub fn figment(config_file: Option<&Path>, cli: Option<&Cli>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = config_file {
            log::debug!("Reading configuration from {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX));

        if let Some(cli) = cli {
            figment = figment.merge(Serialized::defaults(CliOverrides::from(cli)));
        }

        figment
    }

    /// Default platform-specific configuration file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "dupsweep", "dupsweep")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

/// Resolved, validated configuration for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Root directory to scan
    pub input: PathBuf,
    /// Files larger than this many bytes are excluded
    pub max_file_size: u64,
    /// Use the no-op strategy
    pub trial_run: bool,
    /// Wrap the strategy in a backup decorator
    pub backup: bool,
    /// Parent directory of this run's backup directory
    pub backup_root: PathBuf,
    /// Run start time, names the backup directory
    pub started_at: DateTime<Local>,
}

impl RunConfig {
    /// Validate `settings` into a run configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::MissingInput`] when no input path is configured
    /// and [`SetupError::InvalidSizeLimit`] when the size limit does not parse.
    pub fn resolve(settings: &Settings, started_at: DateTime<Local>) -> Result<Self, SetupError> {
        let input = settings
            .input_path
            .clone()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(SetupError::MissingInput)?;

        let max_file_size =
            parse_size(&settings.size_limit).map_err(|source| SetupError::InvalidSizeLimit {
                value: settings.size_limit.clone(),
                source,
            })?;

        let backup_root = input.join(&settings.backup_dir_name);

        Ok(Self {
            input,
            max_file_size,
            trial_run: settings.trial_run,
            backup: settings.backup,
            backup_root,
            started_at,
        })
    }
}
