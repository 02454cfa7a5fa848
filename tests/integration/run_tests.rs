use clap::Parser;
use dupsweep::cli::Cli;
use dupsweep::error::{ExitCode, SetupError};
use std::fs;
use std::sync::{Mutex, MutexGuard};
use tempfile::TempDir;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Clear all DUPSWEEP_* environment variables to avoid interference.
fn clear_env() {
    for (key, _) in std::env::vars() {
        if key.starts_with("DUPSWEEP_") {
            std::env::remove_var(key);
        }
    }
}

/// Serialize access to the environment and start from a clean slate.
fn lock_env() -> MutexGuard<'static, ()> {
    let guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();
    guard
}

/// Runs with an empty configuration file so the user's own
/// `dupsweep.toml` never takes part.
struct Isolated {
    config_dir: TempDir,
}

impl Isolated {
    fn new() -> Self {
        let config_dir = TempDir::new().unwrap();
        fs::write(config_dir.path().join("dupsweep.toml"), "").unwrap();
        Self { config_dir }
    }

    fn cli(&self, args: &[&str]) -> Cli {
        let config = self.config_dir.path().join("dupsweep.toml");
        let config = config.to_string_lossy().into_owned();
        let mut full = vec!["dupsweep", "-c", config.as_str()];
        full.extend_from_slice(args);
        Cli::try_parse_from(full).unwrap()
    }

    fn run(&self, args: &[&str]) -> anyhow::Result<ExitCode> {
        dupsweep::run(&self.cli(args))
    }
}

fn input(dir: &TempDir) -> String {
    dir.path().to_string_lossy().into_owned()
}

#[test]
fn test_run_deletes_duplicates() {
    let _lock = lock_env();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "same").unwrap();
    fs::write(dir.path().join("b.txt"), "same").unwrap();

    let code = Isolated::new().run(&["-i", &input(&dir)]).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(dir.path().join("a.txt").exists());
    assert!(!dir.path().join("b.txt").exists());
    assert!(!dir.path().join(".backup").exists());
}

#[test]
fn test_run_trial_keeps_files() {
    let _lock = lock_env();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "same").unwrap();
    fs::write(dir.path().join("b.txt"), "same").unwrap();

    let code = Isolated::new().run(&["-t", "-i", &input(&dir)]).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(dir.path().join("b.txt").exists());
}

#[test]
fn test_run_with_backup() {
    let _lock = lock_env();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "same").unwrap();
    fs::write(dir.path().join("b.txt"), "same").unwrap();

    let code = Isolated::new().run(&["-b", "-i", &input(&dir)]).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert!(!dir.path().join("b.txt").exists());
    let runs: Vec<_> = fs::read_dir(dir.path().join(".backup"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(runs.len(), 1);
    assert_eq!(fs::read_to_string(runs[0].join("b.txt")).unwrap(), "same");
}

#[test]
fn test_run_no_duplicates() {
    let _lock = lock_env();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "one").unwrap();
    fs::write(dir.path().join("b.txt"), "two").unwrap();

    let code = Isolated::new().run(&["-b", "-i", &input(&dir)]).unwrap();

    assert_eq!(code, ExitCode::NoDuplicates);
    assert!(!dir.path().join(".backup").exists());
}

#[test]
fn test_run_size_limit_excludes_large_duplicates() {
    let _lock = lock_env();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.bin"), vec![1u8; 2000]).unwrap();
    fs::write(dir.path().join("b.bin"), vec![1u8; 2000]).unwrap();

    let code = Isolated::new().run(&["-s", "1KB", "-i", &input(&dir)]).unwrap();

    assert_eq!(code, ExitCode::NoDuplicates);
    assert!(dir.path().join("b.bin").exists());
}

#[test]
fn test_run_missing_input_path() {
    let _lock = lock_env();
    let err = Isolated::new().run(&["-t"]).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<SetupError>(),
        Some(SetupError::MissingInput)
    ));
}

#[test]
fn test_run_nonexistent_input_path() {
    let _lock = lock_env();
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");

    let err = Isolated::new().run(&["-i", &missing.to_string_lossy()]).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<SetupError>(),
        Some(SetupError::Scan(_))
    ));
}

#[test]
fn test_run_invalid_size_limit() {
    let _lock = lock_env();
    let dir = TempDir::new().unwrap();

    let err = Isolated::new().run(&["-s", "fail", "-i", &input(&dir)]).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<SetupError>(),
        Some(SetupError::InvalidSizeLimit { .. })
    ));
    assert!(err.to_string().contains("fail"));
}

#[test]
fn test_run_missing_config_file() {
    let _lock = lock_env();
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("absent.toml");
    let config = config.to_string_lossy().into_owned();
    let input = input(&dir);
    let cli = Cli::try_parse_from(["dupsweep", "-c", config.as_str(), "-i", input.as_str()]).unwrap();
    let err = dupsweep::run(&cli).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<SetupError>(),
        Some(SetupError::ConfigNotFound(_))
    ));
}

#[test]
fn test_run_honours_environment_layer() {
    let _lock = lock_env();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "same").unwrap();
    fs::write(dir.path().join("b.txt"), "same").unwrap();

    std::env::set_var("DUPSWEEP_TRIAL_RUN", "true");
    let code = Isolated::new().run(&["-i", &input(&dir)]);
    clear_env();

    assert_eq!(code.unwrap(), ExitCode::Success);
    assert!(dir.path().join("b.txt").exists());
}

#[test]
fn test_run_no_trial_run_overrides_environment() {
    let _lock = lock_env();
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "same").unwrap();
    fs::write(dir.path().join("b.txt"), "same").unwrap();

    std::env::set_var("DUPSWEEP_TRIAL_RUN", "true");
    std::env::set_var("DUPSWEEP_BACKUP", "true");
    let code = Isolated::new().run(&["--no-trial-run", "--no-backup", "-i", &input(&dir)]);
    clear_env();

    assert_eq!(code.unwrap(), ExitCode::Success);
    assert!(!dir.path().join("b.txt").exists());
    assert!(!dir.path().join(".backup").exists());
}
