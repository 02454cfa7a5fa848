use dupsweep::actions::{DeleteError, DeletionStrategy, NoOp, Standard};
use dupsweep::orchestrator::Orchestrator;
use dupsweep::scanner::DirectorySource;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture() -> (TempDir, Vec<PathBuf>) {
    let dir = TempDir::new().unwrap();
    let files = [
        ("1.txt", "one"),
        ("2.txt", "two"),
        ("3.txt", "one"),
        ("4.txt", "two"),
        ("5.txt", "one"),
    ];
    let paths = files
        .iter()
        .map(|(name, content)| {
            let path = dir.path().join(name);
            fs::write(&path, content).unwrap();
            path
        })
        .collect();
    (dir, paths)
}

#[test]
fn test_noop_leaves_every_file_on_disk() {
    let (dir, paths) = fixture();
    let source = DirectorySource::open(dir.path(), 1024).unwrap();

    let mut strategy = NoOp::new();
    let report = Orchestrator::new().run(&source, &mut strategy).unwrap();

    assert_eq!(report.processed().len(), 3);
    assert_eq!(strategy.recorded(), report.processed());
    assert!(paths.iter().all(|p| p.exists()));
}

#[test]
fn test_standard_removes_every_planned_file() {
    let (dir, paths) = fixture();
    let source = DirectorySource::open(dir.path(), 1024).unwrap();

    let mut strategy = Standard::new();
    let report = Orchestrator::new().run(&source, &mut strategy).unwrap();

    assert_eq!(report.processed(), &paths[2..]);
    assert!(paths[0].exists());
    assert!(paths[1].exists());
    assert!(paths[2..].iter().all(|p| !p.exists()));
    assert_eq!(report.bytes_reclaimed, 9);
}

#[test]
fn test_standard_on_vanished_file() {
    let (dir, paths) = fixture();
    let source = DirectorySource::open(dir.path(), 1024).unwrap();
    fs::remove_file(&paths[3]).unwrap();

    let mut strategy = Standard::new();
    let report = Orchestrator::new().run(&source, &mut strategy).unwrap();

    // 4.txt disappeared between listing and reading, so it is skipped
    assert_eq!(report.summary.unreadable_files(), 1);
    assert_eq!(report.processed(), &[paths[2].clone(), paths[4].clone()]);
}

#[test]
fn test_strategy_names() {
    assert_eq!(NoOp::new().name(), "trial");
    assert_eq!(Standard::new().name(), "standard");
    assert!(matches!(
        Standard::new().delete(&PathBuf::from("/definitely/not/here")),
        Err(DeleteError::NotFound(_))
    ));
}
