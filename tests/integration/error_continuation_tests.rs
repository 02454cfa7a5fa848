use dupsweep::actions::{DeleteError, DeletionStrategy, NoOp};
use dupsweep::duplicates::DuplicateDetector;
use dupsweep::orchestrator::Orchestrator;
use dupsweep::scanner::{CandidatePath, FileSource, ReadError};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// In-memory source where some paths fail to read.
#[derive(Default)]
struct FlakySource {
    order: Vec<CandidatePath>,
    contents: HashMap<PathBuf, Vec<u8>>,
}

impl FlakySource {
    fn file(mut self, name: &str, content: &[u8]) -> Self {
        let path = PathBuf::from(name);
        self.order
            .push(CandidatePath::new(&path, content.len() as u64));
        self.contents.insert(path, content.to_vec());
        self
    }

    fn unreadable(mut self, name: &str) -> Self {
        self.order.push(CandidatePath::new(name, 10));
        self
    }
}

impl FileSource for FlakySource {
    fn list_candidates(&self) -> Vec<CandidatePath> {
        self.order.clone()
    }

    fn read_content(&self, path: &Path) -> Result<Vec<u8>, ReadError> {
        self.contents.get(path).cloned().ok_or_else(|| {
            ReadError::from_io(path, io::Error::from(io::ErrorKind::PermissionDenied))
        })
    }
}

/// Rejects every path whose name starts with "locked".
#[derive(Default)]
struct Picky {
    deleted: Vec<PathBuf>,
}

impl DeletionStrategy for Picky {
    fn delete(&mut self, path: &Path) -> Result<(), DeleteError> {
        if path.to_string_lossy().starts_with("locked") {
            return Err(DeleteError::PermissionDenied(path.to_path_buf()));
        }
        self.deleted.push(path.to_path_buf());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "picky"
    }
}

#[test]
fn test_detection_continues_past_unreadable_files() {
    let source = FlakySource::default()
        .file("a", b"one")
        .unreadable("b")
        .file("c", b"one")
        .unreadable("d")
        .file("e", b"two");

    let (plan, summary) = DuplicateDetector::new().detect(&source);

    assert_eq!(plan.paths(), vec![PathBuf::from("c")]);
    assert_eq!(summary.files_checked, 5);
    assert_eq!(summary.unreadable_files(), 2);
    for err in &summary.read_errors {
        match err {
            ReadError::PermissionDenied(_) => {}
            other => panic!("Expected PermissionDenied, got: {:?}", other),
        }
    }
}

#[test]
fn test_unreadable_original_does_not_protect_copy() {
    // The unreadable file is never fingerprinted, so the next copy survives
    let source = FlakySource::default()
        .unreadable("a")
        .file("b", b"same")
        .file("c", b"same");

    let (plan, _) = DuplicateDetector::new().detect(&source);

    assert_eq!(plan.paths(), vec![PathBuf::from("c")]);
}

#[test]
fn test_failing_delete_does_not_stop_later_deletes() {
    let source = FlakySource::default()
        .file("keep", b"x")
        .file("locked-1", b"x")
        .file("then", b"x")
        .file("locked-2", b"x")
        .file("last", b"x");

    let mut strategy = Picky::default();
    let report = Orchestrator::new().run(&source, &mut strategy).unwrap();

    assert_eq!(
        strategy.deleted,
        vec![PathBuf::from("then"), PathBuf::from("last")]
    );
    assert_eq!(report.processed(), &strategy.deleted[..]);
    let failed: Vec<_> = report.failures.iter().map(|f| f.path.clone()).collect();
    assert_eq!(
        failed,
        vec![PathBuf::from("locked-1"), PathBuf::from("locked-2")]
    );
    assert_eq!(report.bytes_reclaimed, 2);
}

#[test]
fn test_noop_over_source_with_errors() {
    let source = FlakySource::default()
        .file("a", b"1")
        .unreadable("b")
        .file("c", b"1");

    let mut strategy = NoOp::new();
    let report = Orchestrator::new().run(&source, &mut strategy).unwrap();

    assert_eq!(strategy.recorded(), &[PathBuf::from("c")]);
    assert!(!report.is_complete());
}
