//! The ordered list of files judged redundant.
//!
//! # Overview
//!
//! A [`DeletionPlan`] is built by the detector in enumeration order. Each
//! entry remembers the survivor it duplicates, so the plan can be reported
//! as "`b.txt` duplicates `a.txt`" without hashing anything twice.
//!
//! # Example
//!
//! ```
//! use dupsweep::duplicates::{DeletionPlan, PlannedDeletion};
//! use dupsweep::scanner::{CandidatePath, Fingerprint};
//! use std::path::PathBuf;
//!
//! let mut plan = DeletionPlan::new();
//! plan.push(PlannedDeletion::new(
//!     CandidatePath::new("/dir/copy.txt", 5),
//!     Fingerprint::of(b"hello"),
//!     PathBuf::from("/dir/original.txt"),
//! ));
//!
//! assert_eq!(plan.len(), 1);
//! assert_eq!(plan.reclaimable_bytes(), 5);
//! assert_eq!(plan.paths(), vec![PathBuf::from("/dir/copy.txt")]);
//! ```

use std::path::{Path, PathBuf};

use crate::scanner::{CandidatePath, Fingerprint};

/// One redundant file and the first occurrence it duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedDeletion {
    /// The redundant file
    pub candidate: CandidatePath,
    /// Content fingerprint shared with the survivor
    pub fingerprint: Fingerprint,
    /// Path of the first occurrence, which is kept
    pub original: PathBuf,
}

impl PlannedDeletion {
    /// Create a new plan entry.
    #[must_use]
    pub fn new(candidate: CandidatePath, fingerprint: Fingerprint, original: PathBuf) -> Self {
        Self {
            candidate,
            fingerprint,
            original,
        }
    }

    /// Path scheduled for removal.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.candidate.path
    }
}

/// Redundant files in enumeration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionPlan {
    entries: Vec<PlannedDeletion>,
}

impl DeletionPlan {
    /// Create an empty plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Entries stay in insertion order.
    pub fn push(&mut self, entry: PlannedDeletion) {
        self.entries.push(entry);
    }

    /// Number of files scheduled for removal.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, PlannedDeletion> {
        self.entries.iter()
    }

    /// Paths scheduled for removal, in order.
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        self.entries.iter().map(|e| e.candidate.path.clone()).collect()
    }

    /// Bytes freed if every entry is removed.
    #[must_use]
    pub fn reclaimable_bytes(&self) -> u64 {
        self.entries.iter().map(|e| e.candidate.size).sum()
    }
}

impl IntoIterator for DeletionPlan {
    type Item = PlannedDeletion;
    type IntoIter = std::vec::IntoIter<PlannedDeletion>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a DeletionPlan {
    type Item = &'a PlannedDeletion;
    type IntoIter = std::slice::Iter<'a, PlannedDeletion>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
