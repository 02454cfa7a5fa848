//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Single-pass, first-occurrence-wins duplicate detection
//! - The ordered deletion plan handed to a deletion strategy

pub mod detector;
pub mod plan;

pub use detector::{DetectionSummary, DuplicateDetector};
pub use plan::{DeletionPlan, PlannedDeletion};
