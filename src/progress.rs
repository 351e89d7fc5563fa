//! Progress-callback trait for per-file classification events.
//!
//! Inject an [`Arc<dyn SortProgress>`] via
//! [`crate::config::ClassifyConfigBuilder::progress`] to receive an event as
//! each file is picked up, classified, or skipped. The CLI uses this to drive
//! its progress bar; library callers can forward events anywhere without the
//! library knowing how the host application communicates.
//!
//! All methods have default no-op implementations, so implementors override
//! only what they care about. Classification is strictly sequential, but the
//! trait is `Send + Sync` so callbacks can be shared across tasks.

use crate::classify::SortSummary;
use std::sync::Arc;

/// Called by the classification pipeline as it processes each file.
pub trait SortProgress: Send + Sync {
    /// Called once after enumeration, before the first file is processed.
    fn on_start(&self, _total_files: usize) {}

    /// Called when a file is picked up, before its model call.
    fn on_file_start(&self, _name: &str) {}

    /// Called after a file is classified. `meaningful` mirrors whether the
    /// file was copied to the output folder.
    fn on_file_classified(&self, _name: &str, _meaningful: bool) {}

    /// Called when a file fails and is skipped. The batch continues.
    fn on_file_error(&self, _name: &str, _error: &str) {}

    /// Called once after the last file, with the final counters.
    fn on_complete(&self, _summary: &SortSummary) {}
}

/// Convenience alias for a shared progress callback.
pub type Progress = Arc<dyn SortProgress>;
