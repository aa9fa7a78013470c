//! Change detector - compares canonical content with the stored snapshot
//!
//! | stored snapshot | result                                         |
//! |-----------------|------------------------------------------------|
//! | absent          | save, report `FirstSeen` (or nothing if seeding) |
//! | identical       | nothing is written, nothing is reported        |
//! | different       | save, report `Modified` with an inline diff    |
//!
//! The diff is computed before the snapshot is replaced, so a failed write
//! leaves the old snapshot in place and reports nothing.

use log::debug;

use super::diff::html_diff;
use crate::core::error::StorageError;
use crate::core::models::{ChangeKind, ChangeReport, FirstRunPolicy};
use crate::core::ports::SnapshotStore;

/// Outcome of one comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// Content equals the snapshot
    Unchanged,
    /// First run under [`FirstRunPolicy::Seed`]: baseline stored silently
    Seeded,
    /// Content differs (or is new) and must be reported
    Changed(ChangeReport),
}

/// Compares new content against the snapshot store
pub struct ChangeDetector<'a> {
    store: &'a dyn SnapshotStore,
    first_run: FirstRunPolicy,
}

impl std::fmt::Debug for ChangeDetector<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeDetector").field("first_run", &self.first_run).finish_non_exhaustive()
    }
}

impl<'a> ChangeDetector<'a> {
    /// Create a detector over `store`
    #[must_use]
    pub fn new(store: &'a dyn SnapshotStore, first_run: FirstRunPolicy) -> Self {
        Self { store, first_run }
    }

    /// Compare `content` with the snapshot of `job_name`, updating it on change
    pub fn detect(&self, job_name: &str, content: &str) -> Result<Detection, StorageError> {
        let detection = match self.store.load(job_name)? {
            Some(old) if old == content => {
                debug!("{job_name}: content identical to snapshot");
                return Ok(Detection::Unchanged);
            },
            Some(old) => Detection::Changed(ChangeReport {
                job_name: job_name.to_string(),
                kind: ChangeKind::Modified,
                diff_text: html_diff(&old, content),
            }),
            None if self.first_run == FirstRunPolicy::Seed => Detection::Seeded,
            None => Detection::Changed(ChangeReport {
                job_name: job_name.to_string(),
                kind: ChangeKind::FirstSeen,
                diff_text: content.to_string(),
            }),
        };

        self.store.save(job_name, content)?;
        debug!("{job_name}: snapshot updated");
        Ok(detection)
    }
}
