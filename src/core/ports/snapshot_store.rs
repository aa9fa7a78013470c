//! Snapshot store port
//!
//! Defines the interface for persisting the last canonical form of each job.

use crate::core::error::StorageError;

/// Durable storage for snapshots, keyed by job name
///
/// Writes must be atomic: after a failed `save` the previous snapshot (or its
/// absence) is still what `load` returns.
pub trait SnapshotStore: Send + Sync {
    /// Last stored snapshot for `job_name`, or `None` on first run
    fn load(&self, job_name: &str) -> Result<Option<String>, StorageError>;

    /// Replace the snapshot for `job_name`
    fn save(&self, job_name: &str, content: &str) -> Result<(), StorageError>;
}
