//! File-based snapshot storage
//!
//! Implements `SnapshotStore` with one plain-text file per job.

mod store;

pub use store::FileSnapshotStore;
