//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between the core logic and the
//! external collaborators (network, filesystem, mail transport).
//!
//! Implementations live in the `adapters` module; tests substitute in-memory
//! fakes.

mod fetcher;
mod mailer;
mod snapshot_store;

pub use fetcher::Fetcher;
pub use mailer::{MailTransport, Mailer};
pub use snapshot_store::SnapshotStore;
