//! Error taxonomy
//!
//! Each kind is fatal to the scope it names (one job, or one recipient) and
//! is caught at the runner boundary.

use std::path::PathBuf;

use thiserror::Error;

/// The selector did not match exactly one element
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{selector} matched {found} elements, expected exactly one")]
pub struct SelectionError {
    /// Rendered selector
    pub selector: String,
    /// Number of matching elements
    pub found: usize,
}

/// Fetching the page failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The server answered with a non-success status
    #[error("GET {url} returned HTTP {status}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// The request could not be completed
    #[error("GET {url} failed: {message}")]
    Network {
        /// Requested URL
        url: String,
        /// Underlying cause
        message: String,
    },
}

/// Reading or writing a snapshot failed
#[derive(Debug, Error)]
pub enum StorageError {
    /// Snapshot exists but could not be read
    #[error("cannot read snapshot {}: {source}", path.display())]
    Read {
        /// Snapshot location
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Snapshot could not be written; the previous content is intact
    #[error("cannot write snapshot {}: {source}", path.display())]
    Write {
        /// Snapshot location
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

/// Delivering a notification to one recipient failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("delivery to {recipient} failed: {message}")]
pub struct DeliveryError {
    /// Recipient address
    pub recipient: String,
    /// Underlying cause
    pub message: String,
}

impl DeliveryError {
    /// Create a delivery error
    #[must_use]
    pub fn new(recipient: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            message: message.into(),
        }
    }
}

/// Anything that aborts a single job
#[derive(Debug, Error)]
pub enum JobError {
    /// Fetch failed
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Selector mismatch
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Snapshot I/O failed
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Page could not be parsed into a tree
    #[error("cannot parse page: {0}")]
    Parse(String),
}

impl JobError {
    /// Short machine-readable kind
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::Selection(_) => "selection",
            Self::Storage(_) => "storage",
            Self::Parse(_) => "parse",
        }
    }
}
