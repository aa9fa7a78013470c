//! Fetcher port
//!
//! Defines the interface for retrieving raw page bytes.

use crate::core::error::TransportError;

/// Retrieves the raw HTML of a page
///
/// Implementations own timeouts and status handling: anything but a success
/// response is a [`TransportError`].
pub trait Fetcher: Send + Sync {
    /// Fetch the body at `url`
    fn fetch(&self, url: &str) -> Result<Vec<u8>, TransportError>;
}
