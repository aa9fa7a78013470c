//! HTTP fetcher adapter
//!
//! Implements [`Fetcher`] with a blocking `reqwest` client. Every request is
//! bounded by the configured timeout.

use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;

use crate::core::error::TransportError;
use crate::core::ports::Fetcher;

/// Default `User-Agent` header
pub const DEFAULT_USER_AGENT: &str = concat!("sitewatch/", env!("CARGO_PKG_VERSION"));

/// Blocking HTTP fetcher
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a fetcher with the given timeout and user agent
    pub fn new(timeout: Duration, user_agent: &str) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).user_agent(user_agent).build()?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        let network = |e: reqwest::Error| TransportError::Network {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self.client.get(url).send().map_err(network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(network)?;
        debug!("GET {url}: {} bytes", body.len());
        Ok(body.to_vec())
    }
}
