//! Gmail API transport
//!
//! Sends through `users/me/messages/send` with a bearer token read from the
//! persisted token file on every delivery. Obtaining and refreshing that
//! token is done by an external authorization flow; an absent or unreadable
//! token is a delivery error.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use chrono::Utc;
use log::debug;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use super::mime;
use crate::core::error::DeliveryError;
use crate::core::models::MailMessage;
use crate::core::ports::Mailer;

/// Gmail API send endpoint
pub const SEND_ENDPOINT: &str = "https://gmail.googleapis.com/gmail/v1/users/me/messages/send";

#[derive(Debug, Deserialize)]
struct StoredToken {
    access_token: String,
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    raw: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: String,
}

/// Delivers through the Gmail REST API
#[derive(Debug, Clone)]
pub struct GmailMailer {
    client: Client,
    token_file: PathBuf,
    endpoint: String,
}

impl GmailMailer {
    /// Create a mailer reading its access token from `token_file`
    pub fn new(token_file: impl Into<PathBuf>, timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            token_file: token_file.into(),
            endpoint: SEND_ENDPOINT.to_string(),
        })
    }

    /// Send to a different endpoint (API proxy or test server)
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Token file location
    #[must_use]
    pub fn token_file(&self) -> &Path {
        &self.token_file
    }

    fn access_token(&self) -> Result<String, String> {
        let content = fs::read_to_string(&self.token_file).map_err(|e| {
            format!("no authorization token at {}: {e}", self.token_file.display())
        })?;
        let token: StoredToken = serde_json::from_str(&content)
            .map_err(|e| format!("invalid token file {}: {e}", self.token_file.display()))?;
        Ok(token.access_token)
    }
}

impl Mailer for GmailMailer {
    fn deliver(&self, message: &MailMessage) -> Result<String, DeliveryError> {
        let fail = |cause: String| DeliveryError::new(&message.to, cause);

        let token = self.access_token().map_err(fail)?;
        let raw = URL_SAFE.encode(mime::render(message, Utc::now()));

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&SendRequest { raw: &raw })
            .send()
            .map_err(|e| fail(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(fail(format!(
                "Gmail API returned HTTP {}: {}",
                status.as_u16(),
                detail.trim()
            )));
        }

        let sent: SendResponse = response.json().map_err(|e| fail(e.to_string()))?;
        debug!("gmail accepted message {} for {}", sent.id, message.to);
        Ok(sent.id)
    }
}
