//! Outbox transport
//!
//! Writes every message as an `.eml` file into a directory, for local use or
//! for a separate mail relay to pick up.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;

use super::mime;
use crate::core::error::DeliveryError;
use crate::core::models::MailMessage;
use crate::core::ports::Mailer;

/// Drops rendered messages into a directory
#[derive(Debug)]
pub struct OutboxMailer {
    dir: PathBuf,
    sequence: AtomicUsize,
}

impl OutboxMailer {
    /// Write messages into `dir` (created on first delivery)
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            sequence: AtomicUsize::new(0),
        }
    }

    /// Outbox directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Recipient address reduced to filename-safe characters
fn address_to_filename(address: &str) -> String {
    address
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect()
}

impl Mailer for OutboxMailer {
    fn deliver(&self, message: &MailMessage) -> Result<String, DeliveryError> {
        let now = Utc::now();
        let failed =
            |e: io::Error| DeliveryError::new(&message.to, format!("{}: {e}", self.dir.display()));
        fs::create_dir_all(&self.dir).map_err(failed)?;

        // Earlier runs may have used the same timestamp and sequence number.
        let (name, mut file) = loop {
            let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
            let name = format!(
                "{}-{seq:04}-{}.eml",
                now.format("%Y%m%dT%H%M%S"),
                address_to_filename(&message.to)
            );
            match OpenOptions::new().write(true).create_new(true).open(self.dir.join(&name)) {
                Ok(file) => break (name, file),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {},
                Err(e) => return Err(failed(e)),
            }
        };

        file.write_all(mime::render(message, now).as_bytes()).map_err(failed)?;
        Ok(name)
    }
}
