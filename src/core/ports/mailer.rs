//! Mailer port
//!
//! Defines the delivery capability the notifier depends on. Authorization and
//! credential lifecycle live entirely behind implementations.

use crate::core::error::DeliveryError;
use crate::core::models::MailMessage;

/// Delivers one message to its single recipient
pub trait Mailer: Send + Sync {
    /// Send `message`, returning a transport-specific delivery id
    fn deliver(&self, message: &MailMessage) -> Result<String, DeliveryError>;
}

/// Mail transport selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailTransport {
    /// Write `.eml` files into a directory (default)
    #[default]
    Outbox,
    /// Gmail API with a persisted access token
    Gmail,
}

