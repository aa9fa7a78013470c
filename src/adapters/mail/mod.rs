//! Mail transport adapters
//!
//! - [`mime`] - RFC 5322 / MIME rendering of a [`MailMessage`](crate::core::models::MailMessage)
//! - [`GmailMailer`] - Gmail API with an externally authorized access token
//! - [`OutboxMailer`] - `.eml` files in a directory

mod gmail;
pub mod mime;
mod outbox;

pub use gmail::GmailMailer;
pub use outbox::OutboxMailer;
