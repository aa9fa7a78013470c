//! Message rendering
//!
//! Produces a single-part `text/html` message with a base64 body. Headers
//! carrying non-ASCII text are RFC 2047 encoded.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};

use crate::core::models::MailMessage;

/// Maximum body line length required by RFC 2045
const LINE_WIDTH: usize = 76;

/// Render `message` as it would be handed to a mail transport
#[must_use]
pub fn render(message: &MailMessage, date: DateTime<Utc>) -> String {
    let mut out = String::new();
    header(&mut out, "From", &message.from);
    header(&mut out, "To", &message.to);
    header(&mut out, "Subject", &encode_word(&message.subject));
    header(&mut out, "Date", &date.to_rfc2822());
    header(&mut out, "MIME-Version", "1.0");
    header(&mut out, "Content-Type", "text/html; charset=\"utf-8\"");
    header(&mut out, "Content-Transfer-Encoding", "base64");
    out.push_str("\r\n");

    let body = STANDARD.encode(message.html_body.as_bytes());
    for line in body.as_bytes().chunks(LINE_WIDTH) {
        // base64 output is ASCII, so every chunk is valid UTF-8
        out.push_str(&String::from_utf8_lossy(line));
        out.push_str("\r\n");
    }
    out
}

fn header(out: &mut String, name: &str, value: &str) {
    out.push_str(name);
    out.push_str(": ");
    out.push_str(value);
    out.push_str("\r\n");
}

/// RFC 2047 encoded-word for non-ASCII header text
#[must_use]
pub fn encode_word(text: &str) -> String {
    if text.is_ascii() && !text.contains(['\r', '\n']) {
        text.to_string()
    } else {
        format!("=?utf-8?B?{}?=", STANDARD.encode(text.as_bytes()))
    }
}
