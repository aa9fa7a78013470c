//! Notifier - turns a change report into one mail per recipient
//!
//! Recipients are independent: a failed delivery is recorded and logged, and
//! the remaining recipients are still tried.

use log::{error, info};
use serde::Serialize;

use crate::core::models::{ChangeReport, Job, MailMessage};
use crate::core::ports::Mailer;

/// Result of delivering to one recipient
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delivery {
    /// Recipient address
    pub recipient: String,
    /// Transport delivery id on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Failure cause
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Delivery {
    /// Whether the message was accepted by the transport
    #[must_use]
    pub const fn delivered(&self) -> bool {
        self.id.is_some()
    }
}

/// The message sent to `recipient` for `report`
#[must_use]
pub fn compose(sender: &str, job: &Job, report: &ChangeReport, recipient: &str) -> MailMessage {
    MailMessage {
        from: sender.to_string(),
        to: recipient.to_string(),
        subject: job.title.clone(),
        html_body: report.diff_text.clone(),
    }
}

/// Deliver `report` to every recipient of `job`
pub fn notify(
    mailer: &dyn Mailer,
    sender: &str,
    job: &Job,
    report: &ChangeReport,
) -> Vec<Delivery> {
    job.recipients
        .iter()
        .map(|recipient| {
            let message = compose(sender, job, report, recipient);
            match mailer.deliver(&message) {
                Ok(id) => {
                    info!("{}: delivered to {recipient} ({id})", job.name);
                    Delivery {
                        recipient: recipient.clone(),
                        id: Some(id),
                        error: None,
                    }
                },
                Err(err) => {
                    error!("{}: {err}", job.name);
                    Delivery {
                        recipient: recipient.clone(),
                        id: None,
                        error: Some(err.message),
                    }
                },
            }
        })
        .collect()
}
