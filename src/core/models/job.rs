//! Job model
//!
//! A job is one watched page: where to fetch it, which element to keep, how to
//! normalize it and who to tell when it changes.

use serde::Serialize;

use super::{NormalizeRules, Selector};

/// One configured unit of work
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Job {
    /// Unique name, also the snapshot key
    pub name: String,
    /// Display title, used as mail subject
    pub title: String,
    /// Page to fetch
    pub url: String,
    /// Element to watch, ignored in whole-document mode
    pub selector: Selector,
    /// Watch the entire document instead of the selected element
    pub whole_document: bool,
    /// Normalization rules
    #[serde(skip)]
    pub rules: NormalizeRules,
    /// Mail recipients
    pub recipients: Vec<String>,
}

impl Job {
    /// Create a job with empty rules and no recipients
    #[must_use]
    pub fn new(name: &str, url: &str, selector: Selector) -> Self {
        Self {
            name: name.to_string(),
            title: name.to_string(),
            url: url.to_string(),
            selector,
            whole_document: false,
            rules: NormalizeRules::default(),
            recipients: Vec::new(),
        }
    }
}

/// What to do when a job has no stored snapshot yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirstRunPolicy {
    /// Report the full content as a change and notify
    #[default]
    Notify,
    /// Store the baseline silently
    Seed,
}

impl std::fmt::Display for FirstRunPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Notify => write!(f, "notify"),
            Self::Seed => write!(f, "seed"),
        }
    }
}

/// Kind of detected change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// No snapshot existed; the diff is the full content
    FirstSeen,
    /// The stored snapshot differed
    Modified,
}

/// A detected change, consumed by the notifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeReport {
    /// Job the change belongs to
    pub job_name: String,
    /// Kind of change
    pub kind: ChangeKind,
    /// Rendered HTML diff (or the full content on first sight)
    pub diff_text: String,
}

/// An outbound HTML mail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    /// Sender identity
    pub from: String,
    /// Single recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// HTML body
    pub html_body: String,
}
