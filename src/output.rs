//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable status lines or machine-parseable JSON.

use colored::Colorize;
use serde::Serialize;

use crate::core::models::Job;
use crate::core::services::Delivery;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Final state of one job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Content differed from the snapshot
    Changed,
    /// No snapshot existed; full content was reported
    FirstSeen,
    /// No snapshot existed; baseline stored silently
    Seeded,
    /// Content equals the snapshot
    Unchanged,
    /// The job aborted
    Failed,
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Changed => write!(f, "changed"),
            Self::FirstSeen => write!(f, "first-seen"),
            Self::Seeded => write!(f, "seeded"),
            Self::Unchanged => write!(f, "unchanged"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Result of one job
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobReport {
    /// Job name
    pub name: String,
    /// Final state
    pub status: JobStatus,
    /// Failure kind (`transport`, `selection`, ...) when failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
    /// Failure cause when failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Per-recipient delivery results
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub deliveries: Vec<Delivery>,
}

impl JobReport {
    /// Report without error or deliveries
    #[must_use]
    pub fn new(name: &str, status: JobStatus) -> Self {
        Self {
            name: name.to_string(),
            status,
            error_kind: None,
            error: None,
            deliveries: Vec::new(),
        }
    }

    /// Whether any recipient could not be reached
    #[must_use]
    pub fn has_failed_delivery(&self) -> bool {
        self.deliveries.iter().any(|d| !d.delivered())
    }
}

/// Result of a `run`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    /// One report per attempted job, in configuration order
    pub jobs: Vec<JobReport>,
}

impl BatchReport {
    /// Number of jobs that aborted
    #[must_use]
    pub fn failed(&self) -> usize {
        self.jobs.iter().filter(|j| j.status == JobStatus::Failed).count()
    }

    /// Number of jobs that reported a change
    #[must_use]
    pub fn changed(&self) -> usize {
        self.jobs
            .iter()
            .filter(|j| matches!(j.status, JobStatus::Changed | JobStatus::FirstSeen))
            .count()
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        if self.jobs.is_empty() {
            println!("No jobs configured.");
            return;
        }

        for job in &self.jobs {
            let status = match job.status {
                JobStatus::Changed | JobStatus::FirstSeen => job.status.to_string().green().bold(),
                JobStatus::Seeded | JobStatus::Unchanged => job.status.to_string().normal(),
                JobStatus::Failed => job.status.to_string().red().bold(),
            };
            match &job.error {
                Some(error) => println!("{}: {status}: {error}", job.name),
                None => println!("{}: {status}", job.name),
            }
            for delivery in &job.deliveries {
                match (&delivery.id, &delivery.error) {
                    (Some(id), _) => {
                        println!("  {}: {} ({id})", delivery.recipient, "delivered".green());
                    },
                    (None, error) => println!(
                        "  {}: {}: {}",
                        delivery.recipient,
                        "failed".red(),
                        error.as_deref().unwrap_or("unknown error")
                    ),
                }
            }
        }

        println!(
            "\n{} job(s): {} changed, {} failed",
            self.jobs.len(),
            self.changed(),
            self.failed()
        );
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

/// Result of a `jobs` listing
#[derive(Debug, Serialize)]
pub struct JobListResult {
    /// Configured jobs
    pub jobs: Vec<Job>,
}

impl JobListResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        if self.jobs.is_empty() {
            println!("No jobs configured.");
            return;
        }

        println!("Jobs:\n");
        for job in &self.jobs {
            println!("  [{}] {}", job.name, job.title);
            println!("  URL: {}", job.url);
            if job.whole_document {
                println!("  Watching: whole document");
            } else {
                println!("  Watching: {}", job.selector);
            }
            println!("  Recipients: {}\n", job.recipients.len());
        }
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

/// A piece of HTML produced by `preview` or `diff`
#[derive(Debug, Serialize)]
pub struct ContentResult {
    /// Job the content belongs to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job: Option<String>,
    /// The HTML
    pub content: String,
}

impl ContentResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => print!("{}", self.content),
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}
