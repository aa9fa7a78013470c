//! Diagnostics and run context
//!
//! Debug output is configured once at the top of a run and carried in the
//! [`RunContext`] handed to the runner.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::core::models::FirstRunPolicy;
use crate::paths;

/// Intermediate artifact of a job run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Raw fetched page
    Page,
    /// Selected element before any transformation
    Matched,
    /// Canonical form after normalization
    Normalized,
    /// Rendered diff of a detected change
    Diff,
}

impl Stage {
    /// File name component of the stage
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Matched => "matched",
            Self::Normalized => "normalized",
            Self::Diff => "diff",
        }
    }
}

/// Where (and whether) to write intermediate artifacts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    artifact_dir: Option<PathBuf>,
}

impl Diagnostics {
    /// No artifacts are written
    #[must_use]
    pub const fn disabled() -> Self {
        Self { artifact_dir: None }
    }

    /// Write artifacts into `dir`
    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            artifact_dir: Some(dir.into()),
        }
    }

    /// Artifact directory, when enabled
    #[must_use]
    pub fn artifact_dir(&self) -> Option<&Path> {
        self.artifact_dir.as_deref()
    }

    /// Write one artifact; a no-op when disabled
    ///
    /// Failures are logged and never affect the job.
    pub fn record(&self, job_name: &str, stage: Stage, content: &[u8]) {
        let Some(dir) = &self.artifact_dir else {
            return;
        };
        let path = paths::artifact_file(dir, job_name, stage.as_str());
        match fs::create_dir_all(dir).and_then(|()| fs::write(&path, content)) {
            Ok(()) => debug!("{job_name}: wrote {}", path.display()),
            Err(e) => warn!("{job_name}: cannot write debug artifact {}: {e}", path.display()),
        }
    }
}

/// Immutable settings shared by every job of a run
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    /// Sender identity for notifications
    pub sender: String,
    /// Behaviour for jobs without a snapshot
    pub first_run: FirstRunPolicy,
    /// Debug artifact output
    pub diagnostics: Diagnostics,
}
