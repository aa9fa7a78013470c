//! Job runner - drives each job through fetch, canonicalize, detect, notify
//!
//! Jobs are independent. A failing job is logged and reported, and the batch
//! moves on to the next one.

use log::{debug, error, info};

use crate::adapters::html::parse_document;
use crate::core::error::JobError;
use crate::core::models::{ChangeKind, Job};
use crate::core::ports::{Fetcher, Mailer, SnapshotStore};
use crate::core::services::{
    ChangeDetector, Detection, normalize, notify, to_pretty_html, working_document,
};
use crate::diagnostics::{Diagnostics, RunContext, Stage};
use crate::output::{BatchReport, JobReport, JobStatus};

/// Canonical form of `page` for `job`
///
/// Parses the page, reduces it to the watched element (or keeps the whole
/// document), normalizes it and serializes the result. Intermediate stages
/// are recorded when diagnostics are enabled.
pub fn canonicalize(job: &Job, page: &[u8], diagnostics: &Diagnostics) -> Result<String, JobError> {
    diagnostics.record(&job.name, Stage::Page, page);

    let doc = parse_document(page)?;
    let mut doc = working_document(doc, &job.selector, job.whole_document)?;
    diagnostics.record(&job.name, Stage::Matched, to_pretty_html(&doc).as_bytes());

    let stats = normalize(&mut doc, &job.rules);
    debug!(
        "{}: dropped {}, renamed {}, removed {} comment(s) and {} attribute(s), fixed {} link(s)",
        job.name, stats.dropped, stats.renamed, stats.comments, stats.attributes, stats.links
    );

    let content = to_pretty_html(&doc);
    diagnostics.record(&job.name, Stage::Normalized, content.as_bytes());
    Ok(content)
}

/// Runs jobs against a fetcher, a snapshot store and a mailer
pub struct JobRunner<'a> {
    fetcher: &'a dyn Fetcher,
    store: &'a dyn SnapshotStore,
    mailer: &'a dyn Mailer,
    ctx: &'a RunContext,
}

impl std::fmt::Debug for JobRunner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobRunner").field("ctx", &self.ctx).finish_non_exhaustive()
    }
}

impl<'a> JobRunner<'a> {
    /// Create a runner
    #[must_use]
    pub fn new(
        fetcher: &'a dyn Fetcher,
        store: &'a dyn SnapshotStore,
        mailer: &'a dyn Mailer,
        ctx: &'a RunContext,
    ) -> Self {
        Self {
            fetcher,
            store,
            mailer,
            ctx,
        }
    }

    /// Fetch and canonicalize without touching the snapshot or mailing
    pub fn preview(&self, job: &Job) -> Result<String, JobError> {
        let page = self.fetcher.fetch(&job.url)?;
        canonicalize(job, &page, &self.ctx.diagnostics)
    }

    /// Run one job end to end
    pub fn run_job(&self, job: &Job) -> Result<JobReport, JobError> {
        debug!("{}: fetching {}", job.name, job.url);
        let page = self.fetcher.fetch(&job.url)?;
        let content = canonicalize(job, &page, &self.ctx.diagnostics)?;

        let detector = ChangeDetector::new(self.store, self.ctx.first_run);
        let report = match detector.detect(&job.name, &content)? {
            Detection::Unchanged => {
                info!("{}: unchanged", job.name);
                JobReport::new(&job.name, JobStatus::Unchanged)
            },
            Detection::Seeded => {
                info!("{}: seeded baseline snapshot", job.name);
                JobReport::new(&job.name, JobStatus::Seeded)
            },
            Detection::Changed(change) => {
                self.ctx.diagnostics.record(&job.name, Stage::Diff, change.diff_text.as_bytes());
                let status = match change.kind {
                    ChangeKind::FirstSeen => JobStatus::FirstSeen,
                    ChangeKind::Modified => JobStatus::Changed,
                };
                info!("{}: {status}, notifying {} recipient(s)", job.name, job.recipients.len());
                let mut report = JobReport::new(&job.name, status);
                report.deliveries = notify(self.mailer, &self.ctx.sender, job, &change);
                report
            },
        };
        Ok(report)
    }

    /// Run every job in order, isolating failures
    #[must_use]
    pub fn run_all(&self, jobs: &[Job]) -> BatchReport {
        let mut batch = BatchReport::default();
        for job in jobs {
            let report = self.run_job(job).unwrap_or_else(|err| {
                error!("{}: {} error: {err}", job.name, err.kind());
                let mut report = JobReport::new(&job.name, JobStatus::Failed);
                report.error_kind = Some(err.kind().to_string());
                report.error = Some(err.to_string());
                report
            });
            batch.jobs.push(report);
        }
        batch
    }
}
