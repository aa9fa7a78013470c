//! Tests for the job runner
//!
//! The runner is exercised with in-memory fakes for the network, the
//! snapshot store and the mail transport.

use sitewatch::core::models::{DropRule, FirstRunPolicy, Job, Selector};
use sitewatch::diagnostics::{Diagnostics, RunContext};
use sitewatch::output::JobStatus;
use sitewatch::runner::JobRunner;
use tempfile::TempDir;

use crate::common::{FakeFetcher, MemoryStore, RecordingMailer, STANDS_PAGE, stands_job};

const URL: &str = "https://example.com/stands/";

fn context(first_run: FirstRunPolicy) -> RunContext {
    RunContext {
        sender: "watch@example.com".to_string(),
        first_run,
        diagnostics: Diagnostics::disabled(),
    }
}

// =============================================================================
// Single Job
// =============================================================================

#[test]
fn first_run_notifies_every_recipient() {
    let fetcher = FakeFetcher::with_page(URL, STANDS_PAGE);
    let store = MemoryStore::default();
    let mailer = RecordingMailer::default();
    let ctx = context(FirstRunPolicy::Notify);
    let runner = JobRunner::new(&fetcher, &store, &mailer, &ctx);

    let report = runner.run_job(&stands_job()).unwrap();
    assert_eq!(report.status, JobStatus::FirstSeen);
    assert_eq!(report.deliveries.len(), 2);

    let sent = mailer.sent();
    assert_eq!(sent[0].to, "a@example.com");
    assert_eq!(sent[1].to, "b@example.com");
    assert_eq!(sent[0].from, "watch@example.com");
    assert_eq!(sent[0].subject, "Stands were updated");
    assert_eq!(Some(sent[0].html_body.clone()), store.get("stands"));
}

#[test]
fn unchanged_page_sends_nothing() {
    let fetcher = FakeFetcher::with_page(URL, STANDS_PAGE);
    let store = MemoryStore::default();
    let mailer = RecordingMailer::default();
    let ctx = context(FirstRunPolicy::Seed);
    let runner = JobRunner::new(&fetcher, &store, &mailer, &ctx);

    assert_eq!(runner.run_job(&stands_job()).unwrap().status, JobStatus::Seeded);
    assert_eq!(runner.run_job(&stands_job()).unwrap().status, JobStatus::Unchanged);
    assert!(mailer.sent().is_empty());
    assert_eq!(store.writes(), 1);
}

#[test]
fn changes_outside_the_selection_are_ignored() {
    let fetcher = FakeFetcher::with_page(URL, STANDS_PAGE);
    let store = MemoryStore::default();
    let mailer = RecordingMailer::default();
    let ctx = context(FirstRunPolicy::Seed);
    let runner = JobRunner::new(&fetcher, &store, &mailer, &ctx);
    runner.run_job(&stands_job()).unwrap();

    let regenerated =
        STANDS_PAGE.replace("Generated 2024-05-01 12:00", "Generated 2024-05-02 08:30");
    fetcher.set_page(URL, &regenerated);
    assert_eq!(runner.run_job(&stands_job()).unwrap().status, JobStatus::Unchanged);
}

#[test]
fn changed_page_mails_the_diff() {
    let fetcher = FakeFetcher::with_page(URL, STANDS_PAGE);
    let store = MemoryStore::default();
    let mailer = RecordingMailer::default();
    let ctx = context(FirstRunPolicy::Seed);
    let runner = JobRunner::new(&fetcher, &store, &mailer, &ctx);
    runner.run_job(&stands_job()).unwrap();

    fetcher.set_page(URL, &STANDS_PAGE.replace("Nissan", "Toyota"));
    let report = runner.run_job(&stands_job()).unwrap();

    assert_eq!(report.status, JobStatus::Changed);
    let sent = mailer.sent();
    assert_eq!(sent.len(), 2);
    assert!(sent[0].html_body.contains("<del>Nissan</del>"));
    assert!(sent[0].html_body.contains("<ins>Toyota</ins>"));
    assert!(store.get("stands").unwrap().contains("Toyota"));
}

#[test]
fn failed_recipient_is_reported_and_others_still_mailed() {
    let fetcher = FakeFetcher::with_page(URL, STANDS_PAGE);
    let store = MemoryStore::default();
    let mailer = RecordingMailer::default();
    let ctx = context(FirstRunPolicy::Notify);
    let runner = JobRunner::new(&fetcher, &store, &mailer, &ctx);

    let mut job = stands_job();
    job.recipients = vec!["bounce@example.com".to_string(), "c@example.com".to_string()];
    let report = runner.run_job(&job).unwrap();

    assert!(report.has_failed_delivery());
    assert_eq!(report.deliveries[0].error.as_deref(), Some("550 mailbox unavailable"));
    assert_eq!(report.deliveries[1].id.as_deref(), Some("msg-1"));
}

#[test]
fn preview_does_not_touch_store_or_mailer() {
    let fetcher = FakeFetcher::with_page(URL, STANDS_PAGE);
    let store = MemoryStore::default();
    let mailer = RecordingMailer::default();
    let ctx = context(FirstRunPolicy::Notify);
    let runner = JobRunner::new(&fetcher, &store, &mailer, &ctx);

    let content = runner.preview(&stands_job()).unwrap();
    assert!(content.contains("Nissan"));
    assert_eq!(store.writes(), 0);
    assert!(mailer.sent().is_empty());
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn selector_mismatch_fails_without_saving() {
    let fetcher = FakeFetcher::with_page(URL, STANDS_PAGE);
    let store = MemoryStore::default();
    let mailer = RecordingMailer::default();
    let ctx = context(FirstRunPolicy::Notify);
    let runner = JobRunner::new(&fetcher, &store, &mailer, &ctx);

    let mut missing = stands_job();
    missing.selector = Selector::new("div").with_attr("class", "sidebar");
    let err = runner.run_job(&missing).unwrap_err();
    assert_eq!(err.kind(), "selection");
    assert!(err.to_string().contains("matched 0 elements"));

    let mut ambiguous = stands_job();
    ambiguous.selector = Selector::new("form");
    let err = runner.run_job(&ambiguous).unwrap_err();
    assert!(err.to_string().contains("matched 2 elements"));

    assert_eq!(store.writes(), 0);
    assert!(mailer.sent().is_empty());
}

#[test]
fn batch_isolates_failing_jobs() {
    let fetcher = FakeFetcher::with_page(URL, STANDS_PAGE);
    let store = MemoryStore::default();
    let mailer = RecordingMailer::default();
    let ctx = context(FirstRunPolicy::Notify);
    let runner = JobRunner::new(&fetcher, &store, &mailer, &ctx);

    let broken = Job::new("broken", "https://example.com/missing", Selector::new("div"));
    let mut whole = Job::new("whole", URL, Selector::default());
    whole.whole_document = true;
    whole.rules.drop = vec![DropRule::tag("script")];

    let batch = runner.run_all(&[broken, stands_job(), whole]);

    assert_eq!(batch.jobs.len(), 3);
    assert_eq!(batch.jobs[0].status, JobStatus::Failed);
    assert_eq!(batch.jobs[0].error_kind.as_deref(), Some("transport"));
    assert!(batch.jobs[0].error.as_deref().unwrap().contains("404"));
    assert_eq!(batch.jobs[1].status, JobStatus::FirstSeen);
    assert_eq!(batch.jobs[2].status, JobStatus::FirstSeen);
    assert_eq!(batch.failed(), 1);
    assert!(store.get("broken").is_none());
}

#[test]
fn debug_artifacts_are_written_per_stage() {
    let temp = TempDir::new().unwrap();
    let fetcher = FakeFetcher::with_page(URL, STANDS_PAGE);
    let store = MemoryStore::default();
    let mailer = RecordingMailer::default();
    let ctx = RunContext {
        diagnostics: Diagnostics::in_dir(temp.path()),
        ..context(FirstRunPolicy::Notify)
    };
    let runner = JobRunner::new(&fetcher, &store, &mailer, &ctx);
    runner.run_job(&stands_job()).unwrap();

    for stage in ["page", "matched", "normalized", "diff"] {
        assert!(temp.path().join(format!("stands.{stage}.html")).exists(), "{stage} missing");
    }
    let page = std::fs::read_to_string(temp.path().join("stands.page.html")).unwrap();
    assert_eq!(page, STANDS_PAGE);
}

#[test]
fn unwritable_debug_dir_does_not_lose_the_notification() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("debug");
    std::fs::write(&blocker, "a file, not a directory").unwrap();

    let fetcher = FakeFetcher::with_page(URL, STANDS_PAGE);
    let store = MemoryStore::default();
    let mailer = RecordingMailer::default();
    let ctx = RunContext {
        diagnostics: Diagnostics::in_dir(&blocker),
        ..context(FirstRunPolicy::Seed)
    };
    let runner = JobRunner::new(&fetcher, &store, &mailer, &ctx);
    assert_eq!(runner.run_job(&stands_job()).unwrap().status, JobStatus::Seeded);

    fetcher.set_page(URL, &STANDS_PAGE.replace("Nissan", "Toyota"));
    let report = runner.run_job(&stands_job()).unwrap();

    assert_eq!(report.status, JobStatus::Changed);
    assert_eq!(mailer.sent().len(), 2);
    assert!(mailer.sent()[0].html_body.contains("<ins>Toyota</ins>"));
}
