//! Run command - execute configured jobs once

use std::process::ExitCode;

use anyhow::bail;
use log::info;

use sitewatch::adapters::file::FileSnapshotStore;
use sitewatch::runner::JobRunner;

use super::{Options, fetcher, mailer};

/// Run every selected job and report the outcome
///
/// Job failures are reported, not returned; with `strict` they turn the exit
/// status into a failure.
pub fn run(options: &Options, strict: bool, only: &[String]) -> anyhow::Result<ExitCode> {
    let config = options.load_config()?;
    let mut jobs = config.jobs();

    if !only.is_empty() {
        if let Some(unknown) = only.iter().find(|name| !jobs.iter().any(|j| &j.name == *name)) {
            bail!("no job named {unknown:?} in {}", options.config.display());
        }
        jobs.retain(|job| only.contains(&job.name));
    }

    let ctx = options.run_context(&config);
    let fetcher = fetcher(&config)?;
    let store = FileSnapshotStore::new(config.snapshot_dir());
    let mailer = mailer(&config)?;

    info!("running {} job(s), first run policy: {}", jobs.len(), config.first_run);
    let runner = JobRunner::new(&fetcher, &store, mailer.as_ref(), &ctx);
    let batch = runner.run_all(&jobs);
    batch.render(options.mode);

    if strict && batch.failed() > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
