//! Preview command - show the canonical form of one job

use std::path::Path;

use anyhow::anyhow;

use sitewatch::adapters::file::FileSnapshotStore;
use sitewatch::output::ContentResult;
use sitewatch::runner::{JobRunner, canonicalize};

use super::{Options, fetcher, mailer, read_file};

/// Print the canonical form of `name`, from the live page or from `input`
///
/// Nothing is stored and nothing is mailed.
pub fn preview(options: &Options, name: &str, input: Option<&Path>) -> anyhow::Result<()> {
    let config = options.load_config()?;
    let job = config
        .jobs()
        .into_iter()
        .find(|job| job.name == name)
        .ok_or_else(|| anyhow!("no job named {name:?} in {}", options.config.display()))?;
    let ctx = options.run_context(&config);

    let content = match input {
        Some(path) => canonicalize(&job, &read_file(path)?, &ctx.diagnostics)?,
        None => {
            let fetcher = fetcher(&config)?;
            let store = FileSnapshotStore::new(config.snapshot_dir());
            let mailer = mailer(&config)?;
            JobRunner::new(&fetcher, &store, mailer.as_ref(), &ctx).preview(&job)?
        },
    };

    ContentResult {
        job: Some(job.name),
        content,
    }
    .render(options.mode);
    Ok(())
}
