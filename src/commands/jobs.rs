//! Jobs command - list configured jobs

use sitewatch::output::JobListResult;

use super::Options;

/// List configured jobs
pub fn jobs(options: &Options) -> anyhow::Result<()> {
    let config = options.load_config()?;
    JobListResult { jobs: config.jobs() }.render(options.mode);
    Ok(())
}
