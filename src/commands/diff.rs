//! Diff command - inline diff of two HTML files

use std::path::Path;

use sitewatch::core::services::html_diff;
use sitewatch::output::{ContentResult, OutputMode};

use super::read_file;

/// Print the inline diff of `old` and `new`
pub fn diff(old: &Path, new: &Path, mode: OutputMode) -> anyhow::Result<()> {
    let old = String::from_utf8_lossy(&read_file(old)?).into_owned();
    let new = String::from_utf8_lossy(&read_file(new)?).into_owned();
    ContentResult {
        job: None,
        content: html_diff(&old, &new),
    }
    .render(mode);
    Ok(())
}
