//! Centralized path definitions for sitewatch
//!
//! This module provides a single source of truth for every file name the
//! tool reads or writes.
//!
//! ## Storage Layout
//!
//! ```text
//! ./                                   # directory of the config file
//! ├── sitewatch.toml                   # job configuration
//! ├── token.json                       # gmail transport credential (external)
//! ├── snapshots/                       # snapshot_dir
//! │   ├── content_stands.html          # last canonical form of job "stands"
//! │   └── content_news.html
//! └── outbox/                          # outbox transport
//!     └── 20240501T120000-0000-you_example.com.eml
//! ```
//!
//! With `--debug <dir>`, per-job artifacts land in `<dir>`:
//! `stands.page.html`, `stands.matched.html`, `stands.normalized.html`,
//! `stands.diff.html`.
//!
//! ### Global (User-Level)
//!
//! ```text
//! ~/.config/sitewatch/
//! └── sitewatch.toml            # used when no local config exists
//! ```

use std::path::{Path, PathBuf};

/// Config filename looked up in the working directory
pub const CONFIG_FILE: &str = "sitewatch.toml";

/// Global config directory name
const GLOBAL_DIR: &str = "sitewatch";

/// Snapshot filename prefix
const SNAPSHOT_PREFIX: &str = "content_";

/// Extension of snapshot and artifact files
const HTML_EXT: &str = "html";

/// Get the config file to use when none is given on the command line.
///
/// Prefers `./sitewatch.toml`, then `~/.config/sitewatch/sitewatch.toml`.
#[must_use]
pub fn default_config() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE);
    if local.exists() {
        return local;
    }
    dirs::config_dir()
        .map(|dir| dir.join(GLOBAL_DIR).join(CONFIG_FILE))
        .filter(|global| global.exists())
        .unwrap_or(local)
}

/// Get the snapshot file of a job.
///
/// Each snapshot is stored as `<dir>/content_<job>.html`.
#[must_use]
pub fn snapshot_file(dir: &Path, job_name: &str) -> PathBuf {
    dir.join(format!("{SNAPSHOT_PREFIX}{job_name}.{HTML_EXT}"))
}

/// Get a debug artifact file: `<dir>/<job>.<stage>.html`.
#[must_use]
pub fn artifact_file(dir: &Path, job_name: &str, stage: &str) -> PathBuf {
    dir.join(format!("{job_name}.{stage}.{HTML_EXT}"))
}

/// Resolve `path` against `base` unless it is already absolute.
#[must_use]
pub fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() { path.to_path_buf() } else { base.join(path) }
}

/// Whether `name` can be used verbatim inside file names.
#[must_use]
pub fn is_valid_job_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
}
