//! Configuration loading
//!
//! The whole run is described by one TOML file: the shared sender, where
//! snapshots live, the mail transport, rule defaults and the `[[job]]` list.
//! Relative paths are resolved against the directory of the config file.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::core::models::{DropRule, FirstRunPolicy, Job, NormalizeRules, RenameRule, Selector};
use crate::core::ports::MailTransport;
use crate::paths;

/// Errors in the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        /// Config location
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        /// Config location
        path: PathBuf,
        /// Underlying TOML error
        source: toml::de::Error,
    },

    /// No sender identity configured
    #[error("`sender` must not be empty")]
    MissingSender,

    /// Job name unusable as a snapshot key
    #[error("invalid job name {0:?}: use letters, digits, '.', '-' and '_'")]
    InvalidJobName(String),

    /// Two jobs share a name
    #[error("duplicate job name {0:?}")]
    DuplicateJob(String),

    /// Job has no URL
    #[error("job {0:?} has no url")]
    MissingUrl(String),

    /// Job needs a selector but has none (or an empty tag)
    #[error("job {0:?} needs a selector tag unless whole_document = true")]
    MissingSelector(String),

    /// A drop or rename rule names an empty tag
    #[error("job {0:?} has a rule with an empty tag")]
    EmptyRuleTag(String),
}

/// Top-level configuration file
#[derive(Debug, Clone, Deserialize)]
pub struct WatchConfig {
    /// Sender identity shared by all jobs
    #[serde(default)]
    pub sender: String,
    /// Snapshot directory
    #[serde(default = "default_snapshot_dir")]
    pub snapshot_dir: PathBuf,
    /// Behaviour when a job has no snapshot yet
    #[serde(default)]
    pub first_run: FirstRunPolicy,
    /// HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// `User-Agent` override
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Mail transport settings
    #[serde(default)]
    pub mail: MailConfig,
    /// Rule defaults inherited by jobs
    #[serde(default)]
    pub defaults: RuleDefaults,
    /// Configured jobs
    #[serde(default, rename = "job")]
    pub jobs: Vec<JobEntry>,
    /// Directory relative paths are resolved against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

fn default_snapshot_dir() -> PathBuf {
    PathBuf::from("snapshots")
}

const fn default_timeout_secs() -> u64 {
    30
}

/// Mail transport settings
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    /// Which transport delivers notifications
    #[serde(default)]
    pub transport: MailTransport,
    /// Target directory of the outbox transport
    #[serde(default = "default_outbox_dir")]
    pub outbox_dir: PathBuf,
    /// Persisted access token of the gmail transport
    #[serde(default = "default_token_file")]
    pub token_file: PathBuf,
}

fn default_outbox_dir() -> PathBuf {
    PathBuf::from("outbox")
}

fn default_token_file() -> PathBuf {
    PathBuf::from("token.json")
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            transport: MailTransport::default(),
            outbox_dir: default_outbox_dir(),
            token_file: default_token_file(),
        }
    }
}

/// Rules used by jobs that do not set their own
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleDefaults {
    /// Attributes stripped from every element
    #[serde(default)]
    pub strip_attributes: Vec<String>,
    /// Drop rules
    #[serde(default)]
    pub drop: Vec<DropRule>,
}

/// One `[[job]]` table
#[derive(Debug, Clone, Deserialize)]
pub struct JobEntry {
    /// Unique job name
    pub name: String,
    /// Display title (defaults to the name)
    #[serde(default)]
    pub title: Option<String>,
    /// Page URL
    #[serde(default)]
    pub url: String,
    /// Element to watch
    #[serde(default)]
    pub selector: Option<Selector>,
    /// Prefix for relative links
    #[serde(default)]
    pub base_url: Option<String>,
    /// Watch the whole document
    #[serde(default)]
    pub whole_document: bool,
    /// Append a link to the source page
    #[serde(default)]
    pub link_to_original: bool,
    /// Mail recipients
    #[serde(default)]
    pub recipients: Vec<String>,
    /// Attributes to strip (overrides the defaults)
    #[serde(default)]
    pub strip_attributes: Option<Vec<String>>,
    /// Drop rules (override the defaults)
    #[serde(default)]
    pub drop: Option<Vec<DropRule>>,
    /// Rename rules
    #[serde(default)]
    pub rename: Vec<RenameRule>,
}

impl WatchConfig {
    /// Load and validate the config at `path`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content, path)
    }

    /// Parse and validate TOML text read from `path`
    ///
    /// Relative paths inside the config resolve against the parent of `path`.
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants every run relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sender.trim().is_empty() {
            return Err(ConfigError::MissingSender);
        }
        let mut seen = HashSet::new();
        for entry in &self.jobs {
            if !paths::is_valid_job_name(&entry.name) {
                return Err(ConfigError::InvalidJobName(entry.name.clone()));
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(ConfigError::DuplicateJob(entry.name.clone()));
            }
            if entry.url.trim().is_empty() {
                return Err(ConfigError::MissingUrl(entry.name.clone()));
            }
            let has_selector = entry.selector.as_ref().is_some_and(|s| !s.tag.is_empty());
            if !entry.whole_document && !has_selector {
                return Err(ConfigError::MissingSelector(entry.name.clone()));
            }
            let drops = entry.drop.as_ref().unwrap_or(&self.defaults.drop);
            let empty_tag = drops.iter().any(|r| r.tag.is_empty())
                || entry.rename.iter().any(|r| r.from.is_empty() || r.to.is_empty());
            if empty_tag {
                return Err(ConfigError::EmptyRuleTag(entry.name.clone()));
            }
        }
        Ok(())
    }

    /// Domain jobs with defaults applied
    #[must_use]
    pub fn jobs(&self) -> Vec<Job> {
        self.jobs.iter().map(|entry| self.build_job(entry)).collect()
    }

    fn build_job(&self, entry: &JobEntry) -> Job {
        let rules = NormalizeRules {
            drop: entry.drop.clone().unwrap_or_else(|| self.defaults.drop.clone()),
            rename: entry.rename.clone(),
            strip_attributes: entry
                .strip_attributes
                .clone()
                .unwrap_or_else(|| self.defaults.strip_attributes.clone()),
            base_url: entry.base_url.clone(),
            link_to_original: entry.link_to_original.then(|| entry.url.clone()),
        };
        Job {
            name: entry.name.clone(),
            title: entry.title.clone().unwrap_or_else(|| entry.name.clone()),
            url: entry.url.clone(),
            selector: entry.selector.clone().unwrap_or_default(),
            whole_document: entry.whole_document,
            rules,
            recipients: entry.recipients.clone(),
        }
    }

    /// Snapshot directory, resolved
    #[must_use]
    pub fn snapshot_dir(&self) -> PathBuf {
        paths::resolve(&self.base_dir, &self.snapshot_dir)
    }

    /// Outbox directory, resolved
    #[must_use]
    pub fn outbox_dir(&self) -> PathBuf {
        paths::resolve(&self.base_dir, &self.mail.outbox_dir)
    }

    /// Token file, resolved
    #[must_use]
    pub fn token_file(&self) -> PathBuf {
        paths::resolve(&self.base_dir, &self.mail.token_file)
    }

    /// HTTP timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
