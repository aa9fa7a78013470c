//! Command implementations

mod diff;
mod jobs;
mod preview;
mod run;

use std::path::{Path, PathBuf};

use anyhow::Context;
use log::debug;

use sitewatch::adapters::http::{DEFAULT_USER_AGENT, HttpFetcher};
use sitewatch::adapters::mail::{GmailMailer, OutboxMailer};
use sitewatch::config::WatchConfig;
use sitewatch::core::ports::{MailTransport, Mailer};
use sitewatch::diagnostics::{Diagnostics, RunContext};
use sitewatch::output::OutputMode;

pub use diff::diff;
pub use jobs::jobs;
pub use preview::preview;
pub use run::run;

/// Global options shared by the config-driven commands
#[derive(Debug)]
pub struct Options {
    pub config: PathBuf,
    pub debug: Option<PathBuf>,
    pub mode: OutputMode,
}

impl Options {
    fn load_config(&self) -> anyhow::Result<WatchConfig> {
        debug!("loading config from {}", self.config.display());
        Ok(WatchConfig::load(&self.config)?)
    }

    fn run_context(&self, config: &WatchConfig) -> RunContext {
        RunContext {
            sender: config.sender.clone(),
            first_run: config.first_run,
            diagnostics: self.debug.clone().map_or_else(Diagnostics::disabled, Diagnostics::in_dir),
        }
    }
}

fn fetcher(config: &WatchConfig) -> anyhow::Result<HttpFetcher> {
    let user_agent = config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
    HttpFetcher::new(config.timeout(), user_agent).context("cannot build HTTP client")
}

fn mailer(config: &WatchConfig) -> anyhow::Result<Box<dyn Mailer>> {
    Ok(match config.mail.transport {
        MailTransport::Outbox => Box::new(OutboxMailer::new(config.outbox_dir())),
        MailTransport::Gmail => Box::new(
            GmailMailer::new(config.token_file(), config.timeout())
                .context("cannot build Gmail client")?,
        ),
    })
}

fn read_file(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))
}
