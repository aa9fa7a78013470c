//! CLI definitions and entry point

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::commands;
use sitewatch::output::OutputMode;

/// sitewatch - Watch parts of web pages and mail what changed
#[derive(Parser, Debug)]
#[command(
    name = "sitewatch",
    version,
    about = "Watch parts of web pages and mail what changed",
    long_about = "Fetch configured pages, keep the watched element, normalize it and compare\n\
                  it with the snapshot from the previous run.\n\n\
                  Changes are rendered as inline HTML diffs and mailed to each job's recipients."
)]
pub struct Cli {
    /// Config file (default: ./sitewatch.toml, then the user config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Write intermediate artifacts (page, matched, normalized, diff) into DIR
    #[arg(long, global = true, value_name = "DIR")]
    pub debug: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run every configured job once
    Run {
        /// Exit with a failure status if any job failed
        #[arg(long)]
        strict: bool,

        /// Only run the named job (repeatable)
        #[arg(short, long = "job", value_name = "NAME")]
        jobs: Vec<String>,
    },

    /// List configured jobs
    Jobs,

    /// Print the canonical form of a job without storing or mailing it
    Preview {
        /// Job name
        job: String,

        /// Read the page from FILE instead of fetching it
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Print the inline diff of two HTML files
    Diff {
        /// Previous version
        old: PathBuf,

        /// Current version
        new: PathBuf,
    },

    /// Show version
    Version,
}

/// Run the CLI
pub fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let config = cli.config.unwrap_or_else(sitewatch::paths::default_config);
    let options = commands::Options {
        config,
        debug: cli.debug,
        mode: output_mode,
    };

    match cli.command {
        Some(Command::Run { strict, jobs }) => commands::run(&options, strict, &jobs),
        Some(Command::Jobs) => commands::jobs(&options).map(|()| ExitCode::SUCCESS),
        Some(Command::Preview { job, input }) => {
            commands::preview(&options, &job, input.as_deref()).map(|()| ExitCode::SUCCESS)
        },
        Some(Command::Diff { old, new }) => {
            commands::diff(&old, &new, output_mode).map(|()| ExitCode::SUCCESS)
        },
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": sitewatch::VERSION
                    })
                );
            } else {
                println!("sitewatch v{}", sitewatch::VERSION);
            }
            Ok(ExitCode::SUCCESS)
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": sitewatch::VERSION,
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("sitewatch v{}", sitewatch::VERSION);
                println!("\nRun 'sitewatch --help' for usage");
                println!("Run 'sitewatch run' to check every configured job");
            }
            Ok(ExitCode::SUCCESS)
        },
    }
}
