//! Command-line interface for stagetime
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is defined in its own submodule.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::warn;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::ingest::CancelFlag;

mod analyze;
mod job;
mod stages;

/// stagetime - Spark stage timing
///
/// A CLI that reads zstd-compressed Spark event logs and reports how long
/// each stage and the whole job spent executing tasks.
#[derive(Parser, Debug)]
#[command(name = "stagetime")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Include calendar-time stage windows in reports
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Full report: per-stage timing plus the whole-job window
    Analyze {
        /// Path to the zstd-compressed event log
        #[arg(value_name = "LOG", env = "STAGETIME_LOG")]
        log: Option<PathBuf>,
    },

    /// Per-stage timing only
    Stages {
        /// Path to the zstd-compressed event log
        #[arg(value_name = "LOG", env = "STAGETIME_LOG")]
        log: Option<PathBuf>,
    },

    /// Whole-job execution window only
    Job {
        /// Path to the zstd-compressed event log
        #[arg(value_name = "LOG", env = "STAGETIME_LOG")]
        log: Option<PathBuf>,
    },
}

struct ReportContext {
    log: PathBuf,
    config: Config,
}

/// Resolve the log path from the CLI argument, falling back to the
/// `log` key of `.stagetime.toml` in the working directory.
fn load_report_context(log: Option<PathBuf>) -> Result<ReportContext> {
    let config = Config::load_from_dir(Path::new("."))?;
    let log = match log {
        Some(path) => path,
        None => config.log.clone().ok_or_else(|| {
            Error::InvalidArgument(
                "no event log given (pass LOG, set STAGETIME_LOG, or set `log` in .stagetime.toml)"
                    .to_string(),
            )
        })?,
    };
    Ok(ReportContext { log, config })
}

fn arm_cancel_handler() -> CancelFlag {
    let cancel = CancelFlag::new();
    let handle = cancel.clone();
    if let Err(err) = ctrlc::set_handler(move || handle.cancel()) {
        warn!("failed to set Ctrl-C handler: {err}");
    }
    cancel
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let cancel = arm_cancel_handler();

        match self.command {
            Commands::Analyze { log } => analyze::run(analyze::AnalyzeOptions {
                log,
                cancel,
                verbose: self.verbose,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Stages { log } => stages::run(stages::StagesOptions {
                log,
                cancel,
                verbose: self.verbose,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Job { log } => job::run(job::JobOptions {
                log,
                cancel,
                json: self.json,
                quiet: self.quiet,
            }),
        }
    }
}
