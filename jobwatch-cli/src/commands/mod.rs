//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod job;
mod submit;

pub use submit::SubmitCommands;

use anyhow::Result;
use clap::{Args, Subcommand};
use jobwatch_core::domain::JobKind;
use jobwatch_poller::PollConfig;
use std::time::Duration;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List every job of one kind
    List {
        /// export, deletion or validation
        kind: JobKind,
    },
    /// Show one job's details
    Get {
        /// export, deletion or validation
        kind: JobKind,
        /// Job ID or unambiguous prefix
        id: String,
    },
    /// Poll a job collection until every job has finished
    Watch {
        /// export, deletion or validation
        kind: JobKind,

        #[command(flatten)]
        poll: PollArgs,
    },
    /// Submit a new job
    Submit {
        #[command(subcommand)]
        command: SubmitCommands,
    },
}

/// Polling options shared by `watch` and `submit --watch`
#[derive(Args, Debug, Clone, Default)]
pub struct PollArgs {
    /// Delay between status fetches, in milliseconds
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Consecutive failed fetches before giving up
    #[arg(long)]
    pub error_threshold: Option<u32>,
}

impl PollArgs {
    /// Environment settings, overridden by any flag given on the command line
    pub fn to_config(&self) -> Result<PollConfig> {
        let mut config = PollConfig::from_env()?;
        if let Some(ms) = self.interval_ms {
            config = config.with_interval(Duration::from_millis(ms));
        }
        if let Some(threshold) = self.error_threshold {
            config = config.with_error_threshold(threshold);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::List { kind } => job::list_jobs(config, kind).await,
        Commands::Get { kind, id } => job::get_job(config, kind, &id).await,
        Commands::Watch { kind, poll } => job::watch_jobs(config, kind, poll.to_config()?).await,
        Commands::Submit { command } => submit::handle_submit_command(command, config).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let args = PollArgs {
            interval_ms: Some(500),
            error_threshold: Some(5),
        };
        let config = args.to_config().unwrap();
        assert_eq!(config.interval, Duration::from_millis(500));
        assert_eq!(config.error_threshold, 5);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let args = PollArgs {
            interval_ms: Some(0),
            error_threshold: None,
        };
        assert!(args.to_config().is_err());
    }
}
