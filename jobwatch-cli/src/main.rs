//! Jobwatch CLI
//!
//! Command-line interface for the admin dashboard's long-running jobs:
//! GDPR exports, GDPR deletions and product validation tasks.

mod commands;
mod config;
mod id_resolver;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "jobwatch")]
#[command(about = "Track long-running admin jobs", long_about = None)]
struct Cli {
    /// Admin API URL
    #[arg(long, env = "JOBWATCH_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    /// Bearer token for the admin API
    #[arg(long, env = "JOBWATCH_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout is for rendered jobs
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jobwatch_cli=info,jobwatch_poller=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        api_url: cli.api_url,
        token: cli.token,
    };
    config.validate()?;

    handle_command(cli.command, &config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_watch_command() {
        let cli = Cli::try_parse_from([
            "jobwatch",
            "--api-url",
            "http://admin.local",
            "watch",
            "deletions",
            "--interval-ms",
            "2000",
        ])
        .unwrap();

        assert_eq!(cli.api_url, "http://admin.local");
        match cli.command {
            Commands::Watch { kind, poll } => {
                assert_eq!(kind, jobwatch_core::domain::JobKind::Deletion);
                assert_eq!(poll.interval_ms, Some(2000));
                assert_eq!(poll.error_threshold, None);
            }
            _ => panic!("expected watch command"),
        }
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!(Cli::try_parse_from(["jobwatch", "list", "imports"]).is_err());
    }
}
