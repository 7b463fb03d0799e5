//! Submit command handlers
//!
//! Submits new export, deletion or validation jobs and optionally keeps
//! watching the collection until they finish.

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use jobwatch_core::domain::JobKind;

use super::PollArgs;
use super::job::{print_job_details, watch_jobs};
use crate::config::Config;

/// Submit subcommands
#[derive(Subcommand)]
pub enum SubmitCommands {
    /// Request a GDPR data export for a customer
    Export {
        /// Customer ID
        #[arg(long)]
        customer: String,

        /// Keep polling until the export finishes
        #[arg(short, long)]
        watch: bool,

        #[command(flatten)]
        poll: PollArgs,
    },
    /// Request a GDPR data deletion for a customer
    Deletion {
        /// Customer ID
        #[arg(long)]
        customer: String,

        /// Reason recorded with the request
        #[arg(long)]
        reason: Option<String>,

        /// Keep polling until the deletion finishes
        #[arg(short, long)]
        watch: bool,

        #[command(flatten)]
        poll: PollArgs,
    },
    /// Start a product integrity validation task
    Validation {
        /// Product to validate (repeatable; omit to validate everything)
        #[arg(long = "product")]
        products: Vec<String>,

        /// Keep polling until the task finishes
        #[arg(short, long)]
        watch: bool,

        #[command(flatten)]
        poll: PollArgs,
    },
}

/// Handle submit commands
pub async fn handle_submit_command(command: SubmitCommands, config: &Config) -> Result<()> {
    let client = config.client();

    let (kind, job, watch, poll) = match command {
        SubmitCommands::Export {
            customer,
            watch,
            poll,
        } => (
            JobKind::Export,
            client.submit_export(&customer).await?,
            watch,
            poll,
        ),
        SubmitCommands::Deletion {
            customer,
            reason,
            watch,
            poll,
        } => (
            JobKind::Deletion,
            client.submit_deletion(&customer, reason).await?,
            watch,
            poll,
        ),
        SubmitCommands::Validation {
            products,
            watch,
            poll,
        } => (
            JobKind::Validation,
            client.submit_validation(products).await?,
            watch,
            poll,
        ),
    };

    println!("{}", format!("✓ Submitted {} job {}", kind, job.id).green());
    print_job_details(&job, &kind.terminal_set());

    if watch {
        println!();
        watch_jobs(config, kind, poll.to_config()?).await?;
    }

    Ok(())
}
