//! Job command handlers
//!
//! Listing, inspecting and watching job collections.

use std::sync::Arc;

use anyhow::{Result, bail};
use colored::*;
use jobwatch_core::domain::{JobKind, JobRecord, JobStatus, TerminalSet};
use jobwatch_poller::{CollectionFetcher, PollConfig, PollHandle, PollingSupervisor, StopReason};
use tracing::info;

use crate::config::Config;
use crate::id_resolver::resolve_job_id;

/// List all jobs of one kind
pub async fn list_jobs(config: &Config, kind: JobKind) -> Result<()> {
    let jobs = config.client().list_jobs(kind).await?;
    print_collection(kind, &jobs, &kind.terminal_set());
    Ok(())
}

/// Get and display a single job
pub async fn get_job(config: &Config, kind: JobKind, id: &str) -> Result<()> {
    let client = config.client();
    let id = resolve_job_id(&client, kind, id).await?;

    let job = client.get_job(kind, &id).await?;

    print_job_details(&job, &kind.terminal_set());

    Ok(())
}

/// Poll a collection until it settles, the error budget runs out or the
/// user presses Ctrl-C
pub async fn watch_jobs(config: &Config, kind: JobKind, poll: PollConfig) -> Result<()> {
    let fetcher = Arc::new(CollectionFetcher::new(config.client(), kind));
    let terminal = kind.terminal_set();
    let threshold = poll.error_threshold;

    println!(
        "{}",
        format!(
            "Watching {} jobs every {:?} (Ctrl-C to stop)",
            kind, poll.interval
        )
        .bold()
    );
    println!();

    let mut supervisor = PollingSupervisor::new(fetcher, terminal.clone(), poll)
        .with_label(kind.to_string());
    let handle = supervisor.start(move |records| print_collection(kind, &records, &terminal));
    let reporter = spawn_failure_reporter(kind, &handle, threshold);

    let reason = tokio::select! {
        reason = handle.stopped() => reason,
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, stopping {} watch", kind);
            handle.stop();
            StopReason::Cancelled
        }
    };
    reporter.abort();

    match reason {
        StopReason::Settled => {
            println!("{}", format!("✓ All {} jobs finished.", kind).green());
            Ok(())
        }
        StopReason::Cancelled => {
            println!("{}", "Stopped watching.".dimmed());
            Ok(())
        }
        StopReason::BudgetExhausted => bail!(
            "Gave up watching {} jobs after {} consecutive failed fetches",
            kind,
            threshold
        ),
        StopReason::Aborted => bail!("Watching {} jobs ended unexpectedly", kind),
    }
}

/// Prints a notice whenever a fetch fails and the session keeps retrying
fn spawn_failure_reporter(
    kind: JobKind,
    handle: &PollHandle,
    threshold: u32,
) -> tokio::task::JoinHandle<()> {
    let mut status = handle.watch();

    tokio::spawn(async move {
        let mut last = 0;
        while status.changed().await.is_ok() {
            let current = *status.borrow_and_update();
            if current.state.is_polling() && current.consecutive_failures > last {
                println!(
                    "{}",
                    format!(
                        "⚠ Failed to fetch {} jobs ({}/{}), retrying...",
                        kind, current.consecutive_failures, threshold
                    )
                    .yellow()
                );
            }
            last = current.consecutive_failures;
        }
    })
}

/// Print a whole collection snapshot
pub fn print_collection(kind: JobKind, jobs: &[JobRecord], terminal: &TerminalSet) {
    let now = timestamp();
    if jobs.is_empty() {
        println!(
            "{} {}",
            now.dimmed(),
            format!("No {} jobs found.", kind).yellow()
        );
        return;
    }

    let finished = jobs.iter().filter(|j| j.is_terminal(terminal)).count();
    println!(
        "{} {}",
        now.dimmed(),
        format!("{} {} job(s), {} finished:", jobs.len(), kind, finished).bold()
    );
    for job in jobs {
        print_job_summary(job, terminal);
    }
    println!();
}

fn timestamp() -> String {
    chrono::Local::now().format("[%H:%M:%S]").to_string()
}

/// Print a one-job summary line block
fn print_job_summary(job: &JobRecord, terminal: &TerminalSet) {
    println!(
        "  {} {} {}",
        "▸".cyan(),
        job.id.dimmed(),
        colorize_status(&job.status, terminal)
    );
    println!(
        "    Requested: {}",
        job.requested_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .dimmed()
    );
    if let Some(progress) = &job.progress {
        println!("    Progress:  {}", progress.dimmed());
    }
}

/// Print detailed job information
pub fn print_job_details(job: &JobRecord, terminal: &TerminalSet) {
    println!("{}", "Job Details:".bold());
    println!("  ID:          {}", job.id.cyan());
    println!("  Status:      {}", colorize_status(&job.status, terminal));
    println!(
        "  Requested:   {}",
        job.requested_at.format("%Y-%m-%d %H:%M:%S")
    );

    if let Some(completed) = job.completed_at {
        println!("  Completed:   {}", completed.format("%Y-%m-%d %H:%M:%S"));
        let duration = completed.signed_duration_since(job.requested_at);
        println!("  Duration:    {}s", duration.num_seconds());
    }

    if let Some(progress) = &job.progress {
        println!("  Progress:    {}", progress);
    }

    if let Some(summary) = &job.result_summary {
        println!("\n{}", "Result:".bold());
        if let Ok(pretty) = serde_json::to_string_pretty(summary) {
            println!("{}", pretty);
        } else {
            println!("{:?}", summary);
        }
    }
}

/// Colorize job status for display
fn colorize_status(status: &JobStatus, terminal: &TerminalSet) -> ColoredString {
    let status_str = status.as_str();
    if *status == JobStatus::COMPLETED {
        status_str.green()
    } else if *status == JobStatus::FAILED {
        status_str.red()
    } else if terminal.contains(status) {
        status_str.yellow()
    } else {
        status_str.cyan()
    }
}
