//! Polling supervisor
//!
//! Repeatedly asks a [`StatusFetcher`] for the state of one job collection
//! until every job in it is terminal, the error budget runs out, or the
//! host stops the session. Each session runs as a single task that owns its
//! timer and at most one in-flight fetch.
//!
//! A fetch that never resolves blocks every later tick of its session. The
//! supervisor adds no timeout of its own; the fetcher is expected to carry
//! one (the HTTP fetcher does).

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use jobwatch_core::domain::{JobRecord, TerminalSet, is_settled};
use tokio::time::{self, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::budget::ErrorBudget;
use super::session::{PollHandle, SessionState, StopReason};
use crate::config::PollConfig;
use crate::fetcher::StatusFetcher;

type FetchFuture = Pin<Box<dyn Future<Output = anyhow::Result<Vec<JobRecord>>> + Send>>;
type UpdateFn = Box<dyn FnMut(Vec<JobRecord>) + Send>;

/// Supervises polling sessions for one job collection
///
/// Holds at most one live session. Starting a new session stops the
/// previous one, and dropping the supervisor stops the current one.
pub struct PollingSupervisor {
    fetcher: Arc<dyn StatusFetcher>,
    terminal: TerminalSet,
    config: PollConfig,
    label: String,
    current: Option<PollHandle>,
}

impl PollingSupervisor {
    /// Creates a supervisor
    ///
    /// # Arguments
    /// * `fetcher` - Source of collection snapshots
    /// * `terminal` - Status codes that end a job of this collection
    /// * `config` - Tick interval and error threshold
    pub fn new(fetcher: Arc<dyn StatusFetcher>, terminal: TerminalSet, config: PollConfig) -> Self {
        Self {
            fetcher,
            terminal,
            config,
            label: "jobs".to_string(),
            current: None,
        }
    }

    /// Sets the name used for this collection in log messages
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Starts a new session and returns its handle
    ///
    /// The first fetch is issued right away, later ones every
    /// `config.interval`. `on_update` receives the full collection after
    /// every successful fetch of a live session. Must be called from within
    /// a tokio runtime.
    pub fn start<F>(&mut self, on_update: F) -> PollHandle
    where
        F: FnMut(Vec<JobRecord>) + Send + 'static,
    {
        if let Some(previous) = self.current.take() {
            if previous.is_polling() {
                debug!("Replacing live polling session for {}", self.label);
            }
            previous.stop();
        }

        let handle = PollHandle::new();
        let session = Session {
            fetcher: Arc::clone(&self.fetcher),
            terminal: self.terminal.clone(),
            interval: self.config.interval,
            budget: ErrorBudget::new(self.config.error_threshold),
            label: self.label.clone(),
            handle: handle.clone(),
            on_update: Box::new(on_update),
        };

        info!(
            "Starting polling session for {} (interval: {:?})",
            self.label, self.config.interval
        );
        tokio::spawn(session.run());

        self.current = Some(handle.clone());
        handle
    }

    /// Stops the current session, if any
    pub fn stop(&self) {
        if let Some(handle) = &self.current {
            handle.stop();
        }
    }

    /// State of the most recent session, or `Idle` if none was started
    pub fn state(&self) -> SessionState {
        self.current
            .as_ref()
            .map(PollHandle::state)
            .unwrap_or(SessionState::Idle)
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }
}

impl Drop for PollingSupervisor {
    fn drop(&mut self) {
        self.stop();
    }
}

/// State owned by one running session task
struct Session {
    fetcher: Arc<dyn StatusFetcher>,
    terminal: TerminalSet,
    interval: Duration,
    budget: ErrorBudget,
    label: String,
    handle: PollHandle,
    on_update: UpdateFn,
}

impl Session {
    async fn run(mut self) {
        let token = self.handle.cancellation().clone();
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut in_flight: Option<FetchFuture> = None;

        loop {
            tokio::select! {
                biased;

                _ = token.cancelled() => break,

                result = wait_for(&mut in_flight) => {
                    in_flight = None;
                    self.apply(result);
                }

                _ = ticker.tick() => {
                    if !self.handle.is_polling() {
                        break;
                    }
                    if in_flight.is_some() {
                        debug!("Previous fetch for {} still in flight, skipping tick", self.label);
                        continue;
                    }
                    in_flight = Some(self.issue_fetch());
                }
            }
        }

        if in_flight.is_some() {
            debug!("Discarding in-flight fetch for {}", self.label);
        }
        debug!("Polling session for {} ended", self.label);
    }

    fn issue_fetch(&self) -> FetchFuture {
        self.handle.record_fetch();
        let fetcher = Arc::clone(&self.fetcher);
        Box::pin(async move { fetcher.fetch().await })
    }

    /// Applies one fetch result, unless the session stopped while it was in flight
    fn apply(&mut self, result: anyhow::Result<Vec<JobRecord>>) {
        if !self.handle.is_polling() {
            debug!("Session for {} stopped during fetch, discarding result", self.label);
            return;
        }

        match result {
            Ok(records) => {
                self.budget.record_success();
                self.handle.record_failures(self.budget.consecutive_failures());

                for record in records.iter().filter(|r| !r.is_consistent(&self.terminal)) {
                    warn!(
                        "Job {} in {} reports status '{}' with completed_at {:?}",
                        record.id, self.label, record.status, record.completed_at
                    );
                }

                let settled = is_settled(&records, &self.terminal);
                debug!("Fetched {} {} job(s)", records.len(), self.label);
                (self.on_update)(records);

                if settled && self.handle.finish(StopReason::Settled) {
                    info!("All {} jobs reached a terminal status, polling stopped", self.label);
                }
            }
            Err(e) => {
                let tripped = self.budget.record_failure();
                self.handle.record_failures(self.budget.consecutive_failures());

                warn!(
                    "Failed to fetch {} ({}/{}): {:#}",
                    self.label,
                    self.budget.consecutive_failures(),
                    self.budget.threshold(),
                    e
                );

                if tripped && self.handle.finish(StopReason::BudgetExhausted) {
                    warn!(
                        "Giving up on {} after {} consecutive failures",
                        self.label,
                        self.budget.consecutive_failures()
                    );
                }
            }
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        // Runs on every exit of the task, including a panic in the fetcher
        // or in `on_update`; a normal exit has already stopped the handle.
        if self.handle.finish(StopReason::Aborted) {
            warn!("Polling session for {} aborted", self.label);
        }
    }
}

/// Resolves with the in-flight fetch, or never if there is none
async fn wait_for(in_flight: &mut Option<FetchFuture>) -> anyhow::Result<Vec<JobRecord>> {
    match in_flight {
        Some(fetch) => fetch.await,
        None => std::future::pending().await,
    }
}
