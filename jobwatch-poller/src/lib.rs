//! Jobwatch Poller
//!
//! Client-side status polling for long-running backend jobs (GDPR exports,
//! GDPR deletions, product validation tasks). The backend offers no push
//! channel, so a session asks "is it done yet?" on a fixed cadence and
//! stops once every job is terminal, too many fetches in a row failed, or
//! the host tears it down.
//!
//! Architecture:
//! - Configuration: tick interval and error threshold
//! - Fetchers: where snapshots come from (admin API or any async closure)
//! - Scheduler: supervisor, session handle and error budget
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use jobwatch_client::AdminClient;
//! use jobwatch_core::domain::JobKind;
//! use jobwatch_poller::{CollectionFetcher, PollConfig, PollingSupervisor};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = AdminClient::new("http://localhost:3000");
//!     let fetcher = Arc::new(CollectionFetcher::new(client, JobKind::Export));
//!
//!     let mut supervisor =
//!         PollingSupervisor::new(fetcher, JobKind::Export.terminal_set(), PollConfig::default());
//!     let handle = supervisor.start(|records| println!("{} export(s)", records.len()));
//!
//!     let reason = handle.stopped().await;
//!     println!("stopped: {:?}", reason);
//! }
//! ```

pub mod config;
pub mod fetcher;
pub mod scheduler;

pub use config::PollConfig;
pub use fetcher::{CollectionFetcher, FnFetcher, StatusFetcher, fetch_fn};
pub use scheduler::{
    ErrorBudget, PollHandle, PollingSupervisor, SessionState, SessionStatus, StopReason,
};
