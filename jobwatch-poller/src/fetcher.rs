//! Status fetchers
//!
//! A fetcher returns the current snapshot of one job collection. The
//! supervisor treats it as idempotent and side-effect free; failures are
//! reported through `Err`, never through sentinel records.

use std::future::Future;

use anyhow::Context;
use async_trait::async_trait;
use jobwatch_client::AdminClient;
use jobwatch_core::domain::{JobKind, JobRecord};

/// Source of job status snapshots for one collection
#[async_trait]
pub trait StatusFetcher: Send + Sync {
    /// Fetches the full current collection
    async fn fetch(&self) -> anyhow::Result<Vec<JobRecord>>;
}

/// Adapts a closure returning a future into a [`StatusFetcher`]
pub struct FnFetcher<F> {
    f: F,
}

/// Wraps `f` so it can be handed to a supervisor
///
/// # Example
/// ```
/// use jobwatch_core::domain::JobRecord;
/// use jobwatch_poller::fetch_fn;
///
/// let fetcher = fetch_fn(|| async { Ok::<Vec<JobRecord>, anyhow::Error>(Vec::new()) });
/// # let _ = fetcher;
/// ```
pub fn fetch_fn<F, Fut>(f: F) -> FnFetcher<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Vec<JobRecord>>> + Send + 'static,
{
    FnFetcher { f }
}

#[async_trait]
impl<F, Fut> StatusFetcher for FnFetcher<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Vec<JobRecord>>> + Send + 'static,
{
    async fn fetch(&self) -> anyhow::Result<Vec<JobRecord>> {
        (self.f)().await
    }
}

/// Fetches one job collection from the admin API
#[derive(Debug, Clone)]
pub struct CollectionFetcher {
    client: AdminClient,
    kind: JobKind,
}

impl CollectionFetcher {
    pub fn new(client: AdminClient, kind: JobKind) -> Self {
        Self { client, kind }
    }

    pub fn kind(&self) -> JobKind {
        self.kind
    }
}

#[async_trait]
impl StatusFetcher for CollectionFetcher {
    async fn fetch(&self) -> anyhow::Result<Vec<JobRecord>> {
        self.client
            .list_jobs(self.kind)
            .await
            .with_context(|| format!("Failed to fetch {} jobs", self.kind))
    }
}
