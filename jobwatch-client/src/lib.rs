//! Jobwatch HTTP Client
//!
//! A small, type-safe HTTP client for the admin dashboard API.
//!
//! It covers the three kinds of long-running backend jobs the dashboard
//! tracks (GDPR exports, GDPR deletions and product validation tasks):
//! listing a collection, fetching a single job and submitting a new one.
//!
//! # Example
//!
//! ```no_run
//! use jobwatch_client::AdminClient;
//! use jobwatch_core::domain::JobKind;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = AdminClient::new("http://localhost:3000");
//!
//!     let exports = client.list_jobs(JobKind::Export).await?;
//!     println!("{} export request(s)", exports.len());
//!     Ok(())
//! }
//! ```

pub mod error;
mod jobs;

pub use error::{ClientError, Result};

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the admin API
#[derive(Debug, Clone)]
pub struct AdminClient {
    /// Base URL of the API (e.g., "http://localhost:3000")
    base_url: String,
    /// HTTP client instance
    client: Client,
    /// Bearer token sent with every request, if any
    token: Option<String>,
    /// Timeout applied to every request
    request_timeout: Duration,
}

impl AdminClient {
    /// Create a new admin API client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the admin API (e.g., "http://localhost:3000")
    ///
    /// # Example
    /// ```
    /// use jobwatch_client::AdminClient;
    ///
    /// let client = AdminClient::new("http://localhost:3000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new admin API client with a custom HTTP client
    ///
    /// This allows you to configure proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            token: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Send `Authorization: Bearer <token>` with every request
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Override the per-request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Get the base URL of the admin API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Build a request with auth and timeout applied
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!("{} {}", method, url);

        let builder = self
            .client
            .request(method, url)
            .timeout(self.request_timeout);

        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}
