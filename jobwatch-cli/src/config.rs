//! Configuration module
//!
//! Handles CLI configuration: where the admin API lives and how to
//! authenticate against it.

use jobwatch_client::AdminClient;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the admin API
    pub api_url: String,

    /// Bearer token for the admin API, if it requires one
    pub token: Option<String>,
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_url.is_empty() {
            anyhow::bail!("api_url cannot be empty");
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            anyhow::bail!("api_url must start with http:// or https://");
        }

        if matches!(&self.token, Some(token) if token.trim().is_empty()) {
            anyhow::bail!("token cannot be blank");
        }

        Ok(())
    }

    /// Builds an admin API client for this configuration
    pub fn client(&self) -> AdminClient {
        let client = AdminClient::new(&self.api_url);
        match &self.token {
            Some(token) => client.with_token(token),
            None => client,
        }
    }
}
