//! Poller configuration
//!
//! Defines the tunable parameters of a polling session: how often to ask
//! the backend for job status and how many consecutive failures to
//! tolerate before giving up.

use std::time::Duration;

/// Default delay between two status fetches
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10_000);

/// Default number of consecutive failed fetches that ends a session
pub const DEFAULT_ERROR_THRESHOLD: u32 = 3;

/// Polling session configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollConfig {
    /// Delay between two ticks of the session
    pub interval: Duration,

    /// Consecutive fetch failures after which the session stops for good
    pub error_threshold: u32,
}

impl PollConfig {
    /// Creates a configuration with the given interval and the default threshold
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            error_threshold: DEFAULT_ERROR_THRESHOLD,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - JOBWATCH_POLL_INTERVAL_MS (optional, milliseconds, default: 10000)
    /// - JOBWATCH_ERROR_THRESHOLD (optional, default: 3)
    ///
    /// Values that are set but not numbers are rejected rather than ignored.
    pub fn from_env() -> anyhow::Result<Self> {
        let interval = match std::env::var("JOBWATCH_POLL_INTERVAL_MS") {
            Ok(raw) => raw
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| anyhow::anyhow!("JOBWATCH_POLL_INTERVAL_MS must be a number, got '{}'", raw))?,
            Err(_) => DEFAULT_POLL_INTERVAL,
        };

        let error_threshold = match std::env::var("JOBWATCH_ERROR_THRESHOLD") {
            Ok(raw) => raw
                .parse::<u32>()
                .map_err(|_| anyhow::anyhow!("JOBWATCH_ERROR_THRESHOLD must be a number, got '{}'", raw))?,
            Err(_) => DEFAULT_ERROR_THRESHOLD,
        };

        Ok(Self {
            interval,
            error_threshold,
        })
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_error_threshold(mut self, error_threshold: u32) -> Self {
        self.error_threshold = error_threshold;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.interval.is_zero() {
            anyhow::bail!("poll interval must be greater than 0");
        }

        if self.error_threshold == 0 {
            anyhow::bail!("error threshold must be greater than 0");
        }

        Ok(())
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PollConfig::default();
        assert_eq!(config.interval, Duration::from_secs(10));
        assert_eq!(config.error_threshold, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = PollConfig::default();

        config.interval = Duration::ZERO;
        assert!(config.validate().is_err());

        config.interval = Duration::from_millis(250);
        assert!(config.validate().is_ok());

        config.error_threshold = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builders() {
        let config = PollConfig::default()
            .with_interval(Duration::from_secs(2))
            .with_error_threshold(5);

        assert_eq!(config, PollConfig {
            interval: Duration::from_secs(2),
            error_threshold: 5,
        });
    }
}
