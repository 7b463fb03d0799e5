//! Consecutive failure budget

use crate::config::DEFAULT_ERROR_THRESHOLD;

/// Counts consecutive fetch failures of one polling session.
///
/// A success resets the count. Once the threshold is reached the budget is
/// tripped and stays tripped; only a new session starts with a fresh budget.
#[derive(Debug, Clone)]
pub struct ErrorBudget {
    threshold: u32,
    consecutive_failures: u32,
    tripped: bool,
}

impl ErrorBudget {
    /// Creates a budget that trips after `threshold` consecutive failures
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold: threshold.max(1),
            consecutive_failures: 0,
            tripped: false,
        }
    }

    /// Resets the failure count. Has no effect once tripped.
    pub fn record_success(&mut self) {
        if !self.tripped {
            self.consecutive_failures = 0;
        }
    }

    /// Counts one failure and returns true if the budget is now tripped
    pub fn record_failure(&mut self) -> bool {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        if self.consecutive_failures >= self.threshold {
            self.tripped = true;
        }
        self.tripped
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    pub fn is_tripped(&self) -> bool {
        self.tripped
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }
}

impl Default for ErrorBudget {
    fn default() -> Self {
        Self::new(DEFAULT_ERROR_THRESHOLD)
    }
}
