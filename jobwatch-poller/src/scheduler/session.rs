//! Polling session handle and observable state

use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Why a session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every job in a non-empty collection reached a terminal status
    Settled,
    /// Too many consecutive fetches failed
    BudgetExhausted,
    /// `stop()` was called by the host, or the session was replaced
    Cancelled,
    /// The session task ended without stopping, e.g. the fetcher or the
    /// update callback panicked
    Aborted,
}

/// Lifecycle of a polling session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session has been started
    Idle,
    /// The session owns a live timer
    Polling,
    /// The session ended and will never fetch again
    Stopped(StopReason),
}

impl SessionState {
    pub fn is_polling(&self) -> bool {
        matches!(self, SessionState::Polling)
    }
}

/// Point-in-time view of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStatus {
    pub state: SessionState,
    /// Failed fetches since the last success
    pub consecutive_failures: u32,
    /// Fetches issued so far
    pub fetches: u64,
}

/// Handle to one polling session.
///
/// Cloning is cheap; every clone controls the same session. `stop()` is
/// idempotent and may be called from any task, from inside the update
/// callback, or after the session already ended on its own.
#[derive(Debug, Clone)]
pub struct PollHandle {
    token: CancellationToken,
    status: Arc<watch::Sender<SessionStatus>>,
}

impl PollHandle {
    pub(crate) fn new() -> Self {
        let (status, _) = watch::channel(SessionStatus {
            state: SessionState::Polling,
            consecutive_failures: 0,
            fetches: 0,
        });

        Self {
            token: CancellationToken::new(),
            status: Arc::new(status),
        }
    }

    /// Stops the session. Any fetch still in flight is discarded.
    pub fn stop(&self) {
        self.finish(StopReason::Cancelled);
    }

    /// Returns true while the session may still fetch and deliver updates
    pub fn is_polling(&self) -> bool {
        self.status.borrow().state.is_polling()
    }

    pub fn state(&self) -> SessionState {
        self.status.borrow().state
    }

    pub fn status(&self) -> SessionStatus {
        *self.status.borrow()
    }

    /// Subscribes to status changes
    pub fn watch(&self) -> watch::Receiver<SessionStatus> {
        self.status.subscribe()
    }

    /// Waits until the session has stopped and returns why
    pub async fn stopped(&self) -> StopReason {
        let mut rx = self.status.subscribe();
        loop {
            let state = rx.borrow_and_update().state;
            if let SessionState::Stopped(reason) = state {
                return reason;
            }
            // The sender lives in `self`, so the channel cannot close here.
            if rx.changed().await.is_err() {
                return StopReason::Cancelled;
            }
        }
    }

    /// Moves the session to `Stopped(reason)` unless it already stopped.
    /// Returns true on the call that performed the transition.
    pub(crate) fn finish(&self, reason: StopReason) -> bool {
        let transitioned = self.status.send_if_modified(|status| {
            if status.state.is_polling() {
                status.state = SessionState::Stopped(reason);
                true
            } else {
                false
            }
        });
        self.token.cancel();
        transitioned
    }

    pub(crate) fn record_fetch(&self) {
        self.status.send_modify(|status| status.fetches += 1);
    }

    pub(crate) fn record_failures(&self, consecutive_failures: u32) {
        self.status.send_if_modified(|status| {
            let changed = status.consecutive_failures != consecutive_failures;
            status.consecutive_failures = consecutive_failures;
            changed
        });
    }

    pub(crate) fn cancellation(&self) -> &CancellationToken {
        &self.token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_handle_is_polling() {
        let handle = PollHandle::new();
        assert!(handle.is_polling());
        assert_eq!(handle.status().fetches, 0);
        assert!(!handle.cancellation().is_cancelled());
    }

    #[test]
    fn test_first_stop_reason_wins() {
        let handle = PollHandle::new();

        assert!(handle.finish(StopReason::Settled));
        assert!(!handle.finish(StopReason::BudgetExhausted));
        handle.stop();

        assert_eq!(handle.state(), SessionState::Stopped(StopReason::Settled));
        assert!(handle.cancellation().is_cancelled());
    }

    #[test]
    fn test_clones_share_state() {
        let handle = PollHandle::new();
        let clone = handle.clone();

        clone.stop();
        clone.stop();
        assert_eq!(handle.state(), SessionState::Stopped(StopReason::Cancelled));
    }

    #[tokio::test]
    async fn test_stopped_resolves_after_stop() {
        let handle = PollHandle::new();
        let waiter = {
            let handle = handle.clone();
            tokio::spawn(async move { handle.stopped().await })
        };

        handle.stop();
        assert_eq!(waiter.await.unwrap(), StopReason::Cancelled);
        assert_eq!(handle.stopped().await, StopReason::Cancelled);
    }

    #[tokio::test]
    async fn test_watch_sees_failure_count_changes() {
        let handle = PollHandle::new();
        let mut rx = handle.watch();
        assert_eq!(rx.borrow_and_update().consecutive_failures, 0);

        handle.record_failures(2);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().consecutive_failures, 2);

        // Unchanged counts do not wake subscribers
        handle.record_failures(2);
        assert!(!rx.has_changed().unwrap());

        handle.finish(StopReason::BudgetExhausted);
        rx.changed().await.unwrap();
        assert_eq!(
            rx.borrow().state,
            SessionState::Stopped(StopReason::BudgetExhausted)
        );
    }
}
