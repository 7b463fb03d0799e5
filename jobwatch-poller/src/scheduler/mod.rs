//! Scheduler layer
//!
//! Drives polling sessions: one timer and at most one in-flight fetch per
//! session, a consecutive-failure budget, and a handle the host uses to
//! observe and stop the session.

mod budget;
mod session;
mod supervisor;

pub use budget::ErrorBudget;
pub use session::{PollHandle, SessionState, SessionStatus, StopReason};
pub use supervisor::PollingSupervisor;
