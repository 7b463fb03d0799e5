//! Core domain types
//!
//! These types describe backend jobs as the admin API reports them. The
//! client never creates a job record itself; it only receives snapshots
//! and replaces its visible collection with each new one.

pub mod job;
pub mod status;

pub use job::{JobKind, JobRecord, JobStatus};
pub use status::{TerminalSet, is_settled, is_terminal};
