//! Terminal status classification
//!
//! Which status codes end a job is configuration per job kind, so the
//! classifier always takes the terminal set as an argument.

use std::collections::HashSet;

use super::job::{JobRecord, JobStatus};

/// Set of status codes after which a job never changes again
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TerminalSet {
    codes: HashSet<JobStatus>,
}

impl TerminalSet {
    /// Creates a terminal set from any collection of status codes
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<JobStatus>,
    {
        Self {
            codes: codes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, status: &JobStatus) -> bool {
        self.codes.contains(status)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Returns true if `status` is terminal under `terminal`
pub fn is_terminal(status: &JobStatus, terminal: &TerminalSet) -> bool {
    terminal.contains(status)
}

/// Returns true if the collection is non-empty and every record is terminal.
///
/// An empty collection is never settled: a job that was just submitted may
/// not be listed yet, and polling has to continue until it shows up.
pub fn is_settled(records: &[JobRecord], terminal: &TerminalSet) -> bool {
    !records.is_empty()
        && records
            .iter()
            .all(|record| is_terminal(&record.status, terminal))
}
