//! Job domain types

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::TerminalSet;

/// Snapshot of one backend job as reported by the admin API.
///
/// Only the backend creates these. A successful fetch replaces the whole
/// visible collection; records are never merged field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    /// Opaque identifier, unique within its collection
    pub id: String,

    /// Status code reported by the backend
    pub status: JobStatus,

    /// When the job was submitted
    pub requested_at: DateTime<Utc>,

    /// When the job reached a terminal status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,

    /// Job-specific payload (counts, download handle), present once terminal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_summary: Option<serde_json::Value>,

    /// Progress marker reported by validation tasks (`running` / `done`).
    /// Informational only, never used for classification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<String>,
}

impl JobRecord {
    /// Returns true if this record's status is in `terminal`
    pub fn is_terminal(&self, terminal: &TerminalSet) -> bool {
        terminal.contains(&self.status)
    }

    /// Checks that `completed_at` is present exactly when the status is terminal
    pub fn is_consistent(&self, terminal: &TerminalSet) -> bool {
        self.completed_at.is_some() == self.is_terminal(terminal)
    }
}

/// Status code of a job
///
/// The backend uses a small set of string codes, and which of them are
/// terminal depends on the collection. Unknown codes are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobStatus(Cow<'static, str>);

impl JobStatus {
    pub const PENDING: JobStatus = JobStatus::from_static("pending");
    pub const QUEUED: JobStatus = JobStatus::from_static("queued");
    pub const PROCESSING: JobStatus = JobStatus::from_static("processing");
    pub const GENERATING: JobStatus = JobStatus::from_static("generating");
    pub const RUNNING: JobStatus = JobStatus::from_static("running");
    pub const COMPLETED: JobStatus = JobStatus::from_static("completed");
    pub const FAILED: JobStatus = JobStatus::from_static("failed");
    pub const PARTIALLY_COMPLETED: JobStatus = JobStatus::from_static("partially_completed");

    /// Creates a status from a static code
    pub const fn from_static(code: &'static str) -> Self {
        Self(Cow::Borrowed(code))
    }

    /// Returns the raw status code
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for JobStatus {
    fn from(code: &'static str) -> Self {
        Self::from_static(code)
    }
}

impl From<String> for JobStatus {
    fn from(code: String) -> Self {
        Self(Cow::Owned(code))
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The kinds of long-running jobs the admin dashboard tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobKind {
    /// GDPR data export request
    Export,
    /// GDPR data deletion request
    Deletion,
    /// Product integrity validation task
    Validation,
}

impl JobKind {
    pub const ALL: [JobKind; 3] = [JobKind::Export, JobKind::Deletion, JobKind::Validation];

    /// Statuses after which the backend never changes a job of this kind
    pub fn terminal_set(self) -> TerminalSet {
        match self {
            JobKind::Export | JobKind::Validation => {
                TerminalSet::new([JobStatus::COMPLETED, JobStatus::FAILED])
            }
            JobKind::Deletion => TerminalSet::new([
                JobStatus::COMPLETED,
                JobStatus::FAILED,
                JobStatus::PARTIALLY_COMPLETED,
            ]),
        }
    }

    /// Path of this kind's collection below `/api`
    pub fn collection_path(self) -> &'static str {
        match self {
            JobKind::Export => "gdpr/exports",
            JobKind::Deletion => "gdpr/deletions",
            JobKind::Validation => "products/validation-tasks",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobKind::Export => "export",
            JobKind::Deletion => "deletion",
            JobKind::Validation => "validation",
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "export" | "exports" => Ok(JobKind::Export),
            "deletion" | "deletions" => Ok(JobKind::Deletion),
            "validation" | "validations" => Ok(JobKind::Validation),
            other => Err(format!(
                "unknown job kind '{}' (expected export, deletion or validation)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: JobStatus, completed: bool) -> JobRecord {
        let now = Utc::now();
        JobRecord {
            id: "a".to_string(),
            status,
            requested_at: now,
            completed_at: completed.then_some(now),
            result_summary: None,
            progress: None,
        }
    }

    #[test]
    fn test_deserialize_camel_case_record() {
        let json = r#"{
            "id": "exp-1",
            "status": "completed",
            "requestedAt": "2024-03-01T10:00:00Z",
            "completedAt": "2024-03-01T10:05:00Z",
            "resultSummary": { "rows": 42, "downloadUrl": "/files/exp-1.zip" }
        }"#;

        let record: JobRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "exp-1");
        assert_eq!(record.status, JobStatus::COMPLETED);
        assert!(record.completed_at.is_some());
        assert_eq!(record.result_summary.unwrap()["rows"], 42);
        assert!(record.progress.is_none());
    }

    #[test]
    fn test_unknown_status_kept_verbatim() {
        let json = r#"{"id":"x","status":"archiving","requestedAt":"2024-03-01T10:00:00Z"}"#;
        let record: JobRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.status.as_str(), "archiving");
        assert!(!record.is_terminal(&JobKind::Export.terminal_set()));
    }

    #[test]
    fn test_consistency_check() {
        let terminal = JobKind::Export.terminal_set();

        assert!(record(JobStatus::COMPLETED, true).is_consistent(&terminal));
        assert!(record(JobStatus::PROCESSING, false).is_consistent(&terminal));
        assert!(!record(JobStatus::FAILED, false).is_consistent(&terminal));
        assert!(!record(JobStatus::QUEUED, true).is_consistent(&terminal));
    }

    #[test]
    fn test_terminal_sets_per_kind() {
        let partial = JobStatus::PARTIALLY_COMPLETED;
        assert!(JobKind::Deletion.terminal_set().contains(&partial));
        assert!(!JobKind::Export.terminal_set().contains(&partial));
        assert!(!JobKind::Validation.terminal_set().contains(&partial));

        for kind in JobKind::ALL {
            let terminal = kind.terminal_set();
            assert!(terminal.contains(&JobStatus::COMPLETED));
            assert!(terminal.contains(&JobStatus::FAILED));
            assert!(!terminal.contains(&JobStatus::RUNNING));
        }
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("export".parse::<JobKind>(), Ok(JobKind::Export));
        assert_eq!("Deletions".parse::<JobKind>(), Ok(JobKind::Deletion));
        assert_eq!("validation".parse::<JobKind>(), Ok(JobKind::Validation));
        assert!("import".parse::<JobKind>().is_err());
        assert_eq!(JobKind::Validation.to_string(), "validation");
    }
}
