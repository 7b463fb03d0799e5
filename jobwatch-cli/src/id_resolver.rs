//! ID resolver module
//!
//! Lets users type a short, unambiguous prefix instead of a full job ID.

use anyhow::{Context, Result, anyhow};
use jobwatch_core::domain::{JobKind, JobRecord};

use jobwatch_client::AdminClient;

/// Resolve a job ID or prefix within one collection
///
/// An exact ID match always wins. Otherwise the input must be the prefix
/// of exactly one job's ID (case-insensitive).
///
/// # Errors
/// Returns an error if:
/// - No job matches the prefix
/// - Multiple jobs match the prefix (ambiguous)
/// - API call fails
pub async fn resolve_job_id(client: &AdminClient, kind: JobKind, input: &str) -> Result<String> {
    let jobs = client
        .list_jobs(kind)
        .await
        .with_context(|| format!("Failed to fetch {} jobs for ID resolution", kind))?;

    resolve_in(&jobs, kind, input)
}

fn resolve_in(jobs: &[JobRecord], kind: JobKind, input: &str) -> Result<String> {
    if let Some(job) = jobs.iter().find(|j| j.id == input) {
        return Ok(job.id.clone());
    }

    let prefix = input.to_lowercase();
    let matches: Vec<_> = jobs
        .iter()
        .filter(|j| j.id.to_lowercase().starts_with(&prefix))
        .collect();

    match matches.len() {
        0 => Err(anyhow!(
            "No {} job found with ID starting with '{}'",
            kind,
            input
        )),
        1 => Ok(matches[0].id.clone()),
        _ => {
            let ids: Vec<&str> = matches.iter().map(|j| j.id.as_str()).collect();
            Err(anyhow!(
                "Ambiguous prefix '{}' matches multiple {} jobs: {}",
                input,
                kind,
                ids.join(", ")
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobwatch_core::domain::JobStatus;

    fn jobs(ids: &[&str]) -> Vec<JobRecord> {
        ids.iter()
            .map(|id| JobRecord {
                id: id.to_string(),
                status: JobStatus::PENDING,
                requested_at: "2024-03-01T10:00:00Z".parse().unwrap(),
                completed_at: None,
                result_summary: None,
                progress: None,
            })
            .collect()
    }

    #[test]
    fn test_unique_prefix_resolves() {
        let jobs = jobs(&["exp-7f3a", "exp-91bc"]);
        assert_eq!(resolve_in(&jobs, JobKind::Export, "EXP-7").unwrap(), "exp-7f3a");
    }

    #[test]
    fn test_exact_match_beats_longer_ids() {
        let jobs = jobs(&["12", "123"]);
        assert_eq!(resolve_in(&jobs, JobKind::Deletion, "12").unwrap(), "12");
    }

    #[test]
    fn test_ambiguous_and_missing_prefixes() {
        let jobs = jobs(&["exp-7f3a", "exp-7f9c"]);

        let err = resolve_in(&jobs, JobKind::Export, "exp-7f").unwrap_err();
        assert!(err.to_string().contains("Ambiguous"));

        let err = resolve_in(&jobs, JobKind::Export, "del-").unwrap_err();
        assert!(err.to_string().contains("No export job"));
    }
}
