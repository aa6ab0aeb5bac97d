use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub mod hosted;
pub mod runner;

pub use hosted::{HostedService, ServiceConfig};
pub use runner::submit_and_wait;

/// Reference to a file already uploaded to the reasoning service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRef {
  pub id: String,
  pub name: String,
}

/// One request to the reasoning service - transient, owned by the calling
/// workflow, never persisted
#[derive(Debug, Clone)]
pub struct JobRequest {
  pub agent_id: String,
  pub prompt: String,
  pub attachments: Vec<FileRef>,
}

/// Server-side identity of a submitted job, used for polling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobHandle {
  pub thread_id: String,
  pub run_id: String,
}

/// Remote job status. Terminal states are `Succeeded` and `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
  Queued,
  Running,
  Succeeded,
  Failed,
}

impl JobStatus {
  /// Map a wire status string. Unknown statuses count as still running -
  /// the caller's wall-clock budget bounds how long that can go on.
  pub fn from_wire(status: &str) -> Self {
    match status {
      "queued" => JobStatus::Queued,
      "running" | "in_progress" => JobStatus::Running,
      "succeeded" | "completed" => JobStatus::Succeeded,
      "failed" => JobStatus::Failed,
      _ => JobStatus::Running,
    }
  }

  pub fn is_terminal(&self) -> bool {
    matches!(self, JobStatus::Succeeded | JobStatus::Failed)
  }
}

/// Why a job produced no output
#[derive(Debug, Clone, PartialEq)]
pub enum FailureReason {
  /// The job never made it to the remote side
  Submission(String),
  /// The remote side reported failure
  JobFailed(String),
  /// The local wait budget ran out first
  Timeout,
}

/// Terminal result of one submit-and-poll cycle
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
  Success(String),
  Failure(FailureReason),
}

/// Seam to the hosted reasoning service.
///
/// The service is opaque: it accepts a prompt plus file references, executes
/// arbitrary analysis on its own infrastructure, and eventually hands back
/// unstructured text. Implementations must not retry on their own.
#[async_trait::async_trait]
pub trait ReasoningService: Send + Sync {
  /// Create the remote agent this install will talk to; returns its id
  async fn register_agent(&self, name: &str, instructions: &str) -> Result<String>;

  /// Upload one local file for the service to reason over
  async fn upload_dataset(&self, path: &Path) -> Result<FileRef>;

  /// Register prompt and attachments as one job
  async fn submit(&self, request: &JobRequest) -> Result<JobHandle>;

  /// Query current job status
  async fn poll(&self, handle: &JobHandle) -> Result<JobStatus>;

  /// Fetch the raw text output of a succeeded job
  async fn fetch_output(&self, handle: &JobHandle) -> Result<String>;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn wire_statuses_map_to_the_four_states() {
    assert_eq!(JobStatus::from_wire("queued"), JobStatus::Queued);
    assert_eq!(JobStatus::from_wire("in_progress"), JobStatus::Running);
    assert_eq!(JobStatus::from_wire("completed"), JobStatus::Succeeded);
    assert_eq!(JobStatus::from_wire("failed"), JobStatus::Failed);
  }

  #[test]
  fn unknown_statuses_keep_the_job_in_flight() {
    assert_eq!(JobStatus::from_wire("requires_action"), JobStatus::Running);
    assert!(!JobStatus::from_wire("cancelling").is_terminal());
  }

  #[test]
  fn only_succeeded_and_failed_are_terminal() {
    assert!(JobStatus::Succeeded.is_terminal());
    assert!(JobStatus::Failed.is_terminal());
    assert!(!JobStatus::Queued.is_terminal());
    assert!(!JobStatus::Running.is_terminal());
  }
}
