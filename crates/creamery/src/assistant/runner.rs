//! Submit-and-poll loop against the reasoning service.
//!
//! One job at a time, no retries, no remote cancellation: once submitted,
//! the remote run finishes on its own schedule. The only thing the caller
//! controls is how long it is willing to keep waiting.

use std::time::Duration;

use tokio::time::{sleep, Instant};

use super::{FailureReason, JobOutcome, JobRequest, JobStatus, ReasoningService};

/// Submit `request` and wait for a terminal status, polling at
/// `poll_interval` until `max_wait` of wall-clock time has been spent.
///
/// Suspends the calling task for the whole duration; callers that front a UI
/// should show an indeterminate progress indicator while this is pending.
pub async fn submit_and_wait(
  service: &dyn ReasoningService,
  request: &JobRequest,
  poll_interval: Duration,
  max_wait: Duration,
) -> JobOutcome {
  assert!(poll_interval > Duration::ZERO, "poll_interval must be positive");

  let handle = match service.submit(request).await {
    Ok(handle) => handle,
    Err(e) => return JobOutcome::Failure(FailureReason::Submission(e.to_string())),
  };

  let deadline = Instant::now() + max_wait;
  loop {
    let status = match service.poll(&handle).await {
      Ok(status) => status,
      Err(e) => {
        return JobOutcome::Failure(FailureReason::JobFailed(format!(
          "run status unavailable: {e}"
        )))
      }
    };

    match status {
      JobStatus::Succeeded => {
        return match service.fetch_output(&handle).await {
          Ok(raw_text) => JobOutcome::Success(raw_text),
          Err(e) => JobOutcome::Failure(FailureReason::JobFailed(format!(
            "run completed but output unavailable: {e}"
          ))),
        };
      }
      JobStatus::Failed => {
        return JobOutcome::Failure(FailureReason::JobFailed(
          "remote run reported failure".to_string(),
        ));
      }
      JobStatus::Queued | JobStatus::Running => {}
    }

    // Give up before a sleep that would overshoot the budget
    if Instant::now() + poll_interval > deadline {
      return JobOutcome::Failure(FailureReason::Timeout);
    }
    sleep(poll_interval).await;
  }
}
