
use std::time::Duration;

use creamery::assistant::{submit_and_wait, FailureReason, JobOutcome, JobRequest};
use mock_service::ScriptedService;

fn request() -> JobRequest {
  JobRequest {
    agent_id: "agent_test_001".to_string(),
    prompt: "analyze".to_string(),
    attachments: Vec::new(),
  }
}

#[tokio::test(start_paused = true)]
async fn success_on_third_poll_returns_raw_output() {
  let service = ScriptedService::succeeding_after(2, "raw model text");

  let outcome =
    submit_and_wait(&service, &request(), Duration::from_secs(2), Duration::from_secs(60)).await;

  assert_eq!(outcome, JobOutcome::Success("raw model text".to_string()));
  assert_eq!(service.polls(), 3);
}

#[tokio::test(start_paused = true)]
async fn never_terminal_times_out_within_budget() {
  let service = ScriptedService::never_finishing();

  let outcome =
    submit_and_wait(&service, &request(), Duration::from_secs(2), Duration::from_secs(7)).await;

  assert_eq!(outcome, JobOutcome::Failure(FailureReason::Timeout));
  // Polls at t=0,2,4,6; the next sleep would overshoot the budget
  assert_eq!(service.polls(), 4);
}

#[tokio::test(start_paused = true)]
async fn timeout_fires_even_with_a_tiny_budget() {
  let service = ScriptedService::never_finishing();

  let outcome =
    submit_and_wait(&service, &request(), Duration::from_secs(5), Duration::ZERO).await;

  assert_eq!(outcome, JobOutcome::Failure(FailureReason::Timeout));
}

#[tokio::test]
async fn submission_error_is_distinguished() {
  let service = ScriptedService::failing_submission();

  let outcome =
    submit_and_wait(&service, &request(), Duration::from_millis(1), Duration::from_secs(1)).await;

  match outcome {
    JobOutcome::Failure(FailureReason::Submission(detail)) => {
      assert!(detail.contains("rejected"));
    }
    other => panic!("expected submission failure, got {other:?}"),
  }
  assert_eq!(service.polls(), 0);
}

#[tokio::test]
async fn remote_reported_failure_is_distinguished() {
  let service = ScriptedService::reporting_failure();

  let outcome =
    submit_and_wait(&service, &request(), Duration::from_millis(1), Duration::from_secs(1)).await;

  assert!(matches!(outcome, JobOutcome::Failure(FailureReason::JobFailed(_))));
  assert_eq!(service.polls(), 1);
}
