use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use creamery::assistant::{FileRef, JobHandle, JobRequest, JobStatus, ReasoningService};
use creamery::{FarmStore, PollSettings};
use parlor::rest::routing::create_router;
use parlor::state::AppState;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

/// Reasoning service that immediately succeeds with canned output
struct CannedService {
  output: String,
}

#[async_trait]
impl ReasoningService for CannedService {
  async fn register_agent(&self, _name: &str, _instructions: &str) -> Result<String> {
    Ok("agent_api_test".to_string())
  }

  async fn upload_dataset(&self, path: &Path) -> Result<FileRef> {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("unknown").to_string();
    Ok(FileRef { id: "file_001".to_string(), name })
  }

  async fn submit(&self, _request: &JobRequest) -> Result<JobHandle> {
    Ok(JobHandle { thread_id: "t".to_string(), run_id: "r".to_string() })
  }

  async fn poll(&self, _handle: &JobHandle) -> Result<JobStatus> {
    Ok(JobStatus::Succeeded)
  }

  async fn fetch_output(&self, _handle: &JobHandle) -> Result<String> {
    Ok(self.output.clone())
  }
}

fn test_app(dir: &TempDir, output: &str) -> Router {
  let poll = PollSettings { interval: Duration::from_millis(1), max_wait: Duration::from_secs(5) };
  let service = Arc::new(CannedService { output: output.to_string() });
  let state = Arc::new(AppState::new(dir.path().to_path_buf(), service, poll));
  create_router(state)
}

async fn body_json(response: axum::response::Response) -> Value {
  let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
  serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
  Request::builder()
    .method(method)
    .uri(uri)
    .header("content-type", "application/json")
    .body(Body::from(serde_json::to_vec(&body).unwrap()))
    .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
  Request::builder().method(method).uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn version_reports_the_crate_version() {
  let dir = TempDir::new().unwrap();
  let app = test_app(&dir, "");

  let response = app.oneshot(empty_request("GET", "/version")).await.unwrap();
  assert_eq!(response.status(), StatusCode::OK);

  let json = body_json(response).await;
  assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn status_counts_farms() {
  let dir = TempDir::new().unwrap();
  let store = FarmStore::with_root(dir.path()).unwrap();
  store.ensure_farm("meadows").unwrap();
  let app = test_app(&dir, "");

  let response = app.oneshot(empty_request("GET", "/status")).await.unwrap();
  assert_eq!(response.status(), StatusCode::OK);

  let json = body_json(response).await;
  assert_eq!(json["status"], "ok");
  assert_eq!(json["farms"], 1);
}

#[tokio::test]
async fn datasets_upload_then_list() {
  let dir = TempDir::new().unwrap();
  let app = test_app(&dir, "");

  let upload = json_request(
    "POST",
    "/farms/meadows/datasets",
    json!({ "name": "milk_yield.csv", "content": "animal_id,milk_yield\n1,22.4\n" }),
  );
  let response = app.clone().oneshot(upload).await.unwrap();
  assert_eq!(response.status(), StatusCode::OK);

  let json = body_json(response).await;
  assert_eq!(json["name"], "milk_yield.csv");
  assert_eq!(json["header"], json!(["animal_id", "milk_yield"]));

  let response = app.oneshot(empty_request("GET", "/farms/meadows/datasets")).await.unwrap();
  let json = body_json(response).await;
  assert_eq!(json["datasets"][0]["name"], "milk_yield.csv");
}

#[tokio::test]
async fn non_csv_uploads_are_rejected() {
  let dir = TempDir::new().unwrap();
  let app = test_app(&dir, "");

  let upload = json_request(
    "POST",
    "/farms/meadows/datasets",
    json!({ "name": "notes.txt", "content": "hello" }),
  );
  let response = app.oneshot(upload).await.unwrap();
  assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

  let json = body_json(response).await;
  assert_eq!(json["errors"][0]["key"], "dataset_rejected");
}

#[tokio::test]
async fn analysis_runs_and_then_serves_the_cached_report() {
  let dir = TempDir::new().unwrap();
  let store = FarmStore::with_root(dir.path()).unwrap();
  store.save_agent("agent_api_test").unwrap();
  store.save_dataset("meadows", "milk.csv", b"animal_id,milk_yield\n1,22.4\n").unwrap();

  let output = r#"{"summary":"ok","recommendations":["x"]}"#;
  let app = test_app(&dir, output);

  let response =
    app.clone().oneshot(empty_request("POST", "/farms/meadows/analyses/sustainability")).await.unwrap();
  assert_eq!(response.status(), StatusCode::OK);

  let json = body_json(response).await;
  assert_eq!(json["kind"], "sustainability");
  assert_eq!(json["cached"], true);
  assert_eq!(json["report"]["format"], "sustainability");
  assert_eq!(json["report"]["content"]["summary"], "ok");

  let response =
    app.oneshot(empty_request("GET", "/farms/meadows/reports/sustainability")).await.unwrap();
  assert_eq!(response.status(), StatusCode::OK);
  let json = body_json(response).await;
  assert_eq!(json["report"]["content"]["recommendations"][0], "x");
}

#[tokio::test]
async fn unknown_analysis_kind_is_a_bad_request() {
  let dir = TempDir::new().unwrap();
  let store = FarmStore::with_root(dir.path()).unwrap();
  store.save_agent("agent_api_test").unwrap();
  let app = test_app(&dir, "");

  let response =
    app.oneshot(empty_request("POST", "/farms/meadows/analyses/milkshake")).await.unwrap();
  assert_eq!(response.status(), StatusCode::BAD_REQUEST);

  let json = body_json(response).await;
  assert_eq!(json["errors"][0]["key"], "unknown_analysis_kind");
}

#[tokio::test]
async fn uncached_report_is_not_found() {
  let dir = TempDir::new().unwrap();
  let app = test_app(&dir, "");

  let response =
    app.oneshot(empty_request("GET", "/farms/meadows/reports/overview")).await.unwrap();
  assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn extraction_failure_carries_the_raw_output() {
  let dir = TempDir::new().unwrap();
  let store = FarmStore::with_root(dir.path()).unwrap();
  store.save_agent("agent_api_test").unwrap();
  store.save_dataset("meadows", "milk.csv", b"animal_id\n1\n").unwrap();

  let app = test_app(&dir, "the model rambled instead of answering");

  let response =
    app.oneshot(empty_request("POST", "/farms/meadows/analyses/sustainability")).await.unwrap();
  assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

  let json = body_json(response).await;
  assert_eq!(json["errors"][0]["key"], "extraction_failure");
  assert_eq!(json["errors"][0]["context"]["raw_output"], "the model rambled instead of answering");
}
