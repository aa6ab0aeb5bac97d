//! REST API types with schemars annotations for OpenAPI generation

use axum::http::StatusCode;
use axum::response::Json as ResponseJson;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current API version
pub const API_VERSION: &str = "1";

// Base Response Structure
// ======================

/// Base response object for all API endpoints
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct BaseResponse<T> {
  /// API versioning information
  pub versioning: VersionInfo,

  /// Transaction ID for logging correlation
  pub transaction_id: Uuid,

  /// When the response was produced
  pub generated_at: DateTime<Utc>,

  /// Optional error information
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub errors: Vec<ApiError>,

  /// Response data (generic for different endpoint types)
  #[serde(flatten, skip_serializing_if = "Option::is_none")]
  pub data: Option<T>,
}

impl<T> BaseResponse<T> {
  pub fn success(data: T, transaction_id: Uuid) -> Self {
    Self {
      versioning: VersionInfo::current(),
      transaction_id,
      generated_at: Utc::now(),
      errors: Vec::new(),
      data: Some(data),
    }
  }

  pub fn error(errors: Vec<ApiError>, transaction_id: Uuid) -> Self {
    Self {
      versioning: VersionInfo::current(),
      transaction_id,
      generated_at: Utc::now(),
      errors,
      data: None,
    }
  }
}

/// API versioning information
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct VersionInfo {
  /// The latest version of the API
  pub latest: String,

  /// The version of the API that produced the response
  pub resolved: String,
}

impl VersionInfo {
  pub fn current() -> Self {
    Self { latest: API_VERSION.to_string(), resolved: API_VERSION.to_string() }
  }
}

/// API error information
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ApiError {
  /// Error key, unique to the error source
  pub key: String,

  /// Human readable error message
  pub message: String,

  /// Additional error context
  #[serde(default)]
  pub context: serde_json::Value,
}

impl ApiError {
  pub fn new(key: &str, message: &str) -> Self {
    Self { key: key.to_string(), message: message.to_string(), context: serde_json::Value::Null }
  }

  pub fn with_context(mut self, context: serde_json::Value) -> Self {
    self.context = context;
    self
  }
}

/// Empty payload for error responses
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct NoData {}

/// Error half of every handler result
pub type ApiFailure = (StatusCode, ResponseJson<BaseResponse<NoData>>);

/// Build the standard error tuple handlers return
pub fn failure(status: StatusCode, error: ApiError, transaction_id: Uuid) -> ApiFailure {
  (status, ResponseJson(BaseResponse::error(vec![error], transaction_id)))
}

// Status/Version Endpoints
// =======================

/// Response for /status endpoint
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct StatusData {
  /// Whether the server is ready to take requests
  pub status: String,
  /// Number of farms with stored data
  pub farms: usize,
}

/// Response for /version endpoint
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct VersionData {
  /// Server version
  pub version: String,
}

// Farm/Dataset Endpoints
// ======================

/// Response for GET /farms
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct FarmsData {
  pub farms: Vec<String>,
}

/// One stored dataset with its preview rows
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DatasetData {
  pub name: String,
  pub header: Vec<String>,
  pub rows: Vec<Vec<String>>,
}

/// Response for GET /farms/{farm}/datasets
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DatasetListData {
  pub datasets: Vec<DatasetData>,
}

/// Request body for POST /farms/{farm}/datasets
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UploadDatasetRequest {
  /// Plain file name, must end in .csv
  pub name: String,
  /// Full file content
  pub content: String,
}

// Analysis/Report Endpoints
// =========================

/// Query parameters for POST /farms/{farm}/analyses/{kind}
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct AnalyzeQuery {
  /// Re-run the remote job even when a cached report exists
  #[serde(default)]
  pub fresh: bool,
}

/// Response for analysis and report endpoints
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ReportData {
  /// Analysis kind slug
  pub kind: String,
  /// Whether this report was served from / written to the cache
  pub cached: bool,
  /// The report itself, shaped per kind
  pub report: serde_json::Value,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn success_responses_flatten_their_data() {
    let response = BaseResponse::success(FarmsData { farms: vec!["A".to_string()] }, Uuid::nil());
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["farms"][0], "A");
    assert_eq!(json["versioning"]["latest"], API_VERSION);
    assert!(json.get("errors").is_none());
  }

  #[test]
  fn error_responses_carry_key_and_context() {
    let error = ApiError::new("timeout", "analysis timed out")
      .with_context(serde_json::json!({"max_wait_secs": 600}));
    let response = BaseResponse::<NoData>::error(vec![error], Uuid::nil());
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["errors"][0]["key"], "timeout");
    assert_eq!(json["errors"][0]["context"]["max_wait_secs"], 600);
  }
}
