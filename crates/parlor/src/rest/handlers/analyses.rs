//! Analysis and cached-report handlers.
//!
//! Running an analysis blocks the request until the remote job reaches a
//! terminal state - the dashboard shows its spinner for the duration.

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json as ResponseJson;
use creamery::{workflow, AnalysisError, AnalysisKind, Report, SessionContext};
use serde_json::json;
use uuid::Uuid;

use crate::rest::types::{
  failure, AnalyzeQuery, ApiError, ApiFailure, BaseResponse, ReportData,
};
use crate::state::AppState;

fn parse_kind(kind: &str, transaction_id: Uuid) -> Result<AnalysisKind, ApiFailure> {
  AnalysisKind::from_str(kind).map_err(|e| {
    failure(StatusCode::BAD_REQUEST, ApiError::new("unknown_analysis_kind", &e), transaction_id)
  })
}

fn report_data(kind: AnalysisKind, report: &Report, cached: bool) -> ReportData {
  let report = serde_json::to_value(report).unwrap_or(serde_json::Value::Null);
  ReportData { kind: kind.slug().to_string(), cached, report }
}

fn analysis_failure(e: AnalysisError, transaction_id: Uuid) -> ApiFailure {
  match e {
    AnalysisError::Submission(detail) => failure(
      StatusCode::BAD_GATEWAY,
      ApiError::new("submission_error", &format!("Analysis could not be completed: {detail}")),
      transaction_id,
    ),
    AnalysisError::JobFailed(detail) => failure(
      StatusCode::BAD_GATEWAY,
      ApiError::new("job_failed", &format!("Analysis could not be completed: {detail}")),
      transaction_id,
    ),
    AnalysisError::Timeout { waited_secs } => failure(
      StatusCode::GATEWAY_TIMEOUT,
      ApiError::new("timeout", "Analysis could not be completed: timed out")
        .with_context(json!({ "waited_secs": waited_secs })),
      transaction_id,
    ),
    // The raw output travels in the error context so the dashboard can show
    // it verbatim instead of losing the result
    AnalysisError::Extraction { detail, raw } => failure(
      StatusCode::UNPROCESSABLE_ENTITY,
      ApiError::new("extraction_failure", &detail).with_context(json!({ "raw_output": raw })),
      transaction_id,
    ),
    AnalysisError::Storage(detail) => failure(
      StatusCode::INTERNAL_SERVER_ERROR,
      ApiError::new("storage_error", &detail),
      transaction_id,
    ),
  }
}

/// POST /farms/{farm}/analyses/{kind} - run (or reuse) an analysis
pub async fn run_analysis(
  State(state): State<Arc<AppState>>,
  Path((farm, kind)): Path<(String, String)>,
  Query(query): Query<AnalyzeQuery>,
) -> Result<ResponseJson<BaseResponse<ReportData>>, ApiFailure> {
  let transaction_id = Uuid::new_v4();
  let kind = parse_kind(&kind, transaction_id)?;

  let store = state.store().map_err(|e| {
    failure(
      StatusCode::INTERNAL_SERVER_ERROR,
      ApiError::new("store_unavailable", &format!("Farm store unavailable: {e}")),
      transaction_id,
    )
  })?;

  let ctx = SessionContext::open(&store, &farm).map_err(|e| {
    failure(
      StatusCode::CONFLICT,
      ApiError::new("no_agent", &format!("No usable session for '{farm}': {e}")),
      transaction_id,
    )
  })?;

  cowbell::event_info(&format!("{} requested for farm '{}'", kind.title(), farm));

  match workflow::get_or_run(&ctx, state.service.as_ref(), &store, kind, &state.poll, query.fresh).await {
    Ok(outcome) => {
      cowbell::event_success(&format!("{} finished for farm '{}'", kind.title(), farm));
      Ok(ResponseJson(BaseResponse::success(
        report_data(kind, &outcome.report, outcome.cached),
        transaction_id,
      )))
    }
    Err(e) => {
      cowbell::event_error(&format!("{} failed for farm '{}': {e}", kind.title(), farm));
      Err(analysis_failure(e, transaction_id))
    }
  }
}

/// GET /farms/{farm}/reports/{kind} - cached report only, never runs a job
pub async fn get_report(
  State(state): State<Arc<AppState>>,
  Path((farm, kind)): Path<(String, String)>,
) -> Result<ResponseJson<BaseResponse<ReportData>>, ApiFailure> {
  let transaction_id = Uuid::new_v4();
  let kind = parse_kind(&kind, transaction_id)?;

  let store = state.store().map_err(|e| {
    failure(
      StatusCode::INTERNAL_SERVER_ERROR,
      ApiError::new("store_unavailable", &format!("Farm store unavailable: {e}")),
      transaction_id,
    )
  })?;

  match workflow::cached_report(&store, &farm, kind) {
    Ok(Some(report)) => {
      Ok(ResponseJson(BaseResponse::success(report_data(kind, &report, true), transaction_id)))
    }
    Ok(None) => Err(failure(
      StatusCode::NOT_FOUND,
      ApiError::new("report_not_cached", &format!("No cached {} for '{farm}'", kind.title())),
      transaction_id,
    )),
    Err(e) => Err(analysis_failure(e, transaction_id)),
  }
}
