//! Status and version endpoint handlers

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json as ResponseJson;
use uuid::Uuid;

use crate::rest::types::{failure, ApiError, ApiFailure, BaseResponse, StatusData, VersionData};
use crate::state::AppState;

/// GET /status - is the server ready, and how much data does it hold
pub async fn status(
  State(state): State<Arc<AppState>>,
) -> Result<ResponseJson<BaseResponse<StatusData>>, ApiFailure> {
  let transaction_id = Uuid::new_v4();

  let farms = match state.store().and_then(|store| store.list_farms()) {
    Ok(farms) => farms.len(),
    Err(e) => {
      let error = ApiError::new("store_unavailable", &format!("Farm store unavailable: {e}"));
      return Err(failure(StatusCode::INTERNAL_SERVER_ERROR, error, transaction_id));
    }
  };

  let data = StatusData { status: "ok".to_string(), farms };
  Ok(ResponseJson(BaseResponse::success(data, transaction_id)))
}

/// GET /version - server version
pub async fn version() -> ResponseJson<BaseResponse<VersionData>> {
  let transaction_id = Uuid::new_v4();
  let data = VersionData { version: env!("CARGO_PKG_VERSION").to_string() };
  ResponseJson(BaseResponse::success(data, transaction_id))
}
