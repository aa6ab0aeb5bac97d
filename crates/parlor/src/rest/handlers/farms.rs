//! Farm listing handlers

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json as ResponseJson;
use uuid::Uuid;

use crate::rest::types::{failure, ApiError, ApiFailure, BaseResponse, FarmsData};
use crate::state::AppState;

/// GET /farms - every farm with a storage directory
pub async fn list_farms(
  State(state): State<Arc<AppState>>,
) -> Result<ResponseJson<BaseResponse<FarmsData>>, ApiFailure> {
  let transaction_id = Uuid::new_v4();

  match state.store().and_then(|store| store.list_farms()) {
    Ok(farms) => Ok(ResponseJson(BaseResponse::success(FarmsData { farms }, transaction_id))),
    Err(e) => {
      let error = ApiError::new("farm_list_failed", &format!("Could not list farms: {e}"));
      Err(failure(StatusCode::INTERNAL_SERVER_ERROR, error, transaction_id))
    }
  }
}
