//! Dataset upload and listing handlers

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::Json as ResponseJson;
use creamery::dataset::Dataset;
use creamery::FarmStore;
use uuid::Uuid;

use crate::rest::types::{
  failure, ApiError, ApiFailure, BaseResponse, DatasetData, DatasetListData, UploadDatasetRequest,
};
use crate::state::AppState;

/// Rows of preview shipped to the dashboard
const PREVIEW_ROWS: usize = 5;

fn open_store(state: &AppState, transaction_id: Uuid) -> Result<FarmStore, ApiFailure> {
  state.store().map_err(|e| {
    let error = ApiError::new("store_unavailable", &format!("Farm store unavailable: {e}"));
    failure(StatusCode::INTERNAL_SERVER_ERROR, error, transaction_id)
  })
}

fn dataset_data(dataset: &Dataset) -> DatasetData {
  // A stored file that cannot be previewed still deserves a listing entry
  let preview = dataset.preview(PREVIEW_ROWS).unwrap_or_default();
  DatasetData { name: dataset.name.clone(), header: preview.header, rows: preview.rows }
}

/// GET /farms/{farm}/datasets - stored datasets with preview rows
pub async fn list_datasets(
  State(state): State<Arc<AppState>>,
  Path(farm): Path<String>,
) -> Result<ResponseJson<BaseResponse<DatasetListData>>, ApiFailure> {
  let transaction_id = Uuid::new_v4();
  let store = open_store(&state, transaction_id)?;

  match store.list_datasets(&farm) {
    Ok(datasets) => {
      let datasets = datasets.iter().map(dataset_data).collect();
      Ok(ResponseJson(BaseResponse::success(DatasetListData { datasets }, transaction_id)))
    }
    Err(e) => {
      let error = ApiError::new("dataset_list_failed", &format!("Could not list datasets: {e}"));
      Err(failure(StatusCode::INTERNAL_SERVER_ERROR, error, transaction_id))
    }
  }
}

/// POST /farms/{farm}/datasets - store one uploaded CSV
pub async fn upload_dataset(
  State(state): State<Arc<AppState>>,
  Path(farm): Path<String>,
  Json(request): Json<UploadDatasetRequest>,
) -> Result<ResponseJson<BaseResponse<DatasetData>>, ApiFailure> {
  let transaction_id = Uuid::new_v4();
  let store = open_store(&state, transaction_id)?;

  match store.save_dataset(&farm, &request.name, request.content.as_bytes()) {
    Ok(dataset) => {
      cowbell::event_info(&format!("Stored dataset {} for farm '{}'", dataset.name, farm));
      Ok(ResponseJson(BaseResponse::success(dataset_data(&dataset), transaction_id)))
    }
    Err(e) => {
      let error = ApiError::new("dataset_rejected", &format!("Dataset rejected: {e}"));
      Err(failure(StatusCode::UNPROCESSABLE_ENTITY, error, transaction_id))
    }
  }
}
