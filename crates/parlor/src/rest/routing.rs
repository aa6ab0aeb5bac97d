//! Axum router configuration for all endpoints

use std::sync::Arc;

use axum::{
  routing::{get, post},
  Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::rest::handlers::{analyses, datasets, farms, status};
use crate::state::AppState;

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
  Router::new()
    // Status and version endpoints
    .route("/status", get(status::status))
    .route("/version", get(status::version))
    // Farm endpoints
    .route("/farms", get(farms::list_farms))
    // Dataset endpoints
    .route("/farms/{farm}/datasets", get(datasets::list_datasets).post(datasets::upload_dataset))
    // Analysis endpoints
    .route("/farms/{farm}/analyses/{kind}", post(analyses::run_analysis))
    .route("/farms/{farm}/reports/{kind}", get(analyses::get_report))
    // The dashboard is a browser app on another origin
    .layer(CorsLayer::permissive())
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
