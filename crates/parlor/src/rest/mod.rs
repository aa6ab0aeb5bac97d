//! REST API module for the dashboard server
//!
//! Uses axum for routing and schemars annotations on the response types for
//! OpenAPI documentation generation.

pub mod handlers;
pub mod routing;
pub mod types;
