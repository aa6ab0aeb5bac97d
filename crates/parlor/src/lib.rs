//! Dashboard REST server for the dairy sustainability twin.
//!
//! The browser-facing surface: farms, datasets, analyses and cached reports
//! over HTTP, all backed by the same creamery workflows the CLI uses.

pub mod rest;
pub mod state;

pub use state::AppState;
