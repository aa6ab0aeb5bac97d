use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use creamery::assistant::ReasoningService;
use creamery::{FarmStore, PollSettings};

/// Shared server state: where farm data lives and how to reach the
/// reasoning service. One instance for the lifetime of the process.
pub struct AppState {
  store_root: PathBuf,
  pub service: Arc<dyn ReasoningService>,
  pub poll: PollSettings,
}

impl AppState {
  pub fn new(store_root: PathBuf, service: Arc<dyn ReasoningService>, poll: PollSettings) -> Self {
    Self { store_root, service, poll }
  }

  /// Open the farm store. Cheap - the store is just a rooted directory.
  pub fn store(&self) -> Result<FarmStore> {
    FarmStore::with_root(&self.store_root)
  }
}
