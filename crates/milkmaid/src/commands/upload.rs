use std::path::PathBuf;

use anyhow::Result;
use creamery::FarmStore;

use crate::display;

pub async fn handle(farm: &str, files: &[PathBuf]) -> Result<()> {
  let store = FarmStore::open()?;

  cowbell::announce(&format!("Uploading {} file(s) for farm '{}'", files.len(), farm));

  for file in files {
    let dataset = store.import_dataset(farm, file)?;
    cowbell::info(&format!("Stored {}", dataset.name));

    let preview = dataset.preview(5)?;
    display::render_preview(&dataset, &preview);
  }

  cowbell::success(&format!("{} dataset(s) stored for '{}'", files.len(), farm));
  cowbell::info("Use 'milkmaid analyze <farm> sustainability' to run the first analysis");
  Ok(())
}
