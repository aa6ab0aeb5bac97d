use anyhow::Result;
use creamery::FarmStore;

pub async fn handle() -> Result<()> {
  let store = FarmStore::open()?;
  let farms = store.list_farms()?;

  if farms.is_empty() {
    cowbell::info("No farms yet - upload datasets with 'milkmaid upload <farm> <files...>'");
    return Ok(());
  }

  cowbell::info(&format!("{} farm(s) in {}", farms.len(), store.root().display()));
  for farm in farms {
    println!("{farm}");
  }
  Ok(())
}
