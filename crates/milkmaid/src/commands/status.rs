use anyhow::Result;
use colored::*;
use creamery::{AnalysisKind, FarmStore};

pub async fn handle(farm: &str) -> Result<()> {
  let store = FarmStore::open()?;

  cowbell::announce(&format!("Farm status - {farm}"));

  let datasets = store.list_datasets(farm)?;
  if datasets.is_empty() {
    cowbell::warn("No datasets stored for this farm");
  } else {
    cowbell::info(&format!("{} dataset(s):", datasets.len()));
    for dataset in &datasets {
      println!("  {}", dataset.name);
    }
  }

  cowbell::info("Reports:");
  for kind in AnalysisKind::all() {
    let cached = store.report_path(farm, *kind).exists();
    let marker = if cached { "cached".green() } else { "missing".dimmed() };
    println!("  {:<28} {}", kind.title(), marker);
  }

  Ok(())
}
