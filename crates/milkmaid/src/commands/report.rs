use anyhow::Result;
use creamery::{workflow, AnalysisKind, FarmStore};

use crate::display;

pub async fn handle(farm: &str, kind: AnalysisKind) -> Result<()> {
  let store = FarmStore::open()?;

  match workflow::cached_report(&store, farm, kind)? {
    Some(report) => {
      display::render_report(kind, &report);
      Ok(())
    }
    None => {
      cowbell::warn(&format!("No cached {} for farm '{}'", kind.title(), farm));
      cowbell::info(&format!("Run 'milkmaid analyze {} {}' to produce one", farm, kind.slug()));
      Ok(())
    }
  }
}
