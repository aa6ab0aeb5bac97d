use std::time::Duration;

use anyhow::{anyhow, Result};
use creamery::assistant::ReasoningService;
use creamery::{workflow, AnalysisError, AnalysisKind, FarmStore, PollSettings, SessionContext};

use crate::display;

pub async fn handle(
  service: &dyn ReasoningService,
  farm: &str,
  kind: AnalysisKind,
  fresh: bool,
  poll_secs: u64,
  max_wait_secs: u64,
) -> Result<()> {
  let store = FarmStore::open()?;
  let ctx = SessionContext::open(&store, farm)?;

  let settings = PollSettings {
    interval: Duration::from_secs(poll_secs.max(1)),
    max_wait: Duration::from_secs(max_wait_secs),
  };

  cowbell::announce(&format!("{} - {}", kind.title(), farm));

  match workflow::get_or_run(&ctx, service, &store, kind, &settings, fresh).await {
    Ok(outcome) => {
      display::render_report(kind, &outcome.report);
      if outcome.cached {
        cowbell::chime(&format!("{} ready (cached under {})", kind.title(), kind.cache_file()));
      } else {
        cowbell::chime(&format!("{} ready (not cached this time)", kind.title()));
      }
      Ok(())
    }
    Err(AnalysisError::Extraction { detail, raw }) => {
      // The information is still in the raw output - show it all
      cowbell::error(&format!("The agent did not return a usable {}: {}", kind.title(), detail));
      cowbell::warn("Raw model output follows:");
      println!("{raw}");
      Err(anyhow!("extraction failed for {}", kind.slug()))
    }
    Err(e) => {
      cowbell::error(&format!("Analysis could not be completed: {e}"));
      Err(e.into())
    }
  }
}
