use anyhow::Result;
use creamery::assistant::ReasoningService;
use creamery::{workflow, FarmStore};

pub async fn handle(service: &dyn ReasoningService, name: &str) -> Result<()> {
  let store = FarmStore::open()?;

  if let Some(existing) = store.load_agent()? {
    cowbell::warn(&format!("An agent is already registered ({existing}); replacing it"));
  }

  cowbell::announce("Registering remote analysis agent");
  let id = workflow::register_agent(service, &store, name).await?;

  cowbell::success(&format!("Created agent: {id}"));
  cowbell::info("All analyses will now be routed to this agent");
  Ok(())
}
