//! Dashboard REST Server
//!
//! HTTP surface of the dairy sustainability twin. Serves farm data and
//! cached reports, and fronts the hosted reasoning service for new analyses.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::Parser;
use creamery::assistant::{HostedService, ServiceConfig};
use creamery::{FarmStore, PollSettings};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use parlor::rest::routing::create_router;
use parlor::state::AppState;

#[derive(Parser)]
#[command(name = "parlor")]
#[command(about = "Dairy twin dashboard REST server")]
#[command(version)]
struct Args {
  /// Server bind address
  #[arg(long, default_value = "127.0.0.1:4400")]
  bind: SocketAddr,

  /// Reasoning service API key (or use ASSISTANT_API_KEY env var)
  #[arg(long, env = "ASSISTANT_API_KEY")]
  api_key: Option<String>,

  /// Reasoning service base URL override
  #[arg(long, env = "ASSISTANT_BASE_URL")]
  base_url: Option<String>,

  /// Farm data root (defaults to the store's standard location)
  #[arg(long)]
  data_dir: Option<PathBuf>,

  /// Seconds between remote job status polls
  #[arg(long, default_value_t = 2)]
  poll_secs: u64,

  /// Overall wait budget per analysis in seconds
  #[arg(long, default_value_t = 600)]
  max_wait_secs: u64,

  /// Enable verbose logging
  #[arg(short, long)]
  verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let filter = if args.verbose {
    EnvFilter::new("debug,hyper=info,reqwest=info")
  } else {
    EnvFilter::new("parlor=info,tower_http=info,warn")
  };
  tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

  let api_key =
    args.api_key.ok_or_else(|| anyhow!("no API key; pass --api-key or set ASSISTANT_API_KEY"))?;
  let service: Arc<dyn creamery::ReasoningService> =
    Arc::new(HostedService::new(ServiceConfig::new(api_key).with_base_url(args.base_url.clone())));

  let store_root = match args.data_dir {
    Some(dir) => dir,
    None => FarmStore::open()?.root().to_path_buf(),
  };

  let poll = PollSettings {
    interval: Duration::from_secs(args.poll_secs.max(1)),
    max_wait: Duration::from_secs(args.max_wait_secs),
  };

  let state = Arc::new(AppState::new(store_root.clone(), service, poll));

  cowbell::announce(&format!("Starting dairy twin dashboard server v{}", env!("CARGO_PKG_VERSION")));
  cowbell::info(&format!("Farm data root: {}", store_root.display()));
  cowbell::info(&format!("Binding to address: {}", args.bind));

  let listener = tokio::net::TcpListener::bind(args.bind).await?;
  axum::serve(listener, create_router(state)).await?;

  Ok(())
}
