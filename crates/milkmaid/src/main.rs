use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use creamery::assistant::{HostedService, ServiceConfig};
use creamery::AnalysisKind;

use milkmaid::commands;

#[derive(Parser)]
#[command(name = "milkmaid")]
#[command(about = "Dairy sustainability twin - upload farm CSVs, delegate the analysis, keep the reports")]
struct Cli {
  /// Reasoning service API key (or use ASSISTANT_API_KEY env var)
  #[arg(long, env = "ASSISTANT_API_KEY")]
  api_key: Option<String>,

  /// Reasoning service base URL override (or use ASSISTANT_BASE_URL env var)
  #[arg(long, env = "ASSISTANT_BASE_URL")]
  base_url: Option<String>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Create the remote analysis agent once and remember its id
  Register {
    /// Display name for the remote agent
    #[arg(long, default_value = "DairySustainabilityAgent")]
    name: String,
  },
  /// Copy CSV datasets into a farm's storage directory
  Upload {
    /// Farm name or id
    farm: String,
    /// CSV files to store
    #[arg(required = true)]
    files: Vec<PathBuf>,
  },
  /// Run an analysis for a farm (serves the cached report unless --fresh)
  Analyze {
    /// Farm name or id
    farm: String,
    /// Which analysis to run
    kind: AnalysisKind,
    /// Re-run the remote job even when a cached report exists
    #[arg(long)]
    fresh: bool,
    /// Seconds between status polls
    #[arg(long, default_value_t = 2)]
    poll_secs: u64,
    /// Overall wait budget in seconds
    #[arg(long, default_value_t = 600)]
    max_wait_secs: u64,
  },
  /// Show a cached report without contacting the service
  Report {
    /// Farm name or id
    farm: String,
    /// Which report to show
    kind: AnalysisKind,
  },
  /// List farms with stored data
  Farms,
  /// Show datasets and cached reports for a farm
  Status {
    /// Farm name or id
    farm: String,
  },
}

impl Cli {
  /// Build the hosted service client; commands that stay local never call this
  fn service(&self) -> Result<HostedService> {
    let api_key = self
      .api_key
      .clone()
      .ok_or_else(|| anyhow!("no API key; pass --api-key or set ASSISTANT_API_KEY"))?;
    let config = ServiceConfig::new(api_key).with_base_url(self.base_url.clone());
    Ok(HostedService::new(config))
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  match &cli.command {
    Commands::Register { name } => {
      let service = cli.service()?;
      commands::register::handle(&service, name).await
    }
    Commands::Upload { farm, files } => commands::upload::handle(farm, files).await,
    Commands::Analyze { farm, kind, fresh, poll_secs, max_wait_secs } => {
      let service = cli.service()?;
      commands::analyze::handle(&service, farm, *kind, *fresh, *poll_secs, *max_wait_secs).await
    }
    Commands::Report { farm, kind } => commands::report::handle(farm, *kind).await,
    Commands::Farms => commands::farms::handle().await,
    Commands::Status { farm } => commands::status::handle(farm).await,
  }
}
