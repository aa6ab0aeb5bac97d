//! Per-farm filesystem store.
//!
//! One directory per farm under the data root holds the uploaded CSV
//! datasets and every cached report artifact. Reports are plain files in
//! their natural format (pretty JSON, Markdown, raw text) so farmers can
//! read the cache directly.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use dirs::home_dir;
use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisKind;
use crate::dataset::Dataset;
use crate::extract::split_sections;
use crate::report::{sections_to_markdown, FarmProfile, Report, SustainabilityReport};

/// Environment override for the data root
pub const DATA_DIR_ENV: &str = "CREAMERY_DATA_DIR";

/// Contents of `agent.json` at the data root
#[derive(Debug, Serialize, Deserialize)]
struct AgentRecord {
  id: String,
}

pub struct FarmStore {
  root: PathBuf,
}

impl FarmStore {
  /// Open the default store: `$CREAMERY_DATA_DIR` or `~/.creamery/farm_data`
  pub fn open() -> Result<Self> {
    let root = match std::env::var_os(DATA_DIR_ENV) {
      Some(dir) => PathBuf::from(dir),
      None => home_dir()
        .ok_or_else(|| anyhow!("could not determine home directory"))?
        .join(".creamery")
        .join("farm_data"),
    };
    Self::with_root(root)
  }

  /// Open a store rooted at an explicit directory (tests, servers)
  pub fn with_root(root: impl Into<PathBuf>) -> Result<Self> {
    let root = root.into();
    fs::create_dir_all(&root)?;
    Ok(Self { root })
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Directory-safe form of a farm name, matching what the dashboard shows
  pub fn slugify(farm: &str) -> String {
    farm.trim().replace(' ', "_")
  }

  fn farm_dir(&self, farm: &str) -> PathBuf {
    self.root.join(Self::slugify(farm))
  }

  /// Create the farm's directory if needed and return it
  pub fn ensure_farm(&self, farm: &str) -> Result<PathBuf> {
    let dir = self.farm_dir(farm);
    fs::create_dir_all(&dir)?;
    Ok(dir)
  }

  /// All farms that have a storage directory, sorted by name
  pub fn list_farms(&self) -> Result<Vec<String>> {
    let mut farms = Vec::new();
    for entry in fs::read_dir(&self.root)? {
      let entry = entry?;
      if entry.file_type()?.is_dir() {
        if let Some(name) = entry.file_name().to_str() {
          farms.push(name.to_string());
        }
      }
    }
    farms.sort();
    Ok(farms)
  }

  /// Persist uploaded CSV bytes as a dataset of the farm
  pub fn save_dataset(&self, farm: &str, name: &str, content: &[u8]) -> Result<Dataset> {
    if !name.ends_with(".csv") {
      return Err(anyhow!("dataset '{name}' is not a .csv file"));
    }
    if name.contains('/') || name.contains('\\') || name.starts_with('.') {
      return Err(anyhow!("dataset name '{name}' is not a plain file name"));
    }
    let dir = self.ensure_farm(farm)?;
    let path = dir.join(name);
    fs::write(&path, content)?;
    Ok(Dataset { name: name.to_string(), farm: Self::slugify(farm), path })
  }

  /// Copy an existing CSV file into the farm's directory
  pub fn import_dataset(&self, farm: &str, source: &Path) -> Result<Dataset> {
    let name = source
      .file_name()
      .and_then(|n| n.to_str())
      .ok_or_else(|| anyhow!("cannot determine file name of {}", source.display()))?;
    let content = fs::read(source)?;
    self.save_dataset(farm, name, &content)
  }

  /// Every stored dataset of the farm, sorted by file name
  pub fn list_datasets(&self, farm: &str) -> Result<Vec<Dataset>> {
    let dir = self.farm_dir(farm);
    if !dir.exists() {
      return Ok(Vec::new());
    }

    let mut datasets = Vec::new();
    for entry in fs::read_dir(&dir)? {
      let entry = entry?;
      let path = entry.path();
      if path.extension().and_then(|e| e.to_str()) == Some("csv") {
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
          datasets.push(Dataset { name: name.to_string(), farm: Self::slugify(farm), path: path.clone() });
        }
      }
    }
    datasets.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(datasets)
  }

  /// Path of the cached report artifact for this farm and kind
  pub fn report_path(&self, farm: &str, kind: AnalysisKind) -> PathBuf {
    self.farm_dir(farm).join(kind.cache_file())
  }

  /// Load a cached report, or `None` when it was never produced
  pub fn load_report(&self, farm: &str, kind: AnalysisKind) -> Result<Option<Report>> {
    let path = self.report_path(farm, kind);
    if !path.exists() {
      return Ok(None);
    }
    let content = fs::read_to_string(&path)?;

    let report = match kind {
      AnalysisKind::Sustainability => {
        Report::Sustainability(serde_json::from_str::<SustainabilityReport>(&content)?)
      }
      AnalysisKind::Profile => Report::Profile(serde_json::from_str::<FarmProfile>(&content)?),
      AnalysisKind::Weather => Report::Text(content.trim().to_string()),
      _ => Report::Sections(split_sections(&content, "## ")),
    };
    Ok(Some(report))
  }

  /// Write a report artifact, replacing any previous one.
  ///
  /// Callers only reach this after successful extraction - a failed refresh
  /// must leave the previous artifact untouched.
  pub fn save_report(&self, farm: &str, kind: AnalysisKind, report: &Report) -> Result<()> {
    self.ensure_farm(farm)?;
    let path = self.report_path(farm, kind);

    let content = match report {
      Report::Sustainability(r) => serde_json::to_string_pretty(r)?,
      Report::Profile(p) => serde_json::to_string_pretty(p)?,
      Report::Sections(sections) => sections_to_markdown(sections),
      Report::Text(text) => text.clone(),
    };
    fs::write(&path, content)?;
    Ok(())
  }

  fn agent_file(&self) -> PathBuf {
    self.root.join("agent.json")
  }

  /// Id of the registered remote agent, if registration ever ran
  pub fn load_agent(&self) -> Result<Option<String>> {
    let path = self.agent_file();
    if !path.exists() {
      return Ok(None);
    }
    let record: AgentRecord = serde_json::from_str(&fs::read_to_string(&path)?)?;
    Ok(Some(record.id))
  }

  /// Remember the registered remote agent id
  pub fn save_agent(&self, id: &str) -> Result<()> {
    let record = AgentRecord { id: id.to_string() };
    fs::write(self.agent_file(), serde_json::to_string_pretty(&record)?)?;
    Ok(())
  }
}
