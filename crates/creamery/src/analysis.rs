use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::extract::ShapeHint;

/// The closed set of analyses the dashboard offers. Every kind talks to the
/// same remote agent - what differs is the specialist persona, the prompt,
/// the expected output shape, and where the result is cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
  Sustainability,
  Profile,
  Weather,
  FeedStrategy,
  Biogas,
  HerdHealth,
  Overview,
}

/// Specialist roles the prompts speak as. Routing between them is an
/// explicit function of the analysis kind, not free-form text matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Specialist {
  Analyst,
  Registrar,
  Meteorologist,
  Nutritionist,
  EnergyPlanner,
  Veterinarian,
}

impl AnalysisKind {
  pub fn all() -> &'static [AnalysisKind] {
    &[
      AnalysisKind::Sustainability,
      AnalysisKind::Profile,
      AnalysisKind::Weather,
      AnalysisKind::FeedStrategy,
      AnalysisKind::Biogas,
      AnalysisKind::HerdHealth,
      AnalysisKind::Overview,
    ]
  }

  /// Stable identifier used in CLI arguments and REST paths
  pub fn slug(&self) -> &'static str {
    match self {
      AnalysisKind::Sustainability => "sustainability",
      AnalysisKind::Profile => "profile",
      AnalysisKind::Weather => "weather",
      AnalysisKind::FeedStrategy => "feed-strategy",
      AnalysisKind::Biogas => "biogas",
      AnalysisKind::HerdHealth => "herd-health",
      AnalysisKind::Overview => "overview",
    }
  }

  pub fn title(&self) -> &'static str {
    match self {
      AnalysisKind::Sustainability => "Sustainability Analysis",
      AnalysisKind::Profile => "Farm Profile",
      AnalysisKind::Weather => "Weather & Climate Summary",
      AnalysisKind::FeedStrategy => "Feed Strategy",
      AnalysisKind::Biogas => "Biogas & Manure",
      AnalysisKind::HerdHealth => "Herd Health",
      AnalysisKind::Overview => "Dashboard Overview",
    }
  }

  /// Which specialist persona answers this kind of question
  pub fn specialist(&self) -> Specialist {
    match self {
      AnalysisKind::Sustainability => Specialist::Analyst,
      AnalysisKind::Profile => Specialist::Registrar,
      AnalysisKind::Weather => Specialist::Meteorologist,
      AnalysisKind::FeedStrategy => Specialist::Nutritionist,
      AnalysisKind::Biogas => Specialist::EnergyPlanner,
      AnalysisKind::HerdHealth => Specialist::Veterinarian,
      AnalysisKind::Overview => Specialist::Analyst,
    }
  }

  /// Expected payload shape in the model output. `None` means the raw text
  /// itself is the report (the weather summary is cached verbatim).
  pub fn shape(&self) -> Option<ShapeHint> {
    match self {
      AnalysisKind::Sustainability | AnalysisKind::Profile => Some(ShapeHint::JsonObject),
      AnalysisKind::Weather => None,
      AnalysisKind::FeedStrategy | AnalysisKind::Biogas | AnalysisKind::HerdHealth | AnalysisKind::Overview => {
        Some(ShapeHint::sections())
      }
    }
  }

  /// File name of the cached report inside the farm's directory
  pub fn cache_file(&self) -> &'static str {
    match self {
      AnalysisKind::Sustainability => "sustainability_report.json",
      AnalysisKind::Profile => "profile.json",
      AnalysisKind::Weather => "weather_summary.txt",
      AnalysisKind::FeedStrategy => "feed_strategy_report.md",
      AnalysisKind::Biogas => "biogas_report.md",
      AnalysisKind::HerdHealth => "herd_health_report.md",
      AnalysisKind::Overview => "dashboard_overview.md",
    }
  }

  /// Whether this analysis reasons over the uploaded CSV datasets.
  /// The weather summary attaches the cached farm profile instead.
  pub fn wants_datasets(&self) -> bool {
    !matches!(self, AnalysisKind::Weather)
  }
}

impl Specialist {
  /// Persona line prefixed to every prompt of this specialist
  pub fn persona(&self) -> &'static str {
    match self {
      Specialist::Analyst => "You are a dairy sustainability analyst.",
      Specialist::Registrar => "You are a dairy farm registrar assembling a factual farm profile.",
      Specialist::Meteorologist => "You are an agricultural meteorologist advising a dairy farm.",
      Specialist::Nutritionist => "You are a dairy cattle nutritionist.",
      Specialist::EnergyPlanner => "You are a farm energy planner specializing in manure management and biogas.",
      Specialist::Veterinarian => "You are a herd health veterinarian.",
    }
  }
}

impl fmt::Display for AnalysisKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.slug())
  }
}

impl FromStr for AnalysisKind {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let normalized = s.trim().to_lowercase().replace('_', "-");
    AnalysisKind::all()
      .iter()
      .copied()
      .find(|kind| kind.slug() == normalized)
      .ok_or_else(|| format!("unknown analysis kind '{s}' (expected one of: {})", known_slugs()))
  }
}

fn known_slugs() -> String {
  AnalysisKind::all().iter().map(|k| k.slug()).collect::<Vec<_>>().join(", ")
}
