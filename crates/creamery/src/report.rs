use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One titled section of a Markdown report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
  pub title: String,
  pub body: String,
}

/// The three metric groups of the sustainability report. Metric names inside
/// each group are whatever the model computed (e.g. `total_milk_income`,
/// `percentage_sick_cows`) - conventions, not a validated contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SustainabilityMetrics {
  #[serde(default)]
  pub economic: BTreeMap<String, f64>,
  #[serde(default)]
  pub environmental: BTreeMap<String, f64>,
  #[serde(default)]
  pub animal_welfare: BTreeMap<String, f64>,
}

/// The JSON report cached as `sustainability_report.json`.
///
/// All fields are lenient: the model occasionally omits one, and a partial
/// report is still worth showing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SustainabilityReport {
  #[serde(default)]
  pub summary: String,
  #[serde(default)]
  pub sustainability: SustainabilityMetrics,
  #[serde(default)]
  pub recommendations: Vec<String>,
}

/// Farm profile generated once from the uploaded datasets, cached as
/// `profile.json` and re-attached to later analyses (weather).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FarmProfile {
  #[serde(default)]
  pub location: String,
  #[serde(default)]
  pub farm_size_ha: f64,
  #[serde(default)]
  pub num_animals: u32,
  #[serde(default)]
  pub owner: String,
}

/// A cached analysis result. Which variant a given analysis produces is
/// fixed by its [`crate::analysis::AnalysisKind`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "format", content = "content", rename_all = "snake_case")]
pub enum Report {
  Sustainability(SustainabilityReport),
  Profile(FarmProfile),
  Sections(Vec<Section>),
  Text(String),
}

/// Render titled sections back into the Markdown form they are cached in
pub fn sections_to_markdown(sections: &[Section]) -> String {
  let mut out = String::new();
  for section in sections {
    out.push_str("## ");
    out.push_str(&section.title);
    out.push_str("\n\n");
    out.push_str(&section.body);
    out.push_str("\n\n");
  }
  out
}
