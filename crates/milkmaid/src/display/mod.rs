//! Terminal rendering for reports and dataset previews.
//!
//! Narration goes through cowbell (stderr); report content itself prints to
//! stdout so it can be piped into a file.

use colored::*;
use creamery::dataset::{Dataset, DatasetPreview};
use creamery::report::{FarmProfile, Section, SustainabilityReport};
use creamery::{AnalysisKind, Report};
use std::collections::BTreeMap;

/// Render any report variant for the terminal
pub fn render_report(kind: AnalysisKind, report: &Report) {
  cowbell::as_banner(|msg| eprintln!("{msg}"), kind.title(), Some(60), Some('-'));

  match report {
    Report::Sustainability(report) => render_sustainability(report),
    Report::Profile(profile) => render_profile(profile),
    Report::Sections(sections) => render_sections(sections),
    Report::Text(text) => println!("{text}"),
  }
}

fn render_sustainability(report: &SustainabilityReport) {
  if !report.summary.is_empty() {
    println!("{}", report.summary);
    println!();
  }

  render_metric_group("Economic", &report.sustainability.economic);
  render_metric_group("Environmental", &report.sustainability.environmental);
  render_metric_group("Animal Welfare", &report.sustainability.animal_welfare);

  if !report.recommendations.is_empty() {
    println!("{}", "Recommendations".bold());
    for recommendation in &report.recommendations {
      println!("  - {recommendation}");
    }
  }
}

fn render_metric_group(title: &str, metrics: &BTreeMap<String, f64>) {
  if metrics.is_empty() {
    return;
  }
  println!("{}", title.bold());
  for (name, value) in metrics {
    println!("  {:<32} {:.2}", humanize_metric(name), value);
  }
  println!();
}

fn render_profile(profile: &FarmProfile) {
  println!("{:<18} {}", "Location".bold(), profile.location);
  println!("{:<18} {}", "Owner".bold(), profile.owner);
  println!("{:<18} {}", "Animals".bold(), profile.num_animals);
  println!("{:<18} {:.1} ha", "Farm size".bold(), profile.farm_size_ha);
}

fn render_sections(sections: &[Section]) {
  for section in sections {
    println!("{}", section.title.bold());
    println!("{}", section.body);
    println!();
  }
}

/// Show the header and first rows of a freshly stored dataset
pub fn render_preview(dataset: &Dataset, preview: &DatasetPreview) {
  println!("{}", dataset.name.bold());
  if preview.header.is_empty() {
    println!("  (empty file)");
    return;
  }
  println!("  {}", preview.header.join(" | "));
  for row in &preview.rows {
    println!("  {}", row.join(" | "));
  }
  println!();
}

/// `total_milk_income` -> `Total milk income`
pub fn humanize_metric(name: &str) -> String {
  let spaced = name.replace('_', " ");
  let mut chars = spaced.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    None => spaced,
  }
}
