use std::collections::BTreeMap;

use creamery::analysis::AnalysisKind;
use creamery::report::{FarmProfile, Report, Section, SustainabilityMetrics, SustainabilityReport};
use creamery::store::FarmStore;
use tempfile::tempdir;

fn sample_sustainability() -> SustainabilityReport {
  let mut economic = BTreeMap::new();
  economic.insert("total_milk_income".to_string(), 125_000.0);
  economic.insert("total_treatment_costs".to_string(), 8_400.0);
  let mut welfare = BTreeMap::new();
  welfare.insert("percentage_sick_cows".to_string(), 6.5);

  SustainabilityReport {
    summary: "Stable quarter".to_string(),
    sustainability: SustainabilityMetrics {
      economic,
      environmental: BTreeMap::new(),
      animal_welfare: welfare,
    },
    recommendations: vec!["Reduce antibiotic usage".to_string()],
  }
}

#[test]
fn slugify_matches_directory_layout() {
  assert_eq!(FarmStore::slugify("Sunny Meadows"), "Sunny_Meadows");
  assert_eq!(FarmStore::slugify("  Brookside  "), "Brookside");
}

#[test]
fn datasets_round_trip_and_sort() {
  let dir = tempdir().unwrap();
  let store = FarmStore::with_root(dir.path()).unwrap();

  store.save_dataset("Sunny Meadows", "milk_yield.csv", b"animal_id,milk_yield\n1,22.4\n").unwrap();
  store.save_dataset("Sunny Meadows", "costs.csv", b"month,total\njan,1800\n").unwrap();

  let datasets = store.list_datasets("Sunny Meadows").unwrap();
  let names: Vec<&str> = datasets.iter().map(|d| d.name.as_str()).collect();
  assert_eq!(names, vec!["costs.csv", "milk_yield.csv"]);

  let preview = datasets[1].preview(5).unwrap();
  assert_eq!(preview.header, vec!["animal_id", "milk_yield"]);
  assert_eq!(preview.rows, vec![vec!["1", "22.4"]]);
}

#[test]
fn non_csv_and_pathy_names_are_rejected() {
  let dir = tempdir().unwrap();
  let store = FarmStore::with_root(dir.path()).unwrap();

  assert!(store.save_dataset("farm", "notes.txt", b"x").is_err());
  assert!(store.save_dataset("farm", "../escape.csv", b"x").is_err());
  assert!(store.save_dataset("farm", ".hidden.csv", b"x").is_err());
}

#[test]
fn unknown_farm_has_no_datasets() {
  let dir = tempdir().unwrap();
  let store = FarmStore::with_root(dir.path()).unwrap();
  assert!(store.list_datasets("nobody").unwrap().is_empty());
}

#[test]
fn sustainability_report_round_trips_as_json() {
  let dir = tempdir().unwrap();
  let store = FarmStore::with_root(dir.path()).unwrap();
  let report = Report::Sustainability(sample_sustainability());

  store.save_report("farm", AnalysisKind::Sustainability, &report).unwrap();
  let loaded = store.load_report("farm", AnalysisKind::Sustainability).unwrap().unwrap();

  assert_eq!(loaded, report);
  assert!(store.report_path("farm", AnalysisKind::Sustainability).ends_with("sustainability_report.json"));
}

#[test]
fn profile_round_trips_as_json() {
  let dir = tempdir().unwrap();
  let store = FarmStore::with_root(dir.path()).unwrap();
  let profile = FarmProfile {
    location: "South Bohemia".to_string(),
    farm_size_ha: 140.0,
    num_animals: 220,
    owner: "J. Dvorak".to_string(),
  };

  store.save_report("farm", AnalysisKind::Profile, &Report::Profile(profile.clone())).unwrap();
  let loaded = store.load_report("farm", AnalysisKind::Profile).unwrap().unwrap();
  assert_eq!(loaded, Report::Profile(profile));
}

#[test]
fn sectioned_report_round_trips_as_markdown() {
  let dir = tempdir().unwrap();
  let store = FarmStore::with_root(dir.path()).unwrap();
  let report = Report::Sections(vec![
    Section { title: "Ration Overview".to_string(), body: "maize silage based".to_string() },
    Section { title: "Suggested Changes".to_string(), body: "more protein in winter".to_string() },
  ]);

  store.save_report("farm", AnalysisKind::FeedStrategy, &report).unwrap();
  let loaded = store.load_report("farm", AnalysisKind::FeedStrategy).unwrap().unwrap();
  assert_eq!(loaded, report);
}

#[test]
fn weather_text_round_trips_verbatim() {
  let dir = tempdir().unwrap();
  let store = FarmStore::with_root(dir.path()).unwrap();
  let report = Report::Text("Mild summers, wet autumns.".to_string());

  store.save_report("farm", AnalysisKind::Weather, &report).unwrap();
  let loaded = store.load_report("farm", AnalysisKind::Weather).unwrap().unwrap();
  assert_eq!(loaded, report);
}

#[test]
fn missing_report_is_none_not_an_error() {
  let dir = tempdir().unwrap();
  let store = FarmStore::with_root(dir.path()).unwrap();
  assert!(store.load_report("farm", AnalysisKind::Overview).unwrap().is_none());
}

#[test]
fn agent_id_round_trips() {
  let dir = tempdir().unwrap();
  let store = FarmStore::with_root(dir.path()).unwrap();

  assert!(store.load_agent().unwrap().is_none());
  store.save_agent("agent_abc123").unwrap();
  assert_eq!(store.load_agent().unwrap().as_deref(), Some("agent_abc123"));
}

#[test]
fn farms_are_listed_sorted() {
  let dir = tempdir().unwrap();
  let store = FarmStore::with_root(dir.path()).unwrap();

  store.ensure_farm("Walnut Grove").unwrap();
  store.ensure_farm("Alpine View").unwrap();

  assert_eq!(store.list_farms().unwrap(), vec!["Alpine_View", "Walnut_Grove"]);
}
