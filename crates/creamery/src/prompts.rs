//! Prompt text for every analysis kind.
//!
//! The wording here is the actual product surface: each analysis is the same
//! remote agent asked a differently-worded question over the same uploaded
//! files. Prompts never mention other specialists and always instruct the
//! model to do its own calculations.

use crate::analysis::AnalysisKind;

/// Instruction block the remote agent is registered with, once per install
pub const AGENT_INSTRUCTIONS: &str = "\
You are a dairy sustainability AI analyst.

You receive multiple CSV files related to:
- milk yield
- treatment and medicine usage
- cow data (birth, sickness, reproduction)
- general farm performance

Your job:
1. Load and understand all uploaded CSV files.
2. Compute the indicators the user asks for across economics, environment,
   animal welfare, feeding, energy and health.
3. Answer in exactly the output format the user requests.

Perform all calculations yourself from the uploaded data. Never invent
numbers that the data cannot support.";

/// Build the full prompt for one analysis kind
pub fn prompt_for(kind: AnalysisKind) -> String {
  format!("{}\n\n{}", kind.specialist().persona(), task_for(kind))
}

fn task_for(kind: AnalysisKind) -> &'static str {
  match kind {
    AnalysisKind::Sustainability => SUSTAINABILITY_TASK,
    AnalysisKind::Profile => PROFILE_TASK,
    AnalysisKind::Weather => WEATHER_TASK,
    AnalysisKind::FeedStrategy => FEED_STRATEGY_TASK,
    AnalysisKind::Biogas => BIOGAS_TASK,
    AnalysisKind::HerdHealth => HERD_HEALTH_TASK,
    AnalysisKind::Overview => OVERVIEW_TASK,
  }
}

const SUSTAINABILITY_TASK: &str = r#"Analyze the uploaded data and return a compact JSON with:
{
  "summary": "Short description",
  "sustainability": {
    "economic": {
      "total_milk_income": float,
      "total_treatment_costs": float,
      "monthly_profit_loss": float
    },
    "environmental": {
      "antibiotic_usage_frequency": int,
      "treatment_intensity": float
    },
    "animal_welfare": {
      "percentage_sick_cows": float,
      "avg_treatment_duration": float,
      "high_risk_animals_percentage": float
    }
  },
  "recommendations": [
    "First recommendation",
    "Second recommendation"
  ]
}
Respond only with valid JSON."#;

const PROFILE_TASK: &str = r#"Generate a JSON farm profile with the following structure based on the uploaded CSV files:
{
  "location": "...",
  "farm_size_ha": float,
  "num_animals": int,
  "owner": "..."
}
Return valid JSON only."#;

const WEATHER_TASK: &str = "\
You are given a JSON description of a farm. Based on its location, generate a
short weather and climate summary for the farm region. Return only a short
paragraph that would be helpful for a dairy farmer.";

const FEED_STRATEGY_TASK: &str = "\
Review the uploaded data and propose a feed strategy for the herd.
Respond in Markdown using level-2 (##) section headings, in this order:

## Ration Overview
## Forage Quality
## Concentrate Use
## Cost Per Liter
## Suggested Changes

Keep each section short and concrete, and base every number on the uploaded data.";

const BIOGAS_TASK: &str = "\
Estimate the farm's manure output and biogas potential from the uploaded data.
Respond in Markdown using level-2 (##) section headings, in this order:

## Manure Volume
## Biogas Potential
## Energy Value
## Investment Outlook

Base the herd size and any seasonal effects on the uploaded data.";

const HERD_HEALTH_TASK: &str = "\
Assess herd health from the uploaded treatment and cow data.
Respond in Markdown using level-2 (##) section headings, in this order:

## Health Metrics
## Treatment Patterns
## High-Risk Animals
## Prevention Advice

Quote animal identifiers from the data where relevant.";

const OVERVIEW_TASK: &str = "\
Summarize the overall state of the farm for a dashboard front page.
Respond in Markdown using level-2 (##) section headings, in this order:

## Production
## Economics
## Animal Welfare
## Action Items

Two or three sentences per section, every figure taken from the uploaded data.";

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn every_kind_has_a_prompt_with_its_persona() {
    for kind in AnalysisKind::all() {
      let prompt = prompt_for(*kind);
      assert!(prompt.starts_with(kind.specialist().persona()));
      assert!(prompt.len() > kind.specialist().persona().len() + 10);
    }
  }

  #[test]
  fn json_kinds_demand_json() {
    assert!(prompt_for(AnalysisKind::Sustainability).contains("valid JSON"));
    assert!(prompt_for(AnalysisKind::Profile).contains("valid JSON"));
  }

  #[test]
  fn sectioned_kinds_demand_level_two_headings() {
    for kind in [AnalysisKind::FeedStrategy, AnalysisKind::Biogas, AnalysisKind::HerdHealth, AnalysisKind::Overview] {
      assert!(prompt_for(kind).contains("## "), "{kind} prompt should name its headings");
    }
  }
}
