//! Analysis workflows: the upload -> submit -> poll -> extract -> cache
//! cycle behind every dashboard action.

use std::time::Duration;

use anyhow::{anyhow, Result};

use crate::analysis::AnalysisKind;
use crate::assistant::{runner, FailureReason, FileRef, JobOutcome, JobRequest, ReasoningService};
use crate::error::AnalysisError;
use crate::extract::{extract_structured, ExtractionResult, Payload};
use crate::prompts;
use crate::report::{FarmProfile, Report, SustainabilityReport};
use crate::store::FarmStore;

/// Explicit per-invocation context: which farm, which remote agent.
///
/// Created at the start of a CLI invocation or HTTP request and dropped at
/// the end - there is deliberately no process-wide "current farm".
#[derive(Debug, Clone)]
pub struct SessionContext {
  pub farm: String,
  pub agent_id: String,
}

impl SessionContext {
  /// Build a context for `farm`, loading the registered agent id
  pub fn open(store: &FarmStore, farm: &str) -> Result<Self> {
    let agent_id = store
      .load_agent()?
      .ok_or_else(|| anyhow!("no remote agent registered yet; run registration first"))?;
    Ok(Self { farm: farm.to_string(), agent_id })
  }
}

/// How patiently to poll the remote job
#[derive(Debug, Clone, Copy)]
pub struct PollSettings {
  pub interval: Duration,
  pub max_wait: Duration,
}

impl Default for PollSettings {
  fn default() -> Self {
    Self { interval: Duration::from_secs(2), max_wait: Duration::from_secs(600) }
  }
}

/// A freshly produced report plus whether it made it into the cache
#[derive(Debug)]
pub struct RefreshOutcome {
  pub report: Report,
  pub cached: bool,
}

/// Read-only cache lookup used on plain dashboard visits
pub fn cached_report(
  store: &FarmStore,
  farm: &str,
  kind: AnalysisKind,
) -> Result<Option<Report>, AnalysisError> {
  store.load_report(farm, kind).map_err(|e| AnalysisError::Storage(e.to_string()))
}

/// Return the cached report if present, otherwise run the analysis.
/// `fresh` forces a re-run even when a cached report exists.
pub async fn get_or_run(
  ctx: &SessionContext,
  service: &dyn ReasoningService,
  store: &FarmStore,
  kind: AnalysisKind,
  settings: &PollSettings,
  fresh: bool,
) -> Result<RefreshOutcome, AnalysisError> {
  if !fresh {
    if let Some(report) = cached_report(store, &ctx.farm, kind)? {
      cowbell::debug(&format!("Using cached {} for farm '{}'", kind.cache_file(), ctx.farm));
      return Ok(RefreshOutcome { report, cached: true });
    }
  }
  run_analysis(ctx, service, store, kind, settings).await
}

/// Run one analysis end to end and cache the result.
///
/// The cache is written only after extraction succeeded; every failure path
/// returns before the store is touched, so a failed refresh can never
/// clobber a previously cached report.
pub async fn run_analysis(
  ctx: &SessionContext,
  service: &dyn ReasoningService,
  store: &FarmStore,
  kind: AnalysisKind,
  settings: &PollSettings,
) -> Result<RefreshOutcome, AnalysisError> {
  let attachments = gather_attachments(ctx, service, store, kind).await?;

  let request = JobRequest {
    agent_id: ctx.agent_id.clone(),
    prompt: prompts::prompt_for(kind),
    attachments,
  };

  cowbell::info(&format!("Running {} for farm '{}'", kind.title(), ctx.farm));
  let outcome = runner::submit_and_wait(service, &request, settings.interval, settings.max_wait).await;

  let raw_text = match outcome {
    JobOutcome::Success(raw_text) => raw_text,
    JobOutcome::Failure(FailureReason::Submission(detail)) => {
      return Err(AnalysisError::Submission(detail))
    }
    JobOutcome::Failure(FailureReason::JobFailed(detail)) => {
      return Err(AnalysisError::JobFailed(detail))
    }
    JobOutcome::Failure(FailureReason::Timeout) => {
      return Err(AnalysisError::Timeout { waited_secs: settings.max_wait.as_secs() })
    }
  };

  let report = decode_output(kind, &raw_text)?;

  // Caching failure is not fatal: the caller still gets the report
  let cached = match store.save_report(&ctx.farm, kind, &report) {
    Ok(()) => true,
    Err(e) => {
      cowbell::warn(&format!("Report computed but caching failed: {e}"));
      false
    }
  };

  Ok(RefreshOutcome { report, cached })
}

/// Create the remote agent once and remember its id in the store
pub async fn register_agent(
  service: &dyn ReasoningService,
  store: &FarmStore,
  name: &str,
) -> Result<String> {
  let id = service.register_agent(name, prompts::AGENT_INSTRUCTIONS).await?;
  store.save_agent(&id)?;
  Ok(id)
}

/// Upload whatever files this analysis reasons over
async fn gather_attachments(
  ctx: &SessionContext,
  service: &dyn ReasoningService,
  store: &FarmStore,
  kind: AnalysisKind,
) -> Result<Vec<FileRef>, AnalysisError> {
  if !kind.wants_datasets() {
    // The weather summary reasons over the cached profile, not the raw CSVs
    let profile_path = store.report_path(&ctx.farm, AnalysisKind::Profile);
    if !profile_path.exists() {
      return Err(AnalysisError::Submission(format!(
        "farm '{}' has no cached profile; run the profile analysis first",
        ctx.farm
      )));
    }
    let file = service
      .upload_dataset(&profile_path)
      .await
      .map_err(|e| AnalysisError::Submission(e.to_string()))?;
    return Ok(vec![file]);
  }

  let datasets =
    store.list_datasets(&ctx.farm).map_err(|e| AnalysisError::Storage(e.to_string()))?;
  if datasets.is_empty() {
    return Err(AnalysisError::Submission(format!(
      "no datasets uploaded for farm '{}'",
      ctx.farm
    )));
  }

  let mut refs = Vec::with_capacity(datasets.len());
  for dataset in &datasets {
    cowbell::debug(&format!("Uploading dataset {}", dataset.name));
    let file = service
      .upload_dataset(&dataset.path)
      .await
      .map_err(|e| AnalysisError::Submission(e.to_string()))?;
    refs.push(file);
  }
  Ok(refs)
}

/// Turn raw model output into the report this kind produces
fn decode_output(kind: AnalysisKind, raw_text: &str) -> Result<Report, AnalysisError> {
  let shape = match kind.shape() {
    None => return Ok(Report::Text(raw_text.trim().to_string())),
    Some(shape) => shape,
  };

  match extract_structured(raw_text, &shape) {
    ExtractionResult::Parsed(Payload::Json(value)) => match kind {
      AnalysisKind::Sustainability => serde_json::from_value::<SustainabilityReport>(value)
        .map(Report::Sustainability)
        .map_err(|e| extraction_error(format!("payload is not a sustainability report: {e}"), raw_text)),
      AnalysisKind::Profile => serde_json::from_value::<FarmProfile>(value)
        .map(Report::Profile)
        .map_err(|e| extraction_error(format!("payload is not a farm profile: {e}"), raw_text)),
      _ => Err(extraction_error("unexpected JSON payload for a sectioned report".to_string(), raw_text)),
    },
    ExtractionResult::Parsed(Payload::Sections(sections)) => Ok(Report::Sections(sections)),
    ExtractionResult::NotFound => {
      Err(extraction_error("no structured payload in model output".to_string(), raw_text))
    }
    ExtractionResult::MalformedPayload(detail) => Err(extraction_error(detail, raw_text)),
  }
}

fn extraction_error(detail: String, raw_text: &str) -> AnalysisError {
  AnalysisError::Extraction { detail, raw: raw_text.to_string() }
}
