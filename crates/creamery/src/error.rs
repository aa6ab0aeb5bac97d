use thiserror::Error;

/// Everything that can go wrong during one analysis action.
///
/// Nothing here is fatal to the application - every variant is local to the
/// single analysis the user asked for.
#[derive(Debug, Error)]
pub enum AnalysisError {
  /// The job could not be registered with the reasoning service
  #[error("could not submit analysis job: {0}")]
  Submission(String),

  /// The remote side accepted the job but reported failure
  #[error("remote analysis job failed: {0}")]
  JobFailed(String),

  /// The local wall-clock budget ran out before a terminal status
  #[error("analysis timed out after {waited_secs}s")]
  Timeout { waited_secs: u64 },

  /// The job succeeded but its output held no parseable payload of the
  /// expected shape. Carries the raw model output so callers can show it
  /// verbatim instead of losing the information.
  #[error("could not extract a structured report: {detail}")]
  Extraction { detail: String, raw: String },

  /// Report cache read/write failed
  #[error("report store error: {0}")]
  Storage(String),
}

impl AnalysisError {
  /// Raw model output attached to the error, if any
  pub fn raw_output(&self) -> Option<&str> {
    match self {
      AnalysisError::Extraction { raw, .. } => Some(raw),
      _ => None,
    }
  }
}
