pub mod commands;
pub mod display;

// Re-export the core types commands work with, for easier testing
pub use creamery::{AnalysisKind, FarmStore, PollSettings, Report, SessionContext};
