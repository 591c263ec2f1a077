//! Job tracker library: offline ATS analysis with optional AI collaborators

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod llm;
pub mod output;

pub use config::Config;
pub use error::{JobTrackError, Result};
pub use llm::analyzer::{AnalysisOutcome, AnalysisSource, AtsService};
pub use processing::analyzer::{analyze, AtsAnalysis};
