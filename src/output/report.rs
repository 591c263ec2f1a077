//! Report structures wrapping an analysis for display and export

use crate::llm::analyzer::{AnalysisOutcome, AnalysisSource};
use crate::processing::analyzer::{compare, AtsAnalysis};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An analysis plus the context needed to present it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// The four-field analysis, flattened so JSON output keeps the same shape
    /// every backend produces.
    #[serde(flatten)]
    pub analysis: AtsAnalysis,

    pub source: AnalysisSource,

    /// Offline keyword comparison, present in detailed reports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword_breakdown: Option<KeywordBreakdown>,

    pub metadata: ReportMetadata,
}

/// Raw keyword overlap between the two documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordBreakdown {
    pub matched: Vec<String>,
    pub missing_total: usize,
    pub keyword_score: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub jobtrack_version: String,
    pub resume_file: String,
    pub job_file: String,
}

impl AnalysisReport {
    pub fn new(outcome: AnalysisOutcome<AtsAnalysis>, resume_file: &str, job_file: &str) -> Self {
        Self {
            analysis: outcome.result,
            source: outcome.source,
            keyword_breakdown: None,
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                jobtrack_version: env!("CARGO_PKG_VERSION").to_string(),
                resume_file: resume_file.to_string(),
                job_file: job_file.to_string(),
            },
        }
    }

    /// Attach the offline keyword comparison of the two texts.
    pub fn with_keyword_breakdown(mut self, resume_text: &str, job_text: &str) -> Self {
        let result = compare(resume_text, job_text);
        self.keyword_breakdown = Some(KeywordBreakdown {
            missing_total: result.missing.len(),
            keyword_score: result.score,
            matched: result.matched,
        });
        self
    }
}
