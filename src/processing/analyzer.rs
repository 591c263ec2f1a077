//! Offline ATS analysis: keyword extraction, matching, scoring and advice

use crate::processing::ats_matcher::{match_keywords, MatchResult};
use crate::processing::keywords::extract_keywords;
use crate::processing::suggestions::{build_suggestions, build_summary};
use serde::{Deserialize, Serialize};

/// Result of analyzing a resume against a job description.
///
/// Every analysis backend produces this shape, so the keyword analyzer and the
/// AI collaborators are interchangeable from the caller's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtsAnalysis {
    /// Compatibility score, 0-100.
    pub score: u8,
    /// Job keywords missing from the resume, most relevant first.
    pub missing_keywords: Vec<String>,
    pub suggestions: Vec<String>,
    pub summary: String,
}

/// Analyze `resume_text` against `job_text` with keyword matching alone.
///
/// Pure and infallible: any pair of strings, including empty ones, produces a
/// complete analysis. This is what every AI backend falls back to.
pub fn analyze(resume_text: &str, job_text: &str) -> AtsAnalysis {
    let result = compare(resume_text, job_text);
    AtsAnalysis::from_match(&result)
}

/// Extract both keyword sets and compare them.
pub fn compare(resume_text: &str, job_text: &str) -> MatchResult {
    let resume_keywords = extract_keywords(resume_text);
    let job_keywords = extract_keywords(job_text);

    match_keywords(&resume_keywords, &job_keywords)
}

impl AtsAnalysis {
    pub fn from_match(result: &MatchResult) -> Self {
        Self {
            score: result.score,
            missing_keywords: result.ranked_missing.clone(),
            suggestions: build_suggestions(result.score, &result.ranked_missing),
            summary: build_summary(result.score),
        }
    }
}
