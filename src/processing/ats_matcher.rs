//! ATS (Applicant Tracking System) keyword matching and scoring

use crate::processing::keywords::KeywordSet;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Upper bound on the ranked missing-keyword list.
pub const MAX_MISSING_KEYWORDS: usize = 15;

/// Comparison of a resume keyword set against a job keyword set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Keywords present in both documents, sorted.
    pub matched: Vec<String>,
    /// Job keywords absent from the resume, sorted.
    pub missing: Vec<String>,
    /// Percentage of job keywords covered by the resume (0-100).
    pub score: u8,
    /// Up to [`MAX_MISSING_KEYWORDS`] missing keywords, most specific first.
    pub ranked_missing: Vec<String>,
}

/// Score how well `resume` covers `job`.
///
/// Scoring is directional: only the job keywords count toward the denominator,
/// so swapping the arguments generally changes the result.
pub fn match_keywords(resume: &KeywordSet, job: &KeywordSet) -> MatchResult {
    let mut matched: Vec<String> = resume.intersection(job).cloned().collect();
    matched.sort();

    let mut missing: Vec<String> = job.difference(resume).cloned().collect();
    missing.sort();

    let score = coverage_score(matched.len(), job.len());
    let ranked_missing = rank_missing(&missing);

    MatchResult {
        matched,
        missing,
        score,
        ranked_missing,
    }
}

/// round(100 * matched / total), or 0 when there is nothing to match.
pub fn coverage_score(matched: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }

    let percent = (100.0 * matched as f64 / total as f64).round();
    percent.clamp(0.0, 100.0) as u8
}

/// Order by descending length, then alphabetically, and keep the first
/// [`MAX_MISSING_KEYWORDS`]. Longer terms tend to be the specific ones.
pub fn rank_missing<S: AsRef<str>>(missing: &[S]) -> Vec<String> {
    let mut ranked: Vec<&str> = missing.iter().map(AsRef::as_ref).collect();
    ranked.sort_by(|a, b| {
        Reverse(a.len())
            .cmp(&Reverse(b.len()))
            .then_with(|| a.cmp(b))
    });
    ranked.dedup();

    ranked
        .into_iter()
        .take(MAX_MISSING_KEYWORDS)
        .map(str::to_string)
        .collect()
}
