//! The contract every AI collaborator satisfies, plus response parsing

use crate::processing::analyzer::AtsAnalysis;
use crate::processing::ats_matcher::MAX_MISSING_KEYWORDS;
use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// Why a collaborator could not produce a usable answer.
///
/// Callers never branch on the variant: any of them means "use the keyword
/// analyzer instead". The distinction only shows up in logs.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// A language model backend that turns a prompt into text.
#[async_trait]
pub trait Collaborator: Send + Sync {
    /// Short identifier such as `ollama:llama3.2`.
    fn name(&self) -> String;

    /// Cheap reachability check made before each request.
    async fn is_available(&self) -> bool;

    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, CollaboratorError>;
}

/// Slice from the first `{` to the last `}` of a model reply, which tolerates
/// chatter and code fences around the JSON.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

#[derive(Debug, Deserialize)]
struct RawAnalysis {
    score: f64,
    missing_keywords: Vec<String>,
    suggestions: Vec<String>,
    summary: String,
}

/// Parse a model reply into an [`AtsAnalysis`]. All four fields are required;
/// the score is rounded and clamped to 0-100 and `missing_keywords` is cut to
/// [`MAX_MISSING_KEYWORDS`].
pub fn parse_analysis(text: &str) -> Result<AtsAnalysis, CollaboratorError> {
    let json = extract_json_object(text)
        .ok_or_else(|| CollaboratorError::Malformed("no JSON object in reply".to_string()))?;

    let raw: RawAnalysis = serde_json::from_str(json)
        .map_err(|e| CollaboratorError::Malformed(e.to_string()))?;

    if !raw.score.is_finite() {
        return Err(CollaboratorError::Malformed(format!("score {} is not a number", raw.score)));
    }

    let mut missing_keywords = raw.missing_keywords;
    missing_keywords.truncate(MAX_MISSING_KEYWORDS);

    Ok(AtsAnalysis {
        score: raw.score.round().clamp(0.0, 100.0) as u8,
        missing_keywords,
        suggestions: raw.suggestions,
        summary: raw.summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_with_chatter() {
        let reply = "Sure! Here is the analysis:\n```json\n{\"a\": {\"b\": 1}}\n```\nHope it helps.";
        assert_eq!(extract_json_object(reply), Some("{\"a\": {\"b\": 1}}"));
    }

    #[test]
    fn test_extract_json_missing() {
        assert_eq!(extract_json_object("no braces here"), None);
        assert_eq!(extract_json_object("} backwards {"), None);
    }

    #[test]
    fn test_parse_complete_analysis() {
        let reply = r#"{"score": 82, "missing_keywords": ["terraform"], "suggestions": ["Add Terraform"], "summary": "Solid fit."}"#;
        let analysis = parse_analysis(reply).unwrap();

        assert_eq!(analysis.score, 82);
        assert_eq!(analysis.missing_keywords, vec!["terraform"]);
        assert_eq!(analysis.suggestions, vec!["Add Terraform"]);
        assert_eq!(analysis.summary, "Solid fit.");
    }

    #[test]
    fn test_parse_clamps_and_rounds_score() {
        let high = r#"{"score": 140, "missing_keywords": [], "suggestions": [], "summary": ""}"#;
        let fractional = r#"{"score": 71.6, "missing_keywords": [], "suggestions": [], "summary": ""}"#;
        let negative = r#"{"score": -5, "missing_keywords": [], "suggestions": [], "summary": ""}"#;

        assert_eq!(parse_analysis(high).unwrap().score, 100);
        assert_eq!(parse_analysis(fractional).unwrap().score, 72);
        assert_eq!(parse_analysis(negative).unwrap().score, 0);
    }

    #[test]
    fn test_parse_caps_missing_keywords() {
        let keywords: Vec<String> = (0..20).map(|i| format!("term{}", i)).collect();
        let reply = serde_json::json!({
            "score": 40,
            "missing_keywords": keywords,
            "suggestions": [],
            "summary": "",
        })
        .to_string();

        let analysis = parse_analysis(&reply).unwrap();
        assert_eq!(analysis.missing_keywords.len(), MAX_MISSING_KEYWORDS);
        assert_eq!(analysis.missing_keywords[0], "term0");
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        let reply = r#"{"score": 90, "summary": "Great"}"#;
        assert!(matches!(parse_analysis(reply), Err(CollaboratorError::Malformed(_))));
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        let reply = "{score: ninety}";
        assert!(matches!(parse_analysis(reply), Err(CollaboratorError::Malformed(_))));
    }
}
