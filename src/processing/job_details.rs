//! Pattern-based extraction of structured fields from a job posting

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Structured details pulled out of a job posting. Any field may be unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDetails {
    pub company: Option<String>,
    pub position: Option<String>,
    pub location: Option<String>,
    pub salary_min: Option<u64>,
    pub salary_max: Option<u64>,
}

// "$120k - $150k", "$150,000", "$90 to $110K"
static SALARY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\$\s*([\d,]+)\s*(?:k|K|,000)?(?:\s*[-–to]+\s*\$?\s*([\d,]+)\s*(?:k|K|,000)?)?",
    )
    .expect("salary regex is valid")
});

// Tried in order; the first one that matches wins.
static LOCATION_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(?:Location|Based in|Office)[:\s]+([^,\n]+(?:,\s*[A-Z]{2})?)",
        r"(?i)(Remote|Hybrid|On-?site)",
        r"(?i)([A-Z][a-z]+(?:\s+[A-Z][a-z]+)?,\s*[A-Z]{2})\b",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("location regex is valid"))
    .collect()
});

/// Extract salary range and location with regular expressions.
///
/// Company and position cannot be recovered reliably without a language
/// model and are left empty.
pub fn extract_job_details(text: &str) -> JobDetails {
    let (salary_min, salary_max) = match extract_salary(text) {
        Some((min, max)) => (Some(min), max),
        None => (None, None),
    };

    JobDetails {
        company: None,
        position: None,
        location: extract_location(text),
        salary_min,
        salary_max,
    }
}

/// First salary figure and its upper bound. Figures with fewer than four
/// digits are read as thousands. Without an upper bound the range is the single
/// figure; an unreadable upper bound is left unknown.
pub fn extract_salary(text: &str) -> Option<(u64, Option<u64>)> {
    let caps = SALARY_RE.captures(text)?;

    let min = parse_salary_figure(caps.get(1)?.as_str())?;
    let max = match caps.get(2) {
        Some(upper) => parse_salary_figure(upper.as_str()),
        None => Some(min),
    };

    Some((min, max))
}

fn parse_salary_figure(raw: &str) -> Option<u64> {
    let digits: String = raw.chars().filter(|c| *c != ',').collect();
    let value: u64 = digits.parse().ok()?;

    if digits.len() < 4 {
        Some(value * 1000)
    } else {
        Some(value)
    }
}

pub fn extract_location(text: &str) -> Option<String> {
    LOCATION_RES.iter().find_map(|re| {
        re.captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
    })
}
