//! Offline text analysis: keywords, ATS matching, advice and job details

pub mod stop_words;
pub mod keywords;
pub mod ats_matcher;
pub mod suggestions;
pub mod analyzer;
pub mod job_details;
