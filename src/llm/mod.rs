//! AI collaborators and the fallback-to-keywords analysis service

pub mod client;
pub mod ollama;
pub mod claude;
pub mod prompts;
pub mod analyzer;
