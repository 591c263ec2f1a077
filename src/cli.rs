//! CLI interface for the job tracker

use crate::config::{AnalysisMode, OutputFormat};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "jobtrack")]
#[command(about = "Score resumes against job descriptions and explain the keyword gap")]
#[command(long_about = "Offline ATS keyword analysis with optional Ollama or Claude backends. \
Every AI feature falls back to the deterministic analyzer when the backend is unavailable.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a resume against a job description
    Analyze {
        /// Path to resume file (TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Backend override: free, ollama, claude
        #[arg(short, long, value_parser = parse_mode)]
        mode: Option<AnalysisMode>,

        /// Output format: console, json, markdown
        #[arg(short, long, value_parser = parse_output_format)]
        output: Option<OutputFormat>,

        /// Include the raw keyword breakdown
        #[arg(short, long)]
        detailed: bool,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Extract company, position, location and salary from a job posting
    ExtractJob {
        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Backend override: free, ollama, claude
        #[arg(short, long, value_parser = parse_mode)]
        mode: Option<AnalysisMode>,
    },

    /// Draft a cover letter
    CoverLetter {
        /// Path to resume file (TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Company the letter is addressed to
        #[arg(long)]
        company: String,

        /// Writing tone
        #[arg(short, long, default_value = "professional")]
        tone: String,

        /// Backend override: free, ollama, claude
        #[arg(short, long, value_parser = parse_mode)]
        mode: Option<AnalysisMode>,

        /// Save the letter to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Show the active backend and whether it is reachable
    Status,

    /// Show or edit configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "ai.mode", "ai.ollama.model")
        key: String,

        /// Configuration value
        value: String,
    },
}

pub fn parse_mode(mode: &str) -> Result<AnalysisMode, String> {
    mode.parse().map_err(|e: crate::error::JobTrackError| e.to_string())
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    format.parse().map_err(|e: crate::error::JobTrackError| e.to_string())
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
