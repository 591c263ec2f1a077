//! Configuration management for the job tracker

use crate::error::{JobTrackError, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variable selecting the analysis backend.
pub const MODE_ENV: &str = "JOBTRACK_AI_MODE";
pub const OLLAMA_MODEL_ENV: &str = "OLLAMA_MODEL";
pub const OLLAMA_URL_ENV: &str = "OLLAMA_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub ai: AiConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    pub mode: AnalysisMode,
    pub ollama: OllamaConfig,
    pub claude: ClaudeConfig,
}

/// Which backend produces analyses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Hosted Anthropic model, requires an API key.
    Claude,
    /// Local model served by Ollama.
    Ollama,
    /// Keyword matching only.
    Free,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OllamaConfig {
    pub url: String,
    pub model: String,
    pub request_timeout_secs: u64,
    pub probe_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaudeConfig {
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ai: AiConfig {
                mode: AnalysisMode::Free,
                ollama: OllamaConfig {
                    url: "http://localhost:11434".to_string(),
                    model: "llama3.2".to_string(),
                    request_timeout_secs: 60,
                    probe_timeout_secs: 5,
                },
                claude: ClaudeConfig {
                    model: "claude-sonnet-4-20250514".to_string(),
                    api_key_env: "ANTHROPIC_API_KEY".to_string(),
                    request_timeout_secs: 120,
                },
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl FromStr for AnalysisMode {
    type Err = JobTrackError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "claude" => Ok(AnalysisMode::Claude),
            "ollama" => Ok(AnalysisMode::Ollama),
            "free" => Ok(AnalysisMode::Free),
            other => Err(JobTrackError::Configuration(format!(
                "Invalid AI mode: {}. Supported: claude, ollama, free",
                other
            ))),
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnalysisMode::Claude => "claude",
            AnalysisMode::Ollama => "ollama",
            AnalysisMode::Free => "free",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for OutputFormat {
    type Err = JobTrackError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "console" => Ok(OutputFormat::Console),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(JobTrackError::InvalidInput(format!(
                "Invalid output format: {}. Supported: console, json, markdown",
                s
            ))),
        }
    }
}

impl Config {
    /// Load from the default location, creating it with defaults on first use.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| JobTrackError::Configuration(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| JobTrackError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("jobtrack")
            .join("config.toml")
    }

    /// Apply `JOBTRACK_AI_MODE`, `OLLAMA_MODEL` and `OLLAMA_URL` from the
    /// process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup. An unrecognized mode is
    /// reported and replaced with keyword matching.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(MODE_ENV) {
            self.ai.mode = raw.parse().unwrap_or_else(|_| {
                warn!("Invalid {} '{}', defaulting to 'free'", MODE_ENV, raw);
                AnalysisMode::Free
            });
        }

        if let Some(model) = lookup(OLLAMA_MODEL_ENV) {
            self.ai.ollama.model = model;
        }

        if let Some(url) = lookup(OLLAMA_URL_ENV) {
            self.ai.ollama.url = url;
        }
    }

    /// Set a value by dotted key, e.g. `ai.mode` or `ai.ollama.model`.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "ai.mode" => self.ai.mode = value.parse()?,
            "ai.ollama.url" => self.ai.ollama.url = value.to_string(),
            "ai.ollama.model" => self.ai.ollama.model = value.to_string(),
            "ai.ollama.request_timeout_secs" => {
                self.ai.ollama.request_timeout_secs = parse_number(key, value)?
            }
            "ai.ollama.probe_timeout_secs" => {
                self.ai.ollama.probe_timeout_secs = parse_number(key, value)?
            }
            "ai.claude.model" => self.ai.claude.model = value.to_string(),
            "ai.claude.api_key_env" => self.ai.claude.api_key_env = value.to_string(),
            "ai.claude.request_timeout_secs" => {
                self.ai.claude.request_timeout_secs = parse_number(key, value)?
            }
            "output.format" => self.output.format = value.parse()?,
            "output.detailed" => self.output.detailed = parse_bool(key, value)?,
            "output.color_output" => self.output.color_output = parse_bool(key, value)?,
            _ => {
                return Err(JobTrackError::Configuration(format!(
                    "Unknown configuration key: {}",
                    key
                )))
            }
        }
        Ok(())
    }

    /// Human-readable description of the active backend.
    pub fn mode_description(&self) -> String {
        match self.ai.mode {
            AnalysisMode::Claude => format!("Claude API ({}, best quality, paid)", self.ai.claude.model),
            AnalysisMode::Ollama => format!("Ollama local AI ({}, free)", self.ai.ollama.model),
            AnalysisMode::Free => "Keyword matching (basic, free, no setup)".to_string(),
        }
    }
}

fn parse_number(key: &str, value: &str) -> Result<u64> {
    value
        .parse()
        .map_err(|_| JobTrackError::Configuration(format!("{} expects a number, got '{}'", key, value)))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    value
        .parse()
        .map_err(|_| JobTrackError::Configuration(format!("{} expects true or false, got '{}'", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_to_free_mode() {
        let config = Config::default();
        assert_eq!(config.ai.mode, AnalysisMode::Free);
        assert_eq!(config.ai.ollama.url, "http://localhost:11434");
        assert_eq!(config.ai.ollama.model, "llama3.2");
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("OLLAMA".parse::<AnalysisMode>().unwrap(), AnalysisMode::Ollama);
        assert_eq!(" claude ".parse::<AnalysisMode>().unwrap(), AnalysisMode::Claude);
        assert!("gpt".parse::<AnalysisMode>().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_overrides_from(lookup(&[
            (MODE_ENV, "Ollama"),
            (OLLAMA_MODEL_ENV, "mistral"),
            (OLLAMA_URL_ENV, "http://gpu-box:11434"),
        ]));

        assert_eq!(config.ai.mode, AnalysisMode::Ollama);
        assert_eq!(config.ai.ollama.model, "mistral");
        assert_eq!(config.ai.ollama.url, "http://gpu-box:11434");
    }

    #[test]
    fn test_invalid_env_mode_falls_back_to_free() {
        let mut config = Config::default();
        config.ai.mode = AnalysisMode::Claude;
        config.apply_overrides_from(lookup(&[(MODE_ENV, "chatgpt")]));

        assert_eq!(config.ai.mode, AnalysisMode::Free);
    }

    #[test]
    fn test_set_value() {
        let mut config = Config::default();

        config.set_value("ai.mode", "claude").unwrap();
        config.set_value("ai.ollama.request_timeout_secs", "30").unwrap();
        config.set_value("output.format", "md").unwrap();
        config.set_value("output.detailed", "true").unwrap();

        assert_eq!(config.ai.mode, AnalysisMode::Claude);
        assert_eq!(config.ai.ollama.request_timeout_secs, 30);
        assert_eq!(config.output.format, OutputFormat::Markdown);
        assert!(config.output.detailed);

        assert!(config.set_value("ai.unknown", "x").is_err());
        assert!(config.set_value("output.detailed", "maybe").is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.ai.mode = AnalysisMode::Ollama;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let loaded = Config::load_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_malformed_file_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "ai = 3").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(JobTrackError::Configuration(_))
        ));
    }
}
