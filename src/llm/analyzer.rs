//! Analysis service: try the configured AI collaborator, fall back to keywords
//!
//! The keyword analyzer cannot fail, so every operation here always returns a
//! result. A collaborator that is unreachable, slow, or answers with something
//! unparseable is logged and then ignored for that call.

use crate::config::{AiConfig, AnalysisMode};
use crate::error::{JobTrackError, Result};
use crate::llm::claude::ClaudeClient;
use crate::llm::client::{extract_json_object, parse_analysis, Collaborator, CollaboratorError};
use crate::llm::ollama::OllamaClient;
use crate::llm::prompts;
use crate::processing::analyzer::{self as keyword_analyzer, AtsAnalysis};
use crate::processing::job_details::{self, JobDetails};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const ATS_MAX_TOKENS: u32 = 1024;
const JOB_DETAILS_MAX_TOKENS: u32 = 500;
const COVER_LETTER_MAX_TOKENS: u32 = 1500;
/// Shorter cover letter replies are treated as refusals or noise.
const MIN_COVER_LETTER_CHARS: usize = 100;

/// Where a result came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum AnalysisSource {
    /// The offline keyword analyzer or regex/template fallback.
    Keyword,
    /// An AI collaborator, identified by name (e.g. `ollama:llama3.2`).
    Model(String),
}

impl AnalysisSource {
    pub fn label(&self) -> &str {
        match self {
            AnalysisSource::Keyword => "keyword matching",
            AnalysisSource::Model(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutcome<T> {
    pub result: T,
    pub source: AnalysisSource,
}

impl<T> AnalysisOutcome<T> {
    fn keyword(result: T) -> Self {
        Self {
            result,
            source: AnalysisSource::Keyword,
        }
    }
}

/// Snapshot of the configured backend for status output.
#[derive(Debug, Clone, Serialize)]
pub struct BackendStatus {
    pub collaborator: Option<String>,
    pub available: bool,
}

pub struct AtsService {
    collaborator: Option<Box<dyn Collaborator>>,
}

impl AtsService {
    /// Build the backend chosen by `config.mode`.
    pub fn new(config: &AiConfig) -> Result<Self> {
        let collaborator: Option<Box<dyn Collaborator>> = match config.mode {
            AnalysisMode::Free => None,
            AnalysisMode::Ollama => Some(Box::new(
                OllamaClient::new(&config.ollama).map_err(client_setup_error)?,
            )),
            AnalysisMode::Claude => Some(Box::new(
                ClaudeClient::new(&config.claude).map_err(client_setup_error)?,
            )),
        };

        if let Some(c) = &collaborator {
            info!("Analysis backend: {} with keyword fallback", c.name());
        } else {
            info!("Analysis backend: keyword matching");
        }

        Ok(Self { collaborator })
    }

    /// Service that never consults a model.
    pub fn keyword_only() -> Self {
        Self { collaborator: None }
    }

    pub fn with_collaborator<C: Collaborator + 'static>(collaborator: C) -> Self {
        Self {
            collaborator: Some(Box::new(collaborator)),
        }
    }

    pub fn collaborator_name(&self) -> Option<String> {
        self.collaborator.as_ref().map(|c| c.name())
    }

    pub async fn status(&self) -> BackendStatus {
        match &self.collaborator {
            Some(c) => BackendStatus {
                collaborator: Some(c.name()),
                available: c.is_available().await,
            },
            None => BackendStatus {
                collaborator: None,
                available: true,
            },
        }
    }

    /// Score `resume` against `job`.
    pub async fn analyze(&self, resume: &str, job: &str) -> AnalysisOutcome<AtsAnalysis> {
        let prompt = prompts::render_ats_analysis(resume, job);

        match self.ask(&prompt, ATS_MAX_TOKENS, parse_analysis).await {
            Some(outcome) => outcome,
            None => AnalysisOutcome::keyword(keyword_analyzer::analyze(resume, job)),
        }
    }

    /// Pull company, position, location and salary out of a posting.
    pub async fn extract_job_details(&self, job: &str) -> AnalysisOutcome<JobDetails> {
        let prompt = prompts::render_job_details(job);

        match self.ask(&prompt, JOB_DETAILS_MAX_TOKENS, parse_job_details).await {
            Some(outcome) => outcome,
            None => AnalysisOutcome::keyword(job_details::extract_job_details(job)),
        }
    }

    /// Draft a cover letter, or hand back a fill-in template.
    pub async fn generate_cover_letter(
        &self,
        resume: &str,
        job: &str,
        company: &str,
        tone: &str,
    ) -> AnalysisOutcome<String> {
        let prompt = prompts::render_cover_letter(resume, job, company, tone);

        match self.ask(&prompt, COVER_LETTER_MAX_TOKENS, parse_cover_letter).await {
            Some(outcome) => outcome,
            None => AnalysisOutcome::keyword(cover_letter_template(company)),
        }
    }

    /// Run `prompt` through the collaborator and parse the reply. `None`
    /// means the caller should use its deterministic fallback.
    async fn ask<T, P>(&self, prompt: &str, max_tokens: u32, parse: P) -> Option<AnalysisOutcome<T>>
    where
        P: Fn(&str) -> std::result::Result<T, CollaboratorError>,
    {
        let collaborator = self.collaborator.as_deref()?;
        let name = collaborator.name();

        match consult(collaborator, prompt, max_tokens, parse).await {
            Ok(result) => {
                debug!("{} answered", name);
                Some(AnalysisOutcome {
                    result,
                    source: AnalysisSource::Model(name),
                })
            }
            Err(e) => {
                warn!("{} failed, falling back to keyword analysis: {}", name, e);
                None
            }
        }
    }
}

async fn consult<T, P>(
    collaborator: &dyn Collaborator,
    prompt: &str,
    max_tokens: u32,
    parse: P,
) -> std::result::Result<T, CollaboratorError>
where
    P: Fn(&str) -> std::result::Result<T, CollaboratorError>,
{
    if !collaborator.is_available().await {
        return Err(CollaboratorError::Unavailable(format!(
            "{} is not reachable",
            collaborator.name()
        )));
    }

    let reply = collaborator.complete(prompt, max_tokens).await?;
    parse(&reply)
}

fn client_setup_error(err: CollaboratorError) -> JobTrackError {
    JobTrackError::Configuration(format!("Failed to build AI client: {}", err))
}

/// Parse a job details reply. String fields equal to "null", "None" or ""
/// count as absent; salaries may be numbers or digit strings.
fn parse_job_details(reply: &str) -> std::result::Result<JobDetails, CollaboratorError> {
    let json = extract_json_object(reply)
        .ok_or_else(|| CollaboratorError::Malformed("no JSON object in reply".to_string()))?;

    let value: Value =
        serde_json::from_str(json).map_err(|e| CollaboratorError::Malformed(e.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| CollaboratorError::Malformed("reply is not a JSON object".to_string()))?;

    let text = |key: &str| {
        object
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !matches!(*s, "" | "null" | "None"))
            .map(str::to_string)
    };
    let amount = |key: &str| match object.get(key) {
        Some(Value::Number(n)) => n.as_u64().or_else(|| n.as_f64().map(|f| f.max(0.0) as u64)),
        Some(Value::String(s)) => s.replace(',', "").trim().parse().ok(),
        _ => None,
    };

    Ok(JobDetails {
        company: text("company"),
        position: text("position"),
        location: text("location"),
        salary_min: amount("salary_min"),
        salary_max: amount("salary_max"),
    })
}

fn parse_cover_letter(reply: &str) -> std::result::Result<String, CollaboratorError> {
    let letter = reply.trim();
    if letter.chars().count() > MIN_COVER_LETTER_CHARS {
        Ok(letter.to_string())
    } else {
        Err(CollaboratorError::Malformed(format!(
            "cover letter too short ({} characters)",
            letter.chars().count()
        )))
    }
}

/// Fill-in cover letter used when no model is available.
pub fn cover_letter_template(company: &str) -> String {
    format!(
        "[COVER LETTER TEMPLATE - automatic drafting needs an AI backend]

Dear Hiring Manager at {company},

I am writing to express my strong interest in this position. Based on my background and experience, I believe I would be a valuable addition to your team.

[Paragraph 2: Highlight 2-3 specific experiences from your resume that match the job requirements]

[Paragraph 3: Explain why you're interested in this company specifically and what you can contribute]

[Paragraph 4: Thank them and express enthusiasm for the opportunity to discuss further]

Sincerely,
[Your Name]

---
TIP: To draft personalized cover letters automatically:
   - Install Ollama (free): https://ollama.ai
   - Run: ollama pull llama3.2
   - Run: jobtrack config set ai.mode ollama
Or set ANTHROPIC_API_KEY and run: jobtrack config set ai.mode claude
",
        company = company
    )
}
