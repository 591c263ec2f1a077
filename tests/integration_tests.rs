//! Integration tests for the job tracker

use async_trait::async_trait;
use jobtrack::config::{AnalysisMode, Config};
use jobtrack::error::JobTrackError;
use jobtrack::input::read_document;
use jobtrack::llm::analyzer::cover_letter_template;
use jobtrack::llm::client::{Collaborator, CollaboratorError};
use jobtrack::output::formatter::ReportGenerator;
use jobtrack::output::report::AnalysisReport;
use jobtrack::{analyze, AnalysisSource, AtsService};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const RESUME: &str = "Python developer with SQL and React experience";
const JOB: &str = "Seeking Python engineer: SQL, Docker, Kubernetes, React";

/// Collaborator with a scripted answer.
struct ScriptedCollaborator {
    available: bool,
    reply: Result<String, String>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedCollaborator {
    fn replying(reply: &str) -> Self {
        Self {
            available: true,
            reply: Ok(reply.to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            available: true,
            reply: Err(message.to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn offline() -> Self {
        Self {
            available: false,
            reply: Ok("{}".to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl Collaborator for ScriptedCollaborator {
    fn name(&self) -> String {
        "scripted:test".to_string()
    }

    async fn is_available(&self) -> bool {
        self.available
    }

    async fn complete(&self, _prompt: &str, _max_tokens: u32) -> Result<String, CollaboratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Ok(reply) => Ok(reply.clone()),
            Err(message) => Err(CollaboratorError::Api {
                status: 500,
                message: message.clone(),
            }),
        }
    }
}

fn unreachable_ollama_config() -> Config {
    let mut config = Config::default();
    config.ai.mode = AnalysisMode::Ollama;
    config.ai.ollama.url = "http://127.0.0.1:9".to_string();
    config.ai.ollama.probe_timeout_secs = 1;
    config.ai.ollama.request_timeout_secs = 1;
    config
}

#[tokio::test]
async fn test_model_answer_is_used() {
    let reply = r#"Sure! ```json
{"score": 87.6, "missing_keywords": ["kubernetes"], "suggestions": ["Mention Kubernetes"], "summary": "Strong fit."}
```"#;
    let service = AtsService::with_collaborator(ScriptedCollaborator::replying(reply));

    let outcome = service.analyze(RESUME, JOB).await;

    assert_eq!(outcome.source, AnalysisSource::Model("scripted:test".to_string()));
    assert_eq!(outcome.result.score, 88);
    assert_eq!(outcome.result.missing_keywords, vec!["kubernetes"]);
    assert_eq!(outcome.result.summary, "Strong fit.");
}

#[tokio::test]
async fn test_out_of_range_model_score_is_clamped() {
    let reply = r#"{"score": 140, "missing_keywords": [], "suggestions": [], "summary": "ok"}"#;
    let service = AtsService::with_collaborator(ScriptedCollaborator::replying(reply));

    assert_eq!(service.analyze(RESUME, JOB).await.result.score, 100);
}

#[tokio::test]
async fn test_long_model_keyword_list_is_capped() {
    let keywords: Vec<String> = (1..=30).map(|i| format!("skill{:02}", i)).collect();
    let reply = serde_json::json!({
        "score": 35,
        "missing_keywords": keywords,
        "suggestions": ["Add more skills"],
        "summary": "Weak fit.",
    })
    .to_string();
    let service = AtsService::with_collaborator(ScriptedCollaborator::replying(&reply));

    let outcome = service.analyze(RESUME, JOB).await;

    assert!(matches!(outcome.source, AnalysisSource::Model(_)));
    assert_eq!(outcome.result.missing_keywords.len(), 15);
    assert_eq!(outcome.result.missing_keywords.first().map(String::as_str), Some("skill01"));
    assert_eq!(outcome.result.missing_keywords.last().map(String::as_str), Some("skill15"));
}

#[tokio::test]
async fn test_malformed_answer_falls_back_to_keywords() {
    for reply in [
        "I think this resume is pretty good!",
        r#"{"score": 70, "missing_keywords": []}"#,
        r#"{"score": "high", "missing_keywords": [], "suggestions": [], "summary": "x"}"#,
    ] {
        let service = AtsService::with_collaborator(ScriptedCollaborator::replying(reply));
        let outcome = service.analyze(RESUME, JOB).await;

        assert_eq!(outcome.source, AnalysisSource::Keyword, "reply: {}", reply);
        assert_eq!(outcome.result, analyze(RESUME, JOB));
    }
}

#[tokio::test]
async fn test_failed_request_falls_back_to_keywords() {
    let service = AtsService::with_collaborator(ScriptedCollaborator::failing("overloaded"));
    let outcome = service.analyze(RESUME, JOB).await;

    assert_eq!(outcome.source, AnalysisSource::Keyword);
    assert_eq!(outcome.result, analyze(RESUME, JOB));
}

#[tokio::test]
async fn test_unavailable_collaborator_is_not_called() {
    let collaborator = ScriptedCollaborator::offline();
    let calls = Arc::clone(&collaborator.calls);
    let service = AtsService::with_collaborator(collaborator);

    let outcome = service.analyze(RESUME, JOB).await;

    assert_eq!(outcome.source, AnalysisSource::Keyword);
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let status = service.status().await;
    assert_eq!(status.collaborator.as_deref(), Some("scripted:test"));
    assert!(!status.available);
}

#[tokio::test]
async fn test_free_mode_uses_keywords() {
    let service = AtsService::new(&Config::default().ai).unwrap();

    assert!(service.collaborator_name().is_none());
    let outcome = service.analyze(RESUME, JOB).await;
    assert_eq!(outcome.source, AnalysisSource::Keyword);
    assert_eq!(outcome.result.score, 50);
    assert!(service.status().await.available);
}

#[tokio::test]
async fn test_unreachable_ollama_falls_back() {
    let config = unreachable_ollama_config();
    let service = AtsService::new(&config.ai).unwrap();

    assert_eq!(service.collaborator_name().as_deref(), Some("ollama:llama3.2"));

    let outcome = service.analyze(RESUME, JOB).await;
    assert_eq!(outcome.source, AnalysisSource::Keyword);
    assert_eq!(outcome.result, analyze(RESUME, JOB));
    assert!(!service.status().await.available);
}

#[tokio::test]
async fn test_job_details_from_model() {
    let reply = r#"{"company": "Northwind", "position": "Backend Engineer", "location": "Remote", "salary_min": 140000, "salary_max": null}"#;
    let service = AtsService::with_collaborator(ScriptedCollaborator::replying(reply));

    let outcome = service.extract_job_details("any posting").await;

    assert!(matches!(outcome.source, AnalysisSource::Model(_)));
    assert_eq!(outcome.result.company.as_deref(), Some("Northwind"));
    assert_eq!(outcome.result.salary_min, Some(140_000));
    assert!(outcome.result.salary_max.is_none());
}

#[tokio::test]
async fn test_job_details_fallback_reads_posting() {
    let job = read_document(Path::new("tests/fixtures/sample_job.txt")).await.unwrap();
    let service = AtsService::with_collaborator(ScriptedCollaborator::failing("down"));

    let outcome = service.extract_job_details(&job).await;

    assert_eq!(outcome.source, AnalysisSource::Keyword);
    assert_eq!(outcome.result.location.as_deref(), Some("Denver, CO"));
    assert_eq!(outcome.result.salary_min, Some(140_000));
    assert_eq!(outcome.result.salary_max, Some(175_000));
    assert!(outcome.result.company.is_none());
}

#[tokio::test]
async fn test_cover_letter_from_model() {
    let letter = "Dear Northwind team,\n\n".to_string() + &"I build reliable backend services. ".repeat(10);
    let service = AtsService::with_collaborator(ScriptedCollaborator::replying(&letter));

    let outcome = service
        .generate_cover_letter(RESUME, JOB, "Northwind", "professional")
        .await;

    assert!(matches!(outcome.source, AnalysisSource::Model(_)));
    assert_eq!(outcome.result, letter.trim());
}

#[tokio::test]
async fn test_cover_letter_falls_back_to_template() {
    let service = AtsService::with_collaborator(ScriptedCollaborator::replying("No."));

    let outcome = service
        .generate_cover_letter(RESUME, JOB, "Northwind", "friendly")
        .await;

    assert_eq!(outcome.source, AnalysisSource::Keyword);
    assert_eq!(outcome.result, cover_letter_template("Northwind"));
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let text = read_document(Path::new("tests/fixtures/sample_resume.txt")).await.unwrap();

    assert!(text.contains("Jane Smith"));
    assert!(text.contains("PostgreSQL"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let text = read_document(Path::new("tests/fixtures/sample_resume.md")).await.unwrap();

    assert!(text.contains("Jane Smith"));
    assert!(text.contains("Docker"));
    // Markdown syntax and link targets are stripped
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
    assert!(!text.contains("https://"));
}

#[tokio::test]
async fn test_txt_and_markdown_score_the_same() {
    let job = read_document(Path::new("tests/fixtures/sample_job.txt")).await.unwrap();
    let txt = read_document(Path::new("tests/fixtures/sample_resume.txt")).await.unwrap();
    let md = read_document(Path::new("tests/fixtures/sample_resume.md")).await.unwrap();

    let from_txt = analyze(&txt, &job);
    assert_eq!(from_txt.score, analyze(&md, &job).score);
    assert!(from_txt.missing_keywords.contains(&"kubernetes".to_string()));
    assert!(from_txt.missing_keywords.contains(&"terraform".to_string()));
    assert!(!from_txt.missing_keywords.contains(&"python".to_string()));
}

#[tokio::test]
async fn test_unsupported_and_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("resume.pdf");
    std::fs::write(&pdf, b"%PDF-1.4").unwrap();

    assert!(matches!(
        read_document(&pdf).await,
        Err(JobTrackError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        read_document(&dir.path().join("missing.txt")).await,
        Err(JobTrackError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn test_report_round_trip_through_json() {
    let service = AtsService::keyword_only();
    let outcome = service.analyze(RESUME, JOB).await;
    let report = AnalysisReport::new(outcome, "resume.txt", "job.txt").with_keyword_breakdown(RESUME, JOB);

    let generator = ReportGenerator::with_options(false, true, false, true);
    let json = generator
        .generate_report(&report, &jobtrack::config::OutputFormat::Json)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["score"], 50);
    assert_eq!(
        value["missing_keywords"],
        serde_json::json!(["kubernetes", "engineer", "docker"])
    );
    assert_eq!(value["source"]["kind"], "keyword");
    assert_eq!(value["metadata"]["resume_file"], "resume.txt");
}

#[test]
fn test_config_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jobtrack").join("config.toml");

    let created = Config::load_from(&path).unwrap();
    assert!(path.exists());
    assert_eq!(created, Config::default());

    let mut edited = created;
    edited.set_value("ai.mode", "ollama").unwrap();
    edited.set_value("ai.ollama.model", "mistral").unwrap();
    edited.save_to(&path).unwrap();

    let reloaded = Config::load_from(&path).unwrap();
    assert_eq!(reloaded.ai.mode, AnalysisMode::Ollama);
    assert_eq!(reloaded.ai.ollama.model, "mistral");
}
