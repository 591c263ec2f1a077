//! jobtrack: resume vs. job description ATS analysis

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use jobtrack::cli::{self, Cli, Commands, ConfigAction};
use jobtrack::config::{AnalysisMode, Config};
use jobtrack::error::{JobTrackError, Result};
use jobtrack::input::read_document;
use jobtrack::llm::analyzer::{AnalysisSource, AtsService};
use jobtrack::output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use jobtrack::output::report::AnalysisReport;
use log::{error, info};
use std::future::Future;
use std::path::Path;
use std::process;
use std::time::Duration;

const INPUT_EXTENSIONS: &[&str] = &["txt", "text", "md", "markdown"];

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    dotenvy::dotenv().ok();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let mut config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };
    config.apply_env_overrides();

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            mode,
            output,
            detailed,
            save,
        } => {
            info!("Starting ATS analysis");

            let resume_text = read_input(&resume, "Resume").await?;
            let job_text = read_input(&job, "Job description").await?;

            override_mode(&mut config, mode);
            let service = AtsService::new(&config.ai)?;

            let outcome = with_spinner(
                service.collaborator_name(),
                "Analyzing resume",
                service.analyze(&resume_text, &job_text),
            )
            .await?;
            report_fallback(&config, &outcome.source);

            let detailed = detailed || config.output.detailed;
            let mut report = AnalysisReport::new(
                outcome,
                &resume.to_string_lossy(),
                &job.to_string_lossy(),
            );
            if detailed {
                report = report.with_keyword_breakdown(&resume_text, &job_text);
            }

            let format = output.unwrap_or(config.output.format);
            let color = config.output.color_output && save.is_none();
            let generator = ReportGenerator::with_options(color, detailed, true, true);
            let rendered = generator.generate_report(&report, &format)?;

            match save {
                Some(path) => {
                    // A directory gets a generated file name
                    let path = if path.is_dir() {
                        path.join(suggest_filename(&format, &resume.to_string_lossy(), true))
                    } else {
                        path
                    };
                    save_report_to_file(&rendered, &path)?;
                    println!("Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::ExtractJob { job, mode } => {
            let job_text = read_input(&job, "Job description").await?;

            override_mode(&mut config, mode);
            let service = AtsService::new(&config.ai)?;

            let outcome = with_spinner(
                service.collaborator_name(),
                "Extracting job details",
                service.extract_job_details(&job_text),
            )
            .await?;
            report_fallback(&config, &outcome.source);

            println!("{}", serde_json::to_string_pretty(&outcome.result)?);
        }

        Commands::CoverLetter {
            resume,
            job,
            company,
            tone,
            mode,
            save,
        } => {
            let resume_text = read_input(&resume, "Resume").await?;
            let job_text = read_input(&job, "Job description").await?;

            override_mode(&mut config, mode);
            let service = AtsService::new(&config.ai)?;

            let outcome = with_spinner(
                service.collaborator_name(),
                "Drafting cover letter",
                service.generate_cover_letter(&resume_text, &job_text, &company, &tone),
            )
            .await?;
            report_fallback(&config, &outcome.source);

            match save {
                Some(path) => {
                    save_report_to_file(&outcome.result, &path)?;
                    println!("Cover letter saved to {}", path.display());
                }
                None => println!("{}", outcome.result),
            }
        }

        Commands::Status => {
            let service = AtsService::new(&config.ai)?;
            let status = service.status().await;

            println!("Mode: {} - {}", config.ai.mode, config.mode_description());
            match status.collaborator {
                Some(name) if status.available => println!("Backend {} is reachable", name),
                Some(name) => println!(
                    "Backend {} is not reachable; analyses will use keyword matching",
                    name
                ),
                None => println!("No AI backend configured; keyword matching is always available"),
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("Current Configuration ({})\n", config_path.display());
                println!("Mode: {} - {}", config.ai.mode, config.mode_description());
                println!("\nOllama:");
                println!("  URL: {}", config.ai.ollama.url);
                println!("  Model: {}", config.ai.ollama.model);
                println!(
                    "  Timeouts: {}s request, {}s probe",
                    config.ai.ollama.request_timeout_secs, config.ai.ollama.probe_timeout_secs
                );
                println!("\nClaude:");
                println!("  Model: {}", config.ai.claude.model);
                println!("  API key variable: {}", config.ai.claude.api_key_env);
                println!("  Timeout: {}s", config.ai.claude.request_timeout_secs);
                println!("\nOutput:");
                println!("  Format: {:?}", config.output.format);
                println!("  Detailed: {}", config.output.detailed);
                println!("  Colors: {}", config.output.color_output);
            }

            Some(ConfigAction::Path) => println!("{}", config_path.display()),

            Some(ConfigAction::Reset) => {
                Config::default().save_to(config_path)?;
                println!("Configuration reset to defaults");
            }

            Some(ConfigAction::Set { key, value }) => {
                // Reload so environment overrides are not written back to disk.
                let mut stored = Config::load_from(config_path)?;
                stored.set_value(&key, &value)?;
                stored.save_to(config_path)?;
                println!("Set {} = {}", key, value);
            }
        },
    }

    Ok(())
}

async fn read_input(path: &Path, label: &str) -> Result<String> {
    cli::validate_file_extension(path, INPUT_EXTENSIONS)
        .map_err(|e| JobTrackError::InvalidInput(format!("{} file: {}", label, e)))?;

    let text = read_document(path).await?;
    info!("{} loaded: {} characters", label, text.chars().count());
    Ok(text)
}

fn override_mode(config: &mut Config, mode: Option<AnalysisMode>) {
    if let Some(mode) = mode {
        config.ai.mode = mode;
    }
}

fn report_fallback(config: &Config, source: &AnalysisSource) {
    if config.ai.mode != AnalysisMode::Free && *source == AnalysisSource::Keyword {
        eprintln!("AI backend unavailable, used offline keyword analysis instead");
    }
}

/// Await `task`, showing a spinner while a model is being consulted.
async fn with_spinner<T>(
    collaborator: Option<String>,
    message: &str,
    task: impl Future<Output = T>,
) -> Result<T> {
    let Some(name) = collaborator else {
        return Ok(task.await);
    };

    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner} {msg}").map_err(anyhow::Error::from)?;
    spinner.set_style(style);
    spinner.set_message(format!("{} with {}...", message, name));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = task.await;
    spinner.finish_and_clear();
    Ok(result)
}
