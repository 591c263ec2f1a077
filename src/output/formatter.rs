//! Output formatters for analysis reports

use crate::config::OutputFormat;
use crate::error::{JobTrackError, Result};
use crate::output::report::AnalysisReport;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for all output formatters
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Terminal output with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Holds one formatter per output format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

/// Badge and color for a score; tiers follow the summary wording.
fn score_tier(score: u8) -> (&'static str, Color) {
    match score {
        80..=100 => ("STRONG MATCH", Color::Green),
        60..=79 => ("DECENT MATCH", Color::Yellow),
        _ => ("NEEDS TAILORING", Color::Red),
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "▓".color(Color::Blue).bold(), title.color(Color::Blue).bold())
        } else {
            format!("\n▓ {}\n", title)
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let (badge, color) = score_tier(score);
        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let analysis = &report.analysis;
        let mut output = String::new();

        output.push_str(&self.format_header("ATS KEYWORD ANALYSIS"));
        output.push_str(&format!(
            "Generated: {} | Backend: {}\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.source.label()
        ));

        output.push_str(&format!(
            "\nScore: {}% {}\n",
            analysis.score,
            self.format_score_badge(analysis.score)
        ));
        let (_, tier_color) = score_tier(analysis.score);
        output.push_str(&format!("{}\n", self.colorize(&analysis.summary, tier_color)));

        if !analysis.missing_keywords.is_empty() {
            output.push_str(&self.format_header("Missing Keywords"));
            output.push_str(&format!(
                "  {}\n",
                self.colorize(&analysis.missing_keywords.join(", "), Color::Yellow)
            ));
        }

        if !analysis.suggestions.is_empty() {
            output.push_str(&self.format_header("Suggestions"));
            for (i, suggestion) in analysis.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        if self.detailed {
            if let Some(breakdown) = &report.keyword_breakdown {
                output.push_str(&self.format_header("Keyword Breakdown"));
                output.push_str(&format!(
                    "  Keyword coverage: {}% ({} matched, {} missing)\n",
                    breakdown.keyword_score,
                    breakdown.matched.len(),
                    breakdown.missing_total
                ));
                if !breakdown.matched.is_empty() {
                    output.push_str(&format!(
                        "  Matched: {}\n",
                        self.colorize(&breakdown.matched.join(", "), Color::Green)
                    ));
                }
            }
            output.push_str(&format!(
                "\n  Resume: {}\n  Job: {}\n",
                report.metadata.resume_file, report.metadata.job_file
            ));
        }

        output.push_str(&format!(
            "\n{} jobtrack v{}\n",
            self.colorize("ℹ", Color::Blue),
            report.metadata.jobtrack_version
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let analysis = &report.analysis;
        let mut output = String::new();

        output.push_str("# ATS Keyword Analysis\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Backend:** {}\n\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.source.label()
            ));
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}`\n\n",
                file_label(&report.metadata.resume_file),
                file_label(&report.metadata.job_file)
            ));
        }

        let (badge, _) = score_tier(analysis.score);
        output.push_str(&format!("**Score:** {}% ({})\n\n", analysis.score, badge));
        output.push_str(&format!("> {}\n\n", analysis.summary));

        if !analysis.missing_keywords.is_empty() {
            output.push_str("## Missing Keywords\n\n");
            for keyword in &analysis.missing_keywords {
                output.push_str(&format!("- `{}`\n", keyword));
            }
            output.push('\n');
        }

        if !analysis.suggestions.is_empty() {
            output.push_str("## Suggestions\n\n");
            for (i, suggestion) in analysis.suggestions.iter().enumerate() {
                output.push_str(&format!("{}. {}\n", i + 1, suggestion));
            }
            output.push('\n');
        }

        if let Some(breakdown) = &report.keyword_breakdown {
            output.push_str("## Keyword Breakdown\n\n");
            output.push_str("| Matched | Missing | Coverage |\n");
            output.push_str("|---------|---------|----------|\n");
            output.push_str(&format!(
                "| {} | {} | {}% |\n\n",
                breakdown.matched.len(),
                breakdown.missing_total,
                breakdown.keyword_score
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

fn file_label(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true)
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: &OutputFormat) -> Result<String> {
        let formatter: &dyn OutputFormatter = match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        };

        if formatter.supports_format() != *format {
            return Err(JobTrackError::OutputFormatting(format!(
                "No formatter registered for {:?}",
                format
            )));
        }

        formatter.format_report(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Write `content` to `file_path`, creating parent directories.
pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
    };

    format!("{}_ats{}.{}", base_name, timestamp_suffix, extension)
}
