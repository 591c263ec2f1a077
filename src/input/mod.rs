//! Input processing module
//! Reads resumes and job descriptions from plain-text and Markdown files

pub mod file_detector;
pub mod text_extractor;

use crate::error::{JobTrackError, Result};
use file_detector::FileType;
use log::info;
use std::path::Path;
use text_extractor::{MarkdownExtractor, PlainTextExtractor, TextExtractor};

/// Read `path` and return its text content.
pub async fn read_document(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(JobTrackError::InvalidInput(format!(
            "File does not exist: {}",
            path.display()
        )));
    }

    match FileType::from_path(path) {
        FileType::Text => {
            info!("Reading plain text file: {}", path.display());
            PlainTextExtractor.extract(path).await
        }
        FileType::Markdown => {
            info!("Reading markdown file: {}", path.display());
            MarkdownExtractor.extract(path).await
        }
        FileType::Unknown => Err(JobTrackError::UnsupportedFormat(format!(
            "{} (convert it to .txt or .md first)",
            path.display()
        ))),
    }
}
