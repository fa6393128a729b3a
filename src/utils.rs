use std::time::SystemTime;

use anyhow::Result;
use chrono::{DateTime, Local};

use crate::types::FileType;

/// Parse file type from a file path
pub fn parse_filetype(file_path: &str) -> Result<FileType> {
    let lower = file_path.to_lowercase();
    if lower.ends_with(".pdf") {
        Ok(FileType::Pdf)
    } else if lower.ends_with(".docx") {
        Ok(FileType::Docx)
    } else if lower.ends_with(".txt") {
        Ok(FileType::Text)
    } else if lower.ends_with(".md") || lower.ends_with(".markdown") {
        Ok(FileType::Markdown)
    } else {
        Err(anyhow::anyhow!(
            "Unsupported file type. Only .pdf, .docx, .txt and .md files are supported. Got: {}",
            file_path
        ))
    }
}

/// Render a filesystem timestamp for the viewer header and listings.
pub fn format_timestamp(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
