use anyhow::{Context, Result};

/// Extract the full text of a PDF document.
pub fn extract_from_mem(bytes: &[u8]) -> Result<String> {
    pdf_extract::extract_text_from_mem(bytes).context("Failed to extract text from pdf")
}
