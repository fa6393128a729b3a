use anyhow::{Context, Result};
use std::str::from_utf8;

/// Plain-text and markdown documents are stored as UTF-8 already; the
/// bytes are the content.
pub fn extract_from_mem(bytes: &[u8]) -> Result<String> {
    let content = from_utf8(bytes).context("Document is not valid UTF-8")?;
    Ok(content.to_string())
}
