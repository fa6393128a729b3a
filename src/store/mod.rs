use anyhow::{Context, Result};
use std::path::PathBuf;
use walkdir::WalkDir;

use crate::types::{Document, FileType};
use crate::utils::{format_timestamp, parse_filetype};

pub mod docx;
pub mod pdf;
pub mod text;

/// Document retrieval collaborator. Documents live as files under a root
/// directory and are identified by their path relative to it; fetching a
/// document reads the file and extracts its text by type.
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    /// Enumerate document ids under the root matching `pattern`,
    /// skipping files of unsupported types.
    pub fn list(&self, pattern: &str, recursive: bool) -> Result<Vec<String>> {
        let matcher = glob::Pattern::new(pattern)
            .with_context(|| format!("Invalid file pattern: {}", pattern))?;

        let mut ids = Vec::new();
        let walker = if recursive {
            WalkDir::new(&self.root)
        } else {
            WalkDir::new(&self.root).max_depth(1)
        };

        for entry in walker
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let name = entry.file_name().to_string_lossy();
            if !matcher.matches(&name) {
                continue;
            }
            if parse_filetype(&name).is_err() {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(&self.root) {
                ids.push(relative.to_string_lossy().to_string());
            }
        }

        ids.sort();
        Ok(ids)
    }

    /// Fetch one document by id. Fails on unreadable files or failed
    /// extraction; the caller decides how to surface that.
    pub async fn fetch(&self, id: &str) -> Result<Document> {
        let path = self.root.join(id);
        let file_type = parse_filetype(&path.to_string_lossy())?;

        let metadata = tokio::fs::metadata(&path)
            .await
            .with_context(|| format!("Document not found: {}", path.display()))?;
        let uploaded = metadata
            .modified()
            .map(format_timestamp)
            .unwrap_or_else(|_| "Unknown".to_string());

        let bytes = tokio::fs::read(&path)
            .await
            .with_context(|| format!("Failed to read document: {}", path.display()))?;

        // Extraction is CPU-bound, keep it off the async workers.
        let content = match file_type {
            FileType::Pdf => {
                tokio::task::spawn_blocking(move || pdf::extract_from_mem(&bytes)).await??
            }
            FileType::Docx => {
                tokio::task::spawn_blocking(move || docx::extract_from_mem(&bytes)).await??
            }
            FileType::Text | FileType::Markdown => text::extract_from_mem(&bytes)?,
        };

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| id.to_string());

        Ok(Document {
            id: id.to_string(),
            filename,
            uploaded,
            content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_fetch_text_document() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "The fox jumps.\n").unwrap();

        let store = DocumentStore::new(dir.path());
        let document = store.fetch("notes.txt").await.unwrap();
        assert_eq!(document.id, "notes.txt");
        assert_eq!(document.filename, "notes.txt");
        assert_eq!(document.content, "The fox jumps.\n");
    }

    #[tokio::test]
    async fn test_fetch_empty_document_is_empty_content() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("empty.txt"), "").unwrap();

        let store = DocumentStore::new(dir.path());
        let document = store.fetch("empty.txt").await.unwrap();
        assert_eq!(document.content, "");
    }

    #[tokio::test]
    async fn test_fetch_missing_document_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        assert!(store.fetch("nope.txt").await.is_err());
    }

    #[tokio::test]
    async fn test_fetch_unsupported_type_fails() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("binary.bin"), [0u8, 1, 2]).unwrap();

        let store = DocumentStore::new(dir.path());
        assert!(store.fetch("binary.bin").await.is_err());
    }

    #[test]
    fn test_list_filters_supported_types() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("b.md"), "b").unwrap();
        fs::write(dir.path().join("c.bin"), "c").unwrap();

        let store = DocumentStore::new(dir.path());
        let ids = store.list("*", false).unwrap();
        assert_eq!(ids, vec!["a.txt".to_string(), "b.md".to_string()]);
    }

    #[test]
    fn test_list_respects_pattern_and_recursion() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("top.txt"), "t").unwrap();
        fs::write(dir.path().join("sub").join("deep.txt"), "d").unwrap();

        let store = DocumentStore::new(dir.path());
        assert_eq!(store.list("*.txt", false).unwrap(), vec!["top.txt".to_string()]);

        let recursive = store.list("*.txt", true).unwrap();
        assert_eq!(recursive.len(), 2);
        assert!(recursive.contains(&format!("sub{}deep.txt", std::path::MAIN_SEPARATOR)));
    }
}
