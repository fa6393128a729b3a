use serde::Serialize;

/// A document fetched from the store. Immutable for the lifetime of the
/// viewer that owns it.
#[derive(Clone, Debug, Serialize)]
pub struct Document {
    pub id: String,
    pub filename: String,
    pub uploaded: String,
    pub content: String,
}

/// One contiguous run of document text, tagged as matching the active
/// search term or not. Concatenating a document's segments in order
/// reproduces its content exactly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub is_match: bool,
    /// 0-based occurrence number for match segments, -1 otherwise.
    pub match_index: isize,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_match: false,
            match_index: -1,
        }
    }

    pub fn matched(text: impl Into<String>, match_index: usize) -> Self {
        Self {
            text: text.into(),
            is_match: true,
            match_index: match_index as isize,
        }
    }
}

/// Instruction emitted by the match navigator: scroll occurrence
/// `match_index` into centered view and move the emphasis marker to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FocusTarget {
    pub match_index: usize,
}

/// Supported document file types
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileType {
    /// Portable Document Format (.pdf)
    Pdf,
    /// Microsoft Word document (.docx)
    Docx,
    /// Plain text (.txt)
    Text,
    /// Markdown (.md)
    Markdown,
}

impl FileType {
    /// Get the file extension for this file type
    pub fn extension(&self) -> &'static str {
        match self {
            FileType::Pdf => ".pdf",
            FileType::Docx => ".docx",
            FileType::Text => ".txt",
            FileType::Markdown => ".md",
        }
    }

    /// Short tag used in listings
    pub fn label(&self) -> &'static str {
        match self {
            FileType::Pdf => "[PDF]",
            FileType::Docx => "[DOCX]",
            FileType::Text => "[TXT]",
            FileType::Markdown => "[MD]",
        }
    }
}
