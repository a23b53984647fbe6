//! Document text sources.
//!
//! Turning a binary document into text is handled outside this crate; the
//! pipeline only needs the linearized text of each page.

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Page separator used by common text extraction tools (form feed).
const PAGE_BREAK: char = '\u{c}';

/// Supplies the text of a document, page by page.
pub trait TextSource {
    /// Text of each page, in document order.
    fn extract_pages(&mut self) -> Result<Vec<String>>;

    /// Whole-document text: non-blank pages joined by newlines.
    fn extract_text(&mut self) -> Result<String> {
        Ok(join_pages(&self.extract_pages()?))
    }
}

/// Join page texts, skipping pages that contain only whitespace.
///
/// # Examples
///
/// ```
/// use survey_oxide::extractors::join_pages;
///
/// let pages = vec!["P1 -23.5 -46.6".to_string(), "  \n".to_string(), "P2".to_string()];
/// assert_eq!(join_pages(&pages), "P1 -23.5 -46.6\nP2");
/// ```
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(|p| p.as_ref())
        .filter(|p| !p.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// A UTF-8 text file, optionally split into pages by form feeds.
#[derive(Debug, Clone)]
pub struct PlainTextSource {
    path: PathBuf,
}

impl PlainTextSource {
    /// Create a source for the given file.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl TextSource for PlainTextSource {
    fn extract_pages(&mut self) -> Result<Vec<String>> {
        let content = std::fs::read_to_string(&self.path)?;
        Ok(content.split(PAGE_BREAK).map(str::to_string).collect())
    }
}

/// In-memory pages, mostly useful for tests and callers that already hold text.
impl TextSource for Vec<String> {
    fn extract_pages(&mut self) -> Result<Vec<String>> {
        Ok(self.clone())
    }
}
