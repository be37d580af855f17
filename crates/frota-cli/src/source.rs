//! Input adapters: converter output on disk to [`Page`]s.
//!
//! Three shapes are accepted, dispatched on file extension:
//! - `.json`: a serialized page dump straight from the converter
//! - `.pdf`: the embedded text layer, split into pages on form feeds
//! - anything else: plain text, treated as a single page of lines

use std::fs;
use std::path::{Path, PathBuf};

use frota_core::{Page, PageSource, SourceError};

/// A converter output file on disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn extension(&self) -> String {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase()
    }

    fn json_pages(&self) -> Result<Vec<Page>, SourceError> {
        let data = fs::read_to_string(&self.path)
            .map_err(|e| SourceError::Read(format!("{}: {e}", self.path.display())))?;
        serde_json::from_str(&data).map_err(|e| SourceError::Malformed(e.to_string()))
    }

    fn pdf_pages(&self) -> Result<Vec<Page>, SourceError> {
        let text = pdf_extract::extract_text(&self.path)
            .map_err(|e| SourceError::Read(format!("{}: {e}", self.path.display())))?;
        Ok(pages_from_text(&text))
    }

    fn text_pages(&self) -> Result<Vec<Page>, SourceError> {
        let text = fs::read_to_string(&self.path)
            .map_err(|e| SourceError::Read(format!("{}: {e}", self.path.display())))?;
        Ok(vec![page_from_lines(1, &text)])
    }
}

impl PageSource for FileSource {
    fn pages(&self) -> Result<Vec<Page>, SourceError> {
        match self.extension().as_str() {
            "json" => self.json_pages(),
            "pdf" => self.pdf_pages(),
            _ => self.text_pages(),
        }
    }
}

/// Split an extracted text layer into pages on form-feed boundaries.
/// Extractors that emit none produce a single page.
fn pages_from_text(text: &str) -> Vec<Page> {
    text.split('\u{0c}')
        .enumerate()
        .map(|(idx, chunk)| page_from_lines(idx as u32 + 1, chunk))
        .collect()
}

fn page_from_lines(number: u32, text: &str) -> Page {
    Page {
        number,
        lines: text.lines().map(|l| l.to_string()).collect(),
        tables: Vec::new(),
    }
}

/// True when the extension is one the batch command should pick up.
pub fn supported_extension(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    matches!(ext.as_str(), "json" | "txt" | "pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_from_text_splits_on_form_feed() {
        let pages = pages_from_text("a\nb\u{0c}c");
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].number, 1);
        assert_eq!(pages[0].lines, vec!["a", "b"]);
        assert_eq!(pages[1].number, 2);
        assert_eq!(pages[1].lines, vec!["c"]);
    }

    #[test]
    fn test_pages_from_text_single_page() {
        let pages = pages_from_text("uma linha\noutra linha");
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].lines.len(), 2);
    }
}
