use std::path::Path;

use lopdf::Document;
use tracing::debug;

use super::TextExtractor;
use crate::error::{ProcessError, Result};

/// PDF extraction: page texts joined with newlines, in page order. A page
/// without extractable text contributes an empty segment rather than an
/// error; only a document that fails to load is a parse failure.
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let doc = Document::load(path).map_err(|e| ProcessError::parse("pdf", e))?;

        let mut pages = Vec::new();
        for (&number, _) in doc.get_pages().iter() {
            let text = match doc.extract_text(&[number]) {
                Ok(text) => text,
                Err(e) => {
                    debug!(page = number, error = %e, "no text extracted from page");
                    String::new()
                }
            };
            pages.push(text.trim_end_matches('\n').to_string());
        }

        Ok(pages.join("\n"))
    }
}
