mod pdf;
mod sheet;
mod text;
mod word;

pub use pdf::PdfExtractor;
pub use sheet::SheetExtractor;
pub use text::TextFileExtractor;
pub use word::WordExtractor;

use std::collections::HashMap;
use std::path::Path;

use crate::error::{ProcessError, Result};
use crate::validate::normalize_extension;

/// A format-specific text extraction routine.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> Result<String>;
}

/// Dispatches to one extractor per supported format, keyed on the normalized
/// file extension.
pub struct ExtractorRegistry {
    table: HashMap<&'static str, Box<dyn TextExtractor>>,
}

impl ExtractorRegistry {
    pub fn new() -> Self {
        let mut table: HashMap<&'static str, Box<dyn TextExtractor>> = HashMap::new();
        table.insert("txt", Box::new(TextFileExtractor));
        table.insert("docx", Box::new(WordExtractor));
        table.insert("pdf", Box::new(PdfExtractor));
        table.insert("xlsx", Box::new(SheetExtractor));
        Self { table }
    }

    /// Extract text from the file at `path`. Even though the validator runs
    /// first in the normal flow, unknown extensions are rejected here as well
    /// since the registry can be used standalone.
    pub fn extract(&self, path: &Path) -> Result<String> {
        let ext = normalize_extension(path).unwrap_or_default();
        let extractor = self
            .table
            .get(ext.as_str())
            .ok_or_else(|| ProcessError::UnsupportedFormat(ext.clone()))?;
        extractor.extract(path)
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn dispatches_on_normalized_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.TXT");
        fs::write(&path, "Hello world").unwrap();
        let registry = ExtractorRegistry::new();
        assert_eq!(registry.extract(&path).unwrap(), "Hello world");
    }

    #[test]
    fn rejects_unknown_extension_before_dispatch() {
        let registry = ExtractorRegistry::new();
        match registry.extract(Path::new("image.png")) {
            Err(ProcessError::UnsupportedFormat(ext)) => assert_eq!(ext, "png"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn rejects_missing_extension() {
        let registry = ExtractorRegistry::new();
        assert!(matches!(
            registry.extract(Path::new("Makefile")),
            Err(ProcessError::UnsupportedFormat(_))
        ));
    }
}
