use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{ProcessError, Result};

/// Fixed validation ceiling, independent of the transport-level body limit.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Checks an uploaded file's extension against the configured allow-list and
/// enforces the size ceiling. Trusts the extension; no content sniffing.
pub struct Validator {
    supported: HashSet<String>,
}

impl Validator {
    pub fn new(file_types: &[String]) -> Self {
        let supported = file_types
            .iter()
            .map(|t| t.trim_start_matches('.').to_ascii_lowercase())
            .collect();
        Self { supported }
    }

    pub fn validate(&self, path: &Path) -> Result<()> {
        let ext = normalize_extension(path).unwrap_or_default();
        if !self.supported.contains(&ext) {
            return Err(ProcessError::InvalidFileType(ext));
        }

        let size = fs::metadata(path)?.len();
        if size > MAX_FILE_SIZE {
            return Err(ProcessError::FileTooLarge {
                size,
                limit: MAX_FILE_SIZE,
            });
        }

        Ok(())
    }
}

/// Extension without the leading dot, lowercased.
pub fn normalize_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}
