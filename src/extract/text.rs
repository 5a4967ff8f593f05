use std::fs;
use std::path::Path;

use super::TextExtractor;
use crate::error::{ProcessError, Result};

/// Plain text files are returned verbatim as UTF-8.
pub struct TextFileExtractor;

impl TextExtractor for TextFileExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path)?;
        String::from_utf8(bytes).map_err(|e| ProcessError::parse("text", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_utf8_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        let content = "Hello world\n第二行，中文内容\n";
        fs::write(&path, content).unwrap();
        assert_eq!(TextFileExtractor.extract(&path).unwrap(), content);
    }

    #[test]
    fn invalid_utf8_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.txt");
        fs::write(&path, [0xff, 0xfe, 0x80]).unwrap();
        assert!(matches!(
            TextFileExtractor.extract(&path),
            Err(ProcessError::Parse { kind: "text", .. })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            TextFileExtractor.extract(Path::new("gone.txt")),
            Err(ProcessError::Io(_))
        ));
    }
}
