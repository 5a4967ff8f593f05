use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use super::TextExtractor;
use crate::error::{ProcessError, Result};

/// Word (.docx) extraction: reads `word/document.xml` from the OOXML archive
/// and concatenates every paragraph's text runs, one paragraph per line.
/// All formatting and structure beyond the plain runs is dropped.
pub struct WordExtractor;

impl TextExtractor for WordExtractor {
    fn extract(&self, path: &Path) -> Result<String> {
        let file = File::open(path)?;
        let mut archive = ZipArchive::new(file).map_err(|e| ProcessError::parse("docx", e))?;

        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .map_err(|e| ProcessError::parse("docx", e))?
            .read_to_string(&mut xml)
            .map_err(|e| ProcessError::parse("docx", e))?;

        paragraphs_from_xml(&xml)
    }
}

fn paragraphs_from_xml(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_run_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_run_text = true,
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_run_text = false,
                b"w:p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            // self-closing <w:p/> still marks an (empty) paragraph
            Ok(Event::Empty(e)) if e.name().as_ref() == b"w:p" => {
                paragraphs.push(std::mem::take(&mut current));
            }
            Ok(Event::Text(t)) if in_run_text => {
                let run = t.unescape().map_err(|e| ProcessError::parse("docx", e))?;
                current.push_str(&run);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(ProcessError::parse("docx", e)),
        }
    }

    Ok(paragraphs.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DOCUMENT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>First paragraph</w:t></w:r></w:p>
    <w:p><w:r><w:t>Second </w:t></w:r><w:r><w:t>paragraph</w:t></w:r></w:p>
    <w:p/>
    <w:p><w:r><w:t>Fourth &amp; last</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    fn write_docx(path: &Path, document_xml: &str) {
        let file = File::create(path).unwrap();
        let mut archive = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();
        archive.start_file("word/document.xml", options).unwrap();
        archive.write_all(document_xml.as_bytes()).unwrap();
        archive.finish().unwrap();
    }

    #[test]
    fn joins_paragraphs_with_newlines_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.docx");
        write_docx(&path, DOCUMENT_XML);

        let text = WordExtractor.extract(&path).unwrap();
        assert_eq!(
            text,
            "First paragraph\nSecond paragraph\n\nFourth & last"
        );
    }

    #[test]
    fn corrupt_archive_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.docx");
        std::fs::write(&path, "this is not a zip archive").unwrap();
        assert!(matches!(
            WordExtractor.extract(&path),
            Err(ProcessError::Parse { kind: "docx", .. })
        ));
    }

    #[test]
    fn archive_without_document_xml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.docx");
        let file = File::create(&path).unwrap();
        let mut archive = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();
        archive.start_file("unrelated.txt", options).unwrap();
        archive.write_all(b"nothing here").unwrap();
        archive.finish().unwrap();

        assert!(matches!(
            WordExtractor.extract(&path),
            Err(ProcessError::Parse { kind: "docx", .. })
        ));
    }
}
