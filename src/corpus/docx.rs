use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::corpus::loader::LoadError;

/// Extract the non-empty paragraph texts of a .docx file, in document order.
///
/// A .docx is a zip container; the body lives in `word/document.xml` as
/// WordprocessingML. Only `<w:p>` paragraphs and the `<w:t>` text runs
/// inside them matter here; tabs and line breaks inside a paragraph are
/// flattened to spaces, everything else is ignored.
pub fn paragraph_texts(path: &Path) -> Result<Vec<String>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let mut archive = zip::ZipArchive::new(file).map_err(|e| LoadError::Malformed {
        path: path.to_path_buf(),
        detail: format!("not a docx container: {e}"),
    })?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| LoadError::Malformed {
            path: path.to_path_buf(),
            detail: format!("missing word/document.xml: {e}"),
        })?
        .read_to_string(&mut xml)
        .map_err(|source| LoadError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

    parse_document_xml(&xml).map_err(|detail| LoadError::Malformed {
        path: path.to_path_buf(),
        detail,
    })
}

fn parse_document_xml(xml: &str) -> Result<Vec<String>, String> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    // Paragraphs (w:p) nest inside tables but never inside each other, so a
    // depth counter handles malformed nesting without extra state.
    let mut para_depth = 0usize;
    let mut in_text_run = false;

    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"p" => {
                    para_depth += 1;
                    current.clear();
                }
                b"t" if para_depth > 0 => in_text_run = true,
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"p" => {
                    para_depth = para_depth.saturating_sub(1);
                    let text = current.trim();
                    if !text.is_empty() {
                        paragraphs.push(text.to_string());
                    }
                    current.clear();
                }
                b"t" => in_text_run = false,
                _ => {}
            },
            Event::Empty(e) if para_depth > 0 => {
                // Intra-paragraph whitespace elements become a single space.
                if matches!(e.local_name().as_ref(), b"tab" | b"br" | b"cr") {
                    current.push(' ');
                }
            }
            Event::Text(t) if in_text_run => {
                current.push_str(&t.unescape().map_err(|e| e.to_string())?);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    const DOC_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#;
    const DOC_FOOTER: &str = "</w:body></w:document>";

    fn para(text: &str) -> String {
        format!("<w:p><w:r><w:t>{text}</w:t></w:r></w:p>")
    }

    fn write_docx(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let file = File::create(&path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        writer
            .start_file("word/document.xml", SimpleFileOptions::default())
            .unwrap();
        writer
            .write_all(format!("{DOC_HEADER}{body}{DOC_FOOTER}").as_bytes())
            .unwrap();
        writer.finish().unwrap();
        path
    }

    #[test]
    fn test_paragraphs_in_document_order() {
        let dir = tempfile::tempdir().unwrap();
        let body = format!("{}{}{}", para("你好"), para("Hello"), para("Bye"));
        let path = write_docx(dir.path(), "sample.docx", &body);

        let lines = paragraph_texts(&path).unwrap();
        assert_eq!(lines, vec!["你好", "Hello", "Bye"]);
    }

    #[test]
    fn test_empty_paragraphs_skipped_and_runs_joined() {
        let dir = tempfile::tempdir().unwrap();
        let body = format!(
            "{}<w:p/><w:p><w:r><w:t>Good </w:t></w:r><w:r><w:t>morning</w:t></w:r></w:p>",
            para("First"),
        );
        let path = write_docx(dir.path(), "runs.docx", &body);

        let lines = paragraph_texts(&path).unwrap();
        assert_eq!(lines, vec!["First", "Good morning"]);
    }

    #[test]
    fn test_entities_unescaped() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_docx(dir.path(), "amp.docx", &para("salt &amp; pepper"));

        let lines = paragraph_texts(&path).unwrap();
        assert_eq!(lines, vec!["salt & pepper"]);
    }

    #[test]
    fn test_not_a_zip_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.docx");
        std::fs::write(&path, b"plain text, not a zip").unwrap();

        let err = paragraph_texts(&path).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }));
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let err = paragraph_texts(Path::new("no/such/file.docx")).unwrap_err();
        assert!(matches!(err, LoadError::Unreadable { .. }));
    }
}
