//! Word-processing package detection and validation.

use crate::error::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use std::path::Path;

/// Zip local file header magic: PK\x03\x04
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Content types part name inside every OPC package.
pub const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

/// Conventional main part location.
pub const DEFAULT_MAIN_PART: &str = "word/document.xml";

/// Flavor of the word-processing package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// `.docx`
    Document,
    /// `.dotx`
    Template,
    /// `.docm`
    MacroEnabledDocument,
    /// `.dotm`
    MacroEnabledTemplate,
}

impl DocumentKind {
    fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml" => {
                Some(DocumentKind::Document)
            }
            "application/vnd.openxmlformats-officedocument.wordprocessingml.template.main+xml" => {
                Some(DocumentKind::Template)
            }
            "application/vnd.ms-word.document.macroEnabled.main+xml" => {
                Some(DocumentKind::MacroEnabledDocument)
            }
            "application/vnd.ms-word.template.macroEnabledTemplate.main+xml" => {
                Some(DocumentKind::MacroEnabledTemplate)
            }
            _ => None,
        }
    }

    /// Usual file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentKind::Document => "docx",
            DocumentKind::Template => "dotx",
            DocumentKind::MacroEnabledDocument => "docm",
            DocumentKind::MacroEnabledTemplate => "dotm",
        }
    }
}

/// Package format information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocxFormat {
    /// Package flavor
    pub kind: DocumentKind,
    /// Zip entry name of the main document part
    pub main_part: String,
}

impl std::fmt::Display for DocxFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.kind.extension().to_uppercase(), self.main_part)
    }
}

/// Detect the package format from a file path.
///
/// # Example
/// ```no_run
/// use cvforge::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("template.docx").unwrap();
/// println!("Main part: {}", format.main_part);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<DocxFormat> {
    let data = std::fs::read(path)?;
    detect_format_from_bytes(&data)
}

/// Detect the package format from the complete file bytes.
///
/// # Returns
/// * `Ok(DocxFormat)` if the data is a zip package with a word-processing main part
/// * `Err(Error::UnreadableTemplate)` otherwise
pub fn detect_format_from_bytes(data: &[u8]) -> Result<DocxFormat> {
    if !is_zip_bytes(data) {
        return Err(Error::UnreadableTemplate("not a zip archive".to_string()));
    }

    let mut archive = zip::ZipArchive::new(Cursor::new(data))
        .map_err(|e| Error::UnreadableTemplate(format!("corrupt zip archive: {}", e)))?;

    let content_types = match archive.by_name(CONTENT_TYPES_PART) {
        Ok(entry) => {
            let mut xml = Vec::new();
            entry
                .take(crate::docx::package::MAX_PART_BYTES)
                .read_to_end(&mut xml)
                .map_err(|e| Error::UnreadableTemplate(e.to_string()))?;
            Some(xml)
        }
        Err(_) => None,
    };

    let declared = content_types.as_deref().and_then(main_part_from_content_types);
    let format = match declared {
        Some((kind, main_part)) => DocxFormat { kind, main_part },
        None => DocxFormat {
            kind: DocumentKind::Document,
            main_part: DEFAULT_MAIN_PART.to_string(),
        },
    };

    if archive.index_for_name(&format.main_part).is_none() {
        return Err(Error::UnreadableTemplate(format!(
            "missing main document part {}",
            format.main_part
        )));
    }

    Ok(format)
}

/// Find the main document part declared in `[Content_Types].xml`.
pub(crate) fn main_part_from_content_types(xml: &[u8]) -> Option<(DocumentKind, String)> {
    let mut reader = Reader::from_reader(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.local_name().as_ref() == b"Override" => {
                let content_type = crate::docx::xml::attr(&e, b"ContentType").unwrap_or_default();
                let part = crate::docx::xml::attr(&e, b"PartName");
                if let (Some(kind), Some(part)) = (DocumentKind::from_content_type(&content_type), part) {
                    return Some((kind, part.trim_start_matches('/').to_string()));
                }
            }
            Ok(Event::Eof) | Err(_) => return None,
            _ => {}
        }
    }
}

/// Check if a file is a word-processing package.
pub fn is_docx<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes are a word-processing package.
pub fn is_docx_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}

/// Check the zip magic only.
pub fn is_zip_bytes(data: &[u8]) -> bool {
    data.starts_with(ZIP_MAGIC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn package(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in entries {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_detect_document() {
        let data = package(&[
            (
                CONTENT_TYPES_PART,
                r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#,
            ),
            ("word/document.xml", "<w:document/>"),
        ]);
        let format = detect_format_from_bytes(&data).unwrap();
        assert_eq!(format.kind, DocumentKind::Document);
        assert_eq!(format.main_part, "word/document.xml");
        assert_eq!(format.to_string(), "DOCX (word/document.xml)");
    }

    #[test]
    fn test_detect_template_flavor() {
        let data = package(&[
            (
                CONTENT_TYPES_PART,
                r#"<Types><Override PartName="/word/main.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.template.main+xml"/></Types>"#,
            ),
            ("word/main.xml", "<w:document/>"),
        ]);
        let format = detect_format_from_bytes(&data).unwrap();
        assert_eq!(format.kind, DocumentKind::Template);
        assert_eq!(format.main_part, "word/main.xml");
    }

    #[test]
    fn test_not_a_zip() {
        assert!(matches!(
            detect_format_from_bytes(b"%PDF-1.7"),
            Err(Error::UnreadableTemplate(_))
        ));
        assert!(!is_docx_bytes(b""));
    }

    #[test]
    fn test_zip_without_main_part() {
        let data = package(&[("readme.txt", "hello")]);
        assert!(is_zip_bytes(&data));
        assert!(matches!(
            detect_format_from_bytes(&data),
            Err(Error::UnreadableTemplate(_))
        ));
    }

    #[test]
    fn test_is_docx_missing_file() {
        assert!(!is_docx("/nonexistent/template.docx"));
    }
}
