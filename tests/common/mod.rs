//! In-memory DOCX packages for integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Read, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

pub const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

pub const PAGE_SETUP: &str = r#"<w:sectPr><w:headerReference w:type="default" r:id="rId4"/><w:pgSz w:w="12240" w:h="15840"/><w:pgMar w:top="1080" w:right="1152" w:bottom="1080" w:left="1152" w:header="720" w:footer="720" w:gutter="0"/><w:cols w:space="720"/></w:sectPr>"#;

/// Styles: Garamond 11pt body through the minor theme font, Heading1 in
/// Calibri 14pt bold, a List Bullet style bound to numbering 1.
pub const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:docDefaults>
    <w:rPrDefault><w:rPr><w:rFonts w:asciiTheme="minorHAnsi" w:hAnsiTheme="minorHAnsi"/><w:sz w:val="22"/><w:szCs w:val="22"/></w:rPr></w:rPrDefault>
    <w:pPrDefault><w:pPr><w:spacing w:after="120" w:line="264" w:lineRule="auto"/></w:pPr></w:pPrDefault>
  </w:docDefaults>
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>
  <w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/>
    <w:pPr><w:keepNext/><w:spacing w:before="240" w:after="80"/><w:outlineLvl w:val="0"/></w:pPr>
    <w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri"/><w:b/><w:sz w:val="28"/></w:rPr></w:style>
  <w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/>
    <w:rPr><w:rFonts w:asciiTheme="majorHAnsi" w:hAnsiTheme="majorHAnsi"/><w:sz w:val="48"/></w:rPr></w:style>
  <w:style w:type="paragraph" w:styleId="ListBullet"><w:name w:val="List Bullet"/><w:basedOn w:val="Normal"/>
    <w:pPr><w:numPr><w:numId w:val="1"/></w:numPr><w:spacing w:after="40"/></w:pPr></w:style>
</w:styles>"#;

/// Dash bullet at 0.25" with a 0.25" hanging indent.
pub const NUMBERING: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:abstractNum w:abstractNumId="0">
    <w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="-"/><w:lvlJc w:val="left"/>
      <w:pPr><w:ind w:left="360" w:hanging="360"/></w:pPr></w:lvl>
    <w:lvl w:ilvl="1"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="o"/><w:lvlJc w:val="left"/>
      <w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr></w:lvl>
  </w:abstractNum>
  <w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>
</w:numbering>"#;

pub const THEME: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme"><a:themeElements>
  <a:clrScheme name="Custom"><a:dk1><a:srgbClr val="1F2A44"/></a:dk1><a:lt1><a:srgbClr val="FFFFFF"/></a:lt1><a:accent1><a:srgbClr val="2E75B6"/></a:accent1></a:clrScheme>
  <a:fontScheme name="Custom"><a:majorFont><a:latin typeface="Calibri Light"/></a:majorFont><a:minorFont><a:latin typeface="Garamond"/></a:minorFont></a:fontScheme>
</a:themeElements></a:theme>"#;

/// Builds a minimal but complete word-processing package.
#[derive(Debug, Clone)]
pub struct DocxBuilder {
    body: Vec<String>,
    styles: Option<String>,
    numbering: Option<String>,
    theme: Option<String>,
    header: Option<String>,
    section: String,
    compression: CompressionMethod,
}

impl Default for DocxBuilder {
    fn default() -> Self {
        Self {
            body: Vec::new(),
            styles: Some(STYLES.to_string()),
            numbering: Some(NUMBERING.to_string()),
            theme: Some(THEME.to_string()),
            header: None,
            section: PAGE_SETUP.to_string(),
            compression: CompressionMethod::Deflated,
        }
    }
}

impl DocxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw body-level XML.
    pub fn raw(mut self, xml: impl Into<String>) -> Self {
        self.body.push(xml.into());
        self
    }

    /// Paragraph in `style` holding `text`.
    pub fn styled(self, style: &str, text: &str) -> Self {
        self.raw(format!(
            r#"<w:p><w:pPr><w:pStyle w:val="{}"/></w:pPr><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
            style, text
        ))
    }

    pub fn title(self, text: &str) -> Self {
        self.styled("Title", text)
    }

    pub fn heading1(self, text: &str) -> Self {
        self.styled("Heading1", text)
    }

    pub fn bullet(self, text: &str) -> Self {
        self.styled("ListBullet", text)
    }

    pub fn body(self, text: &str) -> Self {
        self.raw(format!(
            r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
            text
        ))
    }

    /// A paragraph holding an inline drawing.
    pub fn picture(self) -> Self {
        self.raw(
            r#"<w:p><w:r><w:drawing><wp:inline xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing"><wp:extent cx="914400" cy="914400"/></wp:inline></w:drawing></w:r></w:p>"#,
        )
    }

    /// A one-cell table.
    pub fn table(self, text: &str) -> Self {
        self.raw(format!(
            r#"<w:tbl><w:tblPr><w:tblW w:w="0" w:type="auto"/></w:tblPr><w:tr><w:tc><w:p><w:r><w:t>{}</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#,
            text
        ))
    }

    /// Page header part carrying `text`.
    pub fn header(mut self, text: &str) -> Self {
        self.header = Some(format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:hdr xmlns:w="{}"><w:p><w:r><w:t>{}</w:t></w:r></w:p></w:hdr>"#,
            W_NS, text
        ));
        self
    }

    pub fn without_styles(mut self) -> Self {
        self.styles = None;
        self
    }

    pub fn without_numbering(mut self) -> Self {
        self.numbering = None;
        self
    }

    pub fn with_styles(mut self, xml: impl Into<String>) -> Self {
        self.styles = Some(xml.into());
        self
    }

    pub fn stored(mut self) -> Self {
        self.compression = CompressionMethod::Stored;
        self
    }

    pub fn document_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{}" xmlns:r="{}"><w:body>{}{}</w:body></w:document>"#,
            W_NS,
            R_NS,
            self.body.concat(),
            self.section
        )
    }

    pub fn build(&self) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(self.compression);

        let mut overrides = String::from(
            r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
        );
        let mut rels = String::new();
        let mut parts: Vec<(&str, String)> = Vec::new();

        if let Some(styles) = &self.styles {
            overrides.push_str(r#"<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>"#);
            rels.push_str(r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#);
            parts.push(("word/styles.xml", styles.clone()));
        }
        if let Some(numbering) = &self.numbering {
            overrides.push_str(r#"<Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/>"#);
            rels.push_str(r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/>"#);
            parts.push(("word/numbering.xml", numbering.clone()));
        }
        if let Some(theme) = &self.theme {
            overrides.push_str(r#"<Override PartName="/word/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>"#);
            rels.push_str(r#"<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/>"#);
            parts.push(("word/theme/theme1.xml", theme.clone()));
        }
        if let Some(header) = &self.header {
            overrides.push_str(r#"<Override PartName="/word/header1.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.header+xml"/>"#);
            rels.push_str(r#"<Relationship Id="rId4" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/header" Target="header1.xml"/>"#);
            parts.push(("word/header1.xml", header.clone()));
        }

        let content_types = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/>{}</Types>"#,
            overrides
        );
        let package_rels = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;
        let document_rels = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
            rels
        );

        let mut entries: Vec<(&str, String)> = vec![
            ("[Content_Types].xml", content_types),
            ("_rels/.rels", package_rels.to_string()),
            ("word/document.xml", self.document_xml()),
            ("word/_rels/document.xml.rels", document_rels),
        ];
        entries.extend(parts);

        for (name, data) in entries {
            writer.start_file(name, options).unwrap();
            writer.write_all(data.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }
}

/// The standard test template: a name, a contact line, one Heading1 and
/// one dash bullet.
pub fn cv_template() -> DocxBuilder {
    DocxBuilder::new()
        .title("Jane Template")
        .body("jane@example.com | 555-0100")
        .heading1("Experience")
        .bullet("Did something notable")
        .body("Closing remarks")
}

/// Decompressed content of one entry.
pub fn read_entry(package: &[u8], name: &str) -> Option<Vec<u8>> {
    let mut archive = ZipArchive::new(Cursor::new(package)).unwrap();
    let mut entry = archive.by_name(name).ok()?;
    let mut out = Vec::new();
    entry.read_to_end(&mut out).unwrap();
    Some(out)
}

/// Decompressed content of one entry as text.
pub fn read_text(package: &[u8], name: &str) -> String {
    String::from_utf8(read_entry(package, name).unwrap()).unwrap()
}

/// Entry names in archive order.
pub fn entry_names(package: &[u8]) -> Vec<String> {
    let archive = ZipArchive::new(Cursor::new(package)).unwrap();
    archive.file_names().map(str::to_string).collect()
}

/// Compressed bytes of one entry, exactly as stored.
pub fn raw_entry(package: &[u8], name: &str) -> Vec<u8> {
    let mut archive = ZipArchive::new(Cursor::new(package)).unwrap();
    let index = archive.index_for_name(name).unwrap();
    let mut entry = archive.by_index_raw(index).unwrap();
    let mut out = Vec::new();
    entry.read_to_end(&mut out).unwrap();
    out
}
