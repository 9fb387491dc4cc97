//! Zip package access: reading the parts we understand and writing a clone
//! in which only replaced parts differ.

use std::collections::BTreeMap;
use std::io::{Cursor, Read, Write};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::write::SimpleFileOptions;
use zip::{DateTime, ZipArchive, ZipWriter};

use super::xml::attr;
use crate::detect::{detect_format_from_bytes, DocxFormat};
use crate::error::{AssemblyError, Error, Result};

/// Upper bound for a single XML part, guarding against zip bombs.
pub const MAX_PART_BYTES: u64 = 64 * 1024 * 1024;

const REL_STYLES: &str = "/styles";
const REL_NUMBERING: &str = "/numbering";
const REL_THEME: &str = "/theme";
const REL_HEADER: &str = "/header";
const REL_FOOTER: &str = "/footer";

/// Parts related to the main document through its relationships part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartRelations {
    pub styles: Option<String>,
    pub numbering: Option<String>,
    pub theme: Option<String>,
    /// Header and footer parts, sorted by name
    pub stories: Vec<String>,
    /// The header parts among `stories`
    pub headers: Vec<String>,
}

/// A word-processing package held in memory.
///
/// The original bytes are kept so that unchanged entries can be copied
/// without recompression.
#[derive(Debug, Clone)]
pub struct Package {
    raw: Vec<u8>,
    format: DocxFormat,
    relations: PartRelations,
    parts: BTreeMap<String, Vec<u8>>,
    entry_names: Vec<String>,
}

impl Package {
    /// Open a package and load the parts needed for fingerprinting.
    pub fn open(bytes: &[u8]) -> Result<Self> {
        let format = detect_format_from_bytes(bytes)?;
        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| Error::UnreadableTemplate(format!("corrupt zip archive: {}", e)))?;
        let entry_names: Vec<String> = archive.file_names().map(str::to_string).collect();

        let mut parts = BTreeMap::new();
        let main = read_part(&mut archive, &format.main_part)?.ok_or_else(|| {
            Error::UnreadableTemplate(format!("missing main document part {}", format.main_part))
        })?;
        parts.insert(format.main_part.clone(), main);

        let rels_name = rels_part_name(&format.main_part);
        let relations = match read_part(&mut archive, &rels_name)? {
            Some(xml) => parse_relations(&xml, &format.main_part),
            None => PartRelations::default(),
        };
        let relations = with_conventional_fallbacks(relations, &entry_names);

        let related = [
            relations.styles.as_ref(),
            relations.numbering.as_ref(),
            relations.theme.as_ref(),
        ];
        for name in related.into_iter().flatten().chain(relations.stories.iter()) {
            if let Some(data) = read_part(&mut archive, name)? {
                parts.insert(name.clone(), data);
            }
        }

        log::debug!(
            "opened {} with {} entries ({} parts loaded)",
            format,
            entry_names.len(),
            parts.len()
        );

        Ok(Self {
            raw: bytes.to_vec(),
            format,
            relations,
            parts,
            entry_names,
        })
    }

    /// Package format.
    pub fn format(&self) -> &DocxFormat {
        &self.format
    }

    /// Name of the main document part.
    pub fn main_part_name(&self) -> &str {
        &self.format.main_part
    }

    /// Main document part bytes.
    pub fn main_part(&self) -> &[u8] {
        self.parts
            .get(&self.format.main_part)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// A loaded part by zip entry name.
    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.parts.get(name).map(Vec::as_slice)
    }

    /// Relationship targets of the main part.
    pub fn relations(&self) -> &PartRelations {
        &self.relations
    }

    /// Styles part, if any.
    pub fn styles_part(&self) -> Option<&[u8]> {
        self.relations.styles.as_deref().and_then(|n| self.part(n))
    }

    /// Numbering part, if any.
    pub fn numbering_part(&self) -> Option<&[u8]> {
        self.relations.numbering.as_deref().and_then(|n| self.part(n))
    }

    /// Theme part, if any.
    pub fn theme_part(&self) -> Option<&[u8]> {
        self.relations.theme.as_deref().and_then(|n| self.part(n))
    }

    /// Header and footer parts.
    pub fn stories(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.relations
            .stories
            .iter()
            .filter_map(|name| self.part(name).map(|data| (name.as_str(), data)))
    }

    /// Page header parts.
    pub fn headers(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.relations
            .headers
            .iter()
            .filter_map(|name| self.part(name).map(|data| (name.as_str(), data)))
    }

    /// Zip entry names in archive order.
    pub fn entry_names(&self) -> &[String] {
        &self.entry_names
    }

    /// Size of the original package.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Whether the package is empty.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Write a clone of the package with some entries replaced.
    ///
    /// Entries not in `replacements` are raw-copied, so their compressed
    /// bytes are identical to the template's. Replaced entries keep their
    /// compression method and get a fixed timestamp, which makes the output
    /// a pure function of the inputs.
    pub fn write_with(
        &self,
        replacements: &BTreeMap<String, Vec<u8>>,
    ) -> std::result::Result<Vec<u8>, AssemblyError> {
        for name in replacements.keys() {
            if !self.entry_names.iter().any(|n| n == name) {
                return Err(AssemblyError::MissingPart(name.clone()));
            }
        }

        let mut archive = ZipArchive::new(Cursor::new(self.raw.as_slice()))?;
        let mut writer = ZipWriter::new(Cursor::new(Vec::with_capacity(self.raw.len())));

        for index in 0..archive.len() {
            let entry = archive.by_index_raw(index)?;
            match replacements.get(entry.name()) {
                Some(data) => {
                    let options = SimpleFileOptions::default()
                        .compression_method(entry.compression())
                        .last_modified_time(DateTime::default());
                    let name = entry.name().to_string();
                    drop(entry);
                    writer.start_file(name, options)?;
                    writer.write_all(data)?;
                }
                None => writer.raw_copy_file(entry)?,
            }
        }

        let cursor = writer.finish()?;
        Ok(cursor.into_inner())
    }
}

fn read_part(
    archive: &mut ZipArchive<Cursor<&[u8]>>,
    name: &str,
) -> Result<Option<Vec<u8>>> {
    let entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(Error::UnreadableTemplate(format!("{}: {}", name, e))),
    };
    let mut out = Vec::new();
    entry
        .take(MAX_PART_BYTES)
        .read_to_end(&mut out)
        .map_err(|e| Error::UnreadableTemplate(format!("{}: {}", name, e)))?;
    if out.len() as u64 >= MAX_PART_BYTES {
        return Err(Error::UnreadableTemplate(format!(
            "{} exceeds size limit ({} bytes)",
            name, MAX_PART_BYTES
        )));
    }
    Ok(Some(out))
}

/// `word/document.xml` -> `word/_rels/document.xml.rels`
fn rels_part_name(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", part),
    }
}

/// Resolve a relationship target against the directory of `source`.
fn resolve_target(source: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }
    let mut segments: Vec<&str> = match source.rsplit_once('/') {
        Some((dir, _)) => dir.split('/').collect(),
        None => Vec::new(),
    };
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

fn parse_relations(xml: &[u8], source: &str) -> PartRelations {
    let mut relations = PartRelations::default();
    let mut reader = Reader::from_reader(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Empty(e)) | Ok(Event::Start(e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                if attr(&e, b"TargetMode").is_some_and(|m| m == "External") {
                    continue;
                }
                let (Some(kind), Some(target)) = (attr(&e, b"Type"), attr(&e, b"Target")) else {
                    continue;
                };
                let path = resolve_target(source, &target);
                if kind.ends_with(REL_STYLES) {
                    relations.styles.get_or_insert(path);
                } else if kind.ends_with(REL_NUMBERING) {
                    relations.numbering.get_or_insert(path);
                } else if kind.ends_with(REL_THEME) {
                    relations.theme.get_or_insert(path);
                } else if kind.ends_with(REL_HEADER) {
                    relations.headers.push(path.clone());
                    relations.stories.push(path);
                } else if kind.ends_with(REL_FOOTER) {
                    relations.stories.push(path);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                log::warn!("ignoring unreadable relationships part: {}", e);
                break;
            }
            _ => {}
        }
    }
    relations.stories.sort();
    relations.stories.dedup();
    relations.headers.sort();
    relations.headers.dedup();
    relations
}

fn with_conventional_fallbacks(mut relations: PartRelations, entries: &[String]) -> PartRelations {
    let exists = |name: &str| entries.iter().any(|e| e == name);
    if relations.styles.is_none() && exists("word/styles.xml") {
        relations.styles = Some("word/styles.xml".to_string());
    }
    if relations.numbering.is_none() && exists("word/numbering.xml") {
        relations.numbering = Some("word/numbering.xml".to_string());
    }
    if relations.theme.is_none() && exists("word/theme/theme1.xml") {
        relations.theme = Some("word/theme/theme1.xml".to_string());
    }
    relations
}
