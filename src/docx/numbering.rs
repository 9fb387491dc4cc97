//! Numbering definitions (`word/numbering.xml`).

use std::collections::BTreeMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::xml::{attr, attr_u32, describe_error, val};
use crate::error::{Error, Result};

/// One level of an abstract numbering definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelDef {
    /// `numFmt`, e.g. `bullet` or `decimal`
    pub num_fmt: String,
    /// `lvlText`, e.g. `-` or `%1.`
    pub text: String,
    /// Left indent in twips
    pub ind_left: Option<u32>,
    /// Hanging indent in twips
    pub ind_hanging: Option<u32>,
    /// Marker font
    pub font: Option<String>,
}

impl LevelDef {
    /// Whether this level draws a bullet glyph rather than a number.
    pub fn is_bullet(&self) -> bool {
        self.num_fmt == "bullet"
    }

    /// Marker as a reader would see it.
    ///
    /// Symbol and Wingdings bullets live in the private use area; map the
    /// common ones back to their Unicode look-alikes.
    pub fn marker(&self) -> String {
        if !self.is_bullet() {
            return self.text.clone();
        }
        self.text
            .chars()
            .map(|c| match c {
                '\u{F0B7}' => '•',
                '\u{F0A7}' => '▪',
                '\u{F0D8}' => '➢',
                '\u{F076}' => '❖',
                '\u{F0FC}' => '✓',
                '\u{F02D}' => '-',
                other => other,
            })
            .collect()
    }
}

/// Parsed numbering part.
#[derive(Debug, Clone, Default)]
pub struct Numbering {
    abstracts: BTreeMap<u32, BTreeMap<u8, LevelDef>>,
    nums: BTreeMap<u32, u32>,
}

impl Numbering {
    /// Parse `numbering.xml`.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        let mut numbering = Numbering::default();
        let mut path: Vec<Vec<u8>> = Vec::new();
        let mut abstract_id: Option<u32> = None;
        let mut level: Option<(u8, LevelDef)> = None;
        let mut num_id: Option<u32> = None;

        loop {
            let event = reader.read_event().map_err(|e| {
                Error::UnreadableTemplate(format!(
                    "numbering part: {}",
                    describe_error(e, reader.buffer_position())
                ))
            })?;
            match event {
                Event::Start(e) => {
                    numbering.handle(&e, &path, &mut abstract_id, &mut level, &mut num_id);
                    path.push(e.local_name().as_ref().to_vec());
                }
                Event::Empty(e) => {
                    numbering.handle(&e, &path, &mut abstract_id, &mut level, &mut num_id);
                }
                Event::End(e) => {
                    path.pop();
                    match e.local_name().as_ref() {
                        b"lvl" => {
                            if let (Some(id), Some((ilvl, def))) = (abstract_id, level.take()) {
                                numbering
                                    .abstracts
                                    .entry(id)
                                    .or_default()
                                    .entry(ilvl)
                                    .or_insert(def);
                            }
                        }
                        b"abstractNum" => abstract_id = None,
                        b"num" => num_id = None,
                        _ => {}
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(numbering)
    }

    fn handle(
        &mut self,
        e: &BytesStart<'_>,
        path: &[Vec<u8>],
        abstract_id: &mut Option<u32>,
        level: &mut Option<(u8, LevelDef)>,
        num_id: &mut Option<u32>,
    ) {
        let in_override = path.iter().any(|p| p == b"lvlOverride");
        match e.local_name().as_ref() {
            b"abstractNum" => *abstract_id = attr_u32(e, b"abstractNumId"),
            b"lvl" if !in_override && abstract_id.is_some() => {
                let ilvl = attr_u32(e, b"ilvl").unwrap_or(0).min(8) as u8;
                *level = Some((ilvl, LevelDef::default()));
            }
            b"num" => *num_id = attr_u32(e, b"numId"),
            b"abstractNumId" => {
                if let (Some(id), Some(target)) = (*num_id, attr_u32(e, b"val")) {
                    self.nums.insert(id, target);
                }
            }
            name => {
                let Some((_, def)) = level.as_mut() else {
                    return;
                };
                match name {
                    b"numFmt" => def.num_fmt = val(e).unwrap_or_default(),
                    b"lvlText" => def.text = val(e).unwrap_or_default(),
                    b"ind" => {
                        def.ind_left = attr_u32(e, b"left").or_else(|| attr_u32(e, b"start"));
                        def.ind_hanging = attr_u32(e, b"hanging");
                    }
                    b"rFonts" => def.font = attr(e, b"ascii").or_else(|| attr(e, b"hAnsi")),
                    _ => {}
                }
            }
        }
    }

    /// Level definition for a concrete `numId` and level.
    pub fn level(&self, num_id: u32, ilvl: u8) -> Option<&LevelDef> {
        let abstract_id = self.nums.get(&num_id)?;
        self.abstracts.get(abstract_id)?.get(&ilvl)
    }

    /// Whether any numbering instance is defined.
    pub fn is_empty(&self) -> bool {
        self.nums.is_empty()
    }
}
