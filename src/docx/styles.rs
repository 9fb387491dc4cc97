//! Style sheet (`word/styles.xml`) parsing and style-chain resolution.

use std::collections::{BTreeMap, BTreeSet};

use quick_xml::events::Event;
use quick_xml::Reader;

use super::props::{ParaProps, RunProps};
use super::xml::{attr, describe_error, val};
use crate::error::{Error, Result};

/// Maximum `basedOn` chain length followed before giving up.
const MAX_CHAIN: usize = 32;

/// Kind of a style definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleKind {
    Paragraph,
    Character,
    Table,
    Numbering,
}

/// One `w:style` definition.
#[derive(Debug, Clone)]
pub struct StyleDef {
    /// Style id (`styleId`)
    pub id: String,
    /// Display name (`name`)
    pub name: Option<String>,
    /// Style type
    pub kind: StyleKind,
    /// Parent style id
    pub based_on: Option<String>,
    /// Whether this is the default style of its kind
    pub is_default: bool,
    /// Paragraph properties declared on this style
    pub para: ParaProps,
    /// Run properties declared on this style
    pub run: RunProps,
}

impl StyleDef {
    fn new(id: String, kind: StyleKind, is_default: bool) -> Self {
        Self {
            id,
            name: None,
            kind,
            based_on: None,
            is_default,
            para: ParaProps::default(),
            run: RunProps::default(),
        }
    }

    /// Heading level implied by the style id or name ("Heading2", "heading 2").
    pub fn heading_level_from_name(&self) -> Option<u8> {
        heading_level_from_name(&self.id)
            .or_else(|| self.name.as_deref().and_then(heading_level_from_name))
    }

    /// Whether the style is a document title style.
    pub fn is_title(&self) -> bool {
        self.id.eq_ignore_ascii_case("title")
            || self
                .name
                .as_deref()
                .is_some_and(|n| n.eq_ignore_ascii_case("title"))
    }

    /// Whether the style name marks a list paragraph.
    pub fn is_list_like(&self) -> bool {
        let lower = self
            .name
            .as_deref()
            .unwrap_or(self.id.as_str())
            .to_ascii_lowercase();
        lower.contains("list") || lower.contains("bullet")
    }
}

/// Parse "Heading 3" / "heading3" into 3. Accepts levels 1 through 9.
fn heading_level_from_name(name: &str) -> Option<u8> {
    let lower = name.to_ascii_lowercase();
    let rest = lower.strip_prefix("heading")?;
    let level: u8 = rest.trim().parse().ok()?;
    (1..=9).contains(&level).then_some(level)
}

/// Parsed style sheet.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    /// Run defaults (`docDefaults/rPrDefault`)
    pub default_run: RunProps,
    /// Paragraph defaults (`docDefaults/pPrDefault`)
    pub default_para: ParaProps,
    styles: BTreeMap<String, StyleDef>,
}

impl StyleSheet {
    /// Parse `styles.xml`.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        let mut sheet = StyleSheet::default();
        let mut path: Vec<Vec<u8>> = Vec::new();
        let mut current: Option<StyleDef> = None;

        loop {
            let event = reader.read_event().map_err(|e| {
                Error::UnreadableTemplate(format!(
                    "styles part: {}",
                    describe_error(e, reader.buffer_position())
                ))
            })?;
            match event {
                Event::Start(e) => {
                    sheet.handle_element(&e, &path, &mut current);
                    path.push(e.local_name().as_ref().to_vec());
                }
                Event::Empty(e) => {
                    sheet.handle_element(&e, &path, &mut current);
                    if e.local_name().as_ref() == b"style" {
                        if let Some(def) = current.take() {
                            sheet.insert(def);
                        }
                    }
                }
                Event::End(e) => {
                    path.pop();
                    if e.local_name().as_ref() == b"style" {
                        if let Some(def) = current.take() {
                            sheet.insert(def);
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        log::debug!("parsed {} style definitions", sheet.styles.len());
        Ok(sheet)
    }

    fn insert(&mut self, def: StyleDef) {
        // First definition wins, matching Word's behavior on duplicate ids
        self.styles.entry(def.id.clone()).or_insert(def);
    }

    fn handle_element(
        &mut self,
        e: &quick_xml::events::BytesStart<'_>,
        path: &[Vec<u8>],
        current: &mut Option<StyleDef>,
    ) {
        let name = e.local_name();
        let name = name.as_ref();
        let parent = path.last().map(Vec::as_slice);
        let in_conditional = path.iter().any(|p| p == b"tblStylePr");

        if name == b"style" {
            let kind = match attr(e, b"type").as_deref() {
                Some("character") => StyleKind::Character,
                Some("table") => StyleKind::Table,
                Some("numbering") => StyleKind::Numbering,
                _ => StyleKind::Paragraph,
            };
            let is_default = attr(e, b"default").is_some_and(|v| v == "1" || v == "true");
            *current = attr(e, b"styleId").map(|id| StyleDef::new(id, kind, is_default));
            return;
        }

        let in_defaults = path.iter().any(|p| p == b"docDefaults");
        let in_rpr = path.iter().any(|p| p == b"rPr");
        let in_ppr = path.iter().any(|p| p == b"pPr");

        if in_defaults {
            if in_rpr {
                self.default_run.apply(e);
            } else if in_ppr {
                self.default_para.apply(e);
            }
            return;
        }

        let Some(def) = current.as_mut() else {
            return;
        };
        if in_conditional {
            return;
        }
        match (parent, name) {
            (Some(b"style"), b"name") => def.name = val(e),
            (Some(b"style"), b"basedOn") => def.based_on = val(e),
            _ if in_rpr => def.run.apply(e),
            _ if in_ppr => def.para.apply(e),
            _ => {}
        }
    }

    /// Look up a style by id.
    pub fn get(&self, id: &str) -> Option<&StyleDef> {
        self.styles.get(id)
    }

    /// Iterate over all style definitions in id order.
    pub fn iter(&self) -> impl Iterator<Item = &StyleDef> {
        self.styles.values()
    }

    /// Number of style definitions.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Whether the sheet has no style definitions.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// The default paragraph style (usually `Normal`).
    pub fn default_paragraph_style(&self) -> Option<&StyleDef> {
        self.styles
            .values()
            .find(|s| s.kind == StyleKind::Paragraph && s.is_default)
            .or_else(|| self.styles.get("Normal"))
    }

    /// Id of the paragraph style Word would use for heading `level`.
    pub fn heading_style_id(&self, level: u8) -> Option<&str> {
        self.styles
            .values()
            .filter(|s| s.kind == StyleKind::Paragraph)
            .find(|s| s.heading_level_from_name() == Some(level))
            .or_else(|| {
                self.styles.values().find(|s| {
                    s.kind == StyleKind::Paragraph
                        && s.para.outline_level.map(|l| l + 1) == Some(level)
                })
            })
            .map(|s| s.id.as_str())
    }

    /// Style chain from `id` up to its root, cycle-guarded.
    fn chain(&self, id: &str) -> Vec<&StyleDef> {
        let mut chain = Vec::new();
        let mut seen = BTreeSet::new();
        let mut next = Some(id);
        while let Some(current) = next {
            if !seen.insert(current) || chain.len() >= MAX_CHAIN {
                log::warn!("cyclic or overlong basedOn chain at style '{}'", current);
                break;
            }
            match self.styles.get(current) {
                Some(def) => {
                    chain.push(def);
                    next = def.based_on.as_deref();
                }
                None => break,
            }
        }
        chain
    }

    /// Paragraph style id actually in effect for `style` (falls back to the default style).
    pub fn paragraph_style_id<'a>(&'a self, style: Option<&'a str>) -> Option<&'a str> {
        match style {
            Some(id) if self.styles.contains_key(id) => Some(id),
            _ => self.default_paragraph_style().map(|s| s.id.as_str()),
        }
    }

    /// Effective paragraph properties: direct over style chain over defaults.
    pub fn effective_para(&self, direct: &ParaProps) -> ParaProps {
        let mut props = self.default_para.clone();
        if let Some(id) = self.paragraph_style_id(direct.style.as_deref()) {
            for def in self.chain(id).into_iter().rev() {
                props = def.para.overlay(&props);
            }
        }
        direct.overlay(&props)
    }

    /// Effective run properties for a run inside a paragraph styled `para_style`.
    pub fn effective_run(&self, para_style: Option<&str>, direct: &RunProps) -> RunProps {
        let mut props = self.default_run.clone();
        if let Some(id) = self.paragraph_style_id(para_style) {
            for def in self.chain(id).into_iter().rev() {
                props = def.run.overlay(&props);
            }
        }
        if let Some(char_style) = direct.style.as_deref() {
            for def in self.chain(char_style).into_iter().rev() {
                props = def.run.overlay(&props);
            }
        }
        direct.overlay(&props)
    }

    /// Whether the effective style of a paragraph (walking `basedOn`) is list-like by name.
    pub fn is_list_style(&self, style: Option<&str>) -> bool {
        style.is_some_and(|id| self.chain(id).iter().any(|def| def.is_list_like()))
    }

    /// Heading level implied by a paragraph style's id or name.
    pub fn heading_level_of(&self, style: Option<&str>) -> Option<u8> {
        style
            .and_then(|id| self.styles.get(id))
            .and_then(StyleDef::heading_level_from_name)
    }

    /// Whether a paragraph style is a title style.
    pub fn is_title_style(&self, style: Option<&str>) -> bool {
        style
            .and_then(|id| self.styles.get(id))
            .is_some_and(StyleDef::is_title)
    }
}
