//! Run and paragraph properties as read from `rPr` / `pPr` elements.
//!
//! Every field is optional so that property sets can be layered:
//! direct formatting over the style chain over document defaults.

use super::xml::{attr, attr_u32, toggle, val};
use quick_xml::events::BytesStart;

/// Theme font slot referenced by `asciiTheme` / `hAnsiTheme`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ThemeFont {
    /// Heading font (`majorFont`).
    Major,
    /// Body font (`minorFont`).
    Minor,
}

/// Font reference of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontRef {
    /// Explicit typeface name.
    Named(String),
    /// Typeface taken from the document theme.
    Theme(ThemeFont),
}

/// Character formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunProps {
    /// Character style (`rStyle`)
    pub style: Option<String>,
    /// Font reference (`rFonts`)
    pub font: Option<FontRef>,
    /// Font size in half-points (`sz`)
    pub size: Option<u32>,
    /// Bold toggle (`b`)
    pub bold: Option<bool>,
    /// Italic toggle (`i`)
    pub italic: Option<bool>,
    /// All-caps toggle (`caps`)
    pub caps: Option<bool>,
}

impl RunProps {
    /// Layer `self` over `base`: fields set on `self` win.
    pub fn overlay(&self, base: &RunProps) -> RunProps {
        RunProps {
            style: self.style.clone().or_else(|| base.style.clone()),
            font: self.font.clone().or_else(|| base.font.clone()),
            size: self.size.or(base.size),
            bold: self.bold.or(base.bold),
            italic: self.italic.or(base.italic),
            caps: self.caps.or(base.caps),
        }
    }

    /// Apply one child element of `rPr`.
    pub fn apply(&mut self, e: &BytesStart<'_>) {
        match e.local_name().as_ref() {
            b"rStyle" => self.style = val(e),
            b"rFonts" => {
                let theme = attr(e, b"asciiTheme").or_else(|| attr(e, b"hAnsiTheme"));
                if let Some(theme) = theme {
                    let slot = if theme.starts_with("major") {
                        ThemeFont::Major
                    } else {
                        ThemeFont::Minor
                    };
                    self.font = Some(FontRef::Theme(slot));
                } else if let Some(name) = attr(e, b"ascii").or_else(|| attr(e, b"hAnsi")) {
                    self.font = Some(FontRef::Named(name));
                }
            }
            b"sz" => {
                if let Some(size) = attr_u32(e, b"val") {
                    self.size = Some(size);
                }
            }
            b"b" => self.bold = Some(toggle(e)),
            b"i" => self.italic = Some(toggle(e)),
            b"caps" => self.caps = Some(toggle(e)),
            _ => {}
        }
    }
}

/// Numbering reference (`numPr`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NumProps {
    /// `numId`; zero switches numbering off.
    pub num_id: Option<u32>,
    /// List level (`ilvl`)
    pub ilvl: Option<u8>,
}

/// Paragraph formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParaProps {
    /// Paragraph style (`pStyle`)
    pub style: Option<String>,
    /// Space before in twips
    pub space_before: Option<u32>,
    /// Space after in twips
    pub space_after: Option<u32>,
    /// Line spacing (240ths of a line for `auto`, twips otherwise)
    pub line: Option<u32>,
    /// `auto`, `exact` or `atLeast`
    pub line_rule: Option<String>,
    /// Left indent in twips
    pub ind_left: Option<u32>,
    /// Hanging indent in twips
    pub ind_hanging: Option<u32>,
    /// Outline level, zero-based
    pub outline_level: Option<u8>,
    /// Numbering reference
    pub num: NumProps,
    /// Keep with next paragraph
    pub keep_next: Option<bool>,
}

impl ParaProps {
    /// Layer `self` over `base`: fields set on `self` win.
    pub fn overlay(&self, base: &ParaProps) -> ParaProps {
        ParaProps {
            style: self.style.clone().or_else(|| base.style.clone()),
            space_before: self.space_before.or(base.space_before),
            space_after: self.space_after.or(base.space_after),
            line: self.line.or(base.line),
            line_rule: self.line_rule.clone().or_else(|| base.line_rule.clone()),
            ind_left: self.ind_left.or(base.ind_left),
            ind_hanging: self.ind_hanging.or(base.ind_hanging),
            outline_level: self.outline_level.or(base.outline_level),
            num: NumProps {
                num_id: self.num.num_id.or(base.num.num_id),
                ilvl: self.num.ilvl.or(base.num.ilvl),
            },
            keep_next: self.keep_next.or(base.keep_next),
        }
    }

    /// Effective numbering id, if numbering is active.
    pub fn active_num_id(&self) -> Option<u32> {
        self.num.num_id.filter(|id| *id != 0)
    }

    /// Apply one child (or `numPr` grandchild) of `pPr`.
    pub fn apply(&mut self, e: &BytesStart<'_>) {
        match e.local_name().as_ref() {
            b"pStyle" => self.style = val(e),
            b"spacing" => {
                if let Some(v) = attr_u32(e, b"before") {
                    self.space_before = Some(v);
                }
                if let Some(v) = attr_u32(e, b"after") {
                    self.space_after = Some(v);
                }
                if let Some(v) = attr_u32(e, b"line") {
                    self.line = Some(v);
                }
                if let Some(v) = attr(e, b"lineRule") {
                    self.line_rule = Some(v);
                }
            }
            b"ind" => {
                if let Some(v) = attr_u32(e, b"left").or_else(|| attr_u32(e, b"start")) {
                    self.ind_left = Some(v);
                }
                if let Some(v) = attr_u32(e, b"hanging") {
                    self.ind_hanging = Some(v);
                }
            }
            b"outlineLvl" => {
                // Level 9 means "body text"
                self.outline_level = attr_u32(e, b"val")
                    .filter(|lvl| *lvl < 9)
                    .map(|lvl| lvl as u8);
            }
            b"numId" => self.num.num_id = attr_u32(e, b"val"),
            b"ilvl" => self.num.ilvl = attr_u32(e, b"val").map(|l| l.min(8) as u8),
            b"keepNext" => self.keep_next = Some(toggle(e)),
            _ => {}
        }
    }
}
