//! Block-to-style resolution.
//!
//! Resolution is a pure function of a profile, a block and optional
//! overrides. Every block kind has an arm; there is no failure path.

use super::overrides::{FontDirective, StyleOverrides};
use super::profile::{FontSpec, Marker, ParagraphSpacing, StyleProfile};
use crate::model::{Block, MAX_HEADING_LEVEL};

/// What a resolved paragraph is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleRole {
    Title,
    Heading(u8),
    Bullet,
    Paragraph,
    ContactLine,
}

/// List marker of a resolved paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedMarker {
    None,
    /// Word numbering `num_id` at level `ilvl`
    Numbering { num_id: u32, ilvl: u8 },
    /// Glyph written into the text, followed by a tab
    Literal(String),
}

/// Paragraph indentation in twips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Indent {
    pub left: u32,
    pub hanging: u32,
}

/// Concrete formatting for one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStyle {
    pub role: StyleRole,
    /// Paragraph style to reference
    pub style_id: Option<String>,
    pub font: FontSpec,
    pub spacing: ParagraphSpacing,
    pub indent: Indent,
    pub marker: ResolvedMarker,
    pub keep_with_next: bool,
    /// Zero-based outline level for headings
    pub outline_level: Option<u8>,
}

/// Resolve a block against a profile.
pub fn resolve(profile: &StyleProfile, block: &Block) -> ResolvedStyle {
    StyleResolver::new(profile).resolve(block)
}

/// Resolve a block against a profile with overrides.
pub fn resolve_with(
    profile: &StyleProfile,
    block: &Block,
    overrides: &StyleOverrides,
) -> ResolvedStyle {
    StyleResolver::new(profile)
        .with_overrides(overrides)
        .resolve(block)
}

/// Maps blocks onto a profile's rules.
#[derive(Debug, Clone)]
pub struct StyleResolver<'a> {
    profile: &'a StyleProfile,
    body_font: Option<FontDirective>,
    heading_font: Option<FontDirective>,
    bullet: Option<String>,
    body_size: Option<u32>,
}

impl<'a> StyleResolver<'a> {
    /// Create a resolver without overrides.
    pub fn new(profile: &'a StyleProfile) -> Self {
        Self {
            profile,
            body_font: None,
            heading_font: None,
            bullet: None,
            body_size: None,
        }
    }

    /// Apply overrides.
    pub fn with_overrides(mut self, overrides: &StyleOverrides) -> Self {
        self.body_font = overrides.body_font();
        self.heading_font = overrides.heading_font();
        self.bullet = overrides.bullet().map(str::to_string);
        self.body_size = overrides.body_size();
        self
    }

    /// The profile being resolved against.
    pub fn profile(&self) -> &StyleProfile {
        self.profile
    }

    /// Resolve one block.
    pub fn resolve(&self, block: &Block) -> ResolvedStyle {
        let resolved = match block {
            Block::Heading { level, .. } => self.heading(*level),
            Block::Bullet { indent_level, .. } => self.bullet(*indent_level),
            Block::Paragraph { .. } => self.paragraph(),
            Block::ContactLine { .. } => self.contact_line(),
        };
        log::debug!(
            "{} -> {:?} {} style={:?}",
            block.kind(),
            resolved.role,
            resolved.font,
            resolved.style_id
        );
        resolved
    }

    fn heading(&self, level: u8) -> ResolvedStyle {
        let title = if level == 0 { self.profile.title() } else { None };
        let (role, rule) = match title {
            Some(rule) => (StyleRole::Title, rule),
            None => {
                let level = level.clamp(1, MAX_HEADING_LEVEL);
                (StyleRole::Heading(level), self.profile.heading_rule(level))
            }
        };

        let mut font = rule.font.clone();
        if let Some(directive) = &self.heading_font {
            apply_directive(&mut font, directive);
        }

        ResolvedStyle {
            role,
            style_id: rule.style_id.clone(),
            font,
            spacing: rule.spacing,
            indent: Indent::default(),
            marker: ResolvedMarker::None,
            keep_with_next: true,
            outline_level: match role {
                StyleRole::Heading(level) => Some(level - 1),
                _ => None,
            },
        }
    }

    fn bullet(&self, indent_level: u8) -> ResolvedStyle {
        let rule = self.profile.bullet_rule();
        let depth = u32::from(indent_level) + 1;

        let marker = match (&self.bullet, &rule.marker) {
            (Some(glyph), _) => ResolvedMarker::Literal(glyph.clone()),
            (None, Marker::Numbering { num_id, .. }) => ResolvedMarker::Numbering {
                num_id: *num_id,
                ilvl: indent_level.min(8),
            },
            (None, Marker::Literal { glyph }) => ResolvedMarker::Literal(glyph.clone()),
        };

        let base = rule.font.as_ref().unwrap_or(self.profile.body_font());
        ResolvedStyle {
            role: StyleRole::Bullet,
            style_id: rule.style_id.clone(),
            font: self.body_class_font(base),
            spacing: rule.spacing,
            indent: Indent {
                left: rule.indent.saturating_mul(depth),
                hanging: rule.hanging,
            },
            marker,
            keep_with_next: false,
            outline_level: None,
        }
    }

    fn paragraph(&self) -> ResolvedStyle {
        ResolvedStyle {
            role: StyleRole::Paragraph,
            style_id: self.profile.body_style_id().map(str::to_string),
            font: self.body_class_font(self.profile.body_font()),
            spacing: self.profile.paragraph_spacing(),
            indent: Indent::default(),
            marker: ResolvedMarker::None,
            keep_with_next: false,
            outline_level: None,
        }
    }

    fn contact_line(&self) -> ResolvedStyle {
        let base = self
            .profile
            .emphasis_font()
            .unwrap_or(self.profile.body_font());
        ResolvedStyle {
            role: StyleRole::ContactLine,
            style_id: self.profile.body_style_id().map(str::to_string),
            font: self.body_class_font(base),
            spacing: ParagraphSpacing::SINGLE,
            indent: Indent::default(),
            marker: ResolvedMarker::None,
            keep_with_next: false,
            outline_level: None,
        }
    }

    /// Font for non-heading text with `font` / `size` overrides applied.
    fn body_class_font(&self, base: &FontSpec) -> FontSpec {
        let mut font = base.clone();
        if let Some(directive) = &self.body_font {
            apply_directive(&mut font, directive);
        }
        if let Some(size) = self.body_size {
            font.size = size;
        }
        font
    }
}

fn apply_directive(font: &mut FontSpec, directive: &FontDirective) {
    font.family = directive.family.clone();
    if let Some(bold) = directive.bold {
        font.bold = bold;
    }
    if let Some(italic) = directive.italic {
        font.italic = italic;
    }
}
