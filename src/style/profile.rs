//! The style profile: what a template looks like, reduced to rules.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::model::MAX_HEADING_LEVEL;

/// Font sizes Word offers, in half-points (8pt to 72pt).
pub const SIZE_LADDER: [u32; 17] = [
    16, 18, 20, 21, 22, 24, 28, 32, 36, 40, 44, 48, 52, 56, 72, 96, 144,
];

/// Body font used when a template declares none.
pub const DEFAULT_BODY_FAMILY: &str = "Calibri";

/// Body size used when a template declares none (11pt).
pub const DEFAULT_BODY_SIZE: u32 = 22;

/// Concrete font attributes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FontSpec {
    /// Family name
    pub family: String,
    /// Size in half-points
    pub size: u32,
    /// Bold weight
    pub bold: bool,
    /// Italic
    pub italic: bool,
}

impl FontSpec {
    /// Regular-weight font of `size` half-points.
    pub fn new(family: impl Into<String>, size: u32) -> Self {
        Self {
            family: family.into(),
            size,
            bold: false,
            italic: false,
        }
    }

    /// Set the bold flag.
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Set the italic flag.
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Size in points.
    pub fn points(&self) -> f32 {
        self.size as f32 / 2.0
    }

    /// Same font moved `steps` sizes along the ladder (negative is smaller).
    pub fn scaled(&self, steps: i32) -> FontSpec {
        let mut size = self.size;
        for _ in 0..steps.unsigned_abs() {
            size = if steps < 0 {
                step_down(size)
            } else {
                step_up(size)
            };
        }
        FontSpec {
            size,
            ..self.clone()
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new(DEFAULT_BODY_FAMILY, DEFAULT_BODY_SIZE)
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}pt", self.family, self.points())?;
        if self.bold {
            write!(f, " bold")?;
        }
        if self.italic {
            write!(f, " italic")?;
        }
        Ok(())
    }
}

/// Largest ladder size strictly smaller than `size`, never below 8pt.
pub fn step_down(size: u32) -> u32 {
    SIZE_LADDER
        .iter()
        .rev()
        .copied()
        .find(|s| *s < size)
        .unwrap_or(SIZE_LADDER[0])
}

/// Smallest ladder size strictly larger than `size`, never above 72pt.
pub fn step_up(size: u32) -> u32 {
    SIZE_LADDER
        .iter()
        .copied()
        .find(|s| *s > size)
        .unwrap_or(SIZE_LADDER[SIZE_LADDER.len() - 1])
}

/// Role a font plays in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FontRole {
    Body,
    Title,
    Heading(u8),
    Emphasis,
}

impl fmt::Display for FontRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontRole::Body => write!(f, "body"),
            FontRole::Title => write!(f, "title"),
            FontRole::Heading(level) => write!(f, "heading{}", level),
            FontRole::Emphasis => write!(f, "emphasis"),
        }
    }
}

impl Serialize for FontRole {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Line spacing rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineRule {
    /// `line` is in 240ths of a line
    #[default]
    Auto,
    /// `line` is an exact height in twips
    Exact,
    /// `line` is a minimum height in twips
    AtLeast,
}

impl LineRule {
    /// Parse a `w:lineRule` value; unknown values read as `auto`.
    pub fn from_attr(value: Option<&str>) -> Self {
        match value {
            Some("exact") => LineRule::Exact,
            Some("atLeast") => LineRule::AtLeast,
            _ => LineRule::Auto,
        }
    }

    /// The `w:lineRule` attribute value.
    pub fn as_attr(&self) -> &'static str {
        match self {
            LineRule::Auto => "auto",
            LineRule::Exact => "exact",
            LineRule::AtLeast => "atLeast",
        }
    }
}

/// Paragraph spacing in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ParagraphSpacing {
    pub before: u32,
    pub after: u32,
    pub line: u32,
    pub line_rule: LineRule,
}

impl ParagraphSpacing {
    /// Single line spacing with no space around the paragraph.
    pub const SINGLE: ParagraphSpacing = ParagraphSpacing {
        before: 0,
        after: 0,
        line: 240,
        line_rule: LineRule::Auto,
    };
}

impl Default for ParagraphSpacing {
    /// Word's built-in body spacing: 8pt after, 1.08 lines.
    fn default() -> Self {
        Self {
            before: 0,
            after: 160,
            line: 259,
            line_rule: LineRule::Auto,
        }
    }
}

/// How a rule came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleSource {
    /// Majority vote over `count` template paragraphs
    Observed { count: usize },
    /// Derived from another heading level along the size ladder
    Scaled { from_level: u8, steps: i32 },
    /// No template evidence; built-in default
    Default,
}

impl RuleSource {
    /// Whether the template itself showed this rule.
    pub fn is_observed(&self) -> bool {
        matches!(self, RuleSource::Observed { .. })
    }
}

impl fmt::Display for RuleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSource::Observed { count } => write!(f, "observed x{}", count),
            RuleSource::Scaled { from_level, steps } => {
                write!(f, "scaled {:+} from heading{}", steps, from_level)
            }
            RuleSource::Default => write!(f, "default"),
        }
    }
}

/// Style rule for one heading level. Level 0 is the document title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingRule {
    pub level: u8,
    pub font: FontSpec,
    /// Paragraph style id to reference, when the template defines one
    pub style_id: Option<String>,
    pub spacing: ParagraphSpacing,
    pub source: RuleSource,
}

/// List marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Marker {
    /// Glyph typed into the paragraph text, followed by a tab
    Literal { glyph: String },
    /// Word numbering definition `num_id`; `glyph` is what it draws
    Numbering { num_id: u32, glyph: String },
}

impl Marker {
    /// Glyph a reader sees.
    pub fn glyph(&self) -> &str {
        match self {
            Marker::Literal { glyph } | Marker::Numbering { glyph, .. } => glyph,
        }
    }
}

/// Default bullet glyph.
pub const DEFAULT_BULLET_GLYPH: &str = "-";

/// Default bullet indent, 0.25 inch.
pub const DEFAULT_BULLET_INDENT: u32 = 360;

/// Style rule for list paragraphs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulletRule {
    pub marker: Marker,
    /// Left indent of a top-level item, in twips
    pub indent: u32,
    /// Hanging indent, in twips
    pub hanging: u32,
    pub spacing: ParagraphSpacing,
    pub style_id: Option<String>,
    /// Item font when it differs from the body font
    pub font: Option<FontSpec>,
    pub source: RuleSource,
}

impl Default for BulletRule {
    fn default() -> Self {
        Self {
            marker: Marker::Literal {
                glyph: DEFAULT_BULLET_GLYPH.to_string(),
            },
            indent: DEFAULT_BULLET_INDENT,
            hanging: DEFAULT_BULLET_INDENT,
            spacing: ParagraphSpacing::default(),
            style_id: None,
            font: None,
            source: RuleSource::Default,
        }
    }
}

/// Counts of what the fingerprinter saw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProfileStats {
    /// Paragraphs with text
    pub paragraphs: usize,
    pub headings: usize,
    pub list_items: usize,
    pub body: usize,
    /// Headings found by inference rather than outline levels
    pub inferred_headings: usize,
}

/// Style fingerprint of one template.
///
/// Built once by the fingerprinter and read-only afterwards. All maps are
/// ordered so two profiles of the same template compare and serialize
/// identically.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleProfile {
    fonts: BTreeMap<FontRole, FontSpec>,
    heading_rules: BTreeMap<u8, HeadingRule>,
    title: Option<HeadingRule>,
    bullet_rule: BulletRule,
    paragraph_spacing: ParagraphSpacing,
    body_style_id: Option<String>,
    stats: ProfileStats,
}

/// Everything the fingerprinter measured, before fallbacks are applied.
#[derive(Debug, Clone, Default)]
pub(crate) struct ProfileParts {
    pub body_font: FontSpec,
    pub emphasis_font: Option<FontSpec>,
    pub title: Option<HeadingRule>,
    /// Observed heading rules only
    pub heading_rules: BTreeMap<u8, HeadingRule>,
    /// Heading style ids the styles part defines, by level
    pub heading_style_ids: BTreeMap<u8, String>,
    pub bullet_rule: BulletRule,
    pub paragraph_spacing: ParagraphSpacing,
    pub body_style_id: Option<String>,
    pub stats: ProfileStats,
}

impl StyleProfile {
    /// Assemble a profile, filling every heading level 1..=9.
    pub(crate) fn from_parts(parts: ProfileParts) -> Self {
        let heading_rules = complete_heading_rules(
            parts.heading_rules,
            &parts.body_font,
            &parts.heading_style_ids,
            parts.paragraph_spacing,
        );

        let mut fonts = BTreeMap::new();
        fonts.insert(FontRole::Body, parts.body_font);
        if let Some(font) = parts.emphasis_font {
            fonts.insert(FontRole::Emphasis, font);
        }
        if let Some(title) = &parts.title {
            fonts.insert(FontRole::Title, title.font.clone());
        }
        for (level, rule) in &heading_rules {
            fonts.insert(FontRole::Heading(*level), rule.font.clone());
        }

        Self {
            fonts,
            heading_rules,
            title: parts.title,
            bullet_rule: parts.bullet_rule,
            paragraph_spacing: parts.paragraph_spacing,
            body_style_id: parts.body_style_id,
            stats: parts.stats,
        }
    }

    /// Font for a role.
    pub fn font(&self, role: FontRole) -> Option<&FontSpec> {
        self.fonts.get(&role)
    }

    /// All fonts by role.
    pub fn fonts(&self) -> &BTreeMap<FontRole, FontSpec> {
        &self.fonts
    }

    /// Body font.
    pub fn body_font(&self) -> &FontSpec {
        // Inserted unconditionally by from_parts
        &self.fonts[&FontRole::Body]
    }

    /// Emphasis font, when the template has a contact block.
    pub fn emphasis_font(&self) -> Option<&FontSpec> {
        self.fonts.get(&FontRole::Emphasis)
    }

    /// Rule for a heading level; levels outside 1..=9 clamp into range.
    pub fn heading_rule(&self, level: u8) -> &HeadingRule {
        let level = level.clamp(1, MAX_HEADING_LEVEL);
        // Every level 1..=9 is filled by from_parts
        &self.heading_rules[&level]
    }

    /// Heading rules in level order.
    pub fn heading_rules(&self) -> impl Iterator<Item = &HeadingRule> {
        self.heading_rules.values()
    }

    /// Title rule, when the template has a title paragraph.
    pub fn title(&self) -> Option<&HeadingRule> {
        self.title.as_ref()
    }

    /// List rule.
    pub fn bullet_rule(&self) -> &BulletRule {
        &self.bullet_rule
    }

    /// Body paragraph spacing.
    pub fn paragraph_spacing(&self) -> ParagraphSpacing {
        self.paragraph_spacing
    }

    /// Paragraph style id of body paragraphs.
    pub fn body_style_id(&self) -> Option<&str> {
        self.body_style_id.as_deref()
    }

    /// What the fingerprinter observed.
    pub fn stats(&self) -> &ProfileStats {
        &self.stats
    }

    /// Deepest heading level the template itself showed.
    pub fn deepest_observed_level(&self) -> Option<u8> {
        self.heading_rules
            .values()
            .filter(|r| r.source.is_observed())
            .map(|r| r.level)
            .max()
    }
}

impl Default for StyleProfile {
    /// Profile of a template with no usable styling.
    fn default() -> Self {
        Self::from_parts(ProfileParts::default())
    }
}

/// Fill heading levels 1..=9 from observed ones.
///
/// A missing level scales down from the deepest observed shallower level,
/// or up from the shallowest observed deeper level. With nothing observed,
/// level 1 is the body family two sizes up in bold.
fn complete_heading_rules(
    observed: BTreeMap<u8, HeadingRule>,
    body: &FontSpec,
    style_ids: &BTreeMap<u8, String>,
    spacing: ParagraphSpacing,
) -> BTreeMap<u8, HeadingRule> {
    let mut rules = BTreeMap::new();

    for level in 1..=MAX_HEADING_LEVEL {
        if let Some(rule) = observed.get(&level) {
            rules.insert(level, rule.clone());
            continue;
        }

        let shallower = observed.range(..level).next_back().map(|(_, r)| r);
        let deeper = observed.range(level + 1..).next().map(|(_, r)| r);

        let rule = match (shallower, deeper) {
            (Some(from), _) | (None, Some(from)) => {
                let steps = i32::from(from.level) - i32::from(level);
                HeadingRule {
                    level,
                    font: from.font.scaled(steps),
                    style_id: style_ids.get(&level).cloned(),
                    spacing: from.spacing,
                    source: RuleSource::Scaled {
                        from_level: from.level,
                        steps,
                    },
                }
            }
            (None, None) => {
                let font = FontSpec::new(body.family.clone(), body.size).with_bold(true);
                let steps = 3 - i32::from(level);
                HeadingRule {
                    level,
                    font: font.scaled(steps),
                    style_id: style_ids.get(&level).cloned(),
                    spacing,
                    source: if level == 1 {
                        RuleSource::Default
                    } else {
                        RuleSource::Scaled {
                            from_level: 1,
                            steps: 1 - i32::from(level),
                        }
                    },
                }
            }
        };
        log::debug!("heading{} derived: {} ({})", level, rule.font, rule.source);
        rules.insert(level, rule);
    }

    rules
}
