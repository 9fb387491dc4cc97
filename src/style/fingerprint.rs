//! Style fingerprinting: classify template paragraphs and vote on rules.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::profile::{
    BulletRule, FontSpec, HeadingRule, LineRule, Marker, ParagraphSpacing, ProfileParts,
    ProfileStats, RuleSource, StyleProfile, DEFAULT_BULLET_GLYPH, DEFAULT_BULLET_INDENT,
};
use super::tally::Tally;
use crate::docx::{Numbering, ParaProps, RunProps, StyleSheet, TemplateParagraph, ThemeFonts};
use crate::model::MAX_HEADING_LEVEL;

/// Paragraphs at least this long are never inferred to be headings.
const MAX_INFERRED_HEADING_CHARS: usize = 50;

fn section_keywords() -> &'static Regex {
    static KEYWORDS: OnceLock<Regex> = OnceLock::new();
    KEYWORDS.get_or_init(|| {
        Regex::new(
            r"(?i)\b(experience|employment|education|skills|competencies|summary|profile|objective|projects|certifications?|qualifications|achievements|awards|publications|languages|interests|training|volunteering|references)\b",
        )
        .unwrap()
    })
}

/// Options for fingerprinting.
#[derive(Debug, Clone)]
pub struct FingerprintOptions {
    /// Infer level-1 headings from bold or upper-case section titles when the
    /// template has no outline levels
    pub infer_headings: bool,

    /// Body font used when the template declares none
    pub default_font: FontSpec,

    /// Glyphs recognized as typed list markers
    pub bullet_glyphs: Vec<char>,

    /// Marker used when the template has no lists
    pub default_bullet: String,

    /// Indent used when the template has no lists, in twips
    pub default_indent: u32,
}

impl Default for FingerprintOptions {
    fn default() -> Self {
        Self {
            infer_headings: true,
            default_font: FontSpec::default(),
            bullet_glyphs: vec!['•', '-', '–', '➢', '▪', '◦', '*', 'o'],
            default_bullet: DEFAULT_BULLET_GLYPH.to_string(),
            default_indent: DEFAULT_BULLET_INDENT,
        }
    }
}

impl FingerprintOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable heading inference.
    pub fn with_infer_headings(mut self, infer: bool) -> Self {
        self.infer_headings = infer;
        self
    }

    /// Set the fallback body font.
    pub fn with_default_font(mut self, font: FontSpec) -> Self {
        self.default_font = font;
        self
    }

    /// Set the fallback bullet marker.
    pub fn with_default_bullet(mut self, glyph: impl Into<String>, indent: u32) -> Self {
        self.default_bullet = glyph.into();
        self.default_indent = indent;
        self
    }
}

/// Structural role of a template paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "role", content = "level", rename_all = "snake_case")]
pub enum ParagraphRole {
    Title,
    Heading(u8),
    ListItem,
    Body,
}

/// A classified template paragraph with its effective formatting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParagraphInfo {
    /// Position among the template's paragraphs
    pub index: usize,
    pub text: String,
    pub role: ParagraphRole,
    /// Heading found by inference rather than outline level
    pub inferred: bool,
    /// Effective paragraph style id
    pub style_id: Option<String>,
    /// Font of the first text run; bold/italic only when every run is
    pub font: FontSpec,
    pub spacing: ParagraphSpacing,
    pub indent_left: u32,
    pub hanging: u32,
    /// List marker, for list items
    pub marker: Option<Marker>,
    /// Numbering level, for numbered list items
    pub list_level: u8,
}

impl ParagraphInfo {
    fn is_heading(&self) -> bool {
        matches!(self.role, ParagraphRole::Heading(_))
    }

    fn looks_upper_case(&self) -> bool {
        self.text.chars().any(char::is_alphabetic) && !self.text.chars().any(char::is_lowercase)
    }
}

/// Extracts a [`StyleProfile`] from a template's paragraphs.
pub struct StyleFingerprinter<'a> {
    styles: &'a StyleSheet,
    numbering: &'a Numbering,
    theme: &'a ThemeFonts,
    options: FingerprintOptions,
}

impl<'a> StyleFingerprinter<'a> {
    /// Create a fingerprinter over a template's parsed parts.
    pub fn new(styles: &'a StyleSheet, numbering: &'a Numbering, theme: &'a ThemeFonts) -> Self {
        Self {
            styles,
            numbering,
            theme,
            options: FingerprintOptions::default(),
        }
    }

    /// Set options.
    pub fn with_options(mut self, options: FingerprintOptions) -> Self {
        self.options = options;
        self
    }

    /// Classify paragraphs and profile them in one go.
    pub fn fingerprint(&self, paragraphs: &[TemplateParagraph]) -> StyleProfile {
        self.profile(&self.describe(paragraphs))
    }

    /// Classify every paragraph that has text.
    pub fn describe(&self, paragraphs: &[TemplateParagraph]) -> Vec<ParagraphInfo> {
        let mut infos: Vec<ParagraphInfo> = paragraphs
            .iter()
            .filter(|p| p.has_text())
            .map(|p| self.classify(p))
            .collect();

        if self.options.infer_headings && !infos.iter().any(ParagraphInfo::is_heading) {
            self.infer_headings(&mut infos);
        }

        for info in &infos {
            log::debug!(
                "paragraph {}: {:?} {} '{}'",
                info.index,
                info.role,
                info.font,
                info.text.chars().take(40).collect::<String>()
            );
        }
        infos
    }

    fn classify(&self, paragraph: &TemplateParagraph) -> ParagraphInfo {
        let effective = self.styles.effective_para(&paragraph.props);
        let style_id = self
            .styles
            .paragraph_style_id(paragraph.props.style.as_deref())
            .map(str::to_string);
        let font = self.paragraph_font(paragraph);
        let text = paragraph.text.trim().to_string();

        let mut info = ParagraphInfo {
            index: paragraph.index,
            text,
            role: ParagraphRole::Body,
            inferred: false,
            style_id,
            font,
            spacing: spacing_of(&effective, ParagraphSpacing::SINGLE),
            indent_left: effective.ind_left.unwrap_or(0),
            hanging: effective.ind_hanging.unwrap_or(0),
            marker: None,
            list_level: 0,
        };

        let style = info.style_id.as_deref();
        if let Some(outline) = effective.outline_level {
            info.role = ParagraphRole::Heading((outline + 1).min(MAX_HEADING_LEVEL));
        } else if let Some(level) = self.styles.heading_level_of(style) {
            info.role = ParagraphRole::Heading(level);
        } else if self.styles.is_title_style(style) {
            info.role = ParagraphRole::Title;
        } else if let Some(num_id) = effective.active_num_id() {
            info.role = ParagraphRole::ListItem;
            let ilvl = effective.num.ilvl.unwrap_or(0);
            info.list_level = ilvl;
            if let Some(level) = self.numbering.level(num_id, ilvl) {
                info.marker = Some(Marker::Numbering {
                    num_id,
                    glyph: level.marker(),
                });
                // Direct or style indents beat the numbering level's own
                info.indent_left = effective.ind_left.or(level.ind_left).unwrap_or(0);
                info.hanging = effective.ind_hanging.or(level.ind_hanging).unwrap_or(0);
            }
        } else if let Some(glyph) = self.literal_marker(&info.text) {
            info.role = ParagraphRole::ListItem;
            info.marker = Some(Marker::Literal {
                glyph: glyph.to_string(),
            });
        } else if self.styles.is_list_style(style) {
            info.role = ParagraphRole::ListItem;
        }

        info
    }

    /// Font of the first text run, with bold/italic set only when all runs agree.
    fn paragraph_font(&self, paragraph: &TemplateParagraph) -> FontSpec {
        let style = paragraph.props.style.as_deref();
        let runs: Vec<RunProps> = if paragraph.runs.is_empty() {
            vec![self.styles.effective_run(style, &paragraph.mark)]
        } else {
            paragraph
                .runs
                .iter()
                .map(|run| self.styles.effective_run(style, run))
                .collect()
        };

        let first = &runs[0];
        let family = first
            .font
            .as_ref()
            .and_then(|f| self.theme.family(f))
            .unwrap_or_else(|| self.options.default_font.family.clone());
        FontSpec {
            family,
            size: first.size.unwrap_or(self.options.default_font.size),
            bold: runs.iter().all(|r| r.bold.unwrap_or(false)),
            italic: runs.iter().all(|r| r.italic.unwrap_or(false)),
        }
    }

    fn literal_marker<'t>(&self, text: &'t str) -> Option<&'t str> {
        let mut chars = text.char_indices();
        let (_, first) = chars.next()?;
        let (split, next) = chars.next()?;
        (self.options.bullet_glyphs.contains(&first) && next.is_whitespace())
            .then(|| &text[..split])
    }

    /// Promote short bold or upper-case section titles to level-1 headings.
    fn infer_headings(&self, infos: &mut [ParagraphInfo]) {
        let keywords = section_keywords();
        for (position, info) in infos.iter_mut().enumerate() {
            // The first paragraph is a name or title, never a section
            if position == 0 || info.role != ParagraphRole::Body {
                continue;
            }
            let short = info.text.chars().count() < MAX_INFERRED_HEADING_CHARS;
            let emphasized = info.font.bold || info.looks_upper_case();
            if short && emphasized && keywords.is_match(&info.text) {
                info.role = ParagraphRole::Heading(1);
                info.inferred = true;
            }
        }
    }

    /// Vote on rules over classified paragraphs.
    pub fn profile(&self, infos: &[ParagraphInfo]) -> StyleProfile {
        let first_heading = infos
            .iter()
            .position(ParagraphInfo::is_heading)
            .unwrap_or(infos.len());

        let title_index = self.find_title(infos, first_heading);

        let mut stats = ProfileStats {
            paragraphs: infos.len(),
            ..Default::default()
        };
        let mut heading_fonts: BTreeMap<u8, Tally<(FontSpec, Option<String>)>> = BTreeMap::new();
        let mut heading_spacing: BTreeMap<u8, Tally<ParagraphSpacing>> = BTreeMap::new();
        let mut body_fonts = Tally::new();
        let mut body_spacing = Tally::new();
        let mut body_styles = Tally::new();
        let mut emphasis_fonts = Tally::new();

        for (position, info) in infos.iter().enumerate() {
            if Some(position) == title_index {
                continue;
            }
            match info.role {
                ParagraphRole::Heading(level) => {
                    stats.headings += 1;
                    if info.inferred {
                        stats.inferred_headings += 1;
                    }
                    heading_fonts
                        .entry(level)
                        .or_default()
                        .add((info.font.clone(), info.style_id.clone()));
                    heading_spacing.entry(level).or_default().add(info.spacing);
                }
                ParagraphRole::ListItem => stats.list_items += 1,
                // Title-styled paragraphs past the first count as body
                ParagraphRole::Title | ParagraphRole::Body => {
                    stats.body += 1;
                    body_fonts.add(info.font.clone());
                    body_spacing.add(info.spacing);
                    body_styles.add(info.style_id.clone());
                    if position < first_heading {
                        emphasis_fonts.add(info.font.clone());
                    }
                }
            }
        }

        let body_font = body_fonts
            .winner()
            .map(|(font, _)| font.clone())
            .unwrap_or_else(|| self.fallback_body_font());
        let paragraph_spacing = body_spacing
            .winner()
            .map(|(spacing, _)| *spacing)
            .unwrap_or_else(|| self.fallback_spacing());
        let body_style_id = body_styles
            .winner()
            .and_then(|(id, _)| id.clone())
            .or_else(|| {
                self.styles
                    .default_paragraph_style()
                    .map(|s| s.id.clone())
            });

        let mut heading_rules = BTreeMap::new();
        for (level, tally) in &heading_fonts {
            if let Some(((font, style_id), count)) = tally.winner() {
                let spacing = heading_spacing
                    .get(level)
                    .and_then(|t| t.winner())
                    .map(|(s, _)| *s)
                    .unwrap_or(paragraph_spacing);
                heading_rules.insert(
                    *level,
                    HeadingRule {
                        level: *level,
                        font: font.clone(),
                        style_id: style_id.clone(),
                        spacing,
                        source: RuleSource::Observed { count },
                    },
                );
            }
        }

        let title = title_index.map(|i| {
            let info = &infos[i];
            HeadingRule {
                level: 0,
                font: info.font.clone(),
                style_id: info.style_id.clone(),
                spacing: info.spacing,
                source: RuleSource::Observed { count: 1 },
            }
        });

        let heading_style_ids = (1..=MAX_HEADING_LEVEL)
            .filter_map(|level| {
                self.styles
                    .heading_style_id(level)
                    .map(|id| (level, id.to_string()))
            })
            .collect();

        let parts = ProfileParts {
            emphasis_font: emphasis_fonts.winner().map(|(font, _)| font.clone()),
            bullet_rule: self.bullet_rule(infos, &body_font, paragraph_spacing),
            body_font,
            title,
            heading_rules,
            heading_style_ids,
            paragraph_spacing,
            body_style_id,
            stats,
        };
        StyleProfile::from_parts(parts)
    }

    /// Index of the title paragraph, if the template opens with one.
    fn find_title(&self, infos: &[ParagraphInfo], first_heading: usize) -> Option<usize> {
        let first = infos.first()?;
        if first_heading == 0 {
            return None;
        }
        match first.role {
            ParagraphRole::Title => Some(0),
            ParagraphRole::Body => {
                // Compare against the body font of everything else
                let mut others = Tally::new();
                for info in &infos[1..] {
                    if matches!(info.role, ParagraphRole::Body | ParagraphRole::Title) {
                        others.add(info.font.size);
                    }
                }
                let body_size = others
                    .winner()
                    .map(|(size, _)| *size)
                    .unwrap_or_else(|| self.fallback_body_font().size);
                (first.font.size > body_size).then_some(0)
            }
            _ => None,
        }
    }

    fn bullet_rule(
        &self,
        infos: &[ParagraphInfo],
        body_font: &FontSpec,
        body_spacing: ParagraphSpacing,
    ) -> BulletRule {
        let items: Vec<&ParagraphInfo> = infos
            .iter()
            .filter(|i| i.role == ParagraphRole::ListItem)
            .collect();
        // Vote on top-level items when there are any
        let top: Vec<&ParagraphInfo> = items
            .iter()
            .copied()
            .filter(|i| i.list_level == 0)
            .collect();
        let voters = if top.is_empty() { items } else { top };

        let mut shapes = Tally::new();
        let mut fonts = Tally::new();
        for info in &voters {
            shapes.add((
                info.marker.clone(),
                info.indent_left,
                info.hanging,
                info.spacing,
                info.style_id.clone(),
            ));
            fonts.add(info.font.clone());
        }

        let Some(((marker, indent, hanging, spacing, style_id), count)) = shapes.winner() else {
            return BulletRule {
                marker: Marker::Literal {
                    glyph: self.options.default_bullet.clone(),
                },
                indent: self.options.default_indent,
                hanging: self.options.default_indent,
                spacing: body_spacing,
                ..Default::default()
            };
        };

        let marker = marker.clone().unwrap_or_else(|| Marker::Literal {
            glyph: self.options.default_bullet.clone(),
        });
        let (indent, hanging) = if *indent == 0 && *hanging == 0 {
            (self.options.default_indent, self.options.default_indent)
        } else {
            (*indent, *hanging)
        };
        let font = fonts
            .winner()
            .map(|(font, _)| font.clone())
            .filter(|font| font != body_font);

        BulletRule {
            marker,
            indent,
            hanging,
            spacing: *spacing,
            style_id: style_id.clone(),
            font,
            source: RuleSource::Observed { count },
        }
    }

    fn fallback_body_font(&self) -> FontSpec {
        let run = self.styles.effective_run(None, &RunProps::default());
        FontSpec {
            family: run
                .font
                .as_ref()
                .and_then(|f| self.theme.family(f))
                .unwrap_or_else(|| self.options.default_font.family.clone()),
            size: run.size.unwrap_or(self.options.default_font.size),
            bold: run.bold.unwrap_or(false),
            italic: run.italic.unwrap_or(false),
        }
    }

    fn fallback_spacing(&self) -> ParagraphSpacing {
        let para = self.styles.effective_para(&ParaProps::default());
        spacing_of(&para, ParagraphSpacing::default())
    }
}

/// Spacing from effective paragraph properties, gaps filled from `base`.
fn spacing_of(props: &ParaProps, base: ParagraphSpacing) -> ParagraphSpacing {
    ParagraphSpacing {
        before: props.space_before.unwrap_or(base.before),
        after: props.space_after.unwrap_or(base.after),
        line: props.line.unwrap_or(base.line),
        line_rule: props
            .line_rule
            .as_deref()
            .map_or(base.line_rule, |rule| LineRule::from_attr(Some(rule))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::body::scan;

    const STYLES: &str = r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:docDefaults>
    <w:rPrDefault><w:rPr><w:rFonts w:asciiTheme="minorHAnsi"/><w:sz w:val="22"/></w:rPr></w:rPrDefault>
    <w:pPrDefault><w:pPr><w:spacing w:after="120" w:line="276" w:lineRule="auto"/></w:pPr></w:pPrDefault>
  </w:docDefaults>
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style>
  <w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/>
    <w:rPr><w:rFonts w:asciiTheme="majorHAnsi"/><w:sz w:val="56"/></w:rPr></w:style>
  <w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/>
    <w:pPr><w:keepNext/><w:spacing w:before="240" w:after="60"/><w:outlineLvl w:val="0"/></w:pPr>
    <w:rPr><w:rFonts w:ascii="Cambria" w:hAnsi="Cambria"/><w:b/><w:sz w:val="28"/></w:rPr></w:style>
  <w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/><w:basedOn w:val="Normal"/>
    <w:pPr><w:outlineLvl w:val="1"/></w:pPr></w:style>
  <w:style w:type="paragraph" w:styleId="ListBullet"><w:name w:val="List Bullet"/><w:basedOn w:val="Normal"/>
    <w:pPr><w:numPr><w:numId w:val="1"/></w:numPr></w:pPr></w:style>
</w:styles>"#;

    const NUMBERING: &str = r#"<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:abstractNum w:abstractNumId="0"><w:lvl w:ilvl="0"><w:numFmt w:val="bullet"/><w:lvlText w:val="•"/>
    <w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr></w:lvl></w:abstractNum>
  <w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>
</w:numbering>"#;

    const THEME: &str = r#"<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"><a:themeElements><a:fontScheme name="Office">
  <a:majorFont><a:latin typeface="Calibri Light"/></a:majorFont>
  <a:minorFont><a:latin typeface="Calibri"/></a:minorFont>
</a:fontScheme></a:themeElements></a:theme>"#;

    fn document(body: &str) -> String {
        format!(
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            body
        )
    }

    fn para(style: &str, text: &str) -> String {
        format!(
            r#"<w:p><w:pPr><w:pStyle w:val="{}"/></w:pPr><w:r><w:t>{}</w:t></w:r></w:p>"#,
            style, text
        )
    }

    fn profile_of(body: &str, options: FingerprintOptions) -> (Vec<ParagraphInfo>, StyleProfile) {
        let styles = StyleSheet::parse(STYLES.as_bytes()).unwrap();
        let numbering = Numbering::parse(NUMBERING.as_bytes()).unwrap();
        let theme = ThemeFonts::parse(THEME.as_bytes()).unwrap();
        let (_, paragraphs) = scan(document(body).as_bytes()).unwrap();
        let fingerprinter = StyleFingerprinter::new(&styles, &numbering, &theme).with_options(options);
        let infos = fingerprinter.describe(&paragraphs);
        let profile = fingerprinter.profile(&infos);
        (infos, profile)
    }

    #[test]
    fn test_classification() {
        let body = [
            para("Title", "Jane Doe"),
            para("Normal", "jane@example.com"),
            para("Heading1", "Experience"),
            para("ListBullet", "Built X"),
            para("Normal", "• Typed bullet"),
            para("Normal", "Plain text"),
            "<w:p/>".to_string(),
        ]
        .concat();
        let (infos, _) = profile_of(&body, FingerprintOptions::default());
        let roles: Vec<ParagraphRole> = infos.iter().map(|i| i.role).collect();
        assert_eq!(
            roles,
            vec![
                ParagraphRole::Title,
                ParagraphRole::Body,
                ParagraphRole::Heading(1),
                ParagraphRole::ListItem,
                ParagraphRole::ListItem,
                ParagraphRole::Body,
            ]
        );
        assert_eq!(
            infos[3].marker,
            Some(Marker::Numbering {
                num_id: 1,
                glyph: "•".to_string()
            })
        );
        assert_eq!(infos[3].indent_left, 720);
        assert_eq!(
            infos[4].marker,
            Some(Marker::Literal {
                glyph: "•".to_string()
            })
        );
    }

    #[test]
    fn test_profile_rules() {
        let body = [
            para("Title", "Jane Doe"),
            para("Normal", "jane@example.com"),
            para("Heading1", "Experience"),
            para("ListBullet", "Built X"),
            para("ListBullet", "Built Y"),
            para("Heading1", "Education"),
            para("Normal", "BSc"),
        ]
        .concat();
        let (_, profile) = profile_of(&body, FingerprintOptions::default());

        let h1 = profile.heading_rule(1);
        assert_eq!(h1.font, FontSpec::new("Cambria", 28).with_bold(true));
        assert_eq!(h1.style_id.as_deref(), Some("Heading1"));
        assert_eq!(h1.source, RuleSource::Observed { count: 2 });
        assert_eq!(h1.spacing.before, 240);

        // Heading2 is defined in styles.xml but never used
        let h2 = profile.heading_rule(2);
        assert_eq!(h2.font, FontSpec::new("Cambria", 24).with_bold(true));
        assert_eq!(h2.style_id.as_deref(), Some("Heading2"));

        assert_eq!(profile.body_font(), &FontSpec::new("Calibri", 22));
        assert_eq!(profile.title().map(|t| t.font.size), Some(56));
        assert_eq!(
            profile.title().map(|t| t.font.family.as_str()),
            Some("Calibri Light")
        );
        assert_eq!(profile.emphasis_font(), Some(&FontSpec::new("Calibri", 22)));
        assert_eq!(profile.paragraph_spacing().after, 120);
        assert_eq!(profile.paragraph_spacing().line, 276);

        let bullet = profile.bullet_rule();
        assert_eq!(bullet.marker.glyph(), "•");
        assert_eq!(bullet.indent, 720);
        assert_eq!(bullet.hanging, 360);
        assert_eq!(bullet.style_id.as_deref(), Some("ListBullet"));
        assert_eq!(bullet.source, RuleSource::Observed { count: 2 });
    }

    #[test]
    fn test_inferred_headings() {
        let body = [
            para("Normal", "Jane Doe"),
            r#"<w:p><w:r><w:rPr><w:b/></w:rPr><w:t>Work Experience</w:t></w:r></w:p>"#.to_string(),
            para("Normal", "Did things at a company for several years."),
            para("Normal", "EDUCATION"),
            para("Normal", "Skills are listed in a long sentence here, which is not a heading at all."),
        ]
        .concat();

        let (infos, profile) = profile_of(&body, FingerprintOptions::default());
        assert_eq!(infos[1].role, ParagraphRole::Heading(1));
        assert!(infos[1].inferred);
        assert_eq!(infos[3].role, ParagraphRole::Heading(1));
        assert_eq!(infos[4].role, ParagraphRole::Body);
        assert_eq!(profile.stats().inferred_headings, 2);

        let (infos, _) = profile_of(&body, FingerprintOptions::new().with_infer_headings(false));
        assert!(infos.iter().all(|i| i.role == ParagraphRole::Body));
    }

    #[test]
    fn test_empty_template_falls_back() {
        let (_, profile) = profile_of("", FingerprintOptions::default());
        assert_eq!(profile.body_font(), &FontSpec::new("Calibri", 22));
        assert_eq!(profile.paragraph_spacing().after, 120);
        assert_eq!(profile.bullet_rule().marker.glyph(), "-");
        assert_eq!(profile.bullet_rule().indent, 360);
        assert_eq!(profile.bullet_rule().source, RuleSource::Default);
        assert!(profile.title().is_none());
        assert!(profile.emphasis_font().is_none());
    }

    #[test]
    fn test_majority_vote_with_first_seen_tie() {
        let run = |font: &str, text: &str| {
            format!(
                r#"<w:p><w:r><w:rPr><w:rFonts w:ascii="{}"/></w:rPr><w:t>{}</w:t></w:r></w:p>"#,
                font, text
            )
        };
        let body = [
            para("Heading1", "Experience"),
            run("Georgia", "one"),
            run("Arial", "two"),
            run("Arial", "three"),
            run("Georgia", "four"),
        ]
        .concat();
        let (_, profile) = profile_of(&body, FingerprintOptions::default());
        assert_eq!(profile.body_font().family, "Georgia");
    }
}
