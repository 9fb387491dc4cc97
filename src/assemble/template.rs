//! A loaded template: package, body layout and style profile.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use super::result::AssemblyStats;
use crate::detect::DocxFormat;
use crate::docx::body::{self, BodyLayout, ChildKind};
use crate::docx::{Numbering, Package, StyleSheet, ThemeFonts};
use crate::error::{AssemblyError, Result};
use crate::style::{FingerprintOptions, ParagraphInfo, StyleFingerprinter, StyleProfile};

/// A template document, read once and reused for any number of outputs.
#[derive(Debug, Clone)]
pub struct Template {
    package: Package,
    layout: BodyLayout,
    paragraphs: Vec<ParagraphInfo>,
    profile: StyleProfile,
    style_count: usize,
}

impl Template {
    /// Load a template from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(bytes, &FingerprintOptions::default())
    }

    /// Load a template from bytes with fingerprinting options.
    pub fn from_bytes_with_options(bytes: &[u8], options: &FingerprintOptions) -> Result<Self> {
        let package = Package::open(bytes)?;
        let (layout, paragraphs) = body::scan(package.main_part())?;

        let styles = load_optional(package.styles_part(), "styles", StyleSheet::parse);
        let numbering = load_optional(package.numbering_part(), "numbering", Numbering::parse);
        let theme = load_optional(package.theme_part(), "theme", ThemeFonts::parse);

        let fingerprinter =
            StyleFingerprinter::new(&styles, &numbering, &theme).with_options(options.clone());
        let infos = fingerprinter.describe(&paragraphs);
        let profile = fingerprinter.profile(&infos);

        log::info!(
            "template {}: {} paragraphs ({} headings, {} list items), {} body elements kept",
            package.format(),
            profile.stats().paragraphs,
            profile.stats().headings,
            profile.stats().list_items,
            layout.preserved_count()
        );

        Ok(Self {
            package,
            layout,
            paragraphs: infos,
            profile,
            style_count: styles.len(),
        })
    }

    /// Load a template from a file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Load a template from a file with fingerprinting options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: &FingerprintOptions) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes_with_options(&bytes, options)
    }

    /// Style fingerprint.
    pub fn profile(&self) -> &StyleProfile {
        &self.profile
    }

    /// Take the style fingerprint.
    pub fn into_profile(self) -> StyleProfile {
        self.profile
    }

    /// Classified paragraphs, in document order.
    pub fn paragraphs(&self) -> &[ParagraphInfo] {
        &self.paragraphs
    }

    /// Layout of the main document body.
    pub fn layout(&self) -> &BodyLayout {
        &self.layout
    }

    /// Whether a page header already carries text, such as the name and
    /// contact details of a branded template.
    pub fn has_header_text(&self) -> bool {
        let found = self
            .package
            .headers()
            .find(|(_, data)| body::story_has_text(data))
            .map(|(name, _)| name);
        if let Some(name) = found {
            log::info!("template header {} carries text", name);
        }
        found.is_some()
    }

    /// Underlying package.
    pub fn package(&self) -> &Package {
        &self.package
    }

    /// Package format.
    pub fn format(&self) -> &DocxFormat {
        self.package.format()
    }

    /// Structural overview.
    pub fn summary(&self) -> TemplateSummary {
        let children = &self.layout.children;
        TemplateSummary {
            format: self.package.format().to_string(),
            entries: self.package.entry_names().len(),
            paragraphs: self.layout.count(ChildKind::Paragraph),
            text_paragraphs: self.paragraphs.len(),
            tables: self.layout.count(ChildKind::Table),
            sections: self.layout.count(ChildKind::SectionProperties)
                + children.iter().filter(|c| c.has_section_break).count(),
            graphics: children.iter().filter(|c| c.has_graphics).count(),
            replaceable: self.layout.flowing_count(),
            preserved: self.layout.preserved_count(),
            styles: self.style_count,
            headers_with_text: self
                .package
                .stories()
                .filter(|(_, data)| body::story_has_text(data))
                .map(|(name, _)| name.to_string())
                .collect(),
        }
    }

    /// Clone the package with `content` in place of the flowing body.
    ///
    /// The spliced main part is re-scanned before anything is written, so a
    /// malformed result is reported instead of returned.
    pub(crate) fn write_with_body(
        &self,
        content: &str,
        clear_page_headers: bool,
        stats: &mut AssemblyStats,
    ) -> Result<Vec<u8>> {
        let main_name = self.package.main_part_name().to_string();
        let main = body::splice(self.package.main_part(), &self.layout, content);
        body::scan(&main).map_err(|e| AssemblyError::MalformedPart {
            part: main_name.clone(),
            reason: e.to_string(),
        })?;

        let mut replacements = BTreeMap::new();
        replacements.insert(main_name, main);

        if clear_page_headers {
            for (name, data) in self.package.stories() {
                if !body::story_has_text(data) {
                    continue;
                }
                let cleared = body::clear_story(data).map_err(|e| AssemblyError::MalformedPart {
                    part: name.to_string(),
                    reason: e.to_string(),
                })?;
                log::debug!("cleared {}", name);
                replacements.insert(name.to_string(), cleared);
                stats.cleared_story_count += 1;
            }
        }

        stats.replaced_count = self.layout.flowing_count() as u32;
        stats.preserved_count = self.layout.preserved_count() as u32;

        Ok(self.package.write_with(&replacements)?)
    }
}

/// Parse an optional part; a broken one is logged and replaced by defaults.
fn load_optional<T: Default>(
    data: Option<&[u8]>,
    what: &str,
    parse: impl Fn(&[u8]) -> Result<T>,
) -> T {
    match data.map(parse) {
        Some(Ok(value)) => value,
        Some(Err(e)) => {
            log::warn!("ignoring {} part: {}", what, e);
            T::default()
        }
        None => T::default(),
    }
}

/// Structural overview of a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateSummary {
    pub format: String,
    /// Zip entries in the package
    pub entries: usize,
    /// Body-level paragraphs, empty ones included
    pub paragraphs: usize,
    /// Paragraphs with text, including those inside tables
    pub text_paragraphs: usize,
    pub tables: usize,
    pub sections: usize,
    /// Body elements holding drawings or objects
    pub graphics: usize,
    /// Body elements new content replaces
    pub replaceable: usize,
    /// Body elements kept verbatim
    pub preserved: usize,
    /// Style definitions
    pub styles: usize,
    /// Header and footer parts that carry text
    pub headers_with_text: Vec<String>,
}
