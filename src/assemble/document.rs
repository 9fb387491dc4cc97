//! CV assembly: clone the template, replace its flowing content.

use super::emit::ParagraphEmitter;
use super::options::AssembleOptions;
use super::result::{AssembleResult, AssemblyStats};
use super::template::Template;
use super::text::TextPreparer;
use crate::error::{AssemblyError, Result};
use crate::model::ContentModel;
use crate::style::{StyleOverrides, StyleResolver};

/// Override keys whose values are written into the document.
const WRITTEN_OVERRIDES: [&str; 4] = ["font", "header", "heading", "bullet"];

/// Writes a [`ContentModel`] into a clone of a template.
#[derive(Debug, Clone)]
pub struct DocumentAssembler<'t> {
    template: &'t Template,
    overrides: StyleOverrides,
    options: AssembleOptions,
}

impl<'t> DocumentAssembler<'t> {
    /// Create an assembler over a loaded template.
    pub fn new(template: &'t Template) -> Self {
        Self {
            template,
            overrides: StyleOverrides::default(),
            options: AssembleOptions::default(),
        }
    }

    /// Set style overrides.
    pub fn with_overrides(mut self, overrides: StyleOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Set assembly options.
    pub fn with_options(mut self, options: AssembleOptions) -> Self {
        self.options = options;
        self
    }

    /// Assemble a document.
    ///
    /// Either the whole package is produced or an error is returned;
    /// nothing is written anywhere by this call.
    pub fn assemble(&self, content: &ContentModel) -> Result<AssembleResult> {
        content.validate()?;

        let preparer = TextPreparer::new(&self.options);
        let overrides = prepare_overrides(&self.overrides, &preparer)?;
        let resolver = StyleResolver::new(self.template.profile()).with_overrides(&overrides);
        let emitter = ParagraphEmitter::new(&self.template.layout().prefix);

        let mut stats = AssemblyStats::new();
        stats.section_count = content.sections.len() as u32;
        let mut xml = String::new();

        for (s, section) in content.sections.iter().enumerate() {
            if section.is_empty() {
                log::debug!("section '{}' has no blocks", section.title);
            }
            for (b, block) in section.blocks.iter().enumerate() {
                let context = format!("section {} block {} ({})", s, b, block.kind());
                let style = resolver.resolve(block);
                let text =
                    preparer.prepare(&block.body_text(&self.options.contact_separator), &context)?;
                let lead = block
                    .lead()
                    .map(|lead| preparer.prepare(lead, &context))
                    .transpose()?;

                xml.push_str(&emitter.paragraph(&style, lead.as_deref(), &text));
                stats.add(style.role);
                stats.count_text(&text);
                if let Some(lead) = &lead {
                    stats.count_text(lead);
                }
            }
        }

        let bytes =
            self.template
                .write_with_body(&xml, self.options.clear_page_headers, &mut stats)?;

        log::info!(
            "assembled {} paragraphs ({} headings, {} bullets), replaced {} template elements, kept {}",
            stats.total_paragraphs(),
            stats.heading_count,
            stats.bullet_count,
            stats.replaced_count,
            stats.preserved_count
        );
        Ok(AssembleResult::new(bytes, stats))
    }
}

/// Run override values that end up in the XML through the same character
/// checks as content text.
fn prepare_overrides(
    overrides: &StyleOverrides,
    preparer: &TextPreparer<'_>,
) -> std::result::Result<StyleOverrides, AssemblyError> {
    let mut prepared = StyleOverrides::new();
    for (key, value) in overrides.iter() {
        if WRITTEN_OVERRIDES.contains(&key) {
            prepared.insert(key, preparer.prepare(value, &format!("override {}", key))?);
        } else {
            prepared.insert(key, value);
        }
    }
    Ok(prepared)
}
