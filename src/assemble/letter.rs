//! Cover letter assembly.

use super::document::DocumentAssembler;
use super::options::AssembleOptions;
use super::result::AssembleResult;
use super::template::Template;
use crate::error::Result;
use crate::model::CoverLetter;
use crate::style::StyleOverrides;

/// Writes a [`CoverLetter`] into a clone of a template.
///
/// Letters only consult the body font, paragraph spacing and, for the
/// sender's contact line, the emphasis font. Page headers are cleared by
/// default.
#[derive(Debug, Clone)]
pub struct CoverLetterAssembler<'t> {
    template: &'t Template,
    overrides: StyleOverrides,
    options: AssembleOptions,
}

impl<'t> CoverLetterAssembler<'t> {
    /// Create an assembler over a loaded template.
    pub fn new(template: &'t Template) -> Self {
        Self {
            template,
            overrides: StyleOverrides::default(),
            options: AssembleOptions::letter(),
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

    /// Assemble a letter.
    pub fn assemble(&self, letter: &CoverLetter) -> Result<AssembleResult> {
        letter.validate()?;
        DocumentAssembler::new(self.template)
            .with_overrides(self.overrides.clone())
            .with_options(self.options.clone())
            .assemble(&letter.to_content_model())
    }
}
