//! # cvforge
//!
//! Template-aware CV and cover letter assembly for Word documents.
//!
//! A user-supplied `.docx` template is fingerprinted into a [`StyleProfile`]
//! (fonts, heading rules, bullet rule, spacing). Structured content is then
//! written into a clone of the template: only the flowing body paragraphs
//! are replaced, so margins, theme, headers and anything else the profile
//! does not model survive untouched.
//!
//! ## Quick Start
//!
//! ```no_run
//! use cvforge::{assemble, Block, ContentModel, Section, StyleOverrides};
//!
//! fn main() -> cvforge::Result<()> {
//!     let template = std::fs::read("template.docx")?;
//!
//!     let content = ContentModel::new().with_section(
//!         Section::new("Experience")
//!             .with_block(Block::heading(1, "Experience"))
//!             .with_block(Block::bullet("Built X")),
//!     );
//!
//!     let bytes = assemble(&template, &content, &StyleOverrides::new())?;
//!     std::fs::write("cv.docx", bytes)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Style fingerprinting**: majority vote per role with first-seen tie-break
//! - **Level-scaling fallback**: missing heading levels derive from present ones
//! - **Clone + surgical replace**: unmodeled template parts are copied byte for byte
//! - **Overrides**: force body or heading fonts and bullet glyphs
//! - **Cover letters**: same template, body font and spacing only
//! - **Deterministic output**: same inputs give byte-identical documents

pub mod assemble;
pub mod detect;
pub mod docx;
pub mod error;
pub mod model;
pub mod render;
pub mod style;

// Re-export commonly used types
pub use assemble::{
    AssembleOptions, AssembleResult, AssemblyStats, CoverLetterAssembler, DocumentAssembler,
    Template, TemplateSummary,
};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_docx, DocumentKind, DocxFormat};
pub use error::{AssemblyError, Error, Result};
pub use model::{
    Block, ContentModel, CoverLetter, CvData, EarlierExperience, Experience, Section,
    MAX_HEADING_LEVEL,
};
pub use render::JsonFormat;
pub use style::{
    resolve, resolve_with, FingerprintOptions, FontRole, FontSpec, ResolvedStyle, StyleOverrides,
    StyleProfile, StyleResolver, StyleRole,
};

use std::path::Path;

/// Fingerprint a template.
///
/// # Arguments
///
/// * `template` - Template package bytes
///
/// # Returns
///
/// The template's [`StyleProfile`], or `Error::UnreadableTemplate` when the
/// bytes are not a word-processing package.
///
/// # Example
///
/// ```no_run
/// use cvforge::{fingerprint, FontRole};
///
/// let bytes = std::fs::read("template.docx").unwrap();
/// let profile = fingerprint(&bytes).unwrap();
/// println!("Body: {}", profile.body_font());
/// ```
pub fn fingerprint(template: &[u8]) -> Result<StyleProfile> {
    Ok(Template::from_bytes(template)?.into_profile())
}

/// Fingerprint a template file.
///
/// # Example
///
/// ```no_run
/// use cvforge::fingerprint_file;
///
/// let profile = fingerprint_file("template.docx").unwrap();
/// println!("Heading 1: {}", profile.heading_rule(1).font);
/// ```
pub fn fingerprint_file<P: AsRef<Path>>(path: P) -> Result<StyleProfile> {
    Ok(Template::open(path)?.into_profile())
}

/// Assemble a CV: `content` written into a clone of `template`.
///
/// # Arguments
///
/// * `template` - Template package bytes
/// * `content` - Sections and blocks, in output order
/// * `overrides` - Sparse style overrides; pass an empty map for none
///
/// # Example
///
/// ```no_run
/// use cvforge::{assemble, ContentModel, StyleOverrides};
///
/// let template = std::fs::read("template.docx").unwrap();
/// let content = ContentModel::from_json(&std::fs::read_to_string("cv.json").unwrap()).unwrap();
/// let overrides = StyleOverrides::new().with("header", "ArialBold");
/// let bytes = assemble(&template, &content, &overrides).unwrap();
/// ```
pub fn assemble(template: &[u8], content: &ContentModel, overrides: &StyleOverrides) -> Result<Vec<u8>> {
    Ok(assemble_with_options(template, content, overrides, &AssembleOptions::default())?.into_bytes())
}

/// Assemble a CV with custom options, returning statistics with the bytes.
pub fn assemble_with_options(
    template: &[u8],
    content: &ContentModel,
    overrides: &StyleOverrides,
    options: &AssembleOptions,
) -> Result<AssembleResult> {
    let template = Template::from_bytes_with_options(template, &options.fingerprint)?;
    DocumentAssembler::new(&template)
        .with_overrides(overrides.clone())
        .with_options(options.clone())
        .assemble(content)
}

/// Assemble a cover letter from its three parts.
///
/// # Arguments
///
/// * `template` - Template package bytes
/// * `salutation` - Opening line, e.g. "Dear Hiring Manager,"
/// * `body` - Body paragraphs in order
/// * `signature` - Closing and name; one paragraph per line
///
/// # Example
///
/// ```no_run
/// use cvforge::assemble_letter;
///
/// let template = std::fs::read("template.docx").unwrap();
/// let bytes = assemble_letter(
///     &template,
///     "Dear Hiring Manager,",
///     &["I am writing to apply for the role."],
///     "Sincerely,\nJane Doe",
/// )
/// .unwrap();
/// ```
pub fn assemble_letter<S: AsRef<str>>(
    template: &[u8],
    salutation: &str,
    body: &[S],
    signature: &str,
) -> Result<Vec<u8>> {
    let letter = CoverLetter::new(salutation, body.iter().map(|p| p.as_ref()), signature);
    let template = Template::from_bytes(template)?;
    Ok(CoverLetterAssembler::new(&template)
        .assemble(&letter)?
        .into_bytes())
}

/// Assemble a CV from a template file into an output file.
///
/// The output file is only written once assembly has fully succeeded.
///
/// # Example
///
/// ```no_run
/// use cvforge::{assemble_file, ContentModel, StyleOverrides};
///
/// let content = ContentModel::from_json(&std::fs::read_to_string("cv.json").unwrap()).unwrap();
/// let stats = assemble_file("template.docx", &content, &StyleOverrides::new(), "cv.docx").unwrap();
/// println!("{} paragraphs", stats.total_paragraphs());
/// ```
pub fn assemble_file<P: AsRef<Path>, Q: AsRef<Path>>(
    template: P,
    content: &ContentModel,
    overrides: &StyleOverrides,
    output: Q,
) -> Result<AssemblyStats> {
    let bytes = std::fs::read(template)?;
    let result = assemble_with_options(&bytes, content, overrides, &AssembleOptions::default())?;
    std::fs::write(output, &result.bytes)?;
    Ok(result.stats)
}

/// Builder for loading a template once and assembling several documents.
///
/// # Example
///
/// ```no_run
/// use cvforge::{CoverLetter, CvData, CvForge};
///
/// let forge = CvForge::new()
///     .with_suggestion("font", "Georgia")
///     .with_suggestion("header", "ArialBold")
///     .open("template.docx")?;
///
/// let cv = CvData::from_json(&std::fs::read_to_string("cv.json")?)?;
/// std::fs::write("cv.docx", forge.assemble_cv(&cv)?.bytes)?;
///
/// let letter = CoverLetter::new("Dear Team,", ["I would like to join."], "Jane Doe");
/// std::fs::write("letter.docx", forge.assemble_letter(&letter)?.bytes)?;
/// # Ok::<(), cvforge::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CvForge {
    overrides: StyleOverrides,
    options: AssembleOptions,
    clear_letter_headers: Option<bool>,
}

impl CvForge {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one style override.
    pub fn with_suggestion(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.overrides.insert(key, value);
        self
    }

    /// Replace all style overrides.
    pub fn with_overrides(mut self, overrides: StyleOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Set assembly options.
    pub fn with_options(mut self, options: AssembleOptions) -> Self {
        self.options = options;
        self
    }

    /// Set fingerprinting options.
    pub fn with_fingerprint_options(mut self, options: FingerprintOptions) -> Self {
        self.options = self.options.with_fingerprint(options);
        self
    }

    /// Empty page headers and footers in CV output too.
    pub fn clear_page_headers(mut self) -> Self {
        self.options = self.options.with_clear_page_headers(true);
        self
    }

    /// Keep or clear page headers in letters (cleared by default).
    pub fn with_letter_headers_cleared(mut self, clear: bool) -> Self {
        self.clear_letter_headers = Some(clear);
        self
    }

    /// Drop characters XML cannot carry instead of failing.
    pub fn strip_invalid_chars(mut self) -> Self {
        self.options = self.options.strip_invalid_chars();
        self
    }

    /// Load a template file.
    pub fn open<P: AsRef<Path>>(self, path: P) -> Result<CvForgeTemplate> {
        let template = Template::open_with_options(path, &self.options.fingerprint)?;
        Ok(self.into_template(template))
    }

    /// Load a template from bytes.
    pub fn open_bytes(self, data: &[u8]) -> Result<CvForgeTemplate> {
        let template = Template::from_bytes_with_options(data, &self.options.fingerprint)?;
        Ok(self.into_template(template))
    }

    fn into_template(self, template: Template) -> CvForgeTemplate {
        let letter_options = AssembleOptions {
            clear_page_headers: self.clear_letter_headers.unwrap_or(true),
            ..self.options.clone()
        };
        CvForgeTemplate {
            template,
            overrides: self.overrides,
            options: self.options,
            letter_options,
        }
    }
}

/// A loaded template with the builder's overrides and options.
#[derive(Debug, Clone)]
pub struct CvForgeTemplate {
    /// The loaded template
    pub template: Template,
    overrides: StyleOverrides,
    options: AssembleOptions,
    letter_options: AssembleOptions,
}

impl CvForgeTemplate {
    /// Style fingerprint of the template.
    pub fn profile(&self) -> &StyleProfile {
        self.template.profile()
    }

    /// Structural overview of the template.
    pub fn summary(&self) -> TemplateSummary {
        self.template.summary()
    }

    /// Resolve one block as assembly would.
    pub fn resolve(&self, block: &Block) -> ResolvedStyle {
        resolve_with(self.template.profile(), block, &self.overrides)
    }

    /// Assemble a content model.
    pub fn assemble(&self, content: &ContentModel) -> Result<AssembleResult> {
        DocumentAssembler::new(&self.template)
            .with_overrides(self.overrides.clone())
            .with_options(self.options.clone())
            .assemble(content)
    }

    /// Assemble structured CV data.
    ///
    /// The name, title and contact block is left out when a page header of
    /// the template already carries text and headers are kept.
    pub fn assemble_cv(&self, cv: &CvData) -> Result<AssembleResult> {
        let include_header = self.options.clear_page_headers || !self.template.has_header_text();
        self.assemble(&cv.to_content_model_with(include_header))
    }

    /// Assemble a cover letter.
    pub fn assemble_letter(&self, letter: &CoverLetter) -> Result<AssembleResult> {
        CoverLetterAssembler::new(&self.template)
            .with_overrides(self.overrides.clone())
            .with_options(self.letter_options.clone())
            .assemble(letter)
    }

    /// Profile as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(self.template.profile(), format)
    }

    /// Profile as a text report.
    pub fn to_text(&self) -> String {
        render::to_text(self.template.profile())
    }
}
