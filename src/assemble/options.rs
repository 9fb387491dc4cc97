//! Assembly options and configuration.

use crate::style::FingerprintOptions;

/// Options for assembling a document.
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    /// NFC-normalize content text
    pub normalize_unicode: bool,

    /// Drop characters XML cannot carry instead of failing
    pub strip_invalid_chars: bool,

    /// Collapse runs of spaces inside a paragraph
    pub collapse_spaces: bool,

    /// Replace typographic ligatures (ﬁ, ﬂ) with plain letters
    pub fix_ligatures: bool,

    /// Separator between contact line fields
    pub contact_separator: String,

    /// Empty the template's page headers and footers
    pub clear_page_headers: bool,

    /// Options used when the template is fingerprinted during assembly
    pub fingerprint: FingerprintOptions,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            normalize_unicode: true,
            strip_invalid_chars: false,
            collapse_spaces: true,
            fix_ligatures: true,
            contact_separator: " | ".to_string(),
            clear_page_headers: false,
            fingerprint: FingerprintOptions::default(),
        }
    }
}

impl AssembleOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults for cover letters: page headers are cleared.
    pub fn letter() -> Self {
        Self {
            clear_page_headers: true,
            ..Self::default()
        }
    }

    /// Enable or disable Unicode normalization.
    pub fn with_normalize_unicode(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Drop unencodable characters instead of failing.
    pub fn strip_invalid_chars(mut self) -> Self {
        self.strip_invalid_chars = true;
        self
    }

    /// Set the contact line separator.
    pub fn with_contact_separator(mut self, separator: impl Into<String>) -> Self {
        self.contact_separator = separator.into();
        self
    }

    /// Enable or disable clearing of page headers and footers.
    pub fn with_clear_page_headers(mut self, clear: bool) -> Self {
        self.clear_page_headers = clear;
        self
    }

    /// Set fingerprinting options.
    pub fn with_fingerprint(mut self, options: FingerprintOptions) -> Self {
        self.fingerprint = options;
        self
    }

    /// Keep text exactly as given apart from XML escaping.
    pub fn raw_text(mut self) -> Self {
        self.normalize_unicode = false;
        self.collapse_spaces = false;
        self.fix_ligatures = false;
        self
    }
}
