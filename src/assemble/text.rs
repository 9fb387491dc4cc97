//! Text preparation before content is written into XML.

use std::sync::OnceLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use super::options::AssembleOptions;
use crate::docx::xml::is_xml_char;
use crate::error::AssemblyError;

const LIGATURES: [(&str, &str); 7] = [
    ("\u{FB00}", "ff"),
    ("\u{FB01}", "fi"),
    ("\u{FB02}", "fl"),
    ("\u{FB03}", "ffi"),
    ("\u{FB04}", "ffl"),
    ("\u{FB05}", "st"),
    ("\u{FB06}", "st"),
];

fn space_runs() -> &'static Regex {
    static SPACES: OnceLock<Regex> = OnceLock::new();
    SPACES.get_or_init(|| Regex::new(r"[ \u{00A0}]{2,}").unwrap())
}

/// Prepares block text: normalization, cleanup and XML character checks.
#[derive(Debug, Clone)]
pub struct TextPreparer<'a> {
    options: &'a AssembleOptions,
}

impl<'a> TextPreparer<'a> {
    /// Create a preparer for `options`.
    pub fn new(options: &'a AssembleOptions) -> Self {
        Self { options }
    }

    /// Prepare `text`. `context` names the block in error messages.
    pub fn prepare(&self, text: &str, context: &str) -> Result<String, AssemblyError> {
        let mut result = text.replace("\r\n", "\n").replace('\r', "\n");

        if self.options.normalize_unicode {
            result = result.nfc().collect();
        }

        if self.options.fix_ligatures {
            for (ligature, replacement) in LIGATURES {
                result = result.replace(ligature, replacement);
            }
        }

        if self.options.collapse_spaces {
            result = space_runs().replace_all(&result, " ").into_owned();
            result = result.trim_matches(' ').to_string();
        }

        self.check_chars(result, context)
    }

    fn check_chars(&self, text: String, context: &str) -> Result<String, AssemblyError> {
        match text.chars().find(|c| !is_xml_char(*c)) {
            None => Ok(text),
            Some(_) if self.options.strip_invalid_chars => {
                Ok(text.chars().filter(|c| is_xml_char(*c)).collect())
            }
            Some(character) => Err(AssemblyError::Unencodable {
                character,
                context: context.to_string(),
            }),
        }
    }
}
