//! Caller-supplied style overrides.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Keys the resolver understands.
pub const KNOWN_KEYS: [&str; 5] = ["font", "header", "heading", "bullet", "size"];

/// Sparse map of style directives (`font`, `header`, `bullet`, `size`).
///
/// Keys are case-insensitive. Unknown keys are kept but have no effect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleOverrides {
    entries: BTreeMap<String, String>,
}

impl StyleOverrides {
    /// Create an empty override map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directive, builder style.
    pub fn with(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add a directive.
    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        let key = key.as_ref().trim().to_ascii_lowercase();
        if !KNOWN_KEYS.contains(&key.as_str()) {
            log::debug!("override key '{}' is not used by the resolver", key);
        }
        self.entries.insert(key, value.into().trim().to_string());
    }

    /// Parse a `key=value` pair.
    pub fn parse_pair(pair: &str) -> Result<(String, String)> {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| Error::Other(format!("override '{}' is not key=value", pair)))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(Error::Other(format!("override '{}' has no key", pair)));
        }
        Ok((key.to_string(), value.trim().to_string()))
    }

    /// Build overrides from `key=value` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut overrides = Self::new();
        for pair in pairs {
            let (key, value) = Self::parse_pair(pair.as_ref())?;
            overrides.insert(key, value);
        }
        Ok(overrides)
    }

    /// Raw value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(&key.to_ascii_lowercase())
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Body font directive (`font`).
    pub fn body_font(&self) -> Option<FontDirective> {
        self.get("font").map(FontDirective::parse)
    }

    /// Heading font directive (`header`, or `heading`).
    pub fn heading_font(&self) -> Option<FontDirective> {
        self.get("header")
            .or_else(|| self.get("heading"))
            .map(FontDirective::parse)
    }

    /// Forced bullet glyph (`bullet`).
    pub fn bullet(&self) -> Option<&str> {
        self.get("bullet")
    }

    /// Body size in half-points (`size`, given in points).
    pub fn body_size(&self) -> Option<u32> {
        let raw = self.get("size")?;
        let points: f32 = raw.trim_end_matches("pt").trim().parse().ok()?;
        if !(1.0..=1638.0).contains(&points) {
            log::debug!("override size '{}' out of range", raw);
            return None;
        }
        Some((points * 2.0).round() as u32)
    }

    /// Number of directives.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no directives.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate directives in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A font directive such as `Arial`, `ArialBold` or `Georgia Italic`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontDirective {
    pub family: String,
    /// Set when the directive names a weight
    pub bold: Option<bool>,
    /// Set when the directive names a slant
    pub italic: Option<bool>,
}

impl FontDirective {
    /// Split a trailing `Bold` / `Italic` off a family name.
    pub fn parse(value: &str) -> Self {
        let mut family = value.trim();
        let mut bold = None;
        let mut italic = None;

        loop {
            if let Some(rest) = strip_suffix_ci(family, "bold") {
                bold = Some(true);
                family = rest;
            } else if let Some(rest) = strip_suffix_ci(family, "italic") {
                italic = Some(true);
                family = rest;
            } else {
                break;
            }
        }

        if family.is_empty() {
            // "Bold" alone is a family name, not a weight
            return Self {
                family: value.trim().to_string(),
                bold: None,
                italic: None,
            };
        }
        Self {
            family: family.to_string(),
            bold,
            italic,
        }
    }
}

impl fmt::Display for FontDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.family)?;
        if self.bold == Some(true) {
            write!(f, " bold")?;
        }
        if self.italic == Some(true) {
            write!(f, " italic")?;
        }
        Ok(())
    }
}

fn strip_suffix_ci<'a>(value: &'a str, suffix: &str) -> Option<&'a str> {
    let split = value.len().checked_sub(suffix.len())?;
    if !value.is_char_boundary(split) || !value[split..].eq_ignore_ascii_case(suffix) {
        return None;
    }
    Some(value[..split].trim_end_matches([' ', '-', '_']))
}
