//! Assembly result with statistics.

use serde::{Deserialize, Serialize};

use crate::style::StyleRole;

/// Output document bytes and what went into them.
#[derive(Debug, Clone)]
pub struct AssembleResult {
    /// The assembled package
    pub bytes: Vec<u8>,

    /// Assembly statistics
    pub stats: AssemblyStats,
}

impl AssembleResult {
    /// Create a new result.
    pub fn new(bytes: Vec<u8>, stats: AssemblyStats) -> Self {
        Self { bytes, stats }
    }

    /// Size of the output package in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the output is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Take the document bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Statistics collected during assembly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyStats {
    /// Sections in the content model
    pub section_count: u32,

    /// Heading paragraphs written (title included)
    pub heading_count: u32,

    /// Bullet paragraphs written
    pub bullet_count: u32,

    /// Body paragraphs written, spacers included
    pub paragraph_count: u32,

    /// Contact lines written
    pub contact_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Template body elements replaced by new content
    pub replaced_count: u32,

    /// Template body elements kept verbatim
    pub preserved_count: u32,

    /// Header and footer parts emptied
    pub cleared_story_count: u32,
}

impl AssemblyStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a written paragraph by its role.
    pub fn add(&mut self, role: StyleRole) {
        match role {
            StyleRole::Title | StyleRole::Heading(_) => self.heading_count += 1,
            StyleRole::Bullet => self.bullet_count += 1,
            StyleRole::Paragraph => self.paragraph_count += 1,
            StyleRole::ContactLine => self.contact_count += 1,
        }
    }

    /// Add word counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
    }

    /// Total paragraphs written.
    pub fn total_paragraphs(&self) -> u32 {
        self.heading_count + self.bullet_count + self.paragraph_count + self.contact_count
    }
}
