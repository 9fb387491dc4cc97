//! Content model: ordered sections of blocks.

use serde::{Deserialize, Serialize};

use super::block::Block;
use crate::error::{Error, Result};

/// Deepest heading level a document can express.
pub const MAX_HEADING_LEVEL: u8 = 9;

/// A titled run of blocks.
///
/// The title labels the section for logs and reports; it is not written to
/// the document. Put a `Heading` block first to show one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section label
    pub title: String,
    /// Blocks in output order
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Section {
    /// Create an empty section.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            blocks: Vec::new(),
        }
    }

    /// Add a block, builder style.
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Append a block.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Check if the section has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Tailored document content, independent of styling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentModel {
    /// Sections in output order
    pub sections: Vec<Section>,
}

impl ContentModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a section, builder style.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Append a section.
    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// All blocks in document order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.sections.iter().flat_map(|s| s.blocks.iter())
    }

    /// Total number of blocks.
    pub fn block_count(&self) -> usize {
        self.sections.iter().map(|s| s.blocks.len()).sum()
    }

    /// Parse a model from JSON.
    ///
    /// # Example
    ///
    /// ```
    /// use cvforge::model::ContentModel;
    ///
    /// let model = ContentModel::from_json(r#"{
    ///     "sections": [{
    ///         "title": "Experience",
    ///         "blocks": [
    ///             {"type": "heading", "level": 1, "text": "Experience"},
    ///             {"type": "bullet", "text": "Built X"}
    ///         ]
    ///     }]
    /// }"#).unwrap();
    /// assert_eq!(model.block_count(), 2);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the model to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Render(e.to_string()))
    }

    /// Check structural shape: at least one section, contact lines with at
    /// least one field. Heading levels past the deepest one clamp at
    /// resolution time.
    ///
    /// Text content is not judged.
    pub fn validate(&self) -> Result<()> {
        if self.sections.is_empty() {
            return Err(Error::InvalidContent("content has no sections".to_string()));
        }
        for (s, section) in self.sections.iter().enumerate() {
            for (b, block) in section.blocks.iter().enumerate() {
                match block {
                    Block::ContactLine { fields } if fields.iter().all(|f| f.trim().is_empty()) => {
                        return Err(Error::InvalidContent(format!(
                            "section {} block {}: contact line has no fields",
                            s, b
                        )));
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }
}
