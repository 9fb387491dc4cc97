//! Content blocks: the unit of styling.

use serde::{Deserialize, Serialize};

/// One semantic unit of content.
///
/// Blocks carry no styling; the resolver decides how each one looks based on
/// the template's style profile. When deserializing, a block of an unknown
/// `type` becomes a `Paragraph` with whatever `text` it carried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", try_from = "WireBlock")]
pub enum Block {
    /// Section or sub-section heading. Level 0 is the document title.
    Heading {
        /// Heading level
        level: u8,
        /// Heading text
        text: String,
    },

    /// List item.
    Bullet {
        /// Item text
        text: String,
        /// Nesting depth, 0 for top-level items
        #[serde(default)]
        indent_level: u8,
        /// Bold lead-in written before the text ("Rust:" in "Rust: 8 years")
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lead: Option<String>,
    },

    /// Body paragraph.
    Paragraph {
        /// Paragraph text
        text: String,
        /// Bold lead-in written before the text
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lead: Option<String>,
    },

    /// Contact details shown on a single line.
    ContactLine {
        /// Individual fields (email, phone, location, links)
        fields: Vec<String>,
    },
}

/// Serialized block as accepted on input.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireBlock {
    Known(KnownBlock),
    Unknown(UnknownBlock),
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum KnownBlock {
    Heading {
        level: u8,
        text: String,
    },
    Bullet {
        text: String,
        #[serde(default)]
        indent_level: u8,
        #[serde(default)]
        lead: Option<String>,
    },
    Paragraph {
        text: String,
        #[serde(default)]
        lead: Option<String>,
    },
    ContactLine {
        fields: Vec<String>,
    },
}

#[derive(Deserialize)]
struct UnknownBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

const KNOWN_KINDS: [&str; 4] = ["heading", "bullet", "paragraph", "contact_line"];

impl TryFrom<WireBlock> for Block {
    type Error = String;

    fn try_from(wire: WireBlock) -> Result<Self, Self::Error> {
        match wire {
            WireBlock::Known(KnownBlock::Heading { level, text }) => Ok(Block::Heading { level, text }),
            WireBlock::Known(KnownBlock::Bullet {
                text,
                indent_level,
                lead,
            }) => Ok(Block::Bullet {
                text,
                indent_level,
                lead,
            }),
            WireBlock::Known(KnownBlock::Paragraph { text, lead }) => {
                Ok(Block::Paragraph { text, lead })
            }
            WireBlock::Known(KnownBlock::ContactLine { fields }) => Ok(Block::ContactLine { fields }),
            WireBlock::Unknown(unknown) if KNOWN_KINDS.contains(&unknown.kind.as_str()) => {
                Err(format!("malformed {} block", unknown.kind))
            }
            WireBlock::Unknown(unknown) => {
                log::debug!("block type '{}' read as a paragraph", unknown.kind);
                Ok(Block::Paragraph {
                    text: unknown.text.unwrap_or_default(),
                    lead: None,
                })
            }
        }
    }
}

impl Block {
    /// Create a heading block.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading {
            level,
            text: text.into(),
        }
    }

    /// Create a top-level bullet.
    pub fn bullet(text: impl Into<String>) -> Self {
        Self::bullet_at(text, 0)
    }

    /// Create a bullet at a nesting depth.
    pub fn bullet_at(text: impl Into<String>, indent_level: u8) -> Self {
        Block::Bullet {
            text: text.into(),
            indent_level,
            lead: None,
        }
    }

    /// Create a body paragraph.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph {
            text: text.into(),
            lead: None,
        }
    }

    /// Create a contact line.
    pub fn contact<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Block::ContactLine {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Attach a bold lead-in. Only bullets and paragraphs carry one.
    pub fn with_lead(mut self, value: impl Into<String>) -> Self {
        match &mut self {
            Block::Bullet { lead, .. } | Block::Paragraph { lead, .. } => {
                *lead = Some(value.into());
            }
            Block::Heading { .. } | Block::ContactLine { .. } => {}
        }
        self
    }

    /// Short name of the block kind, used in logs and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Heading { .. } => "heading",
            Block::Bullet { .. } => "bullet",
            Block::Paragraph { .. } => "paragraph",
            Block::ContactLine { .. } => "contact_line",
        }
    }

    /// Bold lead-in, if any.
    pub fn lead(&self) -> Option<&str> {
        match self {
            Block::Bullet { lead, .. } | Block::Paragraph { lead, .. } => lead.as_deref(),
            _ => None,
        }
    }

    /// Main text without the lead-in. Contact fields are joined with `separator`.
    pub fn body_text(&self, separator: &str) -> String {
        match self {
            Block::Heading { text, .. }
            | Block::Bullet { text, .. }
            | Block::Paragraph { text, .. } => text.clone(),
            Block::ContactLine { fields } => fields
                .iter()
                .map(|f| f.trim())
                .filter(|f| !f.is_empty())
                .collect::<Vec<_>>()
                .join(separator),
        }
    }

    /// Text as a reader would see it, lead-in included.
    pub fn plain_text(&self) -> String {
        let body = self.body_text(" | ");
        match self.lead() {
            Some(lead) if body.is_empty() => lead.to_string(),
            Some(lead) => format!("{} {}", lead, body),
            None => body,
        }
    }

    /// Check if this is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, Block::Heading { .. })
    }

    /// Check if this is a list item.
    pub fn is_bullet(&self) -> bool {
        matches!(self, Block::Bullet { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(
            Block::heading(1, "Experience"),
            Block::Heading {
                level: 1,
                text: "Experience".to_string()
            }
        );
        assert!(Block::bullet("Built X").is_bullet());
        assert_eq!(Block::bullet_at("Nested", 2).kind(), "bullet");
    }

    #[test]
    fn test_lead() {
        let block = Block::bullet("Shipped the billing service").with_lead("Payments:");
        assert_eq!(block.lead(), Some("Payments:"));
        assert_eq!(block.plain_text(), "Payments: Shipped the billing service");

        // Headings ignore lead-ins
        let heading = Block::heading(1, "Skills").with_lead("x");
        assert_eq!(heading.lead(), None);
    }

    #[test]
    fn test_contact_text() {
        let block = Block::contact(["jane@example.com", " ", "+1 555 0100"]);
        assert_eq!(block.body_text(" | "), "jane@example.com | +1 555 0100");
    }

    #[test]
    fn test_serde_shape() {
        let json = r#"{"type":"bullet","text":"Built X"}"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert_eq!(block, Block::bullet("Built X"));

        let json = serde_json::to_string(&Block::contact(["a", "b"])).unwrap();
        assert_eq!(json, r#"{"type":"contact_line","fields":["a","b"]}"#);
    }

    #[test]
    fn test_unknown_type_reads_as_paragraph() {
        let block: Block = serde_json::from_str(r#"{"type":"quote","text":"Ship it"}"#).unwrap();
        assert_eq!(block, Block::paragraph("Ship it"));
    }

    #[test]
    fn test_malformed_known_type_rejected() {
        let result: Result<Block, _> = serde_json::from_str(r#"{"type":"heading","text":"No level"}"#);
        assert!(result.is_err());
    }
}
