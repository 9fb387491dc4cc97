//! Cover letter content.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::block::Block;
use super::content::{ContentModel, Section};
use crate::error::{Error, Result};

/// Date format used on letters, e.g. "March 04, 2026".
pub const LETTER_DATE_FORMAT: &str = "%B %d, %Y";

/// Content of a cover letter.
///
/// Letters have no headings or bullets: every line is a paragraph, apart
/// from the sender's contact details which render as a contact line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverLetter {
    /// Sender lines shown above the date (name, title)
    #[serde(default)]
    pub sender: Vec<String>,
    /// Sender contact fields, joined on one line
    #[serde(default)]
    pub contact: Vec<String>,
    /// Letter date
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Opening line, e.g. "Dear Hiring Manager,"
    pub salutation: String,
    /// Body paragraphs in order
    pub body: Vec<String>,
    /// Closing and signature; one paragraph per line
    pub signature: String,
}

impl CoverLetter {
    /// Create a letter from its three required parts.
    pub fn new<I, S>(salutation: impl Into<String>, body: I, signature: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            salutation: salutation.into(),
            body: body.into_iter().map(Into::into).collect(),
            signature: signature.into(),
            ..Default::default()
        }
    }

    /// Add sender lines (name, title).
    pub fn with_sender<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sender = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Add sender contact fields.
    pub fn with_contact<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.contact = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the letter date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Formatted date line, if a date is set.
    pub fn date_line(&self) -> Option<String> {
        self.date.map(|d| d.format(LETTER_DATE_FORMAT).to_string())
    }

    /// Signature split into lines, blank lines dropped.
    pub fn signature_lines(&self) -> Vec<&str> {
        self.signature
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect()
    }

    /// Split free text into a letter.
    ///
    /// Non-blank lines become paragraphs. A first line starting with "Dear"
    /// is taken as the salutation, and a trailing closing ("Sincerely,",
    /// "Best regards,", ...) plus everything after it as the signature.
    pub fn from_text(text: &str, default_signature: &str) -> Result<Self> {
        let mut lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if lines.is_empty() {
            return Err(Error::InvalidContent("letter text is empty".to_string()));
        }

        let salutation = if lines[0].to_ascii_lowercase().starts_with("dear") {
            lines.remove(0).to_string()
        } else {
            String::new()
        };

        let closing = lines.iter().rposition(|l| is_closing(l));
        let signature = match closing {
            Some(at) => lines.split_off(at).join("\n"),
            None => default_signature.to_string(),
        };

        Ok(Self {
            salutation,
            body: lines.into_iter().map(str::to_string).collect(),
            signature,
            ..Default::default()
        })
    }

    /// Lay the letter out as a single-section content model.
    ///
    /// Empty paragraphs separate the sender block, the date and the
    /// signature from the body.
    pub fn to_content_model(&self) -> ContentModel {
        let mut section = Section::new("Letter");

        for line in self.sender.iter().filter(|l| !l.trim().is_empty()) {
            section.push(Block::paragraph(line.as_str()));
        }
        if self.contact.iter().any(|f| !f.trim().is_empty()) {
            section.push(Block::contact(self.contact.iter().map(String::as_str)));
        }
        if !section.is_empty() {
            section.push(Block::paragraph(""));
        }

        if let Some(date) = self.date_line() {
            section.push(Block::paragraph(date));
            section.push(Block::paragraph(""));
        }
        if !self.salutation.trim().is_empty() {
            section.push(Block::paragraph(self.salutation.as_str()));
        }
        for paragraph in self.body.iter().filter(|p| !p.trim().is_empty()) {
            section.push(Block::paragraph(paragraph.as_str()));
        }

        let signature = self.signature_lines();
        if !signature.is_empty() {
            section.push(Block::paragraph(""));
            for line in signature {
                section.push(Block::paragraph(line));
            }
        }

        ContentModel::new().with_section(section)
    }

    /// Check structural shape: a letter needs a body.
    pub fn validate(&self) -> Result<()> {
        if self.body.iter().all(|p| p.trim().is_empty()) {
            return Err(Error::InvalidContent(
                "cover letter has no body paragraphs".to_string(),
            ));
        }
        Ok(())
    }
}

fn is_closing(line: &str) -> bool {
    const CLOSINGS: [&str; 7] = [
        "sincerely",
        "best regards",
        "kind regards",
        "regards",
        "yours sincerely",
        "yours faithfully",
        "with gratitude",
    ];
    let lower = line.trim_end_matches(',').trim().to_ascii_lowercase();
    CLOSINGS.contains(&lower.as_str())
}
