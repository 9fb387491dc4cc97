//! Structured CV data and its layout as a content model.

use serde::{Deserialize, Serialize};

use super::block::Block;
use super::content::{ContentModel, Section};

/// A professional role with achievements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub dates: String,
    /// One-line role summary shown under the title
    #[serde(default)]
    pub summary: Option<String>,
    /// Achievements as (title, description)
    #[serde(default)]
    pub bullets: Vec<(String, String)>,
}

/// An early-career role, summarized without dates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarlierExperience {
    pub title: String,
    pub company: String,
    pub summary: String,
}

/// A complete CV as produced by content curation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvData {
    pub name: String,
    pub title: String,
    /// Contact details, fields separated by `|`
    pub contact_info: String,
    #[serde(default)]
    pub executive_summary: String,
    /// (category, skills)
    #[serde(default)]
    pub competencies: Vec<(String, String)>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub earlier_experience: Vec<EarlierExperience>,
    /// (title, description)
    #[serde(default)]
    pub projects: Vec<(String, String)>,
    #[serde(default)]
    pub education: Vec<String>,
    #[serde(default)]
    pub certifications: String,
    #[serde(default)]
    pub github_url: String,
}

impl CvData {
    /// Parse CV data from JSON.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Contact fields split out of `contact_info`.
    pub fn contact_fields(&self) -> Vec<String> {
        self.contact_info
            .split('|')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Lay the CV out as sections of blocks.
    ///
    /// Sections without content are left out.
    pub fn to_content_model(&self) -> ContentModel {
        self.to_content_model_with(true)
    }

    /// Lay the CV out, with or without the name, title and contact block.
    ///
    /// Templates whose page header already shows the name leave it out.
    pub fn to_content_model_with(&self, include_header: bool) -> ContentModel {
        let mut model = ContentModel::new();

        if include_header {
            let mut header = Section::new("Header").with_block(Block::heading(0, &self.name));
            if !self.title.trim().is_empty() {
                header.push(Block::paragraph("").with_lead(self.title.trim()));
            }
            let contact = self.contact_fields();
            if !contact.is_empty() {
                header.push(Block::contact(contact));
            }
            model.add_section(header);
        }

        if !self.executive_summary.trim().is_empty() {
            model.add_section(
                Section::new("Executive Summary")
                    .with_block(Block::heading(1, "EXECUTIVE SUMMARY"))
                    .with_block(Block::paragraph(self.executive_summary.trim())),
            );
        }

        if !self.competencies.is_empty() {
            let mut section =
                Section::new("Core Competencies").with_block(Block::heading(1, "CORE COMPETENCIES"));
            for (category, skills) in &self.competencies {
                section.push(Block::bullet(skills.trim()).with_lead(category.trim()));
            }
            model.add_section(section);
        }

        if !self.experience.is_empty() {
            let mut section = Section::new("Professional Experience")
                .with_block(Block::heading(1, "PROFESSIONAL EXPERIENCE"));
            for job in &self.experience {
                let place: Vec<&str> = [job.location.trim(), job.dates.trim()]
                    .into_iter()
                    .filter(|s| !s.is_empty())
                    .collect();
                section.push(
                    Block::paragraph(place.join(" | ")).with_lead(job.company.trim().to_uppercase()),
                );
                section.push(Block::heading(2, job.title.trim()));
                if let Some(summary) = job.summary.as_deref().filter(|s| !s.trim().is_empty()) {
                    section.push(Block::paragraph(summary.trim()));
                }
                for (title, description) in &job.bullets {
                    section.push(Block::bullet(description.trim()).with_lead(title.trim()));
                }
            }
            model.add_section(section);
        }

        if !self.earlier_experience.is_empty() {
            let mut section = Section::new("Earlier Career Experience")
                .with_block(Block::heading(1, "EARLIER CAREER EXPERIENCE"));
            for job in &self.earlier_experience {
                section.push(
                    Block::paragraph(job.summary.trim())
                        .with_lead(format!("{}, {}", job.title.trim(), job.company.trim())),
                );
            }
            model.add_section(section);
        }

        if !self.projects.is_empty() {
            let mut section = Section::new("Technical Projects")
                .with_block(Block::heading(1, "TECHNICAL PROJECTS & OPEN SOURCE"));
            if !self.github_url.trim().is_empty() {
                section.push(Block::paragraph(format!("Visible at: {}", self.github_url.trim())));
            }
            for (title, description) in &self.projects {
                section.push(Block::bullet(description.trim()).with_lead(title.trim()));
            }
            model.add_section(section);
        }

        if !self.education.is_empty() || !self.certifications.trim().is_empty() {
            let mut section = Section::new("Education")
                .with_block(Block::heading(1, "EDUCATION & CERTIFICATIONS"));
            for entry in &self.education {
                section.push(Block::paragraph(entry.trim()));
            }
            if !self.certifications.trim().is_empty() {
                section.push(
                    Block::paragraph(self.certifications.trim()).with_lead("Certifications:"),
                );
            }
            model.add_section(section);
        }

        model
    }
}

impl From<&CvData> for ContentModel {
    fn from(cv: &CvData) -> Self {
        cv.to_content_model()
    }
}
