//! Integration tests for cover letter assembly.

mod common;

use chrono::NaiveDate;
use common::{cv_template, read_text};
use cvforge::style::ParagraphRole;
use cvforge::{assemble_letter, CoverLetter, CoverLetterAssembler, CvForge, Error, FontSpec, Template};

fn template_with_header() -> Vec<u8> {
    cv_template().header("Jane Template CV").build()
}

#[test]
fn test_letter_scenario() {
    let output = assemble_letter(
        &cv_template().build(),
        "Dear Team,",
        &["P1", "P2"],
        "Sincerely,\nJane",
    )
    .unwrap();

    let reread = Template::from_bytes(&output).unwrap();
    let texts: Vec<&str> = reread.paragraphs().iter().map(|p| p.text.as_str()).collect();
    assert_eq!(texts, vec!["Dear Team,", "P1", "P2", "Sincerely,", "Jane"]);

    for paragraph in reread.paragraphs() {
        assert_eq!(paragraph.role, ParagraphRole::Body, "{}", paragraph.text);
        assert_eq!(paragraph.font, FontSpec::new("Garamond", 22));
    }

    // The template's CV content is gone
    let xml = read_text(&output, "word/document.xml");
    assert!(!xml.contains("Did something notable"));
    assert!(!xml.contains("numId"));
}

#[test]
fn test_letter_clears_headers_by_default() {
    let template = template_with_header();
    let output = assemble_letter(&template, "Dear Team,", &["Body."], "Jane").unwrap();
    let header = read_text(&output, "word/header1.xml");
    assert!(!header.contains("Jane Template CV"));

    let forge = CvForge::new()
        .with_letter_headers_cleared(false)
        .open_bytes(&template)
        .unwrap();
    let result = forge
        .assemble_letter(&CoverLetter::new("Dear Team,", ["Body."], "Jane"))
        .unwrap();
    assert_eq!(result.stats.cleared_story_count, 0);
    assert!(read_text(&result.bytes, "word/header1.xml").contains("Jane Template CV"));

    // CV assembly from the same builder keeps headers
    let cv = forge
        .assemble(&cvforge::ContentModel::new().with_section(
            cvforge::Section::new("x").with_block(cvforge::Block::paragraph("Body")),
        ))
        .unwrap();
    assert_eq!(cv.stats.cleared_story_count, 0);
}

#[test]
fn test_sender_contact_and_date() {
    let letter = CoverLetter::new("Dear Team,", ["First.", "Second."], "Sincerely,\nJane Doe")
        .with_sender(["Jane Doe"])
        .with_contact(["jane@example.com", "555-0100"])
        .with_date(NaiveDate::from_ymd_opt(2026, 3, 4).unwrap());

    let template = Template::from_bytes(&cv_template().build()).unwrap();
    let result = CoverLetterAssembler::new(&template).assemble(&letter).unwrap();

    let reread = Template::from_bytes(&result.bytes).unwrap();
    let texts: Vec<&str> = reread.paragraphs().iter().map(|p| p.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "Jane Doe",
            "jane@example.com | 555-0100",
            "March 04, 2026",
            "Dear Team,",
            "First.",
            "Second.",
            "Sincerely,",
            "Jane Doe",
        ]
    );
    assert_eq!(result.stats.contact_count, 1);
    assert_eq!(result.stats.heading_count, 0);
    assert_eq!(result.stats.bullet_count, 0);
}

#[test]
fn test_letter_without_body_is_rejected() {
    let empty: [&str; 0] = [];
    let result = assemble_letter(&cv_template().build(), "Dear Team,", &empty, "Jane");
    assert!(matches!(result, Err(Error::InvalidContent(_))));

    let blank = assemble_letter(&cv_template().build(), "Dear Team,", &["  "], "Jane");
    assert!(matches!(blank, Err(Error::InvalidContent(_))));
}

#[test]
fn test_letter_font_override() {
    let forge = CvForge::new()
        .with_suggestion("font", "Georgia")
        .open_bytes(&cv_template().build())
        .unwrap();
    let result = forge
        .assemble_letter(&CoverLetter::new("Dear Team,", ["Body."], "Jane"))
        .unwrap();

    let reread = Template::from_bytes(&result.bytes).unwrap();
    for paragraph in reread.paragraphs() {
        assert_eq!(paragraph.font.family, "Georgia");
        assert_eq!(paragraph.font.size, 22);
    }
}

#[test]
fn test_letter_from_text() {
    let letter = CoverLetter::from_text(
        "Dear Hiring Manager,\n\nI am writing to apply.\n\nThank you.\n\nBest regards,\nJane",
        "Sincerely,",
    )
    .unwrap();
    let output = CvForge::new()
        .open_bytes(&cv_template().build())
        .unwrap()
        .assemble_letter(&letter)
        .unwrap();

    let reread = Template::from_bytes(&output.bytes).unwrap();
    let texts: Vec<&str> = reread.paragraphs().iter().map(|p| p.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "Dear Hiring Manager,",
            "I am writing to apply.",
            "Thank you.",
            "Best regards,",
            "Jane",
        ]
    );
}
