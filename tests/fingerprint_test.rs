//! Integration tests for template fingerprinting.

mod common;

use common::{cv_template, DocxBuilder};
use cvforge::style::{Marker, ParagraphRole, RuleSource};
use cvforge::{fingerprint, render, Error, FingerprintOptions, FontSpec, JsonFormat, Template};

fn run(font: &str, size: u32, bold: bool, text: &str) -> String {
    format!(
        r#"<w:r><w:rPr><w:rFonts w:ascii="{font}" w:hAnsi="{font}"/>{}<w:sz w:val="{size}"/></w:rPr><w:t>{text}</w:t></w:r>"#,
        if bold { "<w:b/>" } else { "" }
    )
}

fn heading1_with(font: &str, size: u32, text: &str) -> String {
    format!(
        r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr>{}</w:p>"#,
        run(font, size, true, text)
    )
}

#[test]
fn test_fingerprint_is_deterministic() {
    let bytes = cv_template().build();
    let first = fingerprint(&bytes).unwrap();
    let second = fingerprint(&bytes).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        render::to_json(&first, JsonFormat::Compact).unwrap(),
        render::to_json(&second, JsonFormat::Compact).unwrap()
    );
}

#[test]
fn test_observed_heading_rule() {
    let profile = fingerprint(&cv_template().build()).unwrap();
    let h1 = profile.heading_rule(1);
    assert_eq!(h1.font, FontSpec::new("Calibri", 28).with_bold(true));
    assert_eq!(h1.style_id.as_deref(), Some("Heading1"));
    assert_eq!(h1.source, RuleSource::Observed { count: 1 });
    assert_eq!(h1.spacing.before, 240);
    assert_eq!(h1.spacing.after, 80);
}

#[test]
fn test_body_and_theme_fonts() {
    let profile = fingerprint(&cv_template().build()).unwrap();
    // docDefaults point at the minor theme font
    assert_eq!(profile.body_font(), &FontSpec::new("Garamond", 22));
    assert_eq!(profile.paragraph_spacing().after, 120);
    assert_eq!(profile.paragraph_spacing().line, 264);

    let title = profile.title().unwrap();
    assert_eq!(title.font, FontSpec::new("Calibri Light", 48));
    assert_eq!(title.style_id.as_deref(), Some("Title"));

    // The contact line before the first heading
    assert_eq!(profile.emphasis_font(), Some(&FontSpec::new("Garamond", 22)));
}

#[test]
fn test_bullet_rule_from_numbering() {
    let profile = fingerprint(&cv_template().build()).unwrap();
    let rule = profile.bullet_rule();
    assert_eq!(
        rule.marker,
        Marker::Numbering {
            num_id: 1,
            glyph: "-".to_string()
        }
    );
    assert_eq!(rule.indent, 360);
    assert_eq!(rule.hanging, 360);
    assert_eq!(rule.style_id.as_deref(), Some("ListBullet"));
    assert_eq!(rule.spacing.after, 40);
    assert!(rule.font.is_none());
}

#[test]
fn test_missing_level_scales_down() {
    let profile = fingerprint(&cv_template().build()).unwrap();
    let h2 = profile.heading_rule(2);
    // 14pt -> 12pt, same family and weight
    assert_eq!(h2.font, FontSpec::new("Calibri", 24).with_bold(true));
    assert_eq!(
        h2.source,
        RuleSource::Scaled {
            from_level: 1,
            steps: -1
        }
    );
    // No Heading2 style in the template
    assert_eq!(h2.style_id, None);
    assert_eq!(profile.heading_rule(3).font.size, 22);
}

#[test]
fn test_majority_vote_with_first_seen_tie_break() {
    let tied = DocxBuilder::new()
        .raw(heading1_with("Georgia", 32, "Experience"))
        .raw(heading1_with("Arial", 28, "Education"))
        .build();
    let profile = fingerprint(&tied).unwrap();
    assert_eq!(profile.heading_rule(1).font.family, "Georgia");

    let majority = DocxBuilder::new()
        .raw(heading1_with("Georgia", 32, "Experience"))
        .raw(heading1_with("Arial", 28, "Education"))
        .raw(heading1_with("Arial", 28, "Skills"))
        .build();
    let profile = fingerprint(&majority).unwrap();
    assert_eq!(
        profile.heading_rule(1).font,
        FontSpec::new("Arial", 28).with_bold(true)
    );
    assert_eq!(profile.heading_rule(1).source, RuleSource::Observed { count: 2 });
}

#[test]
fn test_no_headings_falls_back_to_body_family() {
    let bytes = DocxBuilder::new()
        .body("Plain text only")
        .body("Nothing that looks like a section")
        .build();
    let profile = fingerprint(&bytes).unwrap();
    let h1 = profile.heading_rule(1);
    assert_eq!(h1.font, FontSpec::new("Garamond", 28).with_bold(true));
    assert_eq!(h1.source, RuleSource::Default);
    // Word still sees heading semantics
    assert_eq!(h1.style_id.as_deref(), Some("Heading1"));
    // Default bullet rule
    let bullet = profile.bullet_rule();
    assert_eq!(bullet.marker.glyph(), "-");
    assert_eq!(bullet.indent, 360);
    assert_eq!(bullet.source, RuleSource::Default);
}

#[test]
fn test_inferred_headings() {
    let bytes = DocxBuilder::new()
        .without_styles()
        .body("Jane Doe")
        .raw(format!("<w:p>{}</w:p>", run("Arial", 26, true, "EXPERIENCE")))
        .body("Built the billing platform over several years")
        .build();

    let template = Template::from_bytes(&bytes).unwrap();
    assert_eq!(template.profile().stats().inferred_headings, 1);
    assert_eq!(
        template.profile().heading_rule(1).font,
        FontSpec::new("Arial", 26).with_bold(true)
    );
    let roles: Vec<ParagraphRole> = template.paragraphs().iter().map(|p| p.role).collect();
    assert_eq!(roles[1], ParagraphRole::Heading(1));
    assert!(template.paragraphs()[1].inferred);

    let options = FingerprintOptions::new().with_infer_headings(false);
    let plain = Template::from_bytes_with_options(&bytes, &options).unwrap();
    assert_eq!(plain.profile().stats().headings, 0);
}

#[test]
fn test_literal_bullets() {
    let bytes = DocxBuilder::new()
        .without_numbering()
        .heading1("Skills")
        .body("• Rust")
        .body("• Distributed systems")
        .build();
    let profile = fingerprint(&bytes).unwrap();
    let rule = profile.bullet_rule();
    assert_eq!(
        rule.marker,
        Marker::Literal {
            glyph: "•".to_string()
        }
    );
    // Typed bullets carry no indent; the default applies
    assert_eq!(rule.indent, 360);
    assert_eq!(profile.stats().list_items, 2);
}

#[test]
fn test_missing_and_broken_parts_fall_back() {
    let bytes = DocxBuilder::new().without_styles().body("Hello").build();
    let profile = fingerprint(&bytes).unwrap();
    assert_eq!(profile.body_font(), &FontSpec::new("Calibri", 22));

    let broken = DocxBuilder::new()
        .with_styles(r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:style></w:styles>"#)
        .body("Hello")
        .build();
    let profile = fingerprint(&broken).unwrap();
    // Without styles the theme reference in docDefaults is lost too
    assert_eq!(profile.body_font().family, "Calibri");
    assert_eq!(profile.heading_rule(1).style_id, None);
}

#[test]
fn test_unreadable_templates() {
    assert!(matches!(
        fingerprint(b"plain text, not a package"),
        Err(Error::UnreadableTemplate(_))
    ));

    // A zip without a main document part
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    writer
        .start_file("hello.txt", zip::write::SimpleFileOptions::default())
        .unwrap();
    std::io::Write::write_all(&mut writer, b"hi").unwrap();
    let bytes = writer.finish().unwrap().into_inner();
    assert!(matches!(fingerprint(&bytes), Err(Error::UnreadableTemplate(_))));
}

#[test]
fn test_template_summary() {
    let bytes = cv_template()
        .picture()
        .table("Cell text")
        .header("Jane Template CV")
        .build();
    let summary = Template::from_bytes(&bytes).unwrap().summary();
    assert_eq!(summary.tables, 1);
    assert_eq!(summary.graphics, 1);
    assert_eq!(summary.sections, 1);
    // Five text paragraphs, the picture and the table
    assert_eq!(summary.replaceable, 6);
    // Picture and sectPr
    assert_eq!(summary.preserved, 2);
    assert_eq!(summary.headers_with_text, vec!["word/header1.xml".to_string()]);
    assert_eq!(summary.text_paragraphs, 6);
}

#[test]
fn test_text_report() {
    let profile = fingerprint(&cv_template().build()).unwrap();
    let report = render::to_text(&profile);
    assert!(report.contains("Calibri 14pt bold"));
    assert!(report.contains("numbering 1 '-'"));
    assert!(report.contains("scaled -1 from heading1"));
}
