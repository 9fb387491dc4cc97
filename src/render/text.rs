//! Plain text reports for style profiles and templates.

use std::fmt::Write;

use crate::assemble::TemplateSummary;
use crate::style::{BulletRule, HeadingRule, Marker, ParagraphInfo, ParagraphRole, ParagraphSpacing, StyleProfile};

/// Convert a profile to a human-readable report.
pub fn to_text(profile: &StyleProfile) -> String {
    let mut out = String::new();

    let stats = profile.stats();
    let _ = writeln!(
        out,
        "Paragraphs: {} ({} headings, {} list items, {} body)",
        stats.paragraphs, stats.headings, stats.list_items, stats.body
    );
    if stats.inferred_headings > 0 {
        let _ = writeln!(out, "Inferred headings: {}", stats.inferred_headings);
    }
    out.push('\n');

    let _ = writeln!(out, "Fonts");
    for (role, font) in profile.fonts() {
        let _ = writeln!(out, "  {:<10} {}", role.to_string(), font);
    }
    out.push('\n');

    let _ = writeln!(out, "Headings");
    if let Some(title) = profile.title() {
        heading_line(&mut out, "title", title);
    }
    for rule in profile.heading_rules() {
        heading_line(&mut out, &format!("heading{}", rule.level), rule);
    }
    out.push('\n');

    let _ = writeln!(out, "Bullets");
    bullet_lines(&mut out, profile.bullet_rule());
    out.push('\n');

    let _ = writeln!(out, "Body");
    let _ = writeln!(
        out,
        "  style      {}",
        profile.body_style_id().unwrap_or("(none)")
    );
    let _ = writeln!(out, "  spacing    {}", spacing_text(&profile.paragraph_spacing()));

    out.trim_end().to_string()
}

/// Structural overview of a template.
pub fn summary_text(summary: &TemplateSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Format:      {}", summary.format);
    let _ = writeln!(out, "Entries:     {}", summary.entries);
    let _ = writeln!(
        out,
        "Paragraphs:  {} ({} with text)",
        summary.paragraphs, summary.text_paragraphs
    );
    let _ = writeln!(out, "Tables:      {}", summary.tables);
    let _ = writeln!(out, "Sections:    {}", summary.sections);
    let _ = writeln!(out, "Graphics:    {}", summary.graphics);
    let _ = writeln!(
        out,
        "Body:        {} replaceable, {} kept",
        summary.replaceable, summary.preserved
    );
    let _ = writeln!(out, "Styles:      {}", summary.styles);
    if summary.headers_with_text.is_empty() {
        let _ = writeln!(out, "Headers:     no text");
    } else {
        let _ = writeln!(out, "Headers:     {}", summary.headers_with_text.join(", "));
    }
    out.trim_end().to_string()
}

/// One line per classified template paragraph.
pub fn paragraphs_text(paragraphs: &[ParagraphInfo]) -> String {
    let mut out = String::new();
    for info in paragraphs {
        let role = match info.role {
            ParagraphRole::Title => "title".to_string(),
            ParagraphRole::Heading(level) if info.inferred => format!("h{}*", level),
            ParagraphRole::Heading(level) => format!("h{}", level),
            ParagraphRole::ListItem => "list".to_string(),
            ParagraphRole::Body => "body".to_string(),
        };
        let _ = writeln!(
            out,
            "{:>4} {:<5} {:<28} {}",
            info.index,
            role,
            info.font.to_string(),
            preview(&info.text, 60)
        );
    }
    out.trim_end().to_string()
}

fn heading_line(out: &mut String, label: &str, rule: &HeadingRule) {
    let _ = writeln!(
        out,
        "  {:<10} {:<28} style={:<10} {}",
        label,
        rule.font.to_string(),
        rule.style_id.as_deref().unwrap_or("-"),
        rule.source
    );
}

fn bullet_lines(out: &mut String, rule: &BulletRule) {
    let marker = match &rule.marker {
        Marker::Literal { glyph } => format!("literal '{}'", glyph),
        Marker::Numbering { num_id, glyph } => format!("numbering {} '{}'", num_id, glyph),
    };
    let _ = writeln!(out, "  marker     {}", marker);
    let _ = writeln!(
        out,
        "  indent     {} twips, hanging {}",
        rule.indent, rule.hanging
    );
    if let Some(font) = &rule.font {
        let _ = writeln!(out, "  font       {}", font);
    }
    let _ = writeln!(out, "  style      {}", rule.style_id.as_deref().unwrap_or("(none)"));
    let _ = writeln!(out, "  spacing    {}", spacing_text(&rule.spacing));
    let _ = writeln!(out, "  source     {}", rule.source);
}

/// Spacing as "before/after line (rule)" in twips.
pub(crate) fn spacing_text(spacing: &ParagraphSpacing) -> String {
    format!(
        "{}/{} line {} ({})",
        spacing.before,
        spacing.after,
        spacing.line,
        spacing.line_rule.as_attr()
    )
}

fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", cut)
}
