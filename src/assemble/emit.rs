//! WordprocessingML paragraph emission.

use std::fmt::Write;

use crate::docx::xml::escape;
use crate::style::{FontSpec, ResolvedMarker, ResolvedStyle};

const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Writes paragraphs using the namespace prefix of the template body.
#[derive(Debug, Clone)]
pub struct ParagraphEmitter {
    prefix: String,
    /// The body used a default namespace; declare our prefix per paragraph
    declare_ns: bool,
}

impl ParagraphEmitter {
    /// Create an emitter for a body whose elements use `body_prefix`.
    pub fn new(body_prefix: &str) -> Self {
        if body_prefix.is_empty() {
            Self {
                prefix: "w".to_string(),
                declare_ns: true,
            }
        } else {
            Self {
                prefix: body_prefix.to_string(),
                declare_ns: false,
            }
        }
    }

    /// One paragraph: optional bold lead-in, then `text`.
    ///
    /// `text` must already be prepared; `\n` becomes a line break and `\t`
    /// a tab.
    pub fn paragraph(&self, style: &ResolvedStyle, lead: Option<&str>, text: &str) -> String {
        let w = &self.prefix;
        let mut out = String::with_capacity(256 + text.len());
        self.open_paragraph(&mut out);
        self.paragraph_props(&mut out, style);

        if let ResolvedMarker::Literal(glyph) = &style.marker {
            let _ = write!(out, "<{w}:r>");
            self.run_props(&mut out, &style.font);
            let _ = write!(out, "<{w}:t>{}</{w}:t><{w}:tab/></{w}:r>", escape(glyph));
        }

        if let Some(lead) = lead.filter(|l| !l.is_empty()) {
            let bold = FontSpec {
                bold: true,
                ..style.font.clone()
            };
            let spaced = if text.is_empty() {
                lead.to_string()
            } else {
                format!("{} ", lead)
            };
            self.run(&mut out, &bold, &spaced);
        }

        if !text.is_empty() {
            self.run(&mut out, &style.font, text);
        }

        let _ = write!(out, "</{w}:p>");
        out
    }

    /// An empty paragraph in `style`, used as a spacer.
    pub fn spacer(&self, style: &ResolvedStyle) -> String {
        let mut out = String::with_capacity(128);
        self.open_paragraph(&mut out);
        self.paragraph_props(&mut out, style);
        let _ = write!(out, "</{}:p>", self.prefix);
        out
    }

    fn open_paragraph(&self, out: &mut String) {
        if self.declare_ns {
            let _ = write!(out, r#"<{0}:p xmlns:{0}="{1}">"#, self.prefix, WORDML_NS);
        } else {
            let _ = write!(out, "<{}:p>", self.prefix);
        }
    }

    fn paragraph_props(&self, out: &mut String, style: &ResolvedStyle) {
        let w = &self.prefix;
        let _ = write!(out, "<{w}:pPr>");
        if let Some(id) = &style.style_id {
            let _ = write!(out, r#"<{w}:pStyle {w}:val="{}"/>"#, escape(id));
        }
        if style.keep_with_next {
            let _ = write!(out, "<{w}:keepNext/>");
        }
        match &style.marker {
            ResolvedMarker::Numbering { num_id, ilvl } => {
                let _ = write!(
                    out,
                    r#"<{w}:numPr><{w}:ilvl {w}:val="{ilvl}"/><{w}:numId {w}:val="{num_id}"/></{w}:numPr>"#
                );
            }
            // A list style may carry numbering of its own; switch it off
            ResolvedMarker::Literal(_) if style.style_id.is_some() => {
                let _ = write!(out, r#"<{w}:numPr><{w}:numId {w}:val="0"/></{w}:numPr>"#);
            }
            _ => {}
        }
        let spacing = &style.spacing;
        let _ = write!(
            out,
            r#"<{w}:spacing {w}:before="{}" {w}:after="{}" {w}:line="{}" {w}:lineRule="{}"/>"#,
            spacing.before,
            spacing.after,
            spacing.line,
            spacing.line_rule.as_attr()
        );
        if style.indent.left > 0 || style.indent.hanging > 0 {
            let _ = write!(
                out,
                r#"<{w}:ind {w}:left="{}" {w}:hanging="{}"/>"#,
                style.indent.left, style.indent.hanging
            );
        }
        if let Some(level) = style.outline_level {
            let _ = write!(out, r#"<{w}:outlineLvl {w}:val="{level}"/>"#);
        }
        // Paragraph mark formatting
        self.run_props(out, &style.font);
        let _ = write!(out, "</{w}:pPr>");
    }

    fn run_props(&self, out: &mut String, font: &FontSpec) {
        let w = &self.prefix;
        let family = escape(&font.family);
        let _ = write!(
            out,
            r#"<{w}:rPr><{w}:rFonts {w}:ascii="{family}" {w}:hAnsi="{family}" {w}:cs="{family}"/>"#
        );
        if font.bold {
            let _ = write!(out, "<{w}:b/><{w}:bCs/>");
        } else {
            let _ = write!(out, r#"<{w}:b {w}:val="0"/><{w}:bCs {w}:val="0"/>"#);
        }
        if font.italic {
            let _ = write!(out, "<{w}:i/><{w}:iCs/>");
        } else {
            let _ = write!(out, r#"<{w}:i {w}:val="0"/><{w}:iCs {w}:val="0"/>"#);
        }
        let _ = write!(
            out,
            r#"<{w}:sz {w}:val="{0}"/><{w}:szCs {w}:val="{0}"/></{w}:rPr>"#,
            font.size
        );
    }

    fn run(&self, out: &mut String, font: &FontSpec, text: &str) {
        let w = &self.prefix;
        let _ = write!(out, "<{w}:r>");
        self.run_props(out, font);
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                let _ = write!(out, "<{w}:br/>");
            }
            for (j, piece) in line.split('\t').enumerate() {
                if j > 0 {
                    let _ = write!(out, "<{w}:tab/>");
                }
                if !piece.is_empty() {
                    let _ = write!(
                        out,
                        r#"<{w}:t xml:space="preserve">{}</{w}:t>"#,
                        escape(piece)
                    );
                }
            }
        }
        let _ = write!(out, "</{w}:r>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Indent, ParagraphSpacing, StyleRole};

    fn style(marker: ResolvedMarker) -> ResolvedStyle {
        ResolvedStyle {
            role: StyleRole::Bullet,
            style_id: Some("ListBullet".into()),
            font: FontSpec::new("Calibri", 22),
            spacing: ParagraphSpacing::default(),
            indent: Indent {
                left: 360,
                hanging: 360,
            },
            marker,
            keep_with_next: false,
            outline_level: None,
        }
    }

    #[test]
    fn test_literal_bullet() {
        let xml = ParagraphEmitter::new("w").paragraph(
            &style(ResolvedMarker::Literal("-".into())),
            Some("Rust:"),
            "8 years & counting",
        );
        assert!(xml.starts_with("<w:p><w:pPr><w:pStyle w:val=\"ListBullet\"/>"));
        assert!(xml.contains(r#"<w:numId w:val="0"/>"#));
        assert!(xml.contains(r#"<w:ind w:left="360" w:hanging="360"/>"#));
        assert!(xml.contains("<w:t>-</w:t><w:tab/>"));
        assert!(xml.contains(r#"<w:b/><w:bCs/>"#));
        assert!(xml.contains(">Rust: </w:t>"));
        assert!(xml.contains(">8 years &amp; counting</w:t>"));
        assert!(xml.ends_with("</w:p>"));
    }

    #[test]
    fn test_numbered_bullet() {
        let xml = ParagraphEmitter::new("w").paragraph(
            &style(ResolvedMarker::Numbering { num_id: 3, ilvl: 1 }),
            None,
            "Built X",
        );
        assert!(xml.contains(r#"<w:numPr><w:ilvl w:val="1"/><w:numId w:val="3"/></w:numPr>"#));
        assert!(!xml.contains("<w:tab/>"));
    }

    #[test]
    fn test_breaks_and_tabs() {
        let xml = ParagraphEmitter::new("w").paragraph(&style(ResolvedMarker::None), None, "a\tb\nc");
        assert!(xml.contains(
            r#"<w:t xml:space="preserve">a</w:t><w:tab/><w:t xml:space="preserve">b</w:t><w:br/><w:t xml:space="preserve">c</w:t>"#
        ));
    }

    #[test]
    fn test_default_namespace_body() {
        let xml = ParagraphEmitter::new("").spacer(&style(ResolvedMarker::None));
        assert!(xml.starts_with(&format!(r#"<w:p xmlns:w="{}">"#, WORDML_NS)));
        assert!(xml.ends_with("</w:pPr></w:p>"));
    }
}
