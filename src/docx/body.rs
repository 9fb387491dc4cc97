//! Body scanning and splicing for the main document part.
//!
//! The scanner records the byte range of every direct child of `w:body`, so
//! that assembly can cut flowing content out of the original bytes and keep
//! everything else verbatim.

use std::ops::Range;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::props::{ParaProps, RunProps};
use super::xml::describe_error;
use crate::error::{Error, Result};

/// Kind of a direct child of `w:body`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildKind {
    /// `w:p`
    Paragraph,
    /// `w:tbl`
    Table,
    /// Body-level `w:sectPr`
    SectionProperties,
    /// Anything else (`w:sdt`, bookmarks, custom XML)
    Other,
}

/// A direct child of `w:body` with its byte range in the part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyChild {
    pub kind: ChildKind,
    pub range: Range<usize>,
    /// Contains a drawing, VML picture or embedded object
    pub has_graphics: bool,
    /// Paragraph carries a section break (`pPr/sectPr`)
    pub has_section_break: bool,
}

impl BodyChild {
    /// Whether assembly replaces this element with new content.
    ///
    /// Text paragraphs and tables are flowing content. Graphics and section
    /// breaks stay where they are.
    pub fn is_flowing(&self) -> bool {
        matches!(self.kind, ChildKind::Paragraph | ChildKind::Table)
            && !self.has_graphics
            && !self.has_section_break
    }
}

/// Layout of `w:body` inside the main document part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyLayout {
    /// Namespace prefix bound to WordprocessingML on the body element
    pub prefix: String,
    /// First byte after the `<w:body>` start tag
    pub content_start: usize,
    /// First byte of the `</w:body>` end tag
    pub content_end: usize,
    /// Direct children in document order
    pub children: Vec<BodyChild>,
}

impl BodyLayout {
    /// Number of children assembly will replace.
    pub fn flowing_count(&self) -> usize {
        self.children.iter().filter(|c| c.is_flowing()).count()
    }

    /// Number of children assembly keeps verbatim.
    pub fn preserved_count(&self) -> usize {
        self.children.len() - self.flowing_count()
    }

    /// Count children of one kind.
    pub fn count(&self, kind: ChildKind) -> usize {
        self.children.iter().filter(|c| c.kind == kind).count()
    }
}

/// A paragraph found in the template, with its direct formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateParagraph {
    /// Position among all scanned paragraphs
    pub index: usize,
    /// Direct paragraph properties
    pub props: ParaProps,
    /// Paragraph mark run properties (`pPr/rPr`)
    pub mark: RunProps,
    /// Direct properties of each run that carries text
    pub runs: Vec<RunProps>,
    /// Visible text
    pub text: String,
    /// Inside a table cell
    pub in_table: bool,
}

impl TemplateParagraph {
    /// Whether the paragraph has any non-whitespace text.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

#[derive(Default)]
struct ParagraphBuilder {
    depth: usize,
    paragraph: TemplateParagraph,
    run: Option<(RunProps, bool)>,
}

struct ChildBuilder {
    kind: ChildKind,
    start: usize,
    has_graphics: bool,
    has_section_break: bool,
}

/// Scan a main document part.
pub fn scan(xml: &[u8]) -> Result<(BodyLayout, Vec<TemplateParagraph>)> {
    let mut reader = Reader::from_reader(xml);
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut layout = BodyLayout::default();
    let mut body_depth: Option<usize> = None;
    let mut body_closed = false;
    let mut child: Option<ChildBuilder> = None;
    let mut stack: Vec<ParagraphBuilder> = Vec::new();
    let mut paragraphs = Vec::new();

    loop {
        let before = reader.buffer_position() as usize;
        let event = reader.read_event().map_err(|e| {
            Error::UnreadableTemplate(format!(
                "document part: {}",
                describe_error(e, reader.buffer_position())
            ))
        })?;
        let after = reader.buffer_position() as usize;

        match event {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                if name == b"body" && body_depth.is_none() && path.len() == 1 {
                    layout.prefix = prefix_of(&e);
                    layout.content_start = after;
                    body_depth = Some(path.len() + 1);
                } else if Some(path.len()) == body_depth {
                    child = Some(ChildBuilder::new(&name, before));
                }
                observe(&e, &name, &path, child.as_mut(), &mut stack);
                if name == b"p" {
                    stack.push(ParagraphBuilder {
                        depth: path.len() + 1,
                        paragraph: TemplateParagraph {
                            in_table: path.iter().any(|p| p == b"tbl"),
                            ..Default::default()
                        },
                        run: None,
                    });
                } else if name == b"r" {
                    if let Some(top) = stack.last_mut() {
                        top.run = Some((RunProps::default(), false));
                    }
                }
                path.push(name);
            }
            Event::Empty(e) => {
                let name = e.local_name().as_ref().to_vec();
                if Some(path.len()) == body_depth {
                    let mut builder = ChildBuilder::new(&name, before);
                    observe(&e, &name, &path, Some(&mut builder), &mut stack);
                    layout.children.push(builder.finish(after));
                } else {
                    observe(&e, &name, &path, child.as_mut(), &mut stack);
                }
                if matches!(name.as_slice(), b"tab" | b"br" | b"cr") && in_run(&path) {
                    if let Some(top) = stack.last_mut() {
                        top.paragraph.text.push(if name == b"tab" { '\t' } else { '\n' });
                    }
                }
            }
            Event::Text(t) => {
                if path.last().is_some_and(|p| p == b"t") && in_run(&path) {
                    if let Some(top) = stack.last_mut() {
                        let text = t.unescape().map_err(|e| {
                            Error::UnreadableTemplate(format!(
                                "document part: {}",
                                describe_error(e, before)
                            ))
                        })?;
                        top.paragraph.text.push_str(&text);
                        if let Some((_, has_text)) = top.run.as_mut() {
                            *has_text = true;
                        }
                    }
                }
            }
            Event::End(e) => {
                let name = e.local_name().as_ref().to_vec();
                path.pop();
                if name == b"body" && Some(path.len() + 1) == body_depth {
                    layout.content_end = before;
                    body_closed = true;
                } else if Some(path.len()) == body_depth {
                    if let Some(builder) = child.take() {
                        layout.children.push(builder.finish(after));
                    }
                }
                if name == b"r" {
                    if let Some(top) = stack.last_mut() {
                        if let Some((props, true)) = top.run.take() {
                            top.paragraph.runs.push(props);
                        }
                    }
                } else if name == b"p" && stack.last().is_some_and(|t| t.depth == path.len() + 1) {
                    if let Some(mut done) = stack.pop() {
                        done.paragraph.index = paragraphs.len();
                        paragraphs.push(done.paragraph);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if body_depth.is_none() || !body_closed {
        return Err(Error::UnreadableTemplate(
            "document part has no body element".to_string(),
        ));
    }
    if layout.prefix.is_empty() {
        log::debug!("body element uses the default namespace");
    }
    Ok((layout, paragraphs))
}

impl ChildBuilder {
    fn new(name: &[u8], start: usize) -> Self {
        let kind = match name {
            b"p" => ChildKind::Paragraph,
            b"tbl" => ChildKind::Table,
            b"sectPr" => ChildKind::SectionProperties,
            _ => ChildKind::Other,
        };
        Self {
            kind,
            start,
            has_graphics: false,
            has_section_break: false,
        }
    }

    fn finish(self, end: usize) -> BodyChild {
        BodyChild {
            kind: self.kind,
            range: self.start..end,
            has_graphics: self.has_graphics,
            has_section_break: self.has_section_break,
        }
    }
}

fn prefix_of(e: &BytesStart<'_>) -> String {
    e.name()
        .prefix()
        .map(|p| String::from_utf8_lossy(p.as_ref()).into_owned())
        .unwrap_or_default()
}

fn in_run(path: &[Vec<u8>]) -> bool {
    path.iter().rev().any(|p| p == b"r")
}

/// Record facts about an element opening inside the body.
fn observe(
    e: &BytesStart<'_>,
    name: &[u8],
    path: &[Vec<u8>],
    child: Option<&mut ChildBuilder>,
    stack: &mut [ParagraphBuilder],
) {
    let in_ppr = path.iter().any(|p| p == b"pPr");
    let tracked_change = path
        .iter()
        .any(|p| p == b"pPrChange" || p == b"rPrChange");

    if let Some(child) = child {
        match name {
            b"drawing" | b"pict" | b"object" => child.has_graphics = true,
            b"sectPr" if in_ppr => child.has_section_break = true,
            _ => {}
        }
    }

    if tracked_change {
        return;
    }
    let Some(top) = stack.last_mut() else {
        return;
    };
    let parent = path.last().map(Vec::as_slice);
    let grandparent = path.len().checked_sub(2).map(|i| path[i].as_slice());
    match (grandparent, parent) {
        (Some(b"r"), Some(b"rPr")) => {
            if let Some((props, _)) = top.run.as_mut() {
                props.apply(e);
            }
        }
        (Some(b"pPr"), Some(b"rPr")) => top.paragraph.mark.apply(e),
        (_, Some(b"pPr")) | (Some(b"pPr"), Some(b"numPr")) => top.paragraph.props.apply(e),
        _ => {}
    }
}

/// Replace flowing body content with `content`, keeping every other child verbatim.
///
/// New content lands where the first flowing child stood; when there is
/// none it goes before the body-level `sectPr` (or at the end of the body).
pub fn splice(xml: &[u8], layout: &BodyLayout, content: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(xml.len() + content.len());
    out.extend_from_slice(&xml[..layout.content_start]);

    let insert_at = layout
        .children
        .iter()
        .position(BodyChild::is_flowing)
        .or_else(|| {
            layout
                .children
                .iter()
                .position(|c| c.kind == ChildKind::SectionProperties)
        });

    let mut inserted = false;
    let mut cursor = layout.content_start;
    for (i, child) in layout.children.iter().enumerate() {
        if insert_at == Some(i) && !inserted {
            out.extend_from_slice(content.as_bytes());
            inserted = true;
        }
        if child.is_flowing() {
            cursor = child.range.end;
            continue;
        }
        // Keep the whitespace that preceded a preserved element
        out.extend_from_slice(&xml[cursor..child.range.end]);
        cursor = child.range.end;
    }
    if !inserted {
        out.extend_from_slice(content.as_bytes());
    }
    out.extend_from_slice(&xml[cursor..layout.content_end]);
    out.extend_from_slice(&xml[layout.content_end..]);
    out
}

/// Whether a header or footer part carries visible text.
pub fn story_has_text(xml: &[u8]) -> bool {
    let mut reader = Reader::from_reader(xml);
    let mut in_text = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => in_text = e.local_name().as_ref() == b"t",
            Ok(Event::End(_)) => in_text = false,
            Ok(Event::Text(t)) if in_text => {
                if t.unescape().is_ok_and(|s| !s.trim().is_empty()) {
                    return true;
                }
            }
            Ok(Event::Eof) | Err(_) => return false,
            _ => {}
        }
    }
}

/// Empty a header or footer part, leaving the single paragraph Word requires.
pub fn clear_story(xml: &[u8]) -> Result<Vec<u8>> {
    let mut reader = Reader::from_reader(xml);
    let mut depth = 0usize;
    let mut root: Option<(String, usize)> = None;
    let mut root_end: Option<usize> = None;

    loop {
        let before = reader.buffer_position() as usize;
        let event = reader.read_event().map_err(|e| {
            Error::UnreadableTemplate(format!(
                "header part: {}",
                describe_error(e, reader.buffer_position())
            ))
        })?;
        match event {
            Event::Start(e) => {
                if depth == 0 {
                    root = Some((prefix_of(&e), reader.buffer_position() as usize));
                }
                depth += 1;
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    root_end = Some(before);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let (Some((prefix, start)), Some(end)) = (root, root_end) else {
        // Self-closing or empty root: nothing to clear
        return Ok(xml.to_vec());
    };
    let paragraph = if prefix.is_empty() {
        "<p/>".to_string()
    } else {
        format!("<{}:p/>", prefix)
    };
    let mut out = Vec::with_capacity(start + paragraph.len() + xml.len() - end);
    out.extend_from_slice(&xml[..start]);
    out.extend_from_slice(paragraph.as_bytes());
    out.extend_from_slice(&xml[end..]);
    Ok(out)
}
