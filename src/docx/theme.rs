//! Theme fonts (`word/theme/theme1.xml`).

use quick_xml::events::Event;
use quick_xml::Reader;

use super::props::{FontRef, ThemeFont};
use super::xml::{attr, describe_error};
use crate::error::{Error, Result};

/// Latin typefaces of the theme's font scheme.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeFonts {
    /// Heading typeface
    pub major: Option<String>,
    /// Body typeface
    pub minor: Option<String>,
}

impl ThemeFonts {
    /// Parse a theme part.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        let mut fonts = ThemeFonts::default();
        let mut slot: Option<ThemeFont> = None;

        loop {
            let event = reader.read_event().map_err(|e| {
                Error::UnreadableTemplate(format!(
                    "theme part: {}",
                    describe_error(e, reader.buffer_position())
                ))
            })?;
            match event {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"majorFont" => slot = Some(ThemeFont::Major),
                    b"minorFont" => slot = Some(ThemeFont::Minor),
                    b"latin" => fonts.record(slot, attr(&e, b"typeface")),
                    _ => {}
                },
                Event::Empty(e) if e.local_name().as_ref() == b"latin" => {
                    fonts.record(slot, attr(&e, b"typeface"));
                }
                Event::End(e) => {
                    if matches!(e.local_name().as_ref(), b"majorFont" | b"minorFont") {
                        slot = None;
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(fonts)
    }

    fn record(&mut self, slot: Option<ThemeFont>, typeface: Option<String>) {
        let typeface = typeface.filter(|t| !t.is_empty());
        match slot {
            Some(ThemeFont::Major) if self.major.is_none() => self.major = typeface,
            Some(ThemeFont::Minor) if self.minor.is_none() => self.minor = typeface,
            _ => {}
        }
    }

    /// Resolve a run's font reference to a family name.
    pub fn family(&self, font: &FontRef) -> Option<String> {
        match font {
            FontRef::Named(name) => Some(name.clone()),
            FontRef::Theme(ThemeFont::Major) => self.major.clone(),
            FontRef::Theme(ThemeFont::Minor) => self.minor.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THEME: &str = r#"<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme">
  <a:themeElements>
    <a:fontScheme name="Office">
      <a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/></a:majorFont>
      <a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/></a:minorFont>
    </a:fontScheme>
  </a:themeElements>
</a:theme>"#;

    #[test]
    fn test_parse_theme_fonts() {
        let fonts = ThemeFonts::parse(THEME.as_bytes()).unwrap();
        assert_eq!(fonts.major.as_deref(), Some("Calibri Light"));
        assert_eq!(fonts.minor.as_deref(), Some("Calibri"));
    }

    #[test]
    fn test_resolve_font_reference() {
        let fonts = ThemeFonts::parse(THEME.as_bytes()).unwrap();
        assert_eq!(
            fonts.family(&FontRef::Theme(ThemeFont::Major)).as_deref(),
            Some("Calibri Light")
        );
        assert_eq!(
            fonts.family(&FontRef::Named("Georgia".into())).as_deref(),
            Some("Georgia")
        );
        assert_eq!(
            ThemeFonts::default().family(&FontRef::Theme(ThemeFont::Minor)),
            None
        );
    }
}
