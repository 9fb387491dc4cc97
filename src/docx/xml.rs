//! Small helpers over quick-xml events.

use quick_xml::events::BytesStart;

/// Get an attribute value by local name, ignoring the namespace prefix.
pub fn attr(e: &BytesStart<'_>, local: &[u8]) -> Option<String> {
    e.attributes().flatten().find_map(|a| {
        if a.key.local_name().as_ref() == local {
            a.unescape_value().ok().map(|v| v.into_owned())
        } else {
            None
        }
    })
}

/// Get the `val` attribute.
pub fn val(e: &BytesStart<'_>) -> Option<String> {
    attr(e, b"val")
}

/// Get a numeric attribute. Negative or malformed values yield `None`.
pub fn attr_u32(e: &BytesStart<'_>, local: &[u8]) -> Option<u32> {
    attr(e, local).and_then(|v| v.trim().parse::<u32>().ok())
}

/// Read a toggle property such as `<w:b/>` or `<w:i w:val="0"/>`.
///
/// A missing `val` means on.
pub fn toggle(e: &BytesStart<'_>) -> bool {
    match val(e) {
        None => true,
        Some(v) => !matches!(v.as_str(), "0" | "false" | "off" | "none"),
    }
}

/// Characters allowed in XML 1.0 character data.
pub fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\u{9}' | '\u{A}' | '\u{D}'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// Escape text for element content or attribute values.
pub fn escape(text: &str) -> std::borrow::Cow<'_, str> {
    quick_xml::escape::escape(text)
}

/// Map a quick-xml error into a readable message with the byte position.
pub fn describe_error<E: std::fmt::Display, P: std::fmt::Display>(err: E, position: P) -> String {
    format!("{} at byte {}", err, position)
}
