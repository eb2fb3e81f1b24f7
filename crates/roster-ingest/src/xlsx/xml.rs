//! Small helpers over `quick-xml` events used by the workbook parsers.

use std::fmt::Display;

use quick_xml::escape::unescape;
use quick_xml::events::BytesStart;

use crate::error::IngestError;

/// Returns the value of the attribute with the given local name.
///
/// Namespace prefixes are ignored, so `b"id"` matches `r:id`.
pub(super) fn attribute(element: &BytesStart<'_>, local_name: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == local_name)
        .map(|attr| decode_text(&attr.value))
}

/// Decodes raw XML text, resolving any entity references it contains.
pub(super) fn decode_text(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    match unescape(&text) {
        Ok(unescaped) => unescaped.into_owned(),
        Err(_) => text.into_owned(),
    }
}

/// Resolves the body of an `&...;` reference reported as its own event.
pub(super) fn resolve_reference(name: &[u8]) -> String {
    let name = String::from_utf8_lossy(name);
    let resolved = match name.as_ref() {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        other => other.strip_prefix('#').and_then(|code| {
            let number = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => code.parse::<u32>().ok(),
            };
            number.and_then(char::from_u32)
        }),
    };
    match resolved {
        Some(c) => c.to_string(),
        None => format!("&{name};"),
    }
}

pub(super) fn xml_error(name: &str, part: &str, error: impl Display) -> IngestError {
    IngestError::WorkbookXml {
        name: name.to_string(),
        part: part.to_string(),
        message: error.to_string(),
    }
}
