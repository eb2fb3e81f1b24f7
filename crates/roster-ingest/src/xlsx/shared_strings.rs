//! Shared string table (`xl/sharedStrings.xml`).

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::Result;

use super::archive::SHARED_STRINGS_PART;
use super::xml::{decode_text, resolve_reference, xml_error};

/// Parses the shared string table.
///
/// Rich-text runs are concatenated; phonetic runs (`<rPh>`) are skipped.
pub(super) fn parse_shared_strings(xml: &str, name: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut strings = Vec::new();
    let mut current = String::new();
    let mut in_item = false;
    let mut in_text = false;
    let mut phonetic_depth = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"si" => {
                    in_item = true;
                    current.clear();
                }
                b"t" => in_text = true,
                b"rPh" => phonetic_depth += 1,
                _ => {}
            },
            Ok(Event::Empty(e)) if e.local_name().as_ref() == b"si" => {
                strings.push(String::new());
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"si" => {
                    in_item = false;
                    strings.push(std::mem::take(&mut current));
                }
                b"t" => in_text = false,
                b"rPh" => phonetic_depth = phonetic_depth.saturating_sub(1),
                _ => {}
            },
            Ok(Event::Text(text)) if in_item && in_text && phonetic_depth == 0 => {
                current.push_str(&decode_text(&text));
            }
            Ok(Event::CData(data)) if in_item && in_text && phonetic_depth == 0 => {
                current.push_str(&String::from_utf8_lossy(&data));
            }
            Ok(Event::GeneralRef(reference)) if in_item && in_text && phonetic_depth == 0 => {
                current.push_str(&resolve_reference(&reference));
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(xml_error(name, SHARED_STRINGS_PART, e)),
        }
    }

    Ok(strings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_and_rich_strings() {
        let xml = r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <si><t>name</t></si>
  <si><r><t>Asha </t></r><r><rPr><b/></rPr><t>Nair</t></r></si>
  <si><t>Tom &amp; Jerry</t></si>
  <si/>
  <si><t>漢字</t><rPh sb="0" eb="2"><t>カンジ</t></rPh></si>
</sst>"#;
        let strings = parse_shared_strings(xml, "book.xlsx").unwrap();
        assert_eq!(strings, vec!["name", "Asha Nair", "Tom & Jerry", "", "漢字"]);
    }

    #[test]
    fn test_preserves_inner_whitespace() {
        let xml = r#"<sst><si><t xml:space="preserve"> Kochi </t></si></sst>"#;
        let strings = parse_shared_strings(xml, "book.xlsx").unwrap();
        assert_eq!(strings, vec![" Kochi "]);
    }
}
