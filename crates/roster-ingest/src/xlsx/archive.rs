//! Workbook archive access: parts and first-sheet resolution.

use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::Event;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::{IngestError, Result};

use super::xml::{attribute, xml_error};

pub(super) const WORKBOOK_PART: &str = "xl/workbook.xml";
pub(super) const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
pub(super) const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";
const DEFAULT_SHEET_PART: &str = "xl/worksheets/sheet1.xml";

/// An opened `.xlsx` archive.
pub(super) struct WorkbookArchive<'a> {
    name: &'a str,
    archive: ZipArchive<Cursor<&'a [u8]>>,
}

impl<'a> WorkbookArchive<'a> {
    pub(super) fn open(bytes: &'a [u8], name: &'a str) -> Result<Self> {
        let archive =
            ZipArchive::new(Cursor::new(bytes)).map_err(|e| IngestError::WorkbookArchive {
                name: name.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self { name, archive })
    }

    /// Reads a part as text; `None` when the archive has no such entry.
    pub(super) fn read_part(&mut self, part: &str) -> Result<Option<String>> {
        let mut file = match self.archive.by_name(part) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => {
                return Err(IngestError::WorkbookArchive {
                    name: self.name.to_string(),
                    message: e.to_string(),
                });
            }
        };
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|e| IngestError::WorkbookArchive {
                name: self.name.to_string(),
                message: format!("failed to read {part}: {e}"),
            })?;
        Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
    }

    pub(super) fn require_part(&mut self, part: &str) -> Result<String> {
        self.read_part(part)?.ok_or_else(|| IngestError::MissingPart {
            name: self.name.to_string(),
            part: part.to_string(),
        })
    }

    /// Archive path of the first worksheet in workbook order.
    pub(super) fn first_sheet_part(&mut self) -> Result<String> {
        let workbook = self.require_part(WORKBOOK_PART)?;
        let Some(first_sheet) = first_sheet_relationship(&workbook, self.name)? else {
            return Err(IngestError::NoWorksheet {
                name: self.name.to_string(),
            });
        };
        let Some(rel_id) = first_sheet else {
            return Ok(DEFAULT_SHEET_PART.to_string());
        };
        let Some(rels) = self.read_part(WORKBOOK_RELS_PART)? else {
            return Ok(DEFAULT_SHEET_PART.to_string());
        };
        let target = relationship_target(&rels, &rel_id, self.name)?;
        Ok(target.map_or_else(|| DEFAULT_SHEET_PART.to_string(), |t| resolve_target(&t)))
    }
}

/// Finds the first `<sheet>` element.
///
/// Returns `None` when the workbook lists no sheets, and `Some(None)` when
/// the first sheet carries no relationship id.
fn first_sheet_relationship(xml: &str, name: &str) -> Result<Option<Option<String>>> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e) | Event::Empty(e)) if e.local_name().as_ref() == b"sheet" => {
                return Ok(Some(attribute(&e, b"id")));
            }
            Ok(Event::Eof) => return Ok(None),
            Ok(_) => {}
            Err(e) => return Err(xml_error(name, WORKBOOK_PART, e)),
        }
    }
}

fn relationship_target(xml: &str, rel_id: &str, name: &str) -> Result<Option<String>> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e) | Event::Empty(e))
                if e.local_name().as_ref() == b"Relationship"
                    && attribute(&e, b"Id").as_deref() == Some(rel_id) =>
            {
                return Ok(attribute(&e, b"Target"));
            }
            Ok(Event::Eof) => return Ok(None),
            Ok(_) => {}
            Err(e) => return Err(xml_error(name, WORKBOOK_RELS_PART, e)),
        }
    }
}

/// Relationship targets are relative to `xl/` unless rooted.
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(rooted) => rooted.to_string(),
        None => format!("xl/{}", target.trim_start_matches("./")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"
          xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets>
    <sheet name="Students" sheetId="4" r:id="rId7"/>
    <sheet name="Other" sheetId="1" r:id="rId1"/>
  </sheets>
</workbook>"#;

    const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="worksheet" Target="worksheets/sheet1.xml"/>
  <Relationship Id="rId7" Type="worksheet" Target="/xl/worksheets/sheet4.xml"/>
</Relationships>"#;

    #[test]
    fn test_first_sheet_relationship() {
        let rel = first_sheet_relationship(WORKBOOK, "book.xlsx").unwrap();
        assert_eq!(rel, Some(Some("rId7".to_string())));
    }

    #[test]
    fn test_no_sheets() {
        let rel = first_sheet_relationship("<workbook><sheets/></workbook>", "book.xlsx").unwrap();
        assert_eq!(rel, None);
    }

    #[test]
    fn test_relationship_target() {
        let target = relationship_target(RELS, "rId7", "book.xlsx").unwrap();
        assert_eq!(target.as_deref(), Some("/xl/worksheets/sheet4.xml"));
        assert_eq!(resolve_target("/xl/worksheets/sheet4.xml"), "xl/worksheets/sheet4.xml");
        assert_eq!(resolve_target("worksheets/sheet1.xml"), "xl/worksheets/sheet1.xml");
    }
}
