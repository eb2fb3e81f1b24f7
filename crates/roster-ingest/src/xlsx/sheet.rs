//! Worksheet cell extraction.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use roster_model::RawValue;

use crate::error::Result;

use super::xml::{attribute, decode_text, resolve_reference, xml_error};

/// Non-blank cells of one worksheet row, keyed by zero-based column.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct SheetRow {
    pub index: usize,
    pub cells: Vec<(usize, RawValue)>,
}

/// Cell storage type from the `t` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Number,
    SharedString,
    InlineString,
    FormulaString,
    Boolean,
    Error,
    IsoDate,
}

impl CellKind {
    fn from_attribute(value: Option<&str>) -> Self {
        match value {
            Some("s") => Self::SharedString,
            Some("inlineStr") => Self::InlineString,
            Some("str") => Self::FormulaString,
            Some("b") => Self::Boolean,
            Some("e") => Self::Error,
            Some("d") => Self::IsoDate,
            _ => Self::Number,
        }
    }
}

struct PendingCell {
    column: usize,
    kind: CellKind,
    value: String,
    inline: String,
}

impl PendingCell {
    fn finish(self, shared: &[String]) -> RawValue {
        match self.kind {
            CellKind::SharedString => self
                .value
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|index| shared.get(index))
                .map_or(RawValue::Empty, |text| text_value(text.clone())),
            CellKind::InlineString => text_value(self.inline),
            CellKind::FormulaString | CellKind::Error | CellKind::IsoDate => {
                text_value(self.value)
            }
            CellKind::Boolean => match self.value.trim() {
                "1" | "true" => RawValue::Bool(true),
                "0" | "false" => RawValue::Bool(false),
                "" => RawValue::Empty,
                other => RawValue::Text(other.to_string()),
            },
            CellKind::Number => {
                let trimmed = self.value.trim();
                if trimmed.is_empty() {
                    RawValue::Empty
                } else {
                    trimmed
                        .parse::<f64>()
                        .map_or_else(|_| RawValue::Text(trimmed.to_string()), RawValue::Number)
                }
            }
        }
    }
}

fn text_value(text: String) -> RawValue {
    if text.is_empty() {
        RawValue::Empty
    } else {
        RawValue::Text(text)
    }
}

/// Converts the letters of a cell reference (`"AB12"`) to a zero-based column.
pub(super) fn column_index(reference: &str) -> Option<usize> {
    let mut column = 0usize;
    let mut letters = 0usize;
    for c in reference.chars() {
        if !c.is_ascii_alphabetic() {
            break;
        }
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        column = column.checked_mul(26)?.checked_add(digit)?;
        letters += 1;
    }
    if letters == 0 { None } else { Some(column - 1) }
}

fn row_index(element: &BytesStart<'_>, fallback: usize) -> usize {
    attribute(element, b"r")
        .and_then(|r| r.trim().parse::<usize>().ok())
        .filter(|r| *r > 0)
        .map_or(fallback, |r| r - 1)
}

/// Reads every row that has at least one non-blank cell.
pub(super) fn parse_sheet(
    xml: &str,
    shared: &[String],
    name: &str,
    part: &str,
) -> Result<Vec<SheetRow>> {
    let mut reader = Reader::from_str(xml);
    let mut rows = Vec::new();
    let mut row: Option<SheetRow> = None;
    let mut cell: Option<PendingCell> = None;
    let mut next_row = 0usize;
    let mut next_column = 0usize;
    let mut position = TextPosition::default();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| xml_error(name, part, e))?;
        match event {
            Event::Start(e) => match e.local_name().as_ref() {
                b"row" => {
                    let index = row_index(&e, next_row);
                    next_row = index + 1;
                    next_column = 0;
                    row = Some(SheetRow {
                        index,
                        cells: Vec::new(),
                    });
                }
                b"c" => {
                    let column = attribute(&e, b"r")
                        .and_then(|r| column_index(&r))
                        .unwrap_or(next_column);
                    next_column = column + 1;
                    cell = Some(PendingCell {
                        column,
                        kind: CellKind::from_attribute(attribute(&e, b"t").as_deref()),
                        value: String::new(),
                        inline: String::new(),
                    });
                }
                b"v" => position.in_value = true,
                b"is" => position.in_inline = true,
                b"t" => position.in_text = true,
                b"rPh" => position.phonetic_depth += 1,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"row" => next_row = row_index(&e, next_row) + 1,
                b"c" => {
                    next_column = attribute(&e, b"r")
                        .and_then(|r| column_index(&r))
                        .unwrap_or(next_column)
                        + 1;
                }
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"row" => {
                    if let Some(finished) = row.take()
                        && !finished.cells.is_empty()
                    {
                        rows.push(finished);
                    }
                }
                b"c" => {
                    if let Some(pending) = cell.take() {
                        let column = pending.column;
                        let value = pending.finish(shared);
                        if let Some(current) = row.as_mut()
                            && !value.is_empty()
                        {
                            current.cells.push((column, value));
                        }
                    }
                }
                b"v" => position.in_value = false,
                b"is" => position.in_inline = false,
                b"t" => position.in_text = false,
                b"rPh" => position.phonetic_depth = position.phonetic_depth.saturating_sub(1),
                _ => {}
            },
            Event::Text(text) => {
                if let Some(pending) = cell.as_mut() {
                    position.push(pending, &decode_text(&text));
                }
            }
            Event::CData(data) => {
                if let Some(pending) = cell.as_mut() {
                    position.push(pending, &String::from_utf8_lossy(&data));
                }
            }
            Event::GeneralRef(reference) => {
                if let Some(pending) = cell.as_mut() {
                    position.push(pending, &resolve_reference(&reference));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    rows.sort_by_key(|row| row.index);
    Ok(rows)
}

/// Which element of a cell the reader is inside.
#[derive(Debug, Default)]
struct TextPosition {
    in_value: bool,
    in_inline: bool,
    in_text: bool,
    phonetic_depth: usize,
}

impl TextPosition {
    fn push(&self, pending: &mut PendingCell, text: &str) {
        if self.in_value {
            pending.value.push_str(text);
        } else if self.in_inline && self.in_text && self.phonetic_depth == 0 {
            pending.inline.push_str(text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_index() {
        assert_eq!(column_index("A1"), Some(0));
        assert_eq!(column_index("Z9"), Some(25));
        assert_eq!(column_index("AA10"), Some(26));
        assert_eq!(column_index("ab3"), Some(27));
        assert_eq!(column_index("12"), None);
    }

    #[test]
    fn test_parse_cell_types() {
        let shared = vec!["name".to_string(), "Asha".to_string()];
        let xml = r#"<worksheet><sheetData>
  <row r="1"><c r="A1" t="s"><v>0</v></c><c r="C1" t="inlineStr"><is><t>dob</t></is></c></row>
  <row r="2">
    <c r="A2" t="s"><v>1</v></c>
    <c r="B2" t="b"><v>1</v></c>
    <c r="C2"><v>35808</v></c>
    <c r="D2" t="e"><v>#N/A</v></c>
    <c r="E2" t="str"><f>A2</f><v>Asha</v></c>
    <c r="F2" s="3"/>
  </row>
  <row r="4"><c r="A4"><v></v></c></row>
</sheetData></worksheet>"#;
        let rows = parse_sheet(xml, &shared, "book.xlsx", "xl/worksheets/sheet1.xml").unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0].cells,
            vec![
                (0, RawValue::from("name")),
                (2, RawValue::from("dob")),
            ]
        );
        assert_eq!(rows[1].index, 1);
        assert_eq!(
            rows[1].cells,
            vec![
                (0, RawValue::from("Asha")),
                (1, RawValue::Bool(true)),
                (2, RawValue::Number(35808.0)),
                (3, RawValue::from("#N/A")),
                (4, RawValue::from("Asha")),
            ]
        );
    }

    #[test]
    fn test_cells_without_references_are_sequential() {
        let xml = r#"<worksheet><sheetData>
  <row><c t="inlineStr"><is><t>a</t></is></c><c/><c><v>2</v></c></row>
  <row><c><v>3</v></c></row>
</sheetData></worksheet>"#;
        let rows = parse_sheet(xml, &[], "book.xlsx", "sheet").unwrap();

        assert_eq!(rows[0].index, 0);
        assert_eq!(
            rows[0].cells,
            vec![(0, RawValue::from("a")), (2, RawValue::Number(2.0))]
        );
        assert_eq!(rows[1].index, 1);
    }
}
