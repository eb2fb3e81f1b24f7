//! Integration tests for loading roster sources.

use std::io::{Cursor, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use roster_ingest::{
    DataSource, FetchOptions, IngestError, SourceFormat, auto_load, load_bytes, load_file,
    load_source, read_xlsx_bytes,
};
use roster_model::RawValue;
use tempfile::NamedTempFile;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets>
</workbook>"#;

const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#;

const SHARED: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="6" uniqueCount="6">
<si><t>name</t></si><si><t>gender</t></si><si><t>state</t></si><si><t>dob</t></si>
<si><t xml:space="preserve"> Asha Nair </t></si><si><t>Kerala</t></si>
</sst>"#;

const SHEET: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<dimension ref="A1:D3"/>
<sheetData>
<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c><c r="C1" t="s"><v>2</v></c><c r="D1" t="s"><v>3</v></c></row>
<row r="2"><c r="A2" t="s"><v>4</v></c><c r="B2" t="inlineStr"><is><t>F</t></is></c><c r="C2" t="s"><v>5</v></c><c r="D2" s="1"><v>35808</v></c></row>
<row r="3"><c r="B3" t="inlineStr"><is><t>M</t></is></c></row>
</sheetData>
</worksheet>"#;

fn build_workbook(parts: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, content) in parts {
        zip.start_file(*name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

fn student_workbook() -> Vec<u8> {
    build_workbook(&[
        ("xl/workbook.xml", WORKBOOK),
        ("xl/_rels/workbook.xml.rels", RELS),
        ("xl/sharedStrings.xml", SHARED),
        ("xl/worksheets/sheet1.xml", SHEET),
    ])
}

#[test]
fn xlsx_first_sheet_becomes_records() {
    let records = read_xlsx_bytes(&student_workbook(), "students.xlsx").unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("name"), Some(&RawValue::from(" Asha Nair ")));
    assert_eq!(records[0].get("gender"), Some(&RawValue::from("F")));
    assert_eq!(records[0].get("state"), Some(&RawValue::from("Kerala")));
    assert_eq!(records[0].get("dob"), Some(&RawValue::Number(35808.0)));
    // Missing cells are absent keys.
    assert_eq!(records[1].get("name"), None);
    assert_eq!(records[1].get("gender"), Some(&RawValue::from("M")));
}

#[test]
fn xlsx_without_rels_falls_back_to_sheet1() {
    let bytes = build_workbook(&[
        ("xl/workbook.xml", WORKBOOK),
        ("xl/sharedStrings.xml", SHARED),
        ("xl/worksheets/sheet1.xml", SHEET),
    ]);
    let records = read_xlsx_bytes(&bytes, "students.xlsx").unwrap();
    assert_eq!(records.len(), 2);
}

#[test]
fn xlsx_missing_workbook_part_is_an_error() {
    let bytes = build_workbook(&[("xl/worksheets/sheet1.xml", SHEET)]);
    let result = read_xlsx_bytes(&bytes, "broken.xlsx");
    assert!(matches!(result, Err(IngestError::MissingPart { .. })));
}

#[test]
fn non_zip_content_is_an_archive_error() {
    let result = load_bytes("students.xlsx", b"name,city\nA,Pune\n");
    assert!(matches!(result, Err(IngestError::WorkbookArchive { .. })));
}

#[test]
fn format_follows_file_name_suffix() {
    let loaded = load_bytes("STUDENTS.CSV", b"name,city\nA,Pune\n").unwrap();
    assert_eq!(loaded.format, SourceFormat::Csv);
    assert_eq!(loaded.records.len(), 1);

    let loaded = load_bytes("roster.xlsx", &student_workbook()).unwrap();
    assert_eq!(loaded.format, SourceFormat::Spreadsheet);
}

#[test]
fn load_file_reads_csv_from_disk() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    write!(
        file,
        "name,gender,cat,board,medium,city,district,state,dob\n\
         A ,F,GEN,CBSE,English,Kochi,Ernakulam,Kerala,13-Jan-98\n"
    )
    .unwrap();

    let loaded = load_file(file.path()).unwrap();
    assert_eq!(loaded.format, SourceFormat::Csv);
    assert_eq!(loaded.records.len(), 1);
    assert_eq!(loaded.records[0].get("name"), Some(&RawValue::from("A ")));
}

#[test]
fn load_file_missing_is_not_found() {
    let result = load_file(std::path::Path::new("/definitely/not/here.csv"));
    assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
}

#[test]
fn auto_load_absorbs_failures() {
    let missing = DataSource::parse("/definitely/not/here.xlsx", None);
    assert!(auto_load(&missing, &FetchOptions::default()).is_none());

    let mut garbage = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
    garbage.write_all(b"not a workbook").unwrap();
    let source = DataSource::Path(garbage.path().to_path_buf());
    assert!(auto_load(&source, &FetchOptions::default()).is_none());
}

#[test]
fn auto_load_returns_records_on_success() {
    let mut file: NamedTempFile = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(b"name,state\nA,Kerala\nB,Goa\n").unwrap();

    let source = DataSource::Path(file.path().to_path_buf());
    let loaded = auto_load(&source, &FetchOptions::default()).expect("auto-load");
    assert_eq!(loaded.records.len(), 2);
    assert_eq!(loaded.source, file.path().display().to_string());
}

/// Answers a single HTTP request on a local port with a fixed response.
fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        while !request.windows(4).any(|window| window == b"\r\n\r\n") {
            let read = stream.read(&mut chunk).unwrap();
            if read == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..read]);
        }
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
    });
    (format!("http://{address}"), handle)
}

fn quick_fetch() -> FetchOptions {
    FetchOptions {
        timeout: Duration::from_secs(10),
    }
}

#[test]
fn url_source_with_ok_status_yields_records() {
    let (base, server) = serve_once("200 OK", "name,state\nA,Kerala\nB,Goa\n");
    let source = DataSource::parse(&format!("{base}/data/students.csv?v=2"), None);
    assert!(matches!(source, DataSource::Url(_)));

    let loaded = auto_load(&source, &quick_fetch()).expect("auto-load over HTTP");
    server.join().unwrap();

    assert_eq!(loaded.format, SourceFormat::Csv);
    assert_eq!(loaded.records.len(), 2);
    assert_eq!(loaded.records[1].get("state"), Some(&RawValue::from("Goa")));
    assert!(loaded.source.starts_with(&base));
}

#[test]
fn url_source_with_not_found_status_is_absorbed() {
    let (base, server) = serve_once("404 Not Found", "missing");
    let source = DataSource::parse(&format!("{base}/students.csv"), None);
    assert!(auto_load(&source, &quick_fetch()).is_none());
    server.join().unwrap();

    let (base, server) = serve_once("404 Not Found", "missing");
    let source = DataSource::parse(&format!("{base}/students.csv"), None);
    let result = load_source(&source, &quick_fetch());
    server.join().unwrap();
    assert!(matches!(
        result,
        Err(IngestError::HttpStatus { status: 404, .. })
    ));
}

#[test]
fn url_source_on_closed_port_is_a_network_error() {
    let address = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let source = DataSource::parse(&format!("http://{address}/students.csv"), None);

    let result = load_source(&source, &quick_fetch());
    assert!(matches!(result, Err(IngestError::Http { .. })));
    assert!(auto_load(&source, &quick_fetch()).is_none());
}
