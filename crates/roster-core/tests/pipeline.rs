//! Raw file bytes through to dashboard records.

use chrono::{TimeZone, Utc};
use roster_core::{Dataset, SummaryStats, estimate_age, filter_records};
use roster_ingest::read_csv_bytes;
use roster_model::{Dob, FilterField, FilterState, StudentRecord};

#[test]
fn single_row_csv_yields_trimmed_record() {
    let csv = b"name,gender,cat,board,medium,city,district,state,dob\n  Asha Rao , F ,GEN,CBSE,English,Kochi,Ernakulam, Kerala ,13-Jan-98\n";
    let rows = read_csv_bytes(csv, "students.csv").expect("parse csv");
    let dataset = Dataset::from_raw(&rows, "students.csv");

    assert_eq!(dataset.len(), 1);
    let record = &dataset.records()[0];
    assert_eq!(
        record.cells(),
        vec![
            "Asha Rao",
            "F",
            "GEN",
            "CBSE",
            "English",
            "Kochi",
            "Ernakulam",
            "Kerala",
            "13-Jan-98",
        ]
    );
    assert_eq!(
        *record,
        StudentRecord {
            name: "Asha Rao".to_string(),
            gender: "F".to_string(),
            cat: "GEN".to_string(),
            board: "CBSE".to_string(),
            medium: "English".to_string(),
            city: "Kochi".to_string(),
            district: "Ernakulam".to_string(),
            state: "Kerala".to_string(),
            dob: Dob::Textual("13-Jan-98".to_string()),
        }
    );
}

#[test]
fn numeric_csv_dob_is_a_spreadsheet_serial() {
    let csv = b"name,dob\nAsha,1998\nRavi,35808\nMeena,13-Jan-98\n";
    let rows = read_csv_bytes(csv, "students.csv").expect("parse csv");
    let dataset = Dataset::from_raw(&rows, "students.csv");
    let now = Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).unwrap();

    let records = dataset.records();
    assert_eq!(records[0].dob, Dob::Numeric(1998.0));
    assert_eq!(records[1].dob, Dob::Numeric(35808.0));
    assert_eq!(records[2].dob, Dob::Textual("13-Jan-98".to_string()));

    // Serial 1998 is a 1905 date, past the age ceiling.
    assert_eq!(estimate_age(&records[0].dob, now), None);
    assert_eq!(estimate_age(&records[1].dob, now), Some(28));
    assert_eq!(estimate_age(&records[2].dob, now), Some(28));

    // A bare year only reaches the text parser when the cell is text.
    assert_eq!(estimate_age(&Dob::Textual("1998".to_string()), now), Some(28));
}

#[test]
fn nameless_rows_never_reach_the_view() {
    let csv = b"name,gender,state,dob\nAsha,F,Kerala,35808\n,M,Goa,\n   ,M,Goa,\nRavi,M,Bihar,\n";
    let rows = read_csv_bytes(csv, "students.csv").expect("parse csv");
    let dataset = Dataset::from_raw(&rows, "students.csv");

    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.records()[0].dob, Dob::Numeric(35808.0));

    let goa = FilterState::new().with(FilterField::State, "Goa");
    assert!(filter_records(dataset.records(), &goa).is_empty());

    let stats = SummaryStats::compute(dataset.records());
    assert_eq!(stats.total, 2);
    assert_eq!(stats.female_pct, 50);
}
