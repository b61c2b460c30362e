use std::fs;

use fuzzmatch_model::{ResultHeaders, ResultRow, ResultSet, RowKind};
use fuzzmatch_report::{
    CsvSink, JsonSink, OutputError, OutputFormat, OutputSink, write_csv, write_json,
};
use tempfile::TempDir;

fn row(kind: RowKind, left: &str, right: &str, score: f64, note: Option<&str>) -> ResultRow {
    ResultRow {
        kind,
        left_index: (kind != RowKind::UnmatchedRight).then_some(0),
        right_index: (kind != RowKind::UnmatchedLeft).then_some(0),
        left_value: left.to_string(),
        right_value: right.to_string(),
        score,
        annotation: note.map(str::to_string),
    }
}

fn results(annotation: Option<&str>) -> ResultSet {
    ResultSet {
        headers: ResultHeaders::new("Store", "Customer")
            .with_annotation(annotation.map(str::to_string)),
        rows: vec![
            row(RowKind::Matched, "Acme Corp", "ACME CORP", 100.0, Some("acme corp.")),
            row(RowKind::Matched, "XYZ Mega Mart", "XYZ, Mart", 76.5, None),
            row(RowKind::UnmatchedLeft, "Beta LLC", "NO MATCH FOUND", 0.0, Some("beta")),
        ],
    }
}

fn render_csv(set: &ResultSet) -> String {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, set).unwrap();
    String::from_utf8(buffer).unwrap()
}

#[test]
fn csv_without_annotation() {
    insta::assert_snapshot!(render_csv(&results(None)), @r#"
    Store,Customer,Match Score
    Acme Corp,ACME CORP,100
    XYZ Mega Mart,"XYZ, Mart",76.5
    Beta LLC,NO MATCH FOUND,0
    "#);
}

#[test]
fn csv_with_annotation_column() {
    insta::assert_snapshot!(render_csv(&results(Some("Original Variation"))), @r#"
    Store,Customer,Match Score,Original Variation
    Acme Corp,ACME CORP,100,acme corp.
    XYZ Mega Mart,"XYZ, Mart",76.5,
    Beta LLC,NO MATCH FOUND,0,beta
    "#);
}

#[test]
fn json_round_trips_through_serde() {
    let set = results(Some("Original Variation"));
    let mut buffer = Vec::new();
    write_json(&mut buffer, &set).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

    assert_eq!(value["headers"]["score"], "Match Score");
    assert_eq!(value["rows"][0]["kind"], "matched");
    assert_eq!(value["rows"][2]["kind"], "unmatched_left");
    assert!(value["rows"][1].get("annotation").is_none());

    let parsed: ResultSet = serde_json::from_slice(&buffer).unwrap();
    assert_eq!(parsed, set);
}

#[test]
fn file_sinks_write_to_disk() {
    let dir = TempDir::new().unwrap();
    let set = results(None);

    let csv_path = dir.path().join("matches.csv");
    CsvSink::new(&csv_path).write(&set).unwrap();
    let written = fs::read_to_string(&csv_path).unwrap();
    assert!(written.starts_with("Store,Customer,Match Score\n"));
    assert_eq!(written.lines().count(), 4);

    let json_path = dir.path().join("matches.json");
    OutputFormat::from_path(&json_path).sink(&json_path).write(&set).unwrap();
    let parsed: ResultSet = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(parsed.rows.len(), 3);
}

#[test]
fn unwritable_path_reports_io_error() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("missing").join("out.json");
    let error = JsonSink::new(&target).write(&results(None)).unwrap_err();
    assert!(matches!(error, OutputError::Io { .. }));
    assert!(error.to_string().contains("out.json"));
}
