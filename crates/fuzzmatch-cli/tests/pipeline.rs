use std::fs;
use std::path::PathBuf;

use fuzzmatch_cli::pipeline::{MatchJob, run_match};
use fuzzmatch_ingest::ColumnSelector;
use fuzzmatch_map::NoProgress;
use fuzzmatch_model::{MatchOptions, ResultSet, RowKind};
use fuzzmatch_report::OutputFormat;
use tempfile::TempDir;

const STORES: &str = "Store,Customer,Original Variation\n\
Acme Corp,ACME CORP,acme corp.\n\
Johnson Store,Smith Shop,johnson\n\
Smith Shop,Johnson Store,\n\
Zed,Qqqq,\n";

fn job(dir: &TempDir) -> MatchJob {
    let input = dir.path().join("stores.csv");
    fs::write(&input, STORES).expect("write input");
    let mut job = MatchJob::new(
        &input,
        ColumnSelector::Name("Store".to_string()),
        ColumnSelector::Name("Customer".to_string()),
    );
    job.options = MatchOptions::default().with_min_score(60.0);
    job
}

#[test]
fn writes_ranked_csv_next_to_input() {
    let dir = TempDir::new().unwrap();
    let job = job(&dir);
    let report = run_match(&job, &mut NoProgress).expect("run match");

    assert!(report.is_written());
    assert_eq!(report.output, dir.path().join("fuzzy_match_results.csv"));
    assert_eq!(report.outcome.assignment.perfect_count(), 3);
    assert_eq!(report.outcome.assignment.unmatched_right, vec![3]);

    let written = fs::read_to_string(&report.output).unwrap();
    insta::assert_snapshot!(written, @r"
    Store,Customer,Match Score,Original Variation
    Acme Corp,ACME CORP,100,acme corp.
    Johnson Store,Johnson Store,100,johnson
    Smith Shop,Smith Shop,100,
    Zed,NO MATCH FOUND,0,
    ");
}

#[test]
fn json_output_includes_unmatched_right_when_requested() {
    let dir = TempDir::new().unwrap();
    let mut job = job(&dir);
    job.format = OutputFormat::Json;
    job.output = dir.path().join("results.json");
    job.options = job.options.with_report_unmatched_right(true);

    let report = run_match(&job, &mut NoProgress).unwrap();
    let parsed: ResultSet =
        serde_json::from_str(&fs::read_to_string(&job.output).unwrap()).unwrap();
    assert_eq!(parsed, report.outcome.results);

    let last = parsed.rows.last().unwrap();
    assert_eq!(last.kind, RowKind::UnmatchedRight);
    assert_eq!(last.right_value, "Qqqq");
    assert_eq!(parsed.headers.annotation.as_deref(), Some("Original Variation"));
}

#[test]
fn failed_write_keeps_results() {
    let dir = TempDir::new().unwrap();
    let mut job = job(&dir);
    job.output = dir.path().join("missing").join("out.csv");

    let report = run_match(&job, &mut NoProgress).expect("matching still succeeds");
    assert!(!report.is_written());
    assert_eq!(report.outcome.results.match_count(), 3);
}

#[test]
fn unknown_column_fails_before_matching() {
    let dir = TempDir::new().unwrap();
    let mut job = job(&dir);
    job.right = ColumnSelector::Name("Client".to_string());
    let error = run_match(&job, &mut NoProgress).unwrap_err();
    let message = format!("{error:#}");
    assert!(message.contains("column 'Client' not found"), "{message}");
    assert!(!PathBuf::from(&job.output).exists());
}

#[test]
fn invalid_options_fail_before_loading() {
    let dir = TempDir::new().unwrap();
    let mut job = job(&dir);
    job.options = MatchOptions::default().with_thresholds(vec![101.0]);
    let error = run_match(&job, &mut NoProgress).unwrap_err();
    assert!(format!("{error:#}").contains("invalid match options"));
}
