use std::fs;
use std::io::{self, IsTerminal};
use std::path::Path;

use anyhow::{Context, Result, bail};
use fuzzmatch_cli::pipeline::{MatchJob, MatchReport, default_output_path, run_match};
use fuzzmatch_cli::progress::BarProgress;
use fuzzmatch_ingest::{AnnotationSelector, read_csv_headers};
use fuzzmatch_map::SimilarityScorer;
use fuzzmatch_model::{MatchOptions, ScoringPolicy};
use fuzzmatch_report::OutputFormat;

use crate::cli::{ColumnsArgs, MatchArgs, ScoreArgs};
use crate::summary::{print_breakdown, print_columns};

pub fn run_match_command(args: &MatchArgs) -> Result<MatchReport> {
    let job = build_job(args)?;
    let mut progress = if args.no_progress || !io::stderr().is_terminal() {
        BarProgress::hidden()
    } else {
        BarProgress::new()
    };
    let report = run_match(&job, &mut progress);
    progress.finish();
    report
}

pub fn run_columns(args: &ColumnsArgs) -> Result<()> {
    let delimiter = delimiter_byte(args.delimiter)?;
    let headers = read_csv_headers(&args.input, delimiter)
        .with_context(|| format!("read headers of {}", args.input.display()))?;
    print_columns(&headers);
    Ok(())
}

pub fn run_score(args: &ScoreArgs) -> Result<()> {
    let scorer = SimilarityScorer::new(ScoringPolicy::from(args.policy));
    let breakdown = scorer.breakdown(&args.left, &args.right);
    print_breakdown(&args.left, &args.right, &breakdown);
    Ok(())
}

/// Resolves flags, the optional config file, and defaults into one job.
pub fn build_job(args: &MatchArgs) -> Result<MatchJob> {
    let mut job = MatchJob::new(&args.input, args.left.clone(), args.right.clone());
    job.options = resolve_options(args)?;
    job.delimiter = delimiter_byte(args.delimiter)?;
    job.skip_missing = args.skip_missing;
    job.annotation = match (&args.annotation, args.no_annotation) {
        (_, true) => AnnotationSelector::Disabled,
        (Some(selector), false) => AnnotationSelector::Column(selector.clone()),
        (None, false) => AnnotationSelector::Auto,
    };
    job.format = match (args.format, &args.output) {
        (Some(format), _) => format.into(),
        (None, Some(path)) => OutputFormat::from_path(path),
        (None, None) => OutputFormat::default(),
    };
    job.output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input, job.format));
    Ok(job)
}

fn resolve_options(args: &MatchArgs) -> Result<MatchOptions> {
    let mut options = match &args.config {
        Some(path) => load_options(path)?,
        None => MatchOptions::default(),
    };
    if let Some(min_score) = args.min_score {
        options = options.with_min_score(min_score);
    }
    if !args.thresholds.is_empty() {
        options = options.with_thresholds(args.thresholds.clone());
    }
    if let Some(policy) = args.policy {
        options = options.with_policy(policy.into());
    }
    if args.include_unmatched_right {
        options = options.with_report_unmatched_right(true);
    }
    options.validate().context("invalid match options")
}

fn load_options(path: &Path) -> Result<MatchOptions> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse config {}", path.display()))
}

fn delimiter_byte(delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() {
        bail!("delimiter must be a single ASCII character, got {delimiter:?}");
    }
    Ok(delimiter as u8)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::*;
    use crate::cli::{Cli, Command};

    fn match_args(argv: &[&str]) -> MatchArgs {
        let mut full = vec!["fuzzmatch", "match"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Command::Match(args) => args,
            _ => unreachable!("match subcommand"),
        }
    }

    #[test]
    fn flags_fill_the_job() {
        let args = match_args(&[
            "data/stores.csv",
            "--left",
            "Store",
            "--right",
            "#2",
            "--min-score",
            "60",
            "--threshold",
            "90",
            "--threshold",
            "100",
            "--policy",
            "max-ratio",
            "--no-annotation",
        ]);
        let job = build_job(&args).unwrap();
        assert_eq!(job.options.min_score, 60.0);
        assert_eq!(job.options.thresholds, vec![100.0, 90.0]);
        assert_eq!(job.options.policy, ScoringPolicy::MaxRatio);
        assert_eq!(job.annotation, AnnotationSelector::Disabled);
        assert_eq!(job.output, PathBuf::from("data/fuzzy_match_results.csv"));
    }

    #[test]
    fn output_extension_selects_format() {
        let args = match_args(&["in.csv", "--left", "a", "--right", "b", "-o", "out.json"]);
        let job = build_job(&args).unwrap();
        assert_eq!(job.format, OutputFormat::Json);
        assert_eq!(job.output, PathBuf::from("out.json"));
    }

    #[test]
    fn config_file_is_overridden_by_flags() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = dir.path().join("options.json");
        fs::write(&config, r#"{"min_score": 50, "policy": "max-ratio"}"#).unwrap();
        let config_arg = config.to_string_lossy().into_owned();
        let args = match_args(&[
            "in.csv",
            "--left",
            "a",
            "--right",
            "b",
            "--config",
            &config_arg,
            "--min-score",
            "70",
        ]);
        let options = resolve_options(&args).unwrap();
        assert_eq!(options.min_score, 70.0);
        assert_eq!(options.policy, ScoringPolicy::MaxRatio);
    }

    #[test]
    fn rejects_out_of_range_scores() {
        let args = match_args(&["in.csv", "--left", "a", "--right", "b", "--min-score", "120"]);
        assert!(build_job(&args).is_err());
    }

    #[test]
    fn rejects_non_ascii_delimiter() {
        assert_eq!(delimiter_byte(';').unwrap(), b';');
        assert!(delimiter_byte('§').is_err());
    }
}
