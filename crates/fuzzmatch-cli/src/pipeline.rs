//! The `match` pipeline: load input, run the matcher, write the result set.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use fuzzmatch_ingest::{AnnotationSelector, ColumnSelector, CsvSource, InputProvider, MatchInput};
use fuzzmatch_map::{FuzzyMatcher, MatchOutcome, MatchRequest, Progress};
use fuzzmatch_model::{MatchOptions, ResultHeaders};
use fuzzmatch_report::{OutputError, OutputFormat};
use tracing::{debug, info, info_span, trace, warn};

use crate::logging::redact_value;

/// File name used when no output path is given.
pub const DEFAULT_OUTPUT_STEM: &str = "fuzzy_match_results";

/// Everything needed for one matching run.
#[derive(Debug, Clone)]
pub struct MatchJob {
    pub input: PathBuf,
    pub left: ColumnSelector,
    pub right: ColumnSelector,
    pub annotation: AnnotationSelector,
    pub delimiter: u8,
    pub skip_missing: bool,
    pub output: PathBuf,
    pub format: OutputFormat,
    pub options: MatchOptions,
}

impl MatchJob {
    pub fn new(input: impl Into<PathBuf>, left: ColumnSelector, right: ColumnSelector) -> Self {
        let input = input.into();
        let format = OutputFormat::default();
        let output = default_output_path(&input, format);
        Self {
            input,
            left,
            right,
            annotation: AnnotationSelector::Auto,
            delimiter: b',',
            skip_missing: false,
            output,
            format,
            options: MatchOptions::default(),
        }
    }
}

/// `fuzzy_match_results.<ext>` next to the input file.
pub fn default_output_path(input: &Path, format: OutputFormat) -> PathBuf {
    let file_name = format!("{DEFAULT_OUTPUT_STEM}.{}", format.extension());
    match input.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Stage durations of one run.
#[derive(Debug, Clone, Copy, Default)]
pub struct StageTimings {
    pub load: Duration,
    pub matching: Duration,
    pub write: Duration,
}

/// Result of a run. A failed write still carries the computed results.
#[derive(Debug)]
pub struct MatchReport {
    pub source: PathBuf,
    pub input: MatchInput,
    pub outcome: MatchOutcome,
    pub output: PathBuf,
    pub format: OutputFormat,
    pub timings: StageTimings,
    pub write_error: Option<OutputError>,
}

impl MatchReport {
    pub fn is_written(&self) -> bool {
        self.write_error.is_none()
    }
}

/// Loads the input, runs the matcher, and writes the result set.
///
/// # Errors
///
/// Fails on unreadable input, unknown columns, invalid options, or
/// cancellation. Output errors are reported through
/// [`MatchReport::write_error`] instead.
pub fn run_match(job: &MatchJob, progress: &mut dyn Progress) -> Result<MatchReport> {
    let span = info_span!("match_job", input = %job.input.display());
    let _guard = span.enter();

    let matcher = FuzzyMatcher::new(job.options.clone()).context("invalid match options")?;

    let load_start = Instant::now();
    let input = CsvSource::new(&job.input, job.left.clone(), job.right.clone())
        .with_delimiter(job.delimiter)
        .with_annotation(job.annotation.clone())
        .with_skip_missing(job.skip_missing)
        .load()
        .with_context(|| format!("load input {}", job.input.display()))?;
    let load = load_start.elapsed();
    log_input(&input);

    let headers = ResultHeaders::new(&input.left.header, &input.right.header)
        .with_annotation(input.annotation.as_ref().map(|column| column.header.clone()));
    let request = MatchRequest::new(&input.left.values, &input.right.values)
        .with_annotations(input.annotation.as_ref().map(|column| column.values.as_slice()))
        .with_headers(headers);

    let match_start = Instant::now();
    let outcome = matcher.run(&request, progress).context("matching failed")?;
    let matching = match_start.elapsed();

    let write_start = Instant::now();
    let write_error = job.format.sink(&job.output).write(&outcome.results).err();
    let write = write_start.elapsed();
    if let Some(error) = &write_error {
        warn!(output = %job.output.display(), %error, "results were not written");
    }

    info!(
        matches = outcome.results.match_count(),
        unmatched_left = outcome.results.unmatched_left_count(),
        load_ms = load.as_millis(),
        match_ms = matching.as_millis(),
        write_ms = write.as_millis(),
        "match job complete"
    );
    Ok(MatchReport {
        source: job.input.clone(),
        input,
        outcome,
        output: job.output.clone(),
        format: job.format,
        timings: StageTimings {
            load,
            matching,
            write,
        },
        write_error,
    })
}

fn log_input(input: &MatchInput) {
    let blank_left = input.left.blank_count();
    let blank_right = input.right.blank_count();
    if blank_left + blank_right > 0 {
        warn!(blank_left, blank_right, "blank labels will stay unmatched");
    }
    debug!(
        left = input.left.len(),
        right = input.right.len(),
        annotated = input.annotation.is_some(),
        "input ready"
    );
    for (index, value) in input.left.values.iter().enumerate() {
        trace!(index, value = redact_value(value), "left label");
    }
}
