//! CLI argument definitions for `fuzzmatch`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use fuzzmatch_ingest::ColumnSelector;
use fuzzmatch_model::ScoringPolicy;
use fuzzmatch_report::OutputFormat;

#[derive(Parser)]
#[command(
    name = "fuzzmatch",
    version,
    about = "Fuzzy one-to-one matching of two label columns",
    long_about = "Match every label in one column against the labels of another column.\n\n\
                  Pairs are scored 0-100 with edit-distance and token ratios, then assigned\n\
                  greedily so that each label is used at most once."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow label values to appear in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Match the left column against the right column and write the results.
    Match(MatchArgs),

    /// List the columns of a CSV file with their positions.
    Columns(ColumnsArgs),

    /// Score a single pair of labels and show how the score was derived.
    Score(ScoreArgs),
}

#[derive(Args)]
pub struct MatchArgs {
    /// CSV file holding both label columns.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Column with the labels to find matches for (header name or #N).
    #[arg(long, value_name = "COLUMN")]
    pub left: ColumnSelector,

    /// Column with the candidate labels (header name or #N).
    #[arg(long, value_name = "COLUMN")]
    pub right: ColumnSelector,

    /// Column carried through next to each left label.
    ///
    /// Defaults to "Original Variation" when the file has such a column.
    #[arg(long, value_name = "COLUMN", conflicts_with = "no_annotation")]
    pub annotation: Option<ColumnSelector>,

    /// Do not carry an annotation column.
    #[arg(long = "no-annotation")]
    pub no_annotation: bool,

    /// Output file (default: fuzzy_match_results.<format> next to INPUT).
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format (default: from the output extension, else csv).
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Minimum score a pair needs to be matched.
    #[arg(long = "min-score", value_name = "SCORE")]
    pub min_score: Option<f64>,

    /// Threshold for the first-fit sweep; repeat for several passes.
    #[arg(long = "threshold", value_name = "SCORE")]
    pub thresholds: Vec<f64>,

    /// How sub-scores are combined.
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,

    /// Also report right labels that received no match.
    #[arg(long = "include-unmatched-right")]
    pub include_unmatched_right: bool,

    /// Drop blank labels instead of reporting them as unmatched.
    #[arg(long = "skip-missing")]
    pub skip_missing: bool,

    /// Field delimiter of INPUT.
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// JSON file with match options; flags override its values.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Number of best matches shown in the summary.
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Disable the progress bar.
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}

#[derive(Args)]
pub struct ColumnsArgs {
    /// CSV file to inspect.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Field delimiter of INPUT.
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,
}

#[derive(Args)]
pub struct ScoreArgs {
    /// First label.
    pub left: String,

    /// Second label.
    pub right: String,

    /// How sub-scores are combined.
    #[arg(long, value_enum, default_value = "weighted")]
    pub policy: PolicyArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => Self::Csv,
            FormatArg::Json => Self::Json,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    Weighted,
    MaxRatio,
}

impl From<PolicyArg> for ScoringPolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::Weighted => Self::Weighted,
            PolicyArg::MaxRatio => Self::MaxRatio,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
