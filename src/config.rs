use std::path::PathBuf;

use clap::Parser;

use crate::data::model::ColumnNames;
use crate::data::series::Aggregation;

/// Command line for `yearly-stats`.
///
/// Every filter option is optional: whatever is not given on the command line
/// is asked for interactively.
#[derive(Parser, Debug)]
#[command(
    name = "yearly-stats",
    version,
    about = "Filter yearly gender-split measurements and chart descriptive statistics"
)]
pub struct Cli {
    /// Data file (.csv, .json or .parquet)
    #[arg(default_value = "data-table.csv")]
    pub data: PathBuf,

    /// Column holding the year (integer or date)
    #[arg(long, default_value = "Time")]
    pub year_column: String,

    /// Column holding the gender category
    #[arg(long, default_value = "Sex")]
    pub gender_column: String,

    /// Column holding the numeric metric
    #[arg(long, default_value = "Value")]
    pub value_column: String,

    /// How rows in the same year are combined: sum or mean
    #[arg(long, default_value = "sum")]
    pub aggregate: Aggregation,

    /// Moving-average window, in years
    #[arg(short, long, default_value_t = 3)]
    pub window: usize,

    /// Gender filter (All, Male, Female); prompts when omitted
    #[arg(short, long)]
    pub gender: Option<String>,

    /// First year, inclusive; prompts when omitted
    #[arg(long)]
    pub start_year: Option<i32>,

    /// Last year, inclusive; prompts when omitted
    #[arg(long)]
    pub end_year: Option<i32>,

    /// Comma-separated statistics; prompts when omitted
    #[arg(short, long)]
    pub stats: Option<String>,

    /// Print results only, do not open the chart window
    #[arg(long)]
    pub no_plot: bool,
}

/// Answers supplied up front instead of through prompts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Presets {
    pub gender: Option<String>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub stats: Option<String>,
}

/// Everything a run needs, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub data_path: PathBuf,
    pub columns: ColumnNames,
    pub aggregation: Aggregation,
    pub window: usize,
    pub presets: Presets,
    pub plot: bool,
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> Self {
        RunConfig {
            data_path: cli.data,
            columns: ColumnNames {
                year: cli.year_column,
                gender: cli.gender_column,
                value: cli.value_column,
            },
            aggregation: cli.aggregate,
            window: cli.window,
            presets: Presets {
                gender: cli.gender,
                start_year: cli.start_year,
                end_year: cli.end_year,
                stats: cli.stats,
            },
            plot: !cli.no_plot,
        }
    }
}
