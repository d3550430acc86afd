use std::path::PathBuf;

use thiserror::Error;

/// Every way a run can fail. Each variant halts the pipeline; nothing is retried.
#[derive(Debug, Error)]
pub enum StatsError {
    /// The data file is missing or unreadable.
    #[error("cannot read data file {path}: {source}")]
    FileLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was readable but its content does not match the expected layout.
    #[error("parse error: {0}")]
    Parse(String),

    /// User input (gender, years, statistic names, window) is outside what the data allows.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The filter matched no rows.
    #[error("no data after filtering: {0}")]
    EmptyResult(String),

    /// A statistic is undefined for the filtered series.
    #[error("cannot compute {statistic}: {reason}")]
    Computation {
        statistic: &'static str,
        reason: String,
    },

    /// Console read/write failed while prompting or printing.
    #[error("console I/O: {0}")]
    Io(#[from] std::io::Error),
}

impl StatsError {
    pub fn parse(msg: impl Into<String>) -> Self {
        StatsError::Parse(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        StatsError::Validation(msg.into())
    }

    pub fn computation(statistic: &'static str, reason: impl Into<String>) -> Self {
        StatsError::Computation {
            statistic,
            reason: reason.into(),
        }
    }
}

pub type StatsResult<T> = Result<T, StatsError>;
