use std::fmt;
use std::ops::RangeInclusive;

use super::model::{Dataset, Record};
use crate::error::{StatsError, StatsResult};

// ---------------------------------------------------------------------------
// Gender selection
// ---------------------------------------------------------------------------

/// Which gender category a run is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gender {
    #[default]
    All,
    Male,
    Female,
}

impl Gender {
    /// Parse a user answer. Blank means `All`; matching is case-insensitive and
    /// accepts the singular, plural and one-letter forms.
    pub fn parse(input: &str) -> StatsResult<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Gender::All),
            "m" | "male" | "males" => Ok(Gender::Male),
            "f" | "fem" | "female" | "females" => Ok(Gender::Female),
            other => Err(StatsError::validation(format!(
                "unknown gender '{other}' (expected All, Male or Female)"
            ))),
        }
    }

    /// Whether a dataset gender cell belongs to this selection.
    ///
    /// Combined categories such as `Males and females` only match `All`.
    pub fn matches(self, cell: &str) -> bool {
        let cell = cell.trim().to_ascii_lowercase();
        match self {
            Gender::All => true,
            Gender::Male => matches!(cell.as_str(), "m" | "male" | "males"),
            Gender::Female => matches!(cell.as_str(), "f" | "female" | "females"),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::All => write!(f, "All"),
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

// ---------------------------------------------------------------------------
// FilterCriteria
// ---------------------------------------------------------------------------

/// Validated gender and inclusive year range for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    gender: Gender,
    start_year: i32,
    end_year: i32,
}

impl FilterCriteria {
    /// Validate a year range against the years present in `dataset`.
    ///
    /// The range must be ordered and overlap the dataset's span; it may extend
    /// past either end.
    pub fn new(
        dataset: &Dataset,
        gender: Gender,
        start_year: i32,
        end_year: i32,
    ) -> StatsResult<Self> {
        if start_year > end_year {
            return Err(StatsError::validation(format!(
                "start year {start_year} is after end year {end_year}"
            )));
        }
        let span = dataset
            .year_span()
            .ok_or_else(|| StatsError::validation("dataset has no years"))?;
        if end_year < *span.start() || start_year > *span.end() {
            return Err(StatsError::validation(format!(
                "years {start_year}-{end_year} are outside the available range {}-{}",
                span.start(),
                span.end()
            )));
        }
        Ok(Self {
            gender,
            start_year,
            end_year,
        })
    }

    fn years(&self) -> RangeInclusive<i32> {
        self.start_year..=self.end_year
    }

    fn accepts(&self, record: &Record) -> bool {
        self.years().contains(&record.year) && self.gender.matches(&record.gender)
    }
}

impl fmt::Display for FilterCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "gender={}, years {}-{}",
            self.gender, self.start_year, self.end_year
        )
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return the records passing `criteria`, in dataset order.
///
/// An empty selection is an error: nothing downstream is meaningful on it.
pub fn filter_records<'a>(
    dataset: &'a Dataset,
    criteria: &FilterCriteria,
) -> StatsResult<Vec<&'a Record>> {
    let selected: Vec<&Record> = dataset
        .records()
        .iter()
        .filter(|r| criteria.accepts(r))
        .collect();

    log::debug!(
        "filter {criteria}: {} of {} rows selected",
        selected.len(),
        dataset.len()
    );

    if selected.is_empty() {
        return Err(StatsError::EmptyResult(format!(
            "no rows match {criteria}"
        )));
    }
    Ok(selected)
}
