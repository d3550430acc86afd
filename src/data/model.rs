use std::collections::BTreeSet;
use std::ops::RangeInclusive;

// ---------------------------------------------------------------------------
// ColumnNames – which source columns hold year, gender and metric
// ---------------------------------------------------------------------------

/// Names of the three columns the loader extracts from a source table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub year: String,
    pub gender: String,
    pub value: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            year: "Time".to_string(),
            gender: "Sex".to_string(),
            value: "Value".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the source table
// ---------------------------------------------------------------------------

/// A single observation: one metric value for a year and gender category.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub year: i32,
    /// Gender category exactly as it appears in the source (e.g. `Males`).
    pub gender: String,
    pub value: f64,
}

impl Record {
    pub fn new(year: i32, gender: impl Into<String>, value: f64) -> Self {
        Self {
            year,
            gender: gender.into(),
            value,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed year and gender indices.
/// Immutable once built.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
    years: BTreeSet<i32>,
    genders: BTreeSet<String>,
}

impl Dataset {
    /// Build indices from the loaded records. Record order is preserved.
    pub fn from_records(records: Vec<Record>) -> Self {
        let years = records.iter().map(|r| r.year).collect();
        let genders = records.iter().map(|r| r.gender.clone()).collect();
        Dataset {
            records,
            years,
            genders,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Distinct gender categories, sorted.
    pub fn genders(&self) -> &BTreeSet<String> {
        &self.genders
    }

    /// Earliest and latest year, or `None` for an empty dataset.
    pub fn year_span(&self) -> Option<RangeInclusive<i32>> {
        let first = *self.years.first()?;
        let last = *self.years.last()?;
        Some(first..=last)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_sorted_and_distinct() {
        let ds = Dataset::from_records(vec![
            Record::new(2020, "Males", 3.0),
            Record::new(2018, "Females", 1.0),
            Record::new(2018, "Males", 2.0),
        ]);
        assert_eq!(ds.len(), 3);
        assert_eq!(
            ds.genders().iter().cloned().collect::<Vec<_>>(),
            vec!["Females".to_string(), "Males".to_string()]
        );
        assert_eq!(ds.year_span(), Some(2018..=2020));
        // source order is kept
        assert_eq!(ds.records()[0].year, 2020);
    }

    #[test]
    fn empty_dataset_has_no_span() {
        let ds = Dataset::from_records(Vec::new());
        assert_eq!(ds.len(), 0);
        assert_eq!(ds.year_span(), None);
    }
}
