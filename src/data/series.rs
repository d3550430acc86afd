use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::model::Record;
use crate::error::StatsError;

/// How several rows falling in the same year collapse into one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Aggregation {
    #[default]
    Sum,
    Mean,
}

impl FromStr for Aggregation {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sum" => Ok(Aggregation::Sum),
            "mean" | "average" => Ok(Aggregation::Mean),
            other => Err(StatsError::validation(format!(
                "unknown aggregation '{other}' (expected sum or mean)"
            ))),
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Aggregation::Sum => write!(f, "sum"),
            Aggregation::Mean => write!(f, "mean"),
        }
    }
}

/// One value per year, ascending by year. All statistics run on this.
#[derive(Debug, Clone, PartialEq)]
pub struct YearlySeries {
    years: Vec<i32>,
    values: Vec<f64>,
}

impl YearlySeries {
    pub fn aggregate<'a>(
        records: impl IntoIterator<Item = &'a Record>,
        how: Aggregation,
    ) -> Self {
        let mut buckets: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
        for r in records {
            let slot = buckets.entry(r.year).or_insert((0.0, 0));
            slot.0 += r.value;
            slot.1 += 1;
        }

        let (years, values) = buckets
            .into_iter()
            .map(|(year, (sum, n))| {
                let v = match how {
                    Aggregation::Sum => sum,
                    Aggregation::Mean => sum / n as f64,
                };
                (year, v)
            })
            .unzip();

        YearlySeries { years, values }
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// `(year, value)` pairs in year order.
    pub fn points(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.years.iter().copied().zip(self.values.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregates_per_year_in_order() {
        let rows = vec![
            Record::new(2020, "Males", 1.0),
            Record::new(2018, "Males", 2.0),
            Record::new(2020, "Females", 3.0),
        ];
        let sum = YearlySeries::aggregate(&rows, Aggregation::Sum);
        assert_eq!(sum.years(), &[2018, 2020]);
        assert_eq!(sum.values(), &[2.0, 4.0]);

        let mean = YearlySeries::aggregate(&rows, Aggregation::Mean);
        assert_eq!(mean.values(), &[2.0, 2.0]);
    }

    #[test]
    fn aggregation_parse() {
        assert_eq!("SUM".parse::<Aggregation>().unwrap(), Aggregation::Sum);
        assert_eq!("mean".parse::<Aggregation>().unwrap(), Aggregation::Mean);
        assert!("median".parse::<Aggregation>().is_err());
    }
}
