//! Statistics over a [`YearlySeries`]: selection parsing, computation and
//! the ordered result set handed to the report and the chart.

pub mod descriptive;
pub mod temporal;

use std::fmt;
use std::str::FromStr;

use crate::data::series::YearlySeries;
use crate::error::{StatsError, StatsResult};

pub use temporal::{Direction, MovingAverage, Trend};

// ---------------------------------------------------------------------------
// Statistic – the fixed menu
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Statistic {
    Average,
    Max,
    Min,
    Median,
    StdDev,
    PercentChange,
    Trend,
    MovingAverage,
}

impl Statistic {
    pub const ALL: [Statistic; 8] = [
        Statistic::Average,
        Statistic::Max,
        Statistic::Min,
        Statistic::Median,
        Statistic::StdDev,
        Statistic::PercentChange,
        Statistic::Trend,
        Statistic::MovingAverage,
    ];

    /// Canonical name, as shown in the prompt.
    pub fn name(self) -> &'static str {
        match self {
            Statistic::Average => "average",
            Statistic::Max => "max",
            Statistic::Min => "min",
            Statistic::Median => "median",
            Statistic::StdDev => "stddev",
            Statistic::PercentChange => "percent_change",
            Statistic::Trend => "trend",
            Statistic::MovingAverage => "moving_average",
        }
    }
}

impl FromStr for Statistic {
    type Err = StatsError;

    /// Accepts the canonical name with `_`, a space or `-` as separator.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_ascii_lowercase()
            .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("_");
        Statistic::ALL
            .into_iter()
            .find(|stat| stat.name() == key)
            .ok_or_else(|| StatsError::validation(format!("unknown statistic '{}'", s.trim())))
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// StatisticRequest – what the user asked for, in order
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticRequest(Vec<Statistic>);

impl StatisticRequest {
    /// Parse a comma-separated list. Repeats are dropped, keeping the first.
    pub fn parse(input: &str) -> StatsResult<Self> {
        let mut stats: Vec<Statistic> = Vec::new();
        for token in input.split(',').filter(|t| !t.trim().is_empty()) {
            let stat: Statistic = token.parse()?;
            if !stats.contains(&stat) {
                stats.push(stat);
            }
        }
        if stats.is_empty() {
            return Err(StatsError::validation("no statistics selected"));
        }
        Ok(Self(stats))
    }

    pub fn iter(&self) -> impl Iterator<Item = Statistic> + '_ {
        self.0.iter().copied()
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum StatValue {
    Scalar(f64),
    Trend(Trend),
    /// `(year, value)` points, e.g. a moving average.
    Series(Vec<(i32, f64)>),
}

/// Computed values in request order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    entries: Vec<(Statistic, StatValue)>,
}

impl ResultSet {
    pub fn get(&self, stat: Statistic) -> Option<&StatValue> {
        self.entries
            .iter()
            .find(|(s, _)| *s == stat)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Statistic, StatValue)> {
        self.entries.iter()
    }
}

/// Compute every requested statistic. The first failure aborts the whole set.
pub fn compute(
    series: &YearlySeries,
    request: &StatisticRequest,
    window: usize,
) -> StatsResult<ResultSet> {
    let values = series.values();
    let mut entries = Vec::new();

    for stat in request.iter() {
        let value = match stat {
            Statistic::Average => StatValue::Scalar(descriptive::mean(values)?),
            Statistic::Max => StatValue::Scalar(descriptive::max(values)?),
            Statistic::Min => StatValue::Scalar(descriptive::min(values)?),
            Statistic::Median => StatValue::Scalar(descriptive::median(values)?),
            Statistic::StdDev => StatValue::Scalar(descriptive::sample_std_dev(values)?),
            Statistic::PercentChange => StatValue::Scalar(temporal::percent_change(series)?),
            Statistic::Trend => StatValue::Trend(temporal::trend(series)?),
            Statistic::MovingAverage => {
                StatValue::Series(MovingAverage::new(series, window)?.iter().collect())
            }
        };
        log::debug!("computed {stat}: {value:?}");
        entries.push((stat, value));
    }

    Ok(ResultSet { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;
    use crate::data::series::Aggregation;

    fn scalar(results: &ResultSet, stat: Statistic) -> f64 {
        match results.get(stat) {
            Some(StatValue::Scalar(v)) => *v,
            other => panic!("{stat} is not a scalar: {other:?}"),
        }
    }

    fn sales() -> YearlySeries {
        let rows = vec![
            Record::new(2018, "Male", 100.0),
            Record::new(2019, "Male", 150.0),
            Record::new(2020, "Male", 200.0),
        ];
        YearlySeries::aggregate(&rows, Aggregation::Sum)
    }

    #[test]
    fn statistic_names_round_trip_with_separators() {
        assert_eq!("percent change".parse::<Statistic>().unwrap(), Statistic::PercentChange);
        assert_eq!("Moving-Average".parse::<Statistic>().unwrap(), Statistic::MovingAverage);
        assert_eq!(" STDDEV ".parse::<Statistic>().unwrap(), Statistic::StdDev);
        assert!("mode".parse::<Statistic>().is_err());
    }

    #[test]
    fn request_keeps_order_and_drops_repeats() {
        let req = StatisticRequest::parse("trend, average,,max,average").unwrap();
        assert_eq!(
            req.iter().collect::<Vec<_>>(),
            vec![Statistic::Trend, Statistic::Average, Statistic::Max]
        );
    }

    #[test]
    fn request_rejects_unknown_and_empty() {
        assert!(matches!(
            StatisticRequest::parse("average, variance"),
            Err(StatsError::Validation(_))
        ));
        assert!(matches!(
            StatisticRequest::parse(" , "),
            Err(StatsError::Validation(_))
        ));
    }

    #[test]
    fn sales_scenario() {
        let req = StatisticRequest::parse("average,percent_change").unwrap();
        let results = compute(&sales(), &req, 3).unwrap();
        assert_eq!(results.iter().count(), 2);
        let avg = scalar(&results, Statistic::Average);
        let pct = scalar(&results, Statistic::PercentChange);
        assert!((avg - 150.0).abs() < 1e-9);
        assert!((pct - 100.0).abs() < 1e-9);
        let order: Vec<Statistic> = results.iter().map(|(s, _)| *s).collect();
        assert_eq!(order, vec![Statistic::Average, Statistic::PercentChange]);
    }

    #[test]
    fn every_statistic_computes() {
        let req = StatisticRequest::parse(
            "average,max,min,median,stddev,percent_change,trend,moving_average",
        )
        .unwrap();
        let results = compute(&sales(), &req, 2).unwrap();
        assert_eq!(results.iter().count(), Statistic::ALL.len());
        assert_eq!(
            results.get(Statistic::MovingAverage),
            Some(&StatValue::Series(vec![(2019, 125.0), (2020, 175.0)]))
        );
        assert!(matches!(
            results.get(Statistic::Trend),
            Some(StatValue::Trend(t)) if t.direction == Direction::Up
        ));
    }

    #[test]
    fn failure_aborts_set() {
        let rows = vec![Record::new(2018, "Male", 5.0)];
        let single = YearlySeries::aggregate(&rows, Aggregation::Sum);
        let req = StatisticRequest::parse("average,stddev").unwrap();
        assert!(matches!(
            compute(&single, &req, 3),
            Err(StatsError::Computation { statistic: "stddev", .. })
        ));
    }
}
