use std::fmt;

use crate::data::series::YearlySeries;
use crate::error::{StatsError, StatsResult};

/// Slopes within this distance of zero count as flat.
const FLAT_EPSILON: f64 = 1e-9;

/// `(last − first) / first × 100` over a year-ordered series.
pub fn percent_change(series: &YearlySeries) -> StatsResult<f64> {
    let values = series.values();
    let (Some(&first), Some(&last)) = (values.first(), values.last()) else {
        return Err(StatsError::computation("percent_change", "no values"));
    };
    if first == 0.0 {
        return Err(StatsError::computation(
            "percent_change",
            "first value is 0, division by zero",
        ));
    }
    Ok((last - first) / first * 100.0)
}

// ---------------------------------------------------------------------------
// Trend
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Flat,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
            Direction::Flat => write!(f, "flat"),
        }
    }
}

/// Least-squares line `value = slope × year + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trend {
    /// Value change per year.
    pub slope: f64,
    pub intercept: f64,
    pub direction: Direction,
}

impl Trend {
    pub fn at(&self, year: i32) -> f64 {
        self.slope * year as f64 + self.intercept
    }
}

/// Ordinary least-squares fit of value against year.
pub fn trend(series: &YearlySeries) -> StatsResult<Trend> {
    let n = series.len();
    if n < 2 {
        return Err(StatsError::computation(
            "trend",
            format!("needs at least 2 years, got {n}"),
        ));
    }

    // Centre the years first: raw years squared lose precision quickly.
    let x_mean = series.years().iter().map(|&y| y as f64).sum::<f64>() / n as f64;
    let y_mean = series.values().iter().sum::<f64>() / n as f64;

    let (sxy, sxx) = series
        .points()
        .fold((0.0, 0.0), |(sxy, sxx), (year, value)| {
            let dx = year as f64 - x_mean;
            (sxy + dx * (value - y_mean), sxx + dx * dx)
        });

    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;
    let direction = if slope > FLAT_EPSILON {
        Direction::Up
    } else if slope < -FLAT_EPSILON {
        Direction::Down
    } else {
        Direction::Flat
    };

    Ok(Trend {
        slope,
        intercept,
        direction,
    })
}

// ---------------------------------------------------------------------------
// Moving average
// ---------------------------------------------------------------------------

/// Means over every full window of `window` consecutive years. A window
/// longer than the series shrinks to the series length, giving one point.
///
/// Holds only a borrow of the series; each call to [`MovingAverage::iter`]
/// recomputes from the start, so the sequence can be walked any number of
/// times with identical results.
#[derive(Debug, Clone, Copy)]
pub struct MovingAverage<'a> {
    series: &'a YearlySeries,
    window: usize,
}

impl<'a> MovingAverage<'a> {
    /// Fails when `window` is zero or the series is empty.
    pub fn new(series: &'a YearlySeries, window: usize) -> StatsResult<Self> {
        if window == 0 {
            return Err(StatsError::validation("moving average window must be at least 1"));
        }
        if series.len() == 0 {
            return Err(StatsError::computation("moving_average", "no values"));
        }
        let window = if window > series.len() {
            log::warn!(
                "moving average window of {window} years exceeds the {} year(s) selected, using {}",
                series.len(),
                series.len()
            );
            series.len()
        } else {
            window
        };
        Ok(Self { series, window })
    }

    /// `(year, mean)` pairs, where `year` is the last year of each window.
    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + 'a {
        let (series, window) = (self.series, self.window);
        series
            .values()
            .windows(window)
            .zip(series.years()[window - 1..].iter().copied())
            .map(move |(w, year)| (year, w.iter().sum::<f64>() / window as f64))
    }
}
