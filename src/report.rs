use std::io::Write;

use crate::data::model::Dataset;
use crate::stats::{ResultSet, StatValue, Statistic};

/// Print the available years and gender categories.
pub fn write_dataset_info<W: Write>(out: &mut W, dataset: &Dataset) -> std::io::Result<()> {
    writeln!(out, "\n=== Dataset quick info ===")?;
    if let Some(span) = dataset.year_span() {
        writeln!(out, "Years available: {} - {}", span.start(), span.end())?;
    }
    let genders: Vec<&str> = dataset.genders().iter().map(String::as_str).collect();
    writeln!(out, "Sex values in dataset: {}", genders.join(", "))
}

fn label(stat: Statistic) -> &'static str {
    match stat {
        Statistic::Average => "Average",
        Statistic::Max => "Max",
        Statistic::Min => "Min",
        Statistic::Median => "Median",
        Statistic::StdDev => "Std Dev (sample)",
        Statistic::PercentChange => "Percent Change (%)",
        Statistic::Trend => "Trend",
        Statistic::MovingAverage => "Moving Average",
    }
}

/// Print one line per statistic, in request order. Numbers are written at
/// full precision so small metrics stay readable.
pub fn write_results<W: Write>(out: &mut W, results: &ResultSet) -> std::io::Result<()> {
    writeln!(out, "\n=== RESULTS ===")?;
    for (stat, value) in results.iter() {
        let label = label(*stat);
        match value {
            StatValue::Scalar(v) => writeln!(out, "{label}: {v}")?,
            StatValue::Trend(t) => writeln!(
                out,
                "{label}: {} (slope {} per year, intercept {})",
                t.direction, t.slope, t.intercept
            )?,
            StatValue::Series(points) => {
                let rendered: Vec<String> = points
                    .iter()
                    .map(|(year, v)| format!("{year}: {v}"))
                    .collect();
                writeln!(out, "{label}: {}", rendered.join(", "))?
            }
        }
    }
    Ok(())
}
