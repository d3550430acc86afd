use eframe::egui::Ui;
use egui_plot::{Legend, Line, LineStyle, Plot, PlotPoints, Points};

use crate::color::ChartColors;
use crate::runner::RunOutcome;
use crate::stats::{StatValue, Statistic};

// ---------------------------------------------------------------------------
// Chart data – everything the plot draws, precomputed once
// ---------------------------------------------------------------------------

/// Series ready for plotting; built once from a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub data: Vec<[f64; 2]>,
    pub trend: Option<Vec<[f64; 2]>>,
    pub moving_average: Option<(usize, Vec<[f64; 2]>)>,
    pub y_label: String,
}

impl ChartData {
    pub fn from_outcome(outcome: &RunOutcome, y_label: &str) -> Self {
        let data: Vec<[f64; 2]> = outcome
            .series
            .points()
            .map(|(year, v)| [year as f64, v])
            .collect();

        let trend = match outcome.results.get(Statistic::Trend) {
            Some(StatValue::Trend(t)) => Some(
                outcome
                    .series
                    .years()
                    .iter()
                    .map(|&year| [year as f64, t.at(year)])
                    .collect(),
            ),
            _ => None,
        };

        let moving_average = match outcome.results.get(Statistic::MovingAverage) {
            // A capped window yields one point, so derive the width actually used.
            Some(StatValue::Series(points)) => Some((
                outcome.series.len() + 1 - points.len(),
                points.iter().map(|&(year, v)| [year as f64, v]).collect(),
            )),
            _ => None,
        };

        ChartData {
            data,
            trend,
            moving_average,
            y_label: y_label.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Yearly value plot (central panel)
// ---------------------------------------------------------------------------

/// Render the yearly series, plus trend and moving average when requested.
pub fn yearly_plot(ui: &mut Ui, chart: &ChartData, colors: &ChartColors) {
    Plot::new("yearly_plot")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label(chart.y_label.as_str())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let points: PlotPoints = chart.data.iter().copied().collect();
            plot_ui.line(
                Line::new(points)
                    .name("Data")
                    .color(colors.data)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(chart.data.clone())
                    .name("Data")
                    .color(colors.data)
                    .radius(3.5),
            );

            if let Some(trend) = &chart.trend {
                plot_ui.line(
                    Line::new(trend.clone())
                        .name("Trend Line")
                        .color(colors.trend)
                        .style(LineStyle::dashed_loose())
                        .width(1.5),
                );
            }

            if let Some((window, ma)) = &chart.moving_average {
                plot_ui.line(
                    Line::new(ma.clone())
                        .name(format!("Moving Average ({window}-Year)"))
                        .color(colors.moving_average)
                        .width(1.5),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filter_records, FilterCriteria, Gender};
    use crate::data::model::{Dataset, Record};
    use crate::data::series::{Aggregation, YearlySeries};
    use crate::stats::{compute, StatisticRequest};

    fn outcome(stats: &str, window: usize) -> RunOutcome {
        let ds = Dataset::from_records(vec![
            Record::new(2018, "Male", 1.0),
            Record::new(2019, "Male", 2.0),
            Record::new(2020, "Male", 3.0),
        ]);
        let criteria = FilterCriteria::new(&ds, Gender::Male, 2018, 2020).unwrap();
        let rows = filter_records(&ds, &criteria).unwrap();
        let series = YearlySeries::aggregate(rows.iter().copied(), Aggregation::Sum);
        let request = StatisticRequest::parse(stats).unwrap();
        let results = compute(&series, &request, window).unwrap();
        RunOutcome {
            criteria,
            series,
            results,
        }
    }

    #[test]
    fn only_requested_overlays() {
        let chart = ChartData::from_outcome(&outcome("average", 2), "Value");
        assert_eq!(chart.data, vec![[2018.0, 1.0], [2019.0, 2.0], [2020.0, 3.0]]);
        assert!(chart.trend.is_none());
        assert!(chart.moving_average.is_none());
    }

    #[test]
    fn trend_and_moving_average_overlays() {
        let chart = ChartData::from_outcome(&outcome("trend,moving_average", 2), "Value");
        let trend = chart.trend.unwrap();
        assert_eq!(trend.len(), 3);
        assert!((trend[2][1] - 3.0).abs() < 1e-6);
        assert_eq!(
            chart.moving_average,
            Some((2, vec![[2019.0, 1.5], [2020.0, 2.5]]))
        );
    }

    #[test]
    fn oversized_window_labelled_with_width_used() {
        let chart = ChartData::from_outcome(&outcome("moving_average", 10), "Value");
        assert_eq!(chart.moving_average, Some((3, vec![[2020.0, 2.0]])));
    }
}
