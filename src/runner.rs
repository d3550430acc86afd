use std::io::{BufRead, Write};

use crate::config::RunConfig;
use crate::data::filter::{filter_records, FilterCriteria, Gender};
use crate::data::loader::load_file;
use crate::data::model::Dataset;
use crate::data::series::YearlySeries;
use crate::error::StatsResult;
use crate::prompt::Prompter;
use crate::report;
use crate::stats::{compute, ResultSet};

// ---------------------------------------------------------------------------
// Run output
// ---------------------------------------------------------------------------

/// Everything one run produced, kept for the chart.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub criteria: FilterCriteria,
    pub series: YearlySeries,
    pub results: ResultSet,
}

// ---------------------------------------------------------------------------
// StatsRunner
// ---------------------------------------------------------------------------

/// Load → filter → compute → print, strictly in that order.
pub struct StatsRunner {
    config: RunConfig,
}

impl StatsRunner {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn load(&self) -> StatsResult<Dataset> {
        let dataset = load_file(&self.config.data_path, &self.config.columns)?;
        log::info!(
            "Loaded {} rows from {} (years {:?}, genders {:?})",
            dataset.len(),
            self.config.data_path.display(),
            dataset.year_span(),
            dataset.genders()
        );
        Ok(dataset)
    }

    /// Run the whole pipeline against an already loaded dataset.
    pub fn run_with<R: BufRead, W: Write>(
        &self,
        dataset: &Dataset,
        prompter: &mut Prompter<R, W>,
    ) -> StatsResult<RunOutcome> {
        let presets = &self.config.presets;
        report::write_dataset_info(prompter.output(), dataset)?;

        let gender = prompter.choose_gender(presets.gender.as_deref())?;
        let (default_start, default_end) = default_years(dataset, gender);

        let (start, end) =
            prompter.choose_years(default_start, default_end, presets.start_year, presets.end_year)?;
        let criteria = FilterCriteria::new(dataset, gender, start, end)?;
        let selected = filter_records(dataset, &criteria)?;

        let series = YearlySeries::aggregate(selected.iter().copied(), self.config.aggregation);
        log::debug!(
            "{} rows aggregated ({}) into {} yearly values",
            selected.len(),
            self.config.aggregation,
            series.len()
        );

        let request = prompter.choose_statistics(presets.stats.as_deref())?;
        let results = compute(&series, &request, self.config.window)?;
        report::write_results(prompter.output(), &results)?;

        Ok(RunOutcome {
            criteria,
            series,
            results,
        })
    }

    /// Load the configured file and run the pipeline.
    pub fn run<R: BufRead, W: Write>(
        &self,
        prompter: &mut Prompter<R, W>,
    ) -> StatsResult<RunOutcome> {
        let dataset = self.load()?;
        self.run_with(&dataset, prompter)
    }
}

/// Year range offered as the prompt default: the span of rows with the chosen
/// gender, falling back to the whole dataset when that gender has no rows.
fn default_years(dataset: &Dataset, gender: Gender) -> (i32, i32) {
    let mut years = dataset
        .records()
        .iter()
        .filter(|r| gender.matches(&r.gender))
        .map(|r| r.year);
    let first = years.next();
    let span = first.map(|f| years.fold((f, f), |(lo, hi), y| (lo.min(y), hi.max(y))));
    span.or_else(|| dataset.year_span().map(|s| (*s.start(), *s.end())))
        .unwrap_or((0, 0))
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write as _};
    use std::path::PathBuf;

    use super::*;
    use crate::config::Presets;
    use crate::data::model::{ColumnNames, Record};
    use crate::data::series::Aggregation;
    use crate::error::StatsError;
    use crate::stats::{ResultSet, StatValue, Statistic};

    fn config(presets: Presets) -> RunConfig {
        RunConfig {
            data_path: PathBuf::from("unused.csv"),
            columns: ColumnNames::default(),
            aggregation: Aggregation::Sum,
            window: 3,
            presets,
            plot: false,
        }
    }

    fn sales() -> Dataset {
        Dataset::from_records(vec![
            Record::new(2018, "Male", 100.0),
            Record::new(2019, "Male", 150.0),
            Record::new(2020, "Male", 200.0),
        ])
    }

    fn scalar(results: &ResultSet, stat: Statistic) -> Option<f64> {
        match results.get(stat) {
            Some(StatValue::Scalar(v)) => Some(*v),
            _ => None,
        }
    }

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn sales_scenario_interactive() {
        let runner = StatsRunner::new(config(Presets::default()));
        let mut p = prompter("Male\n2018\n2020\naverage,percent_change\n");
        let outcome = runner.run_with(&sales(), &mut p).unwrap();

        assert_eq!(scalar(&outcome.results, Statistic::Average), Some(150.0));
        assert_eq!(scalar(&outcome.results, Statistic::PercentChange), Some(100.0));
        assert_eq!(outcome.series.years(), &[2018, 2019, 2020]);

        let out = String::from_utf8(p.output().clone()).unwrap();
        assert!(out.contains("Average: 150\n"));
        assert!(out.contains("Percent Change (%): 100\n"));
    }

    #[test]
    fn empty_filter_stops_before_statistics() {
        let runner = StatsRunner::new(config(Presets {
            gender: Some("Female".into()),
            start_year: Some(2018),
            end_year: Some(2020),
            stats: None,
        }));
        let mut p = prompter("");
        let err = runner.run_with(&sales(), &mut p).unwrap_err();
        assert!(matches!(err, StatsError::EmptyResult(_)));
        let out = String::from_utf8(p.output().clone()).unwrap();
        assert!(!out.contains("Statistical Options"));
    }

    #[test]
    fn defaults_follow_gender() {
        let ds = Dataset::from_records(vec![
            Record::new(2010, "Females", 1.0),
            Record::new(2015, "Males", 1.0),
            Record::new(2012, "Males", 1.0),
            Record::new(2020, "Females", 1.0),
        ]);
        assert_eq!(default_years(&ds, Gender::Male), (2012, 2015));
        assert_eq!(default_years(&ds, Gender::All), (2010, 2020));
        let males_only = sales();
        assert_eq!(default_years(&males_only, Gender::Female), (2018, 2020));
    }

    #[test]
    fn run_loads_configured_file() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Time,Sex,Value").unwrap();
        writeln!(file, "2018,Males,10").unwrap();
        writeln!(file, "2018,Females,30").unwrap();
        writeln!(file, "2019,Males,20").unwrap();
        writeln!(file, "2019,Females,40").unwrap();

        let mut cfg = config(Presets {
            gender: Some("all".into()),
            start_year: None,
            end_year: None,
            stats: Some("max,min".into()),
        });
        cfg.data_path = file.path().to_path_buf();
        let runner = StatsRunner::new(cfg);

        let outcome = runner.run(&mut prompter("\n\n")).unwrap();
        assert_eq!(outcome.series.values(), &[40.0, 60.0]);
        assert_eq!(scalar(&outcome.results, Statistic::Max), Some(60.0));
    }

    #[test]
    fn missing_file_reported() {
        let runner = StatsRunner::new(config(Presets::default()));
        assert!(matches!(
            runner.run(&mut prompter("")),
            Err(StatsError::FileLoad { .. })
        ));
    }
}
