mod app;
mod color;
mod config;
mod data;
mod error;
mod prompt;
mod report;
mod runner;
mod stats;
mod ui;

use std::io;
use std::process::ExitCode;

use clap::Parser;

use app::ChartApp;
use config::{Cli, RunConfig};
use prompt::Prompter;
use runner::StatsRunner;
use ui::plot::ChartData;

fn run() -> anyhow::Result<()> {
    let config = RunConfig::from(Cli::parse());
    let runner = StatsRunner::new(config);

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    let outcome = runner.run(&mut prompter)?;

    let config = runner.config();
    if !config.plot {
        return Ok(());
    }

    let chart = ChartData::from_outcome(
        &outcome,
        &format!("{} ({})", config.columns.value, config.aggregation),
    );
    ChartApp::new(outcome.criteria.to_string(), chart)
        .run()
        .inspect_err(|e| log::error!("{e:#}"))
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
