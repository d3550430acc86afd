use std::io::{BufRead, Write};

use crate::data::filter::Gender;
use crate::error::{StatsError, StatsResult};
use crate::stats::{Statistic, StatisticRequest};

// ---------------------------------------------------------------------------
// Console prompts
// ---------------------------------------------------------------------------

/// Line-oriented question/answer over any reader and writer.
///
/// Each `choose_*` method takes an optional preset; a preset answer is
/// validated exactly like a typed one but skips the question.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writer used for everything that is not a question (info, results).
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Print `question`, read one line. End of input counts as a blank answer.
    fn ask(&mut self, question: &str) -> StatsResult<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }

    pub fn choose_gender(&mut self, preset: Option<&str>) -> StatsResult<Gender> {
        let answer = match preset {
            Some(p) => p.to_string(),
            None => {
                writeln!(self.output, "\n=== Gender Selection ===")?;
                self.ask("Choose gender (All / Male / Female): ")?
            }
        };
        Gender::parse(&answer)
    }

    /// Ask for start and end year; a blank answer takes the default shown in brackets.
    pub fn choose_years(
        &mut self,
        default_start: i32,
        default_end: i32,
        preset_start: Option<i32>,
        preset_end: Option<i32>,
    ) -> StatsResult<(i32, i32)> {
        if preset_start.is_none() || preset_end.is_none() {
            writeln!(self.output, "\n=== Date Range ===")?;
        }
        let start = match preset_start {
            Some(y) => y,
            None => self.ask_year(&format!("Start year [{default_start}]: "), default_start)?,
        };
        let end = match preset_end {
            Some(y) => y,
            None => self.ask_year(&format!("End year [{default_end}]: "), default_end)?,
        };
        Ok((start, end))
    }

    fn ask_year(&mut self, question: &str, default: i32) -> StatsResult<i32> {
        let answer = self.ask(question)?;
        if answer.is_empty() {
            return Ok(default);
        }
        answer
            .parse()
            .map_err(|_| StatsError::validation(format!("'{answer}' is not a year")))
    }

    pub fn choose_statistics(&mut self, preset: Option<&str>) -> StatsResult<StatisticRequest> {
        let answer = match preset {
            Some(p) => p.to_string(),
            None => {
                let options: Vec<&str> = Statistic::ALL.iter().map(|s| s.name()).collect();
                writeln!(self.output, "\n=== Statistical Options ===")?;
                writeln!(self.output, "Options: {}", options.join(", "))?;
                self.ask("Enter your choices separated by comma: ")?
            }
        };
        StatisticRequest::parse(&answer)
    }
}
