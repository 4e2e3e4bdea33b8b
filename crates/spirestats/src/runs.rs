use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use colored::Colorize;

use spirestats_runs::predicates::{self, FLOOR_REACHED, KILLED_BY};
use spirestats_runs::{list_runs, Character, DirRunSource, Outcome, RunFilter, RunRecord};

use crate::report::{run_character, run_date};

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only runs for this character (ironclad, silent, defect, watcher)
    #[arg(long)]
    pub character: Option<Character>,

    /// Only wins or only losses
    #[arg(long, value_enum)]
    pub outcome: Option<OutcomeChoice>,

    /// Show runs on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub after: Option<String>,

    /// Show runs on or before this date (YYYY-MM-DD)
    #[arg(long)]
    pub before: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutcomeChoice {
    Win,
    Loss,
}

impl From<OutcomeChoice> for Outcome {
    fn from(choice: OutcomeChoice) -> Self {
        match choice {
            OutcomeChoice::Win => Outcome::Win,
            OutcomeChoice::Loss => Outcome::Loss,
        }
    }
}

pub fn handle_list_command(
    source: &DirRunSource,
    args: ListArgs,
    ascension: Option<u32>,
) -> Result<()> {
    let filter = build_filter(args, ascension)?;
    let runs = list_runs(source, &filter)?;

    if runs.is_empty() {
        println!("{}", "No runs found.".dimmed());
    } else {
        print_runs_table(&runs);
    }
    Ok(())
}

fn build_filter(args: ListArgs, ascension: Option<u32>) -> Result<RunFilter> {
    Ok(RunFilter {
        character: args.character,
        ascension,
        outcome: args.outcome.map(Outcome::from),
        after: parse_date_arg("--after", args.after)?,
        before: parse_date_arg("--before", args.before)?,
    })
}

pub(crate) fn parse_date_arg(flag: &str, value: Option<String>) -> Result<Option<NaiveDate>> {
    value
        .map(|s| {
            NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                .map_err(|e| anyhow::anyhow!("Invalid {} date: {}", flag, e))
        })
        .transpose()
}

fn print_runs_table(runs: &[RunRecord]) {
    println!(
        "{:<20} {:<10} {:<4} {:<6} {:<6} {}",
        "DATE".dimmed(),
        "CHARACTER".dimmed(),
        "ASC".dimmed(),
        "RESULT".dimmed(),
        "FLOOR".dimmed(),
        "KILLED BY".dimmed(),
    );

    for run in runs {
        let ascension = predicates::ascension_level(run)
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "?".to_string());
        // Pad before coloring so escape codes don't skew the column.
        let outcome = match predicates::outcome(run) {
            Outcome::Win => format!("{:<6}", "win").bright_green(),
            Outcome::Loss => format!("{:<6}", "loss").bright_red(),
        };
        let floor = run
            .u64_field(FLOOR_REACHED)
            .map(|f| f.to_string())
            .unwrap_or_else(|| "-".to_string());
        let killed_by = run.str_field(KILLED_BY).unwrap_or("");

        println!(
            "{:<20} {:<10} {:<4} {} {:<6} {}",
            run_date(run),
            run_character(run),
            ascension,
            outcome,
            floor,
            killed_by
        );
    }
}
