use anyhow::Result;
use colored::Colorize;

use spirestats_runs::predicates::{self, local_time};
use spirestats_runs::{
    format_local_time, Character, DirRunSource, Report, ReportConfig, ReportSection, RunError,
    RunRecord, SectionKind, Streak, WinRate,
};

pub fn handle_report_command(source: &DirRunSource, config: &ReportConfig) -> Result<()> {
    let report = Report::build(source, &Character::ALL, config)?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &Report) {
    for (i, section) in report.sections.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_section(section, report.ascension);
    }
}

fn print_section(section: &ReportSection, ascension: u32) {
    println!(
        "{}",
        format!("=== {} ===", section.label()).bright_blue().bold()
    );

    let label = format!("Ascension {} win rate:", ascension);
    match &section.win_rate {
        Ok(rate) => println!("{}  {}", label.dimmed(), format_win_rate(rate)),
        Err(RunError::EmptyPopulation) => println!(
            "{}  {}",
            label.dimmed(),
            format!("n/a (no runs at ascension {})", ascension).dimmed()
        ),
        Err(e) => println!("{}  {}", label.dimmed(), e.to_string().bright_red()),
    }

    let streak_label = match section.kind {
        SectionKind::Combined => "Best rotating streak:",
        SectionKind::Character(_) => "Best streak:",
    };
    match &section.best_streak {
        Ok(Some(streak)) => print_streak(streak_label, streak, section.kind),
        Ok(None) => println!("{}  {}", streak_label.dimmed(), "none".dimmed()),
        Err(e) => println!("{}  {}", streak_label.dimmed(), e.to_string().bright_red()),
    }
}

fn format_win_rate(rate: &WinRate) -> String {
    let percent = format!("{:.1}%", rate.percent);
    let shown = if rate.percent >= 50.0 {
        percent.bright_green()
    } else {
        percent.bright_yellow()
    };
    format!("{} ({}/{} won)", shown, rate.wins(), rate.total)
}

fn print_streak(label: &str, streak: &Streak, kind: SectionKind) {
    println!(
        "{}  {}",
        label.dimmed(),
        streak.len().to_string().bright_green().bold()
    );
    for run in streak.runs() {
        let date = run_date(run);
        match kind {
            // Rotating streaks mix characters, so name each one.
            SectionKind::Combined => println!("  {}  {}", date, run_character(run).dimmed()),
            SectionKind::Character(_) => println!("  {}", date),
        }
    }
}

pub(crate) fn run_date(run: &RunRecord) -> String {
    match local_time(run).and_then(|stamp| format_local_time(&stamp)) {
        Ok(date) => date,
        Err(e) => e.to_string().bright_red().to_string(),
    }
}

pub(crate) fn run_character(run: &RunRecord) -> String {
    match predicates::character(run) {
        Ok(Some(c)) => c.display_name().to_string(),
        Ok(None) => run
            .str_field(predicates::CHARACTER_CHOSEN)
            .unwrap_or("?")
            .to_string(),
        Err(_) => "?".to_string(),
    }
}
