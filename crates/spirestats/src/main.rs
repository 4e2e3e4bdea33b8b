mod config;
mod report;
mod runs;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use spirestats_logging::{init_tracing, LogFormat};
use spirestats_runs::{DirRunSource, ReportConfig};

use config::Config;
use runs::{parse_date_arg, ListArgs};

#[derive(Parser, Debug)]
#[command(
    name = "spirestats",
    about = "Win rates and win streaks from local game run logs",
    version,
    author
)]
struct Cli {
    /// Directory holding one sub-directory of run files per character (default: ./runs)
    #[arg(long, global = true)]
    runs_dir: Option<PathBuf>,

    /// Ascension level to report on (default: 9); `list` shows every level without it
    #[arg(long, global = true)]
    ascension: Option<u32>,

    /// Log level, overridden by RUST_LOG
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value = "pretty")]
    log_format: LogFormatChoice,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print win rates and best streaks (default)
    Report {
        /// Only count runs on or after this date (YYYY-MM-DD)
        #[arg(long)]
        after: Option<String>,

        /// Only count runs on or before this date (YYYY-MM-DD)
        #[arg(long)]
        before: Option<String>,
    },

    /// List individual runs, newest first
    List(ListArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatChoice {
    Pretty,
    Json,
    Compact,
}

impl From<LogFormatChoice> for LogFormat {
    fn from(choice: LogFormatChoice) -> Self {
        match choice {
            LogFormatChoice::Pretty => LogFormat::Pretty,
            LogFormatChoice::Json => LogFormat::Json,
            LogFormatChoice::Compact => LogFormat::Compact,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_format.into());

    let working_dir = std::env::current_dir().context("Failed to get current directory")?;
    let config = Config::load(&working_dir)?.unwrap_or_default();

    let source = DirRunSource::new(config.runs_dir(cli.runs_dir.as_deref()));
    if !source.runs_dir().exists() {
        tracing::warn!("Runs directory {} does not exist", source.runs_dir().display());
    }

    match cli.command {
        Some(Commands::List(args)) => runs::handle_list_command(&source, args, cli.ascension),
        Some(Commands::Report { after, before }) => {
            let report_config = ReportConfig {
                ascension: config.ascension(cli.ascension),
                after: parse_date_arg("--after", after)?,
                before: parse_date_arg("--before", before)?,
            };
            report::handle_report_command(&source, &report_config)
        }
        None => {
            let report_config = ReportConfig {
                ascension: config.ascension(cli.ascension),
                ..Default::default()
            };
            report::handle_report_command(&source, &report_config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_ascension_without_subcommand() {
        let cli = Cli::try_parse_from(["spirestats", "--ascension", "20"]).unwrap();
        assert_eq!(cli.ascension, Some(20));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_ascension_on_either_side_of_subcommand() {
        let cli = Cli::try_parse_from(["spirestats", "report", "--ascension", "15"]).unwrap();
        assert_eq!(cli.ascension, Some(15));
        assert!(matches!(cli.command, Some(Commands::Report { .. })));

        let cli = Cli::try_parse_from(["spirestats", "--ascension", "0", "list"]).unwrap();
        assert_eq!(cli.ascension, Some(0));
        assert!(matches!(cli.command, Some(Commands::List(_))));
    }

    #[test]
    fn test_ascension_absent_by_default() {
        let cli = Cli::try_parse_from(["spirestats", "list", "--character", "watcher"]).unwrap();
        assert_eq!(cli.ascension, None);
    }
}
