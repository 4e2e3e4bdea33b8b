//! # spirestats-runs
//!
//! Loading, classification and aggregation of game run logs.
//!
//! Data flows one way: a [`RunSource`] yields raw run documents, the
//! [`predicates`] classify them, [`streaks`] groups wins in time order and
//! [`Report`] composes win rates and best streaks per character.

pub mod dates;
pub mod error;
pub mod parser;
pub mod predicates;
pub mod report;
pub mod source;
pub mod stats;
pub mod streaks;
pub mod types;

pub use dates::{format_local_time, local_date, LocalTime};
pub use error::{Result, RunError};
pub use parser::{parse_fields, parse_run};
pub use predicates::{contains, has_ascension, is_rotating, is_win};
pub use report::{Report, ReportConfig, ReportSection, SectionKind, DEFAULT_ASCENSION};
pub use source::{list_runs, load_all, load_runs, DirRunSource, RunEntry, RunSource};
pub use stats::win_rate;
pub use streaks::{longest_rotating_streak, longest_streak, win_streaks};
pub use types::{Character, Outcome, RunFilter, RunRecord, Streak, WinRate};
