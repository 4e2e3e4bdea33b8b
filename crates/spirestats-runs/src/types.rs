use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::error::{Result, RunError};

/// The four playable characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Character {
    Ironclad,
    Silent,
    Defect,
    Watcher,
}

impl Character {
    pub const ALL: [Character; 4] = [
        Character::Ironclad,
        Character::Silent,
        Character::Defect,
        Character::Watcher,
    ];

    /// Identifier as written in `character_chosen` and used as the run directory name.
    pub fn id(self) -> &'static str {
        match self {
            Character::Ironclad => "IRONCLAD",
            Character::Silent => "THE_SILENT",
            Character::Defect => "DEFECT",
            Character::Watcher => "WATCHER",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Character::Ironclad => "Ironclad",
            Character::Silent => "Silent",
            Character::Defect => "Defect",
            Character::Watcher => "Watcher",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Character {
    type Err = String;

    /// Accepts either the identifier (`THE_SILENT`) or the display name (`silent`).
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.id().eq_ignore_ascii_case(s) || c.display_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown character: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win => f.write_str("win"),
            Outcome::Loss => f.write_str("loss"),
        }
    }
}

/// One recorded play session: the raw document plus its parsed top-level fields.
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub id: String,
    raw_text: String,
    fields: std::result::Result<Map<String, Value>, String>,
}

impl RunRecord {
    pub(crate) fn new(
        id: String,
        raw_text: String,
        fields: std::result::Result<Map<String, Value>, String>,
    ) -> Self {
        Self {
            id,
            raw_text,
            fields,
        }
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Parsed fields, or `MalformedRecord` if the document did not parse.
    pub fn fields(&self) -> Result<&Map<String, Value>> {
        self.fields
            .as_ref()
            .map_err(|reason| RunError::malformed(&self.id, reason.clone()))
    }

    pub fn is_parsed(&self) -> bool {
        self.fields.is_ok()
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.as_ref().ok().and_then(|f| f.get(name))
    }

    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }

    pub fn u64_field(&self, name: &str) -> Option<u64> {
        self.field(name).and_then(Value::as_u64)
    }
}

/// A maximal chronological run of wins.
#[derive(Debug, Clone)]
pub struct Streak {
    runs: Vec<RunRecord>,
}

impl Streak {
    pub(crate) fn new(runs: Vec<RunRecord>) -> Self {
        Self { runs }
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Runs in chronological order.
    pub fn runs(&self) -> &[RunRecord] {
        &self.runs
    }

    pub fn first(&self) -> Option<&RunRecord> {
        self.runs.first()
    }
}

/// Win rate over a population of runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WinRate {
    pub total: usize,
    pub losses: usize,
    pub percent: f64,
}

impl WinRate {
    pub fn wins(&self) -> usize {
        self.total - self.losses
    }
}

/// Filter parameters for selecting runs.
#[derive(Debug, Default, Clone)]
pub struct RunFilter {
    pub character: Option<Character>,
    pub ascension: Option<u32>,
    pub outcome: Option<Outcome>,
    /// Inclusive lower bound on the run's local date.
    pub after: Option<NaiveDate>,
    /// Inclusive upper bound on the run's local date.
    pub before: Option<NaiveDate>,
}
