use chrono::NaiveDate;

use crate::error::RunError;
use crate::predicates::sort_key;
use crate::source::{load_runs, RunSource};
use crate::stats::win_rate;
use crate::streaks::{longest_rotating_streak, longest_streak};
use crate::types::{Character, RunFilter, RunRecord, Streak, WinRate};

/// Ascension level the report is computed at unless configured otherwise.
pub const DEFAULT_ASCENSION: u32 = 9;

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub ascension: u32,
    pub after: Option<NaiveDate>,
    pub before: Option<NaiveDate>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            ascension: DEFAULT_ASCENSION,
            after: None,
            before: None,
        }
    }
}

impl ReportConfig {
    fn filter(&self) -> RunFilter {
        RunFilter {
            ascension: Some(self.ascension),
            after: self.after,
            before: self.before,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// All requested characters together; its streak must be rotating.
    Combined,
    Character(Character),
}

#[derive(Debug, Clone)]
pub struct ReportSection {
    pub kind: SectionKind,
    pub win_rate: Result<WinRate, RunError>,
    pub best_streak: Result<Option<Streak>, RunError>,
}

impl ReportSection {
    fn compute(kind: SectionKind, runs: &[RunRecord]) -> Self {
        let best_streak = match kind {
            SectionKind::Combined => longest_rotating_streak(runs),
            SectionKind::Character(_) => longest_streak(runs),
        };
        Self {
            kind,
            win_rate: win_rate(runs),
            best_streak,
        }
    }

    pub fn label(&self) -> &'static str {
        match self.kind {
            SectionKind::Combined => "All Characters",
            SectionKind::Character(c) => c.display_name(),
        }
    }
}

/// Win rates and best streaks, combined first and then per character.
#[derive(Debug, Clone)]
pub struct Report {
    pub ascension: u32,
    pub sections: Vec<ReportSection>,
}

impl Report {
    /// Load each character's runs from `source` and compute every section.
    ///
    /// Source failures abort the build. Runs that cannot be filtered or have no
    /// readable `local_time` are skipped with a warning, so one bad run never
    /// costs another section its line. Remaining failures stay on the section.
    pub fn build(
        source: &dyn RunSource,
        characters: &[Character],
        config: &ReportConfig,
    ) -> anyhow::Result<Self> {
        let filter = config.filter();

        let mut per_character = Vec::with_capacity(characters.len());
        for &character in characters {
            let runs: Vec<RunRecord> = load_runs(source, character)?
                .into_iter()
                .filter(|run| match admits(&filter, run) {
                    Ok(matched) => matched,
                    Err(e) => {
                        tracing::warn!(character = %character, "Skipping run {}: {}", run.id, e);
                        false
                    }
                })
                .collect();
            tracing::debug!(
                character = %character,
                runs = runs.len(),
                ascension = config.ascension,
                "Filtered report population"
            );
            per_character.push((character, runs));
        }

        let combined: Vec<RunRecord> = per_character
            .iter()
            .flat_map(|(_, runs)| runs.iter().cloned())
            .collect();

        let mut sections = Vec::with_capacity(characters.len() + 1);
        sections.push(ReportSection::compute(SectionKind::Combined, &combined));
        for (character, runs) in &per_character {
            sections.push(ReportSection::compute(
                SectionKind::Character(*character),
                runs,
            ));
        }

        tracing::info!(
            ascension = config.ascension,
            runs = combined.len(),
            "Report built"
        );

        Ok(Self {
            ascension: config.ascension,
            sections,
        })
    }

    pub fn section(&self, kind: SectionKind) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}

/// Filter match plus a readable `local_time`, which every streak needs to
/// place the run on the timeline.
fn admits(filter: &RunFilter, run: &RunRecord) -> Result<bool, RunError> {
    if !filter.matches(run)? {
        return Ok(false);
    }
    sort_key(run)?;
    Ok(true)
}
