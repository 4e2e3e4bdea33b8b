//! Classification predicates over run records.

use std::collections::HashSet;

use serde_json::Value;

use crate::dates::{self, LocalTime};
use crate::error::{Result, RunError};
use crate::types::{Character, Outcome, RunFilter, RunRecord};

pub const KILLED_BY: &str = "killed_by";
pub const LOCAL_TIME: &str = "local_time";
pub const CHARACTER_CHOSEN: &str = "character_chosen";
pub const ASCENSION_LEVEL: &str = "ascension_level";
pub const FLOOR_REACHED: &str = "floor_reached";

/// A run is a win iff it has no `killed_by` key. The value is never inspected.
///
/// Records whose text did not parse carry no keys at all and so count as wins.
pub fn is_win(run: &RunRecord) -> bool {
    match run.fields() {
        Ok(fields) => !fields.contains_key(KILLED_BY),
        Err(e) => {
            tracing::debug!(run = %run.id, "No parsed fields, counting as a win: {}", e);
            true
        }
    }
}

pub fn outcome(run: &RunRecord) -> Outcome {
    if is_win(run) {
        Outcome::Win
    } else {
        Outcome::Loss
    }
}

/// Literal substring match against the raw document.
pub fn contains(run: &RunRecord, needle: &str) -> bool {
    run.raw_text().contains(needle)
}

/// The literal key/value text a run at `level` carries, e.g. `"ascension_level":9`.
pub fn ascension_pattern(level: u32) -> String {
    format!("\"{}\":{}", ASCENSION_LEVEL, level)
}

/// Raw-text ascension check. A match followed by another digit (level 1 inside
/// `"ascension_level":15`) is not a match.
pub fn has_ascension(run: &RunRecord, level: u32) -> bool {
    let pattern = ascension_pattern(level);
    if !contains(run, &pattern) {
        return false;
    }
    let raw = run.raw_text();
    raw.match_indices(&pattern).any(|(at, _)| {
        !raw[at + pattern.len()..]
            .bytes()
            .next()
            .is_some_and(|b| b.is_ascii_digit())
    })
}

pub fn ascension_level(run: &RunRecord) -> Result<u32> {
    let value = required(run, ASCENSION_LEVEL)?;
    value
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| {
            RunError::malformed(&run.id, format!("{} is not an integer", ASCENSION_LEVEL))
        })
}

/// `Ok(None)` for a character id outside the known four.
pub fn character(run: &RunRecord) -> Result<Option<Character>> {
    let value = required(run, CHARACTER_CHOSEN)?;
    let id = value.as_str().ok_or_else(|| {
        RunError::malformed(&run.id, format!("{} is not a string", CHARACTER_CHOSEN))
    })?;
    Ok(Character::from_id(id))
}

/// The run's 14-digit `local_time`. Integer-encoded stamps are accepted too.
pub fn local_time(run: &RunRecord) -> Result<String> {
    let stamp = match required(run, LOCAL_TIME)? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => return Err(RunError::MalformedTimestamp(other.to_string())),
    };
    LocalTime::parse(&stamp)?;
    Ok(stamp)
}

/// Chronological sort key: `local_time` read as an integer.
pub fn sort_key(run: &RunRecord) -> Result<u64> {
    let stamp = local_time(run)?;
    stamp
        .parse()
        .map_err(|_| RunError::MalformedTimestamp(stamp))
}

/// True iff the runs together cover exactly the four known characters.
///
/// Any unrecognized character makes the set inexact, so the answer is false.
pub fn is_rotating(runs: &[RunRecord]) -> Result<bool> {
    let mut seen = HashSet::new();
    for run in runs {
        match character(run)? {
            Some(c) => {
                seen.insert(c);
            }
            None => return Ok(false),
        }
    }
    Ok(seen.len() == Character::ALL.len())
}

impl RunFilter {
    pub fn matches(&self, run: &RunRecord) -> Result<bool> {
        if let Some(level) = self.ascension {
            if !has_ascension(run, level) {
                return Ok(false);
            }
        }

        if let Some(wanted) = self.character {
            if character(run)? != Some(wanted) {
                return Ok(false);
            }
        }

        if let Some(wanted) = self.outcome {
            if outcome(run) != wanted {
                return Ok(false);
            }
        }

        if self.after.is_some() || self.before.is_some() {
            let date = dates::local_date(&local_time(run)?)?;
            if self.after.is_some_and(|after| date < after) {
                return Ok(false);
            }
            if self.before.is_some_and(|before| date > before) {
                return Ok(false);
            }
        }

        Ok(true)
    }
}

fn required<'a>(run: &'a RunRecord, name: &str) -> Result<&'a Value> {
    run.fields()?
        .get(name)
        .ok_or_else(|| RunError::malformed(&run.id, format!("missing {}", name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_run;
    use chrono::NaiveDate;

    fn run(id: &str, json: &str) -> RunRecord {
        parse_run(id, json.to_string())
    }

    fn with_character(c: &str) -> RunRecord {
        run(
            c,
            &format!(
                r#"{{"character_chosen":"{}","local_time":"20250101120000","ascension_level":9}}"#,
                c
            ),
        )
    }

    #[test]
    fn test_is_win_checks_key_absence() {
        assert!(is_win(&run("w", r#"{"floor_reached":57}"#)));
        assert!(!is_win(&run("l", r#"{"killed_by":"Time Eater"}"#)));
        // Presence alone decides, whatever the value.
        assert!(!is_win(&run("n", r#"{"killed_by":null}"#)));
        assert!(!is_win(&run("e", r#"{"killed_by":""}"#)));
    }

    #[test]
    fn test_is_win_ignores_killed_by_in_nested_values() {
        let r = run(
            "nested",
            r#"{"neow_cost":"killed_by","damage_taken":[{"killed_by":1}]}"#,
        );
        assert!(is_win(&r));
    }

    #[test]
    fn test_unparsed_run_counts_as_win() {
        assert!(is_win(&run("partial", r#"{"killed_by":"Jaw Wo"#)));
    }

    #[test]
    fn test_contains_is_literal() {
        let r = run("a", r#"{"ascension_level":9,"killed_by":"Nemesis"}"#);
        assert!(contains(&r, r#""ascension_level":9"#));
        assert!(!contains(&r, r#""ascension_level": 9"#));
        assert!(contains(&run("b", "not json at all"), "json"));
    }

    #[test]
    fn test_has_ascension_requires_digit_boundary() {
        let a15 = run("a15", r#"{"ascension_level":15}"#);
        assert!(has_ascension(&a15, 15));
        assert!(!has_ascension(&a15, 1));
        assert!(has_ascension(&run("a1", r#"{"ascension_level":1}"#), 1));
    }

    #[test]
    fn test_has_ascension_agrees_with_contains() {
        let r = run("a9", r#"{"ascension_level":9,"floor_reached":51}"#);
        for level in [0, 9, 19, 20] {
            assert_eq!(
                has_ascension(&r, level),
                contains(&r, &ascension_pattern(level))
            );
        }
        // A spaced document never matches the literal pattern.
        assert!(!has_ascension(&run("sp", r#"{"ascension_level": 9}"#), 9));
        // A later exact match still counts after a longer one.
        let both = run("both", r#"{"neow":{"ascension_level":15},"ascension_level":1}"#);
        assert!(has_ascension(&both, 1));
    }

    #[test]
    fn test_ascension_level_errors() {
        assert_eq!(ascension_level(&run("a", r#"{"ascension_level":20}"#)), Ok(20));
        assert!(matches!(
            ascension_level(&run("b", r#"{"ascension_level":"20"}"#)),
            Err(RunError::MalformedRecord { .. })
        ));
        assert!(matches!(
            ascension_level(&run("c", "garbage")),
            Err(RunError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_character_reads_known_and_unknown() {
        assert_eq!(character(&with_character("WATCHER")), Ok(Some(Character::Watcher)));
        assert_eq!(character(&with_character("HERMIT")), Ok(None));
        assert!(character(&run("x", r#"{"character_chosen":3}"#)).is_err());
    }

    #[test]
    fn test_local_time_accepts_integer_stamp() {
        let r = run("i", r#"{"local_time":20250502172604}"#);
        assert_eq!(local_time(&r).unwrap(), "20250502172604");
        assert_eq!(sort_key(&r), Ok(20250502172604));
    }

    #[test]
    fn test_local_time_rejects_short_stamp() {
        let r = run("s", r#"{"local_time":"202505021726"}"#);
        assert_eq!(
            local_time(&r),
            Err(RunError::MalformedTimestamp("202505021726".to_string()))
        );
    }

    #[test]
    fn test_is_rotating_requires_all_four() {
        let all: Vec<RunRecord> = ["IRONCLAD", "THE_SILENT", "DEFECT", "WATCHER"]
            .iter()
            .map(|c| with_character(c))
            .collect();
        assert_eq!(is_rotating(&all), Ok(true));
        assert_eq!(is_rotating(&all[..3]), Ok(false));
        assert_eq!(is_rotating(&[]), Ok(false));
    }

    #[test]
    fn test_is_rotating_ignores_order_and_duplicates() {
        let order = ["WATCHER", "DEFECT", "DEFECT", "IRONCLAD", "THE_SILENT", "WATCHER"];
        let runs: Vec<RunRecord> = order
            .iter()
            .map(|c| with_character(c))
            .collect();
        assert_eq!(is_rotating(&runs), Ok(true));
    }

    #[test]
    fn test_is_rotating_false_with_unknown_character() {
        let runs: Vec<RunRecord> = ["IRONCLAD", "THE_SILENT", "DEFECT", "WATCHER", "HERMIT"]
            .iter()
            .map(|c| with_character(c))
            .collect();
        assert_eq!(is_rotating(&runs), Ok(false));
    }

    #[test]
    fn test_is_rotating_two_characters_many_runs() {
        let runs: Vec<RunRecord> = (0..100)
            .map(|i| with_character(if i % 2 == 0 { "IRONCLAD" } else { "THE_SILENT" }))
            .collect();
        assert_eq!(is_rotating(&runs), Ok(false));
    }

    #[test]
    fn test_is_rotating_errors_on_malformed_record() {
        let runs = vec![with_character("IRONCLAD"), run("bad", "{")];
        assert!(matches!(is_rotating(&runs), Err(RunError::MalformedRecord { .. })));
    }

    #[test]
    fn test_filter_matches() {
        let r = run(
            "r",
            r#"{"character_chosen":"DEFECT","local_time":"20250502172604","ascension_level":9,"killed_by":"Awakened One"}"#,
        );

        assert_eq!(RunFilter::default().matches(&r), Ok(true));

        let filter = RunFilter {
            character: Some(Character::Defect),
            ascension: Some(9),
            outcome: Some(Outcome::Loss),
            after: NaiveDate::from_ymd_opt(2025, 5, 2),
            before: NaiveDate::from_ymd_opt(2025, 5, 2),
        };
        assert_eq!(filter.matches(&r), Ok(true));

        let wrong_character = RunFilter {
            character: Some(Character::Watcher),
            ..Default::default()
        };
        assert_eq!(wrong_character.matches(&r), Ok(false));

        let wins_only = RunFilter {
            outcome: Some(Outcome::Win),
            ..Default::default()
        };
        assert_eq!(wins_only.matches(&r), Ok(false));

        let later = RunFilter {
            after: NaiveDate::from_ymd_opt(2025, 5, 3),
            ..Default::default()
        };
        assert_eq!(later.matches(&r), Ok(false));
    }

    #[test]
    fn test_filter_ascension_never_fails_on_garbage() {
        let filter = RunFilter {
            ascension: Some(9),
            ..Default::default()
        };
        assert_eq!(filter.matches(&run("g", "<<<not a run>>>")), Ok(false));
    }
}
