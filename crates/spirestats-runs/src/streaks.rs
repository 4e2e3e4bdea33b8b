//! Win streak detection.

use crate::error::Result;
use crate::predicates::{is_rotating, is_win, sort_key};
use crate::types::{RunRecord, Streak};

/// Group runs into maximal chronological win streaks, shortest first.
///
/// Runs are ordered by `local_time` (stable, so equal stamps keep input order),
/// split wherever the outcome changes, and the loss groups dropped. Equal-length
/// streaks stay in chronological order, so the last element is the longest and,
/// among ties, the most recent.
pub fn win_streaks(runs: &[RunRecord]) -> Result<Vec<Streak>> {
    let mut timeline = runs
        .iter()
        .map(|run| -> Result<_> { Ok((sort_key(run)?, is_win(run), run)) })
        .collect::<Result<Vec<_>>>()?;
    timeline.sort_by_key(|(key, _, _)| *key);

    let mut streaks: Vec<Streak> = timeline
        .chunk_by(|a, b| a.1 == b.1)
        .filter(|group| group[0].1)
        .map(|group| Streak::new(group.iter().map(|(_, _, run)| (*run).clone()).collect()))
        .collect();
    streaks.sort_by_key(Streak::len);

    tracing::debug!(
        runs = runs.len(),
        streaks = streaks.len(),
        "Grouped runs into win streaks"
    );

    Ok(streaks)
}

pub fn longest_streak(runs: &[RunRecord]) -> Result<Option<Streak>> {
    Ok(win_streaks(runs)?.pop())
}

/// Longest streak that covers all four characters.
pub fn longest_rotating_streak(runs: &[RunRecord]) -> Result<Option<Streak>> {
    for streak in win_streaks(runs)?.into_iter().rev() {
        if is_rotating(streak.runs())? {
            return Ok(Some(streak));
        }
    }
    Ok(None)
}
