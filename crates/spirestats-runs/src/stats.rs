use crate::error::{Result, RunError};
use crate::predicates::is_win;
use crate::types::{RunRecord, WinRate};

/// Win rate over an already filtered population.
///
/// An empty population is `RunError::EmptyPopulation`; the rate is never NaN.
pub fn win_rate(runs: &[RunRecord]) -> Result<WinRate> {
    let total = runs.len();
    if total == 0 {
        return Err(RunError::EmptyPopulation);
    }

    let losses = runs.iter().filter(|run| !is_win(run)).count();
    let percent = 100.0 - 100.0 * losses as f64 / total as f64;

    Ok(WinRate {
        total,
        losses,
        percent,
    })
}
