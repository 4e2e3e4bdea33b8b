//! Decoding of the `local_time` stamp (`YYYYMMDDHHmmss`).

use chrono::NaiveDate;

use crate::error::{Result, RunError};

/// Positional breakdown of a 14-digit `local_time` stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTime<'a> {
    pub year: &'a str,
    pub month: &'a str,
    pub day: &'a str,
    pub hour: &'a str,
    pub minute: &'a str,
    pub second: &'a str,
}

impl<'a> LocalTime<'a> {
    pub fn parse(stamp: &'a str) -> Result<Self> {
        if stamp.len() != 14 || !stamp.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RunError::MalformedTimestamp(stamp.to_string()));
        }
        Ok(Self {
            year: &stamp[0..4],
            month: &stamp[4..6],
            day: &stamp[6..8],
            hour: &stamp[8..10],
            minute: &stamp[10..12],
            second: &stamp[12..14],
        })
    }

    /// Calendar date of the stamp; fails for impossible dates like month 13.
    pub fn date(&self) -> Result<NaiveDate> {
        let invalid = || {
            RunError::MalformedTimestamp(format!(
                "{}{}{}{}{}{}",
                self.year, self.month, self.day, self.hour, self.minute, self.second
            ))
        };
        let year = self.year.parse().map_err(|_| invalid())?;
        let month = self.month.parse().map_err(|_| invalid())?;
        let day = self.day.parse().map_err(|_| invalid())?;
        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
    }
}

/// Render a stamp as `"{year} - {month} {day}, {hour}:{minute}"`. Seconds are dropped.
pub fn format_local_time(stamp: &str) -> Result<String> {
    let t = LocalTime::parse(stamp)?;
    Ok(format!(
        "{} - {} {}, {}:{}",
        t.year, t.month, t.day, t.hour, t.minute
    ))
}

pub fn local_date(stamp: &str) -> Result<NaiveDate> {
    LocalTime::parse(stamp)?.date()
}
