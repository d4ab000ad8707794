//! Calendar parts of an event timestamp.

use chrono::{DateTime, Datelike, Timelike, Utc};

/// Calendar fields of a single UTC instant.
///
/// `week` is the ISO-8601 week number, so the last days of December can
/// fall in week 1 while `year` stays the calendar year. `weekday` counts
/// from Monday = 0 to Sunday = 6.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeParts {
    pub hour: u32,
    pub day: u32,
    pub week: u32,
    pub month: u32,
    pub year: i32,
    pub weekday: u32,
}

impl TimeParts {
    /// Derive the calendar parts of a millisecond epoch timestamp.
    ///
    /// Returns `None` when the timestamp is outside the range chrono can
    /// represent.
    pub fn from_millis(ts: i64) -> Option<TimeParts> {
        let instant: DateTime<Utc> = DateTime::from_timestamp_millis(ts)?;
        Some(TimeParts {
            hour: instant.hour(),
            day: instant.day(),
            week: instant.iso_week().week(),
            month: instant.month(),
            year: instant.year(),
            weekday: instant.weekday().num_days_from_monday(),
        })
    }
}
