//! Elapsed time for a single entry.
//!
//! Start and end clock-times are always read against the entry's own
//! `spent_date`, so week views spanning several days compute each row in its
//! own day. Durations are whole seconds.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::error::MalformedTimeError;
use crate::model::{EntryId, TimeEntry};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Accepted clock-time layouts: `15:04` and the 12-hour `3:04pm`.
const CLOCK_FORMATS: [&str; 2] = ["%H:%M", "%I:%M%p"];

/// Parses a `YYYY-MM-DD` date from a fetched entry.
pub fn parse_date(entry_id: EntryId, value: &str) -> Result<NaiveDate, MalformedTimeError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| MalformedTimeError::Date {
        entry_id,
        value: value.to_string(),
    })
}

/// Parses a clock-time from a fetched entry.
pub fn parse_clock(entry_id: EntryId, value: &str) -> Result<NaiveTime, MalformedTimeError> {
    let trimmed = value.trim();
    CLOCK_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| MalformedTimeError::ClockTime {
            entry_id,
            value: value.to_string(),
        })
}

/// Returns the instant an entry started, in its own day.
pub fn entry_start(entry: &TimeEntry) -> Result<NaiveDateTime, MalformedTimeError> {
    let date = parse_date(entry.id, &entry.spent_date)?;
    let started = entry
        .started_time
        .as_deref()
        .ok_or(MalformedTimeError::Missing {
            entry_id: entry.id,
            field: "started_time",
        })?;
    Ok(date.and_time(parse_clock(entry.id, started)?))
}

/// Computes the elapsed time of an entry.
///
/// A finished entry spans `start..end` within its date. A running entry spans
/// `start..now`; callers sample `now` once per computation and pass the same
/// value for every entry. A running entry that starts after `now` (clock
/// skew between this machine and the service) counts as zero.
pub fn entry_duration(
    entry: &TimeEntry,
    now: NaiveDateTime,
) -> Result<TimeDelta, MalformedTimeError> {
    let start = entry_start(entry)?;

    let elapsed = if entry.is_running {
        (now - start).max(TimeDelta::zero())
    } else {
        let ended = entry
            .ended_time
            .as_deref()
            .ok_or(MalformedTimeError::Missing {
                entry_id: entry.id,
                field: "ended_time",
            })?;
        let end = start.date().and_time(parse_clock(entry.id, ended)?);
        if end < start {
            return Err(MalformedTimeError::EndsBeforeStart {
                entry_id: entry.id,
                start: entry.started_time.clone().unwrap_or_default(),
                end: ended.to_string(),
            });
        }
        end - start
    };

    Ok(TimeDelta::seconds(elapsed.num_seconds()))
}

/// Formats a duration as `Xh MMm SSs`, `Mm SSs` or `Ss`.
///
/// Sub-second precision is dropped. Negative durations render as `0s`.
pub fn format_duration(duration: TimeDelta) -> String {
    let total = duration.num_seconds().max(0);
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{hours}h {minutes:02}m {seconds:02}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds:02}s")
    } else {
        format!("{seconds}s")
    }
}
