//! Status views built from fetched entries.
//!
//! Every view starts from the same primitive: the entries dated inside a
//! [`DateRange`], as the service returns them (newest-first). The engine puts
//! them in chronological order, computes one duration per entry against a
//! single sampled "now", and then either lists them (daily and weekly status)
//! or folds them per task (weekly totals).
//!
//! # Ordering
//!
//! Rows are sorted ascending by `(date, start)`. The source order is reversed
//! before the stable sort, so entries sharing a date and start time keep the
//! reverse of the order the service sent them in. Task totals are listed in
//! the order each task first appears in that chronological sequence.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Serialize, Serializer};

use crate::duration::{entry_duration, entry_start};
use crate::error::MalformedTimeError;
use crate::model::{EntryId, TaskId, TimeEntry};

/// Which status view to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Entries for one date.
    #[default]
    Daily,
    /// Entries from Monday through the anchor date, separated by day.
    Weekly,
    /// Per-task totals from Monday through the anchor date.
    WeeklyTotals,
}

impl ViewMode {
    /// The dates this view covers, given its anchor date.
    pub fn date_range(self, anchor: NaiveDate) -> DateRange {
        match self {
            Self::Daily => DateRange {
                from: anchor,
                to: anchor,
            },
            Self::Weekly | Self::WeeklyTotals => week_range(anchor),
        }
    }
}

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Monday of the ISO week containing `anchor`, through `anchor` itself.
///
/// The range stops at the anchor rather than running to Sunday.
pub fn week_range(anchor: NaiveDate) -> DateRange {
    let days_since_monday = anchor.weekday().num_days_from_monday();
    DateRange {
        from: anchor - TimeDelta::days(i64::from(days_since_monday)),
        to: anchor,
    }
}

/// One entry ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusRow {
    pub entry_id: EntryId,
    pub task_id: TaskId,
    pub client: String,
    pub project: String,
    pub task: String,
    pub date: String,
    pub start: String,
    pub end: String,
    #[serde(rename = "duration_secs", serialize_with = "serialize_seconds")]
    pub duration: TimeDelta,
    pub running: bool,
}

impl StatusRow {
    /// `*` for a running entry, empty otherwise.
    pub const fn running_marker(&self) -> &'static str {
        if self.running { "*" } else { "" }
    }
}

/// A line of a status listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatusLine {
    Entry(StatusRow),
    /// Boundary between two days.
    Separator,
}

/// A chronological listing with its trailing total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub range: DateRange,
    pub lines: Vec<StatusLine>,
    #[serde(rename = "total_secs", serialize_with = "serialize_seconds")]
    pub total: TimeDelta,
}

impl StatusReport {
    /// The entry rows, skipping separators.
    pub fn rows(&self) -> impl Iterator<Item = &StatusRow> {
        self.lines.iter().filter_map(|line| match line {
            StatusLine::Entry(row) => Some(row),
            StatusLine::Separator => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Cumulative time spent on one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskTotal {
    pub task_id: TaskId,
    pub client: String,
    pub project: String,
    pub task: String,
    #[serde(rename = "total_secs", serialize_with = "serialize_seconds")]
    pub total: TimeDelta,
}

/// A fully computed status view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum StatusView {
    Daily(StatusReport),
    Weekly(StatusReport),
    WeeklyTotals {
        range: DateRange,
        totals: Vec<TaskTotal>,
    },
}

impl StatusView {
    pub const fn mode(&self) -> ViewMode {
        match self {
            Self::Daily(_) => ViewMode::Daily,
            Self::Weekly(_) => ViewMode::Weekly,
            Self::WeeklyTotals { .. } => ViewMode::WeeklyTotals,
        }
    }
}

/// Builds the view `mode` from entries fetched for `range`.
pub fn build_view(
    mode: ViewMode,
    range: DateRange,
    entries: Vec<TimeEntry>,
    now: NaiveDateTime,
) -> Result<StatusView, MalformedTimeError> {
    Ok(match mode {
        ViewMode::Daily => StatusView::Daily(daily_status(range, entries, now)?),
        ViewMode::Weekly => StatusView::Weekly(weekly_status(range, entries, now)?),
        ViewMode::WeeklyTotals => StatusView::WeeklyTotals {
            range,
            totals: task_totals(entries, now)?,
        },
    })
}

/// Turns source-ordered entries into chronological rows.
///
/// Fails on the first entry whose date or clock-times cannot be read.
pub fn chronological_rows(
    mut entries: Vec<TimeEntry>,
    now: NaiveDateTime,
) -> Result<Vec<StatusRow>, MalformedTimeError> {
    entries.reverse();

    let mut keyed = entries
        .into_iter()
        .map(|entry| -> Result<_, MalformedTimeError> {
            let start = entry_start(&entry)?;
            let duration = entry_duration(&entry, now)?;
            Ok((start, to_row(entry, duration)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    keyed.sort_by_key(|(start, _)| *start);
    Ok(keyed.into_iter().map(|(_, row)| row).collect())
}

/// Lists every entry with a trailing total.
pub fn daily_status(
    range: DateRange,
    entries: Vec<TimeEntry>,
    now: NaiveDateTime,
) -> Result<StatusReport, MalformedTimeError> {
    let rows = chronological_rows(entries, now)?;
    let total = sum_durations(rows.iter().map(|row| row.duration));
    Ok(StatusReport {
        range,
        lines: rows.into_iter().map(StatusLine::Entry).collect(),
        total,
    })
}

/// Lists every entry, with a separator wherever the date changes.
pub fn weekly_status(
    range: DateRange,
    entries: Vec<TimeEntry>,
    now: NaiveDateTime,
) -> Result<StatusReport, MalformedTimeError> {
    let rows = chronological_rows(entries, now)?;
    let total = sum_durations(rows.iter().map(|row| row.duration));

    let mut lines = Vec::with_capacity(rows.len());
    let mut previous_date: Option<String> = None;
    for row in rows {
        if previous_date.as_ref().is_some_and(|date| *date != row.date) {
            lines.push(StatusLine::Separator);
        }
        previous_date = Some(row.date.clone());
        lines.push(StatusLine::Entry(row));
    }

    Ok(StatusReport {
        range,
        lines,
        total,
    })
}

/// Folds entries into one total per task, in first-seen order.
///
/// Names come from the first entry seen for each task.
pub fn task_totals(
    entries: Vec<TimeEntry>,
    now: NaiveDateTime,
) -> Result<Vec<TaskTotal>, MalformedTimeError> {
    let rows = chronological_rows(entries, now)?;

    let mut totals: Vec<TaskTotal> = Vec::new();
    let mut index: HashMap<TaskId, usize> = HashMap::new();
    for row in rows {
        if let Some(&i) = index.get(&row.task_id) {
            totals[i].total += row.duration;
        } else {
            index.insert(row.task_id, totals.len());
            totals.push(TaskTotal {
                task_id: row.task_id,
                client: row.client,
                project: row.project,
                task: row.task,
                total: row.duration,
            });
        }
    }

    Ok(totals)
}

fn to_row(entry: TimeEntry, duration: TimeDelta) -> StatusRow {
    StatusRow {
        entry_id: entry.id,
        task_id: entry.task.id,
        client: entry.client.name,
        project: entry.project.name,
        task: entry.task.name,
        date: entry.spent_date,
        start: entry.started_time.unwrap_or_default(),
        end: entry.ended_time.unwrap_or_default(),
        duration,
        running: entry.is_running,
    }
}

fn sum_durations(durations: impl Iterator<Item = TimeDelta>) -> TimeDelta {
    durations.fold(TimeDelta::zero(), |acc, d| acc + d)
}

fn serialize_seconds<S: Serializer>(duration: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(duration.num_seconds())
}
