//! Core domain logic for the Harvest CLI.
//!
//! This crate contains:
//! - Duration calculation for finished and running time entries
//! - Aggregation of fetched entries into daily, weekly and per-task views
//! - The start/stop timer protocol (at most one running timer per user)
//! - The [`TimeTracking`] seam the HTTP client implements

mod aggregate;
pub mod duration;
mod error;
pub mod model;
mod remote;
pub mod selection;
mod session;
pub mod timer;

#[cfg(test)]
mod testing;

pub use aggregate::{
    DateRange, StatusLine, StatusReport, StatusRow, StatusView, TaskTotal, ViewMode, build_view,
    chronological_rows, daily_status, task_totals, week_range, weekly_status,
};
pub use duration::{entry_duration, format_duration};
pub use error::{MalformedTimeError, RemoteError, TrackerError};
pub use model::{Assignment, EntryId, TimeEntry, User, UserId};
pub use remote::TimeTracking;
pub use selection::Picker;
pub use session::Session;
pub use timer::{StopOutcome, TimerController, TimerState};
