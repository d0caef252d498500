//! CLI subcommand implementations.

pub mod start;
pub mod status;
pub mod stop;

#[cfg(test)]
mod testing;

use chrono::{Local, NaiveDateTime};
use hv_core::TimeEntry;

/// Current local wall-clock time; entries carry local clock-times.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn describe(entry: &TimeEntry) -> String {
    format!(
        "{} / {} / {}",
        entry.client.name, entry.project.name, entry.task.name
    )
}
