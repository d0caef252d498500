//! Stop command: stops every running timer.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use hv_core::{Session, StopOutcome, TimeTracking, ViewMode};

use super::{describe, local_now, status};

/// Prints one line per stopped entry.
pub fn report_stopped<W: Write>(writer: &mut W, outcome: &StopOutcome) -> Result<()> {
    for entry in &outcome.stopped {
        writeln!(writer, "Stopped {}", describe(entry))?;
    }
    Ok(())
}

pub fn run<W: Write, R: TimeTracking>(
    writer: &mut W,
    session: &Session<R>,
    today: NaiveDate,
) -> Result<()> {
    let outcome = session.stop().context("failed to stop timer")?;

    if outcome.is_noop() {
        writeln!(writer, "No timer running.")?;
    } else {
        report_stopped(writer, &outcome)?;
    }

    writeln!(writer)?;
    status::run(writer, session, ViewMode::Daily, today, local_now(), false)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::commands::testing::{StubTracker, date, finished, running};

    #[test]
    fn stop_reports_stopped_entry_then_status() {
        let stub = StubTracker::with_entries(vec![
            finished(1, "2025-01-29", "08:00", "09:00"),
            running(2, "2025-01-29", "09:00"),
        ]);
        let session = Session::open(stub).unwrap();

        let mut output = Vec::new();
        run(&mut output, &session, date("2025-01-29")).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("Stopped Acme / Website / Task 2\n\nTIME ENTRIES:"));
        assert!(output.contains("09:00  09:30"));
        assert!(!output.lines().any(|line| line.ends_with('*')));
    }

    #[test]
    fn stop_without_running_timer_is_noop() {
        let stub = StubTracker::with_entries(vec![finished(1, "2025-01-29", "08:00", "09:00")]);
        let session = Session::open(stub).unwrap();

        let mut output = Vec::new();
        run(&mut output, &session, date("2025-01-29")).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("No timer running.\n"));
        assert!(output.contains("1h 00m 00s"));
    }
}
