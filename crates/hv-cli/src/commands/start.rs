//! Start command: pick an assignment and task, then start a timer.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use hv_core::{Picker, Session, TimeTracking, TrackerError, ViewMode};

use super::{describe, local_now, status, stop};

/// Starts a timer for today.
///
/// With `switch`, running timers are stopped first; otherwise a running timer
/// is an error. Cancelling the picker starts nothing and is not an error.
pub fn run<W: Write, R: TimeTracking, P: Picker + ?Sized>(
    writer: &mut W,
    session: &Session<R>,
    picker: &mut P,
    today: NaiveDate,
    switch: bool,
) -> Result<()> {
    let started = if switch {
        session
            .switch(picker, today)
            .map(|(outcome, entry)| (Some(outcome), entry))
    } else {
        session.start(picker, today).map(|entry| (None, entry))
    };

    let (outcome, entry) = match started {
        Ok(started) => started,
        Err(TrackerError::SelectionCancelled) => {
            tracing::debug!("selection cancelled");
            writeln!(writer, "Selection cancelled, no timer started.")?;
            return Ok(());
        }
        Err(err @ TrackerError::AlreadyRunning { .. }) => {
            return Err(err)
                .context("cannot start a timer; run `hcli stop` or `hcli start --switch`");
        }
        Err(err) => return Err(err).context("failed to start timer"),
    };

    if let Some(outcome) = outcome {
        stop::report_stopped(writer, &outcome)?;
    }
    writeln!(writer, "Started {}", describe(&entry))?;

    writeln!(writer)?;
    status::run(writer, session, ViewMode::Daily, today, local_now(), false)
}
