//! Per-invocation context tying the remote service to the current user.

use chrono::{NaiveDate, NaiveDateTime};

use crate::aggregate::{StatusView, ViewMode, build_view};
use crate::error::TrackerError;
use crate::model::{TimeEntry, User};
use crate::remote::TimeTracking;
use crate::selection::{Picker, select};
use crate::timer::{StopOutcome, TimerController, TimerState};

/// Everything one CLI invocation needs: the service and who is calling it.
///
/// Built once per invocation with [`Session::open`], which fetches the user.
#[derive(Debug)]
pub struct Session<R> {
    remote: R,
    user: User,
}

impl<R: TimeTracking> Session<R> {
    /// Identifies the user and returns a ready session.
    pub fn open(remote: R) -> Result<Self, TrackerError> {
        let user = remote.current_user()?;
        tracing::debug!(user_id = %user.id, "resolved current user");
        Ok(Self { remote, user })
    }

    pub const fn user(&self) -> &User {
        &self.user
    }

    pub const fn remote(&self) -> &R {
        &self.remote
    }

    pub const fn timer(&self) -> TimerController<'_, R> {
        TimerController::new(&self.remote, self.user.id)
    }

    /// Builds a status view anchored on `anchor`.
    ///
    /// `now` is sampled once by the caller and used for every running entry.
    pub fn status(
        &self,
        mode: ViewMode,
        anchor: NaiveDate,
        now: NaiveDateTime,
    ) -> Result<StatusView, TrackerError> {
        let range = mode.date_range(anchor);
        tracing::debug!(?mode, from = %range.from, to = %range.to, "fetching time entries");
        let entries = self.remote.entries(self.user.id, range.from, range.to)?;
        tracing::debug!(count = entries.len(), "fetched time entries");
        Ok(build_view(mode, range, entries, now)?)
    }

    /// Picks an assignment and task, then starts a timer on `date`.
    ///
    /// Nothing is written if the pick is cancelled or a timer is running.
    pub fn start<P: Picker + ?Sized>(
        &self,
        picker: &mut P,
        date: NaiveDate,
    ) -> Result<TimeEntry, TrackerError> {
        let assignments = self.remote.assignments(self.user.id)?;
        let (assignment, task) = select(picker, &assignments)?;
        self.timer().start(&assignment.project, &task.task, date)
    }

    /// Like [`Session::start`], but stops running timers first.
    pub fn switch<P: Picker + ?Sized>(
        &self,
        picker: &mut P,
        date: NaiveDate,
    ) -> Result<(StopOutcome, TimeEntry), TrackerError> {
        let assignments = self.remote.assignments(self.user.id)?;
        let (assignment, task) = select(picker, &assignments)?;
        self.timer().switch(&assignment.project, &task.task, date)
    }

    pub fn stop(&self) -> Result<StopOutcome, TrackerError> {
        self.timer().stop()
    }

    pub fn state(&self) -> Result<TimerState, TrackerError> {
        self.timer().state()
    }
}
