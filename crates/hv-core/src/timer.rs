//! Start/stop protocol with at most one running timer per user.
//!
//! The service is the sole arbiter of running state, and other clients (the
//! web UI, another machine) may change it at any time. Every decision here is
//! therefore taken against running entries fetched immediately beforehand;
//! nothing is cached between calls.

use chrono::NaiveDate;

use crate::error::{RemoteError, TrackerError};
use crate::model::{EntryId, Project, Task, TimeEntry, UserId};
use crate::remote::TimeTracking;

/// Timer state for a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running {
        entry_id: EntryId,
        project: Project,
        task: Task,
    },
}

impl TimerState {
    /// Derives the state from a running-entries snapshot.
    ///
    /// With several running entries the first one is reported.
    pub fn from_running(entries: &[TimeEntry]) -> Self {
        entries.first().map_or(Self::Idle, |entry| Self::Running {
            entry_id: entry.id,
            project: entry.project.clone(),
            task: entry.task.clone(),
        })
    }

    pub const fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }
}

/// Entries stopped by [`TimerController::stop`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopOutcome {
    pub stopped: Vec<TimeEntry>,
}

impl StopOutcome {
    /// Whether nothing was running.
    pub fn is_noop(&self) -> bool {
        self.stopped.is_empty()
    }
}

/// Drives timer transitions for one user against the remote service.
pub struct TimerController<'a, R: ?Sized> {
    remote: &'a R,
    user_id: UserId,
}

impl<'a, R: TimeTracking + ?Sized> TimerController<'a, R> {
    pub const fn new(remote: &'a R, user_id: UserId) -> Self {
        Self { remote, user_id }
    }

    /// Fetches the current state.
    pub fn state(&self) -> Result<TimerState, TrackerError> {
        let running = self.remote.running_entries(self.user_id)?;
        Ok(TimerState::from_running(&running))
    }

    /// Starts a timer for `project`/`task` on `date`.
    ///
    /// Only valid from [`TimerState::Idle`]: if anything is running, fails
    /// with [`TrackerError::AlreadyRunning`] without creating an entry.
    pub fn start(
        &self,
        project: &Project,
        task: &Task,
        date: NaiveDate,
    ) -> Result<TimeEntry, TrackerError> {
        let running = self.remote.running_entries(self.user_id)?;
        if let Some(existing) = running.first() {
            tracing::debug!(
                entry_id = %existing.id,
                running = running.len(),
                "refusing to start a second timer"
            );
            return Err(TrackerError::AlreadyRunning {
                entry_id: existing.id,
                project: existing.project.name.clone(),
                task: existing.task.name.clone(),
            });
        }

        let entry = self.remote.create_entry(project.id, task.id, date)?;
        tracing::info!(
            entry_id = %entry.id,
            project = %project.name,
            task = %task.name,
            "started timer"
        );
        Ok(entry)
    }

    /// Stops every running timer.
    ///
    /// Nothing running is a successful no-op. More than one running entry is
    /// inconsistent remote state; all of them are stopped. If a stop fails
    /// after others succeeded, the error says how many went through. Stops
    /// that succeeded are not rolled back.
    pub fn stop(&self) -> Result<StopOutcome, TrackerError> {
        let running = self.remote.running_entries(self.user_id)?;
        let total = running.len();
        if total == 0 {
            tracing::debug!("no running timer to stop");
            return Ok(StopOutcome::default());
        }
        if total > 1 {
            tracing::warn!(total, "found several running timers, stopping all of them");
        }

        let mut stopped = Vec::with_capacity(total);
        for entry in running {
            match self.remote.stop_entry(entry.id) {
                Ok(entry) => {
                    tracing::info!(entry_id = %entry.id, "stopped timer");
                    stopped.push(entry);
                }
                Err(source) => return Err(stop_failure(stopped.len(), total, source)),
            }
        }

        Ok(StopOutcome { stopped })
    }

    /// Stops whatever is running, then starts `project`/`task`.
    pub fn switch(
        &self,
        project: &Project,
        task: &Task,
        date: NaiveDate,
    ) -> Result<(StopOutcome, TimeEntry), TrackerError> {
        let outcome = self.stop()?;
        let entry = self.start(project, task, date)?;
        Ok((outcome, entry))
    }
}

const fn stop_failure(stopped: usize, total: usize, source: RemoteError) -> TrackerError {
    if total == 1 {
        TrackerError::Remote(source)
    } else {
        TrackerError::PartialStop {
            stopped,
            total,
            source,
        }
    }
}
