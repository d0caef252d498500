//! The remote time tracking service, as seen by the core.

use chrono::NaiveDate;

use crate::error::RemoteError;
use crate::model::{Assignment, EntryId, ProjectId, TaskId, TimeEntry, User, UserId};

/// Synchronous request/response access to the service.
///
/// The service is the only source of truth for running timers. Implementations
/// must not cache: every call reflects remote state at the time of the call.
pub trait TimeTracking {
    /// Returns the authenticated user.
    fn current_user(&self) -> Result<User, RemoteError>;

    /// Returns the project assignments the user may log time against.
    fn assignments(&self, user_id: UserId) -> Result<Vec<Assignment>, RemoteError>;

    /// Returns entries dated `from..=to`, typically newest-first.
    fn entries(
        &self,
        user_id: UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<TimeEntry>, RemoteError>;

    /// Returns the user's currently running entries.
    fn running_entries(&self, user_id: UserId) -> Result<Vec<TimeEntry>, RemoteError>;

    /// Creates (and thereby starts) an entry for `date`.
    fn create_entry(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
        date: NaiveDate,
    ) -> Result<TimeEntry, RemoteError>;

    /// Stops a running entry, fixing its end time.
    fn stop_entry(&self, entry_id: EntryId) -> Result<TimeEntry, RemoteError>;
}
