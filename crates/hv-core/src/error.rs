//! Error types shared by the core and the remote implementations.

use std::io;

use thiserror::Error;

use crate::model::EntryId;

/// Failure talking to the time tracking service.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The request never produced a response (connect, TLS, timeout).
    #[error("request failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// The service answered with a non-2xx status.
    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },
    /// The response body did not match the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// A fetched record carried a date or clock-time that could not be used.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedTimeError {
    #[error("entry {entry_id}: invalid date {value:?}")]
    Date { entry_id: EntryId, value: String },

    #[error("entry {entry_id}: invalid clock time {value:?}")]
    ClockTime { entry_id: EntryId, value: String },

    #[error("entry {entry_id}: missing {field}")]
    Missing {
        entry_id: EntryId,
        field: &'static str,
    },

    #[error("entry {entry_id}: ends at {end} before it starts at {start}")]
    EndsBeforeStart {
        entry_id: EntryId,
        start: String,
        end: String,
    },
}

/// Errors surfaced by core operations.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    MalformedTime(#[from] MalformedTimeError),

    /// A timer is already running; starting another would stack timers.
    #[error("a timer is already running (entry {entry_id}: {project} / {task})")]
    AlreadyRunning {
        entry_id: EntryId,
        project: String,
        task: String,
    },

    /// The user backed out of the interactive pick.
    #[error("selection cancelled")]
    SelectionCancelled,

    #[error("no project assignments available")]
    NoAssignments,

    #[error("selection failed: {0}")]
    Selection(#[from] io::Error),

    /// Stopping several running entries failed part way. Earlier stops stand.
    #[error("stopped {stopped} of {total} running entries before failing: {source}")]
    PartialStop {
        stopped: usize,
        total: usize,
        #[source]
        source: RemoteError,
    },
}
