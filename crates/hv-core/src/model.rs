//! Harvest records as the core sees them.
//!
//! These are read-only snapshots of remote state. Clock-times and dates stay in
//! the string form the service returns; they are parsed by the duration
//! calculator so that a malformed record fails the computation that reads it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Generates a numeric ID newtype for a service-assigned identifier.
macro_rules! define_numeric_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw identifier.
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the raw identifier.
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_numeric_id!(
    /// Identifies the authenticated user.
    UserId
);

define_numeric_id!(
    /// Identifies a single time entry.
    EntryId
);

define_numeric_id!(
    /// Identifies a client.
    ClientId
);

define_numeric_id!(
    /// Identifies a project.
    ProjectId
);

define_numeric_id!(
    /// Identifies a task. Task names are assumed to be stable per ID.
    TaskId
);

/// The authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
}

/// A task the user may log time against within an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAssignment {
    pub id: u64,
    pub task: Task,
}

/// A (client, project, tasks) combination the user is assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: u64,
    pub client: Client,
    pub project: Project,
    #[serde(default)]
    pub task_assignments: Vec<TaskAssignment>,
}

impl Assignment {
    /// Label shown when picking an assignment.
    pub fn label(&self) -> String {
        format!("{} {}", self.client.name, self.project.name)
    }
}

/// One tracked interval.
///
/// `is_running` is authoritative: a running entry has no `ended_time`, and a
/// finished entry must carry one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: EntryId,
    /// Calendar date, `YYYY-MM-DD`.
    pub spent_date: String,
    pub client: Client,
    pub project: Project,
    pub task: Task,
    /// Start clock-time, local to `spent_date`.
    #[serde(default)]
    pub started_time: Option<String>,
    /// End clock-time; absent while running.
    #[serde(default)]
    pub ended_time: Option<String>,
    pub is_running: bool,
}

impl TimeEntry {
    /// `*` for a running entry, empty otherwise.
    pub const fn running_marker(&self) -> &'static str {
        if self.is_running { "*" } else { "" }
    }
}
