//! Test fixtures: entry builders, an in-memory tracker and a scripted picker.

use std::cell::{Cell, RefCell};
use std::io;

use chrono::NaiveDate;

use crate::error::RemoteError;
use crate::model::{
    Assignment, Client, ClientId, EntryId, Project, ProjectId, Task, TaskAssignment, TaskId,
    TimeEntry, User, UserId,
};
use crate::remote::TimeTracking;
use crate::selection::Picker;

/// Builds an entry for task `task_id`; `end = None` makes it running.
pub fn entry(id: u64, task_id: u64, date: &str, start: &str, end: Option<&str>) -> TimeEntry {
    TimeEntry {
        id: EntryId::new(id),
        spent_date: date.to_string(),
        client: Client {
            id: ClientId::new(1),
            name: "Acme".to_string(),
        },
        project: Project {
            id: ProjectId::new(100),
            name: "Website".to_string(),
        },
        task: Task {
            id: TaskId::new(task_id),
            name: format!("Task {task_id}"),
        },
        started_time: Some(start.to_string()),
        ended_time: end.map(str::to_string),
        is_running: end.is_none(),
    }
}

pub fn assignment(id: u64, client: &str, project: &str, tasks: &[(u64, &str)]) -> Assignment {
    Assignment {
        id,
        client: Client {
            id: ClientId::new(id),
            name: client.to_string(),
        },
        project: Project {
            id: ProjectId::new(id * 10),
            name: project.to_string(),
        },
        task_assignments: tasks
            .iter()
            .map(|(task_id, name)| TaskAssignment {
                id: task_id * 1000,
                task: Task {
                    id: TaskId::new(*task_id),
                    name: (*name).to_string(),
                },
            })
            .collect(),
    }
}

/// In-memory stand-in for the remote service.
///
/// Entries are returned newest-first, as the service does. Every mutating
/// call is counted so tests can assert on side effects.
#[derive(Debug)]
pub struct FakeTracker {
    pub user: User,
    pub assignments: Vec<Assignment>,
    pub entries: RefCell<Vec<TimeEntry>>,
    pub create_calls: Cell<usize>,
    pub stop_calls: Cell<usize>,
    /// Fail the n-th (1-based) stop call.
    pub fail_stop_call: Option<usize>,
    pub fail_fetch: bool,
    next_id: Cell<u64>,
}

impl FakeTracker {
    pub fn new() -> Self {
        Self {
            user: User {
                id: UserId::new(1),
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
            },
            assignments: vec![
                assignment(1, "Acme", "Website", &[(11, "Design"), (12, "Build")]),
                assignment(2, "Globex", "Migration", &[(21, "Planning")]),
            ],
            entries: RefCell::new(Vec::new()),
            create_calls: Cell::new(0),
            stop_calls: Cell::new(0),
            fail_stop_call: None,
            fail_fetch: false,
            next_id: Cell::new(1000),
        }
    }

    pub fn with_entries(entries: Vec<TimeEntry>) -> Self {
        let fake = Self::new();
        fake.entries.replace(entries);
        fake
    }

    pub fn running_count(&self) -> usize {
        self.entries.borrow().iter().filter(|e| e.is_running).count()
    }

    fn newest_first(&self, filter: impl Fn(&TimeEntry) -> bool) -> Vec<TimeEntry> {
        self.entries
            .borrow()
            .iter()
            .rev()
            .filter(|e| filter(e))
            .cloned()
            .collect()
    }

    fn unavailable() -> RemoteError {
        RemoteError::Status {
            status: 503,
            body: "unavailable".to_string(),
        }
    }
}

impl TimeTracking for FakeTracker {
    fn current_user(&self) -> Result<User, RemoteError> {
        if self.fail_fetch {
            return Err(Self::unavailable());
        }
        Ok(self.user.clone())
    }

    fn assignments(&self, _user_id: UserId) -> Result<Vec<Assignment>, RemoteError> {
        Ok(self.assignments.clone())
    }

    fn entries(
        &self,
        _user_id: UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<TimeEntry>, RemoteError> {
        if self.fail_fetch {
            return Err(Self::unavailable());
        }
        let from = from.format("%Y-%m-%d").to_string();
        let to = to.format("%Y-%m-%d").to_string();
        Ok(self.newest_first(|e| e.spent_date >= from && e.spent_date <= to))
    }

    fn running_entries(&self, _user_id: UserId) -> Result<Vec<TimeEntry>, RemoteError> {
        Ok(self.newest_first(|e| e.is_running))
    }

    fn create_entry(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
        date: NaiveDate,
    ) -> Result<TimeEntry, RemoteError> {
        self.create_calls.set(self.create_calls.get() + 1);
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let assignment = self
            .assignments
            .iter()
            .find(|a| a.project.id == project_id)
            .ok_or_else(|| RemoteError::Status {
                status: 422,
                body: "unknown project".to_string(),
            })?;
        let task = assignment
            .task_assignments
            .iter()
            .find(|t| t.task.id == task_id)
            .ok_or_else(|| RemoteError::Status {
                status: 422,
                body: "unknown task".to_string(),
            })?;

        let created = TimeEntry {
            id: EntryId::new(id),
            spent_date: date.format("%Y-%m-%d").to_string(),
            client: assignment.client.clone(),
            project: assignment.project.clone(),
            task: task.task.clone(),
            started_time: Some("09:00".to_string()),
            ended_time: None,
            is_running: true,
        };
        self.entries.borrow_mut().push(created.clone());
        Ok(created)
    }

    fn stop_entry(&self, entry_id: EntryId) -> Result<TimeEntry, RemoteError> {
        let call = self.stop_calls.get() + 1;
        self.stop_calls.set(call);
        if self.fail_stop_call == Some(call) {
            return Err(RemoteError::Status {
                status: 500,
                body: "stop failed".to_string(),
            });
        }

        let mut entries = self.entries.borrow_mut();
        let entry = entries
            .iter_mut()
            .find(|e| e.id == entry_id)
            .ok_or_else(|| RemoteError::Status {
                status: 404,
                body: "not found".to_string(),
            })?;
        entry.is_running = false;
        entry.ended_time = Some("09:30".to_string());
        Ok(entry.clone())
    }
}

/// Picker that returns pre-programmed choices.
#[derive(Debug, Default)]
pub struct ScriptedPicker {
    pub assignment: Option<usize>,
    pub task: Option<usize>,
    pub task_prompts: usize,
}

impl ScriptedPicker {
    pub const fn choosing(assignment: usize, task: usize) -> Self {
        Self {
            assignment: Some(assignment),
            task: Some(task),
            task_prompts: 0,
        }
    }
}

impl Picker for ScriptedPicker {
    fn pick_assignment(&mut self, _assignments: &[Assignment]) -> io::Result<Option<usize>> {
        Ok(self.assignment)
    }

    fn pick_task(&mut self, _assignment: &Assignment) -> io::Result<Option<usize>> {
        self.task_prompts += 1;
        Ok(self.task)
    }
}
