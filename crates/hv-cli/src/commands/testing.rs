//! In-memory service and picker for command tests.

use std::cell::RefCell;
use std::io;

use chrono::NaiveDate;
use hv_core::model::{
    Assignment, Client, ClientId, EntryId, Project, ProjectId, Task, TaskAssignment, TaskId,
    TimeEntry, User, UserId,
};
use hv_core::{Picker, RemoteError, TimeTracking};

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

fn acme_task(id: u64) -> (Client, Project, Task) {
    (
        Client {
            id: ClientId::new(1),
            name: "Acme".to_string(),
        },
        Project {
            id: ProjectId::new(10),
            name: "Website".to_string(),
        },
        Task {
            id: TaskId::new(id),
            name: format!("Task {id}"),
        },
    )
}

pub fn finished(id: u64, spent: &str, start: &str, end: &str) -> TimeEntry {
    let (client, project, task) = acme_task(id);
    TimeEntry {
        id: EntryId::new(id),
        spent_date: spent.to_string(),
        client,
        project,
        task,
        started_time: Some(start.to_string()),
        ended_time: Some(end.to_string()),
        is_running: false,
    }
}

pub fn running(id: u64, spent: &str, start: &str) -> TimeEntry {
    TimeEntry {
        ended_time: None,
        is_running: true,
        ..finished(id, spent, start, "")
    }
}

/// Service holding entries in memory, oldest first.
#[derive(Debug, Default)]
pub struct StubTracker {
    pub entries: RefCell<Vec<TimeEntry>>,
}

impl StubTracker {
    pub fn with_entries(entries: Vec<TimeEntry>) -> Self {
        Self {
            entries: RefCell::new(entries),
        }
    }
}

impl TimeTracking for StubTracker {
    fn current_user(&self) -> Result<User, RemoteError> {
        Ok(User {
            id: UserId::new(7),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
        })
    }

    fn assignments(&self, _user_id: UserId) -> Result<Vec<Assignment>, RemoteError> {
        let (client, project, task) = acme_task(3);
        Ok(vec![Assignment {
            id: 1,
            client,
            project,
            task_assignments: vec![TaskAssignment { id: 30, task }],
        }])
    }

    fn entries(
        &self,
        _user_id: UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<TimeEntry>, RemoteError> {
        Ok(self
            .entries
            .borrow()
            .iter()
            .rev()
            .filter(|e| (from..=to).contains(&date(&e.spent_date)))
            .cloned()
            .collect())
    }

    fn running_entries(&self, _user_id: UserId) -> Result<Vec<TimeEntry>, RemoteError> {
        Ok(self
            .entries
            .borrow()
            .iter()
            .filter(|e| e.is_running)
            .cloned()
            .collect())
    }

    fn create_entry(
        &self,
        _project_id: ProjectId,
        task_id: TaskId,
        spent: NaiveDate,
    ) -> Result<TimeEntry, RemoteError> {
        let id = 100 + self.entries.borrow().len() as u64;
        let mut entry = running(id, &spent.format("%Y-%m-%d").to_string(), "09:00");
        entry.task = acme_task(task_id.get()).2;
        self.entries.borrow_mut().push(entry.clone());
        Ok(entry)
    }

    fn stop_entry(&self, entry_id: EntryId) -> Result<TimeEntry, RemoteError> {
        let mut entries = self.entries.borrow_mut();
        let entry = entries
            .iter_mut()
            .find(|e| e.id == entry_id)
            .ok_or(RemoteError::Status {
                status: 404,
                body: "not found".to_string(),
            })?;
        entry.is_running = false;
        entry.ended_time = Some("09:30".to_string());
        Ok(entry.clone())
    }
}

/// Picks the first option, or cancels.
#[derive(Debug)]
pub struct FirstPicker {
    pub cancel: bool,
}

impl Picker for FirstPicker {
    fn pick_assignment(&mut self, _assignments: &[Assignment]) -> io::Result<Option<usize>> {
        Ok((!self.cancel).then_some(0))
    }

    fn pick_task(&mut self, _assignment: &Assignment) -> io::Result<Option<usize>> {
        Ok((!self.cancel).then_some(0))
    }
}
