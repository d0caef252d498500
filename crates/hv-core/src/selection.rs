//! Hand-off to the interactive assignment/task picker.

use std::io;

use crate::error::TrackerError;
use crate::model::{Assignment, TaskAssignment};

/// Chooses what to start a timer against.
///
/// `Ok(None)` means the user cancelled. Implementations return indices into
/// the slice (or task list) they were given.
pub trait Picker {
    fn pick_assignment(&mut self, assignments: &[Assignment]) -> io::Result<Option<usize>>;

    fn pick_task(&mut self, assignment: &Assignment) -> io::Result<Option<usize>>;
}

/// Runs the two-step pick: first an assignment, then one of its tasks.
///
/// Cancellation at either step, or an index the picker made up, yields
/// [`TrackerError::SelectionCancelled`].
pub fn select<'a, P: Picker + ?Sized>(
    picker: &mut P,
    assignments: &'a [Assignment],
) -> Result<(&'a Assignment, &'a TaskAssignment), TrackerError> {
    if assignments.is_empty() {
        return Err(TrackerError::NoAssignments);
    }

    let assignment = picker
        .pick_assignment(assignments)?
        .and_then(|i| assignments.get(i))
        .ok_or(TrackerError::SelectionCancelled)?;

    let task = picker
        .pick_task(assignment)?
        .and_then(|i| assignment.task_assignments.get(i))
        .ok_or(TrackerError::SelectionCancelled)?;

    Ok((assignment, task))
}
