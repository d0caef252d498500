//! Interactive fuzzy picker for assignments and tasks.

use std::io;

use dialoguer::FuzzySelect;
use dialoguer::theme::ColorfulTheme;
use hv_core::{Assignment, Picker};

/// Prompts on the terminal; Esc cancels.
#[derive(Default)]
pub struct FuzzyPicker {
    theme: ColorfulTheme,
}

impl FuzzyPicker {
    fn pick(&self, prompt: &str, labels: &[String]) -> io::Result<Option<usize>> {
        if labels.is_empty() {
            tracing::warn!(prompt, "nothing to choose from");
            return Ok(None);
        }

        FuzzySelect::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(labels)
            .default(0)
            .interact_opt()
            .map_err(io::Error::other)
    }
}

impl Picker for FuzzyPicker {
    fn pick_assignment(&mut self, assignments: &[Assignment]) -> io::Result<Option<usize>> {
        let labels: Vec<String> = assignments.iter().map(Assignment::label).collect();
        self.pick("Project", &labels)
    }

    fn pick_task(&mut self, assignment: &Assignment) -> io::Result<Option<usize>> {
        let labels: Vec<String> = assignment
            .task_assignments
            .iter()
            .map(|task| task.task.name.clone())
            .collect();
        self.pick(&format!("Task for {}", assignment.project.name), &labels)
    }
}
