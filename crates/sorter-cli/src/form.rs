//! Detail form: a dialoguer-driven `Presenter<EditSession>`.
//!
//! dialoguer blocks on stdin, so the form runs inside `block_in_place`
//! and the runtime keeps driving other tasks on its remaining workers.

use async_trait::async_trait;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

use sorter_core::domain::{Classification, Complexity, PresentationError, Priority, Status};
use sorter_core::ports::Presenter;
use sorter_core::session::EditSession;

use crate::render;

const ACTIONS: [&str; 11] = [
    "Edit title",
    "Edit description",
    "Set status",
    "Set priority",
    "Set complexity",
    "Edit note",
    "Add subtask",
    "Edit subtask",
    "Save",
    "Delete",
    "Close without saving",
];

#[derive(Default)]
pub struct DialoguerPresenter {
    theme: ColorfulTheme,
}

impl DialoguerPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    fn pick<T: Classification>(&self, prompt: &str, current: T) -> dialoguer::Result<T> {
        let labels = T::labels();
        let default = T::all().iter().position(|v| *v == current).unwrap_or(0);
        let index = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .items(&labels)
            .interact()?;
        Ok(T::all()[index])
    }

    fn text(&self, prompt: &str, current: &str) -> dialoguer::Result<String> {
        Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .with_initial_text(current)
            .allow_empty(true)
            .interact_text()
    }

    /// Run the form until the user saves, deletes or closes it.
    fn run(&self, session: &mut EditSession) -> Result<(), PresentationError> {
        loop {
            println!("{}", render::task_details(session.task(), session.subtasks()));

            let choice = Select::with_theme(&self.theme)
                .with_prompt("Task")
                .default(0)
                .items(&ACTIONS)
                .interact()
                .map_err(form_error)?;

            let task = session.task().clone();
            let applied = match choice {
                0 => session.set_title(self.text("Title", &task.title).map_err(form_error)?),
                1 => session.set_description(
                    self.text("Description", &task.description)
                        .map_err(form_error)?,
                ),
                2 => session.set_status(
                    self.pick::<Status>("Status", task.status)
                        .map_err(form_error)?,
                ),
                3 => session.set_priority(
                    self.pick::<Priority>("Priority", task.priority)
                        .map_err(form_error)?,
                ),
                4 => session.set_complexity(
                    self.pick::<Complexity>("Complexity", task.complexity)
                        .map_err(form_error)?,
                ),
                5 => session.set_note(self.text("Note", &task.note).map_err(form_error)?),
                6 => session.add_subtask(),
                7 => self.edit_subtask(session)?,
                8 => return session.save().map_err(form_error),
                9 => {
                    let confirmed = Confirm::with_theme(&self.theme)
                        .with_prompt(format!("Delete '{}'?", task.title))
                        .default(false)
                        .interact()
                        .map_err(form_error)?;
                    if confirmed {
                        return session.delete().map_err(form_error);
                    }
                    Ok(())
                }
                _ => return Ok(()),
            };
            if let Err(err) = applied {
                eprintln!("{err}");
            }
        }
    }

    fn edit_subtask(
        &self,
        session: &mut EditSession,
    ) -> Result<sorter_core::Result<()>, PresentationError> {
        if session.subtasks().is_empty() {
            println!("No subtasks yet.");
            return Ok(Ok(()));
        }
        let titles: Vec<String> = session.subtasks().iter().map(|s| s.title.clone()).collect();
        let index = Select::with_theme(&self.theme)
            .with_prompt("Subtask")
            .default(0)
            .items(&titles)
            .interact()
            .map_err(form_error)?;
        let current = session.subtasks()[index].clone();
        let title = self.text("Subtask title", &current.title).map_err(form_error)?;
        let text = self.text("Subtask text", &current.text).map_err(form_error)?;
        Ok(session.update_subtask(index, title, text))
    }
}

fn form_error(err: impl std::fmt::Display) -> PresentationError {
    PresentationError::new(err.to_string())
}

#[async_trait]
impl Presenter<EditSession> for DialoguerPresenter {
    async fn show(&self, session: &mut EditSession) -> Result<(), PresentationError> {
        tokio::task::block_in_place(|| self.run(session))
    }
}
