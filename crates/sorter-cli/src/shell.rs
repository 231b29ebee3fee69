//! Interactive board loop.

use anyhow::Result;
use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;
use tracing::debug;

use sorter_core::TaskBoard;
use sorter_core::domain::{Category, SessionOutcome};
use sorter_core::session::SessionHost;

use crate::form::DialoguerPresenter;
use crate::render;

const MENU: [&str; 6] = [
    "Open task",
    "New task",
    "Toggle filter",
    "Clear filters",
    "Toggle view",
    "Quit",
];

pub async fn run(board: &TaskBoard) -> Result<()> {
    let theme = ColorfulTheme::default();
    let host = SessionHost::new(DialoguerPresenter::new());

    loop {
        println!("{}", render::filter_table(board.filters()));
        render::print_view(board.view_mode(), &board.visible());
        render::print_summary(board);

        let choice = Select::with_theme(&theme)
            .with_prompt("Board")
            .default(0)
            .items(&MENU)
            .interact()?;

        match choice {
            0 => {
                let visible = board.visible();
                if visible.is_empty() {
                    println!("Nothing to open.");
                    continue;
                }
                let titles: Vec<&str> = visible.iter().map(|t| t.title.as_str()).collect();
                let index = Select::with_theme(&theme)
                    .with_prompt("Open")
                    .default(0)
                    .items(&titles)
                    .interact()?;
                let outcome = board.edit_task(visible[index].id, &host).await?;
                report(outcome);
            }
            1 => {
                let (id, outcome) = board.create_and_edit(&host).await;
                debug!(task = %id, %outcome, "new task session closed");
                report(outcome);
            }
            2 => {
                let categories: Vec<String> =
                    Category::ALL.iter().map(|c| c.to_string()).collect();
                let category = Category::ALL[Select::with_theme(&theme)
                    .with_prompt("Category")
                    .default(0)
                    .items(&categories)
                    .interact()?];
                let toggles = board.filters().category(category).toggles();
                let labels: Vec<String> = toggles
                    .iter()
                    .map(|t| format!("{} {}", if t.selected() { "[x]" } else { "[ ]" }, t.label()))
                    .collect();
                let index = Select::with_theme(&theme)
                    .with_prompt("Toggle")
                    .default(0)
                    .items(&labels)
                    .interact()?;
                board.toggle(category, toggles[index].label())?;
            }
            3 => board.filters().clear(),
            4 => {
                board.toggle_view_mode();
            }
            _ => return Ok(()),
        }
    }
}

fn report(outcome: SessionOutcome) {
    match outcome {
        SessionOutcome::Saved => println!("Saved."),
        SessionOutcome::Deleted => println!("Deleted."),
        SessionOutcome::Cancelled => println!("Closed without changes."),
    }
}
