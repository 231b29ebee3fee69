//! Scripted round trip: create, edit, filter, delete.

use anyhow::Result;
use tokio::sync::broadcast::error::TryRecvError;

use sorter_core::TaskBoard;
use sorter_core::domain::{Category, Priority, Status};
use sorter_core::impls::ScriptedPresenter;
use sorter_core::session::{EditAction, SessionHost};

use crate::render;

pub async fn run(board: &TaskBoard) -> Result<()> {
    let mut events = board.events();

    println!("Starting board:");
    render::print_view(board.view_mode(), &board.visible());

    let create = SessionHost::new(ScriptedPresenter::new([
        EditAction::SetTitle {
            value: "Book the team offsite".into(),
        },
        EditAction::SetStatus {
            value: Status::Active,
        },
        EditAction::SetPriority {
            value: Priority::High,
        },
        EditAction::AddSubtask,
        EditAction::UpdateSubtask {
            index: 0,
            title: "Compare venues".into(),
            text: "Three quotes by Friday".into(),
        },
        EditAction::Save,
    ]));
    let (id, outcome) = board.create_and_edit(&create).await;
    println!("New task {id}: {outcome}");

    board.toggle(Category::Priority, "High")?;
    println!("\nHigh priority only:");
    render::print_view(board.view_mode(), &board.visible());

    let delete = SessionHost::new(ScriptedPresenter::new([EditAction::Delete]));
    let outcome = board.edit_task(id, &delete).await?;
    println!("\nTask {id}: {outcome}");
    render::print_view(board.view_mode(), &board.visible());

    board.toggle(Category::Priority, "High")?;
    board.toggle_view_mode();
    println!("\nAll tasks:");
    render::print_view(board.view_mode(), &board.visible());
    render::print_summary(board);

    loop {
        match events.try_recv() {
            Ok(event) => println!("event: {event:?}"),
            Err(TryRecvError::Lagged(skipped)) => println!("event: {skipped} skipped"),
            Err(_) => break,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sorter_core::BoardBuilder;

    #[tokio::test]
    async fn demo_leaves_seed_tasks_in_place() {
        let board = BoardBuilder::new().build().unwrap();
        let before = board.tasks();

        run(&board).await.unwrap();

        assert_eq!(board.tasks(), before);
        assert!(board.filters().priority().is_unconstrained());
    }
}
