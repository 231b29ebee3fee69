//! Terminal rendering: task table, cards, filter panel, detail form header.

use comfy_table::{Cell, Color, ContentArrangement, Table};

use sorter_core::TaskBoard;
use sorter_core::domain::{Category, Priority, Status, SubTask, TaskRecord, ViewMode};
use sorter_core::filter::FilterSet;

fn status_color(status: Status) -> Color {
    match status {
        Status::Rejected => Color::Red,
        Status::Pending => Color::Yellow,
        Status::Active => Color::Blue,
        Status::Completed => Color::Green,
    }
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Grey,
    }
}

pub fn task_table(tasks: &[TaskRecord]) -> Table {
    let mut table = Table::new();
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#").fg(Color::Cyan),
            Cell::new("Title").fg(Color::Cyan),
            Cell::new("Status").fg(Color::Cyan),
            Cell::new("Priority").fg(Color::Cyan),
            Cell::new("Complexity").fg(Color::Cyan),
            Cell::new("Subtasks").fg(Color::Cyan),
        ]);

    for (index, task) in tasks.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&task.title),
            Cell::new(task.status.to_string()).fg(status_color(task.status)),
            Cell::new(task.priority.to_string()).fg(priority_color(task.priority)),
            Cell::new(task.complexity.to_string()),
            Cell::new(task.subtasks.len()),
        ]);
    }
    table
}

/// One bordered card per task.
pub fn task_card(task: &TaskRecord) -> Table {
    let mut table = Table::new();
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new(&task.title).fg(Color::Cyan)]);
    table.add_row(vec![Cell::new(&task.description)]);
    table.add_row(vec![Cell::new(format!(
        "{} · {} · {}",
        task.status, task.priority, task.complexity
    ))
    .fg(status_color(task.status))]);
    if !task.note.is_empty() {
        table.add_row(vec![Cell::new(format!("Note: {}", task.note)).fg(Color::DarkGrey)]);
    }
    for subtask in &task.subtasks {
        table.add_row(vec![Cell::new(format!("  └─ {}", subtask.title)).fg(Color::DarkGrey)]);
    }
    table
}

pub fn print_view(mode: ViewMode, tasks: &[TaskRecord]) {
    if tasks.is_empty() {
        println!("No tasks match the current filters.");
        return;
    }
    match mode {
        ViewMode::List => println!("{}", task_table(tasks)),
        ViewMode::Cards => {
            for task in tasks {
                println!("{}", task_card(task));
            }
        }
    }
}

pub fn filter_table(filters: &FilterSet) -> Table {
    let mut table = Table::new();
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Category").fg(Color::Cyan),
            Cell::new("Selected").fg(Color::Cyan),
        ]);
    for category in Category::ALL {
        let toggles = filters.category(category).toggles();
        let labels: Vec<String> = toggles
            .iter()
            .map(|t| {
                if t.selected() {
                    format!("[x] {}", t.label())
                } else {
                    format!("[ ] {}", t.label())
                }
            })
            .collect();
        table.add_row(vec![Cell::new(category), Cell::new(labels.join("  "))]);
    }
    table
}

pub fn print_summary(board: &TaskBoard) {
    println!(
        "{} of {} tasks shown ({:?} view)",
        board.visible().len(),
        board.tasks().len(),
        board.view_mode()
    );
}

/// Header of the detail form.
pub fn task_details(task: &TaskRecord, subtasks: &[SubTask]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec![Cell::new("Title").fg(Color::Cyan), Cell::new(&task.title)]);
    table.add_row(vec![
        Cell::new("Description").fg(Color::Cyan),
        Cell::new(&task.description),
    ]);
    table.add_row(vec![
        Cell::new("Status").fg(Color::Cyan),
        Cell::new(task.status.to_string()).fg(status_color(task.status)),
    ]);
    table.add_row(vec![
        Cell::new("Priority").fg(Color::Cyan),
        Cell::new(task.priority.to_string()).fg(priority_color(task.priority)),
    ]);
    table.add_row(vec![
        Cell::new("Complexity").fg(Color::Cyan),
        Cell::new(task.complexity.to_string()),
    ]);
    table.add_row(vec![Cell::new("Note").fg(Color::Cyan), Cell::new(&task.note)]);
    for (index, subtask) in subtasks.iter().enumerate() {
        table.add_row(vec![
            Cell::new(format!("Subtask {}", index + 1)).fg(Color::DarkGrey),
            Cell::new(format!("{} {}", subtask.title, subtask.text)),
        ]);
    }
    table
}
