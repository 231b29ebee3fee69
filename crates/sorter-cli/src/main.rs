use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use sorter_core::domain::{Classification, Complexity, Priority, SorterError, Status, ViewMode};
use sorter_core::{BoardBuilder, BoardConfig, TaskBoard};

mod demo;
mod form;
mod render;
mod shell;

#[derive(Parser)]
#[command(name = "sorter", version, about = "Sort and filter tasks in the terminal")]
struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter (overrides the config; RUST_LOG wins over both)
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the tasks passing the given filters
    List {
        /// Status labels to select (repeatable)
        #[arg(long, value_parser = parse_label::<Status>)]
        status: Vec<Status>,

        /// Priority labels to select (repeatable)
        #[arg(long, value_parser = parse_label::<Priority>)]
        priority: Vec<Priority>,

        /// Complexity labels to select (repeatable)
        #[arg(long, value_parser = parse_label::<Complexity>)]
        complexity: Vec<Complexity>,

        #[arg(long, value_enum)]
        view: Option<ViewArg>,

        /// Print the filtered tasks as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a scripted create / save / delete round
    Demo,

    /// Interactive board (default)
    Shell,
}

#[derive(Clone, Copy, ValueEnum)]
enum ViewArg {
    Cards,
    List,
}

impl From<ViewArg> for ViewMode {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::Cards => ViewMode::Cards,
            ViewArg::List => ViewMode::List,
        }
    }
}

fn parse_label<T>(s: &str) -> Result<T, SorterError>
where
    T: FromStr<Err = SorterError>,
{
    s.parse()
}

fn load_config(path: Option<&PathBuf>) -> Result<BoardConfig> {
    match path {
        Some(path) => BoardConfig::from_path(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(BoardConfig::default()),
    }
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn build_board(config: BoardConfig) -> Result<TaskBoard> {
    BoardBuilder::from_config(config)
        .build()
        .context("failed to build the task board")
}

fn select_labels<T: Classification>(board: &TaskBoard, values: &[T]) -> Result<()> {
    for value in values {
        let category = board.filters().category(T::CATEGORY);
        category
            .set_selected(value.label(), true)
            .with_context(|| format!("cannot select {} '{}'", T::CATEGORY, value.label()))?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref())?;
    init_tracing(cli.log.as_deref().unwrap_or(&config.log_filter));
    debug!(?config, "config loaded");

    match cli.command.unwrap_or(Command::Shell) {
        Command::List {
            status,
            priority,
            complexity,
            view,
            json,
        } => {
            let board = build_board(config)?;
            select_labels(&board, &status)?;
            select_labels(&board, &priority)?;
            select_labels(&board, &complexity)?;

            let tasks = board.visible();
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else {
                let mode = view.map(ViewMode::from).unwrap_or(board.view_mode());
                render::print_view(mode, &tasks);
                render::print_summary(&board);
            }
        }
        Command::Demo => demo::run(&build_board(config)?).await?,
        Command::Shell => shell::run(&build_board(config)?).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sorter_core::domain::Category;

    #[test]
    fn list_flags_parse_labels_case_insensitively() {
        let cli = Cli::try_parse_from([
            "sorter", "list", "--priority", "high", "--priority", "Low", "--status", "active",
        ])
        .unwrap();

        match cli.command {
            Some(Command::List {
                status, priority, ..
            }) => {
                assert_eq!(priority, vec![Priority::High, Priority::Low]);
                assert_eq!(status, vec![Status::Active]);
            }
            _ => panic!("expected the list command"),
        }
    }

    #[test]
    fn unknown_label_is_rejected_by_the_parser() {
        assert!(Cli::try_parse_from(["sorter", "list", "--complexity", "huge"]).is_err());
    }

    #[test]
    fn selected_labels_narrow_the_view() {
        let board = BoardBuilder::new().build().unwrap();
        select_labels(&board, &[Priority::High]).unwrap();

        assert_eq!(board.visible().len(), 1);
        assert!(board.filters().category(Category::Priority).is_selected("High").unwrap());
    }
}
