//! Events - 変更通知
//!
//! Store / FilterSet / TaskBoard が発行する通知の型です。
//! 派生ビュー（FilteredView）はこれらを購読して再計算します。

use serde::{Deserialize, Serialize};

use super::classification::Category;
use super::ids::TaskId;
use super::outcome::SessionOutcome;

/// Effective mutation of the TaskStore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    Added { id: TaskId, index: usize },
    Replaced { id: TaskId, index: usize },
    Removed { id: TaskId, index: usize },
}

/// Change inside one filter category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    Toggled {
        category: Category,
        label: String,
        selected: bool,
    },
    ToggleAdded { category: Category, label: String },
    ToggleRemoved { category: Category, label: String },
}

impl FilterChange {
    pub fn category(&self) -> Category {
        match self {
            FilterChange::Toggled { category, .. }
            | FilterChange::ToggleAdded { category, .. }
            | FilterChange::ToggleRemoved { category, .. } => *category,
        }
    }
}

/// How the presentation layer lays out the task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Cards,
    List,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Cards => ViewMode::List,
            ViewMode::List => ViewMode::Cards,
        }
    }
}

/// Board-level notifications for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    ViewModeChanged(ViewMode),
    SessionFinished {
        task: TaskId,
        outcome: SessionOutcome,
    },
}

/// Fire-and-forget confirmation shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    TaskSaved { title: String },
    TaskDeleted { title: String },
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::TaskSaved { title } => format!("Task saved: {title}"),
            Notice::TaskDeleted { title } => format!("Task deleted: {title}"),
        }
    }
}
