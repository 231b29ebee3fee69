//! Filter predicate: OR within a category, AND across categories.
//!
//! ```text
//! match(task) = catMatch(status, task.status)
//!            AND catMatch(priority, task.priority)
//!            AND catMatch(complexity, task.complexity)
//! ```
//!
//! A category with nothing selected is unconstrained (vacuously true).

use std::collections::HashSet;

use super::category::FilterToggle;
use crate::domain::{Category, Classification, TaskRecord};

/// catMatch over a toggle list.
pub fn category_matches(toggles: &[FilterToggle], value: &str) -> bool {
    let mut any_selected = false;
    for toggle in toggles.iter().filter(|t| t.selected) {
        if toggle.label() == value {
            return true;
        }
        any_selected = true;
    }
    !any_selected
}

/// catMatch over a pre-computed set of selected labels (O(1) per task).
pub fn selected_matches(selected: &HashSet<String>, value: &str) -> bool {
    selected.is_empty() || selected.contains(value)
}

/// Selected labels of every category, captured at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSnapshot {
    pub status: HashSet<String>,
    pub priority: HashSet<String>,
    pub complexity: HashSet<String>,
}

impl FilterSnapshot {
    pub fn selected(&self, category: Category) -> &HashSet<String> {
        match category {
            Category::Status => &self.status,
            Category::Priority => &self.priority,
            Category::Complexity => &self.complexity,
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.status.is_empty() && self.priority.is_empty() && self.complexity.is_empty()
    }

    pub fn matches(&self, task: &TaskRecord) -> bool {
        selected_matches(&self.status, task.status.label())
            && selected_matches(&self.priority, task.priority.label())
            && selected_matches(&self.complexity, task.complexity.label())
    }
}
