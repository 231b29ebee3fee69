//! FilterSet - status / priority / complexity の 3 カテゴリ

use std::collections::HashMap;

use super::category::FilterCategory;
use super::predicate::FilterSnapshot;
use crate::domain::{Category, FilterChange, Result, SorterError};
use crate::observe::{ObserverId, Observers};

/// The three independent filter categories plus a merged change stream.
#[derive(Clone)]
pub struct FilterSet {
    status: FilterCategory,
    priority: FilterCategory,
    complexity: FilterCategory,
    observers: Observers<FilterChange>,
}

impl FilterSet {
    /// Default toggles for every category, nothing selected.
    pub fn standard() -> Self {
        Self::from_categories(
            FilterCategory::standard(Category::Status),
            FilterCategory::standard(Category::Priority),
            FilterCategory::standard(Category::Complexity),
        )
    }

    pub fn from_categories(
        status: FilterCategory,
        priority: FilterCategory,
        complexity: FilterCategory,
    ) -> Self {
        let observers = Observers::new();
        for category in [&status, &priority, &complexity] {
            let forward = observers.clone();
            category.subscribe(move |change: &FilterChange| forward.emit(change));
        }
        Self {
            status,
            priority,
            complexity,
            observers,
        }
    }

    pub fn category(&self, category: Category) -> &FilterCategory {
        match category {
            Category::Status => &self.status,
            Category::Priority => &self.priority,
            Category::Complexity => &self.complexity,
        }
    }

    pub fn status(&self) -> &FilterCategory {
        &self.status
    }

    pub fn priority(&self) -> &FilterCategory {
        &self.priority
    }

    pub fn complexity(&self) -> &FilterCategory {
        &self.complexity
    }

    pub fn toggle(&self, category: Category, label: &str) -> Result<bool> {
        self.category(category).toggle(label)
    }

    /// Labels in `selection` that no toggle of their category carries,
    /// in category order.
    pub fn unknown_labels(&self, selection: &HashMap<Category, Vec<String>>) -> Vec<(Category, String)> {
        let mut unknown = Vec::new();
        for category in Category::ALL {
            let Some(labels) = selection.get(&category) else {
                continue;
            };
            let known = self.category(category).labels();
            unknown.extend(
                labels
                    .iter()
                    .filter(|l| !known.contains(*l))
                    .map(|l| (category, l.clone())),
            );
        }
        unknown
    }

    /// Select the given labels per category (used for configured presets).
    ///
    /// Nothing is selected when any label is unknown.
    pub fn preselect(&self, selection: &HashMap<Category, Vec<String>>) -> Result<()> {
        if let Some((category, label)) = self.unknown_labels(selection).into_iter().next() {
            return Err(SorterError::UnknownLabel { category, label });
        }
        for (category, labels) in selection {
            let target = self.category(*category);
            for label in labels {
                target.set_selected(label, true)?;
            }
        }
        Ok(())
    }

    pub fn clear(&self) {
        for category in Category::ALL {
            self.category(category).clear();
        }
    }

    pub fn snapshot(&self) -> FilterSnapshot {
        FilterSnapshot {
            status: self.status.selected_labels(),
            priority: self.priority.selected_labels(),
            complexity: self.complexity.selected_labels(),
        }
    }

    /// Called for changes in any of the three categories.
    pub fn subscribe<F>(&self, callback: F) -> ObserverId
    where
        F: Fn(&FilterChange) + Send + Sync + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }
}

impl Default for FilterSet {
    fn default() -> Self {
        Self::standard()
    }
}
