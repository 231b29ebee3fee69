//! FilterCategory - 1 つの分類軸に属する toggle の集合

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use super::predicate;
use crate::domain::{Category, FilterChange, Result, SorterError};
use crate::observe::{ObserverId, Observers};

/// A named boolean filter condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterToggle {
    label: String,
    pub(super) selected: bool,
}

impl FilterToggle {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            selected: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn selected(&self) -> bool {
        self.selected
    }
}

/// Ordered toggles with unique labels for one category.
///
/// Handles are cheap to clone and share state. Each effective change raises a
/// `FilterChange` scoped to this category.
#[derive(Clone)]
pub struct FilterCategory {
    kind: Category,
    toggles: Arc<RwLock<Vec<FilterToggle>>>,
    observers: Observers<FilterChange>,
}

impl std::fmt::Debug for FilterCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterCategory")
            .field("kind", &self.kind)
            .field("toggles", &*self.toggles.read())
            .finish_non_exhaustive()
    }
}

impl FilterCategory {
    /// Empty category (unconstrained, no toggles).
    pub fn empty(kind: Category) -> Self {
        Self {
            kind,
            toggles: Arc::new(RwLock::new(Vec::new())),
            observers: Observers::new(),
        }
    }

    /// Category holding one toggle per label; duplicate labels are rejected.
    pub fn with_labels<I, S>(kind: Category, labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let category = Self::empty(kind);
        {
            let mut toggles = category.toggles.write();
            for label in labels {
                let label = label.into();
                if toggles.iter().any(|t| t.label == label) {
                    return Err(SorterError::DuplicateLabel { category: kind, label });
                }
                toggles.push(FilterToggle::new(label));
            }
        }
        Ok(category)
    }

    /// Category with the default labels of `kind`.
    pub fn standard(kind: Category) -> Self {
        let category = Self::empty(kind);
        category
            .toggles
            .write()
            .extend(kind.labels().into_iter().map(FilterToggle::new));
        category
    }

    pub fn kind(&self) -> Category {
        self.kind
    }

    pub fn toggles(&self) -> Vec<FilterToggle> {
        self.toggles.read().clone()
    }

    pub fn labels(&self) -> Vec<String> {
        self.toggles.read().iter().map(|t| t.label.clone()).collect()
    }

    pub fn is_selected(&self, label: &str) -> Result<bool> {
        self.toggles
            .read()
            .iter()
            .find(|t| t.label == label)
            .map(|t| t.selected)
            .ok_or_else(|| self.unknown(label))
    }

    pub fn selected_labels(&self) -> HashSet<String> {
        self.toggles
            .read()
            .iter()
            .filter(|t| t.selected)
            .map(|t| t.label.clone())
            .collect()
    }

    /// No toggle selected: this dimension imposes no filtering.
    pub fn is_unconstrained(&self) -> bool {
        !self.toggles.read().iter().any(|t| t.selected)
    }

    /// catMatch for a single value, scanning the toggles.
    pub fn matches(&self, value: &str) -> bool {
        predicate::category_matches(&self.toggles.read(), value)
    }

    /// Flip `label` and return its new state.
    pub fn toggle(&self, label: &str) -> Result<bool> {
        let selected = {
            let mut toggles = self.toggles.write();
            let toggle = toggles
                .iter_mut()
                .find(|t| t.label == label)
                .ok_or_else(|| self.unknown(label))?;
            toggle.selected = !toggle.selected;
            toggle.selected
        };
        self.publish(FilterChange::Toggled {
            category: self.kind,
            label: label.to_string(),
            selected,
        });
        Ok(selected)
    }

    /// Set `label` explicitly; notifies only when the value changed.
    pub fn set_selected(&self, label: &str, selected: bool) -> Result<()> {
        let changed = {
            let mut toggles = self.toggles.write();
            let toggle = toggles
                .iter_mut()
                .find(|t| t.label == label)
                .ok_or_else(|| self.unknown(label))?;
            let changed = toggle.selected != selected;
            toggle.selected = selected;
            changed
        };
        if changed {
            self.publish(FilterChange::Toggled {
                category: self.kind,
                label: label.to_string(),
                selected,
            });
        }
        Ok(())
    }

    /// Deselect everything.
    pub fn clear(&self) {
        let cleared: Vec<String> = {
            let mut toggles = self.toggles.write();
            toggles
                .iter_mut()
                .filter(|t| t.selected)
                .map(|t| {
                    t.selected = false;
                    t.label.clone()
                })
                .collect()
        };
        for label in cleared {
            self.publish(FilterChange::Toggled {
                category: self.kind,
                label,
                selected: false,
            });
        }
    }

    pub fn add_toggle(&self, label: impl Into<String>) -> Result<()> {
        let label = label.into();
        {
            let mut toggles = self.toggles.write();
            if toggles.iter().any(|t| t.label == label) {
                return Err(SorterError::DuplicateLabel {
                    category: self.kind,
                    label,
                });
            }
            toggles.push(FilterToggle::new(label.clone()));
        }
        self.publish(FilterChange::ToggleAdded {
            category: self.kind,
            label,
        });
        Ok(())
    }

    pub fn remove_toggle(&self, label: &str) -> Result<FilterToggle> {
        let removed = {
            let mut toggles = self.toggles.write();
            let index = toggles
                .iter()
                .position(|t| t.label == label)
                .ok_or_else(|| self.unknown(label))?;
            toggles.remove(index)
        };
        self.publish(FilterChange::ToggleRemoved {
            category: self.kind,
            label: label.to_string(),
        });
        Ok(removed)
    }

    pub fn subscribe<F>(&self, callback: F) -> ObserverId
    where
        F: Fn(&FilterChange) + Send + Sync + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn publish(&self, change: FilterChange) {
        debug!(?change, "filter changed");
        self.observers.emit(&change);
    }

    fn unknown(&self, label: &str) -> SorterError {
        SorterError::UnknownLabel {
            category: self.kind,
            label: label.to_string(),
        }
    }
}
