//! TaskStore - 順序付きタスク集合の正本（source of truth）
//!
//! # 設計原則
//! - 挿入順を保持（削除しても残りの相対順は変わらない）
//! - 同一性は `TaskId` のみで判定
//! - 変更は add / upsert / remove 経由のみ。実際に変化したときだけ StoreChange を通知
//! - 通知はロックを外してから行う

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

use crate::domain::{Result, SorterError, StoreChange, TaskId, TaskRecord};
use crate::observe::{ObserverId, Observers};

/// Result of an `upsert`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Replaced,
    /// Same identity and identical contents; nothing changed.
    Unchanged,
}

/// Shared, observable task collection.
///
/// Cloning gives another handle to the same collection.
#[derive(Clone, Default)]
pub struct TaskStore {
    tasks: Arc<RwLock<Vec<TaskRecord>>>,
    observers: Observers<StoreChange>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing records; later duplicates of an id are dropped.
    pub fn from_records(records: impl IntoIterator<Item = TaskRecord>) -> Self {
        let store = Self::new();
        {
            let mut tasks = store.tasks.write();
            for record in records {
                if !tasks.iter().any(|t| t.id == record.id) {
                    tasks.push(record);
                }
            }
        }
        store
    }

    /// Snapshot in insertion order.
    pub fn get_all(&self) -> Vec<TaskRecord> {
        self.tasks.read().clone()
    }

    pub fn get(&self, id: TaskId) -> Option<TaskRecord> {
        self.tasks.read().iter().find(|t| t.id == id).cloned()
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.position(id).is_some()
    }

    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.read().iter().position(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.read().is_empty()
    }

    /// Append `task` unless its identity is already present.
    ///
    /// Returns true when the record was appended.
    pub fn add(&self, task: TaskRecord) -> bool {
        let change = {
            let mut tasks = self.tasks.write();
            if tasks.iter().any(|t| t.id == task.id) {
                None
            } else {
                let id = task.id;
                tasks.push(task);
                Some(StoreChange::Added {
                    id,
                    index: tasks.len() - 1,
                })
            }
        };
        match change {
            Some(change) => {
                self.publish(change);
                true
            }
            None => false,
        }
    }

    /// Replace in place when the identity is present, otherwise append.
    pub fn upsert(&self, task: TaskRecord) -> Upsert {
        let (result, change) = {
            let mut tasks = self.tasks.write();
            let id = task.id;
            match tasks.iter().position(|t| t.id == id) {
                Some(index) if tasks[index] == task => (Upsert::Unchanged, None),
                Some(index) => {
                    tasks[index] = task;
                    (Upsert::Replaced, Some(StoreChange::Replaced { id, index }))
                }
                None => {
                    tasks.push(task);
                    let index = tasks.len() - 1;
                    (Upsert::Inserted, Some(StoreChange::Added { id, index }))
                }
            }
        };
        if let Some(change) = change {
            self.publish(change);
        }
        result
    }

    /// Remove by identity; fails fast when the id is not tracked.
    pub fn remove(&self, id: TaskId) -> Result<TaskRecord> {
        let (removed, index) = {
            let mut tasks = self.tasks.write();
            let index = tasks
                .iter()
                .position(|t| t.id == id)
                .ok_or(SorterError::UnknownTask(id))?;
            (tasks.remove(index), index)
        };
        self.publish(StoreChange::Removed { id, index });
        Ok(removed)
    }

    pub fn subscribe<F>(&self, callback: F) -> ObserverId
    where
        F: Fn(&StoreChange) + Send + Sync + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn publish(&self, change: StoreChange) {
        debug!(?change, "task store changed");
        self.observers.emit(&change);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Priority;
    use chrono::Utc;
    use parking_lot::Mutex;
    use ulid::Ulid;

    fn task(title: &str) -> TaskRecord {
        TaskRecord::new(TaskId::from_ulid(Ulid::new()), Utc::now()).with_title(title)
    }

    fn recording(store: &TaskStore) -> Arc<Mutex<Vec<StoreChange>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        store.subscribe(move |change| sink.lock().push(change.clone()));
        seen
    }

    fn titles(store: &TaskStore) -> Vec<String> {
        store.get_all().into_iter().map(|t| t.title).collect()
    }

    #[test]
    fn add_keeps_insertion_order_and_rejects_duplicates() {
        let store = TaskStore::new();
        let a = task("a");
        let b = task("b");

        assert!(store.add(a.clone()));
        assert!(store.add(b));
        assert!(!store.add(a));

        assert_eq!(titles(&store), vec!["a", "b"]);
    }

    #[test]
    fn upsert_replaces_in_place() {
        let store = TaskStore::new();
        let a = task("a");
        let b = task("b");
        let c = task("c");
        for t in [&a, &b, &c] {
            store.add(t.clone());
        }

        let edited = b.clone().with_priority(Priority::High).with_title("b2");
        assert_eq!(store.upsert(edited), Upsert::Replaced);

        assert_eq!(titles(&store), vec!["a", "b2", "c"]);
        assert_eq!(store.get(b.id).unwrap().priority, Priority::High);
    }

    #[test]
    fn upsert_is_idempotent() {
        let store = TaskStore::new();
        let seen = recording(&store);
        let a = task("a");

        assert_eq!(store.upsert(a.clone()), Upsert::Inserted);
        assert_eq!(store.upsert(a.clone()), Upsert::Unchanged);
        assert_eq!(store.upsert(a.clone()), Upsert::Unchanged);

        assert_eq!(store.len(), 1);
        assert_eq!(seen.lock().len(), 1);
    }

    #[test]
    fn remove_preserves_relative_order() {
        let store = TaskStore::new();
        let a = task("a");
        let b = task("b");
        let c = task("c");
        for t in [&a, &b, &c] {
            store.add(t.clone());
        }

        let removed = store.remove(b.id).unwrap();
        assert_eq!(removed.title, "b");
        assert_eq!(titles(&store), vec!["a", "c"]);
    }

    #[test]
    fn remove_unknown_id_fails_without_touching_store() {
        let store = TaskStore::new();
        store.add(task("a"));
        let seen = recording(&store);
        let stranger = TaskId::from_ulid(Ulid::new());

        let err = store.remove(stranger).unwrap_err();

        assert!(matches!(err, SorterError::UnknownTask(id) if id == stranger));
        assert_eq!(store.len(), 1);
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn changes_carry_id_and_index() {
        let store = TaskStore::new();
        let seen = recording(&store);
        let a = task("a");
        let b = task("b");

        store.add(a.clone());
        store.add(b.clone());
        store.upsert(b.clone().with_title("b2"));
        store.remove(a.id).unwrap();

        assert_eq!(
            *seen.lock(),
            vec![
                StoreChange::Added { id: a.id, index: 0 },
                StoreChange::Added { id: b.id, index: 1 },
                StoreChange::Replaced { id: b.id, index: 1 },
                StoreChange::Removed { id: a.id, index: 0 },
            ]
        );
    }

    #[test]
    fn from_records_drops_duplicate_ids() {
        let a = task("a");
        let store = TaskStore::from_records(vec![a.clone(), a.clone().with_title("again")]);
        assert_eq!(titles(&store), vec!["a"]);
    }

    #[test]
    fn clones_share_the_collection() {
        let store = TaskStore::new();
        let other = store.clone();
        other.add(task("shared"));
        assert_eq!(store.len(), 1);
    }
}
