//! TaskController - リポジトリと TaskStore の調停役
//!
//! セッションの save / delete コールバックから呼ばれます。
//! リポジトリへ書いてから Store を更新するので、Store の変更通知を受けた
//! 時点でリポジトリ側はすでに最新です。

use std::sync::Arc;
use tracing::debug;

use crate::domain::{Result, TaskId, TaskRecord};
use crate::ports::{Clock, TaskRepository};
use crate::store::{TaskStore, Upsert};

#[derive(Clone)]
pub struct TaskController {
    repository: Arc<dyn TaskRepository>,
    store: TaskStore,
    clock: Arc<dyn Clock>,
}

impl TaskController {
    pub fn new(repository: Arc<dyn TaskRepository>, store: TaskStore, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            store,
            clock,
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Add a new record to the repository and the store.
    ///
    /// Returns false when the store already tracks the id.
    pub fn add_task(&self, task: TaskRecord) -> bool {
        self.repository.add(task.clone());
        self.store.add(task)
    }

    /// Live edit of a tracked record: repository first, then the store.
    ///
    /// Ignored (false) when the store does not track the id, so an unsaved
    /// draft never leaks into either side before `save_task`.
    pub fn write_through(&self, task: &TaskRecord) -> bool {
        if !self.store.contains(task.id) {
            return false;
        }
        self.repository.update(task.clone());
        self.store.upsert(task.clone());
        true
    }

    /// Persist `task` and reconcile the store with it.
    ///
    /// The repository gets `update` when it already knows the id and `add`
    /// otherwise; the store is upserted so the id appears exactly once.
    pub fn save_task(&self, task: &TaskRecord) -> Upsert {
        let mut record = task.clone();
        record.touch(self.clock.now());

        if self.repository.contains(record.id) {
            self.repository.update(record.clone());
        } else {
            self.repository.add(record.clone());
        }
        let result = self.store.upsert(record);
        debug!(task = %task.id, ?result, "task saved");
        result
    }

    /// Drop `id` from the repository and the store.
    ///
    /// The repository delete always happens; the store returns
    /// `SorterError::UnknownTask` when it was not tracking the id.
    pub fn delete_task(&self, id: TaskId) -> Result<TaskRecord> {
        self.repository.delete(id);
        let removed = self.store.remove(id)?;
        debug!(task = %id, "task deleted");
        Ok(removed)
    }
}
