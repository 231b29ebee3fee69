//! InMemoryTaskRepository - 開発用の永続化スタブ
//!
//! # 実装詳細
//! - `Arc<RwLock<Vec<TaskRecord>>>` で挿入順を保持
//! - `with_seed_data` で 2 件のサンプルタスクを投入
//!
//! # 使用例
//! ```ignore
//! let repo = InMemoryTaskRepository::with_seed_data(&ids, &clock);
//! assert_eq!(repo.get_all().len(), 2);
//! ```

use parking_lot::RwLock;
use std::sync::Arc;

use crate::domain::{Complexity, Priority, Status, TaskId, TaskRecord};
use crate::ports::{Clock, IdGenerator, TaskRepository};

#[derive(Clone, Default)]
pub struct InMemoryTaskRepository {
    store: Arc<RwLock<Vec<TaskRecord>>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository holding the two sample tasks.
    pub fn with_seed_data(ids: &dyn IdGenerator, clock: &dyn Clock) -> Self {
        let now = clock.now();
        let repo = Self::new();
        repo.add(
            TaskRecord::new(ids.generate_task_id(), now)
                .with_title("Order a new mobile phone")
                .with_description("Order a new Samsung Galaxy for the new employee")
                .with_status(Status::Active)
                .with_priority(Priority::High)
                .with_complexity(Complexity::Simple),
        );
        repo.add(
            TaskRecord::new(ids.generate_task_id(), now)
                .with_title("Update the company website")
                .with_description("The website needs new product photos and refreshed copy")
                .with_status(Status::Pending)
                .with_priority(Priority::Medium)
                .with_complexity(Complexity::Moderate),
        );
        repo
    }
}

impl TaskRepository for InMemoryTaskRepository {
    fn get_all(&self) -> Vec<TaskRecord> {
        self.store.read().clone()
    }

    fn add(&self, task: TaskRecord) {
        let mut store = self.store.write();
        if !store.iter().any(|t| t.id == task.id) {
            store.push(task);
        }
    }

    fn update(&self, task: TaskRecord) {
        let mut store = self.store.write();
        match store.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => *slot = task,
            None => store.push(task),
        }
    }

    fn delete(&self, id: TaskId) {
        self.store.write().retain(|t| t.id != id);
    }

    fn contains(&self, id: TaskId) -> bool {
        self.store.read().iter().any(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{SystemClock, UlidGenerator};

    fn seeded() -> InMemoryTaskRepository {
        InMemoryTaskRepository::with_seed_data(&UlidGenerator::new(SystemClock), &SystemClock)
    }

    #[test]
    fn seed_data_has_two_tasks() {
        let repo = seeded();
        let tasks = repo.get_all();

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].status, Status::Active);
        assert_eq!(tasks[0].priority, Priority::High);
        assert_eq!(tasks[1].complexity, Complexity::Moderate);
        assert_ne!(tasks[0].id, tasks[1].id);
    }

    #[test]
    fn add_ignores_known_ids() {
        let repo = seeded();
        let first = repo.get_all()[0].clone();

        repo.add(first.with_title("renamed"));

        assert_eq!(repo.get_all().len(), 2);
        assert_eq!(repo.get_all()[0].title, "Order a new mobile phone");
    }

    #[test]
    fn update_replaces_or_appends() {
        let repo = seeded();
        let first = repo.get_all()[0].clone();

        repo.update(first.clone().with_priority(Priority::Low));
        assert_eq!(repo.get_all()[0].priority, Priority::Low);

        let ids = UlidGenerator::new(SystemClock);
        repo.update(TaskRecord::new(ids.generate_task_id(), SystemClock.now()));
        assert_eq!(repo.get_all().len(), 3);
    }

    #[test]
    fn delete_is_a_noop_for_unknown_ids() {
        let repo = seeded();
        let first = repo.get_all()[0].id;

        repo.delete(first);
        repo.delete(first);

        assert_eq!(repo.get_all().len(), 1);
        assert!(!repo.contains(first));
    }
}
