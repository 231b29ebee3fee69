//! TaskRepository port - 永続化プロバイダ
//!
//! # 契約
//! - 同期呼び出し、常に成功する
//! - 同一性は `TaskId` で判定
//!
//! 非同期の実装に差し替える場合は、このポートではなく
//! セッション / ホスト側の調停を設計し直す必要があります。

use crate::domain::{TaskId, TaskRecord};

pub trait TaskRepository: Send + Sync {
    /// All records in insertion order.
    fn get_all(&self) -> Vec<TaskRecord>;

    /// Append; ignored when the id is already stored.
    fn add(&self, task: TaskRecord);

    /// Replace the stored record with the same id (append when missing).
    fn update(&self, task: TaskRecord);

    /// Remove by id; ignored when the id is not stored.
    fn delete(&self, id: TaskId);

    fn contains(&self, id: TaskId) -> bool {
        self.get_all().iter().any(|t| t.id == id)
    }
}
