//! EditSession - 1 件のタスクに束縛された編集コントローラ
//!
//! # 状態遷移
//! - Open -> Saved（save: 保存コールバック → 完了シグナル）
//! - Open -> Deleted（delete: 削除コールバック → 完了シグナル）
//! - Open -> Cancelled（cancel / 何も決めずに drop）
//!
//! 完了シグナルはセッションごとに最大 1 回だけ発火します。
//! 終端状態での save / delete / 編集は `SorterError::InvalidTransition` を返し、
//! コールバックもシグナルも再実行しません。
//!
//! # 編集ポリシー
//! - `Buffered`: 作業コピーだけを編集し、save で確定。cancel で破棄。
//! - `Live`: 編集のたびに `on_edit` で共有レコードへ書き込む。
//!   cancel しても適用済みの編集は残ります。

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::completion::{self, Completion, Signal};
use super::ModalSession;
use crate::domain::{
    Complexity, EditPolicy, Priority, Result, SessionId, SessionOutcome, SessionState,
    SorterError, Status, SubTask, TaskRecord,
};

/// Caller-supplied reaction to a session decision or edit.
pub type TaskCallback = Box<dyn FnMut(&TaskRecord) + Send>;

/// One user action inside the detail form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum EditAction {
    SetTitle { value: String },
    SetDescription { value: String },
    SetStatus { value: Status },
    SetPriority { value: Priority },
    SetComplexity { value: Complexity },
    SetNote { value: String },
    AddSubtask,
    UpdateSubtask { index: usize, title: String, text: String },
    Save,
    Delete,
    Cancel,
}

pub struct EditSession {
    id: SessionId,
    policy: EditPolicy,
    task: TaskRecord,
    subtasks: Vec<SubTask>,
    state: SessionState,
    on_save: Option<TaskCallback>,
    on_delete: Option<TaskCallback>,
    on_edit: Option<TaskCallback>,
    signal: Signal<SessionOutcome>,
    completion: Option<Completion<SessionOutcome>>,
}

impl EditSession {
    /// Open a session bound to `task`.
    pub fn open(id: SessionId, task: TaskRecord, policy: EditPolicy) -> Self {
        let (signal, completion) = completion::channel();
        debug!(session = %id, task = %task.id, ?policy, "edit session opened");
        Self {
            id,
            policy,
            subtasks: task.subtasks.clone(),
            task,
            state: SessionState::Open,
            on_save: None,
            on_delete: None,
            on_edit: None,
            signal,
            completion: Some(completion),
        }
    }

    /// Invoked by `save()` with the bound task, before the completion signal.
    pub fn on_save(mut self, callback: impl FnMut(&TaskRecord) + Send + 'static) -> Self {
        self.on_save = Some(Box::new(callback));
        self
    }

    /// Invoked by `delete()` with the bound task, before the completion signal.
    pub fn on_delete(mut self, callback: impl FnMut(&TaskRecord) + Send + 'static) -> Self {
        self.on_delete = Some(Box::new(callback));
        self
    }

    /// Write-through hook; only called under `EditPolicy::Live`.
    pub fn on_edit(mut self, callback: impl FnMut(&TaskRecord) + Send + 'static) -> Self {
        self.on_edit = Some(Box::new(callback));
        self
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn policy(&self) -> EditPolicy {
        self.policy
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }

    /// The bound task as currently edited.
    pub fn task(&self) -> &TaskRecord {
        &self.task
    }

    /// Working list of subtasks shown by the detail form.
    pub fn subtasks(&self) -> &[SubTask] {
        &self.subtasks
    }

    /// Waiting side of the completion signal; `None` once taken.
    pub fn take_completion(&mut self) -> Option<Completion<SessionOutcome>> {
        self.completion.take()
    }

    pub fn set_title(&mut self, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        self.edit(|task| task.title = value)
    }

    pub fn set_description(&mut self, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        self.edit(|task| task.description = value)
    }

    pub fn set_status(&mut self, value: Status) -> Result<()> {
        self.edit(|task| task.status = value)
    }

    pub fn set_priority(&mut self, value: Priority) -> Result<()> {
        self.edit(|task| task.priority = value)
    }

    pub fn set_complexity(&mut self, value: Complexity) -> Result<()> {
        self.edit(|task| task.complexity = value)
    }

    pub fn set_note(&mut self, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        self.edit(|task| task.note = value)
    }

    /// Append a default subtask to the working list and the bound task.
    pub fn add_subtask(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.subtasks.push(SubTask::default());
        self.edit(|task| task.subtasks.push(SubTask::default()))
    }

    pub fn update_subtask(
        &mut self,
        index: usize,
        title: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<()> {
        self.ensure_open()?;
        let len = self.subtasks.len();
        if index >= len {
            return Err(SorterError::SubtaskOutOfRange { index, len });
        }
        let updated = SubTask::new(title, text);
        self.subtasks[index] = updated.clone();
        self.edit(|task| {
            if let Some(slot) = task.subtasks.get_mut(index) {
                *slot = updated;
            }
        })
    }

    /// Commit: save callback, then `Saved` and the completion signal.
    pub fn save(&mut self) -> Result<()> {
        self.ensure_open()?;
        if let Some(on_save) = self.on_save.as_mut() {
            on_save(&self.task);
        }
        self.finish(SessionOutcome::Saved);
        Ok(())
    }

    /// Delete callback, then `Deleted` and the completion signal.
    pub fn delete(&mut self) -> Result<()> {
        self.ensure_open()?;
        if let Some(on_delete) = self.on_delete.as_mut() {
            on_delete(&self.task);
        }
        self.finish(SessionOutcome::Deleted);
        Ok(())
    }

    /// Close without a decision.
    pub fn cancel(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.finish(SessionOutcome::Cancelled);
        Ok(())
    }

    pub fn apply(&mut self, action: EditAction) -> Result<()> {
        match action {
            EditAction::SetTitle { value } => self.set_title(value),
            EditAction::SetDescription { value } => self.set_description(value),
            EditAction::SetStatus { value } => self.set_status(value),
            EditAction::SetPriority { value } => self.set_priority(value),
            EditAction::SetComplexity { value } => self.set_complexity(value),
            EditAction::SetNote { value } => self.set_note(value),
            EditAction::AddSubtask => self.add_subtask(),
            EditAction::UpdateSubtask { index, title, text } => {
                self.update_subtask(index, title, text)
            }
            EditAction::Save => self.save(),
            EditAction::Delete => self.delete(),
            EditAction::Cancel => self.cancel(),
        }
    }

    fn edit(&mut self, change: impl FnOnce(&mut TaskRecord)) -> Result<()> {
        self.ensure_open()?;
        change(&mut self.task);
        if self.policy == EditPolicy::Live
            && let Some(on_edit) = self.on_edit.as_mut()
        {
            on_edit(&self.task);
        }
        Ok(())
    }

    fn ensure_open(&self) -> Result<()> {
        if self.state.is_terminal() {
            return Err(SorterError::InvalidTransition {
                session: self.id,
                state: self.state,
            });
        }
        Ok(())
    }

    fn finish(&mut self, outcome: SessionOutcome) {
        self.state = outcome.state();
        if self.signal.fire(outcome) {
            info!(session = %self.id, task = %self.task.id, %outcome, "edit session finished");
        }
    }
}

impl ModalSession for EditSession {
    type Outcome = SessionOutcome;

    fn take_completion(&mut self) -> Option<Completion<SessionOutcome>> {
        EditSession::take_completion(self)
    }

    fn dismiss(&mut self) {
        if self.is_open() {
            self.finish(SessionOutcome::Cancelled);
        }
    }
}

impl Drop for EditSession {
    fn drop(&mut self) {
        self.dismiss();
    }
}

impl std::fmt::Debug for EditSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditSession")
            .field("id", &self.id)
            .field("policy", &self.policy)
            .field("state", &self.state)
            .field("task", &self.task.id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskId;
    use chrono::Utc;
    use parking_lot::Mutex;
    use rstest::rstest;
    use std::sync::Arc;
    use ulid::Ulid;

    fn task() -> TaskRecord {
        TaskRecord::new(TaskId::from_ulid(Ulid::new()), Utc::now())
    }

    fn session(policy: EditPolicy) -> EditSession {
        EditSession::open(SessionId::from_ulid(Ulid::new()), task(), policy)
    }

    #[tokio::test]
    async fn save_runs_callback_then_signals_saved() {
        let saved = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&saved);
        let mut session = session(EditPolicy::Buffered)
            .on_save(move |task: &TaskRecord| sink.lock().push(task.priority));
        let completion = session.take_completion().unwrap();

        session.set_priority(Priority::High).unwrap();
        session.save().unwrap();

        assert_eq!(*saved.lock(), vec![Priority::High]);
        assert_eq!(session.state(), SessionState::Saved);
        assert_eq!(completion.wait().await, SessionOutcome::Saved);
    }

    #[test]
    fn second_save_is_rejected_and_does_not_refire() {
        let calls = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&calls);
        let mut session =
            session(EditPolicy::Buffered).on_save(move |_: &TaskRecord| *counter.lock() += 1);
        let mut completion = session.take_completion().unwrap();

        session.save().unwrap();
        for _ in 0..3 {
            assert!(matches!(
                session.save(),
                Err(SorterError::InvalidTransition { state: SessionState::Saved, .. })
            ));
        }
        assert!(session.delete().is_err());

        assert_eq!(*calls.lock(), 1);
        assert_eq!(completion.try_outcome(), Some(SessionOutcome::Saved));
    }

    #[tokio::test]
    async fn delete_signals_deleted() {
        let deleted = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&deleted);
        let mut session = session(EditPolicy::Buffered)
            .on_delete(move |task: &TaskRecord| *sink.lock() = Some(task.id));
        let id = session.task().id;
        let completion = session.take_completion().unwrap();

        session.delete().unwrap();

        assert_eq!(*deleted.lock(), Some(id));
        assert_eq!(completion.wait().await, SessionOutcome::Deleted);
        assert_eq!(SessionOutcome::Deleted.as_dialog_result(), Some(false));
    }

    #[tokio::test]
    async fn dropping_open_session_cancels() {
        let mut session = session(EditPolicy::Buffered);
        let completion = session.take_completion().unwrap();

        session.set_note("half-typed").unwrap();
        drop(session);

        let outcome = completion.wait().await;
        assert_eq!(outcome, SessionOutcome::Cancelled);
        assert_eq!(outcome.as_dialog_result(), None);
    }

    #[test]
    fn edits_after_terminal_state_are_rejected() {
        let mut session = session(EditPolicy::Buffered);
        session.cancel().unwrap();

        assert!(session.set_title("late").is_err());
        assert!(session.add_subtask().is_err());
        assert!(session.cancel().is_err());
        assert_eq!(session.task().title, crate::domain::task::NEW_TASK_TITLE);
    }

    #[test]
    fn add_subtask_updates_working_list_and_task() {
        let mut session = session(EditPolicy::Buffered);

        session.add_subtask().unwrap();
        session.add_subtask().unwrap();
        session.update_subtask(1, "call vendor", "ask for quote").unwrap();

        assert_eq!(session.subtasks().len(), 2);
        assert_eq!(session.subtasks(), session.task().subtasks.as_slice());
        assert_eq!(session.task().subtasks[0], SubTask::default());
        assert_eq!(session.task().subtasks[1].title, "call vendor");
    }

    #[test]
    fn update_subtask_out_of_range() {
        let mut session = session(EditPolicy::Buffered);
        let err = session.update_subtask(0, "x", "y").unwrap_err();
        assert!(matches!(err, SorterError::SubtaskOutOfRange { index: 0, len: 0 }));
    }

    #[rstest]
    #[case::buffered(EditPolicy::Buffered, 0)]
    #[case::live(EditPolicy::Live, 3)]
    fn write_through_only_when_live(#[case] policy: EditPolicy, #[case] expected_calls: usize) {
        let calls = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&calls);
        let mut session = session(policy).on_edit(move |_: &TaskRecord| *counter.lock() += 1);

        session.set_status(Status::Active).unwrap();
        session.set_complexity(Complexity::Complex).unwrap();
        session.add_subtask().unwrap();

        assert_eq!(*calls.lock(), expected_calls);
    }

    #[test]
    fn apply_dispatches_actions() {
        let mut session = session(EditPolicy::Buffered);
        for action in [
            EditAction::SetTitle { value: "Replace laptop".into() },
            EditAction::SetStatus { value: Status::Active },
            EditAction::AddSubtask,
            EditAction::Save,
        ] {
            session.apply(action).unwrap();
        }

        assert_eq!(session.task().title, "Replace laptop");
        assert_eq!(session.task().subtasks.len(), 1);
        assert_eq!(session.state(), SessionState::Saved);
    }

    #[test]
    fn completion_can_only_be_taken_once() {
        let mut session = session(EditPolicy::Buffered);
        assert!(session.take_completion().is_some());
        assert!(session.take_completion().is_none());
    }

    #[test]
    fn edit_action_reads_from_json() {
        let action: EditAction =
            serde_json::from_str(r#"{"action":"set_priority","value":"High"}"#).unwrap();
        assert_eq!(action, EditAction::SetPriority { value: Priority::High });
    }
}
