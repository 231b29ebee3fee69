//! TaskBoard - 表示層から呼び出される操作の集合
//!
//! # 責務
//! - TaskStore / FilterSet / FilteredView を束ねて公開する
//! - EditSession を開き、save / delete / 編集コールバックで Store を調停する
//! - SessionHost で提示し、結果を `BoardEvent::SessionFinished` として流す
//!
//! # 順序保証
//! save / delete コールバックは完了シグナルより先に走るので、
//! `edit_task` が返った時点で Store とビューは調停済みです。

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tracing::{info, warn};

use super::controller::TaskController;
use crate::domain::{
    BoardEvent, Category, EditPolicy, Notice, Result, SessionOutcome, SorterError, TaskId,
    TaskRecord, ViewMode,
};
use crate::filter::{FilterSet, FilteredView, ViewSnapshot};
use crate::ports::{Clock, IdGenerator, Notifier, Presenter};
use crate::session::{EditSession, SessionHost};
use crate::store::TaskStore;

const EVENT_CAPACITY: usize = 64;

#[derive(Clone)]
pub struct TaskBoard {
    store: TaskStore,
    filters: FilterSet,
    view: FilteredView,
    controller: TaskController,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
    policy: EditPolicy,
    view_mode: Arc<Mutex<ViewMode>>,
    events: broadcast::Sender<BoardEvent>,
}

/// Everything `TaskBoard::new` wires together.
pub struct BoardParts {
    pub store: TaskStore,
    pub filters: FilterSet,
    pub controller: TaskController,
    pub ids: Arc<dyn IdGenerator>,
    pub clock: Arc<dyn Clock>,
    pub notifier: Arc<dyn Notifier>,
    pub policy: EditPolicy,
    pub view_mode: ViewMode,
}

impl TaskBoard {
    pub fn new(parts: BoardParts) -> Self {
        let view = FilteredView::new(parts.store.clone(), parts.filters.clone());
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            store: parts.store,
            filters: parts.filters,
            view,
            controller: parts.controller,
            ids: parts.ids,
            clock: parts.clock,
            notifier: parts.notifier,
            policy: parts.policy,
            view_mode: Arc::new(Mutex::new(parts.view_mode)),
            events,
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn view(&self) -> &FilteredView {
        &self.view
    }

    pub fn policy(&self) -> EditPolicy {
        self.policy
    }

    /// Every task, in insertion order.
    pub fn tasks(&self) -> Vec<TaskRecord> {
        self.store.get_all()
    }

    /// Tasks passing the current filters.
    pub fn visible(&self) -> Vec<TaskRecord> {
        self.view.tasks()
    }

    pub fn subscribe_view(&self) -> watch::Receiver<ViewSnapshot> {
        self.view.subscribe()
    }

    pub fn events(&self) -> broadcast::Receiver<BoardEvent> {
        self.events.subscribe()
    }

    /// Flip one filter toggle; the view recomputes before this returns.
    pub fn toggle(&self, category: Category, label: &str) -> Result<bool> {
        self.filters.toggle(category, label)
    }

    pub fn view_mode(&self) -> ViewMode {
        *self.view_mode.lock()
    }

    pub fn toggle_view_mode(&self) -> ViewMode {
        let mode = {
            let mut mode = self.view_mode.lock();
            *mode = mode.toggled();
            *mode
        };
        self.publish(BoardEvent::ViewModeChanged(mode));
        mode
    }

    /// A fresh record with the "new task" defaults; not yet in the store.
    pub fn new_record(&self) -> TaskRecord {
        TaskRecord::new(self.ids.generate_task_id(), self.clock.now())
    }

    /// Open a session on a task the store tracks.
    pub fn open_task(&self, id: TaskId) -> Result<EditSession> {
        let task = self.store.get(id).ok_or(SorterError::UnknownTask(id))?;
        Ok(self.open(task))
    }

    /// Add a default record to the repository and the store, then open a session on it.
    pub fn create_task(&self) -> EditSession {
        let task = self.new_record();
        self.controller.add_task(task.clone());
        self.open(task)
    }

    /// Open a session on `task` with the board's reconciliation callbacks.
    ///
    /// `task` does not need to be in the store; saving it inserts it once.
    pub fn open(&self, task: TaskRecord) -> EditSession {
        let session_id = self.ids.generate_session_id();

        let saver = self.controller.clone();
        let notifier = self.notifier.clone();
        let on_save = move |task: &TaskRecord| {
            saver.save_task(task);
            notifier.notify(Notice::TaskSaved {
                title: task.title.clone(),
            });
        };

        let deleter = self.controller.clone();
        let notifier = self.notifier.clone();
        let on_delete = move |task: &TaskRecord| match deleter.delete_task(task.id) {
            Ok(_) => notifier.notify(Notice::TaskDeleted {
                title: task.title.clone(),
            }),
            Err(err) => warn!(%err, "delete did not reconcile the store"),
        };

        let writer = self.controller.clone();
        let on_edit = move |task: &TaskRecord| {
            writer.write_through(task);
        };

        EditSession::open(session_id, task, self.policy)
            .on_save(on_save)
            .on_delete(on_delete)
            .on_edit(on_edit)
    }

    /// Present an already opened session and report its outcome.
    pub async fn present<P>(&self, session: EditSession, host: &SessionHost<P>) -> SessionOutcome
    where
        P: Presenter<EditSession>,
    {
        let task = session.task().id;
        let outcome = host.present(session).await;
        info!(%task, %outcome, visible = self.view.snapshot().len(), "session closed");
        self.publish(BoardEvent::SessionFinished { task, outcome });
        outcome
    }

    /// Open the task with `id`, present it, and wait for the outcome.
    pub async fn edit_task<P>(&self, id: TaskId, host: &SessionHost<P>) -> Result<SessionOutcome>
    where
        P: Presenter<EditSession>,
    {
        let session = self.open_task(id)?;
        Ok(self.present(session, host).await)
    }

    /// Create a task, present it, and wait for the outcome.
    pub async fn create_and_edit<P>(&self, host: &SessionHost<P>) -> (TaskId, SessionOutcome)
    where
        P: Presenter<EditSession>,
    {
        let session = self.create_task();
        let id = session.task().id;
        (id, self.present(session, host).await)
    }

    fn publish(&self, event: BoardEvent) {
        // no receivers is fine
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::BoardBuilder;
    use crate::domain::{Priority, Status};
    use crate::impls::{InMemoryTaskRepository, NoopNotifier, ScriptedPresenter};
    use crate::ports::TaskRepository;
    use crate::session::EditAction;
    use parking_lot::Mutex as PlMutex;
    use rstest::rstest;

    #[derive(Default)]
    struct Recorder(PlMutex<Vec<Notice>>);

    impl Notifier for Recorder {
        fn notify(&self, notice: Notice) {
            self.0.lock().push(notice);
        }
    }

    fn board(policy: EditPolicy) -> TaskBoard {
        BoardBuilder::new()
            .seed_demo_tasks(false)
            .edit_policy(policy)
            .notifier(Arc::new(NoopNotifier))
            .build()
            .unwrap()
    }

    fn host(actions: Vec<EditAction>) -> SessionHost<ScriptedPresenter> {
        SessionHost::new(ScriptedPresenter::new(actions))
    }

    fn board_over(repo: Arc<InMemoryTaskRepository>, policy: EditPolicy) -> TaskBoard {
        BoardBuilder::new()
            .repository(repo)
            .edit_policy(policy)
            .notifier(Arc::new(NoopNotifier))
            .build()
            .unwrap()
    }

    fn stored_in(repo: &InMemoryTaskRepository, id: TaskId) -> Option<TaskRecord> {
        repo.get_all().into_iter().find(|t| t.id == id)
    }

    #[test]
    fn create_task_adds_default_record() {
        let board = board(EditPolicy::Buffered);
        let session = board.create_task();

        let stored = board.store().get(session.task().id).unwrap();
        assert_eq!(stored.status, Status::Pending);
        assert_eq!(stored.priority, Priority::Medium);
        assert_eq!(board.visible().len(), 1);
    }

    #[tokio::test]
    async fn created_task_reaches_repository_even_when_cancelled() {
        let repo = Arc::new(InMemoryTaskRepository::new());
        let board = board_over(repo.clone(), EditPolicy::Buffered);

        let (id, outcome) = board.create_and_edit(&host(vec![EditAction::Cancel])).await;

        assert_eq!(outcome, SessionOutcome::Cancelled);
        assert!(repo.contains(id));
        assert_eq!(stored_in(&repo, id), board.store().get(id));
    }

    #[tokio::test]
    async fn live_edits_keep_repository_and_store_in_step_after_cancel() {
        let repo = Arc::new(InMemoryTaskRepository::new());
        let board = board_over(repo.clone(), EditPolicy::Live);
        let (id, _) = board.create_and_edit(&host(vec![EditAction::Save])).await;

        let outcome = board
            .edit_task(
                id,
                &host(vec![
                    EditAction::SetPriority { value: Priority::Low },
                    EditAction::Cancel,
                ]),
            )
            .await
            .unwrap();

        assert_eq!(outcome, SessionOutcome::Cancelled);
        let in_store = board.store().get(id).unwrap();
        let in_repo = stored_in(&repo, id).unwrap();
        assert_eq!(in_store.priority, Priority::Low);
        assert_eq!(in_repo, in_store);
        assert_eq!(repo.get_all(), board.tasks());
    }

    #[test]
    fn open_task_rejects_unknown_ids() {
        let board = board(EditPolicy::Buffered);
        let stray = board.new_record();

        let err = board.open_task(stray.id).unwrap_err();
        assert!(matches!(err, SorterError::UnknownTask(id) if id == stray.id));
    }

    #[tokio::test]
    async fn saving_a_new_record_inserts_it_once() {
        let board = board(EditPolicy::Buffered);
        let record = board.new_record();
        let id = record.id;

        let outcome = board
            .present(board.open(record), &host(vec![EditAction::Save]))
            .await;

        assert_eq!(outcome, SessionOutcome::Saved);
        assert_eq!(board.tasks().iter().filter(|t| t.id == id).count(), 1);
    }

    #[rstest]
    #[case::buffered(EditPolicy::Buffered, Priority::Medium)]
    #[case::live(EditPolicy::Live, Priority::High)]
    #[tokio::test]
    async fn cancel_keeps_or_discards_edits_per_policy(
        #[case] policy: EditPolicy,
        #[case] expected: Priority,
    ) {
        let board = board(policy);
        let (id, outcome) = board
            .create_and_edit(&host(vec![
                EditAction::SetPriority { value: Priority::High },
                EditAction::Cancel,
            ]))
            .await;

        assert_eq!(outcome, SessionOutcome::Cancelled);
        assert_eq!(board.store().get(id).unwrap().priority, expected);
    }

    #[tokio::test]
    async fn delete_removes_task_and_notifies() {
        let recorder = Arc::new(Recorder::default());
        let board = BoardBuilder::new()
            .seed_demo_tasks(false)
            .notifier(recorder.clone())
            .build()
            .unwrap();
        let (id, _) = board.create_and_edit(&host(vec![EditAction::Save])).await;

        let outcome = board
            .edit_task(id, &host(vec![EditAction::Delete]))
            .await
            .unwrap();

        assert_eq!(outcome, SessionOutcome::Deleted);
        assert!(board.tasks().is_empty());
        let notices = recorder.0.lock().clone();
        assert!(matches!(notices.as_slice(), [Notice::TaskSaved { .. }, Notice::TaskDeleted { .. }]));
    }

    #[tokio::test]
    async fn events_report_view_mode_and_session_outcome() {
        let board = board(EditPolicy::Buffered);
        let mut events = board.events();

        assert_eq!(board.toggle_view_mode(), ViewMode::List);
        let (id, _) = board.create_and_edit(&host(vec![])).await;

        assert_eq!(events.recv().await.unwrap(), BoardEvent::ViewModeChanged(ViewMode::List));
        assert_eq!(
            events.recv().await.unwrap(),
            BoardEvent::SessionFinished {
                task: id,
                outcome: SessionOutcome::Cancelled
            }
        );
    }

    #[test]
    fn toggle_recomputes_visible_tasks() {
        let board = board(EditPolicy::Buffered);
        board.create_task();

        assert!(board.toggle(Category::Priority, "High").unwrap());
        assert!(board.visible().is_empty());

        assert!(!board.toggle(Category::Priority, "High").unwrap());
        assert_eq!(board.visible().len(), 1);
    }
}
