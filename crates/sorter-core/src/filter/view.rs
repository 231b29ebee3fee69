//! FilteredView - Store と FilterSet から導出されるライブビュー
//!
//! # 再計算のトリガー
//! - toggle の selected が変わった
//! - toggle がカテゴリに追加 / 削除された
//! - Store の内容が変わった
//!
//! 毎回 Store 全体に述語を適用し直します（インクリメンタルではない）。
//! 結果は `tokio::sync::watch` で配信するので、表示層は `subscribe()` で
//! 最新のスナップショットを待てます。
//!
//! # 所有関係
//! Store / FilterSet に登録するコールバックは `Weak<ViewInner>` しか持たないため、
//! ビューを drop すると購読は解除され、循環参照も起きません。

use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use tokio::sync::watch;
use tracing::debug;

use super::set::FilterSet;
use crate::domain::{TaskId, TaskRecord};
use crate::observe::ObserverId;
use crate::store::TaskStore;

/// One evaluation of the view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewSnapshot {
    /// Incremented on every recompute.
    pub revision: u64,
    /// Matching tasks in store order.
    pub tasks: Vec<TaskRecord>,
}

impl ViewSnapshot {
    pub fn ids(&self) -> Vec<TaskId> {
        self.tasks.iter().map(|t| t.id).collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

struct ViewInner {
    store: TaskStore,
    filters: FilterSet,
    tx: watch::Sender<ViewSnapshot>,
    subscriptions: Mutex<Option<(ObserverId, ObserverId)>>,
}

impl ViewInner {
    fn recompute(&self) {
        let snapshot = self.filters.snapshot();
        let tasks: Vec<TaskRecord> = self
            .store
            .get_all()
            .into_iter()
            .filter(|task| snapshot.matches(task))
            .collect();
        let visible = tasks.len();
        let mut revision = 0;
        self.tx.send_modify(|view| {
            view.revision += 1;
            view.tasks = tasks;
            revision = view.revision;
        });
        debug!(revision, visible, "filtered view recomputed");
    }
}

impl Drop for ViewInner {
    fn drop(&mut self) {
        if let Some((store_sub, filter_sub)) = self.subscriptions.get_mut().take() {
            self.store.unsubscribe(store_sub);
            self.filters.unsubscribe(filter_sub);
        }
    }
}

/// Order-preserving projection of the store through the current filters.
#[derive(Clone)]
pub struct FilteredView {
    inner: Arc<ViewInner>,
}

impl FilteredView {
    /// Wire the view to both sources and compute the first snapshot.
    pub fn new(store: TaskStore, filters: FilterSet) -> Self {
        let (tx, _rx) = watch::channel(ViewSnapshot::default());
        let inner = Arc::new(ViewInner {
            store: store.clone(),
            filters: filters.clone(),
            tx,
            subscriptions: Mutex::new(None),
        });

        let weak: Weak<ViewInner> = Arc::downgrade(&inner);
        let store_sub = store.subscribe(move |_| {
            if let Some(view) = weak.upgrade() {
                view.recompute();
            }
        });
        let weak: Weak<ViewInner> = Arc::downgrade(&inner);
        let filter_sub = filters.subscribe(move |_| {
            if let Some(view) = weak.upgrade() {
                view.recompute();
            }
        });
        *inner.subscriptions.lock() = Some((store_sub, filter_sub));

        inner.recompute();
        Self { inner }
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        self.inner.tx.borrow().clone()
    }

    pub fn tasks(&self) -> Vec<TaskRecord> {
        self.inner.tx.borrow().tasks.clone()
    }

    pub fn ids(&self) -> Vec<TaskId> {
        self.inner.tx.borrow().ids()
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.inner.tx.borrow().tasks.iter().any(|t| t.id == id)
    }

    pub fn revision(&self) -> u64 {
        self.inner.tx.borrow().revision
    }

    /// Change stream for the presentation layer.
    pub fn subscribe(&self) -> watch::Receiver<ViewSnapshot> {
        self.inner.tx.subscribe()
    }
}
