//! BoardBuilder - TaskBoard の構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）
//! - 開発体験の改善（明確なエラーメッセージ）

use std::sync::Arc;
use tracing::info;

use super::board::{BoardParts, TaskBoard};
use super::config::BoardConfig;
use super::controller::TaskController;
use crate::domain::{Category, EditPolicy, SorterError, ViewMode};
use crate::filter::FilterSet;
use crate::impls::{InMemoryTaskRepository, TracingNotifier};
use crate::ports::{Clock, IdGenerator, Notifier, SystemClock, TaskRepository, UlidGenerator};
use crate::store::TaskStore;

/// BoardBuilder は TaskBoard を構築
///
/// # 使用例
/// ```ignore
/// let board = BoardBuilder::from_config(config)
///     .notifier(Arc::new(NoopNotifier))
///     .build()?;
/// ```
///
/// # Fail-fast 設計
/// - config の `preselected` に含まれるラベルを build() 時に検証
/// - どのトグルにも無いラベルがあれば BuildError を返す
pub struct BoardBuilder {
    config: BoardConfig,
    repository: Option<Arc<dyn TaskRepository>>,
    clock: Option<Arc<dyn Clock>>,
    ids: Option<Arc<dyn IdGenerator>>,
    notifier: Option<Arc<dyn Notifier>>,
}

/// BuildError はボード構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Unknown filter labels: {0:?}. These labels were preselected but no toggle carries them.")]
    UnknownFilterLabels(Vec<String>),

    #[error("Preselection failed: {0}")]
    Preselect(#[from] SorterError),
}

impl BoardBuilder {
    pub fn new() -> Self {
        Self::from_config(BoardConfig::default())
    }

    pub fn from_config(config: BoardConfig) -> Self {
        Self {
            config,
            repository: None,
            clock: None,
            ids: None,
            notifier: None,
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn edit_policy(mut self, policy: EditPolicy) -> Self {
        self.config.edit_policy = policy;
        self
    }

    pub fn view_mode(mut self, mode: ViewMode) -> Self {
        self.config.view_mode = mode;
        self
    }

    /// Ignored when a repository is supplied explicitly.
    pub fn seed_demo_tasks(mut self, seed: bool) -> Self {
        self.config.seed_demo_tasks = seed;
        self
    }

    /// Add labels to the startup selection of `category`.
    pub fn preselect(mut self, category: Category, labels: &[&str]) -> Self {
        let target = match category {
            Category::Status => &mut self.config.preselected.status,
            Category::Priority => &mut self.config.preselected.priority,
            Category::Complexity => &mut self.config.preselected.complexity,
        };
        target.extend(labels.iter().map(|l| l.to_string()));
        self
    }

    pub fn repository(mut self, repository: Arc<dyn TaskRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// BoardBuilder を構築して TaskBoard を生成
    ///
    /// # 検証
    /// - preselected の全ラベルが対応カテゴリのトグルに存在するかチェック
    /// - 不足があれば BuildError::UnknownFilterLabels を返す
    pub fn build(self) -> Result<TaskBoard, BuildError> {
        let filters = FilterSet::standard();
        let selection = self.config.preselected.to_selection();

        let unknown_labels: Vec<String> = filters
            .unknown_labels(&selection)
            .into_iter()
            .map(|(category, label)| format!("{category}:{label}"))
            .collect();
        if !unknown_labels.is_empty() {
            return Err(BuildError::UnknownFilterLabels(unknown_labels));
        }
        filters.preselect(&selection)?;

        let clock: Arc<dyn Clock> = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let ids: Arc<dyn IdGenerator> = self
            .ids
            .unwrap_or_else(|| Arc::new(UlidGenerator::new(clock.clone())));
        let repository: Arc<dyn TaskRepository> = match self.repository {
            Some(repository) => repository,
            None if self.config.seed_demo_tasks => Arc::new(InMemoryTaskRepository::with_seed_data(
                ids.as_ref(),
                clock.as_ref(),
            )),
            None => Arc::new(InMemoryTaskRepository::new()),
        };
        let notifier: Arc<dyn Notifier> = self.notifier.unwrap_or_else(|| Arc::new(TracingNotifier));

        let store = TaskStore::from_records(repository.get_all());
        let controller = TaskController::new(repository, store.clone(), clock.clone());

        info!(
            tasks = store.len(),
            policy = ?self.config.edit_policy,
            view_mode = ?self.config.view_mode,
            "task board built"
        );

        Ok(TaskBoard::new(BoardParts {
            store,
            filters,
            controller,
            ids,
            clock,
            notifier,
            policy: self.config.edit_policy,
            view_mode: self.config.view_mode,
        }))
    }
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::new()
    }
}
