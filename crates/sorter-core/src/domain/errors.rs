//! Errors - エラー型と分類
//!
//! すべての失敗は同期的に呼び出し元へ返すか、その場で安全なデフォルトに吸収します。
//! 自動リトライや遅延エラーチャネルはありません。

use thiserror::Error;

use super::classification::Category;
use super::ids::{SessionId, TaskId};
use super::state::SessionState;

/// SorterError はコア全体のドメインエラー
#[derive(Debug, Error)]
pub enum SorterError {
    /// save / delete / edit on a session that already reached a terminal state.
    #[error("{session} is {state} and accepts no further actions")]
    InvalidTransition {
        session: SessionId,
        state: SessionState,
    },

    /// The store does not track this identity; nothing was touched.
    #[error("{0} is not tracked by the task store")]
    UnknownTask(TaskId),

    #[error("unknown {category} label '{label}'")]
    UnknownLabel { category: Category, label: String },

    #[error("{category} filter already has a toggle labelled '{label}'")]
    DuplicateLabel { category: Category, label: String },

    #[error("subtask index {index} is out of range (len={len})")]
    SubtaskOutOfRange { index: usize, len: usize },

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SorterError>;

/// PresentationError はホストが表示に失敗したことを表す
///
/// SessionHost が捕捉して「何も決めずに閉じた」扱い（Cancelled）に落とします。
#[derive(Debug, Error)]
#[error("presentation failed: {0}")]
pub struct PresentationError(pub String);

impl PresentationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
