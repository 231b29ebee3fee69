//! State - EditSession の状態

use serde::{Deserialize, Serialize};
use std::fmt;

/// SessionState は EditSession のライフサイクル
///
/// # 状態遷移
/// - Open -> Saved
/// - Open -> Deleted
/// - Open -> Cancelled
///
/// 終端状態からの遷移はありません。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Open,
    Saved,
    Deleted,
    Cancelled,
}

impl SessionState {
    /// Is this a terminal state (no further transitions)?
    pub fn is_terminal(self) -> bool {
        !matches!(self, SessionState::Open)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SessionState::Open => "open",
            SessionState::Saved => "saved",
            SessionState::Deleted => "deleted",
            SessionState::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which way edits made inside a session reach the shared record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditPolicy {
    /// Edits stay in the session's working copy until `save()`; cancel discards them.
    #[default]
    Buffered,
    /// Every edit is written through to the store as it happens; cancel keeps
    /// edits that were already applied.
    Live,
}
