//! Outcome - EditSession の結果

use serde::{Deserialize, Serialize};
use std::fmt;

use super::state::SessionState;

/// The single decision an EditSession reports back to its caller.
///
/// `Cancelled` は「何も決めずに閉じた」を表し、Default でもあります。
/// Completion の送信側が消えた場合もこの値になります。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionOutcome {
    Saved,
    Deleted,
    #[default]
    Cancelled,
}

impl SessionOutcome {
    /// Dialog-style result: saved = `Some(true)`, deleted = `Some(false)`,
    /// cancelled = `None`.
    pub fn as_dialog_result(self) -> Option<bool> {
        match self {
            SessionOutcome::Saved => Some(true),
            SessionOutcome::Deleted => Some(false),
            SessionOutcome::Cancelled => None,
        }
    }

    /// Terminal session state that produced this outcome.
    pub fn state(self) -> SessionState {
        match self {
            SessionOutcome::Saved => SessionState::Saved,
            SessionOutcome::Deleted => SessionState::Deleted,
            SessionOutcome::Cancelled => SessionState::Cancelled,
        }
    }
}

impl fmt::Display for SessionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.state().fmt(f)
    }
}
