//! ScriptedPresenter - 決められた操作列を再生する Presenter
//!
//! テストと CLI の `demo` で使います。操作が失敗した時点で止まり、
//! PresentationError を返します（ホストは閉じた扱いにします）。

use async_trait::async_trait;
use tracing::debug;

use crate::domain::PresentationError;
use crate::ports::Presenter;
use crate::session::{EditAction, EditSession};

#[derive(Debug, Clone, Default)]
pub struct ScriptedPresenter {
    actions: Vec<EditAction>,
}

impl ScriptedPresenter {
    pub fn new(actions: impl IntoIterator<Item = EditAction>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
        }
    }

    pub fn actions(&self) -> &[EditAction] {
        &self.actions
    }
}

#[async_trait]
impl Presenter<EditSession> for ScriptedPresenter {
    async fn show(&self, session: &mut EditSession) -> Result<(), PresentationError> {
        for action in &self.actions {
            debug!(session = %session.id(), ?action, "scripted action");
            session
                .apply(action.clone())
                .map_err(|e| PresentationError::new(e.to_string()))?;
        }
        Ok(())
    }
}
