//! SessionHost - モーダル境界
//!
//! # 責務
//! - セッションを Presenter に渡して表示する
//! - セッションが終端状態になるまで呼び出し元を（協調的に）待たせる
//! - 結果を返す。Store の調停はしない（それは save / delete コールバックを渡した呼び出し元の仕事）
//!
//! # 順序保証
//! `present` が返る時点で完了シグナルは必ず受信済みです。
//! 待機は oneshot の await なので、他の tokio タスクは止まりません。

use tracing::{debug, warn};

use super::ModalSession;
use crate::ports::Presenter;

pub struct SessionHost<P> {
    presenter: P,
}

impl<P> SessionHost<P> {
    pub fn new(presenter: P) -> Self {
        Self { presenter }
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Present `session` and wait for its single outcome.
    ///
    /// If the presenter fails, or returns while the session is still open,
    /// the session is dismissed and the outcome is `S::Outcome::default()`.
    pub async fn present<S>(&self, mut session: S) -> S::Outcome
    where
        S: ModalSession,
        P: Presenter<S>,
    {
        let Some(completion) = session.take_completion() else {
            warn!("session was already presented; dismissing");
            session.dismiss();
            return S::Outcome::default();
        };

        if let Err(err) = self.presenter.show(&mut session).await {
            warn!(%err, "presentation failed; treating as dismissal");
        }

        session.dismiss();
        drop(session);

        let outcome = completion.wait().await;
        debug!(?outcome, "session host relayed outcome");
        outcome
    }
}
