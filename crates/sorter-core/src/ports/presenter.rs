//! Presenter port - 表示層（詳細フォーム）の抽象化
//!
//! Presenter はセッションをユーザーに見せ、ユーザー操作（編集 / save / delete）を
//! セッションに対して呼び出し、ユーザーが閉じたら戻ります。
//!
//! # 実装
//! - **ScriptedPresenter**（impls）: 決められた操作列を再生する（テスト・デモ用）
//! - CLI: dialoguer による対話フォーム

use async_trait::async_trait;

use crate::domain::PresentationError;

/// Shows one session to the user until they close it.
///
/// Returning `Err` means the session could not be shown (for example the
/// surface is already closing); the host treats that as a plain dismissal.
#[async_trait]
pub trait Presenter<S: Send + 'static>: Send + Sync {
    async fn show(&self, session: &mut S) -> Result<(), PresentationError>;
}
