//! Session module: the edit-session protocol and the modal host.
//!
//! - **EditSession**: 1 件のタスクに束縛され、saved / deleted / cancelled を 1 回だけ報告
//! - **SessionHost**: セッションを表示層へ渡し、完了まで待って結果を返す
//! - **Completion**: 一度だけ発火する完了シグナル

mod completion;
mod edit;
mod host;

pub use completion::Completion;
pub use edit::{EditAction, EditSession, TaskCallback};
pub use host::SessionHost;

/// Anything the SessionHost can present modally.
///
/// 終端状態と完了シグナルを持つセッション型なら何でも SessionHost で再利用できます。
pub trait ModalSession: Send + 'static {
    /// Reported exactly once; `Default` is the "closed without a decision" value.
    type Outcome: Default + Send + std::fmt::Debug;

    /// Waiting side of the completion signal; `None` once taken.
    fn take_completion(&mut self) -> Option<Completion<Self::Outcome>>;

    /// Close without a decision. No-op once the session is terminal.
    fn dismiss(&mut self);
}
