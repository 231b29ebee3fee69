//! Notifier port - ユーザー向け確認通知（fire-and-forget）
//!
//! # 実装
//! - **TracingNotifier**: tracing の info ログとして出す
//! - **NoopNotifier**: 何もしない

use crate::domain::Notice;

/// Shows a confirmation; the core never consumes a return value.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}
