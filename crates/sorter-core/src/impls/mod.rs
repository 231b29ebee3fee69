//! Impls - ports の実装（開発用・テスト用）
//!
//! # 含まれる実装
//! - **InMemoryTaskRepository**: シードデータ付きの永続化スタブ
//! - **ScriptedPresenter**: 操作列を再生する Presenter
//! - **TracingNotifier / NoopNotifier**: 通知面

pub mod inmem_repository;
pub mod notifier;
pub mod scripted;

pub use self::inmem_repository::InMemoryTaskRepository;
pub use self::notifier::{NoopNotifier, TracingNotifier};
pub use self::scripted::ScriptedPresenter;
