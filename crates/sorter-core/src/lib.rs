//! sorter-core
//!
//! Reactive core of the task sorter: an observable task store, a
//! three-category filter engine with a derived view, and a modal
//! edit-session protocol that reports exactly one outcome.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, classification, task, state, outcome, errors, events）
//! - **ports**: 抽象化レイヤー（TaskRepository, Presenter, Notifier, Clock, IdGenerator）
//! - **impls**: 実装（InMemoryTaskRepository, ScriptedPresenter, Notifier 実装）
//! - **store**: TaskStore（正本）
//! - **filter**: FilterCategory / FilterSet / 述語 / FilteredView
//! - **session**: EditSession と SessionHost
//! - **app**: builder, config, board, controller
//! - **observe**: 変更通知のオブザーバ登録

pub mod app;
pub mod domain;
pub mod filter;
pub mod impls;
pub mod observe;
pub mod ports;
pub mod session;
pub mod store;

pub use app::{BoardBuilder, BoardConfig, TaskBoard};
pub use domain::{Result, SorterError};
