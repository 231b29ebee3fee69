//! App - アプリケーション層
//!
//! このモジュールは、store / filter / session と ports を組み合わせて
//! 表示層から呼び出される操作を提供します。
//!
//! # 主要コンポーネント
//! - **BoardBuilder**: ボードの構築とワイヤリング（起動時検証つき）
//! - **BoardConfig**: JSON 設定
//! - **TaskBoard**: 表示層向けの操作（toggle, open, create, view mode）
//! - **TaskController**: リポジトリと Store の調停

pub mod board;
pub mod builder;
pub mod config;
pub mod controller;

// 主要な型を再エクスポート
pub use self::board::{BoardParts, TaskBoard};
pub use self::builder::{BoardBuilder, BuildError};
pub use self::config::{BoardConfig, Preselected};
pub use self::controller::TaskController;
