//! Ports - 抽象化レイヤー
//!
//! Hexagonal Architecture の「ポート」です。コアが外部（永続化、表示層、通知面）に
//! 求めるインターフェースを trait として定義し、実装の詳細を隠蔽します。

pub mod clock;
pub mod id_generator;
pub mod notifier;
pub mod presenter;
pub mod task_repository;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::notifier::Notifier;
pub use self::presenter::Presenter;
pub use self::task_repository::TaskRepository;
