//! Domain model (IDs, classification, records, session states, events).

pub mod classification;
pub mod errors;
pub mod events;
pub mod ids;
pub mod outcome;
pub mod state;
pub mod task;

pub use self::classification::{Category, Classification, Complexity, Priority, Status};
pub use self::errors::{PresentationError, Result, SorterError};
pub use self::events::{BoardEvent, FilterChange, Notice, StoreChange, ViewMode};
pub use self::ids::{SessionId, TaskId};
pub use self::outcome::SessionOutcome;
pub use self::state::{EditPolicy, SessionState};
pub use self::task::{SubTask, TaskRecord};
