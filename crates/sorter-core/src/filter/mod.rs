//! Filter module: toggles per category, the match predicate, and the live view.

mod category;
pub mod predicate;
mod set;
mod view;

pub use category::{FilterCategory, FilterToggle};
pub use predicate::FilterSnapshot;
pub use set::FilterSet;
pub use view::{FilteredView, ViewSnapshot};
