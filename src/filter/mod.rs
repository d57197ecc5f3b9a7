//! Filter Predicate Engine
//!
//! `FilterSpec` holds the user-selected criteria, `matches` decides whether a
//! single project passes them.

pub mod predicate;
pub mod search;
pub mod spec;

pub use predicate::{matches, PreparedFilter};
pub use search::SearchPattern;
pub use spec::{DatePreset, FilterSpec};
