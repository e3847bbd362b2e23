//! Results module
//!
//! Result types and the container that deduplicates and truncates them.

mod container;
mod types;

pub use container::ResultContainer;
pub use types::*;
