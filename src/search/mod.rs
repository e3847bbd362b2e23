//! Search module
//!
//! Validated search requests and the executor that runs them against the
//! configured engines.

mod error;
mod executor;
mod models;

pub use error::SearchError;
pub use executor::Search;
pub use models::*;
