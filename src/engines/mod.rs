//! Search engine module
//!
//! Defines the Engine trait and provides a registry for the scraped engines.

mod loader;
mod registry;
mod traits;

// Engine implementations
pub mod duckduckgo;
pub mod google;

pub use loader::EngineLoader;
pub use registry::EngineRegistry;
pub use traits::{Engine, EngineRequest, EngineResponse};
