//! Web server module
//!
//! Provides the authenticated JSON search API.

mod error;
mod handlers;
mod routes;
mod state;

pub use error::ApiError;
pub use handlers::API_KEY_HEADER;
pub use routes::create_router;
pub use state::AppState;
