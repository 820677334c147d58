//! Versioned REST API.
//!
//! Handlers translate HTTP requests into service calls and service errors
//! into JSON error bodies. All routes live under [`router::API_PREFIX`].

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::{API_PREFIX, build_router};
pub use state::AppState;
