//! HTTP host: the two-panel form plus a JSON API over the same adapter

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod types;

pub use handlers::AppState;
pub use routes::create_router;
pub use types::*;
