//! HTTP API: company lookup, category listing and health check.

mod routes;
pub mod types;

pub use routes::{router, serve, AppState};
