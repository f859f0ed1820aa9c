//! HTTP API pieces shared by both receiver variants

pub mod server;
pub mod types;

pub use server::bind_listener;
pub use types::{BuildInfo, ErrorResponse, HealthResponse, MessageResponse};
