//! # Remote Receiver Common Library
//!
//! Shared code for both receiver variants:
//! - Bootstrap configuration loading
//! - Button command table (paths, log lines, acknowledgements)
//! - JSON response types and the health endpoint
//! - Shutdown signal handling

pub mod api;
pub mod buttons;
pub mod config;
pub mod error;
pub mod shutdown;

pub use buttons::Button;
pub use error::{Error, Result};
