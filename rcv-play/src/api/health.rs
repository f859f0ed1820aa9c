//! Health check and build information endpoints

use axum::Json;
use rcv_common::api::{BuildInfo, HealthResponse};

use crate::MODULE_NAME;

/// GET /health
///
/// Health check endpoint for monitoring.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok(MODULE_NAME, env!("CARGO_PKG_VERSION")))
}

/// GET /build_info
///
/// Returns build identification captured at compile time
pub async fn get_build_info() -> Json<BuildInfo> {
    Json(BuildInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: env!("GIT_HASH").to_string(),
        build_timestamp: env!("BUILD_TIMESTAMP").to_string(),
        build_profile: env!("BUILD_PROFILE").to_string(),
    })
}
