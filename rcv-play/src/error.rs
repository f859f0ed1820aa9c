//! Error types for rcv-play
//!
//! A missing track is not an error: it is reported through
//! [`PlayOutcome::NotFound`](crate::session::PlayOutcome). Only hard failures
//! live here, and the HTTP layer turns them into a 500 response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rcv_common::api::ErrorResponse;
use std::path::PathBuf;
use thiserror::Error;
use tracing::error;

/// Playback failures surfaced to the caller of `play`
#[derive(Error, Debug)]
pub enum PlaybackError {
    /// Media directory missing or unreadable
    #[error("Cannot read media directory {}: {source}", .path.display())]
    DirectoryAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// External player could not be started
    #[error("Failed to launch player '{program}': {source}")]
    ProcessLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience Result type using PlaybackError
pub type Result<T> = std::result::Result<T, PlaybackError>;

impl IntoResponse for PlaybackError {
    fn into_response(self) -> Response {
        error!("{}", self);

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
