//! HTTP request handlers
//!
//! Track selection, power and next/previous drive the session manager. The
//! remaining buttons are logged and acknowledged.

use axum::{
    extract::{Path, State},
    Json,
};
use rcv_common::api::MessageResponse;
use rcv_common::buttons::track_log_line;
use rcv_common::Button;
use serde::Serialize;
use tracing::info;

use crate::catalog::file_name_of;
use crate::error::Result;
use crate::session::{PlayOutcome, SessionStatus};
use crate::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Response to a numbered play request
///
/// `file_name` is always present; `null` when the track does not exist.
#[derive(Debug, Serialize)]
pub struct PlayResponse {
    pub message: String,
    pub file_name: Option<String>,
}

/// Response to next/previous; `file_name` only when a track started
#[derive(Debug, Serialize)]
pub struct TransitionResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TrackInfo {
    pub track_number: u32,
    pub file_name: String,
}

#[derive(Debug, Serialize)]
pub struct TracksResponse {
    pub tracks: Vec<TrackInfo>,
}

fn playing_message(track_number: u32) -> String {
    format!("Playing media {}", track_number)
}

// ============================================================================
// Playback
// ============================================================================

/// POST /play/{track_number}
pub async fn play_track(
    State(state): State<AppState>,
    Path(track_number): Path<u32>,
) -> Result<Json<PlayResponse>> {
    info!("{}", track_log_line(track_number));

    let response = match state.session.play(track_number).await? {
        PlayOutcome::Started { file_name, .. } => PlayResponse {
            message: playing_message(track_number),
            file_name: Some(file_name),
        },
        PlayOutcome::NotFound => PlayResponse {
            message: "File not found".to_string(),
            file_name: None,
        },
    };

    Ok(Json(response))
}

/// POST /power - stops playback
pub async fn power(State(state): State<AppState>) -> Json<MessageResponse> {
    info!("{}", Button::Power.log_line());
    state.session.stop().await;
    Json(MessageResponse::new(Button::Power.ack()))
}

/// POST /next
pub async fn next_track(State(state): State<AppState>) -> Result<Json<TransitionResponse>> {
    info!("{}", Button::Next.log_line());
    let outcome = state.session.next().await?;
    Ok(Json(transition_response(Button::Next, outcome)))
}

/// POST /previous
pub async fn previous_track(State(state): State<AppState>) -> Result<Json<TransitionResponse>> {
    info!("{}", Button::Previous.log_line());
    let outcome = state.session.previous().await?;
    Ok(Json(transition_response(Button::Previous, outcome)))
}

fn transition_response(button: Button, outcome: Option<PlayOutcome>) -> TransitionResponse {
    match outcome {
        Some(PlayOutcome::Started {
            track_number,
            file_name,
        }) => TransitionResponse {
            message: playing_message(track_number),
            file_name: Some(file_name),
        },
        Some(PlayOutcome::NotFound) | None => TransitionResponse {
            message: button.ack().to_string(),
            file_name: None,
        },
    }
}

// ============================================================================
// Other buttons
// ============================================================================

/// POST for buttons with no playback effect
pub async fn button_pressed(button: Button) -> Json<MessageResponse> {
    info!("{}", button.log_line());
    Json(MessageResponse::new(button.ack()))
}

// ============================================================================
// Read-only views
// ============================================================================

/// GET /status
pub async fn get_status(State(state): State<AppState>) -> Json<SessionStatus> {
    Json(state.session.status().await)
}

/// GET /tracks - current catalog
pub async fn list_tracks(State(state): State<AppState>) -> Result<Json<TracksResponse>> {
    let catalog = state.session.catalog()?;

    let tracks = catalog
        .iter()
        .map(|(track_number, path)| TrackInfo {
            track_number,
            file_name: file_name_of(path),
        })
        .collect();

    Ok(Json(TracksResponse { tracks }))
}
