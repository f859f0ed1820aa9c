//! # rcv-play - remote receiver that drives a media player
//!
//! Maps the media directory to track numbers and runs one external player
//! (VLC by default) for the track the remote selects.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use rcv_common::Button;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod catalog;
pub mod error;
pub mod player;
pub mod session;

pub use error::{PlaybackError, Result};
pub use session::SessionManager;

/// Module name reported by the health endpoint
pub const MODULE_NAME: &str = "rcv-play";

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<SessionManager>,
}

impl AppState {
    pub fn new(session: Arc<SessionManager>) -> Self {
        Self { session }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(api::health))
        .route("/build_info", get(api::get_build_info))
        .route("/status", get(api::get_status))
        .route("/tracks", get(api::list_tracks))
        .route("/play/:track_number", post(api::play_track))
        .route(Button::Power.path(), post(api::power))
        .route(Button::Next.path(), post(api::next_track))
        .route(Button::Previous.path(), post(api::previous_track));

    // Buttons without a playback effect
    for button in Button::ALL {
        if matches!(button, Button::Power | Button::Next | Button::Previous) {
            continue;
        }
        router = router.route(button.path(), post(move || api::button_pressed(button)));
    }

    router
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
