//! rcv-log library - logging-only remote receiver
//!
//! Every button press is written to the log and acknowledged. Nothing else
//! happens; this variant is the template for wiring up a new remote.

use axum::{
    routing::{get, post},
    Router,
};
use rcv_common::Button;
use tower_http::trace::TraceLayer;

pub mod api;

/// Module name reported by the health endpoint
pub const MODULE_NAME: &str = "rcv-log";

/// Build application router
pub fn build_router() -> Router {
    let mut router = Router::new()
        .route("/health", get(api::health))
        .route("/build_info", get(api::get_build_info))
        .route("/play/:track_number", post(api::play_track));

    for button in Button::ALL {
        router = router.route(button.path(), post(move || api::button_pressed(button)));
    }

    router.layer(TraceLayer::new_for_http())
}
