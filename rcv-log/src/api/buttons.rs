//! Button press handlers

use axum::{extract::Path, Json};
use rcv_common::api::MessageResponse;
use rcv_common::buttons::track_log_line;
use rcv_common::Button;
use tracing::info;

/// POST /play/{track_number}
pub async fn play_track(Path(track_number): Path<u32>) -> Json<MessageResponse> {
    info!("{}", track_log_line(track_number));
    Json(MessageResponse::new(format!("Playing track {}", track_number)))
}

/// POST for any fixed button
pub async fn button_pressed(button: Button) -> Json<MessageResponse> {
    info!("{}", button.log_line());
    Json(MessageResponse::new(button.ack()))
}
