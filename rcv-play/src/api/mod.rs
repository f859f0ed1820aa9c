//! HTTP API handlers for rcv-play

pub mod handlers;
pub mod health;

pub use handlers::{
    button_pressed, get_status, list_tracks, next_track, play_track, power, previous_track,
};
pub use health::{get_build_info, health};
