//! HTTP API handlers for rcv-log

pub mod buttons;
pub mod health;

pub use buttons::{button_pressed, play_track};
pub use health::{get_build_info, health};
