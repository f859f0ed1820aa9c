//! Button command table
//!
//! The remote sends one POST per physical button. Each fixed button maps to a
//! route, a log line and the acknowledgement returned to the remote. Track
//! selection (`/play/{track_number}`) is parameterised and handled by each
//! variant directly.

use std::fmt;

/// Fixed (non-parameterised) remote buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Play,
    Power,
    Menu,
    Test,
    VolumeUp,
    VolumeDown,
    Back,
    Previous,
    Next,
    C,
}

impl Button {
    /// Every button, in the order the remote firmware numbers them
    pub const ALL: [Button; 10] = [
        Button::Play,
        Button::Power,
        Button::Menu,
        Button::Test,
        Button::VolumeUp,
        Button::VolumeDown,
        Button::Back,
        Button::Previous,
        Button::Next,
        Button::C,
    ];

    /// Route the remote posts to for this button
    pub fn path(self) -> &'static str {
        match self {
            Button::Play => "/play",
            Button::Power => "/power",
            Button::Menu => "/menu",
            Button::Test => "/test",
            Button::VolumeUp => "/volume/up",
            Button::VolumeDown => "/volume/down",
            Button::Back => "/back",
            Button::Previous => "/previous",
            Button::Next => "/next",
            Button::C => "/c",
        }
    }

    /// Line written to the log when the button is pressed
    pub fn log_line(self) -> &'static str {
        match self {
            Button::Play => "Play button pressed",
            Button::Power => "Power button pressed",
            Button::Menu => "Menu button pressed",
            Button::Test => "Test button pressed",
            Button::VolumeUp => "Volume up button pressed",
            Button::VolumeDown => "Volume down button pressed",
            Button::Back => "Back button pressed",
            Button::Previous => "Previous button pressed",
            Button::Next => "Next button pressed",
            Button::C => "C button pressed",
        }
    }

    /// `message` field of the acknowledgement
    ///
    /// Volume buttons acknowledge the effect rather than the press; the remote
    /// shows this text on its display.
    pub fn ack(self) -> &'static str {
        match self {
            Button::VolumeUp => "Volume increased",
            Button::VolumeDown => "Volume decreased",
            other => other.log_line(),
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Log line for a numbered play request
pub fn track_log_line(track_number: u32) -> String {
    format!("Play button pressed for track {}", track_number)
}
