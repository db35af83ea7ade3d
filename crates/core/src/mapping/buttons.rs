//! Round control buttons around the pad grid.
//!
//! In programmer mode these report as control changes (not notes), numbered in
//! the unused slots of the native row blocks:
//!
//! ```text
//! Top row:      91 Up, 92 Down, 93 Left, 94 Right,
//!               95 Session, 96 Note, 97 Custom, 98 Capture MIDI
//! Right column: 89 Volume, 79 Pan, 69 Send A, 59 Send B,
//!               49 Stop Clip, 39 Mute, 29 Solo, 19 Record Arm
//! Logo:         99
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlButton {
    Up,
    Down,
    Left,
    Right,
    Session,
    Note,
    Custom,
    CaptureMidi,
    Volume,
    Pan,
    SendA,
    SendB,
    StopClip,
    Mute,
    Solo,
    RecordArm,
    Logo,
}

impl ControlButton {
    pub const UP: u8 = 91;
    pub const DOWN: u8 = 92;
    pub const LEFT: u8 = 93;
    pub const RIGHT: u8 = 94;
    pub const SESSION: u8 = 95;
    pub const NOTE: u8 = 96;
    pub const CUSTOM: u8 = 97;
    pub const CAPTURE_MIDI: u8 = 98;

    pub const VOLUME: u8 = 89;
    pub const PAN: u8 = 79;
    pub const SEND_A: u8 = 69;
    pub const SEND_B: u8 = 59;
    pub const STOP_CLIP: u8 = 49;
    pub const MUTE: u8 = 39;
    pub const SOLO: u8 = 29;
    pub const RECORD_ARM: u8 = 19;

    pub const LOGO: u8 = 99;

    /// Top row, left to right.
    pub const TOP_ROW: [ControlButton; 8] = [
        ControlButton::Up,
        ControlButton::Down,
        ControlButton::Left,
        ControlButton::Right,
        ControlButton::Session,
        ControlButton::Note,
        ControlButton::Custom,
        ControlButton::CaptureMidi,
    ];

    /// Right column, top to bottom.
    pub const RIGHT_COLUMN: [ControlButton; 8] = [
        ControlButton::Volume,
        ControlButton::Pan,
        ControlButton::SendA,
        ControlButton::SendB,
        ControlButton::StopClip,
        ControlButton::Mute,
        ControlButton::Solo,
        ControlButton::RecordArm,
    ];

    /// Controller number reported for this button.
    pub const fn cc(self) -> u8 {
        match self {
            ControlButton::Up => Self::UP,
            ControlButton::Down => Self::DOWN,
            ControlButton::Left => Self::LEFT,
            ControlButton::Right => Self::RIGHT,
            ControlButton::Session => Self::SESSION,
            ControlButton::Note => Self::NOTE,
            ControlButton::Custom => Self::CUSTOM,
            ControlButton::CaptureMidi => Self::CAPTURE_MIDI,
            ControlButton::Volume => Self::VOLUME,
            ControlButton::Pan => Self::PAN,
            ControlButton::SendA => Self::SEND_A,
            ControlButton::SendB => Self::SEND_B,
            ControlButton::StopClip => Self::STOP_CLIP,
            ControlButton::Mute => Self::MUTE,
            ControlButton::Solo => Self::SOLO,
            ControlButton::RecordArm => Self::RECORD_ARM,
            ControlButton::Logo => Self::LOGO,
        }
    }

    /// Button for a controller number, if it is one of the round buttons.
    pub fn from_cc(cc: u8) -> Option<Self> {
        match cc {
            Self::UP => Some(ControlButton::Up),
            Self::DOWN => Some(ControlButton::Down),
            Self::LEFT => Some(ControlButton::Left),
            Self::RIGHT => Some(ControlButton::Right),
            Self::SESSION => Some(ControlButton::Session),
            Self::NOTE => Some(ControlButton::Note),
            Self::CUSTOM => Some(ControlButton::Custom),
            Self::CAPTURE_MIDI => Some(ControlButton::CaptureMidi),
            Self::VOLUME => Some(ControlButton::Volume),
            Self::PAN => Some(ControlButton::Pan),
            Self::SEND_A => Some(ControlButton::SendA),
            Self::SEND_B => Some(ControlButton::SendB),
            Self::STOP_CLIP => Some(ControlButton::StopClip),
            Self::MUTE => Some(ControlButton::Mute),
            Self::SOLO => Some(ControlButton::Solo),
            Self::RECORD_ARM => Some(ControlButton::RecordArm),
            Self::LOGO => Some(ControlButton::Logo),
            _ => None,
        }
    }
}
