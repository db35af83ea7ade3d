use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("unknown event kind: {0}")]
    UnknownEventKind(String),
}

/// Kinds of events a device publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    /// Round button moved (controller, value)
    ControlChange,
    /// Pad pressed (note, velocity)
    PadTouch,
    /// Pad released (note, velocity)
    PadRelease,
    /// Note on from the paired DAW channel
    NoteActive,
    /// Note off from the paired DAW channel
    NoteRelease,
    /// Single pad lit through `light`
    Update,
    /// Whole grid cleared
    Clear,
    /// Device finished setup
    Ready,
}

impl EventKind {
    pub const ALL: [EventKind; 8] = [
        EventKind::ControlChange,
        EventKind::PadTouch,
        EventKind::PadRelease,
        EventKind::NoteActive,
        EventKind::NoteRelease,
        EventKind::Update,
        EventKind::Clear,
        EventKind::Ready,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            EventKind::ControlChange => "controlChange",
            EventKind::PadTouch => "padTouch",
            EventKind::PadRelease => "padRelease",
            EventKind::NoteActive => "noteActive",
            EventKind::NoteRelease => "noteRelease",
            EventKind::Update => "update",
            EventKind::Clear => "clear",
            EventKind::Ready => "ready",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| EventError::UnknownEventKind(s.to_string()))
    }
}

/// A normalized hardware or device event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventRecord {
    pub kind: EventKind,
    pub index: u8,
    pub value: u8,
}

impl EventRecord {
    pub fn new(kind: EventKind, index: u8, value: u8) -> Self {
        Self { kind, index, value }
    }
}
