use std::fmt;

use launchpad_core::{EventKind, EventRecord};

// MIDI message types we care about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiMessage {
    NoteOn { channel: u8, note: u8, velocity: u8 },
    NoteOff { channel: u8, note: u8, velocity: u8 },
    ControlChange { channel: u8, controller: u8, value: u8 },
}

impl MidiMessage {
    /// Parse a raw channel message, status byte first.
    ///
    /// Note on with velocity 0 is reported as note off. SysEx, clock and
    /// truncated messages yield `None`.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let [status, data1, data2, ..] = *bytes else {
            return None;
        };
        let channel = status & 0x0F;

        match status & 0xF0 {
            0x90 if data2 > 0 => Some(MidiMessage::NoteOn {
                channel,
                note: data1,
                velocity: data2,
            }),
            0x90 | 0x80 => Some(MidiMessage::NoteOff {
                channel,
                note: data1,
                velocity: data2,
            }),
            0xB0 => Some(MidiMessage::ControlChange {
                channel,
                controller: data1,
                value: data2,
            }),
            _ => None,
        }
    }
}

/// Which input port a message arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    /// Pads and control buttons
    Primary,
    /// The DAW pair, carrying notes from a sequencing application
    Paired,
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Primary => write!(f, "primary"),
            InputSource::Paired => write!(f, "paired"),
        }
    }
}

/// Map an incoming message to the event it publishes.
pub fn normalize(source: InputSource, message: MidiMessage) -> Option<EventRecord> {
    let (kind, index, value) = match (source, message) {
        (InputSource::Primary, MidiMessage::NoteOn { note, velocity, .. }) => {
            (EventKind::PadTouch, note, velocity)
        }
        (InputSource::Primary, MidiMessage::NoteOff { note, velocity, .. }) => {
            (EventKind::PadRelease, note, velocity)
        }
        (
            InputSource::Primary,
            MidiMessage::ControlChange {
                controller, value, ..
            },
        ) => (EventKind::ControlChange, controller, value),
        (InputSource::Paired, MidiMessage::NoteOn { note, velocity, .. }) => {
            (EventKind::NoteActive, note, velocity)
        }
        (InputSource::Paired, MidiMessage::NoteOff { note, velocity, .. }) => {
            (EventKind::NoteRelease, note, velocity)
        }
        (InputSource::Paired, MidiMessage::ControlChange { .. }) => return None,
    };

    Some(EventRecord::new(kind, index, value))
}
