//! Incoming MIDI handling.

mod message;

pub use message::{normalize, InputSource, MidiMessage};
