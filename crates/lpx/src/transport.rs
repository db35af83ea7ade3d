//! The link to the hardware.
//!
//! The driver never opens MIDI ports itself. An embedding application
//! provides a [`Transport`] (for example over midir or WebMIDI) that enables
//! the MIDI subsystem and hands out ports by name.

use std::fmt;

use async_trait::async_trait;
use tokio::sync::mpsc;

pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Raw messages from one input port, status byte first.
pub type InputReceiver = mpsc::UnboundedReceiver<Vec<u8>>;

/// The four ports a Launchpad X exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortRole {
    MidiIn,
    MidiOut,
    DawIn,
    DawOut,
}

impl fmt::Display for PortRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortRole::MidiIn => write!(f, "MIDI input"),
            PortRole::MidiOut => write!(f, "MIDI output"),
            PortRole::DawIn => write!(f, "DAW input"),
            PortRole::DawOut => write!(f, "DAW output"),
        }
    }
}

#[async_trait]
pub trait Transport: Send {
    /// Enable MIDI access with SysEx permission. Called once per setup.
    async fn enable(&mut self) -> Result<(), TransportError>;

    /// Open an input port by name.
    fn input(&mut self, name: &str) -> Option<InputReceiver>;

    /// Open an output port by name.
    fn output(&mut self, name: &str) -> Option<Box<dyn OutputPort>>;
}

pub trait OutputPort: Send {
    /// Send one message given its status byte and the bytes that follow.
    fn send(&mut self, status: u8, data: &[u8]) -> Result<(), TransportError>;

    /// Note on with a raw velocity. `channel` is 1-16.
    fn play_note(&mut self, note: u8, channel: u8, velocity: u8) -> Result<(), TransportError> {
        let status = 0x90 | (channel.saturating_sub(1) & 0x0F);
        self.send(status, &[note & 0x7F, velocity & 0x7F])
    }
}
