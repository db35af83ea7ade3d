//! Novation Launchpad X driver.
//!
//! This crate wires the protocol pieces of `launchpad-core` to a MIDI
//! transport supplied by the application:
//! - One-time setup: enable MIDI, bind ports, switch to programmer mode
//! - Input normalization: pad, control button and DAW note events
//! - Lighting output: bulk SysEx commands and single-pad notes
//!
//! # Ports
//!
//! The Launchpad X exposes two port pairs:
//! - **MIDI**: pads and round buttons in, single-pad notes out
//! - **DAW**: notes from a sequencing application in, SysEx commands out

pub mod config;
pub mod device;
pub mod midi;
pub mod transport;

pub use config::{ConfigError, DeviceConfig};
pub use device::{DeviceError, DeviceState, LaunchpadX};
pub use midi::{InputSource, MidiMessage};
pub use transport::{InputReceiver, OutputPort, PortRole, Transport, TransportError};
