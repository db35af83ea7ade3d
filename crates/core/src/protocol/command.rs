//! SysEx framing for Launchpad X commands.
//!
//! Every command is wrapped in the Novation envelope:
//!
//! ```text
//! F0 00 20 29 02 0C <opcode> <payload...> F7
//! ```

use super::lighting::LightingSpec;

/// SysEx start status byte.
pub const SYSEX_START: u8 = 0xF0;

/// SysEx terminator.
pub const SYSEX_END: u8 = 0xF7;

/// Manufacturer (Novation `00 20 29`), product family and model (Launchpad X).
pub const SYSEX_PREFIX: [u8; 5] = [0x00, 0x20, 0x29, 0x02, 0x0C];

/// Select a layout.
pub const OP_LAYOUT: u8 = 0x00;

/// Bulk LED lighting.
pub const OP_BULK_LIGHTING: u8 = 0x03;

/// Switch between live and programmer mode.
pub const OP_PROGRAMMER_MODE: u8 = 0x0E;

/// Layout value for the programmer layout.
pub const LAYOUT_PROGRAMMER: u8 = 0x7F;

/// Mode value for programmer mode.
pub const MODE_PROGRAMMER: u8 = 0x01;

/// A complete framed SysEx message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Command {
    bytes: Vec<u8>,
}

impl Command {
    /// The whole message, `F0` through `F7`.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Status byte, always `F0`.
    pub fn status(&self) -> u8 {
        self.bytes[0]
    }

    /// Everything after the status byte, terminator included.
    pub fn data(&self) -> &[u8] {
        &self.bytes[1..]
    }

    pub fn opcode(&self) -> u8 {
        self.bytes[1 + SYSEX_PREFIX.len()]
    }

    /// Bytes between the opcode and the terminator.
    pub fn payload(&self) -> &[u8] {
        let start = 2 + SYSEX_PREFIX.len();
        &self.bytes[start..self.bytes.len() - 1]
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl AsRef<[u8]> for Command {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Wrap an opcode and payload in the device envelope.
pub fn frame(opcode: u8, payload: &[u8]) -> Command {
    let mut bytes = Vec::with_capacity(SYSEX_PREFIX.len() + payload.len() + 3);
    bytes.push(SYSEX_START);
    bytes.extend_from_slice(&SYSEX_PREFIX);
    bytes.push(opcode);
    bytes.extend_from_slice(payload);
    bytes.push(SYSEX_END);
    Command { bytes }
}

/// Encode specs in order and frame them as one bulk lighting command.
pub fn encode_batch(specs: &[LightingSpec]) -> Command {
    let mut payload = Vec::with_capacity(specs.len() * 5);
    for spec in specs {
        spec.encode_into(&mut payload);
    }
    frame(OP_BULK_LIGHTING, &payload)
}

/// Commands that put the device into the programmer layout.
///
/// Pad numbering in this mode is what [`crate::CoordinateMapper`] assumes.
pub fn encode_mode_switch() -> [Command; 2] {
    [
        frame(OP_LAYOUT, &[LAYOUT_PROGRAMMER]),
        frame(OP_PROGRAMMER_MODE, &[MODE_PROGRAMMER]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::lighting::{encode_color, encode_pulse};

    #[test]
    fn test_frame_layout() {
        let cmd = frame(0x03, &[0, 11, 5]);
        assert_eq!(
            cmd.as_bytes(),
            &[0xF0, 0x00, 0x20, 0x29, 0x02, 0x0C, 0x03, 0, 11, 5, 0xF7]
        );
        assert_eq!(cmd.status(), 0xF0);
        assert_eq!(cmd.data()[0], 0x00);
        assert_eq!(*cmd.data().last().unwrap(), 0xF7);
        assert_eq!(cmd.opcode(), 0x03);
        assert_eq!(cmd.payload(), &[0, 11, 5]);
    }

    #[test]
    fn test_frame_empty_payload() {
        let cmd = frame(0x0E, &[]);
        assert_eq!(cmd.as_bytes().len(), 8);
        assert!(cmd.payload().is_empty());
    }

    #[test]
    fn test_batch_preserves_order() {
        let cmd = encode_batch(&[
            LightingSpec::Color { index: 1, color: 5 },
            LightingSpec::Pulse { index: 2, color: 6 },
        ]);

        let mut expected = encode_color(1, 5).to_vec();
        expected.extend_from_slice(&encode_pulse(2, 6));

        assert_eq!(cmd.opcode(), OP_BULK_LIGHTING);
        assert_eq!(cmd.payload(), expected.as_slice());
    }

    #[test]
    fn test_empty_batch() {
        let cmd = encode_batch(&[]);
        assert_eq!(cmd.opcode(), OP_BULK_LIGHTING);
        assert!(cmd.payload().is_empty());
    }

    #[test]
    fn test_mode_switch() {
        let [layout, mode] = encode_mode_switch();
        assert_eq!(
            layout.as_bytes(),
            &[0xF0, 0x00, 0x20, 0x29, 0x02, 0x0C, 0x00, 0x7F, 0xF7]
        );
        assert_eq!(
            mode.as_bytes(),
            &[0xF0, 0x00, 0x20, 0x29, 0x02, 0x0C, 0x0E, 0x01, 0xF7]
        );
    }
}
