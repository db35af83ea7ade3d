//! Per-pad lighting instructions for the bulk lighting command.
//!
//! Each instruction is a small tagged record:
//!
//! ```text
//! Color: [0, index, color]
//! Flash: [1, index, color_a, color_b]
//! Pulse: [2, index, color]
//! RGB:   [3, index, r, g, b]
//! ```
//!
//! Out-of-range values wrap instead of failing: indices modulo 99, colors and
//! RGB components modulo 128, using floor modulo so negative inputs land in
//! range too.

use serde::{Deserialize, Serialize};

pub const SPEC_COLOR: u8 = 0;
pub const SPEC_FLASH: u8 = 1;
pub const SPEC_PULSE: u8 = 2;
pub const SPEC_RGB: u8 = 3;

const INDEX_MODULUS: i32 = 99;
const VALUE_MODULUS: i32 = 128;

fn wrap_index(index: i32) -> u8 {
    index.rem_euclid(INDEX_MODULUS) as u8
}

fn wrap_value(value: i32) -> u8 {
    value.rem_euclid(VALUE_MODULUS) as u8
}

/// Static palette color.
pub fn encode_color(index: i32, color: i32) -> [u8; 3] {
    [SPEC_COLOR, wrap_index(index), wrap_value(color)]
}

/// Alternate between two palette colors.
pub fn encode_flash(index: i32, color_a: i32, color_b: i32) -> [u8; 4] {
    [
        SPEC_FLASH,
        wrap_index(index),
        wrap_value(color_a),
        wrap_value(color_b),
    ]
}

/// Pulse a palette color.
pub fn encode_pulse(index: i32, color: i32) -> [u8; 3] {
    [SPEC_PULSE, wrap_index(index), wrap_value(color)]
}

/// Static RGB color, 0-127 per component.
pub fn encode_rgb(index: i32, r: i32, g: i32, b: i32) -> [u8; 5] {
    [
        SPEC_RGB,
        wrap_index(index),
        wrap_value(r),
        wrap_value(g),
        wrap_value(b),
    ]
}

/// One lighting instruction for one pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LightingSpec {
    Color { index: i32, color: i32 },
    Flash { index: i32, color_a: i32, color_b: i32 },
    Pulse { index: i32, color: i32 },
    Rgb { index: i32, r: i32, g: i32, b: i32 },
}

impl LightingSpec {
    pub fn index(&self) -> i32 {
        match *self {
            LightingSpec::Color { index, .. }
            | LightingSpec::Flash { index, .. }
            | LightingSpec::Pulse { index, .. }
            | LightingSpec::Rgb { index, .. } => index,
        }
    }

    /// Leading tag byte of the encoded record.
    pub fn tag(&self) -> u8 {
        match self {
            LightingSpec::Color { .. } => SPEC_COLOR,
            LightingSpec::Flash { .. } => SPEC_FLASH,
            LightingSpec::Pulse { .. } => SPEC_PULSE,
            LightingSpec::Rgb { .. } => SPEC_RGB,
        }
    }

    /// Append the encoded record to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        match *self {
            LightingSpec::Color { index, color } => {
                out.extend_from_slice(&encode_color(index, color));
            }
            LightingSpec::Flash {
                index,
                color_a,
                color_b,
            } => {
                out.extend_from_slice(&encode_flash(index, color_a, color_b));
            }
            LightingSpec::Pulse { index, color } => {
                out.extend_from_slice(&encode_pulse(index, color));
            }
            LightingSpec::Rgb { index, r, g, b } => {
                out.extend_from_slice(&encode_rgb(index, r, g, b));
            }
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(5);
        self.encode_into(&mut out);
        out
    }
}
