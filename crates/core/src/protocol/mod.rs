//! Launchpad X command encoding.

mod command;
mod lighting;

pub use command::{
    encode_batch, encode_mode_switch, frame, Command, LAYOUT_PROGRAMMER, MODE_PROGRAMMER,
    OP_BULK_LIGHTING, OP_LAYOUT, OP_PROGRAMMER_MODE, SYSEX_END, SYSEX_PREFIX, SYSEX_START,
};
pub use lighting::{
    encode_color, encode_flash, encode_pulse, encode_rgb, LightingSpec, SPEC_COLOR, SPEC_FLASH,
    SPEC_PULSE, SPEC_RGB,
};
