//! Launchpad X palette indices.
//!
//! The palette holds 128 colors addressed by velocity. These are the ones the
//! soundboard layouts use.

pub const OFF: u8 = 0;
pub const ORANGE: u8 = 9;
pub const LEMON_GREEN: u8 = 17;
pub const GREEN: u8 = 26;
pub const LIGHT_TEAL: u8 = 33;
pub const TEAL: u8 = 34;
pub const LIGHT_BLUE: u8 = 37;
pub const PINK: u8 = 52;
pub const BRIGHT_PINK: u8 = 53;
pub const DARK_PINK: u8 = 58;
pub const RED: u8 = 72;
pub const PURPLE: u8 = 80;
pub const BRIGHT_ORANGE: u8 = 108;
pub const WHITE: u8 = 119;
