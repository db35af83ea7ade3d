//! Launchpad X protocol core.
//!
//! Transport-independent pieces of a Launchpad X driver:
//! - Pad addressing: native note numbers, logical indices, grid positions
//! - Lighting commands: SysEx framing of Color/Flash/Pulse/RGB instructions
//! - Grid rendering: an 8x8 frame of cells to one bulk lighting command
//! - Event dispatch: ordered handlers per event kind
//!
//! # Pad Layout
//!
//! The device must be in programmer mode (see [`encode_mode_switch`]). Pads
//! are then numbered 11-88 with the tens digit as the row, bottom row first;
//! logical indices run 1-64 from the top-left pad.

pub mod colors;
pub mod events;
pub mod grid;
pub mod mapping;
pub mod protocol;

pub use events::{
    EventDispatcher, EventError, EventKind, EventRecord, HandlerError, HandlerFailure,
    HandlerResult,
};
pub use grid::{uniform_grid, CellError, Grid, GridCell, GridRenderer};
pub use mapping::{ControlButton, CoordinateMapper, GridIndexTable, GridPosition};
pub use protocol::{
    encode_batch, encode_color, encode_flash, encode_mode_switch, encode_pulse, encode_rgb, frame,
    Command, LightingSpec,
};
