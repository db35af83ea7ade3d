//! Native note numbers to logical pad indices and grid positions.
//!
//! In programmer mode the Launchpad X numbers its pads in row blocks of ten,
//! bottom row first:
//!
//! ```text
//! Row 8 (top)    81 82 83 84 85 86 87 88
//! Row 7          71 72 73 74 75 76 77 78
//! ...
//! Row 1 (bottom) 11 12 13 14 15 16 17 18
//! ```
//!
//! Slots 9 and 0 of each block belong to the round control buttons, so the 64
//! pads are not contiguous. The logical numbering runs 1..=64 from the top-left
//! pad, row by row.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Grid width and height.
pub const GRID_SIZE: usize = 8;

/// Number of addressable pads.
pub const PAD_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// `(start_at, offset)` per device row block, top block first.
const ROW_OFFSETS: [(u8, i16); GRID_SIZE] = [
    (81, -80),
    (71, -62),
    (61, -44),
    (51, -26),
    (41, -8),
    (31, 10),
    (21, 28),
    (11, 46),
];

/// Native note numbers laid out as the physical grid, top row first.
pub type GridIndexTable = [[u8; GRID_SIZE]; GRID_SIZE];

/// A pad position, `(0, 0)` is the top-left pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: u8,
    pub y: u8,
}

impl GridPosition {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Arithmetic position of a logical index.
    ///
    /// Defined for every value but only meaningful for `1..=64`; check table
    /// membership with [`CoordinateMapper::to_native`] first.
    pub fn from_logical(logical: u8) -> Self {
        let n = i32::from(logical);
        let x = (n - 1).rem_euclid(GRID_SIZE as i32);
        let y = ((n + GRID_SIZE as i32 - 1) / GRID_SIZE as i32 - 1).max(0);
        Self {
            x: x as u8,
            y: y as u8,
        }
    }
}

/// Both directions of the native/logical lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingTables {
    pub native_to_logical: HashMap<u8, u8>,
    pub logical_to_native: HashMap<u8, u8>,
}

/// Expand the row descriptors into the native/logical lookup tables.
pub fn build_tables() -> MappingTables {
    let mut native_to_logical = HashMap::with_capacity(PAD_COUNT);
    let mut logical_to_native = HashMap::with_capacity(PAD_COUNT);

    for (start_at, offset) in ROW_OFFSETS {
        for i in 0..GRID_SIZE as u8 {
            let native = start_at + i;
            let logical = (i16::from(native) + offset) as u8;
            native_to_logical.insert(native, logical);
            logical_to_native.insert(logical, native);
        }
    }

    MappingTables {
        native_to_logical,
        logical_to_native,
    }
}

/// Native note numbers of the pad grid, top device row (block 8) first.
pub fn build_grid_index_table() -> GridIndexTable {
    let mut table = [[0u8; GRID_SIZE]; GRID_SIZE];

    for (row, block) in (1..=GRID_SIZE as u8).rev().enumerate() {
        let base = block * 10;
        for (col, slot) in table[row].iter_mut().enumerate() {
            *slot = base + col as u8 + 1;
        }
    }

    table
}

/// Translates between native pad numbers, logical indices and positions.
///
/// Tables are built once in [`CoordinateMapper::new`] and never change.
#[derive(Debug, Clone)]
pub struct CoordinateMapper {
    tables: MappingTables,
    grid: GridIndexTable,
}

impl CoordinateMapper {
    pub fn new() -> Self {
        Self {
            tables: build_tables(),
            grid: build_grid_index_table(),
        }
    }

    /// Logical index of a native pad number (`toID`).
    pub fn to_logical(&self, native: u8) -> Option<u8> {
        self.tables.native_to_logical.get(&native).copied()
    }

    /// Native pad number of a logical index (`toNote`).
    pub fn to_native(&self, logical: u8) -> Option<u8> {
        self.tables.logical_to_native.get(&logical).copied()
    }

    /// Grid position of a native pad number (`posOf`).
    ///
    /// Returns `None` for notes that are not one of the 64 pads.
    pub fn pos_of(&self, native: u8) -> Option<GridPosition> {
        self.to_logical(native).map(GridPosition::from_logical)
    }

    /// Native pad number at a grid position.
    pub fn native_at(&self, x: usize, y: usize) -> Option<u8> {
        self.grid.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Native pad numbers laid out as the physical grid.
    pub fn grid_index_table(&self) -> &GridIndexTable {
        &self.grid
    }

    pub fn is_pad(&self, native: u8) -> bool {
        self.tables.native_to_logical.contains_key(&native)
    }
}

impl Default for CoordinateMapper {
    fn default() -> Self {
        Self::new()
    }
}
