//! Launchpad X pad addressing.

mod buttons;
mod mapper;

pub use buttons::ControlButton;
pub use mapper::{
    build_grid_index_table, build_tables, CoordinateMapper, GridIndexTable, GridPosition,
    MappingTables, GRID_SIZE, PAD_COUNT,
};
