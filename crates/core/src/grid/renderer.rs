//! Whole-grid rendering into one bulk lighting command.

use crate::grid::cell::{uniform_grid, GridCell};
use crate::mapping::{build_grid_index_table, CoordinateMapper, GridIndexTable};
use crate::protocol::{encode_batch, Command, LightingSpec};

/// Resolves grid cells to native pads and batches them.
#[derive(Debug, Clone)]
pub struct GridRenderer {
    grid: GridIndexTable,
}

impl GridRenderer {
    pub fn new() -> Self {
        Self {
            grid: build_grid_index_table(),
        }
    }

    /// Share the table already built by a mapper.
    pub fn from_mapper(mapper: &CoordinateMapper) -> Self {
        Self {
            grid: *mapper.grid_index_table(),
        }
    }

    /// Lighting specs for every renderable cell, row by row.
    ///
    /// Skipped cells and cells outside the 8x8 grid produce nothing.
    pub fn resolve<R: AsRef<[GridCell]>>(&self, rows: &[R]) -> Vec<LightingSpec> {
        let mut specs = Vec::with_capacity(64);
        let mut skipped = 0usize;

        for (y, row) in rows.iter().enumerate() {
            for (x, cell) in row.as_ref().iter().enumerate() {
                let spec = self
                    .grid
                    .get(y)
                    .and_then(|natives| natives.get(x))
                    .and_then(|&native| cell.with_index(i32::from(native)));

                match spec {
                    Some(spec) => specs.push(spec),
                    None => skipped += 1,
                }
            }
        }

        if skipped > 0 {
            tracing::debug!("Grid render skipped {} cells", skipped);
        }

        specs
    }

    /// One bulk lighting command for the whole grid.
    pub fn render<R: AsRef<[GridCell]>>(&self, rows: &[R]) -> Command {
        encode_batch(&self.resolve(rows))
    }

    /// Every pad set to `background`.
    pub fn clear(&self, background: i32) -> Command {
        self.render(&uniform_grid(GridCell::Color(background)))
    }
}

impl Default for GridRenderer {
    fn default() -> Self {
        Self::new()
    }
}
