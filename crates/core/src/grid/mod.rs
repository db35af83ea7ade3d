//! 8x8 grid rendering.

mod cell;
mod renderer;

pub use cell::{uniform_grid, CellError, Grid, GridCell};
pub use renderer::GridRenderer;
