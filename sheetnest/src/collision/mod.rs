//! Grid-based collision model: a sheet is discretized into cells, part
//! outlines are rasterized onto it and collision queries reduce to cell
//! membership tests. Every placement strategy validates against this model.

mod occupancy_grid;
mod raster;

#[doc(inline)]
pub use occupancy_grid::OccupancyGrid;
#[doc(inline)]
pub use raster::Rasterizer;

/// Index of a cell in a sheet's occupancy grid.
///
/// Signed so that rasterizations of outlines extending past the sheet can be
/// represented; the grid treats any out-of-bounds cell as a collision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
}
