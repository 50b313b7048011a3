use crate::collision::GridCell;

/// Accepted position of a part on a sheet.
///
/// The part's boundary is rotated by `rotation` degrees around its own
/// centroid first, then translated by `(x, y)`. This order is fixed across
/// rasterization, collision checking and rendering.
#[derive(Clone, Debug)]
pub struct Placement {
    pub id: String,
    pub x: f64,
    pub y: f64,
    /// One of the discrete angles allowed by the active policy, in degrees.
    pub rotation: f64,
    /// Cells covered on the sheet's occupancy grid, kept for audit/debug.
    pub cells: Option<Vec<GridCell>>,
}
