use ndarray::Array2;

use crate::collision::GridCell;
use crate::entities::Sheet;

/// Free/occupied map of a single sheet at a fixed resolution.
///
/// The grid is exclusively owned by one packing run: it is created fresh per
/// sheet, mutated only through [`Self::mark_occupied`] and dropped when the
/// sheet is done.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    cells: Array2<bool>,
    n_cols: usize,
    n_rows: usize,
}

impl OccupancyGrid {
    pub fn new(sheet: &Sheet, cells_per_unit: f64) -> Self {
        let n_cols = (sheet.width * cells_per_unit).ceil() as usize;
        let n_rows = (sheet.height * cells_per_unit).ceil() as usize;
        Self {
            cells: Array2::from_elem((n_rows, n_cols), false),
            n_cols,
            n_rows,
        }
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn in_bounds(&self, cell: GridCell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.n_cols && (cell.y as usize) < self.n_rows
    }

    /// True if any cell is already occupied or lies outside the grid.
    /// Out-of-bounds counts as collision, not as an error.
    pub fn check_collision(&self, cells: &[GridCell]) -> bool {
        cells
            .iter()
            .any(|&c| !self.in_bounds(c) || self.cells[[c.y as usize, c.x as usize]])
    }

    /// Marks the given cells occupied. Marking an already-occupied or
    /// out-of-bounds cell is a no-op, so the operation is idempotent.
    pub fn mark_occupied(&mut self, cells: &[GridCell]) {
        for &c in cells {
            if self.in_bounds(c) {
                self.cells[[c.y as usize, c.x as usize]] = true;
            }
        }
    }

    /// Percentage of cells currently occupied, recounted from the grid on
    /// every call rather than accumulated incrementally.
    pub fn utilization(&self) -> f64 {
        let total = self.n_rows * self.n_cols;
        if total == 0 {
            return 0.0;
        }
        let occupied = self.cells.iter().filter(|&&c| c).count();
        100.0 * occupied as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_4x4() -> OccupancyGrid {
        OccupancyGrid::new(&Sheet::new(4.0, 4.0).unwrap(), 1.0)
    }

    #[test]
    fn out_of_bounds_is_collision() {
        let grid = grid_4x4();
        assert!(grid.check_collision(&[GridCell { x: -1, y: 0 }]));
        assert!(grid.check_collision(&[GridCell { x: 0, y: 4 }]));
        assert!(!grid.check_collision(&[GridCell { x: 3, y: 3 }]));
    }

    #[test]
    fn marking_is_idempotent() {
        let mut grid = grid_4x4();
        let cells = [GridCell { x: 1, y: 1 }, GridCell { x: 2, y: 1 }];
        grid.mark_occupied(&cells);
        let util_once = grid.utilization();
        grid.mark_occupied(&cells);
        assert_eq!(grid.utilization(), util_once);
        assert!(grid.check_collision(&cells));
    }

    #[test]
    fn utilization_never_decreases() {
        let mut grid = grid_4x4();
        let mut last = grid.utilization();
        for i in 0..4 {
            grid.mark_occupied(&[GridCell { x: i, y: i }]);
            let util = grid.utilization();
            assert!(util >= last);
            last = util;
        }
        assert_eq!(last, 100.0 * 4.0 / 16.0);
    }
}
