//! Consistency checks used in debug assertions and tests.

use std::collections::HashSet;

use crate::collision::GridCell;
use crate::entities::Placement;

/// True if no two placements claim the same grid cell.
pub fn placements_disjoint(placements: &[Placement]) -> bool {
    let mut seen: HashSet<GridCell> = HashSet::new();
    for placement in placements {
        let Some(cells) = &placement.cells else {
            continue;
        };
        for &cell in cells {
            if !seen.insert(cell) {
                return false;
            }
        }
    }
    true
}

/// True if every recorded cell lies within a grid of the given dimensions.
pub fn placements_within_bounds(placements: &[Placement], n_cols: usize, n_rows: usize) -> bool {
    placements.iter().all(|placement| {
        placement.cells.iter().flatten().all(|c| {
            c.x >= 0 && c.y >= 0 && (c.x as usize) < n_cols && (c.y as usize) < n_rows
        })
    })
}
