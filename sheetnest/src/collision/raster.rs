use anyhow::Result;

use crate::collision::GridCell;
use crate::geometry::offset::inflate;
use crate::geometry::primitives::{Contour, Point};

/// Scan-converts part outlines into the cells they cover at a fixed
/// resolution.
#[derive(Clone, Debug, Copy)]
pub struct Rasterizer {
    pub cells_per_unit: f64,
}

impl Rasterizer {
    pub fn new(cells_per_unit: f64) -> Self {
        Self { cells_per_unit }
    }

    /// Rasterizes a boundary after inflating it by `spacing / 2`, rotating it
    /// around its own centroid by `rotation_degrees` and translating it by
    /// `(translate_x, translate_y)`.
    ///
    /// The inflation reserves the cutting margin: two inflated outlines must
    /// not share a cell even when the bare outlines are merely adjacent.
    pub fn rasterize(
        &self,
        boundary: &Contour,
        translate_x: f64,
        translate_y: f64,
        rotation_degrees: f64,
        spacing: f64,
    ) -> Result<Vec<GridCell>> {
        let inflated = inflate(boundary, spacing / 2.0)?;
        let rotated = inflated.rotated_about(inflated.centroid(), rotation_degrees);
        let placed = rotated.translated(translate_x, translate_y);
        Ok(self.scan_convert(&placed))
    }

    /// Emits every grid cell whose center lies inside the contour.
    ///
    /// A degenerate contour (fewer than 3 vertices) covers no cells.
    pub fn scan_convert(&self, contour: &Contour) -> Vec<GridCell> {
        if contour.vertices.len() < 3 {
            return vec![];
        }

        let x_start = (contour.bbox.x_min * self.cells_per_unit).floor() as i32;
        let x_end = (contour.bbox.x_max * self.cells_per_unit).ceil() as i32;
        let y_start = (contour.bbox.y_min * self.cells_per_unit).floor() as i32;
        let y_end = (contour.bbox.y_max * self.cells_per_unit).ceil() as i32;

        let mut cells = vec![];
        for y in y_start..y_end {
            for x in x_start..x_end {
                let center = Point(
                    (x as f64 + 0.5) / self.cells_per_unit,
                    (y as f64 + 0.5) / self.cells_per_unit,
                );
                if contour.contains(center) {
                    cells.push(GridCell { x, y });
                }
            }
        }
        cells
    }
}
