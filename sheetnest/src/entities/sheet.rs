use anyhow::{Result, ensure};

/// Fixed-size rectangular print area with its origin at the bottom-left
/// corner. All placements and grid coordinates are relative to this origin.
#[derive(Clone, Debug, Copy, PartialEq)]
pub struct Sheet {
    pub width: f64,
    pub height: f64,
}

impl Sheet {
    /// Rejects malformed dimensions up front: no valid grid can be built from
    /// a sheet with a non-positive side.
    pub fn new(width: f64, height: f64) -> Result<Self> {
        ensure!(
            width > 0.0 && height > 0.0,
            "sheet dimensions must be positive, got {width} x {height}"
        );
        Ok(Sheet { width, height })
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}
