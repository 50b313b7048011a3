use std::collections::HashMap;
use std::time::Duration;

use crate::entities::Placement;

/// Outcome of packing a single sheet.
#[derive(Clone, Debug, Default)]
pub struct PackingResult {
    pub placements: Vec<Placement>,
    /// Ids of parts for which no collision-free rotation/position was found.
    pub unplaced_ids: Vec<String>,
    /// Percentage of the sheet's grid cells covered by placements.
    pub utilization: f64,
    pub metrics: Option<PackMetrics>,
}

impl PackingResult {
    pub fn placed_count(&self) -> usize {
        self.placements.len()
    }
}

/// Observational statistics of a packing run. Never affects placement
/// decisions.
#[derive(Clone, Debug, Default)]
pub struct PackMetrics {
    pub positions_tried: usize,
    pub total_time: Duration,
    pub avg_time_per_part: Duration,
    pub n_rotations: usize,
    pub cells_per_unit: f64,
    pub step_size: f64,
}

/// One packed sheet within a production run.
#[derive(Clone, Debug)]
pub struct SheetResult {
    pub sheet_index: usize,
    pub placements: Vec<Placement>,
    pub utilization: f64,
}

/// Outcome of a multi-sheet production run.
#[derive(Clone, Debug, Default)]
pub struct ProductionResult {
    pub sheets: Vec<SheetResult>,
    /// Area-weighted mean utilization across all sheets.
    pub total_utilization: f64,
    /// Copies actually placed per original part id, summed over all sheets.
    pub quantities: HashMap<String, usize>,
}
