use std::time::Instant;

use log::{info, warn};

use crate::collision::{GridCell, OccupancyGrid, Rasterizer};
use crate::config::ResolutionPolicy;
use crate::entities::{PackMetrics, PackingResult, Part, Placement, Sheet};
use crate::geometry::offset::inflate;
use crate::geometry::primitives::Contour;
use crate::opt::Strategy;
use crate::util::CancelToken;
use crate::util::assertions;

/// Reference first-fit packer: scans a dense grid of candidate positions for
/// every allowed rotation and accepts the first collision-free one.
///
/// Parts are processed in input order; the caller controls priority by
/// ordering the slice (typically largest-first).
#[derive(Clone, Debug)]
pub struct GridScanPacker {
    pub policy: ResolutionPolicy,
    pub metrics: bool,
}

impl GridScanPacker {
    pub fn new(policy: ResolutionPolicy) -> Self {
        Self {
            policy,
            metrics: false,
        }
    }

    pub fn track_metrics(mut self, enabled: bool) -> Self {
        self.metrics = enabled;
        self
    }
}

impl Strategy for GridScanPacker {
    fn pack(
        &self,
        parts: &[Part],
        sheet: &Sheet,
        spacing: f64,
        cancel: &CancelToken,
    ) -> PackingResult {
        let start = Instant::now();
        let raster = Rasterizer::new(self.policy.cells_per_unit);
        let mut grid = OccupancyGrid::new(sheet, self.policy.cells_per_unit);

        let mut placements: Vec<Placement> = vec![];
        let mut unplaced_ids: Vec<String> = vec![];
        let mut positions_tried = 0usize;

        'parts: for (index, part) in parts.iter().enumerate() {
            if cancel.is_cancelled() {
                //anytime semantics: everything not yet attempted is unplaced
                unplaced_ids.extend(parts[index..].iter().map(|p| p.id.clone()));
                break;
            }

            let inflated = match inflate(&part.contour, spacing / 2.0) {
                Ok(c) => c,
                Err(e) => {
                    warn!("[GSP] cannot inflate part {}: {e:#}", part.id);
                    unplaced_ids.push(part.id.clone());
                    continue;
                }
            };
            let pivot = inflated.centroid();

            //first fit wins: once a rotation yields a valid position, no
            //further rotations are tried for this part
            for &rotation in &self.policy.rotations {
                let rotated = inflated.rotated_about(pivot, rotation);
                if let Some((x, y, cells)) = first_fit(
                    &rotated,
                    &grid,
                    &raster,
                    sheet,
                    self.policy.step_size,
                    &mut positions_tried,
                ) {
                    grid.mark_occupied(&cells);
                    placements.push(Placement {
                        id: part.id.clone(),
                        x,
                        y,
                        rotation,
                        cells: Some(cells),
                    });
                    continue 'parts;
                }
            }
            //no rotation/position combination fits; the run continues
            unplaced_ids.push(part.id.clone());
        }

        debug_assert!(assertions::placements_disjoint(&placements));
        debug_assert!(assertions::placements_within_bounds(
            &placements,
            grid.n_cols(),
            grid.n_rows()
        ));

        let utilization = grid.utilization();
        info!(
            "[GSP] placed {}/{} parts, utilization {:.2}%, {} positions tried in {:.3}s",
            placements.len(),
            parts.len(),
            utilization,
            positions_tried,
            start.elapsed().as_secs_f64()
        );

        let metrics = self.metrics.then(|| {
            let total_time = start.elapsed();
            PackMetrics {
                positions_tried,
                total_time,
                avg_time_per_part: total_time
                    .checked_div(parts.len().max(1) as u32)
                    .unwrap_or_default(),
                n_rotations: self.policy.rotations.len(),
                cells_per_unit: self.policy.cells_per_unit,
                step_size: self.policy.step_size,
            }
        });

        PackingResult {
            placements,
            unplaced_ids,
            utilization,
            metrics,
        }
    }
}

/// Scans candidate translations for an already inflated and rotated contour,
/// row-major from the sheet origin, and returns the first one whose
/// rasterization is collision-free.
///
/// The fixed scan order makes runs reproducible: the first valid position is
/// accepted, not the best.
pub(crate) fn first_fit(
    contour: &Contour,
    grid: &OccupancyGrid,
    raster: &Rasterizer,
    sheet: &Sheet,
    step: f64,
    positions_tried: &mut usize,
) -> Option<(f64, f64, Vec<GridCell>)> {
    let bbox = contour.bbox;

    //translations keeping the contour's bounding box inside the sheet
    let (tx_min, tx_max) = (-bbox.x_min, sheet.width - bbox.x_max);
    let (ty_min, ty_max) = (-bbox.y_min, sheet.height - bbox.y_max);
    if tx_max < tx_min || ty_max < ty_min {
        return None;
    }

    let nx = ((tx_max - tx_min) / step + 1e-9).floor() as usize + 1;
    let ny = ((ty_max - ty_min) / step + 1e-9).floor() as usize + 1;

    for row in 0..ny {
        let ty = ty_min + row as f64 * step;
        for col in 0..nx {
            let tx = tx_min + col as f64 * step;
            *positions_tried += 1;
            let cells = raster.scan_convert(&contour.translated(tx, ty));
            if !grid.check_collision(&cells) {
                return Some((tx, ty, cells));
            }
        }
    }
    None
}

/// Places a fixed sequence of parts with one predetermined rotation each,
/// first-fit. This is the decoder shared by the annealing and genetic
/// strategies: their search space is the sequence and rotation assignment,
/// not the positions.
pub(crate) fn place_sequence(
    items: &[(&Part, f64)],
    sheet: &Sheet,
    spacing: f64,
    policy: &ResolutionPolicy,
) -> PackingResult {
    let raster = Rasterizer::new(policy.cells_per_unit);
    let mut grid = OccupancyGrid::new(sheet, policy.cells_per_unit);

    let mut placements = vec![];
    let mut unplaced_ids = vec![];
    let mut positions_tried = 0usize;

    for &(part, rotation) in items {
        let Ok(inflated) = inflate(&part.contour, spacing / 2.0) else {
            unplaced_ids.push(part.id.clone());
            continue;
        };
        let rotated = inflated.rotated_about(inflated.centroid(), rotation);
        match first_fit(
            &rotated,
            &grid,
            &raster,
            sheet,
            policy.step_size,
            &mut positions_tried,
        ) {
            Some((x, y, cells)) => {
                grid.mark_occupied(&cells);
                placements.push(Placement {
                    id: part.id.clone(),
                    x,
                    y,
                    rotation,
                    cells: Some(cells),
                });
            }
            None => unplaced_ids.push(part.id.clone()),
        }
    }

    let utilization = grid.utilization();
    PackingResult {
        placements,
        unplaced_ids,
        utilization,
        metrics: None,
    }
}
