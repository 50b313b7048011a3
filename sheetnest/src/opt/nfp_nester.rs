use itertools::Itertools;
use log::{info, warn};
use ordered_float::OrderedFloat;

use crate::collision::{OccupancyGrid, Rasterizer};
use crate::config::ResolutionPolicy;
use crate::entities::{PackingResult, Part, Placement, Sheet};
use crate::geometry::convex_hull::convex_hull_from_points;
use crate::geometry::nfp::Nfp;
use crate::geometry::offset::inflate;
use crate::geometry::primitives::Point;
use crate::opt::Strategy;
use crate::util::CancelToken;

/// Greedy nester driven by no-fit polygons.
///
/// Instead of scanning a dense position grid, candidate translations are
/// restricted to the contact set: vertices of the NFPs between the moving
/// part and everything already placed, plus the corners of the sheet's
/// inner-fit rectangle. Candidates are tried bottom-left first and validated
/// against the same occupancy grid the reference packer uses.
///
/// NFPs are computed on convex hulls, which is conservative: concave pockets
/// of placed parts are never filled, trading some utilization for a candidate
/// set that is linear in the number of placed parts.
#[derive(Clone, Debug)]
pub struct NfpNester {
    pub policy: ResolutionPolicy,
}

impl NfpNester {
    pub fn new(policy: ResolutionPolicy) -> Self {
        Self { policy }
    }
}

impl Strategy for NfpNester {
    fn pack(
        &self,
        parts: &[Part],
        sheet: &Sheet,
        spacing: f64,
        cancel: &CancelToken,
    ) -> PackingResult {
        let raster = Rasterizer::new(self.policy.cells_per_unit);
        let mut grid = OccupancyGrid::new(sheet, self.policy.cells_per_unit);
        //keep contact candidates one cell clear of the raster boundary
        let slack = 1.0 / self.policy.cells_per_unit;

        //convex hulls of everything placed, in sheet coordinates
        let mut placed_hulls: Vec<Vec<Point>> = vec![];
        let mut placements: Vec<Placement> = vec![];
        let mut unplaced_ids: Vec<String> = vec![];

        'parts: for (index, part) in parts.iter().enumerate() {
            if cancel.is_cancelled() {
                unplaced_ids.extend(parts[index..].iter().map(|p| p.id.clone()));
                break;
            }

            let inflated = match inflate(&part.contour, spacing / 2.0) {
                Ok(c) => c,
                Err(e) => {
                    warn!("[NFP] cannot inflate part {}: {e:#}", part.id);
                    unplaced_ids.push(part.id.clone());
                    continue;
                }
            };
            let pivot = inflated.centroid();

            for &rotation in &self.policy.rotations {
                let rotated = inflated.rotated_about(pivot, rotation);
                let bbox = rotated.bbox;

                //inner-fit rectangle in translation space
                let (tx_min, tx_max) = (-bbox.x_min, sheet.width - bbox.x_max);
                let (ty_min, ty_max) = (-bbox.y_min, sheet.height - bbox.y_max);
                if tx_max < tx_min || ty_max < ty_min {
                    continue;
                }

                let moving_hull = expand_hull(convex_hull_from_points(rotated.vertices.clone()), slack);
                let nfps = placed_hulls
                    .iter()
                    .filter_map(|hull| Nfp::of_convex(hull, &moving_hull))
                    .collect_vec();

                let mut candidates: Vec<Point> = vec![
                    Point(tx_min, ty_min),
                    Point(tx_max, ty_min),
                    Point(tx_min, ty_max),
                    Point(tx_max, ty_max),
                ];
                candidates.extend(nfps.iter().flat_map(|nfp| nfp.vertices.iter().copied()));

                candidates.retain(|&t| {
                    t.0 >= tx_min - 1e-6
                        && t.0 <= tx_max + 1e-6
                        && t.1 >= ty_min - 1e-6
                        && t.1 <= ty_max + 1e-6
                        && !nfps.iter().any(|nfp| nfp.contains_interior(t, 1e-9))
                });
                candidates.sort_by_key(|t| (OrderedFloat(t.1), OrderedFloat(t.0)));

                for t in candidates {
                    let tx = t.0.clamp(tx_min, tx_max);
                    let ty = t.1.clamp(ty_min, ty_max);
                    let cells = raster.scan_convert(&rotated.translated(tx, ty));
                    if grid.check_collision(&cells) {
                        continue;
                    }
                    grid.mark_occupied(&cells);
                    placed_hulls.push(
                        moving_hull
                            .iter()
                            .map(|p| p.translated(tx, ty))
                            .collect_vec(),
                    );
                    placements.push(Placement {
                        id: part.id.clone(),
                        x: tx,
                        y: ty,
                        rotation,
                        cells: Some(cells),
                    });
                    continue 'parts;
                }
            }
            unplaced_ids.push(part.id.clone());
        }

        let utilization = grid.utilization();
        info!(
            "[NFP] placed {}/{} parts, utilization {:.2}%",
            placements.len(),
            parts.len(),
            utilization
        );

        PackingResult {
            placements,
            unplaced_ids,
            utilization,
            metrics: None,
        }
    }
}

/// Pushes each hull vertex outward from the hull centroid by `distance`.
/// A cheap outward offset that is exact enough for clearance purposes on
/// convex shapes.
fn expand_hull(hull: Vec<Point>, distance: f64) -> Vec<Point> {
    if hull.len() < 3 || distance <= 0.0 {
        return hull;
    }
    let n = hull.len() as f64;
    let cx = hull.iter().map(|p| p.0).sum::<f64>() / n;
    let cy = hull.iter().map(|p| p.1).sum::<f64>() / n;
    hull.into_iter()
        .map(|Point(x, y)| {
            let (dx, dy) = (x - cx, y - cy);
            let dist = (dx * dx + dy * dy).sqrt();
            if dist < 1e-12 {
                Point(x, y)
            } else {
                let scale = (dist + distance) / dist;
                Point(cx + dx * scale, cy + dy * scale)
            }
        })
        .collect()
}
