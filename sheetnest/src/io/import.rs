use anyhow::{Context, Result, bail, ensure};
use log::warn;

use crate::config::{NestConfig, QualityTier, ResolutionPolicy};
use crate::entities::{Part, Sheet, sort_largest_first};
use crate::geometry::primitives::{Contour, Point};
use crate::io::ext_repr::{ExtNestingRequest, ExtPart};
use crate::opt::StrategyKind;

/// Spacing applied when a request does not specify one.
pub const DEFAULT_SPACING: f64 = 0.0625;

/// Maximum relative disagreement between a part's declared area and the area
/// computed from its boundary.
pub const AREA_TOLERANCE: f64 = 0.01;

/// A validated, ready-to-run nesting job.
#[derive(Clone, Debug)]
pub struct NestingJob {
    pub parts: Vec<Part>,
    /// Ids of parts rejected at ingestion for invalid geometry.
    pub rejected_ids: Vec<String>,
    pub sheet: Sheet,
    pub spacing: f64,
    pub config: NestConfig,
    pub strategy: StrategyKind,
    pub sheet_count: Option<usize>,
    pub pack_all_items: bool,
}

/// Converts external representations into validated engine entities.
#[derive(Clone, Debug, Copy)]
pub struct Importer {
    pub area_tolerance: f64,
}

impl Default for Importer {
    fn default() -> Self {
        Self {
            area_tolerance: AREA_TOLERANCE,
        }
    }
}

impl Importer {
    pub fn new(area_tolerance: f64) -> Self {
        Self { area_tolerance }
    }

    /// Validates a single part. Degenerate boundaries, self-intersections and
    /// area mismatches are all ingestion errors.
    pub fn import_part(&self, ext: &ExtPart) -> Result<Part> {
        let points = ext.points.iter().map(|p| Point(p.x, p.y)).collect();
        let contour = Contour::new(points)
            .with_context(|| format!("invalid boundary for part {}", ext.id))?;
        ensure!(
            contour.is_simple(),
            "boundary of part {} is self-intersecting",
            ext.id
        );

        if let Some(declared) = ext.area {
            let relative_error = (declared - contour.area).abs() / contour.area;
            ensure!(
                relative_error <= self.area_tolerance,
                "declared area {declared} of part {} disagrees with computed area {:.4}",
                ext.id,
                contour.area
            );
        }

        Ok(Part::new(&ext.id, contour, ext.quantity.unwrap_or(1)))
    }

    /// Validates a full request.
    ///
    /// Malformed sheet dimensions reject the whole request; a part with
    /// invalid geometry is logged, recorded in `rejected_ids` and skipped
    /// without aborting the remaining parts.
    pub fn import_request(&self, req: &ExtNestingRequest) -> Result<NestingJob> {
        let sheet = Sheet::new(req.sheet_width, req.sheet_height)?;

        let mut parts = vec![];
        let mut rejected_ids = vec![];
        for ext_part in &req.parts {
            match self.import_part(ext_part) {
                Ok(part) => parts.push(part),
                Err(e) => {
                    warn!("[IMPORT] rejecting part {}: {e:#}", ext_part.id);
                    rejected_ids.push(ext_part.id.clone());
                }
            }
        }

        if req.sort_largest_first.unwrap_or(true) {
            sort_largest_first(&mut parts);
        }

        let policy = resolve_policy(req)?;
        let config = NestConfig {
            policy,
            track_metrics: req.track_metrics,
            prng_seed: req.prng_seed.or(Some(0)),
            ..NestConfig::default()
        };

        Ok(NestingJob {
            parts,
            rejected_ids,
            sheet,
            spacing: req.spacing.unwrap_or(DEFAULT_SPACING),
            config,
            strategy: req.strategy.unwrap_or_default(),
            sheet_count: req.sheet_count,
            pack_all_items: req.pack_all_items,
        })
    }
}

/// Picks the preset named by the request (or derives a custom one) and lays
/// any explicit overrides on top.
fn resolve_policy(req: &ExtNestingRequest) -> Result<ResolutionPolicy> {
    let mut policy = match (&req.preset, req.rotation_step_degrees) {
        (Some(name), _) => match ResolutionPolicy::by_name(name) {
            Some(p) => p,
            None => bail!("unknown rotation/resolution preset: {name}"),
        },
        (None, Some(step)) => ResolutionPolicy::from_rotation_step(step),
        (None, None) => ResolutionPolicy::default(),
    };

    if let Some(rotations) = &req.rotations {
        ensure!(!rotations.is_empty(), "rotation list must not be empty");
        policy.rotations = rotations.clone();
        policy.tier = QualityTier::from_rotation_count(policy.rotations.len());
    }
    if let Some(step) = req.step_size {
        ensure!(step > 0.0, "step size must be positive");
        policy.step_size = step;
    }
    if let Some(cpu) = req.cells_per_unit {
        ensure!(cpu > 0.0, "grid resolution must be positive");
        policy.cells_per_unit = cpu;
    }
    Ok(policy)
}
