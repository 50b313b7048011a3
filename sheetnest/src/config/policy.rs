use serde::{Deserialize, Serialize};

/// Packing quality expected from a rotation/resolution preset, derived from
/// the number of rotation angles it searches.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Basic,
    Good,
    Excellent,
    Optimal,
}

impl QualityTier {
    /// Tier assignment by rotation-angle count.
    pub fn from_rotation_count(n: usize) -> Self {
        match n {
            n if n >= 72 => QualityTier::Optimal,
            n if n >= 24 => QualityTier::Excellent,
            n if n >= 8 => QualityTier::Good,
            _ => QualityTier::Basic,
        }
    }
}

/// Rotation granularity, position-search step and grid resolution of a
/// packing run, expressing a speed/quality trade-off.
///
/// Coarse rotation sets pair with a fine step and a high-resolution grid;
/// finer rotation sets deliberately pair with a coarser step and a lower
/// resolution so the added rotation cost is partially offset.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ResolutionPolicy {
    /// Rotation angles to try, in degrees and in search order.
    pub rotations: Vec<f64>,
    /// Spacing of the candidate-position grid, in sheet units.
    pub step_size: f64,
    /// Occupancy-grid resolution, cells per unit length.
    pub cells_per_unit: f64,
    /// Runtime multiplier relative to the cardinal preset.
    pub speed_factor: f64,
    pub tier: QualityTier,
}

impl ResolutionPolicy {
    /// Cardinal rotations only: the fastest preset, compensating with a fine
    /// position step and a high-resolution grid.
    pub fn cardinal() -> Self {
        Self {
            rotations: vec![0.0, 90.0, 180.0, 270.0],
            step_size: 0.05,
            cells_per_unit: 20.0,
            speed_factor: 1.0,
            tier: QualityTier::Basic,
        }
    }

    /// Eight rotations at 45°.
    pub fn balanced() -> Self {
        Self {
            rotations: angles(45.0),
            step_size: 0.1,
            cells_per_unit: 16.0,
            speed_factor: 2.2,
            tier: QualityTier::Good,
        }
    }

    /// 24 rotations at 15°.
    pub fn fine() -> Self {
        Self {
            rotations: angles(15.0),
            step_size: 0.2,
            cells_per_unit: 12.0,
            speed_factor: 5.0,
            tier: QualityTier::Excellent,
        }
    }

    /// 72 rotations at 5°.
    pub fn ultra() -> Self {
        Self {
            rotations: angles(5.0),
            step_size: 0.25,
            cells_per_unit: 8.0,
            speed_factor: 12.0,
            tier: QualityTier::Optimal,
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "cardinal" => Some(Self::cardinal()),
            "balanced" => Some(Self::balanced()),
            "fine" => Some(Self::fine()),
            "ultra" => Some(Self::ultra()),
            _ => None,
        }
    }

    /// Derives a custom preset from a single rotation step. Step size, grid
    /// resolution and speed factor are scaled with the angle count along the
    /// same trade-off curve as the named presets.
    pub fn from_rotation_step(rotation_step_degrees: f64) -> Self {
        let step = rotation_step_degrees.clamp(1.0, 360.0);
        let n = (360.0 / step).floor().max(1.0) as usize;
        let rotations = (0..n).map(|k| k as f64 * step).collect();
        let tier = QualityTier::from_rotation_count(n);
        let (step_size, cells_per_unit) = match tier {
            QualityTier::Basic => (0.05, 20.0),
            QualityTier::Good => (0.1, 16.0),
            QualityTier::Excellent => (0.2, 12.0),
            QualityTier::Optimal => (0.25, 8.0),
        };
        Self {
            rotations,
            step_size,
            cells_per_unit,
            speed_factor: (n as f64 / 4.0).max(1.0),
            tier,
        }
    }

    /// Advisory runtime estimate for packing `n_items`, given a baseline
    /// per-item time in seconds for the cardinal preset. Display only; never
    /// gates any decision.
    pub fn estimate_runtime(&self, n_items: usize, baseline_secs_per_item: f64) -> String {
        let total = baseline_secs_per_item * self.speed_factor * n_items as f64;
        if total < 60.0 {
            format!("{:.0} seconds", total.max(1.0))
        } else if total < 3600.0 {
            format!("{:.1} minutes", total / 60.0)
        } else {
            format!("{:.1} hours", total / 3600.0)
        }
    }
}

impl Default for ResolutionPolicy {
    fn default() -> Self {
        Self::cardinal()
    }
}

fn angles(step: f64) -> Vec<f64> {
    let n = (360.0 / step).floor() as usize;
    (0..n).map(|k| k as f64 * step).collect()
}
