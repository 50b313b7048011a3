//! Placement strategies. All of them consume the same inputs and produce a
//! [`PackingResult`], so callers (most importantly the production scheduler)
//! can swap strategies without touching anything else.

pub mod annealing;
pub mod genetic;
pub mod grid_scan;
pub mod nfp_nester;

#[doc(inline)]
pub use annealing::Annealer;
#[doc(inline)]
pub use genetic::GeneticNester;
#[doc(inline)]
pub use grid_scan::GridScanPacker;
#[doc(inline)]
pub use nfp_nester::NfpNester;

use serde::{Deserialize, Serialize};

use crate::config::NestConfig;
use crate::entities::{PackingResult, Part, Placement, Sheet};
use crate::util::CancelToken;

/// A single-sheet placement search.
pub trait Strategy {
    /// Packs as many of `parts` as fit on `sheet`, honoring `spacing` between
    /// parts and the sheet edge margin. Must poll `cancel` between units of
    /// work and return the best result found so far when it fires.
    fn pack(
        &self,
        parts: &[Part],
        sheet: &Sheet,
        spacing: f64,
        cancel: &CancelToken,
    ) -> PackingResult;
}

/// Selects which placement strategy a request runs.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    #[default]
    GridScan,
    NfpGreedy,
    Annealing,
    Genetic,
}

pub fn build_strategy(kind: StrategyKind, config: &NestConfig) -> Box<dyn Strategy> {
    match kind {
        StrategyKind::GridScan => Box::new(
            GridScanPacker::new(config.policy.clone()).track_metrics(config.track_metrics),
        ),
        StrategyKind::NfpGreedy => Box::new(NfpNester::new(config.policy.clone())),
        StrategyKind::Annealing => Box::new(Annealer::new(
            config.annealing,
            config.policy.clone(),
            config.prng_seed,
        )),
        StrategyKind::Genetic => Box::new(GeneticNester::new(
            config.genetic,
            config.policy.clone(),
            config.prng_seed,
        )),
    }
}

/// Snapshot emitted whenever a metaheuristic improves on its best-known
/// solution. Delivery is fire-and-forget: dropped or delayed notifications
/// never affect the final result.
#[derive(Clone, Debug)]
pub struct Progress {
    pub iteration: usize,
    pub best_fitness: f64,
    pub utilization: f64,
    pub placements: Vec<Placement>,
}

pub type ProgressHandler = Box<dyn Fn(&Progress) + Send + Sync>;
