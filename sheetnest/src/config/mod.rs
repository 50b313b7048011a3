mod policy;

#[doc(inline)]
pub use policy::{QualityTier, ResolutionPolicy};

use serde::{Deserialize, Serialize};

/// Engine-wide configuration of a nesting run.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct NestConfig {
    pub policy: ResolutionPolicy,
    /// Collect performance metrics alongside the result.
    pub track_metrics: bool,
    /// Seed for the PRNG used by the metaheuristic strategies. If undefined,
    /// they run in non-deterministic mode using entropy.
    pub prng_seed: Option<u64>,
    pub annealing: AnnealingConfig,
    pub genetic: GeneticConfig,
}

impl Default for NestConfig {
    fn default() -> Self {
        Self {
            policy: ResolutionPolicy::default(),
            track_metrics: false,
            prng_seed: Some(0),
            annealing: AnnealingConfig::default(),
            genetic: GeneticConfig::default(),
        }
    }
}

/// Parameters of the simulated-annealing strategy.
#[derive(Serialize, Deserialize, Clone, Debug, Copy)]
#[serde(default)]
pub struct AnnealingConfig {
    pub initial_temperature: f64,
    /// Geometric decay applied to the temperature each iteration.
    pub cooling_rate: f64,
    pub iterations: usize,
    /// Neighbors sampled per iteration.
    pub neighbourhood_size: usize,
    /// Wall-clock budget in seconds. Exceeding it returns the best solution
    /// found so far.
    pub time_limit_secs: Option<f64>,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 50.0,
            cooling_rate: 0.97,
            iterations: 400,
            neighbourhood_size: 4,
            time_limit_secs: None,
        }
    }
}

/// Parameters of the genetic-algorithm strategy.
#[derive(Serialize, Deserialize, Clone, Debug, Copy)]
#[serde(default)]
pub struct GeneticConfig {
    pub population_size: usize,
    pub generations: usize,
    pub mutation_rate: f64,
    /// Top individuals carried over unchanged each generation.
    pub elite_count: usize,
    pub tournament_size: usize,
    /// Wall-clock budget in seconds. Exceeding it returns the best solution
    /// found so far.
    pub time_limit_secs: Option<f64>,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 40,
            generations: 60,
            mutation_rate: 0.15,
            elite_count: 3,
            tournament_size: 3,
            time_limit_secs: None,
        }
    }
}
