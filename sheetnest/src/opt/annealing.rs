use std::time::{Duration, Instant};

use log::info;
use rand::prelude::*;

use crate::config::{AnnealingConfig, ResolutionPolicy};
use crate::entities::{PackingResult, Part, Sheet};
use crate::opt::grid_scan::place_sequence;
use crate::opt::{Progress, ProgressHandler, Strategy};
use crate::util::CancelToken;

/// Simulated-annealing search over part order and rotation assignment.
///
/// A state is a permutation of the parts plus one rotation per part; it is
/// decoded into placements by the shared first-fit decoder. Worse neighbors
/// are accepted with probability `exp(-Δ/T)` and the temperature decays
/// geometrically each iteration.
pub struct Annealer {
    pub config: AnnealingConfig,
    pub policy: ResolutionPolicy,
    seed: Option<u64>,
    progress: Option<ProgressHandler>,
}

impl Annealer {
    pub fn new(config: AnnealingConfig, policy: ResolutionPolicy, seed: Option<u64>) -> Self {
        Self {
            config,
            policy,
            seed,
            progress: None,
        }
    }

    pub fn with_progress(mut self, handler: impl Fn(&Progress) + Send + Sync + 'static) -> Self {
        self.progress = Some(Box::new(handler));
        self
    }

    fn decode(&self, state: &State, parts: &[Part], sheet: &Sheet, spacing: f64) -> PackingResult {
        let items = state
            .order
            .iter()
            .zip(&state.rotations)
            .map(|(&part_idx, &rot_idx)| {
                let rotation = self.policy.rotations.get(rot_idx).copied().unwrap_or(0.0);
                (&parts[part_idx], rotation)
            })
            .collect::<Vec<_>>();
        place_sequence(&items, sheet, spacing, &self.policy)
    }
}

#[derive(Clone)]
struct State {
    order: Vec<usize>,
    /// Index into the policy's rotation list, per part.
    rotations: Vec<usize>,
}

impl State {
    fn neighbor(&self, n_rotations: usize, rng: &mut SmallRng) -> State {
        let mut next = self.clone();
        let n = next.order.len();
        match rng.random_range(0..3u8) {
            0 => {
                //swap two sequence positions
                let (i, j) = (rng.random_range(0..n), rng.random_range(0..n));
                next.order.swap(i, j);
            }
            1 => {
                //reassign a random part's rotation
                let i = rng.random_range(0..n);
                next.rotations[i] = rng.random_range(0..n_rotations);
            }
            _ => {
                //relocate one part to another position in the sequence
                let from = rng.random_range(0..n);
                let to = rng.random_range(0..n);
                let part = next.order.remove(from);
                let rot = next.rotations.remove(from);
                next.order.insert(to, part);
                next.rotations.insert(to, rot);
            }
        }
        next
    }
}

/// Placement-count dominated fitness: placing one more copy always beats any
/// utilization gain.
pub(crate) fn fitness(result: &PackingResult, total: usize) -> f64 {
    let placed_ratio = result.placements.len() as f64 / total.max(1) as f64;
    placed_ratio * 100.0 + result.utilization * 0.1
}

impl Strategy for Annealer {
    fn pack(
        &self,
        parts: &[Part],
        sheet: &Sheet,
        spacing: f64,
        cancel: &CancelToken,
    ) -> PackingResult {
        if parts.is_empty() {
            return PackingResult::default();
        }
        let start = Instant::now();
        let time_limit = self.config.time_limit_secs.map(Duration::from_secs_f64);
        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        let n_rotations = self.policy.rotations.len().max(1);

        let mut current = State {
            order: (0..parts.len()).collect(),
            rotations: vec![0; parts.len()],
        };
        let mut current_result = self.decode(&current, parts, sheet, spacing);
        let mut current_fitness = fitness(&current_result, parts.len());

        let mut best_result = current_result.clone();
        let mut best_fitness = current_fitness;

        let mut temperature = self.config.initial_temperature;
        let mut improvements = 0usize;

        for iteration in 0..self.config.iterations {
            if cancel.is_cancelled() {
                info!("[SA] cancelled at iteration {iteration}, returning best so far");
                break;
            }
            if let Some(limit) = time_limit
                && start.elapsed() > limit
            {
                info!("[SA] time budget exhausted at iteration {iteration}");
                break;
            }

            for _ in 0..self.config.neighbourhood_size {
                let candidate = current.neighbor(n_rotations, &mut rng);
                let candidate_result = self.decode(&candidate, parts, sheet, spacing);
                let candidate_fitness = fitness(&candidate_result, parts.len());

                let delta = candidate_fitness - current_fitness;
                let accept = delta > 0.0 || rng.random::<f64>() < (delta / temperature).exp();
                if !accept {
                    continue;
                }
                current = candidate;
                current_result = candidate_result;
                current_fitness = candidate_fitness;

                if current_fitness > best_fitness {
                    improvements += 1;
                    best_result = current_result.clone();
                    best_fitness = current_fitness;
                    if let Some(handler) = &self.progress {
                        handler(&Progress {
                            iteration,
                            best_fitness,
                            utilization: best_result.utilization,
                            placements: best_result.placements.clone(),
                        });
                    }
                }
            }

            temperature *= self.config.cooling_rate;
        }

        info!(
            "[SA] finished with {} strict improvements, fitness {:.3}, utilization {:.2}% in {:.3}s",
            improvements,
            best_fitness,
            best_result.utilization,
            start.elapsed().as_secs_f64()
        );
        best_result
    }
}
