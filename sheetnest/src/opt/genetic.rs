use std::time::{Duration, Instant};

use itertools::Itertools;
use log::info;
use ordered_float::NotNan;
use rand::prelude::*;
use rayon::prelude::*;

use crate::config::{GeneticConfig, ResolutionPolicy};
use crate::entities::{PackingResult, Part, Sheet};
use crate::opt::annealing::fitness;
use crate::opt::grid_scan::place_sequence;
use crate::opt::{Progress, ProgressHandler, Strategy};
use crate::util::CancelToken;

/// Genetic algorithm over part orderings and rotation assignments.
///
/// Each individual is a permutation of the parts plus one rotation gene per
/// sequence position, decoded by the shared first-fit decoder. Evolution uses
/// tournament selection, order crossover and swap/rotation mutation, with a
/// fixed number of elites carried over unchanged each generation.
pub struct GeneticNester {
    pub config: GeneticConfig,
    pub policy: ResolutionPolicy,
    seed: Option<u64>,
    progress: Option<ProgressHandler>,
}

impl GeneticNester {
    pub fn new(config: GeneticConfig, policy: ResolutionPolicy, seed: Option<u64>) -> Self {
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

    fn decode(
        &self,
        chromosome: &Chromosome,
        parts: &[Part],
        sheet: &Sheet,
        spacing: f64,
    ) -> PackingResult {
        let items = chromosome
            .order
            .iter()
            .zip(&chromosome.rotations)
            .map(|(&part_idx, &rot_idx)| {
                let rotation = self.policy.rotations.get(rot_idx).copied().unwrap_or(0.0);
                (&parts[part_idx], rotation)
            })
            .collect_vec();
        place_sequence(&items, sheet, spacing, &self.policy)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Chromosome {
    pub order: Vec<usize>,
    /// Rotation gene per sequence position, as an index into the policy's
    /// rotation list.
    pub rotations: Vec<usize>,
    pub fitness: f64,
}

impl Chromosome {
    fn random(n: usize, n_rotations: usize, rng: &mut SmallRng) -> Self {
        let mut order = (0..n).collect_vec();
        order.shuffle(rng);
        let rotations = (0..n).map(|_| rng.random_range(0..n_rotations)).collect();
        Chromosome {
            order,
            rotations,
            fitness: f64::NEG_INFINITY,
        }
    }

    /// Order crossover (OX): a segment of `self` is copied verbatim, the rest
    /// is filled from `other` in its relative order, skipping part ids that
    /// the segment already uses. The skip is the unique-order repair that
    /// keeps every offspring a valid permutation.
    pub(crate) fn order_crossover(&self, other: &Chromosome, rng: &mut SmallRng) -> Chromosome {
        let n = self.order.len();
        if n < 2 {
            return self.clone();
        }

        let (mut lo, mut hi) = (rng.random_range(0..n), rng.random_range(0..n));
        if lo > hi {
            std::mem::swap(&mut lo, &mut hi);
        }

        let mut order = vec![usize::MAX; n];
        let mut used = vec![false; n];
        for i in lo..=hi {
            order[i] = self.order[i];
            used[self.order[i]] = true;
        }

        let mut donor = other.order.iter().filter(|&&id| !used[id]);
        for slot in order.iter_mut() {
            if *slot == usize::MAX {
                *slot = *donor.next().expect("donor exhausted before offspring complete");
            }
        }

        let rotations = self
            .rotations
            .iter()
            .zip(&other.rotations)
            .map(|(&a, &b)| if rng.random() { a } else { b })
            .collect();

        Chromosome {
            order,
            rotations,
            fitness: f64::NEG_INFINITY,
        }
    }

    /// Swaps two sequence positions and reassigns one rotation gene.
    fn mutate(&mut self, n_rotations: usize, rng: &mut SmallRng) {
        let n = self.order.len();
        if n < 2 {
            return;
        }
        let (i, j) = (rng.random_range(0..n), rng.random_range(0..n));
        self.order.swap(i, j);
        let k = rng.random_range(0..n);
        self.rotations[k] = rng.random_range(0..n_rotations);
        self.fitness = f64::NEG_INFINITY;
    }
}

impl Strategy for GeneticNester {
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

        let evaluate = |population: &mut [Chromosome]| {
            population.par_iter_mut().for_each(|individual| {
                if individual.fitness == f64::NEG_INFINITY {
                    let result = self.decode(individual, parts, sheet, spacing);
                    individual.fitness = fitness(&result, parts.len());
                }
            });
        };

        let mut population = (0..self.config.population_size.max(2))
            .map(|_| Chromosome::random(parts.len(), n_rotations, &mut rng))
            .collect_vec();
        evaluate(&mut population);
        sort_by_fitness(&mut population);

        let mut best = population[0].clone();
        let mut generation = 0;

        while generation < self.config.generations {
            if cancel.is_cancelled() {
                info!("[GA] cancelled at generation {generation}, returning best so far");
                break;
            }
            if let Some(limit) = time_limit
                && start.elapsed() > limit
            {
                info!("[GA] time budget exhausted at generation {generation}");
                break;
            }

            let mut next: Vec<Chromosome> = population
                .iter()
                .take(self.config.elite_count.min(population.len()))
                .cloned()
                .collect();

            while next.len() < population.len() {
                let parent_a = tournament(&population, self.config.tournament_size, &mut rng);
                let parent_b = tournament(&population, self.config.tournament_size, &mut rng);
                let mut child = parent_a.order_crossover(parent_b, &mut rng);
                if rng.random::<f64>() < self.config.mutation_rate {
                    child.mutate(n_rotations, &mut rng);
                }
                next.push(child);
            }

            evaluate(&mut next);
            sort_by_fitness(&mut next);
            population = next;

            if population[0].fitness > best.fitness {
                best = population[0].clone();
                if let Some(handler) = &self.progress {
                    let result = self.decode(&best, parts, sheet, spacing);
                    handler(&Progress {
                        iteration: generation,
                        best_fitness: best.fitness,
                        utilization: result.utilization,
                        placements: result.placements,
                    });
                }
            }
            generation += 1;
        }

        let result = self.decode(&best, parts, sheet, spacing);
        info!(
            "[GA] finished after {} generations, fitness {:.3}, utilization {:.2}% in {:.3}s",
            generation,
            best.fitness,
            result.utilization,
            start.elapsed().as_secs_f64()
        );
        result
    }
}

fn sort_by_fitness(population: &mut [Chromosome]) {
    population.sort_by_key(|c| std::cmp::Reverse(NotNan::new(c.fitness).expect("fitness is NaN")));
}

fn tournament<'a>(
    population: &'a [Chromosome],
    size: usize,
    rng: &mut SmallRng,
) -> &'a Chromosome {
    let mut winner = &population[rng.random_range(0..population.len())];
    for _ in 1..size.max(1) {
        let contender = &population[rng.random_range(0..population.len())];
        if contender.fitness > winner.fitness {
            winner = contender;
        }
    }
    winner
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_permutation(order: &[usize]) -> bool {
        let mut sorted = order.to_vec();
        sorted.sort();
        sorted == (0..order.len()).collect_vec()
    }

    #[test]
    fn crossover_offspring_is_a_permutation() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..100 {
            let a = Chromosome::random(12, 4, &mut rng);
            let b = Chromosome::random(12, 4, &mut rng);
            let child = a.order_crossover(&b, &mut rng);
            assert!(is_permutation(&child.order));
            assert_eq!(child.rotations.len(), 12);
        }
    }

    #[test]
    fn mutation_preserves_the_permutation() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut chromosome = Chromosome::random(9, 4, &mut rng);
        for _ in 0..50 {
            chromosome.mutate(4, &mut rng);
            assert!(is_permutation(&chromosome.order));
        }
    }
}
