use std::sync::Arc;
use std::sync::Mutex;

use sheetnest::config::{AnnealingConfig, GeneticConfig, QualityTier, ResolutionPolicy};
use sheetnest::entities::{Part, Sheet};
use sheetnest::geometry::primitives::{Contour, Point};
use sheetnest::opt::{Annealer, GeneticNester, NfpNester, Strategy};
use sheetnest::sched::ProductionScheduler;
use sheetnest::util::CancelToken;
use sheetnest::util::assertions;

fn rect_part(id: &str, w: f64, h: f64, quantity: usize) -> Part {
    let contour = Contour::new(vec![
        Point(0.0, 0.0),
        Point(w, 0.0),
        Point(w, h),
        Point(0.0, h),
    ])
    .unwrap();
    Part::new(id, contour, quantity)
}

fn test_policy() -> ResolutionPolicy {
    ResolutionPolicy {
        rotations: vec![0.0, 90.0],
        step_size: 0.5,
        cells_per_unit: 8.0,
        speed_factor: 1.0,
        tier: QualityTier::Basic,
    }
}

fn small_annealing() -> AnnealingConfig {
    AnnealingConfig {
        initial_temperature: 10.0,
        cooling_rate: 0.9,
        iterations: 15,
        neighbourhood_size: 2,
        time_limit_secs: None,
    }
}

fn small_genetic() -> GeneticConfig {
    GeneticConfig {
        population_size: 8,
        generations: 6,
        mutation_rate: 0.3,
        elite_count: 2,
        tournament_size: 2,
        time_limit_secs: None,
    }
}

fn parts_for_strategies() -> Vec<Part> {
    vec![
        rect_part("a", 3.0, 2.0, 1),
        rect_part("b", 2.0, 2.0, 1),
        rect_part("c", 4.0, 1.0, 1),
    ]
}

#[test]
fn nfp_nester_packs_without_overlap() {
    let nester = NfpNester::new(test_policy());
    let sheet = Sheet::new(10.0, 10.0).unwrap();
    let parts = parts_for_strategies();

    let result = nester.pack(&parts, &sheet, 0.125, &CancelToken::new());

    assert_eq!(result.placements.len(), 3);
    assert!(result.unplaced_ids.is_empty());
    assert!(assertions::placements_disjoint(&result.placements));
    assert!(result.utilization > 0.0);
}

#[test]
fn nfp_nester_reports_oversized_parts() {
    let nester = NfpNester::new(test_policy());
    let sheet = Sheet::new(3.0, 3.0).unwrap();
    let parts = vec![rect_part("wide", 20.0, 20.0, 1)];

    let result = nester.pack(&parts, &sheet, 0.125, &CancelToken::new());

    assert!(result.placements.is_empty());
    assert_eq!(result.unplaced_ids, vec!["wide".to_string()]);
}

#[test]
fn annealer_produces_a_valid_packing() {
    let annealer = Annealer::new(small_annealing(), test_policy(), Some(42));
    let sheet = Sheet::new(10.0, 10.0).unwrap();
    let parts = parts_for_strategies();

    let result = annealer.pack(&parts, &sheet, 0.125, &CancelToken::new());

    assert_eq!(result.placements.len(), 3);
    assert!(assertions::placements_disjoint(&result.placements));
    assert!(result.utilization > 0.0 && result.utilization <= 100.0);
}

#[test]
fn annealer_is_deterministic_with_a_seed() {
    let sheet = Sheet::new(10.0, 10.0).unwrap();
    let parts = parts_for_strategies();

    let run = |seed| {
        Annealer::new(small_annealing(), test_policy(), Some(seed))
            .pack(&parts, &sheet, 0.125, &CancelToken::new())
    };
    let (first, second) = (run(7), run(7));

    assert_eq!(first.placements.len(), second.placements.len());
    for (a, b) in first.placements.iter().zip(&second.placements) {
        assert_eq!((a.x, a.y, a.rotation, &a.id), (b.x, b.y, b.rotation, &b.id));
    }
}

#[test]
fn genetic_nester_produces_a_valid_packing() {
    let nester = GeneticNester::new(small_genetic(), test_policy(), Some(3));
    let sheet = Sheet::new(10.0, 10.0).unwrap();
    let parts = parts_for_strategies();

    let result = nester.pack(&parts, &sheet, 0.125, &CancelToken::new());

    assert_eq!(result.placements.len(), 3);
    assert!(assertions::placements_disjoint(&result.placements));
}

#[test]
fn genetic_nester_emits_progress_on_improvement() {
    let improvements = Arc::new(Mutex::new(Vec::new()));
    let sink = improvements.clone();
    let nester = GeneticNester::new(small_genetic(), test_policy(), Some(5)).with_progress(
        move |progress| {
            sink.lock().unwrap().push(progress.best_fitness);
        },
    );
    let sheet = Sheet::new(10.0, 10.0).unwrap();
    let parts = parts_for_strategies();

    let result = nester.pack(&parts, &sheet, 0.125, &CancelToken::new());

    //progress is advisory; the result stands on its own
    assert_eq!(result.placements.len(), 3);
    let seen = improvements.lock().unwrap();
    for window in seen.windows(2) {
        assert!(window[1] > window[0], "fitness reports must be improving");
    }
}

#[test]
fn cancelled_metaheuristics_return_best_so_far() {
    let sheet = Sheet::new(10.0, 10.0).unwrap();
    let parts = parts_for_strategies();
    let cancel = CancelToken::new();
    cancel.cancel();

    let sa = Annealer::new(small_annealing(), test_policy(), Some(1))
        .pack(&parts, &sheet, 0.125, &cancel);
    let ga = GeneticNester::new(small_genetic(), test_policy(), Some(1))
        .pack(&parts, &sheet, 0.125, &cancel);

    //the initial decode is still a complete, valid result
    assert!(assertions::placements_disjoint(&sa.placements));
    assert!(assertions::placements_disjoint(&ga.placements));
}

#[test]
fn scheduler_accepts_any_strategy() {
    let nester = NfpNester::new(test_policy());
    let scheduler = ProductionScheduler::new(&nester);
    let sheet = Sheet::new(8.0, 8.0).unwrap();
    let parts = vec![rect_part("tile", 2.0, 2.0, 6)];

    let result = scheduler.run(&parts, &sheet, 2, 0.125, &CancelToken::new());

    assert_eq!(result.sheets.len(), 2);
    assert!(result.quantities["tile"] <= 6);
    for sheet_result in &result.sheets {
        assert!(assertions::placements_disjoint(&sheet_result.placements));
    }
}
