use sheetnest::config::{QualityTier, ResolutionPolicy};
use sheetnest::entities::{Part, Sheet};
use sheetnest::geometry::primitives::{Contour, Point};
use sheetnest::opt::GridScanPacker;
use sheetnest::sched::ProductionScheduler;
use sheetnest::util::CancelToken;
use sheetnest::util::assertions;

fn square_part(id: &str, side: f64, quantity: usize) -> Part {
    let contour = Contour::new(vec![
        Point(0.0, 0.0),
        Point(side, 0.0),
        Point(side, side),
        Point(0.0, side),
    ])
    .unwrap();
    Part::new(id, contour, quantity)
}

fn test_policy() -> ResolutionPolicy {
    ResolutionPolicy {
        rotations: vec![0.0, 90.0, 180.0, 270.0],
        step_size: 0.5,
        cells_per_unit: 8.0,
        speed_factor: 1.0,
        tier: QualityTier::Basic,
    }
}

#[test]
fn five_sheet_production_run() {
    let packer = GridScanPacker::new(test_policy());
    let scheduler = ProductionScheduler::new(&packer);
    let sheet = Sheet::new(10.0, 10.0).unwrap();
    let parts = vec![square_part("star", 3.0, 25), square_part("moon", 2.0, 25)];

    let result = scheduler.run(&parts, &sheet, 5, 0.125, &CancelToken::new());

    assert_eq!(result.sheets.len(), 5);
    for sheet_result in &result.sheets {
        assert!(assertions::placements_disjoint(&sheet_result.placements));
        assert!(sheet_result.utilization >= 0.0 && sheet_result.utilization <= 100.0);
    }

    //conservation: never place more copies than requested
    assert!(result.quantities["star"] <= 25);
    assert!(result.quantities["moon"] <= 25);
    let placed_total: usize = result
        .sheets
        .iter()
        .map(|s| s.placements.len())
        .sum();
    assert_eq!(
        placed_total,
        result.quantities.values().sum::<usize>(),
        "per-id quantities must account for every placement"
    );
    assert!(result.total_utilization > 0.0);
}

#[test]
fn quantities_strip_instance_suffixes() {
    let packer = GridScanPacker::new(test_policy());
    let scheduler = ProductionScheduler::new(&packer);
    let sheet = Sheet::new(10.0, 10.0).unwrap();
    let parts = vec![square_part("badge", 2.0, 4)];

    let result = scheduler.run(&parts, &sheet, 1, 0.125, &CancelToken::new());

    assert_eq!(result.quantities.len(), 1);
    assert_eq!(result.quantities["badge"], 4);
    //placement ids keep the instance suffix for traceability
    assert!(
        result.sheets[0]
            .placements
            .iter()
            .all(|p| p.id.starts_with("badge#"))
    );
}

#[test]
fn pack_all_items_retries_across_sheets() {
    let packer = GridScanPacker::new(test_policy());
    let scheduler = ProductionScheduler::new(&packer).pack_all_items(true);
    //only one 6x6 square fits per 8x8 sheet
    let sheet = Sheet::new(8.0, 8.0).unwrap();
    let parts = vec![square_part("big", 6.0, 3)];

    let result = scheduler.run(&parts, &sheet, 3, 0.125, &CancelToken::new());

    assert_eq!(result.sheets.len(), 3);
    assert_eq!(result.quantities["big"], 3);
    for sheet_result in &result.sheets {
        assert_eq!(sheet_result.placements.len(), 1);
    }
}

#[test]
fn infeasible_part_never_appears_in_any_sheet() {
    let packer = GridScanPacker::new(test_policy());
    let scheduler = ProductionScheduler::new(&packer);
    let sheet = Sheet::new(4.0, 4.0).unwrap();
    let parts = vec![square_part("fits", 2.0, 2), square_part("giant", 9.0, 2)];

    let result = scheduler.run(&parts, &sheet, 2, 0.125, &CancelToken::new());

    assert_eq!(result.quantities["giant"], 0);
    assert!(result.quantities["fits"] > 0);
}

#[test]
fn cancelled_production_run_returns_partial_sheets() {
    let packer = GridScanPacker::new(test_policy());
    let scheduler = ProductionScheduler::new(&packer);
    let sheet = Sheet::new(10.0, 10.0).unwrap();
    let parts = vec![square_part("a", 2.0, 10)];

    let cancel = CancelToken::new();
    cancel.cancel();
    let result = scheduler.run(&parts, &sheet, 5, 0.125, &cancel);

    assert!(result.sheets.is_empty());
    assert_eq!(result.quantities["a"], 0);
}
