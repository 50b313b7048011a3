use sheetnest::config::{QualityTier, ResolutionPolicy};
use sheetnest::entities::{Part, Sheet};
use sheetnest::geometry::primitives::{Contour, Point};
use sheetnest::opt::{GridScanPacker, Strategy};
use sheetnest::util::CancelToken;
use sheetnest::util::assertions;
use test_case::test_case;

fn rect_part(id: &str, w: f64, h: f64) -> Part {
    let contour = Contour::new(vec![
        Point(0.0, 0.0),
        Point(w, 0.0),
        Point(w, h),
        Point(0.0, h),
    ])
    .unwrap();
    Part::new(id, contour, 1)
}

fn triangle_part(id: &str, base: f64, height: f64) -> Part {
    let contour = Contour::new(vec![
        Point(0.0, 0.0),
        Point(base, 0.0),
        Point(base / 2.0, height),
    ])
    .unwrap();
    Part::new(id, contour, 1)
}

/// Coarse policy keeping test runtimes reasonable.
fn test_policy(rotations: Vec<f64>) -> ResolutionPolicy {
    ResolutionPolicy {
        rotations,
        step_size: 0.25,
        cells_per_unit: 8.0,
        speed_factor: 1.0,
        tier: QualityTier::Basic,
    }
}

#[test]
fn single_square_on_a_roomy_sheet() {
    let packer = GridScanPacker::new(test_policy(vec![0.0, 90.0, 180.0, 270.0]));
    let sheet = Sheet::new(12.0, 12.0).unwrap();
    let parts = vec![rect_part("square", 2.0, 2.0)];

    let result = packer.pack(&parts, &sheet, 0.0625, &CancelToken::new());

    assert_eq!(result.placements.len(), 1);
    assert!(result.unplaced_ids.is_empty());
    assert!(result.utilization > 0.0 && result.utilization <= 100.0);
}

#[test]
fn long_part_fits_only_rotated() {
    let packer = GridScanPacker::new(test_policy(vec![0.0, 90.0]));
    let sheet = Sheet::new(3.0, 12.0).unwrap();
    let parts = vec![rect_part("strip", 10.0, 2.0)];

    let result = packer.pack(&parts, &sheet, 0.0625, &CancelToken::new());

    assert_eq!(result.placements.len(), 1);
    assert!(result.unplaced_ids.is_empty());
    assert_eq!(result.placements[0].rotation, 90.0);
}

#[test]
fn oversized_part_is_reported_unplaced() {
    let packer = GridScanPacker::new(test_policy(vec![0.0, 90.0, 180.0, 270.0]));
    let sheet = Sheet::new(2.0, 2.0).unwrap();
    let parts = vec![rect_part("huge", 10.0, 10.0)];

    let result = packer.pack(&parts, &sheet, 0.0625, &CancelToken::new());

    assert!(result.placements.is_empty());
    assert_eq!(result.unplaced_ids, vec!["huge".to_string()]);
    assert_eq!(result.utilization, 0.0);
}

#[test]
fn empty_input_yields_empty_result() {
    let packer = GridScanPacker::new(test_policy(vec![0.0]));
    let sheet = Sheet::new(12.0, 12.0).unwrap();

    let result = packer.pack(&[], &sheet, 0.0625, &CancelToken::new());

    assert!(result.placements.is_empty());
    assert!(result.unplaced_ids.is_empty());
    assert_eq!(result.utilization, 0.0);
}

#[test_case(0.0; "no spacing")]
#[test_case(0.25; "quarter unit spacing")]
fn mixed_parts_never_overlap(spacing: f64) {
    let packer = GridScanPacker::new(test_policy(vec![0.0, 90.0, 180.0, 270.0]));
    let sheet = Sheet::new(12.0, 12.0).unwrap();
    let parts = vec![
        rect_part("a", 3.0, 2.0),
        rect_part("b", 2.0, 2.0),
        triangle_part("c", 3.0, 3.0),
        rect_part("d", 4.0, 1.0),
        triangle_part("e", 2.0, 2.0),
    ];

    let result = packer.pack(&parts, &sheet, spacing, &CancelToken::new());

    assert_eq!(result.placements.len(), 5);
    assert!(assertions::placements_disjoint(&result.placements));
    let n_cells = (12.0 * 8.0) as usize;
    assert!(assertions::placements_within_bounds(
        &result.placements,
        n_cells,
        n_cells
    ));
}

#[test]
fn failure_of_one_part_does_not_abort_the_run() {
    let packer = GridScanPacker::new(test_policy(vec![0.0]));
    let sheet = Sheet::new(6.0, 6.0).unwrap();
    let parts = vec![
        rect_part("fits1", 2.0, 2.0),
        rect_part("too-big", 10.0, 10.0),
        rect_part("fits2", 2.0, 2.0),
    ];

    let result = packer.pack(&parts, &sheet, 0.0625, &CancelToken::new());

    assert_eq!(result.placements.len(), 2);
    assert_eq!(result.unplaced_ids, vec!["too-big".to_string()]);
}

#[test]
fn metrics_are_observational() {
    let policy = test_policy(vec![0.0, 90.0]);
    let sheet = Sheet::new(12.0, 12.0).unwrap();
    let parts = vec![rect_part("a", 2.0, 2.0), rect_part("b", 3.0, 1.0)];
    let cancel = CancelToken::new();

    let plain = GridScanPacker::new(policy.clone()).pack(&parts, &sheet, 0.0625, &cancel);
    let tracked = GridScanPacker::new(policy)
        .track_metrics(true)
        .pack(&parts, &sheet, 0.0625, &cancel);

    let metrics = tracked.metrics.expect("metrics requested");
    assert!(metrics.positions_tried > 0);
    assert_eq!(metrics.n_rotations, 2);

    //metrics collection must not change placement decisions
    assert_eq!(plain.placements.len(), tracked.placements.len());
    for (p, t) in plain.placements.iter().zip(&tracked.placements) {
        assert_eq!((p.x, p.y, p.rotation), (t.x, t.y, t.rotation));
    }
}

#[test]
fn cancelled_run_returns_best_so_far() {
    let packer = GridScanPacker::new(test_policy(vec![0.0]));
    let sheet = Sheet::new(12.0, 12.0).unwrap();
    let parts = vec![rect_part("a", 2.0, 2.0), rect_part("b", 2.0, 2.0)];

    let cancel = CancelToken::new();
    cancel.cancel();
    let result = packer.pack(&parts, &sheet, 0.0625, &cancel);

    assert!(result.placements.is_empty());
    assert_eq!(result.unplaced_ids.len(), 2);
}
