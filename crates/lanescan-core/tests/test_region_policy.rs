use lanescan_core::consts::FRAME_INTERVAL_MS;
use lanescan_core::frame::{Point, Roi};
use lanescan_core::region::{select_regions, MaskSource, RegionBranch};

fn branches(t: u64) -> Vec<RegionBranch> {
    select_regions(t).into_iter().map(|r| r.branch).collect()
}

// ---------------------------------------------------------------------------
// Timeline branches
// ---------------------------------------------------------------------------

#[test]
fn test_approach_window() {
    for t in [0, 95, 2500, 4999] {
        assert_eq!(
            branches(t),
            vec![RegionBranch::Baseline, RegionBranch::Approach],
            "t = {t}"
        );
    }
}

#[test]
fn test_transition_window() {
    for t in [5000, 5001, 7000, 8899] {
        assert_eq!(
            branches(t),
            vec![RegionBranch::Baseline, RegionBranch::Transition],
            "t = {t}"
        );
    }
}

#[test]
fn test_late_window() {
    for t in [8900, 8901, 60_000, u64::MAX] {
        assert_eq!(
            branches(t),
            vec![RegionBranch::Baseline, RegionBranch::Late],
            "t = {t}"
        );
    }
}

#[test]
fn test_exactly_one_timed_branch_per_cycle() {
    for cycle in 0..200u64 {
        let regions = select_regions(cycle * FRAME_INTERVAL_MS);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].branch, RegionBranch::Baseline);
        assert_ne!(regions[1].branch, RegionBranch::Baseline);
    }
}

// ---------------------------------------------------------------------------
// Geometry and mask sources
// ---------------------------------------------------------------------------

#[test]
fn test_region_geometry() {
    let roi = |a: (i32, i32), b: (i32, i32)| {
        Roi::from_corners(Point::new(a.0, a.1), Point::new(b.0, b.1))
    };
    assert_eq!(RegionBranch::Baseline.roi(), roi((135, 350), (280, 576)));
    assert_eq!(RegionBranch::Approach.roi(), roi((500, 350), (600, 480)));
    assert_eq!(RegionBranch::Transition.roi(), roi((460, 420), (720, 576)));
    assert_eq!(RegionBranch::Late.roi(), roi((485, 420), (720, 576)));

    let base = RegionBranch::Baseline.roi();
    assert_eq!((base.x, base.y, base.width, base.height), (135, 350, 145, 226));
}

#[test]
fn test_only_late_reads_threshold_mask() {
    assert_eq!(RegionBranch::Baseline.source(), MaskSource::Closed);
    assert_eq!(RegionBranch::Approach.source(), MaskSource::Closed);
    assert_eq!(RegionBranch::Transition.source(), MaskSource::Closed);
    assert_eq!(RegionBranch::Late.source(), MaskSource::Threshold);

    let late = select_regions(9000);
    assert_eq!(late[0].source, MaskSource::Closed);
    assert_eq!(late[1].source, MaskSource::Threshold);
}

#[test]
fn test_corner_order_is_normalized() {
    let a = Roi::from_corners(Point::new(280, 576), Point::new(135, 350));
    assert_eq!(a, RegionBranch::Baseline.roi());
    assert_eq!(a.to_string(), "(135,350)-(280,576)");
}
