mod common;

use common::{FRAME_HEIGHT, FRAME_WIDTH};
use lanescan_core::error::LaneScanError;
use lanescan_core::frame::{LineSegment, Mask, Point};
use lanescan_core::lines::{hough_lines_p, HoughParams, LineExtractor};
use lanescan_core::region::RegionBranch;

const ALL_BRANCHES: [RegionBranch; 4] = [
    RegionBranch::Baseline,
    RegionBranch::Approach,
    RegionBranch::Transition,
    RegionBranch::Late,
];

fn horizontal_run(mask: &mut Mask, row: i32, cols: std::ops::Range<i32>) {
    for col in cols {
        mask[[row as usize, col as usize]] = 255;
    }
}

fn span(s: &LineSegment) -> ((i32, i32), (i32, i32)) {
    let (a, b) = if s.start.x <= s.end.x { (s.start, s.end) } else { (s.end, s.start) };
    ((a.x, a.y), (b.x, b.y))
}

// ---------------------------------------------------------------------------
// Translation into frame coordinates
// ---------------------------------------------------------------------------

#[test]
fn test_translation_is_exact_for_every_region() {
    let extractor = LineExtractor::default();
    for branch in ALL_BRANCHES {
        let roi = branch.roi();
        let mut mask = Mask::zeros((FRAME_HEIGHT, FRAME_WIDTH));
        let row = roi.y + 20;
        horizontal_run(&mut mask, row, roi.x + 10..roi.x + 70);

        let segments = extractor.extract_region(&mask, &roi).unwrap();
        assert_eq!(segments.len(), 1, "{branch}: {segments:?}");
        assert_eq!(span(&segments[0]), ((roi.x + 10, row), (roi.x + 69, row)), "{branch}");

        // Same detection in crop coordinates, shifted by the origin.
        let crop = roi.crop(&mask).unwrap();
        let raw = hough_lines_p(crop, extractor.params());
        assert_eq!(raw.len(), 1);
        assert_eq!(raw[0].translated(roi.origin()), segments[0]);
        assert_eq!(span(&raw[0]), ((10, 20), (69, 20)));
    }
}

#[test]
fn test_extract_adds_origin_to_both_endpoints() {
    let mut crop = Mask::zeros((60, 80));
    for i in 0..50 {
        crop[[5 + i, 10 + i]] = 255;
    }
    let extractor = LineExtractor::default();
    let local = extractor.extract(crop.view(), Point::new(0, 0));
    let shifted = extractor.extract(crop.view(), Point::new(135, 350));
    assert!(!local.is_empty());
    assert_eq!(local.len(), shifted.len());
    for (l, s) in local.iter().zip(&shifted) {
        assert_eq!(s.start, Point::new(l.start.x + 135, l.start.y + 350));
        assert_eq!(s.end, Point::new(l.end.x + 135, l.end.y + 350));
    }
}

// ---------------------------------------------------------------------------
// Outcomes that are not detections
// ---------------------------------------------------------------------------

#[test]
fn test_blank_region_yields_no_segments() {
    let mask = Mask::zeros((FRAME_HEIGHT, FRAME_WIDTH));
    for branch in ALL_BRANCHES {
        let segments = LineExtractor::default()
            .extract_region(&mask, &branch.roi())
            .unwrap();
        assert!(segments.is_empty(), "{branch}");
    }
}

#[test]
fn test_region_outside_mask_is_a_processing_fault() {
    let mask = Mask::zeros((100, 100));
    let err = LineExtractor::default()
        .extract_region(&mask, &RegionBranch::Baseline.roi())
        .unwrap_err();
    assert!(matches!(err, LaneScanError::RoiOutOfBounds { .. }));
    assert!(err.is_processing_fault());
}

#[test]
fn test_extraction_is_deterministic_within_a_run() {
    let mut mask = Mask::zeros((FRAME_HEIGHT, FRAME_WIDTH));
    for i in 0..150 {
        mask[[360 + i, 140 + i / 2]] = 255;
        mask[[400 + i / 3, 150 + i / 2]] = 255;
    }
    let extractor = LineExtractor::new(HoughParams::default());
    let roi = RegionBranch::Baseline.roi();
    assert_eq!(
        extractor.extract_region(&mask, &roi).unwrap(),
        extractor.extract_region(&mask, &roi).unwrap()
    );
}
