mod common;

use common::{ASPHALT_BGR, PAINT_BGR};
use lanescan_core::color::{threshold_mask, to_gray, ColorSegmenter, HsvTables};
use lanescan_core::error::LaneScanError;
use lanescan_core::frame::BgrFrame;

// ---------------------------------------------------------------------------
// Grayscale threshold
// ---------------------------------------------------------------------------

#[test]
fn test_threshold_is_strictly_above_150() {
    let mut frame = BgrFrame::filled(1, 3, [150, 150, 150]);
    frame.set_pixel(1, 0, [151, 151, 151]);
    frame.set_pixel(2, 0, [255, 255, 255]);

    let gray = to_gray(&frame);
    assert_eq!(gray[[0, 0]], 150);
    assert_eq!(gray[[0, 1]], 151);

    let mask = threshold_mask(&frame);
    assert_eq!(mask[[0, 0]], 0, "150 is background");
    assert_eq!(mask[[0, 1]], 255);
    assert_eq!(mask[[0, 2]], 255);
}

#[test]
fn test_threshold_mask_is_binary() {
    let frame = BgrFrame::filled(4, 4, [200, 10, 90]);
    let mask = threshold_mask(&frame);
    assert!(mask.iter().all(|&v| v == 0 || v == 255));
}

// ---------------------------------------------------------------------------
// HSV range
// ---------------------------------------------------------------------------

#[test]
fn test_paint_passes_both_masks() {
    let hsv = HsvTables::new().hsv_sample(PAINT_BGR[0], PAINT_BGR[1], PAINT_BGR[2]);
    assert!((5..=33).contains(&hsv[0]), "hue {}", hsv[0]);
    assert!(hsv[1] >= 60);
    assert!(hsv[2] >= 100);

    let masks = ColorSegmenter::new()
        .segment(&BgrFrame::filled(2, 2, PAINT_BGR))
        .unwrap();
    assert!(masks.hsv.iter().all(|&v| v == 255));
    assert!(masks.threshold.iter().all(|&v| v == 255));
}

#[test]
fn test_hsv_rejects_other_colors() {
    let segmenter = ColorSegmenter::new();
    // Asphalt, sky blue, grass green, white.
    for bgr in [ASPHALT_BGR, [230, 160, 90], [40, 200, 40], [255, 255, 255]] {
        let mask = segmenter.hsv_range_mask(&BgrFrame::filled(1, 1, bgr));
        assert_eq!(mask[[0, 0]], 0, "{bgr:?}");
    }
}

#[test]
fn test_hsv_value_floor_is_inclusive() {
    // Pure orange hue with V exactly 100: B=0, G=55, R=100 -> H=17, S=255, V=100.
    let tables = HsvTables::new();
    let hsv = tables.hsv_sample(0, 55, 100);
    assert_eq!(hsv[2], 100);
    assert_eq!(hsv[1], 255);

    let segmenter = ColorSegmenter::new();
    assert_eq!(segmenter.hsv_range_mask(&BgrFrame::filled(1, 1, [0, 55, 100]))[[0, 0]], 255);
    assert_eq!(segmenter.hsv_range_mask(&BgrFrame::filled(1, 1, [0, 54, 99]))[[0, 0]], 0);
}

#[test]
fn test_masks_match_frame_size() {
    let frame = BgrFrame::filled(7, 11, PAINT_BGR);
    let masks = ColorSegmenter::new().segment(&frame).unwrap();
    assert_eq!(masks.hsv.dim(), (7, 11));
    assert_eq!(masks.threshold.dim(), (7, 11));
}

#[test]
fn test_empty_frame_is_rejected() {
    let err = ColorSegmenter::new().segment(&BgrFrame::empty()).unwrap_err();
    assert!(matches!(err, LaneScanError::EmptyFrame));
    assert!(!err.is_processing_fault());
}
