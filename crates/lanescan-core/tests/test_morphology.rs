mod common;

use common::vertical_line_mask;
use lanescan_core::frame::{Mask, Point, Roi};
use lanescan_core::lines::LineExtractor;
use lanescan_core::morphology::{dilate, erode, sobel_x, GradientMorphologyStage};

const H: usize = 160;
const W: usize = 100;

/// Thin line in column 40, rows 20..120, plus an isolated pixel at (80, 80).
fn line_and_noise() -> Mask {
    let mut mask = vertical_line_mask(H, W, 40, 20..120);
    mask[[80, 80]] = 255;
    mask
}

fn full_frame() -> Roi {
    Roi::from_corners(Point::new(0, 0), Point::new(W as i32, H as i32))
}

// ---------------------------------------------------------------------------
// Gradient
// ---------------------------------------------------------------------------

#[test]
fn test_gradient_sits_left_of_a_thin_line() {
    let gradient = sobel_x(&vertical_line_mask(H, W, 40, 20..120));
    for row in 19..=120 {
        assert_eq!(gradient[[row, 39]], 255, "row {row}");
    }
    assert!(gradient.column(40).iter().all(|&v| v == 0));
    assert!(gradient.column(41).iter().all(|&v| v == 0));
    assert_eq!(gradient[[17, 39]], 0);
    assert_eq!(gradient[[122, 39]], 0);
}

// ---------------------------------------------------------------------------
// Composition order
// ---------------------------------------------------------------------------

#[test]
fn test_closed_is_erode_of_dilate() {
    let stage = GradientMorphologyStage::new();
    let masks = stage.apply(&line_and_noise());

    let se = stage.element();
    assert_eq!(masks.closed, erode(&dilate(&masks.gradient, se), se));
    assert_eq!(masks.opened, dilate(&erode(&masks.gradient, se), se));
}

#[test]
fn test_thin_line_survives_closing_and_is_detected() {
    let masks = GradientMorphologyStage::new().apply(&line_and_noise());

    for row in 19..=120 {
        assert_eq!(masks.closed[[row, 39]], 255, "row {row}");
    }

    let segments = LineExtractor::default()
        .extract_region(&masks.closed, &full_frame())
        .unwrap();
    assert!(!segments.is_empty());
    let long = segments.iter().any(|s| {
        (s.start.x - 39).abs() <= 1
            && (s.end.x - 39).abs() <= 1
            && (s.end.y - s.start.y).abs() >= 90
    });
    assert!(long, "{segments:?}");
}

#[test]
fn test_thin_line_is_erased_by_opening() {
    let masks = GradientMorphologyStage::new().apply(&line_and_noise());
    assert!(masks.opened.iter().all(|&v| v == 0));
}

#[test]
fn test_noise_pixel_never_yields_a_segment() {
    let masks = GradientMorphologyStage::new().apply(&line_and_noise());
    let segments = LineExtractor::default()
        .extract_region(&masks.closed, &full_frame())
        .unwrap();
    for s in &segments {
        assert!(s.start.x < 60 && s.end.x < 60, "segment from noise: {s:?}");
    }

    // The noise pixel alone gives nothing at all.
    let mut noise = Mask::zeros((H, W));
    noise[[80, 80]] = 255;
    let masks = GradientMorphologyStage::new().apply(&noise);
    let segments = LineExtractor::default()
        .extract_region(&masks.closed, &full_frame())
        .unwrap();
    assert!(segments.is_empty(), "{segments:?}");
}

#[test]
fn test_closing_bridges_a_small_gap() {
    // Column 20 broken over rows 60..64; the gradient gap is rows 61 and 62.
    let mut mask = vertical_line_mask(H, W, 20, 10..60);
    for row in 64..140 {
        mask[[row, 20]] = 255;
    }
    let masks = GradientMorphologyStage::new().apply(&mask);

    assert_eq!(masks.gradient[[61, 19]], 0);
    assert_eq!(masks.gradient[[62, 19]], 0);
    assert_eq!(masks.closed[[61, 19]], 255);
    assert_eq!(masks.closed[[62, 19]], 255);
}

#[test]
fn test_closing_keeps_every_gradient_pixel() {
    let masks = GradientMorphologyStage::new().apply(&line_and_noise());
    for (g, c) in masks.gradient.iter().zip(masks.closed.iter()) {
        if *g != 0 {
            assert_eq!(*c, 255);
        }
    }
}

#[test]
fn test_empty_mask_stays_empty() {
    let masks = GradientMorphologyStage::new().apply(&Mask::zeros((32, 32)));
    assert!(masks.gradient.iter().all(|&v| v == 0));
    assert!(masks.closed.iter().all(|&v| v == 0));
    assert!(masks.opened.iter().all(|&v| v == 0));
}
