/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Number of channels in a frame (B, G, R).
pub const COLOR_CHANNEL_COUNT: usize = 3;

/// Value written for foreground pixels in every binary mask.
pub const MASK_FOREGROUND: u8 = 255;

/// Nominal inter-frame interval; also the elapsed-time step per cycle.
pub const FRAME_INTERVAL_MS: u64 = 95;

/// Grayscale binarization threshold. Pixels strictly above it become foreground.
pub const GRAY_THRESHOLD: u8 = 150;

/// Fixed-point BT.601 weights (Q14) for BGR -> gray.
pub const GRAY_WEIGHT_B: u32 = 1868;
pub const GRAY_WEIGHT_G: u32 = 9617;
pub const GRAY_WEIGHT_R: u32 = 4899;
pub const GRAY_SHIFT: u32 = 14;

/// Fixed-point shift of the HSV division tables.
pub const HSV_SHIFT: u32 = 12;

/// Hue range of 8-bit HSV (degrees / 2).
pub const HUE_RANGE: i32 = 180;

/// Inclusive lower HSV bound of the lane-marking paint (H, S, V).
pub const HSV_LOWER: [u8; 3] = [5, 60, 100];

/// Inclusive upper HSV bound of the lane-marking paint (H, S, V).
pub const HSV_UPPER: [u8; 3] = [33, 255, 255];

/// Side length of the elliptical structuring element.
pub const STRUCTURING_ELEMENT_SIZE: usize = 5;

/// Hough distance resolution in pixels.
pub const HOUGH_RHO: f32 = 1.0;

/// Hough angle resolution in radians.
pub const HOUGH_THETA: f32 = std::f32::consts::PI / 180.0;

/// Accumulator votes needed before a line is traced.
pub const HOUGH_VOTE_THRESHOLD: i32 = 30;

/// Minimum traced extent (along x or y) for a segment to be kept.
pub const HOUGH_MIN_LINE_LENGTH: i32 = 30;

/// Maximum run of background pixels bridged while tracing a segment.
pub const HOUGH_MAX_LINE_GAP: i32 = 5;

/// Seed of the detector's point-visiting order.
pub const HOUGH_RNG_SEED: u64 = u64::MAX;

/// Stroke color in frame channel order (B, G, R).
pub const LINE_COLOR_BGR: [u8; 3] = [60, 179, 113];

/// Stroke thickness of drawn segments in pixels.
pub const LINE_THICKNESS: u32 = 7;

/// Elapsed time at which the approach region hands over to the transition region.
pub const TRANSITION_START_MS: u64 = 5000;

/// Elapsed time at which the transition region hands over to the late region.
pub const LATE_START_MS: u64 = 8900;
