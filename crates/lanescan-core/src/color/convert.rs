use crate::consts::{
    GRAY_SHIFT, GRAY_WEIGHT_B, GRAY_WEIGHT_G, GRAY_WEIGHT_R, HSV_SHIFT, HUE_RANGE,
};
use crate::frame::{BgrFrame, Mask};
use crate::raster::mask_from_fn;

/// Convert one BGR sample to 8-bit luma (BT.601, Q14 fixed point, rounded).
#[inline]
pub fn gray_sample(b: u8, g: u8, r: u8) -> u8 {
    let acc = b as u32 * GRAY_WEIGHT_B + g as u32 * GRAY_WEIGHT_G + r as u32 * GRAY_WEIGHT_R;
    ((acc + (1 << (GRAY_SHIFT - 1))) >> GRAY_SHIFT) as u8
}

/// Convert a BGR frame to an 8-bit grayscale image.
pub fn to_gray(frame: &BgrFrame) -> Mask {
    let data = &frame.data;
    mask_from_fn(frame.height(), frame.width(), |row, col| {
        gray_sample(data[[row, col, 0]], data[[row, col, 1]], data[[row, col, 2]])
    })
}

/// Division tables for the integer RGB -> HSV conversion.
///
/// `sdiv[v] = round(255 * 2^12 / v)` and `hdiv[d] = round(180 * 2^12 / (6 d))`,
/// both zero at index 0.
pub struct HsvTables {
    sdiv: [i32; 256],
    hdiv: [i32; 256],
}

impl HsvTables {
    pub fn new() -> Self {
        let mut sdiv = [0i32; 256];
        let mut hdiv = [0i32; 256];
        for i in 1..256usize {
            sdiv[i] = ((255 << HSV_SHIFT) as f64 / i as f64).round() as i32;
            hdiv[i] = ((HUE_RANGE << HSV_SHIFT) as f64 / (6.0 * i as f64)).round() as i32;
        }
        Self { sdiv, hdiv }
    }

    /// Convert one BGR sample to `[h, s, v]` with h in [0, 180).
    pub fn hsv_sample(&self, b: u8, g: u8, r: u8) -> [u8; 3] {
        let (b, g, r) = (b as i32, g as i32, r as i32);
        let v = b.max(g).max(r);
        let vmin = b.min(g).min(r);
        let diff = v - vmin;
        let round = 1 << (HSV_SHIFT - 1);

        let s = (diff * self.sdiv[v as usize] + round) >> HSV_SHIFT;

        let h = if v == r {
            g - b
        } else if v == g {
            b - r + 2 * diff
        } else {
            r - g + 4 * diff
        };
        let mut h = (h * self.hdiv[diff as usize] + round) >> HSV_SHIFT;
        if h < 0 {
            h += HUE_RANGE;
        }

        [h as u8, s as u8, v as u8]
    }
}

impl Default for HsvTables {
    fn default() -> Self {
        Self::new()
    }
}
