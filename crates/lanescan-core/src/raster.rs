use ndarray::Array2;
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::frame::Mask;

/// Build a `(height, width)` mask by evaluating `f(row, col)` for every pixel.
///
/// Rows are split across the Rayon pool once the image is large enough.
pub(crate) fn mask_from_fn<F>(height: usize, width: usize, f: F) -> Mask
where
    F: Fn(usize, usize) -> u8 + Sync,
{
    if height * width < PARALLEL_PIXEL_THRESHOLD {
        return Array2::from_shape_fn((height, width), |(row, col)| f(row, col));
    }

    let rows: Vec<Vec<u8>> = (0..height)
        .into_par_iter()
        .map(|row| (0..width).map(|col| f(row, col)).collect())
        .collect();

    let mut result = Array2::<u8>::zeros((height, width));
    for (row, row_data) in rows.into_iter().enumerate() {
        for (col, val) in row_data.into_iter().enumerate() {
            result[[row, col]] = val;
        }
    }
    result
}

/// Reflect-101 border index: `-1 -> 1`, `len -> len - 2`.
#[inline]
pub(crate) fn reflect_101(index: isize, len: usize) -> usize {
    let len = len as isize;
    if len == 1 {
        return 0;
    }
    let mut i = index;
    while i < 0 || i >= len {
        i = if i < 0 { -i } else { 2 * len - i - 2 };
    }
    i as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflect_101_mirrors_without_repeating_edge() {
        assert_eq!(reflect_101(-1, 5), 1);
        assert_eq!(reflect_101(-2, 5), 2);
        assert_eq!(reflect_101(5, 5), 3);
        assert_eq!(reflect_101(6, 5), 2);
        assert_eq!(reflect_101(2, 5), 2);
        assert_eq!(reflect_101(-1, 1), 0);
    }

    #[test]
    fn mask_from_fn_matches_serial_for_large_images() {
        let (h, w) = (300, 300);
        let mask = mask_from_fn(h, w, |r, c| ((r * 7 + c * 3) % 251) as u8);
        for (r, c) in [(0, 0), (150, 17), (299, 299)] {
            assert_eq!(mask[[r, c]], ((r * 7 + c * 3) % 251) as u8);
        }
    }
}
