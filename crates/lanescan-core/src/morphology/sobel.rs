use crate::frame::Mask;
use crate::raster::{mask_from_fn, reflect_101};

/// Horizontal Sobel derivative (x-order 1, y-order 0, 3x3 aperture).
///
///   Gx = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]]
///
/// The border is reflect-101 and the response is saturated to `u8`, so
/// only dark-to-bright transitions (left to right) survive.
pub fn sobel_x(mask: &Mask) -> Mask {
    let (h, w) = mask.dim();
    if h == 0 || w == 0 {
        return mask.clone();
    }

    mask_from_fn(h, w, |row, col| {
        let r0 = reflect_101(row as isize - 1, h);
        let r2 = reflect_101(row as isize + 1, h);
        let c0 = reflect_101(col as isize - 1, w);
        let c2 = reflect_101(col as isize + 1, w);

        let px = |r: usize, c: usize| mask[[r, c]] as i32;
        let gx = -px(r0, c0) + px(r0, c2) - 2 * px(row, c0) + 2 * px(row, c2) - px(r2, c0)
            + px(r2, c2);

        gx.clamp(0, u8::MAX as i32) as u8
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn rising_edge_responds_falling_edge_clamps() {
        // Columns 0..3 dark, 3..6 bright.
        let mask = Array2::from_shape_fn((5, 6), |(_, c)| if c >= 3 { 255u8 } else { 0 });
        let g = sobel_x(&mask);
        for row in 0..5 {
            assert_eq!(g[[row, 2]], 255);
            assert_eq!(g[[row, 3]], 255);
            assert_eq!(g[[row, 0]], 0);
            assert_eq!(g[[row, 5]], 0);
        }

        let inverted = mask.mapv(|v| 255 - v);
        assert!(sobel_x(&inverted).iter().all(|&v| v == 0));
    }

    #[test]
    fn flat_image_has_no_gradient() {
        let mask = Array2::<u8>::from_elem((4, 4), 255);
        assert!(sobel_x(&mask).iter().all(|&v| v == 0));
    }
}
