use crate::frame::Mask;
use crate::raster::mask_from_fn;

use super::kernel::StructuringElement;

/// Grayscale erosion: minimum over the structuring element.
///
/// Neighbors outside the image are skipped, so borders are not eaten away.
pub fn erode(mask: &Mask, se: &StructuringElement) -> Mask {
    let (h, w) = mask.dim();
    mask_from_fn(h, w, |row, col| {
        neighborhood(mask, se, row, col).min().unwrap_or(mask[[row, col]])
    })
}

/// Grayscale dilation: maximum over the structuring element.
///
/// Neighbors outside the image are skipped.
pub fn dilate(mask: &Mask, se: &StructuringElement) -> Mask {
    let (h, w) = mask.dim();
    mask_from_fn(h, w, |row, col| {
        neighborhood(mask, se, row, col).max().unwrap_or(mask[[row, col]])
    })
}

fn neighborhood<'a>(
    mask: &'a Mask,
    se: &'a StructuringElement,
    row: usize,
    col: usize,
) -> impl Iterator<Item = u8> + 'a {
    let (h, w) = mask.dim();
    se.offsets().iter().filter_map(move |&(dr, dc)| {
        let nr = row as isize + dr;
        let nc = col as isize + dc;
        if nr < 0 || nr >= h as isize || nc < 0 || nc >= w as isize {
            None
        } else {
            Some(mask[[nr as usize, nc as usize]])
        }
    })
}
