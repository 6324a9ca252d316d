use tracing::debug;

use crate::consts::{GRAY_THRESHOLD, HSV_LOWER, HSV_UPPER, MASK_FOREGROUND};
use crate::error::{LaneScanError, Result};
use crate::frame::{BgrFrame, Mask};
use crate::raster::mask_from_fn;

use super::convert::{gray_sample, HsvTables};

/// The two masks derived from one frame.
#[derive(Clone, Debug)]
pub struct SegmentedMasks {
    /// Grayscale binarized at [`GRAY_THRESHOLD`].
    pub threshold: Mask,
    /// Pixels whose HSV value falls inside the paint color range.
    pub hsv: Mask,
}

/// Splits a frame into a brightness mask and a paint-color mask.
pub struct ColorSegmenter {
    tables: HsvTables,
}

impl ColorSegmenter {
    pub fn new() -> Self {
        Self {
            tables: HsvTables::new(),
        }
    }

    pub fn segment(&self, frame: &BgrFrame) -> Result<SegmentedMasks> {
        if frame.is_empty() {
            return Err(LaneScanError::EmptyFrame);
        }
        let threshold = threshold_mask(frame);
        let hsv = self.hsv_range_mask(frame);
        debug!(
            width = frame.width(),
            height = frame.height(),
            "Segmented frame into threshold and HSV masks"
        );
        Ok(SegmentedMasks { threshold, hsv })
    }

    /// 255 where every HSV channel lies inside its inclusive bound.
    pub fn hsv_range_mask(&self, frame: &BgrFrame) -> Mask {
        let data = &frame.data;
        mask_from_fn(frame.height(), frame.width(), |row, col| {
            let hsv = self.tables.hsv_sample(
                data[[row, col, 0]],
                data[[row, col, 1]],
                data[[row, col, 2]],
            );
            let inside = (0..3).all(|c| hsv[c] >= HSV_LOWER[c] && hsv[c] <= HSV_UPPER[c]);
            if inside {
                MASK_FOREGROUND
            } else {
                0
            }
        })
    }
}

impl Default for ColorSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Binary grayscale threshold: 255 where luma > [`GRAY_THRESHOLD`].
pub fn threshold_mask(frame: &BgrFrame) -> Mask {
    let data = &frame.data;
    mask_from_fn(frame.height(), frame.width(), |row, col| {
        let luma = gray_sample(data[[row, col, 0]], data[[row, col, 1]], data[[row, col, 2]]);
        if luma > GRAY_THRESHOLD {
            MASK_FOREGROUND
        } else {
            0
        }
    })
}
