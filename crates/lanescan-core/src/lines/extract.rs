use ndarray::ArrayView2;
use tracing::debug;

use crate::error::Result;
use crate::frame::{LineSegment, Mask, Point, Roi};

use super::hough::{hough_lines_p, HoughParams};

/// Runs line detection on a cropped region and maps the result back into
/// frame coordinates.
#[derive(Clone, Debug, Default)]
pub struct LineExtractor {
    params: HoughParams,
}

impl LineExtractor {
    pub fn new(params: HoughParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &HoughParams {
        &self.params
    }

    /// Detect segments in `crop`, whose top-left pixel sits at `origin` in the
    /// frame. Returned endpoints are in frame coordinates.
    pub fn extract(&self, crop: ArrayView2<'_, u8>, origin: Point) -> Vec<LineSegment> {
        hough_lines_p(crop, &self.params)
            .into_iter()
            .map(|segment| segment.translated(origin))
            .collect()
    }

    /// Crop `roi` out of `mask` and detect segments inside it.
    pub fn extract_region(&self, mask: &Mask, roi: &Roi) -> Result<Vec<LineSegment>> {
        let crop = roi.crop(mask)?;
        let segments = self.extract(crop, roi.origin());
        debug!(roi = %roi, segments = segments.len(), "Extracted line segments");
        Ok(segments)
    }
}
