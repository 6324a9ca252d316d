use tracing::debug;

use crate::consts::STRUCTURING_ELEMENT_SIZE;
use crate::frame::Mask;

use super::kernel::StructuringElement;
use super::ops::{dilate, erode};
use super::sobel::sobel_x;

/// Masks derived from the horizontal gradient of the paint-color mask.
#[derive(Clone, Debug)]
pub struct StructuralMasks {
    pub gradient: Mask,
    /// `erode(dilate(gradient))`: bridges small gaps in a marking.
    pub closed: Mask,
    /// `dilate(erode(gradient))`. No region currently reads it.
    pub opened: Mask,
}

/// Gradient followed by erosion/dilation with a fixed 5x5 ellipse.
pub struct GradientMorphologyStage {
    element: StructuringElement,
}

impl GradientMorphologyStage {
    pub fn new() -> Self {
        Self {
            element: StructuringElement::ellipse(STRUCTURING_ELEMENT_SIZE),
        }
    }

    pub fn element(&self) -> &StructuringElement {
        &self.element
    }

    pub fn apply(&self, hsv_mask: &Mask) -> StructuralMasks {
        let gradient = sobel_x(hsv_mask);

        let (eroded, dilated) = rayon::join(
            || erode(&gradient, &self.element),
            || dilate(&gradient, &self.element),
        );
        let (opened, closed) = rayon::join(
            || dilate(&eroded, &self.element),
            || erode(&dilated, &self.element),
        );

        debug!(
            gradient_px = count_foreground(&gradient),
            closed_px = count_foreground(&closed),
            "Gradient morphology complete"
        );

        StructuralMasks {
            gradient,
            closed,
            opened,
        }
    }
}

impl Default for GradientMorphologyStage {
    fn default() -> Self {
        Self::new()
    }
}

fn count_foreground(mask: &Mask) -> usize {
    mask.iter().filter(|&&v| v != 0).count()
}
