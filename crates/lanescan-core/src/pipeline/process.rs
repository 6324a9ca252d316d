use tracing::trace;

use crate::annotate::Annotator;
use crate::color::ColorSegmenter;
use crate::error::Result;
use crate::frame::BgrFrame;
use crate::lines::LineExtractor;
use crate::morphology::GradientMorphologyStage;
use crate::region::{select_regions, MaskSource};

use super::types::RegionDetection;

/// The per-frame stages, wired in order:
/// color segmentation -> gradient morphology -> region policy ->
/// line extraction -> annotation.
#[derive(Default)]
pub struct FramePipeline {
    segmenter: ColorSegmenter,
    morphology: GradientMorphologyStage,
    extractor: LineExtractor,
    annotator: Annotator,
}

impl FramePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Detect segments in every region selected for `elapsed_ms`.
    ///
    /// Does not touch the frame. Any failing stage aborts the whole
    /// analysis so no partial result escapes.
    pub fn analyze(&self, frame: &BgrFrame, elapsed_ms: u64) -> Result<Vec<RegionDetection>> {
        let masks = self.segmenter.segment(frame)?;
        let structural = self.morphology.apply(&masks.hsv);

        select_regions(elapsed_ms)
            .into_iter()
            .map(|region| {
                let mask = match region.source {
                    MaskSource::Closed => &structural.closed,
                    MaskSource::Threshold => &masks.threshold,
                };
                let segments = self.extractor.extract_region(mask, &region.roi)?;
                trace!(branch = %region.branch, segments = segments.len(), "Region analyzed");
                Ok(RegionDetection { region, segments })
            })
            .collect()
    }

    /// Analyze `frame` and draw the detections onto it.
    ///
    /// On error the frame is left unmodified.
    pub fn process(&self, frame: &mut BgrFrame, elapsed_ms: u64) -> Result<Vec<RegionDetection>> {
        let regions = self.analyze(frame, elapsed_ms)?;
        for detection in &regions {
            self.annotator.annotate(frame, &detection.segments);
        }
        Ok(regions)
    }
}
