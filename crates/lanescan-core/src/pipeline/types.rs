use crate::frame::{BgrFrame, LineSegment};
use crate::region::RegionSpec;

/// Durable state of a capture session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Capturing,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Capturing => write!(f, "Capturing"),
        }
    }
}

/// How a cycle ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CycleStatus {
    /// The frame went through the whole pipeline and was annotated.
    Processed,
    /// The source had no frame to give; an empty frame was emitted.
    NoFrame,
    /// The source returned a frame without pixels; it was emitted as is.
    EmptyFrame,
    /// The source stopped reporting itself opened; an empty frame was emitted.
    SourceLost,
    /// Reading or processing failed; the unmodified frame was emitted.
    Fault { reason: String },
}

impl CycleStatus {
    pub fn is_processed(&self) -> bool {
        matches!(self, Self::Processed)
    }
}

/// Segments found in one region, in frame coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionDetection {
    pub region: RegionSpec,
    pub segments: Vec<LineSegment>,
}

/// Everything one cycle produced.
#[derive(Clone, Debug)]
pub struct CycleOutput {
    /// Annotated frame, or the raw/empty frame when processing was skipped.
    pub frame: BgrFrame,
    /// Per-region detections; empty unless the cycle was processed.
    pub regions: Vec<RegionDetection>,
    /// Elapsed session time the region policy was evaluated at.
    pub elapsed_ms: u64,
    /// Zero-based cycle number within the session.
    pub cycle_index: u64,
    pub status: CycleStatus,
}

impl CycleOutput {
    pub(crate) fn skipped(
        frame: BgrFrame,
        elapsed_ms: u64,
        cycle_index: u64,
        status: CycleStatus,
    ) -> Self {
        Self {
            frame,
            regions: Vec::new(),
            elapsed_ms,
            cycle_index,
            status,
        }
    }

    /// All drawn segments, baseline region first.
    pub fn segments(&self) -> impl Iterator<Item = &LineSegment> + '_ {
        self.regions.iter().flat_map(|r| r.segments.iter())
    }

    pub fn segment_count(&self) -> usize {
        self.regions.iter().map(|r| r.segments.len()).sum()
    }
}
