use crate::consts::{LATE_START_MS, TRANSITION_START_MS};
use crate::frame::{Point, Roi};

/// Which derived mask a region is cropped from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaskSource {
    /// `erode(dilate(gradient))` of the paint-color mask.
    Closed,
    /// Grayscale brightness threshold.
    Threshold,
}

/// The four branches of the region timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegionBranch {
    /// Left marking, analyzed on every frame.
    Baseline,
    /// Right marking before the lane shift, `t < 5000`.
    Approach,
    /// Right marking while it moves, `5000 <= t < 8900`.
    Transition,
    /// Right marking after the shift, `t >= 8900`. Read from the threshold mask.
    Late,
}

impl RegionBranch {
    pub const fn roi(self) -> Roi {
        match self {
            Self::Baseline => Roi::from_corners(Point::new(135, 350), Point::new(280, 576)),
            Self::Approach => Roi::from_corners(Point::new(500, 350), Point::new(600, 480)),
            Self::Transition => Roi::from_corners(Point::new(460, 420), Point::new(720, 576)),
            Self::Late => Roi::from_corners(Point::new(485, 420), Point::new(720, 576)),
        }
    }

    pub const fn source(self) -> MaskSource {
        match self {
            Self::Late => MaskSource::Threshold,
            _ => MaskSource::Closed,
        }
    }

    pub const fn spec(self) -> RegionSpec {
        RegionSpec {
            branch: self,
            roi: self.roi(),
            source: self.source(),
        }
    }
}

impl std::fmt::Display for RegionBranch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Baseline => write!(f, "Baseline"),
            Self::Approach => write!(f, "Approach"),
            Self::Transition => write!(f, "Transition"),
            Self::Late => write!(f, "Late"),
        }
    }
}

/// One region to analyze: where, and from which mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegionSpec {
    pub branch: RegionBranch,
    pub roi: Roi,
    pub source: MaskSource,
}

/// Regions to analyze at `elapsed_ms` into the session.
///
/// Always the baseline region first, followed by exactly one time-dependent
/// region: `[0, 5000)` approach, `[5000, 8900)` transition, `[8900, ..)` late.
pub fn select_regions(elapsed_ms: u64) -> Vec<RegionSpec> {
    let timed = if elapsed_ms < TRANSITION_START_MS {
        RegionBranch::Approach
    } else if elapsed_ms < LATE_START_MS {
        RegionBranch::Transition
    } else {
        RegionBranch::Late
    };
    vec![RegionBranch::Baseline.spec(), timed.spec()]
}
