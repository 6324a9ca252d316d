pub mod convert;
pub mod segment;

pub use convert::{to_gray, HsvTables};
pub use segment::{threshold_mask, ColorSegmenter, SegmentedMasks};
