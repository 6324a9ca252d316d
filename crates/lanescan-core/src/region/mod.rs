pub mod policy;

pub use policy::{select_regions, MaskSource, RegionBranch, RegionSpec};
