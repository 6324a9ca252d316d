pub mod kernel;
pub mod ops;
pub mod sobel;
pub mod stage;

pub use kernel::StructuringElement;
pub use ops::{dilate, erode};
pub use sobel::sobel_x;
pub use stage::{GradientMorphologyStage, StructuralMasks};
