pub mod extract;
pub mod hough;

pub use extract::LineExtractor;
pub use hough::{hough_lines_p, HoughParams};
