pub mod annotate;
pub mod color;
pub mod consts;
pub mod error;
pub mod frame;
pub mod io;
pub mod lines;
pub mod morphology;
pub mod pipeline;
pub mod region;
pub mod sink;
pub mod source;

mod raster;
