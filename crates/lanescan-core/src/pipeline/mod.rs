pub mod config;
pub mod driver;
mod orchestrator;
mod process;
mod types;

pub use config::{DriverOptions, Pacing, SessionConfig};
pub use driver::{DriverSummary, ExitReason, SessionDriver, SharedOrchestrator};
pub use orchestrator::FrameCycleOrchestrator;
pub use process::FramePipeline;
pub use types::{CycleOutput, CycleStatus, RegionDetection, SessionState};
