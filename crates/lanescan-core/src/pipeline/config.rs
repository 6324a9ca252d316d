use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::FRAME_INTERVAL_MS;
use crate::error::{LaneScanError, Result};

/// How the session driver spaces cycles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pacing {
    /// One cycle per frame interval, fixed rate.
    RealTime,
    /// Cycles back to back, as fast as the pipeline allows.
    #[default]
    Unpaced,
}

impl std::fmt::Display for Pacing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RealTime => write!(f, "Real time ({FRAME_INTERVAL_MS} ms)"),
            Self::Unpaced => write!(f, "Unpaced"),
        }
    }
}

/// Where frames come from, where annotated frames go, and how the
/// driver paces the session. Detection parameters are fixed and not part
/// of the configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    /// SER file or directory of images.
    pub input: PathBuf,
    /// Directory for annotated PNG frames. `None` discards them.
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub driver: DriverOptions,
}

impl SessionConfig {
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            output: None,
            driver: DriverOptions::default(),
        }
    }

    /// Reject settings no session could run with.
    pub fn validate(&self) -> Result<()> {
        if self.input.as_os_str().is_empty() {
            return Err(LaneScanError::Config("input path is empty".into()));
        }
        if self.driver.max_cycles == Some(0) {
            return Err(LaneScanError::Config("max_cycles must be at least 1".into()));
        }
        let d = &self.driver;
        if !d.stop_when_exhausted && d.pacing == Pacing::Unpaced && d.max_cycles.is_none() {
            return Err(LaneScanError::Config(
                "unpaced session with stop_when_exhausted = false needs max_cycles".into(),
            ));
        }
        if self.output.as_deref() == Some(self.input.as_path()) {
            return Err(LaneScanError::Config(format!(
                "output directory {} is the input",
                self.input.display()
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DriverOptions {
    #[serde(default)]
    pub pacing: Pacing,
    /// Stop after this many cycles.
    #[serde(default)]
    pub max_cycles: Option<u64>,
    /// End the session when the source has no more frames.
    #[serde(default = "default_stop_when_exhausted")]
    pub stop_when_exhausted: bool,
}

fn default_stop_when_exhausted() -> bool {
    true
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            pacing: Pacing::default(),
            max_cycles: None,
            stop_when_exhausted: true,
        }
    }
}

impl DriverOptions {
    /// Nominal cycle interval, also the bounded wait on shutdown.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(FRAME_INTERVAL_MS)
    }
}
