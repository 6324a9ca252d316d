use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaneScanError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid SER file: {0}")]
    InvalidSer(String),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Frame source unavailable ({source_id}): {reason}")]
    SourceUnavailable { source_id: String, reason: String },

    #[error("Frame source returned an empty frame")]
    EmptyFrame,

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Region {x},{y} {width}x{height} exceeds mask bounds {mask_width}x{mask_height}")]
    RoiOutOfBounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        mask_width: usize,
        mask_height: usize,
    },

    #[error("In-flight cycle did not finish within {waited_ms} ms")]
    ShutdownTimeout { waited_ms: u64 },

    #[error("Session driver lock poisoned by a panicked cycle")]
    DriverPoisoned,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl LaneScanError {
    /// Faults raised inside the per-frame pipeline. The orchestrator degrades
    /// these to "emit the unmodified frame" instead of aborting the session.
    pub fn is_processing_fault(&self) -> bool {
        matches!(
            self,
            Self::InvalidDimensions { .. } | Self::RoiOutOfBounds { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, LaneScanError>;
