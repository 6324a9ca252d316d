pub mod image_seq;
pub mod memory;
pub mod ser;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::frame::BgrFrame;

pub use image_seq::ImageSequenceSource;
pub use memory::MemorySource;
pub use ser::SerSource;

/// Opaque identifier of where frames come from: a file path, a directory,
/// or a device string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceId(String);

impl SourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl From<&str> for SourceId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<&Path> for SourceId {
    fn from(p: &Path) -> Self {
        Self::new(p.to_string_lossy().into_owned())
    }
}

impl From<PathBuf> for SourceId {
    fn from(p: PathBuf) -> Self {
        Self::from(p.as_path())
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A sequential supplier of video frames.
///
/// Implementors never block indefinitely: when nothing is available,
/// `grab` returns `false` and `read` returns `Ok(None)`.
pub trait FrameSource: Send {
    /// Open the source. Any previously opened source is released first.
    fn open(&mut self, id: &SourceId) -> Result<()>;

    fn is_opened(&self) -> bool;

    /// Advance to the next frame. Returns `false` when none is available.
    fn grab(&mut self) -> bool;

    /// Decode the most recently grabbed frame.
    fn retrieve(&mut self) -> Result<Option<BgrFrame>>;

    /// Grab and decode the next frame.
    fn read(&mut self) -> Result<Option<BgrFrame>> {
        if !self.grab() {
            return Ok(None);
        }
        self.retrieve()
    }

    fn release(&mut self);
}

impl FrameSource for Box<dyn FrameSource> {
    fn open(&mut self, id: &SourceId) -> Result<()> {
        (**self).open(id)
    }

    fn is_opened(&self) -> bool {
        (**self).is_opened()
    }

    fn grab(&mut self) -> bool {
        (**self).grab()
    }

    fn retrieve(&mut self) -> Result<Option<BgrFrame>> {
        (**self).retrieve()
    }

    fn read(&mut self) -> Result<Option<BgrFrame>> {
        (**self).read()
    }

    fn release(&mut self) {
        (**self).release()
    }
}

/// Pick a source implementation from the shape of `path`: directories are
/// image sequences, everything else is read as SER video.
pub fn source_for_path(path: &Path) -> Box<dyn FrameSource> {
    if path.is_dir() {
        Box::new(ImageSequenceSource::new())
    } else {
        Box::new(SerSource::new())
    }
}
