use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::error::Result;
use crate::io::image_io::save_png;
use crate::pipeline::CycleOutput;

/// Receives the output of every cycle. Ownership of the frame moves into
/// the sink.
pub trait FrameSink: Send {
    fn present(&mut self, output: CycleOutput) -> Result<()>;
}

impl FrameSink for Box<dyn FrameSink> {
    fn present(&mut self, output: CycleOutput) -> Result<()> {
        (**self).present(output)
    }
}

/// Drops every frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(&mut self, _output: CycleOutput) -> Result<()> {
        Ok(())
    }
}

/// Writes annotated frames as `frame_NNNNNN.png` (RGB) into a directory.
/// Empty frames are counted but not written.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    written: usize,
    skipped: usize,
}

impl PngSequenceSink {
    /// Create the sink, creating `dir` if needed.
    pub fn new(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            written: 0,
            skipped: 0,
        })
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn frame_path(&self, cycle_index: u64) -> PathBuf {
        self.dir.join(format!("frame_{cycle_index:06}.png"))
    }
}

impl FrameSink for PngSequenceSink {
    fn present(&mut self, output: CycleOutput) -> Result<()> {
        if output.frame.is_empty() {
            self.skipped += 1;
            return Ok(());
        }
        let path = self.frame_path(output.cycle_index);
        save_png(&output.frame, &path)?;
        self.written += 1;
        debug!(path = %path.display(), "Wrote annotated frame");
        Ok(())
    }
}

/// Keeps every presented output. Clones share the same buffer, so a test
/// can hand one clone to a driver and inspect the other.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    outputs: Arc<Mutex<Vec<CycleOutput>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything collected so far.
    pub fn take(&self) -> Vec<CycleOutput> {
        match self.outputs.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub fn len(&self) -> usize {
        self.outputs.lock().map(|g| g.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FrameSink for MemorySink {
    fn present(&mut self, output: CycleOutput) -> Result<()> {
        match self.outputs.lock() {
            Ok(mut guard) => guard.push(output),
            Err(poisoned) => poisoned.into_inner().push(output),
        }
        Ok(())
    }
}
