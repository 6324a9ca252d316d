use std::collections::VecDeque;

use crate::error::{LaneScanError, Result};
use crate::frame::BgrFrame;

use super::{FrameSource, SourceId};

/// Frames held in memory. `None` entries model reads that come back empty.
///
/// Opening succeeds for any id unless the source was built with
/// [`MemorySource::unavailable`]. Reopening rewinds to the first frame.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    frames: Vec<Option<BgrFrame>>,
    pending: VecDeque<Option<BgrFrame>>,
    grabbed: Option<Option<BgrFrame>>,
    opened: bool,
    refuse_open: bool,
}

impl MemorySource {
    pub fn new(frames: Vec<BgrFrame>) -> Self {
        Self::with_gaps(frames.into_iter().map(Some).collect())
    }

    pub fn with_gaps(frames: Vec<Option<BgrFrame>>) -> Self {
        Self {
            frames,
            ..Self::default()
        }
    }

    /// A source whose `open` always fails.
    pub fn unavailable() -> Self {
        Self {
            refuse_open: true,
            ..Self::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl FrameSource for MemorySource {
    fn open(&mut self, id: &SourceId) -> Result<()> {
        self.release();
        if self.refuse_open {
            return Err(LaneScanError::SourceUnavailable {
                source_id: id.to_string(),
                reason: "source refused to open".into(),
            });
        }
        self.pending = self.frames.iter().cloned().collect();
        self.opened = true;
        Ok(())
    }

    fn is_opened(&self) -> bool {
        self.opened
    }

    fn grab(&mut self) -> bool {
        if !self.opened {
            return false;
        }
        self.grabbed = self.pending.pop_front();
        self.grabbed.is_some()
    }

    fn retrieve(&mut self) -> Result<Option<BgrFrame>> {
        Ok(self
            .grabbed
            .take()
            .map(|frame| frame.unwrap_or_else(BgrFrame::empty)))
    }

    fn release(&mut self) {
        self.opened = false;
        self.pending.clear();
        self.grabbed = None;
    }
}
