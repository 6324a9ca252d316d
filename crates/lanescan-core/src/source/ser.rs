use tracing::{debug, info};

use crate::error::{LaneScanError, Result};
use crate::frame::BgrFrame;
use crate::io::ser::SerReader;

use super::{FrameSource, SourceId};

/// Frames of a SER video, in file order.
#[derive(Default)]
pub struct SerSource {
    reader: Option<SerReader>,
    next_index: usize,
    grabbed: Option<usize>,
}

impl SerSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reader(&self) -> Option<&SerReader> {
        self.reader.as_ref()
    }
}

impl FrameSource for SerSource {
    fn open(&mut self, id: &SourceId) -> Result<()> {
        self.release();
        let reader = SerReader::open(id.as_path()).map_err(|e| LaneScanError::SourceUnavailable {
            source_id: id.to_string(),
            reason: e.to_string(),
        })?;
        info!(
            source = %id,
            frames = reader.frame_count(),
            width = reader.header.width,
            height = reader.header.height,
            mode = ?reader.header.color_mode(),
            "Opened SER source"
        );
        self.reader = Some(reader);
        Ok(())
    }

    fn is_opened(&self) -> bool {
        self.reader.is_some()
    }

    fn grab(&mut self) -> bool {
        let Some(reader) = &self.reader else {
            return false;
        };
        if self.next_index >= reader.frame_count() {
            self.grabbed = None;
            return false;
        }
        self.grabbed = Some(self.next_index);
        self.next_index += 1;
        true
    }

    fn retrieve(&mut self) -> Result<Option<BgrFrame>> {
        match (&self.reader, self.grabbed) {
            (Some(reader), Some(index)) => reader.read_frame(index).map(Some),
            _ => Ok(None),
        }
    }

    fn release(&mut self) {
        if self.reader.take().is_some() {
            debug!(frames_read = self.next_index, "Released SER source");
        }
        self.next_index = 0;
        self.grabbed = None;
    }
}
