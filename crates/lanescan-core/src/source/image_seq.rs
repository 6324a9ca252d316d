use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::{LaneScanError, Result};
use crate::frame::BgrFrame;
use crate::io::image_io::{is_image_file, load_bgr_image};

use super::{FrameSource, SourceId};

/// Still images in a directory, read in file-name order.
#[derive(Default)]
pub struct ImageSequenceSource {
    files: Option<Vec<PathBuf>>,
    next_index: usize,
    grabbed: Option<usize>,
}

impl ImageSequenceSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FrameSource for ImageSequenceSource {
    fn open(&mut self, id: &SourceId) -> Result<()> {
        self.release();
        let unavailable = |reason: String| LaneScanError::SourceUnavailable {
            source_id: id.to_string(),
            reason,
        };

        let entries = std::fs::read_dir(id.as_path()).map_err(|e| unavailable(e.to_string()))?;
        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| unavailable(e.to_string()))?.path();
            if path.is_file() && is_image_file(&path) {
                files.push(path);
            }
        }
        if files.is_empty() {
            return Err(unavailable("directory contains no images".into()));
        }
        files.sort();

        info!(source = %id, frames = files.len(), "Opened image sequence");
        self.files = Some(files);
        Ok(())
    }

    fn is_opened(&self) -> bool {
        self.files.is_some()
    }

    fn grab(&mut self) -> bool {
        if self.next_index >= self.len() {
            self.grabbed = None;
            return false;
        }
        self.grabbed = Some(self.next_index);
        self.next_index += 1;
        true
    }

    fn retrieve(&mut self) -> Result<Option<BgrFrame>> {
        let (Some(files), Some(index)) = (&self.files, self.grabbed) else {
            return Ok(None);
        };
        let mut frame = load_bgr_image(&files[index])?;
        frame.metadata.frame_index = index;
        Ok(Some(frame))
    }

    fn release(&mut self) {
        if self.files.take().is_some() {
            debug!(frames_read = self.next_index, "Released image sequence");
        }
        self.next_index = 0;
        self.grabbed = None;
    }
}
