#![allow(dead_code)]

use std::time::Duration;

use lanescan_core::error::Result;
use lanescan_core::frame::{BgrFrame, Mask};
use lanescan_core::io::ser::SER_HEADER_SIZE;
use lanescan_core::source::{FrameSource, MemorySource, SourceId};

/// Frame size of the surveyed video.
pub const FRAME_WIDTH: usize = 720;
pub const FRAME_HEIGHT: usize = 576;

/// Amber lane paint: inside the HSV range and brighter than the gray threshold.
pub const PAINT_BGR: [u8; 3] = [40, 170, 230];
pub const ASPHALT_BGR: [u8; 3] = [0, 0, 0];

/// Build a SER file header.
///
/// `color_id`: 0=MONO, 8=BAYER_RGGB, 9=BAYER_GRBG, 10=BAYER_GBRG, 11=BAYER_BGGR,
///             100=RGB, 101=BGR
pub fn build_ser_header(
    width: u32,
    height: u32,
    bit_depth: u32,
    num_frames: usize,
    color_id: i32,
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(SER_HEADER_SIZE);

    // Magic (14 bytes)
    buf.extend_from_slice(b"LUCAM-RECORDER");
    // LuID (4 bytes)
    buf.extend_from_slice(&0i32.to_le_bytes());
    // ColorID (4 bytes)
    buf.extend_from_slice(&color_id.to_le_bytes());
    // LittleEndian = 0 (little-endian per Siril convention)
    buf.extend_from_slice(&0i32.to_le_bytes());
    buf.extend_from_slice(&(width as i32).to_le_bytes());
    buf.extend_from_slice(&(height as i32).to_le_bytes());
    buf.extend_from_slice(&(bit_depth as i32).to_le_bytes());
    buf.extend_from_slice(&(num_frames as i32).to_le_bytes());
    // Observer (40 bytes)
    let mut observer = [0u8; 40];
    observer[..4].copy_from_slice(b"Test");
    buf.extend_from_slice(&observer);
    // Instrument (40 bytes)
    buf.extend_from_slice(&[0u8; 40]);
    // Telescope (40 bytes)
    buf.extend_from_slice(&[0u8; 40]);
    // DateTime, DateTimeUTC
    buf.extend_from_slice(&0u64.to_le_bytes());
    buf.extend_from_slice(&0u64.to_le_bytes());

    assert_eq!(buf.len(), SER_HEADER_SIZE);
    buf
}

/// Complete SER file with the given raw frame payloads.
pub fn build_ser(
    width: u32,
    height: u32,
    bit_depth: u32,
    color_id: i32,
    frames: &[Vec<u8>],
) -> Vec<u8> {
    let mut buf = build_ser_header(width, height, bit_depth, frames.len(), color_id);
    for frame in frames {
        buf.extend_from_slice(frame);
    }
    buf
}

/// Write a SER buffer to a temporary file.
///
/// The file stays alive as long as the returned `NamedTempFile` is not dropped.
pub fn write_test_ser(data: &[u8]) -> tempfile::NamedTempFile {
    use std::io::Write;
    let mut f = tempfile::NamedTempFile::new().expect("create temp file");
    f.write_all(data).expect("write SER data");
    f.flush().expect("flush");
    f
}

/// Full-size frame of bare asphalt.
pub fn blank_frame() -> BgrFrame {
    BgrFrame::filled(FRAME_HEIGHT, FRAME_WIDTH, ASPHALT_BGR)
}

/// Paint a slanted marking `width` pixels wide from `(x_top, y_top)` down to
/// `(x_bottom, y_bottom)`, one horizontal run per row.
pub fn paint_marking(
    frame: &mut BgrFrame,
    (x_top, y_top): (i32, i32),
    (x_bottom, y_bottom): (i32, i32),
    width: i32,
) {
    let rows = (y_bottom - y_top).max(1);
    for y in y_top..=y_bottom {
        let x0 = x_top + (x_bottom - x_top) * (y - y_top) / rows;
        for x in x0..x0 + width {
            frame.set_pixel(x as usize, y as usize, PAINT_BGR);
        }
    }
}

/// Frame with one diagonal marking inside the baseline region.
pub fn frame_with_baseline_marking() -> BgrFrame {
    let mut frame = blank_frame();
    paint_marking(&mut frame, (250, 370), (160, 560), 6);
    frame
}

/// Binary mask with a vertical 1-pixel line in `col` over `rows`.
pub fn vertical_line_mask(
    height: usize,
    width: usize,
    col: usize,
    rows: std::ops::Range<usize>,
) -> Mask {
    let mut mask = Mask::zeros((height, width));
    for row in rows {
        mask[[row, col]] = 255;
    }
    mask
}

/// Pixels where two equally sized frames differ, as `(x, y)`.
pub fn changed_pixels(before: &BgrFrame, after: &BgrFrame) -> Vec<(usize, usize)> {
    assert_eq!(before.data.dim(), after.data.dim());
    let mut changed = Vec::new();
    for y in 0..before.height() {
        for x in 0..before.width() {
            if before.pixel(x, y) != after.pixel(x, y) {
                changed.push((x, y));
            }
        }
    }
    changed
}

/// Memory-backed source that sleeps in every `grab` and can stop reporting
/// itself opened after a number of grabs.
pub struct ThrottledSource {
    inner: MemorySource,
    grab_delay: Duration,
    close_after: Option<usize>,
    grabs: usize,
}

impl ThrottledSource {
    pub fn new(frames: Vec<BgrFrame>, grab_delay: Duration) -> Self {
        Self {
            inner: MemorySource::new(frames),
            grab_delay,
            close_after: None,
            grabs: 0,
        }
    }

    pub fn closing_after(mut self, grabs: usize) -> Self {
        self.close_after = Some(grabs);
        self
    }
}

impl FrameSource for ThrottledSource {
    fn open(&mut self, id: &SourceId) -> Result<()> {
        self.grabs = 0;
        self.inner.open(id)
    }

    fn is_opened(&self) -> bool {
        self.inner.is_opened() && self.close_after.map_or(true, |n| self.grabs < n)
    }

    fn grab(&mut self) -> bool {
        std::thread::sleep(self.grab_delay);
        self.grabs += 1;
        self.inner.grab()
    }

    fn retrieve(&mut self) -> Result<Option<BgrFrame>> {
        self.inner.retrieve()
    }

    fn release(&mut self) {
        self.inner.release();
    }
}
