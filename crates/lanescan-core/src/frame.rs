use ndarray::{s, Array2, Array3, ArrayView2};
use std::path::PathBuf;

use crate::consts::COLOR_CHANNEL_COUNT;
use crate::error::{LaneScanError, Result};

/// Single-channel binary image: 0 for background, 255 for foreground.
/// Shape = (height, width).
pub type Mask = Array2<u8>;

/// A single color video frame.
/// Samples are 8-bit, channel order blue, green, red.
#[derive(Clone, Debug, PartialEq)]
pub struct BgrFrame {
    /// Pixel data, shape = (height, width, 3)
    pub data: Array3<u8>,
    pub metadata: FrameMetadata,
}

impl BgrFrame {
    pub fn new(data: Array3<u8>) -> Result<Self> {
        let (h, w, c) = data.dim();
        if c != COLOR_CHANNEL_COUNT {
            return Err(LaneScanError::InvalidDimensions {
                width: w,
                height: h,
            });
        }
        Ok(Self {
            data,
            metadata: FrameMetadata::default(),
        })
    }

    /// A frame with no pixels, emitted when the source has nothing to give.
    pub fn empty() -> Self {
        Self {
            data: Array3::zeros((0, 0, COLOR_CHANNEL_COUNT)),
            metadata: FrameMetadata::default(),
        }
    }

    /// A frame filled with one BGR color.
    pub fn filled(height: usize, width: usize, bgr: [u8; 3]) -> Self {
        let data = Array3::from_shape_fn((height, width, COLOR_CHANNEL_COUNT), |(_, _, c)| bgr[c]);
        Self {
            data,
            metadata: FrameMetadata::default(),
        }
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        [
            self.data[[y, x, 0]],
            self.data[[y, x, 1]],
            self.data[[y, x, 2]],
        ]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, bgr: [u8; 3]) {
        for (c, &v) in bgr.iter().enumerate() {
            self.data[[y, x, c]] = v;
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameMetadata {
    pub frame_index: usize,
    pub timestamp_us: Option<u64>,
}

/// Integer pixel position, x = column, y = row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in frame coordinates. The far edges
/// (`x + width`, `y + height`) are exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Roi {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Roi {
    /// Build the rectangle spanned by two opposite corners.
    pub const fn from_corners(a: Point, b: Point) -> Self {
        let (x, x2) = if a.x < b.x { (a.x, b.x) } else { (b.x, a.x) };
        let (y, y2) = if a.y < b.y { (a.y, b.y) } else { (b.y, a.y) };
        Self {
            x,
            y,
            width: x2 - x,
            height: y2 - y,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// True if `p` lies inside the rectangle.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }

    /// Borrow the part of `mask` covered by this rectangle.
    ///
    /// Fails with `RoiOutOfBounds` unless the rectangle lies entirely inside
    /// the mask.
    pub fn crop<'a>(&self, mask: &'a Mask) -> Result<ArrayView2<'a, u8>> {
        let (h, w) = mask.dim();
        let fits = self.x >= 0
            && self.y >= 0
            && self.width >= 0
            && self.height >= 0
            && (self.x + self.width) as usize <= w
            && (self.y + self.height) as usize <= h;
        if !fits {
            return Err(LaneScanError::RoiOutOfBounds {
                x: self.x,
                y: self.y,
                width: self.width,
                height: self.height,
                mask_width: w,
                mask_height: h,
            });
        }
        let (x, y) = (self.x as usize, self.y as usize);
        let (x2, y2) = (x + self.width as usize, y + self.height as usize);
        Ok(mask.slice(s![y..y2, x..x2]))
    }
}

impl std::fmt::Display for Roi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({},{})-({},{})",
            self.x,
            self.y,
            self.x + self.width,
            self.y + self.height
        )
    }
}

/// A detected straight segment between two endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineSegment {
    pub start: Point,
    pub end: Point,
}

impl LineSegment {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            start: Point::new(x1, y1),
            end: Point::new(x2, y2),
        }
    }

    /// Shift both endpoints by `offset`.
    pub fn translated(&self, offset: Point) -> Self {
        Self::new(
            self.start.x + offset.x,
            self.start.y + offset.y,
            self.end.x + offset.x,
            self.end.y + offset.y,
        )
    }
}

/// Color layout of the source data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    Mono,
    /// Any Bayer pattern; read as mono, not demosaiced.
    Bayer,
    RGB,
    BGR,
}

/// Metadata about an opened frame source.
#[derive(Clone, Debug)]
pub struct SourceInfo {
    pub filename: PathBuf,
    pub total_frames: usize,
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_mode: ColorMode,
}
