use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use ndarray::Array3;

use crate::consts::COLOR_CHANNEL_COUNT;
use crate::error::{LaneScanError, Result};
use crate::frame::BgrFrame;

/// File extensions recognised as still images.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff"];

/// Load any supported image file into a BGR frame.
pub fn load_bgr_image(path: &Path) -> Result<BgrFrame> {
    let rgb = image::open(path)?.to_rgb8();
    Ok(from_rgb_image(&rgb))
}

/// Reorder an RGB image into a BGR frame.
pub fn from_rgb_image(rgb: &RgbImage) -> BgrFrame {
    let (w, h) = rgb.dimensions();
    let shape = (h as usize, w as usize, COLOR_CHANNEL_COUNT);
    let data = Array3::from_shape_fn(shape, |(row, col, c)| {
        rgb.get_pixel(col as u32, row as u32).0[2 - c]
    });
    BgrFrame {
        data,
        metadata: Default::default(),
    }
}

/// Display-ready RGB copy of a BGR frame.
pub fn to_rgb_image(frame: &BgrFrame) -> RgbImage {
    let (h, w) = (frame.height(), frame.width());
    let mut img = RgbImage::new(w as u32, h as u32);
    for row in 0..h {
        for col in 0..w {
            let [b, g, r] = frame.pixel(col, row);
            img.put_pixel(col as u32, row as u32, Rgb([r, g, b]));
        }
    }
    img
}

/// Save a BGR frame as 8-bit RGB PNG.
pub fn save_png(frame: &BgrFrame, path: &Path) -> Result<()> {
    if frame.is_empty() {
        return Err(LaneScanError::InvalidDimensions {
            width: frame.width(),
            height: frame.height(),
        });
    }
    to_rgb_image(frame).save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// True if the path carries a recognised image extension.
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
