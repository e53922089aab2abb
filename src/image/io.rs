//! I/O helpers for frames, overlays and JSON.
//!
//! - `load_frame`: decode a PNG/JPEG/etc. into an owned RGB + gray pair.
//! - `save_rgb`: write an RGB overlay to disk.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::ImageU8;
use image::RgbImage;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Decoded frame: the color image for overlays and its 8-bit gray version.
#[derive(Clone, Debug)]
pub struct Frame {
    pub rgb: RgbImage,
    width: usize,
    height: usize,
    gray: Vec<u8>,
}

impl Frame {
    pub fn from_rgb(rgb: RgbImage) -> Self {
        let gray = image::DynamicImage::ImageRgb8(rgb.clone())
            .into_luma8()
            .into_raw();
        Self {
            width: rgb.width() as usize,
            height: rgb.height() as usize,
            rgb,
            gray,
        }
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Borrow the gray channel as a read-only `ImageU8` view
    pub fn gray(&self) -> ImageU8<'_> {
        ImageU8 {
            w: self.width,
            h: self.height,
            stride: self.width,
            data: &self.gray,
        }
    }
}

/// Load an image from disk as an RGB frame.
pub fn load_frame(path: &Path) -> Result<Frame, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgb8();
    Ok(Frame::from_rgb(img))
}

/// Save an RGB image, creating parent directories.
pub fn save_rgb(image: &RgbImage, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    image
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
