//! Raster icon types.
//!
//! Both render paths produce an [`IconImage`], which owns the RGBA pixels
//! and knows how to write itself out as a PNG.

use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};
use resvg::tiny_skia::Pixmap;

use crate::error::RenderResult;

/// A rectangle defined in pixel coordinates.
///
/// Coordinates are signed so a box larger than the image can still be
/// centered on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RectPx {
    /// X offset from the left edge of the image
    pub x: i32,
    /// Y offset from the top edge of the image
    pub y: i32,
    /// Width of the rectangle
    pub width: u32,
    /// Height of the rectangle
    pub height: u32,
}

impl RectPx {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Places a `width x height` box at the center of a `size x size` square.
    pub fn centered(size: u32, width: u32, height: u32) -> Self {
        let x = (i64::from(size) - i64::from(width)) / 2;
        let y = (i64::from(size) - i64::from(height)) / 2;
        Self::new(x as i32, y as i32, width, height)
    }
}

/// A 2D size in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A rendered icon in straight (non-premultiplied) RGBA.
#[derive(Debug, Clone, PartialEq)]
pub struct IconImage {
    /// The image data in RGBA format.
    pub data: RgbaImage,
}

impl IconImage {
    pub fn new(data: RgbaImage) -> Self {
        Self { data }
    }

    /// Converts a tiny-skia pixmap, undoing its premultiplied alpha.
    pub fn from_pixmap(pixmap: &Pixmap) -> Self {
        let width = pixmap.width();
        let pixels = pixmap.pixels();
        let data = RgbaImage::from_fn(width, pixmap.height(), |x, y| {
            let color = pixels[(y * width + x) as usize].demultiply();
            Rgba([color.red(), color.green(), color.blue(), color.alpha()])
        });
        Self { data }
    }

    /// Returns the pixel dimensions of the image.
    pub fn dimensions(&self) -> SizePx {
        SizePx::new(self.data.width(), self.data.height())
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        self.data.get_pixel_checked(x, y).copied()
    }

    /// Encodes the image as PNG at `path`, replacing any existing file.
    pub fn save_png(&self, path: &Path) -> RenderResult<()> {
        self.data.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}
