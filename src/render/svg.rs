//! Vector rasterization using resvg/usvg.

use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};

use super::Rasterize;
use crate::error::{RenderError, RenderResult};
use crate::glyph::VectorDescription;
use crate::icon::IconImage;

/// Rasterizes vector descriptions with resvg.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgRasterizer;

impl Rasterize for SvgRasterizer {
    fn rasterize(&self, description: &VectorDescription, size: u32) -> RenderResult<IconImage> {
        render_svg(&description.to_svg(), size)
    }
}

/// A rasterizer with no backend; every call fails with
/// [`RenderError::Unavailable`].
///
/// Plugging this into an [`IconRenderer`](super::IconRenderer) forces every
/// icon through the fallback path.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableRasterizer;

impl Rasterize for UnavailableRasterizer {
    fn rasterize(&self, _description: &VectorDescription, _size: u32) -> RenderResult<IconImage> {
        Err(RenderError::Unavailable)
    }
}

/// Renders SVG markup to an exactly `size x size` image.
///
/// The document is stretched to fill the square, so non-square documents
/// are distorted rather than letterboxed.
pub fn render_svg(svg_data: &str, size: u32) -> RenderResult<IconImage> {
    if size == 0 {
        return Err(RenderError::InvalidSize(size));
    }

    let opts = Options::default();
    let tree = Tree::from_str(svg_data, &opts)?;

    let svg_size = tree.size();
    let transform = Transform::from_scale(
        size as f32 / svg_size.width(),
        size as f32 / svg_size.height(),
    );

    let mut pixmap = Pixmap::new(size, size).ok_or(RenderError::Pixmap(size))?;
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    Ok(IconImage::from_pixmap(&pixmap))
}
