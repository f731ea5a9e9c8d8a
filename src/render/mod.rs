//! Icon rendering with a vector path and a letter fallback.
//!
//! [`IconRenderer`] first hands the glyph's [`VectorDescription`] to a
//! [`Rasterize`] implementation. If that fails for any reason (parse error,
//! missing backend, I/O error while writing) it draws a
//! [`FallbackRenderer`] icon instead. Errors only reach the caller when
//! both paths fail.

pub mod fallback;
pub mod font;
pub mod svg;

pub use fallback::FallbackRenderer;
pub use font::{FontChoice, FontResolver};
pub use svg::{SvgRasterizer, UnavailableRasterizer};

use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::color::Color;
use crate::error::{RenderError, RenderResult};
use crate::glyph::{GlyphKind, VectorDescription};
use crate::icon::IconImage;

// ============================================================================
// Rasterize
// ============================================================================

/// Turns a vector description into a `size x size` raster image.
pub trait Rasterize {
    fn rasterize(&self, description: &VectorDescription, size: u32) -> RenderResult<IconImage>;
}

// ============================================================================
// RenderRequest
// ============================================================================

/// One (style, icon, size) combination with its resolved color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    /// Name of the style the color was resolved from.
    pub style: String,
    /// Icon name; its first letter is drawn by the fallback.
    pub icon: String,
    /// Foreground symbol for the vector path.
    pub glyph: GlyphKind,
    /// Background color.
    pub color: Color,
    /// Width and height of the output in pixels.
    pub size: u32,
}

impl RenderRequest {
    /// `icon_<icon>_<style>_<size>.png`
    pub fn file_name(&self) -> String {
        format!("icon_{}_{}_{}.png", self.icon, self.style, self.size)
    }

    pub fn description(&self) -> VectorDescription {
        VectorDescription::for_glyph(&self.glyph, self.color)
    }
}

// ============================================================================
// IconRenderer
// ============================================================================

/// Which path produced an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPath {
    /// Rasterized from the glyph's vector description.
    Vector,
    /// Drawn as a letter on a plain square.
    Fallback,
}

impl fmt::Display for RenderPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vector => f.write_str("vector"),
            Self::Fallback => f.write_str("fallback"),
        }
    }
}

/// Renders icons, degrading from the vector path to the letter fallback.
pub struct IconRenderer {
    rasterizer: Box<dyn Rasterize>,
    fallback: FallbackRenderer,
}

impl Default for IconRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl IconRenderer {
    /// A renderer using resvg and system-font fallback.
    pub fn new() -> Self {
        Self {
            rasterizer: Box::new(SvgRasterizer),
            fallback: FallbackRenderer::new(),
        }
    }

    /// Replaces the vector rasterizer.
    pub fn with_rasterizer(mut self, rasterizer: impl Rasterize + 'static) -> Self {
        self.rasterizer = Box::new(rasterizer);
        self
    }

    /// Replaces the fallback renderer.
    pub fn with_fallback(mut self, fallback: FallbackRenderer) -> Self {
        self.fallback = fallback;
        self
    }

    /// Renders `request` in memory.
    pub fn render(&self, request: &RenderRequest) -> RenderResult<(IconImage, RenderPath)> {
        match self.rasterizer.rasterize(&request.description(), request.size) {
            Ok(image) => Ok((image, RenderPath::Vector)),
            Err(err) => Ok((self.render_fallback(request, &err)?, RenderPath::Fallback)),
        }
    }

    /// Renders `request` and writes it as PNG to `path`.
    ///
    /// A failure anywhere on the vector path, including writing the file,
    /// is retried with the fallback.
    pub fn render_to_file(&self, request: &RenderRequest, path: &Path) -> RenderResult<RenderPath> {
        let vector = self
            .rasterizer
            .rasterize(&request.description(), request.size)
            .and_then(|image| image.save_png(path));

        match vector {
            Ok(()) => Ok(RenderPath::Vector),
            Err(err) => {
                self.render_fallback(request, &err)?.save_png(path)?;
                Ok(RenderPath::Fallback)
            }
        }
    }

    /// Draws the fallback icon after the vector path failed with `cause`.
    fn render_fallback(&self, request: &RenderRequest, cause: &RenderError) -> RenderResult<IconImage> {
        debug!(
            icon = %request.icon,
            style = %request.style,
            size = request.size,
            error = %cause,
            "vector render failed, using fallback"
        );
        self.fallback.render(&request.icon, request.color, request.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(icon: &str, glyph: GlyphKind, size: u32) -> RenderRequest {
        RenderRequest {
            style: "modern".into(),
            icon: icon.into(),
            glyph,
            color: Color::from_rgb_u32(0x1e90ff),
            size,
        }
    }

    fn builtin_fallback() -> FallbackRenderer {
        FallbackRenderer::with_fonts(FontResolver::empty())
    }

    /// Fails only for one size so both paths can be seen in one renderer.
    struct FailsAt(u32);

    impl Rasterize for FailsAt {
        fn rasterize(&self, description: &VectorDescription, size: u32) -> RenderResult<IconImage> {
            if size == self.0 {
                Err(RenderError::Unavailable)
            } else {
                SvgRasterizer.rasterize(description, size)
            }
        }
    }

    #[test]
    fn file_name_pattern() {
        let req = request("start", GlyphKind::Play, 28);
        assert_eq!(req.file_name(), "icon_start_modern_28.png");
    }

    #[test]
    fn vector_path_when_rasterizer_works() {
        let renderer = IconRenderer::new().with_fallback(builtin_fallback());
        let (image, path) = renderer.render(&request("start", GlyphKind::Play, 48)).unwrap();
        assert_eq!(path, RenderPath::Vector);
        assert_eq!(image.dimensions().width, 48);
    }

    #[test]
    fn falls_back_when_rasterizer_fails() {
        let renderer = IconRenderer::new()
            .with_rasterizer(FailsAt(28))
            .with_fallback(builtin_fallback());

        let (small, small_path) = renderer.render(&request("start", GlyphKind::Play, 28)).unwrap();
        let (_, large_path) = renderer.render(&request("start", GlyphKind::Play, 48)).unwrap();

        assert_eq!(small_path, RenderPath::Fallback);
        assert_eq!(large_path, RenderPath::Vector);
        assert_eq!(small.dimensions().width, 28);
        // The fallback square has no rounded corners.
        assert_eq!(small.pixel(0, 0).unwrap(), Color::from_rgb_u32(0x1e90ff).to_rgba());
    }

    #[test]
    fn render_to_file_falls_back_and_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon_start_modern_28.png");
        let renderer = IconRenderer::new()
            .with_rasterizer(UnavailableRasterizer)
            .with_fallback(builtin_fallback());

        let used = renderer
            .render_to_file(&request("start", GlyphKind::Play, 28), &path)
            .unwrap();
        assert_eq!(used, RenderPath::Fallback);
        assert_eq!(image::image_dimensions(&path).unwrap(), (28, 28));
    }

    #[test]
    fn in_memory_and_file_fallbacks_agree() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon_stop_modern_48.png");
        let renderer = IconRenderer::new()
            .with_rasterizer(UnavailableRasterizer)
            .with_fallback(builtin_fallback());
        let req = request("stop", GlyphKind::Stop, 48);

        let (in_memory, memory_path) = renderer.render(&req).unwrap();
        let file_path = renderer.render_to_file(&req, &path).unwrap();

        assert_eq!(memory_path, file_path);
        assert_eq!(image::open(&path).unwrap().to_rgba8(), in_memory.data);
    }

    #[test]
    fn both_paths_failing_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = IconRenderer::new()
            .with_rasterizer(UnavailableRasterizer)
            .with_fallback(builtin_fallback());

        // An empty icon name has no letter for the fallback to draw.
        let result = renderer.render_to_file(&request("", GlyphKind::Play, 28), &dir.path().join("x.png"));
        assert!(matches!(result, Err(RenderError::EmptyName)));
    }
}
