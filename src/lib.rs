//! icon-forge: procedural icon asset generation
//!
//! This crate renders a fixed set of application icons (a white glyph on a
//! colored rounded square) in several color styles and sizes, writing each
//! as a PNG. Rendering goes through resvg; when that fails an icon degrades
//! to its first letter drawn on a plain square.
//!
//! # Example
//!
//! ```no_run
//! use icon_forge::{Generator, IconCatalog};
//!
//! let report = Generator::new(IconCatalog::builtin(), "app/assets").run().unwrap();
//! assert_eq!(report.written().count(), 48);
//! ```
//!
//! # Rendering a single icon
//!
//! ```
//! use icon_forge::{Color, GlyphKind, IconRenderer, RenderPath, RenderRequest};
//!
//! let request = RenderRequest {
//!     style: "modern".into(),
//!     icon: "calibrate".into(),
//!     glyph: GlyphKind::Gear,
//!     color: Color::from_rgb_u32(0x5a6368),
//!     size: 48,
//! };
//! let (image, path) = IconRenderer::new().render(&request).unwrap();
//! assert_eq!(path, RenderPath::Vector);
//! assert_eq!(image.dimensions().width, 48);
//! ```

mod catalog;
mod color;
mod error;
mod generator;
mod glyph;
mod icon;
mod render;

pub use catalog::{IconCatalog, IconDefinition, StyleDefinition, DEFAULT_COLOR, DEFAULT_SIZES};
pub use color::Color;
pub use error::{CatalogError, ColorError, GenerateError, RenderError, RenderResult};
pub use generator::{GeneratedIcon, GenerationReport, Generator, IconStatus};
pub use glyph::{GlyphKind, Primitive, Stroke, VectorDescription, CANVAS_SIZE};
pub use icon::{IconImage, RectPx, SizePx};
pub use render::font::{GlyphOutline, DEFAULT_FONT_FAMILIES};
pub use render::{
    FallbackRenderer, FontChoice, FontResolver, IconRenderer, Rasterize, RenderPath,
    RenderRequest, SvgRasterizer, UnavailableRasterizer,
};
