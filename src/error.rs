//! Error types for icon generation.

use std::path::PathBuf;

use resvg::usvg;
use thiserror::Error;

/// Errors produced while parsing a color string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// The value is not `#rgb` or `#rrggbb` hex notation.
    #[error("invalid hex color {0:?}")]
    InvalidHex(String),
}

/// Errors produced while building or loading an [`IconCatalog`](crate::IconCatalog).
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A name is empty or contains characters that would make file names ambiguous.
    #[error("invalid {kind} name {name:?}: use ASCII letters, digits and '-' only")]
    InvalidName { kind: &'static str, name: String },

    /// Two icons share the same name.
    #[error("duplicate icon name {0:?}")]
    DuplicateIcon(String),

    /// Two styles share the same name.
    #[error("duplicate style name {0:?}")]
    DuplicateStyle(String),

    /// A style overrides the color of an icon the catalog does not define.
    #[error("style {style:?} overrides unknown icon {icon:?}")]
    UnknownOverride { style: String, icon: String },

    /// Output sizes must be positive.
    #[error("invalid output size {0}")]
    InvalidSize(u32),

    /// The same output size is listed twice.
    #[error("duplicate output size {0}")]
    DuplicateSize(u32),

    /// The catalog JSON could not be parsed or written.
    #[error("catalog json: {0}")]
    Json(#[from] serde_json::Error),

    /// The catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors produced by a single render attempt.
///
/// These never abort a generation run; the driver downgrades them to a
/// fallback attempt or a recorded failure.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The requested pixel size is zero.
    #[error("invalid render size {0}")]
    InvalidSize(u32),

    /// The icon name has no first letter to draw.
    #[error("icon name is empty")]
    EmptyName,

    /// The vector description could not be parsed by the rasterizer.
    #[error("failed to parse vector description: {0}")]
    Parse(#[from] usvg::Error),

    /// The pixel buffer could not be allocated.
    #[error("failed to allocate a {0}x{0} pixmap")]
    Pixmap(u32),

    /// The rasterizer has no backend to render with.
    #[error("vector rasterization is unavailable")]
    Unavailable,

    /// The PNG could not be encoded or written.
    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
}

/// Errors that stop a generation run.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// The output directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog was rejected.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Progress lines could not be written to the console.
    #[error("failed to write progress output: {0}")]
    Console(#[source] std::io::Error),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
