//! Best-effort font lookup for the fallback renderer.
//!
//! Families are tried in order against a fontdb database. When none of
//! them is installed the renderer draws with [`builtin_glyph`], a small
//! bitmap alphabet that needs no font files at all.

use resvg::tiny_skia::{Path, PathBuilder, Rect};
use resvg::usvg::fontdb::{self, Database, Family, Query};
use tracing::debug;

/// Families tried, in order, when no explicit list is given.
pub const DEFAULT_FONT_FAMILIES: [&str; 4] = ["Segoe UI Emoji", "Arial", "DejaVu Sans", "Liberation Sans"];

/// Width of a [`builtin_glyph`] in cells.
pub const BUILTIN_GLYPH_WIDTH: u32 = 5;

/// Height of a [`builtin_glyph`] in cells.
pub const BUILTIN_GLYPH_HEIGHT: u32 = 7;

/// The outcome of font resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontChoice {
    /// A face from the database.
    Face { family: String, id: fontdb::ID },
    /// No listed family is available; draw with the built-in bitmap glyphs.
    Builtin,
}

/// A letter outline in font units, y axis pointing up.
#[derive(Debug, Clone)]
pub struct GlyphOutline {
    pub path: Path,
    pub units_per_em: f32,
}

impl GlyphOutline {
    /// Bounding box of the outline, or `None` when it has no area.
    pub fn measure(&self) -> Option<Rect> {
        let bounds = self.path.bounds();
        (bounds.width() > 0.0 && bounds.height() > 0.0).then_some(bounds)
    }
}

/// Resolves a font once and hands out letter outlines from it.
pub struct FontResolver {
    db: Database,
    choice: FontChoice,
}

impl FontResolver {
    /// Loads system fonts and resolves [`DEFAULT_FONT_FAMILIES`].
    pub fn system() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        debug!(faces = db.len(), "loaded system fonts");
        Self::from_database(db, &DEFAULT_FONT_FAMILIES)
    }

    /// Resolves `families` in order against an existing database.
    pub fn from_database<S: AsRef<str>>(db: Database, families: &[S]) -> Self {
        let choice = resolve(&db, families);
        Self { db, choice }
    }

    /// A resolver with no fonts; always draws built-in glyphs.
    pub fn empty() -> Self {
        Self {
            db: Database::new(),
            choice: FontChoice::Builtin,
        }
    }

    pub fn choice(&self) -> &FontChoice {
        &self.choice
    }

    /// Outlines `letter` in the resolved face.
    ///
    /// Returns `None` for [`FontChoice::Builtin`], when the face cannot be
    /// parsed, or when it has no outline for the letter.
    pub fn outline(&self, letter: char) -> Option<GlyphOutline> {
        let FontChoice::Face { id, .. } = &self.choice else {
            return None;
        };

        self.db
            .with_face_data(*id, |data, face_index| {
                let face = ttf_parser::Face::parse(data, face_index).ok()?;
                let glyph = face.glyph_index(letter)?;
                let mut sink = PathSink(PathBuilder::new());
                face.outline_glyph(glyph, &mut sink)?;
                Some(GlyphOutline {
                    path: sink.0.finish()?,
                    units_per_em: f32::from(face.units_per_em()),
                })
            })
            .flatten()
    }
}

fn resolve<S: AsRef<str>>(db: &Database, families: &[S]) -> FontChoice {
    for family in families {
        let family = family.as_ref();
        let query = Query {
            families: &[Family::Name(family)],
            ..Query::default()
        };
        match db.query(&query) {
            Some(id) => {
                debug!(family, "resolved fallback font");
                return FontChoice::Face {
                    family: family.to_string(),
                    id,
                };
            }
            None => debug!(family, "font family not available"),
        }
    }
    debug!("no fallback font available, using built-in glyphs");
    FontChoice::Builtin
}

/// Adapts ttf-parser outline callbacks to a tiny-skia path.
struct PathSink(PathBuilder);

impl ttf_parser::OutlineBuilder for PathSink {
    fn move_to(&mut self, x: f32, y: f32) {
        self.0.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.0.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.0.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.0.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.0.close();
    }
}

// ============================================================================
// Built-in glyphs
// ============================================================================

/// 5x7 bitmap for an uppercase letter or digit.
///
/// Each row holds 5 bits, most significant bit on the left. Characters
/// outside `A-Z` and `0-9` map to a solid block.
pub fn builtin_glyph(c: char) -> [u8; 7] {
    match c {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        _ => [0b11111; 7],
    }
}
