//! Letter-on-a-square fallback icons.

use std::cell::OnceCell;

use resvg::tiny_skia::{FillRule, Paint, Pixmap, Rect, Transform};
use tracing::debug;

use super::font::{
    builtin_glyph, FontResolver, GlyphOutline, BUILTIN_GLYPH_HEIGHT, BUILTIN_GLYPH_WIDTH,
};
use crate::color::Color;
use crate::error::{RenderError, RenderResult};
use crate::icon::{IconImage, RectPx};

/// Letter height as a fraction of the icon size.
pub const LETTER_SCALE: f32 = 0.6;

/// Draws the icon name's first letter in white on a solid square.
///
/// Fonts are resolved lazily on first use, so a run where every vector
/// render succeeds never scans the system font directories.
#[derive(Default)]
pub struct FallbackRenderer {
    fonts: OnceCell<FontResolver>,
}

impl FallbackRenderer {
    /// A renderer that resolves system fonts on first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// A renderer that draws with an already resolved font.
    pub fn with_fonts(fonts: FontResolver) -> Self {
        Self {
            fonts: OnceCell::from(fonts),
        }
    }

    fn fonts(&self) -> &FontResolver {
        self.fonts.get_or_init(FontResolver::system)
    }

    /// Renders a `size x size` square of `color` with the uppercase first
    /// letter of `name` centered in white.
    pub fn render(&self, name: &str, color: Color, size: u32) -> RenderResult<IconImage> {
        if size == 0 {
            return Err(RenderError::InvalidSize(size));
        }
        let first = name.chars().next().ok_or(RenderError::EmptyName)?;
        let letter = first.to_uppercase().next().unwrap_or(first);

        let mut pixmap = Pixmap::new(size, size).ok_or(RenderError::Pixmap(size))?;
        pixmap.fill(color.to_skia());

        let letter_px = (size as f32 * LETTER_SCALE).floor();
        let mut paint = Paint::default();
        paint.set_color(Color::WHITE.to_skia());
        paint.anti_alias = true;

        let outline = self.fonts().outline(letter);
        draw_letter(&mut pixmap, &paint, outline.as_ref(), letter, letter_px, size);

        Ok(IconImage::from_pixmap(&pixmap))
    }
}

/// Draws `letter` from its font outline when it can be measured, otherwise
/// as a built-in glyph centered in a `letter_px` box.
fn draw_letter(
    pixmap: &mut Pixmap,
    paint: &Paint,
    outline: Option<&GlyphOutline>,
    letter: char,
    letter_px: f32,
    size: u32,
) {
    match outline.and_then(|o| o.measure().map(|bounds| (o, bounds))) {
        Some((outline, bounds)) => draw_outline(pixmap, paint, outline, bounds, letter_px, size),
        None => {
            debug!(%letter, size, "drawing built-in glyph");
            draw_builtin(pixmap, paint, letter, letter_px, size);
        }
    }
}

/// Fills a font outline scaled to `letter_px` per em, centered by its
/// measured `bounds`.
fn draw_outline(
    pixmap: &mut Pixmap,
    paint: &Paint,
    outline: &GlyphOutline,
    bounds: Rect,
    letter_px: f32,
    size: u32,
) {
    let scale = letter_px / outline.units_per_em;
    let size = size as f32;

    let width = bounds.width() * scale;
    let height = bounds.height() * scale;
    let tx = (size - width) / 2.0 - bounds.left() * scale;
    let ty = (size - height) / 2.0 + bounds.bottom() * scale;

    // Font units point up; flip y while scaling.
    let transform = Transform::from_row(scale, 0.0, 0.0, -scale, tx, ty);
    pixmap.fill_path(&outline.path, paint, FillRule::Winding, transform, None);
}

/// Draws a built-in bitmap glyph with cells sized to fit `letter_px`.
fn draw_builtin(pixmap: &mut Pixmap, paint: &Paint, letter: char, letter_px: f32, size: u32) {
    let cell = ((letter_px as u32) / BUILTIN_GLYPH_HEIGHT).max(1);
    let area = RectPx::centered(size, BUILTIN_GLYPH_WIDTH * cell, BUILTIN_GLYPH_HEIGHT * cell);

    for (row, bits) in builtin_glyph(letter).iter().enumerate() {
        for col in 0..BUILTIN_GLYPH_WIDTH {
            if bits & (1 << (BUILTIN_GLYPH_WIDTH - 1 - col)) == 0 {
                continue;
            }
            let x = area.x + (col * cell) as i32;
            let y = area.y + (row as u32 * cell) as i32;
            if let Some(rect) = Rect::from_xywh(x as f32, y as f32, cell as f32, cell as f32) {
                pixmap.fill_rect(rect, paint, Transform::identity(), None);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resvg::tiny_skia::PathBuilder;

    const ORANGE: Color = Color::from_rgb_u32(0xffb84d);

    fn builtin_renderer() -> FallbackRenderer {
        FallbackRenderer::with_fonts(FontResolver::empty())
    }

    fn count_pixels(img: &IconImage, color: Color) -> usize {
        img.data.pixels().filter(|p| **p == color.to_rgba()).count()
    }

    #[test]
    fn renders_exact_size_square() {
        for size in [28, 48] {
            let img = builtin_renderer().render("remove", ORANGE, size).unwrap();
            assert_eq!(img.dimensions().width, size);
            assert_eq!(img.dimensions().height, size);
            assert_eq!(img.pixel(0, 0).unwrap(), ORANGE.to_rgba());
            assert_eq!(img.pixel(size - 1, size - 1).unwrap(), ORANGE.to_rgba());
        }
    }

    #[test]
    fn letter_is_white_and_centered() {
        // 48px: 0.6 * 48 = 28px box, 4px cells, a 20x28 glyph at (14, 10).
        let img = builtin_renderer().render("import", ORANGE, 48).unwrap();

        // 'I' has a full-width top bar from column 1 to 3.
        assert_eq!(img.pixel(14 + 4, 10).unwrap(), Color::WHITE.to_rgba());
        assert_eq!(img.pixel(14 + 12, 10 + 3).unwrap(), Color::WHITE.to_rgba());
        // Column 0 of 'I' is empty.
        assert_eq!(img.pixel(14, 10 + 8).unwrap(), ORANGE.to_rgba());
        assert!(count_pixels(&img, Color::WHITE) > 0);
    }

    #[test]
    fn uses_uppercase_first_letter() {
        let lower = builtin_renderer().render("stop", ORANGE, 28).unwrap();
        let upper = builtin_renderer().render("Stop", ORANGE, 28).unwrap();
        assert_eq!(lower, upper);

        let other = builtin_renderer().render("undo", ORANGE, 28).unwrap();
        assert_ne!(lower, other);
    }

    #[test]
    fn unmeasurable_outline_draws_builtin_glyph() {
        let mut line = PathBuilder::new();
        line.move_to(0.0, 0.0);
        line.line_to(500.0, 0.0);
        let outline = GlyphOutline {
            path: line.finish().unwrap(),
            units_per_em: 1000.0,
        };
        assert!(outline.measure().is_none());

        let mut pixmap = Pixmap::new(48, 48).unwrap();
        pixmap.fill(ORANGE.to_skia());
        let mut paint = Paint::default();
        paint.set_color(Color::WHITE.to_skia());

        draw_letter(&mut pixmap, &paint, Some(&outline), 'C', 28.0, 48);

        let img = IconImage::from_pixmap(&pixmap);
        assert!(count_pixels(&img, Color::WHITE) > 0, "no letter was drawn");
        assert_eq!(img, builtin_renderer().render("calibrate", ORANGE, 48).unwrap());
    }

    #[test]
    fn tiny_sizes_still_render() {
        let img = builtin_renderer().render("auto", ORANGE, 1).unwrap();
        assert_eq!(img.dimensions().width, 1);
    }

    #[test]
    fn rejects_empty_name_and_zero_size() {
        assert!(matches!(
            builtin_renderer().render("", ORANGE, 28),
            Err(RenderError::EmptyName)
        ));
        assert!(matches!(
            builtin_renderer().render("auto", ORANGE, 0),
            Err(RenderError::InvalidSize(0))
        ));
    }

    #[test]
    fn system_fonts_draw_something_visible() {
        let img = FallbackRenderer::new().render("calibrate", ORANGE, 48).unwrap();
        assert_eq!(img.dimensions().width, 48);
        assert!(count_pixels(&img, ORANGE) < 48 * 48, "no letter was drawn");
    }
}
