//! Vector glyph descriptions.
//!
//! A [`VectorDescription`] is a rounded-square background plus a handful of
//! white primitives drawn on a 100x100 canvas. It is plain data: the
//! rasterizer turns it into SVG markup and tests can inspect the shapes
//! directly.

use std::f64::consts::PI;
use std::fmt::{self, Write as _};

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Width and height of the canvas all primitives are placed on.
pub const CANVAS_SIZE: f32 = 100.0;

/// Corner radius of the background square.
pub const BACKGROUND_RADIUS: f32 = 18.0;

const GEAR_TEETH: usize = 6;
const GEAR_TOOTH_DISTANCE: f64 = 36.0;
const GEAR_TOOTH_RADIUS: f32 = 6.0;
const GEAR_HUB_RADIUS: f32 = 18.0;

const SAVE_LABEL: Color = Color::from_rgb_u32(0xcccccc);

// ============================================================================
// GlyphKind
// ============================================================================

/// The foreground symbol drawn on an icon.
///
/// Parsing never fails: identifiers outside the known set become
/// [`GlyphKind::Unknown`] and render as a plain centered circle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GlyphKind {
    Play,
    Gear,
    Loop,
    Trash,
    Save,
    Download,
    Undo,
    Stop,
    Unknown(String),
}

impl GlyphKind {
    /// Looks up a glyph kind by its identifier (e.g. `"play"`).
    pub fn from_name(name: &str) -> Self {
        match name {
            "play" => Self::Play,
            "gear" => Self::Gear,
            "loop" => Self::Loop,
            "trash" => Self::Trash,
            "save" => Self::Save,
            "download" => Self::Download,
            "undo" => Self::Undo,
            "stop" => Self::Stop,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Play => "play",
            Self::Gear => "gear",
            Self::Loop => "loop",
            Self::Trash => "trash",
            Self::Save => "save",
            Self::Download => "download",
            Self::Undo => "undo",
            Self::Stop => "stop",
            Self::Unknown(name) => name,
        }
    }

    /// Returns `true` unless this is an [`Unknown`](Self::Unknown) kind.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl From<&str> for GlyphKind {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

impl From<String> for GlyphKind {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<GlyphKind> for String {
    fn from(kind: GlyphKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for GlyphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Primitives
// ============================================================================

/// Stroke settings for open paths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    /// Line width in canvas units.
    pub width: f32,
    /// Rounded line caps instead of butt caps.
    pub round_cap: bool,
}

impl Stroke {
    /// A white stroke with rounded line caps.
    pub fn round(width: f32) -> Self {
        Self {
            color: Color::WHITE,
            width,
            round_cap: true,
        }
    }
}

/// A single drawable shape in canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// A filled closed polygon.
    Polygon {
        /// Vertices in drawing order.
        points: Vec<(f32, f32)>,
        fill: Color,
    },
    /// A filled circle centered at `(cx, cy)`.
    Circle {
        cx: f32,
        cy: f32,
        /// Radius in canvas units.
        r: f32,
        fill: Color,
    },
    /// A filled rectangle with its top-left corner at `(x, y)`.
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        /// Corner radius; `0.0` draws square corners.
        rx: f32,
        fill: Color,
    },
    /// An arbitrary outline, usually stroked with no fill.
    Path {
        /// SVG path data.
        d: String,
        /// `None` leaves the interior unpainted.
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
}

impl Primitive {
    fn polygon(points: &[(f32, f32)]) -> Self {
        Self::Polygon {
            points: points.to_vec(),
            fill: Color::WHITE,
        }
    }

    fn circle(cx: f32, cy: f32, r: f32) -> Self {
        Self::Circle {
            cx,
            cy,
            r,
            fill: Color::WHITE,
        }
    }

    fn rect(x: f32, y: f32, width: f32, height: f32, rx: f32) -> Self {
        Self::Rect {
            x,
            y,
            width,
            height,
            rx,
            fill: Color::WHITE,
        }
    }

    fn stroked_path(d: &str, width: f32) -> Self {
        Self::Path {
            d: d.to_string(),
            fill: None,
            stroke: Some(Stroke::round(width)),
        }
    }

    pub fn is_circle(&self) -> bool {
        matches!(self, Self::Circle { .. })
    }

    fn write_svg(&self, out: &mut String) -> fmt::Result {
        match self {
            Self::Polygon { points, fill } => {
                let points = points
                    .iter()
                    .map(|(x, y)| format!("{x},{y}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                write!(out, r#"<polygon points="{points}" fill="{fill}"/>"#)
            }
            Self::Circle { cx, cy, r, fill } => {
                write!(out, r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{fill}"/>"#)
            }
            Self::Rect {
                x,
                y,
                width,
                height,
                rx,
                fill,
            } => {
                write!(out, r#"<rect x="{x}" y="{y}" width="{width}" height="{height}""#)?;
                if *rx > 0.0 {
                    write!(out, r#" rx="{rx}""#)?;
                }
                write!(out, r#" fill="{fill}"/>"#)
            }
            Self::Path { d, fill, stroke } => {
                write!(out, r#"<path d="{d}""#)?;
                match fill {
                    Some(fill) => write!(out, r#" fill="{fill}""#)?,
                    None => out.push_str(r#" fill="none""#),
                }
                if let Some(stroke) = stroke {
                    write!(
                        out,
                        r#" stroke="{}" stroke-width="{}""#,
                        stroke.color, stroke.width
                    )?;
                    if stroke.round_cap {
                        out.push_str(r#" stroke-linecap="round""#);
                    }
                }
                out.push_str("/>");
                Ok(())
            }
        }
    }
}

// ============================================================================
// VectorDescription
// ============================================================================

/// A background color plus the foreground primitives of one glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorDescription {
    background: Color,
    primitives: Vec<Primitive>,
}

impl VectorDescription {
    /// Builds the description for `kind` on a `background` colored square.
    ///
    /// ```
    /// use icon_forge::{Color, GlyphKind, VectorDescription};
    ///
    /// let gear = VectorDescription::for_glyph(&GlyphKind::Gear, Color::from_rgb_u32(0x2b8cff));
    /// assert_eq!(gear.count_circles(), 7);
    /// ```
    pub fn for_glyph(kind: &GlyphKind, background: Color) -> Self {
        let primitives = match kind {
            GlyphKind::Play => vec![Primitive::polygon(&[(35.0, 25.0), (35.0, 75.0), (75.0, 50.0)])],
            GlyphKind::Gear => gear(),
            GlyphKind::Loop => vec![
                Primitive::stroked_path("M70,30 A20,20 0 1,0 50,30", 10.0),
                Primitive::polygon(&[(70.0, 30.0), (78.0, 30.0), (70.0, 38.0)]),
            ],
            GlyphKind::Trash => vec![
                Primitive::rect(40.0, 40.0, 30.0, 30.0, 3.0),
                Primitive::rect(35.0, 30.0, 40.0, 8.0, 2.0),
            ],
            GlyphKind::Save => vec![
                Primitive::rect(30.0, 30.0, 40.0, 40.0, 4.0),
                Primitive::Rect {
                    x: 40.0,
                    y: 40.0,
                    width: 20.0,
                    height: 20.0,
                    rx: 0.0,
                    fill: SAVE_LABEL,
                },
            ],
            GlyphKind::Download => vec![
                Primitive::rect(30.0, 40.0, 40.0, 20.0, 3.0),
                Primitive::stroked_path("M50 30 L50 55", 6.0),
                Primitive::polygon(&[(42.0, 47.0), (50.0, 55.0), (58.0, 47.0)]),
            ],
            GlyphKind::Undo => vec![
                Primitive::stroked_path("M40 55 C35 45, 35 35, 55 35", 8.0),
                Primitive::polygon(&[(40.0, 45.0), (30.0, 50.0), (40.0, 55.0)]),
            ],
            GlyphKind::Stop => vec![Primitive::rect(35.0, 35.0, 30.0, 30.0, 4.0)],
            GlyphKind::Unknown(_) => vec![Primitive::circle(50.0, 50.0, 20.0)],
        };

        Self {
            background,
            primitives,
        }
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// The foreground primitives, in paint order.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Number of circle primitives in the foreground.
    pub fn count_circles(&self) -> usize {
        self.primitives.iter().filter(|p| p.is_circle()).count()
    }

    /// Serializes the description to a standalone SVG document.
    pub fn to_svg(&self) -> String {
        let mut svg = String::with_capacity(512);
        // Writing into a String cannot fail.
        let _ = self.write_svg(&mut svg);
        svg
    }

    fn write_svg(&self, out: &mut String) -> fmt::Result {
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {CANVAS_SIZE} {CANVAS_SIZE}">"#
        )?;
        writeln!(
            out,
            r#"  <rect width="{CANVAS_SIZE}" height="{CANVAS_SIZE}" rx="{BACKGROUND_RADIUS}" fill="{}"/>"#,
            self.background
        )?;
        for primitive in &self.primitives {
            out.push_str("  ");
            primitive.write_svg(out)?;
            out.push('\n');
        }
        out.push_str("</svg>");
        Ok(())
    }
}

/// Hub circle plus teeth spaced every 60 degrees, coordinates rounded to
/// two decimals.
fn gear() -> Vec<Primitive> {
    let center = f64::from(CANVAS_SIZE) / 2.0;
    let mut primitives = vec![Primitive::circle(50.0, 50.0, GEAR_HUB_RADIUS)];
    primitives.extend((0..GEAR_TEETH).map(|i| {
        let angle = i as f64 * PI / 3.0;
        let cx = round2(center + GEAR_TOOTH_DISTANCE * angle.cos());
        let cy = round2(center + GEAR_TOOTH_DISTANCE * angle.sin());
        Primitive::circle(cx, cy, GEAR_TOOTH_RADIUS)
    }));
    primitives
}

fn round2(value: f64) -> f32 {
    ((value * 100.0).round() / 100.0) as f32
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const BLUE: Color = Color::from_rgb_u32(0x2b8cff);

    const ALL_KINDS: [GlyphKind; 8] = [
        GlyphKind::Play,
        GlyphKind::Gear,
        GlyphKind::Loop,
        GlyphKind::Trash,
        GlyphKind::Save,
        GlyphKind::Download,
        GlyphKind::Undo,
        GlyphKind::Stop,
    ];

    #[test]
    fn kind_names_round_trip() {
        for kind in ALL_KINDS {
            assert!(kind.is_known());
            assert_eq!(GlyphKind::from_name(kind.as_str()), kind);
        }
        let odd = GlyphKind::from_name("sparkle");
        assert_eq!(odd, GlyphKind::Unknown("sparkle".into()));
        assert!(!odd.is_known());
        assert_eq!(odd.as_str(), "sparkle");
    }

    #[test]
    fn gear_has_hub_and_six_teeth() {
        let gear = VectorDescription::for_glyph(&GlyphKind::Gear, BLUE);
        assert_eq!(gear.count_circles(), 7);
        assert_eq!(gear.primitives().len(), 7);

        // Tooth at 0 degrees sits on the x axis, 36 units from the center.
        assert_eq!(
            gear.primitives()[1],
            Primitive::Circle {
                cx: 86.0,
                cy: 50.0,
                r: 6.0,
                fill: Color::WHITE
            }
        );
        // Tooth at 60 degrees: 50 + 36 * cos(60) = 68, 50 + 36 * sin(60) = 81.18.
        match gear.primitives()[2] {
            Primitive::Circle { cx, cy, .. } => {
                assert!((cx - 68.0).abs() < 1e-4);
                assert!((cy - 81.18).abs() < 1e-4);
            }
            ref other => panic!("expected a circle, got {other:?}"),
        }
    }

    #[test]
    fn every_known_kind_has_foreground() {
        for kind in ALL_KINDS {
            let desc = VectorDescription::for_glyph(&kind, BLUE);
            assert!(!desc.primitives().is_empty(), "{kind} has no shapes");
            assert_eq!(desc.background(), BLUE);
        }
    }

    #[test]
    fn unknown_kind_is_centered_circle() {
        let desc = VectorDescription::for_glyph(&GlyphKind::from_name("whatever"), BLUE);
        assert_eq!(
            desc.primitives(),
            &[Primitive::Circle {
                cx: 50.0,
                cy: 50.0,
                r: 20.0,
                fill: Color::WHITE
            }]
        );
    }

    #[test]
    fn svg_markup_contains_background_and_shapes() {
        let svg = VectorDescription::for_glyph(&GlyphKind::Play, BLUE).to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 100 100""#));
        assert!(svg.contains(r##"rx="18" fill="#2b8cff""##));
        assert!(svg.contains(r##"<polygon points="35,25 35,75 75,50" fill="#ffffff"/>"##));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn stroked_paths_have_no_fill() {
        let svg = VectorDescription::for_glyph(&GlyphKind::Undo, BLUE).to_svg();
        assert!(svg.contains(
            r##"<path d="M40 55 C35 45, 35 35, 55 35" fill="none" stroke="#ffffff" stroke-width="8" stroke-linecap="round"/>"##
        ));
    }

    #[test]
    fn save_label_is_grey_and_square() {
        let svg = VectorDescription::for_glyph(&GlyphKind::Save, BLUE).to_svg();
        assert!(svg.contains(r##"<rect x="40" y="40" width="20" height="20" fill="#cccccc"/>"##));
    }
}
