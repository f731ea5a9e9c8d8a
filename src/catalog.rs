//! Icon and style tables.
//!
//! An [`IconCatalog`] is the immutable configuration a generation run works
//! from: which icons exist, which styles recolor them, and which pixel
//! sizes to emit. [`IconCatalog::builtin`] returns the stock tables; a
//! catalog can also be loaded from JSON.
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "icons": [{ "name": "start", "glyph": "play" }],
//!   "styles": [
//!     { "name": "default" },
//!     { "name": "modern", "palette": { "start": "#1e90ff" } }
//!   ],
//!   "sizes": [28, 48],
//!   "defaultColor": "#2b8cff"
//! }
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::CatalogError;
use crate::glyph::GlyphKind;

/// Background color for icons a style does not override.
pub const DEFAULT_COLOR: Color = Color::from_rgb_u32(0x2b8cff);

/// Pixel sizes emitted for every icon.
pub const DEFAULT_SIZES: [u32; 2] = [28, 48];

const BUILTIN_ICONS: [(&str, GlyphKind); 8] = [
    ("start", GlyphKind::Play),
    ("calibrate", GlyphKind::Gear),
    ("auto", GlyphKind::Loop),
    ("remove", GlyphKind::Trash),
    ("export", GlyphKind::Save),
    ("import", GlyphKind::Download),
    ("undo", GlyphKind::Undo),
    ("stop", GlyphKind::Stop),
];

const MODERN_PALETTE: [(&str, u32); 8] = [
    ("start", 0x1e90ff),
    ("calibrate", 0x5a6368),
    ("auto", 0x10a5b0),
    ("remove", 0xffb84d),
    ("export", 0x4fc3f7),
    ("import", 0x4caf50),
    ("undo", 0x6c757d),
    ("stop", 0xe64a45),
];

const SOFT_PALETTE: [(&str, u32); 8] = [
    ("start", 0x8fb9ff),
    ("calibrate", 0xb0b6bb),
    ("auto", 0x8fe0e8),
    ("remove", 0xffd39b),
    ("export", 0xbfe9ff),
    ("import", 0xb9e6b9),
    ("undo", 0xa7a7a7),
    ("stop", 0xff9b9b),
];

// ============================================================================
// Definitions
// ============================================================================

/// A named icon and the glyph drawn for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconDefinition {
    pub name: String,
    pub glyph: GlyphKind,
}

impl IconDefinition {
    pub fn new(name: impl Into<String>, glyph: impl Into<GlyphKind>) -> Self {
        Self {
            name: name.into(),
            glyph: glyph.into(),
        }
    }
}

/// A named palette of per-icon background overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleDefinition {
    pub name: String,

    /// Background overrides keyed by icon name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub palette: BTreeMap<String, Color>,
}

impl StyleDefinition {
    /// Creates a style with no overrides.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            palette: BTreeMap::new(),
        }
    }

    /// Adds a background override for `icon`.
    pub fn with_override(mut self, icon: impl Into<String>, color: Color) -> Self {
        self.palette.insert(icon.into(), color);
        self
    }

    /// The override for `icon`, if this style has one.
    pub fn color_for(&self, icon: &str) -> Option<Color> {
        self.palette.get(icon).copied()
    }

    fn from_table(name: &str, table: &[(&str, u32)]) -> Self {
        table
            .iter()
            .fold(Self::new(name), |style, (icon, rgb)| {
                style.with_override(*icon, Color::from_rgb_u32(*rgb))
            })
    }
}

// ============================================================================
// IconCatalog
// ============================================================================

/// Validated icon, style, and size tables.
///
/// Names are restricted to ASCII letters, digits and `-` so that
/// `icon_<icon>_<style>_<size>.png` can never collide between two
/// different combinations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "CatalogFile")]
pub struct IconCatalog {
    icons: Vec<IconDefinition>,
    styles: Vec<StyleDefinition>,
    sizes: Vec<u32>,
    default_color: Color,
}

/// Unvalidated catalog as read from JSON.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogFile {
    icons: Vec<IconDefinition>,
    styles: Vec<StyleDefinition>,
    #[serde(default = "default_sizes")]
    sizes: Vec<u32>,
    #[serde(default = "default_color")]
    default_color: Color,
}

fn default_sizes() -> Vec<u32> {
    DEFAULT_SIZES.to_vec()
}

fn default_color() -> Color {
    DEFAULT_COLOR
}

impl TryFrom<CatalogFile> for IconCatalog {
    type Error = CatalogError;

    fn try_from(file: CatalogFile) -> Result<Self, Self::Error> {
        Self::new(file.icons, file.styles, file.sizes, file.default_color)
    }
}

impl IconCatalog {
    /// Builds a catalog, rejecting tables that would produce ambiguous or
    /// invalid output files.
    pub fn new(
        icons: Vec<IconDefinition>,
        styles: Vec<StyleDefinition>,
        sizes: Vec<u32>,
        default_color: Color,
    ) -> Result<Self, CatalogError> {
        let mut icon_names = HashSet::new();
        for icon in &icons {
            check_name("icon", &icon.name)?;
            if !icon_names.insert(icon.name.as_str()) {
                return Err(CatalogError::DuplicateIcon(icon.name.clone()));
            }
        }

        let mut style_names = HashSet::new();
        for style in &styles {
            check_name("style", &style.name)?;
            if !style_names.insert(style.name.as_str()) {
                return Err(CatalogError::DuplicateStyle(style.name.clone()));
            }
            if let Some(icon) = style.palette.keys().find(|k| !icon_names.contains(k.as_str())) {
                return Err(CatalogError::UnknownOverride {
                    style: style.name.clone(),
                    icon: icon.clone(),
                });
            }
        }

        let mut seen_sizes = HashSet::new();
        for &size in &sizes {
            if size == 0 {
                return Err(CatalogError::InvalidSize(size));
            }
            if !seen_sizes.insert(size) {
                return Err(CatalogError::DuplicateSize(size));
            }
        }

        Ok(Self {
            icons,
            styles,
            sizes,
            default_color,
        })
    }

    /// The stock tables: 8 icons, styles `default`, `modern` and `soft`,
    /// sizes 28 and 48, default color `#2b8cff`.
    pub fn builtin() -> Self {
        Self {
            icons: BUILTIN_ICONS
                .into_iter()
                .map(|(name, glyph)| IconDefinition::new(name, glyph))
                .collect(),
            styles: vec![
                StyleDefinition::new("default"),
                StyleDefinition::from_table("modern", &MODERN_PALETTE),
                StyleDefinition::from_table("soft", &SOFT_PALETTE),
            ],
            sizes: DEFAULT_SIZES.to_vec(),
            default_color: DEFAULT_COLOR,
        }
    }

    pub fn icons(&self) -> &[IconDefinition] {
        &self.icons
    }

    pub fn styles(&self) -> &[StyleDefinition] {
        &self.styles
    }

    pub fn sizes(&self) -> &[u32] {
        &self.sizes
    }

    pub fn default_color(&self) -> Color {
        self.default_color
    }

    pub fn style(&self, name: &str) -> Option<&StyleDefinition> {
        self.styles.iter().find(|s| s.name == name)
    }

    /// Background color for `icon` under `style`: the style's override if
    /// it has one, otherwise the catalog default.
    pub fn resolve_color(&self, style: &StyleDefinition, icon: &str) -> Color {
        style.color_for(icon).unwrap_or(self.default_color)
    }

    /// Number of files a run over this catalog produces.
    pub fn combination_count(&self) -> usize {
        self.styles.len() * self.icons.len() * self.sizes.len()
    }

    /// Serializes the catalog to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses and validates a catalog from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and validates a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

impl Default for IconCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn check_name(kind: &'static str, name: &str) -> Result<(), CatalogError> {
    let valid = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
    if valid {
        Ok(())
    } else {
        Err(CatalogError::InvalidName {
            kind,
            name: name.to_string(),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables() {
        let catalog = IconCatalog::builtin();
        assert_eq!(catalog.icons().len(), 8);
        assert_eq!(catalog.styles().len(), 3);
        assert_eq!(catalog.sizes(), &[28, 48]);
        assert_eq!(catalog.combination_count(), 48);

        let names: Vec<_> = catalog.styles().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["default", "modern", "soft"]);

        let calibrate = &catalog.icons()[1];
        assert_eq!(calibrate.name, "calibrate");
        assert_eq!(calibrate.glyph, GlyphKind::Gear);
    }

    #[test]
    fn builtin_passes_validation() {
        let builtin = IconCatalog::builtin();
        let rebuilt = IconCatalog::new(
            builtin.icons().to_vec(),
            builtin.styles().to_vec(),
            builtin.sizes().to_vec(),
            builtin.default_color(),
        )
        .unwrap();
        assert_eq!(rebuilt, builtin);
    }

    #[test]
    fn resolve_color_uses_override_then_default() {
        let catalog = IconCatalog::builtin();
        let default = catalog.style("default").unwrap();
        let modern = catalog.style("modern").unwrap();

        assert_eq!(catalog.resolve_color(default, "start"), Color::from_rgb_u32(0x2b8cff));
        assert_eq!(catalog.resolve_color(modern, "start"), Color::from_rgb_u32(0x1e90ff));
        assert_eq!(catalog.resolve_color(modern, "stop"), Color::from_rgb_u32(0xe64a45));
    }

    #[test]
    fn rejects_names_that_could_collide() {
        let err = IconCatalog::new(
            vec![IconDefinition::new("a_b", "play")],
            vec![StyleDefinition::new("c")],
            vec![28],
            DEFAULT_COLOR,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidName { kind: "icon", .. }));

        let err = IconCatalog::new(vec![], vec![StyleDefinition::new("")], vec![28], DEFAULT_COLOR)
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidName { kind: "style", .. }));
    }

    #[test]
    fn rejects_duplicates_and_bad_sizes() {
        let icons = vec![IconDefinition::new("x", "play"), IconDefinition::new("x", "gear")];
        assert!(matches!(
            IconCatalog::new(icons, vec![], vec![28], DEFAULT_COLOR),
            Err(CatalogError::DuplicateIcon(name)) if name == "x"
        ));

        let styles = vec![StyleDefinition::new("s"), StyleDefinition::new("s")];
        assert!(matches!(
            IconCatalog::new(vec![], styles, vec![28], DEFAULT_COLOR),
            Err(CatalogError::DuplicateStyle(_))
        ));

        assert!(matches!(
            IconCatalog::new(vec![], vec![], vec![0], DEFAULT_COLOR),
            Err(CatalogError::InvalidSize(0))
        ));
        assert!(matches!(
            IconCatalog::new(vec![], vec![], vec![28, 28], DEFAULT_COLOR),
            Err(CatalogError::DuplicateSize(28))
        ));
    }

    #[test]
    fn rejects_override_for_unknown_icon() {
        let styles = vec![StyleDefinition::new("s").with_override("ghost", Color::WHITE)];
        let err = IconCatalog::new(
            vec![IconDefinition::new("start", "play")],
            styles,
            vec![28],
            DEFAULT_COLOR,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownOverride { icon, .. } if icon == "ghost"));
    }

    #[test]
    fn json_round_trip_preserves_builtin() {
        let json = IconCatalog::builtin().to_json_pretty().unwrap();
        assert!(json.contains("\"defaultColor\": \"#2b8cff\""));
        assert!(json.contains("\"glyph\": \"gear\""));

        let restored = IconCatalog::from_json(&json).unwrap();
        assert_eq!(restored, IconCatalog::builtin());
    }

    #[test]
    fn json_defaults_sizes_and_color() {
        let json = r##"{
            "icons": [{ "name": "start", "glyph": "sparkle" }],
            "styles": [{ "name": "plain" }]
        }"##;
        let catalog = IconCatalog::from_json(json).unwrap();
        assert_eq!(catalog.sizes(), &DEFAULT_SIZES);
        assert_eq!(catalog.default_color(), DEFAULT_COLOR);
        assert_eq!(catalog.icons()[0].glyph, GlyphKind::Unknown("sparkle".into()));
    }

    #[test]
    fn json_is_validated() {
        let json = r##"{
            "icons": [{ "name": "start", "glyph": "play" }],
            "styles": [{ "name": "bad_name" }]
        }"##;
        assert!(matches!(
            IconCatalog::from_json(json),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(
            IconCatalog::load(&missing),
            Err(CatalogError::Read { .. })
        ));
    }
}
