//! # Document Snapshot
//!
//! The input representation for the converter. A snapshot is what an
//! editor-side exporter writes out: the canvas size, the fonts it used, and
//! the layer tree in stacking order (topmost first). Every value the core
//! needs from the host is already materialized here, including the tight
//! crop origin of each text layer, so conversion never touches the editor.
//!
//! The model mirrors the editor's own: layers are either text or groups,
//! groups own their children, and opacity plus blend mode live on every layer.

use serde::{Deserialize, Serialize};

/// A complete document snapshot ready for conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Canvas width in pixels.
    pub width: f64,
    /// Canvas height in pixels.
    pub height: f64,

    /// Layers in stacking order, topmost first.
    #[serde(default)]
    pub layers: Vec<Layer>,

    /// Fonts to register with the metrics oracle before converting.
    #[serde(default)]
    pub fonts: Vec<FontEntry>,
}

/// A font shipped alongside the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontEntry {
    /// Font family name as the editor reports it (e.g. "Roboto").
    pub family: String,
    /// Base64-encoded font data, a data URI, or an explicit file path.
    pub src: String,
}

/// A pixel position on the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An RGB color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Default for Rgb {
    fn default() -> Self {
        Self {
            r: 0.0,
            g: 0.0,
            b: 0.0,
        }
    }
}

/// A node in the layer tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    /// Layer name as shown in the editor.
    pub name: String,

    /// Hidden layers are ignored by the tree walker.
    #[serde(default = "default_true")]
    pub visible: bool,

    /// Opacity in percent (0-100).
    #[serde(default = "default_opacity")]
    pub opacity: f64,

    /// Blend mode of this layer.
    #[serde(default)]
    pub mode: BlendMode,

    /// Offset of the layer canvas within the image, in pixels.
    #[serde(default)]
    pub offsets: Point,

    /// What kind of layer this is.
    pub kind: LayerKind,
}

fn default_true() -> bool {
    true
}

fn default_opacity() -> f64 {
    100.0
}

/// The two kinds of layers in the tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LayerKind {
    /// A single-style text layer.
    #[serde(rename_all = "camelCase")]
    Text {
        /// Font family name.
        font: String,
        /// Font size, expressed in `unit`.
        font_size: f64,
        /// Unit the font size is expressed in.
        #[serde(default)]
        unit: FontUnit,
        /// Text color.
        #[serde(default)]
        color: Rgb,
        /// Raw text content. `None` when the layer carries per-character
        /// styling and the host could not extract plain text.
        #[serde(default)]
        text: Option<String>,
        /// Top-left corner of the glyphs after cropping away transparent
        /// margins, as reported by the host's crop probe.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        crop: Option<Point>,
    },

    /// A layer group. Children are in stacking order.
    Group {
        #[serde(default)]
        children: Vec<Layer>,
    },
}

/// The fields of a text layer, borrowed.
#[derive(Debug, Clone, Copy)]
pub struct TextFields<'a> {
    pub font: &'a str,
    pub font_size: f64,
    pub unit: FontUnit,
    pub color: Rgb,
    pub text: Option<&'a str>,
    pub crop: Option<Point>,
}

/// Units a text layer's font size can be expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontUnit {
    #[default]
    Px,
    Pt,
    Mm,
    In,
    Percent,
    #[serde(other)]
    Other,
}

/// Layer blend modes. Only `Normal` and `LegacyNormal` can be exported;
/// the others are named so error messages can say what was found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    #[default]
    Normal,
    LegacyNormal,
    Dissolve,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    Difference,
    Addition,
    Subtract,
    #[serde(other)]
    Other,
}

impl BlendMode {
    pub fn name(&self) -> &'static str {
        match self {
            BlendMode::Normal => "normal",
            BlendMode::LegacyNormal => "legacy-normal",
            BlendMode::Dissolve => "dissolve",
            BlendMode::Multiply => "multiply",
            BlendMode::Screen => "screen",
            BlendMode::Overlay => "overlay",
            BlendMode::Darken => "darken",
            BlendMode::Lighten => "lighten",
            BlendMode::Difference => "difference",
            BlendMode::Addition => "addition",
            BlendMode::Subtract => "subtract",
            BlendMode::Other => "other",
        }
    }
}

impl Layer {
    /// Create a visible, fully opaque text layer in pixel units whose glyphs
    /// start exactly at `offsets`.
    pub fn text(name: &str, text: &str, font: &str, font_size: f64, offsets: Point) -> Self {
        Self {
            name: name.to_string(),
            visible: true,
            opacity: 100.0,
            mode: BlendMode::Normal,
            offsets,
            kind: LayerKind::Text {
                font: font.to_string(),
                font_size,
                unit: FontUnit::Px,
                color: Rgb::default(),
                text: Some(text.to_string()),
                crop: Some(offsets),
            },
        }
    }

    /// Create a visible, fully opaque group.
    pub fn group(name: &str, children: Vec<Layer>) -> Self {
        Self {
            name: name.to_string(),
            visible: true,
            opacity: 100.0,
            mode: BlendMode::Normal,
            offsets: Point::default(),
            kind: LayerKind::Group { children },
        }
    }

    /// Borrowed view of a text layer's fields, `None` for groups.
    pub fn as_text(&self) -> Option<TextFields<'_>> {
        match &self.kind {
            LayerKind::Text {
                font,
                font_size,
                unit,
                color,
                text,
                crop,
            } => Some(TextFields {
                font,
                font_size: *font_size,
                unit: *unit,
                color: *color,
                text: text.as_deref(),
                crop: *crop,
            }),
            LayerKind::Group { .. } => None,
        }
    }

    /// Children of a group; empty for text layers.
    pub fn children(&self) -> &[Layer] {
        match &self.kind {
            LayerKind::Group { children } => children,
            LayerKind::Text { .. } => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_defaults() {
        let json = r#"{
            "name": "score",
            "kind": { "type": "Text", "font": "Roboto", "fontSize": 24, "text": "Score:" }
        }"#;
        let layer: Layer = serde_json::from_str(json).unwrap();
        assert!(layer.visible);
        assert_eq!(layer.opacity, 100.0);
        assert_eq!(layer.mode, BlendMode::Normal);
        match layer.kind {
            LayerKind::Text { unit, crop, .. } => {
                assert_eq!(unit, FontUnit::Px);
                assert!(crop.is_none());
            }
            LayerKind::Group { .. } => panic!("expected a text layer"),
        }
    }

    #[test]
    fn test_unknown_mode_and_unit_fall_back() {
        let json = r#"{
            "name": "x",
            "mode": "hsl-color",
            "kind": { "type": "Text", "font": "Roboto", "fontSize": 24, "unit": "cubits" }
        }"#;
        let layer: Layer = serde_json::from_str(json).unwrap();
        assert_eq!(layer.mode, BlendMode::Other);
        match layer.kind {
            LayerKind::Text { unit, text, .. } => {
                assert_eq!(unit, FontUnit::Other);
                assert!(text.is_none());
            }
            LayerKind::Group { .. } => panic!("expected a text layer"),
        }
    }

    #[test]
    fn test_group_children() {
        let json = r#"{
            "name": "M_row",
            "opacity": 50,
            "mode": "legacy-normal",
            "kind": { "type": "Group", "children": [
                { "name": "a", "kind": { "type": "Text", "font": "Roboto", "fontSize": 10, "text": "a" } }
            ] }
        }"#;
        let layer: Layer = serde_json::from_str(json).unwrap();
        assert!(layer.as_text().is_none());
        assert_eq!(layer.children().len(), 1);
        assert_eq!(layer.mode, BlendMode::LegacyNormal);
        assert_eq!(layer.opacity, 50.0);
    }
}
