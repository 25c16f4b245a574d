//! Structured error types for the texthud converter.
//!
//! Structural violations abort a conversion outright. Whitespace
//! approximation misses and missing crop origins are not errors; they travel
//! as [`Warning`]s next to the converted elements.

use std::fmt;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, HudError>;

/// The unified error type returned by all public texthud API functions.
#[derive(Debug, thiserror::Error)]
pub enum HudError {
    /// JSON input failed to parse as a valid document snapshot.
    #[error("Failed to parse document: {source}{}", format_hint(.hint))]
    ParseError {
        source: serde_json::Error,
        hint: String,
    },

    /// A layer broke one of the structural rules. The whole conversion stops.
    #[error(transparent)]
    Structural(#[from] Violation),

    /// A font required by the conversion is not registered with the metrics oracle.
    #[error("Font '{0}' is not available, please install or register it")]
    MissingFont(String),

    /// A font could not be loaded or parsed.
    #[error("Font error: {0}")]
    FontError(String),

    /// The document validated but produced nothing to export.
    #[error("No elements converted")]
    NoElements,

    /// The settings file could not be updated.
    #[error("Settings error: {0}")]
    SettingsError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_hint(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for HudError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the document snapshot schema. Check field names and types.".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input, is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        HudError::ParseError { source: e, hint }
    }
}

/// A structural rule broken by a layer. Each variant names the offending
/// layer (and group, where one is involved) so the author can find it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Violation {
    #[error("The canvas must have a positive size, found {width}x{height}.")]
    InvalidCanvas { width: f64, height: f64 },

    #[error("In Layer: [{layer}], please use pixels as the font size scale.")]
    NonPixelUnit { layer: String },

    #[error("In Layer: [{layer}], the font size must be positive, found {size}.")]
    InvalidFontSize { layer: String, size: f64 },

    #[error("In Layer: [{layer}], please use one of the {supported:?} fonts.")]
    UnsupportedFont {
        layer: String,
        font: String,
        supported: Vec<String>,
    },

    #[error("In Layer: [{layer}], please remove style from text.")]
    StyledText { layer: String },

    #[error("In Layer: [{layer}], the text is empty.")]
    EmptyText { layer: String },

    #[error("In Layer: [{layer}], please only use one line of text.")]
    MultiLine { layer: String },

    #[error("In Layer: [{layer}], don't include spaces manually, please use merge groups instead.")]
    RawWhitespace { layer: String },

    #[error("In Layer: [{layer}], please use either normal or normal (legacy) blending mode, found {mode}.")]
    UnsupportedBlendMode { layer: String, mode: String },

    #[error("In Layer: [{layer}], the text starts outside the canvas.")]
    OutsideCanvas { layer: String },

    #[error("In Group: [{group}], cannot combine sub groups (found [{layer}]).")]
    NestedGroup { group: String, layer: String },

    #[error("In Group: [{group}], Layer: [{layer}] is not horizontally aligned with the leftmost element.")]
    Misaligned { group: String, layer: String },

    #[error("In Group: [{group}], Layer: [{layer}] is not the same size as the leftmost element.")]
    SizeMismatch { group: String, layer: String },

    #[error("In Group: [{group}], Layer: [{layer}] is not using the same font as the leftmost element.")]
    FontMismatch { group: String, layer: String },

    #[error("In Group: [{group}], Layer: [{left}] is overlapping with Layer: [{right}].")]
    Overlapping {
        group: String,
        left: String,
        right: String,
    },
}

/// A non-fatal problem found while converting.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// The whitespace solver could not reproduce a gap exactly.
    ApproximationMismatch {
        group: String,
        layer: String,
        target: f64,
        achieved: f64,
    },
    /// The snapshot had no crop origin for the layer, so its offsets were
    /// exported as is, padding included.
    MissingCrop { layer: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::ApproximationMismatch {
                group,
                layer,
                target,
                achieved,
            } => write!(
                f,
                "In Group: [{}], whitespace error after Layer: [{}], Target size: {}, Actual Size: {}.",
                group, layer, target, achieved
            ),
            Warning::MissingCrop { layer } => write!(
                f,
                "In Layer: [{}], no tight crop origin, position taken from the layer offsets.",
                layer
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_carries_hint() {
        let err: HudError = serde_json::from_str::<serde_json::Value>("{\"a\": 1,}")
            .unwrap_err()
            .into();
        let msg = err.to_string();
        assert!(msg.starts_with("Failed to parse document"));
        assert!(msg.contains("Hint: Check for trailing commas"));
    }

    #[test]
    fn test_violation_names_group_and_layer() {
        let err = HudError::from(Violation::Misaligned {
            group: "M_score".to_string(),
            layer: "digits".to_string(),
        });
        let msg = err.to_string();
        assert!(msg.contains("[M_score]"));
        assert!(msg.contains("[digits]"));
        assert!(msg.contains("not horizontally aligned"));
    }

    #[test]
    fn test_warning_reports_widths() {
        let w = Warning::ApproximationMismatch {
            group: "M_g".to_string(),
            layer: "a".to_string(),
            target: 7.0,
            achieved: 6.0,
        };
        assert_eq!(
            w.to_string(),
            "In Group: [M_g], whitespace error after Layer: [a], Target size: 7, Actual Size: 6."
        );
    }

    #[test]
    fn test_invalid_canvas_message() {
        let v = Violation::InvalidCanvas {
            width: 1920.0,
            height: 0.0,
        };
        assert_eq!(
            v.to_string(),
            "The canvas must have a positive size, found 1920x0."
        );
    }
}
