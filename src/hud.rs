//! HUD definition output.
//!
//! The game reads its HUD from a JSON object with a version and a list of
//! elements. Only text elements are produced here; every field the converter
//! has no opinion about is written with the game's default.

use serde::{Deserialize, Serialize};

use crate::geometry::{round_exported, Position};

/// One text element of a HUD definition. Fields serialize in this order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudElement {
    /// Element type, always `"text"`.
    pub t: String,
    /// Group id, `-1` for ungrouped.
    pub gid: i32,
    /// Left edge in percent of screen width.
    pub x: f64,
    /// Top edge in percent of screen height.
    pub y: f64,
    pub pivot: String,
    pub txt: String,
    pub font: String,
    /// Font size in percent of screen height.
    #[serde(rename = "fontSize")]
    pub font_size: f64,
    /// `#rrggbbaa`.
    pub color: String,
    pub shadow: u8,
    pub hide_dead: u8,
    pub native: u8,
}

impl HudElement {
    /// A text element with the default group, pivot, font and flags.
    /// Position and size are rounded to the exported precision.
    pub fn text(position: Position, txt: String, font_size: f64, color: String) -> Self {
        Self {
            t: "text".to_string(),
            gid: -1,
            x: round_exported(position.x),
            y: round_exported(position.y),
            pivot: "top-left".to_string(),
            txt,
            font: "default".to_string(),
            font_size: round_exported(font_size),
            color,
            shadow: 0,
            hide_dead: 0,
            native: 1,
        }
    }
}

/// A complete HUD definition as stored in the game settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudDefinition {
    pub version: f64,
    pub elements: Vec<HudElement>,
}

impl HudDefinition {
    pub fn new(version: f64, elements: Vec<HudElement>) -> Self {
        Self { version, elements }
    }

    /// Compact JSON, as written into the settings file.
    pub fn to_json(&self) -> String {
        // Plain strings and numbers; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_field_order_and_constants() {
        let element = HudElement::text(
            Position { x: 10.0, y: 20.0 },
            "Score:".to_string(),
            5.0,
            "#ff0000ff".to_string(),
        );
        let json = serde_json::to_string(&element).unwrap();
        assert_eq!(
            json,
            r##"{"t":"text","gid":-1,"x":10.0,"y":20.0,"pivot":"top-left","txt":"Score:","font":"default","fontSize":5.0,"color":"#ff0000ff","shadow":0,"hide_dead":0,"native":1}"##
        );
    }

    #[test]
    fn test_definition_wraps_elements() {
        let def = HudDefinition::new(1.7, vec![]);
        assert_eq!(def.to_json(), r#"{"version":1.7,"elements":[]}"#);
    }

    #[test]
    fn test_values_rounded() {
        let element = HudElement::text(
            Position {
                x: 100.0 / 3.0,
                y: 0.0,
            },
            "a".to_string(),
            2.0 / 3.0,
            "#000000ff".to_string(),
        );
        assert_eq!(element.x, 33.33333333);
        assert_eq!(element.font_size, 0.66666667);
    }
}
