//! Pixel to percentage conversion.
//!
//! HUD coordinates are percentages so they survive resolution changes. x is
//! relative to the canvas width and y to its height; font sizes follow the
//! height only, which is what the game scales text by.

use crate::model::Point;

/// Decimal places kept in exported numbers.
const PRECISION: i32 = 8;

/// A top-left origin in percent of the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Convert a tight-crop origin to canvas percentages.
pub fn normalize_position(origin: Point, width: f64, height: f64) -> Position {
    Position {
        x: origin.x * 100.0 / width,
        y: origin.y * 100.0 / height,
    }
}

/// Font size in percent of the canvas height.
pub fn normalize_font_size(font_size: f64, height: f64) -> f64 {
    font_size * 100.0 / height
}

/// Round to the exported precision, halves away from zero.
pub fn round_exported(value: f64) -> f64 {
    let scale = 10f64.powi(PRECISION);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axes_use_their_own_dimension() {
        let p = normalize_position(Point::new(192.0, 216.0), 1920.0, 1080.0);
        assert_eq!(p, Position { x: 10.0, y: 20.0 });
    }

    #[test]
    fn test_font_size_uses_height() {
        assert_eq!(normalize_font_size(54.0, 1080.0), 5.0);
    }

    #[test]
    fn test_round_exported() {
        assert_eq!(round_exported(100.0 / 3.0), 33.33333333);
        assert_eq!(round_exported(2.0 / 3.0), 0.66666667);
        assert_eq!(round_exported(5.0), 5.0);
    }
}
