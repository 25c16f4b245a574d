//! Color and opacity compositing.
//!
//! The game has no layer stack, so a text element's alpha has to carry the
//! opacity of every group it sat in. The blend mode that matters is the one
//! on the outermost layer reached.

use crate::error::Violation;
use crate::model::{BlendMode, Rgb};
use crate::tree::{LayerId, LayerTree};

/// Exponent applied to the opacity of layers in the legacy normal mode.
const LEGACY_GAMMA: f64 = 1.0 / 2.2;

/// Composite a text layer's color with its ancestry into `#rrggbbaa`.
pub fn composite(tree: &LayerTree<'_>, id: LayerId, color: Rgb) -> Result<String, Violation> {
    let mut opacity = 1.0;
    let mut outermost = id;
    for ancestor in tree.ancestry(id) {
        opacity *= tree.layer(ancestor).opacity / 100.0;
        outermost = ancestor;
    }

    let alpha = match tree.layer(outermost).mode {
        BlendMode::Normal => opacity,
        BlendMode::LegacyNormal => opacity.powf(LEGACY_GAMMA),
        other => {
            return Err(Violation::UnsupportedBlendMode {
                layer: tree.layer(id).name.clone(),
                mode: other.name().to_string(),
            })
        }
    };

    Ok(format!(
        "#{}{}{}{}",
        hex_byte(color.r),
        hex_byte(color.g),
        hex_byte(color.b),
        hex_byte(alpha)
    ))
}

/// A `[0, 1]` channel as two lowercase hex digits.
pub fn hex_byte(value: f64) -> String {
    let byte = (value.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("{:02x}", byte)
}
