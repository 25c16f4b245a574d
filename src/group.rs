//! # Merge Groups
//!
//! A merge group is a set of text layers the author wants exported as one
//! string, usually because the pieces are styled or positioned independently
//! in the editor. Before the pieces can be joined they must form a single
//! line: same baseline, same font, same size, left to right without overlap.
//! [`flatten`] checks that and measures the gap after each piece.
//!
//! The per-layer text rules live here too, since plain text layers are held
//! to the same ones.

use crate::config::ConvertOptions;
use crate::error::{Violation, Warning};
use crate::font::TextMetrics;
use crate::model::{FontUnit, Layer, Point, Rgb, TextFields};
use crate::tree::{LayerId, LayerTree};
use crate::whitespace::is_raw_whitespace;

/// One piece of a merge group, with the pixel gap to the next piece.
#[derive(Debug, Clone)]
pub struct Run<'a> {
    pub id: LayerId,
    pub text: &'a str,
    pub font: &'a str,
    pub font_size: f64,
    pub color: Rgb,
    /// Tight-crop origin of the glyphs, when the snapshot has one.
    pub crop: Option<Point>,
    /// Gap after this run in whole pixels, zero for the rightmost run.
    pub gap: f64,
}

/// The font size in pixels, rejecting any other unit.
pub fn font_size(layer: &Layer, fields: &TextFields<'_>) -> Result<f64, Violation> {
    if fields.unit != FontUnit::Px {
        return Err(Violation::NonPixelUnit {
            layer: layer.name.clone(),
        });
    }
    if fields.font_size.is_nan() || fields.font_size <= 0.0 {
        return Err(Violation::InvalidFontSize {
            layer: layer.name.clone(),
            size: fields.font_size,
        });
    }
    Ok(fields.font_size)
}

/// The font name, rejecting fonts the game does not ship.
pub fn font_name<'a>(
    layer: &Layer,
    fields: &TextFields<'a>,
    options: &ConvertOptions,
) -> Result<&'a str, Violation> {
    if !options.is_supported_font(fields.font) {
        return Err(Violation::UnsupportedFont {
            layer: layer.name.clone(),
            font: fields.font.to_string(),
            supported: options.supported_fonts.clone(),
        });
    }
    Ok(fields.font)
}

/// The layer's text, which must be plain, non-empty, single-line, and free
/// of typed whitespace. Spacing belongs in merge groups, where it is rebuilt
/// from the layout.
pub fn extract_text<'a>(layer: &Layer, fields: &TextFields<'a>) -> Result<&'a str, Violation> {
    let name = || layer.name.clone();
    let text = fields
        .text
        .ok_or_else(|| Violation::StyledText { layer: name() })?;

    if text.is_empty() {
        return Err(Violation::EmptyText { layer: name() });
    }
    if text.contains('\n') {
        return Err(Violation::MultiLine { layer: name() });
    }
    if text.chars().any(is_raw_whitespace) {
        return Err(Violation::RawWhitespace { layer: name() });
    }
    Ok(text)
}

/// Where the glyphs of a text layer start. Without a crop probe result the
/// layer offsets are used and a [`Warning::MissingCrop`] is recorded.
pub fn tight_origin(layer: &Layer, crop: Option<Point>, warnings: &mut Vec<Warning>) -> Point {
    crop.unwrap_or_else(|| {
        let warning = Warning::MissingCrop {
            layer: layer.name.clone(),
        };
        log::warn!("{}", warning);
        warnings.push(warning);
        layer.offsets
    })
}

/// Validate a merge group's children and order them into runs.
///
/// Children are taken left to right by x offset. The leftmost child sets the
/// baseline (y offset, font size, font) every other child must match.
/// Each run's gap is the distance from its measured right edge to the next
/// child's left edge, rounded to whole pixels; a negative distance means the
/// two overlap.
pub fn flatten<'a, M: TextMetrics + ?Sized>(
    tree: &LayerTree<'a>,
    group_name: &str,
    children: &[LayerId],
    metrics: &M,
    options: &ConvertOptions,
) -> Result<Vec<Run<'a>>, Violation> {
    let mut ordered = children.to_vec();
    ordered.sort_by(|&a, &b| tree.layer(a).offsets.x.total_cmp(&tree.layer(b).offsets.x));

    let mut baseline: Option<(f64, f64, &str)> = None;
    let mut runs = Vec::with_capacity(ordered.len());

    for (i, &id) in ordered.iter().enumerate() {
        let layer = tree.layer(id);
        let fields = layer.as_text().ok_or_else(|| Violation::NestedGroup {
            group: group_name.to_string(),
            layer: layer.name.clone(),
        })?;

        let size = font_size(layer, &fields)?;
        let font = font_name(layer, &fields, options)?;

        match baseline {
            None => baseline = Some((layer.offsets.y, size, font)),
            Some((y, base_size, base_font)) => {
                let mismatch = if layer.offsets.y != y {
                    Some(Violation::Misaligned {
                        group: group_name.to_string(),
                        layer: layer.name.clone(),
                    })
                } else if size != base_size {
                    Some(Violation::SizeMismatch {
                        group: group_name.to_string(),
                        layer: layer.name.clone(),
                    })
                } else if font != base_font {
                    Some(Violation::FontMismatch {
                        group: group_name.to_string(),
                        layer: layer.name.clone(),
                    })
                } else {
                    None
                };
                if let Some(violation) = mismatch {
                    return Err(violation);
                }
            }
        }

        let text = extract_text(layer, &fields)?;

        let gap = match ordered.get(i + 1) {
            Some(&next_id) => {
                let next = tree.layer(next_id);
                let right_edge = layer.offsets.x + metrics.advance_width(text, font, size);
                if next.offsets.x < right_edge {
                    return Err(Violation::Overlapping {
                        group: group_name.to_string(),
                        left: layer.name.clone(),
                        right: next.name.clone(),
                    });
                }
                (next.offsets.x - right_edge).round()
            }
            None => 0.0,
        };

        runs.push(Run {
            id,
            text,
            font,
            font_size: size,
            color: fields.color,
            crop: fields.crop,
            gap,
        });
    }

    Ok(runs)
}
