//! # Tree Walker
//!
//! Walks the layer tree in stacking order and turns it into HUD elements:
//!
//! - a visible text layer becomes one element;
//! - a group whose name carries the merge prefix becomes one element whose
//!   text is its children joined with rebuilt whitespace;
//! - any other group is transparent, its children take its place in the walk;
//! - hidden layers and empty groups are skipped.
//!
//! The first structural violation ends the walk. No partial element list
//! ever leaves this module.

use crate::color::composite;
use crate::config::ConvertOptions;
use crate::error::{HudError, Result, Violation, Warning};
use crate::font::TextMetrics;
use crate::geometry::{normalize_font_size, normalize_position, Position};
use crate::group::{extract_text, flatten, font_name, font_size, tight_origin};
use crate::hud::HudElement;
use crate::model::{Document, Layer, Point, TextFields};
use crate::tree::{LayerId, LayerTree};
use crate::whitespace::SpaceWidthTable;

/// The outcome of a successful walk.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub elements: Vec<HudElement>,
    /// Gaps the whitespace solver could only approximate and layers
    /// positioned without a crop origin.
    pub warnings: Vec<Warning>,
}

pub struct Converter<'c, M: ?Sized> {
    options: &'c ConvertOptions,
    metrics: &'c M,
}

impl<'c, M: TextMetrics + ?Sized> Converter<'c, M> {
    pub fn new(options: &'c ConvertOptions, metrics: &'c M) -> Self {
        Self { options, metrics }
    }

    /// Fail early when a font the conversion may measure is unknown.
    pub fn check_fonts(&self) -> Result<()> {
        for family in self.options.required_fonts() {
            if !self.metrics.has_font(family) {
                return Err(HudError::MissingFont(family.to_string()));
            }
        }
        Ok(())
    }

    /// Convert every visible layer of `document`.
    pub fn convert(&self, document: &Document) -> Result<Conversion> {
        self.check_fonts()?;
        check_canvas(document)?;

        let tree = LayerTree::new(document);
        let mut elements = Vec::new();
        let mut warnings = Vec::new();

        // Worklist in reverse so popping yields stacking order; a transparent
        // group pushes its children the same way, expanding depth-first.
        let mut pending: Vec<LayerId> = tree.roots().iter().rev().copied().collect();

        while let Some(id) = pending.pop() {
            let layer = tree.layer(id);
            if !layer.visible {
                log::debug!("Skipping hidden layer [{}]", layer.name);
                continue;
            }

            if let Some(fields) = layer.as_text() {
                elements.push(self.text_element(&tree, document, id, &fields, &mut warnings)?);
                continue;
            }

            let children = tree.children(id);
            if children.is_empty() {
                log::debug!("Skipping empty group [{}]", layer.name);
                continue;
            }

            if !self.options.is_merge_group(&layer.name) {
                log::debug!("Expanding group [{}] in place", layer.name);
                pending.extend(children.iter().rev().copied());
                continue;
            }

            elements.push(self.merged_element(&tree, document, layer, children, &mut warnings)?);
        }

        log::info!(
            "Converted {} elements with {} warnings",
            elements.len(),
            warnings.len()
        );
        Ok(Conversion { elements, warnings })
    }

    fn text_element(
        &self,
        tree: &LayerTree<'_>,
        document: &Document,
        id: LayerId,
        fields: &TextFields<'_>,
        warnings: &mut Vec<Warning>,
    ) -> Result<HudElement> {
        let layer = tree.layer(id);
        let size = font_size(layer, fields)?;
        font_name(layer, fields, self.options)?;
        let origin = tight_origin(layer, fields.crop, warnings);
        let position = position(layer, origin, document)?;
        let text = extract_text(layer, fields)?;
        let color = composite(tree, id, fields.color)?;

        Ok(HudElement::text(
            position,
            text.to_string(),
            normalize_font_size(size, document.height),
            color,
        ))
    }

    fn merged_element(
        &self,
        tree: &LayerTree<'_>,
        document: &Document,
        group: &Layer,
        children: &[LayerId],
        warnings: &mut Vec<Warning>,
    ) -> Result<HudElement> {
        let runs = flatten(tree, &group.name, children, self.metrics, self.options)?;
        let Some(first) = runs.first() else {
            return Err(HudError::NoElements);
        };

        let mut text = String::new();
        let mut spaces: Option<SpaceWidthTable> = None;

        for run in &runs {
            text.push_str(run.text);
            if run.gap == 0.0 {
                continue;
            }

            let table = spaces.get_or_insert_with(|| {
                SpaceWidthTable::measure(self.metrics, &self.options.space_fonts, first.font_size)
            });
            let solution = table.solve(run.gap);
            if solution.width != run.gap {
                let warning = Warning::ApproximationMismatch {
                    group: group.name.clone(),
                    layer: tree.layer(run.id).name.clone(),
                    target: run.gap,
                    achieved: solution.width,
                };
                log::warn!("{}", warning);
                warnings.push(warning);
            }
            text.push_str(&solution.to_text());
        }

        let leftmost = tree.layer(first.id);
        let origin = tight_origin(leftmost, first.crop, warnings);
        let position = position(leftmost, origin, document)?;
        let color = composite(tree, first.id, first.color)?;

        Ok(HudElement::text(
            position,
            text,
            normalize_font_size(first.font_size, document.height),
            color,
        ))
    }
}

fn check_canvas(document: &Document) -> Result<()> {
    let positive = |v: f64| v.is_finite() && v > 0.0;
    if !positive(document.width) || !positive(document.height) {
        return Err(Violation::InvalidCanvas {
            width: document.width,
            height: document.height,
        }
        .into());
    }
    Ok(())
}

fn position(layer: &Layer, origin: Point, document: &Document) -> Result<Position> {
    let position = normalize_position(origin, document.width, document.height);
    if position.x < 0.0 || position.y < 0.0 {
        return Err(Violation::OutsideCanvas {
            layer: layer.name.clone(),
        }
        .into());
    }
    Ok(position)
}
