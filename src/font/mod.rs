//! # Font Metrics
//!
//! The converter never rasterizes text, but it has to know how wide things
//! are: the run widths decide the gaps inside a merge group, and the space
//! widths decide how those gaps get filled. Both come from a [`TextMetrics`]
//! oracle.
//!
//! [`FontContext`] is the oracle backed by real TrueType/OpenType files,
//! parsed with ttf-parser.

pub mod loader;

use std::collections::HashMap;

use crate::error::{HudError, Result};

/// Text measurement as the host editor would report it.
pub trait TextMetrics {
    /// Whether `family` can be measured at all.
    fn has_font(&self, family: &str) -> bool;

    /// Advance width of `text` set in `family` at `size` pixels.
    fn advance_width(&self, text: &str, family: &str, size: f64) -> f64;
}

impl<T: TextMetrics + ?Sized> TextMetrics for &T {
    fn has_font(&self, family: &str) -> bool {
        (**self).has_font(family)
    }

    fn advance_width(&self, text: &str, family: &str, size: f64) -> f64 {
        (**self).advance_width(text, family, size)
    }
}

/// Parsed metrics from a TrueType/OpenType font via ttf-parser.
#[derive(Debug, Clone)]
pub struct FontMetrics {
    pub units_per_em: u16,
    pub advance_widths: HashMap<char, u16>,
    pub default_advance: u16,
}

impl FontMetrics {
    /// Get the advance width of a character in pixels.
    pub fn char_width(&self, ch: char, font_size: f64) -> f64 {
        let w = self
            .advance_widths
            .get(&ch)
            .copied()
            .unwrap_or(self.default_advance);
        (w as f64 / self.units_per_em as f64) * font_size
    }

    /// Unrounded advance width of a string in pixels.
    pub fn measure_string(&self, text: &str, font_size: f64) -> f64 {
        text.chars().map(|ch| self.char_width(ch, font_size)).sum()
    }

    /// Parse metrics from font data using ttf-parser.
    pub fn from_font_data(data: &[u8]) -> Option<Self> {
        let face = ttf_parser::Face::parse(data, 0).ok()?;
        let units_per_em = face.units_per_em();

        let mut advance_widths = HashMap::new();
        let mut default_advance = 0u16;

        for code in 32u32..=0xFFFF {
            if let Some(ch) = char::from_u32(code) {
                if let Some(glyph_id) = face.glyph_index(ch) {
                    let advance = face.glyph_hor_advance(glyph_id).unwrap_or(0);
                    advance_widths.insert(ch, advance);
                    if ch == ' ' {
                        default_advance = advance;
                    }
                }
            }
        }

        if default_advance == 0 {
            default_advance = units_per_em / 2;
        }

        Some(FontMetrics {
            units_per_em,
            advance_widths,
            default_advance,
        })
    }
}

/// Fonts known to the converter, keyed by the family name the editor uses.
#[derive(Debug, Default)]
pub struct FontRegistry {
    fonts: HashMap<String, FontMetrics>,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a font from raw TrueType/OpenType bytes.
    pub fn register(&mut self, family: &str, data: &[u8]) -> Result<()> {
        let metrics = FontMetrics::from_font_data(data).ok_or_else(|| {
            HudError::FontError(format!("Failed to parse font data for '{}'", family))
        })?;
        log::debug!(
            "Registered font '{}' ({} glyphs, {} units/em)",
            family,
            metrics.advance_widths.len(),
            metrics.units_per_em
        );
        self.fonts.insert(family.to_string(), metrics);
        Ok(())
    }

    pub fn get(&self, family: &str) -> Option<&FontMetrics> {
        self.fonts.get(family)
    }

    pub fn contains(&self, family: &str) -> bool {
        self.fonts.contains_key(family)
    }

    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.fonts.keys().map(String::as_str)
    }
}

/// Text measurement backed by registered font files. Widths are reported in
/// whole pixels, the way raster editors report text extents.
#[derive(Debug, Default)]
pub struct FontContext {
    registry: FontRegistry,
}

impl FontContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every font a snapshot ships with.
    pub fn register_entries(&mut self, entries: &[crate::model::FontEntry]) -> Result<()> {
        for entry in entries {
            let data = loader::load_font_source(&entry.src).map_err(HudError::FontError)?;
            self.registry.register(&entry.family, &data)?;
        }
        Ok(())
    }

    /// Access the underlying font registry.
    pub fn registry(&self) -> &FontRegistry {
        &self.registry
    }

    /// Access the underlying font registry mutably.
    pub fn registry_mut(&mut self) -> &mut FontRegistry {
        &mut self.registry
    }
}

impl TextMetrics for FontContext {
    fn has_font(&self, family: &str) -> bool {
        self.registry.contains(family)
    }

    fn advance_width(&self, text: &str, family: &str, size: f64) -> f64 {
        match self.registry.get(family) {
            Some(metrics) => metrics.measure_string(text, size).round(),
            None => {
                log::warn!("Measuring with unregistered font '{}'", family);
                0.0
            }
        }
    }
}
