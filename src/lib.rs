//! # texthud
//!
//! Turns a layered text document, as drawn in an image editor, into a HUD
//! definition a game can load.
//!
//! Designers lay out a HUD as text layers on a canvas the size of the
//! screen. The game wants something else entirely: a flat list of text
//! elements, positioned in percent of the screen, with opacity baked into
//! the color and no notion of layers or groups. Layers that should read as
//! one string but were styled or nudged separately are put in a *merge
//! group*; their gaps are rebuilt out of Unicode space characters.
//!
//! ## Architecture
//!
//! ```text
//! Input (document snapshot JSON)
//!       ↓
//!   [model]      — Layer tree, fonts, canvas size
//!       ↓
//!   [tree]       — Arena with parent links
//!       ↓
//!   [convert]    — Walk layers, validate, build elements
//!      ├── [group]       merge-group validation and gaps
//!      ├── [whitespace]  gap → space characters
//!      ├── [color]       opacity compositing
//!      └── [geometry]    pixels → percent
//!       ↓
//!   [hud]        — HUD definition JSON
//! ```
//!
//! Conversion is all-or-nothing: the first layer that breaks a rule stops it
//! and nothing is exported.

pub mod color;
pub mod config;
pub mod convert;
pub mod error;
pub mod font;
pub mod geometry;
pub mod group;
pub mod hud;
pub mod model;
pub mod settings;
pub mod tree;
pub mod whitespace;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::ConvertOptions;
pub use convert::{Conversion, Converter};
pub use error::{HudError, Result, Violation, Warning};
pub use font::{FontContext, TextMetrics};
pub use hud::{HudDefinition, HudElement};
pub use model::Document;

/// Convert a document, returning the elements and any whitespace warnings.
pub fn convert<M: TextMetrics + ?Sized>(
    document: &Document,
    metrics: &M,
    options: &ConvertOptions,
) -> Result<Conversion> {
    Converter::new(options, metrics).convert(document)
}

/// Convert a document into a HUD definition. A document with nothing to
/// export is an error, since writing it would wipe the existing HUD.
pub fn hud_definition<M: TextMetrics + ?Sized>(
    document: &Document,
    metrics: &M,
    options: &ConvertOptions,
) -> Result<HudDefinition> {
    let conversion = convert(document, metrics, options)?;
    if conversion.elements.is_empty() {
        return Err(HudError::NoElements);
    }
    Ok(HudDefinition::new(options.hud_version, conversion.elements))
}

/// Convert a document snapshot described as JSON, measuring with the fonts
/// the snapshot ships, and return the HUD definition as JSON.
pub fn convert_json(json: &str, options: &ConvertOptions) -> Result<String> {
    let document: Document = serde_json::from_str(json)?;
    let mut fonts = FontContext::new();
    fonts.register_entries(&document.fonts)?;
    Ok(hud_definition(&document, &fonts, options)?.to_json())
}
