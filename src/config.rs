//! Conversion options.

use serde::{Deserialize, Serialize};

/// Fonts used to measure the space characters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpaceFonts {
    /// Font for the ideographic space.
    pub ideographic: String,
    /// Font for the normal and narrow no-break spaces.
    pub condensed: String,
    /// Font for every other space kind.
    pub default: String,
}

impl Default for SpaceFonts {
    fn default() -> Self {
        Self {
            ideographic: "Noto Sans JP Medium".to_string(),
            condensed: "Furore".to_string(),
            default: "Roboto".to_string(),
        }
    }
}

/// Options controlling a conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConvertOptions {
    /// Group names starting with this prefix are merged into one element.
    pub merge_prefix: String,

    /// Fonts text layers may use.
    pub supported_fonts: Vec<String>,

    /// Fonts used to measure space widths.
    pub space_fonts: SpaceFonts,

    /// Version stamped into the HUD definition.
    pub hud_version: f64,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ConvertOptions {
    /// Create options with the game's defaults.
    pub fn new() -> Self {
        Self {
            merge_prefix: "M_".to_string(),
            supported_fonts: vec!["Noto Sans JP Medium".to_string()],
            space_fonts: SpaceFonts::default(),
            hud_version: 1.7,
        }
    }

    /// Parse options from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_merge_prefix(mut self, prefix: &str) -> Self {
        self.merge_prefix = prefix.to_string();
        self
    }

    pub fn with_supported_fonts(mut self, fonts: &[&str]) -> Self {
        self.supported_fonts = fonts.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn with_space_fonts(mut self, fonts: SpaceFonts) -> Self {
        self.space_fonts = fonts;
        self
    }

    pub fn with_hud_version(mut self, version: f64) -> Self {
        self.hud_version = version;
        self
    }

    pub fn is_supported_font(&self, font: &str) -> bool {
        self.supported_fonts.iter().any(|f| f == font)
    }

    pub fn is_merge_group(&self, name: &str) -> bool {
        name.starts_with(&self.merge_prefix)
    }

    /// Every font the metrics oracle must know about, without duplicates.
    pub fn required_fonts(&self) -> Vec<&str> {
        let mut fonts: Vec<&str> = Vec::new();
        let candidates = self
            .supported_fonts
            .iter()
            .map(String::as_str)
            .chain([
                self.space_fonts.ideographic.as_str(),
                self.space_fonts.condensed.as_str(),
                self.space_fonts.default.as_str(),
            ]);
        for font in candidates {
            if !fonts.contains(&font) {
                fonts.push(font);
            }
        }
        fonts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let opts = ConvertOptions::from_json(r#"{ "mergePrefix": "MERGE_" }"#).unwrap();
        assert_eq!(opts.merge_prefix, "MERGE_");
        assert_eq!(opts.hud_version, 1.7);
        assert_eq!(opts.space_fonts.condensed, "Furore");
    }

    #[test]
    fn test_merge_prefix_is_case_sensitive() {
        let opts = ConvertOptions::new();
        assert!(opts.is_merge_group("M_score"));
        assert!(!opts.is_merge_group("m_score"));
        assert!(!opts.is_merge_group("Score"));
    }

    #[test]
    fn test_required_fonts_deduplicated() {
        let opts = ConvertOptions::new();
        assert_eq!(
            opts.required_fonts(),
            vec!["Noto Sans JP Medium", "Furore", "Roboto"]
        );
    }
}
