//! Style preset catalog.
//!
//! A preset is an immutable, named bundle of typographic attributes. The
//! catalog is ordered: reverse matching walks it front to back and the
//! first full match wins.

use crate::style::{Color, ComputedStyle, CssValue, Length, StyleProperty};
use serde::{Deserialize, Serialize};

/// Named typography bundle. Never mutated in place: applying a preset copies
/// its values into the target element's overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StylePreset {
    pub name: String,
    pub font_family: String,
    pub font_size: Length,
    pub font_weight: u16,
    pub letter_spacing: Length,
    /// Unitless multiplier or a length.
    pub line_height: CssValue,
    pub color: Color,
}

impl StylePreset {
    /// The preset's attributes as override entries.
    pub fn entries(&self) -> [(StyleProperty, CssValue); 6] {
        [
            (StyleProperty::FontFamily, CssValue::Family(self.font_family.clone())),
            (StyleProperty::FontSize, CssValue::Length(self.font_size)),
            (StyleProperty::FontWeight, CssValue::Weight(self.font_weight)),
            (StyleProperty::LetterSpacing, CssValue::Length(self.letter_spacing)),
            (StyleProperty::LineHeight, self.line_height.clone()),
            (StyleProperty::Color, CssValue::Color(self.color)),
        ]
    }

    /// Unit-normalized typography of this preset.
    pub fn typography(&self) -> Typography {
        let size = self
            .font_size
            .to_px(crate::style::ROOT_FONT_SIZE, crate::style::ROOT_FONT_SIZE)
            .unwrap_or(crate::style::ROOT_FONT_SIZE);
        let letter_spacing = self.letter_spacing.to_px(size, size).unwrap_or(0.0);
        let line_height = match &self.line_height {
            CssValue::Number(n) => n * size,
            CssValue::Length(l) => l.to_px(size, size).unwrap_or(size),
            _ => size,
        };
        Typography {
            family: normalize_family(&self.font_family),
            size,
            weight: self.font_weight,
            letter_spacing,
            line_height,
        }
    }
}

/// The five fields compared when matching a computed style to a preset,
/// with every length in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Typography {
    pub family: String,
    pub size: f32,
    pub weight: u16,
    pub letter_spacing: f32,
    pub line_height: f32,
}

/// Lengths closer than this compare equal after unit normalization.
const MATCH_EPSILON: f32 = 0.01;

impl Typography {
    pub fn of(style: &ComputedStyle) -> Self {
        Self {
            family: normalize_family(&style.font_family),
            size: style.font_size,
            weight: style.font_weight,
            letter_spacing: style.letter_spacing,
            line_height: style.line_height,
        }
    }

    pub fn matches(&self, other: &Typography) -> bool {
        self.family == other.family
            && self.weight == other.weight
            && (self.size - other.size).abs() < MATCH_EPSILON
            && (self.letter_spacing - other.letter_spacing).abs() < MATCH_EPSILON
            && (self.line_height - other.line_height).abs() < MATCH_EPSILON
    }
}

fn normalize_family(family: &str) -> String {
    family
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .to_ascii_lowercase()
}

/// Ordered, read-only table of presets keyed by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PresetCatalog {
    presets: Vec<StylePreset>,
}

fn preset(
    name: &str,
    size: f32,
    weight: u16,
    letter_spacing_em: f32,
    line_height: f32,
    color: &str,
) -> StylePreset {
    StylePreset {
        name: name.to_string(),
        font_family: "Inter".to_string(),
        font_size: Length::Px(size),
        font_weight: weight,
        letter_spacing: if letter_spacing_em == 0.0 {
            Length::ZERO
        } else {
            Length::Em(letter_spacing_em)
        },
        line_height: CssValue::Number(line_height),
        color: Color::from_hex(color).unwrap_or(Color::rgba(0.0, 0.0, 0.0, 1.0)),
    }
}

impl PresetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog the marketing site ships with.
    pub fn builtin() -> Self {
        Self {
            presets: vec![
                preset("title", 48.0, 700, -0.02, 1.1, "#111827"),
                preset("subtitle", 24.0, 500, -0.01, 1.3, "#374151"),
                preset("heading", 32.0, 600, -0.01, 1.2, "#111827"),
                preset("body", 16.0, 400, 0.0, 1.5, "#374151"),
                preset("caption", 13.0, 400, 0.01, 1.4, "#6B7280"),
                preset("cta", 20.0, 500, 0.0, 1.2, "#FFFFFF"),
                preset("label", 12.0, 600, 0.08, 1.3, "#6B7280"),
            ],
        }
    }

    /// Insert a preset. Redefining a name replaces it in place, keeping
    /// its position in the match order; new names go last.
    pub fn insert(&mut self, preset: StylePreset) {
        match self.presets.iter_mut().find(|p| p.name == preset.name) {
            Some(existing) => *existing = preset,
            None => self.presets.push(preset),
        }
    }

    pub fn get(&self, name: &str) -> Option<&StylePreset> {
        self.presets.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StylePreset> {
        self.presets.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.presets.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// First preset, in catalog order, whose typography equals `typography`.
    pub fn match_typography(&self, typography: &Typography) -> Option<&StylePreset> {
        self.presets
            .iter()
            .find(|p| p.typography().matches(typography))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_order_is_stable() {
        let catalog = PresetCatalog::builtin();
        assert_eq!(
            catalog.names(),
            vec!["title", "subtitle", "heading", "body", "caption", "cta", "label"]
        );
    }

    #[test]
    fn cta_values() {
        let catalog = PresetCatalog::builtin();
        let cta = catalog.get("cta").unwrap();
        assert_eq!(cta.font_size, Length::Px(20.0));
        assert_eq!(cta.font_weight, 500);
    }

    #[test]
    fn match_normalizes_units() {
        let catalog = PresetCatalog::builtin();
        // title expressed in rem + px instead of px + em
        let typography = Typography {
            family: "inter".into(),
            size: 3.0 * 16.0,
            weight: 700,
            letter_spacing: -0.96,
            line_height: 52.8,
        };
        assert_eq!(
            catalog.match_typography(&typography).map(|p| p.name.as_str()),
            Some("title")
        );
    }

    #[test]
    fn first_match_wins_in_catalog_order() {
        let mut catalog = PresetCatalog::builtin();
        let mut twin = catalog.get("body").unwrap().clone();
        twin.name = "body_twin".into();
        catalog.insert(twin);

        let typography = catalog.get("body_twin").unwrap().typography();
        assert_eq!(
            catalog.match_typography(&typography).map(|p| p.name.as_str()),
            Some("body")
        );
    }

    #[test]
    fn redefinition_keeps_position() {
        let mut catalog = PresetCatalog::builtin();
        let mut title = catalog.get("title").unwrap().clone();
        title.font_weight = 800;
        catalog.insert(title);
        assert_eq!(catalog.names()[0], "title");
        assert_eq!(catalog.get("title").unwrap().font_weight, 800);
        assert_eq!(catalog.len(), 7);
    }

    #[test]
    fn family_normalization_ignores_quotes_and_fallbacks() {
        assert_eq!(normalize_family("\"Inter\", sans-serif"), "inter");
        assert_eq!(normalize_family("Inter"), "inter");
    }
}
