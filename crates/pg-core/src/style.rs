//! Style values and per-element style state.
//!
//! An element's style is described by a [`StyleState`]: an optional preset
//! tag plus a map of manual overrides. Overrides always win over preset
//! defaults. [`ComputedStyle`] is the resolved view of a single element
//! after role defaults, inherited typography, the tagged preset, and the
//! overrides have been layered in that order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root font size used to resolve `rem` lengths.
pub const ROOT_FONT_SIZE: f32 = 16.0;

/// Weight at and above which text reads as bold.
pub const BOLD_WEIGHT: u16 = 700;

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA`. The `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();
        let pair = |i: usize| -> Option<f32> {
            Some((hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?) as f32 / 255.0)
        };

        match bytes.len() {
            3 => {
                let r = hex_val(bytes[0])?;
                let g = hex_val(bytes[1])?;
                let b = hex_val(bytes[2])?;
                Some(Self::rgba(
                    (r * 17) as f32 / 255.0,
                    (g * 17) as f32 / 255.0,
                    (b * 17) as f32 / 255.0,
                    1.0,
                ))
            }
            6 => Some(Self::rgba(pair(0)?, pair(2)?, pair(4)?, 1.0)),
            8 => Some(Self::rgba(pair(0)?, pair(2)?, pair(4)?, pair(6)?)),
            _ => None,
        }
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = (
            channel(self.r),
            channel(self.g),
            channel(self.b),
            channel(self.a),
        );
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

// ─── Lengths & values ────────────────────────────────────────────────────

/// Format a number the way CSS text expects it: no trailing `.0`,
/// at most three decimals.
pub fn fmt_number(v: f32) -> String {
    if v.fract() == 0.0 && v.abs() < 1.0e7 {
        return format!("{}", v as i64);
    }
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// A CSS length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Length {
    Px(f32),
    Rem(f32),
    /// Relative to the element's own font size.
    Em(f32),
    /// Relative to the containing block (or font size for line-height).
    Percent(f32),
    Auto,
}

impl Length {
    pub const ZERO: Length = Length::Px(0.0);

    pub fn is_auto(&self) -> bool {
        matches!(self, Length::Auto)
    }

    /// Resolve to pixels. `font_size` resolves `em`, `basis` resolves `%`.
    /// `auto` has no pixel value.
    pub fn to_px(&self, font_size: f32, basis: f32) -> Option<f32> {
        match *self {
            Length::Px(v) => Some(v),
            Length::Rem(v) => Some(v * ROOT_FONT_SIZE),
            Length::Em(v) => Some(v * font_size),
            Length::Percent(v) => Some(v * basis / 100.0),
            Length::Auto => None,
        }
    }

    pub fn to_css(&self) -> String {
        match *self {
            Length::Px(v) => format!("{}px", fmt_number(v)),
            Length::Rem(v) => format!("{}rem", fmt_number(v)),
            Length::Em(v) => format!("{}em", fmt_number(v)),
            Length::Percent(v) => format!("{}%", fmt_number(v)),
            Length::Auto => "auto".to_string(),
        }
    }
}

/// A typed CSS value as stored in an element's override map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CssValue {
    Length(Length),
    /// Unitless number (line-height multiplier).
    Number(f32),
    /// Numeric font weight, 100..=900.
    Weight(u16),
    Keyword(String),
    Family(String),
    Color(Color),
}

impl CssValue {
    pub fn px(v: f32) -> Self {
        CssValue::Length(Length::Px(v))
    }

    pub fn auto() -> Self {
        CssValue::Length(Length::Auto)
    }

    pub fn keyword(k: &str) -> Self {
        CssValue::Keyword(k.to_string())
    }

    pub fn as_length(&self) -> Option<Length> {
        match self {
            CssValue::Length(l) => Some(*l),
            CssValue::Number(n) if *n == 0.0 => Some(Length::ZERO),
            _ => None,
        }
    }

    pub fn to_css(&self) -> String {
        match self {
            CssValue::Length(l) => l.to_css(),
            CssValue::Number(n) => fmt_number(*n),
            CssValue::Weight(w) => w.to_string(),
            CssValue::Keyword(k) => k.clone(),
            CssValue::Family(f) if f.contains(' ') => format!("\"{f}\""),
            CssValue::Family(f) => f.clone(),
            CssValue::Color(c) => c.to_hex(),
        }
    }
}

// ─── Properties ──────────────────────────────────────────────────────────

/// One side of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoxSide {
    Top,
    Right,
    Bottom,
    Left,
}

impl BoxSide {
    pub const ALL: [BoxSide; 4] = [BoxSide::Top, BoxSide::Right, BoxSide::Bottom, BoxSide::Left];

    pub fn is_horizontal(&self) -> bool {
        matches!(self, BoxSide::Left | BoxSide::Right)
    }

    pub fn name(&self) -> &'static str {
        match self {
            BoxSide::Top => "top",
            BoxSide::Right => "right",
            BoxSide::Bottom => "bottom",
            BoxSide::Left => "left",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "top" => Some(BoxSide::Top),
            "right" => Some(BoxSide::Right),
            "bottom" => Some(BoxSide::Bottom),
            "left" => Some(BoxSide::Left),
            _ => None,
        }
    }
}

/// Every style axis the editor can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StyleProperty {
    FontFamily,
    FontSize,
    FontWeight,
    LetterSpacing,
    LineHeight,
    Color,
    TextAlign,
    TextIndent,
    MarginTop,
    MarginRight,
    MarginBottom,
    MarginLeft,
    PaddingTop,
    PaddingRight,
    PaddingBottom,
    PaddingLeft,
    Width,
    Height,
    Display,
    FlexDirection,
}

impl StyleProperty {
    pub const ALL: [StyleProperty; 20] = [
        StyleProperty::FontFamily,
        StyleProperty::FontSize,
        StyleProperty::FontWeight,
        StyleProperty::LetterSpacing,
        StyleProperty::LineHeight,
        StyleProperty::Color,
        StyleProperty::TextAlign,
        StyleProperty::TextIndent,
        StyleProperty::MarginTop,
        StyleProperty::MarginRight,
        StyleProperty::MarginBottom,
        StyleProperty::MarginLeft,
        StyleProperty::PaddingTop,
        StyleProperty::PaddingRight,
        StyleProperty::PaddingBottom,
        StyleProperty::PaddingLeft,
        StyleProperty::Width,
        StyleProperty::Height,
        StyleProperty::Display,
        StyleProperty::FlexDirection,
    ];

    /// The five fields compared when reverse-matching a preset.
    pub const TYPOGRAPHY: [StyleProperty; 5] = [
        StyleProperty::FontFamily,
        StyleProperty::FontSize,
        StyleProperty::FontWeight,
        StyleProperty::LetterSpacing,
        StyleProperty::LineHeight,
    ];

    pub fn css_name(&self) -> &'static str {
        match self {
            StyleProperty::FontFamily => "font-family",
            StyleProperty::FontSize => "font-size",
            StyleProperty::FontWeight => "font-weight",
            StyleProperty::LetterSpacing => "letter-spacing",
            StyleProperty::LineHeight => "line-height",
            StyleProperty::Color => "color",
            StyleProperty::TextAlign => "text-align",
            StyleProperty::TextIndent => "text-indent",
            StyleProperty::MarginTop => "margin-top",
            StyleProperty::MarginRight => "margin-right",
            StyleProperty::MarginBottom => "margin-bottom",
            StyleProperty::MarginLeft => "margin-left",
            StyleProperty::PaddingTop => "padding-top",
            StyleProperty::PaddingRight => "padding-right",
            StyleProperty::PaddingBottom => "padding-bottom",
            StyleProperty::PaddingLeft => "padding-left",
            StyleProperty::Width => "width",
            StyleProperty::Height => "height",
            StyleProperty::Display => "display",
            StyleProperty::FlexDirection => "flex-direction",
        }
    }

    /// Accepts both the CSS name (`margin-left`) and the DOM name (`marginLeft`).
    pub fn parse(name: &str) -> Option<Self> {
        let kebab: String = name
            .chars()
            .flat_map(|c| {
                if c.is_ascii_uppercase() {
                    vec!['-', c.to_ascii_lowercase()]
                } else {
                    vec![c]
                }
            })
            .collect();
        Self::ALL.into_iter().find(|p| p.css_name() == kebab)
    }

    pub fn margin(side: BoxSide) -> Self {
        match side {
            BoxSide::Top => StyleProperty::MarginTop,
            BoxSide::Right => StyleProperty::MarginRight,
            BoxSide::Bottom => StyleProperty::MarginBottom,
            BoxSide::Left => StyleProperty::MarginLeft,
        }
    }

    pub fn padding(side: BoxSide) -> Self {
        match side {
            BoxSide::Top => StyleProperty::PaddingTop,
            BoxSide::Right => StyleProperty::PaddingRight,
            BoxSide::Bottom => StyleProperty::PaddingBottom,
            BoxSide::Left => StyleProperty::PaddingLeft,
        }
    }
}

// ─── Style state ─────────────────────────────────────────────────────────

/// Per-element style record: an optional preset tag plus manual overrides.
///
/// `preset` is `None` in the custom state. Applying a preset copies its
/// values into `overrides`; later single-property edits leave the tag set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleState {
    pub preset: Option<String>,
    pub overrides: BTreeMap<StyleProperty, CssValue>,
}

impl StyleState {
    pub fn set(&mut self, prop: StyleProperty, value: CssValue) {
        self.overrides.insert(prop, value);
    }
}

// ─── Computed style ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "left" | "start" => Some(TextAlign::Left),
            "center" => Some(TextAlign::Center),
            "right" | "end" => Some(TextAlign::Right),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Display {
    #[default]
    Block,
    Flex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FlexDirection {
    #[default]
    Row,
    Column,
}

/// Generic four-sided value (margins, paddings, insets).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Sides<T> {
    pub top: T,
    pub right: T,
    pub bottom: T,
    pub left: T,
}

impl<T: Copy> Sides<T> {
    pub fn all(v: T) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    pub fn get(&self, side: BoxSide) -> T {
        match side {
            BoxSide::Top => self.top,
            BoxSide::Right => self.right,
            BoxSide::Bottom => self.bottom,
            BoxSide::Left => self.left,
        }
    }

    pub fn set(&mut self, side: BoxSide, v: T) {
        match side {
            BoxSide::Top => self.top = v,
            BoxSide::Right => self.right = v,
            BoxSide::Bottom => self.bottom = v,
            BoxSide::Left => self.left = v,
        }
    }
}

/// Resolved style of one element.
///
/// Typography is resolved to pixels. Box lengths stay as [`Length`] because
/// percentages and `auto` only resolve against the containing block during
/// layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedStyle {
    pub font_family: String,
    pub font_size: f32,
    pub font_weight: u16,
    pub letter_spacing: f32,
    pub line_height: f32,
    pub color: Color,
    pub text_align: TextAlign,
    pub text_indent: Length,
    pub margin: Sides<Length>,
    pub padding: Sides<Length>,
    pub width: Length,
    pub height: Length,
    pub display: Display,
    pub flex_direction: FlexDirection,
    /// Unitless line-height multiplier, kept so children re-resolve it
    /// against their own font size.
    line_height_factor: Option<f32>,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            font_family: "Inter".into(),
            font_size: ROOT_FONT_SIZE,
            font_weight: 400,
            letter_spacing: 0.0,
            line_height: ROOT_FONT_SIZE * 1.5,
            color: Color::rgba(55.0 / 255.0, 65.0 / 255.0, 81.0 / 255.0, 1.0),
            text_align: TextAlign::Left,
            text_indent: Length::ZERO,
            margin: Sides::all(Length::ZERO),
            padding: Sides::all(Length::ZERO),
            width: Length::Auto,
            height: Length::Auto,
            display: Display::Block,
            flex_direction: FlexDirection::Row,
            line_height_factor: Some(1.5),
        }
    }
}

impl ComputedStyle {
    /// Compute a child's style from its parent's and its own specified values.
    ///
    /// Inherited typography starts from `parent`; every other axis starts
    /// from its initial value. `specified` is already layered (later layers
    /// overwrite earlier ones).
    pub fn compute(parent: &ComputedStyle, specified: &BTreeMap<StyleProperty, CssValue>) -> Self {
        let initial = ComputedStyle::default();
        let mut out = ComputedStyle {
            font_family: parent.font_family.clone(),
            font_size: parent.font_size,
            font_weight: parent.font_weight,
            letter_spacing: parent.letter_spacing,
            line_height: parent.line_height,
            color: parent.color,
            text_align: parent.text_align,
            line_height_factor: parent.line_height_factor,
            ..initial
        };

        // Font size first: em/percent lengths elsewhere depend on it.
        if let Some(size) = specified
            .get(&StyleProperty::FontSize)
            .and_then(CssValue::as_length)
            .and_then(|l| l.to_px(parent.font_size, parent.font_size))
        {
            out.font_size = size;
        }

        for (prop, value) in specified {
            match (prop, value) {
                (StyleProperty::FontFamily, CssValue::Family(f) | CssValue::Keyword(f)) => {
                    out.font_family = f.clone();
                }
                (StyleProperty::FontWeight, CssValue::Weight(w)) => out.font_weight = *w,
                (StyleProperty::FontWeight, CssValue::Number(n)) => out.font_weight = *n as u16,
                (StyleProperty::FontWeight, CssValue::Keyword(k)) => {
                    out.font_weight = match k.as_str() {
                        "bold" => BOLD_WEIGHT,
                        _ => 400,
                    };
                }
                (StyleProperty::LetterSpacing, v) => {
                    if let Some(px) = v
                        .as_length()
                        .and_then(|l| l.to_px(out.font_size, out.font_size))
                    {
                        out.letter_spacing = px;
                    }
                }
                (StyleProperty::LineHeight, CssValue::Number(n)) => {
                    out.line_height_factor = Some(*n);
                }
                (StyleProperty::LineHeight, CssValue::Length(l)) => {
                    if let Some(px) = l.to_px(out.font_size, out.font_size) {
                        out.line_height = px;
                        out.line_height_factor = None;
                    }
                }
                (StyleProperty::Color, CssValue::Color(c)) => out.color = *c,
                (StyleProperty::TextAlign, CssValue::Keyword(k)) => {
                    if let Some(a) = TextAlign::parse(k) {
                        out.text_align = a;
                    }
                }
                (StyleProperty::TextIndent, v) => {
                    if let Some(l) = v.as_length() {
                        out.text_indent = l;
                    }
                }
                (StyleProperty::Width, v) => {
                    if let Some(l) = v.as_length() {
                        out.width = l;
                    }
                }
                (StyleProperty::Height, v) => {
                    if let Some(l) = v.as_length() {
                        out.height = l;
                    }
                }
                (StyleProperty::Display, CssValue::Keyword(k)) => {
                    out.display = if k == "flex" { Display::Flex } else { Display::Block };
                }
                (StyleProperty::FlexDirection, CssValue::Keyword(k)) => {
                    out.flex_direction = if k == "column" {
                        FlexDirection::Column
                    } else {
                        FlexDirection::Row
                    };
                }
                (p, v) => {
                    if let Some(side) = margin_side(*p)
                        && let Some(l) = v.as_length()
                    {
                        out.margin.set(side, l);
                    } else if let Some(side) = padding_side(*p)
                        && let Some(l) = v.as_length()
                    {
                        out.padding.set(side, l);
                    }
                }
            }
        }

        if let Some(factor) = out.line_height_factor {
            out.line_height = factor * out.font_size;
        }

        out
    }

    pub fn is_bold(&self) -> bool {
        is_bold(self.font_weight)
    }

    pub fn is_column_flex(&self) -> bool {
        self.display == Display::Flex && self.flex_direction == FlexDirection::Column
    }

    /// CSS text of one computed property, as the DOM's computed style reports it.
    pub fn css(&self, prop: StyleProperty) -> String {
        match prop {
            StyleProperty::FontFamily => CssValue::Family(self.font_family.clone()).to_css(),
            StyleProperty::FontSize => Length::Px(self.font_size).to_css(),
            StyleProperty::FontWeight => self.font_weight.to_string(),
            StyleProperty::LetterSpacing => Length::Px(self.letter_spacing).to_css(),
            StyleProperty::LineHeight => Length::Px(self.line_height).to_css(),
            StyleProperty::Color => self.color.to_hex(),
            StyleProperty::TextAlign => self.text_align.name().to_string(),
            StyleProperty::TextIndent => self.text_indent.to_css(),
            StyleProperty::Width => self.width.to_css(),
            StyleProperty::Height => self.height.to_css(),
            StyleProperty::Display => match self.display {
                Display::Block => "block".into(),
                Display::Flex => "flex".into(),
            },
            StyleProperty::FlexDirection => match self.flex_direction {
                FlexDirection::Row => "row".into(),
                FlexDirection::Column => "column".into(),
            },
            p => {
                if let Some(side) = margin_side(p) {
                    self.margin.get(side).to_css()
                } else if let Some(side) = padding_side(p) {
                    self.padding.get(side).to_css()
                } else {
                    String::new()
                }
            }
        }
    }

    /// Every computed property as CSS text, keyed by CSS name.
    pub fn to_css_map(&self) -> BTreeMap<&'static str, String> {
        StyleProperty::ALL
            .into_iter()
            .map(|p| (p.css_name(), self.css(p)))
            .collect()
    }
}

/// Weight ≥ 700 is bold for toggle display, whatever the literal weight.
pub fn is_bold(weight: u16) -> bool {
    weight >= BOLD_WEIGHT
}

pub fn margin_side(prop: StyleProperty) -> Option<BoxSide> {
    match prop {
        StyleProperty::MarginTop => Some(BoxSide::Top),
        StyleProperty::MarginRight => Some(BoxSide::Right),
        StyleProperty::MarginBottom => Some(BoxSide::Bottom),
        StyleProperty::MarginLeft => Some(BoxSide::Left),
        _ => None,
    }
}

pub fn padding_side(prop: StyleProperty) -> Option<BoxSide> {
    match prop {
        StyleProperty::PaddingTop => Some(BoxSide::Top),
        StyleProperty::PaddingRight => Some(BoxSide::Right),
        StyleProperty::PaddingBottom => Some(BoxSide::Bottom),
        StyleProperty::PaddingLeft => Some(BoxSide::Left),
        _ => None,
    }
}
