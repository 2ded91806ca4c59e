//! Style resolver: reconciles named presets with per-element overrides and
//! reverse-matches computed typography back to a preset.

use pg_core::{ComputedStyle, CssValue, Document, ElementId, StyleProperty, TextAlign, Typography};

/// How an element's current preset was determined.
#[derive(Debug, Clone, PartialEq)]
pub enum PresetResolution {
    /// The element carries a preset tag.
    Tagged(String),
    /// No tag, but the computed typography equals this catalog entry.
    Matched(String),
    /// Neither; the raw computed style is all there is.
    Custom(ComputedStyle),
}

impl PresetResolution {
    pub fn name(&self) -> Option<&str> {
        match self {
            PresetResolution::Tagged(name) | PresetResolution::Matched(name) => Some(name),
            PresetResolution::Custom(_) => None,
        }
    }

    pub fn source(&self) -> &'static str {
        match self {
            PresetResolution::Tagged(_) => "tagged",
            PresetResolution::Matched(_) => "matched",
            PresetResolution::Custom(_) => "custom",
        }
    }
}

/// Copy every attribute of preset `name` into the element's overrides and
/// tag it. Returns `false` for an unknown preset or element.
pub fn apply_preset(doc: &mut Document, id: ElementId, name: &str) -> bool {
    let Some(preset) = doc.catalog.get(name) else {
        log::warn!("unknown preset `{name}`");
        return false;
    };
    let entries = preset.entries();

    let Some(node) = doc.get_mut(id) else {
        log::warn!("apply_preset: unknown element {id}");
        return false;
    };
    for (prop, value) in entries {
        node.style.set(prop, value);
    }
    node.style.preset = Some(name.to_string());
    true
}

/// Set one override. The preset tag is left alone.
pub fn apply_override(
    doc: &mut Document,
    id: ElementId,
    prop: StyleProperty,
    value: CssValue,
) -> bool {
    let Some(node) = doc.get_mut(id) else {
        log::warn!("apply_override: unknown element {id}");
        return false;
    };
    node.style.set(prop, value);
    true
}

/// Drop the preset tag. Overrides stay, so nothing visible changes.
pub fn reset_to_custom(doc: &mut Document, id: ElementId) -> bool {
    let Some(node) = doc.get_mut(id) else {
        log::warn!("reset_to_custom: unknown element {id}");
        return false;
    };
    node.style.preset.take().is_some()
}

/// First catalog preset whose typography equals the element's computed
/// typography, units normalized to pixels.
pub fn match_computed_preset(doc: &Document, id: ElementId) -> Option<String> {
    let computed = doc.computed_style(id)?;
    doc.catalog
        .match_typography(&Typography::of(&computed))
        .map(|p| p.name.clone())
}

pub fn resolve_current_preset(doc: &Document, id: ElementId) -> Option<PresetResolution> {
    let node = doc.get(id)?;
    if let Some(name) = &node.style.preset {
        return Some(PresetResolution::Tagged(name.clone()));
    }
    if let Some(name) = match_computed_preset(doc, id) {
        return Some(PresetResolution::Matched(name));
    }
    doc.computed_style(id).map(PresetResolution::Custom)
}

pub fn is_bold(doc: &Document, id: ElementId) -> bool {
    doc.computed_style(id).is_some_and(|s| s.is_bold())
}

/// Bold → 400, anything lighter → 700.
pub fn toggle_bold(doc: &mut Document, id: ElementId) -> bool {
    let weight = if is_bold(doc, id) { 400 } else { pg_core::BOLD_WEIGHT };
    apply_override(doc, id, StyleProperty::FontWeight, CssValue::Weight(weight))
}

pub fn set_text_align(doc: &mut Document, id: ElementId, align: TextAlign) -> bool {
    apply_override(doc, id, StyleProperty::TextAlign, CssValue::keyword(align.name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pg_core::parser::parse_document;
    use pg_core::{Length, Role};
    use pretty_assertions::assert_eq;

    const PAGE: &str = r#"
container @res_section {
  text @res_title "Pricing" { preset: title }
  text @res_copy "Plain copy"
  text @res_big "Big copy" { font-size: 2rem }
}
"#;

    fn id(s: &str) -> ElementId {
        ElementId::intern(s)
    }

    #[test]
    fn apply_preset_is_idempotent() {
        let mut doc = parse_document(PAGE).unwrap();
        assert!(apply_preset(&mut doc, id("res_copy"), "heading"));
        let once = doc.get(id("res_copy")).unwrap().style.clone();
        assert!(apply_preset(&mut doc, id("res_copy"), "heading"));
        assert_eq!(doc.get(id("res_copy")).unwrap().style, once);
        assert_eq!(once.preset.as_deref(), Some("heading"));
        assert_eq!(
            once.overrides.get(&StyleProperty::FontSize),
            Some(&CssValue::Length(Length::Px(32.0)))
        );
    }

    #[test]
    fn unknown_preset_is_ignored() {
        let mut doc = parse_document(PAGE).unwrap();
        let before = doc.get(id("res_copy")).unwrap().style.clone();
        assert!(!apply_preset(&mut doc, id("res_copy"), "jumbo"));
        assert_eq!(doc.get(id("res_copy")).unwrap().style, before);
    }

    #[test]
    fn override_keeps_tag_and_reset_drops_it() {
        let mut doc = parse_document(PAGE).unwrap();
        apply_override(
            &mut doc,
            id("res_title"),
            StyleProperty::LetterSpacing,
            CssValue::px(2.0),
        );
        assert_eq!(
            resolve_current_preset(&doc, id("res_title")),
            Some(PresetResolution::Tagged("title".into()))
        );
        assert!(reset_to_custom(&mut doc, id("res_title")));
        assert!(!reset_to_custom(&mut doc, id("res_title")));
        // 48px title with 2px tracking matches nothing.
        let resolution = resolve_current_preset(&doc, id("res_title")).unwrap();
        assert_eq!(resolution.source(), "custom");
    }

    #[test]
    fn untagged_text_matches_by_typography() {
        let doc = parse_document(PAGE).unwrap();
        // Inherited defaults are Inter 16px/400/0/24px, the body preset.
        assert_eq!(
            resolve_current_preset(&doc, id("res_copy")),
            Some(PresetResolution::Matched("body".into()))
        );
        match resolve_current_preset(&doc, id("res_big")) {
            Some(PresetResolution::Custom(style)) => assert_eq!(style.font_size, 32.0),
            other => panic!("expected custom, got {other:?}"),
        }
    }

    #[test]
    fn bold_threshold_and_toggle() {
        let mut doc = parse_document(PAGE).unwrap();
        assert!(is_bold(&doc, id("res_title")));
        toggle_bold(&mut doc, id("res_title"));
        assert!(!is_bold(&doc, id("res_title")));
        toggle_bold(&mut doc, id("res_title"));
        assert_eq!(doc.computed_style(id("res_title")).unwrap().font_weight, 700);
        assert_eq!(doc.get(id("res_title")).unwrap().role, Role::Text);
    }

    #[test]
    fn text_align_override() {
        let mut doc = parse_document(PAGE).unwrap();
        set_text_align(&mut doc, id("res_copy"), TextAlign::Center);
        assert_eq!(
            doc.computed_style(id("res_copy")).unwrap().text_align,
            TextAlign::Center
        );
    }
}
