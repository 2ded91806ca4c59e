//! Emitter: `Document` → DOM attributes and playground markup.
//!
//! The attribute half is the single rendering step of the editor: every
//! element's inline `style` and `data-*` tags are derived from its
//! `StyleState` here. The markup half round-trips through the parser.

use crate::model::*;
use crate::preset::{PresetCatalog, StylePreset};
use crate::style::{CssValue, StyleProperty, StyleState};
use petgraph::graph::NodeIndex;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Attribute name → value, in a stable order.
pub type Attributes = BTreeMap<String, String>;

// ─── DOM attributes ──────────────────────────────────────────────────────

/// Inline values of a style state: the tagged preset's values with the
/// overrides on top. Role defaults live in the page stylesheet, not here.
pub fn inline_values(
    catalog: &PresetCatalog,
    style: &StyleState,
) -> BTreeMap<StyleProperty, CssValue> {
    let mut values: BTreeMap<StyleProperty, CssValue> = style
        .preset
        .as_deref()
        .and_then(|name| catalog.get(name))
        .map(|p| p.entries().into_iter().collect())
        .unwrap_or_default();
    for (prop, value) in &style.overrides {
        values.insert(*prop, value.clone());
    }
    values
}

/// `font-size: 20px; margin-left: auto`
pub fn emit_style_attribute(values: &BTreeMap<StyleProperty, CssValue>) -> String {
    values
        .iter()
        .map(|(prop, value)| format!("{}: {}", prop.css_name(), value.to_css()))
        .collect::<Vec<_>>()
        .join("; ")
}

/// The attributes the editor owns on one element.
pub fn element_attributes(doc: &Document, node: &ElementNode) -> Attributes {
    let mut attrs = Attributes::new();
    let values = inline_values(&doc.catalog, &node.style);

    let style = emit_style_attribute(&values);
    if !style.is_empty() {
        attrs.insert("style".into(), style);
    }
    attrs.insert("data-role".into(), node.role.name().into());
    if let Some(preset) = &node.style.preset {
        attrs.insert("data-preset".into(), preset.clone());
    }

    let margin_auto = |p: StyleProperty| values.get(&p).is_some_and(|v| v == &CssValue::auto());
    let align = match (
        margin_auto(StyleProperty::MarginLeft),
        margin_auto(StyleProperty::MarginRight),
    ) {
        (true, true) => Some(HorizontalAlign::Center),
        (true, false) => Some(HorizontalAlign::Right),
        (false, true) => Some(HorizontalAlign::Left),
        (false, false) => None,
    };
    if let Some(align) = align {
        attrs.insert("data-align".into(), align.name().into());
    }
    attrs
}

/// Attributes of every element, root included, keyed by element id.
pub fn document_attributes(doc: &Document) -> BTreeMap<String, Attributes> {
    doc.walk()
        .into_iter()
        .map(|idx| {
            let node = &doc.graph[idx];
            (node.id.as_str().to_string(), element_attributes(doc, node))
        })
        .collect()
}

// ─── Markup ──────────────────────────────────────────────────────────────

/// Emit a `Document` as playground markup.
#[must_use]
pub fn emit_document(doc: &Document) -> String {
    let mut out = String::with_capacity(1024);

    // Presets that differ from the built-in catalog
    let builtin = PresetCatalog::builtin();
    let mut wrote_preset = false;
    for preset in doc.catalog.iter() {
        if builtin.get(&preset.name) != Some(preset) {
            emit_preset_block(&mut out, preset);
            wrote_preset = true;
        }
    }
    if wrote_preset {
        out.push('\n');
    }

    let root = &doc.graph[doc.root];
    if root.style.preset.is_some() || !root.style.overrides.is_empty() {
        out.push_str("root {\n");
        emit_style_props(&mut out, &root.style, 1);
        out.push_str("}\n");
    }

    for child in doc.children(doc.root) {
        emit_node(&mut out, doc, child, 0);
    }
    out
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn emit_preset_block(out: &mut String, preset: &StylePreset) {
    let _ = writeln!(
        out,
        "preset {} {{ font: \"{}\" {} {}; letter: {}; line: {}; color: {} }}",
        preset.name,
        escape(&preset.font_family),
        preset.font_weight,
        preset.font_size.to_css(),
        preset.letter_spacing.to_css(),
        preset.line_height.to_css(),
        preset.color.to_hex(),
    );
}

fn emit_style_props(out: &mut String, style: &StyleState, depth: usize) {
    if let Some(preset) = &style.preset {
        indent(out, depth);
        let _ = writeln!(out, "preset: {preset}");
    }
    for (prop, value) in &style.overrides {
        indent(out, depth);
        let text = match value {
            CssValue::Family(f) => format!("\"{}\"", escape(f)),
            v => v.to_css(),
        };
        let _ = writeln!(out, "{}: {}", prop.css_name(), text);
    }
}

fn emit_node(out: &mut String, doc: &Document, idx: NodeIndex, depth: usize) {
    let node = &doc.graph[idx];
    let children = doc.children(idx);

    indent(out, depth);
    let _ = write!(out, "{} @{}", node.role.name(), node.id.as_str());
    if let Some(content) = &node.content
        && !content.is_empty()
    {
        let _ = write!(out, " \"{}\"", escape(content));
    }

    if node.style.preset.is_none() && node.style.overrides.is_empty() && children.is_empty() {
        out.push('\n');
        return;
    }

    out.push_str(" {\n");
    emit_style_props(out, &node.style, depth + 1);
    for child in children {
        emit_node(out, doc, child, depth + 1);
    }
    indent(out, depth);
    out.push_str("}\n");
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::ElementId;
    use crate::parser::parse_document;
    use pretty_assertions::assert_eq;

    #[test]
    fn style_attribute_layers_overrides_on_preset() {
        let mut doc = Document::new();
        let id = ElementId::intern("emit_attr");
        let mut node = ElementNode::with_text(id, Role::Text, "Buy");
        node.style.preset = Some("cta".into());
        node.style.set(StyleProperty::FontSize, CssValue::px(22.0));
        let root = doc.root;
        doc.add_element(root, node);

        let attrs = element_attributes(&doc, doc.get(id).unwrap());
        assert_eq!(
            attrs["style"],
            "font-family: Inter; font-size: 22px; font-weight: 500; letter-spacing: 0px; \
             line-height: 1.2; color: #FFFFFF"
        );
        assert_eq!(attrs["data-preset"], "cta");
        assert_eq!(attrs["data-role"], "text");
        assert!(!attrs.contains_key("data-align"));
    }

    #[test]
    fn align_tag_follows_auto_margins() {
        let mut doc = Document::new();
        let id = ElementId::intern("emit_align");
        let mut node = ElementNode::new(id, Role::Card);
        node.style.set(StyleProperty::MarginLeft, CssValue::auto());
        node.style.set(StyleProperty::MarginRight, CssValue::px(24.0));
        let root = doc.root;
        doc.add_element(root, node);

        let attrs = element_attributes(&doc, doc.get(id).unwrap());
        assert_eq!(attrs["data-align"], "right");
        assert_eq!(attrs["style"], "margin-right: 24px; margin-left: auto");
    }

    #[test]
    fn markup_round_trip() {
        let input = r#"
preset promo { font: "Söhne" 600 28px; letter: 0.01em; line: 1.25; color: #0F766E }
root { display: flex; flex-direction: column }
container @emit_hero {
  width: 960px
  margin: 0 auto
  text @emit_headline "Ship \"faster\"" { preset: promo; letter-spacing: -0.02em }
  button @emit_cta "Start free"
  image @emit_shot
}
"#;
        let doc = parse_document(input).unwrap();
        let emitted = emit_document(&doc);
        let reparsed = parse_document(&emitted).unwrap();
        assert_eq!(emit_document(&reparsed), emitted);
        assert_eq!(
            reparsed
                .get(ElementId::intern("emit_headline"))
                .unwrap()
                .content
                .as_deref(),
            Some("Ship \"faster\"")
        );
        assert!(emitted.starts_with("preset promo"));
    }
}
