//! Integration tests: parse → emit → re-parse round-trip.
//!
//! Verifies that no element, style state or preset is lost when converting
//! markup → Document → markup.

use pg_core::emitter::{document_attributes, emit_document};
use pg_core::id::ElementId;
use pg_core::model::Document;
use pg_core::parser::parse_document;
use pretty_assertions::assert_eq;

// ─── Helpers ─────────────────────────────────────────────────────────────

fn ids(doc: &Document) -> Vec<String> {
    doc.walk()
        .into_iter()
        .map(|idx| doc.graph[idx].id.as_str().to_string())
        .collect()
}

/// Parse, emit, re-parse, and compare structure and style state.
fn assert_roundtrip_preserves(input: &str) {
    let doc1 = parse_document(input).expect("first parse failed");
    let emitted = emit_document(&doc1);
    let doc2 = parse_document(&emitted).expect("re-parse failed");

    assert_eq!(ids(&doc1), ids(&doc2), "element order changed.\nEmitted:\n{emitted}");
    assert_eq!(doc1.catalog.names(), doc2.catalog.names());

    for idx in doc1.walk() {
        let a = &doc1.graph[idx];
        let b = doc2.get(a.id).expect("element lost in round-trip");
        assert_eq!(a.role, b.role);
        assert_eq!(a.content, b.content);
        assert_eq!(a.style, b.style, "style of {} changed", a.id);
    }

    // The emitter is a fixed point after one pass.
    assert_eq!(emit_document(&doc2), emitted);
}

// ─── Round trips ─────────────────────────────────────────────────────────

#[test]
fn roundtrip_pricing_page() {
    assert_roundtrip_preserves(include_str!("fixtures/pricing_page.pg"));
}

#[test]
fn roundtrip_empty_document() {
    assert_roundtrip_preserves("");
}

#[test]
fn roundtrip_comments_only() {
    assert_roundtrip_preserves("# nothing here\n# still nothing\n");
}

#[test]
fn roundtrip_root_flex_column() {
    assert_roundtrip_preserves(
        "root { display: flex; flex-direction: column }\ntext @rt_hero \"Hi\" { margin-top: auto }",
    );
}

#[test]
fn roundtrip_redefined_builtin_preset() {
    let input = "preset title { font: \"Inter\" 800 56px }\ntext @rt_big \"Big\" { preset: title }";
    let doc = parse_document(input).unwrap();
    assert_eq!(doc.catalog.names()[0], "title");
    assert_eq!(doc.catalog.get("title").unwrap().font_weight, 800);
    assert_roundtrip_preserves(input);
}

// ─── Attributes ──────────────────────────────────────────────────────────

#[test]
fn document_attributes_cover_every_element() {
    let doc = parse_document(include_str!("fixtures/pricing_page.pg")).unwrap();
    let attrs = document_attributes(&doc);
    assert_eq!(attrs.len(), doc.graph.node_count());
    assert!(attrs.contains_key(doc.root_id().as_str()));

    let cta = &attrs["plan_pro_cta"];
    assert_eq!(cta["data-role"], "button");
    assert_eq!(cta["data-preset"], "cta");
    assert!(cta["style"].contains("font-size: 20px"));

    let section = &attrs["pricing"];
    assert_eq!(section["data-align"], "center");
    assert!(attrs[ElementId::intern("top_nav").as_str()].get("style").is_none());
}
