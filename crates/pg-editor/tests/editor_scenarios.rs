//! Integration tests: end-to-end editing scenarios (pg-editor ↔ pg-core ↔ pg-render).
//!
//! Each test drives an `EditorSession` the way the host page does: input
//! events and commands in, patches and read paths out.

use pg_core::{
    CssValue, ElementId, Length, StyleProperty, TextRange, ToolbarAnchor, range_rect, snapshot,
};
use pg_editor::{
    EditCommand, EditorConfig, EditorSession, IndentSide, InputEvent, ListenerKind,
    PresetResolution, ResizeState, Selectable,
};
use pg_render::ResizeHandle;
use pretty_assertions::assert_eq;

fn mounted() -> EditorSession {
    let input = include_str!("fixtures/hero.pg");
    let mut session = EditorSession::from_markup(input, EditorConfig::default()).unwrap();
    session.mount();
    session
}

fn id(s: &str) -> ElementId {
    ElementId::intern(s)
}

fn center_of(session: &EditorSession, el: &str) -> (f32, f32) {
    snapshot(&session.doc, session.config.viewport, id(el))
        .unwrap()
        .bounding_box
        .center()
}

fn computed_css(session: &EditorSession, el: &str, prop: StyleProperty) -> String {
    session.doc.computed_style(id(el)).unwrap().css(prop)
}

// ─── Scenarios ──────────────────────────────────────────────────────────

#[test]
fn preset_on_text_span_sets_font_size() {
    let mut session = mounted();
    let range = TextRange::new(id("hero_copy"), 7, 11);
    session.handle_input(&InputEvent::SelectionChange { range: Some(range) });
    assert_eq!(session.selection(), &Selectable::range(range));

    let patches = session.apply(EditCommand::ApplyPreset("cta".into()));
    assert_eq!(patches.len(), 1);
    assert_eq!(patches[0].element, id("hero_copy"));
    assert_eq!(patches[0].attributes.get("data-preset").map(String::as_str), Some("cta"));

    assert_eq!(computed_css(&session, "hero_copy", StyleProperty::FontSize), "20px");
    assert_eq!(computed_css(&session, "hero_copy", StyleProperty::FontWeight), "500");
}

#[test]
fn block_indent_clamps_to_available_space() {
    let mut session = mounted();
    session.select(Selectable::element(id("hero_copy")));
    session.apply(EditCommand::IndentTo {
        side: IndentSide::Block,
        value: 500.0,
    });
    // floor((400 - 200) * 0.5)
    assert_eq!(
        computed_css(&session, "hero_copy", StyleProperty::MarginLeft),
        "100px"
    );
}

#[test]
fn click_in_chrome_keeps_selection() {
    let mut session = mounted();
    let (x, y) = center_of(&session, "hero_cta");
    session.handle_input(&InputEvent::from_pointer_down(x, y, false));
    assert_eq!(session.selection(), &Selectable::element(id("hero_cta")));

    let panel = session.side_panel().unwrap();
    session.handle_input(&InputEvent::from_pointer_down(
        panel.left + 10.0,
        panel.top + 10.0,
        true,
    ));
    assert_eq!(session.selection(), &Selectable::element(id("hero_cta")));
}

#[test]
fn inline_toolbar_sits_above_range() {
    let mut session = mounted();
    let range = TextRange::new(id("hero_copy"), 7, 11);
    session.handle_input(&InputEvent::SelectionChange { range: Some(range) });

    let rect = range_rect(&session.doc, session.config.viewport, &range).unwrap();
    let placement = session.inline_toolbar().unwrap();
    assert_eq!(placement.top, (rect.top() - 44.0).max(0.0));
    assert_eq!(placement.top, 156.0);
    assert_eq!(placement.anchor, ToolbarAnchor::AboveSelection);

    // Collapsing hides it at once.
    session.handle_input(&InputEvent::SelectionChange {
        range: Some(TextRange::new(id("hero_copy"), 11, 11)),
    });
    assert_eq!(session.inline_toolbar(), None);
    assert_eq!(session.selection(), &Selectable::None);
}

#[test]
fn ranges_outside_a_text_run_are_dropped() {
    let mut session = mounted();
    session.handle_input(&InputEvent::SelectionChange {
        range: Some(TextRange::new(id("hero"), 0, 5)),
    });
    assert_eq!(session.selection(), &Selectable::None);

    // An active range ends when the selection moves into a container.
    let range = TextRange::new(id("hero_copy"), 0, 6);
    session.handle_input(&InputEvent::SelectionChange { range: Some(range) });
    assert_eq!(session.selection(), &Selectable::range(range));
    session.handle_input(&InputEvent::SelectionChange {
        range: Some(TextRange::new(id("hero"), 0, 5)),
    });
    assert_eq!(session.selection(), &Selectable::None);
    assert_eq!(session.inline_toolbar(), None);
}

#[test]
fn range_offsets_clamp_to_text_length() {
    let mut session = mounted();
    // "Start free" has 10 characters.
    session.handle_input(&InputEvent::SelectionChange {
        range: Some(TextRange::new(id("hero_cta"), 40, 50)),
    });
    assert_eq!(session.selection(), &Selectable::None);
    assert_eq!(session.inline_toolbar(), None);

    session.handle_input(&InputEvent::SelectionChange {
        range: Some(TextRange::new(id("hero_cta"), 6, 50)),
    });
    assert_eq!(
        session.selection(),
        &Selectable::range(TextRange::new(id("hero_cta"), 6, 10))
    );
    assert!(session.inline_toolbar().is_some());
}

#[test]
fn right_alignment_with_indent() {
    let mut session = mounted();
    session.select(Selectable::element(id("hero_copy")));
    session.apply(EditCommand::AlignHorizontal {
        align: pg_core::HorizontalAlign::Right,
        indent: Some(24.0),
    });
    assert_eq!(
        computed_css(&session, "hero_copy", StyleProperty::MarginLeft),
        "auto"
    );
    assert_eq!(
        computed_css(&session, "hero_copy", StyleProperty::MarginRight),
        "24px"
    );
    let panel = session.style_panel().unwrap();
    assert_eq!(panel.horizontal_align, "right");
}

// ─── Read paths ─────────────────────────────────────────────────────────

#[test]
fn round_trip_through_the_tag() {
    let mut session = mounted();
    session.select(Selectable::element(id("hero_copy")));
    session.apply(EditCommand::ApplyPreset("title".into()));
    assert_eq!(
        session.resolve_current_preset(),
        Some(PresetResolution::Tagged("title".into()))
    );

    // A typography override breaks the match, but the tag still wins.
    session.apply(EditCommand::SetOverride {
        property: StyleProperty::FontSize,
        value: CssValue::px(20.0),
    });
    assert_eq!(
        session.resolve_current_preset(),
        Some(PresetResolution::Tagged("title".into()))
    );

    // Without the tag, the match path sees a custom style.
    session.apply(EditCommand::ResetToCustom);
    let resolution = session.resolve_current_preset().unwrap();
    assert_eq!(resolution.source(), "custom");
    let panel = session.style_panel().unwrap();
    assert_eq!(panel.preset, None);
    assert_eq!(panel.computed.get("font-size").map(String::as_str), Some("20px"));
}

#[test]
fn round_trip_through_the_match() {
    let mut session = mounted();
    session.select(Selectable::element(id("hero_copy")));
    session.apply(EditCommand::ApplyPreset("title".into()));
    session.apply(EditCommand::ResetToCustom);

    // Untagged, but the overrides still equal the title preset.
    assert_eq!(
        session.resolve_current_preset(),
        Some(PresetResolution::Matched("title".into()))
    );

    // 3rem normalizes to the same 48px.
    session.apply(EditCommand::SetOverride {
        property: StyleProperty::FontSize,
        value: CssValue::Length(Length::Rem(3.0)),
    });
    assert_eq!(
        session.resolve_current_preset(),
        Some(PresetResolution::Matched("title".into()))
    );
}

#[test]
fn preset_application_is_idempotent() {
    let mut session = mounted();
    session.select(Selectable::element(id("features_title")));
    session.apply(EditCommand::ApplyPreset("subtitle".into()));
    let once = session.doc.computed_style(id("features_title")).unwrap();
    let markup = session.emit();

    assert!(
        session
            .apply(EditCommand::ApplyPreset("subtitle".into()))
            .is_empty()
    );
    assert_eq!(session.doc.computed_style(id("features_title")).unwrap(), once);
    assert_eq!(session.emit(), markup);
}

// ─── Resize ─────────────────────────────────────────────────────────────

#[test]
fn resize_drag_through_the_session() {
    let mut session = mounted();
    session.select(Selectable::element(id("hero_cta")));

    let overlay = session.overlay().unwrap();
    let handle = overlay
        .handles
        .iter()
        .find(|h| h.handle == ResizeHandle::Right)
        .unwrap();
    let start = handle.rect.center();
    let (x, y) = (start.x as f32, start.y as f32);

    session.handle_input(&InputEvent::from_pointer_down(x, y, false));
    assert!(matches!(session.resize_state(), ResizeState::Resizing { .. }));
    assert!(session.listeners().is_active(ListenerKind::PointerMove));
    assert!(session.listeners().is_active(ListenerKind::PointerUp));
    // A handle press is not a selection change.
    assert_eq!(session.selection(), &Selectable::element(id("hero_cta")));

    let patches = session.handle_input(&InputEvent::from_pointer_move(x + 40.0, y));
    assert_eq!(patches.len(), 1);
    assert_eq!(computed_css(&session, "hero_cta", StyleProperty::Width), "200px");

    session.handle_input(&InputEvent::from_pointer_up(x - 400.0, y));
    assert_eq!(session.resize_state(), &ResizeState::Idle);
    assert!(!session.listeners().is_active(ListenerKind::PointerMove));
    // Floored at the configured minimum.
    assert_eq!(computed_css(&session, "hero_cta", StyleProperty::Width), "16px");
}

#[test]
fn losing_the_selection_ends_a_resize() {
    let mut session = mounted();
    session.select(Selectable::element(id("hero_cta")));
    let overlay = session.overlay().unwrap();
    let corner = overlay
        .handles
        .iter()
        .find(|h| h.handle == ResizeHandle::BottomRight)
        .unwrap()
        .rect
        .center();
    session.handle_input(&InputEvent::from_pointer_down(corner.x as f32, corner.y as f32, false));
    assert!(matches!(session.resize_state(), ResizeState::Resizing { .. }));

    session.handle_input(&InputEvent::Key {
        key: "Escape".into(),
        ctrl: false,
        shift: false,
        alt: false,
        meta: false,
    });
    assert_eq!(session.resize_state(), &ResizeState::Idle);
    assert_eq!(
        session.listeners().active(),
        vec![ListenerKind::SelectionChange, ListenerKind::PointerDownCapture]
    );
}

// ─── Chrome ─────────────────────────────────────────────────────────────

#[test]
fn chrome_follows_selection_kind() {
    let mut session = mounted();
    assert!(session.chrome().is_empty());

    session.select(Selectable::element(id("hero_cta")));
    let block = session.chrome();
    assert!(block.iter().any(|n| n.class.starts_with("pg-handle")));
    assert!(block.iter().any(|n| n.class == "pg-toolbar pg-toolbar--side"));

    session.handle_input(&InputEvent::SelectionChange {
        range: Some(TextRange::new(id("hero_copy"), 0, 6)),
    });
    let text = session.chrome();
    assert!(text.iter().all(|n| !n.class.starts_with("pg-handle")));
    assert!(text.iter().any(|n| n.class == "pg-toolbar pg-toolbar--inline"));
    assert!(text.iter().all(|n| n.class != "pg-toolbar pg-toolbar--side"));
}

#[test]
fn shortcuts_drive_commands() {
    let mut session = mounted();
    session.select(Selectable::element(id("hero_copy")));
    let key = |key: &str, shift: bool| InputEvent::Key {
        key: key.into(),
        ctrl: true,
        shift,
        alt: false,
        meta: false,
    };

    session.handle_input(&key("b", false));
    assert_eq!(computed_css(&session, "hero_copy", StyleProperty::FontWeight), "700");

    session.handle_input(&key("]", false));
    session.handle_input(&key("]", false));
    assert_eq!(
        computed_css(&session, "hero_copy", StyleProperty::MarginLeft),
        "32px"
    );

    session.handle_input(&key("e", true));
    assert_eq!(
        computed_css(&session, "hero_copy", StyleProperty::MarginLeft),
        "auto"
    );
    assert_eq!(
        computed_css(&session, "hero_copy", StyleProperty::MarginRight),
        "auto"
    );
}
