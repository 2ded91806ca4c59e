//! Integration tests: properties that must hold across whole event sequences.

use pg_core::{ElementId, TextRange};
use pg_editor::{
    EditCommand, EditorConfig, EditorSession, IndentSide, InputEvent, ResizeState, Selectable,
};

fn mounted() -> EditorSession {
    let input = include_str!("fixtures/hero.pg");
    let mut session = EditorSession::from_markup(input, EditorConfig::default()).unwrap();
    session.mount();
    session
}

/// Small deterministic generator so failures replay exactly.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }

    fn coord(&mut self, max: f32) -> f32 {
        self.below(max as u64) as f32
    }
}

fn random_event(rng: &mut Lcg) -> InputEvent {
    let texts = ["hero_copy", "hero_cta", "features_title", "feature_speed_name"];
    match rng.below(6) {
        0 | 1 => {
            let (x, y) = (rng.coord(1280.0), rng.coord(800.0));
            InputEvent::from_pointer_down(x, y, rng.below(4) == 0)
        }
        2 => {
            let element = ElementId::intern(texts[rng.below(texts.len() as u64) as usize]);
            let a = rng.below(12) as usize;
            let b = rng.below(12) as usize;
            InputEvent::SelectionChange {
                range: Some(TextRange::new(element, a, b)),
            }
        }
        3 => InputEvent::SelectionChange { range: None },
        4 => InputEvent::from_pointer_move(rng.coord(1280.0), rng.coord(800.0)),
        _ => InputEvent::Key {
            key: "Escape".into(),
            ctrl: false,
            shift: false,
            alt: false,
            meta: false,
        },
    }
}

#[test]
fn at_most_one_selection_kind_is_active() {
    let mut session = mounted();
    let mut rng = Lcg(0x5eed);

    for step in 0..600 {
        let event = random_event(&mut rng);
        session.handle_input(&event);

        let selection = *session.selection();
        let is_range = matches!(selection, Selectable::TextRange { .. });
        let is_element = matches!(selection, Selectable::Element { .. });
        assert!(!(is_range && is_element), "step {step}: {event:?}");

        // Chrome always agrees with the selection kind.
        assert_eq!(
            session.inline_toolbar().is_some(),
            is_range,
            "step {step}: inline toolbar after {event:?}"
        );
        assert_eq!(
            session.side_panel().is_some(),
            is_element,
            "step {step}: side panel after {event:?}"
        );
        if let Selectable::TextRange { range } = selection {
            assert!(!range.is_collapsed(), "step {step}: collapsed range kept");
        }
        if let ResizeState::Resizing { element, .. } = *session.resize_state() {
            assert_eq!(selection, Selectable::element(element), "step {step}");
        }
    }
}

#[test]
fn block_indent_stays_in_bounds_for_any_delta() {
    let mut session = mounted();
    session.select(Selectable::element(ElementId::intern("hero_copy")));
    let max = ((400.0_f32 - 200.0) * 0.5).floor();

    let mut delta = -650.0;
    while delta <= 650.0 {
        session.apply(EditCommand::Indent {
            side: IndentSide::Block,
            delta,
        });
        let style = session
            .doc
            .computed_style(ElementId::intern("hero_copy"))
            .unwrap();
        let indent = style.margin.left.to_px(style.font_size, 400.0).unwrap();
        assert!(
            (0.0..=max).contains(&indent),
            "delta {delta} gave indent {indent}"
        );
        delta += 37.0;
    }
}

#[test]
fn first_line_indent_stays_in_bounds() {
    let mut session = mounted();
    session.select(Selectable::element(ElementId::intern("hero_copy")));
    for value in [-100.0, 0.0, 120.0, 199.0, 200.0, 201.0, 5000.0] {
        session.apply(EditCommand::IndentTo {
            side: IndentSide::FirstLine,
            value,
        });
        let style = session
            .doc
            .computed_style(ElementId::intern("hero_copy"))
            .unwrap();
        let indent = style.text_indent.to_px(style.font_size, 400.0).unwrap();
        assert!((0.0..=200.0).contains(&indent), "{value} gave {indent}");
    }
}

#[test]
fn commands_after_clear_change_nothing() {
    let mut session = mounted();
    session.select(Selectable::element(ElementId::intern("hero_cta")));
    session.clear_selection();
    let before = session.emit();
    for command in [
        EditCommand::ToggleBold,
        EditCommand::ApplyPreset("title".into()),
        EditCommand::SetWidth(300.0),
        EditCommand::Indent {
            side: IndentSide::Block,
            delta: 16.0,
        },
    ] {
        assert!(session.apply(command).is_empty());
    }
    assert_eq!(session.emit(), before);
}
