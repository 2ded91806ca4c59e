//! WASM bridge for the playground editor: exposes the editing engine to
//! the marketing site's JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The page owns the DOM: it
//! forwards document events here, applies the returned style patches, and
//! mirrors the listener set and chrome nodes.

use pg_core::{
    BoxSide, ElementId, HorizontalAlign, StyleProperty, TextAlign, TextRange, VerticalAlign,
};
use pg_editor::{EditCommand, EditorSession, IndentSide, InputEvent, StylePatch};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// The WASM-facing editor controller.
///
/// All interaction from the page goes through this struct. Patches produced
/// by any call are queued until `take_patches_json`.
#[wasm_bindgen]
pub struct PlaygroundEditor {
    session: EditorSession,
    pending: Vec<StylePatch>,
}

fn to_json<T: Serialize + ?Sized>(value: &T, fallback: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| fallback.to_string())
}

fn js_error(message: String) -> JsValue {
    js_sys::Error::new(&message).into()
}

fn indent_side(side: &str) -> Option<IndentSide> {
    match side {
        "first-line" | "firstLine" => Some(IndentSide::FirstLine),
        "block" => Some(IndentSide::Block),
        _ => None,
    }
}

#[wasm_bindgen]
impl PlaygroundEditor {
    /// Load a document. `config_json` may be empty for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(markup: &str, config_json: &str) -> Result<PlaygroundEditor, JsValue> {
        console_error_panic_hook_setup();
        let session =
            EditorSession::load(markup, config_json).map_err(|e| js_error(e.to_string()))?;
        Ok(Self {
            session,
            pending: Vec::new(),
        })
    }

    // ─── Lifecycle ───────────────────────────────────────────────────────

    /// Attach listeners and queue the initial render.
    pub fn mount(&mut self) {
        let patches = self.session.mount();
        self.queue(patches);
    }

    pub fn unmount(&mut self) {
        self.session.unmount();
    }

    /// Listeners the page must have attached: `[{ "event", "capture" }]`.
    pub fn listeners_json(&self) -> String {
        to_json(&self.session.listeners().bindings(), "[]")
    }

    // ─── Input ───────────────────────────────────────────────────────────

    pub fn pointer_down(&mut self, x: f32, y: f32, in_chrome: bool) -> bool {
        let patches = self
            .session
            .handle_input(&InputEvent::from_pointer_down(x, y, in_chrome));
        self.queue(patches)
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        let patches = self.session.handle_input(&InputEvent::from_pointer_move(x, y));
        self.queue(patches)
    }

    pub fn pointer_up(&mut self, x: f32, y: f32) -> bool {
        let patches = self.session.handle_input(&InputEvent::from_pointer_up(x, y));
        self.queue(patches)
    }

    /// The document selection now spans `start..end` of `element`'s text.
    /// Pass no element when it left the document or crosses elements.
    pub fn selection_change(&mut self, element: Option<String>, start: usize, end: usize) {
        let range = element
            .as_deref()
            .and_then(ElementId::lookup)
            .filter(|id| self.session.doc.get(*id).is_some())
            .map(|id| TextRange::new(id, start, end));
        self.session
            .handle_input(&InputEvent::SelectionChange { range });
    }

    /// Keyboard shortcut. Returns `true` if the document changed.
    pub fn key(&mut self, key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> bool {
        let patches = self.session.handle_input(&InputEvent::Key {
            key: key.to_string(),
            ctrl,
            shift,
            alt,
            meta,
        });
        self.queue(patches)
    }

    // ─── Commands ────────────────────────────────────────────────────────

    pub fn apply_preset(&mut self, name: &str) -> bool {
        self.command(EditCommand::ApplyPreset(name.to_string()))
    }

    /// Set one property from CSS text, e.g. `("letter-spacing", "0.02em")`.
    pub fn set_override(&mut self, property: &str, value: &str) -> bool {
        let Some(property) = StyleProperty::parse(property) else {
            log::warn!("unknown style property `{property}`");
            return false;
        };
        let Some(value) = pg_core::parse_value(property, value) else {
            log::warn!("invalid value `{value}` for {}", property.css_name());
            return false;
        };
        self.command(EditCommand::SetOverride { property, value })
    }

    pub fn reset_to_custom(&mut self) -> bool {
        self.command(EditCommand::ResetToCustom)
    }

    pub fn toggle_bold(&mut self) -> bool {
        self.command(EditCommand::ToggleBold)
    }

    pub fn set_text_align(&mut self, align: &str) -> bool {
        match TextAlign::parse(align) {
            Some(align) => self.command(EditCommand::SetTextAlign(align)),
            None => false,
        }
    }

    /// `side` is `"first-line"` or `"block"`.
    pub fn indent(&mut self, side: &str, delta: f32) -> bool {
        match indent_side(side) {
            Some(side) => self.command(EditCommand::Indent { side, delta }),
            None => false,
        }
    }

    pub fn indent_to(&mut self, side: &str, value: f32) -> bool {
        match indent_side(side) {
            Some(side) => self.command(EditCommand::IndentTo { side, value }),
            None => false,
        }
    }

    pub fn set_margin(&mut self, side: &str, value: f32) -> bool {
        match BoxSide::parse(side) {
            Some(side) => self.command(EditCommand::SetMargin { side, value }),
            None => false,
        }
    }

    pub fn set_padding(&mut self, side: &str, value: f32) -> bool {
        match BoxSide::parse(side) {
            Some(side) => self.command(EditCommand::SetPadding { side, value }),
            None => false,
        }
    }

    pub fn set_width(&mut self, value: f32) -> bool {
        self.command(EditCommand::SetWidth(value))
    }

    pub fn align_horizontal(&mut self, align: &str, indent: Option<f32>) -> bool {
        match HorizontalAlign::parse(align) {
            Some(align) => self.command(EditCommand::AlignHorizontal { align, indent }),
            None => false,
        }
    }

    pub fn align_vertical(&mut self, align: &str) -> bool {
        match VerticalAlign::parse(align) {
            Some(align) => self.command(EditCommand::AlignVertical(align)),
            None => false,
        }
    }

    // ─── Output ──────────────────────────────────────────────────────────

    /// Drain queued patches: `[{ "element", "attributes", "removed"? }]`.
    pub fn take_patches_json(&mut self) -> String {
        let patches = std::mem::take(&mut self.pending);
        to_json(&patches, "[]")
    }

    pub fn selection_json(&self) -> String {
        to_json(self.session.selection(), r#"{"kind":"none"}"#)
    }

    /// Overlay, guides and toolbars as absolutely positioned nodes.
    pub fn chrome_json(&self) -> String {
        to_json(&self.session.chrome(), "[]")
    }

    /// Control state for the current selection, `null` when nothing is
    /// selected.
    pub fn style_panel_json(&self) -> String {
        to_json(&self.session.style_panel(), "null")
    }

    /// Current document as markup.
    pub fn get_markup(&self) -> String {
        self.session.emit()
    }
}

impl PlaygroundEditor {
    fn queue(&mut self, patches: Vec<StylePatch>) -> bool {
        let changed = !patches.is_empty();
        self.pending.extend(patches);
        changed
    }

    fn command(&mut self, command: EditCommand) -> bool {
        let patches = self.session.apply(command);
        self.queue(patches)
    }
}

/// Set up a panic hook that logs to console.error.
fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Playground WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

// ─── Standalone validation (no editor needed) ──────────────────────────

/// Validate markup. Returns JSON: `{"ok":true}` or `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn validate(markup: &str) -> String {
    match pg_core::parse_document(markup) {
        Ok(_) => serde_json::json!({ "ok": true }).to_string(),
        Err(e) => serde_json::json!({ "ok": false, "error": e.to_string() }).to_string(),
    }
}
