//! Editor session: the one object that owns the document, the selection,
//! the resize machine and the listener set.
//!
//! Inputs flow in through `handle_input` and `apply`; every mutation ends
//! in a single rendering step that diffs the emitted attributes against
//! what the host last applied and returns only the changed elements as
//! `StylePatch`es. Geometry is re-measured on demand and never cached.

use crate::config::EditorConfig;
use crate::input::{InputEvent, PointerOrigin};
use crate::listeners::{ListenerKind, ListenerSet};
use crate::mutator::{IndentSide, Mutator};
use crate::resize::{ResizeMachine, ResizeState, ResizeUpdate};
use crate::resolver::{self, PresetResolution};
use crate::selection::{Selectable, SelectionEvent, SelectionManager};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::toolbar::ToolbarPositioner;
use pg_core::emitter::document_attributes;
use pg_core::layout::GeometrySnapshot;
use pg_core::{
    Attributes, BoxSide, CssValue, Document, ElementId, HorizontalAlign, ParseError,
    StyleProperty, TextAlign, TextRange, ToolbarPlacement, VerticalAlign, emit_document,
    parse_document, range_rect, resolve_layout, snapshot,
};
use pg_render::{
    ChromeNode, Guide, Overlay, OverlayKind, OverlayStyle, ToolbarBox, alignment_guides,
    chrome_nodes, hit_test_handle, render_overlay_with,
};
use serde::Serialize;
use smallvec::SmallVec;
use std::collections::BTreeMap;
use thiserror::Error;

/// Loading failures. Nothing after loading can fail.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid markup: {0}")]
    Markup(#[from] ParseError),
    #[error("invalid editor config: {0}")]
    Config(#[from] serde_json::Error),
}

/// A user command aimed at the current selection.
#[derive(Debug, Clone, PartialEq)]
pub enum EditCommand {
    ApplyPreset(String),
    SetOverride {
        property: StyleProperty,
        value: CssValue,
    },
    ResetToCustom,
    ToggleBold,
    SetTextAlign(TextAlign),
    Indent {
        side: IndentSide,
        delta: f32,
    },
    IndentTo {
        side: IndentSide,
        value: f32,
    },
    SetMargin {
        side: BoxSide,
        value: f32,
    },
    SetPadding {
        side: BoxSide,
        value: f32,
    },
    SetWidth(f32),
    AlignHorizontal {
        align: HorizontalAlign,
        indent: Option<f32>,
    },
    AlignVertical(VerticalAlign),
}

impl EditCommand {
    /// The command a shortcut stands for. `Deselect` is not an edit.
    pub fn from_shortcut(action: ShortcutAction, indent_step: f32) -> Option<Self> {
        Some(match action {
            ShortcutAction::Deselect => return None,
            ShortcutAction::ToggleBold => EditCommand::ToggleBold,
            ShortcutAction::ResetToCustom => EditCommand::ResetToCustom,
            ShortcutAction::IndentIncrease => EditCommand::Indent {
                side: IndentSide::Block,
                delta: indent_step,
            },
            ShortcutAction::IndentDecrease => EditCommand::Indent {
                side: IndentSide::Block,
                delta: -indent_step,
            },
            ShortcutAction::AlignLeft => EditCommand::AlignHorizontal {
                align: HorizontalAlign::Left,
                indent: None,
            },
            ShortcutAction::AlignCenter => EditCommand::AlignHorizontal {
                align: HorizontalAlign::Center,
                indent: None,
            },
            ShortcutAction::AlignRight => EditCommand::AlignHorizontal {
                align: HorizontalAlign::Right,
                indent: None,
            },
        })
    }
}

/// New rendered attributes for one element. `removed` lists attributes
/// the host must drop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StylePatch {
    pub element: ElementId,
    pub attributes: Attributes,
    #[serde(skip_serializing_if = "SmallVec::is_empty")]
    pub removed: SmallVec<[String; 2]>,
}

/// State of the style controls for the current selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StylePanel {
    pub element: ElementId,
    pub role: &'static str,
    pub preset: Option<String>,
    /// `tagged`, `matched` or `custom`.
    pub preset_source: &'static str,
    pub bold: bool,
    pub text_align: &'static str,
    pub horizontal_align: &'static str,
    pub vertical_align: &'static str,
    pub computed: BTreeMap<&'static str, String>,
    pub presets: Vec<String>,
    pub placement: ToolbarPlacement,
}

pub struct EditorSession {
    /// The document being edited (single source of truth).
    pub doc: Document,

    pub config: EditorConfig,

    selection: SelectionManager,
    resize: ResizeMachine,
    listeners: ListenerSet,
    toolbar: ToolbarPositioner,

    /// Placement of the inline toolbar while a text range is active.
    inline_toolbar: Option<ToolbarPlacement>,

    mounted: bool,

    /// Attributes the host last applied, keyed by element id.
    rendered: BTreeMap<String, Attributes>,
}

impl EditorSession {
    pub fn new(doc: Document, config: EditorConfig) -> Self {
        Self {
            doc,
            selection: SelectionManager::new(),
            resize: ResizeMachine::new(config.min_resize_extent),
            listeners: ListenerSet::new(),
            toolbar: ToolbarPositioner::from_config(&config),
            inline_toolbar: None,
            mounted: false,
            rendered: BTreeMap::new(),
            config,
        }
    }

    pub fn from_markup(markup: &str, config: EditorConfig) -> Result<Self, SessionError> {
        let doc = parse_document(markup)?;
        Ok(Self::new(doc, config))
    }

    /// Load from markup and a JSON config. Blank JSON means defaults.
    pub fn load(markup: &str, config_json: &str) -> Result<Self, SessionError> {
        let config = if config_json.trim().is_empty() {
            EditorConfig::default()
        } else {
            EditorConfig::from_json(config_json)?
        };
        Self::from_markup(markup, config)
    }

    // ─── Lifecycle ───────────────────────────────────────────────────────

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Attach the document listeners and render every element once.
    pub fn mount(&mut self) -> Vec<StylePatch> {
        if self.mounted {
            return Vec::new();
        }
        self.mounted = true;
        self.listeners.attach(ListenerKind::SelectionChange);
        self.listeners.attach(ListenerKind::PointerDownCapture);
        self.rendered.clear();
        self.render()
    }

    /// Detach everything and drop transient state.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.resize.cancel();
        self.listeners.detach_all();
        self.selection.clear();
        self.inline_toolbar = None;
        self.mounted = false;
        log::debug!("editor unmounted");
    }

    pub fn listeners(&self) -> &ListenerSet {
        &self.listeners
    }

    // ─── Selection ───────────────────────────────────────────────────────

    pub fn selection(&self) -> &Selectable {
        self.selection.current()
    }

    pub fn select(&mut self, target: Selectable) -> Vec<SelectionEvent> {
        let events = self.selection.select(target);
        self.after_selection(&events);
        events
    }

    pub fn clear_selection(&mut self) -> Vec<SelectionEvent> {
        let events = self.selection.clear();
        self.after_selection(&events);
        events
    }

    fn after_selection(&mut self, events: &[SelectionEvent]) {
        if events.is_empty() {
            return;
        }
        if let ResizeState::Resizing { element, .. } = *self.resize.state()
            && self.selection.current() != &Selectable::element(element)
        {
            self.end_resize();
        }
        self.refresh_inline_toolbar();
    }

    fn refresh_inline_toolbar(&mut self) {
        self.inline_toolbar = match self.selection.current() {
            Selectable::TextRange { range } => range_rect(&self.doc, self.config.viewport, range)
                .map(|rect| self.toolbar.place_inline(&rect)),
            _ => None,
        };
    }

    // ─── Input ───────────────────────────────────────────────────────────

    pub fn handle_input(&mut self, event: &InputEvent) -> Vec<StylePatch> {
        if !self.mounted {
            log::debug!("input ignored while unmounted");
            return Vec::new();
        }

        match event {
            InputEvent::PointerDown { x, y, origin } => {
                if *origin == PointerOrigin::Document && self.try_begin_resize(*x, *y) {
                    return Vec::new();
                }
                let boxes = resolve_layout(&self.doc, self.config.viewport);
                let events = self
                    .selection
                    .on_pointer_down(&self.doc, &boxes, *x, *y, *origin);
                self.after_selection(&events);
                Vec::new()
            }
            InputEvent::PointerMove { .. } | InputEvent::PointerUp { .. } => {
                let update = self.resize.handle(event);
                if !self.resize.is_resizing() {
                    self.end_resize();
                }
                match update {
                    Some(update) => self.apply_resize(update),
                    None => Vec::new(),
                }
            }
            InputEvent::SelectionChange { range } => {
                let range = range.and_then(|r| self.owned_range(r));
                let events = self.selection.on_selection_change(range);
                self.after_selection(&events);
                Vec::new()
            }
            InputEvent::Key {
                key,
                ctrl,
                shift,
                alt,
                meta,
            } => match ShortcutMap::resolve(key, *ctrl, *shift, *alt, *meta) {
                Some(ShortcutAction::Deselect) => {
                    self.clear_selection();
                    Vec::new()
                }
                Some(action) => EditCommand::from_shortcut(action, self.config.indent_step)
                    .map(|command| self.apply(command))
                    .unwrap_or_default(),
                None => Vec::new(),
            },
        }
    }

    /// `range` checked against its owner: `None` unless the owner carries a
    /// text run, with both offsets clamped to the text length.
    fn owned_range(&self, range: TextRange) -> Option<TextRange> {
        let Some(node) = self.doc.get(range.element) else {
            log::warn!("selection in unknown element {}", range.element);
            return None;
        };
        if !node.role.has_text() {
            log::debug!("selection in {} ignored: no text run", range.element);
            return None;
        }
        let len = node.text_len();
        Some(TextRange::new(range.element, range.start.min(len), range.end.min(len)))
    }

    fn try_begin_resize(&mut self, x: f32, y: f32) -> bool {
        let Some(overlay) = self.overlay() else {
            return false;
        };
        let Some(handle) = hit_test_handle(&overlay, x, y) else {
            return false;
        };
        let Selectable::Element { id } = *self.selection.current() else {
            return false;
        };
        let start_size = (overlay.outline.width() as f32, overlay.outline.height() as f32);
        if !self.resize.begin(id, handle, (x, y), start_size) {
            return false;
        }
        self.listeners.attach(ListenerKind::PointerMove);
        self.listeners.attach(ListenerKind::PointerUp);
        true
    }

    fn end_resize(&mut self) {
        self.resize.cancel();
        self.listeners.detach(ListenerKind::PointerMove);
        self.listeners.detach(ListenerKind::PointerUp);
    }

    pub fn resize_state(&self) -> &ResizeState {
        self.resize.state()
    }

    fn apply_resize(&mut self, update: ResizeUpdate) -> Vec<StylePatch> {
        for (prop, size) in [
            (StyleProperty::Width, update.width),
            (StyleProperty::Height, update.height),
        ] {
            if let Some(size) = size {
                resolver::apply_override(&mut self.doc, update.element, prop, CssValue::px(size));
            }
        }
        self.refresh_inline_toolbar();
        self.render()
    }

    // ─── Commands ────────────────────────────────────────────────────────

    /// Run a command against the current selection. With nothing selected
    /// it is a no-op and returns no patches.
    pub fn apply(&mut self, command: EditCommand) -> Vec<StylePatch> {
        let Some(id) = self.selection.current().target() else {
            log::debug!("{command:?} ignored: nothing selected");
            return Vec::new();
        };

        let changed = match command {
            EditCommand::ApplyPreset(name) => resolver::apply_preset(&mut self.doc, id, &name),
            EditCommand::SetOverride { property, value } => {
                resolver::apply_override(&mut self.doc, id, property, value)
            }
            EditCommand::ResetToCustom => resolver::reset_to_custom(&mut self.doc, id),
            EditCommand::ToggleBold => resolver::toggle_bold(&mut self.doc, id),
            EditCommand::SetTextAlign(align) => resolver::set_text_align(&mut self.doc, id, align),
            EditCommand::Indent { side, delta } => {
                self.mutator().set_indent(id, side, delta).is_some()
            }
            EditCommand::IndentTo { side, value } => {
                self.mutator().indent_to(id, side, value).is_some()
            }
            EditCommand::SetMargin { side, value } => {
                self.mutator().set_margin(id, side, value).is_some()
            }
            EditCommand::SetPadding { side, value } => {
                self.mutator().set_padding(id, side, value).is_some()
            }
            EditCommand::SetWidth(value) => self.mutator().set_width(id, value).is_some(),
            EditCommand::AlignHorizontal { align, indent } => {
                self.mutator().align_horizontal(id, align, indent).is_some()
            }
            EditCommand::AlignVertical(align) => self.mutator().align_vertical(id, align),
        };

        if !changed {
            return Vec::new();
        }
        self.refresh_inline_toolbar();
        self.render()
    }

    fn mutator(&mut self) -> Mutator<'_> {
        Mutator::new(&mut self.doc, self.config.viewport, self.config.min_content_width)
    }

    /// The single rendering step: emitted attributes diffed against the
    /// last applied ones.
    fn render(&mut self) -> Vec<StylePatch> {
        let current = document_attributes(&self.doc);
        let mut patches = Vec::new();
        for (key, attributes) in &current {
            let previous = self.rendered.get(key);
            if previous == Some(attributes) {
                continue;
            }
            let removed = previous
                .map(|p| {
                    p.keys()
                        .filter(|k| !attributes.contains_key(*k))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default();
            patches.push(StylePatch {
                element: ElementId::intern(key),
                attributes: attributes.clone(),
                removed,
            });
        }
        log::trace!("render: {} patches", patches.len());
        self.rendered = current;
        patches
    }

    // ─── Read paths ──────────────────────────────────────────────────────

    /// Fresh geometry of the selection's element.
    pub fn snapshot(&self) -> Option<GeometrySnapshot> {
        let id = self.selection.current().target()?;
        snapshot(&self.doc, self.config.viewport, id)
    }

    fn overlay_kind(&self) -> Option<OverlayKind> {
        match self.selection.current() {
            Selectable::None => None,
            Selectable::Element { id } => {
                if self.doc.get(*id)?.role.is_block() {
                    Some(OverlayKind::Block)
                } else {
                    Some(OverlayKind::Text)
                }
            }
            Selectable::TextRange { .. } => Some(OverlayKind::Text),
        }
    }

    fn overlay_for(&self, snapshot: &GeometrySnapshot) -> Option<Overlay> {
        let style = OverlayStyle {
            label_offset: self.config.label_offset as f64,
            ..OverlayStyle::default()
        };
        Some(render_overlay_with(snapshot, self.overlay_kind()?, style))
    }

    pub fn overlay(&self) -> Option<Overlay> {
        self.overlay_for(&self.snapshot()?)
    }

    pub fn guides(&self) -> Vec<Guide> {
        match (self.overlay_kind(), self.snapshot()) {
            (Some(OverlayKind::Block), Some(snapshot)) => alignment_guides(&snapshot),
            _ => Vec::new(),
        }
    }

    pub fn inline_toolbar(&self) -> Option<ToolbarPlacement> {
        self.inline_toolbar
    }

    /// The side panel is docked while an element is selected.
    pub fn side_panel(&self) -> Option<ToolbarPlacement> {
        match self.selection.current() {
            Selectable::Element { .. } => Some(self.toolbar.place_side_panel()),
            _ => None,
        }
    }

    pub fn chrome(&self) -> Vec<ChromeNode> {
        let snapshot = self.snapshot();
        let overlay = snapshot.as_ref().and_then(|s| self.overlay_for(s));
        let guides = match (&overlay, &snapshot) {
            (Some(o), Some(s)) if o.kind == OverlayKind::Block => alignment_guides(s),
            _ => Vec::new(),
        };

        let mut toolbars = Vec::new();
        if let Some(placement) = self.inline_toolbar {
            toolbars.push(ToolbarBox {
                placement,
                width: self.config.toolbar.width,
                height: self.config.toolbar.height,
            });
        }
        if let Some(placement) = self.side_panel() {
            toolbars.push(ToolbarBox {
                placement,
                width: self.config.side_panel_width,
                height: self.config.side_panel_height,
            });
        }
        chrome_nodes(overlay.as_ref(), &guides, &toolbars)
    }

    pub fn resolve_current_preset(&self) -> Option<PresetResolution> {
        resolver::resolve_current_preset(&self.doc, self.selection.current().target()?)
    }

    /// `None` renders the controls in their neutral state.
    pub fn style_panel(&self) -> Option<StylePanel> {
        let id = self.selection.current().target()?;
        let node = self.doc.get(id)?;
        let computed = self.doc.computed_style(id)?;
        let resolution = resolver::resolve_current_preset(&self.doc, id)?;
        let placement = match self.inline_toolbar {
            Some(inline) => inline,
            None => self.toolbar.place_side_panel(),
        };
        Some(StylePanel {
            element: id,
            role: node.role.name(),
            preset: resolution.name().map(str::to_string),
            preset_source: resolution.source(),
            bold: computed.is_bold(),
            text_align: computed.text_align.name(),
            horizontal_align: HorizontalAlign::of(&computed.margin).name(),
            vertical_align: VerticalAlign::of(&computed.margin).name(),
            computed: computed.to_css_map(),
            presets: self.doc.catalog.names().into_iter().map(str::to_string).collect(),
            placement,
        })
    }

    /// Markup of the current document.
    pub fn emit(&self) -> String {
        emit_document(&self.doc)
    }

    pub fn element_attributes(&self, id: ElementId) -> Option<Attributes> {
        self.rendered.get(id.as_str()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAGE: &str = r#"
container @ses_section {
  width: 600px
  text @ses_copy "Editable copy"
  button @ses_cta "Go" { width: 120px }
}
"#;

    fn session() -> EditorSession {
        let mut session = EditorSession::from_markup(PAGE, EditorConfig::default()).unwrap();
        session.mount();
        session
    }

    fn id(s: &str) -> ElementId {
        ElementId::intern(s)
    }

    #[test]
    fn mount_renders_everything_once() {
        let mut session = EditorSession::from_markup(PAGE, EditorConfig::default()).unwrap();
        let patches = session.mount();
        // root, section, copy, cta
        assert_eq!(patches.len(), 4);
        assert!(session.mount().is_empty());
        assert_eq!(
            session.listeners().active(),
            vec![ListenerKind::SelectionChange, ListenerKind::PointerDownCapture]
        );
    }

    #[test]
    fn commands_without_selection_are_noops() {
        let mut session = session();
        let before = session.emit();
        assert!(session.apply(EditCommand::ToggleBold).is_empty());
        assert!(session.apply(EditCommand::SetWidth(10.0)).is_empty());
        assert_eq!(session.emit(), before);
        assert!(session.style_panel().is_none());
    }

    #[test]
    fn patches_only_touch_changed_elements() {
        let mut session = session();
        session.select(Selectable::element(id("ses_copy")));
        let patches = session.apply(EditCommand::SetTextAlign(TextAlign::Center));
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].element, id("ses_copy"));
        assert_eq!(
            patches[0].attributes.get("style").map(String::as_str),
            Some("text-align: center")
        );
        // Same value again: nothing to render.
        assert!(
            session
                .apply(EditCommand::SetTextAlign(TextAlign::Center))
                .is_empty()
        );
    }

    #[test]
    fn escape_deselects() {
        let mut session = session();
        session.select(Selectable::element(id("ses_cta")));
        session.handle_input(&InputEvent::Key {
            key: "Escape".into(),
            ctrl: false,
            shift: false,
            alt: false,
            meta: false,
        });
        assert_eq!(session.selection(), &Selectable::None);
    }

    #[test]
    fn input_is_ignored_until_mounted() {
        let mut session = EditorSession::from_markup(PAGE, EditorConfig::default()).unwrap();
        session.handle_input(&InputEvent::from_pointer_down(5.0, 5.0, false));
        assert_eq!(session.selection(), &Selectable::None);
    }

    #[test]
    fn unmount_releases_everything() {
        let mut session = session();
        session.select(Selectable::element(id("ses_cta")));
        session.unmount();
        assert!(session.listeners().is_empty());
        assert_eq!(session.selection(), &Selectable::None);
        assert!(!session.is_mounted());
    }

    #[test]
    fn load_reports_both_failure_kinds() {
        assert!(matches!(
            EditorSession::load("text @x {", ""),
            Err(SessionError::Markup(_))
        ));
        assert!(matches!(
            EditorSession::load(PAGE, "{ nope"),
            Err(SessionError::Config(_))
        ));
        assert!(EditorSession::load(PAGE, "  ").is_ok());
    }
}
