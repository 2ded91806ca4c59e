//! Selection manager: which single element or text range is active.
//!
//! The active selection is one `Selectable`, so an element and a text range
//! can never be active together. Every transition reports the lifecycle
//! events it caused, in order, so the session can refresh chrome.

use crate::input::PointerOrigin;
use pg_core::layout::BoxMetrics;
use pg_core::{Document, ElementId, NodeIndex, TextRange};
use pg_render::{hit_target, hit_test};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Selectable {
    #[default]
    None,
    Element { id: ElementId },
    TextRange { range: TextRange },
}

impl Selectable {
    pub fn element(id: ElementId) -> Self {
        Selectable::Element { id }
    }

    pub fn range(range: TextRange) -> Self {
        Selectable::TextRange { range }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Selectable::None)
    }

    /// The element that style commands act on: the selected element, or
    /// the element owning the selected text range.
    pub fn target(&self) -> Option<ElementId> {
        match self {
            Selectable::None => None,
            Selectable::Element { id } => Some(*id),
            Selectable::TextRange { range } => Some(range.element),
        }
    }

    pub fn state(&self) -> SelectionState {
        match self {
            Selectable::None => SelectionState::Empty,
            Selectable::Element { .. } => SelectionState::ElementSelected,
            Selectable::TextRange { .. } => SelectionState::RangeSelected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Empty,
    ElementSelected,
    RangeSelected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    Blurred(ElementId),
    Focused(ElementId),
    RangeStarted(TextRange),
    RangeChanged(TextRange),
    /// The active range ended: it collapsed, left the document, or was
    /// replaced by an element selection.
    RangeCollapsed,
    /// The selection became empty.
    Cleared,
}

#[derive(Debug, Default)]
pub struct SelectionManager {
    current: Selectable,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &Selectable {
        &self.current
    }

    pub fn state(&self) -> SelectionState {
        self.current.state()
    }

    /// Make `target` the active selection.
    ///
    /// Reselecting the current element or range is a no-op. A collapsed
    /// range ends an active range and is otherwise ignored.
    pub fn select(&mut self, target: Selectable) -> Vec<SelectionEvent> {
        if target == self.current {
            return Vec::new();
        }

        let events = match target {
            Selectable::None => return self.clear(),
            Selectable::TextRange { range } if range.is_collapsed() => {
                if matches!(self.current, Selectable::TextRange { .. }) {
                    return self.clear();
                }
                return Vec::new();
            }
            Selectable::Element { id } => {
                let mut events = self.leave();
                events.push(SelectionEvent::Focused(id));
                events
            }
            Selectable::TextRange { range } => match self.current {
                Selectable::TextRange { .. } => vec![SelectionEvent::RangeChanged(range)],
                _ => {
                    let mut events = self.leave();
                    events.push(SelectionEvent::RangeStarted(range));
                    events
                }
            },
        };

        log::debug!("selection: {:?} -> {:?}", self.current, target);
        self.current = target;
        events
    }

    pub fn clear(&mut self) -> Vec<SelectionEvent> {
        if self.current.is_none() {
            return Vec::new();
        }
        let mut events = self.leave();
        events.push(SelectionEvent::Cleared);
        log::debug!("selection: {:?} -> None", self.current);
        self.current = Selectable::None;
        events
    }

    /// Events for leaving the current selection, without changing it.
    fn leave(&self) -> Vec<SelectionEvent> {
        match self.current {
            Selectable::None => Vec::new(),
            Selectable::Element { id } => vec![SelectionEvent::Blurred(id)],
            Selectable::TextRange { .. } => vec![SelectionEvent::RangeCollapsed],
        }
    }

    /// The document's text selection changed.
    pub fn on_selection_change(&mut self, range: Option<TextRange>) -> Vec<SelectionEvent> {
        match range {
            Some(range) => self.select(Selectable::range(range)),
            None if matches!(self.current, Selectable::TextRange { .. }) => self.clear(),
            None => Vec::new(),
        }
    }

    /// Capture-phase pointer-down on the document.
    pub fn on_pointer_down(
        &mut self,
        doc: &Document,
        boxes: &HashMap<NodeIndex, BoxMetrics>,
        x: f32,
        y: f32,
        origin: PointerOrigin,
    ) -> Vec<SelectionEvent> {
        if origin == PointerOrigin::Chrome {
            log::debug!("pointer-down in chrome, selection kept");
            return Vec::new();
        }

        let Some(hit) = hit_test(doc, boxes, x, y) else {
            return self.clear();
        };

        if let Selectable::Element { id } = self.current
            && (id == hit || doc.is_ancestor_of(id, hit))
        {
            return Vec::new();
        }

        self.select(Selectable::element(hit_target(doc, hit)))
    }
}
