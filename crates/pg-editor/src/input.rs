//! Document events as the session sees them.
//!
//! The host's document-level listeners translate DOM events into
//! `InputEvent`s; nothing here touches the DOM.

use pg_core::TextRange;

/// Where a pointer-down landed, as seen by the capture-phase listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOrigin {
    /// Inside the rendered document.
    Document,
    /// Inside editor chrome: toolbars, the side panel, their controls.
    Chrome,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed (capture phase, before children see it).
    PointerDown { x: f32, y: f32, origin: PointerOrigin },

    /// Pointer moved. Only delivered while a resize is in progress.
    PointerMove { x: f32, y: f32 },

    /// Pointer released. Only delivered while a resize is in progress.
    PointerUp { x: f32, y: f32 },

    /// The document's text selection changed. `None` when the selection
    /// left the document or no longer sits inside one text element.
    SelectionChange { range: Option<TextRange> },

    /// `keydown` with its modifier state.
    Key {
        key: String,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
    },
}

impl InputEvent {
    /// `in_chrome` is set when the press target sits inside editor chrome.
    pub fn from_pointer_down(x: f32, y: f32, in_chrome: bool) -> Self {
        Self::PointerDown {
            x,
            y,
            origin: if in_chrome {
                PointerOrigin::Chrome
            } else {
                PointerOrigin::Document
            },
        }
    }

    pub fn from_pointer_move(x: f32, y: f32) -> Self {
        Self::PointerMove { x, y }
    }

    pub fn from_pointer_up(x: f32, y: f32) -> Self {
        Self::PointerUp { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_down_origin() {
        assert_eq!(
            InputEvent::from_pointer_down(1.0, 2.0, true),
            InputEvent::PointerDown {
                x: 1.0,
                y: 2.0,
                origin: PointerOrigin::Chrome
            }
        );
        assert_eq!(
            InputEvent::from_pointer_down(3.0, 4.0, false),
            InputEvent::PointerDown {
                x: 3.0,
                y: 4.0,
                origin: PointerOrigin::Document
            }
        );
    }
}
