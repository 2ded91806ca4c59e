//! Document-level listener bookkeeping.
//!
//! The session decides which listeners should exist; the host mirrors the
//! active set onto the DOM. Attach and detach are idempotent, so the set
//! never holds a listener twice and never leaks one past unmount.

use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ListenerKind {
    SelectionChange,
    /// Capture phase, so the editor sees the press before any child does.
    PointerDownCapture,
    PointerMove,
    PointerUp,
}

impl ListenerKind {
    pub fn event(&self) -> &'static str {
        match self {
            ListenerKind::SelectionChange => "selectionchange",
            ListenerKind::PointerDownCapture => "pointerdown",
            ListenerKind::PointerMove => "pointermove",
            ListenerKind::PointerUp => "pointerup",
        }
    }

    pub fn capture(&self) -> bool {
        matches!(self, ListenerKind::PointerDownCapture)
    }

    pub fn binding(&self) -> ListenerBinding {
        ListenerBinding {
            event: self.event(),
            capture: self.capture(),
        }
    }
}

/// What the host passes to `addEventListener`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListenerBinding {
    pub event: &'static str,
    pub capture: bool,
}

#[derive(Debug, Default)]
pub struct ListenerSet {
    active: BTreeSet<ListenerKind>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the listener was not attached yet.
    pub fn attach(&mut self, kind: ListenerKind) -> bool {
        let added = self.active.insert(kind);
        if added {
            log::trace!("attach {}", kind.event());
        }
        added
    }

    /// Returns `true` if the listener was attached.
    pub fn detach(&mut self, kind: ListenerKind) -> bool {
        let removed = self.active.remove(&kind);
        if removed {
            log::trace!("detach {}", kind.event());
        }
        removed
    }

    pub fn detach_all(&mut self) -> Vec<ListenerKind> {
        std::mem::take(&mut self.active).into_iter().collect()
    }

    pub fn is_active(&self, kind: ListenerKind) -> bool {
        self.active.contains(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn active(&self) -> Vec<ListenerKind> {
        self.active.iter().copied().collect()
    }

    pub fn bindings(&self) -> Vec<ListenerBinding> {
        self.active.iter().map(ListenerKind::binding).collect()
    }
}
