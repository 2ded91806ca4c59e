//! Resize interaction state machine.
//!
//! Pointer-down on a handle of the selected block enters `Resizing`;
//! pointer-moves write `start_size + (pointer - start_pointer)` along the
//! handle's axes; pointer-up, unmount or selection loss return to `Idle`.

use crate::input::InputEvent;
use pg_core::ElementId;
use pg_render::ResizeHandle;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ResizeState {
    #[default]
    Idle,
    Resizing {
        element: ElementId,
        handle: ResizeHandle,
        start_pointer: (f32, f32),
        start_size: (f32, f32),
    },
}

/// Explicit size to write. `None` axes are left untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeUpdate {
    pub element: ElementId,
    pub width: Option<f32>,
    pub height: Option<f32>,
}

#[derive(Debug)]
pub struct ResizeMachine {
    state: ResizeState,
    /// Sizes never shrink below this.
    min_extent: f32,
}

impl ResizeMachine {
    pub fn new(min_extent: f32) -> Self {
        Self {
            state: ResizeState::Idle,
            min_extent,
        }
    }

    pub fn state(&self) -> &ResizeState {
        &self.state
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.state, ResizeState::Resizing { .. })
    }

    /// Start a drag. Ignored while one is already running.
    pub fn begin(
        &mut self,
        element: ElementId,
        handle: ResizeHandle,
        pointer: (f32, f32),
        start_size: (f32, f32),
    ) -> bool {
        if self.is_resizing() {
            return false;
        }
        log::debug!("resize {} from {element}", handle.name());
        self.state = ResizeState::Resizing {
            element,
            handle,
            start_pointer: pointer,
            start_size,
        };
        true
    }

    /// Back to `Idle`, whatever the current state.
    pub fn cancel(&mut self) -> bool {
        let was = self.is_resizing();
        self.state = ResizeState::Idle;
        was
    }

    fn update_at(&self, x: f32, y: f32) -> Option<ResizeUpdate> {
        let ResizeState::Resizing {
            element,
            handle,
            start_pointer,
            start_size,
        } = self.state
        else {
            return None;
        };
        let (horizontal, vertical) = handle.axes();
        let extent = |start: f32, delta: f32| {
            let size = start + delta;
            if size < self.min_extent {
                log::trace!("resize {size} floored to {}", self.min_extent);
            }
            size.max(self.min_extent)
        };
        Some(ResizeUpdate {
            element,
            width: horizontal.then(|| extent(start_size.0, x - start_pointer.0)),
            height: vertical.then(|| extent(start_size.1, y - start_pointer.1)),
        })
    }

    /// Feed a pointer event. Moves yield the new size; the final up yields
    /// the size at release and ends the drag.
    pub fn handle(&mut self, event: &InputEvent) -> Option<ResizeUpdate> {
        match event {
            InputEvent::PointerMove { x, y } => self.update_at(*x, *y),
            InputEvent::PointerUp { x, y } => {
                let update = self.update_at(*x, *y);
                self.cancel();
                update
            }
            _ => None,
        }
    }
}
