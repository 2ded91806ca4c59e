pub mod config;
pub mod input;
pub mod listeners;
pub mod mutator;
pub mod resize;
pub mod resolver;
pub mod selection;
pub mod session;
pub mod shortcuts;
pub mod toolbar;

pub use config::{EditorConfig, ToolbarSize};
pub use input::{InputEvent, PointerOrigin};
pub use listeners::{ListenerBinding, ListenerKind, ListenerSet};
pub use mutator::{IndentSide, Mutator};
pub use resize::{ResizeMachine, ResizeState, ResizeUpdate};
pub use resolver::PresetResolution;
pub use selection::{Selectable, SelectionEvent, SelectionManager, SelectionState};
pub use session::{EditCommand, EditorSession, SessionError, StylePanel, StylePatch};
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use toolbar::ToolbarPositioner;
