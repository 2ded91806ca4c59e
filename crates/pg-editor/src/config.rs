//! Editor configuration, supplied by the host page as JSON.

use pg_core::Viewport;
use serde::{Deserialize, Serialize};

/// Size of the floating inline toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToolbarSize {
    pub width: f32,
    pub height: f32,
}

impl Default for ToolbarSize {
    fn default() -> Self {
        Self {
            width: 320.0,
            height: 44.0,
        }
    }
}

/// Every field is optional in JSON; missing ones take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub viewport: Viewport,
    pub toolbar: ToolbarSize,
    /// Side panel dock, measured from the viewport's top-right corner.
    pub side_panel_top: f32,
    pub side_panel_right: f32,
    pub side_panel_width: f32,
    pub side_panel_height: f32,
    /// Floor that block indents and widths keep free for content.
    pub min_content_width: f32,
    /// Smallest width/height a resize drag can produce.
    pub min_resize_extent: f32,
    /// Distance between a box edge and its spacing label.
    pub label_offset: f32,
    /// Block indent step used by keyboard shortcuts.
    pub indent_step: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            toolbar: ToolbarSize::default(),
            side_panel_top: 24.0,
            side_panel_right: 24.0,
            side_panel_width: 280.0,
            side_panel_height: 520.0,
            min_content_width: 200.0,
            min_resize_extent: 16.0,
            label_offset: 6.0,
            indent_step: 16.0,
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
