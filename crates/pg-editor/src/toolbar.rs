//! Toolbar positioner: inline toolbar above a text range, side panel dock.

use crate::config::EditorConfig;
use pg_core::{Rect, ToolbarAnchor, ToolbarPlacement};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolbarPositioner {
    viewport_width: f32,
    toolbar_width: f32,
    toolbar_height: f32,
    side_panel_top: f32,
    side_panel_right: f32,
    side_panel_width: f32,
}

impl ToolbarPositioner {
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            viewport_width: config.viewport.width,
            toolbar_width: config.toolbar.width,
            toolbar_height: config.toolbar.height,
            side_panel_top: config.side_panel_top,
            side_panel_right: config.side_panel_right,
            side_panel_width: config.side_panel_width,
        }
    }

    /// Sit directly above the range, centred on it, never off-screen.
    pub fn place_inline(&self, range_rect: &Rect) -> ToolbarPlacement {
        let top = (range_rect.top() - self.toolbar_height).max(0.0);
        let (center_x, _) = range_rect.center();
        let max_left = (self.viewport_width - self.toolbar_width).max(0.0);
        let left = (center_x - self.toolbar_width / 2.0).max(0.0).min(max_left);
        ToolbarPlacement {
            top,
            left,
            anchor: ToolbarAnchor::AboveSelection,
        }
    }

    /// Fixed dock along the viewport's right edge.
    pub fn place_side_panel(&self) -> ToolbarPlacement {
        ToolbarPlacement {
            top: self.side_panel_top,
            left: (self.viewport_width - self.side_panel_right - self.side_panel_width).max(0.0),
            anchor: ToolbarAnchor::BesideElement,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn positioner() -> ToolbarPositioner {
        ToolbarPositioner::from_config(&EditorConfig::default())
    }

    #[test]
    fn inline_sits_above_the_range() {
        let placement = positioner().place_inline(&Rect::new(400.0, 300.0, 80.0, 24.0));
        assert_eq!(
            placement,
            ToolbarPlacement {
                top: 256.0,
                left: 280.0,
                anchor: ToolbarAnchor::AboveSelection
            }
        );
    }

    #[test]
    fn inline_clamps_to_viewport() {
        let p = positioner();
        let near_top = p.place_inline(&Rect::new(10.0, 20.0, 40.0, 24.0));
        assert_eq!(near_top.top, 0.0);
        assert_eq!(near_top.left, 0.0);
        let near_right = p.place_inline(&Rect::new(1250.0, 200.0, 20.0, 24.0));
        assert_eq!(near_right.left, 960.0);
    }

    #[test]
    fn side_panel_docks_right() {
        assert_eq!(
            positioner().place_side_panel(),
            ToolbarPlacement {
                top: 24.0,
                left: 976.0,
                anchor: ToolbarAnchor::BesideElement
            }
        );
    }
}
