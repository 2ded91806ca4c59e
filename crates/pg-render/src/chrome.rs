//! Overlay and toolbar → absolutely positioned DOM node descriptions.
//!
//! The host layers these nodes above the document. They carry a class for
//! the page stylesheet, an inline position, and optional label text.

use crate::guides::Guide;
use crate::overlay::{Overlay, OverlayKind};
use kurbo::{Point, Rect, Size};
use pg_core::{ToolbarAnchor, ToolbarPlacement, fmt_number};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChromeNode {
    pub class: String,
    pub style: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// A toolbar to draw, with the size it occupies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolbarBox {
    pub placement: ToolbarPlacement,
    pub width: f32,
    pub height: f32,
}

impl ToolbarBox {
    fn class(&self) -> &'static str {
        match self.placement.anchor {
            ToolbarAnchor::AboveSelection => "pg-toolbar pg-toolbar--inline",
            ToolbarAnchor::BesideElement => "pg-toolbar pg-toolbar--side",
        }
    }
}

fn px(v: f64) -> String {
    format!("{}px", fmt_number(v as f32))
}

fn positioned(rect: Rect) -> String {
    format!(
        "position: absolute; left: {}; top: {}; width: {}; height: {}",
        px(rect.x0),
        px(rect.y0),
        px(rect.width()),
        px(rect.height())
    )
}

fn at(point: Point) -> String {
    format!("position: absolute; left: {}; top: {}", px(point.x), px(point.y))
}

fn node(class: String, style: String, label: Option<String>) -> ChromeNode {
    ChromeNode {
        class,
        style,
        label,
    }
}

/// Describe the selection chrome as DOM nodes, back to front: outline,
/// markers, labels, handles, guides, toolbars.
pub fn chrome_nodes(
    overlay: Option<&Overlay>,
    guides: &[Guide],
    toolbars: &[ToolbarBox],
) -> Vec<ChromeNode> {
    let mut out = Vec::new();

    if let Some(overlay) = overlay {
        let kind = match overlay.kind {
            OverlayKind::Text => "text",
            OverlayKind::Block => "block",
        };
        out.push(node(
            format!("pg-outline pg-outline--{kind}"),
            positioned(overlay.outline),
            None,
        ));

        let marker = Size::new(overlay.style.marker_size, overlay.style.marker_size);
        for m in &overlay.markers {
            out.push(node(
                format!("pg-marker pg-marker--{}", m.position.name()),
                positioned(Rect::from_center_size(m.center, marker)),
                None,
            ));
        }

        for label in &overlay.labels {
            out.push(node(
                format!("pg-label pg-label--{}-{}", label.layer.name(), label.side.name()),
                at(label.anchor),
                Some(label.text.clone()),
            ));
        }

        for h in &overlay.handles {
            out.push(node(
                format!("pg-handle pg-handle--{}", h.handle.name()),
                positioned(h.rect),
                None,
            ));
        }
    }

    for g in guides {
        let line = Rect::new(g.x as f64, g.y0 as f64, g.x as f64 + 1.0, g.y1 as f64);
        out.push(node(
            format!("pg-guide pg-guide--{}", g.kind.name()),
            positioned(line),
            None,
        ));
    }

    for t in toolbars {
        let rect = Rect::new(
            t.placement.left as f64,
            t.placement.top as f64,
            (t.placement.left + t.width) as f64,
            (t.placement.top + t.height) as f64,
        );
        out.push(node(t.class().to_string(), positioned(rect), None));
    }

    out
}
