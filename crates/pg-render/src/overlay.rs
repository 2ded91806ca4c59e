//! Selection overlay: snapshot → outline, markers, spacing labels, handles.
//!
//! The overlay is a pure function of a geometry snapshot and the selection
//! kind. It holds no state; callers rebuild it after every selection or
//! geometry change.

use kurbo::{Point, Rect, Size};
use pg_core::layout::GeometrySnapshot;
use pg_core::{BoxSide, Edges, fmt_number};
use serde::{Deserialize, Serialize};

/// What the selected thing is drawn as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayKind {
    Text,
    Block,
}

/// Drag handles of a block overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeHandle {
    Right,
    Bottom,
    BottomRight,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 3] = [
        ResizeHandle::Right,
        ResizeHandle::Bottom,
        ResizeHandle::BottomRight,
    ];

    /// Whether dragging this handle changes (width, height).
    pub fn axes(&self) -> (bool, bool) {
        match self {
            ResizeHandle::Right => (true, false),
            ResizeHandle::Bottom => (false, true),
            ResizeHandle::BottomRight => (true, true),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ResizeHandle::Right => "right",
            ResizeHandle::Bottom => "bottom",
            ResizeHandle::BottomRight => "bottom-right",
        }
    }

    fn anchor(&self, outline: Rect) -> Point {
        let center = outline.center();
        match self {
            ResizeHandle::Right => Point::new(outline.x1, center.y),
            ResizeHandle::Bottom => Point::new(center.x, outline.y1),
            ResizeHandle::BottomRight => Point::new(outline.x1, outline.y1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerPosition {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl MarkerPosition {
    pub const ALL: [MarkerPosition; 8] = [
        MarkerPosition::TopLeft,
        MarkerPosition::Top,
        MarkerPosition::TopRight,
        MarkerPosition::Right,
        MarkerPosition::BottomRight,
        MarkerPosition::Bottom,
        MarkerPosition::BottomLeft,
        MarkerPosition::Left,
    ];

    pub fn is_corner(&self) -> bool {
        matches!(
            self,
            MarkerPosition::TopLeft
                | MarkerPosition::TopRight
                | MarkerPosition::BottomRight
                | MarkerPosition::BottomLeft
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            MarkerPosition::TopLeft => "top-left",
            MarkerPosition::Top => "top",
            MarkerPosition::TopRight => "top-right",
            MarkerPosition::Right => "right",
            MarkerPosition::BottomRight => "bottom-right",
            MarkerPosition::Bottom => "bottom",
            MarkerPosition::BottomLeft => "bottom-left",
            MarkerPosition::Left => "left",
        }
    }

    fn point(&self, r: Rect) -> Point {
        let c = r.center();
        match self {
            MarkerPosition::TopLeft => Point::new(r.x0, r.y0),
            MarkerPosition::Top => Point::new(c.x, r.y0),
            MarkerPosition::TopRight => Point::new(r.x1, r.y0),
            MarkerPosition::Right => Point::new(r.x1, c.y),
            MarkerPosition::BottomRight => Point::new(r.x1, r.y1),
            MarkerPosition::Bottom => Point::new(c.x, r.y1),
            MarkerPosition::BottomLeft => Point::new(r.x0, r.y1),
            MarkerPosition::Left => Point::new(r.x0, c.y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub position: MarkerPosition,
    pub center: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpacingLayer {
    Margin,
    Padding,
}

impl SpacingLayer {
    pub fn name(&self) -> &'static str {
        match self {
            SpacingLayer::Margin => "margin",
            SpacingLayer::Padding => "padding",
        }
    }
}

/// Numeric margin/padding readout for one side.
#[derive(Debug, Clone, PartialEq)]
pub struct SpacingLabel {
    pub layer: SpacingLayer,
    pub side: BoxSide,
    pub value: f32,
    pub text: String,
    pub anchor: Point,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleBox {
    pub handle: ResizeHandle,
    pub rect: Rect,
}

/// Sizes used when laying out overlay chrome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    /// Distance between a box edge and its spacing label.
    pub label_offset: f64,
    pub marker_size: f64,
    pub handle_size: f64,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            label_offset: 6.0,
            marker_size: 6.0,
            handle_size: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub kind: OverlayKind,
    /// Border box of the selection.
    pub outline: Rect,
    pub margin_box: Rect,
    pub content_box: Rect,
    pub markers: Vec<Marker>,
    pub labels: Vec<SpacingLabel>,
    pub handles: Vec<HandleBox>,
    pub style: OverlayStyle,
}

pub(crate) fn to_kurbo(r: &pg_core::Rect) -> Rect {
    Rect::new(
        r.x as f64,
        r.y as f64,
        (r.x + r.width) as f64,
        (r.y + r.height) as f64,
    )
}

fn outset(r: Rect, e: &Edges) -> Rect {
    Rect::new(
        r.x0 - e.left as f64,
        r.y0 - e.top as f64,
        r.x1 + e.right as f64,
        r.y1 + e.bottom as f64,
    )
}

fn inset(r: Rect, e: &Edges) -> Rect {
    let x0 = r.x0 + e.left as f64;
    let y0 = r.y0 + e.top as f64;
    Rect::new(
        x0,
        y0,
        (r.x1 - e.right as f64).max(x0),
        (r.y1 - e.bottom as f64).max(y0),
    )
}

/// Point just outside `edge` of `r`, centred on that edge.
fn outside(r: Rect, side: BoxSide, offset: f64) -> Point {
    let c = r.center();
    match side {
        BoxSide::Top => Point::new(c.x, r.y0 - offset),
        BoxSide::Right => Point::new(r.x1 + offset, c.y),
        BoxSide::Bottom => Point::new(c.x, r.y1 + offset),
        BoxSide::Left => Point::new(r.x0 - offset, c.y),
    }
}

/// Render the overlay for a selection with default sizes.
pub fn render_overlay(snapshot: &GeometrySnapshot, kind: OverlayKind) -> Overlay {
    render_overlay_with(snapshot, kind, OverlayStyle::default())
}

pub fn render_overlay_with(
    snapshot: &GeometrySnapshot,
    kind: OverlayKind,
    style: OverlayStyle,
) -> Overlay {
    let outline = to_kurbo(&snapshot.bounding_box);
    let margin_box = outset(outline, &snapshot.margin);
    let content_box = inset(outline, &snapshot.padding);

    let markers = MarkerPosition::ALL
        .into_iter()
        .map(|position| Marker {
            position,
            center: position.point(outline),
        })
        .collect();

    let mut labels = Vec::new();
    for (layer, edges, reference) in [
        (SpacingLayer::Margin, &snapshot.margin, margin_box),
        (SpacingLayer::Padding, &snapshot.padding, content_box),
    ] {
        for side in BoxSide::ALL {
            let value = edges.get(side);
            if value <= 0.0 {
                continue;
            }
            labels.push(SpacingLabel {
                layer,
                side,
                value,
                text: fmt_number(value),
                anchor: outside(reference, side, style.label_offset),
            });
        }
    }

    let handles = match kind {
        OverlayKind::Text => Vec::new(),
        OverlayKind::Block => ResizeHandle::ALL
            .into_iter()
            .map(|handle| HandleBox {
                handle,
                rect: Rect::from_center_size(
                    handle.anchor(outline),
                    Size::new(style.handle_size, style.handle_size),
                ),
            })
            .collect(),
    };

    log::trace!(
        "overlay {:?} for {}: {} labels, {} handles",
        kind,
        snapshot.element,
        labels.len(),
        handles.len()
    );

    Overlay {
        kind,
        outline,
        margin_box,
        content_box,
        markers,
        labels,
        handles,
        style,
    }
}

/// Which resize handle, if any, is under the pointer.
pub fn hit_test_handle(overlay: &Overlay, px: f32, py: f32) -> Option<ResizeHandle> {
    let p = Point::new(px as f64, py as f64);
    overlay
        .handles
        .iter()
        .find(|h| h.rect.contains(p))
        .map(|h| h.handle)
}
