//! Alignment guides shown while a block is selected.

use pg_core::layout::GeometrySnapshot;
use serde::Serialize;

/// Centres and edges closer than this count as aligned.
const SNAP_TOLERANCE: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GuideKind {
    Center,
    LeftEdge,
    RightEdge,
}

impl GuideKind {
    pub fn name(&self) -> &'static str {
        match self {
            GuideKind::Center => "center",
            GuideKind::LeftEdge => "left-edge",
            GuideKind::RightEdge => "right-edge",
        }
    }
}

/// A vertical guide line at `x`, spanning `y0..y1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Guide {
    pub kind: GuideKind,
    pub x: f32,
    pub y0: f32,
    pub y1: f32,
}

/// Guides for the element's horizontal relation to its container: the
/// container's centre line when the element is centred, and the content
/// edges the element touches.
pub fn alignment_guides(snapshot: &GeometrySnapshot) -> Vec<Guide> {
    let b = &snapshot.bounding_box;
    let c = &snapshot.container;
    let y0 = c.top().min(b.top());
    let y1 = c.bottom().max(b.bottom());
    let guide = |kind, x| Guide { kind, x, y0, y1 };

    let mut guides = Vec::new();
    if (b.center().0 - c.center().0).abs() <= SNAP_TOLERANCE {
        guides.push(guide(GuideKind::Center, c.center().0));
    }
    if (b.left() - c.left()).abs() <= SNAP_TOLERANCE {
        guides.push(guide(GuideKind::LeftEdge, c.left()));
    }
    if (b.right() - c.right()).abs() <= SNAP_TOLERANCE {
        guides.push(guide(GuideKind::RightEdge, c.right()));
    }
    guides
}

#[cfg(test)]
mod tests {
    use super::*;
    use pg_core::{ElementId, Rect, Sides};

    fn snap(x: f32, width: f32) -> GeometrySnapshot {
        GeometrySnapshot {
            element: ElementId::intern("guide_el"),
            bounding_box: Rect::new(x, 40.0, width, 100.0),
            margin: Sides::all(0.0),
            padding: Sides::all(0.0),
            container: Rect::new(0.0, 0.0, 800.0, 400.0),
            font_size: 16.0,
            line_height: 24.0,
        }
    }

    #[test]
    fn centred_block_shows_centre_line() {
        let guides = alignment_guides(&snap(200.0, 400.0));
        assert_eq!(guides.len(), 1);
        assert_eq!(guides[0].kind, GuideKind::Center);
        assert_eq!(guides[0].x, 400.0);
        assert_eq!((guides[0].y0, guides[0].y1), (0.0, 400.0));
    }

    #[test]
    fn near_centre_within_tolerance() {
        let guides = alignment_guides(&snap(200.4, 400.0));
        assert_eq!(guides[0].kind, GuideKind::Center);
        assert!(alignment_guides(&snap(202.0, 400.0)).is_empty());
    }

    #[test]
    fn edges_touching_container() {
        let kinds = |x: f32, width: f32| -> Vec<GuideKind> {
            alignment_guides(&snap(x, width)).iter().map(|g| g.kind).collect()
        };
        let left = kinds(0.0, 300.0);
        assert_eq!(left, vec![GuideKind::LeftEdge]);

        let right = kinds(500.0, 300.0);
        assert_eq!(right, vec![GuideKind::RightEdge]);

        let full = alignment_guides(&snap(0.0, 800.0));
        assert_eq!(full.len(), 3);
    }
}
