//! Hit testing: point → element lookup.
//!
//! Reverse-walks the element tree (front-to-back) to find which element is
//! at a given document position, then resolves the role's hit target.

use pg_core::NodeIndex;
use pg_core::id::ElementId;
use pg_core::layout::BoxMetrics;
use pg_core::model::Document;
use std::collections::HashMap;

/// Find the deepest element at position (px, py).
/// Returns `None` if only the page background is hit.
pub fn hit_test(
    doc: &Document,
    boxes: &HashMap<NodeIndex, BoxMetrics>,
    px: f32,
    py: f32,
) -> Option<ElementId> {
    hit_test_node(doc, doc.root, boxes, px, py)
}

fn hit_test_node(
    doc: &Document,
    idx: NodeIndex,
    boxes: &HashMap<NodeIndex, BoxMetrics>,
    px: f32,
    py: f32,
) -> Option<ElementId> {
    // Check children in reverse (topmost first)
    for &child_idx in doc.children(idx).iter().rev() {
        if let Some(hit) = hit_test_node(doc, child_idx, boxes, px, py) {
            return Some(hit);
        }
    }

    if idx == doc.root {
        return None;
    }

    if let Some(b) = boxes.get(&idx)
        && b.border_box.contains(px, py)
    {
        return Some(doc.graph[idx].id);
    }

    None
}

/// The element a click on `hit` selects.
///
/// Buttons, cards, navs and images select as a unit: a hit anywhere inside
/// one resolves to the closest such ancestor (or the element itself).
pub fn hit_target(doc: &Document, hit: ElementId) -> ElementId {
    doc.ancestry(hit)
        .into_iter()
        .find(|id| doc.get(*id).is_some_and(|n| n.role.selects_as_unit()))
        .unwrap_or(hit)
}
