//! Block-flow layout solver and geometry snapshots.
//!
//! Converts the computed style of every element into absolute border,
//! padding and content boxes. Children stack top to bottom inside their
//! parent's content box; `auto` horizontal margins share the free space,
//! and a column flex parent hands its free vertical space to `auto`
//! top/bottom margins. Text is measured with a fixed per-character advance.
//!
//! Layout is a pure function of the document. Nothing here is cached: every
//! snapshot re-runs the solver so it always reflects the latest mutation.

use crate::id::ElementId;
use crate::model::*;
use crate::style::{ComputedStyle, Length, Sides, TextAlign};
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The visible area the document is laid out into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

impl Viewport {
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Images without an explicit height keep a 16:9 box.
const IMAGE_ASPECT: f32 = 9.0 / 16.0;

// ─── Text layout ─────────────────────────────────────────────────────────

/// One wrapped line of an element's text run.
///
/// Lines partition the text: `start..end` covers the line's characters
/// including trailing whitespace, `start..visible_end` the part that is
/// actually drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLine {
    pub start: usize,
    pub end: usize,
    pub visible_end: usize,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLayout {
    pub lines: Vec<TextLine>,
    /// Horizontal advance of one character, letter spacing included.
    pub advance: f32,
    pub line_height: f32,
}

impl TextLayout {
    pub fn height(&self) -> f32 {
        self.lines.len() as f32 * self.line_height
    }

    pub fn len(&self) -> usize {
        self.lines.last().map_or(0, |l| l.end)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Zero-width caret rectangle at character offset `offset`.
    pub fn caret_rect(&self, offset: usize) -> Option<Rect> {
        let offset = offset.min(self.len());
        let line = self
            .lines
            .iter()
            .find(|l| offset < l.end)
            .or(self.lines.last())?;
        let col = offset.min(line.visible_end).saturating_sub(line.start);
        Some(Rect::new(
            line.rect.x + col as f32 * self.advance,
            line.rect.y,
            0.0,
            line.rect.height,
        ))
    }

    /// Bounding rectangle of the characters `start..end`: the union of the
    /// drawn segment of every line the range touches.
    pub fn range_rect(&self, start: usize, end: usize) -> Option<Rect> {
        let (start, end) = (start.min(end), start.max(end).min(self.len()));
        if start >= end {
            return self.caret_rect(start);
        }

        let mut out: Option<Rect> = None;
        for line in &self.lines {
            let s = start.max(line.start);
            let e = end.min(line.visible_end);
            if s >= e {
                continue;
            }
            let seg = Rect::new(
                line.rect.x + (s - line.start) as f32 * self.advance,
                line.rect.y,
                (e - s) as f32 * self.advance,
                line.rect.height,
            );
            out = Some(match out {
                Some(r) => r.union(&seg),
                None => seg,
            });
        }
        // Whitespace-only ranges still anchor somewhere.
        out.or_else(|| self.caret_rect(start))
    }
}

/// A line break decision: `start..end` partitions the text,
/// `visible_end` excludes trailing whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineBreak {
    pub start: usize,
    pub end: usize,
    pub visible_end: usize,
}

/// Greedy word wrap. The first line gets `first_width`, the rest `width`.
/// A word longer than the line stays on its own line.
pub fn break_lines(chars: &[char], first_width: f32, width: f32, advance: f32) -> Vec<LineBreak> {
    let mut words: Vec<(usize, usize)> = Vec::new();
    let mut word_start: Option<usize> = None;
    for (i, c) in chars.iter().enumerate() {
        match (c.is_whitespace(), word_start) {
            (false, None) => word_start = Some(i),
            (true, Some(s)) => {
                words.push((s, i));
                word_start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = word_start {
        words.push((s, chars.len()));
    }

    let mut lines = Vec::new();
    let mut line_start = 0;
    let mut visible_end: Option<usize> = None;

    for (ws, we) in words {
        let avail = if lines.is_empty() { first_width } else { width };
        let needed = (we - line_start) as f32 * advance;
        match visible_end {
            Some(end) if needed > avail => {
                lines.push(LineBreak {
                    start: line_start,
                    end: ws,
                    visible_end: end,
                });
                line_start = ws;
            }
            _ => {}
        }
        visible_end = Some(we);
    }

    lines.push(LineBreak {
        start: line_start,
        end: chars.len(),
        visible_end: visible_end.unwrap_or(line_start),
    });
    lines
}

fn layout_text(content: &str, style: &ComputedStyle, content_box: Rect) -> TextLayout {
    let advance = (0.5 * style.font_size + style.letter_spacing).max(0.0);
    let indent = style
        .text_indent
        .to_px(style.font_size, content_box.width)
        .unwrap_or(0.0);
    let chars: Vec<char> = content.chars().collect();
    let breaks = break_lines(&chars, content_box.width - indent, content_box.width, advance);

    let lines = breaks
        .into_iter()
        .enumerate()
        .map(|(i, b)| {
            let offset = if i == 0 { indent } else { 0.0 };
            let avail = content_box.width - offset;
            let line_width = (b.visible_end - b.start) as f32 * advance;
            let align_shift = match style.text_align {
                TextAlign::Left => 0.0,
                TextAlign::Center => ((avail - line_width) / 2.0).max(0.0),
                TextAlign::Right => (avail - line_width).max(0.0),
            };
            TextLine {
                start: b.start,
                end: b.end,
                visible_end: b.visible_end,
                rect: Rect::new(
                    content_box.x + offset + align_shift,
                    content_box.y + i as f32 * style.line_height,
                    line_width,
                    style.line_height,
                ),
            }
        })
        .collect();

    TextLayout {
        lines,
        advance,
        line_height: style.line_height,
    }
}

// ─── Box layout ──────────────────────────────────────────────────────────

/// Resolved box model of one element.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxMetrics {
    pub border_box: Rect,
    /// Used margins; `auto` resolved to the space it took.
    pub margin: Edges,
    pub padding: Edges,
    pub content_box: Rect,
    pub auto_margins: Sides<bool>,
    pub font_size: f32,
    pub line_height: f32,
    pub text: Option<TextLayout>,
}

impl BoxMetrics {
    fn shift_y(&mut self, dy: f32) {
        self.border_box.y += dy;
        self.content_box.y += dy;
        if let Some(text) = &mut self.text {
            for line in &mut text.lines {
                line.rect.y += dy;
            }
        }
    }
}

fn resolve_edges(sides: &Sides<Length>, font_size: f32, basis: f32) -> Edges {
    let px = |l: Length| l.to_px(font_size, basis).unwrap_or(0.0).max(0.0);
    Sides {
        top: px(sides.top),
        right: px(sides.right),
        bottom: px(sides.bottom),
        left: px(sides.left),
    }
}

/// Resolve every element's box in the document.
///
/// The root fills the viewport width and is at least as tall as the
/// viewport.
pub fn resolve_layout(doc: &Document, viewport: Viewport) -> HashMap<NodeIndex, BoxMetrics> {
    let mut boxes = HashMap::new();

    let root = &doc.graph[doc.root];
    let style = ComputedStyle::compute(&ComputedStyle::default(), &doc.specified_style(root));
    let padding = resolve_edges(&style.padding, style.font_size, viewport.width);
    let content = viewport.rect().inset(&padding);

    let used = layout_children(doc, doc.root, &style, content, Some(content.height), &mut boxes);
    let height = viewport.height.max(used + padding.vertical());
    let border_box = Rect::new(0.0, 0.0, viewport.width, height);

    boxes.insert(
        doc.root,
        BoxMetrics {
            border_box,
            margin: Sides::all(0.0),
            padding,
            content_box: border_box.inset(&padding),
            auto_margins: Sides::all(false),
            font_size: style.font_size,
            line_height: style.line_height,
            text: None,
        },
    );
    boxes
}

/// Lay out the children of `parent` inside `content`. Returns the used
/// content height.
fn layout_children(
    doc: &Document,
    parent: NodeIndex,
    parent_style: &ComputedStyle,
    content: Rect,
    definite_height: Option<f32>,
    boxes: &mut HashMap<NodeIndex, BoxMetrics>,
) -> f32 {
    let children = doc.children(parent);
    let mut y = content.y;
    for &child in &children {
        y += layout_block(doc, child, parent_style, content, y, boxes);
    }
    let used = y - content.y;

    if parent_style.is_column_flex()
        && let Some(avail) = definite_height
        && avail > used
    {
        let slots: usize = children
            .iter()
            .filter_map(|c| boxes.get(c))
            .map(|b| usize::from(b.auto_margins.top) + usize::from(b.auto_margins.bottom))
            .sum();
        if slots > 0 {
            let share = (avail - used) / slots as f32;
            let mut shift = 0.0;
            for &child in &children {
                let Some(metrics) = boxes.get_mut(&child) else {
                    continue;
                };
                let auto = metrics.auto_margins;
                if auto.top {
                    metrics.margin.top += share;
                    shift += share;
                }
                if auto.bottom {
                    metrics.margin.bottom += share;
                }
                shift_subtree(doc, child, shift, boxes);
                if auto.bottom {
                    shift += share;
                }
            }
            return avail;
        }
    }
    used
}

/// Lay out one element at vertical position `y` of its container. Returns
/// the element's outer (margin box) height.
fn layout_block(
    doc: &Document,
    idx: NodeIndex,
    parent_style: &ComputedStyle,
    container: Rect,
    y: f32,
    boxes: &mut HashMap<NodeIndex, BoxMetrics>,
) -> f32 {
    let node = &doc.graph[idx];
    let style = ComputedStyle::compute(parent_style, &doc.specified_style(node));
    let fs = style.font_size;
    let cw = container.width;

    let padding = resolve_edges(&style.padding, fs, cw);
    let mut margin = resolve_edges(&style.margin, fs, cw);
    let auto_margins = Sides {
        top: style.margin.top.is_auto(),
        right: style.margin.right.is_auto(),
        bottom: style.margin.bottom.is_auto(),
        left: style.margin.left.is_auto(),
    };

    let width = match style.width.to_px(fs, cw) {
        Some(w) => w.max(0.0),
        None => (cw - margin.horizontal()).max(0.0),
    };
    let free = (cw - width - margin.horizontal()).max(0.0);
    match (auto_margins.left, auto_margins.right) {
        (true, true) => {
            margin.left = free / 2.0;
            margin.right = free / 2.0;
        }
        (true, false) => margin.left = free,
        (false, true) => margin.right = free,
        (false, false) => {}
    }

    let x = container.x + margin.left;
    let top = y + margin.top;
    let content_x = x + padding.left;
    let content_top = top + padding.top;
    let content_w = (width - padding.horizontal()).max(0.0);
    let explicit_h = style.height.to_px(fs, container.height).map(|h| h.max(0.0));

    let text = node.role.has_text().then(|| {
        layout_text(
            node.content.as_deref().unwrap_or_default(),
            &style,
            Rect::new(content_x, content_top, content_w, 0.0),
        )
    });
    let text_h = text.as_ref().map_or(0.0, TextLayout::height);

    let definite = explicit_h.map(|h| (h - padding.vertical() - text_h).max(0.0));
    let children_content = Rect::new(
        content_x,
        content_top + text_h,
        content_w,
        definite.unwrap_or(0.0),
    );
    let children_h = layout_children(doc, idx, &style, children_content, definite, boxes);

    let height = match explicit_h {
        Some(h) => h,
        None if node.role == Role::Image && children_h == 0.0 => width * IMAGE_ASPECT,
        None => text_h + children_h + padding.vertical(),
    };

    let border_box = Rect::new(x, top, width, height);
    boxes.insert(
        idx,
        BoxMetrics {
            border_box,
            margin,
            padding,
            content_box: border_box.inset(&padding),
            auto_margins,
            font_size: fs,
            line_height: style.line_height,
            text,
        },
    );

    margin.top + height + margin.bottom
}

fn shift_subtree(
    doc: &Document,
    idx: NodeIndex,
    dy: f32,
    boxes: &mut HashMap<NodeIndex, BoxMetrics>,
) {
    if dy == 0.0 {
        return;
    }
    let mut stack = vec![idx];
    while let Some(current) = stack.pop() {
        if let Some(metrics) = boxes.get_mut(&current) {
            metrics.shift_y(dy);
        }
        stack.extend(doc.children(current));
    }
}

// ─── Snapshots ───────────────────────────────────────────────────────────

/// Point-in-time box model of one element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeometrySnapshot {
    pub element: ElementId,
    pub bounding_box: Rect,
    pub margin: Edges,
    pub padding: Edges,
    /// Content box of the containing block (the viewport for the root).
    pub container: Rect,
    pub font_size: f32,
    pub line_height: f32,
}

impl GeometrySnapshot {
    pub fn constraint(&self, min_content_width: f32) -> Constraint {
        Constraint {
            container_width: self.container.width,
            min_content_width,
        }
    }
}

/// Take a snapshot out of an already resolved layout.
pub fn snapshot_in(
    doc: &Document,
    boxes: &HashMap<NodeIndex, BoxMetrics>,
    viewport: Viewport,
    id: ElementId,
) -> Option<GeometrySnapshot> {
    let idx = doc.index_of(id)?;
    let metrics = boxes.get(&idx)?;
    let container = match doc.parent(idx) {
        Some(parent) => boxes.get(&parent)?.content_box,
        None => viewport.rect(),
    };
    Some(GeometrySnapshot {
        element: id,
        bounding_box: metrics.border_box,
        margin: metrics.margin,
        padding: metrics.padding,
        container,
        font_size: metrics.font_size,
        line_height: metrics.line_height,
    })
}

/// Lay out the document and measure one element.
pub fn snapshot(doc: &Document, viewport: Viewport, id: ElementId) -> Option<GeometrySnapshot> {
    let boxes = resolve_layout(doc, viewport);
    snapshot_in(doc, &boxes, viewport, id)
}

/// Bounding rectangle of a text range in document coordinates.
pub fn range_rect(doc: &Document, viewport: Viewport, range: &TextRange) -> Option<Rect> {
    let idx = doc.index_of(range.element)?;
    let boxes = resolve_layout(doc, viewport);
    boxes.get(&idx)?.text.as_ref()?.range_rect(range.start, range.end)
}
