//! Constrained mutator: indentation, alignment, margin, padding and width
//! changes, clamped against the element's live geometry.
//!
//! Every operation re-measures the document before writing, so bounds
//! always reflect the latest mutation. Out-of-range proposals are corrected
//! to the nearest valid value; they never fail.

use pg_core::layout::GeometrySnapshot;
use pg_core::{
    BoxSide, ComputedStyle, Constraint, CssValue, Document, ElementId, HorizontalAlign, Length,
    StyleProperty, VerticalAlign, Viewport, snapshot,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentSide {
    /// `text-indent` of the first line.
    FirstLine,
    /// Whole-block indent, carried by the margin on the aligned side.
    Block,
}

/// Clamp without panicking when the bounds cross; `lo` loses.
fn clamp(value: f32, lo: f32, hi: f32) -> f32 {
    value.max(lo).min(hi)
}

pub struct Mutator<'a> {
    doc: &'a mut Document,
    viewport: Viewport,
    min_content_width: f32,
}

impl<'a> Mutator<'a> {
    pub fn new(doc: &'a mut Document, viewport: Viewport, min_content_width: f32) -> Self {
        Self {
            doc,
            viewport,
            min_content_width,
        }
    }

    fn measure(&self, id: ElementId) -> Option<(GeometrySnapshot, ComputedStyle)> {
        let geometry = snapshot(self.doc, self.viewport, id)?;
        let style = self.doc.computed_style(id)?;
        Some((geometry, style))
    }

    pub fn constraint(&self, id: ElementId) -> Option<Constraint> {
        snapshot(self.doc, self.viewport, id).map(|s| s.constraint(self.min_content_width))
    }

    fn write(&mut self, id: ElementId, prop: StyleProperty, value: CssValue) -> bool {
        match self.doc.get_mut(id) {
            Some(node) => {
                node.style.set(prop, value);
                true
            }
            None => false,
        }
    }

    fn write_px(&mut self, id: ElementId, prop: StyleProperty, requested: f32, applied: f32) {
        if requested != applied {
            log::trace!("{id}: {} {requested} clamped to {applied}", prop.css_name());
        }
        self.write(id, prop, CssValue::px(applied));
    }

    /// Current indent in pixels: `text-indent`, or the margin on the side
    /// the block is aligned to. A centred block has no indent.
    pub fn current_indent(&self, id: ElementId, side: IndentSide) -> Option<f32> {
        let (geometry, style) = self.measure(id)?;
        let px = |l: Length| l.to_px(style.font_size, geometry.container.width).unwrap_or(0.0);
        Some(match side {
            IndentSide::FirstLine => px(style.text_indent),
            IndentSide::Block => match HorizontalAlign::of(&style.margin) {
                HorizontalAlign::Left => px(style.margin.left),
                HorizontalAlign::Right => px(style.margin.right),
                HorizontalAlign::Center => 0.0,
            },
        })
    }

    /// Add `delta` to the current indent. Returns the applied indent.
    pub fn set_indent(&mut self, id: ElementId, side: IndentSide, delta: f32) -> Option<f32> {
        let current = self.current_indent(id, side)?;
        self.indent_to(id, side, current + delta)
    }

    /// Set the indent to `value`. Returns the applied indent.
    pub fn indent_to(&mut self, id: ElementId, side: IndentSide, value: f32) -> Option<f32> {
        let (geometry, style) = self.measure(id)?;
        match side {
            IndentSide::FirstLine => {
                let content_width = geometry.bounding_box.width - geometry.padding.horizontal();
                let max = Constraint {
                    container_width: content_width,
                    min_content_width: self.min_content_width,
                }
                .max_first_line_indent();
                let applied = clamp(value, 0.0, max);
                self.write_px(id, StyleProperty::TextIndent, value, applied);
                Some(applied)
            }
            IndentSide::Block => {
                let max = geometry.constraint(self.min_content_width).max_block_indent();
                let applied = clamp(value, 0.0, max);
                match HorizontalAlign::of(&style.margin) {
                    HorizontalAlign::Left => {
                        self.write_px(id, StyleProperty::MarginLeft, value, applied)
                    }
                    HorizontalAlign::Right => {
                        self.write_px(id, StyleProperty::MarginRight, value, applied)
                    }
                    HorizontalAlign::Center => {
                        log::debug!("{id}: block indent has no effect on a centred block");
                    }
                }
                Some(applied)
            }
        }
    }

    /// Re-align the block horizontally through its margins. `indent` is the
    /// margin on the aligned side; without one the current indent carries.
    pub fn align_horizontal(
        &mut self,
        id: ElementId,
        align: HorizontalAlign,
        indent: Option<f32>,
    ) -> Option<f32> {
        let requested = match indent {
            Some(v) => v,
            None => self.current_indent(id, IndentSide::Block)?,
        };
        let max = self.constraint(id)?.max_block_indent();
        let applied = clamp(requested, 0.0, max);

        let (left, right) = match align {
            HorizontalAlign::Left => (CssValue::px(applied), CssValue::auto()),
            HorizontalAlign::Right => (CssValue::auto(), CssValue::px(applied)),
            HorizontalAlign::Center => (CssValue::auto(), CssValue::auto()),
        };
        self.write(id, StyleProperty::MarginLeft, left);
        self.write(id, StyleProperty::MarginRight, right);
        Some(applied)
    }

    /// Align inside the parent, which becomes a column flex container.
    pub fn align_vertical(&mut self, id: ElementId, align: VerticalAlign) -> bool {
        let Some(parent) = self.doc.parent_id(id) else {
            return false;
        };
        self.write(parent, StyleProperty::Display, CssValue::keyword("flex"));
        self.write(parent, StyleProperty::FlexDirection, CssValue::keyword("column"));

        let (top, bottom) = match align {
            VerticalAlign::Top => (CssValue::px(0.0), CssValue::auto()),
            VerticalAlign::Center => (CssValue::auto(), CssValue::auto()),
            VerticalAlign::Bottom => (CssValue::auto(), CssValue::px(0.0)),
        };
        self.write(id, StyleProperty::MarginTop, top);
        self.write(id, StyleProperty::MarginBottom, bottom)
    }

    /// Horizontal margins obey the block indent bound; vertical ones only
    /// stay non-negative.
    pub fn set_margin(&mut self, id: ElementId, side: BoxSide, value: f32) -> Option<f32> {
        let applied = if side.is_horizontal() {
            let max = self.constraint(id)?.max_block_indent();
            clamp(value, 0.0, max)
        } else {
            self.doc.get(id)?;
            value.max(0.0)
        };
        self.write_px(id, StyleProperty::margin(side), value, applied);
        Some(applied)
    }

    /// Padding is bounded by half of the element's own width.
    pub fn set_padding(&mut self, id: ElementId, side: BoxSide, value: f32) -> Option<f32> {
        let (geometry, _) = self.measure(id)?;
        let max = (geometry.bounding_box.width * 0.5).floor().max(0.0);
        let applied = clamp(value, 0.0, max);
        self.write_px(id, StyleProperty::padding(side), value, applied);
        Some(applied)
    }

    /// Width between the content floor and the container width.
    pub fn set_width(&mut self, id: ElementId, value: f32) -> Option<f32> {
        let constraint = self.constraint(id)?;
        let hi = constraint.container_width.max(0.0);
        let lo = constraint.min_content_width.min(hi);
        let applied = clamp(value, lo, hi);
        self.write_px(id, StyleProperty::Width, value, applied);
        Some(applied)
    }
}
