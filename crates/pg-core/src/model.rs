//! Document model for the playground editor.
//!
//! The host page supplies a tree of elements, each tagged with a semantic
//! [`Role`] and a stable [`ElementId`]. The tree is stored as a graph where
//! edges go parent → child. Every element owns its [`StyleState`]; the
//! document owns the preset catalog those states refer to.

use crate::id::ElementId;
use crate::preset::PresetCatalog;
use crate::style::{ComputedStyle, CssValue, Length, Sides, StyleProperty, StyleState};
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::{BTreeMap, HashMap};

// ─── Roles ───────────────────────────────────────────────────────────────

/// Semantic role of an element. Role-specific editing behaviour is
/// dispatched on this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Button,
    Image,
    Container,
    Card,
    Nav,
    Text,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Button,
        Role::Image,
        Role::Container,
        Role::Card,
        Role::Nav,
        Role::Text,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Role::Button => "button",
            Role::Image => "image",
            Role::Container => "container",
            Role::Card => "card",
            Role::Nav => "nav",
            Role::Text => "text",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.name() == s)
    }

    /// Units select as a whole: a hit on any descendant resolves to the
    /// closest unit ancestor. Containers and text select themselves.
    pub fn selects_as_unit(&self) -> bool {
        matches!(self, Role::Button | Role::Card | Role::Nav | Role::Image)
    }

    /// Whether the element carries its own text run.
    pub fn has_text(&self) -> bool {
        matches!(self, Role::Text | Role::Button)
    }

    /// Block-level elements get resize handles; text gets markers only.
    pub fn is_block(&self) -> bool {
        !matches!(self, Role::Text)
    }

    /// Styles the role brings before presets and overrides are applied.
    pub fn default_style(&self) -> SmallVec<[(StyleProperty, CssValue); 4]> {
        let mut out = SmallVec::new();
        match self {
            Role::Button => {
                out.push((StyleProperty::FontWeight, CssValue::Weight(500)));
                out.push((StyleProperty::PaddingTop, CssValue::px(12.0)));
                out.push((StyleProperty::PaddingBottom, CssValue::px(12.0)));
                out.push((StyleProperty::PaddingLeft, CssValue::px(24.0)));
                out.push((StyleProperty::PaddingRight, CssValue::px(24.0)));
            }
            Role::Card => {
                for side in crate::style::BoxSide::ALL {
                    out.push((StyleProperty::padding(side), CssValue::px(24.0)));
                }
            }
            Role::Nav => {
                for side in crate::style::BoxSide::ALL {
                    out.push((StyleProperty::padding(side), CssValue::px(16.0)));
                }
            }
            Role::Image | Role::Container | Role::Text => {}
        }
        out
    }
}

// ─── Geometry primitives ─────────────────────────────────────────────────

/// Axis-aligned rectangle in document coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }

    /// Shrink by `edges` (padding) or grow by negative edges.
    pub fn inset(&self, edges: &Edges) -> Rect {
        Rect {
            x: self.x + edges.left,
            y: self.y + edges.top,
            width: (self.width - edges.left - edges.right).max(0.0),
            height: (self.height - edges.top - edges.bottom).max(0.0),
        }
    }
}

/// Per-side pixel sizes (margin or padding).
pub type Edges = Sides<f32>;

impl Edges {
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

// ─── Text ranges ─────────────────────────────────────────────────────────

/// A character range inside one element's text content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    pub element: ElementId,
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    /// Build a range; endpoints are ordered so `start <= end`.
    pub fn new(element: ElementId, a: usize, b: usize) -> Self {
        Self {
            element,
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.is_collapsed()
    }
}

// ─── Alignment ───────────────────────────────────────────────────────────

/// Horizontal block alignment, expressed through `auto` margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl HorizontalAlign {
    /// Read the alignment back from an element's margins.
    pub fn of(margin: &Sides<Length>) -> Self {
        match (margin.left.is_auto(), margin.right.is_auto()) {
            (true, true) => HorizontalAlign::Center,
            (true, false) => HorizontalAlign::Right,
            _ => HorizontalAlign::Left,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HorizontalAlign::Left => "left",
            HorizontalAlign::Center => "center",
            HorizontalAlign::Right => "right",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "left" => Some(HorizontalAlign::Left),
            "center" => Some(HorizontalAlign::Center),
            "right" => Some(HorizontalAlign::Right),
            _ => None,
        }
    }
}

/// Vertical alignment inside a column flex parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VerticalAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

impl VerticalAlign {
    pub fn of(margin: &Sides<Length>) -> Self {
        match (margin.top.is_auto(), margin.bottom.is_auto()) {
            (true, true) => VerticalAlign::Center,
            (true, false) => VerticalAlign::Bottom,
            _ => VerticalAlign::Top,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            VerticalAlign::Top => "top",
            VerticalAlign::Center => "center",
            VerticalAlign::Bottom => "bottom",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "top" => Some(VerticalAlign::Top),
            "center" | "middle" => Some(VerticalAlign::Center),
            "bottom" => Some(VerticalAlign::Bottom),
            _ => None,
        }
    }
}

// ─── Toolbar placement ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolbarAnchor {
    AboveSelection,
    BesideElement,
}

/// Where a toolbar is drawn. Derived on demand, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToolbarPlacement {
    pub top: f32,
    pub left: f32,
    pub anchor: ToolbarAnchor,
}

/// Bounds used to clamp indent, margin and width proposals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub container_width: f32,
    /// Fixed floor that keeps content legible.
    pub min_content_width: f32,
}

impl Constraint {
    /// Largest block indent: half of the space left after the content floor.
    pub fn max_block_indent(&self) -> f32 {
        ((self.container_width - self.min_content_width) * 0.5)
            .floor()
            .max(0.0)
    }

    /// Largest first-line indent: half of the container.
    pub fn max_first_line_indent(&self) -> f32 {
        (self.container_width * 0.5).floor().max(0.0)
    }
}

// ─── Elements ────────────────────────────────────────────────────────────

/// One element of the playground document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementNode {
    pub id: ElementId,
    pub role: Role,
    /// Text run for text-bearing roles (`text`, `button`).
    pub content: Option<String>,
    pub style: StyleState,
}

impl ElementNode {
    pub fn new(id: ElementId, role: Role) -> Self {
        Self {
            id,
            role,
            content: None,
            style: StyleState::default(),
        }
    }

    pub fn with_text(id: ElementId, role: Role, content: &str) -> Self {
        Self {
            content: Some(content.to_string()),
            ..Self::new(id, role)
        }
    }

    /// Number of characters in the text run.
    pub fn text_len(&self) -> usize {
        self.content.as_deref().map_or(0, |c| c.chars().count())
    }
}

// ─── Document ────────────────────────────────────────────────────────────

pub const ROOT_ID: &str = "root";

/// The element tree the editor operates on.
///
/// The root is the page container; it is never selectable. Elements keep
/// their identity for the life of the document.
#[derive(Debug, Clone)]
pub struct Document {
    pub graph: StableDiGraph<ElementNode, ()>,
    pub root: NodeIndex,
    pub id_index: HashMap<ElementId, NodeIndex>,
    pub catalog: PresetCatalog,
}

impl Document {
    /// Empty document using the built-in preset catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::with_catalog(PresetCatalog::builtin())
    }

    #[must_use]
    pub fn with_catalog(catalog: PresetCatalog) -> Self {
        let mut graph = StableDiGraph::new();
        let root_id = ElementId::intern(ROOT_ID);
        let root = graph.add_node(ElementNode::new(root_id, Role::Container));

        let mut id_index = HashMap::new();
        id_index.insert(root_id, root);

        Self {
            graph,
            root,
            id_index,
            catalog,
        }
    }

    pub fn root_id(&self) -> ElementId {
        self.graph[self.root].id
    }

    /// Add an element as the last child of `parent`.
    pub fn add_element(&mut self, parent: NodeIndex, element: ElementNode) -> NodeIndex {
        let id = element.id;
        let idx = self.graph.add_node(element);
        self.graph.add_edge(parent, idx, ());
        self.id_index.insert(id, idx);
        idx
    }

    pub fn get(&self, id: ElementId) -> Option<&ElementNode> {
        self.id_index.get(&id).map(|idx| &self.graph[*idx])
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut ElementNode> {
        self.id_index
            .get(&id)
            .copied()
            .map(|idx| &mut self.graph[idx])
    }

    pub fn index_of(&self, id: ElementId) -> Option<NodeIndex> {
        self.id_index.get(&id).copied()
    }

    pub fn parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(idx, petgraph::Direction::Incoming)
            .next()
    }

    pub fn parent_id(&self, id: ElementId) -> Option<ElementId> {
        self.index_of(id)
            .and_then(|idx| self.parent(idx))
            .map(|p| self.graph[p].id)
    }

    /// Children in document (insertion) order.
    ///
    /// Sorted by `NodeIndex` so the order does not depend on how `petgraph`
    /// iterates adjacency lists.
    pub fn children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut children: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, petgraph::Direction::Outgoing)
            .collect();
        children.sort();
        children
    }

    /// Check if `ancestor` is a parent/grandparent/etc. of `descendant`.
    pub fn is_ancestor_of(&self, ancestor: ElementId, descendant: ElementId) -> bool {
        if ancestor == descendant {
            return false;
        }
        let mut current = match self.index_of(descendant) {
            Some(idx) => idx,
            None => return false,
        };
        while let Some(parent) = self.parent(current) {
            if self.graph[parent].id == ancestor {
                return true;
            }
            current = parent;
        }
        false
    }

    /// The element and its ancestors, innermost first, excluding the root.
    pub fn ancestry(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut current = self.index_of(id);
        while let Some(idx) = current {
            if idx == self.root {
                break;
            }
            out.push(self.graph[idx].id);
            current = self.parent(idx);
        }
        out
    }

    /// All elements in pre-order, root first.
    pub fn walk(&self) -> Vec<NodeIndex> {
        let mut out = Vec::with_capacity(self.graph.node_count());
        let mut stack = vec![self.root];
        while let Some(idx) = stack.pop() {
            out.push(idx);
            for child in self.children(idx).into_iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// The layered specified values of one element: role defaults, then the
    /// tagged preset, then overrides.
    pub fn specified_style(&self, node: &ElementNode) -> BTreeMap<StyleProperty, CssValue> {
        let mut specified: BTreeMap<StyleProperty, CssValue> =
            node.role.default_style().into_iter().collect();

        if let Some(preset) = node
            .style
            .preset
            .as_deref()
            .and_then(|name| self.catalog.get(name))
        {
            specified.extend(preset.entries());
        }

        for (prop, value) in &node.style.overrides {
            specified.insert(*prop, value.clone());
        }
        specified
    }

    /// Resolve the computed style of an element, inheriting typography from
    /// its ancestors.
    pub fn computed_style(&self, id: ElementId) -> Option<ComputedStyle> {
        let idx = self.index_of(id)?;
        let mut chain = vec![idx];
        let mut current = idx;
        while let Some(parent) = self.parent(current) {
            chain.push(parent);
            current = parent;
        }

        let mut style = ComputedStyle::default();
        for idx in chain.into_iter().rev() {
            let specified = self.specified_style(&self.graph[idx]);
            style = ComputedStyle::compute(&style, &specified);
        }
        Some(style)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
