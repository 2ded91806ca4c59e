pub mod emitter;
pub mod id;
pub mod layout;
pub mod model;
pub mod parser;
pub mod preset;
pub mod style;

pub use emitter::{Attributes, element_attributes, emit_document};
pub use id::ElementId;
pub use layout::{GeometrySnapshot, Viewport, range_rect, resolve_layout, snapshot};
pub use model::*;
pub use parser::{ParseError, parse_document, parse_value};
pub use preset::{PresetCatalog, StylePreset, Typography};
pub use style::*;

// Re-export petgraph types so downstream crates don't need a direct dependency
pub use petgraph::graph::NodeIndex;
