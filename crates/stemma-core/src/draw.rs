//! Drawable components for diagram rendering.
//!
//! This module provides the drawable abstractions for every visual element of
//! a relationship diagram: labeled node boxes, straight and curved labeled
//! connectors, union points, stroke and text definitions, and the layered
//! SVG output they render into.

mod connector;
mod layer;
mod node;
mod stroke;
mod text;
mod union;

pub use connector::{Connector, ConnectorDefinition, ConnectorPath};
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use node::{Node, NodeDefinition, NodeShape};
pub use stroke::{StrokeDefinition, StrokeStyle};
pub use text::{Text, TextDefinition};
pub use union::{Union, UnionDefinition};

use crate::geometry::{Point, Size};

/// A visual element that can be rendered at a position.
///
/// Implementations emit their SVG nodes into z-ordered layers via
/// [`LayeredOutput`]; every element carries its complete paint attributes,
/// so no paint state is shared between drawables.
pub trait Drawable: std::fmt::Debug {
    /// Renders this drawable centered at `position`.
    fn render_to_layers(&self, position: Point) -> LayeredOutput;

    /// The size this drawable occupies when rendered.
    fn size(&self) -> Size;
}
