//! The diagram definition data model.
//!
//! A [`Diagram`] is an ordered list of declarations: nodes first-class,
//! then unions, connections, rails, and guides referencing earlier
//! declarations through typed handles ([`NodeId`], [`UnionId`]). The model
//! carries no geometry beyond the caller-supplied positions; measuring and
//! routing happen in the render pass.
//!
//! # Example
//!
//! ```
//! use stemma::{Diagram, draw::StrokeStyle, color::Color};
//!
//! let mut diagram = Diagram::new();
//! let lilya = diagram.add_node(275.0, 1000.0, "Ліля");
//! let dasha = diagram.add_node(575.0, 1000.0, "Даша");
//! let vlad = diagram.add_node(425.0, 900.0, "Влад");
//!
//! let union = diagram.add_union(425.0, 950.0, &[dasha, lilya], Color::default());
//! diagram.connect_straight(union, vlad, "син", Color::default(), StrokeStyle::Solid);
//! ```

use stemma_core::{
    color::Color,
    draw::{NodeShape, StrokeStyle},
    geometry::Point,
};

/// Handle to a node declaration, issued by [`Diagram::add_node`] and
/// friends. Only valid for the diagram that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(pub(crate) usize);

/// Handle to a union declaration, issued by [`Diagram::add_union`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnionId(pub(crate) usize);

/// Which horizontal edge of a node box a guide line attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalEdge {
    Top,
    Bottom,
}

/// Where a straight connection starts: at a union point or at a bare
/// coordinate.
#[derive(Debug, Clone, Copy)]
pub enum StraightStart {
    Union(UnionId),
    At(Point),
}

impl From<UnionId> for StraightStart {
    fn from(id: UnionId) -> Self {
        Self::Union(id)
    }
}

impl From<Point> for StraightStart {
    fn from(point: Point) -> Self {
        Self::At(point)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct NodeDecl {
    pub(crate) center: Point,
    pub(crate) label: String,
    pub(crate) shape: NodeShape,
    pub(crate) fill: Option<Color>,
}

#[derive(Debug, Clone)]
pub(crate) struct UnionDecl {
    pub(crate) position: Point,
    pub(crate) parents: Vec<NodeId>,
    pub(crate) line_color: Color,
}

#[derive(Debug, Clone)]
pub(crate) enum ConnectionDecl {
    Straight {
        start: StraightStart,
        target: NodeId,
        label: String,
        color: Color,
        style: StrokeStyle,
    },
    Curved {
        a: NodeId,
        b: NodeId,
        label: String,
        color: Color,
        style: StrokeStyle,
        factor: f32,
    },
}

#[derive(Debug, Clone)]
pub(crate) struct RailDecl {
    pub(crate) y: f32,
    pub(crate) members: Vec<NodeId>,
    pub(crate) drop: Option<(NodeId, NodeId)>,
}

#[derive(Debug, Clone)]
pub(crate) struct GuideDecl {
    pub(crate) from: (NodeId, VerticalEdge),
    pub(crate) to: (NodeId, VerticalEdge),
}

/// A complete diagram definition: nodes, unions, connections, rails, and
/// guides, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Diagram {
    pub(crate) nodes: Vec<NodeDecl>,
    pub(crate) unions: Vec<UnionDecl>,
    pub(crate) connections: Vec<ConnectionDecl>,
    pub(crate) rails: Vec<RailDecl>,
    pub(crate) guides: Vec<GuideDecl>,
}

impl Diagram {
    /// Creates an empty diagram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a standard node with the default fill.
    pub fn add_node(&mut self, x: f32, y: f32, label: &str) -> NodeId {
        self.push_node(x, y, label, NodeShape::Standard, None)
    }

    /// Declares a standard node with an explicit fill color.
    pub fn add_node_with_fill(&mut self, x: f32, y: f32, label: &str, fill: Color) -> NodeId {
        self.push_node(x, y, label, NodeShape::Standard, Some(fill))
    }

    /// Declares a note node (dashed border, muted colors) with the default
    /// note fill.
    pub fn add_note(&mut self, x: f32, y: f32, label: &str) -> NodeId {
        self.push_node(x, y, label, NodeShape::Note, None)
    }

    /// Declares a note node with an explicit fill color.
    pub fn add_note_with_fill(&mut self, x: f32, y: f32, label: &str, fill: Color) -> NodeId {
        self.push_node(x, y, label, NodeShape::Note, Some(fill))
    }

    fn push_node(
        &mut self,
        x: f32,
        y: f32,
        label: &str,
        shape: NodeShape,
        fill: Option<Color>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeDecl {
            center: Point::new(x, y),
            label: label.to_string(),
            shape,
            fill,
        });
        id
    }

    /// Declares a union point at `(x, y)` fanning in from `parents`, with
    /// the fan-in lines drawn in `line_color`. Parent order does not matter;
    /// a single parent is valid and degenerates to one line.
    pub fn add_union(&mut self, x: f32, y: f32, parents: &[NodeId], line_color: Color) -> UnionId {
        let id = UnionId(self.unions.len());
        self.unions.push(UnionDecl {
            position: Point::new(x, y),
            parents: parents.to_vec(),
            line_color,
        });
        id
    }

    /// Declares a straight labeled connection from a start point (a union
    /// or a bare [`Point`]) to the border of `target`.
    pub fn connect_straight(
        &mut self,
        start: impl Into<StraightStart>,
        target: NodeId,
        label: &str,
        color: Color,
        style: StrokeStyle,
    ) {
        self.connections.push(ConnectionDecl::Straight {
            start: start.into(),
            target,
            label: label.to_string(),
            color,
            style,
        });
    }

    /// Declares a curved labeled connection between the borders of two
    /// nodes. The sign of `factor` picks the bend side, its magnitude the
    /// bend amount; `0.0` degenerates to a straight chord.
    pub fn connect_curved(
        &mut self,
        a: NodeId,
        b: NodeId,
        label: &str,
        color: Color,
        style: StrokeStyle,
        factor: f32,
    ) {
        self.connections.push(ConnectionDecl::Curved {
            a,
            b,
            label: label.to_string(),
            color,
            style,
            factor,
        });
    }

    /// Declares a sibling rail: a thin horizontal line at `y` spanning from
    /// the first to the last member, with a vertical tick from the rail to
    /// each member's top edge. `drop` optionally adds a line from a node's
    /// bottom edge down to the rail where the named member meets it,
    /// attaching that node to the sibling group.
    pub fn add_rail(&mut self, y: f32, members: &[NodeId], drop: Option<(NodeId, NodeId)>) {
        self.rails.push(RailDecl {
            y,
            members: members.to_vec(),
            drop,
        });
    }

    /// Declares a thin guide line between the horizontal edge midpoints of
    /// two nodes.
    pub fn add_guide(
        &mut self,
        from: NodeId,
        from_edge: VerticalEdge,
        to: NodeId,
        to_edge: VerticalEdge,
    ) {
        self.guides.push(GuideDecl {
            from: (from, from_edge),
            to: (to, to_edge),
        });
    }

    /// Number of declared nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of declared connections.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Number of declared unions.
    pub fn union_count(&self) -> usize {
        self.unions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_sequential() {
        let mut diagram = Diagram::new();
        let a = diagram.add_node(0.0, 0.0, "a");
        let b = diagram.add_note(10.0, 0.0, "b");
        assert_eq!(a, NodeId(0));
        assert_eq!(b, NodeId(1));
        assert_eq!(diagram.node_count(), 2);
    }

    #[test]
    fn test_union_and_connection_declarations() {
        let mut diagram = Diagram::new();
        let a = diagram.add_node(0.0, 0.0, "a");
        let b = diagram.add_node(100.0, 0.0, "b");
        let child = diagram.add_node(50.0, 100.0, "c");

        let union = diagram.add_union(50.0, 50.0, &[a, b], Color::default());
        diagram.connect_straight(union, child, "син", Color::default(), StrokeStyle::Solid);
        diagram.connect_curved(a, b, "тьотя", Color::default(), StrokeStyle::Dashed, 1.2);

        assert_eq!(diagram.union_count(), 1);
        assert_eq!(diagram.connection_count(), 2);
    }

    #[test]
    fn test_straight_start_from_point() {
        let mut diagram = Diagram::new();
        let target = diagram.add_node(0.0, 0.0, "target");
        diagram.connect_straight(
            Point::new(5.0, 5.0),
            target,
            "",
            Color::default(),
            StrokeStyle::Dotted,
        );
        assert_eq!(diagram.connection_count(), 1);
    }
}
