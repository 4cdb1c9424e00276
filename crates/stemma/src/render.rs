//! The render pass: one synchronous walk over a diagram definition.
//!
//! Nodes are measured and placed first, because everything else anchors
//! against their boxes: rails and guides attach to box edges, unions fan in
//! from box borders, and connections resolve their endpoints through
//! [`NodeBox::border_anchor`]. Output is collected per z-layer, so the order
//! of declarations never bleeds paint state between elements.

use log::{debug, info};

use stemma_core::{
    apply_stroke,
    draw::{
        Connector, ConnectorPath, Drawable, LayeredOutput, Node, RenderLayer, StrokeDefinition,
        Union,
    },
    geometry::{Bounds, NodeBox, Point, Size},
};

use svg::node::element as svg_element;

use crate::{
    config::StyleSet,
    diagram::{ConnectionDecl, Diagram, NodeId, StraightStart, UnionId, VerticalEdge},
    error::StemmaError,
};

/// Renders a diagram into layered SVG nodes plus the bounds of the painted
/// content.
pub(crate) fn render_diagram(
    diagram: &Diagram,
    styles: &StyleSet,
) -> Result<(LayeredOutput, Bounds), StemmaError> {
    info!(
        nodes = diagram.node_count(),
        unions = diagram.union_count(),
        connections = diagram.connection_count();
        "Rendering diagram"
    );

    let mut output = LayeredOutput::new();
    let mut bounds: Option<Bounds> = None;

    // Measure and place every node. Boxes are indexed by declaration order,
    // which is exactly what the NodeId handles encode.
    let mut boxes: Vec<NodeBox> = Vec::with_capacity(diagram.nodes.len());
    for decl in &diagram.nodes {
        let definition = match decl.fill {
            Some(fill) => styles.node(decl.shape).with_fill_color(fill),
            None => styles.node(decl.shape).clone(),
        };
        let node = Node::new(&definition, &decl.label);
        let node_box = node.place(decl.center);

        output.merge(node.render_to_layers(decl.center));
        merge_bounds(&mut bounds, node_box.bounds());
        boxes.push(node_box);
    }
    debug!(boxes = boxes.len(); "Nodes measured and placed");

    for rail in &diagram.rails {
        render_rail(&mut output, &mut bounds, rail, &boxes, styles)?;
    }

    for guide in &diagram.guides {
        let from = edge_midpoint(node_box(&boxes, guide.from.0)?, guide.from.1);
        let to = edge_midpoint(node_box(&boxes, guide.to.0)?, guide.to.1);
        push_line(&mut output, styles.rail(), from, to);
        merge_bounds(&mut bounds, Bounds::new_from_point(from));
        merge_bounds(&mut bounds, Bounds::new_from_point(to));
    }

    // Unions before connections: a straight connection may start at any
    // union point declared earlier.
    let mut union_points: Vec<Point> = Vec::with_capacity(diagram.unions.len());
    for decl in &diagram.unions {
        let parents = decl
            .parents
            .iter()
            .map(|id| node_box(&boxes, *id))
            .collect::<Result<Vec<_>, _>>()?;

        let line = styles.union().line().with_color(decl.line_color);
        let definition = styles.union().with_line(line.into());
        let union = Union::new(&definition, &parents);

        output.merge(union.render_at(decl.position));
        let disc = Size::new(definition.radius() * 2.0, definition.radius() * 2.0);
        merge_bounds(&mut bounds, decl.position.to_bounds(disc));
        union_points.push(union.point(decl.position));
    }
    debug!(unions = union_points.len(); "Union points drawn");

    for decl in &diagram.connections {
        match decl {
            ConnectionDecl::Straight {
                start,
                target,
                label,
                color,
                style,
            } => {
                let start = match start {
                    StraightStart::Union(id) => union_point(&union_points, *id)?,
                    StraightStart::At(point) => *point,
                };
                let end = node_box(&boxes, *target)?.border_anchor(start);

                let stroke = StrokeDefinition::new(
                    *color,
                    styles.connector().stroke().width(),
                    style.clone(),
                );
                let definition = styles.connector().with_stroke(stroke.into());
                let connector = Connector::new(&definition, ConnectorPath::Straight, label);

                output.merge(connector.render_between(start, end));
                merge_bounds(&mut bounds, Bounds::new_from_point(start));
                merge_bounds(&mut bounds, Bounds::new_from_point(end));
            }
            ConnectionDecl::Curved {
                a,
                b,
                label,
                color,
                style,
                factor,
            } => {
                let a_box = node_box(&boxes, *a)?;
                let b_box = node_box(&boxes, *b)?;
                // Each anchor is computed with the other box as the origin,
                // so both land on the near border whatever the relative
                // position.
                let start = a_box.border_anchor(b_box.center());
                let end = b_box.border_anchor(a_box.center());

                let stroke = StrokeDefinition::new(
                    *color,
                    styles.connector().stroke().width(),
                    style.clone(),
                );
                let definition = styles.connector().with_stroke(stroke.into());
                let connector =
                    Connector::new(&definition, ConnectorPath::Curved { factor: *factor }, label);

                output.merge(connector.render_between(start, end));
                merge_bounds(&mut bounds, Bounds::new_from_point(start));
                merge_bounds(&mut bounds, Bounds::new_from_point(end));
                if let Some(control) = connector.control_point(start, end) {
                    // Strong bends push the curve well past the anchors.
                    merge_bounds(&mut bounds, Bounds::new_from_point(control));
                }
            }
        }
    }
    debug!(connections = diagram.connection_count(); "Connections routed");

    Ok((output, bounds.unwrap_or_default()))
}

fn render_rail(
    output: &mut LayeredOutput,
    bounds: &mut Option<Bounds>,
    rail: &crate::diagram::RailDecl,
    boxes: &[NodeBox],
    styles: &StyleSet,
) -> Result<(), StemmaError> {
    let Some((first, rest)) = rail.members.split_first() else {
        return Ok(());
    };
    let last = rest.last().unwrap_or(first);

    let rail_start = Point::new(node_box(boxes, *first)?.center().x(), rail.y);
    let rail_end = Point::new(node_box(boxes, *last)?.center().x(), rail.y);
    push_line(output, styles.rail(), rail_start, rail_end);
    merge_bounds(bounds, Bounds::new_from_point(rail_start));
    merge_bounds(bounds, Bounds::new_from_point(rail_end));

    for member in &rail.members {
        let member_box = node_box(boxes, *member)?;
        let x = member_box.center().x();
        push_line(
            output,
            styles.rail(),
            Point::new(x, rail.y),
            Point::new(x, member_box.bounds().min_y()),
        );
    }

    if let Some((node, at)) = rail.drop {
        let from_box = node_box(boxes, node)?;
        let from = Point::new(from_box.center().x(), from_box.bounds().max_y());
        let to = Point::new(node_box(boxes, at)?.center().x(), rail.y);
        push_line(output, styles.rail(), from, to);
        merge_bounds(bounds, Bounds::new_from_point(from));
    }

    Ok(())
}

fn push_line(output: &mut LayeredOutput, stroke: &StrokeDefinition, from: Point, to: Point) {
    let mut line = svg_element::Line::new()
        .set("x1", from.x())
        .set("y1", from.y())
        .set("x2", to.x())
        .set("y2", to.y());
    line = apply_stroke!(line, stroke);
    output.add_to_layer(RenderLayer::Connector, Box::new(line));
}

fn edge_midpoint(node_box: NodeBox, edge: VerticalEdge) -> Point {
    let bounds = node_box.bounds();
    let y = match edge {
        VerticalEdge::Top => bounds.min_y(),
        VerticalEdge::Bottom => bounds.max_y(),
    };
    Point::new(node_box.center().x(), y)
}

fn node_box(boxes: &[NodeBox], id: NodeId) -> Result<NodeBox, StemmaError> {
    boxes
        .get(id.0)
        .copied()
        .ok_or_else(|| StemmaError::dangling("node", id.0))
}

fn union_point(points: &[Point], id: UnionId) -> Result<Point, StemmaError> {
    points
        .get(id.0)
        .copied()
        .ok_or_else(|| StemmaError::dangling("union", id.0))
}

fn merge_bounds(acc: &mut Option<Bounds>, bounds: Bounds) {
    *acc = Some(match acc {
        Some(existing) => existing.merge(&bounds),
        None => bounds,
    });
}
