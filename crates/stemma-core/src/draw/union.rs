//! Union points: the junction where parent lines converge.
//!
//! A union is a small filled disc at a caller-chosen point, with one solid
//! line fanning in from the border of each parent box. The point itself is
//! returned to the caller for immediate reuse as the start of the child
//! connector - the classic "two parents converge, one child line leaves"
//! pattern.

use std::rc::Rc;

use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    color::Color,
    draw::{LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::{NodeBox, Point},
};

/// Visual style for union points: disc radius and fill, and the stroke of
/// the fan-in lines.
#[derive(Debug, Clone)]
pub struct UnionDefinition {
    radius: f32,
    fill_color: Color,
    line: Rc<StrokeDefinition>,
}

impl UnionDefinition {
    /// Creates a union definition.
    pub fn new(radius: f32, fill_color: Color, line: Rc<StrokeDefinition>) -> Self {
        Self {
            radius,
            fill_color,
            line,
        }
    }

    /// Returns the disc radius.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Returns the fan-in line stroke.
    pub fn line(&self) -> &StrokeDefinition {
        &self.line
    }

    /// Returns a copy of this definition with a different fan-in line
    /// stroke.
    pub fn with_line(&self, line: Rc<StrokeDefinition>) -> Self {
        Self {
            line,
            ..self.clone()
        }
    }
}

/// A union point fanning in from a set of parent boxes.
///
/// # Examples
///
/// ```
/// # use std::rc::Rc;
/// # use stemma_core::color::Color;
/// # use stemma_core::draw::{StrokeDefinition, Union, UnionDefinition};
/// # use stemma_core::geometry::{NodeBox, Point, Size};
/// let definition = UnionDefinition::new(
///     4.0,
///     Color::new("#555").unwrap(),
///     Rc::new(StrokeDefinition::default()),
/// );
/// let parents = [
///     NodeBox::new(Point::new(275.0, 1000.0), Size::new(70.0, 32.0)),
///     NodeBox::new(Point::new(575.0, 1000.0), Size::new(70.0, 32.0)),
/// ];
///
/// let union = Union::new(&definition, &parents);
/// let point = union.point(Point::new(425.0, 950.0));
/// assert_eq!(point, Point::new(425.0, 950.0));
/// ```
#[derive(Debug, Clone)]
pub struct Union<'a> {
    definition: &'a UnionDefinition,
    parents: &'a [NodeBox],
}

impl<'a> Union<'a> {
    /// Creates a union over the given parent boxes. Parent order does not
    /// matter; a single parent degenerates to one line, which is valid.
    pub fn new(definition: &'a UnionDefinition, parents: &'a [NodeBox]) -> Self {
        Self {
            definition,
            parents,
        }
    }

    /// The convergence point itself, for reuse as a child connector start.
    pub fn point(&self, position: Point) -> Point {
        position
    }

    /// The fan-in segments, one per parent: from the anchor on the parent's
    /// border nearest the union point, to the union point.
    pub fn fan_in(&self, position: Point) -> Vec<(Point, Point)> {
        self.parents
            .iter()
            .map(|parent| (parent.border_anchor(position), position))
            .collect()
    }

    /// Renders the fan-in lines and the disc at `position`.
    pub fn render_at(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        for (from, to) in self.fan_in(position) {
            let mut line = svg_element::Line::new()
                .set("x1", from.x())
                .set("y1", from.y())
                .set("x2", to.x())
                .set("y2", to.y());
            line = apply_stroke!(line, self.definition.line());
            output.add_to_layer(RenderLayer::Connector, Box::new(line));
        }

        let disc = svg_element::Circle::new()
            .set("cx", position.x())
            .set("cy", position.y())
            .set("r", self.definition.radius())
            .set("fill", self.definition.fill_color.to_string())
            .set("fill-opacity", self.definition.fill_color.alpha());
        output.add_to_layer(RenderLayer::Union, Box::new(disc));

        output
    }
}
