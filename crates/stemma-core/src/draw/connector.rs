//! Straight and curved labeled connectors.
//!
//! A connector is a stroked segment or quadratic Bézier between two anchor
//! points, with a label painted over an opaque patch so it stays legible over
//! crossing lines and node fills. Endpoints are supplied at render time;
//! anchor resolution against node borders happens in the caller via
//! [`NodeBox::border_anchor`](crate::geometry::NodeBox::border_anchor).

use std::rc::Rc;

use svg::node::element::{self as svg_element, path::Data};

use crate::{
    apply_stroke,
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition, Text, TextDefinition},
    geometry::{Insets, Point},
};

/// The visual path a connector takes between its endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConnectorPath {
    /// A straight segment.
    Straight,
    /// A quadratic Bézier bent sideways by `factor`.
    ///
    /// The control point is displaced from the segment midpoint along the
    /// perpendicular of the start→end direction, scaled by `factor`. The
    /// sign picks the bend side, the magnitude the bend amount; the value is
    /// taken as-is, neither normalized nor clamped. A factor of `0.0`
    /// degenerates to a straight chord.
    Curved { factor: f32 },
}

/// Visual style shared by connectors: the line stroke, the label text style,
/// and the opaque patch painted behind the label.
///
/// When the label text style has no explicit color, the label inherits the
/// stroke color.
#[derive(Debug, Clone)]
pub struct ConnectorDefinition {
    stroke: Rc<StrokeDefinition>,
    label_text: Rc<TextDefinition>,
    label_background: Color,
    label_margin: Insets,
}

impl ConnectorDefinition {
    /// Creates a connector definition.
    pub fn new(
        stroke: Rc<StrokeDefinition>,
        label_text: Rc<TextDefinition>,
        label_background: Color,
        label_margin: Insets,
    ) -> Self {
        Self {
            stroke,
            label_text,
            label_background,
            label_margin,
        }
    }

    /// Returns the line stroke.
    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    /// Returns the label text style.
    pub fn label_text(&self) -> &TextDefinition {
        &self.label_text
    }

    /// Returns a copy of this definition with a different stroke.
    pub fn with_stroke(&self, stroke: Rc<StrokeDefinition>) -> Self {
        Self {
            stroke,
            ..self.clone()
        }
    }
}

/// A labeled connector between two anchor points.
///
/// # Examples
///
/// ```
/// # use std::rc::Rc;
/// # use stemma_core::color::Color;
/// # use stemma_core::draw::{
/// #     Connector, ConnectorDefinition, ConnectorPath, StrokeDefinition, TextDefinition,
/// # };
/// # use stemma_core::geometry::{Insets, Point};
/// let definition = ConnectorDefinition::new(
///     Rc::new(StrokeDefinition::default()),
///     Rc::new(TextDefinition::new("sans-serif", 10)),
///     Color::new("white").unwrap(),
///     Insets::symmetric(4.0, 2.0),
/// );
///
/// let connector = Connector::new(&definition, ConnectorPath::Straight, "син");
/// let output = connector.render_between(Point::new(425.0, 950.0), Point::new(425.0, 916.0));
/// assert!(!output.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Connector<'a> {
    definition: &'a ConnectorDefinition,
    path: ConnectorPath,
    label: &'a str,
}

impl<'a> Connector<'a> {
    /// Creates a connector with the given path kind and label. An empty
    /// label renders a degenerate, effectively invisible patch.
    pub fn new(definition: &'a ConnectorDefinition, path: ConnectorPath, label: &'a str) -> Self {
        Self {
            definition,
            path,
            label,
        }
    }

    /// The Bézier control point for a curved connector between `start` and
    /// `end`, or `None` for a straight one.
    pub fn control_point(&self, start: Point, end: Point) -> Option<Point> {
        match self.path {
            ConnectorPath::Straight => None,
            ConnectorPath::Curved { factor } => {
                let offset = end.sub_point(start).perpendicular().scale(factor);
                Some(start.midpoint(end).add_point(offset))
            }
        }
    }

    /// Where the label sits: the segment midpoint for straight connectors,
    /// the control point for curved ones.
    pub fn label_position(&self, start: Point, end: Point) -> Point {
        self.control_point(start, end)
            .unwrap_or_else(|| start.midpoint(end))
    }

    /// Renders the connector between the two resolved anchor points.
    pub fn render_between(&self, start: Point, end: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        let data = match self.control_point(start, end) {
            None => Data::new()
                .move_to((start.x(), start.y()))
                .line_to((end.x(), end.y())),
            Some(control) => Data::new()
                .move_to((start.x(), start.y()))
                .quadratic_curve_to((control.x(), control.y(), end.x(), end.y())),
        };

        let mut path = svg_element::Path::new().set("fill", "none").set("d", data);
        path = apply_stroke!(path, self.definition.stroke());
        output.add_to_layer(RenderLayer::Connector, Box::new(path));

        output.merge(self.render_label(self.label_position(start, end)));
        output
    }

    /// Paints the opaque label patch and the label text centered on
    /// `position`.
    fn render_label(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let definition = self.definition;

        // The label inherits the line color unless the text style pins one.
        let mut label_def = (*definition.label_text).clone();
        if label_def.color().is_none() {
            label_def.set_color(Some(definition.stroke.color()));
        }

        let text = Text::new(&label_def, self.label);
        let patch_width = text.measured_width() + definition.label_margin.horizontal_sum();
        let patch_height =
            label_def.font_size() as f32 + definition.label_margin.vertical_sum();

        let patch = svg_element::Rectangle::new()
            .set("x", position.x() - patch_width / 2.0)
            .set("y", position.y() - patch_height / 2.0)
            .set("width", patch_width)
            .set("height", patch_height)
            .set("fill", definition.label_background.to_string())
            .set("fill-opacity", definition.label_background.alpha());
        output.add_to_layer(RenderLayer::TextBackground, Box::new(patch));

        output.merge(text.render_to_layers(position));
        output
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn definition() -> ConnectorDefinition {
        ConnectorDefinition::new(
            Rc::new(StrokeDefinition::default()),
            Rc::new(TextDefinition::new("sans-serif", 10)),
            Color::new("white").unwrap(),
            Insets::symmetric(4.0, 2.0),
        )
    }

    fn assert_point_eq(actual: Point, expected: Point) {
        assert_approx_eq!(f32, actual.x(), expected.x());
        assert_approx_eq!(f32, actual.y(), expected.y());
    }

    #[test]
    fn test_straight_has_no_control_point() {
        let definition = definition();
        let connector = Connector::new(&definition, ConnectorPath::Straight, "син");
        assert!(
            connector
                .control_point(Point::new(0.0, 0.0), Point::new(10.0, 0.0))
                .is_none()
        );
    }

    #[test]
    fn test_zero_factor_control_point_is_midpoint() {
        let definition = definition();
        let connector = Connector::new(&definition, ConnectorPath::Curved { factor: 0.0 }, "");
        let start = Point::new(100.0, 200.0);
        let end = Point::new(300.0, 100.0);

        let control = connector.control_point(start, end).unwrap();
        assert_point_eq(control, start.midpoint(end));
    }

    #[test]
    fn test_control_point_offset_is_perpendicular() {
        let definition = definition();
        let connector = Connector::new(&definition, ConnectorPath::Curved { factor: 0.5 }, "");
        // Horizontal chord: the perpendicular of (100, 0) is (0, 100), so a
        // factor of 0.5 pushes the control point 50 units down.
        let start = Point::new(0.0, 0.0);
        let end = Point::new(100.0, 0.0);

        let control = connector.control_point(start, end).unwrap();
        assert_point_eq(control, Point::new(50.0, 50.0));
    }

    #[test]
    fn test_factor_sign_flips_bend_side() {
        let definition = definition();
        let left = Connector::new(&definition, ConnectorPath::Curved { factor: 0.3 }, "");
        let right = Connector::new(&definition, ConnectorPath::Curved { factor: -0.3 }, "");
        let start = Point::new(0.0, 0.0);
        let end = Point::new(100.0, 40.0);

        let mid = start.midpoint(end);
        let bend_left = left.control_point(start, end).unwrap().sub_point(mid);
        let bend_right = right.control_point(start, end).unwrap().sub_point(mid);
        assert_point_eq(bend_right, bend_left.scale(-1.0));
    }

    #[test]
    fn test_label_position_straight_is_midpoint() {
        let definition = definition();
        let connector = Connector::new(&definition, ConnectorPath::Straight, "син");
        let start = Point::new(425.0, 950.0);
        let end = Point::new(425.0, 916.0);
        assert_point_eq(connector.label_position(start, end), Point::new(425.0, 933.0));
    }

    #[test]
    fn test_label_position_curved_is_control_point() {
        let definition = definition();
        let connector = Connector::new(&definition, ConnectorPath::Curved { factor: 1.5 }, "");
        let start = Point::new(0.0, 0.0);
        let end = Point::new(100.0, 0.0);
        assert_point_eq(
            connector.label_position(start, end),
            connector.control_point(start, end).unwrap(),
        );
    }

    #[test]
    fn test_render_emits_line_patch_and_label() {
        let definition = definition();
        let connector = Connector::new(&definition, ConnectorPath::Straight, "мама");
        let output = connector.render_between(Point::new(0.0, 0.0), Point::new(100.0, 100.0));
        // Connector, text-background, and text layers.
        assert_eq!(output.render().len(), 3);
    }

    #[test]
    fn test_render_empty_label_still_total() {
        let definition = definition();
        let connector = Connector::new(&definition, ConnectorPath::Straight, "");
        let output = connector.render_between(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert!(!output.is_empty());
    }
}
