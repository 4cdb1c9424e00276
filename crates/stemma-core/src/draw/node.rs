//! Labeled node boxes.
//!
//! A node is a labeled box centered on a caller-supplied position: a person
//! in the tree, or an annotation. [`NodeDefinition`] carries the visual
//! style, [`Node`] pairs a definition with a label and knows how to measure
//! itself into a [`NodeBox`] and paint the box plus the centered label.

use std::rc::Rc;

use serde::Deserialize;
use svg::node::element as svg_element;

use crate::{
    apply_stroke,
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition, Text, TextDefinition},
    geometry::{Insets, NodeBox, Point, Size},
};

/// The shape variant of a node box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
    /// A solid rounded rectangle (person nodes).
    #[default]
    Standard,
    /// A sharp rectangle with a dashed border and muted text (annotations).
    Note,
}

/// Visual style for a node box: shape variant, fill, border, text, and the
/// padding between label and border.
///
/// Definitions are shared between nodes through `Rc`; per-node fill
/// overrides go through [`NodeDefinition::with_fill_color`].
#[derive(Debug, Clone)]
pub struct NodeDefinition {
    shape: NodeShape,
    fill_color: Color,
    border: Rc<StrokeDefinition>,
    text: Rc<TextDefinition>,
    padding: Insets,
    corner_radius: f32,
}

impl NodeDefinition {
    /// Creates a node definition.
    ///
    /// `padding` separates the label from the border: its horizontal sum
    /// widens the box around the measured text, its vertical sum tops up the
    /// font size to the box height. `corner_radius` only applies to
    /// [`NodeShape::Standard`].
    pub fn new(
        shape: NodeShape,
        fill_color: Color,
        border: Rc<StrokeDefinition>,
        text: Rc<TextDefinition>,
        padding: Insets,
        corner_radius: f32,
    ) -> Self {
        Self {
            shape,
            fill_color,
            border,
            text,
            padding,
            corner_radius,
        }
    }

    /// Returns the shape variant.
    pub fn shape(&self) -> NodeShape {
        self.shape
    }

    /// Returns the fill color.
    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    /// Returns the border stroke.
    pub fn border(&self) -> &StrokeDefinition {
        &self.border
    }

    /// Returns the label text style.
    pub fn text(&self) -> &TextDefinition {
        &self.text
    }

    /// Returns a copy of this definition with a different fill color.
    pub fn with_fill_color(&self, fill_color: Color) -> Self {
        Self {
            fill_color,
            ..self.clone()
        }
    }
}

/// A labeled node box, ready to measure and render.
///
/// The box width is the measured label width plus the horizontal padding;
/// the box height is the font size plus the vertical padding. Height is
/// font-derived rather than measurement-derived, so labels with embedded
/// line breaks render as stacked lines inside a single-line-tall box.
/// Known limitation: callers wanting a taller box must size it themselves.
#[derive(Debug, Clone)]
pub struct Node<'a> {
    definition: &'a NodeDefinition,
    label: &'a str,
}

impl<'a> Node<'a> {
    /// Creates a node from a definition and a label.
    pub fn new(definition: &'a NodeDefinition, label: &'a str) -> Self {
        Self { definition, label }
    }

    /// Returns the label of this node.
    pub fn label(&self) -> &str {
        self.label
    }

    /// Measures this node and places it at `center`, yielding the box every
    /// connector anchors against.
    pub fn place(&self, center: Point) -> NodeBox {
        NodeBox::new(center, self.size())
    }
}

impl<'a> Drawable for Node<'a> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let definition = self.definition;
        let bounds = position.to_bounds(self.size());

        let mut rect = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("fill", definition.fill_color().to_string())
            .set("fill-opacity", definition.fill_color().alpha());
        rect = apply_stroke!(rect, definition.border());

        if definition.shape() == NodeShape::Standard && definition.corner_radius > 0.0 {
            rect = rect.set("rx", definition.corner_radius);
        }

        output.add_to_layer(RenderLayer::Content, Box::new(rect));

        let text = Text::new(&definition.text, self.label);
        output.merge(text.render_to_layers(position));

        output
    }

    fn size(&self) -> Size {
        let definition = self.definition;
        let text_width = Text::new(&definition.text, self.label).measured_width();
        Size::new(
            text_width + definition.padding.horizontal_sum(),
            definition.text.font_size() as f32 + definition.padding.vertical_sum(),
        )
    }
}
