//! Style configuration for Stemma diagram rendering.
//!
//! [`StyleConfig`] collects every styling constant of the renderer - font
//! sizes, paddings, the union disc radius, label patch margins, and the
//! palette - as defaulted, deserializable fields, so the geometry code stays
//! parameterized instead of hardcoded. All types implement
//! [`serde::Deserialize`] for loading from external sources.
//!
//! Colors are stored as CSS color strings and parsed when the configuration
//! is resolved into a [`StyleSet`]; an unparsable color surfaces as
//! [`StemmaError::Config`](crate::StemmaError).
//!
//! # Example
//!
//! ```
//! # use stemma::config::StyleConfig;
//! let config = StyleConfig::default();
//! let styles = config.resolve().expect("default palette parses");
//! assert_eq!(styles.union().radius(), 4.0);
//! ```

use std::rc::Rc;

use serde::Deserialize;

use stemma_core::{
    color::Color,
    draw::{
        ConnectorDefinition, NodeDefinition, NodeShape, StrokeDefinition, StrokeStyle,
        TextDefinition, UnionDefinition,
    },
    geometry::Insets,
};

use crate::error::StemmaError;

/// Styling configuration for rendered diagrams.
///
/// Every field has a default matching the reference palette; deserialize
/// only the fields you want to override.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Font family for node labels and connector labels.
    font_family: String,
    /// Font size for node labels, in user units.
    node_font_size: u16,
    /// Font size for connector labels (rendered bold), in user units.
    label_font_size: u16,
    /// Horizontal padding between a standard node's label and its border.
    node_padding_x: f32,
    /// Horizontal padding for note nodes (narrower than standard).
    note_padding_x: f32,
    /// Vertical padding between label and border, both shapes.
    node_padding_y: f32,
    /// Corner radius of standard node boxes.
    corner_radius: f32,
    /// Border width of standard node boxes.
    node_border_width: f32,
    /// Border width of note node boxes.
    note_border_width: f32,
    /// Dash pattern of note node borders.
    note_border_dash: String,
    /// Stroke width of connectors and union fan-in lines.
    connector_width: f32,
    /// Radius of the union point disc.
    union_radius: f32,
    /// Horizontal margin of the opaque patch behind connector labels,
    /// per side.
    label_margin_x: f32,
    /// Vertical margin of the label patch, per side.
    label_margin_y: f32,
    /// Stroke width of sibling rails and guide lines.
    rail_width: f32,
    /// Margin added around the content when sizing the document.
    canvas_margin: f32,
    /// Canvas background color; `None` leaves the background transparent.
    background_color: Option<String>,
    /// Default fill of standard nodes.
    person_fill: String,
    /// Default fill of note nodes.
    note_fill: String,
    /// Border color of all node boxes.
    border_color: String,
    /// Label color of note nodes (standard nodes use the SVG default).
    note_text_color: String,
    /// Fill of the union point disc.
    union_fill: String,
    /// Fill of the patch behind connector labels.
    label_background: String,
    /// Color of sibling rails and guide lines.
    rail_color: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            node_font_size: 12,
            label_font_size: 10,
            node_padding_x: 20.0,
            note_padding_x: 15.0,
            node_padding_y: 10.0,
            corner_radius: 8.0,
            node_border_width: 2.0,
            note_border_width: 1.0,
            note_border_dash: "3,3".to_string(),
            connector_width: 2.0,
            union_radius: 4.0,
            label_margin_x: 4.0,
            label_margin_y: 2.0,
            rail_width: 1.0,
            canvas_margin: 50.0,
            background_color: Some("white".to_string()),
            person_fill: "#e6f7ff".to_string(),
            note_fill: "#fffbeb".to_string(),
            border_color: "#0056b3".to_string(),
            note_text_color: "#555".to_string(),
            union_fill: "#555".to_string(),
            label_background: "white".to_string(),
            rail_color: "gray".to_string(),
        }
    }
}

impl StyleConfig {
    /// Parses the palette and assembles the drawable definitions the render
    /// pass works with.
    ///
    /// # Errors
    ///
    /// Returns [`StemmaError::Config`] naming the offending field if any
    /// color string fails to parse.
    pub fn resolve(&self) -> Result<StyleSet, StemmaError> {
        let border_color = parse_color(&self.border_color, "border_color")?;

        let node_text = Rc::new(TextDefinition::new(&self.font_family, self.node_font_size));

        let standard_node = NodeDefinition::new(
            NodeShape::Standard,
            parse_color(&self.person_fill, "person_fill")?,
            Rc::new(StrokeDefinition::solid(
                border_color,
                self.node_border_width,
            )),
            Rc::clone(&node_text),
            Insets::symmetric(self.node_padding_x, self.node_padding_y),
            self.corner_radius,
        );

        let mut note_text = TextDefinition::new(&self.font_family, self.node_font_size);
        note_text.set_color(Some(parse_color(&self.note_text_color, "note_text_color")?));
        let note_node = NodeDefinition::new(
            NodeShape::Note,
            parse_color(&self.note_fill, "note_fill")?,
            Rc::new(StrokeDefinition::new(
                border_color,
                self.note_border_width,
                StrokeStyle::Custom(self.note_border_dash.clone()),
            )),
            Rc::new(note_text),
            Insets::symmetric(self.note_padding_x, self.node_padding_y),
            0.0,
        );

        let mut label_text = TextDefinition::new(&self.font_family, self.label_font_size);
        label_text.set_bold(true);
        let connector = ConnectorDefinition::new(
            Rc::new(StrokeDefinition::solid(
                Color::default(),
                self.connector_width,
            )),
            Rc::new(label_text),
            parse_color(&self.label_background, "label_background")?,
            Insets::symmetric(self.label_margin_x, self.label_margin_y),
        );

        let union = UnionDefinition::new(
            self.union_radius,
            parse_color(&self.union_fill, "union_fill")?,
            Rc::new(StrokeDefinition::solid(
                Color::default(),
                self.connector_width,
            )),
        );

        let rail = Rc::new(StrokeDefinition::solid(
            parse_color(&self.rail_color, "rail_color")?,
            self.rail_width,
        ));

        let background = self
            .background_color
            .as_deref()
            .map(|value| parse_color(value, "background_color"))
            .transpose()?;

        Ok(StyleSet {
            standard_node,
            note_node,
            connector,
            union,
            rail,
            background,
            canvas_margin: self.canvas_margin,
        })
    }
}

/// The resolved drawable definitions built from a [`StyleConfig`].
#[derive(Debug, Clone)]
pub struct StyleSet {
    standard_node: NodeDefinition,
    note_node: NodeDefinition,
    connector: ConnectorDefinition,
    union: UnionDefinition,
    rail: Rc<StrokeDefinition>,
    background: Option<Color>,
    canvas_margin: f32,
}

impl StyleSet {
    /// Returns the node definition for the given shape variant.
    pub fn node(&self, shape: NodeShape) -> &NodeDefinition {
        match shape {
            NodeShape::Standard => &self.standard_node,
            NodeShape::Note => &self.note_node,
        }
    }

    /// Returns the base connector definition (black solid stroke; per-
    /// connection color and style are layered on top).
    pub fn connector(&self) -> &ConnectorDefinition {
        &self.connector
    }

    /// Returns the base union definition.
    pub fn union(&self) -> &UnionDefinition {
        &self.union
    }

    /// Returns the stroke used for rails and guide lines.
    pub fn rail(&self) -> &Rc<StrokeDefinition> {
        &self.rail
    }

    /// Returns the background color, if any.
    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// Returns the margin added around the content bounds.
    pub fn canvas_margin(&self) -> f32 {
        self.canvas_margin
    }
}

fn parse_color(value: &str, field: &'static str) -> Result<Color, StemmaError> {
    Color::new(value).map_err(|err| StemmaError::Config(format!("{field}: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_resolves() {
        let styles = StyleConfig::default().resolve().unwrap();
        assert_eq!(styles.union().radius(), 4.0);
        assert_eq!(styles.canvas_margin(), 50.0);
        assert!(styles.background().is_some());
    }

    #[test]
    fn test_default_node_definitions() {
        let styles = StyleConfig::default().resolve().unwrap();

        let standard = styles.node(NodeShape::Standard);
        assert_eq!(standard.shape(), NodeShape::Standard);
        assert_eq!(standard.text().font_size(), 12);
        assert_eq!(standard.border().width(), 2.0);

        let note = styles.node(NodeShape::Note);
        assert_eq!(note.shape(), NodeShape::Note);
        assert_eq!(note.border().width(), 1.0);
        assert_eq!(
            *note.border().style(),
            StrokeStyle::Custom("3,3".to_string())
        );
    }

    #[test]
    fn test_invalid_color_is_reported_with_field() {
        let mut config = StyleConfig::default();
        config.border_color = "definitely-not-a-color".to_string();

        let err = config.resolve().unwrap_err();
        assert!(matches!(err, StemmaError::Config(_)));
        assert!(err.to_string().contains("border_color"));
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let json = r##"{ "union_radius": 6.0, "person_fill": "#ffffff" }"##;
        let config: StyleConfig = serde_json::from_str(json).unwrap();
        let styles = config.resolve().unwrap();
        assert_eq!(styles.union().radius(), 6.0);
        assert_eq!(styles.canvas_margin(), 50.0);
    }
}
