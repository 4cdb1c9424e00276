//! Stroke and line-style definitions.
//!
//! # Overview
//!
//! - [`StrokeStyle`]: line pattern (solid, dashed, dotted, or a custom
//!   dasharray)
//! - [`StrokeDefinition`]: color + width + style for a stroked element
//! - [`apply_stroke!`](crate::apply_stroke!): macro applying stroke
//!   attributes to an SVG element
//!
//! The stroke system follows SVG/CSS terminology. Connector and border
//! definitions share `StrokeDefinition`s through `Rc`, so one definition can
//! style any number of elements.

use std::str::FromStr;

use serde::Deserialize;

use crate::color::Color;

/// The visual style of a stroke, including its dash pattern.
///
/// # SVG Mapping
///
/// Each variant maps to a specific SVG `stroke-dasharray` value:
/// - `Solid`: no dasharray attribute
/// - `Dashed`: "5,5"
/// - `Dotted`: "2,2"
/// - `Custom(pattern)`: the provided pattern string
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(from = "String")]
pub enum StrokeStyle {
    /// Solid continuous line (default)
    #[default]
    Solid,
    /// Dashed line with equal dash and gap lengths (5px dash, 5px gap)
    Dashed,
    /// Dotted line (2px dot, 2px gap)
    Dotted,
    /// Custom SVG dasharray pattern, a comma or space separated list of
    /// dash/gap lengths such as `"3,3"`
    Custom(String),
}

impl FromStr for StrokeStyle {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "solid" => Self::Solid,
            "dashed" => Self::Dashed,
            "dotted" => Self::Dotted,
            // Any other value is treated as a custom dasharray pattern
            _ => Self::Custom(s.to_string()),
        })
    }
}

impl From<String> for StrokeStyle {
    fn from(s: String) -> Self {
        s.parse().expect("StrokeStyle parsing is infallible")
    }
}

impl StrokeStyle {
    /// Returns the SVG dasharray value for this style, or `None` for solid
    /// lines.
    pub fn to_svg_value(&self) -> Option<String> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5".to_string()),
            Self::Dotted => Some("2,2".to_string()),
            Self::Custom(pattern) => Some(pattern.clone()),
        }
    }
}

/// A stroke definition for rendering lines and borders.
///
/// # Examples
///
/// ```
/// use stemma_core::draw::{StrokeDefinition, StrokeStyle};
/// use stemma_core::color::Color;
///
/// // Solid black connector stroke
/// let stroke = StrokeDefinition::solid(Color::default(), 2.0);
///
/// // Dotted purple social link
/// let stroke = StrokeDefinition::new(
///     Color::new("purple").unwrap(),
///     2.0,
///     StrokeStyle::Dotted,
/// );
/// ```
#[derive(Debug, Clone)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
}

impl StrokeDefinition {
    /// Creates a new stroke with the given color, width, and style.
    pub fn new(color: Color, width: f32, style: StrokeStyle) -> Self {
        Self {
            color,
            width,
            style,
        }
    }

    /// Creates a solid stroke.
    pub fn solid(color: Color, width: f32) -> Self {
        Self::new(color, width, StrokeStyle::Solid)
    }

    /// Creates a dashed stroke.
    pub fn dashed(color: Color, width: f32) -> Self {
        Self::new(color, width, StrokeStyle::Dashed)
    }

    /// Creates a dotted stroke.
    pub fn dotted(color: Color, width: f32) -> Self {
        Self::new(color, width, StrokeStyle::Dotted)
    }

    /// Returns the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the stroke style.
    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    /// Sets the stroke color.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Returns a copy of this stroke with a different color, keeping width
    /// and style.
    pub fn with_color(&self, color: Color) -> Self {
        Self {
            color,
            ..self.clone()
        }
    }

    /// Returns a copy of this stroke with a different style.
    pub fn with_style(&self, style: StrokeStyle) -> Self {
        Self {
            style,
            ..self.clone()
        }
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self {
            color: Color::default(),
            width: 2.0,
            style: StrokeStyle::default(),
        }
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// Applies the stroke color, opacity, width, and dash pattern (if the style
/// is not solid) to any SVG element.
///
/// # Examples
///
/// ```
/// use stemma_core::draw::StrokeDefinition;
/// use stemma_core::color::Color;
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeDefinition::dashed(Color::default(), 2.0);
/// let line = svg_element::Line::new()
///     .set("x1", 0)
///     .set("y1", 0)
///     .set("x2", 100)
///     .set("y2", 0);
///
/// let line = stemma_core::apply_stroke!(line, &stroke);
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width());

        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_default() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.width(), 2.0);
        assert_eq!(stroke.color().to_string(), "black");
        assert_eq!(*stroke.style(), StrokeStyle::Solid);
    }

    #[test]
    fn test_stroke_constructors() {
        let color = Color::new("red").unwrap();

        let solid = StrokeDefinition::solid(color, 2.0);
        assert_eq!(*solid.style(), StrokeStyle::Solid);

        let dashed = StrokeDefinition::dashed(color, 1.5);
        assert_eq!(*dashed.style(), StrokeStyle::Dashed);
        assert_eq!(dashed.width(), 1.5);

        let dotted = StrokeDefinition::dotted(color, 1.0);
        assert_eq!(*dotted.style(), StrokeStyle::Dotted);
    }

    #[test]
    fn test_stroke_with_color() {
        let stroke = StrokeDefinition::dashed(Color::default(), 2.0);
        let recolored = stroke.with_color(Color::new("red").unwrap());
        assert_eq!(recolored.color().to_string(), "red");
        assert_eq!(*recolored.style(), StrokeStyle::Dashed);
        assert_eq!(recolored.width(), 2.0);
    }

    #[test]
    fn test_stroke_style_dasharray() {
        assert_eq!(StrokeStyle::Solid.to_svg_value(), None);
        assert_eq!(StrokeStyle::Dashed.to_svg_value(), Some("5,5".to_string()));
        assert_eq!(StrokeStyle::Dotted.to_svg_value(), Some("2,2".to_string()));
        assert_eq!(
            StrokeStyle::Custom("3,3".to_string()).to_svg_value(),
            Some("3,3".to_string())
        );
    }

    #[test]
    fn test_stroke_style_from_str() {
        assert_eq!("solid".parse::<StrokeStyle>().unwrap(), StrokeStyle::Solid);
        assert_eq!(
            "dashed".parse::<StrokeStyle>().unwrap(),
            StrokeStyle::Dashed
        );
        assert_eq!(
            "dotted".parse::<StrokeStyle>().unwrap(),
            StrokeStyle::Dotted
        );

        // Unrecognized strings become custom dasharray patterns.
        assert_eq!(
            "10,5,2,5".parse::<StrokeStyle>().unwrap(),
            StrokeStyle::Custom("10,5,2,5".to_string())
        );
    }
}
