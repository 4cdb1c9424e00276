//! Stemma - a renderer for family-tree style relationship diagrams.
//!
//! A diagram is an ordered set of caller-positioned, labeled nodes plus the
//! connections between them: straight child lines leaving union points,
//! curved labeled relations between node borders, sibling rails, and guide
//! lines. Stemma measures each node from its label, routes every connection
//! to the nearest border of its target, and renders the whole scene to SVG.
//!
//! Positions are supplied by the caller; there is no automatic layout.
//!
//! # Examples
//!
//! ```
//! use stemma::{Diagram, DiagramRenderer, color::Color, draw::StrokeStyle};
//!
//! let mut diagram = Diagram::new();
//! let lilya = diagram.add_node(275.0, 1000.0, "Ліля");
//! let dasha = diagram.add_node(575.0, 1000.0, "Даша");
//! let vlad = diagram.add_node(425.0, 900.0, "Влад");
//!
//! let union = diagram.add_union(425.0, 950.0, &[dasha, lilya], Color::default());
//! diagram.connect_straight(union, vlad, "син", Color::default(), StrokeStyle::Solid);
//!
//! let renderer = DiagramRenderer::default();
//! let svg = renderer.render_svg(&diagram).expect("render succeeds");
//! assert!(svg.contains("<svg"));
//! ```

pub mod config;
pub mod diagram;
pub mod export;

mod error;
mod render;

pub use stemma_core::{color, draw, geometry};

pub use diagram::{Diagram, NodeId, StraightStart, UnionId, VerticalEdge};
pub use error::StemmaError;

use std::path::Path;

use log::info;

use config::StyleConfig;
use export::svg::SvgBuilder;

/// Renders [`Diagram`]s to SVG under a [`StyleConfig`].
///
/// The renderer is stateless between calls and can be reused for any number
/// of diagrams.
#[derive(Debug, Clone, Default)]
pub struct DiagramRenderer {
    config: StyleConfig,
}

impl DiagramRenderer {
    /// Creates a renderer with the given style configuration.
    pub fn new(config: StyleConfig) -> Self {
        Self { config }
    }

    /// Renders a diagram to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`StemmaError`] when the style configuration carries an
    /// unparsable color or the diagram references a handle issued by a
    /// different diagram.
    pub fn render_svg(&self, diagram: &Diagram) -> Result<String, StemmaError> {
        let styles = self.config.resolve()?;
        let (output, bounds) = render::render_diagram(diagram, &styles)?;

        let document = SvgBuilder::new()
            .with_background(styles.background())
            .with_margin(styles.canvas_margin())
            .build_document(output, bounds);

        info!("SVG rendered successfully");
        Ok(document.to_string())
    }

    /// Renders a diagram and writes the SVG to `path`.
    ///
    /// # Errors
    ///
    /// As [`DiagramRenderer::render_svg`], plus I/O failures creating or
    /// writing the file.
    pub fn render_to_file(
        &self,
        diagram: &Diagram,
        path: impl AsRef<Path>,
    ) -> Result<(), StemmaError> {
        let styles = self.config.resolve()?;
        let (output, bounds) = render::render_diagram(diagram, &styles)?;

        let builder = SvgBuilder::new()
            .with_background(styles.background())
            .with_margin(styles.canvas_margin());
        let document = builder.build_document(output, bounds);
        builder.write_document(&document, path)
    }
}
