//! SVG document assembly and output.

use std::{fs::File, io::Write, path::Path};

use log::{debug, error, info};
use svg::{Document, node::element as svg_element};

use stemma_core::{
    color::Color,
    draw::{LayeredOutput, RenderLayer},
    geometry::{Bounds, Insets},
};

use crate::error::StemmaError;

/// Assembles layered render output into an SVG document sized to the
/// content.
#[derive(Debug, Clone, Default)]
pub struct SvgBuilder {
    background: Option<Color>,
    margin: f32,
}

impl SvgBuilder {
    /// Creates a builder with no background and no margin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the background color painted behind the whole document.
    pub fn with_background(mut self, background: Option<Color>) -> Self {
        self.background = background;
        self
    }

    /// Sets the margin added on every side of the content bounds.
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Builds the SVG document: the viewport is the content bounds padded by
    /// the margin, the optional background fills the viewport, and the
    /// layered output renders as z-ordered groups.
    pub fn build_document(&self, mut output: LayeredOutput, content: Bounds) -> Document {
        let viewport = content.add_padding(Insets::uniform(self.margin));
        debug!(
            width = viewport.width(),
            height = viewport.height();
            "Final SVG dimensions"
        );

        if let Some(background) = self.background {
            let rect = svg_element::Rectangle::new()
                .set("x", viewport.min_x())
                .set("y", viewport.min_y())
                .set("width", viewport.width())
                .set("height", viewport.height())
                .set("fill", background.to_string())
                .set("fill-opacity", background.alpha());
            output.add_to_layer(RenderLayer::Background, Box::new(rect));
        }

        let mut document = Document::new()
            .set("width", viewport.width())
            .set("height", viewport.height())
            .set(
                "viewBox",
                (
                    viewport.min_x(),
                    viewport.min_y(),
                    viewport.width(),
                    viewport.height(),
                ),
            );

        for node in output.render() {
            document = document.add(node);
        }

        document
    }

    /// Writes an SVG document to the specified file.
    pub fn write_document(
        &self,
        document: &Document,
        path: impl AsRef<Path>,
    ) -> Result<(), StemmaError> {
        let path = path.as_ref();
        info!(file_name = path.display().to_string(); "Creating SVG file");

        let file = match File::create(path) {
            Ok(file) => file,
            Err(err) => {
                error!(file_name = path.display().to_string(), err:err; "Failed to create SVG file");
                return Err(StemmaError::Io(err));
            }
        };

        if let Err(err) = write!(&file, "{document}") {
            error!(file_name = path.display().to_string(), err:err; "Failed to write SVG content");
            return Err(StemmaError::Io(err));
        }

        Ok(())
    }
}
