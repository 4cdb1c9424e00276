//! Text rendering and measurement for diagram labels.
//!
//! # Overview
//!
//! - [`TextDefinition`] - reusable text style (family, size, weight, color)
//! - [`Text`] - a renderable text element combining content with a
//!   [`TextDefinition`]
//!
//! Measurement runs through a process-wide font system and returns the width
//! of the widest shaped line. Rendering emits an SVG `<text>` element with
//! one `tspan` per line, centered on the given position. Node and connector
//! code derives box heights from the font size, not from measured glyph
//! extents, so label height stays stable across fonts.

use std::sync::{Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Weight};
use log::info;
use svg::{node::Text as SvgText, node::element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer},
    geometry::{Point, Size},
};

/// Ratio of line height to font size used for multi-line spacing.
const LINE_HEIGHT_FACTOR: f32 = 1.15;

/// Per-character width estimate used when no font matches the requested
/// family, so measurement stays total on fontless hosts.
const FALLBACK_ADVANCE_FACTOR: f32 = 0.55;

/// Defines the visual style for text elements in diagrams.
///
/// # Examples
///
/// ```
/// # use stemma_core::draw::TextDefinition;
/// # use stemma_core::color::Color;
/// let mut label_style = TextDefinition::new("sans-serif", 10);
/// label_style.set_bold(true);
/// label_style.set_color(Some(Color::new("gray").unwrap()));
/// ```
#[derive(Debug, Clone)]
pub struct TextDefinition {
    font_family: String,
    font_size: u16,
    bold: bool,
    color: Option<Color>,
}

impl TextDefinition {
    /// Creates a new text definition with the given family and size.
    pub fn new(font_family: &str, font_size: u16) -> Self {
        Self {
            font_family: font_family.to_string(),
            font_size,
            bold: false,
            color: None,
        }
    }

    /// Returns the font size in user units.
    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    /// Returns the font family name.
    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Returns true if the text renders with a bold weight.
    pub fn bold(&self) -> bool {
        self.bold
    }

    /// Returns the text color, if set. `None` uses the SVG default
    /// (typically black).
    pub fn color(&self) -> Option<&Color> {
        self.color.as_ref()
    }

    /// Sets the font size.
    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    /// Sets the font family.
    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    /// Sets whether the text renders bold.
    pub fn set_bold(&mut self, bold: bool) {
        self.bold = bold;
    }

    /// Sets the text color. `None` falls back to the SVG default.
    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    /// Line height for this definition, used for multi-line spacing and
    /// vertical centering.
    pub fn line_height(&self) -> f32 {
        self.font_size as f32 * LINE_HEIGHT_FACTOR
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self::new("sans-serif", 12)
    }
}

/// A renderable text element combining content with styling.
///
/// # Examples
///
/// ```
/// # use stemma_core::draw::{TextDefinition, Text};
/// let style = TextDefinition::default();
/// let text = Text::new(&style, "Артур");
///
/// assert!(text.measured_width() > 0.0);
/// assert_eq!(text.line_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: &'a str,
}

impl<'a> Text<'a> {
    /// Creates a new text element with the given definition and content.
    pub fn new(definition: &'a TextDefinition, content: &'a str) -> Self {
        Self {
            definition,
            content,
        }
    }

    /// Returns the text content of this element.
    pub fn content(&self) -> &str {
        self.content
    }

    /// Returns the number of lines in the content (at least 1 for
    /// non-empty content).
    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }

    /// Returns the width of the widest shaped line.
    ///
    /// A label containing embedded line breaks is measured per line, and the
    /// widest line wins.
    pub fn measured_width(&self) -> f32 {
        if self.content.is_empty() {
            return 0.0;
        }
        TEXT_MANAGER
            .get_or_init(TextManager::new)
            .measure_width(self.content, self.definition)
    }

    /// The rectangle the shaped text occupies: widest line by stacked line
    /// heights.
    pub fn calculate_size(&self) -> Size {
        if self.content.is_empty() {
            return Size::default();
        }
        Size::new(
            self.measured_width(),
            self.line_count() as f32 * self.definition.line_height(),
        )
    }
}

impl<'a> Drawable for Text<'a> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let line_height = self.definition.line_height();
        let lines: Vec<&str> = self.content.lines().collect();

        // Center the line block vertically on the position: each tspan
        // advances by one line height, so the first baseline starts half a
        // block above the midpoint.
        let total_height = lines.len() as f32 * line_height;
        let y_offset = -(total_height + line_height) / 2.0;

        let mut rendered_text = svg_element::Text::new("")
            .set("x", position.x())
            .set("y", position.y() + y_offset)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", self.definition.font_family())
            .set("font-size", self.definition.font_size());

        if self.definition.bold() {
            rendered_text = rendered_text.set("font-weight", "bold");
        }

        if let Some(color) = self.definition.color() {
            rendered_text = rendered_text
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
        }

        for line in lines {
            let tspan = svg_element::TSpan::new("")
                .set("x", position.x())
                .set("dy", line_height)
                .add(SvgText::new(line));
            rendered_text = rendered_text.add(tspan);
        }

        output.add_to_layer(RenderLayer::Text, Box::new(rendered_text));
        output
    }

    fn size(&self) -> Size {
        self.calculate_size()
    }
}

/// TextManager handles text measurement, maintaining a reusable FontSystem
/// instance to avoid expensive recreation.
struct TextManager {
    font_system: Mutex<FontSystem>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    /// Measures the widest line of `text`, shaped with real font metrics.
    ///
    /// The measurement runs at the definition's font size directly: SVG
    /// `font-size` and glyph advances share the same user-unit space, so no
    /// DPI conversion applies. When the font system cannot shape the text
    /// (no matching font installed), a per-character estimate keeps the
    /// result finite and non-zero.
    fn measure_width(&self, text: &str, text_def: &TextDefinition) -> f32 {
        let mut font_system = self.font_system.lock().expect("failed to lock FontSystem");

        let font_size = text_def.font_size() as f32;
        let metrics = Metrics::new(font_size, text_def.line_height());

        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let family = resolve_family(text_def.font_family());
        let mut attrs = Attrs::new().family(family);
        if text_def.bold() {
            attrs = attrs.weight(Weight::BOLD);
        }

        // Unlimited buffer size lets every line shape at its natural width.
        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_width: f32 = 0.0;
        let mut shaped_any = false;
        for run in buffer.layout_runs() {
            shaped_any = true;
            if let Some(last) = run.glyphs.last() {
                max_width = max_width.max(last.x + last.w);
            }
        }

        if !shaped_any {
            let longest_line = text.lines().map(|l| l.chars().count()).max().unwrap_or(0);
            max_width = longest_line as f32 * font_size * FALLBACK_ADVANCE_FACTOR;
        }

        max_width.max(0.0)
    }
}

/// Maps CSS generic family names onto the font system's generic families;
/// anything else is looked up by name.
fn resolve_family(font_family: &str) -> Family<'_> {
    match font_family.trim().to_ascii_lowercase().as_str() {
        "serif" => Family::Serif,
        "sans-serif" | "system-ui" => Family::SansSerif,
        "monospace" => Family::Monospace,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        _ => Family::Name(font_family),
    }
}

// Create a global instance for use throughout the application.
static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();
