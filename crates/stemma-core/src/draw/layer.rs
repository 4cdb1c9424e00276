//! Layer-based rendering system for SVG output.
//!
//! Drawable components specify which z-order layer their SVG elements belong
//! to; [`LayeredOutput`] collects them and renders one `<g>` group per layer,
//! bottom to top. This is what keeps connector lines under node labels and
//! label patches over crossing lines, regardless of the order in which the
//! caller declared the diagram.

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Defines the rendering layers for SVG output.
///
/// Layers render from bottom to top in declaration order; the `Ord` derive
/// uses that order directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Canvas background fill - renders first
    Background,
    /// Node boxes and their fills
    Content,
    /// Connector lines, union fan-in lines, rails and guides
    Connector,
    /// Union point discs, on top of the lines converging into them
    Union,
    /// Opaque patches behind connector labels
    TextBackground,
    /// Node labels and connector labels - renders last
    Text,
}

impl RenderLayer {
    /// Returns a human-readable name for this layer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Content => "content",
            Self::Connector => "connector",
            Self::Union => "union",
            Self::TextBackground => "text-background",
            Self::Text => "text",
        }
    }
}

/// SVG nodes grouped by rendering layer.
///
/// Nodes are appended in call order and emitted grouped by layer, with the
/// layer order deciding z-order.
///
/// # Example
///
/// ```
/// # use stemma_core::draw::{RenderLayer, LayeredOutput};
/// # use svg::node::element::Rectangle;
/// let mut output = LayeredOutput::new();
/// output.add_to_layer(RenderLayer::Content, Box::new(Rectangle::new()));
///
/// let text = svg::node::element::Text::new("Label");
/// output.add_to_layer(RenderLayer::Text, Box::new(text));
///
/// let svg_nodes = output.render();
/// assert_eq!(svg_nodes.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single node to the specified layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Merges all layers from another `LayeredOutput` into this one.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    /// Returns `true` if there are no nodes in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Renders all layers to SVG groups, consuming the output.
    ///
    /// Each non-empty layer becomes an SVG `<g>` element with a `data-layer`
    /// attribute identifying the layer. The sort is stable, so nodes within
    /// a layer keep their insertion order.
    pub fn render(mut self) -> Vec<SvgNode> {
        if self.is_empty() {
            return Vec::new();
        }

        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result = Vec::new();
        let mut current_layer = self.items[0].0;
        let mut current_group = svg_element::Group::new().set("data-layer", current_layer.name());

        for (layer, node) in self.items {
            if layer != current_layer {
                result.push(Box::new(current_group) as SvgNode);

                current_layer = layer;
                current_group = svg_element::Group::new().set("data-layer", layer.name());
            }

            current_group = current_group.add(node);
        }

        result.push(Box::new(current_group) as SvgNode);

        result
    }
}
