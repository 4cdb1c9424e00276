//! Integration tests for the DiagramRenderer API.
//!
//! These exercise the public surface end to end: building a diagram through
//! the handle-based mutators and rendering it to SVG.

use float_cmp::assert_approx_eq;

use stemma::{
    Diagram, DiagramRenderer, StemmaError, VerticalEdge,
    color::Color,
    config::StyleConfig,
    draw::{NodeShape, StrokeStyle},
    geometry::Point,
};

#[test]
fn test_renderer_api_exists() {
    let _renderer = DiagramRenderer::default();
    let _with_config = DiagramRenderer::new(StyleConfig::default());
}

#[test]
fn test_render_empty_diagram_is_valid_svg() {
    let svg = DiagramRenderer::default()
        .render_svg(&Diagram::new())
        .expect("empty diagram renders");
    assert!(svg.contains("<svg"));
    assert!(svg.contains("</svg>"));
}

#[test]
fn test_render_single_node() {
    let mut diagram = Diagram::new();
    diagram.add_node(200.0, 1150.0, "Артур");

    let svg = DiagramRenderer::default().render_svg(&diagram).unwrap();
    assert!(svg.contains("Артур"));
    assert!(svg.contains("data-layer=\"content\""));
    assert!(svg.contains("data-layer=\"text\""));
}

#[test]
fn test_default_node_box_height() {
    // Font size 12 plus 10 vertical padding on each side.
    let styles = StyleConfig::default().resolve().unwrap();
    let definition = styles.node(NodeShape::Standard);
    let node = stemma::draw::Node::new(definition, "Артур");
    let placed = node.place(Point::new(200.0, 1150.0));

    assert_approx_eq!(f32, placed.height(), 32.0);

    let label_width =
        stemma::draw::Text::new(definition.text(), "Артур").measured_width();
    assert_approx_eq!(f32, placed.width(), label_width + 40.0);
}

#[test]
fn test_union_child_anchor_lands_on_near_edge() {
    // A child node directly above the union point: dx = 0 selects the
    // vertical branch, and the line coming from below must meet the bottom
    // edge of the child's box.
    let styles = StyleConfig::default().resolve().unwrap();
    let definition = styles.node(NodeShape::Standard);
    let child = stemma::draw::Node::new(definition, "Влад").place(Point::new(425.0, 900.0));

    let anchor = child.border_anchor(Point::new(425.0, 950.0));
    assert_approx_eq!(f32, anchor.x(), 425.0);
    assert_approx_eq!(f32, anchor.y(), 916.0);
}

#[test]
fn test_render_union_and_child() {
    let mut diagram = Diagram::new();
    let lilya = diagram.add_node(275.0, 1000.0, "Ліля");
    let dasha = diagram.add_node(575.0, 1000.0, "Даша");
    let vlad = diagram.add_node(425.0, 900.0, "Влад");

    let union = diagram.add_union(425.0, 950.0, &[dasha, lilya], Color::default());
    diagram.connect_straight(union, vlad, "син", Color::default(), StrokeStyle::Solid);

    let svg = DiagramRenderer::default().render_svg(&diagram).unwrap();
    // The union disc and its fan-in lines.
    assert!(svg.contains("<circle"));
    assert!(svg.contains("data-layer=\"union\""));
    assert!(svg.contains("data-layer=\"connector\""));
    // The child label and its patch.
    assert!(svg.contains("син"));
    assert!(svg.contains("data-layer=\"text-background\""));
}

#[test]
fn test_render_curved_connection_styles() {
    let mut diagram = Diagram::new();
    let lilya = diagram.add_node(275.0, 1000.0, "Ліля");
    let artur = diagram.add_node(200.0, 1150.0, "Артур");
    diagram.connect_curved(
        lilya,
        artur,
        "фембой",
        Color::new("purple").unwrap(),
        StrokeStyle::Dotted,
        -0.3,
    );

    let svg = DiagramRenderer::default().render_svg(&diagram).unwrap();
    assert!(svg.contains("фембой"));
    // Quadratic Bézier path and the dotted dash pattern.
    assert!(svg.contains("Q"));
    assert!(svg.contains("stroke-dasharray=\"2,2\""));
}

#[test]
fn test_render_note_node_dashed_border() {
    let mut diagram = Diagram::new();
    diagram.add_note(1000.0, 100.0, "Батько втік\nв Північну Європу");

    let svg = DiagramRenderer::default().render_svg(&diagram).unwrap();
    assert!(svg.contains("stroke-dasharray=\"3,3\""));
    // Multi-line labels stack as tspans.
    assert!(svg.contains("Батько втік"));
    assert!(svg.contains("в Північну Європу"));
    assert!(svg.matches("<tspan").count() >= 2);
}

#[test]
fn test_render_rail_and_guide() {
    let mut diagram = Diagram::new();
    let artur = diagram.add_node(200.0, 1150.0, "Артур");
    let mark = diagram.add_node(1100.0, 1150.0, "Марк");
    let dasha = diagram.add_node(575.0, 1000.0, "Даша");
    diagram.add_rail(1120.0, &[artur, mark], Some((dasha, mark)));
    diagram.add_guide(dasha, VerticalEdge::Bottom, artur, VerticalEdge::Top);

    let svg = DiagramRenderer::default().render_svg(&diagram).unwrap();
    // Rail span + two ticks + drop + guide, all thin gray lines.
    assert!(svg.matches("<line").count() >= 5);
}

#[test]
fn test_dangling_handle_is_an_error() {
    let mut other = Diagram::new();
    other.add_node(0.0, 0.0, "a");
    let foreign = other.add_node(1.0, 1.0, "b");

    let mut diagram = Diagram::new();
    let local = diagram.add_node(0.0, 0.0, "local");
    diagram.connect_curved(local, foreign, "", Color::default(), StrokeStyle::Solid, 0.0);

    let err = DiagramRenderer::default().render_svg(&diagram).unwrap_err();
    assert!(matches!(err, StemmaError::DanglingReference { .. }));
}

#[test]
fn test_renderer_reusability() {
    let renderer = DiagramRenderer::default();

    let mut first = Diagram::new();
    first.add_node(0.0, 0.0, "перший");
    let mut second = Diagram::new();
    second.add_node(0.0, 0.0, "другий");

    let svg1 = renderer.render_svg(&first).unwrap();
    let svg2 = renderer.render_svg(&second).unwrap();
    assert!(svg1.contains("перший"));
    assert!(svg2.contains("другий"));
}

#[test]
fn test_render_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tree.svg");

    let mut diagram = Diagram::new();
    diagram.add_node(100.0, 100.0, "Вадим");

    DiagramRenderer::default()
        .render_to_file(&diagram, &path)
        .unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("<svg"));
    assert!(written.contains("Вадим"));
}
