//! Example: building and rendering a complete family-tree diagram.
//!
//! Reproduces a real (and fairly tangled) relationship chart: sibling rows,
//! chained unions, and curved social links with per-edge bend factors.

use stemma::{Diagram, DiagramRenderer, VerticalEdge, color::Color, draw::StrokeStyle};

const MIYAGI_FILL: &str = "#fff5e6";
const SPECIAL_FILL: &str = "#f5f5f5";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let miyagi = Color::new(MIYAGI_FILL)?;
    let special = Color::new(SPECIAL_FILL)?;
    let black = Color::default();
    let red = Color::new("red")?;
    let blue = Color::new("blue")?;
    let green = Color::new("green")?;
    let purple = Color::new("purple")?;
    let darkgreen = Color::new("darkgreen")?;

    let mut diagram = Diagram::new();

    // Sibling row along the bottom.
    let y_brothers = 1150.0;
    let artur = diagram.add_node(200.0, y_brothers, "Артур");
    let sasha = diagram.add_node(350.0, y_brothers, "Саша");
    let oleksiy = diagram.add_node(500.0, y_brothers, "Олексій");
    let artem = diagram.add_node(650.0, y_brothers, "Артем");
    let ivan_r = diagram.add_node(800.0, y_brothers, "Іван Рижий");
    let vasya = diagram.add_node(950.0, y_brothers, "Вася");
    let mark = diagram.add_node(1100.0, y_brothers, "Марк");

    let lilya = diagram.add_node(275.0, 1000.0, "Ліля");
    let dasha = diagram.add_node(575.0, 1000.0, "Даша");
    let vlad = diagram.add_node(425.0, 900.0, "Влад");

    // Upper-left group.
    let vadim = diagram.add_node(300.0, 100.0, "Вадим");
    let vitya = diagram.add_node_with_fill(600.0, 100.0, "Вітя (Міягі)", miyagi);
    let badabum = diagram.add_node_with_fill(450.0, 250.0, "Бадабум", miyagi);
    let garasevych = diagram.add_node(300.0, 400.0, "Гарасевич");
    let ivan_u = diagram.add_node(450.0, 550.0, "Іван Ураган");
    let sasha_b = diagram.add_node(300.0, 700.0, "Саша Бутрин");

    // Upper-right group.
    let note_arsen = diagram.add_note(1000.0, 100.0, "Батько втік\nв Північну Європу");
    let arsen = diagram.add_node(1000.0, 250.0, "Арсен");
    let mirazh = diagram.add_note_with_fill(900.0, 400.0, "Міраж", special);
    let phoenix = diagram.add_node(1200.0, 400.0, "Фенікс");
    let andriy = diagram.add_node(1050.0, 550.0, "Андрій");
    let ivan_ivan = diagram.add_node(800.0, 550.0, "Іван Іван");

    // Curved social links; the factor controls the bend side and strength.
    diagram.connect_curved(vadim, vitya, "мама", red, StrokeStyle::Solid, 0.1);
    diagram.connect_curved(dasha, vitya, "названий батя", blue, StrokeStyle::Dashed, 1.5);
    diagram.connect_curved(lilya, vitya, "тьотя", green, StrokeStyle::Dashed, 1.2);

    diagram.connect_curved(lilya, artur, "фембой", purple, StrokeStyle::Dotted, -0.3);
    diagram.connect_curved(lilya, sasha, "фембой", purple, StrokeStyle::Dotted, -0.2);
    diagram.connect_curved(lilya, oleksiy, "фембой", purple, StrokeStyle::Dotted, -0.3);

    diagram.connect_curved(mark, andriy, "чоловіки", darkgreen, StrokeStyle::Solid, -0.8);

    // Family lines: unions converge, one child line leaves.
    let union_dl = diagram.add_union(425.0, 950.0, &[dasha, lilya], black);
    diagram.connect_straight(union_dl, vlad, "син", black, StrokeStyle::Solid);

    // The sibling rail, with Dasha attached where Artem meets it.
    diagram.add_rail(
        1120.0,
        &[artur, sasha, oleksiy, artem, ivan_r, vasya, mark],
        Some((dasha, artem)),
    );

    let union_vv = diagram.add_union(450.0, 150.0, &[vitya, vadim], black);
    diagram.connect_straight(union_vv, badabum, "син", black, StrokeStyle::Solid);

    let union_bv = diagram.add_union(350.0, 300.0, &[badabum, vadim], red);
    diagram.connect_straight(union_bv, garasevych, "син", red, StrokeStyle::Solid);

    let union_gv = diagram.add_union(350.0, 450.0, &[garasevych, vadim], red);
    diagram.connect_straight(union_gv, ivan_u, "син", red, StrokeStyle::Solid);

    let union_iv = diagram.add_union(350.0, 600.0, &[ivan_u, vadim], red);
    diagram.connect_straight(union_iv, sasha_b, "син", red, StrokeStyle::Solid);

    let union_arsen = diagram.add_union(700.0, 200.0, &[badabum, note_arsen], black);
    diagram.connect_straight(union_arsen, arsen, "син", black, StrokeStyle::Solid);

    let union_andriy = diagram.add_union(650.0, 400.0, &[badabum, mirazh], black);
    diagram.connect_straight(
        union_andriy,
        andriy,
        "син (від міража)",
        black,
        StrokeStyle::Dashed,
    );

    let union_baf = diagram.add_union(800.0, 400.0, &[badabum, andriy, phoenix], black);
    diagram.connect_straight(union_baf, ivan_ivan, "син", black, StrokeStyle::Solid);

    // Andriy and Phoenix are siblings; mark it with a plain guide line.
    diagram.add_guide(andriy, VerticalEdge::Top, phoenix, VerticalEdge::Bottom);

    println!(
        "Rendering {} nodes, {} unions, {} connections...",
        diagram.node_count(),
        diagram.union_count(),
        diagram.connection_count()
    );

    let renderer = DiagramRenderer::default();
    let output_path = "family_tree.svg";
    renderer.render_to_file(&diagram, output_path)?;
    println!("SVG written to: {output_path}");

    Ok(())
}
