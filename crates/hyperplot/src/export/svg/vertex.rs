//! Vertex markers and labels.

use svg::node::element as svg_element;

use hyperplot_core::{
    apply_stroke,
    color::Color,
    draw::{LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::Point,
};

/// Label font of a drawing. `size` is the base size before per-class scaling.
#[derive(Debug, Clone)]
pub struct LabelFont {
    pub size: f32,
    pub family: String,
    pub color: Color,
}

/// Resolved look of one vertex.
#[derive(Debug, Clone)]
pub struct VertexPaint {
    pub fill: Color,
    pub radius: f32,
    pub stroke: StrokeDefinition,
}

/// Draws one vertex circle per center with the matching paint.
pub fn render_vertices(centers: &[Point], paints: &[VertexPaint]) -> LayeredOutput {
    let mut output = LayeredOutput::new();

    for (center, paint) in centers.iter().zip(paints) {
        let circle = svg_element::Circle::new()
            .set("cx", center.x())
            .set("cy", center.y())
            .set("r", paint.radius)
            .set("fill", &paint.fill)
            .set("fill-opacity", paint.fill.alpha());
        let circle = apply_stroke!(circle, &paint.stroke);

        output.add_to_layer(RenderLayer::Vertex, Box::new(circle));
    }

    output
}

/// Draws each label centered on its vertex, at `font.size` times the
/// vertex's entry in `scales`. Empty labels are skipped.
pub fn render_labels(
    centers: &[Point],
    labels: &[String],
    scales: &[f32],
    font: &LabelFont,
) -> LayeredOutput {
    let mut output = LayeredOutput::new();

    for ((center, label), scale) in centers.iter().zip(labels).zip(scales) {
        if label.is_empty() {
            continue;
        }

        let text = svg_element::Text::new(label.as_str())
            .set("x", center.x())
            .set("y", center.y())
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", font.family.as_str())
            .set("font-size", font.size * scale)
            .set("fill", &font.color);

        output.add_to_layer(RenderLayer::Label, Box::new(text));
    }

    output
}
