//! Edge styles and straight-line edges.

use std::{fmt, str::FromStr};

use serde::Deserialize;
use svg::node::element as svg_element;

use hyperplot_core::{
    apply_stroke,
    color::Color,
    draw::{LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::Point,
};

use super::hull;

/// How edges are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStyle {
    /// A straight segment per vertex pair.
    Line,
    /// An inflated convex hull around each edge group.
    Circle,
}

impl FromStr for EdgeStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "line" => Ok(Self::Line),
            "circle" => Ok(Self::Circle),
            _ => Err(format!(
                "unknown edge style `{s}`, expected `line` or `circle`"
            )),
        }
    }
}

impl fmt::Display for EdgeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line => f.write_str("line"),
            Self::Circle => f.write_str("circle"),
        }
    }
}

/// Stroke and hull fill of one edge.
#[derive(Debug, Clone)]
pub struct EdgePaint {
    pub stroke: StrokeDefinition,
    pub fill: Color,
}

impl EdgeStyle {
    /// Draws `groups` over the vertex `centers` (in pixels).
    ///
    /// `radii` holds the pixel radius of every vertex and `paints` one paint
    /// per group.
    pub fn render(
        self,
        centers: &[Point],
        radii: &[f32],
        groups: &[Vec<usize>],
        paints: &[EdgePaint],
        directed: bool,
    ) -> LayeredOutput {
        match self {
            Self::Line => render_lines(centers, radii, groups, paints, directed),
            Self::Circle => hull::render_hulls(centers, radii, groups, paints),
        }
    }
}

/// Identifier of the arrow-head marker for edges of `color`.
pub fn arrow_marker_id(color: Color) -> String {
    format!("arrow-{}", color.id_token())
}

/// Arrow-head marker definition matching [`arrow_marker_id`].
pub fn arrow_marker(color: Color) -> svg_element::Marker {
    svg_element::Marker::new()
        .set("id", arrow_marker_id(color))
        .set("viewBox", "0 0 10 10")
        .set("refX", 9)
        .set("refY", 5)
        .set("markerWidth", 6)
        .set("markerHeight", 6)
        .set("orient", "auto")
        .add(
            svg_element::Path::new()
                .set("d", "M 0 0 L 10 5 L 0 10 z")
                .set("fill", &color)
                .set("fill-opacity", color.alpha()),
        )
}

fn render_lines(
    centers: &[Point],
    radii: &[f32],
    groups: &[Vec<usize>],
    paints: &[EdgePaint],
    directed: bool,
) -> LayeredOutput {
    let mut output = LayeredOutput::new();
    let radius = |vertex: usize| radii.get(vertex).copied().unwrap_or_default();

    for (group, paint) in groups.iter().zip(paints) {
        match group.as_slice() {
            [vertex] => push_self_loop(&mut output, centers, *vertex, radius(*vertex), paint),
            [source, target] if source == target => {
                push_self_loop(&mut output, centers, *source, radius(*source), paint)
            }
            members => {
                for (i, &source) in members.iter().enumerate() {
                    for &target in &members[i + 1..] {
                        let stop = if directed { radius(target) } else { 0.0 };
                        push_segment(&mut output, centers, (source, target), stop, paint, directed);
                    }
                }
            }
        }
    }

    output
}

/// Pushes a segment that ends `stop` pixels short of the target center.
fn push_segment(
    output: &mut LayeredOutput,
    centers: &[Point],
    (source, target): (usize, usize),
    stop: f32,
    paint: &EdgePaint,
    directed: bool,
) {
    let (Some(&start), Some(&end)) = (centers.get(source), centers.get(target)) else {
        return;
    };

    let direction = end.sub_point(start);
    let length = direction.hypot();
    let end = if stop > 0.0 && length > stop {
        start.add_point(direction.scale((length - stop) / length))
    } else {
        end
    };

    let mut line = svg_element::Line::new()
        .set("x1", start.x())
        .set("y1", start.y())
        .set("x2", end.x())
        .set("y2", end.y());
    if directed {
        line = line.set(
            "marker-end",
            format!("url(#{})", arrow_marker_id(paint.stroke.color())),
        );
    }
    let line = apply_stroke!(line, &paint.stroke);

    output.add_to_layer(RenderLayer::Edge, Box::new(line));
}

fn push_self_loop(
    output: &mut LayeredOutput,
    centers: &[Point],
    vertex: usize,
    vertex_radius: f32,
    paint: &EdgePaint,
) {
    let Some(&center) = centers.get(vertex) else {
        return;
    };

    let loop_radius = vertex_radius * 0.8;
    let circle = svg_element::Circle::new()
        .set("cx", center.x())
        .set("cy", center.y() - vertex_radius - loop_radius * 0.5)
        .set("r", loop_radius)
        .set("fill", "none");
    let circle = apply_stroke!(circle, &paint.stroke);

    output.add_to_layer(RenderLayer::Edge, Box::new(circle));
}
