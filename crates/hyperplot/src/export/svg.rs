//! SVG rendering of laid-out structures.
//!
//! A [`Scene`] holds the layout coordinates and the edge groups of one
//! structure; [`Svg`] turns it into an SVG document using the configured
//! style, refined per vertex and per edge by the scene's overrides.

mod canvas;
mod edge;
mod hull;
mod overrides;
mod vertex;

pub use canvas::Canvas;
pub use edge::{EdgePaint, EdgeStyle};
pub use hull::{convex_hull, hull_path_data};
pub use overrides::{EdgeOverrides, VertexOverrides};
pub use vertex::{LabelFont, VertexPaint};

use indexmap::IndexMap;
use log::{debug, info};
use svg::{Document, node::element::Definitions};

use hyperplot_core::{
    color::Color,
    draw::{LayeredOutput, RenderLayer, StrokeDefinition},
    geometry::{Point, Size},
};

use super::{Error, StructureKind};
use crate::config::StyleConfig;

/// Label font size relative to the vertex radius, when not configured.
const FONT_SIZE_FACTOR: f32 = 0.9;

/// Everything needed to draw one structure.
#[derive(Debug, Clone)]
pub struct Scene {
    kind: StructureKind,
    edge_style: EdgeStyle,
    positions: Vec<Point>,
    groups: Vec<Vec<usize>>,
    num_u: usize,
    labels: Option<Vec<String>>,
    u_vertices: VertexOverrides,
    vertices: VertexOverrides,
    edges: EdgeOverrides,
}

impl Scene {
    /// Creates a scene with the kind's default edge style.
    ///
    /// `positions` are layout coordinates in the unit square; `groups`
    /// index into them.
    pub fn new(kind: StructureKind, positions: Vec<Point>, groups: Vec<Vec<usize>>) -> Self {
        Self {
            kind,
            edge_style: kind.default_edge_style(),
            positions,
            groups,
            num_u: 0,
            labels: None,
            u_vertices: VertexOverrides::default(),
            vertices: VertexOverrides::default(),
            edges: EdgeOverrides::default(),
        }
    }

    pub fn with_edge_style(mut self, edge_style: EdgeStyle) -> Self {
        self.edge_style = edge_style;
        self
    }

    /// Marks the first `num_u` vertices as the `u` class of a bipartite graph.
    pub fn with_u_vertices(mut self, num_u: usize) -> Self {
        self.num_u = num_u;
        self
    }

    pub fn with_labels(mut self, labels: Option<Vec<String>>) -> Self {
        self.labels = labels;
        self
    }

    /// Styles the `u` vertices, indexed from the first vertex.
    pub fn with_u_overrides(mut self, overrides: VertexOverrides) -> Self {
        self.u_vertices = overrides;
        self
    }

    /// Styles the vertices after the `u` class, indexed from the first of them.
    pub fn with_vertex_overrides(mut self, overrides: VertexOverrides) -> Self {
        self.vertices = overrides;
        self
    }

    pub fn with_edge_overrides(mut self, overrides: EdgeOverrides) -> Self {
        self.edges = overrides;
        self
    }

    /// Overrides and class-relative index of `vertex`.
    fn vertex_class(&self, vertex: usize) -> (&VertexOverrides, usize) {
        if vertex < self.num_u {
            (&self.u_vertices, vertex)
        } else {
            (&self.vertices, vertex - self.num_u)
        }
    }
}

/// Checks that a structure can be drawn before any layout work is done.
///
/// # Errors
///
/// - [`Error::UnsupportedEdgeStyle`] if `kind` cannot be drawn with `style`.
/// - [`Error::EmptyStructure`] if the structure has no edges.
/// - [`Error::LabelCount`] if labels are given but their count differs from `num_v`.
/// - [`Error::ElementCount`] if an override list does not have one entry per
///   vertex or per edge.
/// - [`Error::InvalidSize`] or [`Error::Style`] for an unusable override.
pub fn check_drawable(
    kind: StructureKind,
    style: EdgeStyle,
    num_v: usize,
    num_e: usize,
    labels: Option<&[String]>,
    vertices: &VertexOverrides,
    edges: &EdgeOverrides,
) -> Result<(), Error> {
    if !kind.supports(style) {
        return Err(Error::UnsupportedEdgeStyle { kind, style });
    }
    if num_e == 0 {
        return Err(Error::EmptyStructure { kind });
    }
    if let Some(labels) = labels {
        if labels.len() != num_v {
            return Err(Error::LabelCount {
                expected: num_v,
                actual: labels.len(),
            });
        }
    }
    vertices.check(num_v)?;
    edges.check(num_e)
}

/// Builder for [`Svg`] renderers.
#[derive(Default)]
pub struct SvgBuilder<'a> {
    style: Option<&'a StyleConfig>,
}

impl<'a> SvgBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: &'a StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    /// Resolves the style into a renderer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Style`] if a configured color cannot be parsed.
    pub fn build(self) -> Result<Svg, Error> {
        let default_style = StyleConfig::default();
        let style = self.style.unwrap_or(&default_style);

        let mut edge_stroke = StrokeDefinition::new(
            style.edge_color().map_err(Error::Style)?,
            style.edge_line_width(),
        );
        edge_stroke.set_style(style.edge_line_style());

        Ok(Svg {
            canvas: Canvas::new(Size::new(style.width(), style.height())),
            background: style.background_color().map_err(Error::Style)?,
            vertex_fill: style.vertex_color().map_err(Error::Style)?,
            u_vertex_fill: style.u_vertex_color().map_err(Error::Style)?,
            vertex_stroke: StrokeDefinition::new(
                style.vertex_line_color().map_err(Error::Style)?,
                style.vertex_line_width(),
            ),
            edge_stroke,
            edge_fill: style.edge_fill_color().map_err(Error::Style)?,
            label_color: style.label_color().map_err(Error::Style)?,
            font_family: style.font_family().to_string(),
            vertex_radius: style.vertex_radius(),
            font_size: style.font_size(),
        })
    }
}

/// SVG renderer with a resolved style.
#[derive(Debug, Clone)]
pub struct Svg {
    canvas: Canvas,
    background: Option<Color>,
    vertex_fill: Color,
    u_vertex_fill: Color,
    vertex_stroke: StrokeDefinition,
    edge_stroke: StrokeDefinition,
    edge_fill: Color,
    label_color: Color,
    font_family: String,
    vertex_radius: Option<f32>,
    font_size: Option<f32>,
}

impl Svg {
    /// Renders a scene into an SVG document string.
    ///
    /// # Errors
    ///
    /// Fails with the same errors as [`check_drawable`].
    pub fn render(&self, scene: &Scene) -> Result<String, Error> {
        let num_v = scene.positions.len();
        let num_e = scene.groups.len();
        let num_u = scene.num_u.min(num_v);
        check_drawable(
            scene.kind,
            scene.edge_style,
            num_v,
            num_e,
            scene.labels.as_deref(),
            &VertexOverrides::default(),
            &scene.edges,
        )?;
        scene.u_vertices.check(num_u)?;
        scene.vertices.check(num_v - num_u)?;

        let radius = self
            .vertex_radius
            .unwrap_or_else(|| self.canvas.default_vertex_radius(num_v));
        let directed = scene.kind == StructureKind::DiGraph;
        debug!(
            kind:% = scene.kind,
            edge_style:% = scene.edge_style,
            num_v,
            num_e,
            radius;
            "Rendering scene"
        );

        let centers: Vec<Point> = scene
            .positions
            .iter()
            .map(|&position| self.canvas.to_pixel(position))
            .collect();

        let mut output = LayeredOutput::new();
        if let Some(background) = &self.background {
            output.add_to_layer(RenderLayer::Background, self.canvas.background(background));
        }

        let vertex_paints = self.vertex_paints(scene, radius)?;
        let radii: Vec<f32> = vertex_paints.iter().map(|paint| paint.radius).collect();
        let edge_paints = self.edge_paints(&scene.edges, num_e)?;

        output.merge(scene.edge_style.render(
            &centers,
            &radii,
            &scene.groups,
            &edge_paints,
            directed,
        ));
        output.merge(vertex::render_vertices(&centers, &vertex_paints));

        if let Some(labels) = &scene.labels {
            let font = LabelFont {
                size: self.font_size.unwrap_or(radius * FONT_SIZE_FACTOR),
                family: self.font_family.clone(),
                color: self.label_color,
            };
            let scales: Vec<f32> = (0..num_v)
                .map(|vertex| scene.vertex_class(vertex).0.font_scale())
                .collect();
            output.merge(vertex::render_labels(&centers, labels, &scales, &font));
        }

        let size = self.canvas.size();
        let mut document = Document::new()
            .set("width", size.width())
            .set("height", size.height())
            .set("viewBox", format!("0 0 {} {}", size.width(), size.height()));

        if directed {
            let markers: IndexMap<String, Color> = edge_paints
                .iter()
                .map(|paint| {
                    let color = paint.stroke.color();
                    (edge::arrow_marker_id(color), color)
                })
                .collect();
            let definitions = markers
                .into_values()
                .fold(Definitions::new(), |definitions, color| {
                    definitions.add(edge::arrow_marker(color))
                });
            document = document.add(definitions);
        }

        for node in output.render() {
            document = document.add(node);
        }

        info!(num_v, num_e; "SVG rendered");
        Ok(document.to_string())
    }

    /// Fill, radius and border of every vertex: the class default, replaced
    /// by any override.
    fn vertex_paints(&self, scene: &Scene, radius: f32) -> Result<Vec<VertexPaint>, Error> {
        let u_colors = scene.u_vertices.colors()?;
        let colors = scene.vertices.colors()?;

        let paints = (0..scene.positions.len())
            .map(|vertex| {
                let (overrides, idx) = scene.vertex_class(vertex);
                let (class_colors, class_fill) = if vertex < scene.num_u {
                    (&u_colors, self.u_vertex_fill)
                } else {
                    (&colors, self.vertex_fill)
                };
                let fill = class_colors
                    .as_ref()
                    .and_then(|colors| colors.get(idx).copied())
                    .unwrap_or(class_fill);
                let stroke = match overrides.line_width(idx) {
                    Some(width) => restroke(&self.vertex_stroke, width),
                    None => self.vertex_stroke.clone(),
                };

                VertexPaint {
                    fill,
                    radius: radius * overrides.size(idx),
                    stroke,
                }
            })
            .collect();
        Ok(paints)
    }

    /// Stroke and fill of every edge: the configured edge style, replaced by
    /// any override.
    fn edge_paints(&self, overrides: &EdgeOverrides, num_e: usize) -> Result<Vec<EdgePaint>, Error> {
        let colors = overrides.colors()?;
        let fill_colors = overrides.fill_colors()?;
        let pick = |colors: &Option<Vec<Color>>, edge: usize, default: Color| {
            colors
                .as_ref()
                .and_then(|colors| colors.get(edge).copied())
                .unwrap_or(default)
        };

        let paints = (0..num_e)
            .map(|edge| {
                let width = overrides
                    .line_width(edge)
                    .unwrap_or_else(|| self.edge_stroke.width());
                let stroke = StrokeDefinition::new(pick(&colors, edge, self.edge_stroke.color()), width)
                    .with_style(self.edge_stroke.style().clone());
                EdgePaint {
                    stroke,
                    fill: pick(&fill_colors, edge, self.edge_fill),
                }
            })
            .collect();
        Ok(paints)
    }
}

/// `stroke` with its width replaced.
fn restroke(stroke: &StrokeDefinition, width: f32) -> StrokeDefinition {
    StrokeDefinition::new(stroke.color(), width).with_style(stroke.style().clone())
}
