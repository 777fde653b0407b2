//! Hyperplot - force-directed drawings of graphs, bipartite graphs and hypergraphs.
//!
//! Structures are laid out by a force simulation inside the unit square and
//! rendered to SVG. Pairwise graphs are drawn with straight edges,
//! hypergraphs with inflated convex hulls around each hyperedge.

pub mod config;
pub mod export;
pub mod layout;
pub mod structure;

mod error;

pub use hyperplot_core::{color, draw, geometry};

pub use error::HyperplotError;
pub use export::{StructureKind, svg::EdgeStyle};

use log::{debug, info};

use config::AppConfig;
use export::svg::{self as svg_export, EdgeOverrides, Scene, SvgBuilder, VertexOverrides};
use geometry::Point;
use layout::{BipartiteStrengths, Strengths};
use structure::{BiGraph, DiGraph, Graph, Hypergraph, Incidence};

/// Per-drawing options of graphs, digraphs and hypergraphs.
///
/// Per-element lists hold one entry per vertex or per edge and override the
/// configured style for that element only.
#[derive(Debug, Clone, Default)]
pub struct DrawOptions {
    edge_style: Option<EdgeStyle>,
    labels: Option<Vec<String>>,
    strengths: Strengths,
    vertices: VertexOverrides,
    edges: EdgeOverrides,
}

impl DrawOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the structure's default edge style.
    pub fn with_edge_style(mut self, edge_style: EdgeStyle) -> Self {
        self.edge_style = Some(edge_style);
        self
    }

    /// Sets one label per vertex.
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn with_strengths(mut self, strengths: Strengths) -> Self {
        self.strengths = strengths;
        self
    }

    /// Sets one CSS fill color per vertex.
    pub fn with_vertex_colors(mut self, colors: Vec<String>) -> Self {
        self.vertices = self.vertices.with_colors(colors);
        self
    }

    /// Sets one radius factor per vertex; `1.0` is the configured radius.
    pub fn with_vertex_sizes(mut self, sizes: Vec<f32>) -> Self {
        self.vertices = self.vertices.with_sizes(sizes);
        self
    }

    pub fn with_vertex_line_widths(mut self, line_widths: Vec<f32>) -> Self {
        self.vertices = self.vertices.with_line_widths(line_widths);
        self
    }

    /// Scales the label font size of every vertex.
    pub fn with_font_scale(mut self, font_scale: f32) -> Self {
        self.vertices = self.vertices.with_font_scale(font_scale);
        self
    }

    /// Sets one CSS stroke color per edge.
    pub fn with_edge_colors(mut self, colors: Vec<String>) -> Self {
        self.edges = self.edges.with_colors(colors);
        self
    }

    /// Sets one CSS fill color per edge, used by hull edges.
    pub fn with_edge_fill_colors(mut self, fill_colors: Vec<String>) -> Self {
        self.edges = self.edges.with_fill_colors(fill_colors);
        self
    }

    pub fn with_edge_line_widths(mut self, line_widths: Vec<f32>) -> Self {
        self.edges = self.edges.with_line_widths(line_widths);
        self
    }
}

/// Per-drawing options of bipartite graphs.
///
/// Labels and vertex overrides are given per side, indexed from the side's
/// first vertex; a side without labels is drawn unlabeled.
#[derive(Debug, Clone, Default)]
pub struct BipartiteDrawOptions {
    edge_style: Option<EdgeStyle>,
    u_labels: Option<Vec<String>>,
    v_labels: Option<Vec<String>>,
    strengths: BipartiteStrengths,
    u_vertices: VertexOverrides,
    v_vertices: VertexOverrides,
    edges: EdgeOverrides,
}

impl BipartiteDrawOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_edge_style(mut self, edge_style: EdgeStyle) -> Self {
        self.edge_style = Some(edge_style);
        self
    }

    pub fn with_u_labels(mut self, labels: Vec<String>) -> Self {
        self.u_labels = Some(labels);
        self
    }

    pub fn with_v_labels(mut self, labels: Vec<String>) -> Self {
        self.v_labels = Some(labels);
        self
    }

    pub fn with_strengths(mut self, strengths: BipartiteStrengths) -> Self {
        self.strengths = strengths;
        self
    }

    pub fn with_u_colors(mut self, colors: Vec<String>) -> Self {
        self.u_vertices = self.u_vertices.with_colors(colors);
        self
    }

    /// Sets one radius factor per `u` vertex.
    pub fn with_u_sizes(mut self, sizes: Vec<f32>) -> Self {
        self.u_vertices = self.u_vertices.with_sizes(sizes);
        self
    }

    pub fn with_u_line_widths(mut self, line_widths: Vec<f32>) -> Self {
        self.u_vertices = self.u_vertices.with_line_widths(line_widths);
        self
    }

    pub fn with_u_font_scale(mut self, font_scale: f32) -> Self {
        self.u_vertices = self.u_vertices.with_font_scale(font_scale);
        self
    }

    pub fn with_v_colors(mut self, colors: Vec<String>) -> Self {
        self.v_vertices = self.v_vertices.with_colors(colors);
        self
    }

    /// Sets one radius factor per `v` vertex.
    pub fn with_v_sizes(mut self, sizes: Vec<f32>) -> Self {
        self.v_vertices = self.v_vertices.with_sizes(sizes);
        self
    }

    pub fn with_v_line_widths(mut self, line_widths: Vec<f32>) -> Self {
        self.v_vertices = self.v_vertices.with_line_widths(line_widths);
        self
    }

    pub fn with_v_font_scale(mut self, font_scale: f32) -> Self {
        self.v_vertices = self.v_vertices.with_font_scale(font_scale);
        self
    }

    pub fn with_edge_colors(mut self, colors: Vec<String>) -> Self {
        self.edges = self.edges.with_colors(colors);
        self
    }

    pub fn with_edge_line_widths(mut self, line_widths: Vec<f32>) -> Self {
        self.edges = self.edges.with_line_widths(line_widths);
        self
    }
}

/// Builder for laying out and drawing structures.
///
/// # Examples
///
/// ```rust
/// use hyperplot::{PlotBuilder, DrawOptions, config::AppConfig, structure::Hypergraph};
///
/// let mut config = AppConfig::default();
/// config.layout_mut().set_seed(Some(42));
/// let builder = PlotBuilder::new(config);
///
/// let hypergraph = Hypergraph::new(5, &[vec![0, 1, 2], vec![2, 3], vec![3, 4]])
///     .expect("valid hypergraph");
/// let svg = builder
///     .draw_hypergraph(&hypergraph, &DrawOptions::new())
///     .expect("Failed to draw");
///
/// assert!(svg.contains("<path"));
/// ```
#[derive(Debug, Default)]
pub struct PlotBuilder {
    config: AppConfig,
}

impl PlotBuilder {
    /// Create a new plot builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Lay out any structure in the unit square.
    ///
    /// # Errors
    ///
    /// Returns `HyperplotError::Layout` for invalid strengths or an empty
    /// vertex set.
    pub fn layout(
        &self,
        structure: &impl Incidence,
        strengths: &Strengths,
    ) -> Result<Vec<Point>, HyperplotError> {
        let groups = structure.edge_groups();
        Ok(layout::force_layout(
            structure.num_v(),
            &groups,
            strengths,
            self.config.layout(),
        )?)
    }

    /// Lay out a bipartite graph, returning the `u` and the `v` coordinates.
    pub fn layout_bigraph(
        &self,
        bigraph: &BiGraph,
        strengths: &BipartiteStrengths,
    ) -> Result<(Vec<Point>, Vec<Point>), HyperplotError> {
        Ok(layout::bipartite_force_layout(
            bigraph.num_u(),
            bigraph.num_v(),
            bigraph.edges(),
            strengths,
            self.config.layout(),
        )?)
    }

    /// Draw an undirected graph. Supports `Line` (default) and `Circle` edges.
    ///
    /// # Errors
    ///
    /// Returns `HyperplotError::Export` for an unsupported edge style, a graph
    /// without edges or a label count mismatch, and `HyperplotError::Layout`
    /// for invalid strengths.
    pub fn draw_graph(&self, graph: &Graph, options: &DrawOptions) -> Result<String, HyperplotError> {
        let strengths = options.strengths.without_push_edge();
        self.draw(StructureKind::Graph, graph, &strengths, options)
    }

    /// Draw a directed graph with arrow heads. Supports `Line` edges only.
    pub fn draw_digraph(
        &self,
        digraph: &DiGraph,
        options: &DrawOptions,
    ) -> Result<String, HyperplotError> {
        let strengths = options.strengths.without_push_edge();
        self.draw(StructureKind::DiGraph, digraph, &strengths, options)
    }

    /// Draw a hypergraph with one hull per hyperedge. Supports `Circle` edges only.
    ///
    /// Unlike the pairwise drawings, hyperedge centroid repulsion stays
    /// enabled if the strengths set it.
    pub fn draw_hypergraph(
        &self,
        hypergraph: &Hypergraph,
        options: &DrawOptions,
    ) -> Result<String, HyperplotError> {
        self.draw(StructureKind::Hypergraph, hypergraph, &options.strengths, options)
    }

    /// Draw a bipartite graph, `u` vertices on the left and `v` vertices on
    /// the right. Supports `Line` edges only.
    pub fn draw_bigraph(
        &self,
        bigraph: &BiGraph,
        options: &BipartiteDrawOptions,
    ) -> Result<String, HyperplotError> {
        let kind = StructureKind::BiGraph;
        let style = options
            .edge_style
            .unwrap_or_else(|| kind.default_edge_style());
        let (num_u, num_v) = (bigraph.num_u(), bigraph.num_v());

        svg_export::check_drawable(
            kind,
            style,
            num_u,
            bigraph.num_e(),
            options.u_labels.as_deref(),
            &options.u_vertices,
            &options.edges,
        )?;
        svg_export::check_drawable(
            kind,
            style,
            num_v,
            bigraph.num_e(),
            options.v_labels.as_deref(),
            &options.v_vertices,
            &options.edges,
        )?;
        let labels = join_side_labels(
            options.u_labels.as_deref(),
            options.v_labels.as_deref(),
            num_u,
            num_v,
        );

        let renderer = SvgBuilder::new()
            .with_style(self.config.style())
            .build()?;

        info!(kind:% = kind, num_u, num_v, num_e = bigraph.num_e(); "Drawing structure");
        let (mut positions, v_positions) = self.layout_bigraph(bigraph, &options.strengths)?;
        positions.extend(v_positions);

        let scene = Scene::new(kind, positions, bigraph.edge_groups())
            .with_edge_style(style)
            .with_u_vertices(num_u)
            .with_labels(labels)
            .with_u_overrides(options.u_vertices.clone())
            .with_vertex_overrides(options.v_vertices.clone())
            .with_edge_overrides(options.edges.clone());
        Ok(renderer.render(&scene)?)
    }

    fn draw(
        &self,
        kind: StructureKind,
        structure: &impl Incidence,
        strengths: &Strengths,
        options: &DrawOptions,
    ) -> Result<String, HyperplotError> {
        let style = options
            .edge_style
            .unwrap_or_else(|| kind.default_edge_style());
        svg_export::check_drawable(
            kind,
            style,
            structure.num_v(),
            structure.num_e(),
            options.labels.as_deref(),
            &options.vertices,
            &options.edges,
        )?;

        let renderer = SvgBuilder::new()
            .with_style(self.config.style())
            .build()?;

        info!(
            kind:% = kind,
            num_v = structure.num_v(),
            num_e = structure.num_e(),
            edge_style:% = style;
            "Drawing structure"
        );
        let positions = self.layout(structure, strengths)?;
        debug!(positions = positions.len(); "Layout finished");

        let scene = Scene::new(kind, positions, structure.edge_groups())
            .with_edge_style(style)
            .with_labels(options.labels.clone())
            .with_vertex_overrides(options.vertices.clone())
            .with_edge_overrides(options.edges.clone());
        Ok(renderer.render(&scene)?)
    }
}

/// Joins per-side labels into one list over the joint vertex index space.
///
/// Returns `None` when neither side is labeled.
fn join_side_labels(
    u_labels: Option<&[String]>,
    v_labels: Option<&[String]>,
    num_u: usize,
    num_v: usize,
) -> Option<Vec<String>> {
    if u_labels.is_none() && v_labels.is_none() {
        return None;
    }

    let side = |labels: Option<&[String]>, count: usize| {
        labels.map_or_else(|| vec![String::new(); count], <[String]>::to_vec)
    };
    let mut labels = side(u_labels, num_u);
    labels.extend(side(v_labels, num_v));
    Some(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_builder() -> PlotBuilder {
        let mut config = AppConfig::default();
        config.layout_mut().set_seed(Some(11));
        PlotBuilder::new(config)
    }

    #[test]
    fn test_join_side_labels() {
        assert_eq!(join_side_labels(None, None, 2, 1), None);

        let u = vec!["a".to_string(), "b".to_string()];
        let joined = join_side_labels(Some(&u), None, 2, 1).unwrap();
        assert_eq!(joined, vec!["a", "b", ""]);
    }

    #[test]
    fn test_draw_graph_rejects_empty_graph() {
        let graph = Graph::new(3, &[]).unwrap();
        let err = seeded_builder()
            .draw_graph(&graph, &DrawOptions::new())
            .unwrap_err();
        assert!(matches!(
            err,
            HyperplotError::Export(export::Error::EmptyStructure { .. })
        ));
    }

    #[test]
    fn test_draw_bigraph_checks_each_side() {
        let bigraph = BiGraph::new(2, 2, &[(0, 1)]).unwrap();
        let options = BipartiteDrawOptions::new().with_v_labels(vec!["only one".to_string()]);
        let err = seeded_builder().draw_bigraph(&bigraph, &options).unwrap_err();
        assert!(matches!(
            err,
            HyperplotError::Export(export::Error::LabelCount {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_draw_graph_rejects_short_color_list() {
        let graph = Graph::new(3, &[(0, 1), (1, 2)]).unwrap();
        let options = DrawOptions::new().with_edge_colors(vec!["red".to_string()]);
        let err = seeded_builder().draw_graph(&graph, &options).unwrap_err();
        assert!(matches!(
            err,
            HyperplotError::Export(export::Error::ElementCount {
                attribute: "edge colors",
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_draw_bigraph_checks_side_overrides() {
        let bigraph = BiGraph::new(2, 3, &[(0, 1), (1, 2)]).unwrap();
        let options = BipartiteDrawOptions::new().with_u_sizes(vec![1.0, 2.0, 3.0]);
        let err = seeded_builder().draw_bigraph(&bigraph, &options).unwrap_err();
        assert!(matches!(
            err,
            HyperplotError::Export(export::Error::ElementCount {
                attribute: "vertex sizes",
                expected: 2,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_layout_is_generic_over_structures() {
        let builder = seeded_builder();
        let graph = Graph::new(3, &[(0, 1)]).unwrap();
        let hypergraph = Hypergraph::new(4, &[vec![0, 1, 2, 3]]).unwrap();

        assert_eq!(builder.layout(&graph, &Strengths::default()).unwrap().len(), 3);
        assert_eq!(
            builder
                .layout(&hypergraph, &Strengths::default())
                .unwrap()
                .len(),
            4
        );
    }
}
