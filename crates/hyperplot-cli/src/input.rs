//! Input structure files.
//!
//! An input file is a TOML document describing one structure:
//!
//! ```toml
//! kind = "hypergraph"
//! num_v = 6
//! edges = [[0, 1, 2], [2, 3], [3, 4, 5]]
//! labels = ["a", "b", "c", "d", "e", "f"]
//!
//! [strengths]
//! push_vertex = 1.0
//! push_edge = 1.0
//! ```
//!
//! Bipartite graphs add `num_u`, `u_labels`, and the `push_u` and
//! `pull_u_center` strengths; `push_vertex` and `pull_center` then apply to
//! the `v` side.
//!
//! An optional `[elements]` table styles single vertices and edges. Lists
//! hold one entry per vertex or per edge; sizes and font scales are factors
//! of the configured values:
//!
//! ```toml
//! [elements]
//! vertex_colors = ["red", "red", "blue", "blue", "red", "red"]
//! vertex_sizes = [1.0, 1.0, 2.0, 2.0, 1.0, 1.0]
//! edge_fill_colors = ["whitesmoke", "lightblue", "whitesmoke"]
//! ```
//!
//! For bipartite graphs the `vertex_*` keys and `font_scale` style the `v`
//! side and the `u_*` keys the `u` side.

use std::ops::Range;

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use hyperplot::{
    BipartiteDrawOptions, DrawOptions, EdgeStyle, HyperplotError, PlotBuilder,
    layout::{BipartiteStrengths, Strengths},
    structure::{BiGraph, DiGraph, Graph, Hypergraph},
};

use crate::CliError;

/// An input file that could not be read into a structure.
///
/// Carries the source text and, when known, the byte range of the
/// offending TOML.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct InputError {
    message: String,
    span: Option<Range<usize>>,
    pub(crate) src: String,
}

impl InputError {
    fn new(message: impl Into<String>, span: Option<Range<usize>>, src: &str) -> Self {
        Self {
            message: message.into(),
            span,
            src: src.to_string(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Byte range of the offending TOML, if known.
    pub fn span(&self) -> Option<Range<usize>> {
        self.span.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Kind {
    Graph,
    Digraph,
    Bigraph,
    Hypergraph,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct StrengthTable {
    push_vertex: Option<f32>,
    push_edge: Option<f32>,
    pull_edge: Option<f32>,
    pull_center: Option<f32>,
    push_u: Option<f32>,
    pull_u_center: Option<f32>,
}

impl StrengthTable {
    fn strengths(&self) -> Strengths {
        let defaults = Strengths::default();
        Strengths {
            push_vertex: self.push_vertex.unwrap_or(defaults.push_vertex),
            push_edge: self.push_edge.or(defaults.push_edge),
            pull_edge: self.pull_edge.unwrap_or(defaults.pull_edge),
            pull_center: self.pull_center.unwrap_or(defaults.pull_center),
        }
    }

    fn bipartite_strengths(&self) -> BipartiteStrengths {
        let defaults = BipartiteStrengths::default();
        BipartiteStrengths {
            push_u: self.push_u.unwrap_or(defaults.push_u),
            push_v: self.push_vertex.unwrap_or(defaults.push_v),
            pull_edge: self.pull_edge.unwrap_or(defaults.pull_edge),
            pull_u_center: self.pull_u_center.unwrap_or(defaults.pull_u_center),
            pull_v_center: self.pull_center.unwrap_or(defaults.pull_v_center),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ElementTable {
    vertex_colors: Option<Vec<String>>,
    vertex_sizes: Option<Vec<f32>>,
    vertex_line_widths: Option<Vec<f32>>,
    font_scale: Option<f32>,
    u_colors: Option<Vec<String>>,
    u_sizes: Option<Vec<f32>>,
    u_line_widths: Option<Vec<f32>>,
    u_font_scale: Option<f32>,
    edge_colors: Option<Vec<String>>,
    edge_fill_colors: Option<Vec<String>>,
    edge_line_widths: Option<Vec<f32>>,
}

impl ElementTable {
    fn has_u_keys(&self) -> bool {
        self.u_colors.is_some()
            || self.u_sizes.is_some()
            || self.u_line_widths.is_some()
            || self.u_font_scale.is_some()
    }

    fn apply(self, mut options: DrawOptions) -> DrawOptions {
        if let Some(colors) = self.vertex_colors {
            options = options.with_vertex_colors(colors);
        }
        if let Some(sizes) = self.vertex_sizes {
            options = options.with_vertex_sizes(sizes);
        }
        if let Some(widths) = self.vertex_line_widths {
            options = options.with_vertex_line_widths(widths);
        }
        if let Some(scale) = self.font_scale {
            options = options.with_font_scale(scale);
        }
        if let Some(colors) = self.edge_colors {
            options = options.with_edge_colors(colors);
        }
        if let Some(colors) = self.edge_fill_colors {
            options = options.with_edge_fill_colors(colors);
        }
        if let Some(widths) = self.edge_line_widths {
            options = options.with_edge_line_widths(widths);
        }
        options
    }

    fn apply_bipartite(self, mut options: BipartiteDrawOptions) -> BipartiteDrawOptions {
        if let Some(colors) = self.u_colors {
            options = options.with_u_colors(colors);
        }
        if let Some(sizes) = self.u_sizes {
            options = options.with_u_sizes(sizes);
        }
        if let Some(widths) = self.u_line_widths {
            options = options.with_u_line_widths(widths);
        }
        if let Some(scale) = self.u_font_scale {
            options = options.with_u_font_scale(scale);
        }
        if let Some(colors) = self.vertex_colors {
            options = options.with_v_colors(colors);
        }
        if let Some(sizes) = self.vertex_sizes {
            options = options.with_v_sizes(sizes);
        }
        if let Some(widths) = self.vertex_line_widths {
            options = options.with_v_line_widths(widths);
        }
        if let Some(scale) = self.font_scale {
            options = options.with_v_font_scale(scale);
        }
        if let Some(colors) = self.edge_colors {
            options = options.with_edge_colors(colors);
        }
        if let Some(widths) = self.edge_line_widths {
            options = options.with_edge_line_widths(widths);
        }
        options
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct InputFile {
    kind: Kind,
    num_v: usize,
    num_u: Option<usize>,
    #[serde(default)]
    edges: Vec<Vec<usize>>,
    labels: Option<Vec<String>>,
    u_labels: Option<Vec<String>>,
    edge_style: Option<EdgeStyle>,
    #[serde(default)]
    strengths: StrengthTable,
    #[serde(default)]
    elements: ElementTable,
}

/// A structure read from an input file, ready to draw.
#[derive(Debug)]
pub enum Plot {
    Graph(Graph, DrawOptions),
    DiGraph(DiGraph, DrawOptions),
    BiGraph(BiGraph, BipartiteDrawOptions),
    Hypergraph(Hypergraph, DrawOptions),
}

impl Plot {
    /// Draws the structure to an SVG string.
    pub fn draw(&self, builder: &PlotBuilder) -> Result<String, HyperplotError> {
        match self {
            Self::Graph(graph, options) => builder.draw_graph(graph, options),
            Self::DiGraph(digraph, options) => builder.draw_digraph(digraph, options),
            Self::BiGraph(bigraph, options) => builder.draw_bigraph(bigraph, options),
            Self::Hypergraph(hypergraph, options) => builder.draw_hypergraph(hypergraph, options),
        }
    }
}

/// Parses an input file.
///
/// `edge_style` overrides the style given in the file.
///
/// # Errors
///
/// Returns [`InputError`] for malformed TOML, an edge with the wrong number
/// of endpoints for the structure kind, or fields that do not belong to the
/// kind, and `HyperplotError::Structure` for out-of-range vertex indices.
pub fn parse(src: &str, edge_style: Option<EdgeStyle>) -> Result<Plot, CliError> {
    let file: InputFile = toml::from_str(src)
        .map_err(|err| InputError::new(err.message(), err.span(), src))?;
    debug!(kind:? = file.kind, num_v = file.num_v, num_e = file.edges.len(); "Parsed input file");

    let edge_style = edge_style.or(file.edge_style);
    if file.kind != Kind::Bigraph
        && (file.num_u.is_some() || file.u_labels.is_some() || file.elements.has_u_keys())
    {
        return Err(InputError::new(
            "`num_u`, `u_labels` and the `u_*` element keys are only valid for `kind = \"bigraph\"`",
            None,
            src,
        )
        .into());
    }
    if file.kind == Kind::Bigraph && file.elements.edge_fill_colors.is_some() {
        return Err(InputError::new(
            "`edge_fill_colors` has no effect on bigraph line edges",
            None,
            src,
        )
        .into());
    }

    let plot = match file.kind {
        Kind::Graph => Plot::Graph(
            Graph::new(file.num_v, &pairs(&file.edges, src)?)?,
            file.elements
                .apply(draw_options(edge_style, file.labels, file.strengths.strengths())),
        ),
        Kind::Digraph => Plot::DiGraph(
            DiGraph::new(file.num_v, &pairs(&file.edges, src)?)?,
            file.elements
                .apply(draw_options(edge_style, file.labels, file.strengths.strengths())),
        ),
        Kind::Hypergraph => Plot::Hypergraph(
            Hypergraph::new(file.num_v, &file.edges)?,
            file.elements
                .apply(draw_options(edge_style, file.labels, file.strengths.strengths())),
        ),
        Kind::Bigraph => {
            let Some(num_u) = file.num_u else {
                return Err(InputError::new("a bigraph needs `num_u`", None, src).into());
            };
            let mut options = file.elements.apply_bipartite(
                BipartiteDrawOptions::new().with_strengths(file.strengths.bipartite_strengths()),
            );
            if let Some(style) = edge_style {
                options = options.with_edge_style(style);
            }
            if let Some(labels) = file.u_labels {
                options = options.with_u_labels(labels);
            }
            if let Some(labels) = file.labels {
                options = options.with_v_labels(labels);
            }
            Plot::BiGraph(
                BiGraph::new(num_u, file.num_v, &pairs(&file.edges, src)?)?,
                options,
            )
        }
    };

    Ok(plot)
}

fn pairs(edges: &[Vec<usize>], src: &str) -> Result<Vec<(usize, usize)>, InputError> {
    edges
        .iter()
        .enumerate()
        .map(|(idx, edge)| match edge.as_slice() {
            [a, b] => Ok((*a, *b)),
            _ => Err(InputError::new(
                format!(
                    "edge {idx} has {} endpoints, but this kind only accepts pairs",
                    edge.len()
                ),
                None,
                src,
            )),
        })
        .collect()
}

fn draw_options(
    edge_style: Option<EdgeStyle>,
    labels: Option<Vec<String>>,
    strengths: Strengths,
) -> DrawOptions {
    let mut options = DrawOptions::new().with_strengths(strengths);
    if let Some(style) = edge_style {
        options = options.with_edge_style(style);
    }
    if let Some(labels) = labels {
        options = options.with_labels(labels);
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hypergraph() {
        let src = r#"
            kind = "hypergraph"
            num_v = 4
            edges = [[0, 1, 2], [2, 3]]
            labels = ["a", "b", "c", "d"]
        "#;

        let plot = parse(src, None).unwrap();
        assert!(matches!(plot, Plot::Hypergraph(ref hg, _) if hg.edges().len() == 2));
    }

    #[test]
    fn test_parse_bigraph_strengths() {
        let src = r#"
            kind = "bigraph"
            num_u = 2
            num_v = 3
            edges = [[0, 0], [1, 2]]

            [strengths]
            push_u = 2.0
            pull_center = 0.5
        "#;

        let file: InputFile = toml::from_str(src).unwrap();
        let strengths = file.strengths.bipartite_strengths();
        assert_eq!(strengths.push_u, 2.0);
        assert_eq!(strengths.pull_v_center, 0.5);
        assert_eq!(strengths.pull_u_center, 1.0);

        assert!(matches!(parse(src, None).unwrap(), Plot::BiGraph(..)));
    }

    #[test]
    fn test_malformed_toml_has_span() {
        let src = "kind = \"graph\"\nnum_v = \"three\"\n";
        let err = parse(src, None).unwrap_err();

        let CliError::Input(err) = err else {
            panic!("expected an input error");
        };
        let span = err.span().expect("toml errors carry a span");
        assert!(src[span].contains("three"));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let src = "kind = \"tree\"\nnum_v = 3\n";
        assert!(matches!(parse(src, None), Err(CliError::Input(_))));
    }

    #[test]
    fn test_graph_edges_must_be_pairs() {
        let src = "kind = \"graph\"\nnum_v = 3\nedges = [[0, 1, 2]]\n";
        let err = parse(src, None).unwrap_err();
        assert!(err.to_string().contains("only accepts pairs"));
    }

    #[test]
    fn test_out_of_range_vertex_is_structure_error() {
        let src = "kind = \"graph\"\nnum_v = 3\nedges = [[0, 5]]\n";
        let err = parse(src, None).unwrap_err();
        assert!(matches!(
            err,
            CliError::Hyperplot(HyperplotError::Structure(_))
        ));
    }

    #[test]
    fn test_u_fields_rejected_outside_bigraph() {
        let src = "kind = \"graph\"\nnum_v = 2\nnum_u = 1\nedges = [[0, 1]]\n";
        assert!(matches!(parse(src, None), Err(CliError::Input(_))));
    }

    #[test]
    fn test_parse_element_styles() {
        let src = r#"
            kind = "graph"
            num_v = 3
            edges = [[0, 1], [1, 2]]

            [elements]
            vertex_colors = ["red", "green", "blue"]
            edge_line_widths = [1.0, 3.0]
        "#;

        let Plot::Graph(_, options) = parse(src, None).unwrap() else {
            panic!("expected a graph");
        };
        let expected = DrawOptions::new()
            .with_vertex_colors(vec!["red".into(), "green".into(), "blue".into()])
            .with_edge_line_widths(vec![1.0, 3.0]);
        assert_eq!(format!("{options:?}"), format!("{expected:?}"));
    }

    #[test]
    fn test_u_element_keys_rejected_outside_bigraph() {
        let src = "kind = \"graph\"\nnum_v = 2\nedges = [[0, 1]]\n[elements]\nu_sizes = [1.0]\n";
        assert!(matches!(parse(src, None), Err(CliError::Input(_))));
    }

    #[test]
    fn test_bigraph_rejects_edge_fill_colors() {
        let src = r#"
            kind = "bigraph"
            num_u = 1
            num_v = 1
            edges = [[0, 0]]

            [elements]
            edge_fill_colors = ["red"]
        "#;
        let err = parse(src, None).unwrap_err();
        assert!(err.to_string().contains("edge_fill_colors"));
    }

    #[test]
    fn test_bigraph_requires_num_u() {
        let src = "kind = \"bigraph\"\nnum_v = 2\nedges = [[0, 1]]\n";
        let err = parse(src, None).unwrap_err();
        assert!(err.to_string().contains("num_u"));
    }
}
