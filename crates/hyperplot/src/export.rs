pub mod svg;

use std::fmt;

use thiserror::Error;

use self::svg::EdgeStyle;

/// The kind of structure being drawn, used to pick the supported edge styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureKind {
    Graph,
    DiGraph,
    BiGraph,
    Hypergraph,
}

impl StructureKind {
    /// Edge style used when the caller does not pick one.
    pub fn default_edge_style(self) -> EdgeStyle {
        match self {
            Self::Hypergraph => EdgeStyle::Circle,
            Self::Graph | Self::DiGraph | Self::BiGraph => EdgeStyle::Line,
        }
    }

    /// Returns `true` if edges of this structure can be drawn with `style`.
    pub fn supports(self, style: EdgeStyle) -> bool {
        matches!(
            (self, style),
            (Self::Graph, EdgeStyle::Line | EdgeStyle::Circle)
                | (Self::DiGraph, EdgeStyle::Line)
                | (Self::BiGraph, EdgeStyle::Line)
                | (Self::Hypergraph, EdgeStyle::Circle)
        )
    }
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Graph => "graph",
            Self::DiGraph => "digraph",
            Self::BiGraph => "bigraph",
            Self::Hypergraph => "hypergraph",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("edge style `{style}` is not supported for a {kind}")]
    UnsupportedEdgeStyle { kind: StructureKind, style: EdgeStyle },

    #[error("cannot draw a {kind} without edges")]
    EmptyStructure { kind: StructureKind },

    #[error("expected {expected} labels, got {actual}")]
    LabelCount { expected: usize, actual: usize },

    #[error("expected {expected} {attribute}, got {actual}")]
    ElementCount {
        attribute: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid {attribute} `{value}`")]
    InvalidSize { attribute: &'static str, value: f32 },

    #[error("Style error: {0}")]
    Style(String),
}
