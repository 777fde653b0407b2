//! Incidence structures consumed by the layout engine and the renderer.
//!
//! Every structure validates its vertex indices on construction and drops
//! duplicate edges, keeping the first occurrence. The layout engine only
//! needs the vertex count and the edge groups, which the [`Incidence`]
//! trait exposes.

use indexmap::IndexSet;
use thiserror::Error;

/// Errors raised while building a structure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("edge {edge} references vertex {vertex}, but the structure has {num_v} vertices")]
    VertexOutOfRange {
        edge: usize,
        vertex: usize,
        num_v: usize,
    },

    #[error("edge {edge} references u vertex {vertex}, but the structure has {num_u} u vertices")]
    UVertexOutOfRange {
        edge: usize,
        vertex: usize,
        num_u: usize,
    },

    #[error("hyperedge {edge} has no vertices")]
    EmptyHyperedge { edge: usize },
}

/// Read access to the vertex count and the edges of a structure.
pub trait Incidence {
    /// Number of vertices.
    fn num_v(&self) -> usize;

    /// Number of (deduplicated) edges.
    fn num_e(&self) -> usize;

    /// Every edge as a group of vertex indices.
    fn edge_groups(&self) -> Vec<Vec<usize>>;
}

/// An undirected graph. Edges are stored as `(min, max)` pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    num_v: usize,
    edges: Vec<(usize, usize)>,
}

impl Graph {
    /// Builds an undirected graph. `(a, b)` and `(b, a)` are the same edge.
    pub fn new(num_v: usize, edges: &[(usize, usize)]) -> Result<Self, StructureError> {
        let mut unique = IndexSet::with_capacity(edges.len());
        for (idx, &(a, b)) in edges.iter().enumerate() {
            check_vertex(idx, a, num_v)?;
            check_vertex(idx, b, num_v)?;
            unique.insert((a.min(b), a.max(b)));
        }

        Ok(Self {
            num_v,
            edges: unique.into_iter().collect(),
        })
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }
}

impl Incidence for Graph {
    fn num_v(&self) -> usize {
        self.num_v
    }

    fn num_e(&self) -> usize {
        self.edges.len()
    }

    fn edge_groups(&self) -> Vec<Vec<usize>> {
        pair_groups(&self.edges)
    }
}

/// A directed graph. Edges point from the first to the second vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiGraph {
    num_v: usize,
    edges: Vec<(usize, usize)>,
}

impl DiGraph {
    pub fn new(num_v: usize, edges: &[(usize, usize)]) -> Result<Self, StructureError> {
        let mut unique = IndexSet::with_capacity(edges.len());
        for (idx, &(source, target)) in edges.iter().enumerate() {
            check_vertex(idx, source, num_v)?;
            check_vertex(idx, target, num_v)?;
            unique.insert((source, target));
        }

        Ok(Self {
            num_v,
            edges: unique.into_iter().collect(),
        })
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }
}

impl Incidence for DiGraph {
    fn num_v(&self) -> usize {
        self.num_v
    }

    fn num_e(&self) -> usize {
        self.edges.len()
    }

    fn edge_groups(&self) -> Vec<Vec<usize>> {
        pair_groups(&self.edges)
    }
}

/// A bipartite graph with vertex classes `u` and `v`.
///
/// Edges are `(u, v)` pairs, each index local to its class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiGraph {
    num_u: usize,
    num_v: usize,
    edges: Vec<(usize, usize)>,
}

impl BiGraph {
    pub fn new(num_u: usize, num_v: usize, edges: &[(usize, usize)]) -> Result<Self, StructureError> {
        let mut unique = IndexSet::with_capacity(edges.len());
        for (idx, &(u, v)) in edges.iter().enumerate() {
            if u >= num_u {
                return Err(StructureError::UVertexOutOfRange {
                    edge: idx,
                    vertex: u,
                    num_u,
                });
            }
            check_vertex(idx, v, num_v)?;
            unique.insert((u, v));
        }

        Ok(Self {
            num_u,
            num_v,
            edges: unique.into_iter().collect(),
        })
    }

    /// Number of `u` vertices.
    pub fn num_u(&self) -> usize {
        self.num_u
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }
}

impl Incidence for BiGraph {
    /// Number of `v` vertices.
    fn num_v(&self) -> usize {
        self.num_v
    }

    fn num_e(&self) -> usize {
        self.edges.len()
    }

    /// Edges as groups over the joint index space, `v` indices offset by `num_u`.
    fn edge_groups(&self) -> Vec<Vec<usize>> {
        self.edges
            .iter()
            .map(|&(u, v)| vec![u, v + self.num_u])
            .collect()
    }
}

/// A hypergraph. Each hyperedge is a sorted set of vertices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hypergraph {
    num_v: usize,
    edges: Vec<Vec<usize>>,
}

impl Hypergraph {
    /// Builds a hypergraph. Repeated members of a hyperedge collapse, and
    /// hyperedges with the same member set are kept once.
    pub fn new(num_v: usize, edges: &[Vec<usize>]) -> Result<Self, StructureError> {
        let mut unique = IndexSet::with_capacity(edges.len());
        for (idx, edge) in edges.iter().enumerate() {
            if edge.is_empty() {
                return Err(StructureError::EmptyHyperedge { edge: idx });
            }
            for &vertex in edge {
                check_vertex(idx, vertex, num_v)?;
            }

            let mut members = edge.clone();
            members.sort_unstable();
            members.dedup();
            unique.insert(members);
        }

        Ok(Self {
            num_v,
            edges: unique.into_iter().collect(),
        })
    }

    pub fn edges(&self) -> &[Vec<usize>] {
        &self.edges
    }
}

impl Incidence for Hypergraph {
    fn num_v(&self) -> usize {
        self.num_v
    }

    fn num_e(&self) -> usize {
        self.edges.len()
    }

    fn edge_groups(&self) -> Vec<Vec<usize>> {
        self.edges.clone()
    }
}

fn check_vertex(edge: usize, vertex: usize, num_v: usize) -> Result<(), StructureError> {
    if vertex < num_v {
        Ok(())
    } else {
        Err(StructureError::VertexOutOfRange {
            edge,
            vertex,
            num_v,
        })
    }
}

fn pair_groups(edges: &[(usize, usize)]) -> Vec<Vec<usize>> {
    edges.iter().map(|&(a, b)| vec![a, b]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_merges_reversed_edges() {
        let graph = Graph::new(3, &[(0, 1), (1, 0), (2, 1)]).unwrap();
        assert_eq!(graph.edges(), &[(0, 1), (1, 2)]);
        assert_eq!(graph.num_e(), 2);
        assert_eq!(graph.edge_groups(), vec![vec![0, 1], vec![1, 2]]);
    }

    #[test]
    fn test_digraph_keeps_both_directions() {
        let digraph = DiGraph::new(2, &[(0, 1), (1, 0), (0, 1)]).unwrap();
        assert_eq!(digraph.edges(), &[(0, 1), (1, 0)]);
    }

    #[test]
    fn test_graph_rejects_out_of_range_vertex() {
        let err = Graph::new(3, &[(0, 1), (0, 5)]).unwrap_err();
        assert_eq!(
            err,
            StructureError::VertexOutOfRange {
                edge: 1,
                vertex: 5,
                num_v: 3
            }
        );
    }

    #[test]
    fn test_bigraph_groups_use_joint_indices() {
        let bigraph = BiGraph::new(2, 3, &[(0, 0), (1, 2), (1, 2)]).unwrap();
        assert_eq!(bigraph.num_u(), 2);
        assert_eq!(bigraph.num_v(), 3);
        assert_eq!(bigraph.num_e(), 2);
        assert_eq!(bigraph.edge_groups(), vec![vec![0, 2], vec![1, 4]]);
    }

    #[test]
    fn test_bigraph_rejects_out_of_range_u() {
        let err = BiGraph::new(1, 3, &[(1, 0)]).unwrap_err();
        assert!(matches!(err, StructureError::UVertexOutOfRange { vertex: 1, .. }));
    }

    #[test]
    fn test_hypergraph_canonicalizes_edges() {
        let hypergraph =
            Hypergraph::new(5, &[vec![2, 0, 1], vec![0, 1, 2], vec![3, 3, 4]]).unwrap();
        assert_eq!(hypergraph.edges(), &[vec![0, 1, 2], vec![3, 4]]);
        assert_eq!(hypergraph.num_e(), 2);
    }

    #[test]
    fn test_hypergraph_rejects_empty_edge() {
        let err = Hypergraph::new(3, &[vec![0], vec![]]).unwrap_err();
        assert_eq!(err, StructureError::EmptyHyperedge { edge: 1 });
    }
}
