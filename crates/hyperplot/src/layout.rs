//! Force-directed layout for graphs, bipartite graphs and hypergraphs.
//!
//! The layout runs a small physical simulation over the vertices:
//!
//! - every pair of vertices repels,
//! - every hyperedge centroid repels every other centroid (optional),
//! - every pairwise edge term acts as a spring,
//! - every vertex is pulled toward the center of its class.
//!
//! The result is rescaled into the unit square so it can be handed to any
//! renderer without further normalization.
//!
//! # Example
//!
//! ```
//! use hyperplot::{config::LayoutConfig, layout::{self, Strengths}};
//!
//! let mut config = LayoutConfig::default();
//! config.set_seed(Some(7));
//!
//! let edges = vec![vec![0, 1], vec![1, 2]];
//! let coords = layout::force_layout(3, &edges, &Strengths::default(), &config).unwrap();
//!
//! assert_eq!(coords.len(), 3);
//! assert!(coords.iter().all(|p| (0.0..=1.0).contains(&p.x()) && (0.0..=1.0).contains(&p.y())));
//! ```

mod error;
mod force;
mod simulation;
mod strength;

pub use error::LayoutError;
pub use force::Engine;
pub use strength::{BipartiteStrengths, CentroidWeighting, Strengths};

use hyperplot_core::geometry::Point;

use crate::config::LayoutConfig;

/// Lay out `num_v` vertices connected by `edges` inside the unit square.
///
/// Each entry of `edges` is a group of vertex indices: two for a pairwise
/// edge, any non-zero number for a hyperedge. Attraction acts on every pair
/// inside a group; centroid repulsion (enabled by
/// [`Strengths::push_edge`]) acts on whole groups.
///
/// Each axis is min-max rescaled on its own, so the output spans
/// `[margin, 1 - margin]` on both axes (`[0.1, 0.9]` with the default
/// [`LayoutConfig::margin`]). A margin of `0` gives the exact `[0, 1]`
/// rescale.
///
/// # Errors
///
/// Returns [`LayoutError::InvalidArgument`] if `num_v` is zero, an edge
/// references a vertex `>= num_v`, an edge group is empty, or a strength is
/// negative or not finite.
pub fn force_layout(
    num_v: usize,
    edges: &[Vec<usize>],
    strengths: &Strengths,
    config: &LayoutConfig,
) -> Result<Vec<Point>, LayoutError> {
    Engine::from_config(config)?.layout(num_v, edges, strengths)
}

/// Lay out a bipartite graph with `num_u` vertices on one side and `num_v`
/// on the other.
///
/// Edges are `(u, v)` pairs with `u < num_u` and `v < num_v`. Returns the
/// coordinates of the `u` side and of the `v` side, both in the unit square.
///
/// # Errors
///
/// Returns [`LayoutError::InvalidArgument`] for an empty vertex set, an
/// out-of-range edge endpoint, or an invalid strength.
pub fn bipartite_force_layout(
    num_u: usize,
    num_v: usize,
    edges: &[(usize, usize)],
    strengths: &BipartiteStrengths,
    config: &LayoutConfig,
) -> Result<(Vec<Point>, Vec<Point>), LayoutError> {
    Engine::from_config(config)?.bipartite_layout(num_u, num_v, edges, strengths)
}
