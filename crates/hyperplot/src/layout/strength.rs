//! Force strength parameters.

use serde::Deserialize;

use super::LayoutError;

/// Multipliers for the force terms of a graph or hypergraph layout.
///
/// A strength of zero disables its force term. `push_edge` is optional:
/// `None` turns hyperedge centroid repulsion off entirely, which is what
/// plain pairwise graphs use.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Strengths {
    /// Repulsion between every pair of vertices.
    pub push_vertex: f32,
    /// Repulsion between hyperedge centroids.
    pub push_edge: Option<f32>,
    /// Spring attraction along every pairwise edge term.
    pub pull_edge: f32,
    /// Pull of every vertex toward the center.
    pub pull_center: f32,
}

impl Strengths {
    /// Creates strengths with centroid repulsion disabled.
    pub fn new(push_vertex: f32, pull_edge: f32, pull_center: f32) -> Self {
        Self {
            push_vertex,
            push_edge: None,
            pull_edge,
            pull_center,
        }
    }

    /// Enables hyperedge centroid repulsion with the given strength.
    pub fn with_push_edge(mut self, push_edge: f32) -> Self {
        self.push_edge = Some(push_edge);
        self
    }

    /// Returns a copy with hyperedge centroid repulsion disabled.
    pub fn without_push_edge(mut self) -> Self {
        self.push_edge = None;
        self
    }

    /// Strengths with every force term disabled.
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0).with_push_edge(0.0)
    }

    /// Checks that every strength is finite and non-negative.
    pub fn validate(&self) -> Result<(), LayoutError> {
        check_strength("push_vertex", self.push_vertex)?;
        if let Some(push_edge) = self.push_edge {
            check_strength("push_edge", push_edge)?;
        }
        check_strength("pull_edge", self.pull_edge)?;
        check_strength("pull_center", self.pull_center)
    }
}

impl Default for Strengths {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0).with_push_edge(1.0)
    }
}

/// Multipliers for the force terms of a bipartite layout.
///
/// Each side has its own repulsion and its own pull toward the side's
/// anchor point. Repulsion between a `u` and a `v` vertex uses the mean of
/// the two side strengths.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct BipartiteStrengths {
    pub push_u: f32,
    pub push_v: f32,
    pub pull_edge: f32,
    pub pull_u_center: f32,
    pub pull_v_center: f32,
}

impl BipartiteStrengths {
    /// Checks that every strength is finite and non-negative.
    pub fn validate(&self) -> Result<(), LayoutError> {
        check_strength("push_u", self.push_u)?;
        check_strength("push_v", self.push_v)?;
        check_strength("pull_edge", self.pull_edge)?;
        check_strength("pull_u_center", self.pull_u_center)?;
        check_strength("pull_v_center", self.pull_v_center)
    }
}

impl Default for BipartiteStrengths {
    fn default() -> Self {
        Self {
            push_u: 1.0,
            push_v: 1.0,
            pull_edge: 1.0,
            pull_u_center: 1.0,
            pull_v_center: 1.0,
        }
    }
}

/// How the repulsion acting on a hyperedge centroid is shared by its members.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CentroidWeighting {
    /// Each of the `k` members receives `1/k` of the centroid force.
    #[default]
    Split,
    /// Each member receives the full centroid force.
    Whole,
}

impl CentroidWeighting {
    /// Fraction of the centroid force applied to each member of a group of `size` vertices.
    pub fn member_share(self, size: usize) -> f32 {
        match self {
            Self::Split => 1.0 / size.max(1) as f32,
            Self::Whole => 1.0,
        }
    }
}

fn check_strength(name: &str, value: f32) -> Result<(), LayoutError> {
    if !value.is_finite() {
        return Err(LayoutError::invalid_argument(format!(
            "{name} must be finite, got {value}"
        )));
    }
    if value < 0.0 {
        return Err(LayoutError::invalid_argument(format!(
            "{name} must be non-negative, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_strengths_are_valid() {
        assert!(Strengths::default().validate().is_ok());
        assert!(BipartiteStrengths::default().validate().is_ok());
        assert!(Strengths::zero().validate().is_ok());
    }

    #[test]
    fn test_negative_strength_rejected() {
        let strengths = Strengths::new(-1.0, 1.0, 1.0);
        let err = strengths.validate().unwrap_err();
        assert!(matches!(err, LayoutError::InvalidArgument(msg) if msg.contains("push_vertex")));
    }

    #[test]
    fn test_non_finite_push_edge_rejected() {
        let strengths = Strengths::default().with_push_edge(f32::NAN);
        assert!(strengths.validate().is_err());

        let strengths = Strengths::default().with_push_edge(f32::INFINITY);
        assert!(strengths.validate().is_err());
    }

    #[test]
    fn test_disabled_push_edge_is_not_validated() {
        let strengths = Strengths::default().without_push_edge();
        assert_eq!(strengths.push_edge, None);
        assert!(strengths.validate().is_ok());
    }

    #[test]
    fn test_bipartite_negative_strength_rejected() {
        let strengths = BipartiteStrengths {
            pull_v_center: -0.5,
            ..BipartiteStrengths::default()
        };
        assert!(strengths.validate().is_err());
    }

    #[test]
    fn test_centroid_weighting_share() {
        assert_eq!(CentroidWeighting::Split.member_share(4), 0.25);
        assert_eq!(CentroidWeighting::Whole.member_share(4), 1.0);
        assert_eq!(CentroidWeighting::Split.member_share(0), 1.0);
    }
}
