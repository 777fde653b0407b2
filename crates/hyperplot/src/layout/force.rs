//! Force-directed layout engine
//!
//! [`Engine`] holds the simulation constants and turns an incidence
//! description into unit-square coordinates. The force terms themselves live
//! in the `simulation` module.

use log::debug;
use rand::{Rng, SeedableRng, rngs::StdRng};

use hyperplot_core::geometry::Point;

use super::{
    BipartiteStrengths, CentroidWeighting, LayoutError, Strengths,
    simulation::{Simulation, VertexClass, rescale_into_unit_square},
};
use crate::config::LayoutConfig;

/// Anchor of the center pull for graphs and hypergraphs.
const CENTER: Point = Point::new(0.5, 0.5);
/// Anchors of the center pull for the two sides of a bipartite graph.
const U_ANCHOR: Point = Point::new(0.25, 0.5);
const V_ANCHOR: Point = Point::new(0.75, 0.5);

/// Force layout engine
///
/// Positions start uniformly at random inside the unit square and are moved
/// by repulsion, spring and center forces until they settle or the
/// iteration budget runs out.
#[derive(Debug, Clone)]
pub struct Engine {
    // Simulation parameters
    iterations: usize,
    step_size: f32,
    damping_factor: f32,
    max_displacement: f32,
    tolerance: f32,
    min_distance: f32,
    // Force constants, multiplied with the caller's strengths
    repulsion_constant: f32,
    spring_constant: f32,
    gravity_constant: f32,
    centroid_weighting: CentroidWeighting,
    // Output
    margin: f32,
    seed: Option<u64>,
}

impl Engine {
    /// Create a new force layout engine with the constants of
    /// [`LayoutConfig::default`]
    pub fn new() -> Self {
        Self::with_constants(&LayoutConfig::default())
    }

    /// Create an engine from a layout configuration section.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidArgument`] if a constant is out of range.
    pub fn from_config(config: &LayoutConfig) -> Result<Self, LayoutError> {
        let engine = Self::with_constants(config);
        engine.validate()?;
        Ok(engine)
    }

    fn with_constants(config: &LayoutConfig) -> Self {
        Self {
            iterations: config.iterations(),
            step_size: config.step_size(),
            damping_factor: config.damping_factor(),
            max_displacement: config.max_displacement(),
            tolerance: config.tolerance(),
            min_distance: config.min_distance(),
            repulsion_constant: config.repulsion_constant(),
            spring_constant: config.spring_constant(),
            gravity_constant: config.gravity_constant(),
            centroid_weighting: config.centroid_weighting(),
            margin: config.margin(),
            seed: config.seed(),
        }
    }

    /// Set the number of iterations for the force simulation
    pub fn set_iterations(&mut self, iterations: usize) -> &mut Self {
        self.iterations = iterations;
        self
    }

    /// Set the integration step applied to forces
    pub fn set_step_size(&mut self, step_size: f32) -> &mut Self {
        self.step_size = step_size;
        self
    }

    /// Set the damping factor for the simulation
    pub fn set_damping_factor(&mut self, factor: f32) -> &mut Self {
        self.damping_factor = factor;
        self
    }

    /// Set the largest displacement of a single step (before cooling)
    pub fn set_max_displacement(&mut self, displacement: f32) -> &mut Self {
        self.max_displacement = displacement;
        self
    }

    /// Set the mean displacement below which the simulation stops early
    pub fn set_tolerance(&mut self, tolerance: f32) -> &mut Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the distance below which repulsion stops growing
    pub fn set_min_distance(&mut self, distance: f32) -> &mut Self {
        self.min_distance = distance;
        self
    }

    /// Set the repulsion constant for vertex and centroid forces
    pub fn set_repulsion_constant(&mut self, constant: f32) -> &mut Self {
        self.repulsion_constant = constant;
        self
    }

    /// Set the spring constant for edge forces
    pub fn set_spring_constant(&mut self, constant: f32) -> &mut Self {
        self.spring_constant = constant;
        self
    }

    /// Set the constant of the pull toward the center
    pub fn set_gravity_constant(&mut self, constant: f32) -> &mut Self {
        self.gravity_constant = constant;
        self
    }

    /// Set how centroid repulsion is shared among hyperedge members
    pub fn set_centroid_weighting(&mut self, weighting: CentroidWeighting) -> &mut Self {
        self.centroid_weighting = weighting;
        self
    }

    /// Set the margin kept free on each side of the unit square
    pub fn set_margin(&mut self, margin: f32) -> &mut Self {
        self.margin = margin;
        self
    }

    /// Set the seed of the initial placement; `None` draws one from OS entropy
    pub fn set_seed(&mut self, seed: Option<u64>) -> &mut Self {
        self.seed = seed;
        self
    }

    pub(super) fn iterations(&self) -> usize {
        self.iterations
    }

    pub(super) fn step_size(&self) -> f32 {
        self.step_size
    }

    pub(super) fn damping_factor(&self) -> f32 {
        self.damping_factor
    }

    pub(super) fn max_displacement(&self) -> f32 {
        self.max_displacement
    }

    pub(super) fn tolerance(&self) -> f32 {
        self.tolerance
    }

    pub(super) fn min_distance(&self) -> f32 {
        self.min_distance
    }

    pub(super) fn repulsion_constant(&self) -> f32 {
        self.repulsion_constant
    }

    pub(super) fn spring_constant(&self) -> f32 {
        self.spring_constant
    }

    pub(super) fn gravity_constant(&self) -> f32 {
        self.gravity_constant
    }

    pub(super) fn centroid_weighting(&self) -> CentroidWeighting {
        self.centroid_weighting
    }

    /// Check that the constants describe a stable simulation
    pub fn validate(&self) -> Result<(), LayoutError> {
        let positive = [
            ("step_size", self.step_size),
            ("max_displacement", self.max_displacement),
            ("min_distance", self.min_distance),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(LayoutError::invalid_argument(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }

        let non_negative = [
            ("tolerance", self.tolerance),
            ("repulsion_constant", self.repulsion_constant),
            ("spring_constant", self.spring_constant),
            ("gravity_constant", self.gravity_constant),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(LayoutError::invalid_argument(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.damping_factor) {
            return Err(LayoutError::invalid_argument(format!(
                "damping_factor must lie in [0, 1], got {}",
                self.damping_factor
            )));
        }

        if !(0.0..0.5).contains(&self.margin) {
            return Err(LayoutError::invalid_argument(format!(
                "margin must lie in [0, 0.5), got {}",
                self.margin
            )));
        }

        Ok(())
    }

    /// Lay out a graph or hypergraph. See [`super::force_layout`].
    pub fn layout(
        &self,
        num_v: usize,
        edges: &[Vec<usize>],
        strengths: &Strengths,
    ) -> Result<Vec<Point>, LayoutError> {
        if num_v == 0 {
            return Err(LayoutError::invalid_argument(
                "cannot lay out an empty vertex set",
            ));
        }
        strengths.validate()?;
        let groups = canonical_groups(num_v, edges)?;

        if num_v == 1 {
            debug!("Single vertex, placing it at the center");
            return Ok(vec![CENTER]);
        }

        let springs = clique_expansion(&groups);
        debug!(
            num_v,
            groups = groups.len(),
            springs = springs.len();
            "Running force layout"
        );

        let class = VertexClass {
            repulsion: strengths.push_vertex,
            center_pull: strengths.pull_center,
            anchor: CENTER,
        };
        let mut simulation = Simulation::new(self, vec![0; num_v], vec![class], self.rng())
            .with_springs(springs, strengths.pull_edge)
            .with_groups(groups, strengths.push_edge);
        simulation.run();

        let mut positions = simulation.into_positions();
        rescale_into_unit_square(&mut positions, self.margin);
        Ok(positions)
    }

    /// Lay out a bipartite graph. See [`super::bipartite_force_layout`].
    pub fn bipartite_layout(
        &self,
        num_u: usize,
        num_v: usize,
        edges: &[(usize, usize)],
        strengths: &BipartiteStrengths,
    ) -> Result<(Vec<Point>, Vec<Point>), LayoutError> {
        if num_u + num_v == 0 {
            return Err(LayoutError::invalid_argument(
                "cannot lay out an empty vertex set",
            ));
        }
        strengths.validate()?;

        let mut springs = Vec::with_capacity(edges.len());
        for (index, &(u, v)) in edges.iter().enumerate() {
            if u >= num_u {
                return Err(LayoutError::invalid_argument(format!(
                    "edge {index} references u-vertex {u}, but there are {num_u} u-vertices"
                )));
            }
            if v >= num_v {
                return Err(LayoutError::invalid_argument(format!(
                    "edge {index} references v-vertex {v}, but there are {num_v} v-vertices"
                )));
            }
            springs.push((u, num_u + v));
        }
        springs.sort_unstable();

        debug!(num_u, num_v, springs = springs.len(); "Running bipartite force layout");

        let classes = vec![
            VertexClass {
                repulsion: strengths.push_u,
                center_pull: strengths.pull_u_center,
                anchor: U_ANCHOR,
            },
            VertexClass {
                repulsion: strengths.push_v,
                center_pull: strengths.pull_v_center,
                anchor: V_ANCHOR,
            },
        ];
        let class_of = std::iter::repeat_n(0, num_u)
            .chain(std::iter::repeat_n(1, num_v))
            .collect();

        let mut simulation = Simulation::new(self, class_of, classes, self.rng())
            .with_springs(springs, strengths.pull_edge);
        simulation.run();

        let mut positions = simulation.into_positions();
        rescale_into_unit_square(&mut positions, self.margin);

        let v_positions = positions.split_off(num_u);
        Ok((positions, v_positions))
    }

    fn rng(&self) -> StdRng {
        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        debug!(seed; "Seeding initial placement");
        StdRng::seed_from_u64(seed)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Validates edge groups and puts them in a canonical order.
///
/// Members are sorted and deduplicated, then the groups themselves are
/// sorted, so the layout does not depend on how the caller ordered them.
fn canonical_groups(num_v: usize, edges: &[Vec<usize>]) -> Result<Vec<Vec<usize>>, LayoutError> {
    let mut groups = Vec::with_capacity(edges.len());

    for (index, edge) in edges.iter().enumerate() {
        if edge.is_empty() {
            return Err(LayoutError::invalid_argument(format!(
                "edge {index} has no vertices"
            )));
        }
        if let Some(&vertex) = edge.iter().find(|&&vertex| vertex >= num_v) {
            return Err(LayoutError::invalid_argument(format!(
                "edge {index} references vertex {vertex}, but there are {num_v} vertices"
            )));
        }

        let mut group = edge.clone();
        group.sort_unstable();
        group.dedup();
        groups.push(group);
    }

    groups.sort();
    Ok(groups)
}

/// Every unordered pair of distinct members of every group.
fn clique_expansion(groups: &[Vec<usize>]) -> Vec<(usize, usize)> {
    let mut springs: Vec<(usize, usize)> = groups
        .iter()
        .flat_map(|group| {
            group.iter().enumerate().flat_map(move |(i, &a)| {
                group[i + 1..].iter().map(move |&b| (a, b))
            })
        })
        .collect();
    springs.sort_unstable();
    springs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> Engine {
        let mut engine = Engine::new();
        engine.set_seed(Some(seed));
        engine
    }

    #[test]
    fn test_canonical_groups_sorts_and_dedups() {
        let groups = canonical_groups(5, &[vec![3, 1, 3], vec![0, 4]]).unwrap();
        assert_eq!(groups, vec![vec![0, 4], vec![1, 3]]);
    }

    #[test]
    fn test_canonical_groups_rejects_empty_group() {
        let err = canonical_groups(3, &[vec![0, 1], vec![]]).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidArgument(msg) if msg.contains("edge 1")));
    }

    #[test]
    fn test_clique_expansion() {
        let springs = clique_expansion(&[vec![0, 1, 2], vec![2, 3]]);
        assert_eq!(springs, vec![(0, 1), (0, 2), (1, 2), (2, 3)]);

        assert!(clique_expansion(&[vec![4]]).is_empty());
    }

    #[test]
    fn test_zero_strengths_return_rescaled_initial_placement() {
        let engine = seeded(21);

        let simulation = Simulation::new(
            &engine,
            vec![0; 5],
            vec![VertexClass {
                repulsion: 0.0,
                center_pull: 0.0,
                anchor: CENTER,
            }],
            engine.rng(),
        );
        let mut expected = simulation.into_positions();
        rescale_into_unit_square(&mut expected, 0.1);

        let edges = vec![vec![0, 1], vec![1, 2, 3]];
        let actual = engine.layout(5, &edges, &Strengths::zero()).unwrap();

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_new_uses_config_defaults() {
        let config = LayoutConfig::default();
        let configured = Engine::from_config(&config).unwrap();
        let engine = Engine::new();

        assert_eq!(format!("{engine:?}"), format!("{configured:?}"));
        assert_eq!(engine.iterations(), config.iterations());
        assert_eq!(engine.margin, config.margin());
        assert!(engine.validate().is_ok());
    }

    #[test]
    fn test_invalid_engine_constants_rejected() {
        let mut engine = Engine::new();
        engine.set_margin(0.5);
        assert!(engine.validate().is_err());

        let mut engine = Engine::new();
        engine.set_damping_factor(1.5);
        assert!(engine.validate().is_err());

        let mut engine = Engine::new();
        engine.set_step_size(0.0);
        assert!(engine.validate().is_err());

        let mut engine = Engine::new();
        engine.set_repulsion_constant(f32::NAN);
        assert!(engine.validate().is_err());
    }

    #[test]
    fn test_zero_iterations_returns_rescaled_placement() {
        let mut engine = seeded(4);
        engine.set_iterations(0);

        let coords = engine.layout(4, &[vec![0, 1]], &Strengths::default()).unwrap();
        assert_eq!(coords.len(), 4);
        assert!(coords.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_bipartite_split_sizes() {
        let engine = seeded(8);
        let (u, v) = engine
            .bipartite_layout(2, 3, &[(0, 0), (1, 2)], &BipartiteStrengths::default())
            .unwrap();
        assert_eq!(u.len(), 2);
        assert_eq!(v.len(), 3);
    }

    #[test]
    fn test_bipartite_one_side_empty() {
        let engine = seeded(8);
        let (u, v) = engine
            .bipartite_layout(0, 2, &[], &BipartiteStrengths::default())
            .unwrap();
        assert!(u.is_empty());
        assert_eq!(v.len(), 2);
    }
}
