//! The physical simulation behind the force layout engine.
//!
//! A [`Simulation`] owns every piece of mutable state of one layout call:
//! positions, velocities and the random number generator. Nothing is shared
//! between calls, so separate layouts can run on separate threads freely.

use std::f32::consts::TAU;

use log::{debug, trace};
use rand::{Rng, rngs::StdRng};

use hyperplot_core::geometry::{Bounds, Point};

use super::{CentroidWeighting, Engine};

/// Repulsion and center pull shared by every vertex of one class.
///
/// Plain graphs and hypergraphs use a single class; bipartite graphs use one
/// class per side.
#[derive(Debug, Clone, Copy)]
pub(super) struct VertexClass {
    pub repulsion: f32,
    pub center_pull: f32,
    pub anchor: Point,
}

pub(super) struct Simulation<'e> {
    engine: &'e Engine,
    positions: Vec<Point>,
    velocities: Vec<Point>,
    classes: Vec<VertexClass>,
    class_of: Vec<usize>,
    springs: Vec<(usize, usize)>,
    spring_strength: f32,
    groups: Vec<Vec<usize>>,
    group_repulsion: Option<f32>,
    weighting: CentroidWeighting,
    rng: StdRng,
}

impl<'e> Simulation<'e> {
    /// Creates a simulation whose vertices are placed uniformly at random
    /// inside the unit square.
    ///
    /// `class_of[i]` is the index into `classes` of vertex `i`.
    pub fn new(
        engine: &'e Engine,
        class_of: Vec<usize>,
        classes: Vec<VertexClass>,
        mut rng: StdRng,
    ) -> Self {
        let positions: Vec<Point> = class_of
            .iter()
            .map(|_| Point::new(rng.random::<f32>(), rng.random::<f32>()))
            .collect();
        let velocities = vec![Point::default(); positions.len()];

        Self {
            engine,
            positions,
            velocities,
            classes,
            class_of,
            springs: Vec::new(),
            spring_strength: 0.0,
            groups: Vec::new(),
            group_repulsion: None,
            weighting: engine.centroid_weighting(),
            rng,
        }
    }

    /// Sets the pairwise spring terms and their common strength.
    pub fn with_springs(mut self, springs: Vec<(usize, usize)>, strength: f32) -> Self {
        self.springs = springs;
        self.spring_strength = strength;
        self
    }

    /// Sets the vertex groups used for centroid repulsion.
    ///
    /// `None` disables centroid repulsion regardless of the groups.
    pub fn with_groups(mut self, groups: Vec<Vec<usize>>, repulsion: Option<f32>) -> Self {
        self.groups = groups;
        self.group_repulsion = repulsion;
        self
    }

    /// Consumes the simulation and hands out the position buffer.
    pub fn into_positions(self) -> Vec<Point> {
        self.positions
    }

    /// Runs the simulation until the iteration budget is spent or the mean
    /// displacement of a step drops below the tolerance.
    ///
    /// Returns the number of steps taken.
    pub fn run(&mut self) -> usize {
        let iterations = self.engine.iterations();
        let vertex_count = self.positions.len();
        if vertex_count == 0 {
            return 0;
        }

        let mut forces = vec![Point::default(); vertex_count];

        for iteration in 0..iterations {
            forces.iter_mut().for_each(|force| *force = Point::default());

            self.apply_vertex_repulsion(&mut forces);
            self.apply_centroid_repulsion(&mut forces);
            self.apply_spring_attraction(&mut forces);
            self.apply_center_pull(&mut forces);

            // Linear cooling keeps late steps small.
            let progress = iteration as f32 / iterations as f32;
            let temperature = self.engine.max_displacement() * (1.0 - progress);

            let total_displacement = self.step(&forces, temperature);
            let mean_displacement = total_displacement / vertex_count as f32;

            trace!(iteration, mean_displacement; "Force simulation step");

            if mean_displacement < self.engine.tolerance() {
                debug!(
                    iterations = iteration + 1,
                    mean_displacement;
                    "Force simulation converged"
                );
                return iteration + 1;
            }
        }

        debug!(iterations; "Force simulation reached iteration budget");
        iterations
    }

    fn pair_repulsion(&self, a: usize, b: usize) -> f32 {
        let class_a = self.class_of[a];
        let class_b = self.class_of[b];
        if class_a == class_b {
            self.classes[class_a].repulsion
        } else {
            (self.classes[class_a].repulsion + self.classes[class_b].repulsion) / 2.0
        }
    }

    /// Inverse-square repulsion between every pair of vertices.
    fn apply_vertex_repulsion(&mut self, forces: &mut [Point]) {
        if self.classes.iter().all(|class| class.repulsion == 0.0) {
            return;
        }

        let constant = self.engine.repulsion_constant();
        let min_distance = self.engine.min_distance();

        for a in 0..self.positions.len() {
            for b in (a + 1)..self.positions.len() {
                let strength = self.pair_repulsion(a, b);
                if strength == 0.0 {
                    continue;
                }

                let delta = self.positions[a].sub_point(self.positions[b]);
                let force = repulsion(delta, strength * constant, min_distance, &mut self.rng);

                forces[a] = forces[a].add_point(force);
                forces[b] = forces[b].sub_point(force);
            }
        }
    }

    /// Inverse-square repulsion between group centroids, shared out to the
    /// members of each group.
    fn apply_centroid_repulsion(&mut self, forces: &mut [Point]) {
        let Some(strength) = self.group_repulsion else {
            return;
        };
        if strength == 0.0 || self.groups.len() < 2 {
            return;
        }

        let constant = strength * self.engine.repulsion_constant();
        let min_distance = self.engine.min_distance();

        let centroids: Vec<Point> = self
            .groups
            .iter()
            .map(|group| {
                Point::centroid(group.iter().map(|&vertex| self.positions[vertex]))
                    .unwrap_or_default()
            })
            .collect();

        for g in 0..self.groups.len() {
            for h in (g + 1)..self.groups.len() {
                let delta = centroids[g].sub_point(centroids[h]);
                let force = repulsion(delta, constant, min_distance, &mut self.rng);

                let share_g = force.scale(self.weighting.member_share(self.groups[g].len()));
                for &vertex in &self.groups[g] {
                    forces[vertex] = forces[vertex].add_point(share_g);
                }

                let share_h = force.scale(self.weighting.member_share(self.groups[h].len()));
                for &vertex in &self.groups[h] {
                    forces[vertex] = forces[vertex].sub_point(share_h);
                }
            }
        }
    }

    /// Linear springs of rest length zero along every pairwise term.
    fn apply_spring_attraction(&self, forces: &mut [Point]) {
        if self.spring_strength == 0.0 {
            return;
        }

        let constant = self.spring_strength * self.engine.spring_constant();

        for &(a, b) in &self.springs {
            let force = self.positions[b].sub_point(self.positions[a]).scale(constant);
            forces[a] = forces[a].add_point(force);
            forces[b] = forces[b].sub_point(force);
        }
    }

    /// Linear pull of every vertex toward its class anchor.
    fn apply_center_pull(&self, forces: &mut [Point]) {
        let constant = self.engine.gravity_constant();

        for (vertex, force) in forces.iter_mut().enumerate() {
            let class = self.classes[self.class_of[vertex]];
            if class.center_pull == 0.0 {
                continue;
            }

            let pull = class
                .anchor
                .sub_point(self.positions[vertex])
                .scale(class.center_pull * constant);
            *force = force.add_point(pull);
        }
    }

    /// Integrates one damped step and returns the summed displacement.
    fn step(&mut self, forces: &[Point], temperature: f32) -> f32 {
        let step_size = self.engine.step_size();
        let damping = self.engine.damping_factor();
        let mut total = 0.0;

        for (vertex, ((position, velocity), force)) in self
            .positions
            .iter_mut()
            .zip(self.velocities.iter_mut())
            .zip(forces)
            .enumerate()
        {
            if !force.is_finite() {
                trace!(vertex; "Skipping vertex with non-finite force");
                continue;
            }

            let displacement = velocity
                .add_point(force.scale(step_size))
                .scale(damping)
                .clamp_length(temperature);

            *position = position.add_point(displacement);
            *velocity = displacement;
            total += displacement.hypot();
        }

        total
    }
}

/// Repulsive force on the first endpoint of `delta`.
///
/// Distances are clamped to `min_distance`; exactly coincident points get a
/// random direction so they separate instead of producing NaN.
fn repulsion(delta: Point, constant: f32, min_distance: f32, rng: &mut StdRng) -> Point {
    let distance = delta.hypot();
    let direction = if distance > f32::EPSILON {
        delta.scale(1.0 / distance)
    } else {
        random_direction(rng)
    };

    let distance = distance.max(min_distance);
    direction.scale(constant / (distance * distance))
}

fn random_direction(rng: &mut StdRng) -> Point {
    let angle = rng.random_range(0.0..TAU);
    Point::new(angle.cos(), angle.sin())
}

/// Min-max normalizes each axis into `[0, 1]`, then shrinks the result into
/// `[margin, 1 - margin]`.
///
/// An axis with no extent maps every point to the middle of the square.
pub(super) fn rescale_into_unit_square(positions: &mut [Point], margin: f32) {
    let Some(bounds) = Bounds::from_points(positions.iter().copied()) else {
        return;
    };
    let span = 1.0 - 2.0 * margin;

    for position in positions.iter_mut() {
        let x = normalize_axis(position.x(), bounds.min_x(), bounds.width());
        let y = normalize_axis(position.y(), bounds.min_y(), bounds.height());
        *position = Point::new(margin + x * span, margin + y * span);
    }
}

fn normalize_axis(value: f32, min: f32, extent: f32) -> f32 {
    if extent > f32::EPSILON {
        ((value - min) / extent).clamp(0.0, 1.0)
    } else {
        0.5
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use rand::SeedableRng;

    use super::*;

    fn single_class(repulsion: f32, center_pull: f32) -> Vec<VertexClass> {
        vec![VertexClass {
            repulsion,
            center_pull,
            anchor: Point::new(0.5, 0.5),
        }]
    }

    #[test]
    fn test_rescale_spans_unit_square() {
        let mut positions = vec![
            Point::new(-3.0, 10.0),
            Point::new(1.0, 12.0),
            Point::new(5.0, 11.0),
        ];
        rescale_into_unit_square(&mut positions, 0.0);

        assert_approx_eq!(f32, positions[0].x(), 0.0);
        assert_approx_eq!(f32, positions[2].x(), 1.0);
        assert_approx_eq!(f32, positions[0].y(), 0.0);
        assert_approx_eq!(f32, positions[1].y(), 1.0);
        assert_approx_eq!(f32, positions[1].x(), 0.5);
    }

    #[test]
    fn test_rescale_respects_margin() {
        let mut positions = vec![Point::new(0.0, 0.0), Point::new(2.0, 4.0)];
        rescale_into_unit_square(&mut positions, 0.1);

        assert_approx_eq!(f32, positions[0].x(), 0.1);
        assert_approx_eq!(f32, positions[1].y(), 0.9);
    }

    #[test]
    fn test_rescale_flat_axis_centers() {
        let mut positions = vec![Point::new(0.3, 7.0), Point::new(0.3, 9.0)];
        rescale_into_unit_square(&mut positions, 0.1);

        assert_approx_eq!(f32, positions[0].x(), 0.5);
        assert_approx_eq!(f32, positions[1].x(), 0.5);
    }

    #[test]
    fn test_repulsion_pushes_apart() {
        let mut rng = StdRng::seed_from_u64(1);
        let force = repulsion(Point::new(0.1, 0.0), 1.0, 0.01, &mut rng);

        assert!(force.x() > 0.0);
        assert_approx_eq!(f32, force.y(), 0.0);
        assert_approx_eq!(f32, force.x(), 100.0, epsilon = 1e-2);
    }

    #[test]
    fn test_repulsion_coincident_points_is_finite() {
        let mut rng = StdRng::seed_from_u64(1);
        let force = repulsion(Point::default(), 1.0, 0.01, &mut rng);

        assert!(force.is_finite());
        assert_approx_eq!(f32, force.hypot(), 10_000.0, epsilon = 1.0);
    }

    #[test]
    fn test_coincident_vertices_separate() {
        let engine = Engine::new();
        let mut simulation = Simulation::new(
            &engine,
            vec![0, 0],
            single_class(1.0, 0.0),
            StdRng::seed_from_u64(3),
        );
        simulation.positions = vec![Point::new(0.5, 0.5); 2];

        simulation.run();

        let positions = &simulation.positions;
        assert!(positions.iter().all(|p| p.is_finite()));
        assert!(positions[0].sub_point(positions[1]).hypot() > 0.0);
    }

    #[test]
    fn test_spring_shortens_edge() {
        let engine = Engine::new();
        let mut simulation = Simulation::new(
            &engine,
            vec![0, 0],
            single_class(0.0, 0.0),
            StdRng::seed_from_u64(5),
        )
        .with_springs(vec![(0, 1)], 1.0);

        let before = simulation.positions[0]
            .sub_point(simulation.positions[1])
            .hypot();
        simulation.run();
        let after = simulation.positions[0]
            .sub_point(simulation.positions[1])
            .hypot();

        assert!(after < before);
    }

    #[test]
    fn test_zero_forces_converge_immediately() {
        let engine = Engine::new();
        let mut simulation = Simulation::new(
            &engine,
            vec![0; 4],
            single_class(0.0, 0.0),
            StdRng::seed_from_u64(9),
        )
        .with_springs(vec![(0, 1), (2, 3)], 0.0)
        .with_groups(vec![vec![0, 1], vec![2, 3]], Some(0.0));

        let initial = simulation.positions.clone();
        let steps = simulation.run();

        assert_eq!(steps, 1);
        assert_eq!(simulation.positions, initial);
    }

    #[test]
    fn test_center_pull_moves_toward_class_anchor() {
        let engine = Engine::new();
        let left = Point::new(0.25, 0.5);
        let right = Point::new(0.75, 0.5);
        let classes = vec![
            VertexClass {
                repulsion: 0.0,
                center_pull: 1.0,
                anchor: left,
            },
            VertexClass {
                repulsion: 0.0,
                center_pull: 1.0,
                anchor: right,
            },
        ];
        let mut simulation =
            Simulation::new(&engine, vec![0, 1], classes, StdRng::seed_from_u64(13));
        simulation.positions = vec![Point::new(0.9, 0.9), Point::new(0.1, 0.1)];

        let gap = |positions: &[Point]| {
            (
                positions[0].sub_point(left).hypot(),
                positions[1].sub_point(right).hypot(),
            )
        };

        let (u_before, v_before) = gap(&simulation.positions);
        simulation.run();
        let (u_after, v_after) = gap(&simulation.positions);

        assert!(u_after < u_before);
        assert!(v_after < v_before);
    }

    #[test]
    fn test_centroid_repulsion_separates_groups() {
        let engine = Engine::new();
        let mut simulation = Simulation::new(
            &engine,
            vec![0; 4],
            single_class(0.0, 0.0),
            StdRng::seed_from_u64(11),
        )
        .with_groups(vec![vec![0, 1], vec![2, 3]], Some(1.0));
        simulation.positions = vec![
            Point::new(0.45, 0.5),
            Point::new(0.47, 0.5),
            Point::new(0.53, 0.5),
            Point::new(0.55, 0.5),
        ];

        let centroid_gap = |positions: &[Point]| {
            let left = positions[0].midpoint(positions[1]);
            let right = positions[2].midpoint(positions[3]);
            right.sub_point(left).hypot()
        };

        let before = centroid_gap(&simulation.positions);
        simulation.run();
        let after = centroid_gap(&simulation.positions);

        assert!(after > before);
    }

    #[test]
    fn test_non_finite_force_leaves_vertex_in_place() {
        let engine = Engine::new();
        let mut simulation = Simulation::new(
            &engine,
            vec![0, 0],
            single_class(0.0, 0.0),
            StdRng::seed_from_u64(17),
        );
        let initial = simulation.positions.clone();
        let forces = [Point::new(f32::NAN, 0.0), Point::new(1.0, 0.0)];

        let total = simulation.step(&forces, 0.05);

        assert_eq!(simulation.positions[0], initial[0]);
        assert_eq!(simulation.velocities[0], Point::default());
        assert_ne!(simulation.positions[1], initial[1]);
        assert_approx_eq!(f32, total, simulation.velocities[1].hypot());
    }

    #[test]
    fn test_whole_weighting_pushes_groups_further() {
        let start = vec![
            Point::new(0.40, 0.5),
            Point::new(0.42, 0.5),
            Point::new(0.44, 0.5),
            Point::new(0.56, 0.5),
        ];
        let centroid_gap = |positions: &[Point]| {
            let left = Point::centroid(positions[..3].iter().copied()).unwrap_or_default();
            left.sub_point(positions[3]).hypot()
        };

        let gap_after = |weighting: CentroidWeighting| {
            let mut engine = Engine::new();
            engine.set_iterations(10).set_centroid_weighting(weighting);
            let mut simulation = Simulation::new(
                &engine,
                vec![0; 4],
                single_class(0.0, 0.0),
                StdRng::seed_from_u64(19),
            )
            .with_groups(vec![vec![0, 1, 2], vec![3]], Some(1.0));
            simulation.positions = start.clone();
            simulation.run();
            centroid_gap(&simulation.positions)
        };

        let before = centroid_gap(&start);
        let split = gap_after(CentroidWeighting::Split);
        let whole = gap_after(CentroidWeighting::Whole);

        assert!(split > before, "split {split} <= {before}");
        assert!(whole > split, "whole {whole} <= split {split}");
    }
}
