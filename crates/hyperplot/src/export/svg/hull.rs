//! Inflated convex hulls around edge groups.
//!
//! A group is drawn as its convex hull grown outward by a radius: a circle
//! for one vertex, a capsule for two, and a polygon with rounded corners for
//! more. Groups that share vertices with groups drawn before them get a
//! larger radius, so nested hyperedges stay distinguishable.

use std::fmt::Write as _;

use svg::node::element as svg_element;

use hyperplot_core::{
    apply_stroke,
    draw::{LayeredOutput, RenderLayer},
    geometry::Point,
};

use super::EdgePaint;

/// Hull radius of an isolated group, relative to the vertex radius.
const BASE_RADIUS_FACTOR: f32 = 1.6;
/// Extra hull radius per level of nesting, relative to the vertex radius.
const NESTING_STEP_FACTOR: f32 = 0.6;

/// Draws one filled hull path per group, painted with the group's paint.
///
/// A hull is inflated relative to the largest vertex radius among its
/// members. Larger hulls are drawn first so that they sit beneath the
/// smaller ones they enclose.
pub fn render_hulls(
    centers: &[Point],
    radii: &[f32],
    groups: &[Vec<usize>],
    paints: &[EdgePaint],
) -> LayeredOutput {
    let depths = nesting_depths(centers.len(), groups);
    let hull_radii: Vec<f32> = groups
        .iter()
        .zip(&depths)
        .map(|(group, &depth)| {
            let vertex_radius = group
                .iter()
                .filter_map(|&vertex| radii.get(vertex).copied())
                .fold(0.0_f32, f32::max);
            vertex_radius * (BASE_RADIUS_FACTOR + NESTING_STEP_FACTOR * depth as f32)
        })
        .collect();

    let mut order: Vec<usize> = (0..groups.len().min(paints.len())).collect();
    order.sort_by(|&a, &b| hull_radii[b].total_cmp(&hull_radii[a]));

    let mut output = LayeredOutput::new();
    for idx in order {
        let points: Vec<Point> = groups[idx]
            .iter()
            .filter_map(|&vertex| centers.get(vertex).copied())
            .collect();
        let hull = convex_hull(&points);
        let Some(data) = hull_path_data(&hull, hull_radii[idx]) else {
            continue;
        };

        let paint = &paints[idx];
        let path = svg_element::Path::new()
            .set("d", data)
            .set("fill", &paint.fill)
            .set("fill-opacity", paint.fill.alpha());
        let path = apply_stroke!(path, &paint.stroke);

        output.add_to_layer(RenderLayer::Hull, Box::new(path));
    }

    output
}

/// Computes the nesting depth of every group.
///
/// Groups are visited in order. A group's depth is the highest number of
/// earlier groups any of its members already belongs to.
pub fn nesting_depths(num_v: usize, groups: &[Vec<usize>]) -> Vec<usize> {
    let mut memberships = vec![0usize; num_v];

    groups
        .iter()
        .map(|group| {
            let depth = group
                .iter()
                .filter_map(|&vertex| memberships.get(vertex).copied())
                .max()
                .unwrap_or(0);
            for &vertex in group {
                if let Some(count) = memberships.get_mut(vertex) {
                    *count += 1;
                }
            }
            depth
        })
        .collect()
}

/// Convex hull with positive signed area (Andrew's monotone chain).
///
/// Duplicate points collapse and collinear points are dropped, so the
/// result has a single point for coincident input and two points for
/// collinear input.
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.x().total_cmp(&b.x()).then(a.y().total_cmp(&b.y())));
    sorted.dedup();

    if sorted.len() <= 2 {
        return sorted;
    }

    let mut lower: Vec<Point> = Vec::with_capacity(sorted.len());
    for &point in &sorted {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], point) <= 0.0
        {
            lower.pop();
        }
        lower.push(point);
    }

    let mut upper: Vec<Point> = Vec::with_capacity(sorted.len());
    for &point in sorted.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], point) <= 0.0
        {
            upper.pop();
        }
        upper.push(point);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// SVG path data of `hull` grown outward by `radius`.
///
/// Every hull edge is shifted along its outward normal and consecutive
/// shifted edges are joined by arcs around the shared corner. Returns `None`
/// for an empty hull.
pub fn hull_path_data(hull: &[Point], radius: f32) -> Option<String> {
    match hull {
        [] => None,
        [center] => Some(circle_path_data(*center, radius)),
        _ => {
            let n = hull.len();
            let normals: Vec<Point> = (0..n)
                .map(|i| {
                    let direction = hull[(i + 1) % n].sub_point(hull[i]);
                    direction
                        .perpendicular()
                        .scale(radius / direction.hypot())
                })
                .collect();

            let start = hull[0].add_point(normals[0]);
            let mut data = format!("M {} {}", start.x(), start.y());
            for i in 0..n {
                let next = (i + 1) % n;
                let edge_end = hull[next].add_point(normals[i]);
                let arc_end = hull[next].add_point(normals[next]);
                // Writing into a String cannot fail.
                let _ = write!(
                    data,
                    " L {} {} A {radius} {radius} 0 0 1 {} {}",
                    edge_end.x(),
                    edge_end.y(),
                    arc_end.x(),
                    arc_end.y()
                );
            }
            data.push_str(" Z");
            Some(data)
        }
    }
}

fn circle_path_data(center: Point, radius: f32) -> String {
    let (x, y) = (center.x(), center.y());
    format!(
        "M {} {y} A {radius} {radius} 0 1 1 {} {y} A {radius} {radius} 0 1 1 {} {y} Z",
        x + radius,
        x - radius,
        x + radius
    )
}

fn cross(origin: Point, a: Point, b: Point) -> f32 {
    let oa = a.sub_point(origin);
    let ob = b.sub_point(origin);
    oa.x() * ob.y() - oa.y() * ob.x()
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use hyperplot_core::{color::Color, draw::StrokeDefinition};

    use super::*;

    fn signed_area(polygon: &[Point]) -> f32 {
        let n = polygon.len();
        (0..n)
            .map(|i| {
                let (a, b) = (polygon[i], polygon[(i + 1) % n]);
                a.x() * b.y() - b.x() * a.y()
            })
            .sum::<f32>()
            / 2.0
    }

    #[test]
    fn test_convex_hull_drops_interior_points() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
            Point::new(0.0, 2.0),
        ];

        let hull = convex_hull(&points);
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&Point::new(1.0, 1.0)));
        assert!(approx_eq!(f32, signed_area(&hull), 4.0));
    }

    #[test]
    fn test_convex_hull_degenerate_inputs() {
        let same = [Point::new(1.0, 1.0), Point::new(1.0, 1.0)];
        assert_eq!(convex_hull(&same), vec![Point::new(1.0, 1.0)]);

        let collinear = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
        ];
        assert_eq!(
            convex_hull(&collinear),
            vec![Point::new(0.0, 0.0), Point::new(2.0, 2.0)]
        );

        assert!(convex_hull(&[]).is_empty());
    }

    #[test]
    fn test_single_point_is_a_circle() {
        let data = hull_path_data(&[Point::new(10.0, 10.0)], 5.0).unwrap();
        assert_eq!(data, "M 15 10 A 5 5 0 1 1 5 10 A 5 5 0 1 1 15 10 Z");
    }

    #[test]
    fn test_two_points_make_a_capsule() {
        let hull = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let data = hull_path_data(&hull, 2.0).unwrap();

        assert!(data.starts_with("M 0 -2 L 10 -2 A 2 2 0 0 1 10 2"), "{data}");
        assert!(data.ends_with("L 0 2 A 2 2 0 0 1 0 -2 Z"), "{data}");
    }

    #[test]
    fn test_empty_hull_has_no_path() {
        assert!(hull_path_data(&[], 1.0).is_none());
    }

    fn paint(fill: &str) -> EdgePaint {
        EdgePaint {
            stroke: StrokeDefinition::default(),
            fill: Color::new(fill).unwrap(),
        }
    }

    #[test]
    fn test_nesting_depths_grow_with_overlap() {
        let groups = vec![vec![0, 1, 2], vec![1, 2], vec![2], vec![3]];
        assert_eq!(nesting_depths(4, &groups), vec![0, 1, 2, 0]);
    }

    #[test]
    fn test_hull_follows_largest_member() {
        let centers = [Point::new(0.0, 0.0), Point::new(50.0, 0.0)];
        let groups = vec![vec![0], vec![1]];
        let paints = [paint("red"), paint("blue")];

        let nodes = render_hulls(&centers, &[10.0, 20.0], &groups, &paints).render();
        let rendered = nodes[0].to_string();

        let blue = rendered.find(&Color::new("blue").unwrap().to_string()).unwrap();
        let red = rendered.find(&Color::new("red").unwrap().to_string()).unwrap();
        assert!(blue < red, "the larger hull is drawn first: {rendered}");
        assert!(rendered.contains("A 32 32"), "{rendered}");
        assert!(rendered.contains("A 16 16"), "{rendered}");
    }

    #[test]
    fn test_render_hulls_one_path_per_group() {
        let centers = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 8.0),
        ];
        let groups = vec![vec![0, 1, 2], vec![0], vec![1, 2]];
        let paints = vec![paint("whitesmoke"); 3];

        let output = render_hulls(&centers, &[2.0; 3], &groups, &paints);
        assert_eq!(output.layer_len(RenderLayer::Hull), 3);
    }
}
