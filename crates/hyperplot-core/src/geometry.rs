//! Geometric primitives for layout and rendering.
//!
//! This module provides the small set of geometric types used by the layout
//! engine and the SVG renderer.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate (also used as a 2D vector for forces)
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - An axis-aligned bounding box defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! Layout coordinates live in the unit square with the Y axis pointing up,
//! the way plotting libraries present them:
//!
//! ```text
//!    +Y
//!     ▲
//!   1 ┤
//!     │
//!     │
//!   0 └──────────► +X
//!     0          1
//! ```
//!
//! The SVG renderer flips the Y axis when mapping layout coordinates onto the
//! canvas, so `y = 1` is drawn at the top of the picture.

/// A 2D point in layout coordinate space.
///
/// Points use `f32` coordinates and double as 2D vectors in the force
/// simulation (displacements, velocities and forces are all `Point`s).
///
/// # Examples
///
/// ```
/// # use hyperplot_core::geometry::Point;
/// let p1 = Point::new(0.25, 0.5);
/// let p2 = Point::new(0.75, 0.5);
///
/// // Vector addition
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 1.0);
/// assert_eq!(sum.y(), 1.0);
///
/// // Distance between the two points
/// assert_eq!(p2.sub_point(p1).hypot(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    /// Checks that neither coordinate is NaN or infinite
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Calculates the hypotenuse (Euclidean length of the vector)
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Multiplies both coordinates by the given factor.
    ///
    /// # Examples
    ///
    /// ```
    /// # use hyperplot_core::geometry::Point;
    /// let force = Point::new(0.2, -0.4);
    ///
    /// let halved = force.scale(0.5);
    /// assert_eq!(halved.x(), 0.1);
    /// assert_eq!(halved.y(), -0.2);
    /// ```
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Returns this vector shortened to `max_length` if it is longer.
    ///
    /// Vectors at or below the limit are returned unchanged.
    pub fn clamp_length(self, max_length: f32) -> Self {
        let length = self.hypot();
        if length > max_length && length > 0.0 {
            self.scale(max_length / length)
        } else {
            self
        }
    }

    /// Returns the vector rotated by 90 degrees clockwise, `(y, -x)`.
    ///
    /// For an edge of a polygon with positive signed area this is the
    /// outward-facing normal direction.
    pub fn perpendicular(self) -> Self {
        Self {
            x: self.y,
            y: -self.x,
        }
    }

    /// Calculates the mean position of a set of points.
    ///
    /// Returns `None` for an empty iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// # use hyperplot_core::geometry::Point;
    /// let points = [Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.5, 1.5)];
    /// let centroid = Point::centroid(points).unwrap();
    /// assert_eq!(centroid, Point::new(0.5, 0.5));
    ///
    /// assert!(Point::centroid(std::iter::empty()).is_none());
    /// ```
    pub fn centroid(points: impl IntoIterator<Item = Point>) -> Option<Point> {
        let (sum, count) = points
            .into_iter()
            .fold((Point::default(), 0usize), |(sum, count), point| {
                (sum.add_point(point), count + 1)
            });

        (count > 0).then(|| sum.scale(1.0 / count as f32))
    }
}

/// Canvas dimensions in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }
}

/// Represents an axis-aligned bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a bounds from its minimum and maximum corners
    pub fn new(min: Point, max: Point) -> Self {
        Self {
            min_x: min.x,
            min_y: min.y,
            max_x: max.x,
            max_y: max.y,
        }
    }

    /// Computes the smallest bounds containing every point.
    ///
    /// Returns `None` for an empty iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// # use hyperplot_core::geometry::{Bounds, Point};
    /// let bounds = Bounds::from_points([
    ///     Point::new(0.2, 0.9),
    ///     Point::new(0.6, 0.1),
    ///     Point::new(0.4, 0.5),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(bounds.min_x(), 0.2);
    /// assert_eq!(bounds.max_y(), 0.9);
    /// ```
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let initial = Self::new(first, first);

        Some(points.fold(initial, |acc, point| acc.merge(&Self::new(point, point))))
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns `true` if the point lies inside or on the border of the bounds
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Merges two bounds to create a larger bounds that contains both.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let p1 = Point::new(1.0, 2.0);
        let p2 = Point::new(3.0, 5.0);

        assert_eq!(p1.add_point(p2), Point::new(4.0, 7.0));
        assert_eq!(p2.sub_point(p1), Point::new(2.0, 3.0));
        assert_eq!(p1.midpoint(p2), Point::new(2.0, 3.5));
        assert_eq!(Point::new(3.0, 4.0).hypot(), 5.0);
    }

    #[test]
    fn test_point_is_finite() {
        assert!(Point::new(1.0, -1.0).is_finite());
        assert!(!Point::new(f32::NAN, 0.0).is_finite());
        assert!(!Point::new(0.0, f32::INFINITY).is_finite());
    }

    #[test]
    fn test_point_clamp_length() {
        let long = Point::new(3.0, 4.0).clamp_length(1.0);
        assert!((long.hypot() - 1.0).abs() < 1e-6);
        assert!((long.x() - 0.6).abs() < 1e-6);

        let short = Point::new(0.3, 0.4);
        assert_eq!(short.clamp_length(1.0), short);

        assert_eq!(Point::default().clamp_length(0.0), Point::default());
    }

    #[test]
    fn test_point_perpendicular() {
        // Bottom edge of a counter-clockwise square points down and out.
        let edge = Point::new(1.0, 0.0);
        assert_eq!(edge.perpendicular(), Point::new(0.0, -1.0));
    }

    #[test]
    fn test_bounds_from_points() {
        let bounds = Bounds::from_points([Point::new(1.0, 1.0)]).unwrap();
        assert_eq!(bounds.width(), 0.0);
        assert_eq!(bounds.height(), 0.0);

        assert!(Bounds::from_points(Vec::new()).is_none());
    }

    #[test]
    fn test_bounds_contains() {
        let bounds = Bounds::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        assert!(bounds.contains(Point::new(0.0, 1.0)));
        assert!(bounds.contains(Point::new(0.5, 0.5)));
        assert!(!bounds.contains(Point::new(1.01, 0.5)));
    }

    #[test]
    fn test_size_accessors() {
        let size = Size::new(600.0, 400.0);
        assert_eq!(size.width(), 600.0);
        assert_eq!(size.height(), 400.0);
    }
}
