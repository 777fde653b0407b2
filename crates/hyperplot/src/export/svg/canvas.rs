//! Mapping from the unit square to SVG pixels.

use svg::node::element as svg_element;

use hyperplot_core::{
    color::Color,
    draw::SvgNode,
    geometry::{Point, Size},
};

/// Fraction of the shorter canvas side used to size vertices of small structures.
const VERTEX_RADIUS_FACTOR: f32 = 0.12;

/// The drawing surface.
///
/// Layout coordinates live in `[0,1]²` with `y` pointing up; SVG pixels have
/// `y` pointing down, so the mapping flips the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    size: Size,
}

impl Canvas {
    pub fn new(size: Size) -> Self {
        Self { size }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Maps a layout coordinate to a pixel position.
    pub fn to_pixel(&self, point: Point) -> Point {
        Point::new(
            point.x() * self.size.width(),
            (1.0 - point.y()) * self.size.height(),
        )
    }

    /// Vertex radius used when the style does not configure one.
    ///
    /// Shrinks with the square root of the vertex count so that crowded
    /// drawings stay readable.
    pub fn default_vertex_radius(&self, num_v: usize) -> f32 {
        let side = self.size.width().min(self.size.height());
        side * VERTEX_RADIUS_FACTOR / ((num_v + 10) as f32).sqrt()
    }

    /// A rectangle covering the whole canvas.
    pub fn background(&self, color: &Color) -> SvgNode {
        let rect = svg_element::Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", self.size.width())
            .set("height", self.size.height())
            .set("fill", color)
            .set("fill-opacity", color.alpha());
        Box::new(rect)
    }
}
