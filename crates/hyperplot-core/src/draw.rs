//! Drawing primitives shared by the SVG renderers.
//!
//! - [`StrokeDefinition`] and [`StrokeStyle`] describe how lines are stroked.
//! - [`LayeredOutput`] collects SVG nodes by [`RenderLayer`] so that hulls,
//!   edges, vertices and labels are emitted in a stable z-order.

mod layer;
mod stroke;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use stroke::{StrokeDefinition, StrokeStyle};
