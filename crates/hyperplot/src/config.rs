//! Configuration types for Hyperplot layout and rendering.
//!
//! This module provides configuration structures that control how
//! structures are laid out and styled. All types implement
//! [`serde::Deserialize`] and fall back to defaults for missing fields, so
//! a partial TOML file is always a valid configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Simulation constants, iteration budget and seed of the force layout.
//! - [`StyleConfig`] - Canvas size, colors, line widths and fonts of the SVG output.
//!
//! # Example
//!
//! ```
//! # use hyperplot::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().iterations(), 400);
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use hyperplot_core::{color::Color, draw::StrokeStyle};

use crate::layout::CentroidWeighting;

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the layout configuration for modification.
    pub fn layout_mut(&mut self) -> &mut LayoutConfig {
        &mut self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Force layout configuration.
///
/// The force constants are multiplied with the per-call strengths; the
/// strengths decide the balance between forces, the constants decide the
/// overall scale of the simulation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Maximum number of simulation steps.
    iterations: usize,
    /// Seed of the initial random placement. `None` picks one per run.
    seed: Option<u64>,
    step_size: f32,
    damping_factor: f32,
    max_displacement: f32,
    tolerance: f32,
    min_distance: f32,
    repulsion_constant: f32,
    spring_constant: f32,
    gravity_constant: f32,
    centroid_weighting: CentroidWeighting,
    /// Free border kept on each side of the unit square.
    margin: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            iterations: 400,
            seed: None,
            step_size: 0.1,
            damping_factor: 0.9,
            max_displacement: 0.05,
            tolerance: 1e-5,
            min_distance: 0.01,
            repulsion_constant: 0.002,
            spring_constant: 1.0,
            gravity_constant: 0.5,
            centroid_weighting: CentroidWeighting::default(),
            margin: 0.1,
        }
    }
}

impl LayoutConfig {
    /// Returns the iteration budget.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Returns the seed of the initial placement, if fixed.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn step_size(&self) -> f32 {
        self.step_size
    }

    pub fn damping_factor(&self) -> f32 {
        self.damping_factor
    }

    pub fn max_displacement(&self) -> f32 {
        self.max_displacement
    }

    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    pub fn min_distance(&self) -> f32 {
        self.min_distance
    }

    pub fn repulsion_constant(&self) -> f32 {
        self.repulsion_constant
    }

    pub fn spring_constant(&self) -> f32 {
        self.spring_constant
    }

    pub fn gravity_constant(&self) -> f32 {
        self.gravity_constant
    }

    /// Returns how centroid repulsion is shared among hyperedge members.
    pub fn centroid_weighting(&self) -> CentroidWeighting {
        self.centroid_weighting
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    /// Fixes (or clears) the seed of the initial placement.
    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }

    /// Sets the iteration budget.
    pub fn set_iterations(&mut self, iterations: usize) {
        self.iterations = iterations;
    }

    /// Sets how centroid repulsion is shared among hyperedge members.
    pub fn set_centroid_weighting(&mut self, weighting: CentroidWeighting) {
        self.centroid_weighting = weighting;
    }
}

/// Visual styling configuration for rendered drawings.
///
/// Colors are CSS color strings. Sizes are in SVG pixels; `vertex_radius`
/// and `font_size` are derived from the vertex count when left unset.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    width: f32,
    height: f32,
    background_color: Option<String>,
    vertex_color: String,
    u_vertex_color: String,
    vertex_line_color: String,
    vertex_line_width: f32,
    vertex_radius: Option<f32>,
    edge_color: String,
    edge_fill_color: String,
    edge_fill_opacity: f32,
    edge_line_width: f32,
    edge_line_style: String,
    font_size: Option<f32>,
    font_family: String,
    label_color: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 600.0,
            background_color: None,
            vertex_color: "red".to_string(),
            u_vertex_color: "magenta".to_string(),
            vertex_line_color: "black".to_string(),
            vertex_line_width: 1.0,
            vertex_radius: None,
            edge_color: "gray".to_string(),
            edge_fill_color: "whitesmoke".to_string(),
            edge_fill_opacity: 0.6,
            edge_line_width: 1.0,
            edge_line_style: "solid".to_string(),
            font_size: None,
            font_family: "sans-serif".to_string(),
            label_color: "black".to_string(),
        }
    }
}

impl StyleConfig {
    /// Returns the canvas width in pixels.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the canvas height in pixels.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Fill color of vertices (the `v` side of a bipartite graph).
    pub fn vertex_color(&self) -> Result<Color, String> {
        parse_color("vertex_color", &self.vertex_color)
    }

    /// Fill color of `u` vertices of a bipartite graph.
    pub fn u_vertex_color(&self) -> Result<Color, String> {
        parse_color("u_vertex_color", &self.u_vertex_color)
    }

    /// Border color of vertices.
    pub fn vertex_line_color(&self) -> Result<Color, String> {
        parse_color("vertex_line_color", &self.vertex_line_color)
    }

    pub fn vertex_line_width(&self) -> f32 {
        self.vertex_line_width
    }

    /// Explicit vertex radius in pixels, if configured.
    pub fn vertex_radius(&self) -> Option<f32> {
        self.vertex_radius
    }

    /// Stroke color of edges and hyperedge outlines.
    pub fn edge_color(&self) -> Result<Color, String> {
        parse_color("edge_color", &self.edge_color)
    }

    /// Fill color of hyperedge hulls, with the configured opacity applied.
    pub fn edge_fill_color(&self) -> Result<Color, String> {
        parse_color("edge_fill_color", &self.edge_fill_color)
            .map(|color| color.with_alpha(self.edge_fill_opacity.clamp(0.0, 1.0)))
    }

    pub fn edge_line_width(&self) -> f32 {
        self.edge_line_width
    }

    /// Dash style of edges and hyperedge outlines.
    pub fn edge_line_style(&self) -> StrokeStyle {
        // Unknown values are custom dash patterns; only an empty value falls back to solid.
        self.edge_line_style.parse().unwrap_or_default()
    }

    /// Explicit label font size in pixels, if configured.
    pub fn font_size(&self) -> Option<f32> {
        self.font_size
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn label_color(&self) -> Result<Color, String> {
        parse_color("label_color", &self.label_color)
    }
}

fn parse_color(field: &str, value: &str) -> Result<Color, String> {
    Color::new(value).map_err(|err| format!("Invalid {field} in config: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style_colors_parse() {
        let style = StyleConfig::default();
        assert!(style.vertex_color().is_ok());
        assert!(style.u_vertex_color().is_ok());
        assert!(style.vertex_line_color().is_ok());
        assert!(style.edge_color().is_ok());
        assert!(style.label_color().is_ok());
        assert_eq!(style.background_color(), Ok(None));
    }

    #[test]
    fn test_edge_fill_color_applies_opacity() {
        let fill = StyleConfig::default().edge_fill_color().unwrap();
        assert!((fill.alpha() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_color_reports_field() {
        let style = StyleConfig {
            edge_color: "not-a-color".to_string(),
            ..StyleConfig::default()
        };
        let err = style.edge_color().unwrap_err();
        assert!(err.contains("edge_color"));
    }

    #[test]
    fn test_edge_line_style() {
        let style = StyleConfig {
            edge_line_style: "dashed".to_string(),
            ..StyleConfig::default()
        };
        assert_eq!(style.edge_line_style(), StrokeStyle::Dashed);
        assert_eq!(StyleConfig::default().edge_line_style(), StrokeStyle::Solid);
    }

    #[test]
    fn test_layout_defaults() {
        let layout = LayoutConfig::default();
        assert_eq!(layout.iterations(), 400);
        assert_eq!(layout.seed(), None);
        assert_eq!(layout.centroid_weighting(), CentroidWeighting::Split);
        assert!((layout.margin() - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn test_layout_setters() {
        let mut layout = LayoutConfig::default();
        layout.set_seed(Some(3));
        layout.set_iterations(10);
        layout.set_centroid_weighting(CentroidWeighting::Whole);

        assert_eq!(layout.seed(), Some(3));
        assert_eq!(layout.iterations(), 10);
        assert_eq!(layout.centroid_weighting(), CentroidWeighting::Whole);
    }
}
