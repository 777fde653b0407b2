//! Per-vertex and per-edge styling on top of the configured style.
//!
//! Every override is optional. A list, when given, holds one entry per
//! vertex (or per edge) in index order. Sizes are relative to the drawing's
//! base vertex radius and font size, so `1.0` keeps the configured look.

use hyperplot_core::color::Color;

use crate::export::Error;

/// Overrides for one class of vertices.
///
/// A bipartite drawing carries one set for the `u` side and one for the `v`
/// side; every other drawing has a single set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexOverrides {
    colors: Option<Vec<String>>,
    sizes: Option<Vec<f32>>,
    line_widths: Option<Vec<f32>>,
    font_scale: Option<f32>,
}

impl VertexOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// One CSS fill color per vertex.
    pub fn with_colors(mut self, colors: Vec<String>) -> Self {
        self.colors = Some(colors);
        self
    }

    /// One radius factor per vertex.
    pub fn with_sizes(mut self, sizes: Vec<f32>) -> Self {
        self.sizes = Some(sizes);
        self
    }

    /// One border width per vertex, in pixels.
    pub fn with_line_widths(mut self, line_widths: Vec<f32>) -> Self {
        self.line_widths = Some(line_widths);
        self
    }

    /// Label font size factor shared by every vertex of the class.
    pub fn with_font_scale(mut self, font_scale: f32) -> Self {
        self.font_scale = Some(font_scale);
        self
    }

    pub fn font_scale(&self) -> f32 {
        self.font_scale.unwrap_or(1.0)
    }

    pub fn size(&self, vertex: usize) -> f32 {
        value_at(self.sizes.as_deref(), vertex).unwrap_or(1.0)
    }

    pub fn line_width(&self, vertex: usize) -> Option<f32> {
        value_at(self.line_widths.as_deref(), vertex)
    }

    /// Parsed fill colors, `None` when no colors are set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Style`] for a color that cannot be parsed.
    pub fn colors(&self) -> Result<Option<Vec<Color>>, Error> {
        parse_colors(self.colors.as_deref())
    }

    /// Checks the overrides against a class of `count` vertices.
    ///
    /// # Errors
    ///
    /// - [`Error::ElementCount`] if a list length differs from `count`.
    /// - [`Error::InvalidSize`] for a non-positive size or font factor, or a
    ///   negative line width.
    /// - [`Error::Style`] for a color that cannot be parsed.
    pub fn check(&self, count: usize) -> Result<(), Error> {
        check_count("vertex colors", self.colors.as_deref(), count)?;
        check_count("vertex sizes", self.sizes.as_deref(), count)?;
        check_count("vertex line widths", self.line_widths.as_deref(), count)?;

        check_values("vertex size", self.sizes.as_deref(), |size| size > 0.0)?;
        check_values("vertex line width", self.line_widths.as_deref(), |width| {
            width >= 0.0
        })?;
        if let Some(scale) = self.font_scale {
            check_values("font scale", Some(&[scale][..]), |scale| scale > 0.0)?;
        }
        self.colors().map(|_| ())
    }
}

/// Overrides for the edges of a drawing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeOverrides {
    colors: Option<Vec<String>>,
    fill_colors: Option<Vec<String>>,
    line_widths: Option<Vec<f32>>,
}

impl EdgeOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// One CSS stroke color per edge.
    pub fn with_colors(mut self, colors: Vec<String>) -> Self {
        self.colors = Some(colors);
        self
    }

    /// One CSS hull fill color per edge. Only hulls are filled.
    pub fn with_fill_colors(mut self, fill_colors: Vec<String>) -> Self {
        self.fill_colors = Some(fill_colors);
        self
    }

    /// One stroke width per edge, in pixels.
    pub fn with_line_widths(mut self, line_widths: Vec<f32>) -> Self {
        self.line_widths = Some(line_widths);
        self
    }

    pub fn line_width(&self, edge: usize) -> Option<f32> {
        value_at(self.line_widths.as_deref(), edge)
    }

    /// Parsed stroke colors, `None` when no colors are set.
    pub fn colors(&self) -> Result<Option<Vec<Color>>, Error> {
        parse_colors(self.colors.as_deref())
    }

    /// Parsed fill colors, `None` when no fill colors are set.
    pub fn fill_colors(&self) -> Result<Option<Vec<Color>>, Error> {
        parse_colors(self.fill_colors.as_deref())
    }

    /// Checks the overrides against `count` edges.
    ///
    /// # Errors
    ///
    /// Same as [`VertexOverrides::check`].
    pub fn check(&self, count: usize) -> Result<(), Error> {
        check_count("edge colors", self.colors.as_deref(), count)?;
        check_count("edge fill colors", self.fill_colors.as_deref(), count)?;
        check_count("edge line widths", self.line_widths.as_deref(), count)?;

        check_values("edge line width", self.line_widths.as_deref(), |width| {
            width >= 0.0
        })?;
        self.colors()?;
        self.fill_colors().map(|_| ())
    }
}

fn value_at(values: Option<&[f32]>, idx: usize) -> Option<f32> {
    values.and_then(|values| values.get(idx).copied())
}

fn parse_colors(colors: Option<&[String]>) -> Result<Option<Vec<Color>>, Error> {
    colors
        .map(|colors| {
            colors
                .iter()
                .map(|css| Color::new(css).map_err(Error::Style))
                .collect()
        })
        .transpose()
}

fn check_count<T>(attribute: &'static str, values: Option<&[T]>, expected: usize) -> Result<(), Error> {
    match values {
        Some(values) if values.len() != expected => Err(Error::ElementCount {
            attribute,
            expected,
            actual: values.len(),
        }),
        _ => Ok(()),
    }
}

fn check_values(
    attribute: &'static str,
    values: Option<&[f32]>,
    valid: impl Fn(f32) -> bool,
) -> Result<(), Error> {
    let invalid = values
        .unwrap_or_default()
        .iter()
        .find(|&&value| !value.is_finite() || !valid(value));
    match invalid {
        Some(&value) => Err(Error::InvalidSize { attribute, value }),
        None => Ok(()),
    }
}
