//! Strokes for edges, hull outlines and vertex borders.
//!
//! A [`StrokeDefinition`] bundles color, width and [`StrokeStyle`]. The
//! [`apply_stroke!`](crate::apply_stroke!) macro writes it onto any SVG
//! element that accepts `stroke-*` attributes:
//!
//! ```
//! use hyperplot_core::{color::Color, draw::{StrokeDefinition, StrokeStyle}};
//! use svg::node::element as svg_element;
//!
//! let stroke = StrokeDefinition::new(Color::new("gray").unwrap(), 2.0)
//!     .with_style(StrokeStyle::Dashed);
//!
//! let line = svg_element::Line::new().set("x2", 10).set("y2", 10);
//! let line = hyperplot_core::apply_stroke!(line, &stroke);
//! assert!(line.to_string().contains("stroke-dasharray=\"8 6\""));
//! ```

use std::str::FromStr;

use crate::color::Color;

/// Dash pattern of a stroke.
///
/// Named patterns scale with the stroke width so that thick edges keep
/// readable gaps.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    /// Dashes four widths long, three widths apart.
    Dashed,
    /// Dots one width long, two widths apart.
    Dotted,
    /// A raw SVG dasharray, used as given.
    Custom(String),
}

impl FromStr for StrokeStyle {
    type Err = String;

    /// Parses `solid`, `dashed` or `dotted`; anything else is kept as a
    /// custom dasharray.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            "" => Err("empty stroke style".to_string()),
            pattern => Ok(Self::Custom(pattern.to_string())),
        }
    }
}

impl StrokeStyle {
    /// SVG `stroke-dasharray` for a stroke of the given width, `None` when
    /// solid.
    pub fn dasharray(&self, width: f32) -> Option<String> {
        let scaled = |dash: f32, gap: f32| format!("{} {}", dash * width, gap * width);
        match self {
            Self::Solid => None,
            Self::Dashed => Some(scaled(4.0, 3.0)),
            Self::Dotted => Some(scaled(1.0, 2.0)),
            Self::Custom(pattern) => Some(pattern.clone()),
        }
    }
}

/// Color, width and dash style of a stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
}

impl StrokeDefinition {
    /// A solid stroke.
    ///
    /// ```
    /// use hyperplot_core::{color::Color, draw::StrokeDefinition};
    ///
    /// let stroke = StrokeDefinition::new(Color::new("black").unwrap(), 2.0);
    /// assert_eq!(stroke.width(), 2.0);
    /// assert_eq!(stroke.dasharray(), None);
    /// ```
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
        }
    }

    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }

    /// Dasharray of this stroke at its own width.
    pub fn dasharray(&self) -> Option<String> {
        self.style.dasharray(self.width)
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::new(Color::default(), 1.0)
    }
}

/// Sets `stroke`, `stroke-opacity`, `stroke-width` and, for non-solid
/// strokes, `stroke-dasharray` on an SVG element.
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let stroke = $stroke;
        let element = $element
            .set("stroke", stroke.color().to_string())
            .set("stroke-opacity", stroke.color().alpha())
            .set("stroke-width", stroke.width());

        match stroke.dasharray() {
            Some(dasharray) => element.set("stroke-dasharray", dasharray),
            None => element,
        }
    }};
}
