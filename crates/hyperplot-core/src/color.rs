//! CSS colors for vertices, edges, hulls and labels.
//!
//! [`Color`] parses any CSS color string through the `color` crate and
//! renders back to a string SVG accepts. Opacity is kept in the alpha
//! channel and written out separately as `fill-opacity` or `stroke-opacity`.

use std::{fmt, str::FromStr};

use color::DynamicColor;

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Parses a CSS color such as `"#ff0000"`, `"rgb(255 0 0)"` or `"whitesmoke"`.
    ///
    /// ```
    /// use hyperplot_core::color::Color;
    ///
    /// assert!(Color::new("#ff0000").is_ok());
    /// assert!(Color::new("whitesmoke").is_ok());
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(css: &str) -> Result<Self, String> {
        DynamicColor::from_str(css)
            .map(|color| Self { color })
            .map_err(|err| format!("invalid color `{css}`: {err}"))
    }

    /// The color as a token usable inside an SVG id.
    ///
    /// Marker ids are built from it, so each edge color gets its own arrow
    /// head.
    ///
    /// ```
    /// use hyperplot_core::color::Color;
    ///
    /// let token = Color::new("#ff8000").unwrap().id_token();
    /// assert!(token.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    /// assert!(token.starts_with(|c: char| c.is_ascii_alphabetic()));
    /// ```
    pub fn id_token(self) -> String {
        let token: String = self
            .to_string()
            .chars()
            .map(|c| match c {
                '#' => 'x',
                c if c.is_ascii_alphanumeric() => c,
                _ => '_',
            })
            .collect();

        if token.starts_with(|c: char| c.is_ascii_alphabetic()) {
            token
        } else {
            format!("c{token}")
        }
    }

    /// The same color with its alpha channel replaced.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Alpha channel in `[0, 1]`.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}
