//! Hyperplot Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Hyperplot layout
//! engine and its renderers. It includes:
//!
//! - **Geometry**: Points and bounding boxes in layout space ([`geometry`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Draw**: Stroke definitions and layered SVG output ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
