//! Error types for Hyperplot operations.
//!
//! This module provides the main error type [`HyperplotError`] which wraps
//! the errors of the layout engine, structure construction and rendering.

use std::io;

use thiserror::Error;

use crate::{export, layout::LayoutError, structure::StructureError};

/// The main error type for Hyperplot operations.
#[derive(Debug, Error)]
pub enum HyperplotError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Structure error: {0}")]
    Structure(#[from] StructureError),

    #[error("Export error: {0}")]
    Export(#[from] export::Error),

    #[error("Config error: {0}")]
    Config(String),
}
