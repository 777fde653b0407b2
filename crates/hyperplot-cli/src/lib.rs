//! Hyperplot CLI library
//!
//! This module contains the core CLI logic for the Hyperplot drawing tool.

pub mod error_adapter;
pub mod input;

mod args;
mod config;

pub use args::Args;

use std::{fs, io};

use log::info;
use thiserror::Error;

use hyperplot::{HyperplotError, PlotBuilder, structure::StructureError};

use input::InputError;

/// Errors of a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    /// The input file is not a valid structure description.
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Hyperplot(#[from] HyperplotError),
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::Hyperplot(err.into())
    }
}

impl From<StructureError> for CliError {
    fn from(err: StructureError) -> Self {
        Self::Hyperplot(err.into())
    }
}

/// Run the Hyperplot CLI application
///
/// This function reads the input structure, lays it out, and writes the
/// resulting SVG to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed input files
/// - Invalid structures, strengths or edge styles
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing structure"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(seed) = args.seed {
        app_config.layout_mut().set_seed(Some(seed));
    }

    let source = fs::read_to_string(&args.input)?;
    let plot = input::parse(&source, args.edge_style)?;

    let builder = PlotBuilder::new(app_config);
    let svg = plot.draw(&builder)?;

    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
