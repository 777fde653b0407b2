//! Command-line argument definitions for the Hyperplot CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, layout seeding, edge style and logging verbosity.

use clap::Parser;

use hyperplot::EdgeStyle;

/// Command-line arguments for the Hyperplot drawing tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input structure file (TOML)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Seed of the initial layout, for reproducible drawings
    #[arg(long)]
    pub seed: Option<u64>,

    /// Edge style (line, circle), overriding the input file and the structure default
    #[arg(long)]
    pub edge_style: Option<EdgeStyle>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let args = Args::try_parse_from(["hyperplot", "graph.toml"]).unwrap();
        assert_eq!(args.input, "graph.toml");
        assert_eq!(args.output, "out.svg");
        assert_eq!(args.seed, None);
        assert_eq!(args.edge_style, None);
    }

    #[test]
    fn test_parse_all_flags() {
        let args = Args::try_parse_from([
            "hyperplot",
            "hg.toml",
            "-o",
            "hg.svg",
            "-c",
            "config.toml",
            "--seed",
            "42",
            "--edge-style",
            "circle",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(args.output, "hg.svg");
        assert_eq!(args.config.as_deref(), Some("config.toml"));
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.edge_style, Some(EdgeStyle::Circle));
        assert_eq!(args.log_level, "debug");
    }

    #[test]
    fn test_unknown_edge_style_rejected() {
        let result = Args::try_parse_from(["hyperplot", "g.toml", "--edge-style", "star"]);
        assert!(result.is_err());
    }
}
