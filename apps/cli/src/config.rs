// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command line configuration, with environment variable fallbacks.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use shell_openings_core::{MatchConfig, DEFAULT_TOLERANCE};
use shell_openings_geometry::Axis;

/// Output format of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// YAML-like listing
    Text,
    /// Pretty-printed JSON document
    Json,
}

/// Locate catalogued window, door and hatch openings among the planar faces
/// of a shell solid.
#[derive(Debug, Clone, Parser)]
#[command(name = "shell-openings", version, about)]
pub struct Config {
    /// Face pool exported by the geometry kernel (JSON).
    #[arg(long, env = "OPENINGS_FACES")]
    pub faces: PathBuf,

    /// Habitat feature catalog (JSON).
    #[arg(long, env = "OPENINGS_CATALOG", default_value = "habitat.json")]
    pub catalog: PathBuf,

    /// Maximum accepted size error in millimeters.
    #[arg(long, env = "OPENINGS_TOLERANCE", default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: f64,

    /// Vertical axis of the solid, used for sill and threshold heights.
    #[arg(long, env = "OPENINGS_VERTICAL_AXIS", default_value = "z")]
    pub vertical_axis: Axis,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Match catalog entries across worker threads.
    #[arg(long)]
    pub parallel: bool,

    /// Number of worker threads for --parallel (defaults to the CPU count).
    #[arg(long, env = "WORKER_THREADS")]
    pub threads: Option<usize>,
}

impl Config {
    /// Validated matching parameters.
    pub fn match_config(&self) -> anyhow::Result<MatchConfig> {
        let config = MatchConfig::new(self.tolerance).context("invalid --tolerance")?;
        Ok(config.with_vertical_axis(self.vertical_axis))
    }

    pub fn worker_threads(&self) -> usize {
        self.threads.filter(|&n| n > 0).unwrap_or_else(num_cpus::get)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("shell-openings").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let config = parse(&["--faces", "faces.json"]);
        assert_eq!(config.catalog, PathBuf::from("habitat.json"));
        assert_eq!(config.tolerance, 3.0);
        assert_eq!(config.vertical_axis, Axis::Z);
        assert_eq!(config.format, OutputFormat::Text);
        assert!(!config.parallel);

        let m = config.match_config().unwrap();
        assert_eq!(m.tolerance, 3.0);
        assert_eq!(m.vertical_axis, Axis::Z);
    }

    #[test]
    fn explicit_options() {
        let config = parse(&[
            "--faces", "f.json", "--catalog", "c.json", "--tolerance", "5.5",
            "--vertical-axis", "y", "--format", "json", "--parallel", "--threads", "2",
        ]);
        assert_eq!(config.vertical_axis, Axis::Y);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.worker_threads(), 2);
        assert_eq!(config.match_config().unwrap().tolerance, 5.5);
    }

    #[test]
    fn negative_tolerance_is_rejected() {
        let config = parse(&["--faces", "f.json", "--tolerance=-1"]);
        assert!(config.match_config().is_err());
    }

    #[test]
    fn unknown_axis_is_rejected() {
        let result = Config::try_parse_from(["shell-openings", "--faces", "f.json", "--vertical-axis", "w"]);
        assert!(result.is_err());
    }
}
