// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! shell-openings - locate catalogued openings in a shell solid.
//!
//! Reads a habitat feature catalog and a face pool exported by the geometry
//! kernel, matches every window, door and hatch to the planar face closest to
//! its nominal size, and prints the report on stdout. Logs go to stderr.
//!
//! # Exit codes
//!
//! - `0` - at least one opening matched
//! - `1` - fatal input error (unusable catalog, unreadable face pool, bad options)
//! - `2` - inputs were usable but no opening matched

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use shell_openings_core::{locate_openings, report, MatchReport};
use tracing_subscriber::EnvFilter;

mod config;

use config::{Config, OutputFormat};

const EXIT_MATCHED: u8 = 0;
const EXIT_FATAL: u8 = 1;
const EXIT_NO_MATCHES: u8 = 2;

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    ExitCode::from(execute(&config))
}

/// Runs the search and maps its result to a process exit code.
fn execute(config: &Config) -> u8 {
    match run(config) {
        Ok(report) => exit_code(&report),
        Err(err) => {
            tracing::error!("{:#}", err);
            EXIT_FATAL
        }
    }
}

fn exit_code(report: &MatchReport) -> u8 {
    if report.has_matches() {
        EXIT_MATCHED
    } else {
        tracing::warn!(specs = report.len(), "No opening matched within tolerance");
        EXIT_NO_MATCHES
    }
}

fn run(config: &Config) -> anyhow::Result<MatchReport> {
    let match_config = config.match_config()?;

    tracing::info!(
        catalog = %config.catalog.display(),
        faces = %config.faces.display(),
        tolerance = match_config.tolerance,
        vertical_axis = %match_config.vertical_axis,
        parallel = config.parallel,
        "Starting opening search"
    );

    if config.parallel {
        rayon::ThreadPoolBuilder::new()
            .num_threads(config.worker_threads())
            .build_global()
            .context("failed to initialize rayon thread pool")?;
    }

    let report = locate_openings(&config.catalog, &config.faces, match_config, config.parallel)
        .context("opening search failed")?;

    let output = match config.format {
        OutputFormat::Text => report::render_text(&report, match_config.vertical_axis),
        OutputFormat::Json => {
            let mut json = report::render_json(&report, match_config.vertical_axis)?;
            json.push('\n');
            json
        }
    };
    print!("{}", output);

    Ok(report)
}
