// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for catalog loading and matching configuration.

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that stop a matching run before it starts.
///
/// Unmatched openings and degenerate faces are reported through
/// [`crate::MatchReport`], never through this type.
#[derive(Debug, Error)]
pub enum Error {
    /// The catalog file could not be read.
    #[error("cannot read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The catalog is not valid JSON or has an unexpected layout.
    #[error("invalid catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// No catalog entry survived filtering.
    #[error("catalog contains no usable opening specifications")]
    EmptyCatalog,

    /// Tolerance is negative, NaN or infinite.
    #[error("tolerance must be a finite non-negative number, got {0}")]
    InvalidTolerance(f64),

    /// The face pool could not be loaded.
    #[error(transparent)]
    Geometry(#[from] shell_openings_geometry::Error),
}
