// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a face pool
#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot read face pool {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid face pool JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown axis '{0}', expected x, y or z")]
    UnknownAxis(String),
}
