// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! File-to-report pipeline used by the command line tool.

use std::path::Path;

use shell_openings_geometry::load_faces;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::matcher::{FacePool, MatchConfig, Matcher};
use crate::opening::MatchReport;

/// Loads the catalog, then the face pool, and matches every entry.
///
/// The catalog is read first so that an unusable catalog fails the run
/// before any geometry is touched.
pub fn locate_openings(
    catalog_path: &Path,
    faces_path: &Path,
    config: MatchConfig,
    parallel: bool,
) -> Result<MatchReport> {
    let catalog = Catalog::from_path(catalog_path)?;
    tracing::info!(
        catalog = %catalog_path.display(),
        specs = catalog.len(),
        "Loaded opening catalog"
    );

    let faces = load_faces(faces_path)?;
    tracing::info!(
        faces_file = %faces_path.display(),
        faces = faces.len(),
        "Loaded face pool"
    );

    let matcher = Matcher::new(config);
    let pool = FacePool::new(&faces);
    let report = if parallel {
        matcher.match_all_par(catalog.specs(), pool)
    } else {
        matcher.match_all(catalog.specs(), pool)
    };
    Ok(report)
}
