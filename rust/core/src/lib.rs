// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Shell-Openings Core
//!
//! Locates catalogued openings (windows, doors, hatches) in a shell solid by
//! size inference. Each catalog entry is matched against a shared pool of
//! planar faces; the face whose in-plane bounding size is closest to the
//! entry's nominal width and height wins, provided its error stays within
//! tolerance.
//!
//! ## Overview
//!
//! - **Catalog**: ordered, validated opening specifications ([`Catalog`])
//! - **Scoring**: orientation-invariant L1 size error ([`size_error`])
//! - **Matching**: per-entry best fit over a read-only face pool ([`Matcher`])
//! - **Reporting**: deterministic text and JSON output ([`report`])
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shell_openings_core::{Catalog, FacePool, MatchConfig, Matcher};
//! use shell_openings_geometry::load_faces;
//!
//! let catalog = Catalog::from_path("habitat.json")?;
//! let faces = load_faces("faces.json")?;
//!
//! let matcher = Matcher::new(MatchConfig::default());
//! let report = matcher.match_all(catalog.specs(), FacePool::new(&faces));
//!
//! for result in report.matches() {
//!     println!("{} at {:?}", result.feature_id, result.center);
//! }
//! ```
//!
//! Unmatched entries are part of the report, never errors. The only fatal
//! input condition is a catalog without a single usable entry.

pub mod catalog;
pub mod error;
pub mod matcher;
pub mod opening;
pub mod pipeline;
pub mod report;
pub mod scoring;

pub use catalog::Catalog;
pub use error::{Error, Result};
pub use matcher::{Candidate, FacePool, MatchConfig, Matcher, DEFAULT_TOLERANCE};
pub use opening::{
    Facing, MatchOutcome, MatchReport, MatchResult, OpeningKind, OpeningSpec, Unmatched,
};
pub use pipeline::locate_openings;
pub use scoring::{size_error, ORIENTATIONS};

pub use shell_openings_geometry::{Axis, FaceDescriptor, Size2};
