// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Opening catalog loading.
//!
//! Reads the habitat feature list (JSON) and turns it into an ordered list of
//! [`OpeningSpec`]s: windows first, then doors, then hatches, each in file
//! order. Entries without an id or without a positive size, and repeats of an
//! id already seen, are skipped with a warning; they never reach the matcher.
//!
//! ```json
//! {"features": {
//!   "windows": [{"id": "WIN-01", "cutout_width": 670, "cutout_height": 1063, "location": "rear driver"}],
//!   "doors":   [{"id": "DOOR-01", "opening_width": 693, "opening_height": 1766}],
//!   "hatches": [{"id": "HATCH-01", "opening_width": 600, "opening_height": 550}]
//! }}
//! ```

use std::path::Path;

use rustc_hash::FxHashSet;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::opening::{OpeningKind, OpeningSpec};

#[derive(Debug, Default, Deserialize)]
struct HabitatDocument {
    #[serde(default)]
    features: FeatureLists,
}

#[derive(Debug, Default, Deserialize)]
struct FeatureLists {
    #[serde(default)]
    windows: Vec<FeatureEntry>,
    #[serde(default)]
    doors: Vec<FeatureEntry>,
    #[serde(default)]
    hatches: Vec<FeatureEntry>,
}

/// Windows list their cut-out size, doors and hatches their opening size.
#[derive(Debug, Deserialize)]
struct FeatureEntry {
    id: Option<String>,
    #[serde(alias = "cutout_width", alias = "opening_width")]
    width: Option<f64>,
    #[serde(alias = "cutout_height", alias = "opening_height")]
    height: Option<f64>,
    location: Option<String>,
}

impl FeatureEntry {
    fn into_spec(self, kind: OpeningKind) -> Option<OpeningSpec> {
        let spec = OpeningSpec::new(
            self.id.unwrap_or_default(),
            kind,
            self.width.unwrap_or(0.0),
            self.height.unwrap_or(0.0),
            self.location,
        );
        if spec.is_usable() {
            Some(spec)
        } else {
            tracing::warn!(
                feature_id = %spec.feature_id,
                kind = %kind,
                width = spec.width,
                height = spec.height,
                "Skipping catalog entry without id or positive size"
            );
            None
        }
    }
}

/// Validated, ordered opening specifications.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    specs: Vec<OpeningSpec>,
}

impl Catalog {
    /// Builds a catalog, dropping unusable entries.
    ///
    /// A repeated feature id keeps its first entry; later ones are skipped.
    /// Fails only when nothing usable remains.
    pub fn new(specs: impl IntoIterator<Item = OpeningSpec>) -> Result<Self> {
        let mut seen = FxHashSet::default();
        let mut kept = Vec::new();

        for spec in specs {
            if !spec.is_usable() {
                tracing::warn!(feature_id = %spec.feature_id, "Skipping unusable opening specification");
                continue;
            }
            if !seen.insert(spec.feature_id.clone()) {
                tracing::warn!(
                    feature_id = %spec.feature_id,
                    kind = %spec.kind,
                    "Skipping catalog entry with duplicate feature id"
                );
                continue;
            }
            kept.push(spec);
        }

        if kept.is_empty() {
            return Err(Error::EmptyCatalog);
        }

        tracing::debug!(specs = kept.len(), "Catalog loaded");
        Ok(Self { specs: kept })
    }

    /// Parses a habitat feature document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let doc: HabitatDocument = serde_json::from_str(content)?;
        let FeatureLists {
            windows,
            doors,
            hatches,
        } = doc.features;

        let specs = windows
            .into_iter()
            .filter_map(|e| e.into_spec(OpeningKind::Window))
            .chain(doors.into_iter().filter_map(|e| e.into_spec(OpeningKind::Door)))
            .chain(hatches.into_iter().filter_map(|e| e.into_spec(OpeningKind::Hatch)));

        Self::new(specs)
    }

    /// Reads and parses a habitat feature file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn specs(&self) -> &[OpeningSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HABITAT: &str = r#"{
        "name": "Osterath habitat",
        "features": {
            "doors": [
                {"id": "DOOR-01", "opening_width": 693, "opening_height": 1766, "location": "entry"}
            ],
            "windows": [
                {"id": "WIN-01", "cutout_width": 670, "cutout_height": 1063, "location": "rear driver", "model": "S4"},
                {"id": "WIN-03", "cutout_width": 554, "cutout_height": 698},
                {"id": "WIN-99", "cutout_width": 0, "cutout_height": 500},
                {"id": "WIN-98", "cutout_width": 400}
            ],
            "hatches": [
                {"id": "HATCH-01", "opening_width": 600, "opening_height": 550}
            ]
        }
    }"#;

    #[test]
    fn orders_windows_doors_hatches_and_skips_unusable() {
        let catalog = Catalog::from_json_str(HABITAT).unwrap();
        let ids: Vec<&str> = catalog.specs().iter().map(|s| s.feature_id.as_str()).collect();
        assert_eq!(ids, ["WIN-01", "WIN-03", "DOOR-01", "HATCH-01"]);

        let door = &catalog.specs()[2];
        assert_eq!(door.kind, OpeningKind::Door);
        assert_eq!((door.width, door.height), (693.0, 1766.0));
        assert_eq!(door.location.as_deref(), Some("entry"));

        assert_eq!(catalog.specs()[1].location, None);
        assert_eq!(catalog.specs()[3].kind, OpeningKind::Hatch);
    }

    #[test]
    fn empty_catalog_is_fatal() {
        assert!(matches!(Catalog::from_json_str("{}"), Err(Error::EmptyCatalog)));
        assert!(matches!(
            Catalog::from_json_str(r#"{"features": {"windows": [{"id": "W", "cutout_width": 0}]}}"#),
            Err(Error::EmptyCatalog)
        ));
        assert!(matches!(Catalog::new(Vec::new()), Err(Error::EmptyCatalog)));
    }

    #[test]
    fn entries_without_id_are_skipped() {
        let json = r#"{"features": {"windows": [
            {"cutout_width": 670, "cutout_height": 1063},
            {"id": "WIN-02", "cutout_width": 670, "cutout_height": 1063}
        ]}}"#;
        let catalog = Catalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.specs()[0].feature_id, "WIN-02");
    }

    #[test]
    fn duplicate_ids_keep_first_entry() {
        let json = r#"{"features": {
            "windows": [
                {"id": "WIN-01", "cutout_width": 670, "cutout_height": 1063},
                {"id": "WIN-02", "cutout_width": 554, "cutout_height": 698}
            ],
            "doors": [{"id": "WIN-01", "opening_width": 693, "opening_height": 1766}]
        }}"#;
        let catalog = Catalog::from_json_str(json).unwrap();

        let ids: Vec<&str> = catalog.specs().iter().map(|s| s.feature_id.as_str()).collect();
        assert_eq!(ids, ["WIN-01", "WIN-02"]);
        assert_eq!(catalog.specs()[0].kind, OpeningKind::Window);
        assert_eq!(catalog.specs()[0].width, 670.0);
    }

    #[test]
    fn duplicates_alone_do_not_empty_catalog() {
        let specs = vec![
            OpeningSpec::new("HATCH-01", OpeningKind::Hatch, 600.0, 550.0, None),
            OpeningSpec::new("HATCH-01", OpeningKind::Hatch, 600.0, 550.0, None),
        ];
        assert_eq!(Catalog::new(specs).unwrap().len(), 1);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(Catalog::from_json_str("features: []"), Err(Error::Json(_))));
    }

    #[test]
    fn unreadable_file_is_an_error() {
        assert!(matches!(
            Catalog::from_path("/nonexistent/habitat.json"),
            Err(Error::Io { .. })
        ));
    }
}
