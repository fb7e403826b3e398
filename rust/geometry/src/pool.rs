// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Face pool loading.
//!
//! The geometry kernel exports the solid's faces as JSON, either wrapped as
//! `{"faces": [...]}` or as a bare array. Each record is a finished
//! descriptor or a planar polygon:
//!
//! ```json
//! {"geometry_kind": "planar", "normal": [1, 0, 0], "center": [1158, 723, 5109],
//!  "bbox_min": [1158, 388, 4577.5], "bbox_max": [1158, 1058, 5640.5]}
//! {"geometry_kind": "planar", "vertices": [[0, 0, 0], [600, 0, 0], [600, 550, 0]]}
//! ```

use std::path::Path;

use nalgebra::{Point3, Vector3};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::face::{Aabb, FaceDescriptor, SurfaceKind};

/// One face as exported by the geometry kernel.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FaceRecord {
    Descriptor {
        geometry_kind: SurfaceKind,
        normal: [f64; 3],
        center: [f64; 3],
        bbox_min: [f64; 3],
        bbox_max: [f64; 3],
    },
    Polygon {
        geometry_kind: SurfaceKind,
        vertices: Vec<[f64; 3]>,
    },
}

impl FaceRecord {
    pub fn to_descriptor(&self) -> FaceDescriptor {
        match self {
            FaceRecord::Descriptor {
                geometry_kind,
                normal,
                center,
                bbox_min,
                bbox_max,
            } => {
                let a = Point3::from(*bbox_min);
                let b = Point3::from(*bbox_max);
                FaceDescriptor::new(
                    *geometry_kind,
                    Vector3::from(*normal),
                    Point3::from(*center),
                    // Kernels are not consistent about corner order.
                    Aabb::new(a.inf(&b), a.sup(&b)),
                )
            }
            FaceRecord::Polygon {
                geometry_kind,
                vertices,
            } => {
                let points: Vec<Point3<f64>> = vertices.iter().map(|v| Point3::from(*v)).collect();
                FaceDescriptor::from_polygon(*geometry_kind, &points)
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FaceDocument {
    Wrapped { faces: Vec<FaceRecord> },
    Bare(Vec<FaceRecord>),
}

/// Parses a face pool from JSON text, preserving record order.
pub fn faces_from_json_str(content: &str) -> Result<Vec<FaceDescriptor>> {
    let records = match serde_json::from_str::<FaceDocument>(content)? {
        FaceDocument::Wrapped { faces } => faces,
        FaceDocument::Bare(faces) => faces,
    };

    let faces: Vec<FaceDescriptor> = records.iter().map(FaceRecord::to_descriptor).collect();
    let eligible = faces.iter().filter(|f| f.is_eligible()).count();
    tracing::debug!(
        faces = faces.len(),
        eligible = eligible,
        skipped = faces.len() - eligible,
        "Parsed face pool"
    );
    Ok(faces)
}

/// Reads and parses a face pool file.
pub fn load_faces(path: impl AsRef<Path>) -> Result<Vec<FaceDescriptor>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.display().to_string(),
        source,
    })?;
    faces_from_json_str(&content)
}
