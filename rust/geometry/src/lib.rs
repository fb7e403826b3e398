// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shell-Openings Geometry
//!
//! Planar face descriptors handed over by a B-rep geometry kernel, and the
//! projection that reduces a face to a comparable 2D size.
//!
//! The crate does not parse solids. A face pool arrives either as finished
//! descriptors (normal, centroid, bounding box) or as planar polygons from
//! which the descriptor is derived with Newell's method.

pub mod error;
pub mod face;
pub mod pool;
pub mod projection;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

pub use error::{Error, Result};
pub use face::{Aabb, FaceDescriptor, SurfaceKind};
pub use pool::{faces_from_json_str, load_faces, FaceRecord};
pub use projection::{normalize, size_2d, thickness_axis, Axis, Size2};
