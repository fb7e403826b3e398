// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar face descriptors.
//!
//! A descriptor is the kernel-independent summary of one boundary face:
//! surface kind, outward unit normal, centroid and axis-aligned bounds.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::projection::{normalize, size_2d, Size2};

/// Surface kind reported by the geometry kernel for a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceKind {
    #[serde(alias = "plane", alias = "PLANE")]
    Planar,
    #[serde(alias = "cylinder", alias = "CYLINDER")]
    Cylindrical,
    #[serde(alias = "cone", alias = "CONE")]
    Conical,
    #[serde(alias = "sphere", alias = "SPHERE")]
    Spherical,
    #[serde(alias = "torus", alias = "TORUS")]
    Toroidal,
    #[serde(alias = "BSPLINE")]
    Bspline,
    #[serde(other)]
    Other,
}

/// An axis-aligned bounding box in the solid's global frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Aabb {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// Bounds of a point set, or `None` when the set is empty.
    pub fn from_points(points: &[Point3<f64>]) -> Option<Self> {
        let first = points.first()?;
        let mut min = *first;
        let mut max = *first;
        for p in &points[1..] {
            min = min.inf(p);
            max = max.sup(p);
        }
        Some(Self { min, max })
    }

    /// Span along each axis.
    #[inline]
    pub fn extents(&self) -> Vector3<f64> {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }
}

/// One candidate face from the solid's boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceDescriptor {
    pub geometry_kind: SurfaceKind,
    /// Outward unit normal, or zero for degenerate faces.
    pub normal: Vector3<f64>,
    pub center: Point3<f64>,
    pub bbox: Aabb,
}

impl FaceDescriptor {
    /// Builds a descriptor, normalizing the supplied normal.
    pub fn new(
        geometry_kind: SurfaceKind,
        normal: Vector3<f64>,
        center: Point3<f64>,
        bbox: Aabb,
    ) -> Self {
        Self {
            geometry_kind,
            normal: normalize(&normal),
            center,
            bbox,
        }
    }

    /// Derives a descriptor from the ordered boundary vertices of a face.
    ///
    /// The normal follows the right-hand rule over the vertex winding
    /// (Newell's method). Fewer than three vertices, or collinear ones,
    /// give a zero normal rather than an error.
    pub fn from_polygon(geometry_kind: SurfaceKind, vertices: &[Point3<f64>]) -> Self {
        let bbox = Aabb::from_points(vertices)
            .unwrap_or_else(|| Aabb::new(Point3::origin(), Point3::origin()));

        let center = if vertices.is_empty() {
            Point3::origin()
        } else {
            let sum: Vector3<f64> = vertices.iter().map(|p| p.coords).sum();
            Point3::from(sum / vertices.len() as f64)
        };

        Self {
            geometry_kind,
            normal: newell_normal(vertices),
            center,
            bbox,
        }
    }

    #[inline]
    pub fn is_planar(&self) -> bool {
        self.geometry_kind == SurfaceKind::Planar
    }

    /// `true` when the face has no usable normal.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.normal == Vector3::zeros()
    }

    /// Planar faces with a usable normal are the only matching candidates.
    #[inline]
    pub fn is_eligible(&self) -> bool {
        self.is_planar() && !self.is_degenerate()
    }

    /// In-plane bounding size of the face.
    #[inline]
    pub fn size_2d(&self) -> Size2 {
        size_2d(&self.normal, &self.bbox)
    }
}

/// Polygon normal by Newell's method, normalized; zero when degenerate.
fn newell_normal(vertices: &[Point3<f64>]) -> Vector3<f64> {
    if vertices.len() < 3 {
        return Vector3::zeros();
    }

    let mut normal = Vector3::new(0.0, 0.0, 0.0);
    let n = vertices.len();

    for i in 0..n {
        let curr = &vertices[i];
        let next = &vertices[(i + 1) % n];

        normal.x += (curr.y - next.y) * (curr.z + next.z);
        normal.y += (curr.z - next.z) * (curr.x + next.x);
        normal.z += (curr.x - next.x) * (curr.y + next.y);
    }

    if normal.norm() < 1e-15 {
        return Vector3::zeros();
    }
    normalize(&normal)
}
