// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Size projection
//!
//! Reduces a planar face to the two bounding-box spans that lie in its plane.
//! The axis most nearly perpendicular to the face (its "thickness axis") is
//! dropped; the remaining two spans are returned in ascending axis order.

use std::fmt;
use std::str::FromStr;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::face::Aabb;

/// A coordinate axis of the solid's global frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Component index of this axis (X = 0, Y = 1, Z = 2).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// The two other axes, in ascending index order.
    #[inline]
    pub fn in_plane(self) -> (Axis, Axis) {
        match self {
            Axis::X => (Axis::Y, Axis::Z),
            Axis::Y => (Axis::X, Axis::Z),
            Axis::Z => (Axis::X, Axis::Y),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

impl FromStr for Axis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            _ => Err(Error::UnknownAxis(s.to_string())),
        }
    }
}

/// A measured or nominal 2D size.
///
/// For a measured face the two extents carry no width/height labelling; they
/// are the in-plane spans in ascending axis order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size2(pub f64, pub f64);

impl Size2 {
    /// The same size with its two extents exchanged.
    #[inline]
    pub fn swapped(self) -> Self {
        Size2(self.1, self.0)
    }
}

/// Normalizes a vector, returning the zero vector for zero-length input.
///
/// Degenerate normals are not an error here; faces carrying them are
/// excluded from matching further downstream.
pub fn normalize(v: &Vector3<f64>) -> Vector3<f64> {
    let len = v.norm();
    if len == 0.0 || !len.is_finite() {
        return Vector3::zeros();
    }
    v / len
}

/// Axis whose normal component has the largest absolute value.
///
/// Ties resolve to the lowest axis index, so a zero normal maps to X.
pub fn thickness_axis(normal: &Vector3<f64>) -> Axis {
    let mut best = Axis::X;
    for axis in [Axis::Y, Axis::Z] {
        if normal[axis.index()].abs() > normal[best.index()].abs() {
            best = axis;
        }
    }
    best
}

/// In-plane size of a face with the given normal and bounding box.
pub fn size_2d(normal: &Vector3<f64>, bbox: &Aabb) -> Size2 {
    let extents = bbox.extents();
    let (first, second) = thickness_axis(normal).in_plane();
    Size2(extents[first.index()], extents[second.index()])
}
