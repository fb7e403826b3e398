// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Opening specifications and match outcomes.

use std::fmt;

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use shell_openings_geometry::{thickness_axis, Aabb, Axis, FaceDescriptor, Size2};

use crate::matcher::Candidate;

/// Kind of opening cut into the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningKind {
    Window,
    Door,
    Hatch,
}

impl OpeningKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OpeningKind::Window => "window",
            OpeningKind::Door => "door",
            OpeningKind::Hatch => "hatch",
        }
    }
}

impl fmt::Display for OpeningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One catalog entry to be located in the shell.
#[derive(Debug, Clone, PartialEq)]
pub struct OpeningSpec {
    pub feature_id: String,
    pub kind: OpeningKind,
    /// Nominal cut-out width in millimeters.
    pub width: f64,
    /// Nominal cut-out height in millimeters.
    pub height: f64,
    /// Free-text location hint; informational only.
    pub location: Option<String>,
}

impl OpeningSpec {
    pub fn new(
        feature_id: impl Into<String>,
        kind: OpeningKind,
        width: f64,
        height: f64,
        location: Option<String>,
    ) -> Self {
        Self {
            feature_id: feature_id.into(),
            kind,
            width,
            height,
            location,
        }
    }

    /// Nominal size as `(width, height)`.
    #[inline]
    pub fn target(&self) -> Size2 {
        Size2(self.width, self.height)
    }

    /// `true` if the entry has an id and a positive, finite size.
    pub fn is_usable(&self) -> bool {
        !self.feature_id.trim().is_empty()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }
}

/// Dominant signed axis of an outward normal, e.g. `-x` for a driver-side wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Facing {
    pub axis: Axis,
    pub positive: bool,
}

impl Facing {
    /// Facing of a unit normal; `None` for a zero normal.
    pub fn of(normal: &Vector3<f64>) -> Option<Self> {
        if *normal == Vector3::zeros() {
            return None;
        }
        let axis = thickness_axis(normal);
        Some(Self {
            axis,
            positive: normal[axis.index()] >= 0.0,
        })
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.positive { '+' } else { '-' };
        write!(f, "{}{}", sign, self.axis)
    }
}

/// A catalog entry resolved to a face of the solid.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub feature_id: String,
    pub kind: OpeningKind,
    pub location: Option<String>,
    /// Position of the winning face in the pool.
    pub face_index: usize,
    pub normal: Vector3<f64>,
    pub center: Point3<f64>,
    pub bbox: Aabb,
    /// Measured in-plane size, in ascending axis order.
    pub size_2d: Size2,
    /// Orientation-resolved L1 size error in millimeters.
    pub size_error: f64,
}

impl MatchResult {
    pub(crate) fn new(spec: &OpeningSpec, face: &FaceDescriptor, candidate: Candidate) -> Self {
        Self {
            feature_id: spec.feature_id.clone(),
            kind: spec.kind,
            location: spec.location.clone(),
            face_index: candidate.index,
            normal: face.normal,
            center: face.center,
            bbox: face.bbox,
            size_2d: candidate.size_2d,
            size_error: candidate.error,
        }
    }

    /// Sill or threshold height: lower edge of the face along `vertical`.
    ///
    /// Windows, doors and hatches are treated alike.
    #[inline]
    pub fn sill_height(&self, vertical: Axis) -> f64 {
        self.bbox.min[vertical.index()]
    }

    /// Outward normal of the winning face, unchanged.
    #[inline]
    pub fn outward_normal(&self) -> Vector3<f64> {
        self.normal
    }

    /// Wall of the shell the opening sits in, by dominant normal axis.
    pub fn facing(&self) -> Option<Facing> {
        Facing::of(&self.normal)
    }
}

/// A catalog entry for which no face was within tolerance.
#[derive(Debug, Clone, PartialEq)]
pub struct Unmatched {
    pub feature_id: String,
    pub kind: OpeningKind,
    pub width: f64,
    pub height: f64,
    /// Error of the closest eligible face, if there was any.
    pub best_error: Option<f64>,
}

impl Unmatched {
    pub(crate) fn new(spec: &OpeningSpec, best_error: Option<f64>) -> Self {
        Self {
            feature_id: spec.feature_id.clone(),
            kind: spec.kind,
            width: spec.width,
            height: spec.height,
            best_error,
        }
    }
}

/// Outcome of matching one catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    Matched(MatchResult),
    Unmatched(Unmatched),
}

impl MatchOutcome {
    pub fn feature_id(&self) -> &str {
        match self {
            MatchOutcome::Matched(m) => &m.feature_id,
            MatchOutcome::Unmatched(u) => &u.feature_id,
        }
    }

    pub fn as_match(&self) -> Option<&MatchResult> {
        match self {
            MatchOutcome::Matched(m) => Some(m),
            MatchOutcome::Unmatched(_) => None,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, MatchOutcome::Matched(_))
    }
}

/// Outcomes of a matching run, one per catalog entry, in catalog order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchReport {
    pub outcomes: Vec<MatchOutcome>,
}

impl MatchReport {
    pub fn new(outcomes: Vec<MatchOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn matches(&self) -> impl Iterator<Item = &MatchResult> {
        self.outcomes.iter().filter_map(MatchOutcome::as_match)
    }

    pub fn unmatched(&self) -> impl Iterator<Item = &Unmatched> {
        self.outcomes.iter().filter_map(|o| match o {
            MatchOutcome::Unmatched(u) => Some(u),
            MatchOutcome::Matched(_) => None,
        })
    }

    pub fn matched_count(&self) -> usize {
        self.matches().count()
    }

    pub fn has_matches(&self) -> bool {
        self.outcomes.iter().any(MatchOutcome::is_matched)
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}
