// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Best-fit matching of opening specifications against a face pool.
//!
//! For each specification every eligible face is scored with
//! [`size_error`]; the face with the strictly smallest error wins and ties
//! keep the face that comes first in pool order. The winner is accepted
//! only if its error is within tolerance (inclusive).
//!
//! Specifications are independent of one another. Faces are not claimed, so
//! two specifications of the same size may resolve to the same face.

use rayon::prelude::*;
use shell_openings_geometry::{Axis, FaceDescriptor, Size2};

use crate::error::{Error, Result};
use crate::opening::{MatchOutcome, MatchReport, MatchResult, OpeningSpec, Unmatched};
use crate::scoring::size_error;

/// Default size tolerance in millimeters of cumulative L1 error.
pub const DEFAULT_TOLERANCE: f64 = 3.0;

/// Matching parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchConfig {
    /// Maximum accepted size error in millimeters.
    pub tolerance: f64,
    /// Vertical axis of the solid's coordinate convention, for sill heights.
    pub vertical_axis: Axis,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            vertical_axis: Axis::Z,
        }
    }
}

impl MatchConfig {
    /// Config with a validated tolerance and the default vertical axis.
    pub fn new(tolerance: f64) -> Result<Self> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(Error::InvalidTolerance(tolerance));
        }
        Ok(Self {
            tolerance,
            ..Self::default()
        })
    }

    pub fn with_vertical_axis(mut self, axis: Axis) -> Self {
        self.vertical_axis = axis;
        self
    }
}

/// Read-only snapshot of the faces shared by every query of a run.
#[derive(Debug, Clone, Copy)]
pub struct FacePool<'a> {
    faces: &'a [FaceDescriptor],
}

impl<'a> FacePool<'a> {
    pub fn new(faces: &'a [FaceDescriptor]) -> Self {
        Self { faces }
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a FaceDescriptor> {
        self.faces.get(index)
    }

    /// Eligible faces with their pool index, in pool order.
    pub fn eligible(&self) -> impl Iterator<Item = (usize, &'a FaceDescriptor)> + 'a {
        let faces = self.faces;
        faces
            .iter()
            .enumerate()
            .filter(|(_, face)| face.is_eligible())
    }

    pub fn eligible_count(&self) -> usize {
        self.eligible().count()
    }
}

/// The lowest-error face for one specification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Position of the face in the pool.
    pub index: usize,
    pub size_2d: Size2,
    pub error: f64,
}

/// Matches specifications against a face pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher {
    config: MatchConfig,
}

impl Matcher {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Arg-min of the size error over eligible faces, regardless of tolerance.
    ///
    /// Faces scoring NaN are never selected.
    pub fn best_candidate(&self, spec: &OpeningSpec, pool: FacePool<'_>) -> Option<Candidate> {
        let target = spec.target();
        let mut best: Option<Candidate> = None;

        for (index, face) in pool.eligible() {
            let size = face.size_2d();
            let error = size_error(target, size);
            if error.is_nan() {
                continue;
            }
            if best.map_or(true, |b| error < b.error) {
                best = Some(Candidate {
                    index,
                    size_2d: size,
                    error,
                });
            }
        }

        best
    }

    /// Matches one specification.
    pub fn match_one(&self, spec: &OpeningSpec, pool: FacePool<'_>) -> MatchOutcome {
        let best = self.best_candidate(spec, pool);

        match best {
            Some(candidate) if candidate.error <= self.config.tolerance => {
                tracing::debug!(
                    feature_id = %spec.feature_id,
                    face = candidate.index,
                    size_error = candidate.error,
                    "Matched opening"
                );
                match pool.get(candidate.index) {
                    Some(face) => MatchOutcome::Matched(MatchResult::new(spec, face, candidate)),
                    None => MatchOutcome::Unmatched(Unmatched::new(spec, Some(candidate.error))),
                }
            }
            _ => {
                let best_error = best.map(|c| c.error);
                tracing::debug!(
                    feature_id = %spec.feature_id,
                    best_error = ?best_error,
                    tolerance = self.config.tolerance,
                    "No face within tolerance"
                );
                MatchOutcome::Unmatched(Unmatched::new(spec, best_error))
            }
        }
    }

    /// Matches every specification in order.
    pub fn match_all(&self, specs: &[OpeningSpec], pool: FacePool<'_>) -> MatchReport {
        let outcomes: Vec<MatchOutcome> = specs.iter().map(|spec| self.match_one(spec, pool)).collect();
        self.finish(outcomes, pool)
    }

    /// Matches every specification across rayon workers.
    ///
    /// The report is identical to [`Matcher::match_all`], in catalog order.
    pub fn match_all_par(&self, specs: &[OpeningSpec], pool: FacePool<'_>) -> MatchReport {
        let outcomes: Vec<MatchOutcome> = specs
            .par_iter()
            .map(|spec| self.match_one(spec, pool))
            .collect();
        self.finish(outcomes, pool)
    }

    fn finish(&self, outcomes: Vec<MatchOutcome>, pool: FacePool<'_>) -> MatchReport {
        let report = MatchReport::new(outcomes);
        tracing::info!(
            specs = report.len(),
            matched = report.matched_count(),
            unmatched = report.len() - report.matched_count(),
            faces = pool.len(),
            eligible_faces = pool.eligible_count(),
            tolerance = self.config.tolerance,
            "Matching complete"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opening::OpeningKind;
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector3};
    use shell_openings_geometry::{Aabb, SurfaceKind};

    /// Planar face in the plane x = 0 spanning `dy` along Y and `dz` along Z.
    fn wall_face(dy: f64, dz: f64) -> FaceDescriptor {
        FaceDescriptor::new(
            SurfaceKind::Planar,
            Vector3::x(),
            Point3::new(0.0, dy / 2.0, dz / 2.0),
            Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, dy, dz)),
        )
    }

    fn window(id: &str, w: f64, h: f64) -> OpeningSpec {
        OpeningSpec::new(id, OpeningKind::Window, w, h, None)
    }

    #[test]
    fn tolerance_validation() {
        assert!(MatchConfig::new(0.0).is_ok());
        assert!(MatchConfig::new(3.0).is_ok());
        assert!(matches!(MatchConfig::new(-0.1), Err(Error::InvalidTolerance(_))));
        assert!(MatchConfig::new(f64::NAN).is_err());
        assert!(MatchConfig::new(f64::INFINITY).is_err());
    }

    #[test]
    fn default_config() {
        let config = MatchConfig::default();
        assert_eq!(config.tolerance, DEFAULT_TOLERANCE);
        assert_eq!(config.vertical_axis, Axis::Z);
    }

    #[test]
    fn tolerance_is_inclusive() {
        let faces = vec![wall_face(100.0, 203.0)];
        let spec = window("W", 100.0, 200.0);

        let at = Matcher::new(MatchConfig::new(3.0).unwrap());
        assert!(at.match_one(&spec, FacePool::new(&faces)).is_matched());

        let below = Matcher::new(MatchConfig::new(3.0 - 1e-9).unwrap());
        assert!(!below.match_one(&spec, FacePool::new(&faces)).is_matched());
    }

    #[test]
    fn ties_keep_first_face() {
        let faces = vec![wall_face(101.0, 200.0), wall_face(100.0, 201.0), wall_face(200.0, 101.0)];
        let matcher = Matcher::default();
        let best = matcher
            .best_candidate(&window("W", 100.0, 200.0), FacePool::new(&faces))
            .unwrap();
        assert_eq!(best.index, 0);
        assert_relative_eq!(best.error, 1.0);
    }

    #[test]
    fn exact_face_beats_near_faces() {
        let faces = vec![wall_face(101.0, 200.0), wall_face(200.0, 100.0), wall_face(99.0, 199.0)];
        let best = Matcher::default()
            .best_candidate(&window("W", 100.0, 200.0), FacePool::new(&faces))
            .unwrap();
        assert_eq!(best.index, 1);
        assert_eq!(best.error, 0.0);
    }

    #[test]
    fn non_planar_faces_are_skipped() {
        let mut curved = wall_face(100.0, 200.0);
        curved.geometry_kind = SurfaceKind::Cylindrical;
        let faces = vec![curved, wall_face(100.5, 200.0)];

        let outcome = Matcher::default().match_one(&window("W", 100.0, 200.0), FacePool::new(&faces));
        assert_eq!(outcome.as_match().unwrap().face_index, 1);
    }

    #[test]
    fn unmatched_carries_best_error() {
        let faces = vec![wall_face(150.0, 200.0)];
        let outcome = Matcher::default().match_one(&window("W", 100.0, 200.0), FacePool::new(&faces));
        match outcome {
            MatchOutcome::Unmatched(u) => {
                assert_eq!(u.feature_id, "W");
                assert_eq!(u.best_error, Some(50.0));
            }
            MatchOutcome::Matched(_) => panic!("expected no match"),
        }
    }

    #[test]
    fn no_eligible_faces_has_no_best_error() {
        let outcome = Matcher::default().match_one(&window("W", 100.0, 200.0), FacePool::new(&[]));
        match outcome {
            MatchOutcome::Unmatched(u) => assert_eq!(u.best_error, None),
            MatchOutcome::Matched(_) => panic!("expected no match"),
        }
    }

    #[test]
    fn arg_min_is_independent_of_tolerance() {
        let faces = vec![wall_face(110.0, 200.0), wall_face(100.0, 195.0), wall_face(90.0, 190.0)];
        let specs = [window("A", 100.0, 200.0), window("B", 95.0, 190.0)];

        let mut previous: Vec<Option<usize>> = vec![None; specs.len()];
        for tolerance in [0.0, 1.0, 5.0, 10.0, 50.0, 1e6] {
            let matcher = Matcher::new(MatchConfig::new(tolerance).unwrap());
            for (i, spec) in specs.iter().enumerate() {
                let best = matcher.best_candidate(spec, FacePool::new(&faces)).unwrap();
                let accepted = matcher.match_one(spec, FacePool::new(&faces));
                if let Some(prev) = previous[i] {
                    // Once accepted, stays accepted with the same face.
                    assert_eq!(accepted.as_match().map(|m| m.face_index), Some(prev));
                }
                if let Some(m) = accepted.as_match() {
                    assert_eq!(m.face_index, best.index);
                    previous[i] = Some(m.face_index);
                }
            }
        }
        assert!(previous.iter().all(Option::is_some));
    }

    #[test]
    fn parallel_matches_sequential() {
        let faces: Vec<FaceDescriptor> = (0..40)
            .map(|i| wall_face(500.0 + i as f64 * 7.5, 900.0 + i as f64 * 3.0))
            .collect();
        let specs: Vec<OpeningSpec> = (0..25)
            .map(|i| window(&format!("W-{i:02}"), 500.0 + i as f64 * 11.0, 900.0 + i as f64 * 4.0))
            .collect();

        let matcher = Matcher::default();
        let pool = FacePool::new(&faces);
        let sequential = matcher.match_all(&specs, pool);
        let parallel = matcher.match_all_par(&specs, pool);

        assert_eq!(sequential, parallel);
        let ids: Vec<&str> = parallel.outcomes.iter().map(MatchOutcome::feature_id).collect();
        let expected: Vec<String> = specs.iter().map(|s| s.feature_id.clone()).collect();
        assert_eq!(ids, expected.iter().map(String::as_str).collect::<Vec<_>>());
    }
}
