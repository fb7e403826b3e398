// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Orientation-invariant size error.
//!
//! A face's in-plane extents carry no width/height labels, so a measured size
//! is scored under both pairings with the target and the smaller L1 distance
//! is kept. Only the width/height swap is considered; sign flips and other
//! axis permutations have no physical meaning for a bounding size.

use shell_openings_geometry::Size2;

/// The two pairings of measured extents against (width, height).
pub const ORIENTATIONS: [fn(Size2) -> Size2; 2] = [as_measured, Size2::swapped];

fn as_measured(size: Size2) -> Size2 {
    size
}

/// L1 distance between two sizes in a fixed pairing.
#[inline]
fn l1(target: Size2, measured: Size2) -> f64 {
    (measured.0 - target.0).abs() + (measured.1 - target.1).abs()
}

/// Size error of `measured` against `target`, minimized over [`ORIENTATIONS`].
///
/// Returns NaN only when an input is NaN.
pub fn size_error(target: Size2, measured: Size2) -> f64 {
    let [first, second] = ORIENTATIONS.map(|orient| l1(target, orient(measured)));
    first.min(second)
}
