// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Report rendering.
//!
//! The text form is a YAML-like listing of matched openings preceded by one
//! line per unmatched entry. The JSON form carries the same data for tools.
//! Both are deterministic for a given report.

use std::fmt::Write;

use serde::Serialize;
use shell_openings_geometry::Axis;

use crate::error::Result;
use crate::opening::{MatchReport, MatchResult, OpeningKind, Unmatched};

/// One matched opening as a text block.
pub fn format_match(m: &MatchResult, vertical: Axis) -> String {
    let n = &m.normal;
    let c = &m.center;
    let lo = &m.bbox.min;
    let hi = &m.bbox.max;
    let location = m.location.as_deref().unwrap_or("null");

    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "- id: {}", m.feature_id);
    let _ = writeln!(out, "  kind: {}", m.kind);
    let _ = writeln!(out, "  location: {}", location);
    let _ = writeln!(out, "  normal: [{:.4}, {:.4}, {:.4}]", n.x, n.y, n.z);
    let _ = writeln!(out, "  center_mm: [{:.2}, {:.2}, {:.2}]", c.x, c.y, c.z);
    let _ = writeln!(out, "  bbox_min_mm: [{:.2}, {:.2}, {:.2}]", lo.x, lo.y, lo.z);
    let _ = writeln!(out, "  bbox_max_mm: [{:.2}, {:.2}, {:.2}]", hi.x, hi.y, hi.z);
    let _ = writeln!(out, "  size_2d_mm: [{:.2}, {:.2}]", m.size_2d.0, m.size_2d.1);
    let _ = writeln!(out, "  size_error_mm: {:.2}", m.size_error);
    let _ = writeln!(
        out,
        "  sill_or_threshold_height_mm: {:.2}",
        m.sill_height(vertical)
    );
    out
}

/// The "no match" line for an entry.
///
/// Sizes keep their decimal point, e.g. `670.0x1063.0`.
pub fn format_unmatched(u: &Unmatched) -> String {
    format!(
        "No match found for {} ({}) size {:?}x{:?} mm",
        u.feature_id, u.kind, u.width, u.height
    )
}

/// Full text report: unmatched lines, then the `matches:` listing.
pub fn render_text(report: &MatchReport, vertical: Axis) -> String {
    let mut out = String::new();

    for u in report.unmatched() {
        out.push_str(&format_unmatched(u));
        out.push('\n');
    }

    if !report.has_matches() {
        out.push_str("No opening matches found.\n");
        return out;
    }

    out.push_str("matches:\n");
    for m in report.matches() {
        out.push_str(&format_match(m, vertical));
    }
    out
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    vertical_axis: Axis,
    matches: Vec<JsonMatch<'a>>,
    unmatched: Vec<JsonUnmatched<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonMatch<'a> {
    id: &'a str,
    kind: OpeningKind,
    location: Option<&'a str>,
    face_index: usize,
    facing: Option<String>,
    normal: [f64; 3],
    center_mm: [f64; 3],
    bbox_min_mm: [f64; 3],
    bbox_max_mm: [f64; 3],
    size_2d_mm: [f64; 2],
    size_error_mm: f64,
    sill_or_threshold_height_mm: f64,
}

#[derive(Debug, Serialize)]
struct JsonUnmatched<'a> {
    id: &'a str,
    kind: OpeningKind,
    width_mm: f64,
    height_mm: f64,
    best_error_mm: Option<f64>,
}

/// Report as a pretty-printed JSON document.
pub fn render_json(report: &MatchReport, vertical: Axis) -> Result<String> {
    let doc = JsonReport {
        vertical_axis: vertical,
        matches: report
            .matches()
            .map(|m| JsonMatch {
                id: &m.feature_id,
                kind: m.kind,
                location: m.location.as_deref(),
                face_index: m.face_index,
                facing: m.facing().map(|f| f.to_string()),
                normal: m.normal.into(),
                center_mm: m.center.coords.into(),
                bbox_min_mm: m.bbox.min.coords.into(),
                bbox_max_mm: m.bbox.max.coords.into(),
                size_2d_mm: [m.size_2d.0, m.size_2d.1],
                size_error_mm: m.size_error,
                sill_or_threshold_height_mm: m.sill_height(vertical),
            })
            .collect(),
        unmatched: report
            .unmatched()
            .map(|u| JsonUnmatched {
                id: &u.feature_id,
                kind: u.kind,
                width_mm: u.width,
                height_mm: u.height,
                best_error_mm: u.best_error,
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}
