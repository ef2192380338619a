// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring geometry processing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Unknown length unit: {0}")]
    UnknownUnit(String),

    #[error("Invalid tolerance {name}: {value}")]
    InvalidTolerance { name: &'static str, value: f64 },
}

/// Reasons a piece of drawing geometry is rejected.
///
/// A skip is an expected outcome for malformed CAD input, not a failure of
/// the run: callers count it, log it and move on to the next entity.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Skip {
    /// First and last points are further apart than the closure tolerance.
    #[error("boundary not closed: gap {gap:.3} exceeds tolerance {tolerance}")]
    NotClosed { gap: f64, tolerance: f64 },

    /// Fewer than three usable vertices remain.
    #[error("insufficient vertices: {0} (need at least 3)")]
    InsufficientVertices(usize),

    /// Enclosed area is below the configured minimum.
    #[error("area too small: {area:.6} < {min}")]
    AreaTooSmall { area: f64, min: f64 },

    /// Segment is shorter than the minimum element length.
    #[error("segment too short: {length:.4} < {min}")]
    SegmentTooShort { length: f64, min: f64 },
}

impl Skip {
    /// Short machine-friendly reason, used as a structured log field
    pub fn reason(&self) -> &'static str {
        match self {
            Skip::NotClosed { .. } => "not_closed",
            Skip::InsufficientVertices(_) => "insufficient_vertices",
            Skip::AreaTooSmall { .. } => "area_too_small",
            Skip::SegmentTooShort { .. } => "segment_too_short",
        }
    }
}
