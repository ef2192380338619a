// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Straight segments for walls and beams

use crate::error::Skip;
use crate::point::Point2D;
use serde::{Deserialize, Serialize};

/// Minimum wall or beam length, in metres
pub const MIN_SEGMENT_LENGTH_M: f64 = 0.1;

/// A straight element axis with a guaranteed minimum length
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point2D,
    pub end: Point2D,
}

impl Segment {
    /// Build a segment, rejecting anything shorter than `min_length`
    pub fn new(start: Point2D, end: Point2D, min_length: f64) -> Result<Self, Skip> {
        let length = start.distance_to(&end);
        if length.is_nan() || length < min_length {
            return Err(Skip::SegmentTooShort {
                length,
                min: min_length,
            });
        }
        Ok(Self { start, end })
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn midpoint(&self) -> Point2D {
        Point2D::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }
}

/// Consecutive vertex pairs of a polyline.
///
/// Closed polylines with more than two vertices also yield the closing pair
/// from the last vertex back to the first.
pub fn polyline_pairs(
    vertices: &[Point2D],
    is_closed: bool,
) -> impl Iterator<Item = (Point2D, Point2D)> + '_ {
    let closing = if is_closed && vertices.len() > 2 {
        vertices.last().copied().zip(vertices.first().copied())
    } else {
        None
    };
    vertices
        .windows(2)
        .map(|w| (w[0], w[1]))
        .chain(closing)
}
