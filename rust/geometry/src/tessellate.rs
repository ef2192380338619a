// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hatch boundary tessellation
//!
//! Hatch boundaries arrive as a chain of edges. Straight edges contribute
//! their start point (the following edge supplies the end), curved edges are
//! sampled with a fixed number of segments regardless of their size.

use crate::point::{Boundary, Point2D};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Segments used to approximate a circular arc (17 points)
pub const ARC_SEGMENTS: usize = 16;

/// Segments used to approximate an elliptical arc (25 points)
pub const ELLIPSE_SEGMENTS: usize = 24;

/// One edge of a hatch boundary loop. Angles are in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoundaryEdge {
    Line {
        start: Point2D,
        end: Point2D,
    },
    Arc {
        center: Point2D,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    Ellipse {
        center: Point2D,
        /// Major axis end point relative to the centre
        major_axis: Point2D,
        /// Minor / major axis length ratio
        minor_ratio: f64,
        start_angle: f64,
        end_angle: f64,
    },
    Spline {
        control_points: Vec<Point2D>,
    },
}

impl BoundaryEdge {
    /// Lazily yield the vertices this edge contributes to its loop
    pub fn points(&self) -> EdgePoints<'_> {
        let inner = match self {
            BoundaryEdge::Line { start, .. } => Inner::Single(Some(*start)),
            BoundaryEdge::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            } => Inner::Sweep(ConicSweep::new(
                *center,
                Vector2::new(*radius, 0.0),
                Vector2::new(0.0, *radius),
                *start_angle,
                *end_angle,
                ARC_SEGMENTS,
            )),
            BoundaryEdge::Ellipse {
                center,
                major_axis,
                minor_ratio,
                start_angle,
                end_angle,
            } => {
                // Minor axis is the major axis turned a quarter, scaled by the ratio
                let major = Vector2::new(major_axis.x, major_axis.y);
                let minor = Vector2::new(-major.y, major.x) * *minor_ratio;
                Inner::Sweep(ConicSweep::new(
                    *center,
                    major,
                    minor,
                    *start_angle,
                    *end_angle,
                    ELLIPSE_SEGMENTS,
                ))
            }
            BoundaryEdge::Spline { control_points } => Inner::Slice(control_points.iter()),
        };
        EdgePoints { inner }
    }

    /// Number of vertices [`points`](Self::points) will yield
    pub fn point_count(&self) -> usize {
        match self {
            BoundaryEdge::Line { .. } => 1,
            BoundaryEdge::Arc { .. } => ARC_SEGMENTS + 1,
            BoundaryEdge::Ellipse { .. } => ELLIPSE_SEGMENTS + 1,
            BoundaryEdge::Spline { control_points } => control_points.len(),
        }
    }
}

/// Iterator over the vertices of a single [`BoundaryEdge`]
#[derive(Debug, Clone)]
pub struct EdgePoints<'a> {
    inner: Inner<'a>,
}

#[derive(Debug, Clone)]
enum Inner<'a> {
    Single(Option<Point2D>),
    Sweep(ConicSweep),
    Slice(std::slice::Iter<'a, Point2D>),
}

impl Iterator for EdgePoints<'_> {
    type Item = Point2D;

    fn next(&mut self) -> Option<Point2D> {
        match &mut self.inner {
            Inner::Single(p) => p.take(),
            Inner::Sweep(sweep) => sweep.next(),
            Inner::Slice(iter) => iter.next().copied(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = match &self.inner {
            Inner::Single(p) => usize::from(p.is_some()),
            Inner::Sweep(sweep) => (sweep.segments + 1).saturating_sub(sweep.index),
            Inner::Slice(iter) => iter.len(),
        };
        (n, Some(n))
    }
}

impl ExactSizeIterator for EdgePoints<'_> {}

/// Parametric sweep `c + cos(t)·u + sin(t)·v` over `[start, start + sweep]`
#[derive(Debug, Clone)]
struct ConicSweep {
    center: Point2D,
    u: Vector2<f64>,
    v: Vector2<f64>,
    start: f64,
    sweep: f64,
    segments: usize,
    index: usize,
}

impl ConicSweep {
    fn new(
        center: Point2D,
        u: Vector2<f64>,
        v: Vector2<f64>,
        start_deg: f64,
        end_deg: f64,
        segments: usize,
    ) -> Self {
        let start = start_deg.to_radians();
        let mut end = end_deg.to_radians();
        if end < start {
            end += 2.0 * PI;
        }
        Self {
            center,
            u,
            v,
            start,
            sweep: end - start,
            segments,
            index: 0,
        }
    }
}

impl Iterator for ConicSweep {
    type Item = Point2D;

    fn next(&mut self) -> Option<Point2D> {
        if self.index > self.segments {
            return None;
        }
        let t = self.start + self.sweep * (self.index as f64) / (self.segments as f64);
        self.index += 1;
        let offset = self.u * t.cos() + self.v * t.sin();
        Some(Point2D::new(self.center.x + offset.x, self.center.y + offset.y))
    }
}

/// Chain the vertices of every edge of one boundary loop
pub fn tessellate(edges: &[BoundaryEdge]) -> impl Iterator<Item = Point2D> + '_ {
    edges.iter().flat_map(BoundaryEdge::points)
}

/// Collect a boundary loop into a point list
pub fn tessellate_boundary(edges: &[BoundaryEdge]) -> Boundary {
    let mut points = Vec::with_capacity(edges.iter().map(BoundaryEdge::point_count).sum());
    points.extend(tessellate(edges));
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn arc(start_angle: f64, end_angle: f64) -> BoundaryEdge {
        BoundaryEdge::Arc {
            center: Point2D::new(0.0, 0.0),
            radius: 10.0,
            start_angle,
            end_angle,
        }
    }

    #[test]
    fn test_line_contributes_start_only() {
        let edge = BoundaryEdge::Line {
            start: Point2D::new(1.0, 2.0),
            end: Point2D::new(3.0, 4.0),
        };
        let pts: Vec<_> = edge.points().collect();
        assert_eq!(pts, vec![Point2D::new(1.0, 2.0)]);
    }

    #[test]
    fn test_arc_has_seventeen_points() {
        let pts: Vec<_> = arc(0.0, 90.0).points().collect();
        assert_eq!(pts.len(), ARC_SEGMENTS + 1);
        assert_relative_eq!(pts[0].x, 10.0, epsilon = 1e-9);
        assert_relative_eq!(pts[0].y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(pts[16].x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(pts[16].y, 10.0, epsilon = 1e-9);
        for p in &pts {
            assert_relative_eq!(p.distance_to(&Point2D::new(0.0, 0.0)), 10.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_arc_wraps_when_end_precedes_start() {
        // 270° -> 90° sweeps through 0°, i.e. the right half of the circle
        let pts: Vec<_> = arc(270.0, 90.0).points().collect();
        assert_eq!(pts.len(), 17);
        assert_relative_eq!(pts[8].x, 10.0, epsilon = 1e-9);
        assert_relative_eq!(pts[8].y, 0.0, epsilon = 1e-9);
        assert!(pts.iter().all(|p| p.x >= -1e-9));
    }

    #[test]
    fn test_zero_radius_arc_is_degenerate_not_error() {
        let edge = BoundaryEdge::Arc {
            center: Point2D::new(5.0, 5.0),
            radius: 0.0,
            start_angle: 0.0,
            end_angle: 180.0,
        };
        let pts: Vec<_> = edge.points().collect();
        assert_eq!(pts.len(), 17);
        assert!(pts.iter().all(|p| *p == Point2D::new(5.0, 5.0)));
    }

    #[test]
    fn test_ellipse_axis_aligned() {
        let edge = BoundaryEdge::Ellipse {
            center: Point2D::new(0.0, 0.0),
            major_axis: Point2D::new(20.0, 0.0),
            minor_ratio: 0.5,
            start_angle: 0.0,
            end_angle: 360.0,
        };
        let pts: Vec<_> = edge.points().collect();
        assert_eq!(pts.len(), ELLIPSE_SEGMENTS + 1);
        assert_relative_eq!(pts[0].x, 20.0, epsilon = 1e-9);
        // quarter turn lands on the minor axis
        assert_relative_eq!(pts[6].x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(pts[6].y, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_ellipse_follows_rotated_major_axis() {
        let edge = BoundaryEdge::Ellipse {
            center: Point2D::new(0.0, 0.0),
            major_axis: Point2D::new(0.0, 20.0),
            minor_ratio: 0.5,
            start_angle: 0.0,
            end_angle: 90.0,
        };
        let pts: Vec<_> = edge.points().collect();
        assert_relative_eq!(pts[0].x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(pts[0].y, 20.0, epsilon = 1e-9);
        assert_relative_eq!(pts[24].x, -10.0, epsilon = 1e-9);
        assert_relative_eq!(pts[24].y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_mixed_loop() {
        let edges = vec![
            BoundaryEdge::Line {
                start: Point2D::new(-10.0, 0.0),
                end: Point2D::new(10.0, 0.0),
            },
            arc(0.0, 180.0),
            BoundaryEdge::Spline {
                control_points: vec![Point2D::new(-10.0, 0.0), Point2D::new(-10.0, -1.0)],
            },
        ];
        let iter = edges[1].points();
        assert_eq!(iter.len(), 17);

        let boundary = tessellate_boundary(&edges);
        assert_eq!(boundary.len(), 1 + 17 + 2);
        assert_eq!(boundary[0], Point2D::new(-10.0, 0.0));
        assert_eq!(boundary[19], Point2D::new(-10.0, -1.0));
    }

    #[test]
    fn test_edge_serde_tag() {
        let json = r#"{"type":"arc","center":{"x":0.0,"y":0.0},"radius":1.0,"start_angle":0.0,"end_angle":90.0}"#;
        let edge: BoundaryEdge = serde_json::from_str(json).unwrap();
        assert_eq!(edge.point_count(), 17);
    }
}
