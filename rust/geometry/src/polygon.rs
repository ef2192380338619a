// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon sanitization
//!
//! Drawings routinely contain hatch loops and polylines that are "almost"
//! closed, wound either way, or carry stacked vertices. [`sanitize`] turns
//! such a boundary into a [`Polygon`] or rejects it with a [`Skip`] reason.
//!
//! Steps, in order:
//! 1. closure: a near-duplicate closing point is dropped, a gap up to the
//!    closure tolerance is accepted as implicitly closed
//! 2. at least three vertices
//! 3. minimum enclosed area (shoelace)
//! 4. counter-clockwise winding
//! 5. consecutive duplicate removal
//! 6. self-intersection check (advisory, logged only)

use crate::error::{Error, Result, Skip};
use crate::point::Point2D;
use crate::units::LengthUnit;
use serde::{Deserialize, Serialize};

/// Smallest area accepted for an area element, in square metres
pub const MIN_AREA_M2: f64 = 0.01;

/// Denominator below which two edges are treated as parallel
const PARALLEL_EPSILON: f64 = 1e-4;

/// Tolerances used by [`sanitize`], expressed in drawing units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizeConfig {
    /// Closing point closer than this to the first point is a duplicate
    pub near_duplicate_epsilon: f64,
    /// Largest first/last gap still accepted as implicitly closed
    pub closure_tolerance: f64,
    /// Consecutive vertices closer than this collapse into one
    pub vertex_epsilon: f64,
    /// Minimum enclosed area (square drawing units)
    pub min_area: f64,
}

impl Default for SanitizeConfig {
    /// Tolerances for millimetre drawings
    fn default() -> Self {
        Self {
            near_duplicate_epsilon: 0.1,
            closure_tolerance: 10_000.0,
            vertex_epsilon: 0.001,
            min_area: 10_000.0,
        }
    }
}

impl SanitizeConfig {
    /// Tolerances for a drawing in `unit`, scaled from the millimetre defaults
    pub fn for_unit(unit: LengthUnit) -> Self {
        if unit == LengthUnit::Millimeter {
            return Self::default();
        }
        let mm = LengthUnit::Millimeter.to_meters();
        let defaults = Self::default();
        Self {
            near_duplicate_epsilon: unit.from_meters(defaults.near_duplicate_epsilon * mm),
            closure_tolerance: unit.from_meters(defaults.closure_tolerance * mm),
            vertex_epsilon: unit.from_meters(defaults.vertex_epsilon * mm),
            min_area: unit.area_from_square_meters(MIN_AREA_M2),
        }
    }

    /// Reject non-positive or non-finite tolerances
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("near_duplicate_epsilon", self.near_duplicate_epsilon),
            ("closure_tolerance", self.closure_tolerance),
            ("vertex_epsilon", self.vertex_epsilon),
            ("min_area", self.min_area),
        ];
        for (name, value) in checks {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidTolerance { name, value });
            }
        }
        Ok(())
    }
}

/// A closed, counter-clockwise polygon with at least three vertices.
///
/// The closing edge is implicit: the first vertex is never repeated at the
/// end. The only way to obtain one is through [`sanitize`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polygon {
    vertices: Vec<Point2D>,
    area: f64,
    self_intersecting: bool,
}

impl Polygon {
    pub fn vertices(&self) -> &[Point2D] {
        &self.vertices
    }

    pub fn into_vertices(self) -> Vec<Point2D> {
        self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Enclosed area in square drawing units (always positive)
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Enclosed area in square metres
    pub fn area_m2(&self, unit: LengthUnit) -> f64 {
        let s = unit.to_meters();
        self.area * s * s
    }

    /// Whether two non-adjacent edges cross. Advisory only.
    pub fn is_self_intersecting(&self) -> bool {
        self.self_intersecting
    }

    /// Vertices with the first repeated at the end
    pub fn closed_ring(&self) -> Vec<Point2D> {
        let mut ring = self.vertices.clone();
        ring.push(self.vertices[0]);
        ring
    }

    /// Edges including the closing edge
    pub fn edges(&self) -> impl Iterator<Item = (Point2D, Point2D)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Axis-aligned bounds as (min, max)
    pub fn bounds(&self) -> (Point2D, Point2D) {
        let mut min = Point2D::new(f64::MAX, f64::MAX);
        let mut max = Point2D::new(f64::MIN, f64::MIN);
        for p in &self.vertices {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        (min, max)
    }

    /// Shorter side of the bounding box, in drawing units
    pub fn min_extent(&self) -> f64 {
        let (min, max) = self.bounds();
        (max.x - min.x).min(max.y - min.y)
    }
}

/// Clean a raw boundary into a [`Polygon`], or say why it cannot be one
pub fn sanitize(boundary: &[Point2D], config: &SanitizeConfig) -> std::result::Result<Polygon, Skip> {
    let mut points: Vec<Point2D> = boundary.to_vec();

    // 1. closure
    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        let gap = first.distance_to(last);
        if gap < config.near_duplicate_epsilon {
            points.pop();
        } else if gap.is_nan() || gap >= config.closure_tolerance {
            return Err(Skip::NotClosed {
                gap,
                tolerance: config.closure_tolerance,
            });
        }
    }

    // 2. vertex count
    if points.len() < 3 {
        return Err(Skip::InsufficientVertices(points.len()));
    }

    // 3. area
    let area = signed_area(&points);
    if !area.is_finite() || area.abs() < config.min_area {
        return Err(Skip::AreaTooSmall {
            area: area.abs(),
            min: config.min_area,
        });
    }

    // 4. winding
    if area < 0.0 {
        points.reverse();
    }

    // 5. duplicates (collinear vertices are kept); count and area are
    // checked again on the cleaned ring
    let points = remove_duplicates(&points, config.vertex_epsilon);
    if points.len() < 3 {
        return Err(Skip::InsufficientVertices(points.len()));
    }
    let area = signed_area(&points).abs();
    if area < config.min_area {
        return Err(Skip::AreaTooSmall {
            area,
            min: config.min_area,
        });
    }

    // 6. self-intersection
    let self_intersecting = has_self_intersection(&points);
    if self_intersecting {
        tracing::warn!(
            vertices = points.len(),
            "Polygon has crossing edges; keeping it as drawn"
        );
    }

    Ok(Polygon {
        area,
        vertices: points,
        self_intersecting,
    })
}

/// Shoelace signed area; positive for counter-clockwise rings
pub fn signed_area(points: &[Point2D]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let p = points[i];
        let q = points[(i + 1) % n];
        sum += p.x * q.y - q.x * p.y;
    }
    sum / 2.0
}

/// Drop each vertex that sits within `epsilon` of its cyclic successor
fn remove_duplicates(points: &[Point2D], epsilon: f64) -> Vec<Point2D> {
    let n = points.len();
    let mut kept = Vec::with_capacity(n);
    for i in 0..n {
        let next = points[(i + 1) % n];
        if points[i].distance_to(&next) > epsilon {
            kept.push(points[i]);
        }
    }
    kept
}

/// Test every pair of non-adjacent edges of a closed ring for a crossing
pub fn has_self_intersection(points: &[Point2D]) -> bool {
    let n = points.len();
    if n < 4 {
        return false;
    }
    for i in 0..n {
        for j in (i + 2)..n {
            // first and last edge share the closing vertex
            if i == 0 && j == n - 1 {
                continue;
            }
            if segments_intersect(points[i], points[i + 1], points[j], points[(j + 1) % n]) {
                return true;
            }
        }
    }
    false
}

/// Parametric segment intersection; parallel segments never intersect
pub fn segments_intersect(p1: Point2D, p2: Point2D, p3: Point2D, p4: Point2D) -> bool {
    let r = p1.vector_to(&p2);
    let s = p3.vector_to(&p4);
    let denom = r.perp(&s);
    if denom.abs() < PARALLEL_EPSILON {
        return false;
    }
    let qp = p1.vector_to(&p3);
    let t = qp.perp(&s) / denom;
    let u = qp.perp(&r) / denom;
    (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point2D> {
        coords.iter().map(|&(x, y)| Point2D::new(x, y)).collect()
    }

    #[test]
    fn test_signed_area_orientation() {
        let ccw = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        assert_relative_eq!(signed_area(&ccw), 100.0);
        let mut cw = ccw.clone();
        cw.reverse();
        assert_relative_eq!(signed_area(&cw), -100.0);
    }

    #[test]
    fn test_clockwise_input_is_reversed() {
        let cw = pts(&[(0.0, 0.0), (0.0, 1000.0), (1000.0, 1000.0), (1000.0, 0.0)]);
        let polygon = sanitize(&cw, &SanitizeConfig::default()).unwrap();
        assert!(signed_area(polygon.vertices()) > 0.0);
        assert_eq!(
            polygon.vertices(),
            &pts(&[(1000.0, 0.0), (1000.0, 1000.0), (0.0, 1000.0), (0.0, 0.0)])[..]
        );
    }

    #[test]
    fn test_not_closed() {
        let open = pts(&[(0.0, 0.0), (20_000.0, 0.0), (20_000.0, 20_000.0)]);
        match sanitize(&open, &SanitizeConfig::default()) {
            Err(Skip::NotClosed { gap, tolerance }) => {
                assert_relative_eq!(gap, 20_000.0 * 2f64.sqrt());
                assert_relative_eq!(tolerance, 10_000.0);
            }
            other => panic!("expected NotClosed, got {:?}", other),
        }
    }

    #[test]
    fn test_implicit_closure_within_tolerance() {
        // open L-shaped run, gap of 5 m back to the start
        let open = pts(&[(0.0, 0.0), (5000.0, 0.0), (5000.0, 5000.0)]);
        let polygon = sanitize(&open, &SanitizeConfig::default()).unwrap();
        assert_eq!(polygon.len(), 3);
        assert_relative_eq!(polygon.area(), 12_500_000.0);
    }

    #[test]
    fn test_area_too_small() {
        let sliver = pts(&[(0.0, 0.0), (100.0, 0.0), (100.0, 50.0), (0.0, 50.0)]);
        assert!(matches!(
            sanitize(&sliver, &SanitizeConfig::default()),
            Err(Skip::AreaTooSmall { .. })
        ));
    }

    #[test]
    fn test_empty_and_single_point() {
        let config = SanitizeConfig::default();
        assert_eq!(sanitize(&[], &config), Err(Skip::InsufficientVertices(0)));
        assert_eq!(
            sanitize(&pts(&[(1.0, 1.0)]), &config),
            Err(Skip::InsufficientVertices(0))
        );
    }

    #[test]
    fn test_stacked_vertices_collapse() {
        let boundary = pts(&[
            (0.0, 0.0),
            (1000.0, 0.0),
            (1000.0, 0.0005),
            (1000.0, 1000.0),
            (0.0, 1000.0),
        ]);
        let polygon = sanitize(&boundary, &SanitizeConfig::default()).unwrap();
        assert_eq!(polygon.len(), 4);
    }

    #[test]
    fn test_area_rechecked_after_duplicate_removal() {
        // the spike at (100, -0.0009) adds 0.045 to the area and collapses
        // into (100, 0), leaving exactly 10 000
        let boundary = pts(&[
            (0.0, 0.0),
            (100.0, -0.0009),
            (100.0, 0.0),
            (100.0, 100.0),
            (0.0, 100.0),
        ]);
        assert_relative_eq!(signed_area(&boundary), 10_000.045, epsilon = 1e-6);
        let config = SanitizeConfig {
            min_area: 10_000.03,
            ..SanitizeConfig::default()
        };
        match sanitize(&boundary, &config) {
            Err(Skip::AreaTooSmall { area, min }) => {
                assert_relative_eq!(area, 10_000.0, epsilon = 1e-9);
                assert_relative_eq!(min, 10_000.03);
            }
            other => panic!("expected AreaTooSmall, got {:?}", other),
        }

        // the same ring passes under the default minimum, with four vertices
        let polygon = sanitize(&boundary, &SanitizeConfig::default()).unwrap();
        assert_eq!(polygon.len(), 4);
        assert!(polygon.area() >= SanitizeConfig::default().min_area);
    }

    #[test]
    fn test_collinear_vertices_are_kept() {
        // midpoint on the bottom edge is a real vertex, not a duplicate
        let boundary = pts(&[
            (0.0, 0.0),
            (500.0, 0.0),
            (1000.0, 0.0),
            (1000.0, 1000.0),
            (0.0, 1000.0),
        ]);
        let polygon = sanitize(&boundary, &SanitizeConfig::default()).unwrap();
        assert_eq!(polygon.len(), 5);
    }

    #[test]
    fn test_bowtie_is_flagged_but_kept() {
        // crossing quad with net area from an offset lobe
        let bowtie = pts(&[(0.0, 0.0), (2000.0, 2000.0), (2000.0, 0.0), (0.0, 1000.0)]);
        let polygon = sanitize(&bowtie, &SanitizeConfig::default()).unwrap();
        assert!(polygon.is_self_intersecting());
        assert_eq!(polygon.len(), 4);
    }

    #[test]
    fn test_segments_intersect() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(10.0, 10.0);
        let c = Point2D::new(0.0, 10.0);
        let d = Point2D::new(10.0, 0.0);
        assert!(segments_intersect(a, b, c, d));
        // parallel
        assert!(!segments_intersect(
            a,
            Point2D::new(10.0, 0.0),
            Point2D::new(0.0, 1.0),
            Point2D::new(10.0, 1.0)
        ));
        // disjoint
        assert!(!segments_intersect(
            a,
            Point2D::new(1.0, 1.0),
            Point2D::new(5.0, 0.0),
            Point2D::new(6.0, -3.0)
        ));
    }

    #[test]
    fn test_for_unit_meters() {
        let config = SanitizeConfig::for_unit(LengthUnit::Meter);
        assert_relative_eq!(config.min_area, 0.01);
        assert_relative_eq!(config.closure_tolerance, 10.0, epsilon = 1e-9);
        assert_relative_eq!(config.near_duplicate_epsilon, 1e-4, epsilon = 1e-12);
        assert!(config.validate().is_ok());

        let bad = SanitizeConfig {
            vertex_epsilon: -1.0,
            ..SanitizeConfig::default()
        };
        assert!(matches!(
            bad.validate(),
            Err(Error::InvalidTolerance { name: "vertex_epsilon", .. })
        ));
    }

    #[test]
    fn test_min_extent() {
        let boundary = pts(&[(0.0, 0.0), (4000.0, 0.0), (4000.0, 1200.0), (0.0, 1200.0)]);
        let polygon = sanitize(&boundary, &SanitizeConfig::default()).unwrap();
        assert_relative_eq!(polygon.min_extent(), 1200.0);
        assert_relative_eq!(polygon.area_m2(LengthUnit::Millimeter), 4.8, epsilon = 1e-9);
    }
}
