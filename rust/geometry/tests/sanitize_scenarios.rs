// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end checks on drawing-shaped input: hatch loops and polylines as
//! they come out of typical architectural plans (millimetre units).

use approx::assert_relative_eq;
use planform_geometry::{
    sanitize, signed_area, tessellate_boundary, BoundaryEdge, LengthUnit, Point2D,
    SanitizeConfig, Skip,
};

fn pts(coords: &[(f64, f64)]) -> Vec<Point2D> {
    coords.iter().map(|&(x, y)| Point2D::new(x, y)).collect()
}

#[test]
fn rectangle_with_near_duplicate_closing_point() {
    let boundary = pts(&[
        (0.0, 0.0),
        (10_000.0, 0.0),
        (10_000.0, 5_000.0),
        (0.0, 5_000.0),
        (0.0, 0.05),
    ]);
    let polygon = sanitize(&boundary, &SanitizeConfig::default()).unwrap();

    assert_eq!(polygon.len(), 4);
    assert!(signed_area(polygon.vertices()) > 0.0);
    assert_relative_eq!(polygon.area(), 50_000_000.0);
    assert_relative_eq!(polygon.area_m2(LengthUnit::Millimeter), 50.0, epsilon = 1e-9);
    assert!(!polygon.is_self_intersecting());
}

#[test]
fn two_distinct_points_are_insufficient() {
    let config = SanitizeConfig::default();
    let closed_line = pts(&[(0.0, 0.0), (3_000.0, 0.0), (0.0, 0.0)]);
    assert_eq!(
        sanitize(&closed_line, &config),
        Err(Skip::InsufficientVertices(2))
    );

    let open_line = pts(&[(0.0, 0.0), (3_000.0, 0.0)]);
    assert_eq!(
        sanitize(&open_line, &config),
        Err(Skip::InsufficientVertices(2))
    );
}

#[test]
fn sanitize_is_idempotent() {
    let config = SanitizeConfig::default();
    let raw = pts(&[
        (0.0, 0.0),
        (0.0, 6_000.0),
        (6_000.0, 6_000.0),
        (6_000.0, 6_000.0005),
        (6_000.0, 0.0),
        (0.0, 0.01),
    ]);
    let once = sanitize(&raw, &config).unwrap();

    let again = sanitize(once.vertices(), &config).unwrap();
    assert_eq!(again, once);

    let from_ring = sanitize(&once.closed_ring(), &config).unwrap();
    assert_eq!(from_ring, once);
}

#[test]
fn output_invariants_hold_for_messy_input() {
    let config = SanitizeConfig::default();
    let inputs = vec![
        pts(&[(0.0, 0.0), (2_000.0, 0.0), (2_000.0, 2_000.0)]),
        pts(&[(5.0, 5.0), (5.0, 3_005.0), (3_005.0, 3_005.0), (3_005.0, 5.0), (5.0, 5.0)]),
        pts(&[
            (0.0, 0.0),
            (0.0, 0.0),
            (4_000.0, 0.0),
            (4_000.0, 0.0),
            (4_000.0, 4_000.0),
            (0.0, 4_000.0),
        ]),
    ];

    for input in inputs {
        let polygon = sanitize(&input, &config).unwrap();
        let v = polygon.vertices();
        assert!(v.len() >= 3);
        assert!(signed_area(v) > 0.0);
        assert!(polygon.area() >= config.min_area);
        assert_ne!(v.first(), v.last());
        for (a, b) in polygon.edges() {
            assert!(a.distance_to(&b) > config.vertex_epsilon);
        }
    }
}

#[test]
fn hatch_with_rounded_corner() {
    // 4 m square whose top-right corner is a 1 m quarter circle
    let edges = vec![
        BoundaryEdge::Line {
            start: Point2D::new(0.0, 0.0),
            end: Point2D::new(4_000.0, 0.0),
        },
        BoundaryEdge::Line {
            start: Point2D::new(4_000.0, 0.0),
            end: Point2D::new(4_000.0, 3_000.0),
        },
        BoundaryEdge::Arc {
            center: Point2D::new(3_000.0, 3_000.0),
            radius: 1_000.0,
            start_angle: 0.0,
            end_angle: 90.0,
        },
        BoundaryEdge::Line {
            start: Point2D::new(3_000.0, 4_000.0),
            end: Point2D::new(0.0, 4_000.0),
        },
        BoundaryEdge::Line {
            start: Point2D::new(0.0, 4_000.0),
            end: Point2D::new(0.0, 0.0),
        },
    ];
    let boundary = tessellate_boundary(&edges);
    assert_eq!(boundary.len(), 4 + 17);

    let polygon = sanitize(&boundary, &SanitizeConfig::default()).unwrap();
    // arc end and the following line start coincide and collapse into one
    assert_eq!(polygon.len(), 20);

    let square = 16_000_000.0;
    let corner_cut = 1_000_000.0 - std::f64::consts::PI * 1_000_000.0 / 4.0;
    // polygonal arc sits slightly inside the true circle
    assert!(polygon.area() < square - corner_cut);
    assert!(polygon.area() > square - corner_cut - 5_000.0);
}
