// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planform Geometry
//!
//! Turns raw floor-plan geometry into shapes a structural model can accept:
//! hatch boundaries are tessellated into vertex loops, loops are sanitized
//! into closed counter-clockwise polygons, and line work becomes segments
//! with a guaranteed minimum length.
//!
//! ```
//! use planform_geometry::{sanitize, Point2D, SanitizeConfig};
//!
//! let boundary = vec![
//!     Point2D::new(0.0, 0.0),
//!     Point2D::new(0.0, 4000.0),
//!     Point2D::new(4000.0, 4000.0),
//!     Point2D::new(4000.0, 0.0),
//! ];
//! let polygon = sanitize(&boundary, &SanitizeConfig::default()).unwrap();
//! assert_eq!(polygon.len(), 4);
//! assert!(polygon.area() > 0.0);
//! ```

pub mod error;
pub mod point;
pub mod polygon;
pub mod segment;
pub mod tessellate;
pub mod units;

pub use error::{Error, Result, Skip};
pub use point::{Boundary, Point2D};
pub use polygon::{
    has_self_intersection, sanitize, segments_intersect, signed_area, Polygon, SanitizeConfig,
    MIN_AREA_M2,
};
pub use segment::{polyline_pairs, Segment, MIN_SEGMENT_LENGTH_M};
pub use tessellate::{tessellate, tessellate_boundary, BoundaryEdge, EdgePoints};
pub use units::LengthUnit;
