// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CAD entities as handed over by the drawing reader

use crate::error::{Error, Result};
use planform_geometry::{BoundaryEdge, Point2D};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A drawing entity together with the layer it lives on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CadEntity {
    pub layer: String,
    #[serde(flatten)]
    pub geometry: EntityGeometry,
}

/// Supported entity geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntityGeometry {
    Line {
        start: Point2D,
        end: Point2D,
    },
    Polyline {
        vertices: Vec<Point2D>,
        #[serde(default)]
        is_closed: bool,
    },
    Hatch {
        /// One edge loop per boundary path
        boundaries: Vec<Vec<BoundaryEdge>>,
    },
}

impl EntityGeometry {
    pub fn type_name(&self) -> &'static str {
        match self {
            EntityGeometry::Line { .. } => "line",
            EntityGeometry::Polyline { .. } => "polyline",
            EntityGeometry::Hatch { .. } => "hatch",
        }
    }
}

impl CadEntity {
    pub fn line(layer: impl Into<String>, start: Point2D, end: Point2D) -> Self {
        Self {
            layer: layer.into(),
            geometry: EntityGeometry::Line { start, end },
        }
    }

    pub fn polyline(layer: impl Into<String>, vertices: Vec<Point2D>, is_closed: bool) -> Self {
        Self {
            layer: layer.into(),
            geometry: EntityGeometry::Polyline {
                vertices,
                is_closed,
            },
        }
    }

    pub fn hatch(layer: impl Into<String>, boundaries: Vec<Vec<BoundaryEdge>>) -> Self {
        Self {
            layer: layer.into(),
            geometry: EntityGeometry::Hatch { boundaries },
        }
    }
}

/// Read a drawing exported as a JSON array of entities
pub fn load_drawing(path: &Path) -> Result<Vec<CadEntity>> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    serde_json::from_str(&text).map_err(|e| Error::json(path, e))
}

/// Distinct layer names in order of first appearance
pub fn layers(entities: &[CadEntity]) -> Vec<&str> {
    let mut seen = rustc_hash::FxHashSet::default();
    entities
        .iter()
        .map(|e| e.layer.as_str())
        .filter(|l| seen.insert(*l))
        .collect()
}
