// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Code-derived sizing tables
//!
//! Wall thickness depends on the seismic zone, the wall class and the number
//! of floors in the tower. Floor counts are grouped into bands (up to 20,
//! then every 5 floors up to 50). Some rows have a variant column: floating
//! columns in Zone II core and peripheral walls, short walls (under 1.8 m)
//! for internal walls in every zone.
//!
//! Beam widths and slab thicknesses are derived from the same tables or from
//! fixed rules of thumb.

use crate::classify::{BeamRole, WallType};
use crate::error::{Error, Result};
use crate::zone::SeismicZone;
use serde::Serialize;

pub const MIN_FLOORS: u32 = 1;
pub const MAX_FLOORS: u32 = 50;

/// Walls shorter than this (metres) use the short-wall column
pub const SHORT_WALL_LENGTH_M: f64 = 1.8;

/// Upper floor count of each band
const BAND_LIMITS: [u32; 7] = [20, 25, 30, 35, 40, 45, 50];

type Band = [u32; 7];

#[derive(Debug, Clone, Copy)]
struct ThicknessRow {
    normal: Band,
    floating: Option<Band>,
    short: Option<Band>,
}

impl ThicknessRow {
    const fn plain(normal: Band) -> Self {
        Self {
            normal,
            floating: None,
            short: None,
        }
    }

    const fn with_floating(normal: Band, floating: Band) -> Self {
        Self {
            normal,
            floating: Some(floating),
            short: None,
        }
    }

    const fn with_short(normal: Band, short: Band) -> Self {
        Self {
            normal,
            floating: None,
            short: Some(short),
        }
    }

    fn pick(&self, band: usize, is_short: bool, is_floating: bool) -> u32 {
        match (is_short, is_floating, self.short, self.floating) {
            (true, _, Some(short), _) => short[band],
            (_, true, _, Some(floating)) => floating[band],
            _ => self.normal[band],
        }
    }
}

const ZONE_II: [ThicknessRow; 4] = [
    ThicknessRow::with_floating(
        [160, 200, 200, 200, 200, 200, 300],
        [200, 250, 250, 300, 300, 325, 350],
    ),
    ThicknessRow::with_floating(
        [160, 200, 200, 200, 200, 250, 300],
        [200, 250, 250, 250, 250, 300, 350],
    ),
    ThicknessRow::plain([200, 200, 200, 200, 200, 250, 300]),
    ThicknessRow::with_short(
        [160, 160, 160, 200, 200, 225, 250],
        [200, 200, 250, 300, 300, 325, 350],
    ),
];

const ZONE_III: [ThicknessRow; 4] = [
    ThicknessRow::plain([200, 300, 350, 375, 400, 425, 450]),
    ThicknessRow::plain([200, 200, 250, 300, 325, 350, 400]),
    ThicknessRow::plain([300, 350, 400, 400, 400, 400, 450]),
    ThicknessRow::with_short(
        [200, 200, 200, 225, 250, 275, 300],
        [300, 300, 300, 350, 400, 450, 500],
    ),
];

const ZONE_IV: [ThicknessRow; 4] = [
    ThicknessRow::plain([300, 350, 375, 400, 425, 450, 500]),
    ThicknessRow::plain([240, 240, 275, 300, 325, 350, 400]),
    ThicknessRow::plain([300, 350, 400, 400, 400, 400, 450]),
    ThicknessRow::with_short(
        [240, 240, 240, 240, 240, 275, 300],
        [300, 300, 300, 350, 400, 450, 500],
    ),
];

fn row(zone: SeismicZone, wall_type: WallType) -> &'static ThicknessRow {
    let table = match zone.table_zone() {
        SeismicZone::II => &ZONE_II,
        SeismicZone::III => &ZONE_III,
        SeismicZone::IV | SeismicZone::V => &ZONE_IV,
    };
    let i = match wall_type {
        WallType::CoreWall => 0,
        WallType::PeripheralDeadWall => 1,
        WallType::PeripheralPortalWall => 2,
        WallType::InternalWall => 3,
    };
    &table[i]
}

/// Band index for a floor count, or `OutOfRange`
pub fn floor_band(floors: u32) -> Result<usize> {
    if !(MIN_FLOORS..=MAX_FLOORS).contains(&floors) {
        return Err(Error::OutOfRange { floors });
    }
    Ok(BAND_LIMITS
        .iter()
        .position(|&limit| floors <= limit)
        .unwrap_or(BAND_LIMITS.len() - 1))
}

pub fn is_short_wall(length_m: f64) -> bool {
    length_m < SHORT_WALL_LENGTH_M
}

/// Required wall thickness in millimetres
pub fn wall_thickness(
    wall_type: WallType,
    zone: SeismicZone,
    floors: u32,
    is_short: bool,
    is_floating: bool,
) -> Result<u32> {
    let band = floor_band(floors)?;
    Ok(row(zone, wall_type).pick(band, is_short, is_floating))
}

/// Width of gravity beams in millimetres
pub fn gravity_beam_width(zone: SeismicZone) -> u32 {
    if zone.is_high() {
        240
    } else {
        200
    }
}

/// Beam width in millimetres.
///
/// Main beams are as wide as the normal-length, non-floating wall they
/// frame into.
pub fn beam_width(role: BeamRole, zone: SeismicZone, floors: u32) -> Result<u32> {
    match role.supporting_wall() {
        Some(wall_type) => wall_thickness(wall_type, zone, floors, false, false),
        None => {
            floor_band(floors)?;
            Ok(gravity_beam_width(zone))
        }
    }
}

/// Regular slab thickness from its area in square metres
pub fn slab_thickness_for_area(area_m2: f64) -> u32 {
    const STEPS: [(f64, u32); 7] = [
        (14.0, 125),
        (17.0, 135),
        (22.0, 150),
        (25.0, 160),
        (32.0, 175),
        (42.0, 200),
        (70.0, 250),
    ];
    STEPS
        .iter()
        .find(|(limit, _)| area_m2 <= *limit)
        .map_or(250, |&(_, t)| t)
}

/// Cantilever slab thickness from its span in metres
pub fn cantilever_slab_thickness(span_m: f64) -> u32 {
    const STEPS: [(f64, u32); 4] = [(1.0, 125), (1.5, 160), (1.8, 180), (5.0, 200)];
    STEPS
        .iter()
        .find(|(limit, _)| span_m <= *limit)
        .map_or(200, |&(_, t)| t)
}

/// Wall sections a building needs defined: the normal and short-wall
/// thickness of every wall class, sorted and distinct. Floating-column
/// variants are not included.
pub fn available_wall_thicknesses(zone: SeismicZone, floors: u32) -> Result<Vec<u32>> {
    let band = floor_band(floors)?;
    let mut thicknesses: Vec<u32> = WallType::ALL
        .iter()
        .flat_map(|&wt| {
            let r = row(zone, wt);
            [Some(r.normal[band]), r.short.map(|s| s[band])]
        })
        .flatten()
        .collect();
    thicknesses.sort_unstable();
    thicknesses.dedup();
    Ok(thicknesses)
}

/// One line of the design-notes thickness table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThicknessPreview {
    pub wall_type: WallType,
    pub normal: u32,
    pub short: Option<u32>,
    pub floating: Option<u32>,
}

/// Thickness per wall class for design notes
pub fn thickness_preview(zone: SeismicZone, floors: u32) -> Result<Vec<ThicknessPreview>> {
    let band = floor_band(floors)?;
    Ok(WallType::ALL
        .iter()
        .map(|&wall_type| {
            let r = row(zone, wall_type);
            ThicknessPreview {
                wall_type,
                normal: r.normal[band],
                short: r.short.map(|s| s[band]),
                floating: r.floating.map(|f| f[band]),
            }
        })
        .collect())
}
