// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for section resolution and sizing rules.

use crate::grade::Grade;

/// Result type alias for section operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading sections or applying sizing rules.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// None of the supplied names follow `<Role><Width>X<Depth>M<Grade>`.
    #[error("section catalog is empty: none of {scanned} names follow <Role><Width>X<Depth>M<Grade>")]
    CatalogEmpty { scanned: usize },

    /// No catalog entry can serve the requested dimensions.
    #[error("no section for {width}x{depth} mm{}; available widths: {available_widths:?}", grade_suffix(.grade))]
    NoMatch {
        width: u32,
        depth: u32,
        grade: Option<Grade>,
        available_widths: Vec<u32>,
    },

    /// Floor count outside the sizing tables.
    #[error("floor count {floors} is outside the supported range 1..=50")]
    OutOfRange { floors: u32 },

    /// Seismic zone name not recognised.
    #[error("invalid seismic zone: {0:?}")]
    InvalidZone(String),

    /// Grade tier spans do not add up to the building's story count.
    #[error("grade schedule covers {actual} floors but the building has {expected}")]
    FloorCountMismatch { expected: u32, actual: u32 },

    /// Grade and span lists have different lengths.
    #[error("grade schedule has {grades} grades but {spans} floor spans")]
    ScheduleShapeMismatch { grades: usize, spans: usize },

    /// A schedule needs at least one tier.
    #[error("grade schedule has no tiers")]
    EmptySchedule,

    /// Grade label is not `M<number>` or `<number>`.
    #[error("invalid concrete grade: {0:?}")]
    InvalidGrade(String),
}

impl Error {
    /// Whether the error invalidates the whole run rather than one element.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Error::NoMatch { .. })
    }
}

fn grade_suffix(grade: &Option<Grade>) -> String {
    grade.map(|g| format!(" in {g}")).unwrap_or_default()
}
