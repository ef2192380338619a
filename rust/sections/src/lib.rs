// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planform Sections
//!
//! Everything needed to turn a measured element into a named section:
//!
//! - [`Catalog`] indexes the frame sections defined in the host model
//! - [`SectionResolver`] picks the nearest section for a width and depth
//! - [`sizing`] holds the seismic-zone thickness tables and slab rules
//! - [`GradeSchedule`] maps stories to concrete grades
//! - [`classify`] reads element intent out of layer names
//!
//! All of these are immutable once built and can be shared across threads.

pub mod catalog;
pub mod classify;
pub mod error;
pub mod grade;
pub mod resolver;
pub mod sizing;
pub mod zone;

pub use catalog::{parse_section_name, Catalog, SectionSpec};
pub use classify::{explicit_slab_thickness, BeamRole, ElementKind, SlabKind, WallType};
pub use error::{Error, Result};
pub use grade::{Grade, GradeSchedule, GradeTier, TierSummary};
pub use resolver::{match_score, SectionMatch, SectionResolver};
pub use sizing::{
    available_wall_thicknesses, beam_width, cantilever_slab_thickness, gravity_beam_width,
    is_short_wall, slab_thickness_for_area, thickness_preview, wall_thickness, ThicknessPreview,
};
pub use zone::SeismicZone;
