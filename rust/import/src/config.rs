// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Import configuration
//!
//! Loaded from a JSON file. Every value that feeds a sizing rule is checked
//! again by [`ImportConfig::validate`] before any element is created.

use crate::error::{Error, Result};
use planform_geometry::{LengthUnit, SanitizeConfig};
use planform_sections::{sizing, BeamRole, ElementKind, Grade, GradeSchedule, GradeTier, SeismicZone};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A repeated floor layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorType {
    /// Basement, Podium, EDeck, Typical, or any custom name
    pub name: String,
    /// Number of stories using this layout
    pub count: u32,
    /// Story height in metres
    pub height: f64,
    /// Explicit layer -> element kind mapping; unlisted layers are auto-mapped
    #[serde(default)]
    pub layers: BTreeMap<String, ElementKind>,
    /// Drawing file for this layout, relative to the configuration file
    #[serde(default)]
    pub drawing: Option<PathBuf>,
}

impl FloorType {
    /// Element kind for a layer; `None` means the layer is not imported
    pub fn layer_kind(&self, layer: &str) -> Option<ElementKind> {
        match self.layers.get(layer).copied() {
            Some(ElementKind::Ignore) => None,
            Some(kind) => Some(kind),
            None => ElementKind::auto_map(layer),
        }
    }
}

/// Beam depths in millimetres per role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamDepths {
    pub internal_gravity: u32,
    pub cantilever_gravity: u32,
    pub core_main: u32,
    pub peripheral_dead_main: u32,
    pub peripheral_portal_main: u32,
    pub internal_main: u32,
}

impl Default for BeamDepths {
    fn default() -> Self {
        Self {
            internal_gravity: 450,
            cantilever_gravity: 500,
            core_main: 600,
            peripheral_dead_main: 600,
            peripheral_portal_main: 650,
            internal_main: 550,
        }
    }
}

impl BeamDepths {
    pub fn depth(&self, role: BeamRole) -> u32 {
        match role {
            BeamRole::InternalGravity => self.internal_gravity,
            BeamRole::CantileverGravity => self.cantilever_gravity,
            BeamRole::CoreMain => self.core_main,
            BeamRole::PeripheralDeadMain => self.peripheral_dead_main,
            BeamRole::PeripheralPortalMain => self.peripheral_portal_main,
            BeamRole::InternalMain => self.internal_main,
        }
    }
}

/// Fixed slab thicknesses in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlabThicknesses {
    pub lobby: u32,
    pub stair: u32,
}

impl Default for SlabThicknesses {
    fn default() -> Self {
        Self {
            lobby: 160,
            stair: 175,
        }
    }
}

/// Naming of wall and slab area sections, e.g. `WALL200M40`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaSectionNaming {
    pub wall_prefix: String,
    pub slab_prefix: String,
    /// Append `M<grade>` to the thickness
    pub grade_suffix: bool,
}

impl Default for AreaSectionNaming {
    fn default() -> Self {
        Self {
            wall_prefix: "WALL".to_string(),
            slab_prefix: "SLAB".to_string(),
            grade_suffix: true,
        }
    }
}

impl AreaSectionNaming {
    fn name(&self, prefix: &str, thickness: u32, grade: Grade) -> String {
        if self.grade_suffix {
            format!("{prefix}{thickness}{grade}")
        } else {
            format!("{prefix}{thickness}")
        }
    }

    pub fn wall(&self, thickness: u32, grade: Grade) -> String {
        self.name(&self.wall_prefix, thickness, grade)
    }

    pub fn slab(&self, thickness: u32, grade: Grade) -> String {
        self.name(&self.slab_prefix, thickness, grade)
    }
}

/// Everything the import needs besides the drawings and the section list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportConfig {
    pub seismic_zone: SeismicZone,
    /// Drawing length unit
    #[serde(default)]
    pub units: LengthUnit,
    /// Floor types, bottom to top
    pub floor_types: Vec<FloorType>,
    /// Grade tiers, bottom to top; spans must cover every story
    pub grade_schedule: Vec<GradeTier>,
    #[serde(default)]
    pub beam_depths: BeamDepths,
    #[serde(default)]
    pub slab_thicknesses: SlabThicknesses,
    #[serde(default)]
    pub section_naming: AreaSectionNaming,
    /// Zone II only: core and peripheral walls carry floating columns
    #[serde(default)]
    pub floating_columns: bool,
    /// Override the unit-derived sanitizer tolerances
    #[serde(default)]
    pub tolerances: Option<SanitizeConfig>,
}

impl ImportConfig {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Load from a file; drawing paths are resolved against its directory
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let mut config = Self::from_json(&text).map_err(|e| Error::json(path, e))?;
        if let Some(dir) = path.parent() {
            for ft in &mut config.floor_types {
                if let Some(drawing) = ft.drawing.as_mut() {
                    if drawing.is_relative() {
                        *drawing = dir.join(&*drawing);
                    }
                }
            }
        }
        Ok(config)
    }

    /// Stories across every floor type, saturating at `u32::MAX`
    pub fn total_stories(&self) -> u32 {
        self.floor_types
            .iter()
            .fold(0u32, |acc, ft| acc.saturating_add(ft.count))
    }

    /// Floor count used by the sizing tables: the typical floors if a
    /// "Typical" floor type exists, otherwise every story
    pub fn sizing_floors(&self) -> u32 {
        self.floor_types
            .iter()
            .find(|ft| ft.name.eq_ignore_ascii_case("typical"))
            .map_or_else(|| self.total_stories(), |ft| ft.count)
    }

    pub fn sanitize_config(&self) -> SanitizeConfig {
        self.tolerances
            .unwrap_or_else(|| SanitizeConfig::for_unit(self.units))
    }

    /// Check the configuration and build the grade schedule
    pub fn validate(&self) -> Result<GradeSchedule> {
        if self.floor_types.is_empty() {
            return Err(Error::Config("no floor types defined".into()));
        }
        for ft in &self.floor_types {
            if ft.count == 0 {
                return Err(Error::Config(format!("floor type {:?} has zero stories", ft.name)));
            }
            if !(ft.height.is_finite() && ft.height > 0.0) {
                return Err(Error::Config(format!(
                    "floor type {:?} has invalid height {}",
                    ft.name, ft.height
                )));
            }
        }

        if self
            .floor_types
            .iter()
            .try_fold(0u32, |acc, ft| acc.checked_add(ft.count))
            .is_none()
        {
            return Err(Error::Config("total story count overflows".into()));
        }

        let depths = [
            self.beam_depths.internal_gravity,
            self.beam_depths.cantilever_gravity,
            self.beam_depths.core_main,
            self.beam_depths.peripheral_dead_main,
            self.beam_depths.peripheral_portal_main,
            self.beam_depths.internal_main,
        ];
        if depths.contains(&0) {
            return Err(Error::Config("beam depths must be positive".into()));
        }
        if self.slab_thicknesses.lobby == 0 || self.slab_thicknesses.stair == 0 {
            return Err(Error::Config("slab thicknesses must be positive".into()));
        }

        sizing::floor_band(self.sizing_floors())?;
        self.sanitize_config().validate()?;
        let schedule = GradeSchedule::new(self.grade_schedule.clone(), self.total_stories())?;
        Ok(schedule)
    }
}
