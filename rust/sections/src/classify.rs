// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Layer-name classification
//!
//! Drafting offices encode intent in layer names ("CORE WALL", "B-PERIPHERAL
//! DEAD MAIN", "BALCONY SLAB"). Classification is a keyword scan over the
//! upper-cased name, evaluated once per layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a layer's entities become in the structural model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Wall,
    Beam,
    Slab,
    Ignore,
}

impl ElementKind {
    /// Guess the element kind from a layer name; `None` if nothing fits
    pub fn auto_map(layer: &str) -> Option<ElementKind> {
        let upper = layer.to_ascii_uppercase();
        if upper.starts_with("B-") || upper.contains("BEAM") {
            Some(ElementKind::Beam)
        } else if upper.contains("WALL") {
            Some(ElementKind::Wall)
        } else if upper.starts_with("S-") || upper.contains("SLAB") {
            Some(ElementKind::Slab)
        } else {
            None
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ElementKind::Wall => "wall",
            ElementKind::Beam => "beam",
            ElementKind::Slab => "slab",
            ElementKind::Ignore => "ignore",
        };
        f.write_str(s)
    }
}

/// Structural wall classes used by the thickness tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallType {
    CoreWall,
    PeripheralDeadWall,
    PeripheralPortalWall,
    InternalWall,
}

const CORE_KEYWORDS: &[&str] = &["CORE", "LIFT", "ELEVATOR", "SHAFT", "STAIR"];
const PORTAL_KEYWORDS: &[&str] = &["PORTAL", "FRAME"];
const PERIPHERAL_KEYWORDS: &[&str] = &[
    "EXTERNAL",
    "EXTERIOR",
    "OUTER",
    "BOUNDARY",
    "PERIMETER",
    "FACADE",
];

impl WallType {
    pub const ALL: [WallType; 4] = [
        WallType::CoreWall,
        WallType::PeripheralDeadWall,
        WallType::PeripheralPortalWall,
        WallType::InternalWall,
    ];

    pub fn from_layer_name(layer: &str) -> WallType {
        let upper = layer.to_ascii_uppercase();
        let has = |words: &[&str]| words.iter().any(|w| upper.contains(w));
        if has(CORE_KEYWORDS) {
            WallType::CoreWall
        } else if has(PORTAL_KEYWORDS) {
            WallType::PeripheralPortalWall
        } else if has(PERIPHERAL_KEYWORDS) {
            WallType::PeripheralDeadWall
        } else {
            WallType::InternalWall
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WallType::CoreWall => "Core",
            WallType::PeripheralDeadWall => "Peripheral dead",
            WallType::PeripheralPortalWall => "Peripheral portal",
            WallType::InternalWall => "Internal",
        }
    }
}

/// Beam roles; gravity beams carry slab load only, main beams frame walls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BeamRole {
    InternalGravity,
    CantileverGravity,
    CoreMain,
    PeripheralDeadMain,
    PeripheralPortalMain,
    InternalMain,
}

impl BeamRole {
    pub const ALL: [BeamRole; 6] = [
        BeamRole::InternalGravity,
        BeamRole::CantileverGravity,
        BeamRole::CoreMain,
        BeamRole::PeripheralDeadMain,
        BeamRole::PeripheralPortalMain,
        BeamRole::InternalMain,
    ];

    /// Match a layer name against the role keyword sets; first match wins
    pub fn classify(layer: &str) -> Option<BeamRole> {
        let upper = layer.to_ascii_uppercase();
        let has = |w: &str| upper.contains(w);
        if has("INTERNAL") && has("GRAVITY") {
            Some(BeamRole::InternalGravity)
        } else if has("CANTILEVER") && has("GRAVITY") {
            Some(BeamRole::CantileverGravity)
        } else if has("CORE") && has("MAIN") {
            Some(BeamRole::CoreMain)
        } else if has("PERIPHERAL") && has("DEAD") && has("MAIN") {
            Some(BeamRole::PeripheralDeadMain)
        } else if has("PERIPHERAL") && has("PORTAL") && has("MAIN") {
            Some(BeamRole::PeripheralPortalMain)
        } else if has("INTERNAL") && has("MAIN") {
            Some(BeamRole::InternalMain)
        } else {
            None
        }
    }

    /// Like [`classify`](Self::classify) but falls back to an internal gravity beam
    pub fn from_layer_name(layer: &str) -> BeamRole {
        Self::classify(layer).unwrap_or_else(|| {
            tracing::warn!(layer, "Beam layer has no role keywords; treating as internal gravity");
            BeamRole::InternalGravity
        })
    }

    pub fn is_gravity(self) -> bool {
        matches!(self, BeamRole::InternalGravity | BeamRole::CantileverGravity)
    }

    /// Wall class whose thickness sets this main beam's width
    pub fn supporting_wall(self) -> Option<WallType> {
        match self {
            BeamRole::CoreMain => Some(WallType::CoreWall),
            BeamRole::PeripheralDeadMain => Some(WallType::PeripheralDeadWall),
            BeamRole::PeripheralPortalMain => Some(WallType::PeripheralPortalWall),
            BeamRole::InternalMain => Some(WallType::InternalWall),
            BeamRole::InternalGravity | BeamRole::CantileverGravity => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BeamRole::InternalGravity => "Internal gravity",
            BeamRole::CantileverGravity => "Cantilever gravity",
            BeamRole::CoreMain => "Core main",
            BeamRole::PeripheralDeadMain => "Peripheral dead main",
            BeamRole::PeripheralPortalMain => "Peripheral portal main",
            BeamRole::InternalMain => "Internal main",
        }
    }
}

/// Slab usage, which picks the thickness rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlabKind {
    Regular,
    Cantilever,
    Lobby,
    Stair,
}

const CANTILEVER_KEYWORDS: &[&str] = &["BALCONY", "CANTILEVER", "CHAJJA"];

/// Thicknesses a layer name may spell out explicitly, e.g. "SLAB-200"
const EXPLICIT_SLAB_THICKNESSES: [u32; 7] = [250, 225, 200, 175, 150, 125, 100];

impl SlabKind {
    pub fn from_layer_name(layer: &str) -> SlabKind {
        let upper = layer.to_ascii_uppercase();
        if upper.contains("LOBBY") {
            SlabKind::Lobby
        } else if upper.contains("STAIR") {
            SlabKind::Stair
        } else if CANTILEVER_KEYWORDS.iter().any(|w| upper.contains(w)) {
            SlabKind::Cantilever
        } else {
            SlabKind::Regular
        }
    }
}

/// Thickness written into a slab layer name, if any
pub fn explicit_slab_thickness(layer: &str) -> Option<u32> {
    EXPLICIT_SLAB_THICKNESSES
        .iter()
        .copied()
        .find(|t| layer.contains(&t.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_map() {
        assert_eq!(ElementKind::auto_map("B-Core Main"), Some(ElementKind::Beam));
        assert_eq!(ElementKind::auto_map("Gravity beam"), Some(ElementKind::Beam));
        assert_eq!(ElementKind::auto_map("Shear Wall"), Some(ElementKind::Wall));
        assert_eq!(ElementKind::auto_map("s-typical"), Some(ElementKind::Slab));
        assert_eq!(ElementKind::auto_map("FLOOR SLAB"), Some(ElementKind::Slab));
        assert_eq!(ElementKind::auto_map("A-FURNITURE"), None);
    }

    #[test]
    fn test_wall_type_keywords() {
        assert_eq!(WallType::from_layer_name("Lift core wall"), WallType::CoreWall);
        assert_eq!(WallType::from_layer_name("STAIRCASE"), WallType::CoreWall);
        assert_eq!(
            WallType::from_layer_name("portal frame wall"),
            WallType::PeripheralPortalWall
        );
        assert_eq!(
            WallType::from_layer_name("Facade wall"),
            WallType::PeripheralDeadWall
        );
        assert_eq!(WallType::from_layer_name("partition"), WallType::InternalWall);
        // core keywords are checked before peripheral ones
        assert_eq!(WallType::from_layer_name("EXTERNAL SHAFT"), WallType::CoreWall);
    }

    #[test]
    fn test_beam_roles() {
        assert_eq!(
            BeamRole::classify("B-Internal Gravity"),
            Some(BeamRole::InternalGravity)
        );
        assert_eq!(
            BeamRole::classify("b-cantilever gravity"),
            Some(BeamRole::CantileverGravity)
        );
        assert_eq!(BeamRole::classify("B-CORE MAIN"), Some(BeamRole::CoreMain));
        assert_eq!(
            BeamRole::classify("B-Peripheral Dead Main"),
            Some(BeamRole::PeripheralDeadMain)
        );
        assert_eq!(
            BeamRole::classify("B-Peripheral Portal Main"),
            Some(BeamRole::PeripheralPortalMain)
        );
        assert_eq!(BeamRole::classify("B-Internal Main"), Some(BeamRole::InternalMain));
        assert_eq!(BeamRole::classify("BEAMS"), None);
        assert_eq!(BeamRole::from_layer_name("BEAMS"), BeamRole::InternalGravity);
    }

    #[test]
    fn test_beam_support() {
        assert!(BeamRole::CantileverGravity.is_gravity());
        assert_eq!(BeamRole::CantileverGravity.supporting_wall(), None);
        assert_eq!(
            BeamRole::PeripheralPortalMain.supporting_wall(),
            Some(WallType::PeripheralPortalWall)
        );
    }

    #[test]
    fn test_slab_kinds() {
        assert_eq!(SlabKind::from_layer_name("S-Balcony"), SlabKind::Cantilever);
        assert_eq!(SlabKind::from_layer_name("chajja slab"), SlabKind::Cantilever);
        assert_eq!(SlabKind::from_layer_name("Lobby slab"), SlabKind::Lobby);
        assert_eq!(SlabKind::from_layer_name("STAIR SLAB"), SlabKind::Stair);
        assert_eq!(SlabKind::from_layer_name("S-Typical"), SlabKind::Regular);
    }

    #[test]
    fn test_explicit_thickness() {
        assert_eq!(explicit_slab_thickness("SLAB-200"), Some(200));
        assert_eq!(explicit_slab_thickness("S 125 TOILET"), Some(125));
        assert_eq!(explicit_slab_thickness("SLAB"), None);
    }
}
