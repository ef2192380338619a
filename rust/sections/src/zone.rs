// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Seismic zones

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Seismic zone of the building site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SeismicZone {
    II,
    III,
    IV,
    V,
}

impl SeismicZone {
    pub const ALL: [SeismicZone; 4] = [
        SeismicZone::II,
        SeismicZone::III,
        SeismicZone::IV,
        SeismicZone::V,
    ];

    /// Zone whose sizing table applies (V shares the Zone IV table)
    pub fn table_zone(self) -> SeismicZone {
        match self {
            SeismicZone::V => SeismicZone::IV,
            other => other,
        }
    }

    /// Whether the high-seismicity rules (thicker gravity beams) apply
    pub fn is_high(self) -> bool {
        matches!(self, SeismicZone::IV | SeismicZone::V)
    }
}

impl FromStr for SeismicZone {
    type Err = Error;

    /// Accepts `Zone II`, `zone-iii`, `IV`, `5` and similar spellings
    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_ascii_uppercase();
        let rest = upper.strip_prefix("ZONE").unwrap_or(&upper);
        let token = rest.trim_start_matches(|c: char| c.is_whitespace() || c == '-' || c == '_');
        match token.trim_end() {
            "II" | "2" => Ok(SeismicZone::II),
            "III" | "3" => Ok(SeismicZone::III),
            "IV" | "4" => Ok(SeismicZone::IV),
            "V" | "5" => Ok(SeismicZone::V),
            _ => Err(Error::InvalidZone(s.to_string())),
        }
    }
}

impl TryFrom<String> for SeismicZone {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<SeismicZone> for String {
    fn from(zone: SeismicZone) -> Self {
        zone.to_string()
    }
}

impl fmt::Display for SeismicZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let numeral = match self {
            SeismicZone::II => "II",
            SeismicZone::III => "III",
            SeismicZone::IV => "IV",
            SeismicZone::V => "V",
        };
        write!(f, "Zone {numeral}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_spellings() {
        assert_eq!("Zone II".parse::<SeismicZone>().unwrap(), SeismicZone::II);
        assert_eq!("zone-iii".parse::<SeismicZone>().unwrap(), SeismicZone::III);
        assert_eq!(" IV ".parse::<SeismicZone>().unwrap(), SeismicZone::IV);
        assert_eq!("5".parse::<SeismicZone>().unwrap(), SeismicZone::V);
        assert_eq!(
            "Zone VI".parse::<SeismicZone>(),
            Err(Error::InvalidZone("Zone VI".to_string()))
        );
        assert!("".parse::<SeismicZone>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for zone in SeismicZone::ALL {
            assert_eq!(zone.to_string().parse::<SeismicZone>().unwrap(), zone);
        }
        assert_eq!(SeismicZone::V.table_zone(), SeismicZone::IV);
        assert!(SeismicZone::V.is_high());
        assert!(!SeismicZone::III.is_high());
    }
}
