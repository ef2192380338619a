// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Drawing length units
//!
//! CAD floor plans are usually drawn in millimetres while the model sink
//! expects metres. Every measurement that feeds a sizing rule goes through
//! [`LengthUnit::to_meters`] so tolerances stay meaningful in any unit system.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length unit of the source drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    Millimeter,
    Centimeter,
    Meter,
    Inch,
    Foot,
}

impl LengthUnit {
    /// Multiplier converting one drawing unit to metres
    #[inline]
    pub fn to_meters(self) -> f64 {
        match self {
            LengthUnit::Millimeter => 1e-3,
            LengthUnit::Centimeter => 1e-2,
            LengthUnit::Meter => 1.0,
            LengthUnit::Inch => 0.0254,
            LengthUnit::Foot => 0.3048,
        }
    }

    /// Convert a length in metres back to drawing units
    #[inline]
    pub fn from_meters(self, meters: f64) -> f64 {
        meters / self.to_meters()
    }

    /// Convert an area in square metres to square drawing units
    #[inline]
    pub fn area_from_square_meters(self, square_meters: f64) -> f64 {
        let s = self.to_meters();
        square_meters / (s * s)
    }
}

impl FromStr for LengthUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mm" | "millimeter" | "millimeters" | "millimetre" | "millimetres" => {
                Ok(LengthUnit::Millimeter)
            }
            "cm" | "centimeter" | "centimeters" | "centimetre" | "centimetres" => {
                Ok(LengthUnit::Centimeter)
            }
            "m" | "meter" | "meters" | "metre" | "metres" => Ok(LengthUnit::Meter),
            "in" | "inch" | "inches" => Ok(LengthUnit::Inch),
            "ft" | "foot" | "feet" => Ok(LengthUnit::Foot),
            other => Err(Error::UnknownUnit(other.to_string())),
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LengthUnit::Millimeter => "mm",
            LengthUnit::Centimeter => "cm",
            LengthUnit::Meter => "m",
            LengthUnit::Inch => "in",
            LengthUnit::Foot => "ft",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_units() {
        assert_eq!("mm".parse::<LengthUnit>().unwrap(), LengthUnit::Millimeter);
        assert_eq!(" Metres ".parse::<LengthUnit>().unwrap(), LengthUnit::Meter);
        assert_eq!("FT".parse::<LengthUnit>().unwrap(), LengthUnit::Foot);
        assert!(matches!(
            "furlong".parse::<LengthUnit>(),
            Err(Error::UnknownUnit(_))
        ));
    }

    #[test]
    fn test_min_area_in_drawing_units() {
        // 0.01 m² is 10 000 mm²
        assert_relative_eq!(
            LengthUnit::Millimeter.area_from_square_meters(0.01),
            10_000.0,
            epsilon = 1e-6
        );
        assert_relative_eq!(LengthUnit::Meter.area_from_square_meters(0.01), 0.01);
        assert_relative_eq!(LengthUnit::Millimeter.from_meters(0.1), 100.0, epsilon = 1e-9);
    }
}
