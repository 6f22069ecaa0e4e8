//! Volume units and the conversion between them.
//!
//! Conversions round on every call: whole millilitres, hundredths of an
//! ounce. Converting back and forth is therefore lossy, e.g. 1.52 oz becomes
//! 46 ml and then 1.53 oz.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CalcError;

/// Millilitres per (rounded) fluid ounce.
pub const ML_PER_OZ: f64 = 30.0;

/// Unit every volume in a ledger is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeUnit {
    #[default]
    Ml,
    Oz,
}

impl VolumeUnit {
    /// Volume a freshly added ingredient starts with.
    pub fn default_pour(&self) -> f64 {
        match self {
            VolumeUnit::Ml => 45.0,
            VolumeUnit::Oz => 1.5,
        }
    }

    /// The other unit.
    pub fn toggled(&self) -> Self {
        match self {
            VolumeUnit::Ml => VolumeUnit::Oz,
            VolumeUnit::Oz => VolumeUnit::Ml,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VolumeUnit::Ml => "ml",
            VolumeUnit::Oz => "oz",
        }
    }
}

impl fmt::Display for VolumeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VolumeUnit {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ml" => Ok(VolumeUnit::Ml),
            "oz" => Ok(VolumeUnit::Oz),
            other => Err(CalcError::UnknownUnit(other.to_string())),
        }
    }
}

/// Converts `value` from one unit to another.
///
/// oz -> ml multiplies by 30 and rounds to a whole millilitre.
/// ml -> oz divides by 30 and rounds to two decimals.
pub fn convert(value: f64, from: VolumeUnit, to: VolumeUnit) -> f64 {
    match (from, to) {
        (VolumeUnit::Oz, VolumeUnit::Ml) => (value * ML_PER_OZ).round(),
        (VolumeUnit::Ml, VolumeUnit::Oz) => round_to(value / ML_PER_OZ, 2),
        _ => value,
    }
}

/// Rounds to `decimals` places, halves away from zero.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
