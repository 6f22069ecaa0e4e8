use serde::{Deserialize, Serialize};
use std::fmt;

use crate::units::VolumeUnit;

/// One line of a mix: what goes in, how much, and how strong it is.
///
/// `volume` is expressed in whatever unit the owning ledger currently uses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngredientEntry {
    pub name: String,
    pub volume: f64,
    pub abv: f64,
}

impl IngredientEntry {
    pub fn new(name: impl Into<String>, volume: f64, abv: f64) -> Self {
        Self {
            name: name.into(),
            volume,
            abv,
        }
    }

    /// A blank entry holding the default pour for `unit`.
    pub fn blank(unit: VolumeUnit) -> Self {
        Self::new("", unit.default_pour(), 0.0)
    }

    /// Pure alcohol in this entry, in the same unit as `volume`.
    pub fn alcohol(&self) -> f64 {
        self.volume * self.abv / 100.0
    }
}

impl fmt::Display for IngredientEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.name.is_empty() {
            "(unnamed)"
        } else {
            self.name.as_str()
        };
        write!(f, "{} @ {}%: {}", name, self.abv, self.volume)
    }
}
