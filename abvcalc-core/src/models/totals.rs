use serde::{Deserialize, Serialize};
use std::fmt;

use super::IngredientEntry;
use crate::units::{round_to, VolumeUnit};

/// Aggregate figures for a list of ingredients.
///
/// `total_volume` and `total_alcohol` share the unit of the entries;
/// `total_abv` is a percentage rounded to two decimals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Totals {
    pub total_volume: f64,
    pub total_alcohol: f64,
    pub total_abv: f64,
}

impl Totals {
    /// Sums `entries`. An empty or zero-volume list yields all zeros.
    pub fn from_entries(entries: &[IngredientEntry]) -> Self {
        let total_volume: f64 = entries.iter().map(|e| e.volume).sum();
        let total_alcohol: f64 = entries.iter().map(IngredientEntry::alcohol).sum();
        let total_abv = if total_volume > 0.0 {
            round_to(total_alcohol / total_volume * 100.0, 2)
        } else {
            0.0
        };

        Self {
            total_volume,
            total_alcohol,
            total_abv,
        }
    }

    /// Renders the three totals, one per line, labelled with `unit`.
    pub fn display_in(&self, unit: VolumeUnit) -> DisplayTotals<'_> {
        DisplayTotals { totals: self, unit }
    }
}

pub struct DisplayTotals<'a> {
    totals: &'a Totals,
    unit: VolumeUnit,
}

impl fmt::Display for DisplayTotals<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Total Volume: {:.2} {}",
            self.totals.total_volume, self.unit
        )?;
        writeln!(
            f,
            "Total Alcohol: {:.2} {}",
            self.totals.total_alcohol, self.unit
        )?;
        write!(f, "Total ABV: {:.2} %", self.totals.total_abv)
    }
}
