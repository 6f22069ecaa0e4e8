use std::fmt;
use std::str::FromStr;

use crate::error::CalcError;

/// Editable fields of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Name,
    Volume,
    Abv,
}

/// Editable fields of a known ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownField {
    Name,
    Abv,
}

impl FromStr for EntryField {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(EntryField::Name),
            "volume" | "vol" => Ok(EntryField::Volume),
            "abv" => Ok(EntryField::Abv),
            other => Err(CalcError::UnknownField(other.to_string())),
        }
    }
}

impl FromStr for KnownField {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(KnownField::Name),
            "abv" => Ok(KnownField::Abv),
            other => Err(CalcError::UnknownField(other.to_string())),
        }
    }
}

impl fmt::Display for EntryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryField::Name => write!(f, "name"),
            EntryField::Volume => write!(f, "volume"),
            EntryField::Abv => write!(f, "abv"),
        }
    }
}

impl fmt::Display for KnownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnownField::Name => write!(f, "name"),
            KnownField::Abv => write!(f, "abv"),
        }
    }
}
