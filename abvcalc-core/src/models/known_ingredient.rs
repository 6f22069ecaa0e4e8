//! Ingredients with a known strength, used to fill in ABV by name.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::coerce::{clamp_abv, parse_optional};

/// A named ingredient and its ABV.
///
/// `abv` is `None` while the row is still blank. On disk a blank ABV is the
/// empty string, and a set one is a number; strings holding numbers are
/// accepted when reading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct KnownIngredient {
    pub name: String,
    #[serde(
        default,
        serialize_with = "serialize_abv",
        deserialize_with = "deserialize_abv"
    )]
    pub abv: Option<f64>,
}

impl KnownIngredient {
    pub fn new(name: impl Into<String>, abv: f64) -> Self {
        Self {
            name: name.into(),
            abv: Some(clamp_abv(abv)),
        }
    }

    /// Case-insensitive exact name match. Blank names never match.
    pub fn matches(&self, name: &str) -> bool {
        !name.is_empty() && self.name.to_lowercase() == name.to_lowercase()
    }
}

impl fmt::Display for KnownIngredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.abv {
            Some(abv) => write!(f, "{}: {}%", self.name, abv),
            None => write!(f, "{}: -", self.name),
        }
    }
}

fn serialize_abv<S: Serializer>(abv: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match abv {
        Some(v) => serializer.serialize_f64(*v),
        None => serializer.serialize_str(""),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredAbv {
    Number(f64),
    Text(String),
    Missing(()),
}

fn deserialize_abv<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match StoredAbv::deserialize(deserializer)? {
        StoredAbv::Number(v) => Some(clamp_abv(v)),
        StoredAbv::Text(s) => parse_optional(&s).map(clamp_abv),
        StoredAbv::Missing(()) => None,
    })
}
