//! Celestial body model
//!
//! Stars, planets and moons share one data shape, [`CelestialBody`], tagged
//! with a [`BodyKind`]. Attribute values are exposed by their upstream names
//! through [`Attribute`] so query and export code can work on any field.

mod body;
pub mod record;

pub use body::{CelestialBody, Heliocentric, ScaleState, SuggestedExponents};
pub use record::{MassRecord, MoonRef, RawBodyRecord, VolRecord};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::OrreryError;

/// The kind of a modelled body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    Star,
    Planet,
    Moon,
}

impl BodyKind {
    /// Key of this kind in a scale configuration
    pub fn config_key(&self) -> &'static str {
        match self {
            BodyKind::Star => "sun",
            BodyKind::Planet => "planet",
            BodyKind::Moon => "moon",
        }
    }

    /// Whether bodies of this kind orbit the Sun directly (or are the Sun)
    pub fn is_heliocentric(&self) -> bool {
        matches!(self, BodyKind::Star | BodyKind::Planet)
    }

    /// Whether bodies of this kind own moons
    pub fn has_satellites(&self) -> bool {
        self.is_heliocentric()
    }

    /// Single-byte tag used by the persistence format
    pub fn tag(&self) -> u8 {
        match self {
            BodyKind::Star => 0,
            BodyKind::Planet => 1,
            BodyKind::Moon => 2,
        }
    }

    /// Inverse of [`BodyKind::tag`]
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(BodyKind::Star),
            1 => Some(BodyKind::Planet),
            2 => Some(BodyKind::Moon),
            _ => None,
        }
    }
}

impl fmt::Display for BodyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_key())
    }
}

impl FromStr for BodyKind {
    type Err = OrreryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sun" | "star" => Ok(BodyKind::Star),
            "planet" => Ok(BodyKind::Planet),
            "moon" => Ok(BodyKind::Moon),
            other => Err(OrreryError::DataError(format!("Unknown body kind: {}", other))),
        }
    }
}

/// A single attribute value of a body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Attribute {
    Number(f64),
    Text(String),
    Flag(bool),
    /// Structured upstream values (mass/volume pairs, moon lists, unknown objects)
    Json(Value),
    Null,
}

impl Attribute {
    /// Numeric value, if this attribute is a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Attribute::Number(v) => Some(*v),
            Attribute::Json(v) => v.as_f64(),
            _ => None,
        }
    }

    /// Text value, if this attribute is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Attribute::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Attribute::Null)
    }

    /// Total ordering used for sorting query results
    ///
    /// Numbers compare numerically, text lexicographically, flags false < true.
    /// Values of different variants order by variant: null, flag, number, text, json.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Attribute::Number(a), Attribute::Number(b)) => a.total_cmp(b),
            (Attribute::Text(a), Attribute::Text(b)) => a.cmp(b),
            (Attribute::Flag(a), Attribute::Flag(b)) => a.cmp(b),
            (Attribute::Json(a), Attribute::Json(b)) => a.to_string().cmp(&b.to_string()),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Attribute::Null => 0,
            Attribute::Flag(_) => 1,
            Attribute::Number(_) => 2,
            Attribute::Text(_) => 3,
            Attribute::Json(_) => 4,
        }
    }

    /// Convert to a JSON value for export
    pub fn to_value(&self) -> Value {
        match self {
            Attribute::Number(v) => serde_json::Number::from_f64(*v)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Attribute::Text(s) => Value::String(s.clone()),
            Attribute::Flag(b) => Value::Bool(*b),
            Attribute::Json(v) => v.clone(),
            Attribute::Null => Value::Null,
        }
    }
}

impl From<Value> for Attribute {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Attribute::Null,
            Value::Bool(b) => Attribute::Flag(b),
            Value::Number(n) => n.as_f64().map(Attribute::Number).unwrap_or(Attribute::Null),
            Value::String(s) => Attribute::Text(s),
            other => Attribute::Json(other),
        }
    }
}

impl From<f64> for Attribute {
    fn from(value: f64) -> Self {
        Attribute::Number(value)
    }
}

impl From<Option<f64>> for Attribute {
    fn from(value: Option<f64>) -> Self {
        value.map(Attribute::Number).unwrap_or(Attribute::Null)
    }
}

impl From<&str> for Attribute {
    fn from(value: &str) -> Self {
        Attribute::Text(value.to_string())
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Number(v) => write!(f, "{}", v),
            Attribute::Text(s) => f.write_str(s),
            Attribute::Flag(b) => write!(f, "{}", b),
            Attribute::Json(v) => write!(f, "{}", v),
            Attribute::Null => f.write_str("null"),
        }
    }
}
