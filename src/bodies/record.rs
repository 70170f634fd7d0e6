//! Raw body records as delivered by the bodies API
//!
//! The schema names every field the model reads. Anything else the upstream
//! source adds is kept verbatim in [`RawBodyRecord::extra`] so it can still be
//! exported to the scene layer.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::names::identifier_from_rel;
use crate::Result;

/// Treat an explicit JSON `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Mass as an exponent-mantissa pair, `mass_value * 10^mass_exponent` kg
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MassRecord {
    pub mass_value: f64,
    pub mass_exponent: f64,
}

/// Volume as an exponent-mantissa pair, `vol_value * 10^vol_exponent` km^3
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolRecord {
    pub vol_value: f64,
    pub vol_exponent: f64,
}

/// Reference from a planet record to one of its moons
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoonRef {
    /// Display name of the moon
    #[serde(default, deserialize_with = "null_as_default")]
    pub moon: String,
    /// Relational URL (or bare identifier) of the moon record
    #[serde(default, deserialize_with = "null_as_default")]
    pub rel: String,
}

impl MoonRef {
    /// Identifier to request from a data provider, if the reference carries one
    pub fn identifier(&self) -> Option<&str> {
        let id = identifier_from_rel(self.rel.trim());
        if id.is_empty() {
            None
        } else {
            Some(id)
        }
    }
}

/// A body record exactly as received
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBodyRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub english_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_planet: bool,
    #[serde(default)]
    pub moons: Option<Vec<Option<MoonRef>>>,
    #[serde(default)]
    pub semimajor_axis: Option<f64>,
    #[serde(default)]
    pub perihelion: Option<f64>,
    #[serde(default)]
    pub aphelion: Option<f64>,
    #[serde(default)]
    pub eccentricity: Option<f64>,
    #[serde(default)]
    pub inclination: Option<f64>,
    #[serde(default)]
    pub mass: Option<MassRecord>,
    #[serde(default)]
    pub vol: Option<VolRecord>,
    #[serde(default)]
    pub density: Option<f64>,
    #[serde(default)]
    pub gravity: Option<f64>,
    #[serde(default)]
    pub escape: Option<f64>,
    #[serde(default)]
    pub mean_radius: Option<f64>,
    #[serde(default)]
    pub equa_radius: Option<f64>,
    #[serde(default)]
    pub polar_radius: Option<f64>,
    #[serde(default)]
    pub flattening: Option<f64>,
    #[serde(default)]
    pub sideral_orbit: Option<f64>,
    #[serde(default)]
    pub sideral_rotation: Option<f64>,
    #[serde(default)]
    pub axial_tilt: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub discovered_by: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub discovery_date: String,
    /// Upstream fields outside the schema, copied through unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Field names of the raw schema, in upstream spelling
pub const RAW_KEYS: [&str; 25] = [
    "id",
    "name",
    "englishName",
    "isPlanet",
    "moons",
    "semimajorAxis",
    "perihelion",
    "aphelion",
    "eccentricity",
    "inclination",
    "mass",
    "vol",
    "density",
    "gravity",
    "escape",
    "meanRadius",
    "equaRadius",
    "polarRadius",
    "flattening",
    "sideralOrbit",
    "sideralRotation",
    "axialTilt",
    "discoveredBy",
    "discoveryDate",
    // the bodies API reports the parent body for moons
    "aroundPlanet",
];

impl RawBodyRecord {
    /// Parse a record from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert an already-parsed JSON value
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Every attribute name this record carries: the schema plus copied-through extras
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = RAW_KEYS
            .iter()
            .filter(|k| **k != "aroundPlanet" || self.extra.contains_key(**k))
            .map(|k| k.to_string())
            .collect();
        for key in self.extra.keys() {
            if !keys.iter().any(|k| k == key) {
                keys.push(key.clone());
            }
        }
        keys
    }

    /// Moon references, skipping null entries
    pub fn moon_refs(&self) -> impl Iterator<Item = &MoonRef> {
        self.moons.iter().flatten().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_record() {
        let record = RawBodyRecord::from_value(json!({
            "id": "terre",
            "name": "La Terre",
            "englishName": "Earth",
            "isPlanet": true,
            "moons": [{ "moon": "La Lune", "rel": "https://api.le-systeme-solaire.net/rest/bodies/lune" }],
            "semimajorAxis": 149598023,
            "eccentricity": 0.0167,
            "mass": { "massValue": 5.97237, "massExponent": 24 },
            "vol": { "volValue": 1.08321, "volExponent": 12 },
            "meanRadius": 6371.0084,
            "equaRadius": 6378.1366,
            "sideralOrbit": 365.256,
            "discoveredBy": "",
            "bodyType": "Planet"
        }))
        .unwrap();

        assert_eq!(record.id, "terre");
        assert!(record.is_planet);
        assert_eq!(record.semimajor_axis, Some(149_598_023.0));
        assert_eq!(record.mass.unwrap().mass_exponent, 24.0);
        assert_eq!(record.moon_refs().count(), 1);
        assert_eq!(record.extra.get("bodyType"), Some(&json!("Planet")));
        assert!(record.keys().contains(&"bodyType".to_string()));
    }

    #[test]
    fn test_null_fields_tolerated() {
        let record = RawBodyRecord::from_json_str(
            r#"{"id": "s2004s3", "englishName": null, "moons": null, "mass": null, "vol": null, "isPlanet": null}"#,
        )
        .unwrap();

        assert_eq!(record.english_name, "");
        assert!(record.moons.is_none());
        assert!(record.mass.is_none());
        assert!(!record.is_planet);
    }

    #[test]
    fn test_moon_refs_skip_nulls() {
        let record = RawBodyRecord::from_value(json!({
            "id": "mars",
            "moons": [null, { "rel": "phobos" }, { "moon": "Deimos", "rel": "deimos" }]
        }))
        .unwrap();

        let ids: Vec<_> = record.moon_refs().filter_map(|m| m.identifier()).collect();
        assert_eq!(ids, vec!["phobos", "deimos"]);
    }

    #[test]
    fn test_moon_ref_without_rel() {
        let moon = MoonRef {
            moon: "Nameless".to_string(),
            rel: String::new(),
        };
        assert_eq!(moon.identifier(), None);
    }
}
