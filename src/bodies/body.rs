//! The celestial body type and its scaling operations

use log::Level;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::record::RawBodyRecord;
use super::{Attribute, BodyKind};
use crate::config::ScaleConfig;
use crate::data::DataProvider;
use crate::orbital::{
    derive_semiminor_axis, distance_from_primary_au, harmonic_frequency, is_bound_eccentricity,
};
use crate::units::{rescale_exponent, scale_down, scale_mantissa};
use crate::{OrreryError, Result};

/// Attribute names derived at construction, common to every kind
const DERIVED_KEYS: [&str; 11] = [
    "semiminorAxis",
    "volValue",
    "volExponent",
    "massValue",
    "massExponent",
    "volumeRawKG",
    "massRawKG",
    "scaleMassExp",
    "scaleSizeExp",
    "scaleDistExp",
    "scaleVolExp",
];

/// Attribute names derived only for the Sun and planets
const HELIOCENTRIC_KEYS: [&str; 2] = ["distanceFromSunInAU", "harmonicFrequency"];

/// Last exponents applied by a scaling operation
///
/// These record state, they are not a multiplier history: every scaling call
/// starts again from the unscaled values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScaleState {
    pub mass_exp: f64,
    pub size_exp: f64,
    pub dist_exp: f64,
    pub vol_exp: f64,
}

/// Distance from the Sun and the derived harmonic frequency
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Heliocentric {
    pub distance_from_sun_in_au: f64,
    pub harmonic_frequency: f64,
}

impl Heliocentric {
    fn from_axis(semimajor_axis_km: f64, sideral_orbit_days: f64) -> Self {
        let distance = distance_from_primary_au(semimajor_axis_km);
        // the Sun has no orbital period
        let harmonic = if sideral_orbit_days > 0.0 {
            harmonic_frequency(distance, sideral_orbit_days)
        } else {
            0.0
        };
        Self {
            distance_from_sun_in_au: distance,
            harmonic_frequency: harmonic,
        }
    }
}

/// Scale exponents suggested to bring a body's magnitudes to a digit budget
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SuggestedExponents {
    pub dist: f64,
    pub size: f64,
    pub mass: f64,
}

/// Unscaled values every scaling operation starts from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct Baseline {
    semimajor_axis: f64,
    semiminor_axis: f64,
    mean_radius: f64,
    equa_radius: f64,
    mass_exponent: f64,
    vol_exponent: f64,
    mass_raw_kg: f64,
    volume_raw_kg: f64,
}

/// A star, planet or moon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialBody {
    kind: BodyKind,
    record: RawBodyRecord,
    baseline: Baseline,

    pub id: String,
    pub name: String,
    /// Canonical display name, never empty after construction
    pub english_name: String,

    semimajor_axis: f64,
    semiminor_axis: f64,
    mean_radius: f64,
    equa_radius: f64,
    mass_value: f64,
    mass_exponent: f64,
    vol_value: f64,
    vol_exponent: f64,
    mass_raw_kg: f64,
    volume_raw_kg: f64,
    heliocentric: Option<Heliocentric>,
    scale: ScaleState,

    moon_data: Vec<CelestialBody>,
    keys: Vec<String>,
}

impl CelestialBody {
    /// Build a body from a raw record, without resolving any moons
    ///
    /// Fails with [`OrreryError::IncompleteRecord`] when the record has no mass
    /// or volume, or when its eccentricity does not describe a closed orbit.
    pub fn from_record(kind: BodyKind, record: RawBodyRecord) -> Result<Self> {
        let incomplete = |reason: &str| OrreryError::IncompleteRecord {
            id: record.id.clone(),
            reason: reason.to_string(),
        };

        let mass = record.mass.ok_or_else(|| incomplete("mass is null"))?;
        let vol = record.vol.ok_or_else(|| incomplete("vol is null"))?;

        let eccentricity = record.eccentricity.unwrap_or(0.0);
        if !is_bound_eccentricity(eccentricity) {
            return Err(incomplete(&format!(
                "eccentricity {} is outside [0, 1)",
                eccentricity
            )));
        }

        let semimajor_axis = record.semimajor_axis.unwrap_or(0.0);
        let semiminor_axis = derive_semiminor_axis(semimajor_axis, eccentricity).round();
        if !semiminor_axis.is_finite() {
            return Err(incomplete("semiminor axis could not be derived"));
        }

        let mean_radius = record.mean_radius.unwrap_or(0.0);
        // some irregular bodies report no equatorial radius
        let equa_radius = match record.equa_radius {
            Some(r) if r != 0.0 => r,
            _ => mean_radius,
        };

        let english_name = if record.english_name.is_empty() {
            record.name.clone()
        } else {
            record.english_name.clone()
        };

        let mass_raw_kg = scale_mantissa(mass.mass_value, mass.mass_exponent);
        let volume_raw_kg = scale_mantissa(vol.vol_value, vol.vol_exponent);

        let heliocentric = kind
            .is_heliocentric()
            .then(|| Heliocentric::from_axis(semimajor_axis, record.sideral_orbit.unwrap_or(0.0)));

        let mut keys = record.keys();
        keys.extend(DERIVED_KEYS.iter().map(|k| k.to_string()));
        if kind.is_heliocentric() {
            keys.extend(HELIOCENTRIC_KEYS.iter().map(|k| k.to_string()));
        }

        let baseline = Baseline {
            semimajor_axis,
            semiminor_axis,
            mean_radius,
            equa_radius,
            mass_exponent: mass.mass_exponent,
            vol_exponent: vol.vol_exponent,
            mass_raw_kg,
            volume_raw_kg,
        };

        for key in &keys {
            log::trace!("adding attribute ({}) to {}", key, english_name);
        }

        Ok(Self {
            kind,
            id: record.id.clone(),
            name: record.name.clone(),
            english_name,
            semimajor_axis,
            semiminor_axis,
            mean_radius,
            equa_radius,
            mass_value: mass.mass_value,
            mass_exponent: mass.mass_exponent,
            vol_value: vol.vol_value,
            vol_exponent: vol.vol_exponent,
            mass_raw_kg,
            volume_raw_kg,
            heliocentric,
            scale: ScaleState::default(),
            moon_data: Vec::new(),
            keys,
            baseline,
            record,
        })
    }

    /// Fetch, build and (for the Sun and planets) attach moons
    pub fn try_construct(
        kind: BodyKind,
        identifier: &str,
        provider: &dyn DataProvider,
    ) -> Result<Self> {
        let record = provider.get_body(identifier)?;
        let mut body = Self::from_record(kind, record)?;
        if kind.has_satellites() {
            body.attach_moons(provider);
        }
        Ok(body)
    }

    /// Soft-failing factory: logs a warning and returns `None` for unusable data
    pub fn construct(
        kind: BodyKind,
        identifier: &str,
        provider: &dyn DataProvider,
    ) -> Option<Self> {
        match Self::try_construct(kind, identifier, provider) {
            Ok(body) => Some(body),
            Err(e) => {
                log::warn!(
                    "the {} `{}` was not available, it will be skipped: {}",
                    kind,
                    identifier,
                    e
                );
                None
            }
        }
    }

    /// Resolve every moon reference in the record; bad moons are skipped
    fn attach_moons(&mut self, provider: &dyn DataProvider) {
        let refs: Vec<String> = self
            .record
            .moon_refs()
            .filter_map(|m| m.identifier().map(str::to_string))
            .collect();

        for moon_id in refs {
            log::debug!("adding moon {} to {}", moon_id, self.english_name);
            let Some(moon) = Self::construct(BodyKind::Moon, &moon_id, provider) else {
                continue;
            };
            if let Err(e) = moon.check_required() {
                log::warn!(
                    "the moon `{}` has required values missing, it will be skipped: {}",
                    moon_id,
                    e
                );
                continue;
            }
            self.moon_data.push(moon);
        }
    }

    /// Verify the fields a moon needs to be placed in a scene
    pub fn check_required(&self) -> Result<()> {
        let missing = |field: &str| {
            Err(OrreryError::IncompleteRecord {
                id: self.id.clone(),
                reason: format!("{} is missing", field),
            })
        };
        if self.id.is_empty() {
            return missing("id");
        }
        if self.record.semimajor_axis.is_none() {
            return missing("semimajorAxis");
        }
        if !self.semiminor_axis.is_finite() {
            return missing("semiminorAxis");
        }
        if self.record.mean_radius.is_none() {
            return missing("meanRadius");
        }
        // checked after the mean-radius fallback has been applied
        if self.equa_radius.is_nan() || self.equa_radius <= 0.0 {
            return missing("equaRadius");
        }
        Ok(())
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    /// The record this body was built from
    pub fn record(&self) -> &RawBodyRecord {
        &self.record
    }

    pub fn semimajor_axis(&self) -> f64 {
        self.semimajor_axis
    }

    pub fn semiminor_axis(&self) -> f64 {
        self.semiminor_axis
    }

    pub fn mean_radius(&self) -> f64 {
        self.mean_radius
    }

    pub fn equa_radius(&self) -> f64 {
        self.equa_radius
    }

    pub fn mass_value(&self) -> f64 {
        self.mass_value
    }

    pub fn mass_exponent(&self) -> f64 {
        self.mass_exponent
    }

    pub fn vol_value(&self) -> f64 {
        self.vol_value
    }

    pub fn vol_exponent(&self) -> f64 {
        self.vol_exponent
    }

    pub fn mass_raw_kg(&self) -> f64 {
        self.mass_raw_kg
    }

    pub fn volume_raw_kg(&self) -> f64 {
        self.volume_raw_kg
    }

    /// AU distance and harmonic frequency, for the Sun and planets only
    pub fn heliocentric(&self) -> Option<Heliocentric> {
        self.heliocentric
    }

    pub fn scale_state(&self) -> ScaleState {
        self.scale
    }

    /// Moons owned by this body, in record order
    pub fn moon_data(&self) -> &[CelestialBody] {
        &self.moon_data
    }

    pub fn moon_data_mut(&mut self) -> &mut [CelestialBody] {
        &mut self.moon_data
    }

    /// Attribute names eligible for export to the scene layer
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Alias of [`CelestialBody::keys`]
    pub fn attributes(&self) -> Vec<String> {
        self.keys.clone()
    }

    /// Look up an attribute by its upstream name
    ///
    /// Scaled fields report their current value. Returns `None` only for names
    /// the body does not know; known-but-empty fields yield [`Attribute::Null`].
    pub fn get_attribute(&self, name: &str) -> Option<Attribute> {
        let r = &self.record;
        let helio = self.heliocentric;
        let value = match name {
            "id" => Attribute::Text(self.id.clone()),
            "name" => Attribute::Text(self.name.clone()),
            "englishName" => Attribute::Text(self.english_name.clone()),
            "isPlanet" => Attribute::Flag(r.is_planet),
            "moons" => serde_json::to_value(&r.moons).map_or(Attribute::Null, Attribute::from),
            "mass" => serde_json::to_value(r.mass).map_or(Attribute::Null, Attribute::from),
            "vol" => serde_json::to_value(r.vol).map_or(Attribute::Null, Attribute::from),
            "semimajorAxis" => self.semimajor_axis.into(),
            "semiminorAxis" => self.semiminor_axis.into(),
            "meanRadius" => self.mean_radius.into(),
            "equaRadius" => self.equa_radius.into(),
            "perihelion" => r.perihelion.into(),
            "aphelion" => r.aphelion.into(),
            "eccentricity" => r.eccentricity.into(),
            "inclination" => r.inclination.into(),
            "density" => r.density.into(),
            "gravity" => r.gravity.into(),
            "escape" | "escapeVelocity" => r.escape.into(),
            "polarRadius" => r.polar_radius.into(),
            "flattening" => r.flattening.into(),
            "sideralOrbit" => r.sideral_orbit.into(),
            "sideralRotation" => r.sideral_rotation.into(),
            "axialTilt" => r.axial_tilt.into(),
            "discoveredBy" => r.discovered_by.as_str().into(),
            "discoveryDate" => r.discovery_date.as_str().into(),
            "volValue" => self.vol_value.into(),
            "volExponent" => self.vol_exponent.into(),
            "massValue" => self.mass_value.into(),
            "massExponent" => self.mass_exponent.into(),
            "volumeRawKG" => self.volume_raw_kg.into(),
            "massRawKG" => self.mass_raw_kg.into(),
            "scaleMassExp" => self.scale.mass_exp.into(),
            "scaleSizeExp" => self.scale.size_exp.into(),
            "scaleDistExp" => self.scale.dist_exp.into(),
            "scaleVolExp" => self.scale.vol_exp.into(),
            "distanceFromSunInAU" => helio?.distance_from_sun_in_au.into(),
            "harmonicFrequency" => helio?.harmonic_frequency.into(),
            other => return r.extra.get(other).cloned().map(Attribute::from),
        };
        Some(value)
    }

    /// Numeric attribute value, `None` when unknown or not a number
    pub fn numeric(&self, name: &str) -> Option<f64> {
        self.get_attribute(name).and_then(|a| a.as_f64())
    }

    /// Every exported attribute with its current value, in key order
    pub fn inspect(&self) -> Map<String, Value> {
        self.keys
            .iter()
            .filter_map(|k| self.get_attribute(k).map(|a| (k.clone(), a.to_value())))
            .collect()
    }

    /// Pretty JSON of every exported attribute
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&Value::Object(self.inspect()))?)
    }

    fn log_level(debug: bool) -> Level {
        if debug {
            Level::Info
        } else {
            Level::Debug
        }
    }

    /// Rescale the orbit axes: `axis / 10^scale_dist`, always from the unscaled axes
    pub fn scale_distance(&mut self, config: &ScaleConfig) -> &mut Self {
        let scale = config.for_kind(self.kind);
        let level = Self::log_level(scale.debug);
        log::log!(
            level,
            "{}: unscaled values semimajorAxis ({}) semiminorAxis ({})",
            self.english_name,
            self.baseline.semimajor_axis,
            self.baseline.semiminor_axis
        );

        self.scale.dist_exp = scale.scale_dist;
        self.semimajor_axis = scale_down(self.baseline.semimajor_axis, scale.scale_dist);
        self.semiminor_axis = scale_down(self.baseline.semiminor_axis, scale.scale_dist);
        if self.kind.is_heliocentric() {
            let period = self.record.sideral_orbit.unwrap_or(0.0);
            self.heliocentric = Some(Heliocentric::from_axis(self.semimajor_axis, period));
        }

        log::log!(
            level,
            "{}: scaled values semimajorAxis ({}) semiminorAxis ({})",
            self.english_name,
            self.semimajor_axis,
            self.semiminor_axis
        );
        self
    }

    /// Rescale mass: `massRawKG = massValue * 10^scale_mass`, clamped under the boundary
    pub fn scale_mass(&mut self, config: &ScaleConfig) -> &mut Self {
        let scale = config.for_kind(self.kind);
        let level = Self::log_level(scale.debug);
        log::log!(
            level,
            "{}: unscaled values massExponent ({}) massRawKG ({})",
            self.english_name,
            self.baseline.mass_exponent,
            self.baseline.mass_raw_kg
        );

        self.scale.mass_exp = scale.scale_mass;
        self.mass_exponent = rescale_exponent(self.baseline.mass_exponent, scale.scale_mass);
        let mass = scale_mantissa(self.mass_value, scale.scale_mass);
        self.mass_raw_kg = config.boundary().clamp("massRawKG", mass);

        log::log!(
            level,
            "{}: scaled values massExponent ({}) massRawKG ({})",
            self.english_name,
            self.mass_exponent,
            self.mass_raw_kg
        );
        self
    }

    /// Rescale volume: `volumeRawKG = volValue * 10^scale_vol`, clamped under the boundary
    pub fn scale_vol(&mut self, config: &ScaleConfig) -> &mut Self {
        let scale = config.for_kind(self.kind);
        let level = Self::log_level(scale.debug);
        log::log!(
            level,
            "{}: unscaled values volExponent ({}) volumeRawKG ({})",
            self.english_name,
            self.baseline.vol_exponent,
            self.baseline.volume_raw_kg
        );

        self.scale.vol_exp = scale.scale_vol;
        self.vol_exponent = rescale_exponent(self.baseline.vol_exponent, scale.scale_vol);
        let volume = scale_mantissa(self.vol_value, scale.scale_vol);
        self.volume_raw_kg = config.boundary().clamp("volumeRawKG", volume);

        log::log!(
            level,
            "{}: scaled values volExponent ({}) volumeRawKG ({})",
            self.english_name,
            self.vol_exponent,
            self.volume_raw_kg
        );
        self
    }

    /// Rescale radii: `radius / 10^scale_size`, always from the unscaled radii
    pub fn scale_size(&mut self, config: &ScaleConfig) -> &mut Self {
        let scale = config.for_kind(self.kind);
        let level = Self::log_level(scale.debug);
        log::log!(
            level,
            "{}: unscaled values meanRadius ({}) equaRadius ({})",
            self.english_name,
            self.baseline.mean_radius,
            self.baseline.equa_radius
        );

        self.scale.size_exp = scale.scale_size;
        self.mean_radius = scale_down(self.baseline.mean_radius, scale.scale_size);
        self.equa_radius = scale_down(self.baseline.equa_radius, scale.scale_size);

        log::log!(
            level,
            "{}: scaled values meanRadius ({}) equaRadius ({})",
            self.english_name,
            self.mean_radius,
            self.equa_radius
        );
        self
    }

    /// Apply all four scalings; optionally cascade to owned moons with the moon sub-configuration
    pub fn scale_body(&mut self, config: &ScaleConfig, cascade_to_children: bool) -> &mut Self {
        self.scale_distance(config)
            .scale_mass(config)
            .scale_vol(config)
            .scale_size(config);

        if cascade_to_children && self.kind.has_satellites() {
            for moon in &mut self.moon_data {
                moon.scale_body(config, false);
            }
        }
        self
    }

    /// Suggest exponents that leave `digits` digits in the integer part of
    /// the current semimajor axis, equatorial radius and raw mass
    pub fn suggest_scale_exponents(&self, digits: u32) -> SuggestedExponents {
        let digits = digits as f64;
        SuggestedExponents {
            dist: digit_count(self.semimajor_axis) as f64 - digits,
            size: digit_count(self.equa_radius) as f64 - digits,
            mass: digit_count(self.mass_raw_kg) as f64 - digits,
        }
    }
}

/// Number of digits in the integer part of a value
fn digit_count(value: f64) -> usize {
    format!("{:.0}", value.abs().trunc()).len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MemoryProvider;
    use approx::assert_relative_eq;
    use serde_json::json;

    fn earth_record() -> RawBodyRecord {
        RawBodyRecord::from_value(json!({
            "id": "terre",
            "name": "La Terre",
            "englishName": "Earth",
            "isPlanet": true,
            "semimajorAxis": 149600000,
            "eccentricity": 0.0167,
            "mass": { "massValue": 5.976, "massExponent": 24 },
            "vol": { "volValue": 1.08321, "volExponent": 12 },
            "meanRadius": 6371,
            "equaRadius": 6378,
            "sideralOrbit": 365.25,
            "moons": [{ "rel": "lune" }]
        }))
        .unwrap()
    }

    fn moon_record(id: &str) -> RawBodyRecord {
        RawBodyRecord::from_value(json!({
            "id": id,
            "name": id,
            "englishName": "",
            "semimajorAxis": 384400,
            "eccentricity": 0.0549,
            "mass": { "massValue": 7.346, "massExponent": 22 },
            "vol": { "volValue": 2.1968, "volExponent": 10 },
            "meanRadius": 1737,
            "equaRadius": 0
        }))
        .unwrap()
    }

    #[test]
    fn test_from_record_derives_values() {
        let earth = CelestialBody::from_record(BodyKind::Planet, earth_record()).unwrap();

        assert_eq!(earth.english_name, "Earth");
        assert_eq!(earth.semiminor_axis(), 149_579_138.0);
        assert_relative_eq!(earth.mass_raw_kg(), 5.976e24, max_relative = 1e-12);
        assert_relative_eq!(earth.volume_raw_kg(), 1.08321e12, max_relative = 1e-12);
        assert_eq!(earth.scale_state(), ScaleState::default());

        let helio = earth.heliocentric().unwrap();
        assert_relative_eq!(helio.distance_from_sun_in_au, 149_600_000.0 * 6.685e-9);
        assert!(helio.harmonic_frequency > 0.0);
    }

    #[test]
    fn test_fallbacks() {
        let moon = CelestialBody::from_record(BodyKind::Moon, moon_record("lune")).unwrap();
        assert_eq!(moon.equa_radius(), moon.mean_radius());
        assert_eq!(moon.english_name, "lune");
        assert!(moon.heliocentric().is_none());
        assert!(moon.get_attribute("harmonicFrequency").is_none());
    }

    #[test]
    fn test_moon_without_equatorial_radius_is_attached() {
        let mut moon = moon_record("lune");
        moon.equa_radius = None;
        let provider = MemoryProvider::from_records([earth_record(), moon]);

        let earth = CelestialBody::try_construct(BodyKind::Planet, "terre", &provider).unwrap();
        assert_eq!(earth.moon_data().len(), 1);
        assert_eq!(earth.moon_data()[0].equa_radius(), 1737.0);
    }

    #[test]
    fn test_moon_without_any_radius_is_skipped() {
        let mut moon = moon_record("lune");
        moon.equa_radius = None;
        moon.mean_radius = Some(0.0);
        let provider = MemoryProvider::from_records([earth_record(), moon]);

        let earth = CelestialBody::try_construct(BodyKind::Planet, "terre", &provider).unwrap();
        assert!(earth.moon_data().is_empty());
    }

    #[test]
    fn test_null_mass_is_incomplete() {
        let mut record = moon_record("s2004");
        record.mass = None;
        let err = CelestialBody::from_record(BodyKind::Moon, record).unwrap_err();
        assert!(matches!(err, OrreryError::IncompleteRecord { .. }));
    }

    #[test]
    fn test_unbound_eccentricity_is_incomplete() {
        let mut record = moon_record("oumuamua");
        record.eccentricity = Some(1.2);
        assert!(CelestialBody::from_record(BodyKind::Moon, record).is_err());
    }

    #[test]
    fn test_keys_cover_raw_and_derived() {
        let earth = CelestialBody::from_record(BodyKind::Planet, earth_record()).unwrap();
        for key in ["semimajorAxis", "massRawKG", "scaleVolExp", "harmonicFrequency"] {
            assert!(earth.keys().iter().any(|k| k == key), "missing key {}", key);
        }
        for key in earth.keys() {
            assert!(earth.get_attribute(key).is_some(), "key {} not readable", key);
        }
        assert!(earth.get_attribute("notAField").is_none());
    }

    #[test]
    fn test_scale_distance_is_idempotent() {
        let mut earth = CelestialBody::from_record(BodyKind::Planet, earth_record()).unwrap();
        let config = ScaleConfig::default();

        earth.scale_distance(&config);
        let once = earth.semimajor_axis();
        earth.scale_distance(&config);

        assert_eq!(earth.semimajor_axis(), once);
        assert_relative_eq!(once, 149_600_000.0 / 10f64.powf(3.2), max_relative = 1e-12);
        assert_eq!(earth.scale_state().dist_exp, 3.2);
    }

    #[test]
    fn test_scale_mass_replaces_exponent() {
        let mut earth = CelestialBody::from_record(BodyKind::Planet, earth_record()).unwrap();
        let config = ScaleConfig::default();

        earth.scale_mass(&config).scale_mass(&config);
        assert_relative_eq!(earth.mass_raw_kg(), 5.976 * 10f64.powf(8.5), max_relative = 1e-12);
        assert_relative_eq!(earth.mass_exponent(), 15.5);
        assert!(earth.mass_raw_kg() < config.max_safe_value);
    }

    #[test]
    fn test_scale_mass_clamps_overflow() {
        let mut earth = CelestialBody::from_record(BodyKind::Planet, earth_record()).unwrap();
        let mut config = ScaleConfig::default();
        config.planet.scale_mass = 12.0;

        earth.scale_mass(&config);
        assert_eq!(earth.mass_raw_kg(), config.max_safe_value - 100.0);
    }

    #[test]
    fn test_scale_body_cascades_to_moons() {
        let provider = MemoryProvider::from_records([earth_record(), moon_record("lune")]);
        let mut earth = CelestialBody::try_construct(BodyKind::Planet, "terre", &provider).unwrap();
        let config = ScaleConfig::default();

        earth.scale_body(&config, true);

        let moon = &earth.moon_data()[0];
        assert_eq!(moon.scale_state().dist_exp, 4.2);
        assert_relative_eq!(moon.semimajor_axis(), 384_400.0 / 10f64.powf(4.2), max_relative = 1e-12);
        assert_relative_eq!(earth.equa_radius(), 6378.0 / 10f64.powf(0.5), max_relative = 1e-12);

        // scaling without cascade leaves moons alone
        let mut fresh = CelestialBody::try_construct(BodyKind::Planet, "terre", &provider).unwrap();
        fresh.scale_body(&config, false);
        assert_eq!(fresh.moon_data()[0].scale_state(), ScaleState::default());
    }

    #[test]
    fn test_suggest_scale_exponents() {
        let earth = CelestialBody::from_record(BodyKind::Planet, earth_record()).unwrap();
        let suggested = earth.suggest_scale_exponents(5);
        assert_eq!(suggested.dist, 4.0);
        assert_eq!(suggested.size, -1.0);
        assert_eq!(suggested.mass, 20.0);
    }

    #[test]
    fn test_inspect_and_json() {
        let earth = CelestialBody::from_record(BodyKind::Planet, earth_record()).unwrap();
        let map = earth.inspect();
        assert_eq!(map.get("englishName"), Some(&json!("Earth")));
        assert_eq!(map.len(), earth.keys().len());
        assert!(earth.to_json_string().unwrap().contains("\"massRawKG\""));
    }
}
