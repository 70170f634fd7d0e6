//! Scale configuration
//!
//! Scale exponents are kept per body kind. A partial [`ScaleOverrides`] loaded
//! from JSON is deep-merged over the defaults: only the leaf keys that are
//! present replace the default values.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::bodies::BodyKind;
use crate::constants::{
    DEFAULT_MOON_SCALE_DIST, DEFAULT_PLANET_SCALE_DIST, DEFAULT_SCALE_MASS, DEFAULT_SCALE_SIZE,
    DEFAULT_SCALE_VOL, DEFAULT_SUN_SCALE_DIST, LEGACY_MAX_SAFE_VALUE,
};
use crate::units::OverflowBoundary;
use crate::Result;

/// Scale exponents applied to one kind of body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KindScale {
    /// Mass exponent, `massRawKG = massValue * 10^scale_mass`
    pub scale_mass: f64,
    /// Volume exponent, `volumeRawKG = volValue * 10^scale_vol`
    pub scale_vol: f64,
    /// Distance exponent, `axis / 10^scale_dist`
    pub scale_dist: f64,
    /// Size exponent, `radius / 10^scale_size`
    pub scale_size: f64,
    /// Log before/after values at info level
    pub debug: bool,
}

impl KindScale {
    fn with_dist(scale_dist: f64) -> Self {
        Self {
            scale_mass: DEFAULT_SCALE_MASS,
            scale_vol: DEFAULT_SCALE_VOL,
            scale_dist,
            scale_size: DEFAULT_SCALE_SIZE,
            debug: false,
        }
    }

    /// Replace the leaves present in `overrides`
    pub fn merge(&mut self, overrides: &KindOverrides) {
        if let Some(v) = overrides.scale_mass {
            self.scale_mass = v;
        }
        if let Some(v) = overrides.scale_vol {
            self.scale_vol = v;
        }
        if let Some(v) = overrides.scale_dist {
            self.scale_dist = v;
        }
        if let Some(v) = overrides.scale_size {
            self.scale_size = v;
        }
        if let Some(v) = overrides.debug {
            self.debug = v;
        }
    }
}

/// Full scale configuration for a system
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleConfig {
    pub sun: KindScale,
    pub planet: KindScale,
    pub moon: KindScale,
    /// Boundary scaled masses and volumes are clamped under
    pub max_safe_value: f64,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            sun: KindScale::with_dist(DEFAULT_SUN_SCALE_DIST),
            planet: KindScale::with_dist(DEFAULT_PLANET_SCALE_DIST),
            moon: KindScale::with_dist(DEFAULT_MOON_SCALE_DIST),
            max_safe_value: LEGACY_MAX_SAFE_VALUE,
        }
    }
}

impl ScaleConfig {
    /// Defaults with `overrides` merged on top
    pub fn with_overrides(overrides: &ScaleOverrides) -> Self {
        let mut config = Self::default();
        config.merge(overrides);
        config
    }

    /// Deep-merge overrides into this configuration
    pub fn merge(&mut self, overrides: &ScaleOverrides) {
        if let Some(sun) = &overrides.sun {
            self.sun.merge(sun);
        }
        if let Some(planet) = &overrides.planet {
            self.planet.merge(planet);
        }
        if let Some(moon) = &overrides.moon {
            self.moon.merge(moon);
        }
        if let Some(max) = overrides.max_safe_value {
            self.max_safe_value = max;
        }
    }

    /// Sub-configuration for a body kind
    pub fn for_kind(&self, kind: BodyKind) -> &KindScale {
        match kind {
            BodyKind::Star => &self.sun,
            BodyKind::Planet => &self.planet,
            BodyKind::Moon => &self.moon,
        }
    }

    /// Overflow boundary for scaled masses and volumes
    pub fn boundary(&self) -> OverflowBoundary {
        OverflowBoundary::new(self.max_safe_value)
    }
}

/// Partial per-kind overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KindOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_mass: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_vol: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_dist: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
}

/// Partial configuration as supplied by a user
///
/// ```json
/// { "planet": { "scale_size": 1.5 }, "moon": { "debug": true } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScaleOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sun: Option<KindOverrides>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planet: Option<KindOverrides>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moon: Option<KindOverrides>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_safe_value: Option<f64>,
}

impl ScaleOverrides {
    /// Parse overrides from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load overrides from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Overrides touching a single kind
    pub fn for_kind(kind: BodyKind, overrides: KindOverrides) -> Self {
        let mut result = Self::default();
        match kind {
            BodyKind::Star => result.sun = Some(overrides),
            BodyKind::Planet => result.planet = Some(overrides),
            BodyKind::Moon => result.moon = Some(overrides),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScaleConfig::default();
        assert_eq!(config.planet.scale_dist, 3.2);
        assert_eq!(config.moon.scale_dist, 4.2);
        assert_eq!(config.sun.scale_mass, 8.5);
        assert_eq!(config.planet.scale_size, 0.5);
        assert!(!config.moon.debug);
        assert_eq!(config.max_safe_value, LEGACY_MAX_SAFE_VALUE);
    }

    #[test]
    fn test_merge_replaces_only_present_leaves() {
        let overrides = ScaleOverrides::from_json_str(
            r#"{ "planet": { "scale_size": 1.5 }, "moon": { "debug": true, "scale_mass": 9.0 } }"#,
        )
        .unwrap();
        let config = ScaleConfig::with_overrides(&overrides);

        assert_eq!(config.planet.scale_size, 1.5);
        assert_eq!(config.planet.scale_dist, 3.2);
        assert_eq!(config.planet.scale_mass, 8.5);
        assert!(config.moon.debug);
        assert_eq!(config.moon.scale_mass, 9.0);
        assert_eq!(config.moon.scale_dist, 4.2);
        assert_eq!(config.sun, ScaleConfig::default().sun);
    }

    #[test]
    fn test_for_kind() {
        let overrides = ScaleOverrides::for_kind(
            BodyKind::Moon,
            KindOverrides {
                scale_dist: Some(2.0),
                ..Default::default()
            },
        );
        let config = ScaleConfig::with_overrides(&overrides);
        assert_eq!(config.for_kind(BodyKind::Moon).scale_dist, 2.0);
        assert_eq!(config.for_kind(BodyKind::Planet).scale_dist, 3.2);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scale.json");
        fs::write(&path, r#"{ "max_safe_value": 1000.0 }"#).unwrap();

        let overrides = ScaleOverrides::from_file(&path).unwrap();
        let config = ScaleConfig::with_overrides(&overrides);
        assert_eq!(config.boundary().max_safe_value(), 1000.0);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(ScaleOverrides::from_json_str("{ not json").is_err());
    }
}
