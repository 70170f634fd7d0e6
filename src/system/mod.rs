//! Solar system assembly
//!
//! A [`SolarSystem`] owns one Star registry and one Planet registry. Moons are
//! owned by their planets; moon and whole-system queries go through borrowed
//! [`BodySet`] views, so they always see the current (possibly scaled) values.

use std::fmt;
use std::str::FromStr;

use crate::bodies::{Attribute, BodyKind, CelestialBody};
use crate::config::{ScaleConfig, ScaleOverrides};
use crate::data::DataProvider;
use crate::names::{CANONICAL_PLANETS, SUN_ID};
use crate::registry::{
    filter_by_value, max_by_attribute, min_by_attribute, BodyCatalog, BodySet, Registry,
};
use crate::{OrreryError, Result};

/// Object-kind selector for system-wide queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Planets,
    Moons,
    Suns,
    /// Suns, planets and moons together
    Objects,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Planets => "planets",
            ObjectKind::Moons => "moons",
            ObjectKind::Suns => "suns",
            ObjectKind::Objects => "objects",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectKind {
    type Err = OrreryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "planets" | "planet" => Ok(ObjectKind::Planets),
            "moons" | "moon" => Ok(ObjectKind::Moons),
            "suns" | "sun" | "stars" | "star" => Ok(ObjectKind::Suns),
            "objects" | "all" => Ok(ObjectKind::Objects),
            other => Err(OrreryError::DataError(format!(
                "Unknown object kind: {} (expected planets, moons, suns or objects)",
                other
            ))),
        }
    }
}

/// Result of [`SolarSystem::vals`]
#[derive(Debug, Clone, PartialEq)]
pub enum Vals {
    /// `(englishName, value)` pairs sorted by value
    Labeled(Vec<(String, Attribute)>),
    /// Sorted values only
    Plain(Vec<Attribute>),
}

impl Vals {
    pub fn len(&self) -> usize {
        match self {
            Vals::Labeled(v) => v.len(),
            Vals::Plain(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One star, the eight canonical planets and their moons
#[derive(Debug, Clone)]
pub struct SolarSystem {
    pub name: String,
    config: ScaleConfig,
    suns: Registry,
    planets: Registry,
}

impl SolarSystem {
    /// Build the full object graph from a data provider
    ///
    /// A missing Sun is logged and tolerated. Every canonical planet is
    /// mandatory: the first one that cannot be constructed aborts assembly
    /// with [`OrreryError::MissingPlanet`]. Bodies are left unscaled; call
    /// [`SolarSystem::scale_system`] to apply `config`.
    pub fn assemble(name: &str, provider: &dyn DataProvider, config: ScaleConfig) -> Result<Self> {
        log::info!("assembling system {}", name);

        let mut suns = Registry::new(BodyKind::Star);
        if suns.construct(SUN_ID, provider).is_none() {
            log::warn!("system {} has no sun", name);
        }

        let mut planets = Registry::new(BodyKind::Planet);
        for (id, english) in CANONICAL_PLANETS.iter() {
            if planets.construct(id, provider).is_none() {
                log::error!("planet {} could not be constructed, aborting {}", english, name);
                return Err(OrreryError::MissingPlanet(id.to_string()));
            }
        }

        let system = Self {
            name: name.to_string(),
            config,
            suns,
            planets,
        };
        log::info!(
            "assembled system {}: {} sun(s), {} planets, {} moons",
            system.name,
            system.suns.len(),
            system.planets.len(),
            system.moons().len()
        );
        Ok(system)
    }

    /// Configuration used by [`SolarSystem::scale_system`]
    pub fn config(&self) -> &ScaleConfig {
        &self.config
    }

    /// The system's star, if it could be constructed
    pub fn sun(&self) -> Option<&CelestialBody> {
        self.suns.iter().next()
    }

    pub fn suns(&self) -> &Registry {
        &self.suns
    }

    pub fn planets(&self) -> &Registry {
        &self.planets
    }

    pub fn planets_mut(&mut self) -> &mut Registry {
        &mut self.planets
    }

    /// Every planet's moons, flattened in planet order
    pub fn moons(&self) -> BodySet<'_> {
        self.iter_moons().collect()
    }

    /// Suns, then planets, then moons
    pub fn objects(&self) -> BodySet<'_> {
        self.iter(ObjectKind::Objects).collect()
    }

    /// Borrowed view of one kind of object
    pub fn select(&self, kind: ObjectKind) -> BodySet<'_> {
        self.iter(kind).collect()
    }

    /// Iterate over one kind of object
    pub fn iter(&self, kind: ObjectKind) -> Box<dyn Iterator<Item = &CelestialBody> + '_> {
        match kind {
            ObjectKind::Suns => Box::new(self.suns.iter()),
            ObjectKind::Planets => Box::new(self.planets.iter()),
            ObjectKind::Moons => Box::new(self.iter_moons()),
            ObjectKind::Objects => Box::new(
                self.suns
                    .iter()
                    .chain(self.planets.iter())
                    .chain(self.iter_moons()),
            ),
        }
    }

    fn iter_moons(&self) -> impl Iterator<Item = &CelestialBody> + '_ {
        self.suns
            .iter()
            .chain(self.planets.iter())
            .flat_map(|body| body.moon_data().iter())
    }

    /// First object of any kind with an English name
    pub fn by_name(&self, english_name: &str) -> Option<&CelestialBody> {
        self.iter(ObjectKind::Objects)
            .find(|b| b.english_name == english_name)
    }

    /// Merge `overrides` into the system configuration, then scale the star
    /// and every planet, cascading to their moons
    pub fn scale_system(&mut self, overrides: Option<&ScaleOverrides>) {
        if let Some(overrides) = overrides {
            self.config.merge(overrides);
        }
        let config = self.config;
        log::info!("scaling system {}", self.name);
        self.suns.scale_all(&config, true);
        self.planets.scale_all(&config, true);
    }

    /// Sorted attribute values of one kind, with or without names
    pub fn vals(&self, kind: ObjectKind, attribute: &str, labeled: bool) -> Option<Vals> {
        let pairs = self.select(kind).query(attribute)?;
        Some(if labeled {
            Vals::Labeled(pairs)
        } else {
            Vals::Plain(pairs.into_iter().map(|(_, value)| value).collect())
        })
    }

    /// Objects of one kind whose attribute satisfies a predicate
    pub fn by_value<F>(&self, kind: ObjectKind, attribute: &str, predicate: F) -> Vec<&CelestialBody>
    where
        F: Fn(&Attribute) -> bool,
    {
        filter_by_value(self.iter(kind), attribute, predicate)
    }

    pub fn min(&self, kind: ObjectKind, attribute: &str) -> Option<&CelestialBody> {
        min_by_attribute(self.iter(kind), attribute)
    }

    pub fn max(&self, kind: ObjectKind, attribute: &str) -> Option<&CelestialBody> {
        max_by_attribute(self.iter(kind), attribute)
    }

    pub fn minmax(
        &self,
        kind: ObjectKind,
        attribute: &str,
    ) -> Option<(&CelestialBody, &CelestialBody)> {
        Some((self.min(kind, attribute)?, self.max(kind, attribute)?))
    }
}
