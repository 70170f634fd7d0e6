//! Body registries and aggregate queries
//!
//! [`BodyCatalog`] provides lookup, sorted queries, descriptive statistics and
//! normalization over any collection of bodies. [`Registry`] owns the bodies
//! of one kind; [`BodySet`] is a borrowed selection, used for moons (owned by
//! their planets) and for mixed-kind queries over a whole system.

mod stats;

pub use stats::{normalize_value, round_to};

use std::path::{Path, PathBuf};

use crate::bodies::{Attribute, BodyKind, CelestialBody};
use crate::config::ScaleConfig;
use crate::data::DataProvider;
use crate::persist;
use crate::{OrreryError, Result};

/// Queries shared by every collection of bodies
pub trait BodyCatalog {
    /// All bodies in the collection
    fn bodies(&self) -> impl Iterator<Item = &CelestialBody>;

    /// Number of bodies in the collection
    fn len(&self) -> usize {
        self.bodies().count()
    }

    /// Check if the collection is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First body with the given English name
    fn by_name(&self, english_name: &str) -> Option<&CelestialBody> {
        self.bodies().find(|b| b.english_name == english_name)
    }

    /// Every body sharing the given English name
    fn select_all(&self, english_name: &str) -> Vec<&CelestialBody> {
        self.bodies()
            .filter(|b| b.english_name == english_name)
            .collect()
    }

    /// Filter bodies based on a predicate
    fn filter<F>(&self, predicate: F) -> Vec<&CelestialBody>
    where
        F: Fn(&CelestialBody) -> bool,
    {
        self.bodies().filter(|b| predicate(b)).collect()
    }

    /// Bodies paired with their value for an attribute
    ///
    /// Bodies that do not know the attribute, or whose value is null, are
    /// left out. Fails with
    /// [`OrreryError::AttributeNotFound`] when the collection is non-empty and
    /// no body knows it.
    fn attribute_pairs(&self, attribute: &str) -> Result<Vec<(&CelestialBody, Attribute)>> {
        attribute_pairs(self.bodies(), attribute)
    }

    /// `(englishName, value)` pairs sorted ascending by value
    fn query(&self, attribute: &str) -> Option<Vec<(String, Attribute)>> {
        let mut pairs: Vec<(String, Attribute)> = warn_missing(self.attribute_pairs(attribute))?
            .into_iter()
            .map(|(body, value)| (body.english_name.clone(), value))
            .collect();
        pairs.sort_by(|a, b| a.1.total_cmp(&b.1));
        Some(pairs)
    }

    /// Sorted attribute values
    fn values(&self, attribute: &str) -> Option<Vec<Attribute>> {
        self.query(attribute)
            .map(|pairs| pairs.into_iter().map(|(_, value)| value).collect())
    }

    /// Sorted numeric attribute values; non-numeric values are skipped
    fn numeric_values(&self, attribute: &str) -> Option<Vec<f64>> {
        self.values(attribute)
            .map(|values| values.iter().filter_map(Attribute::as_f64).collect())
    }

    /// Body with the smallest value of an attribute
    fn min(&self, attribute: &str) -> Option<&CelestialBody> {
        min_by_attribute(self.bodies(), attribute)
    }

    /// Body with the largest value of an attribute
    fn max(&self, attribute: &str) -> Option<&CelestialBody> {
        max_by_attribute(self.bodies(), attribute)
    }

    /// `(min, max)` bodies for an attribute
    fn minmax(&self, attribute: &str) -> Option<(&CelestialBody, &CelestialBody)> {
        Some((self.min(attribute)?, self.max(attribute)?))
    }

    /// Arithmetic mean of a numeric attribute
    fn mean(&self, attribute: &str) -> Option<f64> {
        stats::mean(&self.numeric_values(attribute)?)
    }

    /// Population variance of a numeric attribute
    fn var(&self, attribute: &str) -> Option<f64> {
        stats::variance(&self.numeric_values(attribute)?)
    }

    /// Population standard deviation of a numeric attribute
    fn std(&self, attribute: &str) -> Option<f64> {
        self.var(attribute).map(f64::sqrt)
    }

    /// Linearly map `value` into `target_range` using this collection's min and max
    ///
    /// Errors with [`OrreryError::DegenerateNormalization`] when every value is equal.
    fn try_normalize(
        &self,
        attribute: &str,
        value: f64,
        target_range: (f64, f64),
        precision: u32,
    ) -> Result<f64> {
        let values = self
            .numeric_values(attribute)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| OrreryError::AttributeNotFound(attribute.to_string()))?;
        let (min, max) = stats::extent(&values);
        normalize_value(value, (min, max), target_range, precision).ok_or_else(|| {
            OrreryError::DegenerateNormalization {
                attribute: attribute.to_string(),
            }
        })
    }

    /// Like [`BodyCatalog::try_normalize`], but a zero value range yields the
    /// start of the target range and a missing attribute yields `None`
    fn normalize(
        &self,
        attribute: &str,
        value: f64,
        target_range: (f64, f64),
        precision: u32,
    ) -> Option<f64> {
        match self.try_normalize(attribute, value, target_range, precision) {
            Ok(v) => Some(v),
            Err(e @ OrreryError::DegenerateNormalization { .. }) => {
                log::warn!("{}, using range start {}", e, target_range.0);
                Some(target_range.0)
            }
            Err(e) => {
                log::warn!("cannot normalize: {}", e);
                None
            }
        }
    }

    /// Apply a function to every body's attribute value
    ///
    /// Returns `(englishName, value, result)` for each body that has the attribute.
    fn evaluate<R, F>(&self, attribute: &str, f: F) -> Option<Vec<(String, Attribute, R)>>
    where
        F: Fn(&Attribute) -> R,
    {
        let pairs = warn_missing(self.attribute_pairs(attribute))?;
        Some(
            pairs
                .into_iter()
                .map(|(body, value)| {
                    let result = f(&value);
                    (body.english_name.clone(), value, result)
                })
                .collect(),
        )
    }

    /// Bodies whose attribute value satisfies a predicate
    fn by_value<F>(&self, attribute: &str, predicate: F) -> Vec<&CelestialBody>
    where
        F: Fn(&Attribute) -> bool,
    {
        filter_by_value(self.bodies(), attribute, predicate)
    }
}

/// Bodies paired with their value for an attribute
///
/// Bodies that do not know the attribute, or whose value is null, are left
/// out. Fails with [`OrreryError::AttributeNotFound`] when there are bodies
/// but none of them knows the attribute.
pub fn attribute_pairs<'a, I>(
    bodies: I,
    attribute: &str,
) -> Result<Vec<(&'a CelestialBody, Attribute)>>
where
    I: IntoIterator<Item = &'a CelestialBody>,
{
    let mut seen_any = false;
    let mut known = false;
    let mut pairs = Vec::new();
    for body in bodies {
        seen_any = true;
        match body.get_attribute(attribute) {
            Some(Attribute::Null) => {
                known = true;
                log::debug!("{} has no value for `{}`", body.english_name, attribute);
            }
            Some(value) => {
                known = true;
                pairs.push((body, value));
            }
            None => log::debug!("{} has no attribute `{}`", body.english_name, attribute),
        }
    }
    if seen_any && !known {
        return Err(OrreryError::AttributeNotFound(attribute.to_string()));
    }
    Ok(pairs)
}

/// Body with the smallest value of an attribute
pub fn min_by_attribute<'a, I>(bodies: I, attribute: &str) -> Option<&'a CelestialBody>
where
    I: IntoIterator<Item = &'a CelestialBody>,
{
    warn_missing(attribute_pairs(bodies, attribute))?
        .into_iter()
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(body, _)| body)
}

/// Body with the largest value of an attribute
pub fn max_by_attribute<'a, I>(bodies: I, attribute: &str) -> Option<&'a CelestialBody>
where
    I: IntoIterator<Item = &'a CelestialBody>,
{
    warn_missing(attribute_pairs(bodies, attribute))?
        .into_iter()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(body, _)| body)
}

/// Bodies whose attribute value satisfies a predicate
pub fn filter_by_value<'a, I, F>(
    bodies: I,
    attribute: &str,
    predicate: F,
) -> Vec<&'a CelestialBody>
where
    I: IntoIterator<Item = &'a CelestialBody>,
    F: Fn(&Attribute) -> bool,
{
    warn_missing(attribute_pairs(bodies, attribute))
        .unwrap_or_default()
        .into_iter()
        .filter(|(_, value)| predicate(value))
        .map(|(body, _)| body)
        .collect()
}

/// Turn an attribute lookup failure into a warning
fn warn_missing<T>(result: Result<T>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("{}", e);
            None
        }
    }
}

/// Bodies of one kind, in construction order
#[derive(Debug, Clone)]
pub struct Registry {
    kind: BodyKind,
    bodies: Vec<CelestialBody>,
}

impl Registry {
    /// Create a new empty registry for a kind
    pub fn new(kind: BodyKind) -> Self {
        Self {
            kind,
            bodies: Vec::new(),
        }
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    /// Add a constructed body
    pub fn register(&mut self, body: CelestialBody) -> Result<&CelestialBody> {
        if body.kind() != self.kind {
            return Err(OrreryError::DataError(format!(
                "cannot register {} `{}` in a {} registry",
                body.kind(),
                body.english_name,
                self.kind
            )));
        }
        self.bodies.push(body);
        Ok(&self.bodies[self.bodies.len() - 1])
    }

    /// Construct a body of this registry's kind and register it
    ///
    /// Returns `None` (after logging a warning) when the data is unusable.
    pub fn construct(
        &mut self,
        identifier: &str,
        provider: &dyn DataProvider,
    ) -> Option<&CelestialBody> {
        let body = CelestialBody::construct(self.kind, identifier, provider)?;
        self.bodies.push(body);
        self.bodies.last()
    }

    /// Forget every registered body
    pub fn clear(&mut self) {
        self.bodies.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CelestialBody> {
        self.bodies.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, CelestialBody> {
        self.bodies.iter_mut()
    }

    /// Get a reference to all bodies
    pub fn as_slice(&self) -> &[CelestialBody] {
        &self.bodies
    }

    /// Mutable access to the first body with an English name
    pub fn by_name_mut(&mut self, english_name: &str) -> Option<&mut CelestialBody> {
        self.bodies
            .iter_mut()
            .find(|b| b.english_name == english_name)
    }

    /// Scale every registered body
    pub fn scale_all(&mut self, config: &ScaleConfig, cascade_to_children: bool) {
        for body in &mut self.bodies {
            body.scale_body(config, cascade_to_children);
        }
    }

    /// Save every body to `dir`, one file each
    pub fn save_all<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<PathBuf>> {
        self.bodies
            .iter()
            .map(|body| persist::save(body, dir.as_ref()))
            .collect()
    }

    /// Load every saved body of this kind from `dir` and append it
    ///
    /// Returns the number of bodies loaded.
    pub fn load<P: AsRef<Path>>(&mut self, dir: P) -> Result<usize> {
        let paths = persist::list_saved(dir, self.kind)?;
        let count = paths.len();
        for path in paths {
            let body = persist::load(&path)?;
            self.register(body)?;
        }
        Ok(count)
    }
}

impl BodyCatalog for Registry {
    fn bodies(&self) -> impl Iterator<Item = &CelestialBody> {
        self.bodies.iter()
    }

    fn len(&self) -> usize {
        self.bodies.len()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a CelestialBody;
    type IntoIter = std::slice::Iter<'a, CelestialBody>;

    fn into_iter(self) -> Self::IntoIter {
        self.bodies.iter()
    }
}

/// A borrowed selection of bodies
#[derive(Debug, Clone, Default)]
pub struct BodySet<'a> {
    bodies: Vec<&'a CelestialBody>,
}

impl<'a> BodySet<'a> {
    pub fn new(bodies: Vec<&'a CelestialBody>) -> Self {
        Self { bodies }
    }
}

impl<'a> FromIterator<&'a CelestialBody> for BodySet<'a> {
    fn from_iter<I: IntoIterator<Item = &'a CelestialBody>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl BodyCatalog for BodySet<'_> {
    fn bodies(&self) -> impl Iterator<Item = &CelestialBody> {
        self.bodies.iter().copied()
    }

    fn len(&self) -> usize {
        self.bodies.len()
    }
}
