//! Canonical body identifiers and English names
//!
//! The bodies API keys records by French slugs (`terre`, `soleil`, ...). This
//! module maps them to the English display names used for lookups.

use lazy_static::lazy_static;
use std::collections::HashMap;

/// Identifier of the Sun in the bodies API
pub const SUN_ID: &str = "soleil";

/// The eight canonical planets in orbital order, as (id, English name)
pub const CANONICAL_PLANETS: [(&str, &str); 8] = [
    ("mercure", "Mercury"),
    ("venus", "Venus"),
    ("terre", "Earth"),
    ("mars", "Mars"),
    ("jupiter", "Jupiter"),
    ("saturne", "Saturn"),
    ("uranus", "Uranus"),
    ("neptune", "Neptune"),
];

lazy_static! {
    /// Map from identifier to English name
    static ref ENGLISH_NAMES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert(SUN_ID, "Sun");
        for &(id, name) in CANONICAL_PLANETS.iter() {
            m.insert(id, name);
        }
        m
    };

    /// Map from lowercase English name to identifier
    static ref SLUGS: HashMap<String, &'static str> = {
        let mut m = HashMap::new();
        m.insert("sun".to_string(), SUN_ID);
        for &(id, name) in CANONICAL_PLANETS.iter() {
            m.insert(name.to_lowercase(), id);
        }
        m
    };
}

/// Get the English name of a canonical body given its identifier
pub fn english_name(id: &str) -> Option<&'static str> {
    ENGLISH_NAMES.get(id.to_lowercase().as_str()).copied()
}

/// Get the identifier of a canonical body given its English name
pub fn slug_for(name: &str) -> Option<&'static str> {
    SLUGS.get(&name.to_lowercase()).copied()
}

/// Resolve a name or identifier to the identifier the API expects
///
/// Unknown names pass through unchanged so moons and minor bodies can be
/// requested by their own slugs.
pub fn resolve_identifier(name_or_id: &str) -> String {
    slug_for(name_or_id)
        .map(str::to_string)
        .unwrap_or_else(|| name_or_id.to_string())
}

/// Extract a body identifier from a relational URL
///
/// Moon references carry URLs such as
/// `https://api.le-systeme-solaire.net/rest/bodies/lune`; the identifier is the
/// last non-empty path segment. A bare identifier is returned as-is.
pub fn identifier_from_rel(rel: &str) -> &str {
    rel.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(rel)
}
