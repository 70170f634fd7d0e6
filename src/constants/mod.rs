//! Constants module for body modelling and scaling

// Distances
/// Kilometers to astronomical units (linear conversion used for visualization pacing)
pub const KM_TO_AU: f64 = 6.685e-9;

// Numeric boundaries
/// Largest value of an unsigned 32-bit attribute in the downstream renderer
pub const U32_MAX_F64: f64 = u32::MAX as f64;
/// Headroom kept below the renderer's 32-bit attribute limit
pub const LEGACY_HEADROOM: f64 = 100_000.0;
/// Legacy overflow boundary: `2^32 - 1 - 100000`
pub const LEGACY_MAX_SAFE_VALUE: f64 = U32_MAX_F64 - LEGACY_HEADROOM;
/// Margin subtracted when a value is clamped under the boundary
pub const OVERFLOW_MARGIN: f64 = 100.0;

// Default scale exponents
/// Default mass exponent for every body kind
pub const DEFAULT_SCALE_MASS: f64 = 8.5;
/// Default volume exponent for every body kind
pub const DEFAULT_SCALE_VOL: f64 = 8.5;
/// Default planet distance exponent
pub const DEFAULT_PLANET_SCALE_DIST: f64 = 3.2;
/// Default moon distance exponent
pub const DEFAULT_MOON_SCALE_DIST: f64 = 4.2;
/// Default sun distance exponent (the sun sits at the origin, so this is inert)
pub const DEFAULT_SUN_SCALE_DIST: f64 = 4.2;
/// Default size exponent for every body kind
pub const DEFAULT_SCALE_SIZE: f64 = 0.5;

// Data source
/// Base URL of the public solar system bodies API
pub const API_BASE: &str = "https://api.le-systeme-solaire.net/rest/bodies/";
/// User agent sent to the bodies API
pub const USER_AGENT: &str = "SolarSystemModeler ()";
