//! Orrery: solar system body model and visualization scaling engine
//!
//! This crate builds an in-memory model of the Sun, its planets and their
//! natural satellites from raw body records, derives the orbital quantities
//! the records leave out, and rescales astronomical magnitudes into ranges a
//! bounded 3D scene can hold.

use std::path::Path;
use thiserror::Error;

pub mod bodies;
pub mod config;
pub mod constants;
pub mod data;
pub mod names;
pub mod orbital;
pub mod persist;
pub mod registry;
pub mod system;
pub mod units;

// Re-export commonly used types
pub use bodies::{Attribute, BodyKind, CelestialBody};
pub use config::{KindScale, ScaleConfig, ScaleOverrides};
pub use data::DataProvider;
pub use registry::{BodyCatalog, BodySet, Registry};
pub use system::{ObjectKind, SolarSystem, Vals};

/// Main error type for the orrery library
#[derive(Debug, Error)]
pub enum OrreryError {
    #[error("Missing data: {0}")]
    MissingData(String),

    #[error("Incomplete record for {id}: {reason}")]
    IncompleteRecord { id: String, reason: String },

    #[error("Attribute not found: {0}")]
    AttributeNotFound(String),

    #[error("Degenerate normalization: attribute `{attribute}` has a zero value range")]
    DegenerateNormalization { attribute: String },

    #[error("Canonical planet could not be constructed: {0}")]
    MissingPlanet(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type for orrery operations
pub type Result<T> = std::result::Result<T, OrreryError>;

/// Entry point for assembling a solar system from a data source
pub struct Loader {
    data_dir: Option<std::path::PathBuf>,
}

impl Loader {
    /// Create a new loader that reads from the live API
    pub fn new() -> Self {
        Self { data_dir: None }
    }

    /// Read body records from a directory of `<id>.json` files instead of the API
    pub fn with_data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Build the data provider this loader is configured for
    pub fn provider(&self) -> Result<Box<dyn DataProvider>> {
        match &self.data_dir {
            Some(dir) => Ok(Box::new(data::DirectoryProvider::new(dir))),
            None => Ok(Box::new(data::HttpProvider::new()?)),
        }
    }

    /// Assemble the solar system, merging `overrides` over the default scale configuration
    pub fn load_system(&self, name: &str, overrides: Option<&ScaleOverrides>) -> Result<SolarSystem> {
        let provider = self.provider()?;
        let mut config = ScaleConfig::default();
        if let Some(overrides) = overrides {
            config.merge(overrides);
        }
        SolarSystem::assemble(name, provider.as_ref(), config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_with_data_dir_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        let loader = Loader::new().with_data_dir(dir.path());

        // An empty directory has no sun and no planets, so assembly must fail on Mercury
        let result = loader.load_system("Empty", None);
        match result {
            Err(OrreryError::MissingPlanet(name)) => assert_eq!(name, "mercure"),
            other => panic!("Expected MissingPlanet, got {:?}", other.map(|s| s.name)),
        }
    }

    #[test]
    fn test_error_display() {
        let err = OrreryError::IncompleteRecord {
            id: "lune".to_string(),
            reason: "mass is null".to_string(),
        };
        assert_eq!(err.to_string(), "Incomplete record for lune: mass is null");
    }
}
