//! Offline data providers

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::DataProvider;
use crate::bodies::RawBodyRecord;
use crate::names::{identifier_from_rel, resolve_identifier};
use crate::{OrreryError, Result};

/// Records held in memory, keyed by identifier
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    records: HashMap<String, RawBodyRecord>,
}

impl MemoryProvider {
    /// Create a new empty provider
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
        }
    }

    /// Create a provider from records, keyed by each record's `id`
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = RawBodyRecord>,
    {
        let mut provider = Self::new();
        for record in records {
            provider.insert(record);
        }
        provider
    }

    /// Add a record under its own `id`
    pub fn insert(&mut self, record: RawBodyRecord) {
        self.records.insert(record.id.clone(), record);
    }

    /// Add a record under an explicit identifier
    pub fn insert_as(&mut self, identifier: &str, record: RawBodyRecord) {
        self.records.insert(identifier.to_string(), record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl DataProvider for MemoryProvider {
    fn get_body(&self, identifier: &str) -> Result<RawBodyRecord> {
        let id = resolve_identifier(identifier_from_rel(identifier));
        self.records
            .get(&id)
            .cloned()
            .ok_or_else(|| OrreryError::MissingData(format!("no record for `{}`", identifier)))
    }
}

/// Records stored as `<dir>/<id>.json`
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    dir: PathBuf,
}

impl DirectoryProvider {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the file holding a record
    pub fn record_path(&self, identifier: &str) -> PathBuf {
        let id = resolve_identifier(identifier_from_rel(identifier));
        self.dir.join(format!("{}.json", id))
    }
}

impl DataProvider for DirectoryProvider {
    fn get_body(&self, identifier: &str) -> Result<RawBodyRecord> {
        let path = self.record_path(identifier);
        let text = fs::read_to_string(&path).map_err(|e| {
            OrreryError::MissingData(format!("cannot read {}: {}", path.display(), e))
        })?;
        RawBodyRecord::from_json_str(&text).map_err(|e| {
            OrreryError::MissingData(format!("malformed record {}: {}", path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: &str) -> RawBodyRecord {
        RawBodyRecord::from_value(json!({ "id": id, "englishName": id })).unwrap()
    }

    #[test]
    fn test_memory_provider_lookup() {
        let provider = MemoryProvider::from_records([record("terre"), record("lune")]);
        assert_eq!(provider.len(), 2);
        assert_eq!(provider.get_body("terre").unwrap().id, "terre");
        // English names and relational URLs resolve to identifiers
        assert_eq!(provider.get_body("Earth").unwrap().id, "terre");
        assert_eq!(
            provider
                .get_body("https://api.le-systeme-solaire.net/rest/bodies/lune")
                .unwrap()
                .id,
            "lune"
        );
        assert!(matches!(
            provider.get_body("vulcan"),
            Err(OrreryError::MissingData(_))
        ));
    }

    #[test]
    fn test_directory_provider() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("mars.json"), r#"{"id": "mars", "englishName": "Mars"}"#)
            .unwrap();
        fs::write(dir.path().join("phobos.json"), "{ this is not json").unwrap();

        let provider = DirectoryProvider::new(dir.path());
        assert_eq!(provider.get_body("Mars").unwrap().english_name, "Mars");
        assert!(matches!(
            provider.get_body("phobos"),
            Err(OrreryError::MissingData(_))
        ));
        assert!(provider.get_body("deimos").is_err());
    }
}
