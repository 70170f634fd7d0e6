//! Downloader module for retrieving body records from the bodies API
//!
//! Records are fetched with a blocking HTTP client and cached as JSON files so
//! repeated system assembly does not hit the network again.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use super::DataProvider;
use crate::bodies::RawBodyRecord;
use crate::constants::{API_BASE, USER_AGENT};
use crate::names::{identifier_from_rel, resolve_identifier};
use crate::{OrreryError, Result};

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default number of attempts per record
const DEFAULT_ATTEMPTS: u32 = 3;

/// Get the cache directory path
pub fn get_cache_dir() -> PathBuf {
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".cache").join("orrery")
}

/// Check if a file exists and is not empty
fn file_exists_and_not_empty<P: AsRef<Path>>(path: P) -> bool {
    match fs::metadata(path) {
        Ok(metadata) => metadata.is_file() && metadata.len() > 0,
        Err(_) => false,
    }
}

/// Client for the public bodies API
pub struct HttpProvider {
    client: reqwest::blocking::Client,
    base_url: String,
    cache_dir: Option<PathBuf>,
    attempts: u32,
}

impl HttpProvider {
    /// Create a provider against the default API with a 30 second timeout and caching enabled
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a provider with a custom request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| OrreryError::DataError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: API_BASE.to_string(),
            cache_dir: Some(get_cache_dir()),
            attempts: DEFAULT_ATTEMPTS,
        })
    }

    /// Point the provider at another API root
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        self.base_url = base;
        self
    }

    /// Use a custom cache directory, or disable caching with `None`
    pub fn with_cache_dir(mut self, cache_dir: Option<PathBuf>) -> Self {
        self.cache_dir = cache_dir;
        self
    }

    /// Number of attempts before a record is reported missing
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    /// URL of the record for an identifier
    pub fn record_url(&self, identifier: &str) -> String {
        format!("{}{}", self.base_url, identifier)
    }

    fn cache_path(&self, identifier: &str) -> Option<PathBuf> {
        self.cache_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.json", identifier)))
    }

    /// Download the raw JSON text of a record
    fn download(&self, url: &str) -> Result<String> {
        let mut last_error = None;
        for attempt in 1..=self.attempts {
            match self.try_download(url) {
                Ok(text) => return Ok(text),
                Err(e) => {
                    log::warn!("attempt {}/{} for {} failed: {}", attempt, self.attempts, url, e);
                    last_error = Some(e);
                    if attempt < self.attempts {
                        thread::sleep(Duration::from_millis(250 * attempt as u64));
                    }
                }
            }
        }
        Err(last_error.unwrap_or_else(|| OrreryError::MissingData(url.to_string())))
    }

    fn try_download(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| OrreryError::MissingData(format!("Failed to download record: {}", e)))?;

        // Check if the request was successful
        if !response.status().is_success() {
            return Err(OrreryError::MissingData(format!(
                "Failed to download record, status: {}",
                response.status()
            )));
        }

        response
            .text()
            .map_err(|e| OrreryError::MissingData(format!("Failed to read response: {}", e)))
    }

    /// Write a record to the cache, creating the directory if needed
    fn store(&self, path: &Path, text: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        // Write a temporary file first to avoid partial cache entries
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, text)?;
        fs::rename(temp_path, path)?;
        Ok(())
    }
}

impl DataProvider for HttpProvider {
    fn get_body(&self, identifier: &str) -> Result<RawBodyRecord> {
        let id = resolve_identifier(identifier_from_rel(identifier));
        let cache_path = self.cache_path(&id);

        if let Some(path) = cache_path.as_ref().filter(|p| file_exists_and_not_empty(p)) {
            log::debug!("Using cached record for {} from {}", id, path.display());
            let text = fs::read_to_string(path)?;
            match RawBodyRecord::from_json_str(&text) {
                Ok(record) => return Ok(record),
                Err(e) => {
                    log::warn!("discarding corrupt cache entry {}: {}", path.display(), e);
                    let _ = fs::remove_file(path);
                }
            }
        }

        let text = self.download(&self.record_url(&id))?;
        let record = RawBodyRecord::from_json_str(&text)
            .map_err(|e| OrreryError::MissingData(format!("body `{}` does not exist: {}", id, e)))?;

        // The API answers unknown bodies with an empty object
        if record.id.is_empty() {
            return Err(OrreryError::MissingData(format!("body `{}` does not exist", id)));
        }

        if let Some(path) = cache_path {
            if let Err(e) = self.store(&path, &text) {
                log::warn!("failed to cache record {}: {}", path.display(), e);
            }
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_dir() {
        let cache_dir = get_cache_dir();
        assert!(cache_dir.to_str().unwrap().contains(".cache/orrery"));
    }

    #[test]
    fn test_record_url() {
        let provider = HttpProvider::new()
            .unwrap()
            .with_base_url("http://localhost:9/bodies");
        assert_eq!(provider.record_url("terre"), "http://localhost:9/bodies/terre");
    }

    #[test]
    fn test_cached_record_is_served_without_network() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("terre.json"),
            r#"{"id": "terre", "englishName": "Earth"}"#,
        )
        .unwrap();

        // The base URL is unroutable; only the cache can answer
        let provider = HttpProvider::new()
            .unwrap()
            .with_base_url("http://127.0.0.1:9/")
            .with_cache_dir(Some(dir.path().to_path_buf()))
            .with_attempts(1);

        let record = provider.get_body("Earth").unwrap();
        assert_eq!(record.english_name, "Earth");
    }

    #[test]
    fn test_unreachable_source_is_missing_data() {
        let provider = HttpProvider::with_timeout(Duration::from_millis(200))
            .unwrap()
            .with_base_url("http://127.0.0.1:9/")
            .with_cache_dir(None)
            .with_attempts(1);

        assert!(matches!(
            provider.get_body("terre"),
            Err(OrreryError::MissingData(_))
        ));
    }
}
