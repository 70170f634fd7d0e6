//! Data module for retrieving raw body records
//!
//! A [`DataProvider`] resolves an identifier to a [`RawBodyRecord`]. The model
//! only ever talks to this trait; the live API client, a directory of JSON
//! fixtures and an in-memory map are interchangeable behind it.

mod downloader;
mod provider;

pub use downloader::{get_cache_dir, HttpProvider};
pub use provider::{DirectoryProvider, MemoryProvider};

use crate::bodies::RawBodyRecord;
use crate::Result;

/// Source of raw body records
pub trait DataProvider {
    /// Fetch the record for a body identifier
    ///
    /// Returns [`crate::OrreryError::MissingData`] when the source has no
    /// record or the payload cannot be parsed.
    fn get_body(&self, identifier: &str) -> Result<RawBodyRecord>;
}

impl<P: DataProvider + ?Sized> DataProvider for &P {
    fn get_body(&self, identifier: &str) -> Result<RawBodyRecord> {
        (**self).get_body(identifier)
    }
}

impl<P: DataProvider + ?Sized> DataProvider for Box<P> {
    fn get_body(&self, identifier: &str) -> Result<RawBodyRecord> {
        (**self).get_body(identifier)
    }
}
