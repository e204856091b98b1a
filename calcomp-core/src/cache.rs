//! Path-keyed cache of parsed JSON files.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::CalCompResult;

/// Parsed JSON documents keyed by the path they were read from.
///
/// Each path is read from disk at most once until it is invalidated, so
/// repeated loads see the same document even if the file changes
/// underneath. Owned by whoever drives a build; not shared between threads.
#[derive(Debug, Default)]
pub struct JsonCache {
    documents: HashMap<PathBuf, serde_json::Value>,
}

impl JsonCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and deserialise a required file.
    pub fn load<T: DeserializeOwned>(&mut self, path: &Path) -> CalCompResult<T> {
        let value = self.document(path)?;
        Ok(serde_json::from_value(value.clone())?)
    }

    /// Like [`JsonCache::load`], but a missing file yields `T::default()`.
    ///
    /// Malformed JSON is still an error.
    pub fn load_optional<T: DeserializeOwned + Default>(&mut self, path: &Path) -> CalCompResult<T> {
        if !self.documents.contains_key(path) && !path.exists() {
            warn!(path = %path.display(), "Optional source not found, using empty data");
            return Ok(T::default());
        }
        self.load(path)
    }

    /// Drop one cached document. Returns whether it was cached.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.documents.remove(path).is_some()
    }

    /// Re-read a file from disk, replacing any cached copy.
    pub fn reload<T: DeserializeOwned>(&mut self, path: &Path) -> CalCompResult<T> {
        self.invalidate(path);
        self.load(path)
    }

    pub fn clear(&mut self) {
        self.documents.clear();
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn document(&mut self, path: &Path) -> CalCompResult<&serde_json::Value> {
        if !self.documents.contains_key(path) {
            debug!(path = %path.display(), "Reading JSON");
            let content = std::fs::read_to_string(path)?;
            let value: serde_json::Value = serde_json::from_str(&content)?;
            self.documents.insert(path.to_path_buf(), value);
        }

        Ok(&self.documents[path])
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::error::CalCompError;

    #[test]
    fn test_load_is_memoised_until_invalidated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("colours.json");
        std::fs::write(&path, r#"{"FR": "blue"}"#).unwrap();

        let mut cache = JsonCache::new();
        let first: BTreeMap<String, String> = cache.load(&path).unwrap();

        std::fs::write(&path, r#"{"FR": "navy"}"#).unwrap();
        let second: BTreeMap<String, String> = cache.load(&path).unwrap();
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);

        let reloaded: BTreeMap<String, String> = cache.reload(&path).unwrap();
        assert_eq!(reloaded["FR"], "navy");

        assert!(cache.invalidate(&path));
        assert!(!cache.invalidate(&path));
    }

    #[test_log::test]
    fn test_missing_optional_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = JsonCache::new();

        let data: BTreeMap<String, String> =
            cache.load_optional(&dir.path().join("absent.json")).unwrap();
        assert!(data.is_empty());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_missing_required_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = JsonCache::new();

        let result: CalCompResult<BTreeMap<String, String>> =
            cache.load(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(CalCompError::Io(_))));
    }

    #[test]
    fn test_malformed_optional_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();

        let mut cache = JsonCache::new();
        let result: CalCompResult<BTreeMap<String, String>> = cache.load_optional(&path);
        assert!(matches!(result, Err(CalCompError::Serialization(_))));

        cache.clear();
        assert!(cache.is_empty());
    }
}
