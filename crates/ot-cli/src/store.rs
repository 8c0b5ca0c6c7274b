//! File-backed settings store.
//!
//! Settings are kept in `settings.json` as a flat object of string values,
//! the same shape the browser extension kept in synced storage.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ot_core::{SettingsStore, StoreError};

/// A [`SettingsStore`] persisted as a JSON object on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every stored value. A missing file is an empty store.
    pub fn load_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                StoreError::Backend(format!("failed to parse {}: {e}", self.path.display()))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(StoreError::Backend(format!(
                "failed to read {}: {e}",
                self.path.display()
            ))),
        }
    }

    fn save_all(&self, values: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let backend = |what: &str, e: &dyn std::fmt::Display| {
            StoreError::Backend(format!("failed to {what} {}: {e}", self.path.display()))
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| backend("create directory for", &e))?;
        }
        let json = serde_json::to_string_pretty(values).map_err(|e| backend("serialize", &e))?;
        std::fs::write(&self.path, json).map_err(|e| backend("write", &e))?;
        Ok(())
    }
}

impl SettingsStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.load_all()?;
        values.insert(key.to_string(), value.to_string());
        self.save_all(&values)?;
        tracing::debug!(key, value, path = %self.path.display(), "saved setting");
        Ok(())
    }
}
