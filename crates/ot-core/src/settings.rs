//! User settings: the key/value provider contract and default resolution.
//!
//! Settings are read once through [`Settings::resolve`] and passed by value
//! to whatever needs them. Missing, unreadable or invalid values fall back to
//! the defaults; resolution itself never fails.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::ClockTime;

/// Expected work per day, `±H.MM`.
pub const BASELINE_KEY: &str = "baselineDailyWorkTime";
/// Header label of the worked-time column.
pub const WORK_COLUMN_KEY: &str = "workColumnLabel";
/// JSON array of date labels excluded from aggregation.
pub const IGNORED_DATES_KEY: &str = "ignoredDateLabels";

pub const KNOWN_KEYS: [&str; 3] = [BASELINE_KEY, WORK_COLUMN_KEY, IGNORED_DATES_KEY];

pub const DEFAULT_BASELINE: ClockTime = ClockTime::from_minutes(8 * 60);
pub const DEFAULT_WORK_COLUMN_LABEL: &str = "労働合計";

/// Errors from a [`SettingsStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing storage failed.
    #[error("settings backend failed: {0}")]
    Backend(String),

    #[error("unknown setting: {0}")]
    UnknownKey(String),

    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

/// A string key/value store for settings.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store, ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Resolved settings for one aggregation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub baseline: ClockTime,
    pub work_column_label: String,
    pub ignored_dates: BTreeSet<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            baseline: DEFAULT_BASELINE,
            work_column_label: DEFAULT_WORK_COLUMN_LABEL.to_string(),
            ignored_dates: BTreeSet::new(),
        }
    }
}

impl Settings {
    /// Reads every known key, substituting defaults where needed.
    pub fn resolve(store: &dyn SettingsStore) -> Self {
        let defaults = Self::default();

        let baseline = read_setting(store, BASELINE_KEY)
            .and_then(|text| parse_or_warn(BASELINE_KEY, &text, ClockTime::parse))
            .unwrap_or(defaults.baseline);

        let work_column_label = read_setting(store, WORK_COLUMN_KEY)
            .map(|label| label.trim().to_string())
            .unwrap_or(defaults.work_column_label);

        let ignored_dates = read_setting(store, IGNORED_DATES_KEY)
            .and_then(|text| parse_or_warn(IGNORED_DATES_KEY, &text, parse_ignored_dates))
            .unwrap_or(defaults.ignored_dates);

        Self {
            baseline,
            work_column_label,
            ignored_dates,
        }
    }

    /// Writes all three keys back to `store`.
    pub fn store(&self, store: &mut dyn SettingsStore) -> Result<(), StoreError> {
        store.set(BASELINE_KEY, &self.baseline.to_string())?;
        store.set(WORK_COLUMN_KEY, &self.work_column_label)?;
        store.set(IGNORED_DATES_KEY, &format_ignored_dates(&self.ignored_dates))?;
        Ok(())
    }
}

/// Checks that `value` is acceptable for `key` before it is written.
pub fn validate_setting(key: &str, value: &str) -> Result<(), StoreError> {
    let invalid = |reason: String| StoreError::InvalidValue {
        key: key.to_string(),
        reason,
    };
    match key {
        BASELINE_KEY => ClockTime::parse(value)
            .map(drop)
            .map_err(|e| invalid(e.to_string())),
        WORK_COLUMN_KEY if value.trim().is_empty() => Err(invalid("label is empty".to_string())),
        WORK_COLUMN_KEY => Ok(()),
        IGNORED_DATES_KEY => parse_ignored_dates(value)
            .map(drop)
            .map_err(|e| invalid(e.to_string())),
        _ => Err(StoreError::UnknownKey(key.to_string())),
    }
}

/// Parses the stored ignore list, a JSON array of strings.
pub fn parse_ignored_dates(text: &str) -> Result<BTreeSet<String>, serde_json::Error> {
    serde_json::from_str(text)
}

pub fn format_ignored_dates(dates: &BTreeSet<String>) -> String {
    serde_json::to_string(dates).unwrap_or_else(|_| "[]".to_string())
}

fn read_setting(store: &dyn SettingsStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(Some(value)) if !value.trim().is_empty() => Some(value),
        Ok(_) => None,
        Err(error) => {
            tracing::warn!(key, %error, "failed to read setting; using default");
            None
        }
    }
}

fn parse_or_warn<T, E: std::fmt::Display>(
    key: &str,
    text: &str,
    parse: impl FnOnce(&str) -> Result<T, E>,
) -> Option<T> {
    match parse(text) {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::warn!(key, value = text, %error, "invalid setting; using default");
            None
        }
    }
}
