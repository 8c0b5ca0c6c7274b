//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
///
/// This is where the CLI finds its inputs; the user's overtime settings
/// (baseline, column label, ignored dates) live in the settings file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the settings file.
    pub settings_path: PathBuf,
    /// Grid snapshot used when `--grid` is not given.
    #[serde(default)]
    pub grid_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            settings_path: data_dir.join("settings.json"),
            grid_path: None,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // OT_SETTINGS_PATH, OT_GRID_PATH
        figment = figment.merge(Env::prefixed("OT_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for ot.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("ot"))
}

/// Returns the platform-specific data directory for ot.
///
/// On Linux: `~/.local/share/ot`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("ot"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_dirs_data_path_ends_with_ot() {
        let path = dirs_data_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "ot");
    }

    #[test]
    fn test_default_config_uses_data_dir_for_settings() {
        let config = Config::default();
        let data_dir = dirs_data_path().unwrap();
        assert_eq!(config.settings_path, data_dir.join("settings.json"));
        assert!(config.grid_path.is_none());
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"settings_path = "/tmp/ot-test/settings.json""#).unwrap();
        writeln!(file, r#"grid_path = "/tmp/ot-test/october.tsv""#).unwrap();
        file.flush().unwrap();

        let config = Config::load_from(Some(file.path())).unwrap();
        assert_eq!(
            config.settings_path,
            PathBuf::from("/tmp/ot-test/settings.json")
        );
        assert_eq!(
            config.grid_path,
            Some(PathBuf::from("/tmp/ot-test/october.tsv"))
        );
    }
}
