//! Shared utilities for CLI commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use ot_core::{ClockTime, Settings};
use ot_grid::GridSnapshot;

use crate::Config;
use crate::store::JsonFileStore;

/// Picks the grid snapshot: `--grid` first, then `grid_path` from config.
pub fn resolve_grid_path(grid: Option<&Path>, config: &Config) -> Result<PathBuf> {
    grid.map(Path::to_path_buf)
        .or_else(|| config.grid_path.clone())
        .context("no grid snapshot given; pass --grid or set grid_path in config")
}

pub fn load_grid(grid: Option<&Path>, config: &Config) -> Result<GridSnapshot> {
    let path = resolve_grid_path(grid, config)?;
    GridSnapshot::load(&path).with_context(|| format!("failed to load {}", path.display()))
}

/// Resolves settings from the configured settings file.
pub fn load_settings(config: &Config) -> Settings {
    let settings = Settings::resolve(&JsonFileStore::new(&config.settings_path));
    tracing::debug!(?settings, "resolved settings");
    settings
}

/// Formats a delta with an explicit sign, e.g. `+1.30` or `-0.15`.
pub fn format_signed(time: ClockTime) -> String {
    if time.is_negative() {
        time.to_string()
    } else {
        format!("+{time}")
    }
}
