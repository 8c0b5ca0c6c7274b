//! Config command: view and edit the stored settings.

use std::io::Write;

use anyhow::{Context, Result, bail};

use ot_core::settings::{
    BASELINE_KEY, IGNORED_DATES_KEY, KNOWN_KEYS, WORK_COLUMN_KEY, format_ignored_dates,
};
use ot_core::{Settings, SettingsStore, validate_setting};

use crate::ConfigAction;
use crate::store::JsonFileStore;

/// The resolved value of `key`, as it would be stored.
fn resolved_value(settings: &Settings, key: &str) -> Result<String> {
    match key {
        BASELINE_KEY => Ok(settings.baseline.to_string()),
        WORK_COLUMN_KEY => Ok(settings.work_column_label.clone()),
        IGNORED_DATES_KEY => Ok(format_ignored_dates(&settings.ignored_dates)),
        _ => bail!("unknown setting: {key} (expected one of {})", KNOWN_KEYS.join(", ")),
    }
}

fn write_ignored<W: Write>(
    writer: &mut W,
    store: &mut JsonFileStore,
    settings: &Settings,
) -> Result<()> {
    store
        .set(IGNORED_DATES_KEY, &format_ignored_dates(&settings.ignored_dates))
        .context("failed to save ignored dates")?;
    writeln!(
        writer,
        "Ignored dates: {}",
        format_ignored_dates(&settings.ignored_dates)
    )?;
    Ok(())
}

pub fn run<W: Write>(writer: &mut W, action: &ConfigAction, store: &mut JsonFileStore) -> Result<()> {
    let mut settings = Settings::resolve(&*store);

    match action {
        ConfigAction::Show => {
            writeln!(writer, "Settings file: {}", store.path().display())?;
            for key in KNOWN_KEYS {
                writeln!(writer, "{key} = {}", resolved_value(&settings, key)?)?;
            }
        }
        ConfigAction::Get { key } => {
            writeln!(writer, "{}", resolved_value(&settings, key)?)?;
        }
        ConfigAction::Set { key, value } => {
            validate_setting(key, value)?;
            store
                .set(key, value)
                .with_context(|| format!("failed to save {key}"))?;
            writeln!(writer, "Set {key} = {value}")?;
        }
        ConfigAction::Ignore { date } => {
            if !settings.ignored_dates.insert(date.clone()) {
                writeln!(writer, "{date} is already ignored")?;
                return Ok(());
            }
            write_ignored(writer, store, &settings)?;
        }
        ConfigAction::Unignore { date } => {
            if !settings.ignored_dates.remove(date) {
                writeln!(writer, "{date} was not ignored")?;
                return Ok(());
            }
            write_ignored(writer, store, &settings)?;
        }
    }

    Ok(())
}
