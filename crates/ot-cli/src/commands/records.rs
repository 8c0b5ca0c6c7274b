//! Records command: how each grid row is read.
//!
//! Blank and malformed duration cells both count as missing data in the
//! balance. This listing tells them apart so a corrupt cell can be spotted.

use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

use anyhow::Result;

use ot_core::{CellState, RawRecord, RecordSource};

use super::util::{load_grid, load_settings};
use crate::Config;

/// Describes one row's cell and whether it counts toward the balance.
fn describe(record: &RawRecord, ignored: &BTreeSet<String>) -> (String, &'static str) {
    let state = record.cell_state();
    let cell = match state {
        CellState::Time(time) => time.to_string(),
        CellState::Blank => "-".to_string(),
        CellState::Malformed => format!("{:?}", record.duration_text.trim()),
    };
    let status = if ignored.contains(&record.date_label) {
        "ignored"
    } else {
        match state {
            CellState::Time(_) => "counted",
            CellState::Blank => "blank",
            CellState::Malformed => "malformed",
        }
    };
    (cell, status)
}

pub fn format_records(records: &[RawRecord], ignored: &BTreeSet<String>) -> String {
    let width = records
        .iter()
        .map(|r| r.date_label.chars().count())
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    for record in records {
        let (cell, status) = describe(record, ignored);
        output.push_str(&format!(
            "{:<width$}  {cell:>8}  {status}\n",
            record.date_label
        ));
    }
    if records.is_empty() {
        output.push_str("No rows in grid.\n");
    }
    output
}

pub fn run<W: Write>(writer: &mut W, grid: Option<&Path>, config: &Config) -> Result<()> {
    let settings = load_settings(config);
    let grid = load_grid(grid, config)?;
    let records = grid.raw_records(&settings.work_column_label)?;

    write!(writer, "{}", format_records(&records, &settings.ignored_dates))?;
    Ok(())
}
