//! Overtime command: the balance of worked time against the daily baseline.
//!
//! The plain output is the balance alone (`0.30`, `-2.00`), which is what the
//! attendance page displays in its 残業貯金 column. When the balance cannot be
//! computed the command prints [`ERROR_MARKER`] instead and logs the cause.

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use ot_core::{ClockTime, OvertimeTally, RecordSource, Settings, tally_overtime};

use super::util::{format_signed, load_grid, load_settings};
use crate::Config;

/// Shown in place of the balance when the calculation fails.
pub const ERROR_MARKER: &str = "計算エラー";

/// Output style for the overtime command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Plain,
    Detail,
    Json,
}

/// A computed balance with the inputs that produced it.
#[derive(Debug)]
pub struct OvertimeReport {
    pub generated_at: DateTime<Utc>,
    pub baseline: ClockTime,
    pub column: String,
    pub tally: OvertimeTally,
}

/// Reads the records for the configured column and aggregates them.
pub fn compute(settings: &Settings, source: &dyn RecordSource) -> Result<OvertimeReport> {
    let records = source.records(&settings.work_column_label)?;
    let tally = tally_overtime(settings.baseline, &settings.ignored_dates, &records)
        .context("failed to aggregate overtime")?;
    Ok(OvertimeReport {
        generated_at: Utc::now(),
        baseline: settings.baseline,
        column: settings.work_column_label.clone(),
        tally,
    })
}

// ========== Text Output ==========

/// Formats the per-day breakdown.
pub fn format_detail(report: &OvertimeReport) -> String {
    let mut output = String::new();
    let tally = &report.tally;

    writeln!(output, "OVERTIME SAVINGS").unwrap();
    writeln!(output, "────────────────").unwrap();
    writeln!(output, "Baseline: {} per day", report.baseline).unwrap();
    writeln!(output, "Column:   {}", report.column).unwrap();
    writeln!(output).unwrap();

    if tally.days.is_empty() {
        writeln!(output, "  (no counted days)").unwrap();
    }
    for day in &tally.days {
        writeln!(
            output,
            "  {}  {:>6}  {:>6}",
            day.date_label,
            day.worked.to_string(),
            format_signed(day.delta)
        )
        .unwrap();
    }

    writeln!(output).unwrap();
    writeln!(
        output,
        "Counted: {}  Ignored: {}  Missing: {}",
        tally.counted_days(),
        tally.ignored_days,
        tally.missing_days
    )
    .unwrap();
    writeln!(output, "Balance: {}", tally.total).unwrap();

    output
}

// ========== JSON Output ==========

#[derive(Debug, Serialize)]
pub struct JsonOvertime<'a> {
    pub generated_at: String,
    pub baseline: ClockTime,
    pub column: &'a str,
    pub total: ClockTime,
    pub total_minutes: i64,
    pub counted_days: usize,
    pub ignored_days: usize,
    pub missing_days: usize,
    pub days: Vec<JsonDay<'a>>,
}

#[derive(Debug, Serialize)]
pub struct JsonDay<'a> {
    pub date: &'a str,
    pub worked: ClockTime,
    pub delta: ClockTime,
}

pub fn format_json(report: &OvertimeReport) -> Result<String> {
    let tally = &report.tally;
    let json = JsonOvertime {
        generated_at: report.generated_at.to_rfc3339(),
        baseline: report.baseline,
        column: &report.column,
        total: tally.total,
        total_minutes: tally.total.total_minutes(),
        counted_days: tally.counted_days(),
        ignored_days: tally.ignored_days,
        missing_days: tally.missing_days,
        days: tally
            .days
            .iter()
            .map(|day| JsonDay {
                date: &day.date_label,
                worked: day.worked,
                delta: day.delta,
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&json)?)
}

// ========== Public Interface ==========

fn render(report: &OvertimeReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Plain => Ok(format!("{}\n", report.tally.total)),
        OutputFormat::Detail => Ok(format_detail(report)),
        OutputFormat::Json => Ok(format!("{}\n", format_json(report)?)),
    }
}

fn build_and_render(grid: Option<&Path>, config: &Config, format: OutputFormat) -> Result<String> {
    let settings = load_settings(config);
    let grid = load_grid(grid, config)?;
    let report = compute(&settings, &grid)?;
    render(&report, format)
}

/// Runs the overtime command.
///
/// Returns `false` when the balance could not be computed; the marker has
/// been written in that case.
pub fn run<W: Write>(
    writer: &mut W,
    grid: Option<&Path>,
    config: &Config,
    format: OutputFormat,
) -> Result<bool> {
    match build_and_render(grid, config, format) {
        Ok(output) => {
            write!(writer, "{output}")?;
            Ok(true)
        }
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "overtime calculation failed");
            writeln!(writer, "{ERROR_MARKER}")?;
            Ok(false)
        }
    }
}
