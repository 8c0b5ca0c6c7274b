//! Summary command: period totals from the grid's summary block.

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use ot_core::{ClockTime, DecimalDays, RecordSource, Settings, compute_overtime};
use ot_grid::GridSnapshot;

use super::overtime::ERROR_MARKER;
use super::util::{load_grid, load_settings};
use crate::Config;

/// Period totals for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryData {
    pub regular_work_time: Option<ClockTime>,
    pub work_days: DecimalDays,
    pub paid_leave_days: DecimalDays,
    /// Work days plus paid leave.
    pub attended_days: DecimalDays,
    /// `None` when the balance could not be computed.
    pub overtime: Option<ClockTime>,
}

pub fn build_summary(grid: &GridSnapshot, settings: &Settings) -> Result<SummaryData> {
    let summary = &grid.summary;
    let work_days = summary.work_days()?;
    let paid_leave_days = summary.paid_leave_days()?;

    let attended_days = work_days
        .checked_add(paid_leave_days)
        .context("failed to add paid leave to work days")?;

    let overtime = grid
        .records(&settings.work_column_label)
        .map_err(anyhow::Error::from)
        .and_then(|records| {
            Ok(compute_overtime(
                settings.baseline,
                &settings.ignored_dates,
                &records,
            )?)
        });
    let overtime = match overtime {
        Ok(total) => Some(total),
        Err(err) => {
            tracing::warn!(error = %err, "overtime balance unavailable");
            None
        }
    };

    Ok(SummaryData {
        regular_work_time: summary.regular_work_time()?,
        work_days,
        paid_leave_days,
        attended_days,
        overtime,
    })
}

/// Whole days when the count has no fraction, `D.d` otherwise.
fn format_days(days: DecimalDays) -> String {
    days.to_whole_days()
        .map_or_else(|_| days.to_string(), |whole| whole.to_string())
}

pub fn format_summary(data: &SummaryData) -> String {
    let mut output = String::new();
    let regular = data
        .regular_work_time
        .map_or_else(|| "-".to_string(), |t| t.to_string());
    let overtime = data
        .overtime
        .map_or_else(|| ERROR_MARKER.to_string(), |t| t.to_string());

    writeln!(output, "PERIOD SUMMARY").unwrap();
    writeln!(output, "──────────────").unwrap();
    writeln!(output, "Regular work time: {regular}").unwrap();
    writeln!(output, "Work days:         {}", format_days(data.work_days)).unwrap();
    writeln!(output, "Paid leave:        {}", format_days(data.paid_leave_days)).unwrap();
    writeln!(output, "Attended days:     {}", format_days(data.attended_days)).unwrap();
    writeln!(output, "Overtime savings:  {overtime}").unwrap();
    output
}

pub fn run<W: Write>(writer: &mut W, grid: Option<&Path>, config: &Config, json: bool) -> Result<()> {
    let settings = load_settings(config);
    let grid = load_grid(grid, config)?;
    let data = build_summary(&grid, &settings)?;

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&data)?)?;
    } else {
        write!(writer, "{}", format_summary(&data))?;
    }
    Ok(())
}
