//! Overtime aggregation.
//!
//! The balance is the signed sum of `worked - baseline` over every day that
//! has a worked time and is not in the ignore set. Days without data and
//! ignored days contribute nothing, and the result does not depend on record
//! order. The only failure is a balance that overflows the minute counter.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::{AttendanceRecord, ClockTime, ValueError};

/// A counted day and its difference from the baseline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayDelta {
    pub date_label: String,
    pub worked: ClockTime,
    pub delta: ClockTime,
}

/// Result of an aggregation pass, with the days that made it up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OvertimeTally {
    pub total: ClockTime,
    /// Counted days, in source order.
    pub days: Vec<DayDelta>,
    pub ignored_days: usize,
    pub missing_days: usize,
}

impl OvertimeTally {
    pub fn counted_days(&self) -> usize {
        self.days.len()
    }
}

/// Computes the cumulative overtime balance.
pub fn compute_overtime(
    baseline: ClockTime,
    ignored_dates: &BTreeSet<String>,
    records: &[AttendanceRecord],
) -> Result<ClockTime, ValueError> {
    Ok(tally_overtime(baseline, ignored_dates, records)?.total)
}

/// Same pass as [`compute_overtime`], keeping the per-day breakdown.
pub fn tally_overtime(
    baseline: ClockTime,
    ignored_dates: &BTreeSet<String>,
    records: &[AttendanceRecord],
) -> Result<OvertimeTally, ValueError> {
    let mut tally = OvertimeTally::default();

    for record in records {
        if ignored_dates.contains(&record.date_label) {
            tally.ignored_days += 1;
            continue;
        }
        let Some(worked) = record.worked_time else {
            tally.missing_days += 1;
            continue;
        };

        let delta = worked.checked_sub(baseline)?;
        tally.total = tally.total.checked_add(delta)?;
        tally.days.push(DayDelta {
            date_label: record.date_label.clone(),
            worked,
            delta,
        });
    }

    tracing::debug!(
        total = %tally.total,
        counted = tally.counted_days(),
        ignored = tally.ignored_days,
        missing = tally.missing_days,
        "aggregated overtime"
    );
    Ok(tally)
}
