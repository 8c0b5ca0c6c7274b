//! The summary block shown above the daily rows.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use ot_core::{ClockTime, DecimalDays};

use crate::GridError;

/// Label of the paid-leave day count.
pub const PAID_LEAVE_LABEL: &str = "有休";

/// Period totals as rendered on the attendance page, kept as raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodSummary {
    /// Regular work time for the period, `±H.MM`.
    pub regular_work_time: Option<String>,
    /// Days worked, `D.d`.
    pub work_days: Option<String>,
    /// Other day counts keyed by label, e.g. `"有休": "1.5日"`.
    pub day_counts: BTreeMap<String, String>,
}

impl PeriodSummary {
    /// Regular work time, or `None` when the cell is absent or blank.
    pub fn regular_work_time(&self) -> Result<Option<ClockTime>, GridError> {
        let Some(text) = self.regular_work_time.as_deref() else {
            return Ok(None);
        };
        if text.trim().is_empty() {
            tracing::debug!("regular work time cell is blank");
            return Ok(None);
        }
        ClockTime::parse(text)
            .map(Some)
            .map_err(|source| GridError::Value {
                field: "regular_work_time".to_string(),
                source,
            })
    }

    /// Days worked; an absent cell counts as zero.
    pub fn work_days(&self) -> Result<DecimalDays, GridError> {
        let Some(text) = self.work_days.as_deref() else {
            tracing::debug!("work day count not found; using 0.0");
            return Ok(DecimalDays::ZERO);
        };
        DecimalDays::parse(text).map_err(|source| GridError::Value {
            field: "work_days".to_string(),
            source,
        })
    }

    /// The day count filed under `label`; an absent label counts as zero.
    pub fn day_count(&self, label: &str) -> Result<DecimalDays, GridError> {
        let Some(text) = self.day_counts.get(label) else {
            tracing::debug!(label, "day count not found; using 0.0");
            return Ok(DecimalDays::ZERO);
        };
        DecimalDays::parse_leading(text).ok_or_else(|| GridError::UnreadableDayCount {
            label: label.to_string(),
            text: text.clone(),
        })
    }

    pub fn paid_leave_days(&self) -> Result<DecimalDays, GridError> {
        self.day_count(PAID_LEAVE_LABEL)
    }
}
