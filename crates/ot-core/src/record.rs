//! Per-day attendance records and the source contract that produces them.

use thiserror::Error;

use crate::ClockTime;

/// Errors reported by a [`RecordSource`].
#[derive(Debug, Error)]
pub enum SourceError {
    /// No header matched the requested column label.
    #[error("no column labelled {label:?}")]
    ColumnNotFound { label: String },
}

/// A row as the source sees it: a date label and the untouched cell text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub date_label: String,
    pub duration_text: String,
}

/// What a duration cell contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// Empty or whitespace-only cell.
    Blank,
    /// A valid `±H.MM` time.
    Time(ClockTime),
    /// Non-empty text that is not a time.
    Malformed,
}

impl RawRecord {
    pub fn new(date_label: impl Into<String>, duration_text: impl Into<String>) -> Self {
        Self {
            date_label: date_label.into(),
            duration_text: duration_text.into(),
        }
    }

    /// Classifies the duration cell.
    pub fn cell_state(&self) -> CellState {
        if self.duration_text.trim().is_empty() {
            return CellState::Blank;
        }
        ClockTime::parse(&self.duration_text).map_or(CellState::Malformed, CellState::Time)
    }
}

/// One day's attendance: its label and the worked time, if the cell held one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub date_label: String,
    pub worked_time: Option<ClockTime>,
}

impl AttendanceRecord {
    pub fn new(date_label: impl Into<String>, worked_time: Option<ClockTime>) -> Self {
        Self {
            date_label: date_label.into(),
            worked_time,
        }
    }

    /// Parses a raw row. Cells that are not valid times become `None`.
    pub fn from_raw(raw: RawRecord) -> Self {
        let worked_time = match raw.cell_state() {
            CellState::Time(time) => Some(time),
            CellState::Blank => None,
            CellState::Malformed => {
                tracing::debug!(
                    date = %raw.date_label,
                    text = %raw.duration_text,
                    "duration cell is not a time; treating day as missing"
                );
                None
            }
        };
        Self {
            date_label: raw.date_label,
            worked_time,
        }
    }
}

/// Supplies the rows of a reporting period.
///
/// Implementations locate the column whose header matches `column_label` and
/// return one [`RawRecord`] per row, in source order. Parsing into
/// [`ClockTime`] happens here in the core, through [`RecordSource::records`].
pub trait RecordSource {
    fn raw_records(&self, column_label: &str) -> Result<Vec<RawRecord>, SourceError>;

    fn records(&self, column_label: &str) -> Result<Vec<AttendanceRecord>, SourceError> {
        Ok(self
            .raw_records(column_label)?
            .into_iter()
            .map(AttendanceRecord::from_raw)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource(Vec<RawRecord>);

    impl RecordSource for FixedSource {
        fn raw_records(&self, column_label: &str) -> Result<Vec<RawRecord>, SourceError> {
            if column_label == "労働合計" {
                Ok(self.0.clone())
            } else {
                Err(SourceError::ColumnNotFound {
                    label: column_label.to_string(),
                })
            }
        }
    }

    #[test]
    fn cell_state_distinguishes_blank_from_malformed() {
        assert_eq!(RawRecord::new("Mon", "").cell_state(), CellState::Blank);
        assert_eq!(RawRecord::new("Mon", " \t").cell_state(), CellState::Blank);
        assert_eq!(RawRecord::new("Mon", "--").cell_state(), CellState::Malformed);
        assert_eq!(
            RawRecord::new("Mon", "9.30").cell_state(),
            CellState::Time(ClockTime::from_minutes(570))
        );
    }

    #[test]
    fn from_raw_keeps_rows_with_unparseable_cells() {
        let record = AttendanceRecord::from_raw(RawRecord::new("Tue", "有休"));
        assert_eq!(record, AttendanceRecord::new("Tue", None));
    }

    #[test]
    fn default_records_parses_every_row() {
        let source = FixedSource(vec![
            RawRecord::new("Mon", "9.30"),
            RawRecord::new("Tue", ""),
            RawRecord::new("Wed", "8.5"),
        ]);
        let records = source.records("労働合計").unwrap();
        assert_eq!(
            records,
            vec![
                AttendanceRecord::new("Mon", Some(ClockTime::from_minutes(570))),
                AttendanceRecord::new("Tue", None),
                AttendanceRecord::new("Wed", None),
            ]
        );
    }

    #[test]
    fn records_propagates_column_not_found() {
        let source = FixedSource(Vec::new());
        let err = source.records("残業").unwrap_err();
        assert!(matches!(err, SourceError::ColumnNotFound { ref label } if label == "残業"));
        assert_eq!(err.to_string(), "no column labelled \"残業\"");
    }
}
