//! Attendance grid snapshots.
//!
//! A snapshot is the rendered attendance table saved to a file: the header
//! labels, the daily rows, and optionally the period summary block. It is the
//! [`RecordSource`] the CLI aggregates over.
//!
//! # Formats
//!
//! - JSON (`.json`): `{ "headers": [...], "rows": [[...]], "date_column": 0,
//!   "summary": { ... } }`. `date_column` and `summary` are optional.
//! - TSV (any other extension): the first line holds the headers, each
//!   following non-blank line is a row, and the date is in the first column.
//!   This is what a browser produces when the table is copied and pasted.
//!
//! Header labels may contain line-break markup (`労働<br>合計`). A label
//! matches the header with each break read as a space (`労働 合計`), or failing
//! that, with the breaks removed (`労働合計`). See [`normalize_header_label`].

mod header;
mod summary;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use ot_core::{RawRecord, RecordSource, SourceError, ValueError};

pub use header::{collapse_header_label, normalize_header_label};
pub use summary::{PAID_LEAVE_LABEL, PeriodSummary};

/// Grid loading and summary errors.
#[derive(Debug, Error)]
pub enum GridError {
    /// The snapshot file could not be read.
    #[error("failed to read grid {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The JSON snapshot is malformed.
    #[error("invalid grid json: {0}")]
    Json(#[from] serde_json::Error),
    /// A TSV snapshot without a header line.
    #[error("grid has no header row")]
    Empty,
    /// The configured date column does not exist.
    #[error("date column {index} is outside the {width} header(s)")]
    DateColumnOutOfRange { index: usize, width: usize },
    /// A summary cell holds text that is not a valid value.
    #[error("invalid summary {field}: {source}")]
    Value {
        field: String,
        #[source]
        source: ValueError,
    },
    /// A day-count cell does not start with a count.
    #[error("day count for {label:?} is unreadable: {text:?}")]
    UnreadableDayCount { label: String, text: String },
}

/// A saved attendance table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
    /// Index of the column holding the date label.
    #[serde(default)]
    pub date_column: usize,
    #[serde(default)]
    pub summary: PeriodSummary,
}

impl GridSnapshot {
    /// Loads a snapshot, choosing the format from the file extension.
    pub fn load(path: &Path) -> Result<Self, GridError> {
        let content = std::fs::read_to_string(path).map_err(|source| GridError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let grid = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_tsv_str(&content)?
        };

        tracing::debug!(
            path = %path.display(),
            columns = grid.headers.len(),
            rows = grid.rows.len(),
            "loaded grid snapshot"
        );
        Ok(grid)
    }

    pub fn from_json_str(content: &str) -> Result<Self, GridError> {
        let grid: Self = serde_json::from_str(content)?;
        grid.validate()?;
        Ok(grid)
    }

    /// Parses tab-separated text. Blank lines are skipped.
    pub fn from_tsv_str(content: &str) -> Result<Self, GridError> {
        let mut lines = content
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty());

        let headers = lines.next().ok_or(GridError::Empty)?;
        let grid = Self {
            headers: split_tsv(headers),
            rows: lines.map(split_tsv).collect(),
            date_column: 0,
            summary: PeriodSummary::default(),
        };
        grid.validate()?;
        Ok(grid)
    }

    /// Index of the first column whose normalized header equals `label`,
    /// falling back to headers with their line breaks removed.
    pub fn column_index(&self, label: &str) -> Option<usize> {
        let label = label.trim();
        self.headers
            .iter()
            .position(|header| normalize_header_label(header) == label)
            .or_else(|| {
                self.headers
                    .iter()
                    .position(|header| collapse_header_label(header) == label)
            })
    }

    /// Normalized header labels, in column order.
    pub fn header_labels(&self) -> Vec<String> {
        self.headers
            .iter()
            .map(|header| normalize_header_label(header))
            .collect()
    }

    fn validate(&self) -> Result<(), GridError> {
        if self.date_column >= self.headers.len() {
            return Err(GridError::DateColumnOutOfRange {
                index: self.date_column,
                width: self.headers.len(),
            });
        }
        Ok(())
    }
}

impl RecordSource for GridSnapshot {
    fn raw_records(&self, column_label: &str) -> Result<Vec<RawRecord>, SourceError> {
        let Some(column) = self.column_index(column_label) else {
            tracing::debug!(
                label = column_label,
                headers = ?self.header_labels(),
                "work time column not found"
            );
            return Err(SourceError::ColumnNotFound {
                label: column_label.to_string(),
            });
        };

        Ok(self
            .rows
            .iter()
            .map(|row| RawRecord::new(cell(row, self.date_column).trim(), cell(row, column)))
            .collect())
    }
}

/// Short rows are padded with empty cells.
fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map_or("", String::as_str)
}

fn split_tsv(line: &str) -> Vec<String> {
    line.split('\t').map(str::to_string).collect()
}
