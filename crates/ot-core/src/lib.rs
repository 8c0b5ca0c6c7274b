//! Core domain logic for overtime savings.
//!
//! This crate contains the fundamental types and logic for:
//! - Value types: signed clock time (`±H.MM`) and one-decimal day counts
//! - Records: per-day attendance rows and the source contract that yields them
//! - Aggregation: summing per-day deltas against a baseline work time
//! - Settings: the key/value provider contract and default resolution

mod clock_time;
mod decimal_days;
mod error;
pub mod overtime;
pub mod record;
pub mod settings;

pub use clock_time::ClockTime;
pub use decimal_days::DecimalDays;
pub use error::ValueError;
pub use overtime::{DayDelta, OvertimeTally, compute_overtime, tally_overtime};
pub use record::{AttendanceRecord, CellState, RawRecord, RecordSource, SourceError};
pub use settings::{MemoryStore, Settings, SettingsStore, StoreError, validate_setting};
