//! Error types for availability-engine operations.

use chrono::NaiveDate;
use thiserror::Error;

/// Input rejected at ingestion. Every computation past validation is total.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Not `HH:MM` with hour 00-23 and minute 00-59.
    #[error("Malformed time: {0:?} (expected HH:MM)")]
    MalformedTime(String),

    #[error("Invalid interval: start {start} must be before end {end} (minutes, end <= 1440)")]
    InvalidInterval { start: u16, end: u16 },

    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid recurrence: {0}")]
    InvalidRecurrence(String),

    #[error("Invalid month: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    /// Two members share a `userId`; per-member results are keyed by it.
    #[error("Duplicate member: '{0}'")]
    DuplicateMember(String),

    /// The snapshot document was not valid JSON or did not match the schema.
    #[error("Snapshot parse error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ValidationError>;
