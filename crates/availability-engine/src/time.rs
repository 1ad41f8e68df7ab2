//! Minute-of-day time values and the `TimeSlot` interval type.
//!
//! Internally every time is an integer minute in `[0, 1440]`. At the boundary
//! times are zero-padded 24-hour `HH:MM` strings. The consumer contract writes
//! the end of the day as `"23:59"`, so a slot *end* of `"23:59"` is read as the
//! day boundary (1440) and 1440 is written back as `"23:59"`.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};

/// Minute of the day, `0..=1440`.
pub type Minutes = u16;

/// First minute of the day.
pub const DAY_START: Minutes = 0;

/// Exclusive end of the day used by all interval arithmetic.
pub const DAY_END: Minutes = 1440;

/// Displayed end of a whole-day slot.
pub const DISPLAY_DAY_END: &str = "23:59";

const MINUTES_PER_HOUR: Minutes = 60;

/// Parse a zero-padded `HH:MM` string (hour 00-23, minute 00-59) into minutes.
pub fn parse_hhmm(s: &str) -> Result<Minutes> {
    let malformed = || ValidationError::MalformedTime(s.to_string());

    let bytes = s.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(malformed());
    }
    let digit = |b: u8| -> Result<Minutes> {
        if b.is_ascii_digit() {
            Ok(Minutes::from(b - b'0'))
        } else {
            Err(malformed())
        }
    };

    let hour = digit(bytes[0])? * 10 + digit(bytes[1])?;
    let minute = digit(bytes[3])? * 10 + digit(bytes[4])?;
    if hour > 23 || minute > 59 {
        return Err(malformed());
    }
    Ok(hour * MINUTES_PER_HOUR + minute)
}

/// Format minutes as `HH:MM`. 1440 formats as `"24:00"`; use
/// [`format_slot_end`] for the end of a boundary slot.
pub fn format_hhmm(minutes: Minutes) -> String {
    format!(
        "{:02}:{:02}",
        minutes / MINUTES_PER_HOUR,
        minutes % MINUTES_PER_HOUR
    )
}

/// Parse the end of a slot. `"23:59"` is the day boundary.
pub fn parse_slot_end(s: &str) -> Result<Minutes> {
    if s == DISPLAY_DAY_END {
        return Ok(DAY_END);
    }
    parse_hhmm(s)
}

/// Format the end of a slot. The day boundary is written as `"23:59"`.
pub fn format_slot_end(minutes: Minutes) -> String {
    if minutes >= DAY_END {
        DISPLAY_DAY_END.to_string()
    } else {
        format_hhmm(minutes)
    }
}

/// A half-open interval `[start, end)` of minutes within one day.
///
/// `title` and `color` are display metadata; the interval algebra ignores them
/// and drops them from its results.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SlotRecord", into = "SlotRecord")]
pub struct TimeSlot {
    pub start: Minutes,
    pub end: Minutes,
    pub title: Option<String>,
    pub color: Option<String>,
}

impl TimeSlot {
    /// Build a slot, enforcing `start < end <= 1440`.
    pub fn new(start: Minutes, end: Minutes) -> Result<Self> {
        if start >= end || end > DAY_END {
            return Err(ValidationError::InvalidInterval { start, end });
        }
        Ok(Self::span(start, end))
    }

    /// Build a slot from boundary strings, e.g. `("09:00", "10:30")`.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_hhmm(start)?, parse_slot_end(end)?)
    }

    /// `[0, 1440)`.
    pub fn whole_day() -> Self {
        Self::span(DAY_START, DAY_END)
    }

    /// Unchecked constructor for values already known to satisfy the invariant.
    pub(crate) fn span(start: Minutes, end: Minutes) -> Self {
        debug_assert!(start < end && end <= DAY_END);
        Self {
            start,
            end,
            title: None,
            color: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn duration_minutes(&self) -> u32 {
        u32::from(self.end.saturating_sub(self.start))
    }

    /// `(end - start) / 60`.
    pub fn duration_hours(&self) -> f64 {
        f64::from(self.duration_minutes()) / f64::from(MINUTES_PER_HOUR)
    }

    pub fn is_whole_day(&self) -> bool {
        self.start == DAY_START && self.end == DAY_END
    }
}

/// Wire form of a [`TimeSlot`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SlotRecord {
    start: String,
    end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
}

impl TryFrom<SlotRecord> for TimeSlot {
    type Error = ValidationError;

    fn try_from(record: SlotRecord) -> Result<Self> {
        let mut slot = TimeSlot::parse(&record.start, &record.end)?;
        slot.title = record.title;
        slot.color = record.color;
        Ok(slot)
    }
}

impl From<TimeSlot> for SlotRecord {
    fn from(slot: TimeSlot) -> Self {
        Self {
            start: format_hhmm(slot.start),
            end: format_slot_end(slot.end),
            title: slot.title,
            color: slot.color,
        }
    }
}
