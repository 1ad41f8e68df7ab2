//! Calendar events as immutable snapshots supplied by the persistence layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::recurrence::RecurrenceRule;
use crate::time::TimeSlot;

/// Opaque user identifier.
pub type UserId = String;

/// A calendar event owned by one user.
///
/// `start_date..=end_date` bounds the event: outside it the event is never
/// active. `slots` is a fixed intraday pattern reused on every active date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub owner: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub slots: Vec<TimeSlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<RecurrenceRule>,
}

impl Event {
    /// A timed event with no slots yet. Fails if `start_date > end_date`.
    pub fn new(owner: impl Into<UserId>, start_date: NaiveDate, end_date: NaiveDate) -> Result<Self> {
        let mut event = Self::on(owner, start_date);
        event.end_date = end_date;
        event.validate()?;
        Ok(event)
    }

    /// A one-day event.
    pub fn on(owner: impl Into<UserId>, date: NaiveDate) -> Self {
        Self {
            id: None,
            owner: owner.into(),
            title: None,
            category: None,
            color: None,
            start_date: date,
            end_date: date,
            all_day: false,
            slots: Vec::new(),
            recurrence: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn all_day(mut self) -> Self {
        self.all_day = true;
        self
    }

    pub fn with_slot(mut self, slot: TimeSlot) -> Self {
        self.slots.push(slot);
        self
    }

    pub fn with_recurrence(mut self, rule: RecurrenceRule) -> Self {
        self.recurrence = Some(rule);
        self
    }

    /// Check the date range and recurrence sets. Slots are validated when built.
    pub fn validate(&self) -> Result<()> {
        if self.start_date > self.end_date {
            return Err(ValidationError::InvalidDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        if let Some(rule) = &self.recurrence {
            rule.validate()?;
        }
        Ok(())
    }

    /// Whether the event's date range touches `[start, end]` (inclusive).
    pub fn overlaps_range(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && self.end_date >= start
    }
}
