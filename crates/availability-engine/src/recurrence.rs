//! Recurrence matching: decides whether an event applies to a calendar date.
//!
//! Rules are day filters rather than instance generators. An event's date range
//! bounds every rule, `until` cuts it short, and an empty day filter matches
//! every day of the frequency. Weekdays are numbered 0=Sunday..6=Saturday.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::dates_between;
use crate::error::{Result, ValidationError};
use crate::event::Event;
use crate::time::TimeSlot;

/// How often a recurring event repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    /// Missing or unrecognised frequency. Matches every day in range.
    #[default]
    #[serde(other)]
    Unspecified,
}

/// A day-filter recurrence pattern.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecurrenceRule {
    pub enabled: bool,
    pub frequency: Frequency,
    /// 0=Sunday..6=Saturday. Empty means no filter.
    pub days_of_week: BTreeSet<u8>,
    /// 1..=31. Empty means no filter.
    pub days_of_month: BTreeSet<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub until: Option<NaiveDate>,
}

impl RecurrenceRule {
    pub fn daily() -> Self {
        Self::enabled_with(Frequency::Daily)
    }

    /// Weekly on the given weekdays (0=Sunday..6=Saturday).
    pub fn weekly(days: impl IntoIterator<Item = u8>) -> Self {
        Self {
            days_of_week: days.into_iter().collect(),
            ..Self::enabled_with(Frequency::Weekly)
        }
    }

    /// Monthly on the given days of the month (1..=31).
    pub fn monthly(days: impl IntoIterator<Item = u8>) -> Self {
        Self {
            days_of_month: days.into_iter().collect(),
            ..Self::enabled_with(Frequency::Monthly)
        }
    }

    fn enabled_with(frequency: Frequency) -> Self {
        Self {
            enabled: true,
            frequency,
            ..Self::default()
        }
    }

    pub fn until(mut self, date: NaiveDate) -> Self {
        self.until = Some(date);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(day) = self.days_of_week.iter().find(|d| **d > 6) {
            return Err(ValidationError::InvalidRecurrence(format!(
                "day of week {day} is outside 0..=6"
            )));
        }
        if let Some(day) = self.days_of_month.iter().find(|d| !(1..=31).contains(*d)) {
            return Err(ValidationError::InvalidRecurrence(format!(
                "day of month {day} is outside 1..=31"
            )));
        }
        Ok(())
    }

    /// Whether the rule's own filter admits `date`. Ignores the event range.
    pub fn matches(&self, date: NaiveDate) -> bool {
        if let Some(until) = self.until {
            if date > until {
                return false;
            }
        }

        match self.frequency {
            Frequency::Daily => true,
            Frequency::Weekly => {
                self.days_of_week.is_empty() || self.days_of_week.contains(&weekday_index(date))
            }
            Frequency::Monthly => {
                // day() is 1..=31 and always fits.
                self.days_of_month.is_empty() || self.days_of_month.contains(&(date.day() as u8))
            }
            Frequency::Unspecified => true,
        }
    }
}

/// 0=Sunday..6=Saturday.
pub fn weekday_index(date: NaiveDate) -> u8 {
    // num_days_from_sunday() is 0..=6.
    date.weekday().num_days_from_sunday() as u8
}

/// Whether `event` applies on `date`.
///
/// Outside the event's inclusive date range it never does. Without an enabled
/// rule it applies on every day in range.
pub fn is_active_on_date(event: &Event, date: NaiveDate) -> bool {
    if date < event.start_date || date > event.end_date {
        return false;
    }

    match &event.recurrence {
        Some(rule) if rule.enabled => rule.matches(date),
        _ => true,
    }
}

/// The event's busy slots on `date`.
///
/// Inactive → `[]`. All-day → `[00:00, 24:00)` regardless of `slots`.
/// Otherwise the event's slots verbatim.
pub fn slots_for_date(event: &Event, date: NaiveDate) -> Vec<TimeSlot> {
    if !is_active_on_date(event, date) {
        return Vec::new();
    }
    if event.all_day {
        return vec![TimeSlot::whole_day()];
    }
    event.slots.clone()
}

/// Dates in `[start, end]` on which `event` is active, in order.
pub fn active_dates(event: &Event, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let from = start.max(event.start_date);
    let to = end.min(event.end_date);
    dates_between(from, to)
        .filter(|date| is_active_on_date(event, *date))
        .collect()
}
