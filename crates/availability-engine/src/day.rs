//! Per-user busy/free partition of a single day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::dates_between;
use crate::event::Event;
use crate::interval::{complement_day, merge_overlapping, total_hours};
use crate::recurrence::slots_for_date;
use crate::time::TimeSlot;

/// One busy slot before merging, tagged with the event it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusyEntry {
    pub slot: TimeSlot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A user's day split into merged busy slots and their complement.
///
/// `busy_slots` and `free_slots` partition `[0, 1440)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub busy_slots: Vec<TimeSlot>,
    pub free_slots: Vec<TimeSlot>,
    /// Unmerged busy slots with their event metadata, in event order.
    pub busy_entries: Vec<BusyEntry>,
}

impl DayAvailability {
    pub fn total_busy_hours(&self) -> f64 {
        total_hours(&self.busy_slots)
    }

    pub fn total_free_hours(&self) -> f64 {
        total_hours(&self.free_slots)
    }

    /// Unmerged busy slots carrying their event's title and color.
    pub fn annotated_busy_slots(&self) -> Vec<TimeSlot> {
        self.busy_entries
            .iter()
            .map(|entry| TimeSlot {
                title: entry.title.clone(),
                color: entry.color.clone(),
                ..entry.slot.clone()
            })
            .collect()
    }

    /// No busy slots at all.
    pub fn is_fully_free(&self) -> bool {
        self.busy_slots.is_empty()
    }
}

/// Collect the slots of every event active on `date`, merge them, and take the
/// complement within the day.
pub fn compute_day_availability(events: &[Event], date: NaiveDate) -> DayAvailability {
    let busy_entries: Vec<BusyEntry> = events
        .iter()
        .flat_map(|event| {
            slots_for_date(event, date)
                .into_iter()
                .map(move |slot| annotate(event, slot))
        })
        .collect();

    let raw: Vec<TimeSlot> = busy_entries.iter().map(|e| e.slot.clone()).collect();
    let busy_slots = merge_overlapping(&raw);
    let free_slots = complement_day(&busy_slots);

    DayAvailability {
        date,
        busy_slots,
        free_slots,
        busy_entries,
    }
}

/// One [`DayAvailability`] per date in `[start, end]`.
pub fn compute_range_availability(
    events: &[Event],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<DayAvailability> {
    let relevant: Vec<Event> = events
        .iter()
        .filter(|e| e.overlaps_range(start, end))
        .cloned()
        .collect();

    dates_between(start, end)
        .map(|date| compute_day_availability(&relevant, date))
        .collect()
}

fn annotate(event: &Event, slot: TimeSlot) -> BusyEntry {
    let title = slot.title.clone().or_else(|| event.title.clone());
    let color = slot.color.clone().or_else(|| event.color.clone());
    BusyEntry {
        slot,
        event_id: event.id.clone(),
        title,
        category: event.category.clone(),
        color,
    }
}
